use crate::core::enrichment::EnrichmentPool;
use crate::core::{Car, CarFilter, CarInfoClient, CarRepository, CarUpdate};
use crate::utils::error::{CatalogError, Result};

pub struct CatalogService<C: CarInfoClient, R: CarRepository> {
    pool: EnrichmentPool<C>,
    repository: R,
}

impl<C: CarInfoClient + 'static, R: CarRepository> CatalogService<C, R> {
    pub fn new(pool: EnrichmentPool<C>, repository: R) -> Self {
        Self { pool, repository }
    }

    /// 補全後整批寫入；任何一筆失敗就不寫入任何資料
    pub async fn create(&self, reg_nums: &[String]) -> Result<Vec<Car>> {
        if reg_nums.is_empty() {
            return Err(CatalogError::ValidationError {
                message: "reg_nums field is required".to_string(),
            });
        }

        let cars = self.pool.enrich(reg_nums).await?;
        self.repository.create_cars(&cars).await?;
        tracing::info!("Stored {} cars", cars.len());
        Ok(cars)
    }

    pub async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>> {
        self.repository.list(filter).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await
    }

    pub async fn update(&self, update: CarUpdate) -> Result<()> {
        self.repository.update(update).await
    }
}
