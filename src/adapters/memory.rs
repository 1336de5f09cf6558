use crate::core::{Car, CarFilter, CarRepository, CarUpdate};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    cars: Vec<Car>,
}

/// 記憶體內的車輛儲存，依 id 排序
#[derive(Debug, Clone, Default)]
pub struct InMemoryCarRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryCarRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn create_cars(&self, cars: &[Car]) -> Result<()> {
        let mut state = self.state.lock().await;

        for car in cars {
            // 車牌已存在就略過
            if state.cars.iter().any(|c| c.reg_num == car.reg_num) {
                tracing::debug!("Skipping duplicate reg_num {}", car.reg_num);
                continue;
            }
            state.next_id += 1;
            let mut stored = car.clone();
            stored.id = state.next_id;
            state.cars.push(stored);
        }

        Ok(())
    }

    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>> {
        let state = self.state.lock().await;

        Ok(state
            .cars
            .iter()
            .filter(|car| filter.matches(car))
            .skip(filter.offset())
            .take(filter.page_size)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().await;
        let position = state
            .cars
            .iter()
            .position(|c| c.id == id)
            .ok_or(CatalogError::NotFound { id })?;
        state.cars.remove(position);
        Ok(())
    }

    async fn update(&self, update: CarUpdate) -> Result<()> {
        let mut state = self.state.lock().await;
        // reg_num 唯一
        if state
            .cars
            .iter()
            .any(|c| c.reg_num == update.reg_num && c.id != update.id)
        {
            return Err(CatalogError::ValidationError {
                message: format!("reg_num {} already belongs to another car", update.reg_num),
            });
        }

        let slot = state
            .cars
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or(CatalogError::NotFound { id: update.id })?;
        *slot = update.into_car();
        Ok(())
    }
}
