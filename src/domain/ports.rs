use crate::domain::model::{Car, CarFilter, CarUpdate};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn car_info_url(&self) -> &str;
    fn max_workers(&self) -> usize;

    fn queue_capacity(&self) -> usize {
        self.max_workers().saturating_mul(10)
    }

    fn request_timeout(&self) -> Option<Duration> {
        None
    }
}

/// 外部車輛資訊服務；回傳尚未驗證的 JSON 文件
#[async_trait]
pub trait CarInfoClient: Send + Sync {
    async fn fetch(&self, reg_num: &str) -> Result<serde_json::Value>;
}

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn create_cars(&self, cars: &[Car]) -> Result<()>;
    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn update(&self, update: CarUpdate) -> Result<()>;
}
