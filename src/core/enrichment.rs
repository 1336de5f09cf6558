use crate::core::assembler::assemble;
use crate::domain::model::{Car, LookupTask};
use crate::domain::ports::{CarInfoClient, ConfigProvider};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_positive_number, validate_reg_nums};
use std::sync::{Arc, OnceLock};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// 固定大小的補全工作池
///
/// 每個批次建立 `pool_size` 個 worker，從容量為 `queue_capacity` 的有界佇列取工作。
/// 輸出順序與輸入一致；任何一個工作失敗就取消整個批次，只回傳第一個錯誤。
pub struct EnrichmentPool<C: CarInfoClient> {
    client: Arc<C>,
    pool_size: usize,
    queue_capacity: usize,
}

impl<C: CarInfoClient + 'static> EnrichmentPool<C> {
    /// 設定來源另有 1..=100 的上限；工作池本身只要求 `pool_size >= 1` 且佇列放得下每個 worker
    pub fn new(client: C, pool_size: usize, queue_capacity: usize) -> Result<Self> {
        validate_positive_number("pool_size", pool_size, 1)?;
        validate_positive_number("queue_capacity", queue_capacity, pool_size)?;
        Ok(Self {
            client: Arc::new(client),
            pool_size,
            queue_capacity,
        })
    }

    pub fn from_config(client: C, config: &impl ConfigProvider) -> Result<Self> {
        Self::new(client, config.max_workers(), config.queue_capacity())
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub async fn enrich(&self, reg_nums: &[String]) -> Result<Vec<Car>> {
        self.enrich_with_token(reg_nums, &CancellationToken::new())
            .await
    }

    /// 與 [`enrich`](Self::enrich) 相同，但批次會跟著 `parent` 一起取消（例如呼叫端的期限）
    pub async fn enrich_with_token(
        &self,
        reg_nums: &[String],
        parent: &CancellationToken,
    ) -> Result<Vec<Car>> {
        validate_reg_nums(reg_nums)?;
        if reg_nums.is_empty() {
            return Ok(Vec::new());
        }

        let total = reg_nums.len();
        let workers_count = self.pool_size.min(total);
        tracing::info!(
            "Enriching {} registration numbers with {} workers",
            total,
            workers_count
        );

        let token = parent.child_token();
        let first_error = Arc::new(OnceLock::new());
        let (tx, rx) = mpsc::channel::<LookupTask>(self.queue_capacity);
        let queue = Arc::new(Mutex::new(rx));

        let mut workers = JoinSet::new();
        for worker_id in 0..workers_count {
            workers.spawn(run_worker(
                worker_id,
                Arc::clone(&self.client),
                Arc::clone(&queue),
                token.clone(),
                Arc::clone(&first_error),
            ));
        }
        drop(queue);

        // 佇列滿時在此等待，不丟棄工作
        for task in LookupTask::batch(reg_nums) {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                sent = tx.send(task) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
        }
        drop(tx);

        let mut slots: Vec<Option<Car>> = vec![None; total];
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(completed) => {
                    for (index, car) in completed {
                        slots[index] = Some(car);
                    }
                }
                Err(join_err) => {
                    tracing::warn!("Enrichment worker aborted: {}", join_err);
                    let _ = first_error.set(CatalogError::WorkerFailed {
                        message: join_err.to_string(),
                    });
                    token.cancel();
                }
            }
        }

        if let Some(err) = Arc::into_inner(first_error).and_then(OnceLock::into_inner) {
            return Err(err);
        }

        // 所有欄位都已填滿時，呼叫端晚到的取消不影響結果
        match slots.into_iter().collect::<Option<Vec<Car>>>() {
            Some(cars) => {
                tracing::info!("Enriched {} cars", cars.len());
                Ok(cars)
            }
            None => {
                tracing::debug!("Enrichment batch cancelled by caller");
                Err(CatalogError::Cancelled)
            }
        }
    }
}

/// worker 主迴圈；回傳自己完成的 (index, Car)
async fn run_worker<C: CarInfoClient + ?Sized>(
    worker_id: usize,
    client: Arc<C>,
    queue: Arc<Mutex<mpsc::Receiver<LookupTask>>>,
    token: CancellationToken,
    first_error: Arc<OnceLock<CatalogError>>,
) -> Vec<(usize, Car)> {
    let mut completed = Vec::new();

    loop {
        let next = { queue.lock().await.recv().await };
        let Some(task) = next else {
            break;
        };

        // 已取消就不再發出請求
        if token.is_cancelled() {
            tracing::debug!(
                "Worker {} skipping {} after cancellation",
                worker_id,
                task.reg_num
            );
            break;
        }

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => Err(CatalogError::Cancelled),
            result = lookup(client.as_ref(), &task) => result,
        };

        match outcome {
            Ok(car) => completed.push((task.index, car)),
            Err(CatalogError::Cancelled) => break,
            Err(err) => {
                tracing::warn!(
                    "Lookup for {} (position {}) failed: {}",
                    task.reg_num,
                    task.index,
                    err
                );
                let _ = first_error.set(err);
                token.cancel();
                break;
            }
        }
    }

    completed
}

async fn lookup<C: CarInfoClient + ?Sized>(client: &C, task: &LookupTask) -> Result<Car> {
    let doc = client.fetch(&task.reg_num).await?;
    assemble(&doc)
}
