//! Poll-until-terminal loop for asynchronous tasks

use std::time::Duration;

use async_trait::async_trait;
use rebyte_api_contract::Task;
use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::status::{StatusClass, StatusVocabulary};
use crate::{ClientApi, ClientApiError, ClientApiResult};

/// Narrow fetch seam the waiter polls through.
///
/// Every [`ClientApi`] gets this for free through the blanket impl; tests
/// can script a fetch sequence without implementing the full surface.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn fetch_task(&self, task_id: &str) -> ClientApiResult<Task>;
}

#[async_trait]
impl<C: ClientApi + ?Sized> TaskSource for C {
    async fn fetch_task(&self, task_id: &str) -> ClientApiResult<Task> {
        self.get_task(task_id).await
    }
}

/// Tuning knobs for [`wait_for_task`]
#[derive(Debug, Clone)]
pub struct WaitOptions {
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub vocabulary: StatusVocabulary,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            timeout: Duration::from_secs(600),
            vocabulary: StatusVocabulary::default(),
        }
    }
}

impl WaitOptions {
    /// Options with the default status vocabulary
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
            vocabulary: StatusVocabulary::default(),
        }
    }
}

/// Terminal outcomes of waiting on a task
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("task {task_id} failed with status '{status}': {message}")]
    TaskFailed {
        task_id: String,
        status: String,
        message: String,
    },

    #[error("task {task_id} timed out after {timeout:?}")]
    TaskTimedOut { task_id: String, timeout: Duration },

    #[error(transparent)]
    Client(#[from] ClientApiError),
}

/// Poll a task until it reaches a terminal status.
///
/// The deadline is checked before each fetch: the task is fetched at t=0
/// and every `poll_interval` after, and once the elapsed time exceeds
/// `timeout` no further fetch is issued. Each iteration performs exactly
/// one network read; fetch errors propagate immediately and are never
/// retried here, since retry policy belongs to the transport.
pub async fn wait_for_task<S>(
    source: &S,
    task_id: &str,
    options: &WaitOptions,
) -> Result<Task, WaitError>
where
    S: TaskSource + ?Sized,
{
    let started = Instant::now();

    loop {
        if started.elapsed() > options.timeout {
            return Err(WaitError::TaskTimedOut {
                task_id: task_id.to_string(),
                timeout: options.timeout,
            });
        }

        let task = source.fetch_task(task_id).await?;

        match options.vocabulary.classify(&task.status) {
            StatusClass::Succeeded => return Ok(task),
            StatusClass::Failed => {
                return Err(WaitError::TaskFailed {
                    task_id: task_id.to_string(),
                    status: task.status.clone(),
                    message: task.failure_message(),
                });
            }
            StatusClass::Pending => {
                debug!(task_id, status = %task.status, "task not terminal, polling again");
                sleep(options.poll_interval).await;
            }
        }
    }
}
