// Fan-out: one spawned task per URL, gated by a semaphore

use linktally_scanner::{LinkCounter, TaskOutcome};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::debug;

/// One input line and its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTask {
    pub url: String,
    pub index: usize,
}

/// A task that has been handed to the runtime, paired with the handle
/// that will resolve to its outcome.
#[derive(Debug)]
pub struct Dispatched {
    pub task: UrlTask,
    pub handle: JoinHandle<TaskOutcome>,
}

pub struct Dispatcher {
    counter: LinkCounter,
    semaphore: Arc<Semaphore>,
    concurrency: usize,
}

impl Dispatcher {
    /// `concurrency` caps the number of fetches in flight; zero is treated as one.
    pub fn new(counter: LinkCounter, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            counter,
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        }
    }

    /// Spawn every URL immediately and return the handles in input order.
    ///
    /// Must be called from within a tokio runtime. Tasks beyond the
    /// concurrency limit are spawned right away but park on the semaphore
    /// until a permit frees up.
    pub fn dispatch(&self, urls: Vec<String>) -> Vec<Dispatched> {
        debug!(
            "Dispatching {} URLs with concurrency {}",
            urls.len(),
            self.concurrency
        );

        urls.into_iter()
            .enumerate()
            .map(|(index, url)| {
                let task = UrlTask { url, index };
                let handle = self.spawn(&task);
                Dispatched { task, handle }
            })
            .collect()
    }

    fn spawn(&self, task: &UrlTask) -> JoinHandle<TaskOutcome> {
        let counter = self.counter.clone();
        let semaphore = self.semaphore.clone();
        let url = task.url.clone();

        tokio::spawn(async move {
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => {
                    return TaskOutcome::failure(url, "Dispatcher semaphore closed".to_string());
                }
            };

            counter.process(&url).await
        })
    }
}
