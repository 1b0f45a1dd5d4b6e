//! Per-view data loading: `Idle -> Loading -> Ready | Failed`.
//!
//! A load is started once when a view is entered. Leaving the view aborts the
//! in-flight request and bumps the generation, so a late response can never
//! land in a view the user already left.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Ready(_) | LoadState::Failed(_))
    }
}

/// Identifies one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct ViewState<T> {
    state: LoadState<T>,
    generation: u64,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
            generation: 0,
        }
    }
}

impl<T> ViewState<T> {
    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Start loading if nothing was loaded since the view was entered
    pub fn begin(&mut self) -> Option<Ticket> {
        match self.state {
            LoadState::Idle => Some(self.start()),
            _ => None,
        }
    }

    /// Explicit refresh; supersedes any load still running
    pub fn reload(&mut self) -> Ticket {
        self.start()
    }

    fn start(&mut self) -> Ticket {
        self.generation += 1;
        self.state = LoadState::Loading;
        Ticket(self.generation)
    }

    /// Store the outcome of the load identified by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when the ticket is stale.
    pub fn complete<E: Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool {
        if ticket.0 != self.generation || !matches!(self.state, LoadState::Loading) {
            log::debug!(
                "Dropping stale load result (ticket {}, current {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        self.state = match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => LoadState::Failed(e.to_string()),
        };
        true
    }

    /// Leave the view: forget the data and invalidate outstanding tickets
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = LoadState::Idle;
    }
}

/// Runs the load for one view on the tokio runtime
#[derive(Debug)]
pub struct ViewLoader<T> {
    view: Arc<Mutex<ViewState<T>>>,
    task: Option<JoinHandle<()>>,
}

impl<T> Default for ViewLoader<T> {
    fn default() -> Self {
        Self {
            view: Arc::new(Mutex::new(ViewState::default())),
            task: None,
        }
    }
}

impl<T: Send + 'static> ViewLoader<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the view. Spawns `fetch` unless a load already happened since
    /// the last `leave`; returns whether a load was started.
    pub async fn enter<F, E>(&mut self, fetch: F) -> bool
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let Some(ticket) = self.view.lock().await.begin() else {
            return false;
        };
        let view = Arc::clone(&self.view);
        self.task = Some(tokio::spawn(async move {
            let result = fetch.await;
            if let Err(e) = &result {
                log::warn!("View load failed: {e}");
            }
            view.lock().await.complete(ticket, result);
        }));
        true
    }

    /// Wait for the running load, if any, to settle
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.as_mut() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    log::error!("View load task panicked: {e}");
                }
            }
            self.task = None;
        }
    }

    /// Leave the view, cancelling whatever is still in flight
    pub async fn leave(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.view.lock().await.reset();
    }

    pub async fn snapshot(&self) -> LoadState<T>
    where
        T: Clone,
    {
        self.view.lock().await.state().clone()
    }
}

impl<T> Drop for ViewLoader<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[test]
    fn begin_only_once_per_visit() {
        let mut view: ViewState<u32> = ViewState::default();
        let ticket = view.begin().unwrap();
        assert_eq!(view.state(), &LoadState::Loading);
        assert!(view.begin().is_none());

        assert!(view.complete::<String>(ticket, Ok(7)));
        assert_eq!(view.state(), &LoadState::Ready(7));
        assert!(view.begin().is_none());

        view.reset();
        assert_eq!(view.state(), &LoadState::Idle);
        assert!(view.begin().is_some());
    }

    #[test]
    fn failure_keeps_the_message() {
        let mut view: ViewState<u32> = ViewState::default();
        let ticket = view.begin().unwrap();
        assert!(view.complete(ticket, Err("Network error: timeout")));
        assert_eq!(
            view.state(),
            &LoadState::Failed("Network error: timeout".to_string())
        );
        assert!(view.state().is_settled());
    }

    #[test]
    fn stale_ticket_is_ignored_after_leaving() {
        let mut view: ViewState<&str> = ViewState::default();
        let old = view.begin().unwrap();
        view.reset();
        let new = view.begin().unwrap();

        assert!(!view.complete::<String>(old, Ok("stale")));
        assert_eq!(view.state(), &LoadState::Loading);
        assert!(view.complete::<String>(new, Ok("fresh")));
        assert_eq!(view.state(), &LoadState::Ready("fresh"));
    }

    #[test]
    fn reload_supersedes_running_load() {
        let mut view: ViewState<u8> = ViewState::default();
        let first = view.begin().unwrap();
        let second = view.reload();
        assert!(!view.complete::<String>(first, Ok(1)));
        assert!(view.complete::<String>(second, Ok(2)));
        assert_eq!(view.state(), &LoadState::Ready(2));
    }

    #[tokio::test]
    async fn loader_settles_to_ready() {
        let mut loader: ViewLoader<Vec<u32>> = ViewLoader::new();
        assert!(loader.enter(async { Ok::<_, String>(vec![1, 2]) }).await);
        loader.finished().await;
        assert_eq!(loader.snapshot().await, LoadState::Ready(vec![1, 2]));

        // Second entry without leaving does not refetch
        assert!(!loader.enter(async { Ok::<_, String>(vec![3]) }).await);
    }

    #[tokio::test]
    async fn leaving_drops_the_late_response() {
        let (tx, rx) = oneshot::channel::<u32>();
        let mut loader: ViewLoader<u32> = ViewLoader::new();
        loader
            .enter(async move { rx.await.map_err(|e| e.to_string()) })
            .await;
        assert_eq!(loader.snapshot().await, LoadState::Loading);

        loader.leave().await;
        // The aborted task no longer owns the receiver
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(tx.send(99).is_err());
        assert_eq!(loader.snapshot().await, LoadState::Idle);
    }

    #[test]
    fn loader_works_on_a_plain_test_runtime() {
        tokio_test::block_on(async {
            let mut loader: ViewLoader<&'static str> = ViewLoader::new();
            loader.enter(async { Err::<&str, _>("boom") }).await;
            loader.finished().await;
            assert_eq!(loader.snapshot().await, LoadState::Failed("boom".to_string()));
        });
    }
}
