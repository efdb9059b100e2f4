use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};

pub type RequestId = u64;

#[derive(Debug)]
struct Completion {
    id: RequestId,
    text: String,
}

/// Decrements the in-flight count when a worker ends, including on panic.
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runs queries on tokio tasks and hands their text back to the UI.
///
/// Every dispatch gets a fresh id. Only the completion of the most recently
/// started query is ever delivered; completions of older queries are
/// dropped, so overlapping queries can't overwrite a newer result.
pub struct QueryDispatcher {
    next_id: RequestId,
    latest: Option<RequestId>,
    in_flight: Arc<AtomicUsize>,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl Default for QueryDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryDispatcher {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            next_id: 0,
            latest: None,
            in_flight: Arc::new(AtomicUsize::new(0)),
            tx,
            rx,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn dispatch<F>(&mut self, work: F) -> RequestId
    where
        F: Future<Output = String> + Send + 'static,
    {
        self.next_id += 1;
        let id = self.next_id;
        self.latest = Some(id);

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        let tx = self.tx.clone();

        debug!("Dispatching query {}", id);
        tokio::spawn(async move {
            let _guard = guard;
            let text = work.await;
            // The receiver lives as long as the dispatcher; a send error only
            // means the screen was torn down.
            let _ = tx.send(Completion { id, text });
        });

        id
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    /// Non-blocking; returns the result of the latest query if it has arrived.
    pub fn try_complete(&mut self) -> Option<String> {
        loop {
            match self.rx.try_recv() {
                Ok(completion) => {
                    if let Some(text) = self.accept(completion) {
                        return Some(text);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Waits for the latest query's result, skipping stale completions.
    pub async fn next_completion(&mut self) -> Option<String> {
        while let Some(completion) = self.rx.recv().await {
            if let Some(text) = self.accept(completion) {
                return Some(text);
            }
        }
        None
    }

    fn accept(&mut self, completion: Completion) -> Option<String> {
        if Some(completion.id) == self.latest {
            Some(completion.text)
        } else {
            debug!(
                "Discarding stale result of query {} (latest is {:?})",
                completion.id, self.latest
            );
            None
        }
    }
}
