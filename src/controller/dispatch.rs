use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::trace;

use crate::api::{fetch_collection, fetch_resources, Fetcher};
use crate::error::FetchError;
use crate::model::{PageEnvelope, Query, Resource, ResourceKind};

use super::detail::DetailFetch;
use super::list::CollectionFetch;

/// Work a controller wants done off the UI thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchRequest {
    Collection(CollectionFetch),
    Detail { kind: ResourceKind, fetch: DetailFetch },
}

/// A finished fetch, tagged with the input it was issued for.
#[derive(Debug)]
pub enum FetchOutcome {
    Collection {
        kind: ResourceKind,
        query: Query,
        result: Result<PageEnvelope, FetchError>,
    },
    Detail {
        kind: ResourceKind,
        slot: &'static str,
        href: String,
        result: Result<Vec<Resource>, FetchError>,
    },
}

/// Runs fetches on the tokio runtime and hands completions back to the UI thread.
///
/// Nothing is cancelled; outcomes that arrive late are discarded by the
/// receiving page or panel.
pub struct Dispatcher {
    fetcher: Arc<dyn Fetcher>,
    handle: tokio::runtime::Handle,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
    in_flight: usize,
}

impl Dispatcher {
    pub fn new(fetcher: Arc<dyn Fetcher>, handle: tokio::runtime::Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { fetcher, handle, tx, rx, in_flight: 0 }
    }

    pub fn dispatch(&mut self, requests: Vec<FetchRequest>) {
        for req in requests {
            self.spawn(req);
        }
    }

    fn spawn(&mut self, req: FetchRequest) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        self.in_flight += 1;
        trace!(?req, "spawning fetch");
        self.handle.spawn(async move {
            let outcome = match req {
                FetchRequest::Collection(CollectionFetch { kind, query }) => {
                    let result = fetch_collection(fetcher.as_ref(), kind, &query).await;
                    FetchOutcome::Collection { kind, query, result }
                }
                FetchRequest::Detail { kind, fetch } => {
                    let result = fetch_resources(fetcher.as_ref(), &fetch.href).await;
                    FetchOutcome::Detail { kind, slot: fetch.slot, href: fetch.href, result }
                }
            };
            // Receiver gone means the app is shutting down.
            let _ = tx.send(outcome);
        });
    }

    /// Drains completed fetches without blocking.
    pub fn poll(&mut self) -> Vec<FetchOutcome> {
        let mut done = Vec::new();
        // Drain up to 100 outcomes per poll to keep the loop responsive
        for _ in 0..100 {
            match self.rx.try_recv() {
                Ok(outcome) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    done.push(outcome);
                }
                Err(_) => break,
            }
        }
        done
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
