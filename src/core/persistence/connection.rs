//! Process-wide connection manager for the document store.
//!
//! The manager owns a single shared handle. The first caller to find the slot
//! empty starts a connection attempt and parks it in the slot; every caller
//! arriving while that attempt is in flight awaits the same attempt instead of
//! dialing the server again. A successful attempt is cached for the lifetime of
//! the manager. A failed attempt is delivered to all of its waiters and then
//! discarded, so the next `acquire()` dials again.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::error::StorageResult;

/// Something that can open a connection to a backing store.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// The shared handle produced by a successful connection.
    type Handle: Clone + Send + Sync + 'static;

    /// Open a new connection.
    async fn connect(&self) -> StorageResult<Self::Handle>;

    /// Human readable target, used in logs. Must not contain secrets.
    fn target(&self) -> String;
}

type Attempt<H> = Shared<BoxFuture<'static, StorageResult<H>>>;

enum Slot<H> {
    Empty,
    Connecting { generation: u64, attempt: Attempt<H> },
    Ready(H),
}

struct State<H> {
    slot: Slot<H>,
    generation: u64,
}

/// Single-flight, lazily connected handle cache.
pub struct ConnectionManager<C: Connector> {
    connector: Arc<C>,
    state: Mutex<State<C::Handle>>,
}

impl<C: Connector> ConnectionManager<C> {
    /// Create a manager. No connection is made until the first `acquire()`.
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            state: Mutex::new(State {
                slot: Slot::Empty,
                generation: 0,
            }),
        }
    }

    /// Get the shared handle, connecting first if needed.
    pub async fn acquire(&self) -> StorageResult<C::Handle> {
        let (generation, attempt) = {
            let mut state = self.state.lock().await;

            let in_flight = match &state.slot {
                Slot::Ready(handle) => return Ok(handle.clone()),
                Slot::Connecting {
                    generation,
                    attempt,
                } => Some((*generation, attempt.clone())),
                Slot::Empty => None,
            };

            match in_flight {
                Some(pending) => {
                    debug!("Joining in-flight connection attempt #{}", pending.0);
                    pending
                }
                None => {
                    state.generation += 1;
                    let generation = state.generation;
                    let connector = Arc::clone(&self.connector);
                    info!(
                        "Connecting to {} (attempt #{})",
                        self.connector.target(),
                        generation
                    );
                    let attempt = async move { connector.connect().await }
                        .boxed()
                        .shared();
                    state.slot = Slot::Connecting {
                        generation,
                        attempt: attempt.clone(),
                    };
                    (generation, attempt)
                }
            }
        };

        let result = attempt.await;

        let mut state = self.state.lock().await;
        let owns_slot = matches!(
            &state.slot,
            Slot::Connecting { generation: current, .. } if *current == generation
        );
        if owns_slot {
            state.slot = match &result {
                Ok(handle) => {
                    info!("Connected to {}", self.connector.target());
                    Slot::Ready(handle.clone())
                }
                Err(e) => {
                    error!(
                        "Connection to {} failed: {}",
                        self.connector.target(),
                        e
                    );
                    Slot::Empty
                }
            };
        }

        result
    }

    /// Whether a handle is cached.
    pub async fn is_connected(&self) -> bool {
        matches!(self.state.lock().await.slot, Slot::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persistence::StorageError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Connector that sleeps, counts its dials, and fails the first `failures` of them.
    struct FakeConnector {
        dials: Arc<AtomicUsize>,
        failures: usize,
    }

    #[async_trait]
    impl Connector for FakeConnector {
        type Handle = usize;

        async fn connect(&self) -> StorageResult<usize> {
            let dial = self.dials.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(Duration::from_millis(20)).await;
            if dial <= self.failures {
                Err(StorageError::connection(format!("refused on dial {dial}")))
            } else {
                Ok(dial)
            }
        }

        fn target(&self) -> String {
            "fake".to_string()
        }
    }

    fn manager(failures: usize) -> (ConnectionManager<FakeConnector>, Arc<AtomicUsize>) {
        let dials = Arc::new(AtomicUsize::new(0));
        let manager = ConnectionManager::new(FakeConnector {
            dials: Arc::clone(&dials),
            failures,
        });
        (manager, dials)
    }

    #[tokio::test]
    async fn test_lazy_until_first_acquire() {
        let (manager, dials) = manager(0);
        assert!(!manager.is_connected().await);
        assert_eq!(dials.load(Ordering::SeqCst), 0);

        assert_eq!(manager.acquire().await, Ok(1));
        assert!(manager.is_connected().await);
    }

    #[tokio::test]
    async fn test_concurrent_acquires_share_one_attempt() {
        let (manager, dials) = manager(0);

        let (a, b, c) = tokio::join!(manager.acquire(), manager.acquire(), manager.acquire());

        assert_eq!(a, Ok(1));
        assert_eq!(b, Ok(1));
        assert_eq!(c, Ok(1));
        assert_eq!(dials.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_handle_is_reused() {
        let (manager, dials) = manager(0);

        manager.acquire().await.unwrap();
        manager.acquire().await.unwrap();
        manager.acquire().await.unwrap();

        assert_eq!(dials.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_reaches_every_waiter_and_is_not_cached() {
        let (manager, dials) = manager(1);

        let (a, b) = tokio::join!(manager.acquire(), manager.acquire());
        assert!(matches!(a, Err(StorageError::Connection(_))));
        assert_eq!(a, b);
        assert_eq!(dials.load(Ordering::SeqCst), 1);
        assert!(!manager.is_connected().await);

        // The next call dials again and succeeds.
        assert_eq!(manager.acquire().await, Ok(2));
        assert_eq!(dials.load(Ordering::SeqCst), 2);
        assert!(manager.is_connected().await);
    }
}
