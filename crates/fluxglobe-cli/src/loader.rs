//! Background asset loads.
//!
//! Each load runs as its own Tokio task and reports back over a
//! single-slot `async_channel`, so independent assets download
//! concurrently while the caller awaits them in whatever order it needs.

use std::future::Future;
use std::sync::Arc;

use fluxglobe::{Client, MemoryCache};

/// Shared asset client.
pub type SharedClient = Arc<Client<MemoryCache>>;

/// Receiving end of one background load.
pub type LoadReceiver<T> = async_channel::Receiver<fluxglobe::Result<T>>;

/// Start `load` on the runtime and return where its result will arrive.
pub fn spawn_load<T, F, Fut>(client: &SharedClient, load: F) -> LoadReceiver<T>
where
    T: Send + 'static,
    F: FnOnce(SharedClient) -> Fut,
    Fut: Future<Output = fluxglobe::Result<T>> + Send + 'static,
{
    let (tx, rx) = async_channel::bounded(1);
    let task = load(Arc::clone(client));
    tokio::spawn(async move {
        let _ = tx.send(task.await).await;
    });
    rx
}
