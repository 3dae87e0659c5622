//! Live values as streams.
//!
//! Observable state is held in `tokio::sync::watch` channels. A subscriber
//! first receives the current value, then one value per committed change.
//! Intermediate values may be skipped when the subscriber is slow, but the
//! latest value is always delivered.

use futures_util::Stream;
use futures_util::stream;
use tokio::sync::watch;

/// Turns a watch receiver into a stream of its values.
///
/// The stream yields the current value immediately and ends once the sender
/// is dropped.
pub fn watch_stream<T>(rx: watch::Receiver<T>) -> impl Stream<Item = T>
where
    T: Clone + Send + Sync,
{
    stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let value = rx.borrow_and_update().clone();
        Some((value, (rx, false)))
    })
}
