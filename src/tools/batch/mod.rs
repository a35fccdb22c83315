//! Bounded-concurrency fan-out used for converting many pages at once.


use futures_util::stream::{self, StreamExt};
use std::future::Future;

/// Run `operation` over `items` with at most `concurrency` calls in flight.
///
/// Calls complete in any order; results come back in input order. A
/// concurrency of zero is treated as one.
pub async fn batch<T, F, Fut, R>(items: Vec<T>, concurrency: usize, operation: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let mut indexed: Vec<(usize, R)> = stream::iter(items.into_iter().enumerate())
        .map(|(idx, item)| {
            let call = operation(item);
            async move { (idx, call.await) }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, result)| result).collect()
}
