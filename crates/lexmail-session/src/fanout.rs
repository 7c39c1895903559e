//! Fan-out/fan-in over independent fallible futures.

use std::future::Future;

use futures::future::join_all;

/// Drive every future concurrently and wait for all of them to settle.
///
/// A failing slot does not cancel the others. Results come back in the
/// order the futures were supplied, whatever order they completed in.
pub async fn settle_all<I, F, T, E>(tasks: I) -> Vec<Result<T, E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    join_all(tasks).await
}
