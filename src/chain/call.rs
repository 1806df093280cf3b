//! Call traversal: thread an accumulator through a callback, one node at a
//! time, from the start of the chain to wherever the walk stops.

use std::convert::Infallible;
use std::future::Future;

use super::resolve::Resolve;
use super::walker::ChainWalker;

/// Invoke `callback` once per visited node and return the value produced
/// for the last one.
///
/// The first invocation receives `None` as the previous accumulator. Each
/// node's callback runs before its successor is resolved.
pub fn fold_chain<'a, N, R, A, D, F>(start: &'a N, resolver: R, data: &D, mut callback: F) -> A
where
    R: Resolve<'a, N>,
    D: ?Sized,
    F: FnMut(&'a N, Option<A>, &D) -> A,
{
    let folded = try_fold_chain(start, resolver, data, |node, previous, data| {
        Ok::<_, Infallible>(callback(node, previous, data))
    });
    match folded {
        Ok(acc) => acc,
        Err(never) => match never {},
    }
}

/// Fallible [`fold_chain`]. The first callback error ends the walk and is
/// returned as-is; no partial accumulator survives.
pub fn try_fold_chain<'a, N, R, A, D, E, F>(
    start: &'a N,
    resolver: R,
    data: &D,
    mut callback: F,
) -> Result<A, E>
where
    R: Resolve<'a, N>,
    D: ?Sized,
    F: FnMut(&'a N, Option<A>, &D) -> Result<A, E>,
{
    let mut walker = ChainWalker::new(start, resolver);
    let mut acc = callback(walker.current(), None, data)?;
    while let Some(node) = walker.step() {
        acc = callback(node, Some(acc), data)?;
    }
    tracing::debug!(visited = walker.depth(), "call traversal finished");
    Ok(acc)
}

/// Asynchronous [`try_fold_chain`].
///
/// Each callback future is awaited to completion before the next node is
/// resolved, so callbacks never overlap and always complete in chain
/// order. Dropping the returned future abandons the walk.
pub async fn try_fold_chain_async<'a, 'd, N, R, A, D, E, F, Fut>(
    start: &'a N,
    resolver: R,
    data: &'d D,
    mut callback: F,
) -> Result<A, E>
where
    R: Resolve<'a, N>,
    D: ?Sized,
    F: FnMut(&'a N, Option<A>, &'d D) -> Fut,
    Fut: Future<Output = Result<A, E>>,
{
    let mut walker = ChainWalker::new(start, resolver);
    let mut acc = callback(walker.current(), None, data).await?;
    while let Some(node) = walker.step() {
        acc = callback(node, Some(acc), data).await?;
    }
    tracing::debug!(visited = walker.depth(), "async call traversal finished");
    Ok(acc)
}
