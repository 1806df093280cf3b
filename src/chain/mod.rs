//! Chain traversal: walk single-parent links with cycle safety, either
//! calling back at each node or merging one property across the chain.
//!
//! Every entry point is the pairing of a resolution strategy with an
//! operation:
//!
//! | Function | Resolution | Operation |
//! |---|---|---|
//! | [`call_direct`], [`try_call_direct`] | [`DirectLink`] | sync call |
//! | [`call_direct_async`] | [`DirectLink`] | async call |
//! | [`merge_direct`], [`try_merge_direct`] | [`DirectLink`] | merge |
//! | [`call_by_id`], [`try_call_by_id`] | [`IdLink`] | sync call |
//! | [`call_by_id_async`] | [`IdLink`] | async call |
//! | [`merge_by_id`], [`try_merge_by_id`] | [`IdLink`] | merge |
//!
//! Fields are passed as accessors: a link accessor returns the next node
//! (direct) or the next node's identifier (by id), an `id` accessor returns
//! a node's own identifier, and a property accessor returns the value to
//! merge. `None` from any accessor means the field is absent.
//!
//! Custom resolvers or identifier matching go through the generic
//! [`fold_chain`], [`try_fold_chain_async`] and [`merge_chain`] family.

pub mod call;
pub mod merge;
pub mod resolve;
pub mod visited;
pub mod walker;

use std::borrow::Cow;
use std::future::Future;

pub use call::{fold_chain, try_fold_chain, try_fold_chain_async};
pub use merge::{merge_chain, try_merge_chain};
pub use resolve::{DirectLink, IdLink, Resolve, StrictMatch};
pub use visited::VisitedSet;
pub use walker::{ChainWalker, Lineage, Termination};

// ---------------------------------------------------------------------------
// Direct links
// ---------------------------------------------------------------------------

/// Thread an accumulator through `callback` along direct links.
///
/// Returns the accumulator produced at the node where the walk stopped.
pub fn call_direct<'a, N, A, D, L, F>(start: &'a N, link: L, data: &D, callback: F) -> A
where
    D: ?Sized,
    L: Fn(&'a N) -> Option<&'a N>,
    F: FnMut(&'a N, Option<A>, &D) -> A,
{
    fold_chain(start, DirectLink::new(link), data, callback)
}

pub fn try_call_direct<'a, N, A, D, E, L, F>(
    start: &'a N,
    link: L,
    data: &D,
    callback: F,
) -> Result<A, E>
where
    D: ?Sized,
    L: Fn(&'a N) -> Option<&'a N>,
    F: FnMut(&'a N, Option<A>, &D) -> Result<A, E>,
{
    try_fold_chain(start, DirectLink::new(link), data, callback)
}

/// [`try_call_direct`] with callbacks that return futures, awaited one at
/// a time in chain order.
pub async fn call_direct_async<'a, 'd, N, A, D, E, L, F, Fut>(
    start: &'a N,
    link: L,
    data: &'d D,
    callback: F,
) -> Result<A, E>
where
    D: ?Sized,
    L: Fn(&'a N) -> Option<&'a N>,
    F: FnMut(&'a N, Option<A>, &'d D) -> Fut,
    Fut: Future<Output = Result<A, E>>,
{
    try_fold_chain_async(start, DirectLink::new(link), data, callback).await
}

/// Merge `property` along direct links, nearer nodes overriding farther.
pub fn merge_direct<'a, N, V, L, P, M>(
    start: &'a N,
    link: L,
    property: P,
    merge: M,
) -> Option<Cow<'a, V>>
where
    V: ToOwned + ?Sized + 'a,
    L: Fn(&'a N) -> Option<&'a N>,
    P: Fn(&'a N) -> Option<&'a V>,
    M: FnMut(Cow<'a, V>, &'a V) -> V::Owned,
{
    merge_chain(start, DirectLink::new(link), property, merge)
}

pub fn try_merge_direct<'a, N, V, E, L, P, M>(
    start: &'a N,
    link: L,
    property: P,
    merge: M,
) -> Result<Option<Cow<'a, V>>, E>
where
    V: ToOwned + ?Sized + 'a,
    L: Fn(&'a N) -> Option<&'a N>,
    P: Fn(&'a N) -> Option<&'a V>,
    M: FnMut(Cow<'a, V>, &'a V) -> Result<V::Owned, E>,
{
    try_merge_chain(start, DirectLink::new(link), property, merge)
}

/// Every node reachable from `start` along direct links.
pub fn lineage_direct<'a, N, L>(start: &'a N, link: L) -> Lineage<'a, N>
where
    L: Fn(&'a N) -> Option<&'a N>,
{
    ChainWalker::new(start, DirectLink::new(link)).into_lineage()
}

// ---------------------------------------------------------------------------
// Identifier links
// ---------------------------------------------------------------------------

/// Thread an accumulator through `callback`, resolving each link by
/// looking its identifier up in `nodes`.
///
/// `start` need not be an element of `nodes`. Identifiers compare with
/// `PartialEq`; duplicates resolve to the first match in `nodes`.
pub fn call_by_id<'a, N, K, A, D, L, I, F>(
    start: &'a N,
    nodes: &'a [N],
    link: L,
    id: I,
    data: &D,
    callback: F,
) -> A
where
    K: PartialEq + ?Sized + 'a,
    D: ?Sized,
    L: Fn(&'a N) -> Option<&'a K>,
    I: Fn(&'a N) -> Option<&'a K>,
    F: FnMut(&'a N, Option<A>, &D) -> A,
{
    fold_chain(start, IdLink::new(nodes, link, id), data, callback)
}

pub fn try_call_by_id<'a, N, K, A, D, E, L, I, F>(
    start: &'a N,
    nodes: &'a [N],
    link: L,
    id: I,
    data: &D,
    callback: F,
) -> Result<A, E>
where
    K: PartialEq + ?Sized + 'a,
    D: ?Sized,
    L: Fn(&'a N) -> Option<&'a K>,
    I: Fn(&'a N) -> Option<&'a K>,
    F: FnMut(&'a N, Option<A>, &D) -> Result<A, E>,
{
    try_fold_chain(start, IdLink::new(nodes, link, id), data, callback)
}

pub async fn call_by_id_async<'a, 'd, N, K, A, D, E, L, I, F, Fut>(
    start: &'a N,
    nodes: &'a [N],
    link: L,
    id: I,
    data: &'d D,
    callback: F,
) -> Result<A, E>
where
    K: PartialEq + ?Sized + 'a,
    D: ?Sized,
    L: Fn(&'a N) -> Option<&'a K>,
    I: Fn(&'a N) -> Option<&'a K>,
    F: FnMut(&'a N, Option<A>, &'d D) -> Fut,
    Fut: Future<Output = Result<A, E>>,
{
    try_fold_chain_async(start, IdLink::new(nodes, link, id), data, callback).await
}

/// Merge `property` along identifier links, nearer nodes overriding farther.
pub fn merge_by_id<'a, N, K, V, L, I, P, M>(
    start: &'a N,
    nodes: &'a [N],
    link: L,
    id: I,
    property: P,
    merge: M,
) -> Option<Cow<'a, V>>
where
    K: PartialEq + ?Sized + 'a,
    V: ToOwned + ?Sized + 'a,
    L: Fn(&'a N) -> Option<&'a K>,
    I: Fn(&'a N) -> Option<&'a K>,
    P: Fn(&'a N) -> Option<&'a V>,
    M: FnMut(Cow<'a, V>, &'a V) -> V::Owned,
{
    merge_chain(start, IdLink::new(nodes, link, id), property, merge)
}

pub fn try_merge_by_id<'a, N, K, V, E, L, I, P, M>(
    start: &'a N,
    nodes: &'a [N],
    link: L,
    id: I,
    property: P,
    merge: M,
) -> Result<Option<Cow<'a, V>>, E>
where
    K: PartialEq + ?Sized + 'a,
    V: ToOwned + ?Sized + 'a,
    L: Fn(&'a N) -> Option<&'a K>,
    I: Fn(&'a N) -> Option<&'a K>,
    P: Fn(&'a N) -> Option<&'a V>,
    M: FnMut(Cow<'a, V>, &'a V) -> Result<V::Owned, E>,
{
    try_merge_chain(start, IdLink::new(nodes, link, id), property, merge)
}

/// Every node reachable from `start` along identifier links.
pub fn lineage_by_id<'a, N, K, L, I>(start: &'a N, nodes: &'a [N], link: L, id: I) -> Lineage<'a, N>
where
    K: PartialEq + ?Sized + 'a,
    L: Fn(&'a N) -> Option<&'a K>,
    I: Fn(&'a N) -> Option<&'a K>,
{
    ChainWalker::new(start, IdLink::new(nodes, link, id)).into_lineage()
}
