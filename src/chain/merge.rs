//! Merge traversal: combine one property across a chain, nearer nodes
//! taking precedence over farther ones.
//!
//! The value for a node is `merge(value_of_rest_of_chain, local_value)`.
//! A node without a local value contributes nothing and the merge function
//! is not called for it. The farthest contributing node's value is used
//! as-is, borrowed straight from that node.

use std::borrow::Cow;
use std::convert::Infallible;

use super::resolve::Resolve;
use super::walker::ChainWalker;

/// Merge `property` across the chain starting at `start`.
///
/// `merge` is called as `merge(farther, nearer)`, at most once per visited
/// node. Returns `None` when no visited node has the property.
pub fn merge_chain<'a, N, R, V, P, M>(
    start: &'a N,
    resolver: R,
    property: P,
    mut merge: M,
) -> Option<Cow<'a, V>>
where
    R: Resolve<'a, N>,
    V: ToOwned + ?Sized + 'a,
    P: Fn(&'a N) -> Option<&'a V>,
    M: FnMut(Cow<'a, V>, &'a V) -> V::Owned,
{
    let merged = try_merge_chain(start, resolver, property, |farther, nearer| {
        Ok::<_, Infallible>(merge(farther, nearer))
    });
    match merged {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Fallible [`merge_chain`]. A merge error is returned as-is.
pub fn try_merge_chain<'a, N, R, V, P, M, E>(
    start: &'a N,
    resolver: R,
    property: P,
    mut merge: M,
) -> Result<Option<Cow<'a, V>>, E>
where
    R: Resolve<'a, N>,
    V: ToOwned + ?Sized + 'a,
    P: Fn(&'a N) -> Option<&'a V>,
    M: FnMut(Cow<'a, V>, &'a V) -> Result<V::Owned, E>,
{
    // The whole chain has to be known before folding from its far end.
    let locals: Vec<Option<&'a V>> = ChainWalker::new(start, resolver)
        .into_nodes()
        .map(&property)
        .collect();

    let mut merged: Option<Cow<'a, V>> = None;
    let mut merges = 0usize;
    for local in locals.iter().rev() {
        let Some(nearer) = *local else {
            continue;
        };
        merged = Some(match merged {
            None => Cow::Borrowed(nearer),
            Some(farther) => {
                merges += 1;
                Cow::Owned(merge(farther, nearer)?)
            }
        });
    }

    tracing::debug!(
        visited = locals.len(),
        merges,
        "merge traversal finished"
    );
    Ok(merged)
}
