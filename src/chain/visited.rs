//! Identity-keyed record of the nodes seen during one walk.

use std::collections::HashSet;

/// Nodes visited so far, in visit order, with hash-based membership.
///
/// Membership is by reference identity (the node's address), never by
/// field values: two structurally equal nodes at different addresses are
/// different nodes. Zero-sized node types share one address and therefore
/// one identity.
#[derive(Debug)]
pub struct VisitedSet<'a, N> {
    order: Vec<&'a N>,
    addrs: HashSet<usize>,
}

impl<'a, N> VisitedSet<'a, N> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            addrs: HashSet::new(),
        }
    }

    /// Record `node`. Returns `false` if it was already present.
    pub fn insert(&mut self, node: &'a N) -> bool {
        if !self.addrs.insert(addr_of(node)) {
            return false;
        }
        self.order.push(node);
        true
    }

    pub fn contains(&self, node: &N) -> bool {
        self.addrs.contains(&addr_of(node))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visited nodes, first visit first.
    pub fn nodes(&self) -> &[&'a N] {
        &self.order
    }

    pub fn into_nodes(self) -> Vec<&'a N> {
        self.order
    }
}

impl<N> Default for VisitedSet<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

fn addr_of<N>(node: &N) -> usize {
    node as *const N as usize
}
