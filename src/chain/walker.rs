//! The cycle-safe chain walker shared by every traversal.
//!
//! A walk starts at one node and follows a single link per step. It stops
//! when the resolver reports no successor, or when the successor is a node
//! this walk has already visited. Successors are resolved lazily, one
//! [`ChainWalker::step`] at a time, so a caller always finishes with the
//! current node before the next one is looked up.

use std::fmt;
use std::iter;

use super::resolve::Resolve;
use super::visited::VisitedSet;

// ---------------------------------------------------------------------------
// Termination
// ---------------------------------------------------------------------------

/// Why a walk stopped.
pub enum Termination<'a, N> {
    /// The last node has no successor.
    EndOfChain,
    /// The last node links back to `revisited`, which was already visited.
    Cycle { revisited: &'a N },
}

impl<N> Termination<'_, N> {
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle { .. })
    }
}

impl<N> Clone for Termination<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Termination<'_, N> {}

impl<N: fmt::Debug> fmt::Debug for Termination<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfChain => f.write_str("EndOfChain"),
            Self::Cycle { revisited } => f
                .debug_struct("Cycle")
                .field("revisited", revisited)
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Lineage
// ---------------------------------------------------------------------------

/// Every node a walk visited, start first, plus why it stopped.
#[derive(Debug)]
pub struct Lineage<'a, N> {
    pub nodes: Vec<&'a N>,
    pub termination: Termination<'a, N>,
}

impl<'a, N> Lineage<'a, N> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a walk visits at least its start node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<&'a N> {
        self.nodes.first().copied()
    }

    /// The node where the walk stopped.
    pub fn last(&self) -> Option<&'a N> {
        self.nodes.last().copied()
    }
}

// ---------------------------------------------------------------------------
// ChainWalker
// ---------------------------------------------------------------------------

/// Single-parent walk with identity-based cycle detection.
///
/// The start node counts as visited from construction. Each successful
/// [`step`](Self::step) moves to a node not seen before, so a walk over `N`
/// distinct reachable nodes makes at most `N` resolver calls that return
/// `Some`, plus one final call that ends it.
pub struct ChainWalker<'a, N, R> {
    current: &'a N,
    resolver: R,
    visited: VisitedSet<'a, N>,
    termination: Option<Termination<'a, N>>,
}

impl<'a, N, R> ChainWalker<'a, N, R>
where
    R: Resolve<'a, N>,
{
    pub fn new(start: &'a N, resolver: R) -> Self {
        let mut visited = VisitedSet::new();
        visited.insert(start);
        Self {
            current: start,
            resolver,
            visited,
            termination: None,
        }
    }

    /// The node most recently visited.
    pub fn current(&self) -> &'a N {
        self.current
    }

    /// Number of nodes visited so far, start included.
    pub fn depth(&self) -> usize {
        self.visited.len()
    }

    pub fn visited(&self) -> &[&'a N] {
        self.visited.nodes()
    }

    /// `None` while the walk can still advance.
    pub fn termination(&self) -> Option<Termination<'a, N>> {
        self.termination
    }

    /// Resolve the successor of the current node and move onto it.
    ///
    /// Returns `None` once the chain ends or loops back; every later call
    /// also returns `None` without consulting the resolver again.
    pub fn step(&mut self) -> Option<&'a N> {
        if self.termination.is_some() {
            return None;
        }

        match self.resolver.resolve(self.current) {
            None => {
                tracing::trace!(depth = self.depth(), "end of chain");
                self.termination = Some(Termination::EndOfChain);
                None
            }
            Some(next) if !self.visited.insert(next) => {
                tracing::debug!(
                    depth = self.depth(),
                    "chain links back to a visited node, stopping"
                );
                self.termination = Some(Termination::Cycle { revisited: next });
                None
            }
            Some(next) => {
                self.current = next;
                tracing::trace!(depth = self.depth(), "advanced along chain");
                Some(next)
            }
        }
    }

    /// The current node followed by every node still ahead of it.
    pub fn into_nodes(mut self) -> impl Iterator<Item = &'a N> {
        let first = self.current;
        iter::once(first).chain(iter::from_fn(move || self.step()))
    }

    /// Run the walk to completion.
    pub fn into_lineage(mut self) -> Lineage<'a, N> {
        while self.step().is_some() {}
        Lineage {
            termination: self.termination.unwrap_or(Termination::EndOfChain),
            nodes: self.visited.into_nodes(),
        }
    }
}
