//! Next-node resolution strategies.
//!
//! A walk only ever asks one question of the data: "given this node, which
//! node comes next?" [`DirectLink`] answers it by reading a field that holds
//! the next node itself; [`IdLink`] reads an identifier and looks it up in a
//! flat collection.

use std::marker::PhantomData;

/// Produce the candidate successor of a node, or `None` at the end of a chain.
///
/// Resolvers only read; cycle handling belongs to the walker.
pub trait Resolve<'a, N> {
    fn resolve(&mut self, node: &'a N) -> Option<&'a N>;
}

// ---------------------------------------------------------------------------
// DirectLink
// ---------------------------------------------------------------------------

/// The link field holds the next node. Absence ends the chain.
#[derive(Debug, Clone)]
pub struct DirectLink<L> {
    link: L,
}

impl<L> DirectLink<L> {
    pub fn new<'a, N>(link: L) -> Self
    where
        N: 'a,
        L: Fn(&'a N) -> Option<&'a N>,
    {
        Self { link }
    }
}

impl<'a, N, L> Resolve<'a, N> for DirectLink<L>
where
    N: 'a,
    L: Fn(&'a N) -> Option<&'a N>,
{
    fn resolve(&mut self, node: &'a N) -> Option<&'a N> {
        (self.link)(node)
    }
}

// ---------------------------------------------------------------------------
// IdLink
// ---------------------------------------------------------------------------

/// Strict key comparison used by [`IdLink::new`].
pub type StrictMatch<K> = fn(&K, &K) -> bool;

/// The link field holds an identifier; the next node is the first element
/// of `nodes` whose identifier field matches it.
///
/// Identifiers are assumed unique within `nodes`. When they are not, the
/// first match in slice order wins. Nodes whose identifier field is absent
/// never match.
pub struct IdLink<'a, N, K: ?Sized, L, I, M> {
    nodes: &'a [N],
    link: L,
    id: I,
    matches: M,
    _key: PhantomData<fn(&K)>,
}

impl<'a, N, K, L, I> IdLink<'a, N, K, L, I, StrictMatch<K>>
where
    K: PartialEq + ?Sized + 'a,
    L: Fn(&'a N) -> Option<&'a K>,
    I: Fn(&'a N) -> Option<&'a K>,
{
    /// Match identifiers with `PartialEq` (same type, same value).
    pub fn new(nodes: &'a [N], link: L, id: I) -> Self {
        Self::with_matcher(nodes, link, id, <K as PartialEq>::eq)
    }
}

impl<'a, N, K, L, I, M> IdLink<'a, N, K, L, I, M>
where
    K: ?Sized + 'a,
    L: Fn(&'a N) -> Option<&'a K>,
    I: Fn(&'a N) -> Option<&'a K>,
    M: Fn(&K, &K) -> bool,
{
    /// Match identifiers with a custom predicate, called as
    /// `matches(candidate_id, link_value)`.
    pub fn with_matcher(nodes: &'a [N], link: L, id: I, matches: M) -> Self {
        Self {
            nodes,
            link,
            id,
            matches,
            _key: PhantomData,
        }
    }

    pub fn nodes(&self) -> &'a [N] {
        self.nodes
    }

    /// First node in collection order whose identifier matches `key`.
    pub fn lookup(&self, key: &K) -> Option<&'a N> {
        let nodes: &'a [N] = self.nodes;
        nodes.iter().find(|candidate| {
            (self.id)(*candidate).is_some_and(|candidate_id| (self.matches)(candidate_id, key))
        })
    }
}

impl<'a, N, K, L, I, M> Resolve<'a, N> for IdLink<'a, N, K, L, I, M>
where
    K: ?Sized + 'a,
    L: Fn(&'a N) -> Option<&'a K>,
    I: Fn(&'a N) -> Option<&'a K>,
    M: Fn(&K, &K) -> bool,
{
    fn resolve(&mut self, node: &'a N) -> Option<&'a N> {
        // An absent link must not reach the search: it would otherwise match
        // the first node whose own identifier is absent.
        let key = (self.link)(node)?;
        let found = self.lookup(key);
        if found.is_none() {
            tracing::trace!("link target not present in node collection");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug)]
    struct Boxed {
        name: &'static str,
        parent: Option<Box<Boxed>>,
    }

    fn parent(n: &Boxed) -> Option<&Boxed> {
        n.parent.as_deref()
    }

    #[derive(Debug)]
    struct Entry {
        id: Option<&'static str>,
        parent: Option<&'static str>,
        tag: u32,
    }

    fn entry(id: &'static str, parent: Option<&'static str>, tag: u32) -> Entry {
        Entry {
            id: Some(id),
            parent,
            tag,
        }
    }

    fn entry_id(e: &Entry) -> Option<&&'static str> {
        e.id.as_ref()
    }

    fn entry_parent(e: &Entry) -> Option<&&'static str> {
        e.parent.as_ref()
    }

    #[test]
    fn direct_link_reads_field() {
        let chain = Boxed {
            name: "leaf",
            parent: Some(Box::new(Boxed {
                name: "root",
                parent: None,
            })),
        };
        let mut link = DirectLink::new(parent);
        let next = link.resolve(&chain).unwrap();
        assert_eq!(next.name, "root");
        assert!(link.resolve(next).is_none());
    }

    #[test]
    fn id_link_finds_target() {
        let nodes = vec![entry("a", Some("b"), 0), entry("b", None, 1)];
        let mut link = IdLink::new(&nodes, entry_parent, entry_id);
        let next = link.resolve(&nodes[0]).unwrap();
        assert!(std::ptr::eq(next, &nodes[1]));
        assert!(link.resolve(&nodes[1]).is_none());
    }

    #[test]
    fn id_link_unknown_target_ends_chain() {
        let nodes = vec![entry("a", Some("missing"), 0)];
        let mut link = IdLink::new(&nodes, entry_parent, entry_id);
        assert!(link.resolve(&nodes[0]).is_none());
    }

    #[test]
    fn id_link_duplicate_ids_pick_first() {
        let nodes = vec![
            entry("a", Some("dup"), 0),
            entry("dup", None, 1),
            entry("dup", None, 2),
        ];
        let mut link = IdLink::new(&nodes, entry_parent, entry_id);
        assert_eq!(link.resolve(&nodes[0]).unwrap().tag, 1);
    }

    #[test]
    fn id_link_absent_link_skips_search() {
        let comparisons = Cell::new(0u32);
        let nodes = vec![
            Entry {
                id: None,
                parent: None,
                tag: 0,
            },
            entry("b", None, 1),
        ];
        let mut link = IdLink::with_matcher(
            &nodes,
            entry_parent,
            entry_id,
            |a: &&'static str, b: &&'static str| {
                comparisons.set(comparisons.get() + 1);
                a == b
            },
        );
        assert!(link.resolve(&nodes[0]).is_none());
        assert_eq!(comparisons.get(), 0);
    }

    #[test]
    fn id_link_absent_ids_never_match() {
        let nodes = vec![
            Entry {
                id: None,
                parent: None,
                tag: 0,
            },
            entry("child", Some("x"), 1),
        ];
        let link = IdLink::new(&nodes, entry_parent, entry_id);
        assert!(link.lookup(&"x").is_none());
    }

    #[test]
    fn custom_matcher_is_used() {
        let nodes = vec![entry("a", Some("B"), 0), entry("b", None, 1)];
        let mut link = IdLink::with_matcher(
            &nodes,
            entry_parent,
            entry_id,
            |candidate: &&'static str, key: &&'static str| candidate.eq_ignore_ascii_case(key),
        );
        assert_eq!(link.resolve(&nodes[0]).unwrap().tag, 1);
        assert_eq!(link.nodes().len(), 2);
    }
}
