//! Iterator types for persistent maps.

use archery::SharedPointerKind;

use crate::node::Node;

/// Iterator over references to key-value pairs in a
/// [`PersistentMap`](crate::PersistentMap).
///
/// Built by a depth-first, slot-order walk of the trie (spec's §4.8:
/// each inner node yields its children in array-index order, each
/// collision bucket yields its entries in storage order). The walk is
/// collected eagerly into a `Vec` at construction time rather than driven
/// lazily node-by-node: the underlying trie is an immutable, structurally
/// shared value, so a fresh `iter()` call is always cheap to re-issue and
/// there is no notion of a long-lived cursor to keep suspended.
pub struct Iter<'a, K, V, P: SharedPointerKind> {
    entries: std::vec::IntoIter<(&'a K, &'a V)>,
    _marker: std::marker::PhantomData<P>,
}

impl<'a, K, V, P: SharedPointerKind> Iter<'a, K, V, P> {
    /// Creates an iterator over every entry reachable from `root`.
    pub fn new(root: &'a Node<K, V, P>) -> Self {
        let mut entries = Vec::with_capacity(root.size());
        collect(root, &mut entries);
        Self {
            entries: entries.into_iter(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Iter<'a, K, V, P> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V, P: SharedPointerKind> ExactSizeIterator for Iter<'_, K, V, P> {}

fn collect<'a, K, V, P: SharedPointerKind>(node: &'a Node<K, V, P>, out: &mut Vec<(&'a K, &'a V)>) {
    match node {
        Node::Empty => {}
        Node::Leaf(entry) => out.push((&entry.key, &entry.value)),
        Node::Collision(bucket, _) => {
            out.extend(bucket.iter().map(|e| (&e.key, &e.value)));
        }
        Node::Bitmapped(data) => {
            for child in &data.children {
                collect(child, out);
            }
        }
        Node::Full(data) => {
            for child in &data.children {
                collect(child, out);
            }
        }
    }
}

/// Iterator over key references, derived from [`Iter`].
pub type Keys<'a, K, V, P> = std::iter::Map<Iter<'a, K, V, P>, fn((&'a K, &'a V)) -> &'a K>;

/// Iterator over value references, derived from [`Iter`].
pub type Values<'a, K, V, P> = std::iter::Map<Iter<'a, K, V, P>, fn((&'a K, &'a V)) -> &'a V>;
