//! Insertion operation — path-copy insert with an identity-preserving
//! shortcut when nothing actually changes.

use std::hash::Hash;

use archery::{SharedPointer, SharedPointerKind};

use crate::node::{self, BitmappedData, Entry, FullData, Node, Single};

/// Outcome of a recursive insert.
pub enum Insert<K, V, P: SharedPointerKind> {
    /// The key was already present with an equal value — nothing to
    /// rebuild. Callers reuse the existing child pointer verbatim, which is
    /// how identity is preserved all the way up to the map's root (spec
    /// scenario F: re-inserting an identical binding is a no-op).
    Unchanged,
    /// The subtree changed.
    Changed {
        /// The freshly built node.
        node: Node<K, V, P>,
        /// `true` if this insert added a new key, `false` if it replaced
        /// an existing key's value.
        new_key: bool,
    },
}

/// Inserts `entry` into the subtree rooted at `node`.
pub fn insert_recursive<K, V, P>(node: &Node<K, V, P>, entry: Entry<K, V>, shift: u32) -> Insert<K, V, P>
where
    K: Hash + Eq,
    V: PartialEq,
    P: SharedPointerKind,
{
    match node {
        Node::Empty => Insert::Changed {
            node: Node::Leaf(SharedPointer::new(entry)),
            new_key: true,
        },
        Node::Leaf(existing) => insert_into_leaf(existing, entry, shift),
        Node::Collision(bucket, node_hash) => insert_into_collision(bucket, *node_hash, entry, shift),
        Node::Bitmapped(data) => insert_into_bitmapped(data, entry, shift),
        Node::Full(data) => insert_into_full(data, entry, shift),
    }
}

fn insert_into_leaf<K, V, P>(
    existing: &SharedPointer<Entry<K, V>, P>,
    entry: Entry<K, V>,
    shift: u32,
) -> Insert<K, V, P>
where
    K: Hash + Eq,
    V: PartialEq,
    P: SharedPointerKind,
{
    if existing.key == entry.key {
        if existing.value == entry.value {
            return Insert::Unchanged;
        }
        return Insert::Changed {
            node: Node::Leaf(SharedPointer::new(entry)),
            new_key: false,
        };
    }

    if existing.hash == entry.hash {
        let bucket = vec![SharedPointer::clone(existing), SharedPointer::new(entry)];
        return Insert::Changed {
            node: Node::Collision(SharedPointer::new(bucket), existing.hash),
            new_key: true,
        };
    }

    let node = promote(Single::Leaf(SharedPointer::clone(existing)), entry, shift);
    Insert::Changed { node, new_key: true }
}

fn insert_into_collision<K, V, P>(
    bucket: &SharedPointer<Vec<SharedPointer<Entry<K, V>, P>>, P>,
    node_hash: u32,
    entry: Entry<K, V>,
    shift: u32,
) -> Insert<K, V, P>
where
    K: Hash + Eq,
    V: PartialEq,
    P: SharedPointerKind,
{
    if entry.hash != node_hash {
        let node = promote(
            Single::Collision(SharedPointer::clone(bucket), node_hash),
            entry,
            shift,
        );
        return Insert::Changed { node, new_key: true };
    }

    if let Some(pos) = bucket.iter().position(|e| e.key == entry.key) {
        if bucket[pos].value == entry.value {
            return Insert::Unchanged;
        }
        let mut new_bucket = Vec::with_capacity(bucket.len());
        new_bucket.extend(bucket.iter().take(pos).cloned());
        new_bucket.push(SharedPointer::new(entry));
        new_bucket.extend(bucket.iter().skip(pos + 1).cloned());
        return Insert::Changed {
            node: Node::Collision(SharedPointer::new(new_bucket), node_hash),
            new_key: false,
        };
    }

    let mut new_bucket: Vec<_> = bucket.iter().cloned().collect();
    new_bucket.push(SharedPointer::new(entry));
    Insert::Changed {
        node: Node::Collision(SharedPointer::new(new_bucket), node_hash),
        new_key: true,
    }
}

fn insert_into_bitmapped<K, V, P>(
    data: &SharedPointer<BitmappedData<K, V, P>, P>,
    entry: Entry<K, V>,
    shift: u32,
) -> Insert<K, V, P>
where
    K: Hash + Eq,
    V: PartialEq,
    P: SharedPointerKind,
{
    let frag = node::fragment(entry.hash, shift);
    let bit = node::mask(frag);

    if data.bitmap & bit != 0 {
        let pos = node::compact_index(data.bitmap, bit);
        return match insert_recursive(&data.children[pos], entry, shift + node::BITS_PER_LEVEL) {
            Insert::Unchanged => Insert::Unchanged,
            Insert::Changed { node: child, new_key } => {
                let mut children = data.children.clone();
                children[pos] = SharedPointer::new(child);
                Insert::Changed {
                    node: Node::Bitmapped(SharedPointer::new(BitmappedData {
                        bitmap: data.bitmap,
                        children,
                        size: data.size + usize::from(new_key),
                    })),
                    new_key,
                }
            }
        };
    }

    let new_bitmap = data.bitmap | bit;
    let pos = node::compact_index(new_bitmap, bit);
    let mut children = Vec::with_capacity(data.children.len() + 1);
    children.extend(data.children[..pos].iter().cloned());
    children.push(SharedPointer::new(Node::Leaf(SharedPointer::new(entry))));
    children.extend(data.children[pos..].iter().cloned());

    let new_size = data.size + 1;
    let node = if new_bitmap == u32::MAX {
        // `children` is already in ascending fragment order because the
        // bitmap is now full: compact_index(full_bitmap, mask(i)) == i.
        Node::Full(SharedPointer::new(FullData {
            children,
            size: new_size,
        }))
    } else {
        Node::Bitmapped(SharedPointer::new(BitmappedData {
            bitmap: new_bitmap,
            children,
            size: new_size,
        }))
    };
    Insert::Changed { node, new_key: true }
}

fn insert_into_full<K, V, P>(
    data: &SharedPointer<FullData<K, V, P>, P>,
    entry: Entry<K, V>,
    shift: u32,
) -> Insert<K, V, P>
where
    K: Hash + Eq,
    V: PartialEq,
    P: SharedPointerKind,
{
    let frag = node::fragment(entry.hash, shift) as usize;
    match insert_recursive(&data.children[frag], entry, shift + node::BITS_PER_LEVEL) {
        Insert::Unchanged => Insert::Unchanged,
        Insert::Changed { node: child, new_key } => {
            let mut children = data.children.clone();
            children[frag] = SharedPointer::new(child);
            Insert::Changed {
                node: Node::Full(SharedPointer::new(FullData {
                    children,
                    size: data.size + usize::from(new_key),
                })),
                new_key,
            }
        }
    }
}

/// Builds a [`Node::Bitmapped`] (or, past the hash's width, a
/// [`Node::Collision`]) containing both `existing` and a newly inserted
/// `(key, hash, value)` that differs from every entry `existing` carries.
///
/// Descends one level at a time while the two hashes' fragments agree;
/// `shift > MAX_SHIFT` means every bit of both 32-bit hashes has been
/// consumed and they are in fact identical, so the only correct outcome is
/// a collision bucket (see [`node::MAX_SHIFT`]).
fn promote<K, V, P>(existing: Single<K, V, P>, new_entry: Entry<K, V>, shift: u32) -> Node<K, V, P>
where
    P: SharedPointerKind,
{
    if shift > node::MAX_SHIFT {
        let hash = existing.hash();
        let mut bucket = match existing {
            Single::Leaf(e) => vec![e],
            Single::Collision(bucket, _) => bucket.iter().cloned().collect(),
        };
        bucket.push(SharedPointer::new(new_entry));
        return Node::Collision(SharedPointer::new(bucket), hash);
    }

    let existing_frag = node::fragment(existing.hash(), shift);
    let new_frag = node::fragment(new_entry.hash, shift);
    let existing_len = existing.len();

    if existing_frag == new_frag {
        let child = promote(existing, new_entry, shift + node::BITS_PER_LEVEL);
        return Node::Bitmapped(SharedPointer::new(BitmappedData {
            bitmap: node::mask(existing_frag),
            children: vec![SharedPointer::new(child)],
            size: existing_len + 1,
        }));
    }

    let existing_child = SharedPointer::new(existing.into_node());
    let new_child = SharedPointer::new(Node::Leaf(SharedPointer::new(new_entry)));
    let children = if existing_frag < new_frag {
        vec![existing_child, new_child]
    } else {
        vec![new_child, existing_child]
    };
    Node::Bitmapped(SharedPointer::new(BitmappedData {
        bitmap: node::mask(existing_frag) | node::mask(new_frag),
        children,
        size: existing_len + 1,
    }))
}
