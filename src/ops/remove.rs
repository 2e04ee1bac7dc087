//! Removal operation — path-copy delete with contraction to canonical form.

use archery::{SharedPointer, SharedPointerKind};

use crate::node::{self, BitmappedData, FullData, Node};

/// Outcome of a recursive remove.
pub enum Remove<K, V, P: SharedPointerKind> {
    /// The key was not present — the subtree is unchanged.
    NotFound,
    /// The key was removed; carries the replacement subtree, which is
    /// [`Node::Empty`] if nothing is left beneath this point.
    Removed(Node<K, V, P>),
}

/// Removes `key` (with hash `hash`) from the subtree rooted at `node`.
pub fn remove_recursive<K, V, P>(node: &Node<K, V, P>, hash: u32, key: &K, shift: u32) -> Remove<K, V, P>
where
    K: Eq,
    P: SharedPointerKind,
{
    match node {
        Node::Empty => Remove::NotFound,
        Node::Leaf(entry) => {
            if entry.hash == hash && entry.key == *key {
                Remove::Removed(Node::Empty)
            } else {
                Remove::NotFound
            }
        }
        Node::Collision(bucket, node_hash) => remove_from_collision(bucket, *node_hash, hash, key),
        Node::Bitmapped(data) => remove_from_bitmapped(data, hash, key, shift),
        Node::Full(data) => remove_from_full(data, hash, key, shift),
    }
}

fn remove_from_collision<K, V, P>(
    bucket: &SharedPointer<Vec<SharedPointer<crate::node::Entry<K, V>, P>>, P>,
    node_hash: u32,
    hash: u32,
    key: &K,
) -> Remove<K, V, P>
where
    K: Eq,
    P: SharedPointerKind,
{
    if hash != node_hash {
        return Remove::NotFound;
    }
    let Some(pos) = bucket.iter().position(|e| e.key == *key) else {
        return Remove::NotFound;
    };

    if bucket.len() == 2 {
        let remaining = SharedPointer::clone(&bucket[1 - pos]);
        return Remove::Removed(Node::Leaf(remaining));
    }

    let mut new_bucket = Vec::with_capacity(bucket.len() - 1);
    new_bucket.extend(bucket.iter().take(pos).cloned());
    new_bucket.extend(bucket.iter().skip(pos + 1).cloned());
    Remove::Removed(Node::Collision(SharedPointer::new(new_bucket), node_hash))
}

fn remove_from_bitmapped<K, V, P>(
    data: &SharedPointer<BitmappedData<K, V, P>, P>,
    hash: u32,
    key: &K,
    shift: u32,
) -> Remove<K, V, P>
where
    K: Eq,
    P: SharedPointerKind,
{
    let frag = node::fragment(hash, shift);
    let bit = node::mask(frag);
    if data.bitmap & bit == 0 {
        return Remove::NotFound;
    }
    let pos = node::compact_index(data.bitmap, bit);

    match remove_recursive(&data.children[pos], hash, key, shift + node::BITS_PER_LEVEL) {
        Remove::NotFound => Remove::NotFound,
        Remove::Removed(Node::Empty) => {
            let new_bitmap = data.bitmap & !bit;
            if new_bitmap == 0 {
                return Remove::Removed(Node::Empty);
            }
            let mut remaining = Vec::with_capacity(data.children.len() - 1);
            remaining.extend(data.children[..pos].iter().cloned());
            remaining.extend(data.children[pos + 1..].iter().cloned());

            if new_bitmap.count_ones() == 1 && matches!(&*remaining[0], Node::Leaf(_) | Node::Collision(..)) {
                // Contraction: exactly one child survives and it's a single
                // entry — it replaces this node directly rather than being
                // wrapped again. An inner (`Bitmapped`/`Full`) survivor is
                // NOT elevated: its children were placed with
                // `fragment(h, shift + BITS_PER_LEVEL)`, and promoting it up
                // one level would dispatch them with `fragment(h, shift)`
                // instead, silently misrouting every key beneath it.
                let sole = &remaining[0];
                return Remove::Removed((**sole).clone());
            }

            Remove::Removed(Node::Bitmapped(SharedPointer::new(BitmappedData {
                bitmap: new_bitmap,
                children: remaining,
                size: data.size - 1,
            })))
        }
        Remove::Removed(child) => {
            let mut children = data.children.clone();
            children[pos] = SharedPointer::new(child);
            Remove::Removed(Node::Bitmapped(SharedPointer::new(BitmappedData {
                bitmap: data.bitmap,
                children,
                size: data.size - 1,
            })))
        }
    }
}

fn remove_from_full<K, V, P>(
    data: &SharedPointer<FullData<K, V, P>, P>,
    hash: u32,
    key: &K,
    shift: u32,
) -> Remove<K, V, P>
where
    K: Eq,
    P: SharedPointerKind,
{
    let frag = node::fragment(hash, shift) as usize;

    match remove_recursive(&data.children[frag], hash, key, shift + node::BITS_PER_LEVEL) {
        Remove::NotFound => Remove::NotFound,
        Remove::Removed(Node::Empty) => {
            // A Full node always has 32 children, so losing exactly one
            // demotes it to a Bitmapped node with 31 — never triggers the
            // single-child contraction rule directly.
            let mut remaining = data.children.clone();
            remaining.remove(frag);
            Remove::Removed(Node::Bitmapped(SharedPointer::new(BitmappedData {
                bitmap: !node::mask(frag as u32),
                children: remaining,
                size: data.size - 1,
            })))
        }
        Remove::Removed(child) => {
            let mut children = data.children.clone();
            children[frag] = SharedPointer::new(child);
            Remove::Removed(Node::Full(SharedPointer::new(FullData {
                children,
                size: data.size - 1,
            })))
        }
    }
}
