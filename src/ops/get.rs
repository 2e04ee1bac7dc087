//! Lookup operation — traverses the trie to find a key.

use archery::SharedPointerKind;

use crate::node::{self, Node};

/// Searches for `key` in the subtree rooted at `node`.
///
/// Returns a reference to the value if found. Hash equality is rechecked
/// at leaves (a matching bitmap slot does not itself guarantee a matching
/// hash once a subtree has been shared across several keys).
pub fn get_recursive<'a, K, V, P>(
    node: &'a Node<K, V, P>,
    hash: u32,
    key: &K,
    shift: u32,
) -> Option<&'a V>
where
    K: Eq,
    P: SharedPointerKind,
{
    match node {
        Node::Empty => None,
        Node::Leaf(entry) => {
            if entry.hash == hash && entry.key == *key {
                Some(&entry.value)
            } else {
                None
            }
        }
        Node::Collision(bucket, node_hash) => {
            if hash != *node_hash {
                return None;
            }
            bucket
                .iter()
                .find(|e| e.key == *key)
                .map(|e| &e.value)
        }
        Node::Bitmapped(data) => {
            let frag = node::fragment(hash, shift);
            let bit = node::mask(frag);
            if data.bitmap & bit == 0 {
                return None;
            }
            let idx = node::compact_index(data.bitmap, bit);
            get_recursive(&data.children[idx], hash, key, shift + node::BITS_PER_LEVEL)
        }
        Node::Full(data) => {
            let frag = node::fragment(hash, shift);
            get_recursive(
                &data.children[frag as usize],
                hash,
                key,
                shift + node::BITS_PER_LEVEL,
            )
        }
    }
}
