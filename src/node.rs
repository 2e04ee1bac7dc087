//! HAMT node types and bitmap helpers.

use archery::{SharedPointer, SharedPointerKind};

/// Bits per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Deepest shift value a [`Bitmapped`](Node::Bitmapped)/[`Full`](Node::Full)
/// node can sit at.
///
/// 32-bit hashes are consumed 5 bits at a time; `0, 5, 10, 15, 20, 25, 30`
/// is exactly 7 levels, matching the spec's maximum-depth invariant. At
/// shift 30 only the hash's top 2 bits survive the `& 0x1f` mask, which is
/// the "residual 2 bits" of the final level — no special-casing is needed
/// in [`fragment`], only this bound in the promotion path (see
/// [`crate::ops::insert`]).
pub const MAX_SHIFT: u32 = 30;

/// A stored key-value pair together with the 32-bit hash of its key.
///
/// Always kept behind a [`SharedPointer`] so that path-copying clones a
/// pointer, never `K`/`V` themselves.
pub struct Entry<K, V> {
    /// Precomputed 32-bit hash of the key.
    pub hash: u32,
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

/// The common supertype of [`Node::Leaf`] and [`Node::Collision`] — the two
/// variants that carry a stored hash and must be redistributed into a
/// freshly created [`Node::Bitmapped`] when a second, differently-hashed
/// entry needs to land at the same position.
pub enum Single<K, V, P: SharedPointerKind> {
    /// A single entry.
    Leaf(SharedPointer<Entry<K, V>, P>),
    /// A bucket of entries that all share one 32-bit hash.
    Collision(SharedPointer<Vec<SharedPointer<Entry<K, V>, P>>, P>, u32),
}

impl<K, V, P: SharedPointerKind> Single<K, V, P> {
    /// The hash shared by every entry in this single node.
    #[must_use]
    pub fn hash(&self) -> u32 {
        match self {
            Self::Leaf(e) => e.hash,
            Self::Collision(_, h) => *h,
        }
    }

    /// Number of entries carried by this node.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Collision(bucket, _) => bucket.len(),
        }
    }

    /// Converts this single node into a full [`Node`].
    #[must_use]
    pub fn into_node(self) -> Node<K, V, P> {
        match self {
            Self::Leaf(e) => Node::Leaf(e),
            Self::Collision(bucket, hash) => Node::Collision(bucket, hash),
        }
    }
}

impl<K, V, P: SharedPointerKind> Clone for Single<K, V, P> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(e) => Self::Leaf(SharedPointer::clone(e)),
            Self::Collision(b, h) => Self::Collision(SharedPointer::clone(b), *h),
        }
    }
}

/// Sparse inner node: a 32-bit occupancy bitmap plus a compact child array
/// sized to exactly `popcount(bitmap)` — the "allocate only what's
/// occupied" choice from the array-sizing open question, documented here
/// rather than always allocating a dense 32-slot array (see DESIGN.md).
pub struct BitmappedData<K, V, P: SharedPointerKind> {
    /// Occupancy bitmap; `popcount` is in `1..=31`.
    pub bitmap: u32,
    /// Children in bitmap-index order, one per set bit.
    pub children: Vec<SharedPointer<Node<K, V, P>, P>>,
    /// Total entries in this subtree, cached at construction.
    pub size: usize,
}

/// Dense inner node: exactly 32 non-empty children, implicit bitmap
/// `0xFFFF_FFFF`.
pub struct FullData<K, V, P: SharedPointerKind> {
    /// Exactly 32 children, no slot empty.
    pub children: Vec<SharedPointer<Node<K, V, P>, P>>,
    /// Total entries in this subtree, cached at construction.
    pub size: usize,
}

/// A node of the persistent trie.
///
/// Five variants, leaves first:
///
/// - [`Empty`](Self::Empty) — the canonical empty subtree.
/// - [`Leaf`](Self::Leaf) — a single `(key, hash, value)` triple.
/// - [`Collision`](Self::Collision) — a bucket of entries sharing one hash.
/// - [`Bitmapped`](Self::Bitmapped) — a sparse inner node, 1..31 children.
/// - [`Full`](Self::Full) — a dense inner node, always 32 children.
pub enum Node<K, V, P: SharedPointerKind> {
    /// The canonical empty subtree. Never appears as the child of an inner
    /// node — removals that would produce one trigger contraction instead.
    Empty,
    /// A single stored entry.
    Leaf(SharedPointer<Entry<K, V>, P>),
    /// A bucket of entries sharing one 32-bit hash. Bucket length is
    /// always `>= 2`; all stored hashes equal the carried `u32`.
    Collision(SharedPointer<Vec<SharedPointer<Entry<K, V>, P>>, P>, u32),
    /// A sparse inner node.
    Bitmapped(SharedPointer<BitmappedData<K, V, P>, P>),
    /// A dense inner node (all 32 slots occupied).
    Full(SharedPointer<FullData<K, V, P>, P>),
}

impl<K, V, P: SharedPointerKind> Node<K, V, P> {
    /// Total number of entries in this subtree.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Leaf(_) => 1,
            Self::Collision(bucket, _) => bucket.len(),
            Self::Bitmapped(data) => data.size,
            Self::Full(data) => data.size,
        }
    }
}

impl<K, V, P: SharedPointerKind> Clone for Node<K, V, P> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Leaf(e) => Self::Leaf(SharedPointer::clone(e)),
            Self::Collision(b, h) => Self::Collision(SharedPointer::clone(b), *h),
            Self::Bitmapped(d) => Self::Bitmapped(SharedPointer::clone(d)),
            Self::Full(d) => Self::Full(SharedPointer::clone(d)),
        }
    }
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash fragment at the given bit-shift depth.
#[inline]
#[must_use]
pub const fn fragment(hash: u32, shift: u32) -> u32 {
    (hash >> shift) & 0x1F
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compact index of `bit` within `bitmap`: the number of set
/// bits below `bit`.
#[inline]
#[must_use]
pub const fn compact_index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}
