//! Node and leaf commitments.
//!
//! Every stored hash has the same layout:
//!
//! ```text
//! stored = min_ns || max_ns || H(preimage)
//! ```
//!
//! - **Leaf**: `preimage = ns || payload`, and `min_ns == max_ns == ns`.
//! - **Node**: `preimage = child_0.stored || child_1.stored || ...`, with
//!   `min_ns = child_0.min` and `max_ns = child_last.max`.
//!
//! Children are assumed to be presorted by namespace, so the first child
//! carries the minimum and the last child the maximum. Child order is part of
//! the preimage: reordering children changes the parent hash.

use crate::hash::HashFn;

use super::types::{NamespaceId, NamespacedData};

/// A hashed unit of the tree: `(hash, min, max)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    pub hash: Vec<u8>,
    pub min: NamespaceId,
    pub max: NamespaceId,
}

impl Node {
    #[inline]
    pub fn new(hash: Vec<u8>, min: NamespaceId, max: NamespaceId) -> Self {
        Self { hash, min, max }
    }

    /// The digest part of the stored hash (everything after `min || max`).
    #[inline]
    pub fn digest(&self) -> &[u8] {
        let prefix = self.min.size() + self.max.size();
        self.hash.get(prefix..).unwrap_or_default()
    }
}

/// A node that also owns the namespaced payload it commits to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    node: Node,
    data: NamespacedData,
}

impl Leaf {
    #[inline]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[inline]
    pub fn data(&self) -> &NamespacedData {
        &self.data
    }

    #[inline]
    pub fn namespace_id(&self) -> &NamespaceId {
        self.data.namespace_id()
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        self.data.payload()
    }

    #[inline]
    pub fn hash(&self) -> &[u8] {
        &self.node.hash
    }
}

impl AsRef<Node> for Node {
    #[inline]
    fn as_ref(&self) -> &Node {
        self
    }
}

impl AsRef<Node> for Leaf {
    #[inline]
    fn as_ref(&self) -> &Node {
        &self.node
    }
}

#[inline]
fn range_prefix(min: &NamespaceId, max: &NamespaceId) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(min.size() + max.size());
    prefix.extend_from_slice(min.as_bytes());
    prefix.extend_from_slice(max.as_bytes());
    prefix
}

/// Hash a data block into a leaf.
pub fn hash_leaf<H: HashFn>(data: NamespacedData) -> Leaf {
    let ns = data.namespace_id().clone();
    let mut h = H::new();
    h.update(ns.as_bytes());
    h.update(data.payload());
    let hash = h.finalize_with_prefix(&range_prefix(&ns, &ns));
    Leaf {
        node: Node::new(hash, ns.clone(), ns),
        data,
    }
}

/// Hash an ordered, non-empty run of children into their parent.
///
/// Returns `None` when `children` is empty.
pub fn hash_node<'a, H, I>(children: I) -> Option<Node>
where
    H: HashFn,
    I: IntoIterator<Item = &'a Node>,
{
    let mut it = children.into_iter();
    let first = it.next()?;
    let mut last = first;
    let mut h = H::new();
    h.update(&first.hash);
    for child in it {
        h.update(&child.hash);
        last = child;
    }
    let min = first.min.clone();
    let max = last.max.clone();
    let hash = h.finalize_with_prefix(&range_prefix(&min, &max));
    Some(Node::new(hash, min, max))
}

/// Wrap codec output back into a leaf that keeps `source`'s namespace.
///
/// The resulting leaf's hash commits to the parity payload under the
/// inherited namespace, exactly as if it had been pushed.
pub(crate) fn parity_leaf<H: HashFn>(source: &Leaf, parity: Vec<u8>) -> Leaf {
    hash_leaf::<H>(NamespacedData::new(source.namespace_id().clone(), parity))
}

/* --------------------------------- Tests ----------------------------------- */
