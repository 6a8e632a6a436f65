//! Layers and their erasure extensions.
//!
//! A [`Layer`] is an ordered run of nodes of equal height. Extending a layer
//! (or the leaves) feeds its raw symbols through a [`Codec`] and wraps each
//! parity symbol back into the same shape, position for position:
//!
//! - **Leaves**: the payloads are encoded; each parity leaf inherits the
//!   namespace of the leaf at the same index.
//! - **Nodes**: the stored hashes are encoded; each parity node keeps the
//!   `min`/`max` of the node at the same index and carries the encoded bytes
//!   as its `hash`. Parity nodes are not the hash of any children. They only
//!   exist as redundancy input to the next layer's hashing.

use core::ops::Deref;

use crate::hash::HashFn;
use crate::rs::{Codec, CodecError};

use super::node::{parity_leaf, Leaf, Node};

/// Ordered nodes of one tree height.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layer(Vec<Node>);

impl Layer {
    #[inline]
    pub fn new(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    /// Stored hashes of every node, in order.
    pub fn raw(&self) -> Vec<Vec<u8>> {
        self.0.iter().map(|n| n.hash.clone()).collect()
    }

    /// Erasure-extend this layer: one parity node per node.
    pub fn extend<C: Codec + ?Sized>(&self, codec: &C) -> Result<Layer, CodecError> {
        let encoded = codec.encode(&self.raw())?;
        if encoded.len() != self.0.len() {
            return Err(CodecError::Backend(format!(
                "codec returned {} parity symbols for {} inputs",
                encoded.len(),
                self.0.len()
            )));
        }
        let extended = self
            .0
            .iter()
            .zip(encoded)
            .map(|(n, hash)| Node::new(hash, n.min.clone(), n.max.clone()))
            .collect();
        Ok(Layer(extended))
    }
}

impl Deref for Layer {
    type Target = [Node];

    #[inline]
    fn deref(&self) -> &[Node] {
        &self.0
    }
}

impl From<Vec<Node>> for Layer {
    #[inline]
    fn from(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }
}

/// Payload bytes of every leaf, in order.
pub fn leaf_payloads(leaves: &[Leaf]) -> Vec<Vec<u8>> {
    leaves.iter().map(|lf| lf.payload().to_vec()).collect()
}

/// Erasure-extend leaves: one parity leaf per leaf, same namespace.
pub fn extend_leaves<H, C>(leaves: &[Leaf], codec: &C) -> Result<Vec<Leaf>, CodecError>
where
    H: HashFn,
    C: Codec + ?Sized,
{
    let encoded = codec.encode(&leaf_payloads(leaves))?;
    if encoded.len() != leaves.len() {
        return Err(CodecError::Backend(format!(
            "codec returned {} parity symbols for {} inputs",
            encoded.len(),
            leaves.len()
        )));
    }
    Ok(leaves
        .iter()
        .zip(encoded)
        .map(|(lf, parity)| parity_leaf::<H>(lf, parity))
        .collect())
}

/* --------------------------------- Tests ----------------------------------- */
