//! Namespaced Coded Merkle Tree (NCMT).
//!
//! A commitment over an ordered sequence of namespaced data blocks in which
//! every level is erasure-extended before it is hashed upward:
//!
//! - [`Ncmt::push`]  : append a data block (namespaces non-decreasing)
//! - [`Ncmt::build`] : extend, batch and hash layer by layer down to one root
//! - [`Ncmt::root`]  : `min_ns || max_ns || digest` of the whole tree
//!
//! ### Design
//! * **Hash layout:** every stored hash is `min || max || H(preimage)`; see
//!   [`node`].
//! * **Batching:** a node of layer `k` hashes `batch_size / 2` consecutive
//!   nodes of the level below followed by their `batch_size / 2` parity
//!   nodes. Layers shrink by `batch_size / 2` until one node remains.
//! * **Coding:** any [`Codec`](crate::rs::Codec) producing `N` parity symbols
//!   for `N` data symbols; the default is Reed–Solomon over GF(2^8).
//! * **Storage:** flat vectors per level. Parent/child relations are index
//!   arithmetic (see [`Ncmt::children`]).
//!
//! ### What this is (and isn't)
//! Construction and commitment only. There are no inclusion proofs, no
//! sampling, and no persistence; trees live in memory.

pub mod layer;
pub mod node;
pub mod options;
pub mod ranges;
pub mod tree;
pub mod types;

pub use layer::Layer;
pub use node::{hash_leaf, hash_node, Leaf, Node};
pub use options::{Options, DEFAULT_BATCH_SIZE, DEFAULT_NAMESPACE_SIZE};
pub use ranges::NamespaceRangeIndex;
pub use tree::{Below, Children, Ncmt, TreeState};
pub use types::{LeafRange, NamespaceId, NamespacedData};
