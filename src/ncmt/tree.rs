//! Iterative, bottom-up construction of the coded tree.
//!
//! - **Push** appends hashed leaves in non-decreasing namespace order and
//!   keeps the namespace range index current.
//! - **Build** erasure-extends the leaves, batches `batch_size / 2` original
//!   leaves with their `batch_size / 2` parity leaves into each node of
//!   layer 0, then repeats extend-and-batch on every new layer until a single
//!   node (the root) remains.
//!
//! Layers are caches of the build: every build starts from the leaves again,
//! and pushing after a build drops the parity half of the leaf store along
//! with every cached layer.
//!
//! Topology is positional. Node `j` of layer `k` covers the children
//! `[j * b, (j + 1) * b)` of the level below (clipped to its width) on both
//! the original and the parity side, with `b = batch_size / 2`. The level
//! below layer 0 is the leaves.

use core::ops::Range;

use tracing::{debug, debug_span, trace, warn};

use crate::error::{LayerRef, NcmtError, NcmtResult};
use crate::hash::{HashFn, Sha256Hash};
use crate::rs::{Codec, Rsgf8};
use crate::utils::{maybe_par_map, short_hex, with_pool};

use super::layer::{extend_leaves, Layer};
use super::node::{hash_leaf, hash_node, Leaf, Node};
use super::options::Options;
use super::ranges::NamespaceRangeIndex;
use super::types::{LeafRange, NamespaceId, NamespacedData};

/// Where the tree is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeState {
    /// No leaves yet.
    Empty,
    /// Leaves present, no converged build on top of them.
    Accumulating,
    /// The last build reached a single root node.
    Built,
}

/// The level a node's children live in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Below {
    /// Original leaves and parity leaves.
    Leaves,
    /// Layer `k` and extended layer `k`.
    Layer(usize),
}

/// Children of a node: the same index range on the original side and on
/// the parity side of the level below.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Children {
    pub below: Below,
    pub range: Range<usize>,
}

/// Namespaced coded Merkle tree.
#[derive(Debug)]
pub struct Ncmt<H = Sha256Hash, C = Rsgf8> {
    leaves: Vec<Leaf>,
    parity_leaves: Vec<Leaf>,
    layers: Vec<Layer>,
    extended_layers: Vec<Layer>,
    ranges: NamespaceRangeIndex,
    original_width: usize,
    opts: Options<H, C>,
}

impl Ncmt {
    /// An empty tree with default options.
    pub fn new() -> Self {
        Self::from_valid_options(Options::default())
    }
}

impl Default for Ncmt {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HashFn, C: Codec> Ncmt<H, C> {
    /// An empty tree with the given options.
    pub fn with_options(opts: Options<H, C>) -> NcmtResult<Self> {
        opts.validate()?;
        Ok(Self::from_valid_options(opts))
    }

    fn from_valid_options(opts: Options<H, C>) -> Self {
        Self {
            leaves: Vec::new(),
            parity_leaves: Vec::new(),
            layers: Vec::new(),
            extended_layers: Vec::new(),
            ranges: NamespaceRangeIndex::new(),
            original_width: 0,
            opts,
        }
    }

    /// Root hash of the tree.
    ///
    /// - Without any cached layer: the digest of the empty input.
    /// - With a converged build: the root node's stored hash.
    /// - With a partial build (top layer wider than one node): empty.
    pub fn root(&self) -> Vec<u8> {
        match self.layers.last() {
            None => H::empty().to_vec(),
            Some(top) if top.len() == 1 => top[0].hash.clone(),
            Some(_) => Vec::new(),
        }
    }

    /* ------------------------------ Pushing ------------------------------ */

    /// Append a data block as a new leaf.
    ///
    /// The namespace must have the configured width and must not sort
    /// before the previously pushed one. A rejected push changes nothing.
    pub fn push(&mut self, data: NamespacedData) -> NcmtResult<()> {
        let id = data.namespace_id();
        if id.size() != self.opts.namespace_size {
            return Err(NcmtError::InvalidNamespaceSize {
                expected: self.opts.namespace_size,
                got: id.size(),
            });
        }
        if let Some(last) = self.leaves.last() {
            if id < last.namespace_id() {
                return Err(NcmtError::OutOfOrderPush {
                    last: last.namespace_id().clone(),
                    got: id.clone(),
                });
            }
        }

        if !self.layers.is_empty() || !self.parity_leaves.is_empty() {
            trace!(width = self.original_width, "push after build, dropping cached layers");
            self.invalidate();
        }

        let index = self.leaves.len();
        let leaf = hash_leaf::<H>(data);
        self.ranges.record(leaf.namespace_id(), index);
        self.leaves.push(leaf);
        Ok(())
    }

    fn invalidate(&mut self) {
        self.parity_leaves.clear();
        self.layers.clear();
        self.extended_layers.clear();
        self.original_width = 0;
    }

    /* ------------------------------ Building ----------------------------- */

    /// Consolidate, erasure-extend and hash the leaves until the root is
    /// produced, and return it. Any previously cached layers are discarded.
    ///
    /// On a codec failure the layers finished so far stay cached and
    /// [`Ncmt::root`] reports an empty or empty-input hash; call `build`
    /// again once the cause is fixed.
    pub fn build(&mut self) -> NcmtResult<Vec<u8>> {
        let span = debug_span!(
            "ncmt_build",
            leaves = self.leaves.len(),
            batch_size = self.opts.batch_size
        );
        let _enter = span.enter();

        if self.leaves.is_empty() {
            warn!("build rejected: no leaves");
            return Err(NcmtError::NoLeaves);
        }
        if self.leaves.len() % self.opts.batch_size != 0 {
            warn!("build rejected: leaf count not divisible by batch size");
            return Err(NcmtError::UnbatchableLeafCount {
                leaves: self.leaves.len(),
                batch_size: self.opts.batch_size,
            });
        }

        self.invalidate();
        self.original_width = self.leaves.len();
        debug!(half_batch = self.opts.half_batch(), "building tree");

        match self.opts.pool.clone() {
            Some(cfg) => with_pool(&cfg, || self.grow())??,
            None => self.grow()?,
        }

        let root = self.root();
        debug!(
            layers = self.layers.len(),
            root = %short_hex(&root, 2 * self.opts.namespace_size + 4),
            "tree built"
        );
        Ok(root)
    }

    fn grow(&mut self) -> NcmtResult<()> {
        self.consolidate_leaves()?;
        while self.layers.last().map_or(false, |top| top.len() > 1) {
            let next = self.consolidate_nodes()?;
            self.layers.push(next);
        }
        Ok(())
    }

    /// Extend the leaves and batch originals with their parity into layer 0.
    fn consolidate_leaves(&mut self) -> NcmtResult<()> {
        let extended = extend_leaves::<H, _>(&self.leaves, &self.opts.codec).map_err(|source| {
            warn!(error = %source, "leaf extension failed");
            NcmtError::Codec {
                layer: LayerRef::Leaves,
                source,
            }
        })?;

        let first = hash_batches::<H, Leaf>(
            &self.leaves,
            &extended,
            self.opts.half_batch(),
            self.opts.par_threshold,
        )?;
        trace!(layer = 0, width = first.len(), "consolidated leaves");

        self.parity_leaves = extended;
        self.layers.push(first);
        Ok(())
    }

    /// Extend the newest layer and batch it with its parity into the next.
    fn consolidate_nodes(&mut self) -> NcmtResult<Layer> {
        let k = self.layers.len().checked_sub(1).ok_or(NcmtError::NoLeaves)?;
        let latest = &self.layers[k];

        let extended = latest.extend(&self.opts.codec).map_err(|source| {
            warn!(layer = k, error = %source, "layer extension failed");
            NcmtError::Codec {
                layer: LayerRef::Nodes(k),
                source,
            }
        })?;

        let next = hash_batches::<H, Node>(
            latest.nodes(),
            extended.nodes(),
            self.opts.half_batch(),
            self.opts.par_threshold,
        )?;
        trace!(layer = k + 1, width = next.len(), "consolidated nodes");

        self.extended_layers.push(extended);
        Ok(next)
    }

    /* ------------------------------ Accessors ---------------------------- */

    /// Current state derived from the cached data.
    pub fn state(&self) -> TreeState {
        if self.leaves.is_empty() {
            TreeState::Empty
        } else if self.layers.last().map_or(false, |top| top.len() == 1) {
            TreeState::Built
        } else {
            TreeState::Accumulating
        }
    }

    /// Original leaves, in push order.
    #[inline]
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// Parity leaves of the last build, index-aligned with [`Ncmt::leaves`].
    #[inline]
    pub fn parity_leaves(&self) -> &[Leaf] {
        &self.parity_leaves
    }

    /// The whole leaf store: originals followed by parity.
    pub fn all_leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.leaves.iter().chain(self.parity_leaves.iter())
    }

    /// Node layers, bottom-up. `layers()[0]` is built from the leaves.
    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// `extended_layers()[k]` is the parity of `layers()[k]`.
    #[inline]
    pub fn extended_layers(&self) -> &[Layer] {
        &self.extended_layers
    }

    /// Leaf count at the time of the last build (0 when not built).
    #[inline]
    pub fn original_width(&self) -> usize {
        self.original_width
    }

    #[inline]
    pub fn options(&self) -> &Options<H, C> {
        &self.opts
    }

    /// Leaf range `[start, end)` carrying `id`, if any.
    #[inline]
    pub fn namespace_range(&self, id: &NamespaceId) -> Option<LeafRange> {
        self.ranges.get(id)
    }

    #[inline]
    pub fn namespace_ranges(&self) -> &NamespaceRangeIndex {
        &self.ranges
    }

    /* ------------------------------ Topology ----------------------------- */

    /// Children of node `index` in layer `layer`.
    pub fn children(&self, layer: usize, index: usize) -> Option<Children> {
        let width = self.layers.get(layer)?.len();
        if index >= width {
            return None;
        }
        let (below, below_width) = match layer {
            0 => (Below::Leaves, self.leaves.len()),
            k => (Below::Layer(k - 1), self.layers[k - 1].len()),
        };
        let half = self.opts.half_batch();
        let start = index * half;
        let end = (start + half).min(below_width);
        Some(Children {
            below,
            range: start..end,
        })
    }

    /// The nodes hashed into node `index` of layer `layer`, in hashing
    /// order: originals first, then their parity.
    pub fn child_nodes(&self, layer: usize, index: usize) -> Option<Vec<&Node>> {
        let Children { below, range } = self.children(layer, index)?;
        let nodes: Vec<&Node> = match below {
            Below::Leaves => self.leaves[range.clone()]
                .iter()
                .chain(self.parity_leaves.get(range)?)
                .map(Leaf::node)
                .collect(),
            Below::Layer(k) => self.layers[k][range.clone()]
                .iter()
                .chain(self.extended_layers.get(k)?.get(range)?)
                .collect(),
        };
        Some(nodes)
    }

    /// Position of the parent (in the next layer up) of item `index`.
    #[inline]
    pub fn parent_index(&self, index: usize) -> usize {
        index / self.opts.half_batch()
    }
}

/// Hash `originals[i..i+half] ++ extended[i..i+half]` for every stride `i`.
///
/// Batches are independent, so they may be hashed in parallel; the result
/// keeps batch order.
fn hash_batches<H, T>(
    originals: &[T],
    extended: &[T],
    half: usize,
    par_threshold: usize,
) -> NcmtResult<Layer>
where
    H: HashFn,
    T: AsRef<Node> + Sync,
{
    let batches: Vec<(&[T], &[T])> = originals.chunks(half).zip(extended.chunks(half)).collect();
    let nodes: Option<Vec<Node>> = maybe_par_map(&batches, par_threshold, |(orig, ext)| {
        hash_node::<H, _>(orig.iter().chain(ext.iter()).map(|item| item.as_ref()))
    })
    .into_iter()
    .collect();
    nodes.map(Layer::new).ok_or(NcmtError::NoLeaves)
}

/* --------------------------------- Tests ----------------------------------- */
