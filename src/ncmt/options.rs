//! Tree configuration.
//!
//! Options are frozen when a tree is created. Defaults: batch size 4,
//! 8-byte namespaces, SHA-256, and the GF(2^8) Reed–Solomon codec.
//!
//! ```ignore
//! let opts = Options::default()
//!     .batch_size(8)
//!     .namespace_size(1)
//!     .hasher::<Blake3Hash>();
//! let tree = Ncmt::with_options(opts)?;
//! ```
//!
//! Environment overrides (see [`Options::from_env`]):
//! - `NCMT_BATCH_SIZE`:     even integer >= 4
//! - `NCMT_NAMESPACE_SIZE`: integer >= 1
//! - `NCMT_THREADS`, `NCMT_THREAD_NAME`: worker pool (see `PoolConfig`)

use core::fmt;
use core::marker::PhantomData;

use crate::error::{NcmtError, NcmtResult};
use crate::hash::{HashFn, Sha256Hash};
use crate::rs::{Codec, Rsgf8};
use crate::utils::PoolConfig;

pub const DEFAULT_BATCH_SIZE: usize = 4;
pub const DEFAULT_NAMESPACE_SIZE: usize = 8;

/// Below this many batches in a layer, hashing stays on the calling thread.
pub const DEFAULT_PAR_THRESHOLD: usize = 64;

/// Configuration of a namespaced coded Merkle tree.
///
/// `H` is the hash constructor: a fresh `H::new()` is used for every leaf and
/// every node.
pub struct Options<H = Sha256Hash, C = Rsgf8> {
    pub batch_size: usize,
    pub namespace_size: usize,
    pub codec: C,
    /// Worker pool for per-batch hashing; `None` uses the ambient pool.
    pub pool: Option<PoolConfig>,
    pub par_threshold: usize,
    hasher: PhantomData<fn() -> H>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            namespace_size: DEFAULT_NAMESPACE_SIZE,
            codec: Rsgf8::new(),
            pool: None,
            par_threshold: DEFAULT_PAR_THRESHOLD,
            hasher: PhantomData,
        }
    }
}

impl Options {
    /// Defaults overridden by `NCMT_*` environment variables.
    ///
    /// Unparseable values are ignored; range checks happen in
    /// [`Options::validate`].
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(n) = env_usize("NCMT_BATCH_SIZE") {
            opts.batch_size = n;
        }
        if let Some(n) = env_usize("NCMT_NAMESPACE_SIZE") {
            opts.namespace_size = n;
        }
        let pool = PoolConfig::from_env();
        if pool != PoolConfig::default() {
            opts.pool = Some(pool);
        }
        opts
    }
}

impl<H: HashFn, C: Codec> Options<H, C> {
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[inline]
    pub fn namespace_size(mut self, namespace_size: usize) -> Self {
        self.namespace_size = namespace_size;
        self
    }

    #[inline]
    pub fn pool(mut self, pool: PoolConfig) -> Self {
        self.pool = Some(pool);
        self
    }

    #[inline]
    pub fn par_threshold(mut self, batches: usize) -> Self {
        self.par_threshold = batches;
        self
    }

    /// Swap the erasure codec.
    pub fn codec<D: Codec>(self, codec: D) -> Options<H, D> {
        Options {
            batch_size: self.batch_size,
            namespace_size: self.namespace_size,
            codec,
            pool: self.pool,
            par_threshold: self.par_threshold,
            hasher: PhantomData,
        }
    }

    /// Swap the hash constructor.
    pub fn hasher<G: HashFn>(self) -> Options<G, C> {
        Options {
            batch_size: self.batch_size,
            namespace_size: self.namespace_size,
            codec: self.codec,
            pool: self.pool,
            par_threshold: self.par_threshold,
            hasher: PhantomData,
        }
    }

    /// Number of original items per batch (the other half is parity).
    #[inline]
    pub fn half_batch(&self) -> usize {
        self.batch_size / 2
    }

    pub fn validate(&self) -> NcmtResult<()> {
        if self.batch_size % 2 != 0 {
            return Err(NcmtError::InvalidOptions("batch_size must be even"));
        }
        // With one original child per node a layer never gets narrower.
        if self.batch_size < 4 {
            return Err(NcmtError::InvalidOptions("batch_size must be >= 4"));
        }
        if self.namespace_size == 0 {
            return Err(NcmtError::InvalidOptions("namespace_size must be >= 1"));
        }
        if self.pool.as_ref().and_then(|p| p.num_threads) == Some(0) {
            return Err(NcmtError::InvalidOptions("pool threads must be >= 1"));
        }
        Ok(())
    }
}

impl<H, C: fmt::Debug> fmt::Debug for Options<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("batch_size", &self.batch_size)
            .field("namespace_size", &self.namespace_size)
            .field("codec", &self.codec)
            .field("hasher", &core::any::type_name::<H>())
            .field("pool", &self.pool)
            .field("par_threshold", &self.par_threshold)
            .finish()
    }
}

impl<H, C: Clone> Clone for Options<H, C> {
    fn clone(&self) -> Self {
        Self {
            batch_size: self.batch_size,
            namespace_size: self.namespace_size,
            codec: self.codec.clone(),
            pool: self.pool.clone(),
            par_threshold: self.par_threshold,
            hasher: PhantomData,
        }
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|s| s.trim().parse::<usize>().ok())
}
