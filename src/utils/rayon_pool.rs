//! Worker pool for per-batch node hashing.
//!
//! Batches of one layer hash independently, so they can fan out over a Rayon
//! pool. Results always come back in batch order. Codec calls are not routed
//! through here; they run once per layer on the calling thread.
//!
//! Without the `rayon` feature both helpers run inline, so call sites stay
//! free of `cfg` attributes.
//!
//! Environment variables (read by [`PoolConfig::from_env`]):
//! - `NCMT_THREADS`:     integer >= 1 (defaults to available_parallelism)
//! - `NCMT_THREAD_NAME`: thread name prefix (default: "ncmt-w")

use crate::error::{NcmtError, NcmtResult};

const DEFAULT_THREAD_NAME: &str = "ncmt-w";

/// Shape of a local Rayon pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolConfig {
    pub num_threads: Option<usize>,
    pub thread_name: Option<String>,
}

impl PoolConfig {
    /// Config from `NCMT_THREADS` / `NCMT_THREAD_NAME`; unset or unparseable
    /// values stay `None`.
    pub fn from_env() -> Self {
        let num_threads = std::env::var("NCMT_THREADS")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n >= 1);
        let thread_name = std::env::var("NCMT_THREAD_NAME").ok().filter(|s| !s.is_empty());
        Self { num_threads, thread_name }
    }

    /// Requested thread count, or the machine's available parallelism.
    pub fn effective_threads(&self) -> usize {
        match self.num_threads {
            Some(n) if n >= 1 => n,
            _ => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }

    pub fn name_prefix(&self) -> &str {
        match self.thread_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_THREAD_NAME,
        }
    }
}

/// Run `f` with a dedicated pool installed as the current Rayon pool.
///
/// The global pool is never touched. A pool that cannot be created is
/// reported as [`NcmtError::ThreadPool`].
pub fn with_pool<F, R>(cfg: &PoolConfig, f: F) -> NcmtResult<R>
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    if cfg.num_threads == Some(0) {
        return Err(NcmtError::ThreadPool("num_threads must be >= 1".into()));
    }

    #[cfg(feature = "rayon")]
    {
        let prefix = cfg.name_prefix().to_owned();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(cfg.effective_threads())
            .thread_name(move |i| format!("{prefix}-{:02}", i + 1))
            .build()
            .map_err(|e| NcmtError::ThreadPool(e.to_string()))?;
        Ok(pool.install(f))
    }

    #[cfg(not(feature = "rayon"))]
    {
        Ok(f())
    }
}

/// Map `f` over `input`, in parallel once `input.len() >= threshold`.
///
/// The output is index-aligned with the input in every mode.
pub fn maybe_par_map<T, U, F>(input: &[T], threshold: usize, f: F) -> Vec<U>
where
    T: Send + Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        if input.len() >= threshold {
            return input.par_iter().map(&f).collect();
        }
    }

    #[cfg(not(feature = "rayon"))]
    let _ = threshold;

    input.iter().map(f).collect()
}
