use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Smallest number of work items handed to a single rayon task by default.
pub const DEFAULT_MIN_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Worker count of a dedicated pool; `0` runs on rayon's global pool.
    pub num_threads: usize,
    /// Minimum work items per split.
    pub min_len: usize,
    pub thread_name: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            min_len: DEFAULT_MIN_LEN,
            thread_name: "fk-worker".to_string(),
        }
    }
}

/// Execution queue that kernels dispatch their parallel work onto.
///
/// A default stream runs on rayon's global pool. Every kernel call blocks
/// until all of its work items have finished, so returning from a kernel is
/// the synchronization point.
#[derive(Debug, Clone)]
pub struct Stream {
    pool: Option<Arc<ThreadPool>>,
    min_len: usize,
}

impl Default for Stream {
    fn default() -> Self {
        Self {
            pool: None,
            min_len: DEFAULT_MIN_LEN,
        }
    }
}

impl Stream {
    pub fn new(cfg: &StreamConfig) -> Result<Self, Error> {
        let min_len = cfg.min_len.max(1);
        if cfg.num_threads == 0 {
            tracing::debug!(min_len, "stream on global pool");
            return Ok(Self { pool: None, min_len });
        }

        let prefix = cfg.thread_name.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(cfg.num_threads)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()?;
        tracing::debug!(
            num_threads = cfg.num_threads,
            min_len,
            "stream on dedicated pool"
        );

        Ok(Self {
            pool: Some(Arc::new(pool)),
            min_len,
        })
    }

    /// Dedicated stream with `num_threads` workers and default settings.
    pub fn with_threads(num_threads: usize) -> Result<Self, Error> {
        Self::new(&StreamConfig {
            num_threads,
            ..StreamConfig::default()
        })
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Runs `op` with this stream's pool as the current rayon pool.
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}
