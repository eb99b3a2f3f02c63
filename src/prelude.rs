//! Convenient re-exports for common types and traits

pub use crate::core::{BoxedJob, ClosureJob, Job, PoolError, Result, ShutdownToken};
pub use crate::pool::{PoolConfig, ThreadPool, WorkerStats};
