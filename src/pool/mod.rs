//! Thread pool and worker implementation

pub mod thread_pool;
pub mod worker;

pub use thread_pool::{PoolConfig, ThreadPool};
pub use worker::{Worker, WorkerStats};
