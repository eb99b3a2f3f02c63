//! # workpool
//!
//! A fixed-size worker thread pool pulling jobs from one shared FIFO queue,
//! with cooperative drain-to-empty shutdown.
//!
//! ## Features
//!
//! - **Fixed worker set**: thread count chosen at construction, immutable after
//! - **Shared FIFO queue**: unbounded, mutex-guarded, jobs dequeued in
//!   submission order
//! - **Cooperative shutdown**: workers drain the queue before exiting; running
//!   jobs receive a [`ShutdownToken`] to poll and are never interrupted
//! - **Panic isolation**: a panicking job is logged and counted, the worker
//!   keeps running
//! - **Worker statistics**: processed/failed/panicked counts per worker
//!
//! ## Quick Start
//!
//! ```rust
//! use workpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // All workers are running once `new` returns
//! let pool = ThreadPool::new(4)?;
//!
//! for i in 0..10 {
//!     pool.execute(move |_| {
//!         println!("{}", i * 2);
//!         Ok(())
//!     })?;
//! }
//!
//! // Blocks until the queue is drained and every worker has exited
//! pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Long-running jobs
//!
//! Jobs receive the pool's shutdown indicator and should poll it:
//!
//! ```rust
//! use workpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let pool = ThreadPool::new(2)?;
//!
//! pool.execute(|shutdown| {
//!     while !shutdown.is_shutting_down() {
//!         // one bounded unit of work per iteration
//!         std::thread::sleep(std::time::Duration::from_millis(10));
//!     }
//!     Ok(())
//! })?;
//!
//! // Returns promptly because the job observes the flag
//! pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Jobs
//!
//! ```rust
//! use workpool::prelude::*;
//!
//! struct Checksum {
//!     data: Vec<u8>,
//! }
//!
//! impl Job for Checksum {
//!     fn run(&mut self, _shutdown: &ShutdownToken) -> Result<()> {
//!         let sum: u64 = self.data.iter().map(|&b| b as u64).sum();
//!         println!("checksum: {}", sum);
//!         Ok(())
//!     }
//!
//!     fn job_type(&self) -> &str {
//!         "Checksum"
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! # let pool = ThreadPool::new(2)?;
//! pool.submit(Checksum {
//!     data: vec![1, 2, 3],
//! })?;
//! # pool.shutdown()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod pool;
pub mod prelude;
pub mod queue;

pub use crate::core::{BoxedJob, ClosureJob, Job, PoolError, Result, ShutdownToken};
pub use pool::{PoolConfig, ThreadPool, WorkerStats};
