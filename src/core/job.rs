//! Job trait and related types

use crate::core::error::Result;
use crate::core::shutdown::ShutdownToken;
use std::fmt;

/// A trait representing a unit of work to be executed by the worker pool
pub trait Job: Send {
    /// Execute the job
    ///
    /// `shutdown` is the pool's advisory shutdown indicator. Long-running
    /// jobs should poll it and return early once it is set; the pool never
    /// forcibly interrupts a job.
    ///
    /// # Errors
    ///
    /// Returns an error if the job execution fails
    fn run(&mut self, shutdown: &ShutdownToken) -> Result<()>;

    /// Get the job's type name for logging and statistics
    fn job_type(&self) -> &str {
        "Job"
    }
}

impl fmt::Debug for dyn Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job({})", self.job_type())
    }
}

/// A boxed job that can be sent across threads
pub type BoxedJob = Box<dyn Job>;

/// Helper to create a job from a closure
pub struct ClosureJob<F>
where
    F: FnOnce(&ShutdownToken) -> Result<()> + Send,
{
    closure: Option<F>,
    name: String,
}

impl<F> ClosureJob<F>
where
    F: FnOnce(&ShutdownToken) -> Result<()> + Send,
{
    /// Create a new closure job
    pub fn new(closure: F) -> Self {
        Self {
            closure: Some(closure),
            name: "ClosureJob".to_string(),
        }
    }

    /// Create a new closure job with a custom name
    pub fn with_name<S: Into<String>>(closure: F, name: S) -> Self {
        Self {
            closure: Some(closure),
            name: name.into(),
        }
    }
}

impl<F> Job for ClosureJob<F>
where
    F: FnOnce(&ShutdownToken) -> Result<()> + Send,
{
    fn run(&mut self, shutdown: &ShutdownToken) -> Result<()> {
        if let Some(closure) = self.closure.take() {
            closure(shutdown)
        } else {
            // Closure already executed, return error instead of silently succeeding
            Err(crate::core::PoolError::job(
                "ClosureJob already executed - cannot execute twice",
            ))
        }
    }

    fn job_type(&self) -> &str {
        &self.name
    }
}
