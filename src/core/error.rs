//! Error types for the worker pool

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors that can occur in the worker pool
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PoolError {
    /// Pool was created with an invalid thread count
    #[error("Invalid thread count {requested}: pool requires at least one worker")]
    InvalidThreadCount {
        /// The thread count that was requested
        requested: usize,
    },

    /// Failed to spawn a worker thread with details
    #[error("Failed to spawn worker thread #{worker_id}: {message}")]
    Spawn {
        /// ID of the worker that failed to spawn
        worker_id: usize,
        /// Error message
        message: String,
        /// Source IO error
        #[source]
        source: Option<std::io::Error>,
    },

    /// Failed to join a worker thread
    #[error("Failed to join worker thread #{worker_id}: {message}")]
    Join {
        /// ID of the worker that failed to join
        worker_id: usize,
        /// Error message
        message: String,
    },

    /// Pool is shutting down and no longer accepts submissions
    #[error("Pool is shutting down ({pending_jobs} jobs pending)")]
    ShuttingDown {
        /// Number of jobs still queued
        pending_jobs: usize,
    },

    /// Job execution failed
    #[error("Job execution failed: {0}")]
    Job(String),
}

impl PoolError {
    /// Create an invalid thread count error
    pub fn invalid_thread_count(requested: usize) -> Self {
        PoolError::InvalidThreadCount { requested }
    }

    /// Create a spawn error
    pub fn spawn(worker_id: usize, message: impl Into<String>) -> Self {
        PoolError::Spawn {
            worker_id,
            message: message.into(),
            source: None,
        }
    }

    /// Create a spawn error with source
    pub fn spawn_with_source(
        worker_id: usize,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        PoolError::Spawn {
            worker_id,
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a join error
    pub fn join(worker_id: usize, message: impl Into<String>) -> Self {
        PoolError::Join {
            worker_id,
            message: message.into(),
        }
    }

    /// Create a shutting down error
    pub fn shutting_down(pending_jobs: usize) -> Self {
        PoolError::ShuttingDown { pending_jobs }
    }

    /// Create a job execution error
    pub fn job<S: Into<String>>(msg: S) -> Self {
        PoolError::Job(msg.into())
    }
}
