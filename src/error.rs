use thiserror::Error;

use crate::worker::WorkerHandle;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("no values provided")]
    EmptyInput,

    #[error("job on {worker} failed: {source}")]
    Job {
        worker: WorkerHandle,
        #[source]
        source: anyhow::Error,
    },

    #[error("worker panicked: {message}")]
    WorkerPanicked { message: String },
}

pub type Result<T> = std::result::Result<T, PoolError>;

/// One item whose task returned an error.
#[derive(Debug)]
pub struct JobFailure {
    pub worker: WorkerHandle,
    pub error: anyhow::Error,
}

impl From<JobFailure> for PoolError {
    fn from(failure: JobFailure) -> Self {
        PoolError::Job {
            worker: failure.worker,
            source: failure.error,
        }
    }
}
