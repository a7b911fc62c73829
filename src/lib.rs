// pool runs a job over a fixed set of values on a bounded set of worker threads

pub mod config;
pub mod engine;
pub mod error;
pub mod pool;
pub mod worker;

pub use config::PoolConfig;
pub use engine::{run, run_and_return, run_and_return_with, run_with};
pub use error::{JobFailure, PoolError, Result};
pub use pool::{Pool, Report, ReturnPool};
pub use worker::WorkerHandle;

#[cfg(test)]
pub mod tests;
