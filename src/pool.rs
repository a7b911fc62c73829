use std::marker::PhantomData;

use crate::config::PoolConfig;
use crate::engine::execute;
use crate::error::{JobFailure, Result};
use crate::worker::WorkerHandle;

/// Runs a task over retained data on `min(num_workers, data.len())` workers.
pub struct Pool<K> {
    config: PoolConfig,
    data: Vec<K>,
}

impl<K: Sync> Pool<K> {
    pub fn new(num_workers: isize, data: Vec<K>) -> Self {
        Self::with_config(PoolConfig::new().with_num_workers(num_workers), data)
    }

    pub fn with_config(config: PoolConfig, data: Vec<K>) -> Self {
        Pool { config, data }
    }

    pub fn num_workers(&self) -> usize {
        self.config.workers_for(self.data.len())
    }

    pub fn data(&self) -> &[K] {
        &self.data
    }

    /// Processes every item, then returns the first failure if any.
    pub fn run<F>(&self, task: F) -> Result<()>
    where
        F: Fn(WorkerHandle, &K) -> anyhow::Result<()> + Sync,
    {
        match self.run_all(task)?.into_iter().next() {
            Some(failure) => Err(failure.into()),
            None => Ok(()),
        }
    }

    /// Runs `task` on every item and returns every failure.
    pub fn run_all<F>(&self, task: F) -> Result<Vec<JobFailure>>
    where
        F: Fn(WorkerHandle, &K) -> anyhow::Result<()> + Sync,
    {
        let mut failures = Vec::new();
        dispatch(&self.config, &self.data, task, |worker, outcome| {
            if let Err(error) = outcome {
                log::error!("{} job has error: {}", worker, error);
                failures.push(JobFailure { worker, error });
            }
        })?;

        Ok(failures)
    }
}

/// Everything a [`ReturnPool::run_all`] produced.
#[derive(Debug)]
pub struct Report<V> {
    pub results: Vec<V>,
    pub failures: Vec<JobFailure>,
}

impl<V> Report<V> {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// The results, or the first failure with the results discarded.
    pub fn into_result(self) -> Result<Vec<V>> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure.into()),
            None => Ok(self.results),
        }
    }
}

/// A [`Pool`] whose task returns a value per item.
pub struct ReturnPool<K, V> {
    config: PoolConfig,
    data: Vec<K>,
    _result: PhantomData<fn() -> V>,
}

impl<K: Sync, V: Send> ReturnPool<K, V> {
    pub fn new(num_workers: isize, data: Vec<K>) -> Self {
        Self::with_config(PoolConfig::new().with_num_workers(num_workers), data)
    }

    pub fn with_config(config: PoolConfig, data: Vec<K>) -> Self {
        ReturnPool {
            config,
            data,
            _result: PhantomData,
        }
    }

    pub fn num_workers(&self) -> usize {
        self.config.workers_for(self.data.len())
    }

    pub fn data(&self) -> &[K] {
        &self.data
    }

    // any failure discards every result
    pub fn run<F>(&self, task: F) -> Result<Vec<V>>
    where
        F: Fn(WorkerHandle, &K) -> anyhow::Result<V> + Sync,
    {
        self.run_all(task)?.into_result()
    }

    pub fn run_all<F>(&self, task: F) -> Result<Report<V>>
    where
        F: Fn(WorkerHandle, &K) -> anyhow::Result<V> + Sync,
    {
        let mut report = Report {
            results: Vec::new(),
            failures: Vec::new(),
        };
        dispatch(&self.config, &self.data, task, |worker, outcome| match outcome {
            Ok(value) => report.results.push(value),
            Err(error) => {
                log::error!("{} job has error: {}", worker, error);
                report.failures.push(JobFailure { worker, error });
            }
        })?;

        Ok(report)
    }
}

fn dispatch<K, V, F, S>(config: &PoolConfig, data: &[K], task: F, mut collect: S) -> Result<()>
where
    K: Sync,
    V: Send,
    F: Fn(WorkerHandle, &K) -> anyhow::Result<V> + Sync,
    S: FnMut(WorkerHandle, anyhow::Result<V>),
{
    execute(
        config.workers_for(data.len()),
        config.buffer_size(),
        data.iter(),
        |worker, value| (worker, task(worker, value)),
        |(worker, outcome)| collect(worker, outcome),
    )
}
