use std::any::Any;

use crossbeam::channel::bounded;
use crossbeam::sync::WaitGroup;
use crossbeam::thread;

use crate::config::PoolConfig;
use crate::error::{PoolError, Result};
use crate::worker::{self, WorkerHandle};

/// Runs `job` once for every value on exactly `num_workers` workers.
pub fn run<K, F>(num_workers: isize, values: Vec<K>, job: F) -> Result<()>
where
    K: Send,
    F: Fn(usize, K) + Sync,
{
    run_with(&PoolConfig::new().with_num_workers(num_workers), values, job)
}

pub fn run_with<K, F>(config: &PoolConfig, values: Vec<K>, job: F) -> Result<()>
where
    K: Send,
    F: Fn(usize, K) + Sync,
{
    execute(
        config.num_workers(),
        config.buffer_size(),
        values.into_iter(),
        |worker, value| job(worker.index(), value),
        |()| {},
    )
}

// results come back in completion order
pub fn run_and_return<K, V, F>(num_workers: isize, values: Vec<K>, job: F) -> Result<Vec<V>>
where
    K: Send,
    V: Send,
    F: Fn(usize, K) -> V + Sync,
{
    run_and_return_with(&PoolConfig::new().with_num_workers(num_workers), values, job)
}

pub fn run_and_return_with<K, V, F>(config: &PoolConfig, values: Vec<K>, job: F) -> Result<Vec<V>>
where
    K: Send,
    V: Send,
    F: Fn(usize, K) -> V + Sync,
{
    let mut results = Vec::new();
    execute(
        config.num_workers(),
        config.buffer_size(),
        values.into_iter(),
        |worker, value| job(worker.index(), value),
        |result| results.push(result),
    )?;

    Ok(results)
}

// The output channel is closed by the dispatcher after all workers exit and
// drained by the caller while items are still being sent.
pub(crate) fn execute<I, O, F, S>(
    workers: usize,
    buffer_size: usize,
    items: I,
    task: F,
    mut sink: S,
) -> Result<()>
where
    I: ExactSizeIterator + Send,
    I::Item: Send,
    O: Send,
    F: Fn(WorkerHandle, I::Item) -> O + Sync,
    S: FnMut(O),
{
    let len = items.len();
    if len == 0 {
        return Err(PoolError::EmptyInput);
    }
    log::debug!("run {} items on {} workers", len, workers);

    let task = &task;
    let (item_sender, item_receiver) = bounded::<I::Item>(buffer_size);
    let (output_sender, output_receiver) = bounded::<O>(buffer_size);

    thread::scope(|scope| {
        scope.spawn(move |scope| {
            let wait_group = WaitGroup::new();
            for index in 0..workers {
                let handle = WorkerHandle::new(index);
                let receiver = item_receiver.clone();
                let outputs = output_sender.clone();
                let done = wait_group.clone();
                scope.spawn(move |_| {
                    worker::run_worker(handle, receiver, outputs, task);
                    drop(done);
                });
            }
            drop(item_receiver);

            for item in items {
                if item_sender.send(item).is_err() {
                    log::error!("all workers exited before the input was sent");
                    break;
                }
            }
            drop(item_sender);

            wait_group.wait();
            drop(output_sender);
        });

        for output in output_receiver.iter() {
            sink(output);
        }
    })
    .map_err(|payload| {
        let message = panic_message(payload.as_ref());
        log::error!("worker panicked: {}", message);
        PoolError::WorkerPanicked { message }
    })?;

    log::debug!("run of {} items finished", len);
    Ok(())
}

// crossbeam hands back every panic of the scope as one Vec payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(panics) = payload.downcast_ref::<Vec<Box<dyn Any + Send + 'static>>>() {
        return panics
            .iter()
            .map(|panic| panic_message(&**panic))
            .collect::<Vec<_>>()
            .join("; ");
    }
    if let Some(message) = payload.downcast_ref::<&str>() {
        return message.to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    String::from("unknown panic payload")
}
