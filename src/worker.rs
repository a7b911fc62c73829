use std::fmt;

use crossbeam::channel::{Receiver, Sender};

/// 0-based spawn index of a worker, fixed for its whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerHandle(usize);

impl WorkerHandle {
    pub(crate) fn new(index: usize) -> Self {
        WorkerHandle(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WorkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker-{}", self.0)
    }
}

// Pulls items until the channel is closed and drained.
pub(crate) fn run_worker<T, O, F>(
    handle: WorkerHandle,
    items: Receiver<T>,
    outputs: Sender<O>,
    task: &F,
) where
    F: Fn(WorkerHandle, T) -> O,
{
    log::trace!("{} started", handle);
    for item in items.iter() {
        log::trace!("{} took an item", handle);
        if outputs.send(task(handle, item)).is_err() {
            log::error!("{} lost its output channel", handle);
            break;
        }
    }
    log::trace!("{} finished", handle);
}
