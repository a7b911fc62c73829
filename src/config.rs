use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_WORKERS: usize = 10;
pub const DEFAULT_BUFFER_SIZE: usize = 10;

// a zero buffer_size makes every hand-off a rendezvous
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PoolConfig {
    num_workers: usize,
    buffer_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            num_workers: DEFAULT_NUM_WORKERS,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl PoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any count `<= 0` falls back to [`DEFAULT_NUM_WORKERS`].
    pub fn with_num_workers(mut self, num: isize) -> Self {
        self.num_workers = normalize_workers(num);
        self
    }

    pub fn with_buffer_size(mut self, size: isize) -> Self {
        self.set_buffer_size(size);
        self
    }

    /// Negative sizes are ignored and the current size is kept.
    pub fn set_buffer_size(&mut self, size: isize) {
        if size < 0 {
            log::debug!("ignore negative buffer size {}", size);
            return;
        }
        self.buffer_size = size as usize;
    }

    pub fn num_workers(&self) -> usize {
        if self.num_workers == 0 {
            DEFAULT_NUM_WORKERS
        } else {
            self.num_workers
        }
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    // object pools never start more workers than they have items
    pub fn workers_for(&self, len: usize) -> usize {
        self.num_workers().min(len)
    }
}

fn normalize_workers(num: isize) -> usize {
    if num <= 0 {
        DEFAULT_NUM_WORKERS
    } else {
        num as usize
    }
}
