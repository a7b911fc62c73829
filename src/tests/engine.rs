use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Barrier, Mutex};

use crate::config::PoolConfig;
use crate::engine::{run, run_and_return, run_and_return_with, run_with};
use crate::error::PoolError;

fn sorted<T: Ord>(mut values: Vec<T>) -> Vec<T> {
    values.sort();
    values
}

#[test]
fn run_passes_every_value_once() {
    let seen = Mutex::new(Vec::new());
    run(4, (0..200).collect(), |_, value: i32| {
        seen.lock().unwrap().push(value);
    })
    .unwrap();

    assert_eq!(sorted(seen.into_inner().unwrap()), (0..200).collect::<Vec<_>>());
}

#[test]
fn run_rejects_empty_input() {
    let calls = AtomicUsize::new(0);
    let err = run(3, Vec::<i32>::new(), |_, _| {
        calls.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap_err();

    assert!(matches!(err, PoolError::EmptyInput));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// Ten workers each park on one value, so the run only completes if ten
// distinct workers exist.
#[test]
fn run_non_positive_workers_starts_default_count() {
    for num_workers in [0, -5] {
        let barrier = Barrier::new(10);
        let workers = Mutex::new(HashSet::new());
        run(num_workers, (0..10).collect(), |worker, _: i32| {
            workers.lock().unwrap().insert(worker);
            barrier.wait();
        })
        .unwrap();

        assert_eq!(workers.into_inner().unwrap(), (0..10).collect::<HashSet<_>>());
    }
}

#[test]
fn run_and_return_squares() {
    let results = run_and_return(3, vec![1, 2, 3, 4, 5], |_, x: i32| x * x).unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(sorted(results), vec![1, 4, 9, 16, 25]);
}

#[test]
fn run_and_return_rejects_empty_input() {
    let err = run_and_return(0, Vec::<u8>::new(), |_, x| x).unwrap_err();
    assert!(matches!(err, PoolError::EmptyInput));
}

#[test]
fn run_and_return_more_results_than_buffer() {
    let config = PoolConfig::new().with_num_workers(8).with_buffer_size(1);
    let results = run_and_return_with(&config, (0..1000u64).collect(), |_, x| x * 2).unwrap();

    assert_eq!(results.len(), 1000);
    assert_eq!(results.iter().sum::<u64>(), 999 * 1000);
}

#[test]
fn run_with_rendezvous_channels() {
    let config = PoolConfig::new().with_num_workers(2).with_buffer_size(0);
    let count = AtomicUsize::new(0);
    run_with(&config, vec!["a"; 50], |_, _| {
        count.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 50);
}

#[test]
fn run_more_workers_than_values() {
    let seen = Mutex::new(Vec::new());
    run(32, vec![7, 8], |worker, value: i32| {
        assert!(worker < 32);
        seen.lock().unwrap().push(value);
    })
    .unwrap();

    assert_eq!(sorted(seen.into_inner().unwrap()), vec![7, 8]);
}

#[test]
fn run_and_return_same_multiset_across_runs() {
    let values: Vec<u32> = (0..64).collect();
    let first = run_and_return(6, values.clone(), |_, x| x % 7).unwrap();
    let second = run_and_return(6, values, |_, x| x % 7).unwrap();

    assert_eq!(sorted(first), sorted(second));
}

#[test]
fn run_reports_panicking_job() {
    let count = AtomicUsize::new(0);
    let err = run(2, vec![1, 2, 3], |_, value: i32| {
        if value == 2 {
            panic!("boom");
        }
        count.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap_err();

    match err {
        PoolError::WorkerPanicked { message } => assert!(message.contains("boom")),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(count.load(Ordering::SeqCst), 2);
}
