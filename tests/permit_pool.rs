// tests/permit_pool.rs

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use refill_gate::cores::PermitPool;
use refill_gate::{AcquireError, ConfigError, PermitGate, Uint};

fn new_pool(limit: Uint) -> PermitPool {
    PermitPool::new(limit).unwrap()
}

#[test]
fn pool_starts_full() {
    let pool = new_pool(5);
    assert_eq!(pool.limit(), 5);
    assert_eq!(pool.available(), 5);
    assert_eq!(pool.waiting(), 0);
}

#[test]
fn zero_limit_is_rejected() {
    assert!(matches!(PermitPool::new(0), Err(ConfigError::ZeroLimit)));
}

#[test]
fn acquire_consumes_one_permit_each() {
    let pool = new_pool(3);
    pool.acquire();
    assert_eq!(pool.available(), 2);
    pool.acquire();
    pool.acquire();
    assert_eq!(pool.available(), 0);
}

#[test]
fn try_acquire_fails_when_exhausted() {
    let pool = new_pool(2);
    assert!(pool.try_acquire());
    assert!(pool.try_acquire());
    assert!(!pool.try_acquire());
    assert_eq!(pool.available(), 0);
}

#[test]
fn acquire_timeout_succeeds_while_capacity_remains() {
    let pool = new_pool(1);
    assert_eq!(pool.acquire_timeout(Duration::from_millis(10)), Ok(()));
    assert_eq!(pool.available(), 0);
}

#[test]
fn acquire_timeout_expires_when_exhausted() {
    let pool = new_pool(1);
    pool.acquire();

    let started = Instant::now();
    let err = pool.acquire_timeout(Duration::from_millis(30)).unwrap_err();
    match err {
        AcquireError::TimedOut { waited } => {
            assert!(waited >= Duration::from_millis(30));
            assert!(started.elapsed() >= Duration::from_millis(30));
        }
    }
    assert_eq!(pool.waiting(), 0);
    assert_eq!(pool.available(), 0);
}

#[test]
fn unbounded_timeout_with_free_permit() {
    let pool = new_pool(1);
    assert_eq!(pool.acquire_timeout(Duration::MAX), Ok(()));
    assert_eq!(pool.available(), 0);
}

#[test]
fn concurrent_acquirers_never_overdraw() {
    let pool = Arc::new(new_pool(50));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || (0..20).filter(|_| pool.try_acquire()).count())
        })
        .collect();

    let granted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(granted, 50);
    assert_eq!(pool.available(), 0);
}

#[test]
fn blocked_acquirer_stays_queued_without_refill() {
    let pool = Arc::new(new_pool(1));
    pool.acquire();

    let waiter = {
        let pool = Arc::clone(&pool);
        thread::spawn(move || pool.acquire_timeout(Duration::from_millis(100)))
    };

    let deadline = Instant::now() + Duration::from_secs(5);
    while pool.waiting() == 0 {
        assert!(Instant::now() < deadline, "waiter never queued");
        thread::sleep(Duration::from_millis(1));
    }
    // A newcomer cannot take a permit while someone is queued.
    assert!(!pool.try_acquire());

    assert!(waiter.join().unwrap().is_err());
    assert_eq!(pool.waiting(), 0);
}

#[test]
fn throttle_runs_call_after_acquiring() {
    let pool = new_pool(2);
    let seen = pool.throttle(|| pool.available());
    assert_eq!(seen, 1);
}
