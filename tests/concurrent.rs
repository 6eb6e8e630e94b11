use rayon::prelude::*;
use respool::*;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Barrier,
    },
    thread,
};

/// An object carrying the sequence number it was constructed with.
struct Tagged {
    id: usize,
    data: Vec<u8>,
}

impl Reset for Tagged {
    fn reset(&mut self) {
        self.data.clear();
    }
}

impl Resettable for Tagged {
    fn as_reset(&mut self) -> Option<&mut dyn Reset> {
        Some(self)
    }
}

fn tagged_ctor(next: &Arc<AtomicUsize>) -> impl Fn() -> Tagged + Send + Sync + 'static {
    let next = next.clone();
    move || Tagged {
        id: next.fetch_add(1, Ordering::SeqCst),
        data: Vec::new(),
    }
}

#[test]
fn test_concurrent_gets_on_empty_pool_are_distinct() {
    let next = Arc::new(AtomicUsize::new(0));
    let pool = Arc::new(ResetPool::new(tagged_ctor(&next)));
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let pool = pool.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                pool.get().id
            })
        })
        .collect();
    let ids: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_ne!(ids[0], ids[1]);
    assert_eq!(next.load(Ordering::SeqCst), 2);
}

#[test]
fn test_every_release_is_reset_once() {
    const CYCLES: usize = 4096;
    let next = Arc::new(AtomicUsize::new(0));
    let released = Arc::new(AtomicUsize::new(0));
    let counter = released.clone();
    let observers = Observers::new().on_release_reset_observed(move |event| {
        assert!(event.performed);
        counter.fetch_add(1, Ordering::Relaxed);
    });
    let pool = ResetPool::detecting(tagged_ctor(&next), Config::new().with_capacity(64).with_observers(observers)).unwrap();

    (0..CYCLES).into_par_iter().for_each(|i| {
        let mut obj = pool.get();
        assert!(obj.data.is_empty(), "object {} handed out dirty", obj.id);
        obj.data.extend_from_slice(&i.to_le_bytes());
        pool.put(obj);
    });

    assert_eq!(released.load(Ordering::Relaxed), CYCLES);
    assert!(next.load(Ordering::SeqCst) <= CYCLES);
}

#[test]
fn test_stateful_pool_under_contention() {
    const CYCLES: usize = 2048;
    let acquired = Arc::new(AtomicUsize::new(0));
    let released = Arc::new(AtomicUsize::new(0));
    let (a, r) = (acquired.clone(), released.clone());
    let observers = Observers::new()
        .on_acquire_reset_observed(move |event| {
            assert!(event.performed);
            a.fetch_add(1, Ordering::Relaxed);
        })
        .on_release_reset_observed(move |event| {
            assert!(event.performed);
            r.fetch_add(1, Ordering::Relaxed);
        });
    let pool = StatefulPool::<Vec<u8>, std::io::Cursor<Vec<u8>>>::detecting(
        || std::io::Cursor::new(Vec::new()),
        Config::new().with_observers(observers),
    )
    .unwrap();

    (0..CYCLES).into_par_iter().for_each(|i| {
        let payload = i.to_le_bytes().to_vec();
        let reader = pool.get_guard(payload.clone());
        assert_eq!(reader.get_ref(), &payload);
        assert_eq!(reader.position(), 0);
    });

    assert_eq!(acquired.load(Ordering::Relaxed), CYCLES);
    assert_eq!(released.load(Ordering::Relaxed), CYCLES);
}

#[test]
fn test_rc_guards_across_threads() {
    let next = Arc::new(AtomicUsize::new(0));
    let released = Arc::new(AtomicUsize::new(0));
    let counter = released.clone();
    let observers = Observers::new().on_release_reset_observed(move |event| {
        assert!(event.performed);
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let pool = ResetPool::detecting(tagged_ctor(&next), Config::new().with_observers(observers))
        .unwrap()
        .to_rc();

    // all guards are outstanding before any worker can release one
    let guards: Vec<_> = (0..8).map(|_| pool.clone().get_rc()).collect();
    assert_eq!(next.load(Ordering::SeqCst), 8);

    let handles: Vec<_> = guards
        .into_iter()
        .zip(0u8..)
        .map(|(mut guard, i)| {
            thread::spawn(move || {
                guard.data.push(i);
                guard.data.len()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }

    assert_eq!(Arc::strong_count(&pool), 1);
    assert_eq!(released.load(Ordering::SeqCst), 8);
    assert_eq!(pool.inner().store().len(), 8);
}
