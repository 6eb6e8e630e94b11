use proptest::prelude::*;
use respool::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

fn counted_pool(created: &Arc<AtomicUsize>) -> Pool<Vec<u8>> {
    let created = created.clone();
    Pool::new(move || {
        created.fetch_add(1, Ordering::SeqCst);
        Vec::with_capacity(16)
    })
}

#[test]
fn test_get_constructs_on_empty_store() {
    let created = Arc::new(AtomicUsize::new(0));
    let pool = counted_pool(&created);
    let buf = pool.get();
    assert!(buf.is_empty());
    assert_eq!(created.load(Ordering::SeqCst), 1);
}

#[test]
fn test_put_then_get_reuses_object() {
    let created = Arc::new(AtomicUsize::new(0));
    let pool = counted_pool(&created);
    let mut buf = pool.get();
    buf.push(1);
    pool.put(buf);

    // the plain pool never resets
    let buf = pool.get();
    assert_eq!(buf, vec![1]);
    assert_eq!(created.load(Ordering::SeqCst), 1);
}

#[test]
fn test_multiple_gets_are_distinct() {
    let pool = Pool::new(|| Box::new(0usize));
    let a = pool.get();
    let b = pool.get();
    assert!(!std::ptr::eq(&*a, &*b));
    pool.put(a);
    pool.put(b);
    assert_eq!(pool.store().len(), 2);
}

#[test]
fn test_with_capacity() {
    let pool = Pool::with_capacity(3, String::new);
    assert_eq!(pool.store().cap(), 3);
    assert!(pool.store().is_empty());
}

#[test]
fn test_with_local_store() {
    let pool = Pool::with_store(LocalFreeList::new(2), || 10usize);
    let a = pool.get();
    pool.put(a + 1);
    assert_eq!(pool.get(), 11);
    assert_eq!(pool.get(), 10);
}

#[test]
fn test_get_guard_returns_on_drop() {
    let pool = Pool::new(|| 10usize);
    {
        let mut guard = pool.get_guard();
        *guard += 5;
        assert_eq!(*guard, 15);
    }
    assert_eq!(pool.store().len(), 1);
    assert_eq!(pool.get(), 15);
}

#[test]
fn test_get_guard_into_inner() {
    let pool = Pool::new(|| 10usize);
    let obj = pool.get_guard().into_inner();
    assert_eq!(obj, 10);
    assert!(pool.store().is_empty());
}

#[test]
fn test_get_rc() {
    let pool = Pool::new(|| 10usize).to_rc();
    let guard = pool.clone().get_rc();
    assert_eq!(*guard, 10);
    assert_eq!(Arc::strong_count(&pool), 2);
    drop(guard);
    assert_eq!(Arc::strong_count(&pool), 1);
    assert_eq!(pool.store().len(), 1);
}

#[test]
fn test_get_rc_into_inner() {
    let pool = Pool::new(|| 10usize).to_rc();
    let obj = pool.clone().get_rc().into_inner();
    assert_eq!(obj, 10);
    assert_eq!(Arc::strong_count(&pool), 1);
    assert!(pool.store().is_empty());
}

#[test]
fn test_guards_forward_to_object() {
    let pool = Pool::new(|| "pooled".to_owned()).to_rc();
    let mut guard = pool.get_guard();
    guard.as_mut().push('!');
    assert_eq!(guard, "pooled!".to_owned());
    assert_eq!(guard.as_ref().len(), 7);
    assert_eq!(format!("{:?}", guard), "\"pooled!\"");

    let mut rc = pool.clone().get_rc();
    rc.as_mut().clear();
    assert_eq!(rc, String::new());
    assert_eq!(format!("{:?}", rc), "\"\"");
}

#[test]
#[should_panic(expected = "constructor failed")]
fn test_constructor_panic_propagates() {
    let pool: Pool<String> = Pool::new(|| panic!("constructor failed"));
    let _ = pool.get();
}

proptest! {
    /// Bytes written into a pooled buffer read back unchanged.
    #[test]
    fn written_bytes_read_back(p in proptest::collection::vec(any::<u8>(), 0..256)) {
        let pool = Pool::new(Vec::<u8>::new);
        let mut buf = pool.get();
        buf.clear();
        buf.extend_from_slice(&p);
        prop_assert_eq!(&buf, &p);
        pool.put(buf);
    }
}
