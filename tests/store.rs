use respool::*;
use std::sync::Arc;

#[test]
fn test_free_list_drops_beyond_capacity() {
    let list = FreeList::new(2);
    list.release(1);
    list.release(2);
    list.release(3);
    assert_eq!(list.len(), 2);
    assert_eq!(list.acquire(), Some(1));
    assert_eq!(list.acquire(), Some(2));
    assert_eq!(list.acquire(), None);
}

#[test]
fn test_free_list_try_new() {
    assert_eq!(FreeList::<u8>::try_new(0).unwrap_err(), Error::ZeroCapacity);
    assert_eq!(FreeList::<u8>::try_new(8).unwrap().cap(), 8);
}

#[test]
fn test_local_free_list() {
    let list = LocalFreeList::new(1);
    assert!(list.is_empty());
    list.release("a");
    list.release("b");
    assert_eq!(list.len(), 1);
    assert_eq!(list.acquire(), Some("a"));
    assert_eq!(list.acquire(), None);
}

#[test]
fn test_local_free_list_try_new() {
    assert_eq!(LocalFreeList::<u8>::try_new(0).unwrap_err(), Error::ZeroCapacity);
    assert_eq!(LocalFreeList::<u8>::try_new(8).unwrap().cap(), 8);
}

#[test]
#[should_panic]
fn test_local_free_list_zero_capacity_panics() {
    let _ = LocalFreeList::<u8>::new(0);
}

#[test]
fn test_raw_round_trip() {
    let raw = Raw::<String>::new(Arc::new(FreeList::new(4)));
    assert_eq!(raw.get(), None);
    raw.put("value".to_owned());
    assert_eq!(raw.get(), Some("value".to_owned()));
}

#[test]
fn test_raw_views_share_a_store() {
    let shared: Arc<FreeList<AnyObject>> = Arc::new(FreeList::new(4));
    let strings = Raw::<String>::new(shared.clone());
    let numbers = Raw::<u64>::new(shared.clone());

    numbers.put(42);
    strings.put("text".to_owned());

    // the first entry is a number: a miss for the string view, and discarded
    assert_eq!(strings.get(), None);
    assert_eq!(shared.len(), 1);
    assert_eq!(strings.get(), Some("text".to_owned()));
    assert_eq!(numbers.get(), None);
}

#[test]
fn test_pool_over_raw_store_constructs_on_mismatch() {
    let shared: Arc<FreeList<AnyObject>> = Arc::new(FreeList::new(4));
    Raw::<u64>::new(shared.clone()).put(7);

    let pool = Pool::with_store(Raw::<String>::new(shared.clone()), || "fresh".to_owned());
    assert_eq!(pool.get(), "fresh");
    assert!(shared.is_empty());

    pool.put("reused".to_owned());
    assert_eq!(pool.get(), "reused");
}

#[test]
fn test_shared_store_between_pools() {
    let shared = Arc::new(FreeList::new(4));
    let first = Pool::with_store(shared.clone(), || 1u32);
    let second = Pool::with_store(shared.clone(), || 2u32);
    first.put(first.get());
    assert_eq!(second.get(), 1);
}
