//! Tests for the arena module.

use super::*;

use std::cell::RefCell;
use std::rc::Rc;

fn small(max_objects: usize, max_bytes: usize) -> Limits {
    Limits { max_objects, max_bytes }
}

#[test]
fn handles_belong_to_their_arena() {
    let mut first = Arena::new("first", Limits::NODE);
    let mut second = Arena::new("second", Limits::NODE);

    let a = first.allocate(1u64).unwrap();
    let b = second.allocate(2u64).unwrap();

    assert!(first.contains(a));
    assert!(!first.contains(b));
    assert!(second.contains(b));
    assert!(!second.contains(a));

    assert_ne!(first.id(), second.id());
    assert_eq!(a.arena(), first.id());
    assert_eq!(b.arena(), second.id());

    assert_eq!(first.find(a), Some(0));
    assert_eq!(first.find(b), None);
    assert_eq!(first.get(a), Some(&1));
    assert_eq!(first.get(b), None);
}

#[test]
fn object_limit_is_enforced() {
    let mut arena = Arena::new("node", small(2, 1024));

    arena.allocate(0u8).unwrap();
    arena.allocate(0u8).unwrap();

    let err = arena.allocate(0u8).unwrap_err();
    assert_eq!(err, AllocError::Objects { name: "node", max_objects: 2, max_bytes: 1024 });
    assert_eq!(err.to_string(), "node arena exceeded object limit [max_objects=2, max_bytes=1024]");
    assert_eq!(arena.len(), 2);
}

#[test]
fn byte_limit_counts_alignment_padding() {
    let mut arena = Arena::new("raw", small(16, 16));

    arena.allocate_sized((), 1, 1).unwrap();
    assert_eq!(arena.used_bytes(), 1);

    // Padded from 1 to 8, then 8 more bytes fills the arena exactly.
    arena.allocate_sized((), 8, 8).unwrap();
    assert_eq!(arena.used_bytes(), 16);

    let err = arena.allocate_sized((), 1, 1).unwrap_err();
    assert!(matches!(err, AllocError::Bytes { name: "raw", .. }));
}

#[test]
fn zero_sized_values_still_cost_a_byte() {
    let mut arena = Arena::new("raw", small(16, 2));

    arena.allocate_sized((), 0, 1).unwrap();
    arena.allocate_sized((), 0, 1).unwrap();
    assert!(arena.allocate_sized((), 0, 1).is_err());
}

#[test]
fn layout_overflow_is_an_error() {
    let mut arena = Arena::new("raw", small(16, usize::MAX));

    assert!(matches!(arena.allocate_sized((), 4, 3), Err(AllocError::Layout { .. })));

    arena.allocate_sized((), 1, 1).unwrap();
    assert!(matches!(arena.allocate_sized((), usize::MAX, 1), Err(AllocError::Layout { .. })));
}

#[test]
fn rollback_reuses_the_slot() {
    let mut arena = Arena::new("node", Limits::NODE);

    arena.allocate(10u32).unwrap();
    let last = arena.allocate(20u32).unwrap();
    let bytes = arena.used_bytes();

    assert_eq!(arena.rollback(last), Ok(20));
    assert_eq!(arena.len(), 1);
    assert!(arena.used_bytes() < bytes);

    let again = arena.allocate(30u32).unwrap();
    assert_eq!(again, last);
    assert_eq!(arena.used_bytes(), bytes);
}

#[test]
fn rollback_only_undoes_the_last_allocation() {
    let mut arena = Arena::new("node", Limits::NODE);
    let mut other = Arena::new("other", Limits::NODE);

    let first = arena.allocate(1u8).unwrap();
    let _second = arena.allocate(2u8).unwrap();
    let foreign = other.allocate(3u8).unwrap();

    assert_eq!(arena.rollback(first), Err(RollbackError::NotLast { name: "node" }));
    assert_eq!(arena.rollback(foreign), Err(RollbackError::NotLast { name: "node" }));

    let mut empty: Arena<u8> = Arena::new("empty", Limits::NODE);
    assert_eq!(empty.rollback(foreign), Err(RollbackError::Empty { name: "empty" }));

    assert_eq!(
        arena.rollback(first).unwrap_err().to_string(),
        "bad rollback: handle is not the last allocation of the node arena"
    );
    assert_eq!(empty.rollback(foreign).unwrap_err().to_string(), "bad rollback: empty arena is empty");
}

#[test]
fn hooks_see_slot_indices() {
    let seen = Rc::new(RefCell::new(vec![]));
    let finalized = Rc::new(RefCell::new(vec![]));

    {
        let seen = seen.clone();
        let finalized = finalized.clone();
        let mut arena = Arena::new("node", Limits::NODE)
            .with_init(move |value: &mut u32, index| seen.borrow_mut().push((*value, index)))
            .with_finalizer(move |value: &mut u32, index| finalized.borrow_mut().push((*value, index)));

        arena.allocate(7).unwrap();
        arena.allocate(8).unwrap();
        arena.allocate(9).unwrap();
    }

    assert_eq!(*seen.borrow(), vec![(7, 0), (8, 1), (9, 2)]);
    assert_eq!(*finalized.borrow(), vec![(9, 2), (8, 1), (7, 0)]);
}

#[test]
fn iter_is_in_allocation_order() {
    let mut arena = Arena::new("node", Limits::NODE);
    let handles: Vec<_> = ["a", "b", "c"].into_iter().map(|s| arena.allocate(s).unwrap()).collect();

    let seen: Vec<_> = arena.iter().collect();
    assert_eq!(seen.len(), 3);
    for ((handle, value), (expected, name)) in seen.into_iter().zip(handles.iter().zip(["a", "b", "c"])) {
        assert_eq!(handle, *expected);
        assert_eq!(*value, name);
    }
}
