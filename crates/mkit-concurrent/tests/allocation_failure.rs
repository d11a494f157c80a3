//! Runs in its own binary: the global allocator here refuses requests on
//! whichever thread has switched failures on.

use mkit_concurrent::{ConcurrentLinkedQueue, QueueError};
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    static FAIL_ALLOCATIONS: Cell<bool> = const { Cell::new(false) };
}

struct FailingAllocator;

unsafe impl GlobalAlloc for FailingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if FAIL_ALLOCATIONS.try_with(Cell::get).unwrap_or(false) {
            return std::ptr::null_mut();
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static ALLOCATOR: FailingAllocator = FailingAllocator;

#[test]
fn test_enqueue_reports_allocation_failure_and_leaves_queue_intact() {
    let q = ConcurrentLinkedQueue::new();
    q.enqueue(1).unwrap();
    q.enqueue(2).unwrap();

    FAIL_ALLOCATIONS.with(|fail| fail.set(true));
    let result = q.enqueue(3);
    FAIL_ALLOCATIONS.with(|fail| fail.set(false));

    assert_eq!(result, Err(QueueError::AllocationFailure));
    assert!(!q.is_empty());
    assert_eq!(q.dequeue(), Ok(1));
    assert_eq!(q.dequeue(), Ok(2));
    assert_eq!(q.dequeue(), Err(QueueError::Empty));

    // Still usable once the allocator recovers.
    q.enqueue(4).unwrap();
    assert_eq!(q.dequeue(), Ok(4));
}
