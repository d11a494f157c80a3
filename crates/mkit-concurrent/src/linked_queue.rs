use core::fmt;
use core::mem::MaybeUninit;
use core::ptr;
use core::sync::atomic::Ordering;
use crossbeam_epoch::{self as epoch, Atomic, Owned, Shared};
use crossbeam_utils::CachePadded;
use std::alloc::{self, Layout};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue is empty")]
    Empty,
    #[error("failed to allocate a queue node")]
    AllocationFailure,
}

struct Node<T> {
    /// Uninitialized only in the sentinel built by `ConcurrentLinkedQueue::new`.
    /// Moved out by the dequeuer whose head CAS turns this node into the sentinel.
    value: MaybeUninit<T>,
    /// Set at most once, from null to the successor.
    next: Atomic<Node<T>>,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            value: MaybeUninit::uninit(),
            next: Atomic::null(),
        }
    }

    /// Heap-allocate a payload node, reporting allocator exhaustion instead of aborting.
    fn try_alloc(value: T) -> Result<Owned<Self>, QueueError> {
        // Never zero-sized: a node always carries its `next` pointer.
        let layout = Layout::new::<Self>();
        let raw = unsafe { alloc::alloc(layout) } as *mut Self;
        if raw.is_null() {
            return Err(QueueError::AllocationFailure);
        }

        unsafe {
            raw.write(Self {
                value: MaybeUninit::new(value),
                next: Atomic::null(),
            });
            // SAFETY: allocated by the global allocator with `Layout::new::<Self>()`,
            // exactly what `Box` expects.
            Ok(Owned::from(Box::from_raw(raw)))
        }
    }
}

/// Unbounded lock-free multi-producer multi-consumer FIFO queue.
///
/// Michael & Scott's two-CAS linked queue: `head` always points at a sentinel
/// node, the oldest value lives in `head.next`, and `tail` points at the last
/// node or lags it by one step. Both `head` and `tail` and every node's `next`
/// are only ever mutated by compare-and-swap.
///
/// - `enqueue` links a node with a CAS on `tail.next` (its linearization point)
///   and then swings `tail` on a best-effort basis.
/// - `dequeue` swings `head` to `head.next` (its linearization point) and moves
///   the value out of the node that became the new sentinel.
/// - Either operation that finds `tail` lagging swings it forward before
///   retrying, so a linked-but-unpublished node never reads as empty.
///
/// Retired sentinels are freed through `crossbeam-epoch`: every operation pins
/// the calling thread and a node unlinked from the front is only released once
/// every thread pinned at that moment has moved on. Memory therefore cannot be
/// recycled under a reader holding a stale pointer, which also rules out ABA on
/// the pointer CASes.
pub struct ConcurrentLinkedQueue<T> {
    head: CachePadded<Atomic<Node<T>>>,
    tail: CachePadded<Atomic<Node<T>>>,
}

// Safety: values are moved in by one thread and out by exactly one other; nodes are
// only reachable through the atomics.
unsafe impl<T: Send> Send for ConcurrentLinkedQueue<T> {}
unsafe impl<T: Send> Sync for ConcurrentLinkedQueue<T> {}

impl<T> ConcurrentLinkedQueue<T> {
    /// Create an empty queue holding a single sentinel node.
    pub fn new() -> Self {
        let queue = Self {
            head: CachePadded::new(Atomic::null()),
            tail: CachePadded::new(Atomic::null()),
        };

        // SAFETY: the queue is not shared yet.
        let sentinel = Owned::new(Node::sentinel()).into_shared(unsafe { epoch::unprotected() });
        queue.head.store(sentinel, Ordering::Relaxed);
        queue.tail.store(sentinel, Ordering::Relaxed);
        queue
    }

    /// Append `value` at the back of the queue.
    ///
    /// Only fails when a node cannot be allocated; contention is retried internally.
    pub fn enqueue(&self, value: T) -> Result<(), QueueError> {
        let node = Node::try_alloc(value)?;
        let guard = &epoch::pin();
        let node = node.into_shared(guard);

        loop {
            let tail = self.tail.load(Ordering::Acquire, guard);
            // SAFETY: `tail` is never null and the pin keeps it alive.
            let tail_ref = unsafe { tail.deref() };
            let next = tail_ref.next.load(Ordering::Acquire, guard);

            if !next.is_null() {
                // Another producer linked past `tail` without swinging it yet.
                let _ = self.tail.compare_exchange(
                    tail,
                    next,
                    Ordering::Release,
                    Ordering::Relaxed,
                    guard,
                );
                continue;
            }

            if tail_ref
                .next
                .compare_exchange(
                    Shared::null(),
                    node,
                    Ordering::Release,
                    Ordering::Relaxed,
                    guard,
                )
                .is_ok()
            {
                // Best effort: whoever sees the lag next finishes the swing.
                let _ = self.tail.compare_exchange(
                    tail,
                    node,
                    Ordering::Release,
                    Ordering::Relaxed,
                    guard,
                );
                return Ok(());
            }
        }
    }

    /// Remove the oldest value, or report [`QueueError::Empty`] without waiting.
    pub fn dequeue(&self) -> Result<T, QueueError> {
        let guard = &epoch::pin();

        loop {
            let head = self.head.load(Ordering::Acquire, guard);
            let tail = self.tail.load(Ordering::Acquire, guard);
            // SAFETY: `head` is never null and the pin keeps it alive.
            let next = unsafe { head.deref() }.next.load(Ordering::Acquire, guard);

            if head == tail {
                if next.is_null() {
                    return Err(QueueError::Empty);
                }
                // A node is linked but `tail` still lags: advance it, then retry.
                let _ = self.tail.compare_exchange(
                    tail,
                    next,
                    Ordering::Release,
                    Ordering::Relaxed,
                    guard,
                );
                continue;
            }

            if next.is_null() {
                // `head` moved on after it was read; take a fresh snapshot.
                continue;
            }

            if self
                .head
                .compare_exchange(head, next, Ordering::Release, Ordering::Relaxed, guard)
                .is_ok()
            {
                unsafe {
                    // SAFETY: the winning head CAS makes this thread the only reader of
                    // the new sentinel's value, written before its link CAS published it.
                    let value = ptr::read(next.deref().value.as_ptr());
                    // SAFETY: the old sentinel is unreachable from the queue now.
                    guard.defer_destroy(head);
                    return Ok(value);
                }
            }
        }
    }

    /// Whether the queue currently holds no value.
    ///
    /// Exact once no operation is in flight; a snapshot under concurrency.
    pub fn is_empty(&self) -> bool {
        let guard = &epoch::pin();
        let head = self.head.load(Ordering::Acquire, guard);
        let tail = self.tail.load(Ordering::Acquire, guard);
        // SAFETY: `head` is never null and the pin keeps it alive.
        let next = unsafe { head.deref() }.next.load(Ordering::Acquire, guard);
        head == tail && next.is_null()
    }

    #[cfg(test)]
    fn head_is_tail(&self) -> bool {
        let guard = &epoch::pin();
        self.head.load(Ordering::Acquire, guard) == self.tail.load(Ordering::Acquire, guard)
    }
}

impl<T> Default for ConcurrentLinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ConcurrentLinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentLinkedQueue")
            .field("is_empty", &self.is_empty())
            .finish_non_exhaustive()
    }
}

impl<T> Drop for ConcurrentLinkedQueue<T> {
    fn drop(&mut self) {
        let mut discarded = 0usize;
        unsafe {
            // SAFETY: `&mut self` means no other thread can reach the chain.
            let guard = epoch::unprotected();

            let sentinel = self.head.load(Ordering::Relaxed, guard);
            let mut next = sentinel.deref().next.load(Ordering::Relaxed, guard);
            // The sentinel's value is uninitialized or already moved out.
            drop(sentinel.into_owned());

            while !next.is_null() {
                let mut node = next.into_owned();
                next = node.next.load(Ordering::Relaxed, guard);
                node.value.assume_init_drop();
                discarded += 1;
            }
        }
        trace!(discarded, "dropped concurrent linked queue");
    }
}
