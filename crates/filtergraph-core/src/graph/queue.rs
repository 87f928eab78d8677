//! FIFO storage behind every input port.
//!
//! [`SampleQueue`] is a singly linked queue. Its cells ([`Node`]) live in a slab
//! owned by the queue and link to each other by slot index, so the queue needs
//! neither shared ownership nor raw pointers to keep a tail reference. Popped
//! cells go on a free list and are reused by later pushes; in steady state a
//! queue stops allocating once it has reached its high-water mark.

/// One queue cell: a value and the slot of the next cell toward the tail.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    value: f64,
    next: Option<usize>,
}

/// Unbounded FIFO of pending samples.
#[derive(Debug, Clone, Default)]
pub struct SampleQueue {
    cells: Vec<Node>,
    /// Slots of popped cells available for reuse.
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl SampleQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value at the tail.
    pub fn push(&mut self, value: f64) {
        let node = Node { value, next: None };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.cells[slot] = node;
                slot
            }
            None => {
                self.cells.push(node);
                self.cells.len() - 1
            }
        };

        match self.tail {
            Some(tail) => self.cells[tail].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Removes and returns the oldest value, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<f64> {
        let slot = self.head?;
        let Node { value, next } = self.cells[slot];
        self.head = next;
        if next.is_none() {
            self.tail = None;
        }
        self.free.push(slot);
        self.len -= 1;
        Some(value)
    }

    /// Returns the oldest value without removing it.
    pub fn front(&self) -> Option<f64> {
        self.head.map(|slot| self.cells[slot].value)
    }

    /// Returns the number of queued values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no value is queued.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every queued value and releases the cell storage.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }
}
