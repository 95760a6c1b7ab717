//! Two stacks sharing one fixed buffer.
//!
//! The front stack grows up from index 0 and the back stack grows down from
//! index `capacity`. The SCC walk uses the front as its explicit call stack
//! and the back for nodes waiting on their component root. Each node sits on
//! at most one of the two at a time, so a buffer of `n` slots never fills;
//! a collision is an algorithm bug and panics.

#[derive(Debug, Clone)]
pub(crate) struct DualStack<T> {
    items: Box<[T]>,
    front: usize,
    back: usize,
}

impl<T: Copy + Default> DualStack<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            items: vec![T::default(); capacity].into_boxed_slice(),
            front: 0,
            back: capacity,
        }
    }

    pub(crate) fn push_front(&mut self, item: T) {
        assert!(self.front < self.back, "dual stack: front collided with back");
        self.items[self.front] = item;
        self.front += 1;
    }

    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.is_front_empty() {
            return None;
        }
        self.front -= 1;
        Some(self.items[self.front])
    }

    pub(crate) fn peek_front(&self) -> Option<T> {
        if self.is_front_empty() {
            None
        } else {
            Some(self.items[self.front - 1])
        }
    }

    pub(crate) const fn is_front_empty(&self) -> bool {
        self.front == 0
    }

    pub(crate) fn push_back(&mut self, item: T) {
        assert!(self.back > self.front, "dual stack: back collided with front");
        self.back -= 1;
        self.items[self.back] = item;
    }

    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.is_back_empty() {
            return None;
        }
        let item = self.items[self.back];
        self.back += 1;
        Some(item)
    }

    pub(crate) fn peek_back(&self) -> Option<T> {
        if self.is_back_empty() {
            None
        } else {
            Some(self.items[self.back])
        }
    }

    pub(crate) fn is_back_empty(&self) -> bool {
        self.back == self.items.len()
    }
}
