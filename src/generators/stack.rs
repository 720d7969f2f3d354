/// Last-in-first-out record of the branch points the generator can return to.
/// Holds cell indices into the maze that owns the cells.
#[derive(Debug, Clone, Default)]
pub struct BacktrackStack {
    items: Vec<usize>,
}

impl BacktrackStack {
    /// Default initial capacity hint.
    pub const DEFAULT_CAPACITY: usize = 50;

    /// Creates an empty stack. The capacity is a hint; the stack grows as needed.
    pub fn with_capacity(capacity: usize) -> Self {
        BacktrackStack {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, index: usize) {
        self.items.push(index);
    }

    /// Removes the most recent entry. Returns `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<usize> {
        self.items.pop()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries from the bottom of the stack to the top.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut stack = BacktrackStack::with_capacity(2);
        assert!(stack.is_empty());
        stack.push(3);
        stack.push(1);
        stack.push(4);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.iter().collect::<Vec<_>>(), vec![3, 1, 4]);
        assert_eq!(stack.pop(), Some(4));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_grows_past_capacity_hint() {
        let mut stack = BacktrackStack::with_capacity(BacktrackStack::DEFAULT_CAPACITY);
        (0..500).for_each(|i| stack.push(i));
        assert_eq!(stack.len(), 500);
    }
}
