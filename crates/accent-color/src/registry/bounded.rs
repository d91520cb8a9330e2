use std::ops::Index;
use std::slice;

/// An ordered list with a hard capacity.
///
/// Items can only be added one at a time with [`push`](Self::push). When a
/// push makes the list reach its capacity, the second half of the list
/// (indices `capacity / 2..capacity`) is discarded. Older, low-index entries
/// therefore always survive regardless of their content: the cap is
/// FIFO-biased, it does not keep "the best" entries.
///
/// # Example
///
/// ```
/// use accent_color::BoundedList;
///
/// let mut list = BoundedList::new(4);
/// for i in 0..4 {
///     list.push(i);
/// }
/// // The fourth push hit the cap and dropped indices 2 and 3.
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedList<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedList<T> {
    /// Create an empty list.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`; a smaller cap would truncate to nothing.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "BoundedList capacity must be at least 2");
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an item, then evict the second half if the cap was reached.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        if self.items.len() >= self.capacity {
            self.items.truncate(self.capacity / 2);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Index<usize> for BoundedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a BoundedList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
