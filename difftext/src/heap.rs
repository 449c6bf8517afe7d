//! Binary min-heap over a caller-supplied comparator.
//!
//! The ordering is a closure, so items such as `(f64, &str)` scores need not
//! implement `Ord`.

use std::cmp::Ordering;

/// Min-heap ordered by `cmp`: [`pop`](Self::pop) yields the smallest item.
#[derive(Clone)]
pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    nodes: Vec<T>,
    cmp: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty heap.
    #[must_use]
    pub const fn new(cmp: F) -> Self {
        Self {
            nodes: Vec::new(),
            cmp,
        }
    }

    /// Builds a heap from `items` in linear time.
    #[must_use]
    pub fn from_vec(items: Vec<T>, cmp: F) -> Self {
        let mut heap = Self { nodes: items, cmp };
        heap.heapify();
        heap
    }

    /// Pushes an item.
    pub fn push(&mut self, item: T) {
        self.nodes.push(item);
        let last = self.nodes.len() - 1;
        self.sift_down(0, last);
    }

    /// Removes and returns the smallest item.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.nodes.pop()?;
        if self.nodes.is_empty() {
            return Some(last);
        }
        let top = std::mem::replace(&mut self.nodes[0], last);
        self.sift_up(0);
        Some(top)
    }

    /// Returns the smallest item without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.nodes.first()
    }

    /// Pops the smallest item and pushes `item` in one step.
    ///
    /// The returned value may be larger than `item`. On an empty heap the
    /// item is stored and `None` is returned.
    pub fn replace(&mut self, item: T) -> Option<T> {
        if self.nodes.is_empty() {
            self.nodes.push(item);
            return None;
        }
        let top = std::mem::replace(&mut self.nodes[0], item);
        self.sift_up(0);
        Some(top)
    }

    /// Pushes `item` then pops the smallest, faster than the two calls.
    pub fn push_pop(&mut self, item: T) -> T {
        if !self.nodes.is_empty() && (self.cmp)(&self.nodes[0], &item) == Ordering::Less {
            let top = std::mem::replace(&mut self.nodes[0], item);
            self.sift_up(0);
            return top;
        }
        item
    }

    /// Re-establishes the heap invariant after `item` was modified in place.
    ///
    /// Does nothing when no element equals `item`.
    pub fn update_item(&mut self, item: &T)
    where
        T: PartialEq,
    {
        if let Some(pos) = self.nodes.iter().position(|node| node == item) {
            let pos = self.sift_down(0, pos);
            self.sift_up(pos);
        }
    }

    /// Returns true if an element equals `item`.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.nodes.contains(item)
    }

    /// Number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the heap holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every item.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Returns the items in heap order (not sorted).
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.nodes
    }

    fn heapify(&mut self) {
        for i in (0..self.nodes.len() / 2).rev() {
            self.sift_up(i);
        }
    }

    /// Moves the item at `pos` towards the root until its parent is not
    /// larger, stopping at `start`. Returns its final index.
    fn sift_down(&mut self, start: usize, mut pos: usize) -> usize {
        while pos > start {
            let parent = (pos - 1) >> 1;
            if (self.cmp)(&self.nodes[pos], &self.nodes[parent]) == Ordering::Less {
                self.nodes.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
        pos
    }

    /// Bubbles the smaller child up until the item at `pos` reaches a leaf,
    /// then sifts it back down into place.
    fn sift_up(&mut self, mut pos: usize) {
        let end = self.nodes.len();
        let start = pos;
        let mut child = 2 * pos + 1;
        while child < end {
            let right = child + 1;
            if right < end
                && (self.cmp)(&self.nodes[child], &self.nodes[right]) != Ordering::Less
            {
                child = right;
            }
            self.nodes.swap(pos, child);
            pos = child;
            child = 2 * pos + 1;
        }
        self.sift_down(start, pos);
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

/// Returns the `n` largest items, largest first.
pub fn nlargest<T, F>(items: Vec<T>, n: usize, cmp: F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if n == 0 {
        return Vec::new();
    }
    let mut iter = items.into_iter();
    let head: Vec<T> = iter.by_ref().take(n).collect();
    let mut heap = PriorityQueue::from_vec(head, cmp);
    for item in iter {
        heap.push_pop(item);
    }
    let cmp = heap.cmp;
    let mut result = heap.nodes;
    result.sort_by(|x, y| cmp(y, x));
    result
}

/// Returns the `n` smallest items, smallest first.
pub fn nsmallest<T, F>(items: Vec<T>, n: usize, cmp: F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut heap = PriorityQueue::from_vec(items, cmp);
    let mut result = Vec::with_capacity(n.min(heap.len()));
    while result.len() < n {
        match heap.pop() {
            Some(item) => result.push(item),
            None => break,
        }
    }
    result
}
