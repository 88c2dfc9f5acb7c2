/*!
A max heap on some subset of values with fixed indicies.

The heap is backed by a vector of values, and a value may be moved onto (activated) or off (removed) the heap without changing its index.
A companion vector tracks where on the heap each index currently sits, if anywhere.

[IndexHeap] is used as a store of [atom](crate::structures::atom) activity.
Every atom has an index, and it is useful to find the most active atom without a value when no propagation remains to be done.

Values are compared by [PartialOrd], and an index whose value is *greater* sits closer to the top of the heap.
So, ties may be broken by a richer value, as done with [AtomActivity](crate::db::atom::AtomActivity).

```rust
# use otter_step::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();

heap.add(40, 3);
heap.add(2, 9);

heap.activate(40);
heap.activate(2);

assert_eq!(heap.value_at(5), &i32::default());

assert_eq!(heap.pop_max(), Some(2));
assert_eq!(heap.pop_max(), Some(40));
assert!(heap.pop_max().is_none());
```
*/

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default> {
    /// Values, indexed by value index.
    values: Vec<V>,

    /// The position of each value index on the heap, if active.
    position_in_heap: Vec<Option<usize>>,

    /// The active value indicies, as a binary heap.
    heap: Vec<usize>,
}

impl<V: PartialOrd + Default> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position_in_heap: Vec::default(),
            heap: Vec::default(),
        }
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Index `value` with `value_index`.
    /// Returns true if `value_index` was a fresh index, false otherwise.
    ///
    /// The structure grows to the size required for `value_index` to be an index, and any skipped indicies are given the default value.
    /// To place `value_index` on the heap [activate](IndexHeap::activate) should be called after this method.
    pub fn add(&mut self, value_index: usize, value: V) -> bool {
        let fresh = value_index >= self.values.len();
        if fresh {
            self.values.resize_with(value_index + 1, V::default);
            self.position_in_heap.resize(value_index + 1, None);
        }
        self.revalue(value_index, value);
        if !fresh {
            self.heapify_if_active(value_index);
        }
        fresh
    }

    /// Places `value_index` on the heap, if not already present.
    /// Returns true if `value_index` was placed on the heap, false otherwise.
    pub fn activate(&mut self, value_index: usize) -> bool {
        match self.heap_index(value_index) {
            Some(heap_index) => {
                self.heapify_up(heap_index);
                self.heapify_down(heap_index);
                false
            }
            None => {
                let heap_index = self.heap.len();
                self.heap.push(value_index);
                self.reposition(value_index, Some(heap_index));
                self.heapify_up(heap_index);
                true
            }
        }
    }

    /// Remove `value_index` from the heap, if present.
    /// Returns true if `value_index` was removed, false otherwise.
    pub fn remove(&mut self, value_index: usize) -> bool {
        let Some(heap_index) = self.heap_index(value_index) else {
            return false;
        };

        let last = self.heap.len() - 1;
        self.swap(heap_index, last);
        self.heap.pop();
        self.reposition(value_index, None);

        if heap_index < self.heap.len() {
            self.heapify_up(heap_index);
            self.heapify_down(heap_index);
        }
        true
    }

    /// Heapify (ensure invariants of the heap are upheld) if `value_index` is active.
    pub fn heapify_if_active(&mut self, value_index: usize) {
        if let Some(heap_index) = self.heap_index(value_index) {
            self.heapify_up(heap_index);
            self.heapify_down(heap_index);
        }
    }

    /// Peek at the maximum index of the heap.
    pub fn peek_max(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// Pop the maximum index off the heap.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = self.peek_max()?;
        self.remove(max);
        Some(max)
    }

    /// Return the value indexed by `value_index`.
    ///
    /// # Panics
    /// If `value_index` has not been [added](IndexHeap::add).
    pub fn value_at(&self, value_index: usize) -> &V {
        &self.values[value_index]
    }

    /// Apply `f` to all (indexed) values.
    ///
    /// The heap is not heapified, and so `f` should preserve the order of values.
    pub fn apply_to_all(&mut self, f: impl Fn(&V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(value)
        }
    }

    /// Set the value of `value_index` to `value`.
    ///
    /// The heap is not heapified, see [heapify_if_active](IndexHeap::heapify_if_active).
    pub fn revalue(&mut self, value_index: usize, value: V) {
        self.values[value_index] = value
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    fn heap_index(&self, value_index: usize) -> Option<usize> {
        self.position_in_heap.get(value_index).copied().flatten()
    }

    fn reposition(&mut self, value_index: usize, heap_index: Option<usize>) {
        self.position_in_heap[value_index] = heap_index;
    }

    /// The value stored at `heap_index` on the heap.
    fn heap_value(&self, heap_index: usize) -> &V {
        &self.values[self.heap[heap_index]]
    }

    /// Swaps two positions on the heap, and updates the position of the indicies at those positions.
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position_in_heap[self.heap[a]] = Some(a);
        self.position_in_heap[self.heap[b]] = Some(b);
    }

    /// Shuffles the index at `heap_index` down into the heap, so long as some child is greater.
    fn heapify_down(&mut self, mut heap_index: usize) {
        loop {
            let left = (2 * heap_index) + 1;
            let right = left + 1;
            let mut largest = heap_index;

            if left < self.heap.len() && self.heap_value(left) > self.heap_value(largest) {
                largest = left;
            }
            if right < self.heap.len() && self.heap_value(right) > self.heap_value(largest) {
                largest = right;
            }

            if largest == heap_index {
                break;
            }
            self.swap(heap_index, largest);
            heap_index = largest;
        }
    }

    /// Shuffles the index at `heap_index` up the heap, so long as the parent is smaller.
    fn heapify_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent = (heap_index - 1) / 2;
            if self.heap_value(heap_index) > self.heap_value(parent) {
                self.swap(heap_index, parent);
                heap_index = parent;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_simple() {
        let mut test_heap = IndexHeap::default();
        for (index, value) in [(3, 15), (8, 5), (2, 25), (5, 35), (1, 45)] {
            test_heap.add(index, value);
            test_heap.activate(index);
        }

        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(5));
        assert_eq!(test_heap.pop_max(), Some(2));
        assert_eq!(test_heap.pop_max(), Some(3));
        assert_eq!(test_heap.pop_max(), Some(8));
        assert!(test_heap.pop_max().is_none());
    }

    #[test]
    fn heap_update_in_place() {
        let mut test_heap = IndexHeap::default();
        for (index, value) in [(7, 10), (3, 30), (2, 60), (0, 70)] {
            test_heap.add(index, value);
            test_heap.activate(index);
        }

        for (index, value) in [(0, 0), (2, 2), (3, 3), (7, 7)] {
            test_heap.revalue(index, value);
            test_heap.heapify_if_active(index);
        }

        assert_eq!(test_heap.pop_max(), Some(7));
        assert_eq!(test_heap.pop_max(), Some(3));
        assert_eq!(test_heap.pop_max(), Some(2));
        assert_eq!(test_heap.pop_max(), Some(0));
        assert!(test_heap.pop_max().is_none());
    }

    #[test]
    fn heap_sparse() {
        let mut test_heap = IndexHeap::default();
        test_heap.add(512, 1);
        test_heap.add(0, 90);
        test_heap.activate(512);
        test_heap.activate(0);

        assert_eq!(test_heap.values.len(), 513);
        assert_eq!(test_heap.values[17], i32::default());
        assert_eq!(test_heap.pop_max(), Some(0));
        assert_eq!(test_heap.pop_max(), Some(512));
        assert!(test_heap.pop_max().is_none());
    }

    #[test]
    fn heap_remove() {
        let mut test_heap = IndexHeap::default();
        for index in [6, 5, 4, 1, 0] {
            test_heap.add(index, index as i32);
            test_heap.activate(index);
        }

        assert!(test_heap.remove(4));
        assert!(!test_heap.remove(4));
        assert!(test_heap.remove(6));
        assert!(!test_heap.add(4, 10));
        assert!(!test_heap.add(4, 2));
        assert!(test_heap.activate(4));
        assert!(!test_heap.activate(4));

        assert_eq!(test_heap.heap.len(), 4);
        assert_eq!(test_heap.pop_max(), Some(5));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(0));
    }

    #[test]
    fn heap_revalue_active() {
        let mut test_heap = IndexHeap::default();
        for index in 1..=4 {
            test_heap.add(index, 1.0);
            test_heap.activate(index);
        }

        test_heap.revalue(3, 8.0);
        test_heap.heapify_if_active(3);
        assert_eq!(test_heap.peek_max(), Some(3));

        test_heap.apply_to_all(|v| v * 0.5);
        assert_eq!(test_heap.value_at(3), &4.0);
        assert_eq!(test_heap.pop_max(), Some(3));
    }
}
