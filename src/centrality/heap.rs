//! Indexed binary max-heap used by the weighted traversal

use crate::error::HeapError;

/// Binary max-heap over `(index, key)` pairs where every index appears at most once.
///
/// Besides the heap array itself the structure keeps a map from index to heap
/// slot, so the key of a stored index can be changed in O(log n).
#[derive(Debug, Clone)]
pub struct IndexedMaxHeap {
    /// Keys in heap order
    keys: Vec<f64>,

    /// Index stored in each heap slot (parallel to `keys`)
    indices: Vec<usize>,

    /// Heap slot of each index, `None` when the index is not stored
    slots: Vec<Option<usize>>,
}

impl IndexedMaxHeap {
    /// Create an empty heap able to hold indices `0..capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: Vec::new(),
            indices: Vec::new(),
            slots: vec![None; capacity],
        }
    }

    /// Largest index + 1 the heap accepts
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check whether `index` is currently stored
    pub fn contains(&self, index: usize) -> bool {
        self.slots.get(index).map_or(false, |slot| slot.is_some())
    }

    /// Current key of `index`, if stored
    pub fn get(&self, index: usize) -> Option<f64> {
        self.slots
            .get(index)
            .copied()
            .flatten()
            .map(|slot| self.keys[slot])
    }

    /// Remove all entries. Only the slots of stored entries are touched.
    pub fn clear(&mut self) {
        for &index in &self.indices {
            self.slots[index] = None;
        }
        self.keys.clear();
        self.indices.clear();
    }

    /// Insert a new entry
    pub fn push(&mut self, index: usize, key: f64) -> Result<(), HeapError> {
        self.check_range(index)?;
        if self.slots[index].is_some() {
            return Err(HeapError::DuplicateKey(index));
        }

        let slot = self.keys.len();
        self.keys.push(key);
        self.indices.push(index);
        self.slots[index] = Some(slot);
        self.sift_up(slot);

        Ok(())
    }

    /// Key of the maximum entry
    pub fn peek_max(&self) -> Option<f64> {
        self.keys.first().copied()
    }

    /// Index of the maximum entry
    pub fn peek_max_index(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    /// Remove and return the maximum entry
    pub fn pop_max(&mut self) -> Result<(usize, f64), HeapError> {
        if self.keys.is_empty() {
            return Err(HeapError::Empty);
        }

        let last = self.keys.len() - 1;
        self.swap_slots(0, last);

        let key = self.keys.pop().ok_or(HeapError::Empty)?;
        let index = self.indices.pop().ok_or(HeapError::Empty)?;
        self.slots[index] = None;

        if !self.keys.is_empty() {
            self.sift_down(0);
        }

        Ok((index, key))
    }

    /// Change the key of a stored entry, moving it up or down as needed
    pub fn modify(&mut self, index: usize, key: f64) -> Result<(), HeapError> {
        let slot = self.slot_of(index)?;
        let old = self.keys[slot];
        self.keys[slot] = key;

        if key > old {
            self.sift_up(slot);
        } else if key < old {
            self.sift_down(slot);
        }

        Ok(())
    }

    /// Lower the key of a stored entry
    pub fn decrease_key(&mut self, index: usize, key: f64) -> Result<(), HeapError> {
        self.modify(index, key)
    }

    /// Raise the key of a stored entry
    pub fn increase_key(&mut self, index: usize, key: f64) -> Result<(), HeapError> {
        self.modify(index, key)
    }

    fn check_range(&self, index: usize) -> Result<(), HeapError> {
        if index >= self.capacity() {
            return Err(HeapError::OutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    fn slot_of(&self, index: usize) -> Result<usize, HeapError> {
        self.slots
            .get(index)
            .copied()
            .flatten()
            .ok_or(HeapError::NotFound(index))
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.keys.swap(a, b);
        self.indices.swap(a, b);
        self.slots[self.indices[a]] = Some(a);
        self.slots[self.indices[b]] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.keys[slot] <= self.keys[parent] {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.keys.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut largest = slot;

            if left < len && self.keys[left] > self.keys[largest] {
                largest = left;
            }
            if right < len && self.keys[right] > self.keys[largest] {
                largest = right;
            }
            if largest == slot {
                break;
            }

            self.swap_slots(slot, largest);
            slot = largest;
        }
    }
}
