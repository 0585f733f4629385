//! # dynamic_array
//!
//! `dynamic_array` implements an ordered, resizable sequence container backed by
//! a single contiguous buffer whose growth and reclamation follow an explicit,
//! configurable [`ResizePolicy`].
//!
//! ## Features
//! - Index based access, insertion and removal that preserve element order.
//! - Amortized `O(1)` appends: capacity is reserved ahead of need by a growth factor.
//! - Memory is handed back once the live elements occupy a small enough share of the buffer.
//! - Tolerant indexing: reads out of range yield `None`, writes out of range do nothing.
//!
//! ## Note
//! The container is not internally synchronized, wrap it in a lock if it has to be
//! shared across threads.
//!
//! ## Example
//! ```rust
//! use dynamic_array::DynamicArray;
//!
//! let mut array = DynamicArray::from([3, 1, 2]);
//! array.sort();
//! assert_eq!(array.values(), [1, 2, 3]);
//!
//! array.insert(1, [7, 8]);
//! assert_eq!(array, [1, 7, 8, 2, 3]);
//!
//! assert_eq!(array.remove(2), Some(8));
//! assert_eq!(array.get(1), Some(&7));
//! assert_eq!(array.get(10), None);
//!
//! // Out of range writes are silently ignored.
//! array.set(42, 0);
//! array.swap(0, 42);
//! assert_eq!(array, [1, 7, 2, 3]);
//! ```

#[macro_use]
mod logging;

mod buffer;
mod policy;

pub use policy::{PolicyError, ResizePolicy};

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::buffer::Buffer;

/// An ordered, growable sequence stored in one contiguous buffer.
///
/// The logical length and the physical capacity are tracked separately: the
/// first [`len`](DynamicArray::len) slots hold the elements, the remaining ones
/// are empty headroom reserved according to the array's [`ResizePolicy`].
///
/// # Example
/// ```rust
/// use dynamic_array::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// array.add(["a", "b"]);
/// array.insert(1, ["x", "y"]);
///
/// assert_eq!(array.values(), ["a", "x", "y", "b"]);
/// assert!(array.contains(&["b", "x"]));
/// assert_eq!(array.index_of(&"y"), Some(2));
/// ```
pub struct DynamicArray<T> {
    buffer: Buffer<T>,
    len: usize,
    policy: ResizePolicy,
}

impl<T, const M: usize> From<[T; M]> for DynamicArray<T> {
    fn from(values: [T; M]) -> Self {
        Self::from_values(values)
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl<'a, T> Extend<&'a T> for DynamicArray<T>
where
    T: Clone,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.add(iter.into_iter().cloned());
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicArray<T> {
    /// Creates a new, empty `DynamicArray` with no allocated capacity and the
    /// default [`ResizePolicy`].
    ///
    /// # Example
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let array: DynamicArray<i64> = DynamicArray::new();
    ///
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self::with_policy(ResizePolicy::DEFAULT)
    }

    /// Creates a new, empty `DynamicArray` that grows and shrinks according to `policy`.
    pub const fn with_policy(policy: ResizePolicy) -> Self {
        Self {
            buffer: Buffer::new(),
            len: 0,
            policy,
        }
    }

    /// Creates a `DynamicArray` seeded with `values`, as if they were added one
    /// call at a time to an empty array.
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut this = Self::new();
        this.add(values);
        this
    }

    /// Appends `values` to the end of the array, preserving their order.
    ///
    /// Room for all of them is reserved up front, growing the buffer at most
    /// once per call when the iterator reports its exact length. Other
    /// iterators are collected first.
    ///
    /// # Example
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::new();
    /// array.add([1, 2]);
    /// array.add([3]);
    ///
    /// assert_eq!(array.len(), 3);
    /// assert_eq!(array, [1, 2, 3]);
    /// ```
    pub fn add<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let values = values.into_iter();
        match exact_len(&values) {
            Some(count) => self.append_exact(values, count),
            None => {
                let values: Vec<T> = values.collect();
                let count = values.len();
                self.append_exact(values.into_iter(), count);
            }
        }
    }

    /// Appends a single value to the end of the array.
    pub fn push(&mut self, value: T) {
        self.grow_by(1);
        self.buffer.slots_mut()[self.len] = Some(value);
        self.len += 1;
    }

    /// Returns a reference to the element at `index`, or `None` when `index`
    /// is out of range.
    ///
    /// # Example
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let array = DynamicArray::from([10, 20]);
    ///
    /// assert_eq!(array.get(0), Some(&10));
    /// assert_eq!(array.get(1), Some(&20));
    /// assert_eq!(array.get(2), None); // Out of bounds
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        self.buffer.slots()[index].as_ref()
    }

    /// Returns a mutable reference to the element at `index`, or `None` when
    /// `index` is out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }

        self.buffer.slots_mut()[index].as_mut()
    }

    /// Overwrites the element at `index`.
    ///
    /// Setting at `index == len()` appends the value. Any other out of range
    /// index is ignored and the array is left untouched.
    ///
    /// # Example
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::new();
    /// array.set(0, "x");
    /// assert_eq!(array, ["x"]);
    ///
    /// array.set(5, "y");
    /// assert_eq!(array.len(), 1);
    ///
    /// array.set(0, "z");
    /// assert_eq!(array, ["z"]);
    /// ```
    pub fn set(&mut self, index: usize, value: T) {
        if index == self.len {
            self.push(value);
            return;
        }

        if let Some(slot) = self.get_mut(index) {
            *slot = value;
        }
    }

    /// Inserts `values` starting at `index`, shifting the elements from `index`
    /// onwards to the right.
    ///
    /// Inserting at `index == len()` appends. Any other out of range index is
    /// ignored.
    ///
    /// # Example
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::from([10, 40]);
    /// array.insert(1, [20, 30]);
    /// array.insert(4, [50]);
    /// array.insert(9, [90]);
    ///
    /// assert_eq!(array, [10, 20, 30, 40, 50]);
    /// ```
    pub fn insert<I: IntoIterator<Item = T>>(&mut self, index: usize, values: I) {
        if index == self.len {
            self.add(values);
            return;
        }

        if index > self.len {
            return;
        }

        let values = values.into_iter();
        match exact_len(&values) {
            Some(count) => self.insert_exact(index, values, count),
            None => {
                let values: Vec<T> = values.collect();
                let count = values.len();
                self.insert_exact(index, values.into_iter(), count);
            }
        }
    }

    /// Removes and returns the element at `index`, shifting the following
    /// elements to the left. Returns `None` and leaves the array untouched
    /// when `index` is out of range.
    ///
    /// After a successful removal the buffer is shrunk to fit whenever the
    /// remaining elements fall at or below the policy's shrink threshold.
    ///
    /// # Example
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::from([1, 2, 3, 4, 5]);
    ///
    /// assert_eq!(array.remove(2), Some(3));
    /// assert_eq!(array, [1, 2, 4, 5]);
    /// assert_eq!(array.remove(10), None);
    /// ```
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }

        let slots = &mut self.buffer.slots_mut()[index..self.len];
        let value = slots[0].take();
        slots.rotate_left(1);

        self.len -= 1;
        self.shrink();
        value
    }

    /// Returns `true` if every one of `values` is present in the array.
    ///
    /// An empty `values` slice is trivially contained.
    ///
    /// # Example
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let array = DynamicArray::from(['a', 'b', 'c']);
    ///
    /// assert!(array.contains(&['c', 'a']));
    /// assert!(!array.contains(&['a', 'z']));
    /// assert!(array.contains(&[]));
    /// ```
    pub fn contains(&self, values: &[T]) -> bool
    where
        T: PartialEq,
    {
        values.iter().all(|value| self.index_of(value).is_some())
    }

    /// Returns the index of the first element equal to `value`, if any.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.elements().position(|element| element == value)
    }

    /// Returns a copy of the elements, in order.
    ///
    /// The returned `Vec` is independent from the array: changing one never
    /// affects the other.
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.elements().cloned().collect()
    }

    /// Returns the number of elements currently stored in the `DynamicArray`.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the `DynamicArray` is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots currently allocated.
    ///
    /// Capacity only reflects the resize policy at work, it is never part of
    /// the array's logical contents.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns the policy deciding when this array grows and shrinks.
    #[inline]
    pub const fn policy(&self) -> ResizePolicy {
        self.policy
    }

    /// Removes all elements and releases the buffer.
    ///
    /// # Example
    /// ```rust
    /// use dynamic_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::from([1, 2, 3]);
    /// array.clear();
    ///
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), 0);
    /// assert_eq!(array.get(0), None);
    /// ```
    pub fn clear(&mut self) {
        debug!("clear: releasing {} slots", self.buffer.capacity());
        self.buffer.release();
        self.len = 0;
    }

    /// Sorts the elements in ascending order.
    ///
    /// The sort is not stable: equal elements may be reordered.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        if self.len < 2 {
            return;
        }

        self.buffer.slots_mut()[..self.len].sort_unstable();
    }

    /// Exchanges the elements at `i` and `j`.
    ///
    /// Nothing happens unless both indices are in range.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i < self.len && j < self.len {
            self.buffer.slots_mut().swap(i, j);
        }
    }

    fn elements(&self) -> impl Iterator<Item = &T> + '_ {
        let live = &self.buffer.slots()[..self.len];
        debug_assert!(
            live.iter().all(Option::is_some),
            "empty slot within the first {} slots",
            self.len
        );
        live.iter().flatten()
    }

    /// Reserves room for `count` values, writes them into the headroom and
    /// pushes whatever `values` yields past `count`.
    fn append_exact<It: Iterator<Item = T>>(&mut self, mut values: It, count: usize) {
        if count > 0 {
            self.grow_by(count);

            let start = self.len;
            let slots = &mut self.buffer.slots_mut()[start..start + count];
            let mut written = 0;
            for (slot, value) in slots.iter_mut().zip(values.by_ref()) {
                *slot = Some(value);
                written += 1;
            }

            self.len += written;
        }

        for value in values {
            self.push(value);
        }
    }

    fn insert_exact<It: Iterator<Item = T>>(
        &mut self,
        index: usize,
        mut values: It,
        count: usize,
    ) {
        let mut written = 0;
        if count > 0 {
            self.grow_by(count);

            let start = self.len;
            let slots = self.buffer.slots_mut();
            let headroom = &mut slots[start..start + count];
            for (slot, value) in headroom.iter_mut().zip(values.by_ref()) {
                *slot = Some(value);
                written += 1;
            }
            slots[index..start + written].rotate_right(written);

            self.len += written;
        }

        let rest: Vec<T> = values.collect();
        if !rest.is_empty() {
            self.insert(index + written, rest);
        }
    }

    fn grow_by(&mut self, additional: usize) {
        let capacity = self.buffer.capacity();
        let max_capacity = Buffer::<T>::MAX_CAPACITY;
        let target = self
            .policy
            .grown_capacity(self.len, capacity, additional, max_capacity);
        if let Some(target) = target {
            self.reallocate(target);
        }
    }

    fn shrink(&mut self) {
        let capacity = self.buffer.capacity();
        let Some(threshold) = self.policy.shrink_threshold(capacity) else {
            return;
        };

        if self.len <= threshold {
            debug!(
                "shrink: {} live elements within threshold {} of {} slots",
                self.len, threshold, capacity
            );
            self.reallocate(self.len);
        }
    }

    fn reallocate(&mut self, capacity: usize) {
        trace!(
            "reallocate: {} -> {} slots, {} live",
            self.buffer.capacity(),
            capacity,
            self.len
        );
        self.buffer.resize_to(capacity, self.len);
    }
}

fn exact_len<It: Iterator>(values: &It) -> Option<usize> {
    match values.size_hint() {
        (lower, Some(upper)) if lower == upper => Some(lower),
        _ => None,
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut this = Self::with_policy(self.policy);
        this.add(self.elements().cloned());
        this
    }
}

impl<T, const M: usize> PartialEq<[T; M]> for DynamicArray<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &[T; M]) -> bool {
        self.len() == other.len() && self.elements().eq(other)
    }
}

impl<T> PartialEq<&[T]> for DynamicArray<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &&[T]) -> bool {
        self.len() == other.len() && self.elements().eq(other.iter())
    }
}

impl<T> PartialEq<[T]> for DynamicArray<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.elements().eq(other)
    }
}

impl<T> PartialEq for DynamicArray<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.elements().eq(other.elements())
    }
}

impl<T> Eq for DynamicArray<T> where T: Eq {}

impl<T> PartialOrd for DynamicArray<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.elements().partial_cmp(other.elements())
    }
}

impl<T> Ord for DynamicArray<T>
where
    T: Ord,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.elements().cmp(other.elements())
    }
}

impl<T> Hash for DynamicArray<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        self.elements().for_each(|v| v.hash(state));
    }
}

impl<T> fmt::Debug for DynamicArray<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements()).finish()
    }
}

impl<T> fmt::Display for DynamicArray<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DynamicArray: [")?;
        for (index, value) in self.elements().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}
