use std::mem::size_of;

/// Fixed-capacity slot storage owned by exactly one `DynamicArray`.
///
/// The slot count is the length of `slots` and only changes through
/// [`Buffer::resize_to`] and [`Buffer::release`]; nothing ever pushes onto it.
/// Every slot past the live prefix holds `None`, so a vacated slot never keeps
/// a value alive.
pub(crate) struct Buffer<T> {
    slots: Vec<Option<T>>,
}

impl<T> Buffer<T> {
    /// Largest slot count a single allocation can hold.
    pub(crate) const MAX_CAPACITY: usize = {
        let size = size_of::<Option<T>>();
        if size == 0 {
            usize::MAX
        } else {
            isize::MAX as usize / size
        }
    };

    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Option<T>] {
        &self.slots
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [Option<T>] {
        &mut self.slots
    }

    /// Allocates a buffer of exactly `capacity` slots, moves the first `live`
    /// values into it and drops the old allocation.
    pub(crate) fn resize_to(&mut self, capacity: usize, live: usize) {
        debug_assert!(live <= capacity);
        debug_assert!(live <= self.capacity());
        debug_assert!(capacity <= Self::MAX_CAPACITY);

        let mut slots = Vec::with_capacity(capacity);
        slots.extend(self.slots[..live].iter_mut().map(Option::take));
        slots.resize_with(capacity, || None);

        self.slots = slots;
    }

    /// Drops every value and the allocation itself.
    pub(crate) fn release(&mut self) {
        self.slots = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::Buffer;

    #[test]
    fn test_new_buffer_has_no_capacity() {
        const EMPTY: Buffer<i32> = Buffer::new();

        let sut = EMPTY;
        assert_eq!(sut.capacity(), 0);
        assert!(sut.slots().is_empty());
    }

    #[test]
    fn test_max_capacity_fits_an_allocation() {
        assert_eq!(Buffer::<Infallible>::MAX_CAPACITY, usize::MAX);
        assert_eq!(Buffer::<()>::MAX_CAPACITY, isize::MAX as usize);
        assert_eq!(Buffer::<u64>::MAX_CAPACITY, isize::MAX as usize / 16);
        assert_eq!(Buffer::<u8>::MAX_CAPACITY, isize::MAX as usize / 2);
    }

    #[test]
    fn test_resize_to_keeps_live_prefix() {
        let mut sut = Buffer::new();
        sut.resize_to(4, 0);
        assert_eq!(sut.capacity(), 4);
        assert_eq!(sut.slots(), &[None, None, None, None]);

        sut.slots_mut()[0] = Some(1);
        sut.slots_mut()[1] = Some(2);
        sut.slots_mut()[2] = Some(3);

        sut.resize_to(8, 3);
        assert_eq!(sut.capacity(), 8);
        assert_eq!(&sut.slots()[..4], &[Some(1), Some(2), Some(3), None]);
        assert!(sut.slots()[3..].iter().all(Option::is_none));

        sut.resize_to(2, 2);
        assert_eq!(sut.capacity(), 2);
        assert_eq!(sut.slots(), &[Some(1), Some(2)]);
    }

    #[test]
    fn test_release_drops_everything() {
        let mut sut = Buffer::new();
        sut.resize_to(3, 0);
        sut.slots_mut()[0] = Some(String::from("a"));

        sut.release();
        assert_eq!(sut.capacity(), 0);
    }
}
