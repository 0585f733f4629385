use thiserror::Error;

/// Error returned when a [`ResizePolicy`] is built from unusable factors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PolicyError {
    #[error("growth factor must be finite and within [1.0, 16.0], got {0}")]
    InvalidGrowthFactor(f32),
    #[error("shrink factor must be finite and within [0.0, 1.0), got {0}")]
    InvalidShrinkFactor(f32),
}

/// Decides how much capacity a [`DynamicArray`](crate::DynamicArray) reserves
/// ahead of need and when it gives memory back.
///
/// - **Growth**: before `n` elements are added, if `len + n >= capacity` the
///   buffer is reallocated to `floor(growth_factor * (capacity + n))` slots.
/// - **Shrink**: after a removal, if `len <= floor(capacity * shrink_factor)`
///   the buffer is reallocated to exactly `len` slots.
///
/// A shrink factor of `0.0` permanently disables reclamation.
///
/// # Example
/// ```rust
/// use dynamic_array::{DynamicArray, ResizePolicy};
///
/// let policy = ResizePolicy::new(1.5, 0.0).unwrap();
/// let mut array = DynamicArray::with_policy(policy);
/// array.add([1, 2, 3, 4]);
/// let capacity = array.capacity();
///
/// array.remove(0);
/// array.remove(0);
/// array.remove(0);
/// assert_eq!(array.capacity(), capacity);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePolicy {
    growth_factor: f32,
    shrink_factor: f32,
}

impl ResizePolicy {
    /// Doubles on growth, shrinks to fit once a quarter or less is in use.
    pub const DEFAULT: Self = Self {
        growth_factor: 2.0,
        shrink_factor: 0.25,
    };

    /// Same growth as [`ResizePolicy::DEFAULT`], never shrinks.
    pub const NEVER_SHRINK: Self = Self {
        growth_factor: 2.0,
        shrink_factor: 0.0,
    };

    /// Largest growth factor [`ResizePolicy::new`] accepts.
    pub const MAX_GROWTH_FACTOR: f32 = 16.0;

    /// Builds a policy, rejecting a growth factor outside
    /// `[1.0, MAX_GROWTH_FACTOR]` or a shrink factor outside `[0.0, 1.0)`.
    pub fn new(growth_factor: f32, shrink_factor: f32) -> Result<Self, PolicyError> {
        if !(1.0..=Self::MAX_GROWTH_FACTOR).contains(&growth_factor) {
            return Err(PolicyError::InvalidGrowthFactor(growth_factor));
        }

        if !shrink_factor.is_finite() || !(0.0..1.0).contains(&shrink_factor) {
            return Err(PolicyError::InvalidShrinkFactor(shrink_factor));
        }

        Ok(Self {
            growth_factor,
            shrink_factor,
        })
    }

    /// Multiplier applied to `capacity + n` when the buffer has to grow.
    #[inline]
    pub const fn growth_factor(&self) -> f32 {
        self.growth_factor
    }

    /// Share of the capacity at or below which a removal shrinks the buffer to fit.
    #[inline]
    pub const fn shrink_factor(&self) -> f32 {
        self.shrink_factor
    }

    /// Returns the capacity to reallocate to before adding `additional`
    /// elements to `len` live ones, or `None` when the current buffer is kept.
    ///
    /// Over-allocation never goes past `max_capacity`, but the result always
    /// covers `len + additional`.
    pub(crate) fn grown_capacity(
        &self,
        len: usize,
        capacity: usize,
        additional: usize,
        max_capacity: usize,
    ) -> Option<usize> {
        let required = len.saturating_add(additional);
        if required < capacity {
            return None;
        }

        let base = capacity.saturating_add(additional) as f64;
        let target = (f64::from(self.growth_factor) * base) as usize;
        Some(target.min(max_capacity).max(required))
    }

    /// Returns the live length at or below which a buffer of `capacity`
    /// slots gets shrunk to fit, or `None` when shrinking is disabled.
    pub(crate) fn shrink_threshold(&self, capacity: usize) -> Option<usize> {
        if self.shrink_factor == 0.0 {
            return None;
        }

        Some((capacity as f64 * f64::from(self.shrink_factor)) as usize)
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use crate::{PolicyError, ResizePolicy};

    #[test]
    fn test_default_policy_doubles_and_shrinks_at_a_quarter() {
        let sut = ResizePolicy::default();
        assert_eq!(sut, ResizePolicy::DEFAULT);
        assert_eq!(sut.growth_factor(), 2.0);
        assert_eq!(sut.shrink_factor(), 0.25);
    }

    #[test]
    fn test_new_rejects_invalid_factors() {
        assert_eq!(
            ResizePolicy::new(0.5, 0.25),
            Err(PolicyError::InvalidGrowthFactor(0.5))
        );
        assert!(matches!(
            ResizePolicy::new(f32::NAN, 0.25),
            Err(PolicyError::InvalidGrowthFactor(_))
        ));
        assert_eq!(
            ResizePolicy::new(f32::INFINITY, 0.25),
            Err(PolicyError::InvalidGrowthFactor(f32::INFINITY))
        );
        assert_eq!(
            ResizePolicy::new(2.0, -0.1),
            Err(PolicyError::InvalidShrinkFactor(-0.1))
        );
        assert_eq!(
            ResizePolicy::new(2.0, 1.0),
            Err(PolicyError::InvalidShrinkFactor(1.0))
        );
        assert!(ResizePolicy::new(1.0, 0.0).is_ok());
        assert!(ResizePolicy::new(3.0, 0.5).is_ok());
    }

    #[test]
    fn test_new_bounds_the_growth_factor() {
        assert_eq!(
            ResizePolicy::new(1e30, 0.25),
            Err(PolicyError::InvalidGrowthFactor(1e30))
        );
        assert_eq!(
            ResizePolicy::new(16.5, 0.25),
            Err(PolicyError::InvalidGrowthFactor(16.5))
        );

        let sut = ResizePolicy::new(ResizePolicy::MAX_GROWTH_FACTOR, 0.25).unwrap();
        assert_eq!(sut.growth_factor(), 16.0);
    }

    #[test]
    fn test_policy_error_messages() {
        assert_eq!(
            PolicyError::InvalidGrowthFactor(0.5).to_string(),
            "growth factor must be finite and within [1.0, 16.0], got 0.5"
        );
        assert_eq!(
            PolicyError::InvalidShrinkFactor(2.0).to_string(),
            "shrink factor must be finite and within [0.0, 1.0), got 2"
        );
    }

    #[test]
    fn test_grown_capacity_over_allocates() {
        let sut = ResizePolicy::DEFAULT;

        assert_eq!(sut.grown_capacity(0, 0, 1, usize::MAX), Some(2));
        assert_eq!(sut.grown_capacity(1, 2, 1, usize::MAX), Some(6));
        assert_eq!(sut.grown_capacity(2, 6, 1, usize::MAX), None);
        assert_eq!(sut.grown_capacity(5, 6, 1, usize::MAX), Some(14));
        assert_eq!(sut.grown_capacity(0, 0, 5, usize::MAX), Some(10));
    }

    #[test]
    fn test_grown_capacity_never_falls_short_of_required() {
        let sut = ResizePolicy::new(1.0, 0.0).unwrap();
        assert_eq!(sut.grown_capacity(4, 4, 3, usize::MAX), Some(7));
        assert_eq!(sut.grown_capacity(0, 0, 0, usize::MAX), Some(0));
    }

    #[test]
    fn test_grown_capacity_stops_at_max_capacity() {
        let sut = ResizePolicy::new(16.0, 0.25).unwrap();
        assert_eq!(sut.grown_capacity(0, 0, 4, 100), Some(64));
        assert_eq!(sut.grown_capacity(8, 8, 1, 100), Some(100));
        assert_eq!(
            sut.grown_capacity(usize::MAX / 2, usize::MAX / 2, 1, 1000),
            Some(usize::MAX / 2 + 1)
        );
    }

    #[test]
    fn test_shrink_threshold() {
        let sut = ResizePolicy::DEFAULT;
        assert_eq!(sut.shrink_threshold(0), Some(0));
        assert_eq!(sut.shrink_threshold(3), Some(0));
        assert_eq!(sut.shrink_threshold(10), Some(2));
        assert_eq!(sut.shrink_threshold(16), Some(4));

        assert_eq!(ResizePolicy::NEVER_SHRINK.shrink_threshold(16), None);
    }
}
