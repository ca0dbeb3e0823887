use std::ops::{Deref, Range};

/// Represents a range of floating-point values.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ValueRange {
    /// Lower bound
    pub low: f32,
    /// Upper bound
    pub high: f32,
}

impl ValueRange {
    /// Constructs new, empty range.
    pub fn empty() -> ValueRange {
        ValueRange {
            low: f32::NAN,
            high: f32::NAN,
        }
    }

    /// Constructs minimal range, where all samples from an iterator
    /// are inside the range.
    pub fn from_samples<T, I>(iter: impl IntoIterator<Item = T>) -> ValueRange
    where
        T: Deref<Target = I>,
        I: Into<f32> + Copy,
    {
        let mut range = ValueRange::empty();
        for val in iter {
            range.extend((*val).into());
        }
        range
    }

    /// Extend the range with new value.
    pub fn extend(&mut self, val: f32) {
        if self.is_empty() {
            self.low = val;
            self.high = val;
        }

        if val > self.high {
            self.high = val;
        }

        if val < self.low {
            self.low = val;
        }
    }

    /// Range holds no values yet.
    pub fn is_empty(&self) -> bool {
        self.low.is_nan() || self.high.is_nan()
    }

    /// Check if value is inside the range.
    pub fn contains(&self, val: f32) -> bool {
        self.low <= val && val <= self.high
    }

    /// Distance between bounds, zero for empty range.
    pub fn width(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.high - self.low
        }
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::empty()
    }
}

/// Conversion from standard library type.
/// Unlocks simple syntax:
/// ```
/// # use volren_lib::common::ValueRange;
/// let range: ValueRange = (0.0..1.0).into();
/// ```
impl From<Range<f32>> for ValueRange {
    fn from(range: Range<f32>) -> Self {
        ValueRange {
            low: range.start,
            high: range.end,
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn empty_value_range() {
        let mut range = ValueRange::empty();

        assert!(range.is_empty());
        assert!(!range.contains(2.0));
        assert!(!range.contains(0.0));
        assert_eq!(range.width(), 0.0);

        range.extend(2.0);

        assert!(range.contains(2.0));
        assert_eq!(range.low, 2.0);
        assert_eq!(range.high, 2.0);
    }

    #[test]
    fn from_samples() {
        // Samples do not have to be floating point
        let samples = &[1u8, 2, 4, 10, 5, 0];

        let range = ValueRange::from_samples(samples.iter());

        assert_eq!(
            range,
            ValueRange {
                low: 0.0,
                high: 10.0
            }
        );
        assert_eq!(range.width(), 10.0);
    }

    #[test]
    fn normalized_samples_can_exceed_unit_range() {
        let samples = [0.0f32, 0.5, 1.2];
        let range = ValueRange::from_samples(samples.iter());

        assert!(range.contains(1.1));
        assert!(!range.contains(-0.1));
    }
}
