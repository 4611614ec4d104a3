use std::ops::{Deref, Range};

use super::lerp_range;

/// Represents a range of floating-point values.
///
/// Used as the domain of lookup tables, see [`ValueRange::quantize`].
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ValueRange {
    /// Lower bound
    pub low: f32,
    /// Upper bound
    pub high: f32,
}

impl ValueRange {
    /// Constructs new range `[low, high]`.
    pub fn new(low: f32, high: f32) -> ValueRange {
        ValueRange { low, high }
    }

    /// Constructs new, empty range.
    pub fn empty() -> ValueRange {
        ValueRange {
            low: f32::NAN,
            high: f32::NAN,
        }
    }

    /// Constructs new range with one element, `val`.
    pub fn seed(val: f32) -> ValueRange {
        ValueRange {
            low: val,
            high: val,
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
        if self.low.is_nan() || self.high.is_nan() {
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

    /// Check if value is inside the range.
    pub fn contains(&self, val: f32) -> bool {
        self.low <= val && val <= self.high
    }

    /// Width of the range.
    pub fn width(&self) -> f32 {
        self.high - self.low
    }

    /// Index of the bin holding `value` when the range is split into `bins` equal bins.
    ///
    /// Bin centers map exactly onto indices: the interval
    /// `[low + half_bin, high - half_bin]` is mapped linearly onto `[0, bins - 1]`,
    /// rounded half to even and clamped.
    pub fn quantize(&self, value: f32, bins: usize) -> usize {
        if bins <= 1 {
            return 0;
        }
        let bin_width = self.width() / bins as f32;
        let x = value - self.low - bin_width / 2.0;
        let x2 = self.width() - bin_width;
        let index = lerp_range(0.0, (bins - 1) as f32, 0.0, x, x2).round_ties_even();

        // NaN lands in bin 0
        if index.is_nan() || index <= 0.0 {
            0
        } else {
            usize::min(index as usize, bins - 1)
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
/// let range: ValueRange = (0.0..45.5).into();
/// ```
impl From<Range<f32>> for ValueRange {
    fn from(range: Range<f32>) -> Self {
        ValueRange {
            low: range.start,
            high: range.end,
        }
    }
}
