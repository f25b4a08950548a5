//! Sample classification
//!
//! Signedness is a property of the sample's element type, never of the pixel
//! values it happens to hold. Every sample is mapped onto a [`TaggedSample`]
//! before it touches the histogram, so values outside the 16-bit domain are
//! rejected instead of being silently truncated.

use std::fmt;

/// Integer element types accepted by the window/level engine.
pub trait Sample: Copy {
    /// Smallest value representable by the element type.
    const MIN: i64;

    fn to_i64(self) -> i64;
}

macro_rules! impl_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                const MIN: i64 = <$t>::MIN as i64;

                #[inline(always)]
                fn to_i64(self) -> i64 {
                    i64::from(self)
                }
            }
        )*
    };
}

impl_sample!(u8, i8, u16, i16, u32, i32);

/// The 16-bit domain raw values are interpreted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDomain {
    Signed,
    Unsigned,
}

impl SampleDomain {
    /// Classify by the element type's minimum representable value.
    #[inline]
    #[must_use]
    pub fn of<T: Sample>() -> Self {
        if T::MIN < 0 { Self::Signed } else { Self::Unsigned }
    }

    #[inline(always)]
    #[must_use]
    pub fn is_signed(self) -> bool {
        matches!(self, Self::Signed)
    }

    /// Bin offset that makes traversal visit raw values in ascending order
    #[inline(always)]
    #[must_use]
    pub fn offset(self) -> u16 {
        match self {
            Self::Signed => 0x8000,
            Self::Unsigned => 0x0000,
        }
    }

    #[inline]
    #[must_use]
    pub fn min_value(self) -> i64 {
        match self {
            Self::Signed => i64::from(i16::MIN),
            Self::Unsigned => i64::from(u16::MIN),
        }
    }

    #[inline]
    #[must_use]
    pub fn max_value(self) -> i64 {
        match self {
            Self::Signed => i64::from(i16::MAX),
            Self::Unsigned => i64::from(u16::MAX),
        }
    }

    /// Tag a raw value, or `None` if it falls outside this domain.
    #[inline(always)]
    #[must_use]
    pub fn classify(self, raw: i64) -> Option<TaggedSample> {
        match self {
            Self::Signed => i16::try_from(raw).ok().map(TaggedSample::Signed),
            Self::Unsigned => u16::try_from(raw).ok().map(TaggedSample::Unsigned),
        }
    }

    /// Raw value visited at traversal position `index`.
    #[inline(always)]
    #[must_use]
    pub fn value_at(self, index: u16) -> i64 {
        let bin = index.wrapping_add(self.offset());
        match self {
            Self::Signed => i64::from(i16::from_ne_bytes(bin.to_ne_bytes())),
            Self::Unsigned => i64::from(bin),
        }
    }
}

impl fmt::Display for SampleDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signed => write!(f, "signed"),
            Self::Unsigned => write!(f, "unsigned"),
        }
    }
}

/// A raw value known to fit its 16-bit domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedSample {
    Signed(i16),
    Unsigned(u16),
}

impl TaggedSample {
    /// Histogram bin: the two's-complement bit pattern of the value.
    #[inline(always)]
    #[must_use]
    pub fn bin(self) -> u16 {
        match self {
            Self::Signed(v) => u16::from_ne_bytes(v.to_ne_bytes()),
            Self::Unsigned(v) => v,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn value(self) -> i64 {
        match self {
            Self::Signed(v) => i64::from(v),
            Self::Unsigned(v) => i64::from(v),
        }
    }
}

/// Bin a padding value the way pixels are binned: low 16 bits only.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn padding_bin(padding: i32) -> u16 {
    padding as u16
}
