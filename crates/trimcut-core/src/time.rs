//! Time representation for cut points.
//!
//! Values are non-negative seconds held as rationals, so whole-second cut
//! points typed as `HH:MM:SS` compare exactly against each other while
//! fractional media durations reported by a prober stay representable.

use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use crate::error::{CutError, TimeFormatError};

/// A non-negative point in time (or duration), in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TimeValue {
    value: Rational64,
}

impl TimeValue {
    /// Zero time constant.
    pub const ZERO: Self = Self {
        value: Rational64::new_raw(0, 1),
    };

    /// Create a TimeValue from whole seconds.
    #[inline]
    pub fn from_secs(seconds: u32) -> Self {
        Self {
            value: Rational64::from_integer(i64::from(seconds)),
        }
    }

    /// Create a TimeValue from seconds as a float.
    /// Note: rounded to microsecond precision.
    pub fn from_seconds_f64(seconds: f64) -> Result<Self, TimeFormatError> {
        const PRECISION: i64 = 1_000_000;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(TimeFormatError::InvalidSeconds(seconds.to_string()));
        }
        let scaled = (seconds * PRECISION as f64).round();
        if scaled >= i64::MAX as f64 {
            return Err(TimeFormatError::Overflow(seconds.to_string()));
        }
        Ok(Self {
            value: Rational64::new(scaled as i64, PRECISION),
        })
    }

    /// Parse `HH:MM:SS`.
    ///
    /// Exactly three colon-separated fields, each a non-negative integer.
    /// Minutes and seconds are not range-checked, so `00:90:00` is 5400s.
    pub fn parse_hms(text: &str) -> Result<Self, TimeFormatError> {
        let trimmed = text.trim();
        let fields: Vec<&str> = trimmed.split(':').collect();
        let &[hours, minutes, seconds] = fields.as_slice() else {
            return Err(TimeFormatError::FieldCount(trimmed.to_string()));
        };

        let field = |unit: &'static str, raw: &str| {
            raw.trim()
                .parse::<u64>()
                .map_err(|_| TimeFormatError::NotAnInteger {
                    text: trimmed.to_string(),
                    unit,
                    field: raw.to_string(),
                })
        };
        let hours = field("hours", hours)?;
        let minutes = field("minutes", minutes)?;
        let seconds = field("seconds", seconds)?;

        let overflow = || TimeFormatError::Overflow(trimmed.to_string());
        let total = hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(seconds))
            .ok_or_else(overflow)?;
        let total = i64::try_from(total).map_err(|_| overflow())?;

        Ok(Self {
            value: Rational64::from_integer(total),
        })
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn to_seconds_f64(self) -> f64 {
        *self.value.numer() as f64 / *self.value.denom() as f64
    }

    /// Check if this time is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        *self.value.numer() == 0
    }

    /// Difference `self - earlier`, clamped at zero.
    pub fn saturating_sub(self, earlier: Self) -> Self {
        if earlier >= self {
            Self::ZERO
        } else {
            Self {
                value: self.value - earlier.value,
            }
        }
    }
}

impl Default for TimeValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for TimeValue {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
        }
    }
}

impl FromStr for TimeValue {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hms(s)
    }
}

impl TryFrom<f64> for TimeValue {
    type Error = TimeFormatError;

    fn try_from(seconds: f64) -> Result<Self, Self::Error> {
        Self::from_seconds_f64(seconds)
    }
}

impl From<TimeValue> for f64 {
    fn from(time: TimeValue) -> f64 {
        time.to_seconds_f64()
    }
}

/// Formats as `HH:MM:SS`, with milliseconds when the value is fractional.
impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.value.to_integer();
        let fraction = self.value.fract();
        let (h, m, s) = (whole / 3600, (whole % 3600) / 60, whole % 60);
        if *fraction.numer() == 0 {
            write!(f, "{:02}:{:02}:{:02}", h, m, s)
        } else {
            let millis = (fraction * 1000).to_integer().min(999);
            write!(f, "{:02}:{:02}:{:02}.{:03}", h, m, s, millis)
        }
    }
}

/// The source media's total length; the bounded range cuts apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Timeline {
    duration: TimeValue,
}

impl Timeline {
    /// Create a timeline. The duration must be positive.
    pub fn new(duration: TimeValue) -> Result<Self, CutError> {
        if duration.is_zero() {
            return Err(CutError::InvalidTimeline {
                duration: duration.to_string(),
            });
        }
        Ok(Self { duration })
    }

    /// Create a timeline from a duration in seconds, as reported by a prober.
    pub fn from_seconds_f64(seconds: f64) -> Result<Self, CutError> {
        let duration =
            TimeValue::from_seconds_f64(seconds).map_err(|_| CutError::InvalidTimeline {
                duration: seconds.to_string(),
            })?;
        Self::new(duration)
    }

    /// Total duration.
    #[inline]
    pub fn duration(&self) -> TimeValue {
        self.duration
    }
}
