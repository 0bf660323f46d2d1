//! Look-back periods such as `"6mo"`, `"1y"` or `"5d"`.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{FolioError, FolioResult};

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodUnit {
    /// Calendar days (`d`).
    Days,
    /// Calendar months (`mo`).
    Months,
    /// Calendar years (`y`).
    Years,
}

impl PeriodUnit {
    /// Suffix used in the string form.
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Days => "d",
            Self::Months => "mo",
            Self::Years => "y",
        }
    }
}

/// A history window written `<N><unit>` with unit in `{d, mo, y}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    count: u32,
    unit: PeriodUnit,
}

impl Period {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `count` is zero.
    pub fn new(count: u32, unit: PeriodUnit) -> FolioResult<Self> {
        if count == 0 {
            return Err(FolioError::invalid_parameter(
                "period",
                "count must be at least 1",
            ));
        }
        Ok(Self { count, unit })
    }

    /// One year.
    #[must_use]
    pub const fn one_year() -> Self {
        Self {
            count: 1,
            unit: PeriodUnit::Years,
        }
    }

    /// Five years, the default estimation window for projections.
    #[must_use]
    pub const fn five_years() -> Self {
        Self {
            count: 5,
            unit: PeriodUnit::Years,
        }
    }

    /// Number of units.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Unit of the period.
    #[must_use]
    pub fn unit(&self) -> PeriodUnit {
        self.unit
    }

    /// First calendar date covered when looking back from `end`.
    ///
    /// Month arithmetic clamps to the end of shorter months
    /// (e.g. 31 March minus one month is 28/29 February).
    #[must_use]
    pub fn start_from(&self, end: NaiveDate) -> NaiveDate {
        match self.unit {
            PeriodUnit::Days => end - Duration::days(i64::from(self.count)),
            PeriodUnit::Months => end
                .checked_sub_months(Months::new(self.count))
                .unwrap_or(NaiveDate::MIN),
            PeriodUnit::Years => end
                .checked_sub_months(Months::new(self.count.saturating_mul(12)))
                .unwrap_or(NaiveDate::MIN),
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::one_year()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl FromStr for Period {
    type Err = FolioError;

    fn from_str(s: &str) -> FolioResult<Self> {
        let s = s.trim().to_lowercase();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| invalid_period(&s))?;
        let (digits, suffix) = s.split_at(split);

        let count: u32 = digits.parse().map_err(|_| invalid_period(&s))?;
        let unit = match suffix {
            "d" => PeriodUnit::Days,
            "mo" => PeriodUnit::Months,
            "y" => PeriodUnit::Years,
            _ => return Err(invalid_period(&s)),
        };

        Self::new(count, unit)
    }
}

fn invalid_period(s: &str) -> FolioError {
    FolioError::invalid_parameter(
        "period",
        format!("'{s}' is not of the form <N><unit> with unit d, mo or y"),
    )
}

impl TryFrom<String> for Period {
    type Error = FolioError;

    fn try_from(s: String) -> FolioResult<Self> {
        s.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
