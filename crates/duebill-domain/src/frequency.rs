//! Billing cadences and the calendar arithmetic they imply.

use std::{fmt, str::FromStr};

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{shift_month, shift_year};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Enumerates the supported billing cadences.
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    /// Calculates the due date one period after `from`.
    ///
    /// Month-based cadences preserve the day-of-month, clamping to the last
    /// day of the target month when it is shorter.
    pub fn next_date(self, from: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => from + Duration::days(1),
            Frequency::Weekly => from + Duration::days(7),
            Frequency::Biweekly => from + Duration::days(14),
            Frequency::Monthly => shift_month(from, 1),
            Frequency::Quarterly => shift_month(from, 3),
            Frequency::Yearly => shift_year(from, 1),
        }
    }

    /// Normalizes a per-period amount to its monthly cost.
    pub fn monthly_equivalent(self, amount: Decimal) -> Decimal {
        let twelve = Decimal::from(12);
        match self {
            Frequency::Daily => amount * Decimal::from(365) / twelve,
            Frequency::Weekly => amount * Decimal::from(52) / twelve,
            Frequency::Biweekly => amount * Decimal::from(26) / twelve,
            Frequency::Monthly => amount,
            Frequency::Quarterly => amount / Decimal::from(3),
            Frequency::Yearly => amount / twelve,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Every 2 Weeks",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(ParseFrequencyError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a frequency token is not one of the supported cadences.
pub struct ParseFrequencyError(pub String);

impl fmt::Display for ParseFrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized frequency `{}`", self.0)
    }
}

impl std::error::Error for ParseFrequencyError {}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_based_cadences_add_fixed_offsets() {
        let from = date(2024, 1, 15);
        assert_eq!(Frequency::Daily.next_date(from), date(2024, 1, 16));
        assert_eq!(Frequency::Weekly.next_date(from), date(2024, 1, 22));
        assert_eq!(Frequency::Biweekly.next_date(from), date(2024, 1, 29));
    }

    #[test]
    fn monthly_preserves_day_and_clamps_month_end() {
        assert_eq!(
            Frequency::Monthly.next_date(date(2024, 1, 15)),
            date(2024, 2, 15)
        );
        assert_eq!(
            Frequency::Monthly.next_date(date(2024, 1, 31)),
            date(2024, 2, 29)
        );
        assert_eq!(
            Frequency::Monthly.next_date(date(2023, 1, 31)),
            date(2023, 2, 28)
        );
    }

    #[test]
    fn monthly_rolls_over_the_year() {
        assert_eq!(
            Frequency::Monthly.next_date(date(2024, 12, 15)),
            date(2025, 1, 15)
        );
    }

    #[test]
    fn quarterly_and_yearly_advance_whole_periods() {
        assert_eq!(
            Frequency::Quarterly.next_date(date(2024, 11, 30)),
            date(2025, 2, 28)
        );
        assert_eq!(
            Frequency::Yearly.next_date(date(2024, 1, 15)),
            date(2025, 1, 15)
        );
    }

    #[test]
    fn next_date_is_deterministic() {
        let from = date(2024, 6, 1);
        assert_eq!(
            Frequency::Monthly.next_date(from),
            Frequency::Monthly.next_date(from)
        );
    }

    #[test]
    fn parses_known_tokens_and_rejects_the_rest() {
        assert_eq!("biweekly".parse::<Frequency>(), Ok(Frequency::Biweekly));
        assert_eq!(
            "fortnightly".parse::<Frequency>(),
            Err(ParseFrequencyError("fortnightly".into()))
        );
    }

    #[test]
    fn serializes_as_the_lowercase_token() {
        assert_eq!(
            serde_json::to_string(&Frequency::Biweekly).unwrap(),
            "\"biweekly\""
        );
        assert_eq!(
            serde_json::from_str::<Frequency>("\"quarterly\"").unwrap(),
            Frequency::Quarterly
        );
    }

    #[test]
    fn monthly_equivalent_normalizes_cadences() {
        assert_eq!(
            Frequency::Weekly.monthly_equivalent(dec!(50)).round_dp(2),
            dec!(216.67)
        );
        assert_eq!(Frequency::Yearly.monthly_equivalent(dec!(1200)), dec!(100));
        assert_eq!(Frequency::Monthly.monthly_equivalent(dec!(15.99)), dec!(15.99));
    }
}
