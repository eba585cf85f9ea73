//! Charts and the allocation mode that governs them.

use crate::activity::Activity;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Hours in the week the `hours` mode allocates
pub const HOURS_PER_WEEK: f64 = 168.0;

/// How activity values are interpreted by consumers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationMode {
    /// Values are hours out of a 168-hour week
    #[default]
    Hours,
    /// Values are percentage points out of 100
    Percentage,
}

impl AllocationMode {
    /// Wire name of the mode
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Percentage => "percentage",
        }
    }

    /// Convert a value in this mode to hours of the week
    #[inline]
    #[must_use]
    pub fn to_hours(self, value: f64) -> f64 {
        match self {
            Self::Hours => value,
            Self::Percentage => value / 100.0 * HOURS_PER_WEEK,
        }
    }
}

impl Display for AllocationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" => Ok(Self::Hours),
            "percentage" => Ok(Self::Percentage),
            other => Err(format!("unknown allocation mode: '{other}'")),
        }
    }
}

/// An activity list together with its mode
///
/// This is what the store persists and what a current-revision share token carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Activities in display order
    pub activities: Vec<Activity>,
    /// Interpretation of `activities[..].value`
    pub mode: AllocationMode,
}

impl ChartData {
    /// Create new chart data
    #[inline]
    #[must_use]
    pub fn new(activities: Vec<Activity>, mode: AllocationMode) -> Self {
        Self { activities, mode }
    }

    /// Sum of all activity values
    #[must_use]
    pub fn total(&self) -> f64 {
        self.activities.iter().map(|a| a.value).sum()
    }

    /// Check if there is nothing to show
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_wire_names() {
        assert_eq!(serde_json::to_string(&AllocationMode::Hours).unwrap(), "\"hours\"");
        assert_eq!(
            serde_json::to_string(&AllocationMode::Percentage).unwrap(),
            "\"percentage\""
        );
        assert_eq!("percentage".parse::<AllocationMode>(), Ok(AllocationMode::Percentage));
        assert!("Hours".parse::<AllocationMode>().is_err());
    }

    #[test]
    fn mode_defaults_to_hours() {
        assert_eq!(AllocationMode::default(), AllocationMode::Hours);
    }

    #[test]
    fn percentage_converts_to_hours() {
        assert!((AllocationMode::Percentage.to_hours(50.0) - 84.0).abs() < 1e-9);
        assert_eq!(AllocationMode::Hours.to_hours(12.5), 12.5);
    }

    #[test]
    fn chart_total() {
        let chart = ChartData::new(
            vec![
                Activity::new("1", "Sleep", 56.0, "#000000"),
                Activity::new("2", "Work", 40.5, "#111111"),
            ],
            AllocationMode::Hours,
        );
        assert!((chart.total() - 96.5).abs() < 1e-9);
        assert!(!chart.is_empty());
    }
}
