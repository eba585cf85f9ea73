//! Write-path validation for charts
//!
//! The codec deliberately accepts whatever it can represent. Before a chart is
//! persisted it must pass [`ChartValidator`]:
//! - at least one activity
//! - every name non-empty
//! - every value finite and non-negative
//! - every color in `#RRGGBB` form (hex digits in either case)

use crate::activity::Activity;
use crate::chart::ChartData;
use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern is valid"));

/// Check a color against `#RRGGBB`
#[inline]
#[must_use]
pub fn is_hex_color(color: &str) -> bool {
    HEX_COLOR.is_match(color)
}

/// Chart validation for the persistence path
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartValidator;

impl ChartValidator {
    /// Create new validator instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate a whole chart
    ///
    /// # Errors
    /// Returns the first rule the chart breaks, in activity order.
    pub fn validate(&self, chart: &ChartData) -> Result<(), ValidationError> {
        self.validate_activities(&chart.activities)
    }

    /// Validate an activity list independent of its mode
    ///
    /// # Errors
    /// Returns [`ValidationError::NoActivities`] for an empty list, otherwise
    /// the first per-activity failure.
    pub fn validate_activities(&self, activities: &[Activity]) -> Result<(), ValidationError> {
        if activities.is_empty() {
            return Err(ValidationError::NoActivities);
        }
        activities
            .iter()
            .enumerate()
            .try_for_each(|(index, activity)| Self::validate_activity(index, activity))
    }

    fn validate_activity(index: usize, activity: &Activity) -> Result<(), ValidationError> {
        if activity.name.is_empty() {
            return Err(ValidationError::EmptyName { index });
        }
        if !activity.value.is_finite() || activity.value < 0.0 {
            return Err(ValidationError::InvalidValue {
                index,
                value: activity.value,
            });
        }
        if !is_hex_color(&activity.color) {
            return Err(ValidationError::InvalidColor {
                index,
                color: activity.color.clone(),
            });
        }
        Ok(())
    }
}

/// Chart validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Chart has no activities
    #[error("at least one activity is required")]
    NoActivities,

    /// Activity name is empty
    #[error("activity {index}: name cannot be empty")]
    EmptyName { index: usize },

    /// Activity value is negative or not a number
    #[error("activity {index}: value {value} must be a non-negative number")]
    InvalidValue { index: usize, value: f64 },

    /// Activity color is not `#RRGGBB`
    #[error("activity {index}: invalid color format '{color}'")]
    InvalidColor { index: usize, color: String },
}

impl ValidationError {
    /// Index of the offending activity, if the error is about one
    #[inline]
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::NoActivities => None,
            Self::EmptyName { index }
            | Self::InvalidValue { index, .. }
            | Self::InvalidColor { index, .. } => Some(*index),
        }
    }
}
