//! A single slice of an allocation.

use serde::{Deserialize, Serialize};

/// One named activity and the share of the budget it takes
///
/// The `id` is opaque and only stable within a list; duplicates are kept
/// as-is. `value` is non-negative by convention and `color` is `#RRGGBB`
/// by convention; neither is normalized here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Opaque identifier used by editors for diffing and reordering
    pub id: String,
    /// Free-form label, may be empty
    pub name: String,
    /// Hours or percentage points, depending on the chart mode
    pub value: f64,
    /// Hex color, `#RRGGBB`
    pub color: String,
}

impl Activity {
    /// Create new activity
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            color: color.into(),
        }
    }

    /// Whether the activity contributes anything to a chart
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.value > 0.0
    }

    /// Case- and whitespace-insensitive name comparison
    #[must_use]
    pub fn is_named(&self, category: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(category.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_field_names() {
        let activity = Activity::new("1", "Sleep", 56.0, "#3498db");
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["name"], "Sleep");
        assert_eq!(json["value"], 56.0);
        assert_eq!(json["color"], "#3498db");
    }

    #[test]
    fn integral_json_value_parses_as_float() {
        let activity: Activity =
            serde_json::from_str(r##"{"id":"a","name":"Work","value":40,"color":"#FF0000"}"##)
                .unwrap();
        assert_eq!(activity.value, 40.0);
        assert_eq!(activity.color, "#FF0000");
    }

    #[test]
    fn name_matching_ignores_case_and_padding() {
        let activity = Activity::new("1", "  sleep ", 8.0, "#000000");
        assert!(activity.is_named("Sleep"));
        assert!(!activity.is_named("Sleeping"));
    }
}
