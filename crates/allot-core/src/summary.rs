//! Chart summary consumed by the page renderer and the preview image

use allot_model::{Activity, AllocationMode};
use allot_resolver::ResolvedChart;
use serde::Serialize;

/// Smallest share, in percent, that gets an on-slice label
pub const LABEL_THRESHOLD_PERCENT: f64 = 5.0;

/// One non-empty slice of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub name: String,
    pub color: String,
    pub value: f64,
    /// Share of the chart total, 0 to 100
    pub percent: f64,
    /// Whether the slice is big enough to carry a label
    pub labelled: bool,
}

/// Totals and slices of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSummary {
    pub mode: AllocationMode,
    pub total: f64,
    pub slices: Vec<Slice>,
}

impl ChartSummary {
    /// Summarize a resolved chart
    #[must_use]
    pub fn from_chart(chart: &ResolvedChart) -> Self {
        Self::from_activities(&chart.activities, chart.mode)
    }

    /// Summarize activities in the given mode
    ///
    /// Activities with a zero value produce no slice; a chart whose total is
    /// zero produces none at all.
    #[must_use]
    pub fn from_activities(activities: &[Activity], mode: AllocationMode) -> Self {
        let total: f64 = activities.iter().map(|a| a.value).sum();
        let slices = if total > 0.0 {
            activities
                .iter()
                .filter(|a| a.is_positive())
                .map(|a| {
                    let percent = a.value / total * 100.0;
                    Slice {
                        name: a.name.clone(),
                        color: a.color.clone(),
                        value: a.value,
                        percent,
                        labelled: percent >= LABEL_THRESHOLD_PERCENT,
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            mode,
            total,
            slices,
        }
    }

    /// Check if there is anything to draw
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn activity(name: &str, value: f64) -> Activity {
        Activity::new(name, name, value, "#123456")
    }

    #[test]
    fn percentages_of_total() {
        let summary = ChartSummary::from_activities(
            &[activity("a", 30.0), activity("b", 10.0), activity("c", 0.0)],
            AllocationMode::Hours,
        );

        assert!((summary.total - 40.0).abs() < f64::EPSILON);
        assert_eq!(summary.slices.len(), 2);
        assert!((summary.slices[0].percent - 75.0).abs() < 1e-9);
        assert!((summary.slices[1].percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn small_slices_are_not_labelled() {
        let summary = ChartSummary::from_activities(
            &[activity("big", 96.0), activity("edge", 5.0), activity("tiny", 1.0)],
            AllocationMode::Percentage,
        );
        let labelled: Vec<_> = summary.slices.iter().map(|s| s.labelled).collect();
        // 96/102 labelled, 5/102 < 5%, 1/102 < 5%
        assert_eq!(labelled, vec![true, false, false]);

        let summary = ChartSummary::from_activities(
            &[activity("a", 95.0), activity("b", 5.0)],
            AllocationMode::Percentage,
        );
        assert!(summary.slices[1].labelled);
    }

    #[test]
    fn all_zero_chart_has_no_slices() {
        let summary = ChartSummary::from_activities(
            &[activity("a", 0.0), activity("b", 0.0)],
            AllocationMode::Hours,
        );
        assert!(summary.is_empty());
    }

    proptest! {
        #[test]
        fn prop_percentages_sum_to_hundred(values in proptest::collection::vec(0.0f64..200.0, 1..12)) {
            let activities: Vec<Activity> = values.iter().map(|&v| activity("x", v)).collect();
            let summary = ChartSummary::from_activities(&activities, AllocationMode::Hours);

            if summary.total > 0.0 {
                let sum: f64 = summary.slices.iter().map(|s| s.percent).sum();
                prop_assert!((sum - 100.0).abs() < 1e-6);
            } else {
                prop_assert!(summary.is_empty());
            }
            prop_assert!(summary.slices.iter().all(|s| s.value > 0.0));
        }
    }
}
