//! Facts about a weekly allocation
//!
//! Each rule looks at activities measured in hours and contributes at most
//! one fact. Rules run in a fixed order, so output order is stable.

use allot_model::{Activity, AllocationMode, HOURS_PER_WEEK};
use allot_resolver::ResolvedChart;
use serde::Serialize;

/// Weekly sleep below this gets a suggestion (7 h a night)
pub const SLEEP_LOW_HOURS: f64 = 49.0;

/// Weekly sleep above this gets a remark (9 h a night)
pub const SLEEP_HIGH_HOURS: f64 = 63.0;

/// Name fragments counted as productive
pub const PRODUCTIVE_KEYWORDS: [&str; 5] = ["work", "study", "exercise", "learning", "project"];

/// A single fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    /// Stable rule identifier
    pub id: &'static str,
    /// Human readable text
    pub text: String,
}

impl Fact {
    fn new(id: &'static str, text: String) -> Self {
        Self { id, text }
    }
}

/// Facts for a resolved chart, converting percentages to hours first
#[must_use]
pub fn facts_for(chart: &ResolvedChart) -> Vec<Fact> {
    match chart.mode {
        AllocationMode::Hours => generate_facts(&chart.activities),
        AllocationMode::Percentage => {
            let in_hours: Vec<Activity> = chart
                .activities
                .iter()
                .map(|a| Activity {
                    value: chart.mode.to_hours(a.value),
                    ..a.clone()
                })
                .collect();
            generate_facts(&in_hours)
        }
    }
}

/// Facts for activities measured in hours
#[must_use]
pub fn generate_facts(activities: &[Activity]) -> Vec<Fact> {
    let rules: [fn(&[Activity]) -> Option<Fact>; 5] = [
        largest_slice,
        smallest_slice,
        sleep_total,
        work_total,
        productive_total,
    ];

    let mut facts: Vec<Fact> = rules.iter().filter_map(|rule| rule(activities)).collect();
    if facts.is_empty() && !activities.is_empty() {
        facts.push(Fact::new(
            "no-specific-facts",
            "Your time allocation is unique! Add more details for specific insights.".to_owned(),
        ));
    }
    facts
}

fn share_of_week(hours: f64) -> f64 {
    hours / HOURS_PER_WEEK * 100.0
}

fn largest_slice(activities: &[Activity]) -> Option<Fact> {
    // Later entries win ties.
    let largest = activities
        .iter()
        .reduce(|best, a| if best.value > a.value { best } else { a })?;
    if largest.value <= 0.0 {
        return None;
    }
    Some(Fact::new(
        "largest-slice",
        format!(
            "Your largest activity is {} with {:.1} hours ({:.1}%).",
            largest.name,
            largest.value,
            share_of_week(largest.value)
        ),
    ))
}

fn smallest_slice(activities: &[Activity]) -> Option<Fact> {
    let smallest = activities
        .iter()
        .filter(|a| a.is_positive())
        .reduce(|best, a| if best.value < a.value { best } else { a })?;
    Some(Fact::new(
        "smallest-slice",
        format!(
            "Your smallest activity is {} with {:.1} hours ({:.1}%).",
            smallest.name,
            smallest.value,
            share_of_week(smallest.value)
        ),
    ))
}

fn total_named(activities: &[Activity], category: &str) -> Option<f64> {
    let mut matched = activities.iter().filter(|a| a.is_named(category)).peekable();
    matched.peek()?;
    let total: f64 = matched.map(|a| a.value).sum();
    (total > 0.0).then_some(total)
}

fn sleep_total(activities: &[Activity]) -> Option<Fact> {
    let total = total_named(activities, "Sleep")?;
    let mut text = format!("You've allocated {total:.1} hours to Sleep.");
    if total < SLEEP_LOW_HOURS {
        text.push_str(" Consider aiming for 7-9 hours per night for optimal rest.");
    } else if total > SLEEP_HIGH_HOURS {
        text.push_str(" That's a generous amount of rest!");
    }
    Some(Fact::new("sleep-total", text))
}

fn work_total(activities: &[Activity]) -> Option<Fact> {
    let total = total_named(activities, "Work")?;
    Some(Fact::new(
        "work-total",
        format!("You've dedicated {total:.1} hours to Work activities."),
    ))
}

fn productive_total(activities: &[Activity]) -> Option<Fact> {
    let total: f64 = activities
        .iter()
        .filter(|a| {
            let name = a.name.to_lowercase();
            PRODUCTIVE_KEYWORDS.iter().any(|k| name.contains(k))
        })
        .map(|a| a.value)
        .sum();
    if total <= 0.0 {
        return None;
    }
    Some(Fact::new(
        "productive-total",
        format!("You have {total:.1} hours of activities that could be considered productive."),
    ))
}
