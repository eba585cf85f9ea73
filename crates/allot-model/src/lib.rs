//! Allot Model
//!
//! The shapes every other allot crate agrees on.
//!
//! # Core Concepts
//!
//! - [`Activity`]: one named slice of a weekly allocation
//! - [`AllocationMode`]: how activity values are read (`hours` or `percentage`)
//! - [`ChartData`]: an activity list plus its mode, the unit that gets shared
//! - [`ShareReference`] / [`OwnerId`]: keys and identities at the store boundary
//! - [`ChartValidator`]: the write-path rules a chart must pass before it is persisted
//!
//! # Example
//!
//! ```rust
//! use allot_model::{Activity, AllocationMode, ChartData, ChartValidator};
//!
//! let chart = ChartData::new(
//!     vec![Activity::new("1", "Sleep", 56.0, "#3498db")],
//!     AllocationMode::Hours,
//! );
//! assert!(ChartValidator::new().validate(&chart).is_ok());
//! ```

#![warn(unreachable_pub)]

mod activity;
mod chart;
mod ids;
pub mod validation;

pub use activity::Activity;
pub use chart::{AllocationMode, ChartData, HOURS_PER_WEEK};
pub use ids::{OwnerId, ParseReferenceError, ShareReference};
pub use validation::{ChartValidator, ValidationError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
