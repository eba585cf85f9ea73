//! Structured (pre-compression) form of a share token.

use crate::error::DecodeStage;
use allot_model::{Activity, AllocationMode, ChartData};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// Revision of the structured form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRevision {
    /// Bare activity array; mode is implied `hours`
    V1,
    /// Object with `activities` and `mode`
    V2,
}

impl WireRevision {
    /// Revision emitted for a given optional mode
    #[inline]
    #[must_use]
    pub const fn for_mode(mode: Option<AllocationMode>) -> Self {
        match mode {
            Some(_) => Self::V2,
            None => Self::V1,
        }
    }
}

impl Display for WireRevision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::V2 => f.write_str("v2"),
        }
    }
}

#[derive(Serialize)]
struct WireChartRef<'a> {
    activities: &'a [Activity],
    mode: AllocationMode,
}

#[derive(Deserialize)]
struct WireChart {
    activities: Vec<Activity>,
    #[serde(default)]
    mode: Option<AllocationMode>,
}

/// Serialize activities to the structured form of the matching revision
pub(crate) fn to_json(
    activities: &[Activity],
    mode: Option<AllocationMode>,
) -> serde_json::Result<Vec<u8>> {
    match mode {
        Some(mode) => serde_json::to_vec(&WireChartRef { activities, mode }),
        None => serde_json::to_vec(activities),
    }
}

/// Interpret a parsed structured form
///
/// Missing mode defaults to `hours`, for both V1 arrays and V2 objects
/// written without one.
pub(crate) fn from_value(value: Value) -> Result<(ChartData, WireRevision), DecodeStage> {
    let revision = match &value {
        Value::Array(_) => WireRevision::V1,
        Value::Object(map) if map.get("activities").is_some_and(Value::is_array) => {
            WireRevision::V2
        }
        _ => return Err(DecodeStage::Shape),
    };

    let chart = match revision {
        WireRevision::V1 => {
            let activities: Vec<Activity> =
                serde_json::from_value(value).map_err(|_| DecodeStage::Element)?;
            ChartData::new(activities, AllocationMode::default())
        }
        WireRevision::V2 => {
            let chart: WireChart =
                serde_json::from_value(value).map_err(|_| DecodeStage::Element)?;
            ChartData::new(chart.activities, chart.mode.unwrap_or_default())
        }
    };
    Ok((chart, revision))
}
