use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::eligibility::DEFAULT_THRESHOLD;
use crate::score::ScoringParams;

pub type StudentId = u32;
pub type RoomId = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSpec {
    pub dorm: String,
    pub capacity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSpec {
    /// Dorm name to rank, 1 is the top choice.
    pub rankings: BTreeMap<String, u32>,
    pub weights: Weights,
}

/// How much a student cares about the dorm versus having fewer roommates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub dorm: f64,
    pub roommate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Highest rank a student will still accept. An absent key keeps
    /// [`DEFAULT_THRESHOLD`], an explicit `null` admits everyone everywhere.
    pub threshold: Option<u32>,
    /// Seconds the solver may spend before giving up.
    pub time_limit: Option<f64>,
    pub scoring: ScoringParams,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            threshold: Some(DEFAULT_THRESHOLD),
            time_limit: None,
            scoring: ScoringParams::default(),
        }
    }
}
