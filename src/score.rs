use serde::{Deserialize, Serialize};

use crate::enumerate::Configuration;
use crate::error::ConfigurationError;
use crate::layout::DormLayout;
use crate::preferences::{PreferenceRecord, PreferenceTable};

/// Constants of the happiness function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringParams {
    /// Added to `num_dorms - rank` so even the last choice is worth something.
    pub rank_offset: f64,
    /// Per unit of roommate weight for a student living alone.
    pub single_bonus: f64,
    /// Per unit of roommate weight for each student in a double.
    pub double_bonus: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        ScoringParams {
            rank_offset: 2.0,
            single_bonus: 10.0,
            double_bonus: 5.0,
        }
    }
}

/// The two parts of a configuration's cost.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Breakdown {
    pub dorm: f64,
    pub roommate: f64,
}

impl Breakdown {
    pub fn total(&self) -> f64 {
        self.dorm + self.roommate
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredConfiguration {
    pub configuration: Configuration,
    pub cost: f64,
}

/// Turns a configuration into a cost to minimise. More negative is happier.
#[derive(Debug, Clone, Copy)]
pub struct HappinessScorer<'a> {
    params: ScoringParams,
    layout: &'a DormLayout,
    preferences: &'a PreferenceTable,
}

impl<'a> HappinessScorer<'a> {
    pub fn new(
        params: ScoringParams,
        layout: &'a DormLayout,
        preferences: &'a PreferenceTable,
    ) -> Self {
        HappinessScorer {
            params,
            layout,
            preferences,
        }
    }

    pub fn score(&self, configuration: &Configuration) -> Result<f64, ConfigurationError> {
        Ok(self.breakdown(configuration)?.total())
    }

    pub fn breakdown(
        &self,
        configuration: &Configuration,
    ) -> Result<Breakdown, ConfigurationError> {
        let dorm = self.layout.dorm_index_of(configuration.room)?;
        let occupancy = configuration.occupancy();

        configuration
            .students
            .iter()
            .try_fold(Breakdown::default(), |sum, &student| {
                let record = self.preferences.record(student)?;
                Ok(Breakdown {
                    dorm: sum.dorm + self.dorm_fit(record, dorm),
                    roommate: sum.roommate + self.roommate_privacy(record, occupancy),
                })
            })
    }

    pub fn score_all(
        &self,
        configurations: impl IntoIterator<Item = Configuration>,
    ) -> Result<Vec<ScoredConfiguration>, ConfigurationError> {
        configurations
            .into_iter()
            .map(|configuration| {
                let cost = self.score(&configuration)?;
                Ok(ScoredConfiguration {
                    configuration,
                    cost,
                })
            })
            .collect()
    }

    fn dorm_fit(&self, record: &PreferenceRecord, dorm: usize) -> f64 {
        let num_dorms = self.layout.num_dorms() as f64;
        let rank = f64::from(record.rank(dorm));
        -(num_dorms - rank + self.params.rank_offset) * record.weights.dorm
    }

    // Only the head count matters, not who the roommates are.
    fn roommate_privacy(&self, record: &PreferenceRecord, occupancy: usize) -> f64 {
        let bonus = match occupancy {
            1 => self.params.single_bonus,
            2 => self.params.double_bonus,
            _ => return 0.0,
        };
        -bonus * record.weights.roommate
    }
}
