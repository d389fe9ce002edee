use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

pub mod eligibility;
pub mod enumerate;
pub mod error;
pub mod generate;
pub mod layout;
pub mod preferences;
pub mod score;
pub mod solver;
pub mod types;

pub use eligibility::{DEFAULT_THRESHOLD, EligibilityFilter};
pub use enumerate::{Configuration, RoomConfigurations, enumerate_configurations};
pub use error::{ConfigurationError, Error, Infeasibility, Result};
pub use generate::RandomDraw;
pub use layout::DormLayout;
pub use preferences::PreferenceTable;
pub use score::{HappinessScorer, ScoredConfiguration, ScoringParams};
pub use types::{RoomId, RoomSpec, Settings, StudentId, StudentSpec, Weights};

#[derive(Debug, Serialize, Deserialize)]
pub struct Problem {
    /// Dorm names; a student's ranking must cover each exactly once.
    pub dorms: Vec<String>,
    pub rooms: BTreeMap<RoomId, RoomSpec>,
    pub students: BTreeMap<StudentId, StudentSpec>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Solution {
    /// Occupants of every room; vacant rooms map to an empty set.
    pub assignment: BTreeMap<RoomId, BTreeSet<StudentId>>,
    /// Summed cost of the chosen configurations, more negative is happier.
    pub cost: f64,
}

impl Problem {
    pub fn solve(&self) -> Result<Solution> {
        let settings = &self.settings;

        // Validated lookups shared by every later stage
        let layout = DormLayout::new(&self.dorms, &self.rooms)?;
        let preferences = PreferenceTable::new(&self.students, &layout)?;

        let filter = EligibilityFilter::new(settings.threshold);
        let configurations = enumerate_configurations(&layout, &preferences, &filter)?;
        info!(
            configurations = configurations.len(),
            threshold = ?filter.threshold(),
            "enumerated room configurations"
        );

        let scorer = HappinessScorer::new(settings.scoring, &layout, &preferences);
        let scored = scorer.score_all(configurations)?;

        solver::solve(&scored, &layout, &preferences, settings)
    }
}
