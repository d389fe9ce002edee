use crate::error::ConfigurationError;
use crate::layout::DormLayout;
use crate::preferences::PreferenceTable;
use crate::types::{RoomId, StudentId};

/// Top half of a nine-dorm ranking.
pub const DEFAULT_THRESHOLD: u32 = 5;

/// Keeps students out of rooms in dorms they ranked worse than `threshold`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EligibilityFilter {
    threshold: Option<u32>,
}

impl EligibilityFilter {
    pub fn new(threshold: Option<u32>) -> Self {
        EligibilityFilter { threshold }
    }

    pub fn disabled() -> Self {
        EligibilityFilter { threshold: None }
    }

    pub fn threshold(&self) -> Option<u32> {
        self.threshold
    }

    pub fn admits(&self, rank: u32) -> bool {
        self.threshold.is_none_or(|threshold| rank <= threshold)
    }

    /// Students willing to live in `room`, in ascending id order.
    pub fn eligible_students(
        &self,
        room: RoomId,
        layout: &DormLayout,
        preferences: &PreferenceTable,
    ) -> Result<Vec<StudentId>, ConfigurationError> {
        let dorm = layout.dorm_index_of(room)?;
        preferences
            .students()
            .filter_map(|student| match preferences.rank(student, dorm) {
                Ok(rank) => self.admits(rank).then_some(Ok(student)),
                Err(error) => Some(Err(error)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoomSpec, StudentSpec, Weights};
    use std::collections::BTreeMap;

    fn fixture() -> (DormLayout, PreferenceTable) {
        let dorms: Vec<String> = ["North", "South", "East"].map(String::from).to_vec();
        let rooms = BTreeMap::from([
            (
                1,
                RoomSpec {
                    dorm: "North".into(),
                    capacity: 2,
                },
            ),
            (
                2,
                RoomSpec {
                    dorm: "East".into(),
                    capacity: 1,
                },
            ),
        ]);
        let layout = DormLayout::new(&dorms, &rooms).unwrap();

        let rankings = [[1, 2, 3], [3, 1, 2], [2, 3, 1]];
        let students = rankings
            .iter()
            .enumerate()
            .map(|(index, ranks)| {
                let spec = StudentSpec {
                    rankings: dorms.iter().cloned().zip(ranks.iter().copied()).collect(),
                    weights: Weights { dorm: 5.0, roommate: 5.0 },
                };
                (index as StudentId + 1, spec)
            })
            .collect();
        let preferences = PreferenceTable::new(&students, &layout).unwrap();
        (layout, preferences)
    }

    #[test]
    fn disabled_filter_admits_everyone() {
        let (layout, preferences) = fixture();
        let filter = EligibilityFilter::disabled();

        assert_eq!(
            filter.eligible_students(1, &layout, &preferences).unwrap(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let (layout, preferences) = fixture();
        let filter = EligibilityFilter::new(Some(2));

        // North: ranks 1, 3, 2
        assert_eq!(
            filter.eligible_students(1, &layout, &preferences).unwrap(),
            vec![1, 3]
        );
        // East: ranks 3, 2, 1
        assert_eq!(
            filter.eligible_students(2, &layout, &preferences).unwrap(),
            vec![2, 3]
        );
    }

    #[test]
    fn strict_threshold_keeps_only_top_choices() {
        let (layout, preferences) = fixture();
        let filter = EligibilityFilter::new(Some(1));

        assert_eq!(filter.eligible_students(1, &layout, &preferences).unwrap(), vec![1]);
        assert_eq!(filter.eligible_students(2, &layout, &preferences).unwrap(), vec![3]);
    }

    #[test]
    fn unknown_room_is_reported() {
        let (layout, preferences) = fixture();

        assert_eq!(
            EligibilityFilter::default().eligible_students(9, &layout, &preferences),
            Err(ConfigurationError::UnknownRoom { room: 9 })
        );
    }

    #[test]
    fn default_threshold_admits_top_half() {
        let filter = EligibilityFilter::new(Some(DEFAULT_THRESHOLD));

        assert!(filter.admits(5));
        assert!(!filter.admits(6));
    }
}
