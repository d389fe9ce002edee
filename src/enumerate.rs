use itertools::Itertools;
use tracing::debug;

use crate::eligibility::EligibilityFilter;
use crate::error::ConfigurationError;
use crate::layout::DormLayout;
use crate::preferences::PreferenceTable;
use crate::types::{RoomId, StudentId};

/// A candidate way of filling one room. `students` is sorted and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Configuration {
    pub room: RoomId,
    pub students: Vec<StudentId>,
}

impl Configuration {
    pub fn is_vacant(&self) -> bool {
        self.students.is_empty()
    }

    pub fn occupancy(&self) -> usize {
        self.students.len()
    }

    pub fn contains(&self, student: StudentId) -> bool {
        self.students.binary_search(&student).is_ok()
    }
}

/// Every subset of a room's eligible students that fits in the room.
#[derive(Debug, Clone)]
pub struct RoomConfigurations {
    room: RoomId,
    eligible: Vec<StudentId>,
    capacity: u32,
}

impl RoomConfigurations {
    pub fn new(room: RoomId, mut eligible: Vec<StudentId>, capacity: u32) -> Self {
        eligible.sort_unstable();
        eligible.dedup();
        RoomConfigurations {
            room,
            eligible,
            capacity,
        }
    }

    /// Subsets by increasing size, lexicographic within a size. The vacant
    /// configuration comes first.
    pub fn iter(&self) -> impl Iterator<Item = Configuration> + '_ {
        let largest = (self.capacity as usize).min(self.eligible.len());
        (0..=largest).flat_map(move |size| {
            self.eligible
                .iter()
                .copied()
                .combinations(size)
                .map(move |students| Configuration {
                    room: self.room,
                    students,
                })
        })
    }

    /// Number of configurations [`Self::iter`] yields, `Σ C(k, s)` for `s` up to capacity.
    pub fn count(&self) -> u128 {
        let k = self.eligible.len() as u128;
        let largest = (self.capacity as u128).min(k);
        let mut binomial = 1u128;
        let mut total = 1u128;
        for s in 1..=largest {
            binomial = binomial * (k - s + 1) / s;
            total += binomial;
        }
        total
    }
}

/// Configurations for every room in ascending room order.
pub fn enumerate_configurations(
    layout: &DormLayout,
    preferences: &PreferenceTable,
    filter: &EligibilityFilter,
) -> Result<Vec<Configuration>, ConfigurationError> {
    let mut configurations = Vec::new();
    for (room, details) in layout.rooms() {
        let eligible = filter.eligible_students(room, layout, preferences)?;
        let candidates = RoomConfigurations::new(room, eligible, details.capacity);
        debug!(
            room,
            eligible = candidates.eligible.len(),
            capacity = details.capacity,
            configurations = %candidates.count(),
            "enumerating room"
        );
        configurations.extend(candidates.iter());
    }
    Ok(configurations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn students_of(configurations: &[Configuration]) -> Vec<Vec<StudentId>> {
        configurations.iter().map(|c| c.students.clone()).collect()
    }

    #[test]
    fn includes_vacant_room_and_orders_deterministically() {
        let room = RoomConfigurations::new(4, vec![3, 1, 2], 2);
        let configurations: Vec<_> = room.iter().collect();

        assert_eq!(
            students_of(&configurations),
            vec![
                vec![],
                vec![1],
                vec![2],
                vec![3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
        assert!(configurations.iter().all(|c| c.room == 4));
        assert_eq!(room.count(), 7);
    }

    #[test]
    fn is_restartable() {
        let room = RoomConfigurations::new(1, vec![1, 2, 3, 4], 3);

        assert_eq!(room.iter().collect::<Vec<_>>(), room.iter().collect::<Vec<_>>());
    }

    #[test]
    fn capacity_larger_than_eligible_set() {
        let room = RoomConfigurations::new(1, vec![7, 8], 4);

        assert_eq!(
            students_of(&room.iter().collect::<Vec<_>>()),
            vec![vec![], vec![7], vec![8], vec![7, 8]]
        );
        assert_eq!(room.count(), 4);
    }

    #[test]
    fn nobody_eligible_leaves_only_vacancy() {
        let room = RoomConfigurations::new(1, vec![], 3);

        assert_eq!(students_of(&room.iter().collect::<Vec<_>>()), vec![Vec::<StudentId>::new()]);
        assert_eq!(room.count(), 1);
    }

    #[test]
    fn contains_uses_sorted_students() {
        let configuration = Configuration {
            room: 1,
            students: vec![2, 5, 9],
        };

        assert!(configuration.contains(5));
        assert!(!configuration.contains(4));
        assert_eq!(configuration.occupancy(), 3);
        assert!(!configuration.is_vacant());
    }

    proptest! {
        #[test]
        fn yields_every_subset_exactly_once(
            eligible in prop::collection::btree_set(1u32..40, 0..9),
            capacity in 1u32..5,
        ) {
            let room = RoomConfigurations::new(1, eligible.iter().copied().collect(), capacity);
            let configurations: Vec<_> = room.iter().collect();
            let distinct: BTreeSet<_> = configurations.iter().map(|c| c.students.clone()).collect();

            prop_assert_eq!(configurations.len() as u128, room.count());
            prop_assert_eq!(distinct.len(), configurations.len());
            for configuration in &configurations {
                prop_assert!(configuration.occupancy() <= capacity as usize);
                prop_assert!(configuration.students.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(configuration.students.iter().all(|s| eligible.contains(s)));
            }
        }
    }
}
