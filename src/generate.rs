use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use crate::Problem;
use crate::eligibility::DEFAULT_THRESHOLD;
use crate::score::ScoringParams;
use crate::types::{RoomId, RoomSpec, Settings, StudentId, StudentSpec, Weights};

const SPRING_2021_DORMS: [(&str, u32); 9] = [
    ("DW", 8),
    ("Sontag", 9),
    ("Linde", 10),
    ("Case", 8),
    ("Atwood", 7),
    ("North", 8),
    ("West", 6),
    ("East", 7),
    ("South", 7),
];

/// Shape of a synthetic room draw. Rankings are uniform permutations and each
/// student splits `weight_total` between dorm and roommate weight.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomDraw {
    pub students: u32,
    /// Dorm name and how many rooms it owns, in listing order.
    pub dorms: Vec<(String, u32)>,
    pub capacity: u32,
    pub weight_total: u32,
    pub threshold: Option<u32>,
}

impl RandomDraw {
    /// 100 students in 70 triples across nine dorms, top-half filtering.
    pub fn spring_2021() -> Self {
        RandomDraw {
            students: 100,
            dorms: SPRING_2021_DORMS
                .iter()
                .map(|&(name, rooms)| (name.to_string(), rooms))
                .collect(),
            capacity: 3,
            weight_total: 10,
            threshold: Some(DEFAULT_THRESHOLD),
        }
    }

    /// Same seed, same problem.
    pub fn generate(&self, seed: u64) -> Problem {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let dorms: Vec<String> = self.dorms.iter().map(|(name, _)| name.clone()).collect();

        // Rooms are numbered from 1 in dorm order
        let rooms: BTreeMap<RoomId, RoomSpec> = self
            .dorms
            .iter()
            .flat_map(|(name, count)| (0..*count).map(move |_| name))
            .zip(1..)
            .map(|(name, id)| {
                let spec = RoomSpec {
                    dorm: name.clone(),
                    capacity: self.capacity,
                };
                (id, spec)
            })
            .collect();

        let students: BTreeMap<StudentId, StudentSpec> = (1..=self.students)
            .map(|id| {
                let mut ranks: Vec<u32> = (1..=dorms.len() as u32).collect();
                ranks.shuffle(&mut rng);
                let dorm_weight = rng.random_range(0..=self.weight_total);
                let spec = StudentSpec {
                    rankings: dorms.iter().cloned().zip(ranks).collect(),
                    weights: Weights {
                        dorm: f64::from(dorm_weight),
                        roommate: f64::from(self.weight_total - dorm_weight),
                    },
                };
                (id, spec)
            })
            .collect();

        Problem {
            dorms,
            rooms,
            students,
            settings: Settings {
                threshold: self.threshold,
                time_limit: None,
                scoring: ScoringParams::default(),
            },
        }
    }
}
