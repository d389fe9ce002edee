use std::collections::{BTreeMap, BTreeSet};

use crate::error::ConfigurationError;
use crate::layout::DormLayout;
use crate::types::{StudentId, StudentSpec, Weights};

/// One student's validated preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceRecord {
    /// `ranks[d]` is the rank of dorm `d` in layout order.
    ranks: Vec<u32>,
    pub weights: Weights,
}

impl PreferenceRecord {
    pub fn rank(&self, dorm: usize) -> u32 {
        self.ranks[dorm]
    }
}

/// Rankings and weights for every student, keyed by student id.
#[derive(Debug, Clone)]
pub struct PreferenceTable {
    records: BTreeMap<StudentId, PreferenceRecord>,
}

impl PreferenceTable {
    /// Validates that every ranking is a permutation of `1..=D` over the
    /// layout's dorms and that every weight is finite and non-negative.
    pub fn new(
        students: &BTreeMap<StudentId, StudentSpec>,
        layout: &DormLayout,
    ) -> Result<Self, ConfigurationError> {
        let records = students
            .iter()
            .map(|(&student, spec)| Ok((student, build_record(student, spec, layout)?)))
            .collect::<Result<_, _>>()?;
        Ok(PreferenceTable { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Student ids in ascending order.
    pub fn students(&self) -> impl Iterator<Item = StudentId> + '_ {
        self.records.keys().copied()
    }

    pub fn record(&self, student: StudentId) -> Result<&PreferenceRecord, ConfigurationError> {
        self.records
            .get(&student)
            .ok_or(ConfigurationError::UnknownStudent { student })
    }

    pub fn rank(&self, student: StudentId, dorm: usize) -> Result<u32, ConfigurationError> {
        Ok(self.record(student)?.rank(dorm))
    }

    pub fn weights(&self, student: StudentId) -> Result<Weights, ConfigurationError> {
        Ok(self.record(student)?.weights)
    }
}

fn build_record(
    student: StudentId,
    spec: &StudentSpec,
    layout: &DormLayout,
) -> Result<PreferenceRecord, ConfigurationError> {
    let dorms = layout.dorms();

    if let Some(dorm) = spec
        .rankings
        .keys()
        .find(|dorm| !dorms.contains(*dorm))
    {
        return Err(ConfigurationError::UnrankedDorm {
            student,
            dorm: dorm.clone(),
        });
    }

    let mut used = BTreeSet::new();
    let ranks = dorms
        .iter()
        .map(|dorm| {
            let &rank = spec
                .rankings
                .get(dorm)
                .ok_or_else(|| ConfigurationError::MissingRanking {
                    student,
                    dorm: dorm.clone(),
                })?;
            let in_range = (1..=dorms.len()).contains(&(rank as usize));
            if !in_range || !used.insert(rank) {
                return Err(ConfigurationError::InvalidRanking {
                    student,
                    dorm: dorm.clone(),
                    rank,
                    num_dorms: dorms.len(),
                });
            }
            Ok(rank)
        })
        .collect::<Result<Vec<_>, _>>()?;

    validate_weight(student, "dorm", spec.weights.dorm)?;
    validate_weight(student, "roommate", spec.weights.roommate)?;

    Ok(PreferenceRecord {
        ranks,
        weights: spec.weights,
    })
}

fn validate_weight(
    student: StudentId,
    kind: &'static str,
    weight: f64,
) -> Result<(), ConfigurationError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidWeight {
            student,
            kind,
            weight,
        })
    }
}
