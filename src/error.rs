use thiserror::Error;

use crate::types::{RoomId, StudentId};

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a room draw from producing an assignment.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid problem: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("no assignment satisfies every constraint: {0}")]
    Infeasible(#[from] Infeasibility),

    #[error("solver failed: {0}")]
    Solver(String),
}

/// Malformed input data, caught while the tables are built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("room {room} belongs to unknown dorm '{dorm}'")]
    UnknownDorm { room: RoomId, dorm: String },

    #[error("dorm '{dorm}' is listed more than once")]
    DuplicateDorm { dorm: String },

    #[error("room {room} has zero capacity")]
    ZeroCapacity { room: RoomId },

    #[error("room {room} is not part of the layout")]
    UnknownRoom { room: RoomId },

    #[error("student {student} has no preferences")]
    UnknownStudent { student: StudentId },

    #[error("student {student} does not rank dorm '{dorm}'")]
    MissingRanking { student: StudentId, dorm: String },

    #[error("student {student} ranks unknown dorm '{dorm}'")]
    UnrankedDorm { student: StudentId, dorm: String },

    #[error(
        "student {student} gives dorm '{dorm}' rank {rank}, \
         expected a permutation of 1..={num_dorms}"
    )]
    InvalidRanking {
        student: StudentId,
        dorm: String,
        rank: u32,
        num_dorms: usize,
    },

    #[error("student {student} has invalid {kind} weight {weight}")]
    InvalidWeight {
        student: StudentId,
        kind: &'static str,
        weight: f64,
    },
}

/// Why the constraint system has no solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Infeasibility {
    #[error("{students} students but only {capacity} beds")]
    InsufficientCapacity { students: usize, capacity: u64 },

    #[error("student {student} is not eligible for any room")]
    StrandedStudent { student: StudentId },

    #[error("the solver proved the placement constraints unsatisfiable")]
    NoFeasibleAssignment,
}
