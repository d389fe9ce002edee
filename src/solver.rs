use good_lp::Solution as LpSolution;
use good_lp::solvers::coin_cbc::{CoinCbcProblem, coin_cbc};
use good_lp::{
    Expression, ProblemVariables, ResolutionError, SolutionStatus, SolverModel, Variable,
    WithTimeLimit, variable, variables,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use crate::Solution;
use crate::enumerate::Configuration;
use crate::error::{Error, Infeasibility, Result};
use crate::layout::DormLayout;
use crate::preferences::PreferenceTable;
use crate::score::ScoredConfiguration;
use crate::types::{RoomId, Settings, StudentId};

type IndexMap<K> = BTreeMap<K, Vec<usize>>;

/// Picks one configuration per room so that every student is placed exactly
/// once, minimising the summed cost.
pub fn solve(
    configurations: &[ScoredConfiguration],
    layout: &DormLayout,
    preferences: &PreferenceTable,
    settings: &Settings,
) -> Result<Solution> {
    check_capacity(layout, preferences)?;

    if preferences.is_empty() {
        info!("no students to place, every room stays vacant");
        return Ok(vacant_solution(layout));
    }

    // LUTs of type student → configurations and room → configurations
    let (by_student, by_room) = index_configurations(configurations);
    check_every_student_has_a_room(preferences, &by_student)?;

    let (variables, selected) = init_variables(configurations);
    let objective = create_objective_function(configurations, &selected);
    let model = create_model(variables, objective, settings);

    let model = constrain_students_placed_once(model, &by_student, &selected);
    let model = constrain_rooms_used_once(model, &by_room, &selected);

    info!(
        variables = selected.len(),
        students = by_student.len(),
        rooms = by_room.len(),
        "solving room draw"
    );
    let solution = model.solve().map_err(resolution_error)?;
    check_status(solution.status())?;

    let chosen = selected_configurations(&solution, configurations, &selected);
    let solution = create_room_assignments(&chosen, layout)?;
    verify_assignment(&chosen, layout, preferences)?;
    info!(cost = solution.cost, "room draw solved");
    Ok(solution)
}

fn resolution_error(error: ResolutionError) -> Error {
    warn!(%error, "solver did not return an assignment");
    match error {
        ResolutionError::Infeasible => Infeasibility::NoFeasibleAssignment.into(),
        other => Error::Solver(other.to_string()),
    }
}

/// Only a finished search counts; a time-limited incumbent is not returned.
fn check_status(status: SolutionStatus) -> Result<()> {
    match status {
        SolutionStatus::TimeLimit => {
            warn!("solver hit its time limit before proving optimality");
            Err(Error::Solver("time limit reached".to_string()))
        }
        _ => Ok(()),
    }
}

fn check_capacity(layout: &DormLayout, preferences: &PreferenceTable) -> Result<()> {
    let capacity = layout.total_capacity();
    let students = preferences.len();
    if (students as u64) > capacity {
        return Err(Infeasibility::InsufficientCapacity { students, capacity }.into());
    }
    Ok(())
}

fn check_every_student_has_a_room(
    preferences: &PreferenceTable,
    by_student: &IndexMap<StudentId>,
) -> Result<()> {
    match preferences
        .students()
        .find(|student| !by_student.contains_key(student))
    {
        Some(student) => Err(Infeasibility::StrandedStudent { student }.into()),
        None => Ok(()),
    }
}

fn index_configurations(
    configurations: &[ScoredConfiguration],
) -> (IndexMap<StudentId>, IndexMap<RoomId>) {
    let mut by_student: IndexMap<StudentId> = BTreeMap::new();
    let mut by_room: IndexMap<RoomId> = BTreeMap::new();

    for (index, scored) in configurations.iter().enumerate() {
        let configuration = &scored.configuration;
        by_room.entry(configuration.room).or_default().push(index);
        for &student in &configuration.students {
            by_student.entry(student).or_default().push(index);
        }
    }

    (by_student, by_room)
}

/// One binary variable per configuration: 1 when the configuration is used.
fn init_variables(configurations: &[ScoredConfiguration]) -> (ProblemVariables, Vec<Variable>) {
    let mut problem_vars = variables!();
    let selected = configurations
        .iter()
        .map(|_| problem_vars.add(variable().binary()))
        .collect();
    (problem_vars, selected)
}

fn create_objective_function(
    configurations: &[ScoredConfiguration],
    selected: &[Variable],
) -> Expression {
    configurations
        .iter()
        .zip(selected)
        .fold(Expression::from(0.0), |sum, (scored, &var)| {
            sum + var * scored.cost
        })
}

/// Create a minimisation model with the configured time limit
fn create_model(
    variables: ProblemVariables,
    objective: Expression,
    settings: &Settings,
) -> CoinCbcProblem {
    #[allow(unused_mut)]
    let mut model = variables.minimise(objective).using(coin_cbc);
    #[cfg(not(debug_assertions))]
    model.set_parameter("loglevel", "0");
    match settings.time_limit {
        Some(seconds) => model.with_time_limit(seconds),
        None => model,
    }
}

/// Every student must be in exactly one selected configuration
fn constrain_students_placed_once<Model: SolverModel>(
    model: Model,
    by_student: &IndexMap<StudentId>,
    selected: &[Variable],
) -> Model {
    by_student.iter().fold(model, |m, (student, indices)| {
        debug!(student, candidates = indices.len(), "must place student");
        let placements = indices
            .iter()
            .fold(Expression::from(0.0), |sum, &index| sum + selected[index]);
        m.with(placements.eq(1.0))
    })
}

/// Each room can only be used by one configuration
fn constrain_rooms_used_once<Model: SolverModel>(
    model: Model,
    by_room: &IndexMap<RoomId>,
    selected: &[Variable],
) -> Model {
    by_room.iter().fold(model, |m, (_, indices)| {
        let uses = indices
            .iter()
            .fold(Expression::from(0.0), |sum, &index| sum + selected[index]);
        m.with(uses.leq(1.0))
    })
}

fn selected_configurations<'a>(
    solution: &impl LpSolution,
    configurations: &'a [ScoredConfiguration],
    selected: &[Variable],
) -> Vec<&'a ScoredConfiguration> {
    configurations
        .iter()
        .zip(selected)
        .filter_map(|(scored, &var)| (solution.value(var) > 0.5).then_some(scored))
        .collect()
}

fn vacant_solution(layout: &DormLayout) -> Solution {
    Solution {
        assignment: layout
            .rooms()
            .map(|(room, _)| (room, BTreeSet::new()))
            .collect(),
        cost: 0.0,
    }
}

/// Create the room → occupants map, vacant rooms included
fn create_room_assignments(
    chosen: &[&ScoredConfiguration],
    layout: &DormLayout,
) -> Result<Solution> {
    let mut solution = vacant_solution(layout);
    for scored in chosen {
        let Configuration { room, students } = &scored.configuration;
        let occupants = solution
            .assignment
            .get_mut(room)
            .ok_or_else(|| {
                Error::Solver(format!("selected configuration for unknown room {room}"))
            })?;
        occupants.extend(students.iter().copied());
        solution.cost += scored.cost;
    }
    Ok(solution)
}

/// Re-check the solver's answer against the placement and capacity rules.
fn verify_assignment(
    chosen: &[&ScoredConfiguration],
    layout: &DormLayout,
    preferences: &PreferenceTable,
) -> Result<()> {
    let mut rooms_used = BTreeSet::new();
    let mut placements: BTreeMap<StudentId, usize> = BTreeMap::new();

    for scored in chosen {
        let configuration = &scored.configuration;
        if !rooms_used.insert(configuration.room) {
            return Err(Error::Solver(format!(
                "room {} was selected more than once",
                configuration.room
            )));
        }
        let capacity = layout.capacity_of(configuration.room)?;
        if configuration.occupancy() > capacity as usize {
            return Err(Error::Solver(format!(
                "room {} holds {} students but has {capacity} beds",
                configuration.room,
                configuration.occupancy()
            )));
        }
        for &student in &configuration.students {
            *placements.entry(student).or_default() += 1;
        }
    }

    for student in preferences.students() {
        match placements.get(&student).copied().unwrap_or(0) {
            1 => {}
            times => {
                return Err(Error::Solver(format!(
                    "student {student} was placed {times} times"
                )));
            }
        }
    }
    Ok(())
}
