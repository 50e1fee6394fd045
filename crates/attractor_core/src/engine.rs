//! Fixed-step trajectory integration.
//!
//! The loop here is the hot path of the whole library: one solver call per
//! step, no logging, no allocation after the output buffers are created.
//! Divergence (NaN/Inf) is not detected during the loop; inspect the result
//! with [`Trajectory::is_finite`].

use nalgebra::{DVector, Dyn, OMatrix, U3};
use rayon::prelude::*;

use crate::error::{AttractorError, Result};
use crate::solvers::Solver;
use crate::system::System;
use crate::traits::{Derivative, State, StepRule};

/// States stacked row-wise: shape `(steps, 3)`.
pub type StateMatrix = OMatrix<f64, Dyn, U3>;

/// Output of an integration run.
///
/// Row `i` of `states` is the state *after* step `i`; the initial coordinate
/// is not included. `time[i] == i * dt` labels the *start* of that step.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    states: StateMatrix,
    time: DVector<f64>,
}

impl Trajectory {
    pub fn states(&self) -> &StateMatrix {
        &self.states
    }

    pub fn time(&self) -> &DVector<f64> {
        &self.time
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// State after step `i`.
    pub fn state(&self, i: usize) -> State {
        self.states.row(i).transpose()
    }

    pub fn last(&self) -> Option<State> {
        self.len().checked_sub(1).map(|i| self.state(i))
    }

    /// False if any component diverged to NaN or ±Inf.
    pub fn is_finite(&self) -> bool {
        self.states.iter().all(|v| v.is_finite())
    }

    /// States flattened as `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn to_row_major(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for row in self.states.row_iter() {
            out.extend(row.iter());
        }
        out
    }

    pub fn into_parts(self) -> (StateMatrix, DVector<f64>) {
        (self.states, self.time)
    }
}

/// Integrates `system` with `solver` from the system's current initial
/// coordinate and parameters.
///
/// The system is only read; repeated calls on the same system return
/// bit-identical trajectories.
pub fn integrate(system: &System, solver: &Solver, steps: usize, dt: f64) -> Result<Trajectory> {
    integrate_with(
        system.func(),
        solver.rule(),
        *system.init_coord(),
        system.params(),
        steps,
        dt,
    )
}

/// Same loop as [`integrate`] for callers holding raw functions.
pub fn integrate_with(
    system: &dyn Derivative,
    rule: &dyn StepRule,
    init_coord: State,
    params: &[f64],
    steps: usize,
    dt: f64,
) -> Result<Trajectory> {
    check_arguments(steps, dt)?;
    Ok(run(system, rule, init_coord, params, steps, dt))
}

/// Integrates one trajectory per initial coordinate, in parallel.
///
/// Members come back in the order of `init_coords`, and each equals what
/// [`integrate`] yields for that starting point. The system's own
/// `init_coord` is ignored.
pub fn integrate_ensemble(
    system: &System,
    solver: &Solver,
    init_coords: &[State],
    steps: usize,
    dt: f64,
) -> Result<Vec<Trajectory>> {
    check_arguments(steps, dt)?;
    tracing::info!(
        system = system.name(),
        solver = solver.name(),
        members = init_coords.len(),
        steps,
        dt,
        "integrating ensemble"
    );

    let func = system.func();
    let rule = solver.rule();
    let params = system.params();
    Ok(init_coords
        .par_iter()
        .map(|&init| run(func, rule, init, params, steps, dt))
        .collect())
}

/// `count` starting points offset from `center` by `k * spacing` on every
/// axis, `k = 0..count`.
pub fn spread_initial_coords(center: &State, count: usize, spacing: f64) -> Vec<State> {
    (0..count)
        .map(|k| center.add_scalar(k as f64 * spacing))
        .collect()
}

fn check_arguments(steps: usize, dt: f64) -> Result<()> {
    if steps == 0 {
        return Err(AttractorError::InvalidArgument(
            "Number of steps must be positive".into(),
        ));
    }
    check_step_size(dt)
}

/// Rejects zero, negative and non-finite step sizes.
pub fn check_step_size(dt: f64) -> Result<()> {
    if !(dt > 0.0 && dt.is_finite()) {
        return Err(AttractorError::InvalidArgument(format!(
            "Time step must be positive and finite, got {dt}"
        )));
    }
    Ok(())
}

fn run(
    system: &dyn Derivative,
    rule: &dyn StepRule,
    init_coord: State,
    params: &[f64],
    steps: usize,
    dt: f64,
) -> Trajectory {
    let mut states = StateMatrix::zeros(steps);
    let mut time = DVector::zeros(steps);
    let mut current = init_coord;

    for i in 0..steps {
        current = rule.step(system, &current, params, dt);
        states.set_row(i, &current.transpose());
        time[i] = i as f64 * dt;
    }

    Trajectory { states, time }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::{self, SolverRegistry};
    use crate::systems::{self, lorenz};
    use crate::system::SystemRegistry;

    fn solvers() -> SolverRegistry {
        let mut registry = SolverRegistry::new();
        solvers::register_builtin(&mut registry).unwrap();
        registry
    }

    fn lorenz_system() -> System {
        System::new(
            "test_lorenz",
            lorenz,
            &[10.0, 28.0, 8.0 / 3.0],
            &["sigma", "rho", "beta"],
            [0.0, 1.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn shapes_and_time_axis() {
        let solvers = solvers();
        let dt = 0.01;
        let trajectory = integrate(&lorenz_system(), solvers.get("euler").unwrap(), 250, dt).unwrap();
        assert_eq!(trajectory.states().shape(), (250, 3));
        assert_eq!(trajectory.time().len(), 250);
        assert_eq!(trajectory.time()[0], 0.0);
        for (i, &t) in trajectory.time().iter().enumerate() {
            assert_eq!(t, i as f64 * dt);
        }
    }

    #[test]
    fn first_row_is_state_after_one_step() {
        let system = lorenz_system();
        let solver = solvers().get("rk4").unwrap().clone();
        let trajectory = integrate(&system, &solver, 3, 0.01).unwrap();
        let one_step = solver.step(system.func(), system.init_coord(), system.params(), 0.01);
        assert_eq!(trajectory.state(0), one_step);
        assert_ne!(trajectory.state(0), *system.init_coord());
        let two_steps = solver.step(system.func(), &one_step, system.params(), 0.01);
        assert_eq!(trajectory.state(1), two_steps);
    }

    #[test]
    fn lorenz_rk4_stays_on_attractor() {
        let trajectory = integrate(&lorenz_system(), solvers().get("rk4").unwrap(), 1000, 0.01).unwrap();
        assert!(trajectory.is_finite());
        for i in 0..trajectory.len() {
            let s = trajectory.state(i);
            assert!(s.x.abs() < 50.0 && s.y.abs() < 50.0, "step {i}: {s:?}");
            assert!(s.z > 0.0, "step {i}: {s:?}");
        }
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let system = lorenz_system();
        let solvers = solvers();
        for solver in solvers.iter() {
            let a = integrate(&system, solver, 500, 0.01).unwrap();
            let b = integrate(&system, solver, 500, 0.01).unwrap();
            assert_eq!(a, b, "{}", solver.name());
        }
        assert_eq!(system.init_coord(), &State::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn rejects_bad_arguments_before_running() {
        let system = lorenz_system();
        let solvers = solvers();
        let euler = solvers.get("euler").unwrap();
        for (steps, dt) in [(0, 0.01), (100, 0.0), (100, -0.01), (100, f64::NAN), (100, f64::INFINITY)] {
            assert!(matches!(
                integrate(&system, euler, steps, dt),
                Err(AttractorError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn step_size_domain() {
        assert!(check_step_size(0.01).is_ok());
        for dt in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                check_step_size(dt),
                Err(AttractorError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn divergence_is_left_to_the_caller() {
        let blow_up = |s: &State, _: &[f64]| s.component_mul(s) * 1e100;
        let euler = solvers().get("euler").unwrap().clone();
        let trajectory =
            integrate_with(&blow_up, euler.rule(), State::new(1.0, 1.0, 1.0), &[], 20, 0.1).unwrap();
        assert_eq!(trajectory.len(), 20);
        assert!(!trajectory.is_finite());
    }

    #[test]
    fn ensemble_matches_sequential_runs() {
        let mut registry = SystemRegistry::new();
        systems::register_builtin(&mut registry).unwrap();
        let system = registry.get("rossler").unwrap();
        let solvers = solvers();
        let solver = solvers.get("rk4").unwrap();

        let starts = spread_initial_coords(system.init_coord(), 4, 0.01);
        assert_eq!(starts[0], *system.init_coord());
        let members = integrate_ensemble(system, solver, &starts, 300, 0.01).unwrap();
        assert_eq!(members.len(), 4);
        for (start, member) in starts.iter().zip(&members) {
            let mut single = system.clone();
            single.set_init_coord(start.as_slice()).unwrap();
            assert_eq!(member, &integrate(&single, solver, 300, 0.01).unwrap());
        }
        assert!(integrate_ensemble(system, solver, &starts, 0, 0.01).is_err());
    }

    #[test]
    fn row_major_export() {
        let drift = |_: &State, _: &[f64]| State::new(1.0, 2.0, 3.0);
        let euler = solvers().get("euler").unwrap().clone();
        let trajectory = integrate_with(&drift, euler.rule(), State::zeros(), &[], 2, 1.0).unwrap();
        assert_eq!(trajectory.to_row_major(), vec![1.0, 2.0, 3.0, 2.0, 4.0, 6.0]);
        assert_eq!(trajectory.last(), Some(State::new(2.0, 4.0, 6.0)));
        let (states, time) = trajectory.into_parts();
        assert_eq!(states.nrows(), 2);
        assert_eq!(time.as_slice(), &[0.0, 1.0]);
    }
}
