//! Fixed-step integration schemes.
//!
//! Every scheme is a plain function with the [`StepRule`] signature. They
//! borrow the current state and parameters and return the next state, so a
//! step can never disturb its inputs.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::registry::{Registrable, Registry};
use crate::traits::{Derivative, State, StepRule};

/// Catalog of integration schemes, keyed by solver name.
pub type SolverRegistry = Registry<Solver>;

/// A named single-step update rule.
#[derive(Clone)]
pub struct Solver {
    name: String,
    rule: Arc<dyn StepRule>,
}

impl Solver {
    pub fn new(name: impl Into<String>, rule: impl StepRule + 'static) -> Self {
        Self {
            name: name.into(),
            rule: Arc::new(rule),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &dyn StepRule {
        &*self.rule
    }

    pub fn step(&self, system: &dyn Derivative, state: &State, params: &[f64], dt: f64) -> State {
        self.rule.step(system, state, params, dt)
    }
}

impl Registrable for Solver {
    const KIND: &'static str = "Solver";

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Explicit Euler, one stage.
pub fn euler(system: &dyn Derivative, state: &State, params: &[f64], dt: f64) -> State {
    state + dt * system.eval(state, params)
}

/// Heun's method (trapezoidal RK2).
pub fn rk2(system: &dyn Derivative, state: &State, params: &[f64], dt: f64) -> State {
    let k1 = system.eval(state, params);
    let k2 = system.eval(&(state + dt * k1), params);
    state + dt * (k1 + k2) / 2.0
}

/// Kutta's third-order method.
pub fn rk3(system: &dyn Derivative, state: &State, params: &[f64], dt: f64) -> State {
    let k1 = system.eval(state, params);
    let k2 = system.eval(&(state + dt * k1 / 2.0), params);
    let k3 = system.eval(&(state - dt * k1 + 2.0 * dt * k2), params);
    state + dt * (k1 + 4.0 * k2 + k3) / 6.0
}

/// Classic Runge-Kutta 4th order.
pub fn rk4(system: &dyn Derivative, state: &State, params: &[f64], dt: f64) -> State {
    // k1 = f(y)
    let k1 = system.eval(state, params);
    // k2 = f(y + dt*k1/2)
    let k2 = system.eval(&(state + dt * k1 / 2.0), params);
    // k3 = f(y + dt*k2/2)
    let k3 = system.eval(&(state + dt * k2 / 2.0), params);
    // k4 = f(y + dt*k3)
    let k4 = system.eval(&(state + dt * k3), params);
    // y_next = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
    state + dt * (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0
}

/// Six-stage Runge-Kutta with Butcher-style fifth-order weights.
///
/// Stage points for k4 and k5 are `2*k3 - k2/2` and `-3*k1/16 + 9*k4/16`.
/// Published trajectories depend on these exact stages.
pub fn rk5(system: &dyn Derivative, state: &State, params: &[f64], dt: f64) -> State {
    let k1 = system.eval(state, params);
    let k2 = system.eval(&(state + dt * k1 / 4.0), params);
    let k3 = system.eval(&(state + dt * (k1 + k2) / 8.0), params);
    let k4 = system.eval(&(state + dt * (k3 - k2 / 2.0 + k3)), params);
    let k5 = system.eval(&(state + dt * (-3.0 * k1 / 16.0 + 9.0 * k4 / 16.0)), params);
    let k6 = system.eval(
        &(state
            + dt * (-3.0 * k1 / 7.0 + 2.0 * k2 / 7.0 + 12.0 * k3 / 7.0 - 12.0 * k4 / 7.0
                + 8.0 * k5 / 7.0)),
        params,
    );
    state + dt * (7.0 * k1 + 32.0 * k3 + 12.0 * k4 + 32.0 * k5 + 7.0 * k6) / 90.0
}

/// Two-stage half-step update registered as `stormer_verlet`.
///
/// Despite the name this is the explicit midpoint rule on the full state, not
/// a position/velocity split leapfrog.
pub fn stormer_verlet(system: &dyn Derivative, state: &State, params: &[f64], dt: f64) -> State {
    let k1 = system.eval(state, params);
    let half_state = state + 0.5 * dt * k1;

    let k2 = system.eval(&half_state, params);
    state + dt * k2
}

type StepFn = fn(&dyn Derivative, &State, &[f64], f64) -> State;

const BUILTIN: &[(&str, StepFn)] = &[
    ("euler", euler),
    ("rk2", rk2),
    ("rk3", rk3),
    ("rk4", rk4),
    ("rk5", rk5),
    ("stormer_verlet", stormer_verlet),
];

/// Registers the six reference schemes in a fixed order.
pub fn register_builtin(registry: &mut SolverRegistry) -> Result<()> {
    for &(name, rule) in BUILTIN {
        registry.register(Solver::new(name, rule))?;
    }
    Ok(())
}
