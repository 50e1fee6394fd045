//! Stateful attractor for frame-by-frame animation.

use anyhow::{bail, Context};
use attractor_core::engine::{check_step_size, integrate_with};
use attractor_core::{Solver, State, System};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::{shared_catalog, to_js, TrajectoryPayload};

#[wasm_bindgen]
pub struct WasmAttractor {
    system: System,
    solver: Solver,
    state: State,
    t: f64,
}

impl WasmAttractor {
    fn from_catalog(system_name: &str, solver_name: &str) -> anyhow::Result<Self> {
        let catalog = shared_catalog()?;
        let system = catalog.systems.get(system_name)?.clone();
        let solver = catalog.solvers.get(solver_name)?.clone();
        Ok(Self::with_parts(system, solver))
    }

    fn compile(
        equations: &[String],
        params: &[f64],
        param_names: &[String],
        init_coord: &[f64],
        solver_name: &str,
    ) -> anyhow::Result<Self> {
        let [dx, dy, dz] = equations else {
            bail!("Expected 3 equations, got {}", equations.len());
        };
        if init_coord.len() != 3 {
            bail!("State vector must have length 3");
        }
        let names: Vec<&str> = param_names.iter().map(String::as_str).collect();
        let system = System::from_equations(
            "custom",
            [dx.as_str(), dy.as_str(), dz.as_str()],
            params,
            &names,
            [init_coord[0], init_coord[1], init_coord[2]],
        )
        .context("Failed to compile equations")?;
        let solver = shared_catalog()?.solvers.get(solver_name)?.clone();
        Ok(Self::with_parts(system, solver))
    }

    fn with_parts(system: System, solver: Solver) -> Self {
        let state = *system.init_coord();
        Self {
            system,
            solver,
            state,
            t: 0.0,
        }
    }

    fn advance_one(&mut self, dt: f64) -> anyhow::Result<()> {
        check_step_size(dt)?;
        self.state = self
            .solver
            .step(self.system.func(), &self.state, self.system.params(), dt);
        self.t += dt;
        Ok(())
    }

    fn advance(&mut self, steps: usize, dt: f64) -> anyhow::Result<TrajectoryPayload> {
        let trajectory = integrate_with(
            self.system.func(),
            self.solver.rule(),
            self.state,
            self.system.params(),
            steps,
            dt,
        )?;
        if let Some(last) = trajectory.last() {
            self.state = last;
            self.t += steps as f64 * dt;
        }
        Ok(TrajectoryPayload::from(&trajectory))
    }
}

#[wasm_bindgen]
impl WasmAttractor {
    /// Copies a catalogue system; later parameter edits stay local to this
    /// instance.
    #[wasm_bindgen(constructor)]
    pub fn new(system_name: &str, solver_name: &str) -> Result<WasmAttractor, JsValue> {
        console_error_panic_hook::set_once();
        Self::from_catalog(system_name, solver_name).map_err(to_js)
    }

    #[wasm_bindgen(js_name = fromEquations)]
    pub fn from_equations(
        equations: Vec<String>,
        params: Vec<f64>,
        param_names: Vec<String>,
        init_coord: Vec<f64>,
        solver_name: &str,
    ) -> Result<WasmAttractor, JsValue> {
        console_error_panic_hook::set_once();
        Self::compile(&equations, &params, &param_names, &init_coord, solver_name).map_err(to_js)
    }

    pub fn name(&self) -> String {
        self.system.name().to_string()
    }

    pub fn param_names(&self) -> Vec<String> {
        self.system.param_names().to_vec()
    }

    pub fn get_params(&self) -> Vec<f64> {
        self.system.params().to_vec()
    }

    pub fn set_params(&mut self, params: &[f64]) -> Result<(), JsValue> {
        self.system
            .set_params(params)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_param(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        self.system
            .set_param(name, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Moves the starting point and rewinds to it.
    pub fn set_init_coord(&mut self, coord: &[f64]) -> Result<(), JsValue> {
        self.system
            .set_init_coord(coord)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = *self.system.init_coord();
        self.t = 0.0;
    }

    pub fn get_state(&self) -> Vec<f64> {
        self.state.as_slice().to_vec()
    }

    pub fn get_t(&self) -> f64 {
        self.t
    }

    pub fn step(&mut self, dt: f64) -> Result<(), JsValue> {
        self.advance_one(dt).map_err(to_js)
    }

    /// Integrates `steps` steps from the current state and leaves the
    /// attractor at the last one. Returns `{ steps, states, time }` with
    /// `time` counted from zero for this batch.
    pub fn integrate(&mut self, steps: usize, dt: f64) -> Result<JsValue, JsValue> {
        let payload = self.advance(steps, dt).map_err(to_js)?;
        to_value(&payload).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_match_batch_integration() {
        let mut stepped = WasmAttractor::from_catalog("lorenz", "rk4").unwrap();
        let mut batched = WasmAttractor::from_catalog("lorenz", "rk4").unwrap();
        for _ in 0..10 {
            stepped.advance_one(0.01).unwrap();
        }
        let payload = batched.advance(10, 0.01).unwrap();
        assert_eq!(stepped.get_state(), batched.get_state());
        assert_eq!(&payload.states[27..], stepped.get_state().as_slice());
        assert!((batched.get_t() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn step_rejects_bad_time_steps() {
        let mut attractor = WasmAttractor::from_catalog("thomas", "rk4").unwrap();
        let start = attractor.get_state();
        for dt in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            assert!(attractor.advance_one(dt).is_err());
        }
        assert_eq!(attractor.get_state(), start);
        assert_eq!(attractor.get_t(), 0.0);
    }

    #[test]
    fn edits_do_not_leak_into_catalog() {
        let mut attractor = WasmAttractor::from_catalog("rossler", "euler").unwrap();
        attractor.system.set_param("c", 9.0).unwrap();
        assert_eq!(attractor.get_params(), vec![0.2, 0.2, 9.0]);
        let fresh = WasmAttractor::from_catalog("rossler", "euler").unwrap();
        assert_eq!(fresh.get_params(), vec![0.2, 0.2, 5.7]);
    }

    #[test]
    fn compiles_user_equations() {
        let equations = vec![
            "sigma * (y - x)".to_string(),
            "x * (rho - z) - y".to_string(),
            "x * y - beta * z".to_string(),
        ];
        let names = vec!["sigma".to_string(), "rho".to_string(), "beta".to_string()];
        let mut custom = WasmAttractor::compile(
            &equations,
            &[10.0, 28.0, 8.0 / 3.0],
            &names,
            &[0.0, 1.0, 0.0],
            "rk4",
        )
        .unwrap();
        let mut native = WasmAttractor::from_catalog("lorenz", "rk4").unwrap();
        custom.advance(100, 0.01).unwrap();
        native.advance(100, 0.01).unwrap();
        assert_eq!(custom.get_state(), native.get_state());
        assert_eq!(custom.param_names(), names);
    }

    #[test]
    fn rejects_malformed_equation_sets() {
        let two = vec!["x".to_string(), "y".to_string()];
        let err = WasmAttractor::compile(&two, &[], &[], &[0.0; 3], "rk4").err().unwrap();
        assert_eq!(err.to_string(), "Expected 3 equations, got 2");

        let bad = vec!["x".to_string(), "y *".to_string(), "z".to_string()];
        let err = WasmAttractor::compile(&bad, &[], &[], &[0.0; 3], "rk4").err().unwrap();
        assert!(format!("{err:#}").starts_with("Failed to compile equations: "));
    }
}
