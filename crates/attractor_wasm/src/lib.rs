//! Browser bridge: exposes the attractor catalogue and the integration engine
//! to the JS renderer.

mod attractor;

pub use attractor::WasmAttractor;

use attractor_core::catalog::{self, Catalog, RunConfig};
use attractor_core::engine::Trajectory;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Flat trajectory handed to JS: `states` is row-major `[x0, y0, z0, x1, ...]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryPayload {
    pub steps: usize,
    pub states: Vec<f64>,
    pub time: Vec<f64>,
}

impl From<&Trajectory> for TrajectoryPayload {
    fn from(trajectory: &Trajectory) -> Self {
        Self {
            steps: trajectory.len(),
            states: trajectory.to_row_major(),
            time: trajectory.time().as_slice().to_vec(),
        }
    }
}

fn shared_catalog() -> anyhow::Result<&'static Catalog> {
    Ok(catalog::global()?)
}

pub(crate) fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

fn system_names() -> anyhow::Result<Vec<String>> {
    Ok(shared_catalog()?
        .systems
        .list()
        .into_iter()
        .map(String::from)
        .collect())
}

fn solver_names() -> anyhow::Result<Vec<String>> {
    Ok(shared_catalog()?
        .solvers
        .list()
        .into_iter()
        .map(String::from)
        .collect())
}

fn run(config: &RunConfig) -> anyhow::Result<TrajectoryPayload> {
    let trajectory = shared_catalog()?.run(config)?;
    Ok(TrajectoryPayload::from(&trajectory))
}

#[wasm_bindgen(js_name = listSystems)]
pub fn list_systems() -> Result<Vec<String>, JsValue> {
    system_names().map_err(to_js)
}

#[wasm_bindgen(js_name = listSolvers)]
pub fn list_solvers() -> Result<Vec<String>, JsValue> {
    solver_names().map_err(to_js)
}

/// Defaults, parameter names, citation and plot limits of one system.
#[wasm_bindgen(js_name = systemInfo)]
pub fn system_info(name: &str) -> Result<JsValue, JsValue> {
    let info = shared_catalog()
        .and_then(|catalog| Ok(catalog.system_info(name)?))
        .map_err(to_js)?;
    to_value(&info).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Runs a `{ system, solver, steps, dt, params?, init_coord? }` request.
#[wasm_bindgen(js_name = runConfig)]
pub fn run_config(config: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let config: RunConfig = from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid run config: {}", e)))?;
    let payload = run(&config).map_err(to_js)?;
    to_value(&payload).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_catalog_order() {
        let systems = system_names().unwrap();
        assert_eq!(systems.len(), 28);
        assert_eq!(systems.first().map(String::as_str), Some("bouali_type_1"));
        assert_eq!(
            solver_names().unwrap(),
            vec!["euler", "rk2", "rk3", "rk4", "rk5", "stormer_verlet"]
        );
    }

    #[test]
    fn run_flattens_trajectory() {
        let payload = run(&RunConfig::new("lorenz", "rk4", 50, 0.01)).unwrap();
        assert_eq!(payload.steps, 50);
        assert_eq!(payload.states.len(), 150);
        assert_eq!(payload.time.len(), 50);
        assert_eq!(payload.time[1], 0.01);
    }

    #[test]
    fn run_errors_keep_core_messages() {
        let err = run(&RunConfig::new("lorenz", "midpoint", 50, 0.01)).unwrap_err();
        assert_eq!(format!("{err:#}"), "Solver midpoint not found");
    }
}
