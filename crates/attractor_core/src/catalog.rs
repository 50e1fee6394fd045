//! The system and solver tables bundled as one context object.
//!
//! A [`Catalog`] is filled once and then only read. [`global`] hands out a
//! process-wide instance built on first use; callers that want different
//! defaults clone a system out of it, or build their own catalog with
//! [`Catalog::builtin`] and mutate that.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::engine::{integrate, Trajectory};
use crate::error::Result;
use crate::solvers::{self, SolverRegistry};
use crate::system::{SystemInfo, SystemRegistry};
use crate::systems;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub systems: SystemRegistry,
    pub solvers: SolverRegistry,
}

impl Catalog {
    /// Empty catalog, for callers assembling their own tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reference systems and all six solvers.
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new();
        systems::register_builtin(&mut catalog.systems)?;
        solvers::register_builtin(&mut catalog.solvers)?;
        tracing::debug!(
            systems = catalog.systems.len(),
            solvers = catalog.solvers.len(),
            "built catalog"
        );
        Ok(catalog)
    }

    pub fn system_info(&self, name: &str) -> Result<SystemInfo> {
        self.systems.get(name).map(SystemInfo::from)
    }

    /// Looks up both names, applies the overrides to a copy of the system and
    /// integrates it. The catalog itself is never modified.
    pub fn run(&self, config: &RunConfig) -> Result<Trajectory> {
        let solver = self.solvers.get(&config.solver)?;
        let mut system = self.systems.get(&config.system)?.clone();
        if let Some(params) = &config.params {
            system.set_params(params)?;
        }
        if let Some(coord) = &config.init_coord {
            system.set_init_coord(coord)?;
        }
        integrate(&system, solver, config.steps, config.dt)
    }
}

/// Process-wide builtin catalog, built on first call and immutable after.
///
/// Concurrent first calls may each build a catalog; exactly one is kept and
/// every caller sees that one.
pub fn global() -> Result<&'static Catalog> {
    static GLOBAL: OnceLock<Catalog> = OnceLock::new();
    if let Some(catalog) = GLOBAL.get() {
        return Ok(catalog);
    }
    let catalog = Catalog::builtin()?;
    Ok(GLOBAL.get_or_init(|| catalog))
}

/// One integration request, as read from JSON or a JS object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub system: String,
    pub solver: String,
    pub steps: usize,
    pub dt: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_coord: Option<Vec<f64>>,
}

impl RunConfig {
    pub fn new(system: impl Into<String>, solver: impl Into<String>, steps: usize, dt: f64) -> Self {
        Self {
            system: system.into(),
            solver: solver.into(),
            steps,
            dt,
            params: None,
            init_coord: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttractorError;
    use crate::traits::State;

    #[test]
    fn builtin_catalog_contents() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.systems.len(), 28);
        assert_eq!(
            catalog.solvers.list(),
            vec!["euler", "rk2", "rk3", "rk4", "rk5", "stormer_verlet"]
        );
        assert!(catalog.systems.contains("lorenz"));
    }

    #[test]
    fn global_catalog_is_shared() {
        let a = global().unwrap();
        let b = global().unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.systems.list(), Catalog::builtin().unwrap().systems.list());
    }

    #[test]
    fn run_config_from_json() {
        let config: RunConfig = serde_json::from_str(
            r#"{"system": "lorenz", "solver": "rk4", "steps": 100, "dt": 0.01,
                "params": [10.0, 28.0, 2.5]}"#,
        )
        .unwrap();
        assert_eq!(config.params.as_deref(), Some(&[10.0, 28.0, 2.5][..]));
        assert_eq!(config.init_coord, None);

        let unknown = serde_json::from_str::<RunConfig>(
            r#"{"system": "lorenz", "solver": "rk4", "steps": 100, "dt": 0.01, "tmax": 5}"#,
        );
        assert!(unknown.is_err());

        let json = serde_json::to_string(&RunConfig::new("rossler", "euler", 10, 0.1)).unwrap();
        assert!(!json.contains("params"));
    }

    #[test]
    fn run_applies_overrides_to_a_copy() {
        let catalog = Catalog::builtin().unwrap();
        let mut config = RunConfig::new("lorenz", "rk4", 200, 0.01);
        let defaults = catalog.run(&config).unwrap();

        config.params = Some(vec![10.0, 28.0, 2.0]);
        config.init_coord = Some(vec![1.0, 1.0, 1.0]);
        let custom = catalog.run(&config).unwrap();
        assert_eq!(custom.len(), 200);
        assert_ne!(custom, defaults);

        let lorenz = catalog.systems.get("lorenz").unwrap();
        assert_eq!(lorenz.params(), &[10.0, 28.0, 8.0 / 3.0]);
        assert_eq!(lorenz.init_coord(), &State::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn run_reports_bad_requests() {
        let catalog = Catalog::builtin().unwrap();

        let err = catalog.run(&RunConfig::new("lorenz", "leapfrog", 10, 0.01)).unwrap_err();
        assert_eq!(err.to_string(), "Solver leapfrog not found");

        let err = catalog.run(&RunConfig::new("lorentz", "rk4", 10, 0.01)).unwrap_err();
        assert_eq!(err.to_string(), "System lorentz not found");

        let mut config = RunConfig::new("lorenz", "rk4", 10, 0.01);
        config.params = Some(vec![10.0, 28.0]);
        assert_eq!(
            catalog.run(&config),
            Err(AttractorError::ContractViolation("Expected 3 parameters".into()))
        );

        config.params = None;
        config.init_coord = Some(vec![0.0, 1.0]);
        assert!(matches!(catalog.run(&config), Err(AttractorError::ContractViolation(_))));

        let config = RunConfig::new("lorenz", "rk4", 0, 0.01);
        assert!(matches!(catalog.run(&config), Err(AttractorError::InvalidArgument(_))));
    }

    #[test]
    fn system_info_serializes_for_renderers() {
        let catalog = Catalog::builtin().unwrap();
        let info = catalog.system_info("rossler").unwrap();
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["name"], "rossler");
        assert_eq!(value["param_names"], serde_json::json!(["a", "b", "c"]));
        assert_eq!(value["plot_lims"]["zlim"], serde_json::json!([-1.0, 20.0]));
        assert!(catalog.system_info("nope").is_err());
    }
}
