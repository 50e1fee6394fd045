//! Dynamical system entries and their metadata.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::equation_engine::ExpressionSystem;
use crate::error::{AttractorError, Result};
use crate::registry::{Registrable, Registry};
use crate::traits::{Derivative, State};

/// Catalog of dynamical systems, keyed by system name.
pub type SystemRegistry = Registry<System>;

/// Axis bounds for renderers. The engine never clips to these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLimits {
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
    pub zlim: (f64, f64),
}

impl PlotLimits {
    pub const fn new(xlim: (f64, f64), ylim: (f64, f64), zlim: (f64, f64)) -> Self {
        Self { xlim, ylim, zlim }
    }
}

/// A named vector field together with its tunable coefficients.
///
/// `params` and `init_coord` may be replaced after registration; every
/// replacement is length-checked and a rejected value leaves the old one in
/// place. Clones share the derivative function but own their coefficients.
#[derive(Clone)]
pub struct System {
    name: String,
    func: Arc<dyn Derivative>,
    params: Vec<f64>,
    param_names: Vec<String>,
    init_coord: State,
    reference: String,
    plot_lims: Option<PlotLimits>,
}

impl System {
    pub fn new(
        name: impl Into<String>,
        func: impl Derivative + 'static,
        default_params: &[f64],
        param_names: &[&str],
        init_coord: [f64; 3],
    ) -> Result<Self> {
        let system = Self {
            name: name.into(),
            func: Arc::new(func),
            params: default_params.to_vec(),
            param_names: param_names.iter().map(|n| n.to_string()).collect(),
            init_coord: State::from(init_coord),
            reference: String::new(),
            plot_lims: None,
        };
        system.check_params()?;
        Ok(system)
    }

    /// Builds a system whose right-hand sides are the textual `equations`
    /// for dx/dt, dy/dt and dz/dt. Parse and name errors surface here, never
    /// during integration.
    pub fn from_equations(
        name: impl Into<String>,
        equations: [&str; 3],
        default_params: &[f64],
        param_names: &[&str],
        init_coord: [f64; 3],
    ) -> Result<Self> {
        let compiled = ExpressionSystem::compile(equations, param_names)?;
        if default_params.len() != compiled.param_count() {
            return Err(AttractorError::contract(format!(
                "Expected {} parameters",
                compiled.param_count()
            )));
        }
        Self::new(
            name,
            move |state: &State, params: &[f64]| compiled.eval(state, params),
            default_params,
            param_names,
            init_coord,
        )
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_plot_lims(mut self, plot_lims: PlotLimits) -> Self {
        self.plot_lims = Some(plot_lims);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub fn init_coord(&self) -> &State {
        &self.init_coord
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn plot_lims(&self) -> Option<&PlotLimits> {
        self.plot_lims.as_ref()
    }

    /// The raw vector field, for callers driving their own loops.
    pub fn func(&self) -> &dyn Derivative {
        &*self.func
    }

    /// dx/dt at `state` under the current parameters.
    pub fn derivative(&self, state: &State) -> State {
        self.func.eval(state, &self.params)
    }

    pub fn set_params(&mut self, params: &[f64]) -> Result<()> {
        if params.len() != self.param_names.len() {
            return Err(AttractorError::contract(format!(
                "Expected {} parameters",
                self.param_names.len()
            )));
        }
        self.params.copy_from_slice(params);
        Ok(())
    }

    pub fn set_init_coord(&mut self, coord: &[f64]) -> Result<()> {
        if coord.len() != 3 {
            return Err(AttractorError::contract("State vector must have length 3"));
        }
        self.init_coord = State::from_column_slice(coord);
        Ok(())
    }

    pub fn param(&self, name: &str) -> Option<f64> {
        self.param_index(name).map(|i| self.params[i])
    }

    pub fn set_param(&mut self, name: &str, value: f64) -> Result<()> {
        let i = self.param_index(name).ok_or_else(|| {
            AttractorError::contract(format!(
                "System {} has no parameter named {name}",
                self.name
            ))
        })?;
        self.params[i] = value;
        Ok(())
    }

    /// One default per parameter name, and no name repeated.
    fn check_params(&self) -> Result<()> {
        if self.params.len() != self.param_names.len() {
            return Err(AttractorError::contract(format!(
                "System {}: {} default parameters for {} parameter names",
                self.name,
                self.params.len(),
                self.param_names.len()
            )));
        }
        let mut seen = HashSet::new();
        for param in &self.param_names {
            if !seen.insert(param.as_str()) {
                return Err(AttractorError::contract(format!(
                    "System {}: duplicate parameter name {param}",
                    self.name
                )));
            }
        }
        Ok(())
    }

    fn param_index(&self, name: &str) -> Option<usize> {
        self.param_names.iter().position(|n| n == name)
    }
}

impl Registrable for System {
    const KIND: &'static str = "System";

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<()> {
        self.check_params()
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("param_names", &self.param_names)
            .field("init_coord", &self.init_coord.as_slice())
            .finish_non_exhaustive()
    }
}

/// Serializable description of a system for renderers and UIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
    pub name: String,
    pub params: Vec<f64>,
    pub param_names: Vec<String>,
    pub init_coord: [f64; 3],
    pub reference: String,
    pub plot_lims: Option<PlotLimits>,
}

impl From<&System> for SystemInfo {
    fn from(system: &System) -> Self {
        Self {
            name: system.name.clone(),
            params: system.params.clone(),
            param_names: system.param_names.clone(),
            init_coord: system.init_coord.into(),
            reference: system.reference.clone(),
            plot_lims: system.plot_lims,
        }
    }
}
