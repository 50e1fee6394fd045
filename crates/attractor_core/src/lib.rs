//! Chaotic attractor catalogue and fixed-step integration engine.
//!
//! Key components:
//! - **Traits**: `Derivative` (vector fields) and `StepRule` (single-step schemes) over
//!   the three-dimensional `State`.
//! - **Registries**: insertion-ordered, name-keyed tables of systems and solvers, bundled
//!   into a write-then-freeze [`Catalog`].
//! - **Systems**: 28 reference attractors with their published defaults, plus systems
//!   compiled from user equations by the equation engine.
//! - **Engine**: single and parallel ensemble integration producing `steps x 3`
//!   trajectories.

pub mod catalog;
pub mod engine;
pub mod equation_engine;
pub mod error;
pub mod registry;
pub mod solvers;
pub mod system;
pub mod systems;
pub mod traits;

pub use catalog::{Catalog, RunConfig};
pub use engine::{integrate, integrate_ensemble, Trajectory};
pub use error::{AttractorError, Result};
pub use solvers::{Solver, SolverRegistry};
pub use system::{PlotLimits, System, SystemInfo, SystemRegistry};
pub use traits::{Derivative, State, StepRule};
