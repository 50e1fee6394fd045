//! Reference chaotic systems.
//!
//! Each family module exposes its vector fields as plain functions plus a
//! table of [`Builtin`] descriptors carrying the defaults that keep the
//! trajectory on the attractor under `rk4`.

mod applied;
mod convective;
mod oscillators;

use crate::error::Result;
use crate::system::{PlotLimits, System, SystemRegistry};
use crate::traits::State;

pub use applied::{
    bouali_type_1, bouali_type_2, bouali_type_3, chen_lee, finance, newton_leipnik, rikitake,
};
pub use convective::{
    chen, chen_lu, dadras, dequan_li, hadley, lorenz, rucklidge, sakarya, shimizu_morioka,
    wang_sun, yu_wang,
};
pub use oscillators::{
    burke_shaw, halvorsen, langford, lotka_volterra, moore_spiegel, nose_hoover,
    rabinovich_fabrikant, rossler, thomas, three_cell_cnn,
};

type DerivativeFn = fn(&State, &[f64]) -> State;

/// Static description of a reference system.
pub(crate) struct Builtin {
    pub name: &'static str,
    pub func: DerivativeFn,
    pub params: &'static [f64],
    pub param_names: &'static [&'static str],
    pub init_coord: [f64; 3],
    pub reference: &'static str,
    pub plot_lims: PlotLimits,
}

impl Builtin {
    fn to_system(&self) -> Result<System> {
        Ok(System::new(
            self.name,
            self.func,
            self.params,
            self.param_names,
            self.init_coord,
        )?
        .with_reference(self.reference)
        .with_plot_lims(self.plot_lims))
    }
}

fn all() -> Vec<&'static Builtin> {
    let mut builtins: Vec<&'static Builtin> = applied::SYSTEMS
        .iter()
        .chain(convective::SYSTEMS)
        .chain(oscillators::SYSTEMS)
        .collect();
    builtins.sort_by_key(|b| b.name);
    builtins
}

/// Registers every reference system, in alphabetical order.
pub fn register_builtin(registry: &mut SystemRegistry) -> Result<()> {
    for builtin in all() {
        registry.register(builtin.to_system()?)?;
    }
    Ok(())
}
