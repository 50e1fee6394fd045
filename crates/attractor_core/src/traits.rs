use nalgebra::Vector3;

/// The instantaneous (x, y, z) configuration of a system.
pub type State = Vector3<f64>;

/// A vector field over the three-variable state space.
///
/// Implementations must be pure: the result depends only on `state` and
/// `params`, and neither input is modified. Any closure or `fn` item with the
/// matching signature implements this trait.
pub trait Derivative: Send + Sync {
    /// Evaluates dx/dt at `state` for the given coefficients.
    fn eval(&self, state: &State, params: &[f64]) -> State;
}

impl<F> Derivative for F
where
    F: Fn(&State, &[f64]) -> State + Send + Sync,
{
    #[inline]
    fn eval(&self, state: &State, params: &[f64]) -> State {
        self(state, params)
    }
}

/// A single-step update rule for a fixed step size.
///
/// Like [`Derivative`], a step rule is a pure function of its inputs and
/// returns a new state instead of writing into the old one.
pub trait StepRule: Send + Sync {
    /// Advances `state` by one step of size `dt`.
    fn step(&self, system: &dyn Derivative, state: &State, params: &[f64], dt: f64) -> State;
}

impl<F> StepRule for F
where
    F: Fn(&dyn Derivative, &State, &[f64], f64) -> State + Send + Sync,
{
    #[inline]
    fn step(&self, system: &dyn Derivative, state: &State, params: &[f64], dt: f64) -> State {
        self(system, state, params, dt)
    }
}
