//! Oscillator-born attractors: spiral, toroidal and cyclically symmetric flows.

use super::Builtin;
use crate::system::PlotLimits;
use crate::traits::State;

pub fn burke_shaw(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (s, v) = (params[0], params[1]);
    State::new(-s * (x + y), -y - s * x * z, s * x * y + v)
}

pub fn halvorsen(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let a = params[0];
    State::new(
        -a * x - 4.0 * y - 4.0 * z - y * y,
        -a * y - 4.0 * z - 4.0 * x - z * z,
        -a * z - 4.0 * x - 4.0 * y - x * x,
    )
}

pub fn langford(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (alpha, beta, lambda, omega, rho, epsilon) = (
        params[0], params[1], params[2], params[3], params[4], params[5],
    );
    State::new(
        (z - beta) * x - omega * y,
        omega * x + (z - beta) * y,
        lambda + alpha * z - (z * z * z) / 3.0 - (x * x + y * y) * (1.0 + rho * z)
            + epsilon * z * (x * x * x),
    )
}

pub fn lotka_volterra(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, c) = (params[0], params[1], params[2]);
    State::new(
        x - x * y + c * x * x - a * z * x * x,
        -y + x * y,
        -b * z + a * z * x * x,
    )
}

pub fn moore_spiegel(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (t, r) = (params[0], params[1]);
    State::new(y, z, -z - (t - r * (1.0 - x * x)) * y - t * x)
}

pub fn nose_hoover(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let a = params[0];
    State::new(a * y, -x + y * z, 1.0 - y * y)
}

pub fn rabinovich_fabrikant(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (alpha, gamma) = (params[0], params[1]);
    State::new(
        y * (z - 1.0 + x * x) + gamma * x,
        x * (3.0 * z + 1.0 - x * x) + gamma * y,
        -2.0 * z * (alpha + x * y),
    )
}

pub fn rossler(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, c) = (params[0], params[1], params[2]);
    State::new(-(y + z), x + a * y, b + z * (x - c))
}

pub fn thomas(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let b = params[0];
    State::new(y.sin() - b * x, z.sin() - b * y, x.sin() - b * z)
}

/// Piecewise-linear CNN output: 0.5 * (|v + 1| - |v - 1|).
fn saturate(v: f64) -> f64 {
    0.5 * ((v + 1.0).abs() - (v - 1.0).abs())
}

pub fn three_cell_cnn(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (p1, p2, r, s) = (params[0], params[1], params[2], params[3]);
    let (fx, fy, fz) = (saturate(x), saturate(y), saturate(z));
    State::new(
        -x + p1 * fx - s * fy - s * fz,
        -y - s * fx + p2 * fy - r * fz,
        -z - s * fx + r * fy + fz,
    )
}

pub(super) const SYSTEMS: &[Builtin] = &[
    Builtin {
        name: "burke_shaw",
        func: burke_shaw,
        params: &[10.0, 4.272],
        param_names: &["s", "v"],
        init_coord: [1.0, 0.0, 0.0],
        reference: "Shaw, Robert. \"Strange Attractors, Chaotic Behavior, and Information Flow\" \
                    Zeitschrift fur Naturforschung A, vol. 36, no. 1, 1981, pp. 80-112.",
        plot_lims: PlotLimits::new((-2.5, 2.5), (-2.5, 2.5), (-2.0, 2.0)),
    },
    Builtin {
        name: "halvorsen",
        func: halvorsen,
        params: &[1.89],
        param_names: &["a"],
        init_coord: [-1.48, 1.51, 2.04],
        reference: "J. C. Sprott and J. C. Sprott, Chaos and time-series analysis, \
                    Vol. 69 (Citeseer, 2003)",
        plot_lims: PlotLimits::new((-20.0, 15.0), (-12.0, 8.0), (-12.0, 8.0)),
    },
    Builtin {
        name: "langford",
        func: langford,
        params: &[0.95, 0.7, 0.6, 3.5, 0.25, 0.1],
        param_names: &["alpha", "beta", "lmbda", "omega", "rho", "epsilon"],
        init_coord: [0.1, 0.0, 0.0],
        reference: "W. F. Langford, Numerical studies of torus bifurcations, Numerical methods \
                    for bifurcation problems (Dortmund, 1983), Internat. Schriftenreihe Numer. \
                    Math., vol. 70, Birkhauser, Basel, 1984, pp. 285 - 295.",
        plot_lims: PlotLimits::new((-2.0, 2.0), (-2.0, 2.0), (-0.5, 2.0)),
    },
    Builtin {
        name: "lotka_volterra",
        func: lotka_volterra,
        params: &[2.9851, 3.0, 2.0],
        param_names: &["a", "b", "c"],
        init_coord: [1.0, 1.0, 1.0],
        reference: "J. S. Costello, \"Synchronization of chaos in a generalized Lotka-Volterra \
                    attractor,\" The Nonlinear Journal, vol. 1, pp. 11 - 17, 1999.",
        plot_lims: PlotLimits::new((0.7, 1.3), (0.7, 1.3), (0.5, 1.1)),
    },
    Builtin {
        name: "moore_spiegel",
        func: moore_spiegel,
        params: &[20.0, 100.0],
        param_names: &["t", "r"],
        init_coord: [0.0, 0.8, 0.0],
        reference: "Moore, D. W., & Spiegel, E. A. (1966). \"A thermally excited nonlinear \
                    oscillator,\" The Astrophysical Journal, 143, 871-887.",
        plot_lims: PlotLimits::new((-10.0, 10.0), (-20.0, 20.0), (-250.0, 250.0)),
    },
    Builtin {
        name: "nose_hoover",
        func: nose_hoover,
        params: &[1.0],
        param_names: &["a"],
        init_coord: [0.1, 0.0, -0.1],
        reference: "Posch et al. \"Canonical dynamics of the Nose oscillator: Stability, order, \
                    and chaos.\" Physical Review A, 33(6), 4253-4265, 1986.",
        plot_lims: PlotLimits::new((-3.0, 1.0), (-3.0, 3.0), (-3.0, 3.0)),
    },
    Builtin {
        name: "rabinovich_fabrikant",
        func: rabinovich_fabrikant,
        params: &[1.1, 0.87],
        param_names: &["alpha", "gamma"],
        init_coord: [-1.0, 0.0, 0.5],
        reference: "Rabinovich, M. I. and Fabrikant, A. L., \"Stochastic self-modulation of \
                    waves in nonequilibrium media\", Soviet Journal of Experimental and \
                    Theoretical Physics, vol. 50, p. 311, 1979.",
        plot_lims: PlotLimits::new((-2.0, 0.0), (-0.5, 3.0), (0.0, 1.5)),
    },
    Builtin {
        name: "rossler",
        func: rossler,
        params: &[0.2, 0.2, 5.7],
        param_names: &["a", "b", "c"],
        init_coord: [0.1, 0.0, -0.1],
        reference: "Rossler, O. E. \"An Equation for Continuous Chaos,\" \
                    Physics Letters A, 57(5), 397-398, 1976.",
        plot_lims: PlotLimits::new((-15.0, 15.0), (-15.0, 15.0), (-1.0, 20.0)),
    },
    Builtin {
        name: "thomas",
        func: thomas,
        params: &[0.208],
        param_names: &["b"],
        init_coord: [0.01, 0.0, 0.0],
        reference: "Thomas, Rene. \"Deterministic chaos seen in terms of feedback circuits: \
                    analysis, synthesis, 'labyrinth chaos'.\" International Journal of \
                    Bifurcation and Chaos 9 (1999): 1889-1905.",
        plot_lims: PlotLimits::new((-2.0, 5.0), (-2.0, 4.0), (-2.0, 4.0)),
    },
    Builtin {
        name: "three_cell_cnn",
        func: three_cell_cnn,
        params: &[1.24, 1.1, 4.4, 3.21],
        param_names: &["p1", "p2", "r", "s"],
        init_coord: [0.1, 0.1, 0.1],
        reference: "Arena, P., et al. (1998). Bifurcation and Chaos in Noninteger Order \
                    Cellular Neural Networks. International Journal of Bifurcation and Chaos, \
                    8(7), 1527-1539.",
        plot_lims: PlotLimits::new((-1.5, 1.5), (-1.5, 1.5), (-2.0, 1.5)),
    },
];
