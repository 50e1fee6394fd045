//! Attractors from economics, rigid-body mechanics and geodynamo models.

use super::Builtin;
use crate::system::PlotLimits;
use crate::traits::State;

pub fn bouali_type_1(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (k, b, mu, p, q, s) = (
        params[0], params[1], params[2], params[3], params[4], params[5],
    );
    State::new(k * y + mu * x * (b - y * y), -x + s * z, p * x - q * y)
}

pub fn bouali_type_2(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, c, s, alpha, beta) = (
        params[0], params[1], params[2], params[3], params[4], params[5],
    );
    State::new(
        x * (a - y) + alpha * z,
        -y * (b - x * x),
        -x * (c - s * z) - beta * z,
    )
}

pub fn bouali_type_3(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (gamma, mu, alpha, beta) = (params[0], params[1], params[2], params[3]);
    State::new(
        alpha * x * (1.0 - y) - beta * z,
        -gamma * y * (1.0 - x * x),
        mu * x,
    )
}

pub fn chen_lee(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, c) = (params[0], params[1], params[2]);
    State::new(a * x - y * z, b * y + x * z, c * z + x * y / 3.0)
}

pub fn finance(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, c) = (params[0], params[1], params[2]);
    State::new((1.0 / b - a) * x + x * y + z, -b * y - x * x, -x - c * z)
}

pub fn newton_leipnik(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (alpha, beta) = (params[0], params[1]);
    State::new(
        -alpha * x + y + 10.0 * y * z,
        -x - 0.4 * y + 5.0 * x * z,
        beta * z - 5.0 * x * y,
    )
}

pub fn rikitake(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, mu) = (params[0], params[1]);
    State::new(-mu * x + z * y, -mu * y + x * (z - a), 1.0 - x * y)
}

pub(super) const SYSTEMS: &[Builtin] = &[
    Builtin {
        name: "bouali_type_1",
        func: bouali_type_1,
        params: &[0.02, 0.2, 0.4, 10.0, 0.1, 50.0],
        param_names: &["k", "b", "mu", "p", "q", "s"],
        init_coord: [0.012, 3.69, -0.09],
        reference: "S. Bouali, et al. (2012). Emulating complex business cycles by using an \
                    electronic analogue",
        plot_lims: PlotLimits::new((-0.05, 0.05), (-5.0, 5.0), (-0.2, 0.2)),
    },
    Builtin {
        name: "bouali_type_2",
        func: bouali_type_2,
        params: &[4.0, 1.0, 1.4, 2.8, 1.0, 1.0],
        param_names: &["a", "b", "c", "s", "alpha", "beta"],
        init_coord: [0.1, 3.0, 0.2],
        reference: "Bouali, S. (2012). A novel strange attractor with a stretched loop",
        plot_lims: PlotLimits::new((-8.0, 8.0), (-3.0, 13.0), (-20.0, 1.5)),
    },
    Builtin {
        name: "bouali_type_3",
        func: bouali_type_3,
        params: &[1.0, 0.001, 3.0, 2.2],
        param_names: &["gamma", "mu", "alpha", "beta"],
        init_coord: [1.0, 1.0, 0.0],
        reference: "Bouali, S. (2013). A 3D Strange Attractor with a Distinctive Silhouette",
        plot_lims: PlotLimits::new((-3.0, 3.0), (0.0, 3.0), (-0.15, 0.15)),
    },
    Builtin {
        name: "chen_lee",
        func: chen_lee,
        params: &[5.0, -10.0, -0.38],
        param_names: &["a", "b", "c"],
        init_coord: [1.0, 1.0, 1.0],
        reference: "Chen HK, Lee CI. \"Anti-control of chaos in rigid body motion.\", \
                    Chaos, Solitons & Fractals (2004), vol. 21, pp. 957 - 65",
        plot_lims: PlotLimits::new((-30.0, 30.0), (-30.0, 30.0), (-1.0, 35.0)),
    },
    Builtin {
        name: "finance",
        func: finance,
        params: &[1e-05, 0.1, 1.0],
        param_names: &["a", "b", "c"],
        init_coord: [0.0, -10.0, 0.1],
        reference: "Cai & Huang (2007). A new finance chaotic attractor. International Journal \
                    of Nonlinear Science. vol 3. pp. 1479-3889.",
        plot_lims: PlotLimits::new((-3.0, 3.0), (-15.0, -5.0), (-1.5, 1.5)),
    },
    Builtin {
        name: "newton_leipnik",
        func: newton_leipnik,
        params: &[0.4, 0.175],
        param_names: &["alpha", "beta"],
        init_coord: [0.349, 0.0, -0.160],
        reference: "Leipnik, R. B. & Newton, T. A. \"Double strange attractors in rigid body \
                    motion with linear feedback control,\" Phys. Lett. A86, 63 - 67. (1981)",
        plot_lims: PlotLimits::new((-0.7, 0.7), (-0.4, 0.4), (-0.4, 0.6)),
    },
    Builtin {
        name: "rikitake",
        func: rikitake,
        params: &[5.0, 2.0],
        param_names: &["a", "mu"],
        init_coord: [-0.7, 0.0, 5.0],
        reference: "Rikitake, Tsuneji. \"Oscillations of a System of Disk Dynamos.\" \
                    Mathematical Proceedings of the Cambridge Philosophical Society, \
                    vol. 54, no. 1, 1958, pp. 89 - 105.",
        plot_lims: PlotLimits::new((-7.0, 6.0), (-5.0, 3.0), (3.0, 9.0)),
    },
];
