//! Lorenz-type convection models and their quadratic relatives.

use super::Builtin;
use crate::system::PlotLimits;
use crate::traits::State;

pub fn lorenz(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (sigma, rho, beta) = (params[0], params[1], params[2]);
    State::new(sigma * (y - x), x * (rho - z) - y, x * y - beta * z)
}

pub fn chen(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, c) = (params[0], params[1], params[2]);
    State::new(a * (y - x), (c - a) * x - (x * z) + c * y, x * y - b * z)
}

pub fn chen_lu(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, c) = (params[0], params[1], params[2]);
    State::new(a * (y - x), -(x * z) + c * y, x * y - b * z)
}

pub fn dadras(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, c, d, h) = (params[0], params[1], params[2], params[3], params[4]);
    State::new(
        y - a * x + b * y * z,
        c * y - x * z + z,
        d * x * y - h * z,
    )
}

pub fn dequan_li(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, c, d, e, k, f) = (
        params[0], params[1], params[2], params[3], params[4], params[5],
    );
    State::new(
        a * (y - x) + d * x * z,
        k * x + f * y - x * z,
        c * z + x * y - e * x * x,
    )
}

pub fn hadley(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, f, g) = (params[0], params[1], params[2], params[3]);
    State::new(
        -y * y - z * z - a * (x - f),
        x * y - b * x * z - y + g,
        b * x * y + z * (x - 1.0),
    )
}

pub fn rucklidge(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (k, alpha) = (params[0], params[1]);
    State::new(-k * x + alpha * y - y * z, x, -z + y * y)
}

pub fn sakarya(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b) = (params[0], params[1]);
    State::new(-x + y + y * z, -x - y + a * x * z, z - b * x * y)
}

pub fn shimizu_morioka(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b) = (params[0], params[1]);
    State::new(y, x - b * y - x * z, -a * z + x * x)
}

pub fn wang_sun(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, c, d, e, f) = (
        params[0], params[1], params[2], params[3], params[4], params[5],
    );
    State::new(a * x + c * y * z, b * x + d * y - x * z, e * z + f * x * y)
}

pub fn yu_wang(state: &State, params: &[f64]) -> State {
    let (x, y, z) = (state.x, state.y, state.z);
    let (a, b, c, d) = (params[0], params[1], params[2], params[3]);
    State::new(a * (y - x), b * x - c * x * z, (x * y).exp() - d * z)
}

pub(super) const SYSTEMS: &[Builtin] = &[
    Builtin {
        name: "lorenz",
        func: lorenz,
        params: &[10.0, 28.0, 8.0 / 3.0],
        param_names: &["sigma", "rho", "beta"],
        init_coord: [0.0, 1.0, 0.0],
        reference: "Lorenz, E. N. \"Deterministic Nonperiodic Flow,\" \
                    Journal of the Atmospheric Sciences 20(2), 130-141, 1963.",
        plot_lims: PlotLimits::new((-25.0, 25.0), (-30.0, 30.0), (0.0, 50.0)),
    },
    Builtin {
        name: "chen",
        func: chen,
        params: &[35.0, 3.0, 28.0],
        param_names: &["a", "b", "c"],
        init_coord: [-10.0, 0.0, 37.0],
        reference: "Chen, G. & Ueta, T. \"Yet another chaotic attractor,\" \
                    International Journal of Bifurcation and Chaos 9, 1465 - 1466. [1999]",
        plot_lims: PlotLimits::new((-30.0, 30.0), (-30.0, 30.0), (5.0, 45.0)),
    },
    Builtin {
        name: "chen_lu",
        func: chen_lu,
        params: &[36.0, 3.0, 17.0],
        param_names: &["a", "b", "c"],
        init_coord: [1.0, 1.0, 30.0],
        reference: "Lu, Jinhu & Chen, Guanrong. (2002). \"A New Chaotic Attractor Coined.\". \
                    International Journal of Bifurcation and Chaos. vol. 12. pp-659-661.",
        plot_lims: PlotLimits::new((-30.0, 30.0), (-30.0, 30.0), (0.0, 30.0)),
    },
    Builtin {
        name: "dadras",
        func: dadras,
        params: &[3.0, 2.7, 1.7, 2.0, 9.0],
        param_names: &["a", "b", "c", "d", "h"],
        init_coord: [5.0, 0.0, -4.0],
        reference: "Dadras, Sara & Momeni, Hamid. (2009). A novel three-dimensional autonomous \
                    chaotic system generating two, three and four-scroll attractors. \
                    Physics Letters A. 373. 3637-3642.",
        plot_lims: PlotLimits::new((-15.0, 15.0), (-10.0, 8.0), (-12.0, 12.0)),
    },
    Builtin {
        name: "dequan_li",
        func: dequan_li,
        params: &[40.0, 1.833, 0.16, 0.65, 55.0, 20.0],
        param_names: &["a", "c", "d", "e", "k", "f"],
        init_coord: [0.01, 0.0, 0.0],
        reference: "Li, Dequan., \"A three-scroll chaotic attractor.\" \
                    Physics Letters A. 372. 387-393. (2008).",
        plot_lims: PlotLimits::new((-200.0, 200.0), (-200.0, 250.0), (-50.0, 250.0)),
    },
    Builtin {
        name: "hadley",
        func: hadley,
        params: &[0.2, 4.0, 8.0, 1.0],
        param_names: &["a", "b", "f", "g"],
        init_coord: [0.0, 0.0, 1.0],
        reference: "J. C. Sprott and J. C. Sprott, Chaos and time-series analysis, \
                    Vol. 69 (Citeseer, 2003)",
        plot_lims: PlotLimits::new((-1.0, 3.0), (-2.0, 2.0), (-2.0, 2.0)),
    },
    Builtin {
        name: "rucklidge",
        func: rucklidge,
        params: &[2.0, 6.7],
        param_names: &["k", "alpha"],
        init_coord: [1.0, 0.0, 4.5],
        reference: "Rucklidge, A. Chaos in models of double convection. \
                    J. Fluid Mech. 1992, 237, 209-229.",
        plot_lims: PlotLimits::new((-10.0, 10.0), (-10.0, 10.0), (-10.0, 10.0)),
    },
    Builtin {
        name: "sakarya",
        func: sakarya,
        params: &[0.4, 0.3],
        param_names: &["a", "b"],
        init_coord: [1.0, -1.0, 1.0],
        reference: "NA",
        plot_lims: PlotLimits::new((-35.0, 30.0), (-17.0, 15.0), (-13.0, 17.0)),
    },
    Builtin {
        name: "shimizu_morioka",
        func: shimizu_morioka,
        params: &[0.45, 0.75],
        param_names: &["a", "B"],
        init_coord: [-1.0, 2.0, 1.0],
        reference: "Shimizu, T.; Morioka, N. On the bifurcation of a symmetric limit cycle \
                    to an asymmetric one in a simple model. Phys. Lett. A 1980, 76, 201 - 204.",
        plot_lims: PlotLimits::new((-10.0, 10.0), (-10.0, 10.0), (-10.0, 10.0)),
    },
    Builtin {
        name: "wang_sun",
        func: wang_sun,
        params: &[0.2, -0.01, 1.0, -0.4, -1.0, -1.0],
        param_names: &["a", "b", "c", "d", "e", "f"],
        init_coord: [0.5, 0.1, 0.1],
        reference: "Wang, Z., Sun, Y., van Wyk, B. J., Qi, G. & van Wyk, M. A. \
                    \"A 3-D four-wing attractor and its analysis,\" \
                    Brazilian J. Phys. 39, (2009) 547-553.",
        plot_lims: PlotLimits::new((-4.0, 4.0), (-4.0, 4.0), (-3.0, 2.0)),
    },
    Builtin {
        name: "yu_wang",
        func: yu_wang,
        params: &[10.0, 40.0, 2.0, 2.5],
        param_names: &["a", "b", "c", "d"],
        init_coord: [0.1, 0.0, 15.0],
        reference: "F. Yu, C. H. Wang, and J. W. Yin, \"A 4-D chaos with fully qualified \
                    four-wing type,\" Acta Physica Sinica, vol. 61, (2012).",
        plot_lims: PlotLimits::new((-3.0, 3.0), (-5.0, 5.0), (0.0, 45.0)),
    },
];
