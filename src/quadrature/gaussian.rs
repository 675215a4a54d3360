//! Gauss–Legendre rules on the reference triangle.
//!
//! An `n`-point Gauss–Legendre rule on `[0, 1]` is applied in both directions
//! of the collapsed square `(a, b) ↦ ((1 - a)(1 - b), a(1 - b), b)`, giving
//! `n²` barycentric samples. The collapse Jacobian `(1 - b)` is folded into
//! the weights, so the expanded weights sum to 1 like the triangular family.

use static_assertions::const_assert_eq;

use crate::quadrature::{QuadratureRule, TriangleRule};

/// Highest Gaussian order (points per direction).
pub const MAX_GAUSSIAN_ORDER: u32 = 10;

const GAUSS_1: [(f64, f64); 1] = [
    (0.5, 1.0),
];

const GAUSS_2: [(f64, f64); 2] = [
    (0.2113248654051871, 0.5),
    (0.7886751345948129, 0.5),
];

const GAUSS_3: [(f64, f64); 3] = [
    (0.11270166537925831, 0.2777777777777778),
    (0.5, 0.4444444444444444),
    (0.8872983346207417, 0.2777777777777778),
];

const GAUSS_4: [(f64, f64); 4] = [
    (0.06943184420297371, 0.17392742256872692),
    (0.33000947820757187, 0.32607257743127305),
    (0.6699905217924281, 0.32607257743127305),
    (0.9305681557970263, 0.17392742256872692),
];

const GAUSS_5: [(f64, f64); 5] = [
    (0.046910077030668004, 0.11846344252809454),
    (0.23076534494715845, 0.23931433524968324),
    (0.5, 0.28444444444444444),
    (0.7692346550528415, 0.23931433524968324),
    (0.953089922969332, 0.11846344252809454),
];

const GAUSS_6: [(f64, f64); 6] = [
    (0.03376524289842399, 0.08566224618958518),
    (0.16939530676686773, 0.1803807865240693),
    (0.38069040695840156, 0.23395696728634552),
    (0.6193095930415985, 0.23395696728634552),
    (0.8306046932331322, 0.1803807865240693),
    (0.966234757101576, 0.08566224618958518),
];

const GAUSS_7: [(f64, f64); 7] = [
    (0.025446043828620736, 0.06474248308443485),
    (0.12923440720030277, 0.13985269574463832),
    (0.2970774243113014, 0.19091502525255946),
    (0.5, 0.2089795918367347),
    (0.7029225756886985, 0.19091502525255946),
    (0.8707655927996972, 0.13985269574463832),
    (0.9745539561713793, 0.06474248308443485),
];

const GAUSS_8: [(f64, f64); 8] = [
    (0.019855071751231884, 0.05061426814518813),
    (0.10166676129318664, 0.11119051722668724),
    (0.2372337950418355, 0.15685332293894363),
    (0.4082826787521751, 0.181341891689181),
    (0.591717321247825, 0.181341891689181),
    (0.7627662049581645, 0.15685332293894363),
    (0.8983332387068134, 0.11119051722668724),
    (0.9801449282487681, 0.05061426814518813),
];

const GAUSS_9: [(f64, f64); 9] = [
    (0.015919880246186954, 0.040637194180787206),
    (0.0819844463366821, 0.0903240803474287),
    (0.1933142836497048, 0.13030534820146772),
    (0.33787328829809554, 0.15617353852000143),
    (0.5, 0.1651196775006299),
    (0.6621267117019045, 0.15617353852000143),
    (0.8066857163502952, 0.13030534820146772),
    (0.9180155536633179, 0.0903240803474287),
    (0.984080119753813, 0.040637194180787206),
];

const GAUSS_10: [(f64, f64); 10] = [
    (0.01304673574141414, 0.03333567215434407),
    (0.06746831665550775, 0.0747256745752903),
    (0.1602952158504878, 0.10954318125799102),
    (0.2833023029353764, 0.13463335965499817),
    (0.4255628305091844, 0.14776211235737644),
    (0.5744371694908156, 0.14776211235737644),
    (0.7166976970646236, 0.13463335965499817),
    (0.8397047841495122, 0.10954318125799102),
    (0.9325316833444922, 0.0747256745752903),
    (0.9869532642585859, 0.03333567215434407),
];

const_assert_eq!(GAUSS_10.len(), MAX_GAUSSIAN_ORDER as usize);

/// 1-D `(node, weight)` pairs on `[0, 1]` for `order` points.
pub fn legendre_nodes(order: u32) -> Option<&'static [(f64, f64)]> {
    let nodes: &'static [(f64, f64)] = match order {
        1 => &GAUSS_1,
        2 => &GAUSS_2,
        3 => &GAUSS_3,
        4 => &GAUSS_4,
        5 => &GAUSS_5,
        6 => &GAUSS_6,
        7 => &GAUSS_7,
        8 => &GAUSS_8,
        9 => &GAUSS_9,
        10 => &GAUSS_10,
        _ => return None,
    };
    Some(nodes)
}

/// Expand the 1-D rule for `order` into barycentric samples.
pub(crate) fn collapsed_rule(order: u32) -> Option<TriangleRule> {
    let nodes = legendre_nodes(order)?;
    let mut samples = Vec::with_capacity(nodes.len() * nodes.len());
    for &(a, wa) in nodes {
        for &(b, wb) in nodes {
            let barycentric = [(1.0 - a) * (1.0 - b), a * (1.0 - b), b];
            samples.push((barycentric, 2.0 * wa * wb * (1.0 - b)));
        }
    }
    Some(TriangleRule::owned(QuadratureRule::Gaussian, order, samples))
}
