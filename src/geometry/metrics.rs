//! Triangle metrics used by the face-area engine.
//!
//! The Jacobians below are taken with respect to the barycentric coordinates
//! `(λ₁, λ₂)` of a triangle `[a, b, c]` (with `λ₃ = 1 − λ₁ − λ₂`) and already
//! include the reference-triangle area factor `½`, so integrating them
//! against weights that sum to 1 yields the triangle's area. All are signed:
//! positive for counter-clockwise triangles seen from outside the sphere (or
//! from `+z` in the plane), negative for clockwise ones.

const EPS: f64 = 1e-300;

#[inline]
pub(crate) fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub(crate) fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// Signed area Jacobian of a planar triangle in the `xy` plane.
///
/// Constant over the triangle; equals the signed triangle area.
#[inline]
pub fn planar_triangle_jacobian(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    0.5 * cross(sub(a, c), sub(b, c))[2]
}

/// Signed area Jacobian of the flat chord triangle `[a, b, c]` in 3-D.
///
/// The magnitude is `½ |(a − c) × (b − c)|`; the sign is that of the normal
/// against the outward direction `a + b + c`.
#[inline]
pub fn chord_triangle_jacobian(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    let normal = cross(sub(a, c), sub(b, c));
    let magnitude = 0.5 * norm(normal);
    let outward = [a[0] + b[0] + c[0], a[1] + b[1] + c[1], a[2] + b[2] + c[2]];
    if dot(normal, outward) < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Signed area Jacobian of the great-circle triangle `[a, b, c]` at the
/// barycentric point `lambda`.
///
/// The flat triangle point `F = Σ λᵢ vᵢ` is projected radially onto the unit
/// sphere, `G = F / |F|`; the Jacobian is `½ |∂G/∂λ₁ × ∂G/∂λ₂|`, signed by the
/// orientation of that normal relative to `G`. Vertices are expected on the
/// unit sphere. Returns `0` where `F` vanishes.
pub fn spherical_triangle_jacobian(
    a: [f64; 3],
    b: [f64; 3],
    c: [f64; 3],
    lambda: [f64; 3],
) -> f64 {
    let f = [
        lambda[0] * a[0] + lambda[1] * b[0] + lambda[2] * c[0],
        lambda[0] * a[1] + lambda[1] * b[1] + lambda[2] * c[1],
        lambda[0] * a[2] + lambda[1] * b[2] + lambda[2] * c[2],
    ];
    let r2 = dot(f, f);
    if r2 < EPS {
        return 0.0;
    }
    let inv_r3 = r2.powf(-1.5);
    let project = |df: [f64; 3]| {
        let fd = dot(f, df);
        [
            (df[0] * r2 - f[0] * fd) * inv_r3,
            (df[1] * r2 - f[1] * fd) * inv_r3,
            (df[2] * r2 - f[2] * fd) * inv_r3,
        ]
    };
    let dg1 = project(sub(a, c));
    let dg2 = project(sub(b, c));
    let normal = cross(dg1, dg2);
    let magnitude = 0.5 * norm(normal);
    if dot(normal, f) < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}
