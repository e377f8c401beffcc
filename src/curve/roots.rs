//! Real roots of polynomials of degree at most three.

use smallvec::SmallVec;
use std::f64::consts::PI;

pub(crate) type Roots = SmallVec<[f64; 3]>;

/// Coefficients below this fraction of the largest one are treated as
/// zero when deciding the effective degree.
const DEGREE_EPSILON: f64 = 1e-12;

/// Parameters in `[0, 1]` where the power-basis polynomial
/// `c[0] + c[1] t + c[2] t^2 + c[3] t^3` vanishes, in increasing order.
///
/// A polynomial that is identically zero has no isolated roots and
/// yields none.
pub(crate) fn unit_roots(coeffs: &[f64]) -> Roots {
    const SLACK: f64 = 1e-9;

    let mut roots: Roots = polynomial_roots(coeffs)
        .into_iter()
        .filter(|t| t.is_finite() && *t >= -SLACK && *t <= 1. + SLACK)
        .map(|t| polish(coeffs, t).max(0.).min(1.))
        .collect();
    roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    roots.dedup_by(|a, b| (*a - *b).abs() <= SLACK);
    roots
}

/// All real roots of the polynomial, unordered.
pub(crate) fn polynomial_roots(coeffs: &[f64]) -> Roots {
    let scale = coeffs.iter().fold(0f64, |m, c| m.max(c.abs()));
    if scale == 0. {
        return Roots::new();
    }
    let mut degree = coeffs.len();
    while degree > 0 && coeffs[degree - 1].abs() <= scale * DEGREE_EPSILON {
        degree -= 1;
    }
    match degree {
        0 | 1 => Roots::new(),
        2 => linear_roots(coeffs[0], coeffs[1]),
        3 => quadratic_roots(coeffs[0], coeffs[1], coeffs[2]),
        _ => cubic_roots(coeffs[0], coeffs[1], coeffs[2], coeffs[3]),
    }
}

fn linear_roots(c0: f64, c1: f64) -> Roots {
    let mut roots = Roots::new();
    roots.push(-c0 / c1);
    roots
}

fn quadratic_roots(c0: f64, c1: f64, c2: f64) -> Roots {
    let mut roots = Roots::new();
    let disc = c1 * c1 - 4. * c2 * c0;
    let scale = (c1 * c1).max((4. * c2 * c0).abs());
    if disc < 0. {
        if disc >= -scale * 1e-12 {
            roots.push(-c1 / (2. * c2));
        }
        return roots;
    }
    // Numerically stable form, avoiding cancellation between -b and sqrt.
    let q = -0.5 * (c1 + c1.signum() * disc.sqrt());
    if q == 0. {
        roots.push(0.);
        return roots;
    }
    roots.push(q / c2);
    roots.push(c0 / q);
    roots
}

fn cubic_roots(c0: f64, c1: f64, c2: f64, c3: f64) -> Roots {
    let mut roots = Roots::new();
    let a = c2 / c3;
    let b = c1 / c3;
    let c = c0 / c3;

    let q = (a * a - 3. * b) / 9.;
    let r = (2. * a * a * a - 9. * a * b + 27. * c) / 54.;
    let q3 = q * q * q;

    if r * r < q3 {
        let theta = (r / q3.sqrt()).max(-1.).min(1.).acos();
        let m = -2. * q.sqrt();
        roots.push(m * (theta / 3.).cos() - a / 3.);
        roots.push(m * ((theta + 2. * PI) / 3.).cos() - a / 3.);
        roots.push(m * ((theta - 2. * PI) / 3.).cos() - a / 3.);
    } else {
        let big_a = -r.signum() * (r.abs() + (r * r - q3).sqrt()).cbrt();
        let big_b = if big_a != 0. { q / big_a } else { 0. };
        roots.push(big_a + big_b - a / 3.);
        // Double root when the discriminant vanishes.
        if (big_a - big_b).abs() <= 1e-9 * (big_a.abs() + 1.) {
            roots.push(-(big_a + big_b) / 2. - a / 3.);
        }
    }
    roots
}

fn evaluate(coeffs: &[f64], t: f64) -> (f64, f64) {
    let mut v = 0.;
    let mut dv = 0.;
    for c in coeffs.iter().rev() {
        dv = dv * t + v;
        v = v * t + c;
    }
    (v, dv)
}

/// A couple of Newton steps to recover precision lost in the closed
/// forms.
fn polish(coeffs: &[f64], mut t: f64) -> f64 {
    for _ in 0..3 {
        let (v, dv) = evaluate(coeffs, t);
        if dv == 0. || !v.is_finite() {
            break;
        }
        let next = t - v / dv;
        if !next.is_finite() {
            break;
        }
        t = next;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn check(coeffs: &[f64], expected: &[f64]) {
        let roots = unit_roots(coeffs);
        assert_eq!(roots.len(), expected.len(), "{:?} vs {:?}", roots, expected);
        for (r, e) in roots.iter().zip(expected) {
            assert_relative_eq!(*r, *e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_low_degree() {
        check(&[-0.5, 1.], &[0.5]);
        check(&[2.], &[]);
        check(&[0., 0., 0.], &[]);
        // (t - 0.25)(t - 0.75)
        check(&[0.1875, -1., 1.], &[0.25, 0.75]);
        // (t - 0.5)^2
        check(&[0.25, -1., 1.], &[0.5]);
        // roots outside [0, 1]
        check(&[-2., 0., 1.], &[]);
    }

    #[test]
    fn test_cubic() {
        // (t - 0.1)(t - 0.5)(t - 0.9)
        let (a, b, c) = (0.1, 0.5, 0.9);
        check(
            &[-a * b * c, a * b + b * c + a * c, -(a + b + c), 1.],
            &[0.1, 0.5, 0.9],
        );
        // t^3 - t^2 has a double root at 0 and one at 1.
        check(&[0., 0., -1., 1.], &[0., 1.]);
        // single real root
        check(&[-0.125, 0., 0., 1.], &[0.5]);
    }

    #[test]
    fn test_degenerate_cubic() {
        // leading coefficient vanishing relative to the rest
        check(&[-0.5, 1., 0., 1e-20], &[0.5]);
    }
}
