use crate::utils::Coord;

/// A quadratic bézier curve segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub from: Coord,
    pub ctrl: Coord,
    pub to: Coord,
}

impl QuadraticBezier {
    pub fn new(from: Coord, ctrl: Coord, to: Coord) -> Self {
        QuadraticBezier { from, ctrl, to }
    }

    pub fn sample(&self, t: f64) -> Coord {
        self.blossom(t, t)
    }

    /// Polar form of the curve; `blossom(t, t)` is the point at `t`.
    fn blossom(&self, u: f64, v: f64) -> Coord {
        let (u1, v1) = (1. - u, 1. - v);
        self.from * (u1 * v1) + self.ctrl * (u1 * v + u * v1) + self.to * (u * v)
    }

    /// The sub-curve between `t0` and `t1`; reversed if `t0 > t1`.
    pub fn split_range(&self, t0: f64, t1: f64) -> Self {
        QuadraticBezier {
            from: self.blossom(t0, t0),
            ctrl: self.blossom(t0, t1),
            to: self.blossom(t1, t1),
        }
    }

    pub fn flip(&self) -> Self {
        QuadraticBezier {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }

    /// Power-basis coefficients of one coordinate.
    pub(crate) fn coefficients(p0: f64, p1: f64, p2: f64) -> [f64; 3] {
        [p0, 2. * (p1 - p0), p0 - 2. * p1 + p2]
    }
}

/// A cubic bézier curve segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub from: Coord,
    pub ctrl1: Coord,
    pub ctrl2: Coord,
    pub to: Coord,
}

impl CubicBezier {
    pub fn new(from: Coord, ctrl1: Coord, ctrl2: Coord, to: Coord) -> Self {
        CubicBezier {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    pub fn sample(&self, t: f64) -> Coord {
        self.blossom(t, t, t)
    }

    fn blossom(&self, u: f64, v: f64, w: f64) -> Coord {
        let (u1, v1, w1) = (1. - u, 1. - v, 1. - w);
        self.from * (u1 * v1 * w1)
            + self.ctrl1 * (u1 * v1 * w + u1 * v * w1 + u * v1 * w1)
            + self.ctrl2 * (u1 * v * w + u * v1 * w + u * v * w1)
            + self.to * (u * v * w)
    }

    /// The sub-curve between `t0` and `t1`; reversed if `t0 > t1`.
    pub fn split_range(&self, t0: f64, t1: f64) -> Self {
        CubicBezier {
            from: self.blossom(t0, t0, t0),
            ctrl1: self.blossom(t0, t0, t1),
            ctrl2: self.blossom(t0, t1, t1),
            to: self.blossom(t1, t1, t1),
        }
    }

    pub fn flip(&self) -> Self {
        CubicBezier {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// The hodograph: a quadratic whose value at `t` is the derivative
    /// of this curve at `t`.
    pub fn hodograph(&self) -> QuadraticBezier {
        QuadraticBezier {
            from: (self.ctrl1 - self.from) * 3.,
            ctrl: (self.ctrl2 - self.ctrl1) * 3.,
            to: (self.to - self.ctrl2) * 3.,
        }
    }

    pub(crate) fn coefficients(p0: f64, p1: f64, p2: f64, p3: f64) -> [f64; 4] {
        [
            p0,
            3. * (p1 - p0),
            3. * (p0 - 2. * p1 + p2),
            p3 - 3. * p2 + 3. * p1 - p0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }

    #[test]
    fn test_split_range_matches_sample() {
        let cubic = CubicBezier::new(c(0., 0.), c(1., 3.), c(3., 3.), c(4., 0.));
        let part = cubic.split_range(0.25, 0.75);
        for i in 0..=4 {
            let s = i as f64 / 4.;
            let p = part.sample(s);
            let q = cubic.sample(0.25 + 0.5 * s);
            assert_relative_eq!(p.x, q.x, epsilon = 1e-12);
            assert_relative_eq!(p.y, q.y, epsilon = 1e-12);
        }

        let reversed = cubic.split_range(0.75, 0.25);
        assert_eq!(reversed.from, part.to);
        assert_eq!(reversed.to, part.from);
    }

    #[test]
    fn test_quadratic_split() {
        let quad = QuadraticBezier::new(c(0., 0.), c(1., 2.), c(2., 0.));
        let half = quad.split_range(0., 0.5);
        assert_relative_eq!(half.to.x, 1.);
        assert_relative_eq!(half.to.y, 1.);
        assert_eq!(half.ctrl, c(0.5, 1.));
    }

    #[test]
    fn test_hodograph() {
        let cubic = CubicBezier::new(c(0., 0.), c(1., 1.), c(2., 1.), c(3., 0.));
        let d = cubic.hodograph();
        assert_eq!(d.from, c(3., 3.));
        assert_eq!(d.to, c(3., -3.));
        assert_relative_eq!(d.sample(0.5).y, 0.);
    }
}
