use std::f64::consts::PI;

use geo::{Coordinate, Line, LineString, Polygon, Rect};

use rand::Rng;
use rand_distr::{Distribution, Normal, Standard};

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    let coords: [f64; 2] = rng.sample(Standard);
    let dims = bounds.max() - bounds.min();
    Coordinate {
        x: bounds.min().x + dims.x * coords[0],
        y: bounds.min().y + dims.y * coords[1],
    }
}

#[inline]
#[allow(dead_code)]
pub fn uniform_line<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Line<f64> {
    Line::new(uniform_point(rng, bounds), uniform_point(rng, bounds))
}

/// A polyline through `n` uniform points: self-crossings are likely.
#[allow(dead_code)]
pub fn uniform_polyline<R: Rng>(rng: &mut R, bounds: Rect<f64>, n: usize) -> LineString<f64> {
    (0..n).map(|_| uniform_point(rng, bounds)).collect()
}

/// A closed ring through `n` uniform points.
#[allow(dead_code)]
pub fn uniform_polygon<R: Rng>(rng: &mut R, bounds: Rect<f64>, n: usize) -> Polygon<f64> {
    Polygon::new(uniform_polyline(rng, bounds, n), vec![])
}

/// A star-shaped polygon with `steps` vertices around the unit circle,
/// each at a jittered radius. Simple, but with many sections.
#[allow(dead_code)]
pub fn circular_polygon<R: Rng>(mut rng: R, steps: usize) -> Polygon<f64> {
    let ring_noise = Normal::<f64>::new(0., 0.1).unwrap();
    let ring: LineString<f64> = (0..steps)
        .map(|i| {
            let angle = 2. * PI * i as f64 / steps as f64;
            let r = (1. + ring_noise.sample(&mut rng)).max(0.1);
            Coordinate {
                x: r * angle.cos(),
                y: r * angle.sin(),
            }
        })
        .collect();
    Polygon::new(ring, vec![])
}
