use crate::{
    error::{KMeansError, Result},
    memory::*, Point,
};
use rand::Rng;

/// Half-open coordinate range `[lower, upper)` used for both axes when generating points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateBounds<T: Primitive> {
    pub lower: T,
    pub upper: T,
}
impl<T: Primitive> CoordinateBounds<T> {
    pub fn new(lower: T, upper: T) -> Result<Self> {
        if !(lower.is_finite() && upper.is_finite()) || lower >= upper || !(upper - lower).is_finite() {
            return Err(KMeansError::config(format!(
                "coordinate bounds must be finite with lower < upper and a finite span, got [{}, {})", lower, upper
            )));
        }
        Ok(Self { lower, upper })
    }
}
impl Default for CoordinateBounds<f64> {
    fn default() -> Self {
        Self { lower: 0.0, upper: 100.0 }
    }
}

/// Generate **n** unassigned points, uniformly distributed within **bounds** on both axes.
/// Use a seeded **rnd** for reproducible data sets.
pub fn generate_points<T: Primitive, R: Rng>(n: usize, bounds: CoordinateBounds<T>, rnd: &mut R) -> Result<Vec<Point<T>>> {
    if n == 0 {
        return Err(KMeansError::config("point count must be greater than zero"));
    }
    Ok((0..n)
        .map(|_| Point::new(
            rnd.gen_range(bounds.lower..bounds.upper),
            rnd.gen_range(bounds.lower..bounds.upper),
        ))
        .collect())
}
