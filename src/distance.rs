use crate::{memory::*, Centroid, Point};

/// Squared euclidean distance between a point and a centroid.
#[inline(always)]
pub fn squared_distance<T: Primitive>(a: &Point<T>, b: &Centroid<T>) -> T {
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    dx * dx + dy * dy
}

/// Euclidean distance between a point and a centroid: `sqrt((a.x-b.x)^2 + (a.y-b.y)^2)`.
///
/// Computed with `hypot`, so it stays finite whenever the coordinate differences are finite.
#[inline(always)]
pub fn distance<T: Primitive>(a: &Point<T>, b: &Centroid<T>) -> T {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Index of (and distance to) the centroid closest to **p**.
///
/// Centroids are compared in index order with a strict `<`, so on ties the lowest index wins.
/// ## Panics
/// If **centroids** is empty. [`crate::KMeans::kmeans_lloyd`] rejects `k == 0` before any step runs.
#[inline(always)]
pub fn nearest_centroid<T: Primitive>(p: &Point<T>, centroids: &[Centroid<T>]) -> (usize, T) {
    assert!(!centroids.is_empty(), "nearest_centroid requires at least one centroid");
    let mut best = (0, T::infinity());
    for (idx, c) in centroids.iter().enumerate() {
        let dist = distance(p, c);
        if dist < best.1 {
            best = (idx, dist);
        }
    }
    best
}
