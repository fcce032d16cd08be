use crate::{error::Result, memory::*, Centroid, KMeans, KMeansConfig, KMeansState};
use rand::prelude::*;
use std::collections::HashSet;

#[inline(always)] pub fn calculate<T: Primitive>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> Result<()> {
    let point_cnt = kmean.points.len();
    let mut rnd = config.rnd.borrow_mut();
    // Draw until k distinct indices were visited, so no two centroids start on the same point.
    let mut visited = HashSet::with_capacity(state.k);
    let mut centroids = Vec::with_capacity(state.k);
    while centroids.len() < state.k {
        let idx = rnd.gen_range(0..point_cnt);
        if visited.insert(idx) {
            centroids.push(Centroid::from(&kmean.points[idx]));
        }
    }
    state.centroids = centroids;
    Ok(())
}
