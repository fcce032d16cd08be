use crate::error::{KMeansError, Result};
use crate::{accumulator::coordinate_limit, memory::*, Centroid, KMeans, KMeansConfig, KMeansState};

#[inline(always)]
pub fn calculate<T: Primitive>(
    kmean: &KMeans<T>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>, computed: Vec<Centroid<T>>,
) -> Result<()> {
    if computed.len() != state.k {
        return Err(KMeansError::config(format!(
            "initialized with {} centroids, but k = {}", computed.len(), state.k
        )));
    }
    if let Some(idx) = computed.iter().position(|c| !(c.x.is_finite() && c.y.is_finite())) {
        return Err(KMeansError::config(format!("precomputed centroid {} has a non-finite coordinate", idx)));
    }
    let limit = coordinate_limit::<T>(kmean.points.len());
    if let Some(idx) = computed.iter().position(|c| c.x.abs() > limit || c.y.abs() > limit) {
        return Err(KMeansError::config(format!(
            "precomputed centroid {} exceeds the coordinate magnitude limit {:e}", idx, limit
        )));
    }
    state.centroids = computed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    #[test]
    fn train_with_precomputed_centroids() {
        let points = [0.0, 1.0, 20.0, 21.0].iter().map(|&x| Point::new(x, 0.0f32)).collect();
        let centroids = vec![Centroid::new(0.0, 0.0), Centroid::new(21.0, 0.0)];

        let kmean = KMeans::new(points).unwrap();
        let result = kmean.kmeans_lloyd(2, KMeans::init_precomputed(centroids), &KMeansConfig::default()).unwrap();

        assert_eq!(result.centroids, vec![Centroid::new(0.5, 0.0), Centroid::new(20.5, 0.0)]);
    }

    #[test]
    fn centroid_count_must_match_k() {
        let kmean = KMeans::new(vec![Point::new(0.0f64, 0.0), Point::new(1.0, 1.0)]).unwrap();
        let res = kmean.kmeans_lloyd(2, KMeans::init_precomputed(vec![Centroid::new(0.0, 0.0)]), &KMeansConfig::default());
        assert!(matches!(res, Err(KMeansError::InvalidConfiguration(_))));

        let far = vec![Centroid::new(0.0, 0.0), Centroid::new(-1.7e308, 0.0)];
        let res = kmean.kmeans_lloyd(2, KMeans::init_precomputed(far), &KMeansConfig::default());
        assert!(matches!(res, Err(KMeansError::InvalidConfiguration(_))));
    }
}
