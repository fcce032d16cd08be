use crate::{error::Result, memory::*, Centroid, KMeans, KMeansConfig, KMeansState};

#[inline(always)] pub fn calculate<T: Primitive>(kmean: &KMeans<T>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>) -> Result<()> {
    state.centroids = kmean.points.iter().take(state.k).map(Centroid::from).collect();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{helpers::testing::sample_points, IterationPolicy};

    #[test]
    fn copies_leading_points() {
        let kmean = KMeans::new(sample_points()).unwrap();
        let mut state = KMeansState::new(kmean.points(), 3, IterationPolicy::default());
        KMeans::init_first_k(&kmean, &mut state, &KMeansConfig::default()).unwrap();
        assert_eq!(state.centroids, vec![Centroid::new(1.0, 1.0), Centroid::new(1.5, 2.0), Centroid::new(3.0, 4.0)]);
    }
}
