use crate::{
	error::{KMeansError, Result},
	execution::StepExecutor,
	memory::*, DegenerateCluster, KMeans, KMeansConfig, KMeansState,
};
use log::{debug, info, warn};

pub(crate) struct Lloyd<T: Primitive> {
	_p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
	fn validate(data: &KMeans<T>, k: usize, config: &KMeansConfig<'_, T>) -> Result<()> {
		if k == 0 {
			return Err(KMeansError::config("k must be greater than zero"));
		}
		if k > data.points.len() {
			return Err(KMeansError::config(format!(
				"k = {} exceeds the amount of points ({})", k, data.points.len()
			)));
		}
		config.iteration_policy.validate()
	}

	/// Update step: reduce the labelled points into per-cluster sums, then replace the centroid store
	/// with the cluster means. Clusters without members keep their previous centroid.
	/// ## Returns
	/// The new distance sum
	fn update_centroids(executor: &dyn StepExecutor<T>, state: &mut KMeansState<T>, iteration: usize) -> T {
		// accumulate() returns after every point was read, finalization only starts afterwards.
		let sums = executor.accumulate(&state.points, state.k);
		let (new_centroids, empty_clusters) = sums.finalize(&state.centroids);
		for cluster in empty_clusters {
			debug!("Iteration {} - Cluster {} has no points, keeping its centroid", iteration, cluster);
			state.degenerate_clusters.push(DegenerateCluster { iteration, cluster });
		}
		state.centroids = new_centroids;
		state.centroid_frequency = sums.count;
		state.potential()
	}

	pub fn calculate<'a, F>(data: &KMeans<T>, k: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
				where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
		Self::validate(data, k, config)?;

		let mut state = KMeansState::new(&data.points, k, config.iteration_policy);

		// Initialize clusters and notify subscriber
		init(data, &mut state, config)?;
		if state.centroids.len() != k {
			return Err(KMeansError::config(format!(
				"initialization produced {} centroids, but k = {}", state.centroids.len(), k
			)));
		}
		(config.init_done)(&state);
		info!("Starting k-means: {} points, k = {}, {:?}, {:?}",
			data.points.len(), k, config.iteration_policy, config.execution);

		let executor = config.execution.create_executor::<T>();
		let mut iteration_policy = config.iteration_policy.create_logic();

		let mut iteration = 0;
		let termination = loop {
			iteration += 1;
			let moved = executor.assign(&mut state.points, &state.centroids);
			let new_distsum = Self::update_centroids(executor.as_ref(), &mut state, iteration);
			state.iterations = iteration;
			debug!("Iteration {} - {} points changed cluster, distsum {:.4}", iteration, moved, new_distsum);

			// Notify subscriber about finished iteration
			(config.iteration_done)(&state, iteration, new_distsum);
			state.distsum = new_distsum;
			if let Some(termination) = iteration_policy.next(moved) {
				break termination;
			}
		};

		state.termination = Some(termination);
		match termination {
			crate::Termination::IterationCap =>
				warn!("k-means did not converge within {} iterations, returning current state", iteration),
			_ => info!("k-means finished after {} iterations ({:?}), distsum {:.4}", iteration, termination, state.distsum),
		}
		Ok(state)
	}
}
