use kmeans2d::*;
use rand::prelude::*;

fn main() {
    let (point_cnt, k, max_iter) = (20000, 4, 2500);

    // Generate some random data
    let mut rnd = StdRng::seed_from_u64(1337);
    let points = generate_points(point_cnt, CoordinateBounds::new(0.0, 100.0).unwrap(), &mut rnd).unwrap();

	let conf = KMeansConfig::build()
		.init_done(&|_| println!("Initialization completed."))
		.iteration_done(&|s, nr, new_distsum|
			println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
				nr, s.distsum, new_distsum, s.distsum - new_distsum))
		.random_generator(rnd)
		.iteration_policy(IterationPolicy::Converge { max_iter })
		.execution(Execution::Parallel { reduction: Reduction::Atomic })
		.build();

    // Calculate kmeans, using random sampling as initialization-method
    let kmean = KMeans::new(points).unwrap();
    let result = kmean.kmeans_lloyd(k, KMeans::init_random_sample, &conf).unwrap();

    println!("Centroids: {:?}", result.centroids);
    println!("Cluster sizes: {:?}", result.centroid_frequency);
    println!("Termination: {:?} after {} iterations", result.termination, result.iterations);
    println!("Error: {}", result.distsum);
}
