//! # kmeans2d - API documentation
//!
//! kmeans2d is a small rust library for Lloyd's k-means clustering of 2-D points.
//!
//! ## Algorithm
//! Given N points and a cluster count K, the points are partitioned into K groups by repeating two steps:
//! - **Assignment**: every point is labelled with the index of its nearest centroid (euclidean distance,
//! ties go to the lowest index).
//! - **Update**: every centroid is replaced by the mean of the points labelled with it. A centroid without
//! any points keeps its previous position, and the event is recorded in [`KMeansState::degenerate_clusters`].
//!
//! Lloyd's method converges to a local optimum, which depends on the chosen initialization.
//!
//! ## Iteration policies
//! Either iterate until an assignment step changes nothing (with a mandatory iteration cap), or run a fixed
//! amount of iterations. See [`IterationPolicy`]. The reason a run stopped is reported as [`Termination`].
//!
//! ## Execution strategies
//! Both steps can run sequentially, or data-parallel on the rayon thread pool. The parallel update step
//! either adds into shared atomic per-cluster accumulators, or reduces per-thread partial sums. See [`Execution`].
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans2d::*;
//! use rand::prelude::*;
//!
//! let mut rnd = StdRng::seed_from_u64(1337);
//! let points = generate_points(20000, CoordinateBounds::new(0.0, 100.0).unwrap(), &mut rnd).unwrap();
//!
//! let conf = KMeansConfig::build()
//!     .random_generator(rnd)
//!     .iteration_policy(IterationPolicy::Converge { max_iter: 100 })
//!     .execution(Execution::Parallel { reduction: Reduction::PerThread })
//!     .build();
//!
//! let kmean = KMeans::new(points).unwrap();
//! let result = kmean.kmeans_lloyd(4, KMeans::init_random_sample, &conf).unwrap();
//!
//! println!("Centroids: {:?}", result.centroids);
//! println!("Stopped after {} iterations: {:?}", result.iterations, result.termination);
//! println!("Error: {}", result.distsum);
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeans2d::*;
//!
//! let points = vec![Point::new(1.0, 1.0), Point::new(1.5, 2.0), Point::new(3.0, 4.0), Point::new(5.0, 7.0)];
//!
//! let conf = KMeansConfig::build()
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|s, nr, new_distsum|
//!         println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
//!             nr, s.distsum, new_distsum, s.distsum - new_distsum))
//!     .build();
//!
//! let kmean = KMeans::new(points).unwrap();
//! let result = kmean.kmeans_lloyd(2, KMeans::init_first_k, &conf).unwrap();
//! for p in &result.points {
//!     println!("{}", p);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. It takes over the input points into its ownership.
//! Calling [`KMeans::kmeans_lloyd`] does not mutate it, so multiple runs can be done in parallel. Each run
//! works on its own copy of the points inside a new [`KMeansState`], which is finally returned as result.
//!
//! Initialization-method implementations are static methods within the [`KMeans`] struct, which are simply
//! passed in as reference. Invalid configurations (`k == 0`, `k` larger than the point count, an empty
//! point set, zero iteration budgets) are rejected with a [`KMeansError`] before anything is computed.

#[macro_use] mod helpers;
mod accumulator;
mod api;
mod distance;
mod error;
mod execution;
mod generate;
mod inits;
mod iteration_policy;
mod memory;
mod variants;

pub use api::{Centroid, DegenerateCluster, KMeans, KMeansConfig, KMeansConfigBuilder, KMeansState, Point};
pub use distance::{distance, nearest_centroid, squared_distance};
pub use error::{KMeansError, Result};
pub use execution::{Execution, Reduction};
pub use generate::{generate_points, CoordinateBounds};
pub use iteration_policy::{IterationPolicy, Termination};
pub use memory::{AtomicPrimitive, Primitive};
