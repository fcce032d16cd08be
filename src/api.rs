use crate::{
    accumulator::coordinate_limit,
    distance,
    error::{KMeansError, Result},
    memory::*,
    Execution, IterationPolicy, Termination,
};
use rand::prelude::*;
use std::{cell::RefCell, fmt};

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// A 2-D input point and its current cluster assignment.
///
/// `cluster_id` is `None` (unassigned) until the first assignment step ran. Afterwards it is an index
/// into [`KMeansState::centroids`]. Only the assignment step ever changes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T: Primitive> {
    pub x: T,
    pub y: T,
    pub cluster_id: Option<usize>,
}
impl<T: Primitive> Point<T> {
    /// Create a new, unassigned point.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y, cluster_id: None }
    }
}
/// Renders as `Point (x, y) in Cluster c`, with the cluster displayed 1-indexed.
impl<T: Primitive> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cluster_id {
            Some(cid) => write!(f, "Point ({}, {}) in Cluster {}", self.x, self.y, cid + 1),
            None => write!(f, "Point ({}, {}) unassigned", self.x, self.y),
        }
    }
}

/// A cluster center. Its identity is its index within [`KMeansState::centroids`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centroid<T: Primitive> {
    pub x: T,
    pub y: T,
}
impl<T: Primitive> Centroid<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}
impl<T: Primitive> From<&Point<T>> for Centroid<T> {
    fn from(p: &Point<T>) -> Self {
        Self { x: p.x, y: p.y }
    }
}


/// This is a structure holding various configuration options for the a k-means calculations, such as
/// the random number generator to use, the iteration policy and execution strategy, or a couple of
/// callbacks, that can be set to get status information from a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current[`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// When the {assignment, update} loop stops
    pub(crate) iteration_policy: IterationPolicy,
    /// Whether steps run sequentially or on the rayon thread pool
    pub(crate) execution: Execution,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            iteration_policy: IterationPolicy::default(),
            execution: Execution::default(),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
    /// The iteration policy that runs with this configuration will use.
    pub fn iteration_policy(&self) -> IterationPolicy { self.iteration_policy }
    /// The execution strategy that runs with this configuration will use.
    pub fn execution(&self) -> Execution { self.execution }
}
impl<'a, T: Primitive> fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("iteration_policy", &self.iteration_policy)
            .field("execution", &self.execution)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the iteration policy. For more information, see documentation of [`IterationPolicy`].
    /// ## Default
    /// [`IterationPolicy::Converge`] `{ max_iter: 100 }`
    pub fn iteration_policy(mut self, iteration_policy: IterationPolicy) -> Self {
        self.config.iteration_policy = iteration_policy; self
    }
    /// Set the execution strategy. For more information, see documentation of [`Execution`].
    /// ## Default
    /// [`Execution::Sequential`]
    pub fn execution(mut self, execution: Execution) -> Self {
        self.config.execution = execution; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// Diagnostic record: a cluster received zero points in an update step and kept its previous centroid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DegenerateCluster {
    pub iteration: usize,
    pub cluster: usize,
}

/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable, and therefore allowing
/// it to be used in parallel, without having to duplicate the input-data.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of squared distances from all points to their assigned centroids
/// - **points**: The points, labelled with their cluster assignment
/// - **centroids**: Calculated cluster centers
/// - **centroid_frequency**: Amount of points in each cluster
/// - **iterations**: Amount of completed {assignment, update} iterations
/// - **policy**: The iteration policy that drove the calculation
/// - **termination**: Why the calculation stopped (`None` while still running)
/// - **degenerate_clusters**: Every (iteration, cluster) pair where a cluster had no members
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub points: Vec<Point<T>>,
    pub centroids: Vec<Centroid<T>>,
    pub centroid_frequency: Vec<usize>,
    pub iterations: usize,
    pub policy: IterationPolicy,
    pub termination: Option<Termination>,
    pub degenerate_clusters: Vec<DegenerateCluster>,
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(points: &[Point<T>], k: usize, policy: IterationPolicy) -> Self {
        Self {
            k,
            distsum: T::infinity(),
            points: points.iter().map(|p| Point::new(p.x, p.y)).collect(),
            centroids: Vec::with_capacity(k),
            centroid_frequency: vec![0usize; k],
            iterations: 0,
            policy,
            termination: None,
            degenerate_clusters: Vec::new(),
        }
    }

    /// Sum of squared distances from each point to its assigned centroid. Unassigned points are skipped.
    pub fn potential(&self) -> T {
        self.points.iter()
            .filter_map(|p| p.cluster_id.map(|cid| distance::squared_distance(p, &self.centroids[cid])))
            .sum()
    }

    /// Whether the run stopped because an assignment step changed nothing.
    pub fn converged(&self) -> bool {
        self.termination == Some(Termination::Converged)
    }

    /// Cluster assignment of every point, in input order.
    pub fn assignments(&self) -> Vec<Option<usize>> {
        self.points.iter().map(|p| p.cluster_id).collect()
    }

    /// All points currently assigned to cluster **cluster**.
    pub fn members(&self, cluster: usize) -> impl Iterator<Item = &Point<T>> + '_ {
        self.points.iter().filter(move |p| p.cluster_id == Some(cluster))
    }
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the points you want to operate on. The primitive type
/// of the passed points will be the type used internaly for all calculations, as well as the result
/// as stored in the returned [`KMeansState`] structure.
///
/// ## Supported variants
/// - k-Means clustering (Lloyd) [`KMeans::kmeans_lloyd`], sequential or data-parallel (see [`Execution`])
///
/// ## Supported initialization methods
/// - First-K [`KMeans::init_first_k`]
/// - Random-Sample [`KMeans::init_random_sample`]
/// - Precomputed [`KMeans::init_precomputed`]
#[derive(Clone, Debug)]
pub struct KMeans<T: Primitive> {
    pub(crate) points: Vec<Point<T>>,
}
impl<T: Primitive> KMeans<T> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **points**: The points to cluster. Existing `cluster_id`s are ignored, every run starts unassigned.
    ///
    /// ## Errors
    /// [`KMeansError::InvalidConfiguration`] if **points** is empty,
    /// [`KMeansError::NonFinitePoint`] if any coordinate is NaN or infinite.
    /// [`KMeansError::InvalidConfiguration`] if any coordinate magnitude exceeds `T::max_value() / (N + 1)`,
    /// where per-cluster sums or coordinate differences could overflow.
    pub fn new(points: Vec<Point<T>>) -> Result<Self> {
        if points.is_empty() {
            return Err(KMeansError::config("at least one point is required"));
        }
        if let Some(index) = points.iter().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(KMeansError::NonFinitePoint { index });
        }
        let limit = coordinate_limit::<T>(points.len());
        if let Some(index) = points.iter().position(|p| p.x.abs() > limit || p.y.abs() > limit) {
            return Err(KMeansError::config(format!(
                "point {} exceeds the coordinate magnitude limit {:e} for {} points", index, limit, points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Create a new instance from a raw vector of coordinates [row-major] = [x0, y0, x1, y1, ...]
    pub fn from_samples(samples: Vec<T>) -> Result<Self> {
        if samples.len() % 2 != 0 {
            return Err(KMeansError::config(format!(
                "samples must hold (x, y) pairs, got {} values", samples.len()
            )));
        }
        Self::new(samples.chunks_exact(2).map(|s| Point::new(s[0], s[1])).collect())
    }

    /// Amount of points.
    pub fn point_cnt(&self) -> usize { self.points.len() }

    /// The input points.
    pub fn points(&self) -> &[Point<T>] { &self.points }


    /// Lloyd's k-Means algorithm: alternately assign every point to its nearest centroid, and
    /// recompute every centroid as the mean of its points. When and how this stops, and whether the
    /// steps run in parallel, is controlled by **config**.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for (`1 <= k <= point count`)
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result).
    ///
    /// ## Errors
    /// [`KMeansError::InvalidConfiguration`] for an invalid **k** or iteration policy, or when **init** fails.
    /// Nothing is computed in that case.
    ///
    /// ## Example
    /// ```rust
    /// use kmeans2d::*;
    ///
    /// let points = vec![Point::new(1.0, 1.0), Point::new(1.5, 2.0), Point::new(5.0, 7.0), Point::new(4.5, 5.0)];
    /// let kmean = KMeans::new(points).unwrap();
    /// let result = kmean.kmeans_lloyd(2, KMeans::init_first_k, &KMeansConfig::default()).unwrap();
    ///
    /// for p in &result.points {
    ///     println!("{}", p);
    /// }
    /// println!("Centroids: {:?}", result.centroids);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        crate::variants::Lloyd::calculate(self, k, init, config)
    }

    /// First-K initialization method
    ///
    /// ## Description
    /// Copies the first k points as initial centroids.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_first_k(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> Result<()> {
        crate::inits::firstk::calculate(kmean, state, config)
    }

    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method selects k distinct points uniformly at random as initial centroids,
    /// using the configured random number generator.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_random_sample(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> Result<()> {
        crate::inits::randomsample::calculate(kmean, state, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Uses the given **centroids** as initial centroids. Their amount has to equal k.
    pub fn init_precomputed(centroids: Vec<Centroid<T>>)
            -> impl FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'_, T>) -> Result<()> {
        move |kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>| {
            crate::inits::precomputed::calculate(kmean, state, config, centroids)
        }
    }
}
