use crate::{accumulator::ClusterSums, memory::*, variants, Centroid, Point};

/// How the per-cluster sums of the update step are combined in [`Execution::Parallel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reduction {
    /// All workers add into K shared accumulators (`sum_x`, `sum_y`, `count`) using atomics.
    /// Contended whenever multiple points of the same cluster are processed at the same time.
    Atomic,
    /// Every worker accumulates into a private set of K accumulators, which are merged afterwards.
    /// Free of contention, preferable for larger K.
    PerThread,
}

/// Scheduling model used for the assignment and update steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Execution {
    /// Single thread of control, both steps run as plain loops. Deterministic.
    Sequential,
    /// Data-parallel steps on the rayon thread pool.
    /// The assignment step reads a shared snapshot of the centroids and each task writes only the
    /// label of its own point. The update step reduces the labelled points using **reduction**.
    Parallel { reduction: Reduction },
}
impl Default for Execution {
    fn default() -> Self {
        Execution::Sequential
    }
}
impl Execution {
    pub(crate) fn create_executor<T: Primitive>(&self) -> Box<dyn StepExecutor<T>> {
        match *self {
            Execution::Sequential => Box::new(variants::Sequential),
            Execution::Parallel { reduction } => Box::new(variants::Parallel { reduction }),
        }
    }
}

pub(crate) trait StepExecutor<T: Primitive> {
    /// Assignment step. Sets every point's `cluster_id` to the index of its nearest centroid.
    /// All labels are written when this returns.
    /// ## Returns
    /// The amount of points whose `cluster_id` changed (`> 0` means "changed").
    fn assign(&self, points: &mut [Point<T>], centroids: &[Centroid<T>]) -> usize;

    /// First half of the update step: reduce the points into per-cluster sums and counts.
    /// All points have been read when this returns.
    fn accumulate(&self, points: &[Point<T>], k: usize) -> ClusterSums<T>;
}
