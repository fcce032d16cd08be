use crate::{memory::*, Centroid, Point};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Largest coordinate magnitude for which the sum over **point_cnt** coordinates, and the difference of
/// any two coordinates, stays finite. One extra share of headroom absorbs rounding in the sums.
pub(crate) fn coordinate_limit<T: Primitive>(point_cnt: usize) -> T {
    T::max_value() / T::from(point_cnt + 1).unwrap_or_else(T::max_value)
}

/// Per-cluster reduction (`sum_x`, `sum_y`, `count`) used by the update step.
#[derive(Clone, Debug)]
pub(crate) struct ClusterSums<T: Primitive> {
    pub(crate) sum_x: Vec<T>,
    pub(crate) sum_y: Vec<T>,
    pub(crate) count: Vec<usize>,
}
impl<T: Primitive> ClusterSums<T> {
    pub(crate) fn new(k: usize) -> Self {
        Self { sum_x: vec![T::zero(); k], sum_y: vec![T::zero(); k], count: vec![0; k] }
    }

    /// Add a point to the accumulator of its cluster. Unassigned points are skipped.
    #[inline(always)]
    pub(crate) fn add(&mut self, p: &Point<T>) {
        if let Some(cid) = p.cluster_id {
            self.sum_x[cid] += p.x;
            self.sum_y[cid] += p.y;
            self.count[cid] += 1;
        }
    }

    /// Combine two partial reductions (e.g. from two rayon workers).
    pub(crate) fn merge(mut self, other: Self) -> Self {
        self.sum_x.iter_mut().zip(other.sum_x).for_each(|(a, b)| *a += b);
        self.sum_y.iter_mut().zip(other.sum_y).for_each(|(a, b)| *a += b);
        self.count.iter_mut().zip(other.count).for_each(|(a, b)| *a += b);
        self
    }

    /// Compute the new centroid store from the accumulated sums.
    ///
    /// Clusters without members keep their previous position.
    /// ## Returns
    /// The new centroids, and the ids of all clusters that had no members.
    pub(crate) fn finalize(&self, previous: &[Centroid<T>]) -> (Vec<Centroid<T>>, Vec<usize>) {
        debug_assert_eq!(previous.len(), self.count.len());
        let mut empty = Vec::new();
        let centroids = previous.iter().enumerate()
            .map(|(cid, prev)| match self.count[cid] {
                0 => {
                    empty.push(cid);
                    *prev
                }
                cnt => {
                    let cnt = T::from(cnt).unwrap();
                    Centroid::new(self.sum_x[cid] / cnt, self.sum_y[cid] / cnt)
                }
            })
            .collect();
        (centroids, empty)
    }
}


/// Global per-cluster accumulators, shared between all workers of one update step.
#[derive(Debug)]
pub(crate) struct AtomicClusterSums<T: Primitive> {
    sum_x: Vec<T::Atomic>,
    sum_y: Vec<T::Atomic>,
    count: Vec<AtomicUsize>,
}
impl<T: Primitive> AtomicClusterSums<T> {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            sum_x: (0..k).map(|_| T::new_atomic(T::zero())).collect(),
            sum_y: (0..k).map(|_| T::new_atomic(T::zero())).collect(),
            count: (0..k).map(|_| AtomicUsize::new(0)).collect(),
        }
    }

    #[inline(always)]
    pub(crate) fn add(&self, p: &Point<T>) {
        if let Some(cid) = p.cluster_id {
            T::atomic_add(&self.sum_x[cid], p.x);
            T::atomic_add(&self.sum_y[cid], p.y);
            self.count[cid].fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Consume the accumulators. Taking `self` by value requires all workers to be done.
    pub(crate) fn into_sums(self) -> ClusterSums<T> {
        ClusterSums {
            sum_x: self.sum_x.into_iter().map(T::atomic_into_inner).collect(),
            sum_y: self.sum_y.into_iter().map(T::atomic_into_inner).collect(),
            count: self.count.into_iter().map(AtomicUsize::into_inner).collect(),
        }
    }
}
