mod lloyd;
mod parallel;
mod sequential;

pub(crate) use lloyd::Lloyd;
pub(crate) use parallel::Parallel;
pub(crate) use sequential::Sequential;

use crate::{distance, memory::*, Centroid, Point};

/// Label **p** with its nearest centroid. Returns whether the label changed.
#[inline(always)]
pub(crate) fn assign_point<T: Primitive>(p: &mut Point<T>, centroids: &[Centroid<T>]) -> bool {
    let (best_idx, _) = distance::nearest_centroid(p, centroids);
    let changed = p.cluster_id != Some(best_idx);
    p.cluster_id = Some(best_idx);
    changed
}
