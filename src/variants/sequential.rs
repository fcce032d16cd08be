use crate::{accumulator::ClusterSums, execution::StepExecutor, memory::*, Centroid, Point};

pub(crate) struct Sequential;

impl<T: Primitive> StepExecutor<T> for Sequential {
    fn assign(&self, points: &mut [Point<T>], centroids: &[Centroid<T>]) -> usize {
        let mut moved = 0;
        for p in points.iter_mut() {
            if super::assign_point(p, centroids) {
                moved += 1;
            }
        }
        moved
    }

    fn accumulate(&self, points: &[Point<T>], k: usize) -> ClusterSums<T> {
        let mut sums = ClusterSums::new(k);
        points.iter().for_each(|p| sums.add(p));
        sums
    }
}
