use crate::{
    accumulator::{AtomicClusterSums, ClusterSums},
    execution::{Reduction, StepExecutor},
    helpers, memory::*, Centroid, Point,
};
use rayon::prelude::*;

pub(crate) struct Parallel {
    pub(crate) reduction: Reduction,
}

impl<T: Primitive> StepExecutor<T> for Parallel {
    fn assign(&self, points: &mut [Point<T>], centroids: &[Centroid<T>]) -> usize {
        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        let work_packet_size = helpers::work_packet_size(points.len());
        points.par_iter_mut()
            .with_min_len(work_packet_size)
            .map(|p| super::assign_point(p, centroids) as usize)
            .sum()
    }

    fn accumulate(&self, points: &[Point<T>], k: usize) -> ClusterSums<T> {
        let work_packet_size = helpers::work_packet_size(points.len());
        match self.reduction {
            Reduction::Atomic => {
                let sums = AtomicClusterSums::new(k);
                points.par_iter()
                    .with_min_len(work_packet_size)
                    .for_each(|p| sums.add(p));
                sums.into_sums()
            }
            Reduction::PerThread => points.par_iter()
                .with_min_len(work_packet_size)
                .fold(|| ClusterSums::new(k), |mut sums, p| {
                    sums.add(p);
                    sums
                })
                .reduce(|| ClusterSums::new(k), ClusterSums::merge),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::Sequential;
    use rand::prelude::*;

    fn random_setup(seed: u64, point_cnt: usize, k: usize) -> (Vec<Point<f64>>, Vec<Centroid<f64>>) {
        let mut rnd = StdRng::seed_from_u64(seed);
        let points = (0..point_cnt)
            .map(|_| Point::new(rnd.gen_range(-50.0..50.0), rnd.gen_range(-50.0..50.0)))
            .collect();
        let centroids = (0..k)
            .map(|_| Centroid::new(rnd.gen_range(-50.0..50.0), rnd.gen_range(-50.0..50.0)))
            .collect();
        (points, centroids)
    }

    #[test] fn matches_sequential_atomic() { matches_sequential(Reduction::Atomic); }
    #[test] fn matches_sequential_per_thread() { matches_sequential(Reduction::PerThread); }

    fn matches_sequential(reduction: Reduction) {
        let (points, centroids) = random_setup(42, 10_000, 9);
        let parallel = Parallel { reduction };

        let mut seq_points = points.clone();
        let mut par_points = points;
        let seq_moved = Sequential.assign(&mut seq_points, &centroids);
        let par_moved = parallel.assign(&mut par_points, &centroids);

        // Labels are computed per point, so they have to be identical.
        assert_eq!(seq_moved, par_moved);
        assert_eq!(seq_points, par_points);

        let seq_sums = Sequential.accumulate(&seq_points, centroids.len());
        let par_sums = parallel.accumulate(&par_points, centroids.len());
        assert_eq!(seq_sums.count, par_sums.count);
        for cid in 0..centroids.len() {
            assert_approx_eq!(seq_sums.sum_x[cid], par_sums.sum_x[cid], 1e-6);
            assert_approx_eq!(seq_sums.sum_y[cid], par_sums.sum_y[cid], 1e-6);
        }

        let (seq_centroids, seq_empty) = seq_sums.finalize(&centroids);
        let (par_centroids, par_empty) = par_sums.finalize(&centroids);
        assert_eq!(seq_empty, par_empty);
        for (s, p) in seq_centroids.iter().zip(par_centroids.iter()) {
            assert_approx_eq!(s.x, p.x, 1e-9);
            assert_approx_eq!(s.y, p.y, 1e-9);
        }
    }

    #[test]
    fn reduction_is_global_across_points() {
        // Every point lands in cluster 0: the result has to be the mean over all of them,
        // not the coordinates of whichever point was written last.
        let mut points: Vec<Point<f64>> = (0..1000).map(|i| Point::new(i as f64, 1.0)).collect();
        let centroids = [Centroid::new(0.0, 0.0), Centroid::new(1e9, 1e9)];
        for reduction in [Reduction::Atomic, Reduction::PerThread] {
            let parallel = Parallel { reduction };
            parallel.assign(&mut points, &centroids);
            let (new_centroids, empty) = parallel.accumulate(&points, 2).finalize(&centroids);
            assert_eq!(new_centroids[0], Centroid::new(499.5, 1.0));
            assert_eq!(new_centroids[1], centroids[1]);
            assert_eq!(empty, vec![1]);
        }
    }
}
