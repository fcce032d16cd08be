/// Minimum amount of items per rayon job, so that every worker gets one contiguous work-packet.
pub(crate) fn work_packet_size(item_cnt: usize) -> usize {
    (item_cnt / rayon::current_num_threads()).max(1)
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use crate::Point;

	/// The seven points of the classic two-cluster example.
	pub fn sample_points() -> Vec<Point<f64>> {
		[(1.0, 1.0), (1.5, 2.0), (3.0, 4.0), (5.0, 7.0), (3.5, 5.0), (4.5, 5.0), (3.5, 4.5)]
			.iter()
			.map(|&(x, y)| Point::new(x, y))
			.collect()
	}
}


#[cfg(test)]
mod tests {
	#[test]
	fn work_packet_size_is_never_zero() {
		assert_eq!(super::work_packet_size(0), 1);
		assert!(super::work_packet_size(1) >= 1);
		assert_eq!(super::work_packet_size(rayon::current_num_threads() * 10), 10);
	}
}
