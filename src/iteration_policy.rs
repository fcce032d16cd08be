use crate::error::{KMeansError, Result};

/// Enum with the possible iteration policies.
/// These policies specify when the {assignment, update} loop of a running k-means calculation ends.
/// Exactly one policy is active per run; it is reported back in [`crate::KMeansState::policy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterationPolicy {
	/// This policy stops the calculation after the first iteration whose assignment step did not
	/// change the cluster of any point (a fixed point was reached).
	/// ## Fields:
	/// - **max_iter**: Safety cap. When reached without convergence, the run ends with
	/// [`Termination::IterationCap`] and the (possibly non-converged) current state.
	Converge { max_iter: usize },
	/// This policy runs exactly **iterations** iterations, regardless of convergence.
	/// ## Fields:
	/// - **iterations**: The amount of iterations to run
	Fixed { iterations: usize },
}
impl Default for IterationPolicy {
	fn default() -> Self {
		IterationPolicy::Converge { max_iter: 100 }
	}
}
impl IterationPolicy {
	pub(crate) fn validate(&self) -> Result<()> {
		match *self {
			IterationPolicy::Converge { max_iter: 0 } =>
				Err(KMeansError::config("max_iter of the converge policy must be greater than zero")),
			IterationPolicy::Fixed { iterations: 0 } =>
				Err(KMeansError::config("iterations of the fixed policy must be greater than zero")),
			_ => Ok(()),
		}
	}

	pub(crate) fn create_logic(&self) -> Box<dyn IterationPolicyLogic> {
		match *self {
			IterationPolicy::Converge { max_iter } => Box::new(ConvergeLogic { max_iter, iteration: 0 }),
			IterationPolicy::Fixed { iterations } => Box::new(FixedLogic { iterations, iteration: 0 }),
		}
	}
}

/// Reason a k-means run stopped iterating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
	/// An assignment step changed no cluster assignment.
	Converged,
	/// [`IterationPolicy::Converge`] reached its `max_iter` cap before converging.
	IterationCap,
	/// [`IterationPolicy::Fixed`] ran all of its iterations.
	BudgetExhausted,
}

pub(crate) trait IterationPolicyLogic {
	/// Function that has to be called once an iteration of the calculation ended.
	/// ## Arguments
	/// - **moved**: The amount of points whose cluster assignment changed in this iteration
	/// ## Returns
	/// - **None** if the calculation should continue
	/// - **Some(termination)** if the calculation should stop
	fn next(&mut self, moved: usize) -> Option<Termination>;
}


pub(crate) struct ConvergeLogic {
	max_iter: usize,
	iteration: usize,
}
impl IterationPolicyLogic for ConvergeLogic {
	fn next(&mut self, moved: usize) -> Option<Termination> {
		self.iteration += 1;
		if moved == 0 {
			Some(Termination::Converged)
		} else if self.iteration >= self.max_iter {
			Some(Termination::IterationCap)
		} else {
			None
		}
	}
}


pub(crate) struct FixedLogic {
	iterations: usize,
	iteration: usize,
}
impl IterationPolicyLogic for FixedLogic {
	fn next(&mut self, _moved: usize) -> Option<Termination> {
		self.iteration += 1;
		if self.iteration >= self.iterations {
			Some(Termination::BudgetExhausted)
		} else {
			None
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn converge_stops_on_first_stable_iteration() {
		let mut logic = IterationPolicy::Converge { max_iter: 10 }.create_logic();
		assert_eq!(logic.next(7), None);
		assert_eq!(logic.next(2), None);
		assert_eq!(logic.next(0), Some(Termination::Converged));
	}

	#[test]
	fn converge_respects_cap() {
		let mut logic = IterationPolicy::Converge { max_iter: 3 }.create_logic();
		assert_eq!(logic.next(1), None);
		assert_eq!(logic.next(1), None);
		assert_eq!(logic.next(1), Some(Termination::IterationCap));
	}

	#[test]
	fn convergence_wins_over_cap() {
		let mut logic = IterationPolicy::Converge { max_iter: 1 }.create_logic();
		assert_eq!(logic.next(0), Some(Termination::Converged));
	}

	#[test]
	fn fixed_ignores_convergence() {
		let mut logic = IterationPolicy::Fixed { iterations: 3 }.create_logic();
		assert_eq!(logic.next(0), None);
		assert_eq!(logic.next(0), None);
		assert_eq!(logic.next(5), Some(Termination::BudgetExhausted));
	}

	#[test]
	fn zero_budgets_are_rejected() {
		assert!(IterationPolicy::Converge { max_iter: 0 }.validate().is_err());
		assert!(IterationPolicy::Fixed { iterations: 0 }.validate().is_err());
		assert!(IterationPolicy::Fixed { iterations: 5 }.validate().is_ok());
		assert!(IterationPolicy::default().validate().is_ok());
	}
}
