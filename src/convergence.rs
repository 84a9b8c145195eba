use crate::point::*;

/// States of a running k-means calculation.
///
/// A calculation starts in `Running(0)` and advances one round at a time, until it either reaches a
/// fixed point ([`Convergence::Converged`]) or runs into the iteration limit ([`Convergence::Exhausted`]).
/// Both terminal states are regular outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convergence {
	/// Number of completed rounds so far.
	Running(usize),
	/// The round, in which an assignment + update left all centroids unchanged (within [`Tolerance`]).
	Converged(usize),
	/// The iteration limit was reached without convergence. Contains the amount of completed rounds.
	Exhausted(usize)
}
impl Convergence {
	pub fn is_terminal(&self) -> bool {
		!matches!(self, Convergence::Running(_))
	}
	pub fn is_converged(&self) -> bool {
		matches!(self, Convergence::Converged(_))
	}
	/// Amount of rounds (assignment + update) that were executed.
	pub fn rounds(&self) -> usize {
		match *self {
			Convergence::Running(r) | Convergence::Converged(r) | Convergence::Exhausted(r) => r
		}
	}
}
impl Default for Convergence {
	fn default() -> Self { Convergence::Running(0) }
}


/// Tolerance used to decide whether two centroid sets are equal.
///
/// Two values `a` (previous) and `b` (new) are considered equal, when `|a - b| <= atol + rtol * |b|`.
/// ## Default
/// `rtol = 1e-5`, `atol = 1e-8`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance<T: Primitive> {
	pub rtol: T,
	pub atol: T
}
impl<T: Primitive> Default for Tolerance<T> {
	fn default() -> Self {
		Self {
			rtol: T::from(1e-5).unwrap_or_else(T::epsilon),
			atol: T::from(1e-8).unwrap_or_else(T::zero)
		}
	}
}
impl<T: Primitive> Tolerance<T> {
	pub fn is_close(&self, a: T, b: T) -> bool {
		(a - b).abs() <= self.atol + self.rtol * b.abs()
	}

	/// Compare two centroid sets coordinate-wise. Sets of differing length are never close.
	pub fn all_close(&self, previous: &[Point<T>], new: &[Point<T>]) -> bool {
		previous.len() == new.len() && previous.iter().zip(new.iter())
			.all(|(p, n)| self.is_close(p.x, n.x) && self.is_close(p.y, n.y))
	}
}
