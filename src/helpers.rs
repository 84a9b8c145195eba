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

/// Letter used to label the centroid of cluster **k**, wrapping after `J`.
pub(crate) fn centroid_glyph(k: usize) -> char {
	(b'A' + (k % 10) as u8) as char
}

/// Digit used to mark a sample assigned to cluster **k**, wrapping after `9`.
pub(crate) fn sample_glyph(k: usize) -> char {
	(b'0' + (k % 10) as u8) as char
}
