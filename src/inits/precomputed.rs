use crate::point::*;
use crate::{KMeans, KMeansConfig, KMeansError, KMeansState, Result};

#[inline(always)]
pub fn calculate<T: Primitive>(
    _kmean: &KMeans<T>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>, computed: Vec<Point<T>>,
) -> Result<()> {
    if computed.len() != state.k {
        return Err(KMeansError::CentroidCountMismatch { expected: state.k, actual: computed.len() });
    }
    if let Some(index) = computed.iter().position(|c| !c.is_finite()) {
        return Err(KMeansError::NonFiniteCentroid { index });
    }
    state.centroids = computed;
    Ok(())
}
