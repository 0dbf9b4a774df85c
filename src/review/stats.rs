use crate::{
    core::PinlianError,
    storage::PhraseStore,
};

/// Snapshot of the response-time population, freshly recomputed from the
/// store on every read. `mean` and `stddev` are NaN while no answers exist.
#[derive(Debug, Clone, Copy)]
pub struct ResponseStats {
    pub count: usize,
    pub mean: f64,
    pub stddev: f64,
}

impl ResponseStats {
    pub fn read<S: PhraseStore + ?Sized>(store: &S) -> Result<Self, PinlianError> {
        let count = store.response_time_count()?;
        let mean = store.response_time_mean()?;
        let variance = store.response_time_variance()?;

        Ok(Self { count, mean, stddev: variance.sqrt() })
    }
}
