use std::collections::HashMap;

use crate::domain::Sample;

/// Port for recording and exporting per-endpoint samples
pub trait SampleStore: Send + Sync {
    /// Append a sample to the endpoint's retention window, evicting the
    /// oldest entries beyond the configured capacity. A sample whose
    /// timestamps are both zero is discarded. Safe for any number of
    /// concurrent callers; never fails.
    fn add(&self, endpoint: &str, sample: Sample);

    /// Copy the entire store contents at a single instant. The returned
    /// map is independent of the store: later `add` calls never show
    /// through it.
    fn snapshot(&self) -> HashMap<String, Vec<Sample>>;
}
