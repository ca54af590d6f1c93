use serde::{Deserialize, Serialize};

/// One recorded measurement: the wall-clock start/end of an operation plus
/// the energy counter readings taken at each end.
///
/// Timestamps are nanoseconds since the Unix epoch; energy readings are raw
/// counter units (microjoules on powercap hardware). The serialized field
/// names are the export contract: consumers key on `start`, `end`,
/// `energy_start` and `energy_end` in the snapshot JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub start: i64,
    pub end: i64,
    pub energy_start: i64,
    pub energy_end: i64,
}

impl Sample {
    pub fn new(start: i64, end: i64, energy_start: i64, energy_end: i64) -> Self {
        Self {
            start,
            end,
            energy_start,
            energy_end,
        }
    }

    /// True when both timestamps are zero: the caller measured nothing and
    /// the sample must not be stored.
    pub fn is_zero(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}
