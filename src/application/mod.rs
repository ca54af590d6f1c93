mod metering;

pub use metering::{MeasurementStart, MeteringError, MeteringService};
