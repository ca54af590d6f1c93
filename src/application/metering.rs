use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Sample;
use crate::ports::{EnergySource, SampleStore};

#[derive(Debug, Error)]
pub enum MeteringError {
    /// The query surface distinguishes a metering subsystem that was never
    /// wired up from one that simply has no samples yet.
    #[error("metrics not initialized")]
    NotInitialized,
}

/// Start-of-operation readings, captured by the caller before the measured
/// work runs and handed back in when it completes.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementStart {
    pub start_ns: i64,
    pub energy_start: i64,
}

/// Main application service for recording endpoint measurements.
///
/// Recording is best effort: a failed counter read degrades to a zero
/// reading and nothing here ever surfaces an error to the instrumented
/// caller. The store is optional so a host can run with recording
/// disabled; only `snapshot` reports that state.
pub struct MeteringService {
    store: Option<Arc<dyn SampleStore>>,
    energy_source: Arc<dyn EnergySource>,
}

impl MeteringService {
    pub fn new(energy_source: Arc<dyn EnergySource>) -> Self {
        Self {
            store: None,
            energy_source,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn SampleStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Capture the start of a measurement: current wall clock plus the
    /// energy counter. A failed read logs and substitutes zero.
    pub async fn start_measurement(&self) -> MeasurementStart {
        let start_ns = now_ns();
        let energy_start = match self.energy_source.read_energy().await {
            Ok(value) => value,
            Err(e) => {
                warn!("energy read at start failed: {}", e);
                0
            }
        };

        MeasurementStart {
            start_ns,
            energy_start,
        }
    }

    /// Complete a measurement begun by the caller: read the counter again,
    /// stamp the end time and append the sample to the endpoint's window.
    pub async fn record_metrics(&self, endpoint: &str, start_ns: i64, energy_at_start: i64) {
        let store = match &self.store {
            Some(store) => store,
            None => {
                debug!("sample for {} dropped, recording disabled", endpoint);
                return;
            }
        };

        let energy_end = match self.energy_source.read_energy().await {
            Ok(value) => value,
            Err(e) => {
                warn!("energy read at end failed for {}: {}", endpoint, e);
                0
            }
        };

        store.add(
            endpoint,
            Sample::new(start_ns, now_ns(), energy_at_start, energy_end),
        );
    }

    /// Copy the full store contents for export. `NotInitialized` is the
    /// only error that ever crosses this boundary; an initialized but
    /// empty store yields an empty map.
    pub fn snapshot(&self) -> Result<HashMap<String, Vec<Sample>>, MeteringError> {
        match &self.store {
            Some(store) => Ok(store.snapshot()),
            None => Err(MeteringError::NotInitialized),
        }
    }
}

/// Wall-clock nanoseconds since the Unix epoch; zero if the clock falls
/// outside chrono's representable range.
fn now_ns() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
}
