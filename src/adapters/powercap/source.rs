use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::ports::EnergySource;

/// Default powercap domain whose `energy_uj` file carries the package
/// energy counter.
pub const DEFAULT_ENERGY_PATH: &str =
    "/sys/class/powercap/intel-rapl/intel-rapl:1/intel-rapl:1:0/energy_uj";

#[derive(Debug, Error)]
pub enum EnergyReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Parse the content of an `energy_uj` file: one integer, possibly padded
/// with whitespace.
fn parse_energy(content: &str) -> Result<i64, EnergyReadError> {
    content
        .trim()
        .parse::<i64>()
        .map_err(|e| EnergyReadError::Parse(format!("invalid counter value: {}", e)))
}

/// Energy source backed by a powercap sysfs counter file
pub struct PowercapEnergySource {
    energy_path: PathBuf,
}

impl PowercapEnergySource {
    /// The path is injected so tests and container mounts can point the
    /// source at an alternate file; `DEFAULT_ENERGY_PATH` is the usual
    /// choice on bare metal.
    pub fn new(energy_path: impl Into<PathBuf>) -> Self {
        Self {
            energy_path: energy_path.into(),
        }
    }
}

#[async_trait]
impl EnergySource for PowercapEnergySource {
    async fn read_energy(&self) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
        let content = fs::read_to_string(&self.energy_path).map_err(EnergyReadError::Io)?;
        Ok(parse_energy(&content)?)
    }
}
