mod source;

pub use source::{EnergyReadError, PowercapEnergySource, DEFAULT_ENERGY_PATH};
