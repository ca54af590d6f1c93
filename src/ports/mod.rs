pub mod energy_source;
pub mod sample_store;

pub use energy_source::EnergySource;
pub use sample_store::SampleStore;
