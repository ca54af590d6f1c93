pub mod powercap;
pub mod store;

pub use powercap::PowercapEnergySource;
pub use store::MemoryStore;
