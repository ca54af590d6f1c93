use async_trait::async_trait;

/// Port for reading a monotonically accumulating energy counter
#[async_trait]
pub trait EnergySource: Send + Sync {
    /// Read the counter's current value in raw units (microjoules on
    /// powercap hardware). Fails when the counter is unreadable; callers
    /// treat every failure the same way.
    async fn read_energy(&self) -> Result<i64, Box<dyn std::error::Error + Send + Sync>>;
}
