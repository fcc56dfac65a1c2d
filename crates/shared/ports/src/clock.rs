use herald_core::Tick;

/// Port for simulated time
///
/// Time is a discrete tick count. Implementations:
/// - A stepping clock driven by the simulation loop
/// - A fixed clock for deterministic tests
pub trait Clock: Send + Sync {
    /// Current tick according to this clock
    fn now(&self) -> Tick;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
