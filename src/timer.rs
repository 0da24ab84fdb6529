use tokio::time::Instant;

/// A clock measuring probe durations.
pub trait Timer: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// A wall-clock timer.
#[derive(Debug, Default)]
pub struct ClockTimer {}

impl ClockTimer {
    /// Creates a timer.
    pub const fn new() -> Self {
        Self {}
    }
}

impl Timer for ClockTimer {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub use self::stub::StubTimer;
