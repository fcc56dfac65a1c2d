use herald_core::Tick;
use herald_ports::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Stepping clock for a bounded simulation run
///
/// Time only advances when explicitly moved, so every run is deterministic.
/// The range `start..=horizon` is inclusive at both ends.
#[derive(Debug)]
pub struct SimulationClock {
    start: Tick,
    horizon: Tick,
    current: AtomicI64,
}

impl SimulationClock {
    pub fn new(start: Tick, horizon: Tick) -> Self {
        Self {
            start,
            horizon,
            current: AtomicI64::new(start),
        }
    }

    pub fn start(&self) -> Tick {
        self.start
    }

    pub fn horizon(&self) -> Tick {
        self.horizon
    }

    /// Move the clock to `tick`. Moving backwards is ignored.
    pub fn advance_to(&self, tick: Tick) {
        let previous = self.current.fetch_max(tick, Ordering::SeqCst);
        if tick < previous {
            log::debug!("Clock asked to move back from {} to {}, ignored", previous, tick);
        }
    }

    /// Every tick of the run, start to horizon inclusive
    ///
    /// The clock is advanced as the iterator is consumed, so [`Clock::now`]
    /// reports the tick most recently yielded.
    pub fn ticks(&self) -> impl Iterator<Item = Tick> + '_ {
        (self.start..=self.horizon).inspect(|tick| self.advance_to(*tick))
    }
}

impl Clock for SimulationClock {
    fn now(&self) -> Tick {
        self.current.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "SimulationClock"
    }
}
