//! Wall-clock time spent in each phase of a scan

use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct PhaseTiming {
    pub name: &'static str,
    #[serde(rename = "millis", serialize_with = "as_millis")]
    pub duration: Duration,
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

/// Phases in the order they ran
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ScanTimings {
    phases: Vec<PhaseTiming>,
}

impl ScanTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` and records how long it took under `name`.
    pub fn time<T>(&mut self, name: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        let duration = start.elapsed();

        debug!(phase = name, ms = duration.as_secs_f64() * 1000.0, "Phase finished");
        self.phases.push(PhaseTiming { name, duration });
        value
    }

    pub fn get_phase(&self, name: &str) -> Option<Duration> {
        self.phases
            .iter()
            .find(|phase| phase.name == name)
            .map(|phase| phase.duration)
    }

    pub fn phases(&self) -> &[PhaseTiming] {
        &self.phases
    }

    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|phase| phase.duration).sum()
    }
}
