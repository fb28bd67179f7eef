use std::collections::BTreeMap;
use std::time::Duration;
use std::time::Instant;

/// Coarse phases of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Io,
    Compute,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io => write!(f, "IO"),
            Self::Compute => write!(f, "Compute"),
        }
    }
}

type Key = (Phase, Option<&'static str>);

/// Wall-clock accumulator over phases and labelled sub-phases.
///
/// At most one (sub-)phase runs at a time. Switching stops the
/// running one and charges its elapsed time to both the sub-phase
/// and its parent phase.
#[derive(Debug, Default)]
pub struct Timers {
    running: Option<(Key, Instant)>,
    totals: BTreeMap<Key, Duration>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn switch(&mut self, phase: Phase) {
        self.start((phase, None));
    }
    pub fn switch_sub(&mut self, phase: Phase, label: &'static str) {
        self.start((phase, Some(label)));
    }
    /// stop whatever is running
    pub fn stop(&mut self) {
        if let Some(((phase, label), begin)) = self.running.take() {
            let elapsed = begin.elapsed();
            *self.totals.entry((phase, None)).or_default() += elapsed;
            if label.is_some() {
                *self.totals.entry((phase, label)).or_default() += elapsed;
            }
        }
    }
    pub fn total(&self, phase: Phase) -> Duration {
        self.totals.get(&(phase, None)).copied().unwrap_or_default()
    }
    pub fn sub(&self, phase: Phase, label: &'static str) -> Duration {
        self.totals
            .get(&(phase, Some(label)))
            .copied()
            .unwrap_or_default()
    }
    pub fn report(&mut self) {
        self.stop();
        for (&(phase, label), elapsed) in self.totals.iter() {
            match label {
                None => log::info!("{:<32}{:>12.6}s", phase.to_string(), elapsed.as_secs_f64()),
                Some(label) => log::info!("  - {:<28}{:>12.6}s", label, elapsed.as_secs_f64()),
            }
        }
    }

    fn start(&mut self, key: Key) {
        self.stop();
        self.running = Some((key, Instant::now()));
    }
}
