//! Progress reporting seam for long-running matrix builds.
//!
//! The metrics core only sees the [`ProgressSink`] trait; reporting is
//! purely observational and never changes computed results. The no-op sink
//! is the default, so callers that don't care pay nothing.

use tracing::info;

/// Observer for long-running loops. Implementations must not influence the
/// computation they observe.
pub trait ProgressSink: Send + Sync {
    /// Called once before a loop with a human-readable label and the total
    /// number of steps.
    fn begin(&self, label: &str, total: usize);

    /// Called after each completed step.
    fn step(&self);

    /// Called once after the loop completes.
    fn finish(&self);
}

/// Silent sink; output-indistinguishable from not reporting at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn begin(&self, _label: &str, _total: usize) {}
    fn step(&self) {}
    fn finish(&self) {}
}

/// Sink that logs loop milestones through `tracing`.
#[derive(Debug, Default)]
pub struct LogProgress {
    state: std::sync::Mutex<LogState>,
}

#[derive(Debug, Default)]
struct LogState {
    label: String,
    total: usize,
    done: usize,
    last_reported_decile: usize,
}

impl LogProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for LogProgress {
    fn begin(&self, label: &str, total: usize) {
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.label = label.to_string();
        state.total = total;
        state.done = 0;
        state.last_reported_decile = 0;
        info!("{label}: starting ({total} steps)");
    }

    fn step(&self) {
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.done += 1;
        if state.total == 0 {
            return;
        }
        let decile = state.done * 10 / state.total;
        if decile > state.last_reported_decile {
            state.last_reported_decile = decile;
            info!(
                "{}: {}/{} ({}%)",
                state.label,
                state.done,
                state.total,
                decile * 10
            );
        }
    }

    fn finish(&self) {
        let state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        info!("{}: done", state.label);
    }
}

/// Pick a sink from a verbosity flag.
#[must_use]
pub fn sink_for_verbosity(verbose: bool) -> Box<dyn ProgressSink> {
    if verbose {
        Box::new(LogProgress::new())
    } else {
        Box::new(NoopProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_progress_is_silent() {
        let sink = NoopProgress;
        sink.begin("anything", 100);
        for _ in 0..100 {
            sink.step();
        }
        sink.finish();
    }

    #[test]
    fn test_log_progress_counts() {
        let sink = LogProgress::new();
        sink.begin("test loop", 4);
        for _ in 0..4 {
            sink.step();
        }
        sink.finish();
        let state = sink.state.lock().unwrap();
        assert_eq!(state.done, 4);
        assert_eq!(state.last_reported_decile, 10);
    }
}
