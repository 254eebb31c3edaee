use std::time::{Duration, Instant};

use crate::errors::{PathPlannerError, PlannerResult};


/// Optional bounds on a single search
/// Frontier growth is unbounded on dense graphs, these turn a runaway search into an error
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SearchLimits {
    pub max_expansions: Option<usize>, // frontier pops allowed
    pub deadline: Option<Duration>, // wall clock budget from the start of the search
}

impl SearchLimits {

    /// No limits
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}


/// Counts expansions and watches the clock
/// The clock is read on the first expansion and then once every 64
#[derive(Debug)]
pub(crate) struct LimitMonitor {
    limits: SearchLimits,
    started: Instant,
    expansions: usize,
}

impl LimitMonitor {

    const CLOCK_CHECK_MASK: usize = 0x3F;

    pub fn start(limits: SearchLimits) -> Self {
        Self {
            limits,
            started: Instant::now(),
            expansions: 0,
        }
    }

    /// Called for every frontier pop
    pub fn on_expansion(&mut self) -> PlannerResult<()> {
        if let Some(max) = self.limits.max_expansions {
            if self.expansions >= max {
                return Err(PathPlannerError::ExpansionLimit(max));
            }
        }

        if let Some(deadline) = self.limits.deadline {
            if self.expansions & Self::CLOCK_CHECK_MASK == 0 && self.started.elapsed() >= deadline {
                return Err(PathPlannerError::DeadlineExceeded(deadline));
            }
        }

        self.expansions += 1;
        Ok(())
    }

    pub fn expansions(&self) -> usize {
        self.expansions
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_monitor() {
        let mut monitor = LimitMonitor::start(SearchLimits::none());
        for _ in 0..1000 {
            monitor.on_expansion().unwrap();
        }
        assert_eq!(monitor.expansions(), 1000);
    }

    #[test]
    fn test_expansion_budget() {
        let mut monitor = LimitMonitor::start(SearchLimits::none().with_max_expansions(3));
        for _ in 0..3 {
            monitor.on_expansion().unwrap();
        }
        assert!(matches!(monitor.on_expansion(), Err(PathPlannerError::ExpansionLimit(3))));
    }

    #[test]
    fn test_zero_deadline_fails_on_first_expansion() {
        let mut monitor = LimitMonitor::start(SearchLimits::none().with_deadline(Duration::ZERO));
        assert!(matches!(monitor.on_expansion(), Err(PathPlannerError::DeadlineExceeded(_))));
    }

    #[test]
    fn test_generous_deadline() {
        let limits = SearchLimits::none()
            .with_deadline(Duration::from_secs(3600))
            .with_max_expansions(10);
        let mut monitor = LimitMonitor::start(limits);
        for _ in 0..10 {
            monitor.on_expansion().unwrap();
        }
    }
}
