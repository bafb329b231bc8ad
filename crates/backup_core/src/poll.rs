use crate::StatusSnapshot;

/// Seconds between two status requests; also the unit the budget is spent in.
pub const POLL_INTERVAL_SECS: u64 = 5;

const TICKS_PER_MINUTE: u64 = 60 / POLL_INTERVAL_SECS;

/// Polling allowance, counted in poll intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutBudget {
    minutes: u64,
    ticks_left: u64,
    elapsed_ticks: u64,
    minutes_left: u64,
}

impl TimeoutBudget {
    pub fn from_minutes(minutes: u64) -> Self {
        Self {
            minutes,
            ticks_left: minutes.saturating_mul(TICKS_PER_MINUTE),
            elapsed_ticks: 0,
            minutes_left: minutes,
        }
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    /// Whole minutes left, recomputed once per elapsed minute.
    pub fn minutes_left(&self) -> u64 {
        self.minutes_left
    }

    pub fn ticks_left(&self) -> u64 {
        self.ticks_left
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ticks * POLL_INTERVAL_SECS
    }

    pub fn is_exhausted(&self) -> bool {
        self.ticks_left == 0
    }

    /// Spends one poll interval. No-op once exhausted.
    pub fn tick(&mut self) {
        if self.ticks_left == 0 {
            return;
        }
        self.ticks_left -= 1;
        self.elapsed_ticks += 1;
        if self.elapsed_ticks % TICKS_PER_MINUTE == 0 {
            self.minutes_left = self.minutes_left.saturating_sub(1);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    Polling,
    Complete { file_name: String },
    TimedOut,
    MalformedResponse { detail: String },
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Polling)
    }
}

/// Remote job monitor.
///
/// Stays in [`PollState::Polling`] while no `fileName` has been seen and the
/// budget is not exhausted. Completion wins over exhaustion when both hold at
/// the same observation. Terminal states never change again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollMachine {
    state: PollState,
    budget: TimeoutBudget,
}

impl PollMachine {
    pub fn new(budget: TimeoutBudget) -> Self {
        Self {
            state: PollState::Polling,
            budget,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn budget(&self) -> &TimeoutBudget {
        &self.budget
    }

    /// Applies one parsed status response.
    pub fn observe(&mut self, snapshot: &StatusSnapshot) -> &PollState {
        if self.state.is_terminal() {
            return &self.state;
        }
        self.state = match &snapshot.file_name {
            Some(file_name) => PollState::Complete {
                file_name: file_name.clone(),
            },
            None if self.budget.is_exhausted() => PollState::TimedOut,
            None => PollState::Polling,
        };
        &self.state
    }

    /// Applies a status response that could not be parsed.
    pub fn reject(&mut self, detail: impl Into<String>) -> &PollState {
        if !self.state.is_terminal() {
            self.state = PollState::MalformedResponse {
                detail: detail.into(),
            };
        }
        &self.state
    }

    /// Records that one poll interval has passed.
    pub fn tick(&mut self) {
        if !self.state.is_terminal() {
            self.budget.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_minute_is_twelve_ticks() {
        let mut budget = TimeoutBudget::from_minutes(1);
        assert_eq!(budget.ticks_left(), 12);
        for _ in 0..11 {
            budget.tick();
            assert_eq!(budget.minutes_left(), 1);
        }
        budget.tick();
        assert_eq!(budget.minutes_left(), 0);
        assert!(budget.is_exhausted());
        assert_eq!(budget.elapsed_secs(), 60);
    }

    #[test]
    fn tick_after_exhaustion_is_ignored() {
        let mut budget = TimeoutBudget::from_minutes(0);
        assert!(budget.is_exhausted());
        budget.tick();
        assert_eq!(budget.elapsed_ticks(), 0);
    }

    #[test]
    fn minutes_left_drops_once_per_minute() {
        let mut budget = TimeoutBudget::from_minutes(3);
        for _ in 0..24 {
            budget.tick();
        }
        assert_eq!(budget.minutes_left(), 1);
        assert_eq!(budget.ticks_left(), 12);
    }
}
