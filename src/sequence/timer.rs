//! Turn timer (pacing countdown)
//!
//! # Lifecycle
//!
//! 1. Created `Paused` at the configured duration
//! 2. `start` → `Running`; the surface delivers one tick per second
//! 3. Reaching 00:00 → `Expired` and ticking stops; only `reset` leaves it
//!
//! Every start, pause and reset bumps the generation. Ticks scheduled under
//! an older generation are dropped, so a pause/start pair inside one second
//! never leaves two tick chains running.

use std::fmt;
use std::time::Duration;

/// Delay between ticks while running
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

const CRITICAL_SECS: u32 = 10;
const WARNING_SECS: u32 = 30;

/// Minutes and seconds remaining. Seconds may exceed 59 when configured so.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    pub mins: u32,
    pub secs: u32,
}

impl Countdown {
    pub fn new(mins: u32, secs: u32) -> Self {
        Self { mins, secs }
    }

    pub fn is_zero(&self) -> bool {
        self.mins == 0 && self.secs == 0
    }

    fn decrement(&mut self) {
        if self.secs == 0 {
            if self.mins > 0 {
                self.mins -= 1;
                self.secs = 59;
            }
        } else {
            self.secs -= 1;
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.mins, self.secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Paused,
    Running,
    Expired,
}

/// Display-only classification of the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
    Expired,
}

#[derive(Debug, Clone)]
pub struct TurnTimer {
    configured: Countdown,
    remaining: Countdown,
    phase: TimerPhase,
    generation: u64,
}

impl TurnTimer {
    pub fn new(configured: Countdown) -> Self {
        Self {
            configured,
            remaining: configured,
            phase: TimerPhase::Paused,
            generation: 0,
        }
    }

    pub fn configured(&self) -> Countdown {
        self.configured
    }

    pub fn remaining(&self) -> Countdown {
        self.remaining
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Paused → Running. Returns false (no-op) from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != TimerPhase::Paused {
            return false;
        }
        self.phase = TimerPhase::Running;
        self.generation += 1;
        true
    }

    /// Running → Paused. Returns false (no-op) from any other phase.
    pub fn pause(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.phase = TimerPhase::Paused;
        self.generation += 1;
        true
    }

    pub fn reset(&mut self) {
        self.remaining = self.configured;
        self.phase = TimerPhase::Paused;
        self.generation += 1;
    }

    /// Whether a tick scheduled under `generation` should still be applied.
    pub fn accepts_tick(&self, generation: u64) -> bool {
        self.phase == TimerPhase::Running && generation == self.generation
    }

    /// Count down one second. Only has an effect while running.
    ///
    /// Returns true when the state changed.
    pub fn tick(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.remaining.decrement();
        if self.remaining.is_zero() {
            self.phase = TimerPhase::Expired;
        }
        true
    }

    pub fn severity(&self) -> Severity {
        if self.phase == TimerPhase::Expired {
            return Severity::Expired;
        }
        match self.remaining {
            Countdown { mins: 0, secs } if secs <= CRITICAL_SECS => Severity::Critical,
            Countdown { mins: 0, secs } if secs <= WARNING_SECS => Severity::Warning,
            _ => Severity::Normal,
        }
    }
}
