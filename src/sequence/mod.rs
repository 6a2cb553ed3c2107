//! Turn sequencing
//!
//! This module provides:
//! - **Navigator**: cyclic position over the resolved participant sequence
//! - **Timer**: pacing countdown owned by the navigator, reset on every move
//!
//! Presentation never mutates either directly. It sends [`Command`] values to
//! [`SequenceNavigator::dispatch`], which reports the results back through a
//! [`RenderSurface`](crate::surface::RenderSurface).

mod navigator;
mod timer;

#[cfg(test)]
mod navigator_tests;

pub use navigator::{Position, SequenceNavigator};
pub use timer::{Countdown, Severity, TICK_INTERVAL, TimerPhase, TurnTimer};

/// Requests accepted by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Advance,
    Retreat,
    StartTimer,
    PauseTimer,
    ResetTimer,
    /// Delivered by the surface's scheduler, tagged with the timer
    /// generation it was armed under
    Tick { generation: u64 },
}
