use super::Command;
use super::timer::{Countdown, TICK_INTERVAL, TimerPhase, TurnTimer};
use crate::assets::AssetReference;
use crate::surface::RenderSurface;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Unstarted,
    Viewing(usize),
}

/// Walks the resolved sequence in both directions, wrapping at either end.
#[derive(Debug, Clone)]
pub struct SequenceNavigator {
    sequence: Vec<AssetReference>,
    position: Position,
    timer: TurnTimer,
}

impl SequenceNavigator {
    pub fn new(sequence: Vec<AssetReference>, turn_duration: Countdown) -> Self {
        Self {
            sequence,
            position: Position::Unstarted,
            timer: TurnTimer::new(turn_duration),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    pub fn sequence(&self) -> &[AssetReference] {
        &self.sequence
    }

    pub fn current(&self) -> Option<&AssetReference> {
        match self.position {
            Position::Unstarted => None,
            Position::Viewing(idx) => self.sequence.get(idx),
        }
    }

    /// Move forward, wrapping from the last entry to the first.
    /// Resets the timer. Returns the new index, or `None` for an empty sequence.
    pub fn advance(&mut self) -> Option<usize> {
        let last = self.sequence.len().checked_sub(1)?;
        let next = match self.position {
            Position::Unstarted => 0,
            Position::Viewing(idx) if idx >= last => 0,
            Position::Viewing(idx) => idx + 1,
        };
        Some(self.move_to(next))
    }

    /// Move back, wrapping from the first entry to the last.
    /// No-op before the first `advance`.
    pub fn retreat(&mut self) -> Option<usize> {
        let last = self.sequence.len().checked_sub(1)?;
        let previous = match self.position {
            Position::Unstarted => return None,
            Position::Viewing(0) => last,
            Position::Viewing(idx) => idx - 1,
        };
        Some(self.move_to(previous))
    }

    fn move_to(&mut self, idx: usize) -> usize {
        self.position = Position::Viewing(idx);
        self.timer.reset();
        idx
    }

    /// Apply one command and report what changed to `surface`.
    pub fn dispatch<S: RenderSurface + ?Sized>(&mut self, command: Command, surface: &mut S) {
        match command {
            Command::Advance => {
                if self.advance().is_some() {
                    self.present(surface);
                }
            }
            Command::Retreat => {
                if self.retreat().is_some() {
                    self.present(surface);
                }
            }
            // timer controls only exist once a participant is on screen
            _ if self.position == Position::Unstarted => {
                tracing::debug!(?command, "ignoring timer command before first participant");
            }
            Command::StartTimer => {
                if self.timer.start() {
                    self.present_timer(surface);
                    surface.schedule_tick(TICK_INTERVAL, self.timer.generation());
                }
            }
            Command::PauseTimer => {
                if self.timer.pause() {
                    self.present_timer(surface);
                }
            }
            Command::ResetTimer => {
                self.timer.reset();
                self.present_timer(surface);
            }
            Command::Tick { generation } => {
                if !self.timer.accepts_tick(generation) {
                    return;
                }
                self.timer.tick();
                self.present_timer(surface);
                if self.timer.phase() == TimerPhase::Running {
                    surface.schedule_tick(TICK_INTERVAL, generation);
                }
            }
        }
    }

    fn present<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        if let Position::Viewing(idx) = self.position {
            tracing::debug!(idx, total = self.sequence.len(), "showing participant");
            surface.display(&self.sequence[idx], idx, self.sequence.len());
        }
        self.present_timer(surface);
    }

    fn present_timer<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.display_timer(self.timer.remaining(), self.timer.severity());
    }
}
