//! Tests for SequenceNavigator command handling
//!
//! Verifies wrap-around navigation, timer resets on every move, and what
//! gets reported to the surface.

use proptest::prelude::*;
use std::time::Duration;

use super::{Command, Countdown, Position, SequenceNavigator, Severity, TimerPhase};
use crate::assets::AssetReference;
use crate::surface::RenderSurface;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Display { name: String, index: usize, total: usize },
    Timer(Countdown, Severity),
    Scheduled { delay: Duration, generation: u64 },
}

/// Surface that records every call for inspection
#[derive(Default)]
struct RecordingSurface {
    events: Vec<Event>,
}

impl RecordingSurface {
    fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn scheduled(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Scheduled { generation, .. } => Some(*generation),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn display(&mut self, asset: &AssetReference, index: usize, total: usize) {
        self.events.push(Event::Display {
            name: asset.display_name(),
            index,
            total,
        });
    }

    fn display_timer(&mut self, remaining: Countdown, severity: Severity) {
        self.events.push(Event::Timer(remaining, severity));
    }

    fn schedule_tick(&mut self, delay: Duration, generation: u64) {
        self.events.push(Event::Scheduled { delay, generation });
    }
}

fn make_navigator(names: &[&str], duration: Countdown) -> SequenceNavigator {
    let sequence = names
        .iter()
        .map(|n| AssetReference::Placeholder(n.to_string()))
        .collect();
    SequenceNavigator::new(sequence, duration)
}

fn three() -> SequenceNavigator {
    make_navigator(&["Hero", "Wolf", "Goblin"], Countdown::new(1, 30))
}

#[test]
fn test_advance_from_unstarted_shows_first() {
    let mut nav = three();
    let mut surface = RecordingSurface::default();
    assert_eq!(nav.position(), Position::Unstarted);
    assert!(nav.current().is_none());

    nav.dispatch(Command::Advance, &mut surface);

    assert_eq!(nav.position(), Position::Viewing(0));
    assert_eq!(
        surface.take(),
        vec![
            Event::Display { name: "Hero".to_string(), index: 0, total: 3 },
            Event::Timer(Countdown::new(1, 30), Severity::Normal),
        ]
    );
}

#[test]
fn test_advance_wraps_to_first() {
    let mut nav = three();
    for _ in 0..3 {
        nav.advance();
    }
    assert_eq!(nav.position(), Position::Viewing(2));
    nav.advance();
    assert_eq!(nav.position(), Position::Viewing(0));
}

#[test]
fn test_retreat_wraps_to_last() {
    let mut nav = three();
    nav.advance();
    assert_eq!(nav.retreat(), Some(2));
    assert_eq!(nav.current(), Some(&AssetReference::Placeholder("Goblin".to_string())));
    assert_eq!(nav.retreat(), Some(1));
}

#[test]
fn test_retreat_before_start_is_noop() {
    let mut nav = three();
    let mut surface = RecordingSurface::default();
    nav.dispatch(Command::Retreat, &mut surface);
    assert_eq!(nav.position(), Position::Unstarted);
    assert!(surface.take().is_empty());
}

#[test]
fn test_empty_sequence_never_starts() {
    let mut nav = make_navigator(&[], Countdown::new(0, 10));
    let mut surface = RecordingSurface::default();
    nav.dispatch(Command::Advance, &mut surface);
    nav.dispatch(Command::Retreat, &mut surface);
    assert_eq!(nav.position(), Position::Unstarted);
    assert!(surface.take().is_empty());
}

#[test]
fn test_single_entry_wraps_onto_itself() {
    let mut nav = make_navigator(&["Lich"], Countdown::new(0, 10));
    assert_eq!(nav.advance(), Some(0));
    assert_eq!(nav.advance(), Some(0));
    assert_eq!(nav.retreat(), Some(0));
}

#[test]
fn test_timer_commands_ignored_before_start() {
    let mut nav = three();
    let mut surface = RecordingSurface::default();
    nav.dispatch(Command::StartTimer, &mut surface);
    nav.dispatch(Command::ResetTimer, &mut surface);
    assert_eq!(nav.timer().phase(), TimerPhase::Paused);
    assert!(surface.take().is_empty());
}

#[test]
fn test_start_arms_tick_with_generation() {
    let mut nav = three();
    let mut surface = RecordingSurface::default();
    nav.dispatch(Command::Advance, &mut surface);
    surface.take();

    nav.dispatch(Command::StartTimer, &mut surface);
    let generation = nav.timer().generation();
    assert_eq!(
        surface.take(),
        vec![
            Event::Timer(Countdown::new(1, 30), Severity::Normal),
            Event::Scheduled { delay: Duration::from_secs(1), generation },
        ]
    );

    // second start is a no-op and arms nothing
    nav.dispatch(Command::StartTimer, &mut surface);
    assert!(surface.take().is_empty());
}

#[test]
fn test_tick_rearms_while_running() {
    let mut nav = three();
    let mut surface = RecordingSurface::default();
    nav.dispatch(Command::Advance, &mut surface);
    nav.dispatch(Command::StartTimer, &mut surface);
    let generation = nav.timer().generation();
    surface.take();

    nav.dispatch(Command::Tick { generation }, &mut surface);
    assert_eq!(nav.timer().remaining(), Countdown::new(1, 29));
    assert_eq!(surface.scheduled(), vec![generation]);
}

#[test]
fn test_stale_tick_after_pause_is_dropped() {
    let mut nav = three();
    let mut surface = RecordingSurface::default();
    nav.dispatch(Command::Advance, &mut surface);
    nav.dispatch(Command::StartTimer, &mut surface);
    let stale = nav.timer().generation();

    nav.dispatch(Command::PauseTimer, &mut surface);
    nav.dispatch(Command::StartTimer, &mut surface);
    surface.take();

    nav.dispatch(Command::Tick { generation: stale }, &mut surface);
    assert_eq!(nav.timer().remaining(), Countdown::new(1, 30));
    assert!(surface.take().is_empty());
}

#[test]
fn test_navigation_resets_running_timer() {
    let mut nav = make_navigator(&["Hero", "Wolf"], Countdown::new(0, 40));
    let mut surface = RecordingSurface::default();
    nav.dispatch(Command::Advance, &mut surface);
    nav.dispatch(Command::StartTimer, &mut surface);
    let generation = nav.timer().generation();
    for _ in 0..15 {
        nav.dispatch(Command::Tick { generation }, &mut surface);
    }
    assert_eq!(nav.timer().remaining(), Countdown::new(0, 25));
    assert_eq!(nav.timer().severity(), Severity::Warning);

    nav.dispatch(Command::Advance, &mut surface);
    assert_eq!(nav.timer().phase(), TimerPhase::Paused);
    assert_eq!(nav.timer().remaining(), Countdown::new(0, 40));

    // the old chain cannot resume the timer
    nav.dispatch(Command::Tick { generation }, &mut surface);
    assert_eq!(nav.timer().remaining(), Countdown::new(0, 40));
}

#[test]
fn test_expiry_stops_rearming() {
    let mut nav = make_navigator(&["Hero"], Countdown::new(0, 2));
    let mut surface = RecordingSurface::default();
    nav.dispatch(Command::Advance, &mut surface);
    nav.dispatch(Command::StartTimer, &mut surface);
    let generation = nav.timer().generation();
    surface.take();

    nav.dispatch(Command::Tick { generation }, &mut surface);
    nav.dispatch(Command::Tick { generation }, &mut surface);
    assert_eq!(
        surface.take(),
        vec![
            Event::Timer(Countdown::new(0, 1), Severity::Critical),
            Event::Scheduled { delay: Duration::from_secs(1), generation },
            Event::Timer(Countdown::new(0, 0), Severity::Expired),
        ]
    );

    nav.dispatch(Command::ResetTimer, &mut surface);
    assert_eq!(nav.timer().phase(), TimerPhase::Paused);
    assert_eq!(
        surface.take(),
        vec![Event::Timer(Countdown::new(0, 2), Severity::Critical)]
    );
}

proptest! {
    #[test]
    fn prop_advance_then_retreat_returns(len in 3usize..20, steps in 1usize..40) {
        let names: Vec<String> = (0..len).map(|i| format!("p{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut nav = make_navigator(&refs, Countdown::new(0, 30));
        for _ in 0..steps {
            nav.advance();
        }
        let before = nav.position();
        prop_assume!(matches!(before, Position::Viewing(i) if i > 0 && i < len - 1));

        nav.advance();
        nav.retreat();
        prop_assert_eq!(nav.position(), before);
    }

    #[test]
    fn prop_full_cycle_returns_to_first(len in 1usize..20) {
        let names: Vec<String> = (0..len).map(|i| format!("p{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut nav = make_navigator(&refs, Countdown::new(0, 30));
        nav.advance();
        for _ in 0..len {
            nav.advance();
        }
        prop_assert_eq!(nav.position(), Position::Viewing(0));
    }

    #[test]
    fn prop_every_move_resets_timer(moves in prop::collection::vec(any::<bool>(), 1..30)) {
        let mut nav = make_navigator(&["a", "b", "c", "d"], Countdown::new(2, 0));
        let mut surface = RecordingSurface::default();
        nav.dispatch(Command::Advance, &mut surface);
        for forward in moves {
            nav.dispatch(Command::StartTimer, &mut surface);
            let generation = nav.timer().generation();
            nav.dispatch(Command::Tick { generation }, &mut surface);
            let command = if forward { Command::Advance } else { Command::Retreat };
            nav.dispatch(command, &mut surface);
            prop_assert_eq!(nav.timer().phase(), TimerPhase::Paused);
            prop_assert_eq!(nav.timer().remaining(), Countdown::new(2, 0));
        }
    }
}
