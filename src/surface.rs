//! Rendering surfaces
//!
//! The navigator reports through [`RenderSurface`] and never draws anything
//! itself. [`TerminalSurface`] is the stock implementation used by the REPL:
//! it prints the current participant (or a name card when no image matched)
//! and re-arms timer ticks on the tokio runtime.

use crate::app_state::ManagerConfig;
use crate::assets::AssetReference;
use crate::driver::{Request, RequestSender};
use crate::sequence::{Command, Countdown, Severity};
use std::time::Duration;

pub trait RenderSurface {
    /// Show the participant at `index` of a sequence of `total`.
    fn display(&mut self, asset: &AssetReference, index: usize, total: usize);

    fn display_timer(&mut self, remaining: Countdown, severity: Severity);

    /// Deliver `Command::Tick { generation }` back to the navigator after `delay`.
    fn schedule_tick(&mut self, delay: Duration, generation: u64);
}

const TITLE: &str = "Encounter Manager";
const MIN_CARD_WIDTH: usize = 24;
const MAX_CARD_WIDTH: usize = 72;

pub struct TerminalSurface {
    card_width: usize,
    requests: RequestSender,
    last_severity: Option<Severity>,
}

impl TerminalSurface {
    pub fn new(config: &ManagerConfig, requests: RequestSender) -> Self {
        Self {
            card_width: card_width(config.size_xy),
            requests,
            last_severity: None,
        }
    }
}

impl RenderSurface for TerminalSurface {
    fn display(&mut self, asset: &AssetReference, index: usize, total: usize) {
        println!();
        println!(
            "{TITLE}:   {}   ({}/{})",
            asset.display_name(),
            index + 1,
            total
        );
        match asset {
            AssetReference::Image(path) => println!("  image: {}", path.display()),
            AssetReference::Placeholder(name) => {
                for line in placeholder_card(name, self.card_width) {
                    println!("  {line}");
                }
            }
        }
        // always show the freshly reset timer under a new participant
        self.last_severity = None;
    }

    fn display_timer(&mut self, remaining: Countdown, severity: Severity) {
        let changed = self.last_severity != Some(severity);
        let on_mark = remaining.secs % 10 == 0;
        if changed || on_mark || severity == Severity::Critical {
            println!("  {}", timer_line(remaining, severity));
        }
        self.last_severity = Some(severity);
    }

    fn schedule_tick(&mut self, delay: Duration, generation: u64) {
        let requests = self.requests.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the session is shutting down
            let _ = requests.send(Request::Engine(Command::Tick { generation }));
        });
    }
}

fn card_width(size_xy: u32) -> usize {
    (size_xy as usize / 20).clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH)
}

/// Timer text as shown to the table.
pub fn timer_line(remaining: Countdown, severity: Severity) -> String {
    match severity {
        Severity::Normal => format!("[{remaining}]"),
        Severity::Warning => format!("[{remaining}] hurry"),
        Severity::Critical => format!("[{remaining}] !!"),
        Severity::Expired => "[--:--] time".to_string(),
    }
}

/// A boxed card with `name` centered, standing in for a missing image.
pub fn placeholder_card(name: &str, width: usize) -> Vec<String> {
    let name_len = name.chars().count();
    let inner = width.max(name_len + 4);
    let left = (inner - name_len) / 2;
    let right = inner - name_len - left;

    let border = format!("+{}+", "-".repeat(inner));
    let blank = format!("|{}|", " ".repeat(inner));
    let label = format!("|{}{}{}|", " ".repeat(left), name, " ".repeat(right));

    vec![border.clone(), blank.clone(), label, blank, border]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_card_centers_name() {
        let card = placeholder_card("Wolf", 10);
        assert_eq!(card.len(), 5);
        assert_eq!(card[0], "+----------+");
        assert_eq!(card[2], "|   Wolf   |");
        assert!(card.iter().all(|line| line.chars().count() == 12));
    }

    #[test]
    fn test_placeholder_card_grows_for_long_names() {
        let card = placeholder_card("Ancient Red Dragon", 10);
        assert_eq!(card[2], "|  Ancient Red Dragon  |");
    }

    #[test]
    fn test_card_width_follows_window_size() {
        assert_eq!(card_width(600), 30);
        assert_eq!(card_width(100), MIN_CARD_WIDTH);
        assert_eq!(card_width(4000), MAX_CARD_WIDTH);
    }

    #[test]
    fn test_timer_line() {
        assert_eq!(timer_line(Countdown::new(1, 30), Severity::Normal), "[01:30]");
        assert_eq!(timer_line(Countdown::new(0, 20), Severity::Warning), "[00:20] hurry");
        assert_eq!(timer_line(Countdown::new(0, 0), Severity::Expired), "[--:--] time");
    }

    #[tokio::test]
    async fn test_schedule_tick_sends_generation() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut surface = TerminalSurface::new(&ManagerConfig::default(), tx);
        surface.schedule_tick(Duration::from_millis(5), 7);

        let request = rx.recv().await.unwrap();
        assert!(matches!(
            request,
            Request::Engine(Command::Tick { generation: 7 })
        ));
    }
}
