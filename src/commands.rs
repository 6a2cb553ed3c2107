use crate::app_state::{AppConfig, AppState};
use crate::assets::AssetReference;
use crate::catalog;
use crate::selector::SelectionPolicy;
use crate::sequence::{Position, SequenceNavigator, TimerPhase};
use crate::surface::timer_line;
use std::io::Write;
use time::UtcOffset;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const MODIFIED_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub fn show_status(navigator: &SequenceNavigator) {
    let total = navigator.sequence().len();
    match (navigator.position(), navigator.current()) {
        (Position::Viewing(idx), Some(asset)) => {
            println!("Turn {}/{}: {}", idx + 1, total, asset.display_name());
        }
        _ => println!("Encounter not started ({} participants), use `next`", total),
    }

    let timer = navigator.timer();
    let phase = match timer.phase() {
        TimerPhase::Paused => "paused",
        TimerPhase::Running => "running",
        TimerPhase::Expired => "expired",
    };
    println!(
        "Timer {} {} (turn length {})",
        timer_line(timer.remaining(), timer.severity()),
        phase,
        timer.configured()
    );
}

pub fn show_order(navigator: &SequenceNavigator) {
    let current = match navigator.position() {
        Position::Viewing(idx) => Some(idx),
        Position::Unstarted => None,
    };

    for (idx, asset) in navigator.sequence().iter().enumerate() {
        let marker = if current == Some(idx) { ">" } else { " " };
        let source = match asset {
            AssetReference::Image(path) => path.display().to_string(),
            AssetReference::Placeholder(_) => "(placeholder)".to_string(),
        };
        println!("{marker} {:>2}. {:<30} {}", idx + 1, asset.display_name(), source);
    }
}

pub fn list_files(state: &AppState) {
    let dir = state.config.encounter_dir();
    let descriptions = match catalog::enumerate_descriptions(&dir) {
        Ok(found) => found,
        Err(e) => {
            println!("Failed to list {}: {}", dir.display(), e);
            return;
        }
    };

    if descriptions.is_empty() {
        println!("No encounter files found");
        return;
    }

    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    println!("  {:<40} {:<20} Seq", "File", "Modified");
    println!("{}", "-".repeat(70));

    for description in &descriptions {
        let active = if description.path == state.encounter.source.path { "*" } else { " " };
        let modified = description
            .modified
            .to_offset(offset)
            .format(MODIFIED_FORMAT)
            .unwrap_or_default();
        let sequence = description
            .sequence_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{active} {:<40} {:<20} {}",
            description.file_name, modified, sequence
        );
    }

    println!(
        "\nTotal: {} files (selection: {:?})",
        descriptions.len(),
        state.config.selection_policy
    );
}

pub fn export_summary(state: &AppState) {
    match catalog::write_asset_summary(&state.config.image_dir()) {
        Ok(path) => println!("Wrote asset summary to {}", path.display()),
        Err(e) => println!("Failed to write asset summary: {}", e),
    }
}

pub fn show_config(state: &AppState) {
    match AppConfig::file_path() {
        Ok(path) => println!("Config file:        {}", path.display()),
        Err(e) => println!("Config file:        unavailable ({e})"),
    }
    println!("Encounter directory: {}", state.config.encounter_dir().display());
    println!("Image directory:     {}", state.config.image_dir().display());
    println!("Selection policy:    {:?}", state.config.selection_policy);
    println!("Manager config:      {}", state.config.manager_config_path().display());
    println!(
        "size_xy={} mins={} secs={}",
        state.manager.size_xy, state.manager.mins, state.manager.secs
    );
    println!(
        "Loaded: {} ({} participants)",
        state.encounter.source.label(),
        state.encounter.order.len()
    );
}

pub fn set_policy(state: &mut AppState, policy: SelectionPolicy) {
    state.config.selection_policy = policy;
    save_config(&state.config);
}

pub fn set_directory(state: &mut AppState, path: &str) {
    state.config.encounter_directory = Some(path.to_string());
    save_config(&state.config);
}

fn save_config(config: &AppConfig) {
    match config.save() {
        Ok(()) => println!("Saved. Takes effect next session."),
        Err(e) => {
            tracing::error!(error = %e, "failed to save configuration");
            println!("Failed to save configuration: {}", e);
        }
    }
}

pub fn exit() {
    write!(std::io::stdout(), "quitting...").ok();
    std::io::stdout().flush().ok();
}
