//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use advent::calendar::CellState;
use advent::config::Settings;
use advent::engine::{MediaEngine, TransportStatus};
use advent::model::{DAY_COUNT, Track, Variant};
use advent::sequencer::RandomSource;
use advent::session::AdventSession;
use advent::store::KeyValueStore;

use crate::app::{App, GRID_COLUMNS};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("hjkl".to_string(), "move".to_string());
    map.insert("enter".to_string(), "reveal".to_string());
    map.insert("p".to_string(), "play/toggle day".to_string());
    map.insert("space".to_string(), "pause/resume".to_string());
    map.insert("n/N".to_string(), "next/previous".to_string());
    // [/] is filled dynamically from config.
    map.insert("v".to_string(), "variant".to_string());
    map.insert("s".to_string(), "shuffle".to_string());
    map.insert("R".to_string(), "reset variant".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating seek seconds.
fn controls_text(seek_seconds: u64) -> String {
    let order = ["hjkl", "enter", "p", "space", "n/N", "[/]", "v", "s", "R", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "[/]" {
                Some(format!("[[/]] seek -/+{}s", seek_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn transport_text(t: &TransportStatus) -> String {
    let mut text = match (t.duration, t.fraction()) {
        (Some(total), Some(f)) => format!(
            "{} / {} {}%",
            format_mmss(t.position),
            format_mmss(total),
            (f * 100.0) as u32
        ),
        _ => format_mmss(t.position),
    };
    if t.buffering {
        text.push_str(" (buffering)");
    }
    text
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw<S, R, E>(
    frame: &mut Frame,
    app: &App,
    session: &AdventSession<S, R, E>,
    settings: &Settings,
) where
    S: KeyValueStore,
    R: RandomSource,
    E: MediaEngine,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(frame.area());

    draw_status(frame, chunks[0], app, session);
    draw_now_playing(frame, chunks[1], session);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);
    draw_grid(frame, body[0], app, session);
    draw_details(frame, body[1], app, session);

    let footer = Paragraph::new(controls_text(settings.playback.seek_seconds))
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn draw_status<S, R, E>(frame: &mut Frame, area: Rect, app: &App, session: &AdventSession<S, R, E>)
where
    S: KeyValueStore,
    R: RandomSource,
    E: MediaEngine,
{
    let calendar = session.calendar();
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("VARIANT: {}", calendar.variant()));
    let today = calendar.today();
    if today < 0 {
        parts.push("Not started yet".to_string());
    } else {
        parts.push(format!("Today: day {}", today + 1));
    }
    parts.push(format!("Revealed: {}/{}", calendar.unlocked().len(), DAY_COUNT));
    if session.sequencer().shuffle_enabled() {
        parts.push("Shuffle: ON".to_string());
    } else {
        parts.push("Shuffle: OFF".to_string());
    }
    if let Some(msg) = app.status() {
        parts.push(msg.to_string());
    }

    let status = Paragraph::new(parts.join(" • "))
        .block(padded(" advent "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

fn draw_now_playing<S, R, E>(frame: &mut Frame, area: Rect, session: &AdventSession<S, R, E>)
where
    S: KeyValueStore,
    R: RandomSource,
    E: MediaEngine,
{
    let text = match session.now_playing() {
        Some(now) => {
            let state = if now.playing { "Playing" } else { "Paused" };
            let mut title = now.content.display_title();
            if title.is_empty() {
                title = "Untitled".to_string();
            }
            let mut line = format!(
                "{state} • Day {} [{}] • {title} • {}",
                now.day + 1,
                now.variant,
                transport_text(now.transport)
            );
            if !now.content.has_media() {
                line.push_str(" • no playable media");
            }
            line
        }
        None => "Stopped".to_string(),
    };

    let bar = Paragraph::new(text)
        .block(padded(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(bar, area);
}

fn draw_grid<S, R, E>(frame: &mut Frame, area: Rect, app: &App, session: &AdventSession<S, R, E>)
where
    S: KeyValueStore,
    R: RandomSource,
    E: MediaEngine,
{
    let block = Block::default().borders(Borders::ALL).title(" calendar ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows_count = DAY_COUNT.div_ceil(GRID_COLUMNS);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows_count as u32); rows_count])
        .split(inner);

    let active = session.sequencer().active();
    let playing = session.sequencer().is_playing();

    for (r, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);

        for (c, cell_area) in cells.iter().enumerate() {
            let day = r * GRID_COLUMNS + c;
            if day >= DAY_COUNT {
                continue;
            }

            let (marker, mut style) = match session.calendar().cell_state(day) {
                CellState::Inactive => ("·", Style::default().fg(Color::DarkGray)),
                CellState::Locked => ("?", Style::default().fg(Color::Yellow)),
                CellState::Unlocked => ("♪", Style::default().fg(Color::Green)),
            };
            let marker = if active == Some(day) {
                style = style.add_modifier(Modifier::BOLD);
                if playing { "▶" } else { "⏸" }
            } else {
                marker
            };

            let mut cell_block = Block::default().borders(Borders::ALL).border_style(style);
            if app.cursor() == day {
                cell_block = cell_block.border_style(style.add_modifier(Modifier::REVERSED));
            }

            let cell = Paragraph::new(format!("{:>2} {marker}", day + 1))
                .style(style)
                .alignment(Alignment::Center)
                .block(cell_block);
            frame.render_widget(cell, *cell_area);
        }
    }
}

fn draw_details<S, R, E>(frame: &mut Frame, area: Rect, app: &App, session: &AdventSession<S, R, E>)
where
    S: KeyValueStore,
    R: RandomSource,
    E: MediaEngine,
{
    let day = app.cursor();
    let calendar = session.calendar();
    let sounding = session.sequencer().active() == Some(day);
    let variant = if sounding {
        session.display_variant()
    } else {
        calendar.variant()
    };

    let text = details_body(
        calendar.cell_state(day),
        session.tracks().get(day),
        sounding,
        variant,
    );

    let title = format_title(day, variant);
    let details = Paragraph::new(text)
        .block(padded(&title).title_alignment(Alignment::Left))
        .wrap(Wrap { trim: true });
    frame.render_widget(details, area);
}

/// Body of the details panel. The active day always shows its pinned
/// content, whatever the live variant's unlocked set says about it.
fn details_body(cell: CellState, track: Option<&Track>, sounding: bool, variant: Variant) -> String {
    match (cell, track) {
        (_, Some(track)) if track.disabled => "Nothing behind this door.".to_string(),
        (_, Some(track)) if sounding => details_text(track, variant),
        (CellState::Inactive, _) => "Not open yet.".to_string(),
        (CellState::Locked, _) => "Press enter to reveal.".to_string(),
        (CellState::Unlocked, Some(track)) => details_text(track, variant),
        (_, None) => String::new(),
    }
}

fn format_title(day: usize, variant: Variant) -> String {
    format!(" day {} ({}) ", day + 1, variant)
}

fn details_text(track: &Track, variant: Variant) -> String {
    let content = track.content(variant);
    let or_dash = |s: &str| {
        let s = s.trim();
        if s.is_empty() { "-".to_string() } else { s.to_string() }
    };
    let mut lines = vec![
        format!("Title: {}", or_dash(&content.display_title())),
        format!("Credited to: {}", or_dash(&content.credited_to)),
        format!("Description: {}", or_dash(&content.description)),
        format!("Media: {}", or_dash(&content.media_url)),
        format!("Cover: {}", or_dash(&content.cover_image)),
    ];
    if let Some(link) = &content.buy_link {
        lines.push(format!("Buy: {link}"));
    }
    if let Some(link) = &track.profile_link {
        lines.push(format!("Profile: {link}"));
    }
    lines.join("\n")
}
