//! A paged tab strip in the terminal.
//!
//! Swipe between pages and watch the tab strip follow, or jump to a tab and
//! watch the selection walk there one tab at a time.
//! Run with `--write-config` to store the effective settings.

mod app;
mod ui;

use std::io::{self, stderr};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use flip_tabs::config::AppConfig;
use flip_tabs::core::{FeedbackPolicy, NavigationPolicy};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::ui::{layout::AppLayout, page_view::PageView, tab_strip::TabStrip, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Paged tab strip demo")]
struct Cli {
    /// Number of tabs.
    #[arg(long, default_value_t = 50)]
    tabs: usize,

    /// Tab selected once the strip is measured (zero-based).
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Feedback policy: `paint` or `notify`.
    #[arg(long)]
    feedback: Option<FeedbackPolicy>,

    /// Navigation policy: `far`, `near` or `near:N`.
    #[arg(long)]
    navigation: Option<NavigationPolicy>,

    /// Pause between walk steps, in milliseconds.
    #[arg(long)]
    step_delay_ms: Option<u64>,

    /// Save the effective configuration and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(feedback) = self.feedback {
            config.feedback = feedback;
        }
        if let Some(navigation) = self.navigation {
            config.navigation = navigation;
        }
        if let Some(ms) = self.step_delay_ms {
            config.step_delay_ms = ms.max(1);
        }
    }
}

/// Page titles.  The first one is long so the uniform tab width is visibly
/// driven by the widest header.
fn sample_titles(count: usize) -> Vec<String> {
    (1..=count)
        .map(|n| {
            if n == 1 {
                "A deliberately long first header that sets every width".to_string()
            } else {
                format!("Tab number {n}")
            }
        })
        .collect()
}

fn status_line(state: &AppState) -> Line<'static> {
    if !state.typed.is_empty() {
        return Line::from(vec![
            Span::raw(" go to tab: "),
            Span::styled(format!("{}_", state.typed), Theme::command_input_style()),
        ]);
    }
    let position = match (state.view.selected_index(), state.view.previously_selected_index()) {
        (Some(selected), Some(previous)) => format!("tab {} (was {})", selected + 1, previous + 1),
        (Some(selected), None) => format!("tab {}", selected + 1),
        _ => "measuring".into(),
    };
    let walking = if state.view.is_navigating() { " | walking" } else { "" };
    let message = state
        .status_message
        .clone()
        .unwrap_or_else(|| state.config.status_bar_hint());
    Line::from(format!(" {position}{walking} | {message}"))
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    cli.apply(&mut config);

    if cli.write_config {
        config.save()?;
        return Ok(());
    }

    let titles = sample_titles(cli.tabs);
    let start = cli.start.min(titles.len().saturating_sub(1));
    tracing::debug!(tabs = titles.len(), start, feedback = %config.feedback, navigation = %config.navigation, "starting");

    // ── async channels ────────────────────────────────────────
    let (tx, mut events) = tokio::sync::mpsc::unbounded_channel::<AppEvent>();
    let mut state = AppState::new(titles, config, start, tx.clone());

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    spawn_event_reader(Duration::from_millis(16), tx);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area());

            let selected = state.view.selected_index();
            let indicator_color = state.view.indicator_color();
            state.view.with_host(|host| {
                host.settle_scroll(selected, layout.strip_area.width);
                frame.render_widget(TabStrip::new(host, indicator_color), layout.strip_area);
            });

            let page_block = Block::default()
                .title(format!(" flip-tabs · {} · {} ", state.config.feedback, state.config.navigation))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            frame.render_widget(
                PageView::new(&state.titles, state.pager.position()).block(page_block),
                layout.page_area,
            );

            let status = Paragraph::new(status_line(&state)).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        // The strip exists on screen now, so the control can measure it.
        if state.needs_measure {
            state.needs_measure = false;
            state.view.on_offset_changed();
        }

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => state.advance_pager(),
            AppEvent::Selection { generation, event } => {
                if generation == state.view_generation {
                    let palette = state.palette();
                    state.view.with_host(|host| host.apply_event(&event, palette));
                }
            }
            AppEvent::Navigated { target, outcome } => {
                tracing::debug!(target, ?outcome, "navigation finished");
                state.status_message = Some(format!("go to tab {}: {outcome:?}", target + 1));
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}
