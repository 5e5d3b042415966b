//! A single-page marketing site rendered in the terminal.
//!
//! Run the binary with no arguments to open the built-in page, or pass a
//! page file.  Use `--dump-layout WIDTH` to print section offsets instead.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{AppState, Focus},
};
use crate::core::page::{Page, PageLayout};
use crate::ui::{
    layout::AppLayout,
    nav_bar::{nav_geometry, MenuPopup, NavBar},
    page_widget::PageView,
    popup::AlertPopup,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Landing page with animated stat counters")]
struct Cli {
    /// Page file to open (defaults to the built-in page).
    page: Option<PathBuf>,

    /// Frames per second, 10 to 240.  Overrides `frame_ms` from the config.
    #[arg(long)]
    fps: Option<u32>,

    /// Reject counters whose target is missing or not a number.
    #[arg(long)]
    strict: bool,

    /// Write the current configuration to disk and exit.
    #[arg(long = "write-config")]
    write_config: bool,

    /// Print each section's top row at the given width and exit.
    #[arg(long = "dump-layout", value_name = "WIDTH")]
    dump_layout: Option<u16>,
}

impl Cli {
    fn frame_interval(&self, config: &config::AppConfig) -> Duration {
        match self.fps {
            Some(fps) => Duration::from_secs_f64(1.0 / f64::from(fps.clamp(10, 240))),
            None => Duration::from_millis(config.frame_ms),
        }
    }
}

fn load_page(cli: &Cli) -> Result<Page> {
    let page = match &cli.page {
        Some(path) => Page::load(path, cli.strict)?,
        None => Page::builtin(cli.strict).context("built-in page is invalid")?,
    };
    Ok(page)
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut ratatui::Frame, state: &AppState) {
    let screen = AppLayout::from_area(frame.area());
    let collapsed = nav_geometry(screen.nav_area, &state.brand, &state.links).collapsed;

    frame.render_widget(
        NavBar {
            brand: &state.brand,
            links: &state.links,
            active: state.active_link(),
            menu: state.menu,
        },
        screen.nav_area,
    );

    let form_focus = match state.focus {
        Focus::Form(field) => Some(field),
        _ => None,
    };
    frame.render_widget(
        PageView {
            page: &state.page,
            layout: &state.layout,
            counters: &state.counters,
            fades: &state.fades,
            form: &state.form,
            focus: form_focus,
            scroll: state.scroll.row(),
            now: state.now,
        },
        screen.content_area(),
    );

    let hint = state.config.status_bar_hint();
    let status_text = match (&state.status_message, form_focus) {
        (Some(msg), _) => msg.as_str(),
        (None, Some(_)) => " Tab/Shift+Tab: field  Enter: send  Esc: leave form",
        (None, None) => hint.as_str(),
    };
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        screen.status_area,
    );

    if collapsed && state.menu.is_open() {
        frame.render_widget(
            MenuPopup {
                links: &state.links,
                active: state.active_link(),
                selected: state.menu_selected,
            },
            screen.page_area,
        );
    }

    if let Some(alert) = &state.alert {
        frame.render_widget(
            AlertPopup {
                message: &alert.message,
                success: alert.success,
            },
            frame.area(),
        );
    }
}

/// Apply one event.  Returns `true` if the screen needs redrawing.
fn dispatch(state: &mut AppState, event: AppEvent, started: Instant) -> bool {
    match event {
        AppEvent::Key(k) => handler::handle_key(state, k),
        AppEvent::Mouse(m) => handler::handle_mouse(state, m),
        AppEvent::Resize(w, h) => state.resize(Rect::new(0, 0, w, h)),
        AppEvent::Frame => {
            let was_animating = state.is_animating();
            state.on_frame(started.elapsed());
            // An idle page only needs a frame drawn when something starts moving.
            return was_animating || state.is_animating();
        }
    }
    true
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let user_config = config::AppConfig::load();

    // ── one-shot modes ────────────────────────────────────────
    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let page = load_page(&cli)?;

    if let Some(width) = cli.dump_layout {
        let layout = PageLayout::compute(&page, width);
        for section in &layout.sections {
            println!("{}\t{}", section.id, section.bounds.top);
        }
        return Ok(());
    }

    let frame_interval = cli.frame_interval(&user_config);
    tracing::debug!(?frame_interval, sections = page.sections.len(), "starting");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut state = AppState::new(page, user_config, Rect::new(0, 0, size.width, size.height));

    let started = Instant::now();
    let mut events = spawn_event_reader(frame_interval);

    // ── event loop ────────────────────────────────────────────
    let mut redraw = true;
    loop {
        if redraw {
            terminal.draw(|frame| draw(frame, &state))?;
        }

        let Some(event) = events.recv().await else {
            break;
        };
        redraw = dispatch(&mut state, event, started);
        // Drain whatever queued up while drawing before the next draw.
        while let Ok(event) = events.try_recv() {
            redraw |= dispatch(&mut state, event, started);
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
