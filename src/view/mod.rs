//! Terminal demo host (impure shell)
//!
//! Drives an [`Engine`] from crossterm events the way a browser renderer
//! would: keys become navigation targets, the wheel and navigation move a
//! host-side scroll position that is reported back through
//! `notify_scroll`, and the engine is ticked once per frame interval.

pub mod constants;
pub mod gallery;
mod layout;
pub mod list_view;
pub mod scroll_indicator;
mod styles;

pub use gallery::{synthetic_gallery, ImageFile};
pub use layout::StatusInfo;
pub use list_view::ListView;
pub use scroll_indicator::ScrollIndicator;
pub use styles::{ColorConfig, ListStyles};

use crate::config::{EngineConfig, KeyBindings};
use crate::engine::{Clock, Engine, SystemClock};
use crate::model::{AppError, KeyAction, Viewport};
use crate::view_state::navigation;
use constants::{DEFAULT_DEMO_ITEMS, WHEEL_STEP_ROWS};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Settings for one demo session.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// Number of synthetic image files.
    pub item_count: usize,
    /// Engine settings.
    pub engine: EngineConfig,
    /// Time between engine ticks.
    pub frame_interval: Duration,
    /// Disable colors.
    pub no_color: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            item_count: DEFAULT_DEMO_ITEMS,
            engine: EngineConfig::default(),
            frame_interval: Duration::from_millis(16),
            no_color: false,
        }
    }
}

/// Demo application.
///
/// Generic over backend to support testing with TestBackend.
pub struct DemoApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    engine: Engine,
    items: Vec<ImageFile>,
    key_bindings: KeyBindings,
    styles: ListStyles,
    /// Host scroll position; the engine catches up on the next tick.
    scroll_offset: f64,
    frame_interval: Duration,
    range_updates: Rc<Cell<u64>>,
    dirty: Rc<Cell<bool>>,
    last_drawn: Option<Viewport>,
}

impl DemoApp<CrosstermBackend<Stdout>> {
    /// Set up the terminal in raw mode with alternate screen and mouse capture.
    pub fn new(options: &DemoOptions) -> Result<Self, AppError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Self::with_terminal(terminal, options, Rc::new(SystemClock::new()))
    }
}

impl<B> DemoApp<B>
where
    B: Backend,
{
    /// Build the demo on an existing terminal and clock.
    pub fn with_terminal(
        terminal: Terminal<B>,
        options: &DemoOptions,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let items = synthetic_gallery(options.item_count);
        let mut engine = Engine::with_clock(
            items.len(),
            gallery::heights(&items),
            options.engine,
            clock,
        );

        let range_updates = Rc::new(Cell::new(0));
        let dirty = Rc::new(Cell::new(true));
        {
            let updates = Rc::clone(&range_updates);
            let dirty = Rc::clone(&dirty);
            engine.on_visible_range_change(move |range| {
                updates.set(updates.get() + 1);
                dirty.set(true);
                debug!(bounds = ?range.bounds(), "Visible range changed");
            });
        }
        {
            let dirty = Rc::clone(&dirty);
            engine.on_scroll_activity_change(move |active| {
                dirty.set(true);
                debug!(active, "Scroll activity changed");
            });
        }

        let size = terminal.size()?;
        engine.notify_resize(f64::from(layout::list_height(size.height)));

        Ok(Self {
            terminal,
            engine,
            items,
            key_bindings: KeyBindings::default(),
            styles: ListStyles::with_color_config(ColorConfig::from_env_and_args(
                options.no_color,
            )),
            scroll_offset: 0.0,
            frame_interval: options.frame_interval,
            range_updates,
            dirty,
            last_drawn: None,
        })
    }

    /// Run the event loop until the user quits.
    ///
    /// Input is handled as it arrives; the engine is ticked and the screen
    /// redrawn at most once per frame interval.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.draw()?;
        let mut next_frame = Instant::now() + self.frame_interval;

        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            if Instant::now() >= next_frame {
                self.frame()?;
                next_frame = Instant::now() + self.frame_interval;
            }
        }
    }

    /// One animation frame: let the engine run due work, redraw if needed.
    pub fn frame(&mut self) -> Result<(), AppError> {
        self.engine.tick();
        let moved = self.last_drawn != Some(self.engine.viewport());
        if self.dirty.replace(false) || moved {
            self.draw()?;
        }
        Ok(())
    }

    /// Handle a key press. Returns true when the user quits.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Bindings are keyed on code + modifiers only.
        match self.key_bindings.get(KeyEvent::new(key.code, key.modifiers)) {
            Some(KeyAction::Quit) => true,
            Some(KeyAction::Navigate(command)) => {
                let target = self.engine.navigate(command);
                self.scroll_to(target);
                false
            }
            None => false,
        }
    }

    /// Handle a mouse event; only the wheel scrolls.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP_ROWS),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP_ROWS),
            _ => {}
        }
    }

    /// Handle a terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "Terminal resized");
        self.engine
            .notify_resize(f64::from(layout::list_height(height)));
        // Clamp the host position against the new extent.
        self.scroll_by(0.0);
        self.dirty.set(true);
    }

    /// Host-side scroll position.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Engine driving the list.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn scroll_by(&mut self, delta: f64) {
        let index = self.engine.position_index();
        let target = navigation::clamp_scroll_offset(
            &index,
            &self.engine.viewport(),
            self.scroll_offset + delta,
        );
        self.scroll_to(target);
    }

    fn scroll_to(&mut self, target: f64) {
        if target == self.scroll_offset {
            return;
        }
        self.scroll_offset = target;
        self.engine.notify_scroll(target);
    }

    fn draw(&mut self) -> Result<(), AppError> {
        let index = self.engine.position_index();
        let viewport = self.engine.viewport();
        let range = self.engine.visible_range();

        let view = ListView {
            items: &self.items,
            index: &index,
            range,
            viewport,
            scrolling: self.engine.is_scrolling(),
            styles: &self.styles,
        };
        let status = StatusInfo {
            item_count: self.items.len(),
            bounds: range.bounds(),
            scroll_offset: viewport.scroll_offset,
            max_scroll_offset: navigation::max_scroll_offset(&index, &viewport),
            phase: self.engine.phase(),
            range_updates: self.range_updates.get(),
        };

        self.terminal
            .draw(|frame| layout::render_layout(frame, &view, &status))?;
        self.last_drawn = Some(viewport);
        Ok(())
    }
}

/// Run the demo, restoring the terminal even when setup or the loop fails.
///
/// Logging must be initialized by the caller.
pub fn run_demo(options: &DemoOptions) -> Result<(), AppError> {
    run_restoring(|| DemoApp::new(options), DemoApp::run, restore_terminal)
}

/// Run `setup` then `run`, always calling `restore` afterwards.
///
/// `setup` may fail after partially configuring the terminal, so `restore`
/// runs on that path too. The first error wins.
fn run_restoring<A>(
    setup: impl FnOnce() -> Result<A, AppError>,
    run: impl FnOnce(&mut A) -> Result<(), AppError>,
    restore: impl FnOnce() -> Result<(), AppError>,
) -> Result<(), AppError> {
    let result = setup().and_then(|mut app| run(&mut app));
    let restored = restore();
    result.and(restored)
}

/// Disable raw mode, mouse capture and leave the alternate screen.
fn restore_terminal() -> Result<(), AppError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
