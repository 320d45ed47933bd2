pub mod config;
pub mod page;
pub mod runtime;
pub mod timer;
pub mod typewriter;
pub mod ui;
pub mod viewport;

use crate::{
    config::{Config, ConfigStore, FileConfigStore},
    page::{PageContent, PageLayout},
    runtime::{CrosstermEventSource, PageEvent, Runner, TICK_RATE_MS},
    timer::Timers,
    typewriter::{HidePolicy, Typewriter},
    viewport::{Crossing, Region, Viewport, VisibilityTracker},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use webbrowser::Browser;

/// terminal portfolio page with a typewriter intro and scroll-triggered sections
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal portfolio page: scroll through full-screen sections that fade in as they enter the viewport, with an intro that types itself out and a browsable project gallery."
)]
pub struct Cli {
    /// intro text revealed by the typewriter
    #[clap(short = 'p', long)]
    intro: Option<String>,

    /// fraction of a section that must be on screen to count as visible
    #[clap(short = 't', long)]
    threshold: Option<f64>,

    /// keep sections visible once they have been seen
    #[clap(long)]
    latch: bool,

    /// clear the intro text when it scrolls out of view
    #[clap(long)]
    clear_on_hide: bool,

    /// resume url opened by the r key
    #[clap(long)]
    resume_url: Option<String>,
}

impl Cli {
    /// Overlay command-line flags on top of the stored configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(intro) = &self.intro {
            config.intro = intro.clone();
        }
        if let Some(threshold) = self.threshold {
            config.visibility_threshold = threshold.clamp(0.01, 1.0);
        }
        if self.latch {
            config.latch_sections = true;
        }
        if self.clear_on_hide {
            config.clear_intro_on_hide = true;
        }
        if let Some(resume_url) = &self.resume_url {
            config.resume_url = resume_url.clone();
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub content: PageContent,
    pub layout: PageLayout,
    pub viewport_height: usize,
    pub scroll: usize,
    pub tracker: VisibilityTracker,
    pub typewriter: Typewriter,
    pub timers: Timers,
    pub hide_policy: HidePolicy,
    pub selected_project: usize,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let content = PageContent {
            intro: config.intro.clone(),
            resume_url: config.resume_url.clone(),
            ..PageContent::default()
        };
        let mut tracker =
            VisibilityTracker::new(config.visibility_threshold, config.tracking_policy());
        tracker.observe(&Region::ALL);

        let viewport_height = 22;
        Self {
            typewriter: Typewriter::new(content.intro.clone()),
            content,
            layout: PageLayout::stacked(viewport_height),
            viewport_height,
            scroll: 0,
            tracker,
            timers: Timers::new(),
            hide_policy: config.hide_policy(),
            selected_project: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            top: self.scroll,
            height: self.viewport_height,
        }
    }

    /// Adopt a new terminal size: relayout, clamp the scroll offset, and
    /// re-evaluate visibility against the moved section bounds.
    pub fn resize(&mut self, rows: u16) {
        self.viewport_height = (rows as usize)
            .saturating_sub(ui::CHROME_ROWS as usize)
            .max(1);
        self.layout = PageLayout::stacked(self.viewport_height);
        self.scroll = self.scroll.min(self.layout.max_scroll(self.viewport_height));
        self.refresh_visibility();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.layout.max_scroll(self.viewport_height);
        let next = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs())
        } else {
            (self.scroll + delta as usize).min(max)
        };
        if next != self.scroll {
            self.scroll = next;
            self.refresh_visibility();
        }
    }

    pub fn jump_to(&mut self, region: Region) {
        if let Some(bounds) = self.layout.bounds(region) {
            self.scroll = bounds.top.min(self.layout.max_scroll(self.viewport_height));
            self.refresh_visibility();
        }
    }

    /// Region under the middle of the viewport, for the nav highlight.
    pub fn current_region(&self) -> Region {
        let mid = self.scroll + self.viewport_height / 2;
        self.layout
            .sections()
            .iter()
            .find(|b| mid >= b.top && mid < b.top + b.height)
            .map(|b| b.region)
            .unwrap_or(Region::Info)
    }

    fn refresh_visibility(&mut self) {
        let viewport = self.viewport();
        let crossings = self.tracker.update(self.layout.sections(), viewport);
        for crossing in crossings {
            self.apply_crossing(crossing);
        }
    }

    /// The typewriter is driven purely by the intro region's visibility
    /// edges; it knows nothing about the viewport itself.
    fn apply_crossing(&mut self, crossing: Crossing) {
        if crossing.region != Region::Info {
            return;
        }
        if crossing.visible {
            self.typewriter.restart(&mut self.timers);
        } else {
            self.typewriter.cancel(&mut self.timers);
            if self.hide_policy == HidePolicy::Clear {
                self.typewriter.clear_revealed();
            }
        }
    }

    pub fn on_tick(&mut self) {
        for token in self.timers.advance(TICK_RATE_MS) {
            self.typewriter.on_timer(token, &mut self.timers);
        }
    }

    pub fn select_project(&mut self, delta: isize) {
        let count = self.content.projects.len();
        if count == 0 {
            return;
        }
        self.selected_project = if delta < 0 {
            self.selected_project.saturating_sub(delta.unsigned_abs())
        } else {
            (self.selected_project + delta as usize).min(count - 1)
        };
    }

    pub fn open_selected_project(&self) {
        if let Some(project) = self.content.projects.get(self.selected_project) {
            if Browser::is_available() {
                webbrowser::open(&project.url).unwrap_or_default();
            }
        }
    }

    pub fn open_resume(&self) {
        if Browser::is_available() {
            webbrowser::open(&self.content.resume_url).unwrap_or_default();
        }
    }

    /// Release observation state and any in-flight reveal step.
    pub fn teardown(&mut self) {
        self.typewriter.cancel(&mut self.timers);
        self.tracker.release();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut config = FileConfigStore::new().load();
    cli.apply(&mut config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let size = terminal.size()?;
    app.resize(size.height);

    let res = start_tui(&mut terminal, &mut app);
    app.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let source = CrosstermEventSource::new();
    let runner = Runner::new(source, Duration::from_millis(TICK_RATE_MS));

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            PageEvent::Tick => {
                let animating = app.typewriter.is_active();
                app.on_tick();
                // Redraw only while the reveal animation is moving
                if animating || app.typewriter.is_active() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            PageEvent::Resize(_, rows) => {
                app.resize(rows);
                terminal.draw(|f| ui(app, f))?;
            }
            PageEvent::Key(key) => {
                if handle_key(app, key) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

/// Returns true when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        KeyCode::PageUp => app.scroll_by(-(app.viewport_height as isize)),
        KeyCode::PageDown => app.scroll_by(app.viewport_height as isize),
        KeyCode::Home => app.jump_to(Region::Info),
        KeyCode::End => app.jump_to(Region::Contact),
        KeyCode::Char('1') => app.jump_to(Region::Info),
        KeyCode::Char('2') => app.jump_to(Region::Services),
        KeyCode::Char('3') => app.jump_to(Region::Projects),
        KeyCode::Char('4') => app.jump_to(Region::Contact),
        KeyCode::Left | KeyCode::Char('h') => app.select_project(-1),
        KeyCode::Right | KeyCode::Char('l') => app.select_project(1),
        KeyCode::Enter | KeyCode::Char('o') => app.open_selected_project(),
        KeyCode::Char('r') => app.open_resume(),
        _ => {}
    }
    false
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
