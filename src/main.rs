use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use ssa_terminal::config::AppConfig;
use ssa_terminal::dataset::{self, Dataset};
use ssa_terminal::router::Pages;
use ssa_terminal::state::{Action, AppState, dispatch};
use ssa_terminal::ui;

struct App {
    dataset: Dataset,
    pages: Pages,
    state: AppState,
    tick_rate: Duration,
    should_quit: bool,
}

impl App {
    fn new(config: &AppConfig, dataset: Dataset) -> Result<Self> {
        let pages = Pages::build(&mut rand::thread_rng());
        let state = AppState::new(&dataset, &config.start_path)?;
        Ok(Self {
            dataset,
            pages,
            state,
            tick_rate: config.tick_rate,
            should_quit: false,
        })
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.path_input.is_some() {
            self.on_path_key(key);
            return;
        }

        let action = match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('/') => {
                self.state.path_input = Some("/".to_string());
                return;
            }
            KeyCode::Char('1') => Action::NavigateTab(0),
            KeyCode::Char('2') => Action::NavigateTab(1),
            KeyCode::Char('3') => Action::NavigateTab(2),
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Esc if self.state.help_overlay => Action::ToggleHelp,
            KeyCode::Tab => Action::FocusNext,
            KeyCode::BackTab => Action::FocusPrev,
            KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
            KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
            KeyCode::Char('h') | KeyCode::Left => Action::ShiftDate { days: -1 },
            KeyCode::Char('l') | KeyCode::Right => Action::ShiftDate { days: 1 },
            KeyCode::Char('H') => Action::ShiftYear { years: -1 },
            KeyCode::Char('L') => Action::ShiftYear { years: 1 },
            KeyCode::Char(' ') | KeyCode::Enter => Action::ToggleOption,
            KeyCode::Char('n') => Action::ToggleNeutral,
            KeyCode::Char('x') => Action::ClearFocused,
            KeyCode::Char('r') => Action::ResetFilters,
            _ => return,
        };

        // Filter controls only live on the World Cup page.
        let on_world_cup = ssa_terminal::router::nav_index(&self.state.path) == Some(0);
        let global = matches!(action, Action::NavigateTab(_) | Action::ToggleHelp);
        if global || on_world_cup {
            dispatch(&mut self.state, &self.dataset, action);
        }
    }

    fn on_path_key(&mut self, key: KeyEvent) {
        let Some(input) = self.state.path_input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.path_input = None,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Enter => {
                let path = std::mem::take(input);
                self.state.path_input = None;
                dispatch(&mut self.state, &self.dataset, Action::Navigate(path));
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.push(c),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::load(&args);

    // Fail before touching the terminal if there is nothing to show.
    let dataset = match dataset::load_csv(&config.data_path) {
        Ok(ds) => ds,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };
    let mut app = App::new(&config, dataset)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::ui(f, &app.state, &app.pages))?;

        let timeout = app
            .tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
