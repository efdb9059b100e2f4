use std::{io, time::Duration};
use strum::IntoEnumIterator;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::ListState,
};

use crate::app::{
    context::AppContext,
    screen::{Nav, Screen},
    ui,
    utils::{next_index, prev_index},
    views::{HistoricalView, NewsView, SpotQuotesView},
};

const TICK: Duration = Duration::from_millis(100);

pub struct App {
    ctx: AppContext,
    screen: Screen,
    menu_state: ListState,
    spot: SpotQuotesView,
    historical: HistoricalView,
    news: NewsView,
    popup_message: Option<String>,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));
        Self {
            ctx,
            screen: Screen::Home,
            menu_state,
            spot: SpotQuotesView::new(),
            historical: HistoricalView::new(),
            news: NewsView::new(),
            popup_message: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn into_context(self) -> AppContext {
        self.ctx
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
    }

    /// Takes over the terminal until the user quits. Must run inside a tokio
    /// runtime since queries are spawned onto it.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.spot.poll();
            self.historical.poll();
            self.news.poll();

            terminal.draw(|frame| {
                ui::render(
                    frame,
                    &self.ctx,
                    self.screen,
                    &mut self.menu_state,
                    &self.spot,
                    &self.historical,
                    &self.news,
                    &self.popup_message,
                )
            })?;

            if !event::poll(TICK)? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if !self.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }

    /// Returns `false` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        if self.popup_message.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.clear_popup();
            }
            return true;
        }

        match self.screen {
            Screen::Home => return self.handle_menu_key(key.code),
            _ => match key.code {
                KeyCode::Esc => self.navigate(Nav::Back),
                KeyCode::F(5) => self.navigate(Nav::Refresh),
                code => self.handle_view_key(code),
            },
        }

        true
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> bool {
        let entries: Vec<Screen> = Screen::iter().filter(|s| *s != Screen::Home).collect();
        match code {
            KeyCode::Char('q') => return false,
            KeyCode::Down => self
                .menu_state
                .select(next_index(self.menu_state.selected(), entries.len())),
            KeyCode::Up => self
                .menu_state
                .select(prev_index(self.menu_state.selected(), entries.len())),
            KeyCode::Enter => {
                if let Some(next) = self.menu_state.selected().and_then(|i| entries.get(i)) {
                    self.navigate(Nav::Open(*next));
                }
            }
            _ => {}
        }
        true
    }

    fn handle_view_key(&mut self, code: KeyCode) {
        match self.screen {
            Screen::SpotQuotes => self.spot.handle_key(code, &self.ctx),
            Screen::HistoricalQuotes => {
                if let Some(message) = self.historical.handle_key(code, &self.ctx) {
                    self.show_popup(&message);
                }
            }
            Screen::CryptoNews => self.news.handle_key(code, &self.ctx),
            Screen::Home => {}
        }
    }

    pub fn navigate(&mut self, nav: Nav) {
        let next = self.screen.transition(nav);
        if nav == Nav::Refresh {
            match next {
                Screen::SpotQuotes => self.spot = SpotQuotesView::new(),
                Screen::HistoricalQuotes => {
                    self.historical = HistoricalView::new();
                    self.ctx.reset_series();
                }
                Screen::CryptoNews => self.news = NewsView::new(),
                Screen::Home => {}
            }
        }

        if next != self.screen {
            info!("{} -> {}", self.screen, next);
        }
        self.screen = next;
    }
}
