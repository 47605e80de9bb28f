use crate::config::AppConfig;
use crate::data::PriceClient;
use crate::event::{AppEvent, Event, EventHandler};
use crate::state::TickerState;
use crate::ui::LayoutManager;
use chrono::Local;
use color_eyre::Result;
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal,
};
use tracing::{debug, info};

pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Application.
pub struct App {
    pub running: bool,
    pub state: TickerState,
    pub layout: LayoutManager,
    client: PriceClient,
    /// Set while a spawned fetch has not reported back yet.
    fetch_in_flight: bool,
    events: EventHandler,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_events(config, EventHandler::new(config.refresh_interval))
    }

    fn with_events(config: &AppConfig, events: EventHandler) -> Self {
        Self {
            running: true,
            state: TickerState::new(config.symbol.clone(), config.convert.clone()),
            layout: LayoutManager::new(&config.symbol),
            client: PriceClient::new(config),
            fetch_in_flight: false,
            events,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| {
                    self.layout
                        .render(frame, &self.state, self.fetch_in_flight, frame.area())
                })?;
            }

            let event = self.events.next().await?;
            needs_redraw = self.on_event(event);
        }

        let history = self.state.history();
        if history.is_empty() {
            info!("window closed before any quote arrived");
        } else {
            info!(
                samples = history.len(),
                last_price = ?history.last_price(),
                name = ?self.state.latest().map(|q| q.name.as_str()),
                "window closed"
            );
        }
        Ok(())
    }

    /// Handles one queued event; returns whether the screen needs a redraw.
    pub fn on_event(&mut self, event: Event) -> bool {
        match event {
            Event::Refresh => {
                self.start_fetch();
                true
            }
            Event::Crossterm(event) => match event {
                crossterm::event::Event::Key(key_event) => {
                    self.handle_key_event(key_event);
                    false
                }
                crossterm::event::Event::Resize(_, _) => true,
                _ => false,
            },
            Event::App(AppEvent::Quit) => {
                self.quit();
                false
            }
            Event::App(AppEvent::QuoteFetched(result)) => {
                self.fetch_in_flight = false;
                let timestamp = Local::now().format(TIME_FORMAT).to_string();
                self.state.apply(result, timestamp);
                true
            }
        }
    }

    /// Spawns one fetch unless the previous tick's fetch is still running.
    fn start_fetch(&mut self) {
        if self.fetch_in_flight {
            debug!("refresh tick skipped, previous fetch still in flight");
            return;
        }
        self.fetch_in_flight = true;

        let client = self.client.clone();
        let sender = self.events.sender();
        debug!(symbol = client.symbol(), convert = client.convert(), "fetching quote");
        tokio::spawn(async move {
            let result = client.fetch_quote().await;
            let _ = sender.send(Event::App(AppEvent::QuoteFetched(result)));
        });
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.events.send(AppEvent::Quit),
            KeyCode::Char('c') | KeyCode::Char('C') if key_event.modifiers == KeyModifiers::CONTROL => {
                self.events.send(AppEvent::Quit)
            }
            _ => {}
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
