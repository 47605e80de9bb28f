use crate::data::{FetchError, Quote};
use color_eyre::eyre::OptionExt;
use futures_util::StreamExt;
use ratatui::crossterm::event::Event as CrosstermEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Representation of all possible events.
#[derive(Debug)]
pub enum Event {
    /// The refresh timer fired; the first one fires immediately.
    Refresh,
    /// Crossterm events.
    Crossterm(CrosstermEvent),
    /// Application events.
    App(AppEvent),
}

#[derive(Debug)]
pub enum AppEvent {
    Quit,
    /// A fetch task finished.
    QuoteFetched(Result<Quote, FetchError>),
}

/// Terminal and timer event handler.
#[derive(Debug)]
pub struct EventHandler {
    sender: mpsc::UnboundedSender<Event>,
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Spawns the task that feeds refresh ticks and terminal input into the queue.
    pub fn new(refresh_interval: Duration) -> Self {
        Self::spawn(refresh_interval, true)
    }

    /// Refresh ticks only, no terminal input.
    #[cfg(test)]
    pub fn timer_only(refresh_interval: Duration) -> Self {
        Self::spawn(refresh_interval, false)
    }

    fn spawn(refresh_interval: Duration, read_terminal: bool) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let actor = EventTask::new(sender.clone(), refresh_interval);
        tokio::spawn(async move { actor.run(read_terminal).await });
        Self { sender, receiver }
    }

    pub async fn next(&mut self) -> color_eyre::Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_eyre("Failed to receive event")
    }

    pub fn send(&self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(app_event));
    }

    /// Handle for background tasks to post results back onto the UI queue.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

struct EventTask {
    sender: mpsc::UnboundedSender<Event>,
    refresh_interval: Duration,
}

impl EventTask {
    fn new(sender: mpsc::UnboundedSender<Event>, refresh_interval: Duration) -> Self {
        Self {
            sender,
            refresh_interval,
        }
    }

    async fn run(self, read_terminal: bool) -> color_eyre::Result<()> {
        let mut reader = read_terminal.then(crossterm::event::EventStream::new);
        let mut refresh = tokio::time::interval(self.refresh_interval);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let refresh_delay = refresh.tick();
            let crossterm_event = async {
                match reader.as_mut() {
                    Some(reader) => reader.next().await,
                    None => std::future::pending().await,
                }
            };
            tokio::select! {
              _ = self.sender.closed() => {
                break;
              }
              _ = refresh_delay => {
                self.send(Event::Refresh);
              }
              Some(Ok(evt)) = crossterm_event => {
                self.send(Event::Crossterm(evt));
              }
            };
        }
        Ok(())
    }

    fn send(&self, event: Event) {
        let _ = self.sender.send(event);
    }
}
