use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Input for the viewer loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Periodic tick (expires transient messages)
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
    /// Terminal input could not be read
    Error(String),
}

impl Event {
    /// Keep key presses and resizes; drop releases, mouse and focus events
    fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CrosstermEvent::Resize(w, h) => Some(Self::Resize(w, h)),
            _ => None,
        }
    }
}

/// Reads terminal input on a background task and forwards it with ticks
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(read_events(sender, cancel.clone(), tick_rate));
        Self { receiver, cancel }
    }

    /// Next event; None once the reader has stopped
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Stop reading terminal input
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn read_events(sender: mpsc::UnboundedSender<Event>, cancel: CancellationToken, tick_rate: Duration) {
    let mut reader = EventStream::new();
    let mut ticks = tokio::time::interval(tick_rate);
    // A slow frame should not cause a burst of catch-up ticks
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticks.tick() => Some(Event::Tick),
            input = reader.next().fuse() => match input {
                Some(Ok(event)) => Event::from_crossterm(event),
                Some(Err(e)) => Some(Event::Error(e.to_string())),
                None => break,
            },
        };

        if let Some(event) = event
            && sender.send(event).is_err()
        {
            // Receiver gone, nobody is listening
            break;
        }
    }
}
