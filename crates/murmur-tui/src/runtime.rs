//! Async runtime
//!
//! Event loop that drives terminal I/O and coordinates between the App state
//! machine and the connection lifecycle manager. Uses `tokio::select!` to
//! handle terminal events, subscription events, and the reconnect timer
//! concurrently.
//!
//! All work runs on this one task; the only other task per live subscription
//! is the transport bridge, which communicates exclusively over a channel.

use std::io::{self, Stdout, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use murmur_app::{App, AppAction, AppEvent, KeyInput};
use murmur_client::transport::{self, Subscription};
use murmur_client::{
    ClientAction, ClientError, Connection, ConnectionState, EndpointError, Endpoints, FixedDelay,
    Publisher, TransportEvent,
};
use murmur_proto::CloseInfo;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::time::{Instant, Interval};

use crate::{InputState, ui};

/// How often the idle loop wakes up to deliver a tick.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Lifecycle violation in the connection state machine.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// The server base URL could not be resolved into endpoints.
    #[error("invalid server endpoint: {0}")]
    Endpoint(#[from] EndpointError),
}

/// What woke the event loop.
enum Wake {
    Terminal(Option<Result<Event, io::Error>>),
    Transport(Option<TransportEvent>),
    Reconnect,
    Tick,
}

/// Async runtime for the TUI.
///
/// Manages terminal setup/teardown, the main event loop, and coordination
/// between the App and Connection state machines.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    app: App,
    input: InputState,
    conn: Connection<FixedDelay>,
    endpoints: Endpoints,
    publisher: Publisher,
    subscription: Option<Subscription>,
    reconnect_deadline: Option<Instant>,
}

impl Runtime {
    /// Create a runtime for the given server base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the terminal cannot
    /// be initialized.
    pub fn new(server: &str) -> Result<Self, RuntimeError> {
        let endpoints = Endpoints::from_base(server)?;
        let publisher = Publisher::new(&endpoints);

        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

        Ok(Self {
            terminal,
            app: App::new(),
            input: InputState::new(),
            conn: Connection::connect(FixedDelay::default()),
            endpoints,
            publisher,
            subscription: None,
            reconnect_deadline: None,
        })
    }

    /// Run the main event loop until the user quits.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.open_subscription();
        let actions = self.app.handle(AppEvent::Connecting);
        let _ = self.process_app_actions(actions)?;
        self.render()?;

        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK_INTERVAL);

        loop {
            let wake = self.next_wake(&mut events, &mut tick).await;
            if self.handle_wake(wake)? {
                break;
            }
        }

        if let Some(sub) = &self.subscription {
            sub.stop();
        }
        Ok(())
    }

    /// Wait for the next thing to happen.
    async fn next_wake(&mut self, events: &mut EventStream, tick: &mut Interval) -> Wake {
        // Fires only while a reconnect is actually pending; otherwise parks.
        let deadline = self.reconnect_deadline;
        let reconnect_timer = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        match self.subscription.as_mut() {
            Some(sub) => {
                tokio::select! {
                    event = events.next() => Wake::Terminal(event),
                    event = sub.events.recv() => Wake::Transport(event),
                    () = reconnect_timer => Wake::Reconnect,
                    _ = tick.tick() => Wake::Tick,
                }
            },
            None => {
                tokio::select! {
                    event = events.next() => Wake::Terminal(event),
                    () = reconnect_timer => Wake::Reconnect,
                    _ = tick.tick() => Wake::Tick,
                }
            },
        }
    }

    /// Dispatch one wakeup. Returns `true` when the application should quit.
    fn handle_wake(&mut self, wake: Wake) -> Result<bool, RuntimeError> {
        match wake {
            Wake::Terminal(event) => self.handle_terminal_event(event),
            Wake::Transport(Some(event)) => {
                self.handle_transport_event(event)?;
                Ok(false)
            },
            Wake::Transport(None) => {
                // Transport task ended without reporting a close.
                self.handle_transport_event(TransportEvent::Closed(CloseInfo::abnormal(
                    "transport task ended",
                )))?;
                Ok(false)
            },
            Wake::Reconnect => {
                self.reconnect()?;
                Ok(false)
            },
            Wake::Tick => {
                let actions = self.app.handle(AppEvent::Tick);
                self.process_app_actions(actions)
            },
        }
    }

    /// Handle a terminal event. Returns `true` when the application should
    /// quit.
    fn handle_terminal_event(
        &mut self,
        event: Option<Result<Event, io::Error>>,
    ) -> Result<bool, RuntimeError> {
        match event {
            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                match Self::convert_key(key.code) {
                    Some(key_input) => {
                        let actions = self.input.handle_key(key_input, &mut self.app);
                        self.process_app_actions(actions)
                    },
                    None => Ok(false),
                }
            },
            Some(Ok(Event::Resize(cols, rows))) => {
                let actions = self.app.handle(AppEvent::Resize(cols, rows));
                self.process_app_actions(actions)
            },
            Some(Ok(_)) => Ok(false),
            Some(Err(e)) => Err(RuntimeError::Io(e)),
            None => Ok(true),
        }
    }

    /// Feed one transport fact through the connection state machine and
    /// execute the resulting instructions.
    fn handle_transport_event(&mut self, event: TransportEvent) -> Result<(), RuntimeError> {
        let phase_change = match &event {
            TransportEvent::Opened => Some(AppEvent::Connected),
            TransportEvent::Closed(_) => None, // classified below
            TransportEvent::Frame(_) => None,
        };
        let was_close = matches!(event, TransportEvent::Closed(_));

        let actions = self.conn.handle(event)?;

        if was_close {
            // The subscription task is done; drop our handle so the next one
            // is the only live subscription.
            self.subscription = None;
            if let ConnectionState::Closed { intentional, .. } = *self.conn.state() {
                let app_actions = self.app.handle(AppEvent::Disconnected { intentional });
                let _ = self.process_app_actions(app_actions)?;
            }
        } else if let Some(app_event) = phase_change {
            let app_actions = self.app.handle(app_event);
            let _ = self.process_app_actions(app_actions)?;
        }

        for action in actions {
            match action {
                ClientAction::Deliver(event) => {
                    let app_actions = self.app.handle(AppEvent::EventReceived(event));
                    let _ = self.process_app_actions(app_actions)?;
                },
                ClientAction::ScheduleReconnect { delay } => {
                    tracing::info!(?delay, "scheduling reconnect");
                    self.reconnect_deadline = Some(Instant::now() + delay);
                },
            }
        }

        Ok(())
    }

    /// Re-enter the connect cycle after the reconnect delay fired.
    fn reconnect(&mut self) -> Result<(), RuntimeError> {
        self.reconnect_deadline = None;
        self.conn.reconnect()?;
        self.open_subscription();

        let actions = self.app.handle(AppEvent::Connecting);
        let _ = self.process_app_actions(actions)?;
        Ok(())
    }

    /// Spawn the transport task for the subscribe endpoint.
    fn open_subscription(&mut self) {
        self.subscription = Some(transport::subscribe(self.endpoints.subscribe.clone()));
    }

    /// Execute actions produced by the App. Returns `true` on quit.
    fn process_app_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, RuntimeError> {
        for action in actions {
            match action {
                AppAction::Render => self.render()?,
                AppAction::ScrollToBottom => {
                    self.app.scroll_to_bottom();
                    self.render()?;
                },
                AppAction::Publish { text } => self.spawn_publish(text),
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Fire-and-forget one outgoing message. Failure is log-only; the input
    /// buffer was already cleared at submit time.
    fn spawn_publish(&self, text: String) {
        let publisher = self.publisher.clone();
        tokio::spawn(async move {
            if let Err(error) = publisher.publish(text).await {
                tracing::warn!(%error, "publish failed");
            }
        });
    }

    /// Render the UI.
    fn render(&mut self) -> Result<(), RuntimeError> {
        self.terminal.draw(|frame| {
            ui::render(frame, &self.app, &self.input);
        })?;
        Ok(())
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if let Some(sub) = &self.subscription {
            sub.stop();
        }
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
