// Manual refresh: the retry affordance of the offers view
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::Notify;
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Help,
    Quit,
    Unknown,
}

pub fn parse_command(line: &str) -> Command {
    match line.trim().to_lowercase().as_str() {
        "" | "r" | "refresh" | "retry" => Command::Refresh,
        "h" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Unknown,
    }
}

pub const HELP: &str = "Commands:\n\
    <Enter> / refresh - fetch offers again\n\
    help - this list\n\
    quit - stop";

/// Signals shared between the input listener and the main loop.
#[derive(Default)]
pub struct RefreshSignals {
    pub refresh: Notify,
    pub quit: Notify,
    /// Fired once the command input is gone and no manual refresh can follow.
    pub input_closed: Notify,
}

/// Reads commands line by line until quit or end of input.
pub async fn listen_for_commands<R>(reader: R, signals: Arc<RefreshSignals>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("Input closed, manual refresh disabled.");
                signals.input_closed.notify_one();
                return;
            }
            Err(e) => {
                warn!("Failed to read command: {}", e);
                signals.input_closed.notify_one();
                return;
            }
        };

        match parse_command(&line) {
            Command::Refresh => {
                info!("Manual refresh requested.");
                signals.refresh.notify_one();
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => {
                info!("Quit requested.");
                signals.quit.notify_one();
                return;
            }
            Command::Unknown => println!("Unknown command: {}. Type 'help'.", line.trim()),
        }
    }
}

/// Why the main loop woke up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Timer,
    Manual,
    Quit,
    /// No input left and no timer configured: nothing can trigger another refresh.
    InputClosed,
}

/// Waits for the next refresh trigger. A closed input only ends the wait
/// when there is no refresh interval to fall back on.
pub async fn next_wake(signals: &RefreshSignals, interval: Option<Duration>) -> Wake {
    let timer = async {
        match interval {
            Some(period) => sleep(period).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::select! {
        _ = timer => Wake::Timer,
        _ = signals.refresh.notified() => Wake::Manual,
        _ = signals.quit.notified() => Wake::Quit,
        _ = signals.input_closed.notified(), if interval.is_none() => Wake::InputClosed,
    }
}

pub fn spawn_stdin_listener(signals: Arc<RefreshSignals>) {
    tokio::spawn(async move {
        info!("Starting command listener...");
        listen_for_commands(BufReader::new(tokio::io::stdin()), signals).await;
    });
}
