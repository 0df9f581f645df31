//! Loading spinner shown on stderr while a request is in flight.
//!
//! The visible form of the chat view's busy flag: started before each
//! network call, stopped when the response (or error) comes back.

use std::io::Write;
use tokio::task::JoinHandle;

/// Braille animation frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval in milliseconds.
const FRAME_MS: u64 = 80;

/// A terminal spinner running as a background tokio task.
pub struct Spinner {
    handle: JoinHandle<()>,
}

impl Spinner {
    /// Start a spinner with a fixed message (e.g. "Researching...").
    pub fn start(message: &str) -> Self {
        let message = message.to_string();
        let handle = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_millis(FRAME_MS));
            let mut frame_idx = 0usize;
            loop {
                interval.tick().await;
                let frame = FRAMES[frame_idx % FRAMES.len()];
                let _ = write!(std::io::stderr(), "\r  {frame} {message}");
                let _ = std::io::stderr().flush();
                frame_idx += 1;
            }
        });

        Self { handle }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
        clear_line();
    }
}

/// Clear the current spinner line on stderr.
pub fn clear_line() {
    let _ = write!(std::io::stderr(), "\r\x1b[2K");
    let _ = std::io::stderr().flush();
}
