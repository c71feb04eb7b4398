//! Console presentation adapters for the terminal shell
//!
//! `ConsoleNotifier` prints notices for the user; `ShellNavigator` records
//! where the flow asked to go so the shell loop can act on it.

use std::io::{self, Write};
use std::sync::Mutex;

use errant_player_ports::outbound::{
    Destination, NavigationPort, Notice, NoticeLevel, NotificationPort,
};

/// Writes notices to a terminal stream, one per line
pub struct ConsoleNotifier {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleNotifier {
    pub fn stdout() -> Self {
        Self::to_writer(io::stdout())
    }

    pub fn to_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }
}

fn render(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Success => "✔",
        NoticeLevel::Error => "✖",
    };
    format!("{} {}", marker, notice.message)
}

impl NotificationPort for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(message = %notice.message, "Notice"),
            NoticeLevel::Error => tracing::debug!(message = %notice.message, "Error notice"),
        }
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(out, "{}", render(&notice)).and_then(|()| out.flush()) {
            tracing::error!("Failed to write notice: {}", e);
        }
    }
}

/// Remembers the last navigation request until the shell consumes it
#[derive(Default)]
pub struct ShellNavigator {
    pending: Mutex<Option<Destination>>,
}

impl ShellNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The requested destination, clearing it
    pub fn take(&self) -> Option<Destination> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }
}

impl NavigationPort for ShellNavigator {
    fn navigate(&self, destination: Destination) {
        tracing::debug!(?destination, "Navigation requested");
        *self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Cloneable in-memory sink
    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_notices_are_marked_by_level() {
        let sink = Sink::default();
        let notifier = ConsoleNotifier::to_writer(sink.clone());

        notifier.notify(Notice::success("Welcome, Ximena! Your legend begins..."));
        notifier.notify(Notice::error("Please choose a race before continuing."));

        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert_eq!(
            text,
            "✔ Welcome, Ximena! Your legend begins...\n✖ Please choose a race before continuing.\n"
        );
    }

    #[test]
    fn test_navigator_hands_out_destination_once() {
        let navigator = ShellNavigator::new();
        assert!(navigator.take().is_none());

        navigator.navigate(Destination::Start);

        assert_eq!(navigator.take(), Some(Destination::Start));
        assert!(navigator.take().is_none());
    }
}
