use std::io::BufRead;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use thiserror::Error;

/// A notification raised by the host, addressed by element identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Check(String),
    Uncheck(String),
    Click(String),
    Status,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{0}' needs an element id")]
    MissingId(String),
}

impl HostEvent {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Result<Self, ParseError>> {
        let mut words = line.split_whitespace();
        let command = words.next()?;
        let id = words.next().map(str::to_string);

        let with_id = |make: fn(String) -> HostEvent| {
            id.clone()
                .map(make)
                .ok_or_else(|| ParseError::MissingId(command.to_string()))
        };
        let event = match command {
            "check" => with_id(HostEvent::Check),
            "uncheck" => with_id(HostEvent::Uncheck),
            "click" => with_id(HostEvent::Click),
            "status" => Ok(HostEvent::Status),
            "quit" | "exit" => Ok(HostEvent::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        };
        Some(event)
    }
}

/// Delivers host events to a single consumer thread.
pub struct PlatformLayer {
    receiver: Receiver<HostEvent>,
}

impl PlatformLayer {
    pub fn new() -> (Self, Sender<HostEvent>) {
        let (sender, receiver) = channel();
        (Self { receiver }, sender)
    }

    /// Reads commands from `input` on a helper thread. End of input sends
    /// [`HostEvent::Quit`].
    pub fn from_reader<R>(input: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (platform, sender) = Self::new();
        thread::spawn(move || pump_lines(input, sender));
        platform
    }

    pub fn stdin() -> Self {
        Self::from_reader(std::io::BufReader::new(std::io::stdin()))
    }

    /// Blocks for the next event. A closed channel reads as `Quit`.
    pub fn next_event(&self) -> HostEvent {
        self.receiver.recv().unwrap_or(HostEvent::Quit)
    }
}

fn pump_lines<R: BufRead>(input: R, sender: Sender<HostEvent>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(%err, "failed to read host input");
                break;
            }
        };
        match HostEvent::parse(&line) {
            Some(Ok(event)) => {
                let quit = event == HostEvent::Quit;
                if sender.send(event).is_err() || quit {
                    return;
                }
            }
            Some(Err(err)) => tracing::warn!(%err, "ignoring host input"),
            None => {}
        }
    }
    let _ = sender.send(HostEvent::Quit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            HostEvent::parse("check toggle_menu"),
            Some(Ok(HostEvent::Check("toggle_menu".into())))
        );
        assert_eq!(
            HostEvent::parse("  click   toggle_battle "),
            Some(Ok(HostEvent::Click("toggle_battle".into())))
        );
        assert_eq!(HostEvent::parse("status"), Some(Ok(HostEvent::Status)));
        assert_eq!(HostEvent::parse(""), None);
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            HostEvent::parse("uncheck"),
            Some(Err(ParseError::MissingId("uncheck".into())))
        );
        assert_eq!(
            HostEvent::parse("dance toggle_menu"),
            Some(Err(ParseError::UnknownCommand("dance".into())))
        );
    }

    #[test]
    fn reader_pump_ends_with_quit() {
        let input = std::io::Cursor::new("check toggle_ambient\nbogus\n\nuncheck toggle_ambient\n");
        let platform = PlatformLayer::from_reader(input);
        assert_eq!(
            platform.next_event(),
            HostEvent::Check("toggle_ambient".into())
        );
        assert_eq!(
            platform.next_event(),
            HostEvent::Uncheck("toggle_ambient".into())
        );
        assert_eq!(platform.next_event(), HostEvent::Quit);
        assert_eq!(platform.next_event(), HostEvent::Quit);
    }
}
