//! Timed line input.
//!
//! A background thread reads lines and sends them over a channel. Each
//! prompt waits on the channel with a deadline, so a prompt ends either when
//! a line arrives or when the timeout elapses, whichever comes first.

use std::io::{BufRead, BufReader};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// One answer to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line of text, without the trailing newline.
    Line(String),
    /// The prompt timed out before a line arrived.
    Timeout,
    /// The input stream ended.
    Closed,
}

impl Input {
    /// Convenience constructor for a line.
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }
}

/// Lines from a reader, delivered with a per-prompt deadline.
pub struct TimedLines {
    rx: Receiver<String>,
}

impl TimedLines {
    /// Start reading `reader` on a background thread.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so
    /// a garbled line still reaches the session as text. The thread stops at
    /// end of input or on a read error; both surface as [`Input::Closed`].
    pub fn spawn<R: BufRead + Send + 'static>(mut reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }
                if tx.send(decode_line(&buf)).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Read lines from standard input.
    pub fn stdin() -> Self {
        Self::spawn(BufReader::new(std::io::stdin()))
    }

    /// Wait up to `timeout` for the next line.
    pub fn wait_line(&self, timeout: Duration) -> Input {
        match self.rx.recv_timeout(timeout) {
            Ok(line) => Input::Line(line),
            Err(RecvTimeoutError::Timeout) => Input::Timeout,
            Err(RecvTimeoutError::Disconnected) => Input::Closed,
        }
    }
}

/// Strip the line ending and decode lossily.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    /// A reader that blocks before yielding its data.
    struct Slow {
        delay: Duration,
        data: Cursor<Vec<u8>>,
        waited: bool,
    }

    impl Read for Slow {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.waited {
                thread::sleep(self.delay);
                self.waited = true;
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn lines_then_closed() {
        let lines = TimedLines::spawn(Cursor::new("1\ninventory\n"));
        let wait = Duration::from_secs(5);
        assert_eq!(lines.wait_line(wait), Input::line("1"));
        assert_eq!(lines.wait_line(wait), Input::line("inventory"));
        assert_eq!(lines.wait_line(wait), Input::Closed);
    }

    #[test]
    fn invalid_utf8_line_is_delivered() {
        let lines = TimedLines::spawn(Cursor::new(b"\xff\xfe\n1\r\nlast".to_vec()));
        let wait = Duration::from_secs(5);
        assert_eq!(lines.wait_line(wait), Input::line("\u{FFFD}\u{FFFD}"));
        assert_eq!(lines.wait_line(wait), Input::line("1"));
        assert_eq!(lines.wait_line(wait), Input::line("last"));
        assert_eq!(lines.wait_line(wait), Input::Closed);
    }

    #[test]
    fn slow_reader_times_out_first() {
        let slow = Slow {
            delay: Duration::from_millis(500),
            data: Cursor::new(b"2\n".to_vec()),
            waited: false,
        };
        let lines = TimedLines::spawn(BufReader::new(slow));
        assert_eq!(lines.wait_line(Duration::from_millis(20)), Input::Timeout);
        assert_eq!(lines.wait_line(Duration::from_secs(5)), Input::line("2"));
    }
}
