//! Control channel framing
//!
//! One JSON value per line. Both ends use the same framing, so a dependency
//! process written in any language only has to print `"started"` followed by
//! a newline to descriptor 3.

use std::io::{self, BufRead, BufReader, Read, Write};

use serde_json::Value;
use tracing::debug;

/// Descriptor the child finds its end of the control channel on
pub const CONTROL_FD: i32 = 3;

/// Environment variable announcing the control descriptor to the child
pub const CONTROL_FD_ENV: &str = "RIGGER_CONTROL_FD";

const STARTED: &str = "started";
const CLOSE: &str = "close";

/// A message on the control channel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMessage {
    /// Child is ready
    Started,
    /// Parent asks the child to shut down
    Close,
    /// Anything else; left to higher layers
    Other(Value),
}

impl ControlMessage {
    /// Decode one line. Blank lines and invalid JSON yield `None`.
    pub fn decode(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(value) => Some(Self::from_value(value)),
            Err(e) => {
                debug!(%line, error = %e, "ignoring malformed control line");
                None
            }
        }
    }

    pub fn from_value(value: Value) -> Self {
        match value.as_str() {
            Some(STARTED) => ControlMessage::Started,
            Some(CLOSE) => ControlMessage::Close,
            _ => ControlMessage::Other(value),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ControlMessage::Started => Value::from(STARTED),
            ControlMessage::Close => Value::from(CLOSE),
            ControlMessage::Other(value) => value.clone(),
        }
    }

    /// Encode as a single newline-terminated line
    pub fn encode(&self) -> String {
        let mut line = self.to_value().to_string();
        line.push('\n');
        line
    }

    /// Write this message and flush
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.encode().as_bytes())?;
        writer.flush()
    }
}

/// Parent-side writer of the control channel
pub trait ControlWriter: Write + Send {
    /// Called once after `"close"` has been written; sockets shut their write
    /// half here so the child also sees end-of-stream.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(unix)]
impl ControlWriter for std::os::unix::net::UnixStream {
    fn finish(&mut self) -> io::Result<()> {
        self.shutdown(std::net::Shutdown::Write)
    }
}

/// Child side of the control channel
///
/// ```no_run
/// # fn main() -> std::io::Result<()> {
/// let mut control = rigger::infrastructure::process::ChildControl::from_env()?;
/// // ... bind sockets, load fixtures ...
/// control.signal_ready()?;
/// control.wait_for_close()?;
/// # Ok(())
/// # }
/// ```
pub struct ChildControl<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl<R: Read, W: Write> ChildControl<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Tell the parent we are ready
    pub fn signal_ready(&mut self) -> io::Result<()> {
        ControlMessage::Started.write_to(&mut self.writer)
    }

    /// Send an application-defined message
    pub fn send(&mut self, value: Value) -> io::Result<()> {
        ControlMessage::Other(value).write_to(&mut self.writer)
    }

    /// Next decodable message, or `None` once the parent hung up
    pub fn recv(&mut self) -> io::Result<Option<ControlMessage>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if let Some(message) = ControlMessage::decode(&line) {
                return Ok(Some(message));
            }
        }
    }

    /// Block until the parent sends `"close"` or hangs up
    pub fn wait_for_close(&mut self) -> io::Result<()> {
        while let Some(message) = self.recv()? {
            if message == ControlMessage::Close {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
impl ChildControl<std::os::unix::net::UnixStream, std::os::unix::net::UnixStream> {
    /// Wrap one end of a socket pair
    pub fn from_stream(stream: std::os::unix::net::UnixStream) -> io::Result<Self> {
        let reader = stream.try_clone()?;
        Ok(Self::new(reader, stream))
    }

    /// Open the channel the parent handed us at spawn.
    ///
    /// Fails with `NotFound` when not started by Rigger, and with
    /// `AlreadyExists` when called a second time.
    pub fn from_env() -> io::Result<Self> {
        use std::os::fd::FromRawFd;
        use std::sync::atomic::{AtomicBool, Ordering};

        static TAKEN: AtomicBool = AtomicBool::new(false);

        let fd: i32 = std::env::var(CONTROL_FD_ENV)
            .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "no control channel"))?
            .parse()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "bad control descriptor"))?;

        if TAKEN.swap(true, Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "control channel already opened",
            ));
        }

        // SAFETY: the parent passed this descriptor for our exclusive use and
        // TAKEN ensures it gets exactly one owner in this process.
        let stream = unsafe { std::os::unix::net::UnixStream::from_raw_fd(fd) };
        Self::from_stream(stream)
    }
}
