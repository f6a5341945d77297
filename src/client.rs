//! Connection lifecycle and the drawing-primitive surface.
//!
//! `RewindClient` owns one buffered writer over a TCP stream to the viewer.
//! Each primitive encodes exactly one command, writes it, and flushes before
//! returning, so the wire always carries complete objects in call order.
//! Transport failures are fatal: they surface as [`ClientError`] and the
//! client is not expected to continue — there is no retry, reconnection, or
//! buffering of unsent commands.
//!
//! The writer is generic so the command surface can be exercised against an
//! in-memory buffer; production construction goes through [`RewindClient::connect`].

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::io::{self, BufWriter, Write};
use std::net::{Shutdown, TcpStream};

use commands::{AreaType, Color, Command, Facility, Side, Unit, encode_command};

/// Host the reference viewer listens on.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the reference viewer listens on.
pub const DEFAULT_PORT: u16 = 9111;

/// Fatal client error. Both variants terminate the stream; the connection
/// carries no sequence numbers, so nothing can be resent after a failure.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to connect to viewer at {addr}: {source}")]
    Connect { addr: String, source: io::Error },
    #[error("failed to write command to viewer: {0}")]
    Write(#[from] io::Error),
    #[error("failed to encode command: {0}")]
    Encode(#[from] commands::CodecError),
}

/// Client for the rewind viewer's write-only command stream.
pub struct RewindClient<W: Write = BufWriter<TcpStream>> {
    writer: W,
}

impl RewindClient {
    /// Connect to a viewer at `host:port` and disable Nagle so each flushed
    /// command leaves immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connect`] when the stream cannot be opened or
    /// configured. There is no retry: callers are not expected to continue
    /// without a viewer.
    pub fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        let addr = format!("{host}:{port}");
        let stream = match TcpStream::connect(&addr) {
            Ok(stream) => stream,
            Err(source) => return Err(ClientError::Connect { addr, source }),
        };
        if let Err(source) = stream.set_nodelay(true) {
            return Err(ClientError::Connect { addr, source });
        }

        tracing::info!(%addr, "connected to viewer");
        Ok(Self {
            writer: BufWriter::new(stream),
        })
    }

    /// Flush any buffered output and shut the connection down. Consumes the
    /// client; a trailing command is guaranteed to reach the viewer before
    /// the socket closes.
    pub fn close(mut self) -> Result<(), ClientError> {
        self.writer.flush()?;
        self.writer.get_ref().shutdown(Shutdown::Both)?;
        tracing::info!("viewer connection closed");
        Ok(())
    }
}

impl<W: Write> RewindClient<W> {
    /// Build a client over an arbitrary writer. Used by tests and embedders
    /// that provide their own transport.
    #[must_use]
    pub fn from_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the client and return the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Draw a circle at world coordinates.
    pub fn circle(
        &mut self,
        x: f64,
        y: f64,
        r: f64,
        color: Color,
        layer: i32,
    ) -> Result<(), ClientError> {
        self.send(&Command::circle(x, y, r, color, layer))
    }

    /// Draw an axis-aligned rectangle given opposite corners.
    pub fn rect(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        layer: i32,
    ) -> Result<(), ClientError> {
        self.send(&Command::rectangle(x1, y1, x2, y2, color, layer))
    }

    /// Draw a straight segment.
    pub fn line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        layer: i32,
    ) -> Result<(), ClientError> {
        self.send(&Command::line(x1, y1, x2, y2, color, layer))
    }

    /// Attach a text popup anchored at a point with a radius hint.
    pub fn popup(
        &mut self,
        x: f64,
        y: f64,
        r: f64,
        text: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.send(&Command::popup(x, y, r, text))
    }

    /// Mark a facility on the grid.
    pub fn facility(&mut self, facility: Facility) -> Result<(), ClientError> {
        self.send(&Command::facility(facility))
    }

    /// Mark a living unit with its full combat state.
    pub fn living_unit(&mut self, unit: Unit) -> Result<(), ClientError> {
        self.send(&Command::unit(unit))
    }

    /// Mark a living unit with only position and health; heading, type,
    /// cooldown, and selection take their neutral defaults. Output is
    /// identical to [`RewindClient::living_unit`] with a defaulted [`Unit`].
    pub fn living_unit_smaller(
        &mut self,
        x: f64,
        y: f64,
        r: f64,
        hp: i32,
        max_hp: i32,
        side: Side,
    ) -> Result<(), ClientError> {
        self.living_unit(Unit {
            x,
            y,
            r,
            hp,
            max_hp,
            side,
            ..Unit::default()
        })
    }

    /// Declare the terrain type of one grid cell.
    pub fn area_description(
        &mut self,
        cell_x: i32,
        cell_y: i32,
        area_type: AreaType,
    ) -> Result<(), ClientError> {
        self.send(&Command::area(cell_x, cell_y, area_type))
    }

    /// Attach a free-text message to the current frame.
    pub fn message(&mut self, text: impl Into<String>) -> Result<(), ClientError> {
        self.send(&Command::message(text))
    }

    /// Finish the current frame. The viewer groups everything received
    /// since the previous sentinel into one renderable snapshot.
    pub fn end_frame(&mut self) -> Result<(), ClientError> {
        self.send(&Command::End)
    }

    /// Run a drawing closure and finish the frame afterwards. A failure
    /// inside the closure propagates without the sentinel — the stream is
    /// already dead at that point.
    pub fn frame<F>(&mut self, draw: F) -> Result<(), ClientError>
    where
        F: FnOnce(&mut Self) -> Result<(), ClientError>,
    {
        draw(self)?;
        self.end_frame()
    }

    /// Encode one command, write it, and flush. Blocks until the bytes are
    /// handed to the transport; ordering on the wire is call order.
    fn send(&mut self, command: &Command) -> Result<(), ClientError> {
        let encoded = encode_command(command)?;
        self.writer.write_all(&encoded)?;
        self.writer.flush()?;
        Ok(())
    }
}
