//! Byte channel abstraction.
//!
//! The transceiver does not open or configure the physical serial port;
//! it drives any duplex byte channel with a bounded read timeout. The
//! adapter for a concrete transport (USB serial port, TCP bridge, pty)
//! lives with the caller.

use std::io;

/// A duplex byte channel with a bounded read timeout.
///
/// The channel is exclusively owned by one transceiver; there is no
/// concurrent access and at most one request is in flight at a time.
pub trait ByteChannel {
    /// Discard any stale bytes buffered on the receive side.
    fn discard_input(&mut self) -> io::Result<()>;

    /// Write the whole frame.
    fn send(&mut self, frame: &[u8]) -> io::Result<()>;

    /// Read up to `buf.len()` bytes, blocking until the buffer is full or
    /// the channel's read timeout expires, whichever comes first. Returns
    /// the number of bytes actually read; a timeout is not an error, it
    /// shows up as a short count.
    fn receive(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}
