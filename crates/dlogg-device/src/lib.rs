//! D-LOGG Device Transceiver
//!
//! This crate drives the synchronous command/response exchange against a
//! D-LOGG data logger module over an abstract duplex byte channel. Frame
//! encoding and decoding live in `dlogg-protocol`; this crate owns the
//! exchange contract: stale-input flushing, exact-length bounded reads,
//! the post-identify settle delay, and the read session with its mandatory
//! end-read.
//!
//! Opening and configuring the physical serial port is the caller's
//! concern: implement [`ByteChannel`] for the transport and hand it to
//! [`DLoggDevice::open`]. The module runs at 115200 baud with DTR high and
//! RTS low; a read timeout of one second is known to work.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut device = DLoggDevice::open(channel)?;
//! println!("firmware {}", device.firmware_version()?);
//! for frame in device.fetch_all_data()? {
//!     println!("{:?}", frame.values().inputs[0]);
//! }
//! ```

mod channel;
mod device;
mod error;

pub use channel::*;
pub use device::*;
pub use error::*;

pub use dlogg_protocol as protocol;
