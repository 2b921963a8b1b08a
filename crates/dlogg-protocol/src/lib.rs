//! D-LOGG Serial Protocol Codec
//!
//! This crate provides types and codecs for the binary protocol spoken by
//! D-LOGG data logger adapters attached to a UVR1611 heating controller.
//! It is a pure codec layer: commands encode to byte frames, responses
//! decode into structured readings, and no I/O happens here. The companion
//! `dlogg-device` crate drives the actual command/response exchange.
//!
//! # Protocol Overview
//!
//! The module answers single-opcode commands with fixed-length responses.
//! Logged samples live in a cyclic 8192-slot memory addressed by a 3-byte
//! wire encoding ([`Address`]); several frames carry a trailing additive
//! checksum ([`checksum`]). Sensor state arrives as bit-packed frames of 16
//! input channels, 13 outputs, and 4 pump speeds ([`SensorFrame`]).
//!
//! # Example
//!
//! ```rust
//! use dlogg_protocol::{Address, Command};
//!
//! let frame = Command::GetDataRange(Address::new(0)).encode();
//! assert_eq!(frame, [0xAC, 0x00, 0x00, 0x00, 0x01, 0xAD]);
//! ```

mod address;
pub mod checksum;
mod commands;
mod constants;
mod criterion;
mod error;
mod frame;
mod header;
mod types;

pub use address::*;
pub use commands::*;
pub use constants::*;
pub use criterion::*;
pub use error::*;
pub use frame::*;
pub use header::*;
pub use types::*;
