//! Logging criterion codec.
//!
//! The module logs a new sample either whenever a temperature moved far
//! enough, or on a fixed interval. Both settings share one raw byte,
//! disambiguated by value range:
//!
//! - `5..=120`: temperature difference, raw / 10.0 Kelvin
//! - `129..=248`: time interval, (raw - 128) * 20 seconds
//!
//! Everything else is invalid. The raw byte is the wire value, so encoding
//! is the identity and round-trips exactly.

use crate::error::ProtocolError;

/// The condition under which the module logs a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LoggingCriterion {
    /// Log when a temperature changed by the threshold. Raw byte 5..=120.
    TemperatureDifference(u8),
    /// Log on a fixed interval. Raw byte 129..=248.
    TimeInterval(u8),
}

impl LoggingCriterion {
    /// Decode the raw wire byte.
    pub fn from_raw(raw: u8) -> Result<Self, ProtocolError> {
        match raw {
            5..=120 => Ok(LoggingCriterion::TemperatureDifference(raw)),
            129..=248 => Ok(LoggingCriterion::TimeInterval(raw)),
            _ => Err(ProtocolError::InvalidLoggingCriterion(raw)),
        }
    }

    /// Build a temperature-difference criterion from Kelvin, quantized to
    /// the 0.1 K wire resolution. Valid range 0.5 K to 12.0 K.
    pub fn from_temperature_difference_k(kelvin: f32) -> Result<Self, ProtocolError> {
        let raw = (kelvin * 10.0).round() as i64;
        if (5..=120).contains(&raw) {
            Ok(LoggingCriterion::TemperatureDifference(raw as u8))
        } else {
            Err(ProtocolError::InvalidLoggingCriterion(
                raw.clamp(0, 255) as u8
            ))
        }
    }

    /// Build a time-interval criterion from seconds, quantized to the 20 s
    /// wire resolution. Valid range 20 s to 2400 s.
    pub fn from_time_interval_s(seconds: u16) -> Result<Self, ProtocolError> {
        let raw = (f64::from(seconds) / 20.0).round() as i64 + 128;
        if (129..=248).contains(&raw) {
            Ok(LoggingCriterion::TimeInterval(raw as u8))
        } else {
            Err(ProtocolError::InvalidLoggingCriterion(
                raw.clamp(0, 255) as u8
            ))
        }
    }

    /// The wire byte. Encoding is the identity.
    pub fn raw(&self) -> u8 {
        match self {
            LoggingCriterion::TemperatureDifference(raw) => *raw,
            LoggingCriterion::TimeInterval(raw) => *raw,
        }
    }

    /// Temperature threshold in Kelvin, if this is a temperature criterion.
    pub fn temperature_difference_k(&self) -> Option<f32> {
        match self {
            LoggingCriterion::TemperatureDifference(raw) => Some(f32::from(*raw) / 10.0),
            LoggingCriterion::TimeInterval(_) => None,
        }
    }

    /// Interval in seconds, if this is a time criterion.
    pub fn time_interval_s(&self) -> Option<u16> {
        match self {
            LoggingCriterion::TemperatureDifference(_) => None,
            LoggingCriterion::TimeInterval(raw) => Some((u16::from(*raw) - 128) * 20),
        }
    }
}

impl std::fmt::Display for LoggingCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingCriterion::TemperatureDifference(_) => {
                write!(f, "{}K", self.temperature_difference_k().unwrap())
            }
            LoggingCriterion::TimeInterval(_) => {
                write!(f, "{}s", self.time_interval_s().unwrap())
            }
        }
    }
}
