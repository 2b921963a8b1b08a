//! Device mode, device type, and firmware version types.

use crate::constants::*;
use crate::error::ProtocolError;

/// Operating mode reported by the module at connect time.
///
/// Only [`Mode::OneDl`] is supported by this driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Mode {
    /// Plain BL232 converter, no logging.
    Bl232,
    /// One data line logged (D-LOGG in 1DL configuration).
    OneDl,
    /// Two data lines logged.
    TwoDl,
    /// Module attached to a CAN bus.
    Can,
}

impl TryFrom<u8> for Mode {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            MODE_BL232 => Ok(Mode::Bl232),
            MODE_ONE_DL => Ok(Mode::OneDl),
            MODE_TWO_DL => Ok(Mode::TwoDl),
            MODE_CAN => Ok(Mode::Can),
            _ => Err(ProtocolError::UnknownMode(value)),
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Bl232 => MODE_BL232,
            Mode::OneDl => MODE_ONE_DL,
            Mode::TwoDl => MODE_TWO_DL,
            Mode::Can => MODE_CAN,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Bl232 => write!(f, "BL232"),
            Mode::OneDl => write!(f, "1DL"),
            Mode::TwoDl => write!(f, "2DL"),
            Mode::Can => write!(f, "CAN"),
        }
    }
}

/// Hardware type reported by the identify-type exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DeviceType {
    /// Plain BL232 converter.
    Bl232,
    /// BL-NET ethernet logger.
    BlNet,
    /// BL232/D-LOGG logging one data line.
    Dlogg1Dl,
    /// BL232/D-LOGG logging two data lines.
    Dlogg2Dl,
}

impl TryFrom<u8> for DeviceType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            TYPE_BL232 => Ok(DeviceType::Bl232),
            TYPE_BLNET => Ok(DeviceType::BlNet),
            TYPE_BL232_DLOGG_1DL => Ok(DeviceType::Dlogg1Dl),
            TYPE_BL232_DLOGG_2DL => Ok(DeviceType::Dlogg2Dl),
            _ => Err(ProtocolError::UnknownDeviceType(value)),
        }
    }
}

impl From<DeviceType> for u8 {
    fn from(device_type: DeviceType) -> Self {
        match device_type {
            DeviceType::Bl232 => TYPE_BL232,
            DeviceType::BlNet => TYPE_BLNET,
            DeviceType::Dlogg1Dl => TYPE_BL232_DLOGG_1DL,
            DeviceType::Dlogg2Dl => TYPE_BL232_DLOGG_2DL,
        }
    }
}

/// Firmware version, carried on the wire as a single byte in tenths.
///
/// A raw byte of `29` is firmware 2.9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FirmwareVersion(pub u8);

impl FirmwareVersion {
    /// Oldest firmware that understands the get-logging-criterion command.
    pub const MIN_LOGGING_CRITERION: FirmwareVersion = FirmwareVersion(29);

    /// Version as a floating point number, e.g. 2.9.
    pub fn as_f32(&self) -> f32 {
        self.0 as f32 / 10.0
    }

    /// Whether this firmware answers the get-logging-criterion command.
    pub fn supports_logging_criterion(&self) -> bool {
        *self >= Self::MIN_LOGGING_CRITERION
    }
}

impl std::fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wire_values() {
        assert_eq!(Mode::try_from(0xA8), Ok(Mode::OneDl));
        assert_eq!(Mode::try_from(0xD1), Ok(Mode::TwoDl));
        assert_eq!(Mode::try_from(0xDC), Ok(Mode::Can));
        assert_eq!(u8::from(Mode::OneDl), 0xA8);
        assert_eq!(Mode::try_from(0x00), Err(ProtocolError::UnknownMode(0x00)));
    }

    #[test]
    fn test_device_type_wire_values() {
        assert_eq!(DeviceType::try_from(0xA2), Ok(DeviceType::Bl232));
        assert_eq!(DeviceType::try_from(0xA3), Ok(DeviceType::BlNet));
        assert_eq!(DeviceType::try_from(0xA8), Ok(DeviceType::Dlogg1Dl));
        assert_eq!(
            DeviceType::try_from(0x42),
            Err(ProtocolError::UnknownDeviceType(0x42))
        );
    }

    #[test]
    fn test_firmware_version() {
        let version = FirmwareVersion(29);
        assert_eq!(version.to_string(), "2.9");
        assert!((version.as_f32() - 2.9).abs() < 1e-6);
        assert!(version.supports_logging_criterion());
        assert!(!FirmwareVersion(28).supports_logging_criterion());
        assert!(FirmwareVersion(30).supports_logging_criterion());
    }
}
