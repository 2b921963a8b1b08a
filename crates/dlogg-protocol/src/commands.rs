//! Commands that can be sent to the module.

use bytes::BufMut;

use crate::address::Address;
use crate::constants::*;
use crate::criterion::LoggingCriterion;

/// Commands that can be sent to the module.
///
/// Each command encodes to a complete wire frame and knows the exact length
/// of the response it expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Query the operating mode.
    GetMode,

    /// Query the firmware version.
    GetFirmwareVersion,

    /// Query the logging criterion. Requires firmware version >= 2.9.
    GetLoggingCriterion,

    /// Program a new logging criterion.
    SetLoggingCriterion(LoggingCriterion),

    /// Read the memory header.
    GetHeader,

    /// Read the current sensor values.
    GetCurrentData,

    /// Read one logged frame at the given address.
    GetDataRange(Address),

    /// Terminate a read session.
    EndRead,

    /// Erase the logging memory.
    ClearMemory,

    /// Vendor identify-type exchange. The next command must wait for the
    /// firmware settle delay, see the transceiver.
    IdentifyType,
}

impl Command {
    /// Encode the complete wire frame, including the trailing checksum byte
    /// where the command requires one.
    pub fn encode(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(8);
        match self {
            Command::GetMode => frame.put_u8(CMD_GET_MODE),
            Command::GetFirmwareVersion => frame.put_u8(CMD_GET_FIRMWARE_VERSION),
            Command::GetLoggingCriterion => frame.put_u8(CMD_GET_LOGGING_CRITERION),
            Command::SetLoggingCriterion(criterion) => {
                frame.put_u8(CMD_SET_LOGGING_CRITERION);
                frame.put_u8(criterion.raw());
            }
            Command::GetHeader => frame.put_u8(CMD_GET_HEADER),
            Command::GetCurrentData => frame.put_u8(CMD_GET_CURRENT_DATA),
            Command::GetDataRange(address) => {
                frame.put_u8(CMD_GET_DATA_RANGE);
                frame.put_slice(&address.wire());
                frame.put_u8(DATA_RANGE_FRAME_COUNT);
            }
            Command::EndRead => frame.put_u8(CMD_END_READ),
            Command::ClearMemory => frame.put_u8(CMD_CLEAR_MEMORY),
            Command::IdentifyType => frame.put_slice(&IDENTIFY_PAYLOAD),
        }
        if self.needs_checksum() {
            crate::checksum::append_checksum(&mut frame);
        }
        frame
    }

    /// Exact number of response bytes the module sends for this command.
    pub fn response_len(&self) -> usize {
        match self {
            Command::GetMode => RX_LEN_GET_MODE,
            Command::GetFirmwareVersion => RX_LEN_GET_FIRMWARE_VERSION,
            Command::GetLoggingCriterion => RX_LEN_GET_LOGGING_CRITERION,
            Command::SetLoggingCriterion(_) => RX_LEN_SET_LOGGING_CRITERION,
            Command::GetHeader => RX_LEN_GET_HEADER,
            Command::GetCurrentData => RX_LEN_GET_CURRENT_DATA,
            Command::GetDataRange(_) => RX_LEN_GET_DATA_RANGE,
            Command::EndRead => RX_LEN_END_READ,
            Command::ClearMemory => RX_LEN_CLEAR_MEMORY,
            Command::IdentifyType => RX_LEN_IDENTIFY_TYPE,
        }
    }

    /// Whether the outgoing frame carries a trailing checksum byte.
    fn needs_checksum(&self) -> bool {
        matches!(self, Command::GetDataRange(_) | Command::IdentifyType)
    }
}
