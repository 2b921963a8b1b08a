//! Protocol constants
//!
//! These constants define the command opcodes, response lengths, and other
//! protocol-specific values spoken over the D-LOGG serial link.

// ============================================================================
// Command Opcodes (host → module)
// ============================================================================

/// Query the operating mode of the connected module.
pub const CMD_GET_MODE: u8 = 0x81;
/// Query the firmware version (raw byte, tenths).
pub const CMD_GET_FIRMWARE_VERSION: u8 = 0x82;
/// Query the logging criterion. Requires firmware version >= 2.9.
pub const CMD_GET_LOGGING_CRITERION: u8 = 0x95;
/// Program a new logging criterion.
pub const CMD_SET_LOGGING_CRITERION: u8 = 0x96;
/// Read the 13-byte memory header.
pub const CMD_GET_HEADER: u8 = 0xAA;
/// Read the current (live) sensor values.
pub const CMD_GET_CURRENT_DATA: u8 = 0xAB;
/// Read logged sensor frames starting at an address.
pub const CMD_GET_DATA_RANGE: u8 = 0xAC;
/// Terminate a read session. Must follow every ranged read.
pub const CMD_END_READ: u8 = 0xAD;
/// Erase the logging memory. Destructive, never issued implicitly.
pub const CMD_CLEAR_MEMORY: u8 = 0xAF;

/// Fixed payload of the vendor identify-type exchange (sent checksummed).
pub const IDENTIFY_PAYLOAD: [u8; 7] = [0x20, 0x10, 0x18, 0x00, 0x00, 0x00, 0x00];
/// Magic prefix of the identify-type response.
pub const IDENTIFY_RESPONSE_PREFIX: [u8; 2] = [0x21, 0x43];

// ============================================================================
// Response Lengths (bytes expected per command)
// ============================================================================

/// Response length of get-mode.
pub const RX_LEN_GET_MODE: usize = 1;
/// Response length of get-firmware-version.
pub const RX_LEN_GET_FIRMWARE_VERSION: usize = 1;
/// Response length of get-logging-criterion (echo + raw + padding).
pub const RX_LEN_GET_LOGGING_CRITERION: usize = 3;
/// Response length of set-logging-criterion (echoes the raw byte).
pub const RX_LEN_SET_LOGGING_CRITERION: usize = 1;
/// Response length of get-header.
pub const RX_LEN_GET_HEADER: usize = 13;
/// Response length of get-current-data.
pub const RX_LEN_GET_CURRENT_DATA: usize = 57;
/// Response length of get-data-range (one memory frame).
pub const RX_LEN_GET_DATA_RANGE: usize = 65;
/// Response length of end-read (echoes the opcode).
pub const RX_LEN_END_READ: usize = 1;
/// Response length of clear-memory (echoes the opcode).
pub const RX_LEN_CLEAR_MEMORY: usize = 1;
/// Response length of identify-type.
pub const RX_LEN_IDENTIFY_TYPE: usize = 5;

// ============================================================================
// Memory Geometry and Frame Layout
// ============================================================================

/// Number of slots in the module's cyclic logging memory.
pub const MEMORY_SLOTS: u16 = 8192;

/// Number of data frames requested per get-data-range call.
pub const DATA_RANGE_FRAME_COUNT: u8 = 0x01;

/// Marker byte leading a current-data frame.
pub const CURRENT_DATA_MARKER: u8 = 0x80;

/// Total length of a current-data frame including marker and checksum.
pub const CURRENT_FRAME_LEN: usize = RX_LEN_GET_CURRENT_DATA;
/// Total length of a logged memory frame including checksum.
pub const MEMORY_FRAME_LEN: usize = RX_LEN_GET_DATA_RANGE;

/// Number of analog/digital input channels per frame.
pub const INPUT_COUNT: usize = 16;
/// Number of binary outputs per frame.
pub const OUTPUT_COUNT: usize = 13;
/// Number of pump speed channels per frame.
pub const PUMP_SPEED_COUNT: usize = 4;

// ============================================================================
// Device Mode and Type Wire Values
// ============================================================================

/// Mode byte of a BL232 converter without data logger.
pub const MODE_BL232: u8 = 0xA2;
/// Mode byte when one data line is logged. The only supported mode.
pub const MODE_ONE_DL: u8 = 0xA8;
/// Mode byte when two data lines are logged.
pub const MODE_TWO_DL: u8 = 0xD1;
/// Mode byte when the module sits on a CAN bus.
pub const MODE_CAN: u8 = 0xDC;

/// Type byte of a plain BL232 converter.
pub const TYPE_BL232: u8 = 0xA2;
/// Type byte of a BL-NET ethernet logger.
pub const TYPE_BLNET: u8 = 0xA3;
/// Type byte of a BL232/D-LOGG in one-data-line configuration.
pub const TYPE_BL232_DLOGG_1DL: u8 = 0xA8;
/// Type byte of a BL232/D-LOGG in two-data-line configuration.
pub const TYPE_BL232_DLOGG_2DL: u8 = 0xD1;
