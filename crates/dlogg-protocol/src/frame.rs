//! Sensor frame decoder.
//!
//! The UVR1611 controller reports its state as a fixed-layout frame: 16
//! input channels (2 bytes each, little-endian), a 16-bit output bitmask,
//! and 4 pump speed bytes. Two frame flavors share this layout:
//!
//! - **current data** (57 bytes): marker byte `0x80`, then the fields at
//!   offset 1, then unparsed energy-meter bytes, checksum last
//! - **memory data** (65 bytes): fields at offset 0, unparsed energy-meter
//!   bytes, a 6-byte date-time at offset 55, a 24-bit write timestamp
//!   counter at offset 61, checksum last
//!
//! The checksum always covers every byte of the frame before the final one.

use crate::checksum;
use crate::constants::*;
use crate::error::ProtocolError;

/// Signal type of an input channel, carried in bits 12..14 of the channel
/// word.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SignalType {
    /// Channel not connected.
    #[default]
    Unused,
    /// Digital on/off input.
    Digital,
    /// Temperature sensor, 0.1 °C resolution.
    Temperature,
    /// Volume flow sensor, 4 l/h resolution.
    MassFlow,
    /// Solar irradiation sensor, 1 W/m² resolution.
    SunLoad,
    /// Room temperature sensor with room sub-index.
    RoomTemperature,
}

impl SignalType {
    /// Unit of the decoded value, empty for unitless channels.
    pub fn unit(&self) -> &'static str {
        match self {
            SignalType::Unused | SignalType::Digital => "",
            SignalType::Temperature | SignalType::RoomTemperature => "°C",
            SignalType::MassFlow => "l/h",
            SignalType::SunLoad => "W/m²",
        }
    }
}

impl TryFrom<u8> for SignalType {
    type Error = ProtocolError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(SignalType::Unused),
            1 => Ok(SignalType::Digital),
            2 => Ok(SignalType::Temperature),
            3 => Ok(SignalType::MassFlow),
            6 => Ok(SignalType::SunLoad),
            7 => Ok(SignalType::RoomTemperature),
            _ => Err(ProtocolError::UnknownSignalType(tag)),
        }
    }
}

/// One decoded input channel.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InputReading {
    /// Signal type of the channel.
    pub signal: SignalType,
    /// Physical value in the unit of the signal type.
    pub value: f64,
    /// Room sub-index, only present on room temperature channels.
    pub room: Option<u8>,
}

impl InputReading {
    /// Decode one channel from its little-endian word.
    pub fn decode(raw: [u8; 2]) -> Result<Self, ProtocolError> {
        let word = u16::from_le_bytes(raw);
        let signal = SignalType::try_from(((word & 0x7000) >> 12) as u8)?;
        let negative = word & 0x8000 != 0;
        let mut room = None;
        let value = match signal {
            SignalType::Unused => 0.0,
            SignalType::Digital => {
                if negative {
                    1.0
                } else {
                    0.0
                }
            }
            SignalType::Temperature => signed_field(word, 0x0FFF, negative) / 10.0,
            SignalType::RoomTemperature => {
                room = Some(((word & 0x0600) >> 9) as u8);
                signed_field(word, 0x01FF, negative) / 10.0
            }
            SignalType::MassFlow => signed_field(word, 0x0FFF, negative) * 4.0,
            SignalType::SunLoad => signed_field(word, 0x0FFF, negative),
        };
        Ok(InputReading {
            signal,
            value,
            room,
        })
    }

    /// Unit of the decoded value.
    pub fn unit(&self) -> &'static str {
        self.signal.unit()
    }
}

/// Magnitude field with the frame's two's-complement-style sign handling.
fn signed_field(word: u16, mask: u16, negative: bool) -> f64 {
    let field = word & mask;
    if negative {
        -f64::from((field ^ mask) + 1)
    } else {
        f64::from(field)
    }
}

impl std::fmt::Display for InputReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit())
    }
}

/// One decoded pump speed channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PumpSpeed {
    /// Rotational speed stage, 0..=31.
    pub speed: u8,
    /// Whether the speed controller drives this output. Observed polarity:
    /// bit 7 set means inactive.
    pub controller_active: bool,
}

impl PumpSpeed {
    /// Decode a pump speed byte.
    pub fn decode(raw: u8) -> Self {
        PumpSpeed {
            speed: raw & 0x1F,
            controller_active: raw & 0x80 == 0,
        }
    }
}

impl std::fmt::Display for PumpSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}rpm", self.controller_active, self.speed)
    }
}

/// Date and time as kept by the controller clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DateTime {
    /// Seconds, 0..=59.
    pub seconds: u8,
    /// Minutes, 0..=59.
    pub minutes: u8,
    /// Hours, 0..=23.
    pub hours: u8,
    /// Day of month, 1..=31.
    pub day: u8,
    /// Month, 1..=12.
    pub month: u8,
    /// Full year; stored on the wire as an offset from 2000.
    pub year: u16,
}

impl DateTime {
    /// Decode the 6 raw clock bytes.
    pub fn decode(raw: [u8; 6]) -> Self {
        DateTime {
            seconds: raw[0],
            minutes: raw[1],
            hours: raw[2],
            day: raw[3],
            month: raw[4],
            year: 2000 + u16::from(raw[5]),
        }
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hours, self.minutes, self.seconds
        )
    }
}

/// The field block shared by both frame flavors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensorValues {
    /// The 16 input channels.
    pub inputs: [InputReading; INPUT_COUNT],
    /// The 13 binary outputs.
    pub outputs: [bool; OUTPUT_COUNT],
    /// The 4 pump speed channels.
    pub pump_speeds: [PumpSpeed; PUMP_SPEED_COUNT],
}

impl SensorValues {
    /// Decode the field block from a payload window. The window must hold at
    /// least the 38 field bytes; trailing bytes are ignored.
    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        const FIELD_BYTES: usize = INPUT_COUNT * 2 + 2 + PUMP_SPEED_COUNT;
        if data.len() < FIELD_BYTES {
            return Err(ProtocolError::FrameTooShort {
                expected: FIELD_BYTES,
                actual: data.len(),
            });
        }
        let mut inputs = [InputReading::default(); INPUT_COUNT];
        for (input, raw) in inputs.iter_mut().zip(data.chunks_exact(2)) {
            *input = InputReading::decode([raw[0], raw[1]])?;
        }
        let output_mask = u16::from_le_bytes([data[32], data[33]]);
        let outputs: [bool; OUTPUT_COUNT] = std::array::from_fn(|bit| output_mask & (1u16 << bit) != 0);
        let mut pump_speeds = [PumpSpeed::default(); PUMP_SPEED_COUNT];
        for (pump, raw) in pump_speeds.iter_mut().zip(&data[34..38]) {
            *pump = PumpSpeed::decode(*raw);
        }
        Ok(SensorValues {
            inputs,
            outputs,
            pump_speeds,
        })
    }
}

/// One decoded sensor frame, either live values or a logged sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SensorFrame {
    /// Live values from a get-current-data exchange.
    Current(SensorValues),
    /// A logged sample from the cyclic memory.
    Memory {
        /// The shared field block.
        values: SensorValues,
        /// Controller clock at the time the sample was written.
        datetime: DateTime,
        /// Seconds since the module started logging, 10 s resolution.
        timestamp_s: u32,
    },
}

impl SensorFrame {
    /// Decode a 57-byte current-data frame.
    ///
    /// Byte 0 must carry the `0x80` marker; the fields sit at offset 1.
    pub fn decode_current(raw: &[u8]) -> Result<Self, ProtocolError> {
        if raw.len() < CURRENT_FRAME_LEN {
            return Err(ProtocolError::FrameTooShort {
                expected: CURRENT_FRAME_LEN,
                actual: raw.len(),
            });
        }
        if raw[0] != CURRENT_DATA_MARKER {
            return Err(ProtocolError::UnexpectedResponse {
                expected: CURRENT_DATA_MARKER,
                actual: raw[0],
            });
        }
        let values = SensorValues::decode(&raw[1..])?;
        checksum::validate(&raw[..CURRENT_FRAME_LEN])?;
        Ok(SensorFrame::Current(values))
    }

    /// Decode a 65-byte logged memory frame.
    pub fn decode_memory(raw: &[u8]) -> Result<Self, ProtocolError> {
        if raw.len() < MEMORY_FRAME_LEN {
            return Err(ProtocolError::FrameTooShort {
                expected: MEMORY_FRAME_LEN,
                actual: raw.len(),
            });
        }
        let values = SensorValues::decode(raw)?;
        let datetime = DateTime::decode([raw[55], raw[56], raw[57], raw[58], raw[59], raw[60]]);
        let timestamp_s = u32::from_le_bytes([raw[61], raw[62], raw[63], 0]) * 10;
        checksum::validate(&raw[..MEMORY_FRAME_LEN])?;
        Ok(SensorFrame::Memory {
            values,
            datetime,
            timestamp_s,
        })
    }

    /// The shared field block of either flavor.
    pub fn values(&self) -> &SensorValues {
        match self {
            SensorFrame::Current(values) => values,
            SensorFrame::Memory { values, .. } => values,
        }
    }

    /// Controller clock of a logged sample, absent on current frames.
    pub fn datetime(&self) -> Option<DateTime> {
        match self {
            SensorFrame::Current(_) => None,
            SensorFrame::Memory { datetime, .. } => Some(*datetime),
        }
    }

    /// Write timestamp of a logged sample, absent on current frames.
    pub fn timestamp_s(&self) -> Option<u32> {
        match self {
            SensorFrame::Current(_) => None,
            SensorFrame::Memory { timestamp_s, .. } => Some(*timestamp_s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Field block used by the frame tests: a temperature on channel 0, a
    /// negative temperature on channel 1, one of each remaining signal type
    /// on channels 2..6, the rest unused; outputs 0, 2, and 12 on; pump 0
    /// actively driven at stage 3, pump 1 stopped by the controller.
    fn test_fields() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0x2005u16.to_le_bytes()); // 0.5 °C
        data.extend_from_slice(&0xAFFBu16.to_le_bytes()); // -0.5 °C
        data.extend_from_slice(&0x9000u16.to_le_bytes()); // digital, on
        data.extend_from_slice(&0x300Au16.to_le_bytes()); // 40 l/h
        data.extend_from_slice(&0x6320u16.to_le_bytes()); // 800 W/m²
        data.extend_from_slice(&0x74D2u16.to_le_bytes()); // room 2, 21.0 °C
        for _ in 6..16 {
            data.extend_from_slice(&0x0000u16.to_le_bytes());
        }
        data.extend_from_slice(&0x1005u16.to_le_bytes()); // output bitmask
        data.extend_from_slice(&[0x03, 0x83, 0x00, 0x00]); // pump speeds
        data
    }

    fn assert_test_fields(values: &SensorValues) {
        assert_eq!(values.inputs[0].signal, SignalType::Temperature);
        assert_eq!(values.inputs[0].value, 0.5);
        assert_eq!(values.inputs[0].unit(), "°C");
        assert_eq!(values.inputs[1].value, -0.5);
        assert_eq!(values.inputs[2].signal, SignalType::Digital);
        assert_eq!(values.inputs[2].value, 1.0);
        assert_eq!(values.inputs[3].signal, SignalType::MassFlow);
        assert_eq!(values.inputs[3].value, 40.0);
        assert_eq!(values.inputs[3].unit(), "l/h");
        assert_eq!(values.inputs[4].signal, SignalType::SunLoad);
        assert_eq!(values.inputs[4].value, 800.0);
        assert_eq!(values.inputs[5].signal, SignalType::RoomTemperature);
        assert_eq!(values.inputs[5].value, 21.0);
        assert_eq!(values.inputs[5].room, Some(2));
        assert_eq!(values.inputs[6].signal, SignalType::Unused);
        assert_eq!(values.inputs[6].value, 0.0);

        let expected_outputs: Vec<bool> = (0..13).map(|bit| [0, 2, 12].contains(&bit)).collect();
        assert_eq!(values.outputs.to_vec(), expected_outputs);

        assert_eq!(values.pump_speeds[0].speed, 3);
        assert!(values.pump_speeds[0].controller_active);
        assert_eq!(values.pump_speeds[1].speed, 3);
        assert!(!values.pump_speeds[1].controller_active);
    }

    fn current_frame() -> Vec<u8> {
        let mut raw = vec![CURRENT_DATA_MARKER];
        raw.extend_from_slice(&test_fields());
        raw.resize(CURRENT_FRAME_LEN - 1, 0x00);
        checksum::append_checksum(&mut raw);
        raw
    }

    fn memory_frame() -> Vec<u8> {
        let mut raw = test_fields();
        raw.resize(55, 0x00);
        raw.extend_from_slice(&[30, 45, 12, 24, 8, 26]); // 2026-08-24 12:45:30
        raw.extend_from_slice(&[0x10, 0x27, 0x00]); // counter 10000 -> 100000 s
        assert_eq!(raw.len(), MEMORY_FRAME_LEN - 1);
        checksum::append_checksum(&mut raw);
        raw
    }

    #[test]
    fn test_temperature_decode() {
        let reading = InputReading::decode(0x2005u16.to_le_bytes()).unwrap();
        assert_eq!(reading.signal, SignalType::Temperature);
        assert_eq!(reading.value, 0.5);
        // Sign bit set, field chosen so that (field ^ 0xFFF) + 1 == 5.
        let reading = InputReading::decode(0xAFFBu16.to_le_bytes()).unwrap();
        assert_eq!(reading.value, -0.5);
    }

    #[test]
    fn test_unknown_signal_type_rejected() {
        for tag in [4u8, 5] {
            let word = (u16::from(tag)) << 12;
            assert_eq!(
                InputReading::decode(word.to_le_bytes()),
                Err(ProtocolError::UnknownSignalType(tag))
            );
        }
    }

    #[test]
    fn test_pump_speed_polarity() {
        let pump = PumpSpeed::decode(0x03);
        assert_eq!(pump.speed, 3);
        assert!(pump.controller_active);
        let pump = PumpSpeed::decode(0x83);
        assert_eq!(pump.speed, 3);
        assert!(!pump.controller_active);
    }

    #[test]
    fn test_decode_current_frame() {
        let frame = SensorFrame::decode_current(&current_frame()).unwrap();
        assert_test_fields(frame.values());
        assert_eq!(frame.datetime(), None);
        assert_eq!(frame.timestamp_s(), None);
    }

    #[test]
    fn test_decode_current_rejects_bad_marker() {
        let mut raw = current_frame();
        raw[0] = 0x81;
        assert_eq!(
            SensorFrame::decode_current(&raw),
            Err(ProtocolError::UnexpectedResponse {
                expected: 0x80,
                actual: 0x81
            })
        );
    }

    #[test]
    fn test_decode_memory_frame() {
        let frame = SensorFrame::decode_memory(&memory_frame()).unwrap();
        assert_test_fields(frame.values());
        let datetime = frame.datetime().unwrap();
        assert_eq!(
            datetime,
            DateTime {
                seconds: 30,
                minutes: 45,
                hours: 12,
                day: 24,
                month: 8,
                year: 2026,
            }
        );
        assert_eq!(datetime.to_string(), "2026-08-24 12:45:30");
        assert_eq!(frame.timestamp_s(), Some(100_000));
    }

    #[test]
    fn test_decode_memory_rejects_any_flipped_byte() {
        for byte in 0..MEMORY_FRAME_LEN - 1 {
            let mut raw = memory_frame();
            raw[byte] ^= 0x80;
            assert!(
                SensorFrame::decode_memory(&raw).is_err(),
                "corruption of byte {byte} not detected"
            );
        }
    }

    #[test]
    fn test_decode_rejects_short_frames() {
        assert!(matches!(
            SensorFrame::decode_current(&[0x80; 10]),
            Err(ProtocolError::FrameTooShort { .. })
        ));
        assert!(matches!(
            SensorFrame::decode_memory(&[0x00; 64]),
            Err(ProtocolError::FrameTooShort { .. })
        ));
    }
}
