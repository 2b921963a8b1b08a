//! The synchronous command transceiver.

use std::thread;
use std::time::Duration;

use log::{debug, info};

use dlogg_protocol::{
    checksum, Address, Command, DeviceType, FirmwareVersion, LoggingCriterion, MemoryHeader, Mode,
    ProtocolError, SensorFrame, CMD_CLEAR_MEMORY, CMD_END_READ, CMD_GET_LOGGING_CRITERION,
    IDENTIFY_RESPONSE_PREFIX,
};

use crate::channel::ByteChannel;
use crate::error::{DeviceError, OpenError};

/// Settle delay the firmware needs after an identify-type exchange.
/// Commands issued earlier fail silently.
const IDENTIFY_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// A connected D-LOGG module.
///
/// Owns the byte channel exclusively and drives one synchronous
/// command/response exchange at a time. Every operation either completes
/// within the channel's read timeout or fails; nothing is retried
/// internally.
///
/// # Example
///
/// ```rust,ignore
/// let channel = open_serial_port("/dev/ttyUSB0")?;
/// let mut device = DLoggDevice::open(channel)?;
/// let header = device.header()?;
/// let data = device.fetch_all_data()?;
/// ```
#[derive(Debug)]
pub struct DLoggDevice<C> {
    channel: C,
}

impl<C: ByteChannel> DLoggDevice<C> {
    /// Connect to the module behind `channel`.
    ///
    /// Immediately queries the operating mode and refuses anything but the
    /// one-data-line mode with [`DeviceError::UnsupportedMode`]. On failure
    /// the channel is handed back inside the error so the caller can shut
    /// it down explicitly.
    pub fn open(channel: C) -> Result<Self, OpenError<C>> {
        let mut device = DLoggDevice { channel };
        match device.mode() {
            Ok(Mode::OneDl) => {
                info!("Connected, module mode 1DL");
                Ok(device)
            }
            Ok(mode) => Err(OpenError {
                error: DeviceError::UnsupportedMode(mode),
                channel: device.channel,
            }),
            Err(error) => Err(OpenError {
                error,
                channel: device.channel,
            }),
        }
    }

    /// Release the byte channel.
    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Query the operating mode.
    pub fn mode(&mut self) -> Result<Mode, DeviceError> {
        let rx = self.transceive(Command::GetMode)?;
        Ok(Mode::try_from(rx[0])?)
    }

    /// Query the hardware type via the vendor identify exchange.
    ///
    /// The firmware needs a 100 ms settle delay after this exchange; it is
    /// waited out here, before any other command can be issued.
    pub fn device_type(&mut self) -> Result<DeviceType, DeviceError> {
        let rx = self.transceive(Command::IdentifyType)?;
        thread::sleep(IDENTIFY_SETTLE_DELAY);
        if rx[0] != IDENTIFY_RESPONSE_PREFIX[0] {
            return Err(unexpected(IDENTIFY_RESPONSE_PREFIX[0], rx[0]));
        }
        if rx[1] != IDENTIFY_RESPONSE_PREFIX[1] {
            return Err(unexpected(IDENTIFY_RESPONSE_PREFIX[1], rx[1]));
        }
        checksum::validate(&rx[2..])?;
        Ok(DeviceType::try_from(rx[2])?)
    }

    /// Query the firmware version.
    pub fn firmware_version(&mut self) -> Result<FirmwareVersion, DeviceError> {
        let rx = self.transceive(Command::GetFirmwareVersion)?;
        Ok(FirmwareVersion(rx[0]))
    }

    /// Query the logging criterion. Requires firmware version >= 2.9, see
    /// [`FirmwareVersion::supports_logging_criterion`].
    pub fn logging_criterion(&mut self) -> Result<LoggingCriterion, DeviceError> {
        let rx = self.transceive(Command::GetLoggingCriterion)?;
        if rx[0] != CMD_GET_LOGGING_CRITERION {
            return Err(unexpected(CMD_GET_LOGGING_CRITERION, rx[0]));
        }
        Ok(LoggingCriterion::from_raw(rx[1])?)
    }

    /// Program a new logging criterion. The module echoes the raw byte.
    pub fn set_logging_criterion(
        &mut self,
        criterion: LoggingCriterion,
    ) -> Result<(), DeviceError> {
        let rx = self.transceive(Command::SetLoggingCriterion(criterion))?;
        if rx[0] != criterion.raw() {
            return Err(unexpected(criterion.raw(), rx[0]));
        }
        Ok(())
    }

    /// Read the memory header.
    pub fn header(&mut self) -> Result<MemoryHeader, DeviceError> {
        let rx = self.transceive(Command::GetHeader)?;
        Ok(MemoryHeader::decode(&rx)?)
    }

    /// Read the current sensor values.
    pub fn current_data(&mut self) -> Result<SensorFrame, DeviceError> {
        let rx = self.transceive(Command::GetCurrentData)?;
        Ok(SensorFrame::decode_current(&rx)?)
    }

    /// Read one logged frame. Part of a read session: a sequence of fetches
    /// must be terminated with [`DLoggDevice::end_read`], even after an
    /// error, or the module is left in an inconsistent read state.
    pub fn fetch_data(&mut self, address: Address) -> Result<SensorFrame, DeviceError> {
        let rx = self.transceive(Command::GetDataRange(address))?;
        let frame = SensorFrame::decode_memory(&rx)?;
        debug!("Fetched data from address {address}");
        Ok(frame)
    }

    /// Read `length` logged frames starting at `start`, walking the cyclic
    /// memory in order with wraparound. The caller owns the mandatory
    /// [`DLoggDevice::end_read`]; [`DLoggDevice::fetch_all_data`] bundles
    /// the whole session.
    pub fn fetch_data_range(
        &mut self,
        start: Address,
        length: u16,
    ) -> Result<Vec<SensorFrame>, DeviceError> {
        let mut data = Vec::with_capacity(usize::from(length));
        for i in 0..length {
            data.push(self.fetch_data(start.offset(i))?);
        }
        Ok(data)
    }

    /// Terminate a read session.
    pub fn end_read(&mut self) -> Result<(), DeviceError> {
        let rx = self.transceive(Command::EndRead)?;
        if rx[0] != CMD_END_READ {
            return Err(unexpected(CMD_END_READ, rx[0]));
        }
        debug!("Read session ended");
        Ok(())
    }

    /// Read every logged sample: header, full ranged fetch, end-read.
    ///
    /// The end-read is issued even when a fetch fails mid-session; the
    /// fetch error wins over a subsequent end-read error.
    pub fn fetch_all_data(&mut self) -> Result<Vec<SensorFrame>, DeviceError> {
        let header = self.header()?;
        let data = self.fetch_data_range(header.start, header.sample_count());
        let ended = self.end_read();
        let data = data?;
        ended?;
        Ok(data)
    }

    /// Erase the logging memory. Destructive; never called implicitly.
    pub fn clear_memory(&mut self) -> Result<(), DeviceError> {
        let rx = self.transceive(Command::ClearMemory)?;
        if rx[0] != CMD_CLEAR_MEMORY {
            return Err(unexpected(CMD_CLEAR_MEMORY, rx[0]));
        }
        debug!("Memory cleared");
        Ok(())
    }

    /// One command/response exchange: discard stale input, write the frame,
    /// read exactly the expected response length in a single bounded read.
    fn transceive(&mut self, command: Command) -> Result<Vec<u8>, DeviceError> {
        let tx = command.encode();
        self.channel.discard_input()?;
        self.channel.send(&tx)?;
        let mut rx = vec![0u8; command.response_len()];
        let received = self.channel.receive(&mut rx)?;
        debug!("Transceive: [{}] --> [{}]", hex(&tx), hex(&rx[..received]));
        if received != rx.len() {
            return Err(DeviceError::ShortRead {
                expected: rx.len(),
                actual: received,
            });
        }
        Ok(rx)
    }
}

fn unexpected(expected: u8, actual: u8) -> DeviceError {
    DeviceError::Protocol(ProtocolError::UnexpectedResponse { expected, actual })
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
