//! Host serial device transport
//!
//! Opens a serial device node (`/dev/ttyS0`, `/dev/ttyUSB0`, ...) with the
//! framing the module expects and plugs it into [`Display`].

use std::io::Write;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{debug, error, info};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::config::{BaudRate, Config};
use crate::display::Display;
use crate::error::Error;
use crate::interface::SerialInterface;

/// Write timeout for the serial device
const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// Errors from the serial device
#[derive(Debug)]
pub enum TtyError {
    /// Device could not be opened or configured
    Open(serialport::Error),
    /// Write failed
    Io(std::io::Error),
    /// The device was already closed
    Closed,
}

impl core::fmt::Display for TtyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Open(e) => write!(f, "open failed: {e}"),
            Self::Io(e) => write!(f, "write failed: {e}"),
            Self::Closed => write!(f, "device closed"),
        }
    }
}

impl std::error::Error for TtyError {}

/// Serial device connected to the module
///
/// Raw mode, 8 data bits, no parity, one stop bit, no flow control.
pub struct TtyInterface {
    /// Open port, `None` once closed
    port: Option<Box<dyn SerialPort>>,
}

impl core::fmt::Debug for TtyInterface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TtyInterface")
            .field("name", &self.port.as_ref().and_then(|p| p.name()))
            .finish()
    }
}

impl TtyInterface {
    /// Open `path` at `baud_rate`
    ///
    /// # Errors
    ///
    /// Returns `TtyError::Open` if the device cannot be opened or configured.
    pub fn open(path: &str, baud_rate: BaudRate) -> Result<Self, TtyError> {
        let port = serialport::new(path, baud_rate.speed())
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(WRITE_TIMEOUT)
            .open()
            .map_err(|e| {
                error!("parallax: open({path}) failed ({e})");
                TtyError::Open(e)
            })?;
        debug!("parallax: opened device {path}");
        Ok(Self { port: Some(port) })
    }

    /// Whether the device is still open
    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }
}

impl SerialInterface for TtyInterface {
    type Error = TtyError;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        let port = self.port.as_mut().ok_or(TtyError::Closed)?;
        port.write_all(bytes).map_err(TtyError::Io)?;
        port.flush().map_err(TtyError::Io)
    }

    fn close(&mut self) {
        self.port = None;
    }
}

/// [`DelayNs`] backed by `std::thread::sleep`
#[derive(Clone, Copy, Debug, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

/// Failure to bring up a display
#[derive(Debug)]
pub enum OpenError {
    /// Serial device error
    Tty(TtyError),
    /// Init sequence could not be sent
    Init(Error<TtyInterface>),
}

impl core::fmt::Display for OpenError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Tty(e) => write!(f, "serial device: {e}"),
            Self::Init(e) => write!(f, "display init: {e}"),
        }
    }
}

impl std::error::Error for OpenError {}

/// Open `device` and initialize the display described by `config`
///
/// # Errors
///
/// Returns `OpenError` if the device cannot be opened or the init sequence
/// cannot be written. No display is returned in that case.
///
/// # Example
///
/// ```rust,no_run
/// use parallax_lcd::tty::{self, StdDelay};
/// use parallax_lcd::{Builder, DEFAULT_DEVICE};
///
/// let config = Builder::new().model("27979").speed(19200).build()?;
/// let mut display = tty::open(DEFAULT_DEVICE, config)?;
/// display.write_string(1, 1, "Hello");
/// display.flush(&mut StdDelay)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open(device: &str, config: Config) -> Result<Display<TtyInterface>, OpenError> {
    info!("parallax: using Device {device}");
    let interface = TtyInterface::open(device, config.baud_rate).map_err(OpenError::Tty)?;
    let mut display = Display::new(interface, config);
    display.init(&mut StdDelay).map_err(OpenError::Init)?;
    Ok(display)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device_fails() {
        let result = TtyInterface::open("/dev/parallax-lcd-does-not-exist", BaudRate::B19200);
        assert!(matches!(result, Err(TtyError::Open(_))));
    }

    #[test]
    fn test_open_display_missing_device_fails() {
        let config = crate::config::Builder::new().build().unwrap();
        let result = open("/dev/parallax-lcd-does-not-exist", config);
        assert!(matches!(result, Err(OpenError::Tty(TtyError::Open(_)))));
    }

    #[test]
    fn test_closed_interface_rejects_writes() {
        let mut tty = TtyInterface { port: None };
        assert!(!tty.is_open());
        tty.close();
        assert!(matches!(tty.write_bytes(&[0x0C]), Err(TtyError::Closed)));
    }

    #[test]
    fn test_std_delay_sleeps() {
        let start = std::time::Instant::now();
        StdDelay.delay_ms(2);
        assert!(start.elapsed() >= Duration::from_millis(2));
    }
}
