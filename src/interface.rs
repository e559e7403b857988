//! Serial interface abstraction
//!
//! This module provides the [`SerialInterface`] trait and the [`Interface`]
//! struct for sending bytes to a Parallax serial LCD.
//!
//! ## Hardware Requirements
//!
//! The module only listens: it needs a single TX line at 2400, 9600 or 19200
//! baud, 8 data bits, no parity, one stop bit. Nothing is ever read back.
//!
//! ## Example
//!
//! ```rust
//! use core::convert::Infallible;
//! use parallax_lcd::{Interface, SerialInterface};
//! # struct MockUart;
//! # impl embedded_io::ErrorType for MockUart { type Error = Infallible; }
//! # impl embedded_io::Write for MockUart {
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! // Wrap any embedded-io writer (UART peripheral, USB-serial, ...)
//! let mut interface = Interface::new(MockUart);
//!
//! // Clear the display
//! let _ = interface.write_bytes(&[0x0C]);
//! ```

use core::fmt::Debug;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the byte transport to the display
///
/// This trait abstracts over different transports, allowing the
/// [`Display`](crate::display::Display) to work with a UART peripheral, a host
/// serial device, or a recording mock in tests.
///
/// Writes are blocking: when `write_bytes` returns, the bytes have been handed
/// to the transport. Any settling time the module needs is the caller's job.
pub trait SerialInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write `bytes` to the display, in order, as one run
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    fn write_bytes(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Release the transport
    ///
    /// Must be safe to call more than once.
    fn close(&mut self) {}
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<E> {
    /// Writer error
    Write(E),
}

impl<E: Debug> core::fmt::Display for InterfaceError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Write(e) => write!(f, "Serial write error: {e:?}"),
        }
    }
}

impl<E: Debug> core::error::Error for InterfaceError<E> {}

/// Serial interface over an [`embedded_io::Write`] implementation
///
/// ## Type Parameters
///
/// * `W` - Writer implementing [`embedded_io::Write`], typically a UART TX half
pub struct Interface<W> {
    /// Byte sink towards the module
    writer: W,
}

impl<W> Interface<W>
where
    W: embedded_io::Write,
{
    /// Create a new Interface
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the wrapped writer
    pub fn release(self) -> W {
        self.writer
    }
}

impl<W> SerialInterface for Interface<W>
where
    W: embedded_io::Write,
{
    type Error = InterfaceError<W::Error>;

    fn write_bytes(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.writer.write_all(bytes).map_err(InterfaceError::Write)?;
        self.writer.flush().map_err(InterfaceError::Write)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct MockError;

    impl embedded_io::Error for MockError {
        fn kind(&self) -> embedded_io::ErrorKind {
            embedded_io::ErrorKind::Other
        }
    }

    /// Accepts at most `chunk` bytes per write call
    struct MockUart {
        sent: Vec<u8>,
        chunk: usize,
        fail: bool,
    }

    impl embedded_io::ErrorType for MockUart {
        type Error = MockError;
    }

    impl embedded_io::Write for MockUart {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            let n = buf.len().min(self.chunk);
            self.sent.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_write_bytes_writes_everything() {
        let uart = MockUart {
            sent: Vec::new(),
            chunk: 3,
            fail: false,
        };
        let mut interface = Interface::new(uart);
        interface
            .write_bytes(&[0xF8, 1, 2, 3, 4, 5, 6, 7, 8])
            .unwrap();
        assert_eq!(interface.release().sent, [0xF8, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_write_bytes_reports_error() {
        let uart = MockUart {
            sent: Vec::new(),
            chunk: 8,
            fail: true,
        };
        let mut interface = Interface::new(uart);
        let result = interface.write_bytes(&[0x0C]);
        assert!(matches!(result, Err(InterfaceError::Write(MockError))));
    }

    #[test]
    fn test_close_is_repeatable() {
        let uart = MockUart {
            sent: Vec::new(),
            chunk: 8,
            fail: false,
        };
        let mut interface = Interface::new(uart);
        interface.close();
        interface.close();
    }
}
