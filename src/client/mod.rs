//! Reading sentences from a serial port.
//!
//! [`GpsReader`] pulls bytes from any [`embedded_io_async::Read`] in small
//! chunks and runs them through a [`Parser`]. The parser keeps all state
//! between reads, so a sentence may arrive spread over any number of them.

use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};
use embassy_time::{Duration, Timer};
use embedded_io_async::Read;

use crate::{FixRecord, Parser, SentenceId};

/// Bytes requested from the serial port per read.
pub const DEFAULT_CHUNK: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The serial port failed.
    Io(E),
    /// The serial port returned no data, it will never produce more.
    EndOfStream,
}

/// A decoded sentence together with the fix record right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixUpdate {
    pub id: SentenceId,
    pub fix: FixRecord,
}

pub struct GpsReader<R, const CHUNK: usize = DEFAULT_CHUNK> {
    serial: R,
    parser: Parser,
    buf: [u8; CHUNK],
    /// Bytes of `buf` not yet handed to the parser.
    pending: core::ops::Range<usize>,
}

impl<R: Read> GpsReader<R> {
    pub fn new(serial: R) -> Self {
        Self::with_chunk(serial)
    }
}

impl<R: Read, const CHUNK: usize> GpsReader<R, CHUNK> {
    /// A reader requesting up to `CHUNK` bytes per read.
    pub fn with_chunk(serial: R) -> Self {
        Self {
            serial,
            parser: Parser::new(),
            buf: [0; CHUNK],
            pending: 0..0,
        }
    }

    #[inline]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    #[inline]
    pub fn fix(&self) -> &FixRecord {
        self.parser.fix()
    }

    pub fn into_inner(self) -> R {
        self.serial
    }

    /// Wait for the next sentence that updates the fix record.
    ///
    /// Cancel safe: dropping the future loses no bytes that were already
    /// read.
    pub async fn next_sentence(&mut self) -> Result<SentenceId, Error<R::Error>> {
        loop {
            while let Some(i) = self.pending.next() {
                if let Some(id) = self.parser.update(self.buf[i]) {
                    return Ok(id);
                }
            }

            let n = self.serial.read(&mut self.buf).await.map_err(Error::Io)?;
            if n == 0 {
                log_warn!("serial port reached end of stream");
                return Err(Error::EndOfStream);
            }
            self.pending = 0..n;
        }
    }

    /// Decode sentences forever, signalling every update. Returns only when
    /// the serial port fails.
    pub async fn run<M: RawMutex>(&mut self, updates: &Signal<M, FixUpdate>) -> Error<R::Error> {
        loop {
            match self.next_sentence().await {
                Ok(id) => updates.signal(FixUpdate {
                    id,
                    fix: self.parser.fix().clone(),
                }),
                Err(e) => return e,
            }
        }
    }

    /// Check whether a receiver is attached: `true` if a sentence is
    /// decoded within `timeout`.
    pub async fn detect(&mut self, timeout: Duration) -> Result<bool, Error<R::Error>> {
        match select(Timer::after(timeout), self.next_sentence()).await {
            Either::First(()) => {
                log_warn!("no sentence within {} ms", timeout.as_millis());
                Ok(false)
            }
            Either::Second(res) => res.map(|id| {
                log_info!("receiver detected, first sentence {}", id);
                true
            }),
        }
    }
}
