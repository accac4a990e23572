use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::error::DhtError;
use crate::frame::{self, Frame};
use crate::pulse::{self, PULSES_PER_FRAME};
use crate::signal::{self, CollectConfig, Level};

/// How long the line is held high before the start request (milliseconds).
const START_HIGH_MS: u32 = 25;

/// How long the line is held low to request a reading (milliseconds).
const START_LOW_MS: u32 = 11;

/// Driver for the DHT11 temperature and humidity sensor.
///
/// The driver oversamples the data line in a tight loop and decodes the
/// reading from the recorded pulse widths, so it needs no microsecond timer.
pub struct Dht11<PIN, D> {
    pin: PIN,
    delay: D,
    config: CollectConfig,
}

/// Reading returned by the DHT11 sensor.
///
/// Only the integer bytes of the frame are used. DHT11 always transmits zero
/// fractional bytes; sensors that do not are misreported here, use
/// [`Dht11::read_frame`] or [`decode_frame`] for those.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    /// Temperature in whole degrees Celsius.
    pub temperature: u8,
    /// Relative humidity in whole percent.
    pub humidity: u8,
}

impl Reading {
    /// Takes the integer humidity and temperature bytes of `frame`.
    ///
    /// The checksum is not looked at.
    pub const fn from_frame(frame: &Frame) -> Self {
        Reading {
            temperature: frame.temperature(),
            humidity: frame.humidity(),
        }
    }
}

impl<PIN, DELAY, E> Dht11<PIN, DELAY>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
{
    /// Creates a new instance of the DHT11 driver.
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the DHT11 data line. Must support both
    ///   input and output and be pulled up when released.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(pin: PIN, delay: DELAY) -> Self {
        Self::with_config(pin, delay, CollectConfig::default())
    }

    /// Creates a driver with custom sample collection settings.
    pub fn with_config(pin: PIN, delay: DELAY, config: CollectConfig) -> Self {
        Dht11 { pin, delay, config }
    }

    /// Releases the pin and delay provider.
    pub fn release(self) -> (PIN, DELAY) {
        (self.pin, self.delay)
    }

    /// Reads a temperature and humidity measurement from the DHT11 sensor.
    ///
    /// This method sends the start request, samples the line until it goes
    /// idle, and decodes the recorded trace. Concurrent reads of the same
    /// line are not possible since the driver owns the pin.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` if 40 bits were received and the checksum is valid.
    /// * `Err(DhtError)` if the frame was incomplete, corrupted, or a pin
    ///   operation failed.
    pub fn read(&mut self) -> Result<Reading, DhtError<E>> {
        self.read_frame().map(|frame| Reading::from_frame(&frame))
    }

    /// Performs a read attempt and returns the validated frame.
    ///
    /// Use this instead of [`read`](Self::read) for sensors that send
    /// nonzero fractional bytes.
    pub fn read_frame(&mut self) -> Result<Frame, DhtError<E>> {
        self.start()?;

        let trace = self.collect()?;
        decode_frame(&trace).map_err(DhtError::widen)
    }

    /// Sends the start request and releases the line to the pull-up.
    fn start(&mut self) -> Result<(), DhtError<E>> {
        self.pin.set_high()?;
        self.delay.delay_ms(START_HIGH_MS);
        self.pin.set_low()?;
        self.delay.delay_ms(START_LOW_MS);

        // Release; the sensor answers right away
        self.pin.set_high()?;
        Ok(())
    }

    /// Samples the line as fast as the pin allows until it goes idle.
    fn collect(&mut self) -> Result<Vec<Level>, DhtError<E>> {
        let pin = &mut self.pin;
        let trace = signal::collect(&self.config, || pin.is_high().map(Level::from))?;
        Ok(trace)
    }
}

/// Decodes a raw line trace into a checksum-validated frame.
///
/// The trace must start at or before the sensor's response, as returned by
/// the collector after the start request. No pin is involved, so the error
/// never carries a pin error; [`DhtError::widen`] converts it for callers
/// that mix it with pin results.
///
/// # Returns
///
/// * `Ok(Frame)` if the trace holds 40 data pulses and the checksum is valid.
/// * `Err(DhtError::MissingData)` if the pulse count is not 40.
/// * `Err(DhtError::ChecksumMismatch)` if the decoded frame is corrupted.
pub fn decode_frame(trace: &[Level]) -> Result<Frame, DhtError<Infallible>> {
    let widths = pulse::segment(trace);

    #[cfg(feature = "defmt")]
    defmt::debug!("DHT11: {} samples, {} pulses", trace.len(), widths.len());

    if widths.len() != PULSES_PER_FRAME {
        #[cfg(feature = "defmt")]
        defmt::warn!("DHT11: expected {} pulses, got {}", PULSES_PER_FRAME, widths.len());
        return Err(DhtError::MissingData);
    }

    let bits = frame::threshold(&widths);
    let bytes = frame::pack(&bits);
    let frame = Frame::from_slice(&bytes).ok_or(DhtError::MissingData)?;

    if !frame.is_valid() {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "DHT11: checksum mismatch, got {=u8:#x} expected {=u8:#x}",
            frame.checksum(),
            frame.expected_checksum()
        );
        return Err(DhtError::ChecksumMismatch);
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("DHT11: frame {}", frame);

    Ok(frame)
}

/// Decodes a raw line trace into a reading.
///
/// Same as [`decode_frame`], keeping only the integer bytes.
pub fn decode_trace(trace: &[Level]) -> Result<Reading, DhtError<Infallible>> {
    decode_frame(trace).map(|frame| Reading::from_frame(&frame))
}
