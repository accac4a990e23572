use core::convert::Infallible;

/// Possible errors from a DHT11 read attempt.
///
/// `MissingData` and `ChecksumMismatch` are expected sensor noise; retrying
/// the read is the normal recovery for both.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// The trace did not contain exactly 40 data pulses.
    MissingData,
    /// Checksum did not match the received data.
    ChecksumMismatch,
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl DhtError<Infallible> {
    /// Converts an error from the pin-free decoder into one for any pin type.
    pub fn widen<E>(self) -> DhtError<E> {
        match self {
            DhtError::MissingData => DhtError::MissingData,
            DhtError::ChecksumMismatch => DhtError::ChecksumMismatch,
            DhtError::PinError(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_error_conversion() {
        fn fails() -> Result<(), DhtError<u8>> {
            Err::<(), u8>(7)?;
            Ok(())
        }

        assert_eq!(fails().unwrap_err(), DhtError::PinError(7));
    }

    #[test]
    fn test_widen_keeps_decode_errors() {
        let missing: DhtError<u8> = DhtError::<Infallible>::MissingData.widen();
        let checksum: DhtError<u8> = DhtError::<Infallible>::ChecksumMismatch.widen();

        assert_eq!(missing, DhtError::MissingData);
        assert_eq!(checksum, DhtError::ChecksumMismatch);
    }
}
