use alloc::vec;
use alloc::vec::Vec;

/// Size of a DHT11 frame in bytes, checksum included.
pub const FRAME_LEN: usize = 5;

/// Converts pulse widths into bits using the midpoint of the observed range.
///
/// The sensor encodes 0 and 1 as short and long high pulses, but the absolute
/// width in samples depends on how fast the line was polled, so the threshold
/// is derived from each reading. A width strictly above the midpoint is a 1.
///
/// When every width is equal there is nothing to split and every bit reads
/// as 1.
pub fn threshold(widths: &[u32]) -> Vec<bool> {
    let (Some(&shortest), Some(&longest)) = (widths.iter().min(), widths.iter().max()) else {
        return Vec::new();
    };
    if shortest == longest {
        return vec![true; widths.len()];
    }
    let halfway = shortest + (longest - shortest) / 2;

    widths.iter().map(|&width| width > halfway).collect()
}

/// Packs bits into bytes, most significant bit first.
///
/// # Panics
///
/// Panics if the number of bits is not a multiple of 8. The segmenter only
/// ever hands over complete frames, so this indicates a bug, not noise.
pub fn pack(bits: &[bool]) -> Vec<u8> {
    assert!(
        bits.len() % 8 == 0,
        "bit count {} is not a multiple of 8",
        bits.len()
    );

    bits.chunks_exact(8)
        .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect()
}

/// The five bytes of a DHT11 transmission.
///
/// Layout: humidity integer, humidity fraction, temperature integer,
/// temperature fraction, checksum.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Wraps five received bytes, checksum last.
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Frame(bytes)
    }

    /// Builds a frame from a packed byte slice. Returns `None` unless the
    /// slice holds exactly [`FRAME_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(Frame)
    }

    /// All five bytes in transmission order.
    pub const fn bytes(&self) -> [u8; FRAME_LEN] {
        self.0
    }

    /// Integer part of the relative humidity in percent.
    pub const fn humidity(&self) -> u8 {
        self.0[0]
    }

    /// Fractional humidity byte, zero on DHT11.
    pub const fn humidity_fraction(&self) -> u8 {
        self.0[1]
    }

    /// Integer part of the temperature in degrees Celsius.
    pub const fn temperature(&self) -> u8 {
        self.0[2]
    }

    /// Fractional temperature byte, zero on DHT11.
    pub const fn temperature_fraction(&self) -> u8 {
        self.0[3]
    }

    /// Checksum byte as transmitted.
    pub const fn checksum(&self) -> u8 {
        self.0[4]
    }

    /// Sum of the four data bytes truncated to 8 bits.
    pub fn expected_checksum(&self) -> u8 {
        let sum: u16 = self.0[..4].iter().map(|&b| u16::from(b)).sum();
        (sum & 0xFF) as u8
    }

    /// Whether the transmitted checksum matches the data bytes.
    pub fn is_valid(&self) -> bool {
        self.expected_checksum() == self.checksum()
    }
}
