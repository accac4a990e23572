//! Pulse segmentation of a raw DHT11 trace.
//!
//! After the host releases the line the sensor answers with a low/high
//! response pair, then sends each bit as a fixed-length low phase followed by
//! a high pulse whose width encodes the bit value. The segmenter walks the
//! trace once and reports the width, in samples, of every data high pulse.

use alloc::vec::Vec;

use crate::signal::Level;

/// Number of data bits in one DHT11 transmission.
pub const PULSES_PER_FRAME: usize = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Waiting for the sensor to pull the line low.
    InitPullDown,
    /// Waiting for the sensor's response high.
    InitPullUp,
    /// Waiting for the low that opens the first data bit.
    DataFirstPullDown,
    /// Fixed-length low phase preceding a data pulse.
    DataPullUp,
    /// Variable-length high pulse carrying one bit.
    DataPullDown,
}

/// Walks the trace sample by sample, accumulating the data pulse widths.
struct Segmenter {
    phase: Phase,
    length: u32,
}

impl Segmenter {
    fn new() -> Self {
        Segmenter {
            phase: Phase::InitPullDown,
            length: 0,
        }
    }

    /// Feeds one sample, returning a pulse width when a data pulse ends.
    fn step(&mut self, level: Level) -> Option<u32> {
        self.length = self.length.saturating_add(1);

        let (next, emitted) = match (self.phase, level) {
            (Phase::InitPullDown, Level::Low) => (Phase::InitPullUp, None),
            (Phase::InitPullUp, Level::High) => (Phase::DataFirstPullDown, None),
            (Phase::DataFirstPullDown, Level::Low) => {
                self.length = 0;
                (Phase::DataPullUp, None)
            }
            (Phase::DataPullUp, Level::High) => {
                self.length = 0;
                (Phase::DataPullDown, None)
            }
            (Phase::DataPullDown, Level::Low) => (Phase::DataPullUp, Some(self.length)),
            (phase, _) => (phase, None),
        };

        self.phase = next;
        emitted
    }
}

/// Extracts the width of every data high pulse in `trace`, in transmission order.
///
/// A complete transmission yields exactly [`PULSES_PER_FRAME`] widths; any
/// other count means the frame was dropped or malformed.
pub fn segment(trace: &[Level]) -> Vec<u32> {
    let mut segmenter = Segmenter::new();
    let mut widths = Vec::with_capacity(PULSES_PER_FRAME);

    for &level in trace {
        if let Some(width) = segmenter.step(level) {
            widths.push(width);
        }
    }

    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Level::{High, Low};

    fn run(level: Level, n: usize) -> impl Iterator<Item = Level> {
        core::iter::repeat_n(level, n)
    }

    #[test]
    fn test_response_phases_emit_nothing() {
        let trace: Vec<Level> = run(High, 3).chain(run(Low, 8)).chain(run(High, 8)).collect();

        assert!(segment(&trace).is_empty());
    }

    #[test]
    fn test_pulse_width_counts_high_samples() {
        let trace: Vec<Level> = run(High, 2)
            .chain(run(Low, 8))
            .chain(run(High, 8))
            // bit 0: 5 low, 3 high
            .chain(run(Low, 5))
            .chain(run(High, 3))
            // bit 1: 5 low, 7 high
            .chain(run(Low, 5))
            .chain(run(High, 7))
            .chain(run(Low, 5))
            .chain(run(High, 120))
            .collect();

        assert_eq!(segment(&trace), vec![3, 7]);
    }

    #[test]
    fn test_unterminated_pulse_is_dropped() {
        let trace: Vec<Level> = run(Low, 4)
            .chain(run(High, 4))
            .chain(run(Low, 5))
            .chain(run(High, 6))
            .collect();

        assert!(segment(&trace).is_empty());
    }

    #[test]
    fn test_segmentation_is_deterministic() {
        let trace: Vec<Level> = (0..500u32)
            .map(|i| Level::from((i * 7 + i / 3) % 5 < 2))
            .collect();

        assert_eq!(segment(&trace), segment(&trace));
    }

    #[test]
    fn test_step_transitions() {
        let mut segmenter = Segmenter::new();

        assert_eq!(segmenter.step(High), None);
        assert_eq!(segmenter.phase, Phase::InitPullDown);
        assert_eq!(segmenter.step(Low), None);
        assert_eq!(segmenter.phase, Phase::InitPullUp);
        assert_eq!(segmenter.step(High), None);
        assert_eq!(segmenter.phase, Phase::DataFirstPullDown);
        assert_eq!(segmenter.step(Low), None);
        assert_eq!(segmenter.phase, Phase::DataPullUp);
        assert_eq!(segmenter.length, 0);
        assert_eq!(segmenter.step(High), None);
        assert_eq!(segmenter.phase, Phase::DataPullDown);
        assert_eq!(segmenter.step(High), None);
        assert_eq!(segmenter.step(Low), Some(2));
        assert_eq!(segmenter.phase, Phase::DataPullUp);
    }
}
