use alloc::vec::Vec;

/// Number of consecutive identical samples after which the line is
/// considered idle and collection stops.
pub const DEFAULT_IDLE_THRESHOLD: usize = 100;

/// A single observation of the data line.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Line released or driven high.
    High,
    /// Line pulled low.
    Low,
}

impl From<bool> for Level {
    fn from(is_high: bool) -> Self {
        if is_high { Level::High } else { Level::Low }
    }
}

/// Tuning for the pulse collector.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectConfig {
    /// Collection ends once the line has held its level for more than this
    /// many samples after its last change.
    pub idle_threshold: usize,
    /// Optional hard cap on the trace length. `None` collects until the line
    /// goes idle, however long that takes.
    pub sample_limit: Option<usize>,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            idle_threshold: DEFAULT_IDLE_THRESHOLD,
            sample_limit: None,
        }
    }
}

impl CollectConfig {
    /// Default idle detection with collection capped at `limit` samples.
    pub const fn bounded(limit: usize) -> Self {
        Self {
            idle_threshold: DEFAULT_IDLE_THRESHOLD,
            sample_limit: Some(limit),
        }
    }
}

/// Samples the line until it goes idle and returns the raw trace.
///
/// The returned trace includes the terminating idle run.
///
/// # Arguments
///
/// * `config` - Idle threshold and optional sample cap
/// * `sample` - Closure returning the current line level
///
/// # Errors
///
/// Returns the first error produced by `sample`.
pub fn collect<E, F>(config: &CollectConfig, mut sample: F) -> Result<Vec<Level>, E>
where
    F: FnMut() -> Result<Level, E>,
{
    let mut trace = Vec::with_capacity(config.idle_threshold.saturating_mul(2));
    let mut last = None;
    let mut unchanged = 0;

    loop {
        if config.sample_limit.is_some_and(|limit| trace.len() >= limit) {
            break;
        }

        let current = sample()?;
        trace.push(current);

        if last != Some(current) {
            last = Some(current);
            unchanged = 0;
        } else {
            unchanged += 1;
            if unchanged > config.idle_threshold {
                break;
            }
        }
    }

    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    fn source(levels: &[Level]) -> impl FnMut() -> Result<Level, Infallible> + '_ {
        let mut iter = levels.iter().copied();
        move || Ok(iter.next().expect("sample source exhausted"))
    }

    #[test]
    fn test_stops_after_idle_run() {
        let config = CollectConfig {
            idle_threshold: 3,
            sample_limit: None,
        };
        // change, then 4 unchanged samples ends it; trailing entries are never read
        let levels = [
            Level::High,
            Level::Low,
            Level::Low,
            Level::High,
            Level::High,
            Level::High,
            Level::High,
            Level::High,
            Level::Low,
        ];

        let trace = collect(&config, source(&levels)).unwrap();

        assert_eq!(trace, &levels[..8]);
    }

    #[test]
    fn test_default_threshold_counts_from_last_change() {
        let mut levels = vec![Level::Low; 50];
        levels.extend(core::iter::repeat_n(Level::High, DEFAULT_IDLE_THRESHOLD + 2));

        let trace = collect(&CollectConfig::default(), source(&levels)).unwrap();

        assert_eq!(trace.len(), levels.len());
        assert_eq!(trace.last(), Some(&Level::High));
    }

    #[test]
    fn test_sample_limit_bounds_unstable_line() {
        let mut toggle = false;
        let trace = collect(&CollectConfig::bounded(500), || {
            toggle = !toggle;
            Ok::<_, Infallible>(Level::from(toggle))
        })
        .unwrap();

        assert_eq!(trace.len(), 500);
    }

    #[test]
    fn test_sample_error_propagates() {
        let mut calls = 0;
        let result = collect(&CollectConfig::default(), || {
            calls += 1;
            if calls < 5 { Ok(Level::Low) } else { Err("pin fault") }
        });

        assert_eq!(result, Err("pin fault"));
    }
}
