//! Configuration for the segment test sequencer.

use ntd_hal::PinMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Sequencer timing and wiring.
///
/// Settle times are fixed characteristics of the jig hardware, not tuning
/// knobs; the defaults match the reference fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SequencerConfig {
    /// Wait after every display command before sampling, in milliseconds.
    ///
    /// Default: 10ms.
    pub settle_ms: u32,

    /// Wait after switching the segment multiplexer, in milliseconds.
    ///
    /// Default: 10ms.
    pub segment_select_settle_ms: u32,

    /// Half-period of the distress blink on fatal halt, in milliseconds.
    ///
    /// Default: 1000ms.
    pub halt_blink_half_period_ms: u32,

    /// Physical pin assignment of the jig.
    pub pins: PinMap,
}

impl SequencerConfig {
    /// Accepted range for settle delays.
    pub const SETTLE_RANGE_MS: core::ops::RangeInclusive<u32> = 1..=1000;

    /// Accepted range for the distress blink half-period.
    pub const BLINK_RANGE_MS: core::ops::RangeInclusive<u32> = 50..=10_000;

    /// Create a configuration with the given settle delay.
    ///
    /// # Errors
    ///
    /// Returns an error if `settle_ms` is outside [`Self::SETTLE_RANGE_MS`].
    pub fn new(settle_ms: u32) -> ConfigResult<Self> {
        let config = Self {
            settle_ms,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> SequencerConfigBuilder {
        SequencerConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any delay is out of range or two lines share a pin.
    pub fn validate(&self) -> ConfigResult<()> {
        check_range("settle_ms", self.settle_ms, &Self::SETTLE_RANGE_MS)?;
        check_range(
            "segment_select_settle_ms",
            self.segment_select_settle_ms,
            &Self::SETTLE_RANGE_MS,
        )?;
        check_range(
            "halt_blink_half_period_ms",
            self.halt_blink_half_period_ms,
            &Self::BLINK_RANGE_MS,
        )?;
        self.pins.validate()?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    range: &core::ops::RangeInclusive<u32>,
) -> ConfigResult<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            settle_ms: 10,
            segment_select_settle_ms: 10,
            halt_blink_half_period_ms: 1000,
            pins: PinMap::default(),
        }
    }
}

/// Builder for [`SequencerConfig`].
#[derive(Debug, Default)]
pub struct SequencerConfigBuilder {
    config: SequencerConfig,
}

impl SequencerConfigBuilder {
    /// Set the display settle delay.
    #[must_use]
    pub fn settle_ms(mut self, ms: u32) -> Self {
        self.config.settle_ms = ms;
        self
    }

    /// Set the segment multiplexer settle delay.
    #[must_use]
    pub fn segment_select_settle_ms(mut self, ms: u32) -> Self {
        self.config.segment_select_settle_ms = ms;
        self
    }

    /// Set the distress blink half-period.
    #[must_use]
    pub fn halt_blink_half_period_ms(mut self, ms: u32) -> Self {
        self.config.halt_blink_half_period_ms = ms;
        self
    }

    /// Set the pin assignment.
    #[must_use]
    pub fn pins(mut self, pins: PinMap) -> Self {
        self.config.pins = pins;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> ConfigResult<SequencerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntd_hal::Pin;

    #[test]
    fn test_default_config() {
        let config = SequencerConfig::default();
        assert_eq!(config.settle_ms, 10);
        assert_eq!(config.segment_select_settle_ms, 10);
        assert_eq!(config.halt_blink_half_period_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(SequencerConfig::new(0).is_err());
        assert!(SequencerConfig::new(1001).is_err());
        assert!(SequencerConfig::new(25).is_ok());
    }

    #[test]
    fn test_config_builder() -> ConfigResult<()> {
        let config = SequencerConfig::builder()
            .settle_ms(5)
            .segment_select_settle_ms(20)
            .halt_blink_half_period_ms(250)
            .build()?;
        assert_eq!(config.settle_ms, 5);
        assert_eq!(config.segment_select_settle_ms, 20);
        assert_eq!(config.halt_blink_half_period_ms, 250);
        Ok(())
    }

    #[test]
    fn test_builder_rejects_bad_blink() {
        let result = SequencerConfig::builder()
            .halt_blink_half_period_ms(10)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::OutOfRange {
                field: "halt_blink_half_period_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_builder_rejects_pin_collision() {
        let pins = PinMap {
            status_led: Pin::digital(7),
            ..PinMap::default()
        };
        let result = SequencerConfig::builder().pins(pins).build();
        assert!(matches!(result, Err(ConfigError::Pins(_))));
    }
}
