//! Ambient light sensor
//!
//! A photo-resistor divider on an ADC input, sampled periodically and
//! mapped onto the 16 brightness steps of the matrix controllers. Readings
//! are smoothed with an exponential moving average so the display does not
//! flicker between two levels.

use matrixclock_core::brightness::SharedBrightness;
use matrixclock_core::command::MAX_BRIGHTNESS;
use matrixclock_hal::adc::{AdcReader, ADC_MAX_12BIT};

/// Errors that can occur while sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError<E> {
    /// ADC conversion failed
    Adc(E),
}

/// Light sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightSensorConfig {
    /// Reading falls as light rises (photo-resistor on the low side)
    pub inverted: bool,
    /// EMA weight of a new sample is `1 / 2^smoothing_shift` (0 = none)
    pub smoothing_shift: u8,
}

impl Default for LightSensorConfig {
    fn default() -> Self {
        Self {
            inverted: false,
            smoothing_shift: 2,
        }
    }
}

/// Light sensor producing brightness levels
pub struct LightSensor<ADC> {
    adc: ADC,
    config: LightSensorConfig,
    /// Smoothed reading, 12-bit
    filtered: Option<u16>,
}

impl<ADC: AdcReader> LightSensor<ADC> {
    /// Create a sensor
    pub fn new(adc: ADC, config: LightSensorConfig) -> Self {
        Self {
            adc,
            config,
            filtered: None,
        }
    }

    /// Smoothed 12-bit reading, if any sample was taken
    pub fn filtered(&self) -> Option<u16> {
        self.filtered
    }

    /// Map a 12-bit reading to a brightness level
    pub fn level_for(&self, reading: u16) -> u8 {
        let reading = reading.min(ADC_MAX_12BIT) as u32;
        let level = (reading * (MAX_BRIGHTNESS as u32 + 1) / (ADC_MAX_12BIT as u32 + 1)) as u8;
        if self.config.inverted {
            MAX_BRIGHTNESS - level
        } else {
            level
        }
    }

    /// Take one sample and return the resulting brightness level
    pub fn sample(&mut self) -> Result<u8, SensorError<ADC::Error>> {
        let raw = self.adc.read().map_err(SensorError::Adc)?.min(ADC_MAX_12BIT);

        let filtered = match self.filtered {
            None => raw,
            Some(prev) => {
                let prev = prev as i32;
                let delta = (raw as i32 - prev) >> self.config.smoothing_shift.min(15);
                (prev + delta) as u16
            }
        };
        self.filtered = Some(filtered);

        Ok(self.level_for(filtered))
    }

    /// Sample and publish the level to `shared`
    pub fn update(&mut self, shared: &SharedBrightness) -> Result<u8, SensorError<ADC::Error>> {
        let level = self.sample()?;
        shared.store(level);
        Ok(level)
    }
}
