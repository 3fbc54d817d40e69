use crate::{regs, Milliseconds};

/// Driver configuration.
///
/// The defaults match the module as shipped: 7-bit address `0x04`, a 2ms
/// settle time around every bus transaction and a 56kΩ load resistor on
/// each sensing channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I2C address of the module's MCU.
    pub address: u8,
    /// Wait applied after each command write and each response read.
    pub settle_time: Milliseconds,
    /// Load resistor of the divider in front of the 10-bit ADC, in kΩ.
    pub load_resistance_kohm: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: regs::DEFAULT_ADDRESS,
            settle_time: Milliseconds(2),
            load_resistance_kohm: 56.0,
        }
    }
}

/// Fluent builder for a [`Config`].
///
/// ```rust
/// use multichannel_gas_sensor::{GasSensorBuilder, Milliseconds};
///
/// let config = GasSensorBuilder::new()
///     .address(0x19)
///     .settle_time(Milliseconds(5))
///     .build();
///
/// assert_eq!(config.address, 0x19);
/// assert_eq!(config.load_resistance_kohm, 56.0);
/// ```
#[derive(Default)]
pub struct GasSensorBuilder {
    config: Config,
}

impl GasSensorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the I2C address the driver talks to.
    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    /// Sets the settle time around bus transactions.
    ///
    /// The module's MCU needs at least 2ms between command and response.
    pub fn settle_time(mut self, settle_time: Milliseconds) -> Self {
        self.config.settle_time = settle_time;
        self
    }

    /// Sets the load resistance used by [`r0`](crate::GasSensor::r0) and
    /// [`rs`](crate::GasSensor::rs).
    pub fn load_resistance_kohm(mut self, kohm: f32) -> Self {
        self.config.load_resistance_kohm = kohm;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
