#![cfg_attr(not(test), no_std)]

//! # Grove Multichannel Gas Sensor Driver
//!
//! A `no_std` driver for the Grove multichannel gas sensor, built on the
//! [`embedded-hal`](https://docs.rs/embedded-hal) 1.0 traits.
//! The module carries a MiCS-6814 triple metal-oxide sensor (NH3, CO and NO2
//! channels) behind a small MCU that answers on I2C. This driver reads the
//! raw channel values and turns them into gas concentration estimates.
//!
//! ## Features
//! - **Firmware Detection**: The module ships with two firmware versions that
//!   speak different protocols. The version is probed once in
//!   [`GasSensor::begin`] and every operation dispatches on it.
//! - **Typestate Pattern**: Measurements are only available after `begin`.
//! - **Zero-Read Fallback**: A channel ADC read that returns 0 is replaced by
//!   the last non-zero value of that channel.
//! - **Logging**: Bus traffic and diagnostics go through the `log` facade.
//!   Without a logger installed they cost nothing and change no results.
//!
//! ## Units
//! - **Concentration**: parts per million ([`Ppm`]).
//! - **Resistance**: kΩ for [`GasSensor::r0`] / [`GasSensor::rs`], raw
//!   firmware units for the V1 resistance registers.
//!
//! ## Example
//! ```rust
//! use embedded_hal_mock::eh1::delay::NoopDelay;
//! use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
//! use multichannel_gas_sensor::{FirmwareVersion, GasSensor};
//!
//! // EEPROM slot 0 holds the V2 marker (1126 = 0x0466).
//! let i2c = I2cMock::new(&[
//!     I2cTransaction::write(0x04, vec![0x06, 0x00]),
//!     I2cTransaction::read(0x04, vec![0x04, 0x66]),
//! ]);
//! let mut delay = NoopDelay::new();
//!
//! let sensor = GasSensor::new(i2c, 0x04).begin(&mut delay).unwrap();
//! assert_eq!(sensor.firmware_version(), FirmwareVersion::V2);
//!
//! let mut i2c = sensor.release();
//! i2c.done();
//! ```

mod calc;
mod settings;

use core::marker::PhantomData;
use embedded_hal::{delay::DelayNs, i2c};

pub use calc::{concentration, Ratios};
pub use settings::{Config, GasSensorBuilder};

/// Register map and command codes of the module firmware.
///
/// These values are the wire contract with the module's MCU.
pub mod regs {
    /// Factory 7-bit I2C address.
    pub const DEFAULT_ADDRESS: u8 = 0x04;
    /// Value of EEPROM slot [`ADDR_IS_SET`] on V2 firmware.
    pub const VERSION_2_MARKER: u16 = 1126;

    // EEPROM slots (V2), read through `CMD_READ_EEPROM`.
    pub const ADDR_IS_SET: u8 = 0;
    pub const ADDR_FACTORY_ADC_NH3: u8 = 2;
    pub const ADDR_FACTORY_ADC_CO: u8 = 4;
    pub const ADDR_FACTORY_ADC_NO2: u8 = 6;
    pub const ADDR_USER_ADC_NH3: u8 = 8;
    pub const ADDR_USER_ADC_CO: u8 = 10;
    pub const ADDR_USER_ADC_NO2: u8 = 12;
    pub const ADDR_IF_CALI: u8 = 14;
    pub const ADDR_I2C_ADDRESS: u8 = 20;

    // Current channel ADC registers (V2).
    pub const CH_VALUE_NH3: u8 = 1;
    pub const CH_VALUE_CO: u8 = 2;
    pub const CH_VALUE_NO2: u8 = 3;

    // V2 commands.
    pub const CMD_CHANGE_I2C: u8 = 5;
    pub const CMD_READ_EEPROM: u8 = 6;
    pub const CMD_CONTROL_LED: u8 = 10;
    pub const CMD_CONTROL_PWR: u8 = 11;

    // V1 commands. Readings come back as 4 checksummed bytes.
    pub const V1_CMD_READ_RS: [u8; 3] = [0x01, 0x02, 0x03];
    pub const V1_CMD_READ_R0: [u8; 3] = [0x11, 0x12, 0x13];
    pub const V1_CMD_HEATER_OFF: u8 = 0x20;
    pub const V1_CMD_HEATER_ON: u8 = 0x21;
    pub const V1_CMD_CHANGE_I2C: u8 = 0x23;
}

// --- Typestates ---

/// Sensor has been created but its firmware version is not known yet.
#[derive(Debug)]
pub struct Uninitialized;
/// Firmware version detected, sensor ready for measurements.
#[derive(Debug)]
pub struct Ready;

/// Error types for the gas sensor driver.
pub mod error {
    /// Errors that can occur during communication or evaluation.
    #[derive(Debug, Clone, Copy, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum GasSensorError<E> {
        /// I2C bus error.
        I2CError(E),
        /// A V1 reading failed its additive checksum.
        ChecksumMismatch,
        /// A V1 reading decoded to a value out of the accepted range.
        InvalidReading(i16),
        /// The V1 resistance read behind a concentration computation failed.
        ResistanceReadFailed,
        /// The concentration curve produced `NaN`.
        NotANumber,
        /// The operation needs V2 firmware (EEPROM access).
        UnsupportedFirmware,
    }

    impl<E> GasSensorError<E> {
        /// The module's legacy numeric status for this error.
        ///
        /// Bus errors have no legacy code.
        pub fn code(&self) -> Option<i16> {
            match self {
                GasSensorError::I2CError(_) => None,
                GasSensorError::ChecksumMismatch => Some(-4),
                GasSensorError::NotANumber => Some(-3),
                GasSensorError::ResistanceReadFailed => Some(-2),
                GasSensorError::UnsupportedFirmware => Some(-1),
                GasSensorError::InvalidReading(value) => Some(*value),
            }
        }
    }

    /// Result type alias for gas sensor operations.
    pub type Result<T, E> = core::result::Result<T, GasSensorError<E>>;
}

/// Firmware generation running on the module's MCU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FirmwareVersion {
    /// Checksummed resistance protocol, no EEPROM access.
    V1 = 1,
    /// Raw ADC protocol with calibration data in EEPROM.
    V2 = 2,
}

/// The three sensing elements of the MiCS-6814.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    /// Reducing element, NH3 sensitive.
    Nh3 = 0,
    /// Reducing element, CO sensitive.
    Co = 1,
    /// Oxidising element, NO2 sensitive.
    No2 = 2,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Nh3, Channel::Co, Channel::No2];

    /// Register holding the current ADC value of this channel.
    pub fn adc_register(self) -> u8 {
        match self {
            Channel::Nh3 => regs::CH_VALUE_NH3,
            Channel::Co => regs::CH_VALUE_CO,
            Channel::No2 => regs::CH_VALUE_NO2,
        }
    }

    /// EEPROM slot of the user calibration ADC value.
    pub fn user_adc_slot(self) -> u8 {
        match self {
            Channel::Nh3 => regs::ADDR_USER_ADC_NH3,
            Channel::Co => regs::ADDR_USER_ADC_CO,
            Channel::No2 => regs::ADDR_USER_ADC_NO2,
        }
    }

    /// EEPROM slot of the factory calibration ADC value.
    pub fn factory_adc_slot(self) -> u8 {
        match self {
            Channel::Nh3 => regs::ADDR_FACTORY_ADC_NH3,
            Channel::Co => regs::ADDR_FACTORY_ADC_CO,
            Channel::No2 => regs::ADDR_FACTORY_ADC_NO2,
        }
    }

    fn from_adc_register(register: u8) -> Option<Self> {
        match register {
            regs::CH_VALUE_NH3 => Some(Channel::Nh3),
            regs::CH_VALUE_CO => Some(Channel::Co),
            regs::CH_VALUE_NO2 => Some(Channel::No2),
            _ => None,
        }
    }
}

/// Gases with a fitted concentration curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GasType {
    /// Carbon monoxide.
    CO,
    /// Nitrogen dioxide.
    NO2,
    /// Ammonia.
    NH3,
    /// Propane.
    C3H8,
    /// Butane.
    C4H10,
    /// Methane.
    CH4,
    /// Hydrogen.
    H2,
    /// Ethanol.
    C2H5OH,
}

impl GasType {
    /// Channel whose ratio drives this gas's curve.
    pub fn channel(self) -> Channel {
        match self {
            GasType::NH3 | GasType::C3H8 | GasType::C4H10 => Channel::Nh3,
            GasType::CO | GasType::CH4 | GasType::H2 | GasType::C2H5OH => Channel::Co,
            GasType::NO2 => Channel::No2,
        }
    }
}

/// Duration wrapper for type-safety. Stored in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Milliseconds(pub u32);

/// Gas concentration in parts per million.
///
/// The curves are empirical fits; treat the value as an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ppm(pub f32);

/// Calibration-related EEPROM contents of a V2 module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EepromDump {
    /// [`regs::VERSION_2_MARKER`] once the module has been provisioned.
    pub is_set: u16,
    /// Factory calibration ADC values, indexed by [`Channel`].
    pub factory_adc: [u16; 3],
    /// User calibration ADC values, indexed by [`Channel`].
    pub user_adc: [u16; 3],
    /// I2C address stored for the next power cycle.
    pub i2c_address: u16,
}

/// The main gas sensor driver structure.
///
/// Use `GasSensor::new(...)` to start. The `STATE` generic uses the Typestate
/// pattern to track whether the firmware version has been detected.
#[derive(Debug)]
pub struct GasSensor<I2C, STATE> {
    i2c: I2C,
    config: Config,
    version: FirmwareVersion,
    /// Live channel resistances (V1).
    res: [u16; 3],
    /// Reference channel resistances (V1).
    res0: [u16; 3],
    /// Last non-zero ADC value per channel.
    adc_fallback: [u16; 3],
    _state: PhantomData<STATE>,
}

impl<I2C, E> GasSensor<I2C, Uninitialized>
where
    I2C: i2c::I2c<Error = E>,
{
    /// Creates a new driver instance with default settings at `address`.
    ///
    /// This does not communicate with the sensor yet.
    ///
    /// # Arguments
    /// * `i2c` - The I2C bus object.
    /// * `address` - 7-bit I2C address of the module (factory default `0x04`).
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self::with_config(
            i2c,
            Config {
                address,
                ..Config::default()
            },
        )
    }

    /// Creates a new driver instance from a full [`Config`].
    pub fn with_config(i2c: I2C, config: Config) -> Self {
        GasSensor {
            i2c,
            config,
            version: FirmwareVersion::V1,
            res: [0; 3],
            res0: [0; 3],
            adc_fallback: [0; 3],
            _state: PhantomData,
        }
    }

    /// Detects the firmware version and transitions to `Ready`.
    ///
    /// # Errors
    /// Returns an error if the I2C communication fails during the probe.
    pub fn begin(mut self, delay: &mut impl DelayNs) -> error::Result<GasSensor<I2C, Ready>, E> {
        self.version = FirmwareVersion::V1;
        self.version = self.probe_version(delay)?;

        Ok(GasSensor {
            i2c: self.i2c,
            config: self.config,
            version: self.version,
            res: self.res,
            res0: self.res0,
            adc_fallback: self.adc_fallback,
            _state: PhantomData,
        })
    }
}

impl<I2C, STATE, E> GasSensor<I2C, STATE>
where
    I2C: i2c::I2c<Error = E>,
{
    /// Writes raw bytes (typically `[Command, Value]`) to the module.
    pub fn write_bytes(&mut self, data: &[u8]) -> error::Result<(), E> {
        log::debug!("i2c 0x{:02x} write {:02x?}", self.config.address, data);

        self.i2c
            .write(self.config.address, data)
            .map_err(error::GasSensorError::I2CError)
    }

    /// Reads a 16-bit big-endian value from a single register.
    ///
    /// For the channel ADC registers, a zero reading is replaced by the last
    /// non-zero reading of that channel.
    pub fn read_register(
        &mut self,
        register: u8,
        delay: &mut impl DelayNs,
    ) -> error::Result<u16, E> {
        let value = self.read_word(&[register], delay)?;
        Ok(self.apply_fallback(register, value))
    }

    /// Reads a 16-bit big-endian value from a register that takes a parameter.
    pub fn read_register_with_param(
        &mut self,
        register: u8,
        param: u8,
        delay: &mut impl DelayNs,
    ) -> error::Result<u16, E> {
        self.read_word(&[register, param], delay)
    }

    /// Sends a V1 command and reads its 4-byte checksummed answer.
    ///
    /// The answer is `[_, msb, lsb, sum]` where `sum` is the wrapping sum of
    /// the first three bytes.
    ///
    /// # Errors
    /// Returns [`error::GasSensorError::ChecksumMismatch`] if `sum` does not match.
    pub fn read_checksummed(
        &mut self,
        command: u8,
        delay: &mut impl DelayNs,
    ) -> error::Result<i16, E> {
        self.write_bytes(&[command])?;
        delay.delay_ms(self.config.settle_time.0);

        let mut buffer = [0u8; 4];
        self.i2c
            .read(self.config.address, &mut buffer)
            .map_err(error::GasSensorError::I2CError)?;
        log::debug!("i2c 0x{:02x} read {:02x?}", self.config.address, buffer);

        let checksum = buffer[0].wrapping_add(buffer[1]).wrapping_add(buffer[2]);
        if checksum != buffer[3] {
            log::warn!(
                "checksum mismatch on command 0x{:02x}: expected 0x{:02x}, got 0x{:02x}",
                command,
                checksum,
                buffer[3]
            );
            return Err(error::GasSensorError::ChecksumMismatch);
        }

        Ok(i16::from_be_bytes([buffer[1], buffer[2]]))
    }

    /// Current I2C address of the module.
    pub fn address(&self) -> u8 {
        self.config.address
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Releases the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Write command, settle, read two bytes, settle.
    fn read_word(&mut self, command: &[u8], delay: &mut impl DelayNs) -> error::Result<u16, E> {
        self.write_bytes(command)?;
        delay.delay_ms(self.config.settle_time.0);

        let mut buffer = [0u8; 2];
        self.i2c
            .read(self.config.address, &mut buffer)
            .map_err(error::GasSensorError::I2CError)?;
        delay.delay_ms(self.config.settle_time.0);
        log::debug!("i2c 0x{:02x} read {:02x?}", self.config.address, buffer);

        Ok(u16::from_be_bytes(buffer))
    }

    fn apply_fallback(&mut self, register: u8, value: u16) -> u16 {
        let Some(channel) = Channel::from_adc_register(register) else {
            return value;
        };

        let cached = &mut self.adc_fallback[channel as usize];
        if value > 0 {
            *cached = value;
            value
        } else {
            log::warn!("{:?} channel read 0, reusing {}", channel, *cached);
            *cached
        }
    }

    fn probe_version(&mut self, delay: &mut impl DelayNs) -> error::Result<FirmwareVersion, E> {
        let marker =
            self.read_register_with_param(regs::CMD_READ_EEPROM, regs::ADDR_IS_SET, delay)?;

        let version = if marker == regs::VERSION_2_MARKER {
            FirmwareVersion::V2
        } else {
            FirmwareVersion::V1
        };
        log::info!("firmware version = {}", version as u8);

        Ok(version)
    }
}

impl<I2C, E> GasSensor<I2C, Ready>
where
    I2C: i2c::I2c<Error = E>,
{
    /// Firmware version detected by [`GasSensor::begin`].
    pub fn firmware_version(&self) -> FirmwareVersion {
        self.version
    }

    /// Probes the firmware version again and caches the result.
    pub fn detect_firmware_version(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> error::Result<FirmwareVersion, E> {
        self.version = self.probe_version(delay)?;
        Ok(self.version)
    }

    /// Live channel resistances from the last [`read_resistances`](Self::read_resistances).
    pub fn resistances(&self) -> [u16; 3] {
        self.res
    }

    /// Reference channel resistances from the last [`read_calibration`](Self::read_calibration).
    pub fn reference_resistances(&self) -> [u16; 3] {
        self.res0
    }

    /// Reads the reference resistance R0 of each channel stored by V1 firmware.
    ///
    /// V1 concentration ratios divide by these values, so call this once
    /// after `begin` on V1 modules.
    ///
    /// # Errors
    /// Aborts on the first failing channel. A reading `<= 0` is rejected as
    /// [`error::GasSensorError::InvalidReading`].
    pub fn read_calibration(&mut self, delay: &mut impl DelayNs) -> error::Result<(), E> {
        for (i, command) in regs::V1_CMD_READ_R0.into_iter().enumerate() {
            let value = self.read_checksummed(command, delay)?;
            if value <= 0 {
                log::warn!("rejected R0 reading {} on command 0x{:02x}", value, command);
                return Err(error::GasSensorError::InvalidReading(value));
            }
            self.res0[i] = value as u16;
        }

        Ok(())
    }

    /// Reads the live resistance Rs of each channel from V1 firmware.
    ///
    /// Unlike [`read_calibration`](Self::read_calibration), a zero reading is accepted.
    ///
    /// # Errors
    /// Aborts on the first failing channel. A reading `< 0` is rejected as
    /// [`error::GasSensorError::InvalidReading`].
    pub fn read_resistances(&mut self, delay: &mut impl DelayNs) -> error::Result<(), E> {
        for (i, command) in regs::V1_CMD_READ_RS.into_iter().enumerate() {
            let value = self.read_checksummed(command, delay)?;
            if value < 0 {
                log::warn!("rejected Rs reading {} on command 0x{:02x}", value, command);
                return Err(error::GasSensorError::InvalidReading(value));
            }
            self.res[i] = value as u16;
        }

        Ok(())
    }

    /// Measures and computes the concentration of `gas`.
    ///
    /// On V1 firmware this reads the live resistances and divides by the
    /// reference resistances from [`read_calibration`](Self::read_calibration).
    /// On V2 firmware it lights the indicator LED, reads the calibration and
    /// current ADC values, and switches the LED off again.
    ///
    /// # Errors
    /// - [`error::GasSensorError::ResistanceReadFailed`] if the V1 resistance read failed.
    /// - [`error::GasSensorError::NotANumber`] if the curve evaluates to `NaN`.
    pub fn calc_gas(&mut self, gas: GasType, delay: &mut impl DelayNs) -> error::Result<Ppm, E> {
        let ratios = self.read_ratios(delay)?;

        let ppm = calc::concentration(gas, &ratios);
        if ppm.is_nan() {
            log::warn!("{:?} concentration is NaN for ratios {:?}", gas, ratios.0);
            return Err(error::GasSensorError::NotANumber);
        }

        Ok(Ppm(ppm))
    }

    pub fn measure_co(&mut self, delay: &mut impl DelayNs) -> error::Result<Ppm, E> {
        self.calc_gas(GasType::CO, delay)
    }

    pub fn measure_no2(&mut self, delay: &mut impl DelayNs) -> error::Result<Ppm, E> {
        self.calc_gas(GasType::NO2, delay)
    }

    pub fn measure_nh3(&mut self, delay: &mut impl DelayNs) -> error::Result<Ppm, E> {
        self.calc_gas(GasType::NH3, delay)
    }

    pub fn measure_c3h8(&mut self, delay: &mut impl DelayNs) -> error::Result<Ppm, E> {
        self.calc_gas(GasType::C3H8, delay)
    }

    pub fn measure_c4h10(&mut self, delay: &mut impl DelayNs) -> error::Result<Ppm, E> {
        self.calc_gas(GasType::C4H10, delay)
    }

    pub fn measure_ch4(&mut self, delay: &mut impl DelayNs) -> error::Result<Ppm, E> {
        self.calc_gas(GasType::CH4, delay)
    }

    pub fn measure_h2(&mut self, delay: &mut impl DelayNs) -> error::Result<Ppm, E> {
        self.calc_gas(GasType::H2, delay)
    }

    pub fn measure_c2h5oh(&mut self, delay: &mut impl DelayNs) -> error::Result<Ppm, E> {
        self.calc_gas(GasType::C2H5OH, delay)
    }

    /// Changes the module's I2C address.
    ///
    /// The module stores the new address in its EEPROM. All following
    /// transactions of this driver go to `new_address`.
    pub fn change_address(&mut self, new_address: u8) -> error::Result<(), E> {
        let command = match self.version {
            FirmwareVersion::V1 => regs::V1_CMD_CHANGE_I2C,
            FirmwareVersion::V2 => regs::CMD_CHANGE_I2C,
        };
        self.write_bytes(&[command, new_address])?;

        log::info!(
            "i2c address changed: 0x{:02x} > 0x{:02x}",
            self.config.address,
            new_address
        );
        self.config.address = new_address;

        Ok(())
    }

    /// Switches the onboard indicator LED on.
    pub fn led_on(&mut self) -> error::Result<(), E> {
        self.write_bytes(&[regs::CMD_CONTROL_LED, 1])
    }

    /// Switches the onboard indicator LED off.
    pub fn led_off(&mut self) -> error::Result<(), E> {
        self.write_bytes(&[regs::CMD_CONTROL_LED, 0])
    }

    /// Powers the sensor heater on.
    pub fn power_on(&mut self) -> error::Result<(), E> {
        match self.version {
            FirmwareVersion::V1 => self.write_bytes(&[regs::V1_CMD_HEATER_ON]),
            FirmwareVersion::V2 => self.write_bytes(&[regs::CMD_CONTROL_PWR, 1]),
        }
    }

    /// Powers the sensor heater off.
    pub fn power_off(&mut self) -> error::Result<(), E> {
        match self.version {
            FirmwareVersion::V1 => self.write_bytes(&[regs::V1_CMD_HEATER_OFF]),
            FirmwareVersion::V2 => self.write_bytes(&[regs::CMD_CONTROL_PWR, 0]),
        }
    }

    /// Reads one 16-bit EEPROM slot (V2 only).
    pub fn read_eeprom(&mut self, slot: u8, delay: &mut impl DelayNs) -> error::Result<u16, E> {
        self.require_v2("read_eeprom")?;
        self.read_register_with_param(regs::CMD_READ_EEPROM, slot, delay)
    }

    /// Reads and logs the calibration-related EEPROM fields (V2 only).
    pub fn eeprom_dump(&mut self, delay: &mut impl DelayNs) -> error::Result<EepromDump, E> {
        self.require_v2("eeprom_dump")?;

        let mut dump = EepromDump {
            is_set: self.read_register_with_param(regs::CMD_READ_EEPROM, regs::ADDR_IS_SET, delay)?,
            ..EepromDump::default()
        };
        for channel in Channel::ALL {
            dump.factory_adc[channel as usize] = self.read_register_with_param(
                regs::CMD_READ_EEPROM,
                channel.factory_adc_slot(),
                delay,
            )?;
        }
        for channel in Channel::ALL {
            dump.user_adc[channel as usize] = self.read_register_with_param(
                regs::CMD_READ_EEPROM,
                channel.user_adc_slot(),
                delay,
            )?;
        }
        dump.i2c_address =
            self.read_register_with_param(regs::CMD_READ_EEPROM, regs::ADDR_I2C_ADDRESS, delay)?;

        log::info!("ADDR_IS_SET = {}", dump.is_set);
        log::info!("ADDR_FACTORY_ADC (NH3, CO, NO2) = {:?}", dump.factory_adc);
        log::info!("ADDR_USER_ADC (NH3, CO, NO2) = {:?}", dump.user_adc);
        log::info!("ADDR_I2C_ADDRESS = {}", dump.i2c_address);

        Ok(dump)
    }

    /// Reference resistance R0 of `channel` in kΩ, from the user calibration
    /// stored in EEPROM (V2 only).
    pub fn r0(&mut self, channel: Channel, delay: &mut impl DelayNs) -> error::Result<f32, E> {
        self.require_v2("r0")?;

        let adc =
            self.read_register_with_param(regs::CMD_READ_EEPROM, channel.user_adc_slot(), delay)?;
        log::debug!("{:?} calibration adc = {}", channel, adc);

        Ok(calc::adc_to_kohm(adc, self.config.load_resistance_kohm))
    }

    /// Current sensing resistance Rs of `channel` in kΩ (V2 only).
    pub fn rs(&mut self, channel: Channel, delay: &mut impl DelayNs) -> error::Result<f32, E> {
        self.require_v2("rs")?;

        let adc = self.read_register(channel.adc_register(), delay)?;

        Ok(calc::adc_to_kohm(adc, self.config.load_resistance_kohm))
    }

    fn require_v2(&self, operation: &str) -> error::Result<(), E> {
        if self.version == FirmwareVersion::V1 {
            log::warn!("{}() is not supported by V1 firmware", operation);
            return Err(error::GasSensorError::UnsupportedFirmware);
        }
        Ok(())
    }
}
