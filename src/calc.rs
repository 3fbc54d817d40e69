use embedded_hal::delay::DelayNs;
use libm::powf;

use crate::{error, i2c, regs, Channel, FirmwareVersion, GasSensor, GasType, Ready};

/// Full-scale reading of the module's 10-bit ADC.
const ADC_FULL_SCALE: f32 = 1023.0;

/// Rs/R0 ratio of each sensing channel, indexed by [`Channel`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ratios(pub [f32; 3]);

impl Ratios {
    pub fn get(&self, channel: Channel) -> f32 {
        self.0[channel as usize]
    }

    /// Ratios from the live and reference resistances reported by V1 firmware.
    ///
    /// Plain division: a zero reference yields `inf` or `NaN`, which the
    /// caller has to screen.
    pub fn from_resistances(res: &[u16; 3], res0: &[u16; 3]) -> Self {
        let mut ratios = [0.0; 3];
        for (ratio, (&rs, &r0)) in ratios.iter_mut().zip(res.iter().zip(res0.iter())) {
            *ratio = rs as f32 / r0 as f32;
        }
        Ratios(ratios)
    }

    /// Ratios from raw ADC readings reported by V2 firmware.
    ///
    /// Each channel sits in a divider with a fixed load resistor, so
    /// `Rs ∝ An / (1023 - An)` and the load resistor cancels out of the ratio.
    pub fn from_adc(calibration: &[u16; 3], current: &[u16; 3]) -> Self {
        let mut ratios = [0.0; 3];
        for (ratio, (&a0, &an)) in ratios.iter_mut().zip(calibration.iter().zip(current.iter())) {
            let a0 = a0 as f32;
            let an = an as f32;
            *ratio = an / a0 * (ADC_FULL_SCALE - a0) / (ADC_FULL_SCALE - an);
        }
        Ratios(ratios)
    }
}

/// Converts a raw channel ADC value into the sensing resistance in kΩ.
pub(crate) fn adc_to_kohm(adc: u16, load_resistance_kohm: f32) -> f32 {
    let adc = adc as f32;
    load_resistance_kohm * adc / (ADC_FULL_SCALE - adc)
}

/// Evaluates the empirical power-law curve of `gas` against its channel ratio.
///
/// The result may be `NaN` (e.g. `0/0` ratios or a negative base under a
/// fractional exponent); [`GasSensor::calc_gas`] turns that into an error.
pub fn concentration(gas: GasType, ratios: &Ratios) -> f32 {
    let ratio = ratios.get(gas.channel());

    match gas {
        GasType::CO => powf(ratio, -1.179) * 4.385,
        GasType::NO2 => powf(ratio, 1.007) / 6.855,
        GasType::NH3 => powf(ratio, -1.67) / 1.47,
        GasType::C3H8 => powf(ratio, -2.518) * 570.164,
        GasType::C4H10 => powf(ratio, -2.138) * 398.107,
        GasType::CH4 => powf(ratio, -4.363) * 630.957,
        GasType::H2 => powf(ratio, -1.8) * 0.73,
        GasType::C2H5OH => powf(ratio, -1.552) * 1.622,
    }
}

impl<I2C, E> GasSensor<I2C, Ready>
where
    I2C: i2c::I2c<Error = E>,
{
    /// Acquires the channel ratios with the protocol of the detected firmware.
    pub(crate) fn read_ratios(&mut self, delay: &mut impl DelayNs) -> error::Result<Ratios, E> {
        match self.version {
            FirmwareVersion::V1 => {
                self.read_resistances(delay).map_err(|e| match e {
                    error::GasSensorError::I2CError(e) => error::GasSensorError::I2CError(e),
                    _ => error::GasSensorError::ResistanceReadFailed,
                })?;

                Ok(Ratios::from_resistances(&self.res, &self.res0))
            }
            FirmwareVersion::V2 => {
                self.led_on()?;
                let ratios = self.read_adc_ratios(delay);
                // The indicator goes off even when a read failed; the read error wins.
                let led_off = self.led_off();
                let ratios = ratios?;
                led_off?;

                Ok(ratios)
            }
        }
    }

    fn read_adc_ratios(&mut self, delay: &mut impl DelayNs) -> error::Result<Ratios, E> {
        let mut calibration = [0u16; 3];
        let mut current = [0u16; 3];

        for channel in Channel::ALL {
            calibration[channel as usize] = self.read_register_with_param(
                regs::CMD_READ_EEPROM,
                channel.user_adc_slot(),
                delay,
            )?;
        }

        for channel in Channel::ALL {
            current[channel as usize] = self.read_register(channel.adc_register(), delay)?;
        }

        log::debug!("adc calibration {:?}, current {:?}", calibration, current);

        Ok(Ratios::from_adc(&calibration, &current))
    }
}
