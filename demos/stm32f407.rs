//! Example: Gas monitoring with the Grove multichannel gas sensor on an STM32F407.
//!
//! This example demonstrates:
//! 1. **Initialization**: Setting up I2C and detecting the module firmware.
//! 2. **Calibration**: Loading the V1 reference resistances (V2 keeps them in EEPROM).
//! 3. **Measurement**: Reading every supported gas and logging it with defmt.
//!
//! Build with
//! `cargo build --example stm32f407 --features stm32f4-demo --target thumbv7em-none-eabihf`.

#![no_main]
#![no_std]
#![deny(unsafe_code)]

use defmt_rtt as _;
use multichannel_gas_sensor::*;
use panic_probe as _;
use stm32f4xx_hal::{self as hal, prelude::*};

const GASES: [(GasType, &str); 8] = [
    (GasType::CO, "CO"),
    (GasType::NO2, "NO2"),
    (GasType::NH3, "NH3"),
    (GasType::C3H8, "C3H8"),
    (GasType::C4H10, "C4H10"),
    (GasType::CH4, "CH4"),
    (GasType::H2, "H2"),
    (GasType::C2H5OH, "C2H5OH"),
];

#[cortex_m_rt::entry]
fn main() -> ! {
    // --- 1. Hardware Setup ---
    let dp = hal::pac::Peripherals::take().unwrap();
    let clock_cfg = hal::rcc::Config::default().sysclk(168.MHz());
    let mut rcc = dp.RCC.freeze(clock_cfg);

    // Setup I2C1 (SCL on PB6, SDA on PB7)
    let gpiob = dp.GPIOB.split(&mut rcc);
    let scl = gpiob.pb6.into_open_drain_output();
    let sda = gpiob.pb7.into_open_drain_output();

    let i2c = hal::i2c::I2c1::new(
        dp.I2C1,
        (scl, sda),
        hal::i2c::Mode::Standard {
            frequency: 100.kHz().into(),
        },
        &mut rcc,
    );

    let mut delay = dp.TIM6.delay_us(&mut rcc);

    // --- 2. Driver Initialization ---
    let sensor = GasSensor::new(i2c, regs::DEFAULT_ADDRESS);
    let mut sensor = sensor
        .begin(&mut delay)
        .expect("Failed to probe gas sensor firmware");

    defmt::println!("Firmware: {}", sensor.firmware_version());

    sensor.power_on().expect("Failed to power heater");

    // V1 firmware divides by R0 values that must be fetched once.
    if sensor.firmware_version() == FirmwareVersion::V1 {
        sensor
            .read_calibration(&mut delay)
            .expect("Failed to read R0 calibration");
    }

    // --- 3. Measurement Loop ---
    loop {
        for (gas, name) in GASES {
            match sensor.calc_gas(gas, &mut delay) {
                Ok(ppm) => defmt::println!("{}: {} ppm", name, ppm.0),
                Err(e) => defmt::println!("{}: error {}", name, e.code()),
            }
        }
        defmt::println!("");

        delay.delay_ms(5000);
    }
}
