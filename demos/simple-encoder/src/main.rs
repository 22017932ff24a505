//! Simple encoder example
//!
//! Demonstrates basic usage of the i2c-encoder-driver crate on the Raspberry
//! Pi Pico 2. Identifies the board, configures an integer counter that wraps
//! between -50 and 50, and logs the counter whenever it changes.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | I2C0 SDA  | GP20       |                              |
//! | I2C0 SCL  | GP21       |                              |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use i2c_encoder_driver::{EncoderError, I2cEncoder, RegisterBus};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

/// Address selected by the board's A0–A6 solder jumpers.
const ENCODER_ADDRESS: u8 = 0x64;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // --- I2C bus (GP20 = SDA, GP21 = SCL), blocking mode ---
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c::Config::default());

    let encoder = I2cEncoder::from_i2c(i2c, ENCODER_ADDRESS);

    match (encoder.get_u8("idcode"), encoder.get_u8("version")) {
        (Ok(id), Ok(version)) => info!("Encoder id {=u8:#04x}, version {=u8:#04x}", id, version),
        (Err(e), _) | (_, Err(e)) => error!("Identification failed: {}", e),
    }

    // Reset to power-on defaults; the board needs a moment before it answers again.
    if let Err(e) = encoder.set_bool("gconf_rst", true) {
        error!("Reset failed: {}", e);
    }
    Timer::after(Duration::from_millis(1)).await;

    if let Err(e) = configure(&encoder) {
        error!("Configuration failed: {}", e);
    }

    info!("Encoder example started — rotate the knob to see counter changes");

    // Main loop: poll the counter and log changes.
    let mut last = None;
    loop {
        match encoder.get_i32("cval_long") {
            Ok(value) if last != Some(value) => {
                info!("Counter: {}", value);
                last = Some(value);
            }
            Ok(_) => {}
            Err(e) => error!("Read failed: {}", e),
        }

        Timer::after(Duration::from_millis(20)).await;
    }
}

/// Integer counter, wrap enabled, -50..=50 in steps of 1, green LED on.
fn configure<B: RegisterBus>(encoder: &I2cEncoder<B>) -> Result<(), EncoderError<B::Error>> {
    encoder.set_bool("gconf_dtype", false)?;
    encoder.set_bool("gconf_wrape", true)?;
    encoder.set_bool("gconf_etype", true)?;

    encoder.set_i32("cval_long", 0)?;
    encoder.set_i32("cmax_long", 50)?;
    encoder.set_i32("cmin_long", -50)?;
    encoder.set_i32("istep_long", 1)?;

    encoder.set_u8("antbounc", 10)?;
    encoder.set_u8("gled", 0x40)?;
    Ok(())
}
