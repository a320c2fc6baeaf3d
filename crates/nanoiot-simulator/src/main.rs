//! Desktop simulator for nanoiot-rs register decoding.
//!
//! Emulates a barometric pressure/temperature sensor as an in-memory register
//! bank, reads it through [`RegisterDevice`] the way a driver would, and
//! collects the decoded samples in a [`GrowableList`]. Runs without hardware.
//!
//! Set `RUST_LOG=debug` to see every register transaction.

use std::time::Duration;

use embassy_futures::block_on;
use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
use embedded_hal_async::i2c::I2c;
use log::{error, info, warn};

use nanoiot_rs::endian::{self, ByteOrder, ByteReader};
use nanoiot_rs::{BoundedView, DeviceConfig, GrowableList, RegisterDevice, RegisterError};

// ---------------------------------------------------------------------------
// Register map
// ---------------------------------------------------------------------------

/// Chip identification register.
const REG_CHIP_ID: u8 = 0xD0;

/// Measurement control register.
const REG_CTRL_MEAS: u8 = 0xF4;

/// First of three pressure sample registers (MSB, LSB, XLSB).
const REG_PRESSURE: u8 = 0xF7;

/// First of three temperature sample registers (MSB, LSB, XLSB).
const REG_TEMPERATURE: u8 = 0xFA;

/// First calibration word (little-endian pairs on real parts).
const REG_CALIBRATION: u8 = 0x88;

/// Value reported by the chip-id register.
const CHIP_ID: u8 = 0x58;

/// Forced mode, x1 oversampling for both channels. Each write starts one conversion.
const CTRL_MEAS_FORCED: u8 = 0x25;

/// Mode bits of the measurement control register.
const CTRL_MEAS_MODE_MASK: u8 = 0b11;

/// Simulated time that passes per forced conversion.
const CONVERSION_STEP_SECS: f64 = 0.5;

/// Number of synthetic samples to collect.
const SAMPLE_COUNT: usize = 12;

/// Pause between simulated conversions.
const SAMPLE_INTERVAL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Simulated sensor
// ---------------------------------------------------------------------------

/// In-memory register file with an auto-incrementing pointer.
struct SimulatedSensor {
    address: u8,
    registers: [u8; 256],
    pointer: u8,
    /// Monotonic seconds counter used to vary the synthetic signal.
    elapsed_secs: f64,
}

impl SimulatedSensor {
    fn new(address: u8) -> Self {
        let mut registers = [0u8; 256];
        registers[REG_CHIP_ID as usize] = CHIP_ID;
        // dig_T1 = 27504 as stored by the part
        registers[REG_CALIBRATION as usize] = 0x70;
        registers[REG_CALIBRATION as usize + 1] = 0x6B;
        Self {
            address,
            registers,
            pointer: 0,
            elapsed_secs: 0.0,
        }
    }

    /// Advance the clock and latch new 20-bit ADC words into the sample registers.
    fn convert(&mut self, dt_secs: f64) {
        self.elapsed_secs += dt_secs;
        let t = self.elapsed_secs;

        let pressure = (415_148.0 + 2_000.0 * (t / 3.0).sin()) as u32;
        let temperature = (519_888.0 + 800.0 * (t / 5.0).cos()) as u32;

        self.latch(REG_PRESSURE, pressure);
        self.latch(REG_TEMPERATURE, temperature);
    }

    /// Store a 20-bit value left-aligned in three big-endian registers.
    fn latch(&mut self, register: u8, sample: u32) {
        let word = (sample & 0x000F_FFFF) << 4;
        let start = register as usize;
        let mut bytes = [0u8; 4];
        // Only the low three bytes of the big-endian word are register contents
        if endian::write_u32_be(&mut bytes, word).is_ok() {
            self.registers[start..start + 3].copy_from_slice(&bytes[1..]);
        }
    }
}

impl ErrorType for SimulatedSensor {
    type Error = ErrorKind;
}

impl I2c for SimulatedSensor {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    if let Some((register, data)) = bytes.split_first() {
                        self.pointer = *register;
                        for byte in data {
                            self.registers[self.pointer as usize] = *byte;
                            self.pointer = self.pointer.wrapping_add(1);
                        }
                        if *register == REG_CTRL_MEAS
                            && data
                                .first()
                                .is_some_and(|mode| mode & CTRL_MEAS_MODE_MASK == 0b01)
                        {
                            self.convert(CONVERSION_STEP_SECS);
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.registers[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Driver loop
// ---------------------------------------------------------------------------

/// One decoded conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    pressure_raw: i32,
    temperature_raw: i32,
}

/// Trigger a conversion and read both ADC channels. A failure aborts this sample only.
async fn read_sample(
    device: &mut RegisterDevice<SimulatedSensor>,
) -> Result<Sample, RegisterError<ErrorKind>> {
    device.write_u8(REG_CTRL_MEAS, CTRL_MEAS_FORCED).await?;
    let pressure_raw = device.read_sample(REG_PRESSURE).await?;
    let temperature_raw = device.read_sample(REG_TEMPERATURE).await?;
    Ok(Sample {
        pressure_raw,
        temperature_raw,
    })
}

/// Probe the chip and return its first calibration word.
async fn initialize(
    device: &mut RegisterDevice<SimulatedSensor>,
) -> Result<u16, RegisterError<ErrorKind>> {
    let chip_id = device.read_u8(REG_CHIP_ID).await?;
    info!("Chip id: {:#04x}", chip_id);
    if chip_id != CHIP_ID {
        warn!("Unexpected chip id, continuing anyway");
    }

    // Calibration words are little-endian regardless of the sample layout
    let mut calibration = [0u8; 2];
    device.read_block(REG_CALIBRATION, &mut calibration).await?;
    Ok(endian::read_u16_le(&calibration)?)
}

/// Decode the fixed two-word frame the driver tests use as a smoke check.
fn decode_demo_frame() -> GrowableList<u16> {
    let frame = [0x00, 0x01, 0x00, 0x02];
    let mut reader = ByteReader::new(BoundedView::new(&frame), ByteOrder::Big);
    let mut words = GrowableList::with_capacity(2);
    while reader.remaining() >= 2 {
        match reader.read::<u16>() {
            Ok(word) => words.add(word),
            Err(e) => {
                error!("Demo frame decode failed: {}", e);
                break;
            }
        }
    }
    words
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting nanoiot-rs simulator");

    let words = decode_demo_frame();
    info!("Demo frame decoded as {:?}", words.as_slice());

    // Round-trip the device description through its stored form
    let config = DeviceConfig::default();
    let config = match config.to_bytes().and_then(|bytes| DeviceConfig::from_bytes(&bytes)) {
        Ok(config) => config,
        Err(e) => {
            error!("Config round-trip failed: {}", e);
            return;
        }
    };
    info!(
        "Device at {:#04x}, {:?} endian, {}-bit samples",
        config.address, config.byte_order, config.sample_bits
    );

    let mut device = match RegisterDevice::new(SimulatedSensor::new(config.address), config) {
        Ok(device) => device,
        Err(e) => {
            error!("Invalid device config: {}", e);
            return;
        }
    };

    match block_on(initialize(&mut device)) {
        Ok(dig_t1) => info!("Calibration dig_T1 = {}", dig_t1),
        Err(e) => {
            error!("Initialization failed: {:?}", e);
            return;
        }
    }

    let mut samples: GrowableList<Sample> = GrowableList::with_capacity(SAMPLE_COUNT);
    for _ in 0..SAMPLE_COUNT {
        match block_on(read_sample(&mut device)) {
            Ok(sample) => samples.add(sample),
            Err(e) => warn!("Sample skipped: {:?}", e),
        }
        std::thread::sleep(SAMPLE_INTERVAL);
    }

    report(&samples);
    info!("Simulator exiting");
}

/// Log the collected range of each channel.
fn report(samples: &GrowableList<Sample>) {
    let pressures: GrowableList<i32> = samples.iter().map(|s| s.pressure_raw).collect();
    let temperatures: GrowableList<i32> = samples.iter().map(|s| s.temperature_raw).collect();

    let (Some(p_min), Some(p_max)) = (
        pressures.iter().copied().min(),
        pressures.iter().copied().max(),
    ) else {
        warn!("No samples collected");
        return;
    };
    let t_min = temperatures.iter().copied().min().unwrap_or_default();
    let t_max = temperatures.iter().copied().max().unwrap_or_default();

    info!("Collected {} samples", samples.count());
    info!(
        "Pressure raw: {}..={} (first peak at index {:?})",
        p_min,
        p_max,
        pressures.index_of(&p_max)
    );
    info!("Temperature raw: {}..={}", t_min, t_max);

    // The last quarter of the run, as an independent copy
    let tail_len = samples.count() / 4;
    match pressures.get_range(pressures.count() - tail_len, tail_len) {
        Ok(tail) => info!("Last {} pressure samples: {:?}", tail.count(), tail.as_slice()),
        Err(e) => error!("Tail range failed: {}", e),
    }
}
