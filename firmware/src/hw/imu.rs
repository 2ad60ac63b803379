//! MPU6050 accelerometer adapter (AD0 strapped high).

use obc_core::hal::{AccelVector, InertialSensor};

use super::SharedI2c;

const IMU_ADDR: u8 = 0x69;
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_ACCEL_XOUT_H: u8 = 0x3B;

/// Raw counts per g at the default ±2 g range.
const COUNTS_PER_G: f32 = 16_384.0;

pub struct Mpu6050 {
    bus: &'static SharedI2c,
}

impl Mpu6050 {
    /// Wakes the device out of sleep.
    pub fn new(bus: &'static SharedI2c) -> Self {
        if bus
            .borrow_mut()
            .blocking_write(IMU_ADDR, &[REG_PWR_MGMT_1, 0x00])
            .is_err()
        {
            defmt::warn!("imu: wake failed");
        }
        Self { bus }
    }
}

impl InertialSensor for Mpu6050 {
    fn accel(&mut self) -> AccelVector {
        let mut raw = [0_u8; 6];
        let result = self
            .bus
            .borrow_mut()
            .blocking_write_read(IMU_ADDR, &[REG_ACCEL_XOUT_H], &mut raw);
        if result.is_err() {
            defmt::warn!("imu: accel read failed");
            return AccelVector::default();
        }
        let x = i16::from_be_bytes([raw[0], raw[1]]);
        let y = i16::from_be_bytes([raw[2], raw[3]]);
        let z = i16::from_be_bytes([raw[4], raw[5]]);
        AccelVector {
            x: f32::from(x) / COUNTS_PER_G,
            y: f32::from(y) / COUNTS_PER_G,
            z: f32::from(z) / COUNTS_PER_G,
        }
    }
}
