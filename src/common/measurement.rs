// src/common/measurement.rs

use super::error::Sps30Error;

/// Size of the decoded payload of a read-measurement response in float mode.
pub const MEASUREMENT_PAYLOAD_LEN: usize = 40;
/// Number of values in one measurement.
pub const FIELD_COUNT: usize = 10;

/// One set of readings from the sensor, in device wire order.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Measurement {
    /// Mass Concentration PM1.0 [µg/m³]
    pub mass_pm1_0: f32,
    /// Mass Concentration PM2.5 [µg/m³]
    pub mass_pm2_5: f32,
    /// Mass Concentration PM4.0 [µg/m³]
    pub mass_pm4_0: f32,
    /// Mass Concentration PM10 [µg/m³]
    pub mass_pm10: f32,
    /// Number Concentration PM0.5 [#/cm³]
    pub number_pm0_5: f32,
    /// Number Concentration PM1.0 [#/cm³]
    pub number_pm1_0: f32,
    /// Number Concentration PM2.5 [#/cm³]
    pub number_pm2_5: f32,
    /// Number Concentration PM4.0 [#/cm³]
    pub number_pm4_0: f32,
    /// Number Concentration PM10 [#/cm³]
    pub number_pm10: f32,
    /// Typical Particle Size [µm]
    pub typical_particle_size: f32,
}

impl Measurement {
    /// Display names of the fields, in wire order.
    pub const FIELD_NAMES: [&'static str; FIELD_COUNT] = [
        "Mass Concentration PM1.0",
        "Mass Concentration PM2.5",
        "Mass Concentration PM4.0",
        "Mass Concentration PM10",
        "Number Concentration PM0.5",
        "Number Concentration PM1.0",
        "Number Concentration PM2.5",
        "Number Concentration PM4.0",
        "Number Concentration PM10",
        "Typical Particle Size",
    ];

    /// Values in wire order.
    pub fn values(&self) -> [f32; FIELD_COUNT] {
        [
            self.mass_pm1_0,
            self.mass_pm2_5,
            self.mass_pm4_0,
            self.mass_pm10,
            self.number_pm0_5,
            self.number_pm1_0,
            self.number_pm2_5,
            self.number_pm4_0,
            self.number_pm10,
            self.typical_particle_size,
        ]
    }

    /// Name/value pairs in wire order.
    pub fn fields(&self) -> [(&'static str, f32); FIELD_COUNT] {
        let values = self.values();
        core::array::from_fn(|i| (Self::FIELD_NAMES[i], values[i]))
    }

    fn from_values(v: [f32; FIELD_COUNT]) -> Self {
        Measurement {
            mass_pm1_0: v[0],
            mass_pm2_5: v[1],
            mass_pm4_0: v[2],
            mass_pm10: v[3],
            number_pm0_5: v[4],
            number_pm1_0: v[5],
            number_pm2_5: v[6],
            number_pm4_0: v[7],
            number_pm10: v[8],
            typical_particle_size: v[9],
        }
    }
}

/// Big-endian IEEE-754 single precision.
#[inline]
pub fn decode_float(b0: u8, b1: u8, b2: u8, b3: u8) -> f32 {
    f32::from_be_bytes([b0, b1, b2, b3])
}

/// Decodes a 40-byte payload into a [`Measurement`].
///
/// Bytes past the first 40 are ignored.
pub fn decode_measurement<E>(payload: &[u8]) -> Result<Measurement, Sps30Error<E>>
where
    E: core::fmt::Debug,
{
    if payload.len() < MEASUREMENT_PAYLOAD_LEN {
        return Err(Sps30Error::PayloadTooShort {
            needed: MEASUREMENT_PAYLOAD_LEN,
            got: payload.len(),
        });
    }

    let mut values = [0.0f32; FIELD_COUNT];
    for (value, chunk) in values
        .iter_mut()
        .zip(payload[..MEASUREMENT_PAYLOAD_LEN].chunks_exact(4))
    {
        *value = decode_float(chunk[0], chunk[1], chunk[2], chunk[3]);
    }
    Ok(Measurement::from_values(values))
}
