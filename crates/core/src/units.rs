use std::ops::Add;

use crate::errors::CircuitError;

#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Voltage(f64);

impl Voltage {
    pub const ZERO: Self = Self(0.0);

    pub fn new(volts: f64) -> Result<Self, CircuitError> {
        match volts >= 0.0 && volts.is_finite() {
            true => Ok(Self(volts)),
            false => Err(CircuitError::InvalidVoltage(volts)),
        }
    }

    pub fn volts(self) -> f64 {
        self.0
    }
}

impl From<Voltage> for f64 {
    fn from(value: Voltage) -> f64 {
        value.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Resistance(f64);

impl Resistance {
    pub const ZERO: Self = Self(0.0);

    pub fn new(ohms: f64) -> Result<Self, CircuitError> {
        match ohms >= 0.0 && ohms.is_finite() {
            true => Ok(Self(ohms)),
            false => Err(CircuitError::InvalidResistance(ohms)),
        }
    }

    pub fn ohms(self) -> f64 {
        self.0
    }
}

impl Add for Resistance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Resistance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Resistance> for f64 {
    fn from(value: Resistance) -> f64 {
        value.0
    }
}

/// Current expressed in milliamps, the unit every simulation report uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Milliamps(f64);

impl Milliamps {
    pub const ZERO: Self = Self(0.0);

    /// Ohm's law, with `floor` as the smallest divisor so a zero-ohm loop stays finite.
    pub fn ohms_law(v: Voltage, r: Resistance, floor: f64) -> Self {
        let divisor = r.0.max(floor);
        if divisor <= 0.0 {
            return Self::ZERO;
        }
        Self(v.0 / divisor * 1000.0)
    }

    pub fn milliamps(self) -> f64 {
        self.0
    }

    pub fn amps(self) -> f64 {
        self.0 / 1000.0
    }

    /// Voltage dropped across `r` while this current flows through it.
    pub fn drop_across(self, r: Resistance) -> f64 {
        self.amps() * r.0
    }
}

impl From<Milliamps> for f64 {
    fn from(value: Milliamps) -> f64 {
        value.0
    }
}
