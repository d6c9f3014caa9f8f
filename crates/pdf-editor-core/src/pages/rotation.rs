//! Quarter-turn page orientation.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Clockwise page rotation in quarter turns.
///
/// Rotations compose modulo 360, so applying 90 then 270 yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    /// Build a rotation from a degree value.
    ///
    /// Any multiple of 90 is accepted, including negative values
    /// (`-90` is the same as `270`).
    pub fn from_degrees(degrees: i64) -> Result<Self, Error> {
        if degrees % 90 != 0 {
            return Err(Error::InvalidRotation(degrees));
        }
        Ok(Self::from_quarter_turns(degrees / 90))
    }

    /// Build a rotation from a `/Rotate` value found in a PDF.
    ///
    /// Values that are not multiples of 90 are invalid in PDF, but readers
    /// round them down, so we do the same instead of failing.
    pub const fn from_pdf_value(degrees: i64) -> Self {
        Self::from_quarter_turns(degrees.div_euclid(90))
    }

    const fn from_quarter_turns(turns: i64) -> Self {
        match turns.rem_euclid(4) {
            1 => Self::Clockwise90,
            2 => Self::Clockwise180,
            3 => Self::Clockwise270,
            _ => Self::None,
        }
    }

    const fn quarter_turns(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Clockwise90 => 1,
            Self::Clockwise180 => 2,
            Self::Clockwise270 => 3,
        }
    }

    /// Rotation in degrees, always one of 0, 90, 180, 270.
    pub const fn degrees(self) -> i64 {
        self.quarter_turns() * 90
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Apply `other` on top of `self`.
    #[must_use]
    pub const fn then(self, other: Self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }
}

impl Add for Rotation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.then(rhs)
    }
}

impl TryFrom<i64> for Rotation {
    type Error = Error;

    fn try_from(degrees: i64) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for i64 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
