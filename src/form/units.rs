//! Physical length helpers.
//!
//! WordprocessingML measures page geometry, table widths, row heights and
//! paragraph spacing in twentieths of a point ("twips"), and font sizes in
//! half points. Everything in the form definition is written in inches,
//! millimetres or points and converted here.

const TWIPS_PER_INCH: f64 = 1440.0;
const TWIPS_PER_POINT: f64 = 20.0;
const MM_PER_INCH: f64 = 25.4;

/// A physical length, stored in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length(u32);

impl Length {
    pub const ZERO: Length = Length(0);

    pub fn inches(value: f64) -> Self {
        Self::from_twips_f64(value * TWIPS_PER_INCH)
    }

    pub fn mm(value: f64) -> Self {
        Self::from_twips_f64(value / MM_PER_INCH * TWIPS_PER_INCH)
    }

    pub fn pt(value: f64) -> Self {
        Self::from_twips_f64(value * TWIPS_PER_POINT)
    }

    pub fn from_twips(twips: u32) -> Self {
        Self(twips)
    }

    fn from_twips_f64(twips: f64) -> Self {
        Self(twips.max(0.0).round() as u32)
    }

    pub fn twips(self) -> u32 {
        self.0
    }

    pub fn as_inches(self) -> f64 {
        f64::from(self.0) / TWIPS_PER_INCH
    }
}

impl std::ops::Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, |acc, l| acc + l)
    }
}

/// Font size in points, serialized as half points (10.5pt -> 21).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSize(pub f64);

impl FontSize {
    pub fn half_points(self) -> u32 {
        (self.0 * 2.0).round().max(0.0) as u32
    }
}
