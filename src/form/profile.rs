//! Render profiles.
//!
//! The form went through several revisions that differ only in margin size,
//! the default vertical alignment of filled cells and a few spacing values.
//! Each revision is a named profile over the same definition.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::definition::VerticalAlign;
use super::units::Length;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileName {
    #[default]
    Replica,
    Narrow,
    TopAligned,
}

impl ProfileName {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileName::Replica => "replica",
            ProfileName::Narrow => "narrow",
            ProfileName::TopAligned => "top-aligned",
        }
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileName {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "replica" => Ok(ProfileName::Replica),
            "narrow" => Ok(ProfileName::Narrow),
            "top-aligned" | "top_aligned" => Ok(ProfileName::TopAligned),
            other => Err(format!(
                "unknown render profile '{}' (expected replica, narrow or top-aligned)",
                other
            )),
        }
    }
}

/// Layout values that vary between form revisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderProfile {
    pub name: ProfileName,
    /// Applied to all four page margins.
    pub margin: Length,
    /// Vertical alignment for filled cells that do not set their own.
    pub vertical_align: VerticalAlign,
    /// Before/after spacing of single-paragraph cells.
    pub cell_spacing: Length,
    /// Gap between the last header line and the table.
    pub header_gap: Length,
    /// Filled cells start with an empty paragraph left over from clearing.
    pub leading_blank_paragraph: bool,
}

impl RenderProfile {
    pub fn replica() -> Self {
        Self {
            name: ProfileName::Replica,
            margin: Length::inches(0.3),
            vertical_align: VerticalAlign::Center,
            cell_spacing: Length::pt(2.0),
            header_gap: Length::pt(10.0),
            leading_blank_paragraph: true,
        }
    }

    pub fn narrow() -> Self {
        Self {
            name: ProfileName::Narrow,
            margin: Length::inches(0.25),
            ..Self::replica()
        }
    }

    pub fn top_aligned() -> Self {
        Self {
            name: ProfileName::TopAligned,
            margin: Length::inches(0.25),
            vertical_align: VerticalAlign::Top,
            cell_spacing: Length::pt(1.0),
            header_gap: Length::pt(6.0),
            ..Self::replica()
        }
    }

    pub fn named(name: ProfileName) -> Self {
        match name {
            ProfileName::Replica => Self::replica(),
            ProfileName::Narrow => Self::narrow(),
            ProfileName::TopAligned => Self::top_aligned(),
        }
    }
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self::replica()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_names() {
        assert_eq!("replica".parse::<ProfileName>(), Ok(ProfileName::Replica));
        assert_eq!(" Narrow ".parse::<ProfileName>(), Ok(ProfileName::Narrow));
        assert_eq!(
            "top_aligned".parse::<ProfileName>(),
            Ok(ProfileName::TopAligned)
        );
        assert!("wide".parse::<ProfileName>().is_err());
    }

    #[test]
    fn test_named_profiles() {
        assert_eq!(RenderProfile::named(ProfileName::Replica).margin.twips(), 432);
        assert_eq!(RenderProfile::named(ProfileName::Narrow).margin.twips(), 360);

        let top = RenderProfile::named(ProfileName::TopAligned);
        assert_eq!(top.vertical_align, VerticalAlign::Top);
        assert_eq!(top.name.to_string(), "top-aligned");
    }
}
