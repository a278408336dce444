//! Derived club tags.
//!
//! Category, shaft type and iron type are pure functions of a product's
//! free-text tag list. The source tags are not mutually exclusive (a
//! mis-tagged product can carry both "iron" and "driver"); the derived
//! value is made unambiguous by a fixed precedence order, first match wins.
//! Nothing is stored: every read re-derives from the tags, keeping the tag
//! list the single source of truth.

use serde::Serialize;

/// Case-insensitive membership test against the tag list.
fn has_tag(tags: &[String], wanted: &str) -> bool {
    tags.iter().any(|t| t.trim().eq_ignore_ascii_case(wanted))
}

/// Club category derived from tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "driver")]
    Driver,
    #[serde(rename = "fairway-woods-hybrids")]
    FairwayWoodsHybrids,
    #[serde(rename = "irons")]
    Irons,
    #[serde(rename = "wedges")]
    Wedges,
    #[serde(rename = "putter")]
    Putter,
}

impl Category {
    /// Precedence: driver, then fairway-wood/hybrid, then iron, then wedge,
    /// then putter.
    #[must_use]
    pub fn from_tags(tags: &[String]) -> Option<Self> {
        if has_tag(tags, "driver") {
            Some(Self::Driver)
        } else if has_tag(tags, "fairway-wood") || has_tag(tags, "hybrid") {
            Some(Self::FairwayWoodsHybrids)
        } else if has_tag(tags, "iron") {
            Some(Self::Irons)
        } else if has_tag(tags, "wedge") {
            Some(Self::Wedges)
        } else if has_tag(tags, "putter") {
            Some(Self::Putter)
        } else {
            None
        }
    }

    /// The wire slug, also used for exact-match category filtering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driver => "driver",
            Self::FairwayWoodsHybrids => "fairway-woods-hybrids",
            Self::Irons => "irons",
            Self::Wedges => "wedges",
            Self::Putter => "putter",
        }
    }
}

/// Shaft type derived from tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaftType {
    Flexible,
    Stiff,
}

impl ShaftType {
    /// Precedence: flexible before stiff.
    #[must_use]
    pub fn from_tags(tags: &[String]) -> Option<Self> {
        if has_tag(tags, "flexible") {
            Some(Self::Flexible)
        } else if has_tag(tags, "stiff") {
            Some(Self::Stiff)
        } else {
            None
        }
    }
}

/// Iron construction type derived from tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IronType {
    #[serde(rename = "blades")]
    Blades,
    #[serde(rename = "cavity-back")]
    CavityBack,
    #[serde(rename = "muscle-back")]
    MuscleBack,
}

impl IronType {
    /// Precedence: blades before cavity-back before muscle-back.
    #[must_use]
    pub fn from_tags(tags: &[String]) -> Option<Self> {
        if has_tag(tags, "blades") {
            Some(Self::Blades)
        } else if has_tag(tags, "cavity-back") {
            Some(Self::CavityBack)
        } else if has_tag(tags, "muscle-back") {
            Some(Self::MuscleBack)
        } else {
            None
        }
    }
}
