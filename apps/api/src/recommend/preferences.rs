//! Preference Record and the fixed option vocabularies offered by the form.
//!
//! Labels serialize exactly as shown to the user; the recommendation payload
//! and the instruction text both use them verbatim.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampusSize {
    Small,
    Medium,
    Large,
}

impl CampusSize {
    pub const ALL: [CampusSize; 3] = [CampusSize::Small, CampusSize::Medium, CampusSize::Large];

    pub fn label(self) -> &'static str {
        match self {
            CampusSize::Small => "Small",
            CampusSize::Medium => "Medium",
            CampusSize::Large => "Large",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcademicInterest {
    #[serde(rename = "STEM")]
    Stem,
    Nursing,
    #[serde(rename = "Public Health")]
    PublicHealth,
    Education,
    #[serde(rename = "Criminal Justice")]
    CriminalJustice,
    Business,
    Psychology,
    Sociology,
    #[serde(rename = "Political Science")]
    PoliticalScience,
    #[serde(rename = "Arts & Humanities")]
    ArtsAndHumanities,
}

impl AcademicInterest {
    pub const ALL: [AcademicInterest; 10] = [
        AcademicInterest::Stem,
        AcademicInterest::Nursing,
        AcademicInterest::PublicHealth,
        AcademicInterest::Education,
        AcademicInterest::CriminalJustice,
        AcademicInterest::Business,
        AcademicInterest::Psychology,
        AcademicInterest::Sociology,
        AcademicInterest::PoliticalScience,
        AcademicInterest::ArtsAndHumanities,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AcademicInterest::Stem => "STEM",
            AcademicInterest::Nursing => "Nursing",
            AcademicInterest::PublicHealth => "Public Health",
            AcademicInterest::Education => "Education",
            AcademicInterest::CriminalJustice => "Criminal Justice",
            AcademicInterest::Business => "Business",
            AcademicInterest::Psychology => "Psychology",
            AcademicInterest::Sociology => "Sociology",
            AcademicInterest::PoliticalScience => "Political Science",
            AcademicInterest::ArtsAndHumanities => "Arts & Humanities",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|interest| interest.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityFactor {
    Proximity,
    Affordability,
    #[serde(rename = "Online availability")]
    OnlineAvailability,
    #[serde(rename = "Legacy or cultural history")]
    LegacyOrCulturalHistory,
    #[serde(rename = "Campus life and activities")]
    CampusLife,
    #[serde(rename = "Academic programs")]
    AcademicPrograms,
}

impl PriorityFactor {
    pub const ALL: [PriorityFactor; 6] = [
        PriorityFactor::Proximity,
        PriorityFactor::Affordability,
        PriorityFactor::OnlineAvailability,
        PriorityFactor::LegacyOrCulturalHistory,
        PriorityFactor::CampusLife,
        PriorityFactor::AcademicPrograms,
    ];

    /// Pre-selected on a fresh form.
    pub const DEFAULTS: [PriorityFactor; 2] =
        [PriorityFactor::Affordability, PriorityFactor::AcademicPrograms];

    pub fn label(self) -> &'static str {
        match self {
            PriorityFactor::Proximity => "Proximity",
            PriorityFactor::Affordability => "Affordability",
            PriorityFactor::OnlineAvailability => "Online availability",
            PriorityFactor::LegacyOrCulturalHistory => "Legacy or cultural history",
            PriorityFactor::CampusLife => "Campus life and activities",
            PriorityFactor::AcademicPrograms => "Academic programs",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|factor| factor.label() == label)
    }
}

/// Structured user input for one submission. Built only through
/// `PreferenceForm::validate`, so the constraints below always hold:
/// ratings in 1..=5, at most 2 interests, 2 or 3 priority factors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceRecord {
    pub zip_code: String,
    pub proximity_importance: u8,
    pub affordability_importance: u8,
    pub online_importance: u8,
    pub legacy_importance: u8,
    pub social_importance: u8,
    pub campus_size_preference: CampusSize,
    pub interests: Vec<AcademicInterest>,
    pub priority_factors: Vec<PriorityFactor>,
}
