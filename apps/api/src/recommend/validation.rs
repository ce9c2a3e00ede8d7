use serde::Deserialize;
use thiserror::Error;

use crate::recommend::preferences::{
    AcademicInterest, CampusSize, PreferenceRecord, PriorityFactor,
};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;
pub const MAX_INTERESTS: usize = 2;
pub const MIN_PRIORITIES: usize = 2;
pub const MAX_PRIORITIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("ZIP code is required")]
    MissingZip,

    #[error("{field} must be between 1 and 5, got {value}")]
    RatingOutOfRange { field: &'static str, value: i64 },

    #[error("{field} must be a whole number, got '{value}'")]
    RatingNotANumber { field: &'static str, value: String },

    #[error("unknown campus size '{0}'")]
    UnknownCampusSize(String),

    #[error("unknown academic interest '{0}'")]
    UnknownInterest(String),

    #[error("pick at most 2 academic interests, got {0}")]
    TooManyInterests(usize),

    #[error("unknown priority factor '{0}'")]
    UnknownPriority(String),

    #[error("select 2 or 3 priority factors, got {0}")]
    PriorityCount(usize),
}

/// Raw, unvalidated submission as it arrives from the form or the JSON API.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceForm {
    pub zip_code: String,
    pub proximity_importance: i64,
    pub affordability_importance: i64,
    pub online_importance: i64,
    pub legacy_importance: i64,
    pub social_importance: i64,
    pub campus_size_preference: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub priority_factors: Vec<String>,
}

impl Default for PreferenceForm {
    fn default() -> Self {
        Self {
            zip_code: "46077".to_string(),
            proximity_importance: 3,
            affordability_importance: 3,
            online_importance: 3,
            legacy_importance: 3,
            social_importance: 3,
            campus_size_preference: CampusSize::Small.label().to_string(),
            interests: Vec::new(),
            priority_factors: PriorityFactor::DEFAULTS
                .iter()
                .map(|factor| factor.label().to_string())
                .collect(),
        }
    }
}

impl PreferenceForm {
    /// Builds a form from urlencoded pairs. Repeated keys accumulate for the
    /// multi-select fields; absent scalar fields keep their defaults.
    ///
    /// A rating that is not a number keeps its default and the first such
    /// error is returned alongside the form, so the page can be re-rendered
    /// with everything else the user entered.
    pub fn from_pairs(pairs: &[(String, String)]) -> (Self, Option<ValidationError>) {
        let mut form = PreferenceForm {
            interests: Vec::new(),
            priority_factors: Vec::new(),
            ..PreferenceForm::default()
        };
        let mut first_error = None;

        for (key, value) in pairs {
            let (field, slot) = match key.as_str() {
                "zip_code" => {
                    form.zip_code = value.clone();
                    continue;
                }
                "campus_size_preference" => {
                    form.campus_size_preference = value.clone();
                    continue;
                }
                "interests" => {
                    form.interests.push(value.clone());
                    continue;
                }
                "priority_factors" => {
                    form.priority_factors.push(value.clone());
                    continue;
                }
                "proximity_importance" => ("proximity_importance", &mut form.proximity_importance),
                "affordability_importance" => {
                    ("affordability_importance", &mut form.affordability_importance)
                }
                "online_importance" => ("online_importance", &mut form.online_importance),
                "legacy_importance" => ("legacy_importance", &mut form.legacy_importance),
                "social_importance" => ("social_importance", &mut form.social_importance),
                _ => continue,
            };
            match parse_rating(field, value) {
                Ok(rating) => *slot = rating,
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(_) => {}
            }
        }

        (form, first_error)
    }

    pub fn validate(&self) -> Result<PreferenceRecord, ValidationError> {
        let zip_code = self.zip_code.trim();
        if zip_code.is_empty() {
            return Err(ValidationError::MissingZip);
        }

        let campus_size_preference = CampusSize::from_label(self.campus_size_preference.trim())
            .ok_or_else(|| ValidationError::UnknownCampusSize(self.campus_size_preference.clone()))?;

        let mut interests = Vec::new();
        for label in &self.interests {
            let interest = AcademicInterest::from_label(label.trim())
                .ok_or_else(|| ValidationError::UnknownInterest(label.clone()))?;
            if !interests.contains(&interest) {
                interests.push(interest);
            }
        }
        if interests.len() > MAX_INTERESTS {
            return Err(ValidationError::TooManyInterests(interests.len()));
        }

        let mut priority_factors = Vec::new();
        for label in &self.priority_factors {
            let factor = PriorityFactor::from_label(label.trim())
                .ok_or_else(|| ValidationError::UnknownPriority(label.clone()))?;
            if !priority_factors.contains(&factor) {
                priority_factors.push(factor);
            }
        }
        if !(MIN_PRIORITIES..=MAX_PRIORITIES).contains(&priority_factors.len()) {
            return Err(ValidationError::PriorityCount(priority_factors.len()));
        }

        Ok(PreferenceRecord {
            zip_code: zip_code.to_string(),
            proximity_importance: check_rating("proximity_importance", self.proximity_importance)?,
            affordability_importance: check_rating(
                "affordability_importance",
                self.affordability_importance,
            )?,
            online_importance: check_rating("online_importance", self.online_importance)?,
            legacy_importance: check_rating("legacy_importance", self.legacy_importance)?,
            social_importance: check_rating("social_importance", self.social_importance)?,
            campus_size_preference,
            interests,
            priority_factors,
        })
    }
}

fn parse_rating(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::RatingNotANumber {
            field,
            value: raw.to_string(),
        })
}

fn check_rating(field: &'static str, value: i64) -> Result<u8, ValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(ValidationError::RatingOutOfRange { field, value });
    }
    // Range check above guarantees the cast is lossless.
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_form_is_valid() {
        let record = PreferenceForm::default().validate().unwrap();
        assert_eq!(record.zip_code, "46077");
        assert_eq!(record.campus_size_preference, CampusSize::Small);
        assert_eq!(
            record.priority_factors,
            vec![PriorityFactor::Affordability, PriorityFactor::AcademicPrograms]
        );
        assert!(record.interests.is_empty());
    }

    #[test]
    fn test_from_pairs_collects_repeated_keys() {
        let (form, error) = PreferenceForm::from_pairs(&pairs(&[
            ("zip_code", "30314"),
            ("proximity_importance", "5"),
            ("campus_size_preference", "Large"),
            ("interests", "STEM"),
            ("interests", "Arts & Humanities"),
            ("priority_factors", "Proximity"),
            ("priority_factors", "Online availability"),
            ("priority_factors", "Campus life and activities"),
        ]));
        assert_eq!(error, None);

        let record = form.validate().unwrap();
        assert_eq!(record.zip_code, "30314");
        assert_eq!(record.proximity_importance, 5);
        assert_eq!(record.affordability_importance, 3);
        assert_eq!(record.campus_size_preference, CampusSize::Large);
        assert_eq!(
            record.interests,
            vec![AcademicInterest::Stem, AcademicInterest::ArtsAndHumanities]
        );
        assert_eq!(
            record.priority_factors,
            vec![
                PriorityFactor::Proximity,
                PriorityFactor::OnlineAvailability,
                PriorityFactor::CampusLife
            ]
        );
    }

    #[test]
    fn test_non_numeric_rating_is_rejected() {
        let (_, error) = PreferenceForm::from_pairs(&pairs(&[("legacy_importance", "lots")]));
        assert_eq!(
            error,
            Some(ValidationError::RatingNotANumber {
                field: "legacy_importance",
                value: "lots".to_string()
            })
        );
    }

    #[test]
    fn test_bad_rating_keeps_the_rest_of_the_submission() {
        let (form, error) = PreferenceForm::from_pairs(&pairs(&[
            ("zip_code", "30314"),
            ("proximity_importance", "5"),
            ("legacy_importance", "lots"),
            ("online_importance", "often"),
            ("social_importance", "1"),
            ("campus_size_preference", "Large"),
            ("interests", "Nursing"),
            ("priority_factors", "Proximity"),
            ("priority_factors", "Affordability"),
        ]));

        assert_eq!(
            error,
            Some(ValidationError::RatingNotANumber {
                field: "legacy_importance",
                value: "lots".to_string()
            })
        );
        assert_eq!(form.zip_code, "30314");
        assert_eq!(form.proximity_importance, 5);
        assert_eq!(form.legacy_importance, 3);
        assert_eq!(form.online_importance, 3);
        assert_eq!(form.social_importance, 1);
        assert_eq!(form.campus_size_preference, "Large");
        assert_eq!(form.interests, vec!["Nursing".to_string()]);
        assert_eq!(form.priority_factors.len(), 2);
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let form = PreferenceForm {
            online_importance: 6,
            ..PreferenceForm::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::RatingOutOfRange {
                field: "online_importance",
                value: 6
            }
        );

        let form = PreferenceForm {
            social_importance: 0,
            ..PreferenceForm::default()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::RatingOutOfRange { field: "social_importance", .. })
        ));
    }

    #[test]
    fn test_blank_zip_is_rejected() {
        let form = PreferenceForm {
            zip_code: "   ".to_string(),
            ..PreferenceForm::default()
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::MissingZip);
    }

    #[test]
    fn test_too_many_interests_is_rejected() {
        let form = PreferenceForm {
            interests: vec!["STEM".into(), "Nursing".into(), "Business".into()],
            ..PreferenceForm::default()
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::TooManyInterests(3));
    }

    #[test]
    fn test_duplicate_interests_collapse() {
        let form = PreferenceForm {
            interests: vec!["STEM".into(), "STEM".into(), "Nursing".into()],
            ..PreferenceForm::default()
        };
        let record = form.validate().unwrap();
        assert_eq!(
            record.interests,
            vec![AcademicInterest::Stem, AcademicInterest::Nursing]
        );
    }

    #[test]
    fn test_unknown_labels_are_rejected() {
        let form = PreferenceForm {
            interests: vec!["Astrology".into()],
            ..PreferenceForm::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::UnknownInterest("Astrology".into())
        );

        let form = PreferenceForm {
            campus_size_preference: "Huge".into(),
            ..PreferenceForm::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::UnknownCampusSize("Huge".into())
        );

        let form = PreferenceForm {
            priority_factors: vec!["Proximity".into(), "Weather".into()],
            ..PreferenceForm::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::UnknownPriority("Weather".into())
        );
    }

    #[test]
    fn test_priority_count_bounds() {
        let one = PreferenceForm {
            priority_factors: vec!["Proximity".into()],
            ..PreferenceForm::default()
        };
        assert_eq!(one.validate().unwrap_err(), ValidationError::PriorityCount(1));

        let four = PreferenceForm {
            priority_factors: vec![
                "Proximity".into(),
                "Affordability".into(),
                "Online availability".into(),
                "Academic programs".into(),
            ],
            ..PreferenceForm::default()
        };
        assert_eq!(four.validate().unwrap_err(), ValidationError::PriorityCount(4));
    }

    #[test]
    fn test_json_form_uses_record_key_names() {
        let form: PreferenceForm = serde_json::from_str(
            r#"{
                "zip_code": "46077",
                "proximity_importance": 1,
                "affordability_importance": 2,
                "online_importance": 3,
                "legacy_importance": 4,
                "social_importance": 5,
                "campus_size_preference": "Medium",
                "interests": ["Psychology"],
                "priority_factors": ["Legacy or cultural history", "Affordability"]
            }"#,
        )
        .unwrap();
        let record = form.validate().unwrap();
        assert_eq!(record.social_importance, 5);
        assert_eq!(record.campus_size_preference, CampusSize::Medium);
    }
}
