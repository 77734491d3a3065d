use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Earliest permitted birth year.
pub const MIN_BIRTH_YEAR: i32 = 1950;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// The user profile, created at onboarding and editable from settings.
///
/// Field-level validation happens only at creation time; later edits are
/// accepted as-is, matching the settings form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub gender: Gender,
    /// ISO `YYYY-MM-DD` date of birth.
    pub dob: String,
    pub location: String,
    pub onboarded: bool,
}

impl UserProfile {
    /// The profile used when onboarding is skipped.
    pub fn guest() -> Self {
        Self {
            name: "Guest".to_string(),
            gender: Gender::Male,
            dob: "2000-01-01".to_string(),
            location: "Earth".to_string(),
            onboarded: true,
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::guest()
    }
}

/// Reasons an onboarding submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileRejection {
    MissingFields,
    DobUnparseable,
    DobTooEarly,
}

impl ProfileRejection {
    pub fn message(&self) -> &'static str {
        match self {
            ProfileRejection::MissingFields => "Please fill in all fields.",
            ProfileRejection::DobUnparseable => "Date of birth must be YYYY-MM-DD.",
            ProfileRejection::DobTooEarly => {
                "Only individuals born in 1950 or later are permitted to use this platform."
            }
        }
    }
}

/// Validate an onboarding submission. Location plausibility is checked
/// separately via the AI validator (and is fail-open).
pub fn validate_submission(
    name: &str,
    dob: &str,
    location: &str,
) -> Result<(), ProfileRejection> {
    if name.trim().is_empty() || dob.trim().is_empty() || location.trim().is_empty() {
        return Err(ProfileRejection::MissingFields);
    }
    let date = NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d")
        .map_err(|_| ProfileRejection::DobUnparseable)?;
    if date.year() < MIN_BIRTH_YEAR {
        return Err(ProfileRejection::DobTooEarly);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_birth_year_before_1950() {
        assert_eq!(
            validate_submission("Aisha", "1949-12-31", "Madinah, Saudi Arabia"),
            Err(ProfileRejection::DobTooEarly)
        );
    }

    #[test]
    fn accepts_exact_boundary_date() {
        assert!(validate_submission("Aisha", "1950-01-01", "Madinah, Saudi Arabia").is_ok());
    }

    #[test]
    fn rejects_empty_fields() {
        assert_eq!(
            validate_submission("", "2000-01-01", "London, UK"),
            Err(ProfileRejection::MissingFields)
        );
        assert_eq!(
            validate_submission("Omar", "2000-01-01", "  "),
            Err(ProfileRejection::MissingFields)
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(
            validate_submission("Omar", "01/01/2000", "London, UK"),
            Err(ProfileRejection::DobUnparseable)
        );
    }
}
