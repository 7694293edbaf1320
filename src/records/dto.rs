use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::notice::Notice;
use crate::records::recommend::Advisory;
use crate::records::repo::{HealthRecord, Medicine};

/// Form body for adding a medicine. Missing fields read as empty strings,
/// matching how an empty form submission arrives.
#[derive(Debug, Deserialize)]
pub struct NewMedicine {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub time: String,
}

impl NewMedicine {
    /// Medicines require all three fields; any subset is rejected.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_empty() || self.dosage.is_empty() || self.time.is_empty() {
            return Err(AppError::Validation("Please fill all fields"));
        }
        Ok(())
    }
}

/// Form body for adding a health record. Every field is optional and
/// stored as given; nothing is parsed until a recommendation is computed.
#[derive(Debug, Deserialize)]
pub struct NewHealthRecord {
    pub bp: Option<String>,
    pub sugar: Option<String>,
    pub heart_rate: Option<String>,
    pub weight: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Recommendation {
    pub kind: Advisory,
    pub message: &'static str,
}

impl From<Advisory> for Recommendation {
    fn from(kind: Advisory) -> Self {
        Self {
            kind,
            message: kind.message(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub records: Vec<HealthRecord>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Serialize)]
pub struct MedicinesPage {
    pub medicines: Vec<Medicine>,
}

#[derive(Debug, Serialize)]
pub struct CreatedMedicine {
    pub medicine: Medicine,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct CreatedHealthRecord {
    pub record: HealthRecord,
    pub notices: Vec<Notice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(name: &str, dosage: &str, time: &str) -> NewMedicine {
        NewMedicine {
            name: name.into(),
            dosage: dosage.into(),
            time: time.into(),
        }
    }

    #[test]
    fn complete_medicine_passes_validation() {
        assert!(medicine("Aspirin", "100mg", "08:00").validate().is_ok());
    }

    #[test]
    fn any_empty_field_is_rejected() {
        assert!(medicine("", "100mg", "08:00").validate().is_err());
        assert!(medicine("Aspirin", "", "08:00").validate().is_err());
        assert!(medicine("Aspirin", "100mg", "").validate().is_err());
    }

    #[test]
    fn missing_form_fields_default_to_empty() {
        let parsed: NewMedicine = serde_json::from_str(r#"{"name":"Aspirin"}"#).unwrap();
        assert_eq!(parsed.dosage, "");
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn recommendation_carries_message() {
        let rec = Recommendation::from(Advisory::NoData);
        assert_eq!(rec.kind, Advisory::NoData);
        assert_eq!(rec.message, "No health data available");
    }
}
