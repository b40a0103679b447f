//! FHIR-like patient and clinical note records.
//!
//! These are plain records. A note's `patient_id` is not checked against the
//! patient list.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    /// Medical record number.
    pub mrn: String,
}

/// An active diagnosis shown as a chip beside the patient, e.g. `J18.9 Pneumonia`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub patient_id: PatientId,
    /// ICD-10 code.
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalNote {
    pub id: String,
    pub patient_id: PatientId,
    pub date: NaiveDate,
    pub author: String,
    pub text: String,
}
