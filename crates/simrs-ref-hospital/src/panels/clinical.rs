//! Clinical AI view: patient list, condition chips, and the note editor.

use simrs_contracts::{
    advisory::AdvisoryRequest,
    clinical::{Condition, Patient},
};

use crate::mock_data::MockStore;

pub const EDITOR_TITLE: &str = "Clinical Documentation (Progress Note)";
pub const RESULT_TITLE: &str = "AI Generated Summary (Draft)";
pub const GENERATE_LABEL: &str = "Generate After Visit Summary";
pub const PROCESSING_LABEL: &str = "Processing...";
pub const SEARCH_TITLE: &str = "Vertex AI Search (Simulated)";
pub const SEARCH_PLACEHOLDER: &str = "Search FHIR Resources...";

/// Shown above every generated summary.
pub const ETHICAL_DISCLAIMER: &str = "AI-generated draft for clinical documentation support only. \
It is not a diagnosis and must be reviewed and approved by the attending clinician before it \
enters the medical record or is shared with the patient.";

/// Second line of a patient list entry, e.g. `MRN: MR-2024-8821 | DOB: 1980-05-12`.
pub fn patient_detail(patient: &Patient) -> String {
    format!("MRN: {} | DOB: {}", patient.mrn, patient.birth_date)
}

/// Chip label, e.g. `J18.9 Pneumonia`.
pub fn condition_chip(condition: &Condition) -> String {
    format!("{} {}", condition.code, condition.description)
}

/// Whether `patient` matches a search query. Matching is a case-insensitive
/// substring test over name, MRN and id; an empty query matches everyone.
pub fn patient_matches(patient: &Patient, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [patient.name.as_str(), patient.mrn.as_str(), patient.id.0.as_str()]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// The patient's most recent note, or nothing if they have none.
pub fn patient_note_text(store: &MockStore, patient: &Patient) -> String {
    store
        .notes_for(&patient.id)
        .max_by_key(|note| note.date)
        .map(|note| note.text.clone())
        .unwrap_or_default()
}

/// Text the editor starts with: the first seeded note, or nothing.
pub fn initial_note_text(store: &MockStore) -> String {
    store
        .notes
        .first()
        .map(|note| note.text.clone())
        .unwrap_or_default()
}

/// Wrap the editor contents, unmodified, as a summary request.
pub fn summary_request(note_text: &str) -> AdvisoryRequest {
    AdvisoryRequest::NoteSummary {
        note_text: note_text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_detail_line() {
        let store = MockStore::seeded();
        assert_eq!(
            patient_detail(&store.patients[0]),
            "MRN: MR-2024-8821 | DOB: 1980-05-12"
        );
    }

    #[test]
    fn condition_chip_label() {
        let store = MockStore::seeded();
        assert_eq!(condition_chip(&store.conditions[0]), "J18.9 Pneumonia");
    }

    #[test]
    fn editor_starts_with_first_note() {
        let store = MockStore::seeded();
        let text = initial_note_text(&store);
        assert!(text.starts_with("Patient presents with 3-day history"));

        let empty = MockStore {
            notes: Vec::new(),
            ..MockStore::seeded()
        };
        assert_eq!(initial_note_text(&empty), "");
    }

    #[test]
    fn search_matches_name_mrn_and_id() {
        let store = MockStore::seeded();
        let budi = &store.patients[0];
        assert!(patient_matches(budi, ""));
        assert!(patient_matches(budi, "  budi "));
        assert!(patient_matches(budi, "8821"));
        assert!(patient_matches(budi, "p-101"));
        assert!(!patient_matches(budi, "siti"));
    }

    #[test]
    fn note_text_follows_patient() {
        let store = MockStore::seeded();
        assert!(patient_note_text(&store, &store.patients[0]).starts_with("Patient presents"));
        assert_eq!(patient_note_text(&store, &store.patients[1]), "");
    }

    #[test]
    fn summary_request_is_unmodified() {
        let text = "  BP 130/85.\nPlan: monitor.  ";
        assert_eq!(
            summary_request(text),
            AdvisoryRequest::NoteSummary {
                note_text: text.to_string()
            }
        );
    }
}
