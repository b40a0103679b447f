//! Simulated hospital data for the SIMRS dashboard.
//!
//! All data in this module is hardcoded and fictional. No external systems are
//! contacted. The store is built once at startup and only read afterwards.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use simrs_contracts::{
    clinical::{ClinicalNote, Condition, Patient, PatientId},
    error::{SimrsError, SimrsResult},
    finance::{BalanceSheetInputs, FixedAssets, Liabilities},
    receivable::{Money, Receivable, ReceivableStatus},
};

/// Cash on hand used for the statement of financial position.
pub const MOCK_CASH: i64 = 5_000_000_000;

fn rp(value: i64) -> Money {
    Decimal::from(value)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

// ── Receivables (mock) ───────────────────────────────────────────────────────

/// Five receivables spanning all three allowance tiers.
pub fn mock_receivables() -> Vec<Receivable> {
    vec![
        Receivable::new("REC-001", "BPJS Kesehatan - Claim Jan", rp(500_000_000), 2, ReceivableStatus::Current),
        Receivable::new("REC-002", "Asuransi Swasta A", rp(150_000_000), 7, ReceivableStatus::Substandard),
        Receivable::new("REC-003", "Pasien Umum (Cicilan)", rp(25_000_000), 14, ReceivableStatus::Bad),
        Receivable::new("REC-004", "Kemenkes - Program TB", rp(100_000_000), 4, ReceivableStatus::Current),
        Receivable::new("REC-005", "Asuransi Swasta B", rp(75_000_000), 9, ReceivableStatus::Substandard),
    ]
}

// ── Balance sheet (mock) ─────────────────────────────────────────────────────

pub fn mock_balance_sheet() -> BalanceSheetInputs {
    BalanceSheetInputs {
        cash: rp(MOCK_CASH),
        fixed_assets: FixedAssets {
            buildings: rp(15_000_000_000),
            equipment: rp(5_000_000_000),
            accumulated_depreciation: rp(4_500_000_000),
        },
        liabilities: Liabilities {
            short_term: rp(2_000_000_000),
            long_term: rp(8_500_000_000),
        },
    }
}

// ── Patients & clinical notes (mock) ─────────────────────────────────────────

pub fn mock_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: PatientId("P-101".to_string()),
            name: "Budi Santoso".to_string(),
            gender: "Male".to_string(),
            birth_date: date(1980, 5, 12),
            mrn: "MR-2024-8821".to_string(),
        },
        Patient {
            id: PatientId("P-102".to_string()),
            name: "Siti Aminah".to_string(),
            gender: "Female".to_string(),
            birth_date: date(1992, 11, 20),
            mrn: "MR-2024-9932".to_string(),
        },
    ]
}

pub fn mock_conditions() -> Vec<Condition> {
    vec![
        Condition {
            patient_id: PatientId("P-101".to_string()),
            code: "J18.9".to_string(),
            description: "Pneumonia".to_string(),
        },
        Condition {
            patient_id: PatientId("P-101".to_string()),
            code: "I10".to_string(),
            description: "Hypertension".to_string(),
        },
    ]
}

pub fn mock_notes() -> Vec<ClinicalNote> {
    vec![ClinicalNote {
        id: "N-551".to_string(),
        patient_id: PatientId("P-101".to_string()),
        date: date(2024, 5, 20),
        author: "dr. Spesialis Penyakit Dalam".to_string(),
        text: "Patient presents with 3-day history of high fever (39C), productive cough with \
               yellowish sputum, and shortness of breath upon exertion.\n\
               History of hypertension (controlled with Amlodipine 5mg).\n\
               Physical exam: Crackles heard in right lower lobe. SpO2 94% room air. BP 130/85.\n\
               Lab results: Leukocytosis (WBC 16.000). CXR confirms infiltration in RLL \
               compatible with pneumonia.\n\
               Plan: Start IV Ceftriaxone 1g q12h, Azithromycin 500mg daily. Nebulizer \
               Combivent q8h. Monitor O2 sat."
            .to_string(),
    }]
}

// ── Store ────────────────────────────────────────────────────────────────────

/// Everything the dashboard reads, owned for the life of the process.
#[derive(Debug, Clone)]
pub struct MockStore {
    pub receivables: Vec<Receivable>,
    pub balance_sheet: BalanceSheetInputs,
    pub patients: Vec<Patient>,
    pub conditions: Vec<Condition>,
    pub notes: Vec<ClinicalNote>,
}

impl MockStore {
    pub fn seeded() -> Self {
        let store = Self {
            receivables: mock_receivables(),
            balance_sheet: mock_balance_sheet(),
            patients: mock_patients(),
            conditions: mock_conditions(),
            notes: mock_notes(),
        };
        debug!(
            receivables = store.receivables.len(),
            patients = store.patients.len(),
            notes = store.notes.len(),
            "mock store seeded"
        );
        store
    }

    pub fn patient(&self, id: &str) -> SimrsResult<&Patient> {
        self.patients
            .iter()
            .find(|p| p.id.0 == id)
            .ok_or_else(|| SimrsError::UnknownRecord {
                kind: "patient",
                id: id.to_string(),
            })
    }

    pub fn note(&self, id: &str) -> SimrsResult<&ClinicalNote> {
        self.notes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| SimrsError::UnknownRecord {
                kind: "clinical note",
                id: id.to_string(),
            })
    }

    pub fn conditions_for<'a>(&'a self, patient: &'a PatientId) -> impl Iterator<Item = &'a Condition> {
        self.conditions.iter().filter(move |c| &c.patient_id == patient)
    }

    pub fn notes_for<'a>(&'a self, patient: &'a PatientId) -> impl Iterator<Item = &'a ClinicalNote> {
        self.notes.iter().filter(move |n| &n.patient_id == patient)
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::seeded()
    }
}
