//! Application state and the action/command loop.
//!
//! `AppState` is the single owner of all UI state. Key presses and finished
//! background calls both arrive as `Action`s; `dispatch` applies them and may
//! return a `Command` for the event loop to execute. `dispatch` itself does no
//! I/O, so every state transition is testable without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use simrs_advisory::advisor::{placeholder, Fallback};
use simrs_contracts::{
    advisory::{Advisory, AdvisoryKind, AdvisoryRequest},
    clinical::Patient,
};
use simrs_ref_hospital::{
    panels::{
        clinical,
        finance::{self, FinancePanel},
        overview, View,
    },
    MockStore,
};

/// Everything that can change the UI state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SelectView(View),
    NextView,
    FocusNextCard,
    FocusPrevCard,
    OpenFocusedCard,
    SelectNextPatient,
    SelectPrevPatient,
    BeginEdit,
    EndEdit,
    InsertChar(char),
    InsertNewline,
    Backspace,
    ResetNote,
    BeginSearch,
    EndSearch,
    SearchChar(char),
    SearchBackspace,
    GenerateSummary,
    /// A background advisory call completed (successfully or not).
    AdvisoryFinished(Advisory),
}

/// Side effects requested by `dispatch`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Advise(AdvisoryRequest),
}

/// Finance view state beyond the static panel.
#[derive(Debug, Clone)]
pub struct FinanceState {
    /// `Err` holds a displayable message if the store failed validation.
    pub panel: Result<FinancePanel, String>,
    pub analysis: String,
    pub requested: bool,
    pub processing: bool,
}

/// Clinical view state.
#[derive(Debug, Clone)]
pub struct ClinicalState {
    /// Index into `MockStore::patients`.
    pub selected_patient: usize,
    pub search: String,
    pub searching: bool,
    pub note_text: String,
    pub editing: bool,
    pub processing: bool,
    pub summary: Option<Advisory>,
}

pub struct AppState {
    pub store: MockStore,
    pub view: View,
    pub focused_card: usize,
    pub advisory_configured: bool,
    pub finance: FinanceState,
    pub clinical: ClinicalState,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(store: MockStore, advisory_configured: bool) -> Self {
        let panel = FinancePanel::from_store(&store).map_err(|e| e.to_string());
        let note_text = clinical::initial_note_text(&store);

        Self {
            store,
            view: View::Overview,
            focused_card: 0,
            advisory_configured,
            finance: FinanceState {
                panel,
                analysis: finance::ANALYSIS_PENDING.to_string(),
                requested: false,
                processing: false,
            },
            clinical: ClinicalState {
                selected_patient: 0,
                search: String::new(),
                searching: false,
                note_text,
                editing: false,
                processing: false,
                summary: None,
            },
            should_quit: false,
        }
    }

    /// Apply `action` and return the side effect to run, if any.
    pub fn dispatch(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::SelectView(view) => self.enter(view),
            Action::NextView => self.enter(self.view.next()),
            Action::FocusNextCard => {
                self.focused_card = (self.focused_card + 1) % overview::cards().len();
                None
            }
            Action::FocusPrevCard => {
                let count = overview::cards().len();
                self.focused_card = (self.focused_card + count - 1) % count;
                None
            }
            Action::OpenFocusedCard => {
                let target = overview::cards()
                    .get(self.focused_card)
                    .map(|card| card.target)?;
                self.enter(target)
            }
            Action::SelectNextPatient => {
                self.step_patient(1);
                None
            }
            Action::SelectPrevPatient => {
                self.step_patient(-1);
                None
            }
            Action::BeginEdit => {
                self.clinical.editing = true;
                None
            }
            Action::EndEdit => {
                self.clinical.editing = false;
                None
            }
            Action::InsertChar(c) => {
                if self.clinical.editing {
                    self.clinical.note_text.push(c);
                }
                None
            }
            Action::InsertNewline => {
                if self.clinical.editing {
                    self.clinical.note_text.push('\n');
                }
                None
            }
            Action::Backspace => {
                if self.clinical.editing {
                    self.clinical.note_text.pop();
                }
                None
            }
            Action::ResetNote => {
                self.load_selected_note();
                None
            }
            Action::BeginSearch => {
                self.clinical.searching = true;
                None
            }
            Action::EndSearch => {
                self.clinical.searching = false;
                None
            }
            Action::SearchChar(c) => {
                self.clinical.search.push(c);
                self.follow_search();
                None
            }
            Action::SearchBackspace => {
                self.clinical.search.pop();
                self.follow_search();
                None
            }
            Action::GenerateSummary => {
                // One request in flight per control.
                if self.clinical.processing {
                    debug!("summary already in flight; ignoring request");
                    return None;
                }
                self.clinical.processing = true;
                self.clinical.editing = false;
                Some(Command::Advise(clinical::summary_request(&self.clinical.note_text)))
            }
            Action::AdvisoryFinished(advisory) => {
                match advisory.kind {
                    AdvisoryKind::NoteSummary => {
                        self.clinical.processing = false;
                        self.clinical.summary = Some(advisory);
                    }
                    AdvisoryKind::FinancialAnalysis => {
                        self.finance.processing = false;
                        self.finance.analysis = advisory.text;
                    }
                }
                None
            }
        }
    }

    /// Switch views. The first visit to the finance view requests the AI
    /// executive summary.
    fn enter(&mut self, view: View) -> Option<Command> {
        self.view = view;
        if view != View::Finance || self.finance.requested {
            return None;
        }

        self.finance.requested = true;
        match &self.finance.panel {
            Ok(panel) => {
                self.finance.processing = true;
                Some(Command::Advise(panel.advisory_request()))
            }
            Err(_) => {
                // Nothing to analyze; do not leave the pending text up.
                self.finance.analysis =
                    placeholder(AdvisoryKind::FinancialAnalysis, Fallback::CallFailed).to_string();
                None
            }
        }
    }

    pub fn selected_patient(&self) -> Option<&Patient> {
        self.store.patients.get(self.clinical.selected_patient)
    }

    /// Indices of the patients matching the current search, in store order.
    pub fn visible_patients(&self) -> Vec<usize> {
        self.store
            .patients
            .iter()
            .enumerate()
            .filter(|(_, p)| clinical::patient_matches(p, &self.clinical.search))
            .map(|(i, _)| i)
            .collect()
    }

    /// Move the selection by `delta` within the visible patients, wrapping.
    fn step_patient(&mut self, delta: isize) {
        let visible = self.visible_patients();
        if visible.is_empty() {
            return;
        }
        let len = visible.len() as isize;
        let next = match visible.iter().position(|&i| i == self.clinical.selected_patient) {
            Some(pos) => (pos as isize + delta).rem_euclid(len) as usize,
            None => 0,
        };
        self.select_patient(visible[next]);
    }

    /// Keep the selection inside the search results.
    fn follow_search(&mut self) {
        let visible = self.visible_patients();
        if let Some(&first) = visible.first() {
            if !visible.contains(&self.clinical.selected_patient) {
                self.select_patient(first);
            }
        }
    }

    fn select_patient(&mut self, index: usize) {
        if index != self.clinical.selected_patient {
            self.clinical.selected_patient = index;
            self.load_selected_note();
        }
    }

    /// Replace the editor contents with the selected patient's latest note.
    fn load_selected_note(&mut self) {
        self.clinical.note_text = match self.selected_patient() {
            Some(patient) => clinical::patient_note_text(&self.store, patient),
            None => clinical::initial_note_text(&self.store),
        };
    }
}

/// Translate a key press into an action for the current state.
pub fn key_to_action(state: &AppState, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    // The search box and the note editor capture all other keys while active.
    if state.clinical.searching {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::EndSearch),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchChar(c)),
            _ => None,
        };
    }

    if state.clinical.editing {
        return match key.code {
            KeyCode::Esc => Some(Action::EndEdit),
            KeyCode::Enter => Some(Action::InsertNewline),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::InsertChar(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('1') => Some(Action::SelectView(View::Overview)),
        KeyCode::Char('2') => Some(Action::SelectView(View::Finance)),
        KeyCode::Char('3') => Some(Action::SelectView(View::Clinical)),
        KeyCode::Tab => Some(Action::NextView),
        _ => match state.view {
            View::Overview => match key.code {
                KeyCode::Left | KeyCode::Up => Some(Action::FocusPrevCard),
                KeyCode::Right | KeyCode::Down => Some(Action::FocusNextCard),
                KeyCode::Enter => Some(Action::OpenFocusedCard),
                _ => None,
            },
            View::Finance => None,
            View::Clinical => match key.code {
                KeyCode::Up => Some(Action::SelectPrevPatient),
                KeyCode::Down => Some(Action::SelectNextPatient),
                KeyCode::Char('e') | KeyCode::Enter => Some(Action::BeginEdit),
                KeyCode::Char('g') => Some(Action::GenerateSummary),
                KeyCode::Char('r') => Some(Action::ResetNote),
                KeyCode::Char('/') => Some(Action::BeginSearch),
                _ => None,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use simrs_contracts::advisory::AdvisoryOutcome;

    fn app() -> AppState {
        AppState::new(MockStore::seeded(), false)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn finished(kind: AdvisoryKind, text: &str) -> Action {
        Action::AdvisoryFinished(Advisory {
            kind,
            text: text.to_string(),
            outcome: AdvisoryOutcome::Generated,
        })
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    #[test]
    fn starts_on_overview() {
        let app = app();
        assert_eq!(app.view, View::Overview);
        assert!(!app.should_quit);
        assert!(app.finance.panel.is_ok());
    }

    #[test]
    fn first_finance_visit_requests_analysis_once() {
        let mut app = app();

        let command = app.dispatch(Action::SelectView(View::Finance));
        assert!(matches!(
            command,
            Some(Command::Advise(AdvisoryRequest::FinancialAnalysis { .. }))
        ));
        assert!(app.finance.processing);

        app.dispatch(Action::SelectView(View::Overview));
        assert_eq!(app.dispatch(Action::SelectView(View::Finance)), None);
    }

    #[test]
    fn overview_cards_open_their_views() {
        let mut app = app();
        app.dispatch(Action::FocusNextCard);
        assert_eq!(app.focused_card, 1);
        assert_eq!(app.dispatch(Action::OpenFocusedCard), None);
        assert_eq!(app.view, View::Clinical);

        app.dispatch(Action::SelectView(View::Overview));
        app.dispatch(Action::FocusPrevCard);
        assert_eq!(app.focused_card, 0);
        assert!(app.dispatch(Action::OpenFocusedCard).is_some());
        assert_eq!(app.view, View::Finance);
    }

    #[test]
    fn tab_cycles_views() {
        let mut app = app();
        app.dispatch(Action::NextView);
        assert_eq!(app.view, View::Finance);
        app.dispatch(Action::NextView);
        assert_eq!(app.view, View::Clinical);
        app.dispatch(Action::NextView);
        assert_eq!(app.view, View::Overview);
    }

    // ── Clinical editor ──────────────────────────────────────────────────────

    #[test]
    fn editing_only_applies_in_edit_mode() {
        let mut app = app();
        app.clinical.note_text.clear();

        app.dispatch(Action::InsertChar('x'));
        assert_eq!(app.clinical.note_text, "");

        app.dispatch(Action::BeginEdit);
        for c in "BP 130".chars() {
            app.dispatch(Action::InsertChar(c));
        }
        app.dispatch(Action::InsertNewline);
        app.dispatch(Action::InsertChar('x'));
        app.dispatch(Action::Backspace);
        assert_eq!(app.clinical.note_text, "BP 130\n");

        app.dispatch(Action::EndEdit);
        app.dispatch(Action::ResetNote);
        assert!(app.clinical.note_text.starts_with("Patient presents"));
    }

    #[test]
    fn generate_gates_duplicate_submissions() {
        let mut app = app();
        app.dispatch(Action::SelectView(View::Clinical));

        let first = app.dispatch(Action::GenerateSummary);
        match first {
            Some(Command::Advise(AdvisoryRequest::NoteSummary { note_text })) => {
                assert_eq!(note_text, app.clinical.note_text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(app.clinical.processing);

        assert_eq!(app.dispatch(Action::GenerateSummary), None);

        app.dispatch(finished(AdvisoryKind::NoteSummary, "## Summary"));
        assert!(!app.clinical.processing);
        assert_eq!(app.clinical.summary.as_ref().unwrap().text, "## Summary");

        assert!(app.dispatch(Action::GenerateSummary).is_some());
    }

    #[test]
    fn finance_result_does_not_clear_clinical_flag() {
        let mut app = app();
        app.dispatch(Action::SelectView(View::Finance));
        app.dispatch(Action::GenerateSummary);

        app.dispatch(finished(AdvisoryKind::FinancialAnalysis, "Liquidity is sound."));
        assert!(!app.finance.processing);
        assert_eq!(app.finance.analysis, "Liquidity is sound.");
        assert!(app.clinical.processing);
    }

    #[test]
    fn patient_selection_wraps() {
        let mut app = app();
        app.dispatch(Action::SelectPrevPatient);
        assert_eq!(app.selected_patient().unwrap().name, "Siti Aminah");
        app.dispatch(Action::SelectNextPatient);
        assert_eq!(app.selected_patient().unwrap().name, "Budi Santoso");
    }

    #[test]
    fn editor_follows_selected_patient() {
        let mut app = app();
        assert!(app.clinical.note_text.starts_with("Patient presents"));

        app.dispatch(Action::SelectNextPatient);
        assert_eq!(app.clinical.note_text, "");

        app.dispatch(Action::SelectNextPatient);
        assert!(app.clinical.note_text.starts_with("Patient presents"));
    }

    // ── Patient search ───────────────────────────────────────────────────────

    #[test]
    fn search_filters_and_moves_selection() {
        let mut app = app();
        app.dispatch(Action::SelectView(View::Clinical));
        app.dispatch(Action::BeginSearch);
        for c in "siti".chars() {
            app.dispatch(Action::SearchChar(c));
        }
        assert_eq!(app.visible_patients(), vec![1]);
        assert_eq!(app.selected_patient().unwrap().name, "Siti Aminah");
        assert_eq!(app.clinical.note_text, "");

        // Navigation stays inside the results.
        app.dispatch(Action::SelectNextPatient);
        assert_eq!(app.clinical.selected_patient, 1);

        app.dispatch(Action::EndSearch);
        for _ in 0..4 {
            app.dispatch(Action::SearchBackspace);
        }
        assert_eq!(app.visible_patients(), vec![0, 1]);
        assert_eq!(app.clinical.selected_patient, 1);
    }

    #[test]
    fn search_with_no_results_keeps_selection() {
        let mut app = app();
        app.dispatch(Action::SearchChar('z'));
        assert!(app.visible_patients().is_empty());
        assert_eq!(app.clinical.selected_patient, 0);
        app.dispatch(Action::SelectNextPatient);
        assert_eq!(app.clinical.selected_patient, 0);
    }

    // ── Finance failures ─────────────────────────────────────────────────────

    #[test]
    fn invalid_store_shows_unavailable_analysis() {
        let mut store = MockStore::seeded();
        store.receivables[0].age_months = -1;
        let mut app = AppState::new(store, true);
        assert!(app.finance.panel.is_err());

        assert_eq!(app.dispatch(Action::SelectView(View::Finance)), None);
        assert_eq!(app.finance.analysis, "AI Analysis unavailable.");
        assert!(!app.finance.processing);
    }

    // ── Key mapping ──────────────────────────────────────────────────────────

    #[test]
    fn keys_map_by_mode() {
        let mut app = app();
        assert_eq!(key_to_action(&app, key(KeyCode::Char('2'))), Some(Action::SelectView(View::Finance)));
        assert_eq!(key_to_action(&app, key(KeyCode::Char('q'))), Some(Action::Quit));

        app.dispatch(Action::SelectView(View::Clinical));
        assert_eq!(key_to_action(&app, key(KeyCode::Char('g'))), Some(Action::GenerateSummary));
        assert_eq!(key_to_action(&app, key(KeyCode::Char('e'))), Some(Action::BeginEdit));
        assert_eq!(key_to_action(&app, key(KeyCode::Char('/'))), Some(Action::BeginSearch));

        app.dispatch(Action::BeginSearch);
        assert_eq!(key_to_action(&app, key(KeyCode::Char('q'))), Some(Action::SearchChar('q')));
        assert_eq!(key_to_action(&app, key(KeyCode::Enter)), Some(Action::EndSearch));
        app.dispatch(Action::EndSearch);

        app.dispatch(Action::BeginEdit);
        // While editing, 'q' and digits are text.
        assert_eq!(key_to_action(&app, key(KeyCode::Char('q'))), Some(Action::InsertChar('q')));
        assert_eq!(key_to_action(&app, key(KeyCode::Char('2'))), Some(Action::InsertChar('2')));
        assert_eq!(key_to_action(&app, key(KeyCode::Esc)), Some(Action::EndEdit));

        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        };
        assert_eq!(key_to_action(&app, ctrl_c), Some(Action::Quit));
    }
}
