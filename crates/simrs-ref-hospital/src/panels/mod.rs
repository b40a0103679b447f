//! View-models for the three dashboard views.
//!
//! Each panel turns the mock store (and, for finance, the calculator and
//! aggregator output) into display-ready data. The CLI prints them as text;
//! the TUI draws them with widgets.

pub mod clinical;
pub mod finance;
pub mod overview;

/// The single-select navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Overview,
    Finance,
    Clinical,
}

impl View {
    pub const ALL: [View; 3] = [View::Overview, View::Finance, View::Clinical];

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Finance => "BLU Accounting",
            View::Clinical => "Clinical AI (FHIR)",
        }
    }

    /// The next view in navigation order, wrapping around.
    pub fn next(self) -> View {
        match self {
            View::Overview => View::Finance,
            View::Finance => View::Clinical,
            View::Clinical => View::Overview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_views() {
        let mut view = View::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(view);
            view = view.next();
        }
        assert_eq!(seen, View::ALL);
        assert_eq!(view, View::Overview);
    }
}
