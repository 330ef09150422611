//! Per-session form state and page navigation.
//!
//! The session owns the patient form and the active prediction, and tracks
//! the displayed page as an explicit enum. Handlers translate each user
//! action into an [`Event`] and feed it through [`SessionState::update`];
//! nothing is derived from the presence or absence of side-channel data.

use serde::{Deserialize, Serialize};

use crate::models::patient::PatientInput;
use crate::models::prediction::{Outcome, PredictionResult};

/// The page currently displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Home,
    DetectionForm,
    ResultNegative,
    ResultPositive,
    Details,
}

/// A discrete user action consumed by the state machine.
#[derive(Debug, Clone)]
pub enum Event {
    /// Sidebar: Home.
    NavigateHome,
    /// Sidebar: Liver Disease Detection.
    NavigateDetection,
    /// Sidebar: Liver Disease Details.
    NavigateDetails,
    /// A completed Predict action.
    Predicted(PredictionResult),
    /// "Go Back to Input Page" on a result page; form values are retained.
    GoBack,
    /// "New Prediction" on a result page; form values reset to defaults.
    NewPrediction,
}

/// All state owned by one user session.
///
/// The machine is cyclic and has no terminal state; it lives for as long as
/// the session does.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub page: Page,
    pub form: PatientInput,
    pub prediction: Option<PredictionResult>,
}

impl SessionState {
    /// Apply one user action.
    ///
    /// A result page is only ever entered through [`Event::Predicted`], and
    /// every transition that leaves it drops the active prediction, so the
    /// displayed page and the stored result can never disagree.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::NavigateHome => {
                self.page = Page::Home;
                self.prediction = None;
            }
            Event::NavigateDetection => {
                self.page = Page::DetectionForm;
                self.prediction = None;
            }
            Event::NavigateDetails => {
                self.page = Page::Details;
                self.prediction = None;
            }
            Event::Predicted(result) => {
                self.page = match result.outcome {
                    Outcome::Negative => Page::ResultNegative,
                    Outcome::Positive => Page::ResultPositive,
                };
                self.prediction = Some(result);
            }
            Event::GoBack => {
                self.page = Page::DetectionForm;
                self.prediction = None;
            }
            Event::NewPrediction => {
                self.form.reset();
                self.page = Page::DetectionForm;
                self.prediction = None;
            }
        }
    }
}
