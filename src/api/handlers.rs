//! Request handlers.
//!
//! Every handler runs one full lock-evaluate-render cycle against the
//! session: translate the request into a session event, apply it, and
//! render the page for the resulting state.

use std::sync::Mutex;

use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::core::inference::{InferenceError, ModelGateway};
use crate::core::session::{Event, SessionState};
use crate::models::patient::{clamp_non_negative, PatientInput, Sex};
use crate::models::prediction::PredictionResult;
use crate::ui;

/// Application state shared across requests.
///
/// The application serves a single user session; handlers lock it for the
/// duration of one interaction.
pub struct AppState {
    gateway: ModelGateway,
    session: Mutex<SessionState>,
}

impl AppState {
    pub fn new(gateway: ModelGateway) -> Self {
        Self {
            gateway,
            session: Mutex::new(SessionState::default()),
        }
    }
}

/// Errors surfaced to the user as a generic failure page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("inference failed")]
    Inference(#[from] InferenceError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(ui::pages::view_error())
    }
}

/// Raw detection form submission, in collection order.
#[derive(Debug, Deserialize)]
pub struct DetectionFormData {
    #[serde(default)]
    pub patient_name: String,
    pub age: f64,
    pub sex: Sex,
    pub albumin: f64,
    pub alanine_aminotransferase: f64,
    pub bilirubin: f64,
    pub cholesterol: f64,
    pub gamma_glutamyl_transferase: f64,
    pub alkaline_phosphatase: f64,
    pub aspartate_aminotransferase: f64,
    pub cholinesterase: f64,
    pub creatinina: f64,
    pub protein: f64,
}

impl DetectionFormData {
    /// Apply the widget minimums and produce the stored input.
    fn into_patient_input(self) -> PatientInput {
        PatientInput {
            patient_name: self.patient_name.trim().to_string(),
            age: clamp_non_negative(self.age).round() as u32,
            sex: self.sex,
            albumin: clamp_non_negative(self.albumin),
            alanine_aminotransferase: clamp_non_negative(self.alanine_aminotransferase),
            bilirubin: clamp_non_negative(self.bilirubin),
            cholesterol: clamp_non_negative(self.cholesterol),
            gamma_glutamyl_transferase: clamp_non_negative(self.gamma_glutamyl_transferase),
            alkaline_phosphatase: clamp_non_negative(self.alkaline_phosphatase),
            aspartate_aminotransferase: clamp_non_negative(self.aspartate_aminotransferase),
            cholinesterase: clamp_non_negative(self.cholinesterase),
            creatinina: clamp_non_negative(self.creatinina),
            protein: clamp_non_negative(self.protein),
        }
    }
}

fn html_page(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[instrument(skip(state))]
pub async fn home(state: web::Data<AppState>) -> HttpResponse {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session.update(Event::NavigateHome);
    html_page(ui::render(&session))
}

#[instrument(skip(state))]
pub async fn detection_form(state: web::Data<AppState>) -> HttpResponse {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session.update(Event::NavigateDetection);
    html_page(ui::render(&session))
}

#[instrument(skip(state))]
pub async fn details(state: web::Data<AppState>) -> HttpResponse {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session.update(Event::NavigateDetails);
    html_page(ui::render(&session))
}

/// Run the Predict action: store the submitted form, validate it, invoke
/// the gateway and transition to the matching result page.
#[instrument(skip(state, form))]
pub async fn predict(
    state: web::Data<AppState>,
    form: web::Form<DetectionFormData>,
) -> Result<HttpResponse, AppError> {
    let input = form.into_inner().into_patient_input();

    let mut session = state.session.lock().expect("session mutex poisoned");
    // Store first: submitted values survive the re-render even when
    // validation sends the user back to the form.
    session.update(Event::NavigateDetection);
    session.form = input;

    if let Err(errors) = session.form.validate() {
        let messages = validation_messages(&errors);
        warn!(?messages, "form submission rejected");
        return Ok(html_page(ui::pages::render_form_with_errors(
            &session.form,
            &messages,
        )));
    }

    let features = session.form.feature_vector();
    let outcome = state.gateway.predict(&features)?;
    let result = if outcome.is_positive() {
        // The multiclass model is consulted only when the binary model
        // signals disease.
        PredictionResult::positive(state.gateway.predict_proba(&features)?)
    } else {
        PredictionResult::negative()
    };

    info!(prediction = %result.id, ?outcome, "prediction completed");
    session.update(Event::Predicted(result));
    Ok(see_other("/result"))
}

#[instrument(skip(state))]
pub async fn result(state: web::Data<AppState>) -> HttpResponse {
    let session = state.session.lock().expect("session mutex poisoned");
    if session.prediction.is_none() {
        return see_other("/detect");
    }
    html_page(ui::render(&session))
}

#[instrument(skip(state))]
pub async fn go_back(state: web::Data<AppState>) -> HttpResponse {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session.update(Event::GoBack);
    see_other("/detect")
}

#[instrument(skip(state))]
pub async fn new_prediction(state: web::Data<AppState>) -> HttpResponse {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session.update(Event::NewPrediction);
    see_other("/detect")
}

fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}"))
            })
        })
        .collect();
    messages.sort();
    messages
}
