//! End-to-end flow tests: form submission, prediction, result navigation.

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};

use hepascan::api::{self, AppState};
use hepascan::core::inference::{
    Activation, ClassifierArtifact, DenseLayer, MlpClassifier, ModelGateway, ModelKind,
    SCHEMA_VERSION,
};
use hepascan::models::patient::FEATURE_COUNT;
use hepascan::models::prediction::CLASS_COUNT;

/// Gateway whose binary decision is fixed by the output bias and whose
/// multiclass distribution is constant.
fn fixed_gateway(binary_bias: f64) -> ModelGateway {
    let binary = MlpClassifier::from_artifact(ClassifierArtifact {
        schema_version: SCHEMA_VERSION,
        kind: ModelKind::Binary,
        num_features: FEATURE_COUNT,
        layers: vec![DenseLayer {
            weights: vec![vec![0.0; FEATURE_COUNT]],
            bias: vec![binary_bias],
            activation: Activation::Sigmoid,
        }],
    })
    .expect("valid binary artifact");

    let multiclass = MlpClassifier::from_artifact(ClassifierArtifact {
        schema_version: SCHEMA_VERSION,
        kind: ModelKind::Multiclass,
        num_features: FEATURE_COUNT,
        layers: vec![DenseLayer {
            weights: vec![vec![0.0; FEATURE_COUNT]; CLASS_COUNT],
            bias: vec![0.0, 1.0, 2.0, 0.5, 0.25],
            activation: Activation::Softmax,
        }],
    })
    .expect("valid multiclass artifact");

    ModelGateway::from_parts(binary, multiclass).expect("valid gateway")
}

macro_rules! test_app {
    ($gateway:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new($gateway)))
                .configure(api::configure),
        )
        .await
    };
}

fn detection_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("patient_name", "Jane Doe"),
        ("age", "45"),
        ("sex", "Male"),
        ("albumin", "4.0"),
        ("alanine_aminotransferase", "22.1"),
        ("bilirubin", "0.7"),
        ("cholesterol", "5.2"),
        ("gamma_glutamyl_transferase", "25.0"),
        ("alkaline_phosphatase", "70.0"),
        ("aspartate_aminotransferase", "24.5"),
        ("cholinesterase", "8.1"),
        ("creatinina", "74.0"),
        ("protein", "7.1"),
    ]
}

macro_rules! submit_form {
    ($app:expr, $form:expr) => {{
        let req = test::TestRequest::post()
            .uri("/predict")
            .set_form($form)
            .to_request();
        test::call_service($app, req).await
    }};
}

macro_rules! get_page {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let body = test::call_and_read_body($app, req).await;
        String::from_utf8(body.to_vec()).expect("utf-8 body")
    }};
}

#[actix_web::test]
async fn negative_prediction_shows_no_disease_and_no_chart() {
    let app = test_app!(fixed_gateway(-4.0));

    let resp = submit_form!(&app, &detection_form());
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/result");

    let html = get_page!(&app, "/result");
    assert!(html.contains("No Liver Disease Detected!"));
    assert!(!html.contains("<svg"));
}

#[actix_web::test]
async fn positive_prediction_shows_disease_and_five_bar_chart() {
    let app = test_app!(fixed_gateway(4.0));

    let resp = submit_form!(&app, &detection_form());
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let html = get_page!(&app, "/result");
    assert!(html.contains("Liver Disease Detected"));
    assert!(html.contains("<svg"));
    assert_eq!(html.matches("class=\"bar\"").count(), CLASS_COUNT);
    assert!(html.contains("Probability of Different Diseases"));
}

#[actix_web::test]
async fn go_back_returns_to_form_with_values_retained() {
    let app = test_app!(fixed_gateway(4.0));
    submit_form!(&app, &detection_form());

    let req = test::TestRequest::post().uri("/back").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/detect");

    let html = get_page!(&app, "/detect");
    assert!(html.contains("value=\"45\""));
    assert!(html.contains("value=\"4\""));
    assert!(html.contains("value=\"Jane Doe\""));
}

#[actix_web::test]
async fn new_prediction_returns_to_form_with_defaults() {
    let app = test_app!(fixed_gateway(4.0));
    submit_form!(&app, &detection_form());

    let req = test::TestRequest::post().uri("/new").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let html = get_page!(&app, "/detect");
    assert!(html.contains("name=\"age\" min=\"0\" max=\"100\" step=\"1\" value=\"0\""));
    assert!(!html.contains("Jane Doe"));
    // A fresh form means no active prediction either.
    let req = test::TestRequest::get().uri("/result").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn out_of_range_age_is_rejected_without_a_transition() {
    let app = test_app!(fixed_gateway(-4.0));
    let mut form = detection_form();
    form[1] = ("age", "150");

    let resp = submit_form!(&app, &form);
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Age must be between 0 and 100"));

    // No prediction was produced.
    let req = test::TestRequest::get().uri("/result").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/detect");
}

#[actix_web::test]
async fn negative_lab_values_are_clamped_to_zero() {
    let app = test_app!(fixed_gateway(-4.0));
    let mut form = detection_form();
    form[3] = ("albumin", "-3.5");

    let resp = submit_form!(&app, &form);
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let html = get_page!(&app, "/detect");
    assert!(html.contains("name=\"albumin\" min=\"0\" step=\"0.1\" value=\"0\""));
}

#[actix_web::test]
async fn result_without_prediction_redirects_to_form() {
    let app = test_app!(fixed_gateway(-4.0));
    let req = test::TestRequest::get().uri("/result").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/detect");
}

#[actix_web::test]
async fn sidebar_pages_render() {
    let app = test_app!(fixed_gateway(-4.0));
    let home = get_page!(&app, "/");
    assert!(home.contains("Welcome to the Liver Disease Prediction System"));

    let details = get_page!(&app, "/details");
    assert!(details.contains("Liver Disease Details"));
}
