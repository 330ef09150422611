//! HTML page construction.
//!
//! The renderer is given the session state and produces the full page for
//! it. UI events travel back as plain form posts consumed by the HTTP
//! layer; nothing here mutates state.

use crate::core::session::{Page, SessionState};
use crate::models::patient::{PatientInput, Sex};
use crate::models::prediction::PredictionResult;
use crate::ui::chart;

/// Sidebar item highlighted on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Home,
    Detection,
    Details,
}

/// Render the page for the current session state.
#[must_use]
pub fn render(state: &SessionState) -> String {
    match (state.page, state.prediction.as_ref()) {
        (Page::Home, _) => layout(Nav::Home, "Home", &view_home()),
        (Page::DetectionForm, _) => layout(
            Nav::Detection,
            "Liver Disease Detection",
            &view_detection_form(&state.form, &[]),
        ),
        (Page::ResultNegative, _) => layout(Nav::Detection, "Result", &view_result_negative()),
        (Page::ResultPositive, Some(result)) => {
            layout(Nav::Detection, "Result", &view_result_positive(result))
        }
        // A positive result page without a stored result cannot be produced
        // by the state machine; fall back to the form.
        (Page::ResultPositive, None) => layout(
            Nav::Detection,
            "Liver Disease Detection",
            &view_detection_form(&state.form, &[]),
        ),
        (Page::Details, _) => layout(Nav::Details, "Liver Disease Details", &view_details()),
    }
}

/// Render the detection form with validation messages.
#[must_use]
pub fn render_form_with_errors(form: &PatientInput, errors: &[String]) -> String {
    layout(
        Nav::Detection,
        "Liver Disease Detection",
        &view_detection_form(form, errors),
    )
}

/// Generic failure page for unexpected inference errors.
#[must_use]
pub fn view_error() -> String {
    layout(
        Nav::Detection,
        "Something went wrong",
        "<h1>Something went wrong</h1>\n\
         <p>The prediction could not be completed. Your inputs are unchanged; \
         please try again.</p>\n",
    )
}

fn view_home() -> String {
    let mut body = String::new();
    body.push_str("<h1>Welcome to the Liver Disease Prediction System</h1>\n");
    body.push_str("<img class=\"hero\" src=\"/assets/liver.svg\" alt=\"Liver illustration\"/>\n");
    body.push_str(
        "<p>The liver is one of the most vital organs in the human body, responsible for \
         detoxification, protein synthesis and digestion. It can suffer from diseases such as \
         hepatitis, fibrosis and cirrhosis.</p>\n",
    );
    body.push_str("<h2>Common Liver Diseases</h2>\n<ul>\n");
    body.push_str(
        "<li><strong>Hepatitis</strong>: inflammation of the liver caused by viruses or toxic \
         substances.</li>\n",
    );
    body.push_str(
        "<li><strong>Cirrhosis</strong>: scarring of the liver due to long-term damage, often \
         from alcohol abuse or hepatitis.</li>\n",
    );
    body.push_str(
        "<li><strong>Fibrosis</strong>: healthy liver tissue becomes scarred and cannot work as \
         well.</li>\n",
    );
    body.push_str(
        "<li><strong>Suspect</strong>: if you suspect liver disease, consult a doctor.</li>\n",
    );
    body.push_str("</ul>\n");
    body.push_str(
        "<p>Regular checkups and monitoring are important for maintaining liver health. Use \
         this app to predict potential liver disease based on your lab results.</p>\n",
    );
    body
}

fn view_detection_form(form: &PatientInput, errors: &[String]) -> String {
    let mut body = String::new();
    body.push_str("<h1>Liver Disease Detection</h1>\n");
    body.push_str("<p>Input the patient details to get the prediction.</p>\n");

    if !errors.is_empty() {
        body.push_str("<ul class=\"errors\">\n");
        for error in errors {
            body.push_str(&format!("<li>{}</li>\n", escape_html(error)));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<form method=\"post\" action=\"/predict\">\n");
    body.push_str(&format!(
        "<label class=\"wide\">Enter Patient Name (Optional)\
         <input type=\"text\" name=\"patient_name\" value=\"{}\" maxlength=\"120\"/></label>\n",
        escape_html(&form.patient_name)
    ));

    body.push_str("<div class=\"columns\">\n<div class=\"column\">\n");
    body.push_str(&format!(
        "<label>Age<input type=\"number\" name=\"age\" min=\"0\" max=\"100\" step=\"1\" \
         value=\"{}\"/></label>\n",
        form.age
    ));
    body.push_str(&number_field("Albumin", "albumin", form.albumin));
    body.push_str(&number_field(
        "Alanine Aminotransferase",
        "alanine_aminotransferase",
        form.alanine_aminotransferase,
    ));
    body.push_str(&number_field("Bilirubin", "bilirubin", form.bilirubin));
    body.push_str(&number_field("Cholesterol", "cholesterol", form.cholesterol));
    body.push_str(&number_field(
        "Gamma Glutamyl Transferase",
        "gamma_glutamyl_transferase",
        form.gamma_glutamyl_transferase,
    ));
    body.push_str("</div>\n<div class=\"column\">\n");
    body.push_str(&sex_field(form.sex));
    body.push_str(&number_field(
        "Alkaline Phosphatase",
        "alkaline_phosphatase",
        form.alkaline_phosphatase,
    ));
    body.push_str(&number_field(
        "Aspartate Aminotransferase",
        "aspartate_aminotransferase",
        form.aspartate_aminotransferase,
    ));
    body.push_str(&number_field(
        "Cholinesterase",
        "cholinesterase",
        form.cholinesterase,
    ));
    body.push_str(&number_field("Creatinina", "creatinina", form.creatinina));
    body.push_str(&number_field("Protein", "protein", form.protein));
    body.push_str("</div>\n</div>\n");

    body.push_str("<button type=\"submit\" class=\"primary\">Predict</button>\n</form>\n");
    body
}

fn view_result_negative() -> String {
    let mut body = String::new();
    body.push_str("<h1>No Liver Disease Detected!</h1>\n");
    body.push_str(
        "<p>Congratulations! Your liver seems healthy. Remember to maintain a balanced diet \
         and avoid excessive alcohol to keep your liver in top shape.</p>\n",
    );
    body.push_str(&follow_up_actions());
    body
}

fn view_result_positive(result: &PredictionResult) -> String {
    let mut body = String::new();
    body.push_str("<h1>Liver Disease Detected</h1>\n");
    body.push_str(
        "<p>Based on your test results, there are indications of liver disease. It is \
         important to consult a doctor for further investigation.</p>\n",
    );
    body.push_str("<h2>Common Symptoms of Liver Disease</h2>\n<ul>\n");
    for symptom in [
        "Fatigue",
        "Yellowing of the skin and eyes (jaundice)",
        "Abdominal pain and swelling",
        "Nausea or vomiting",
        "Dark urine",
        "Chronic fatigue",
    ] {
        body.push_str(&format!("<li>{symptom}</li>\n"));
    }
    body.push_str("</ul>\n");

    if let Some(probabilities) = &result.probabilities {
        body.push_str("<h2>Probability of Different Diseases</h2>\n");
        body.push_str(&chart::probability_chart(probabilities));
    }

    body.push_str(&follow_up_actions());
    body
}

fn view_details() -> String {
    let mut body = String::new();
    body.push_str("<h1>Liver Disease Details</h1>\n");
    body.push_str(
        "<p>The liver is susceptible to a variety of diseases due to its role in metabolizing \
         substances in the body. Below are some of the most common liver diseases.</p>\n",
    );
    body.push_str("<h2>Hepatitis</h2>\n");
    body.push_str(
        "<p>Inflammation of the liver, often caused by viral infections or autoimmune \
         conditions.<br/><strong>Symptoms</strong>: abdominal pain, dark urine, pale or \
         clay-colored stools, fatigue, low-grade fever.</p>\n",
    );
    body.push_str("<h2>Cirrhosis</h2>\n");
    body.push_str(
        "<p>Chronic damage to the liver results in scar tissue formation and loss of liver \
         function.<br/><strong>Symptoms</strong>: fatigue, easy bleeding, loss of appetite, \
         weight loss, itchy skin, swelling in the legs (edema).</p>\n",
    );
    body.push_str("<h2>Fibrosis</h2>\n");
    body.push_str(
        "<p>Liver fibrosis occurs when excessive amounts of scar tissue build up in the liver \
         repeatedly.<br/><strong>Symptoms</strong>: jaundice, fatigue, loss of appetite, nausea \
         and vomiting, fever.</p>\n",
    );
    body
}

fn follow_up_actions() -> String {
    "<p>What would you like to do next?</p>\n\
     <div class=\"actions\">\n\
     <form method=\"post\" action=\"/back\">\
     <button type=\"submit\">Go Back to Input Page (Cross-check)</button></form>\n\
     <form method=\"post\" action=\"/new\">\
     <button type=\"submit\">New Prediction</button></form>\n\
     </div>\n"
        .to_string()
}

fn number_field(label: &str, name: &str, value: f64) -> String {
    format!(
        "<label>{label}<input type=\"number\" name=\"{name}\" min=\"0\" step=\"0.1\" \
         value=\"{value}\"/></label>\n"
    )
}

fn sex_field(selected: Sex) -> String {
    let mut field = String::from("<label>Sex<select name=\"sex\">\n");
    for option in [Sex::Male, Sex::Female] {
        let marker = if option == selected { " selected" } else { "" };
        field.push_str(&format!("<option value=\"{option}\"{marker}>{option}</option>\n"));
    }
    field.push_str("</select></label>\n");
    field
}

fn layout(active: Nav, title: &str, body: &str) -> String {
    let nav_items = [
        (Nav::Home, "/", "Home"),
        (Nav::Detection, "/detect", "Liver Disease Detection"),
        (Nav::Details, "/details", "Liver Disease Details"),
    ];
    let mut sidebar = String::new();
    for (nav, href, label) in nav_items {
        let class = if nav == active {
            "nav-link active"
        } else {
            "nav-link"
        };
        sidebar.push_str(&format!("<a class=\"{class}\" href=\"{href}\">{label}</a>\n"));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\"/>\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n\
         <title>{title} - Hepascan</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"shell\">\n<aside class=\"sidebar\">\n<h2>Navigation</h2>\n{sidebar}\
         </aside>\n<main class=\"content\">\n{body}</main>\n</div>\n</body>\n</html>\n",
        title = escape_html(title),
        sidebar = sidebar,
        body = body,
    )
}

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; background-color: #f0f2f6; color: #1f2430; }
.shell { display: flex; min-height: 100vh; }
.sidebar { width: 230px; padding: 20px; background-color: #e7e9ef; }
.nav-link { display: block; border-radius: 20px; background-color: #e0e0e0; padding: 10px;
  margin-bottom: 5px; text-align: center; text-decoration: none; color: inherit;
  transition: background-color 0.3s ease; }
.nav-link:hover { background-color: #d0d0d0; }
.nav-link.active { background-color: #007bff; color: white; }
.content { flex: 1; padding: 28px 40px; max-width: 860px; }
.hero { max-width: 420px; width: 100%; }
.columns { display: flex; gap: 32px; }
.column { flex: 1; }
label { display: block; margin-bottom: 12px; font-size: 0.95em; }
label.wide { max-width: 540px; }
input, select { display: block; width: 100%; margin-top: 4px; padding: 6px; box-sizing: border-box; }
button { border-radius: 20px; border: none; padding: 10px 18px; background-color: #e0e0e0;
  cursor: pointer; }
button:hover { background-color: #d0d0d0; }
button.primary { background-color: #007bff; color: white; }
.actions { display: flex; gap: 16px; }
.errors { color: #b00020; }
.probability-chart { max-width: 560px; width: 100%; }
.probability-chart .bar { fill: #007bff; }
.probability-chart .axis { stroke: #1f2430; stroke-width: 1; }
.probability-chart .bar-label { font-size: 11px; }
.probability-chart .bar-value { font-size: 12px; }
.probability-chart .axis-label { font-size: 13px; }
@media (prefers-color-scheme: dark) {
  body { background-color: #262730; color: #fafafa; }
  .sidebar { background-color: #1e1f29; }
  .nav-link { background-color: #3b3b4f; color: white; }
  .nav-link.active { background-color: #42a5f5; }
  .probability-chart .axis { stroke: #fafafa; }
  .probability-chart .bar-label, .probability-chart .bar-value,
  .probability-chart .axis-label { fill: #fafafa; }
}
"#;

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
