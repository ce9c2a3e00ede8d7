//! The preference form: a single HTML page that posts back to itself.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use pulldown_cmark::{html::push_html, Event, Options, Parser};
use tracing::warn;

use crate::errors::AppError;
use crate::recommend::preferences::{AcademicInterest, CampusSize, PriorityFactor};
use crate::recommend::validation::PreferenceForm;
use crate::recommend::{recommend, Recommendation};
use crate::state::AppState;

const RATINGS: [(&str, &str); 5] = [
    ("proximity_importance", "Staying close to home"),
    ("affordability_importance", "Affordability"),
    ("online_importance", "Online or hybrid learning"),
    ("legacy_importance", "Historical or cultural legacy"),
    ("social_importance", "Campus life and student activity"),
];

enum Outcome {
    Matches(Recommendation),
    Failed(String),
}

/// GET /
pub async fn handle_form() -> Html<String> {
    Html(render_page(&PreferenceForm::default(), None))
}

/// POST /
///
/// Multi-select fields arrive as repeated keys, so the body is taken as raw
/// pairs and folded into a `PreferenceForm`.
pub async fn handle_submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let (form, parse_error) = PreferenceForm::from_pairs(&pairs);
    if let Some(e) = parse_error {
        return failure_page(&form, AppError::from(e));
    }

    let preferences = match form.validate() {
        Ok(preferences) => preferences,
        Err(e) => return failure_page(&form, AppError::from(e)),
    };

    match recommend(&state, &preferences).await {
        Ok(recommendation) => {
            Html(render_page(&form, Some(Outcome::Matches(recommendation)))).into_response()
        }
        Err(e) => {
            warn!("Recommendation failed: {e}");
            failure_page(&form, AppError::from(e))
        }
    }
}

fn failure_page(form: &PreferenceForm, error: AppError) -> Response {
    let status: StatusCode = error.status();
    let page = render_page(form, Some(Outcome::Failed(error.to_string())));
    (status, Html(page)).into_response()
}

fn render_page(form: &PreferenceForm, outcome: Option<Outcome>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>OnRamp Prototype</title>\n\
         <style>body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem}\
         fieldset{margin-bottom:1rem}.result{background:#eef7ee;padding:1rem}\
         .error{background:#fbeaea;padding:1rem;color:#8a1f1f}</style>\n\
         </head>\n<body>\n<h1>OnRamp: HBCU Explorer (AI Prototype)</h1>\n\
         <form method=\"post\" action=\"/\">\n",
    );

    html.push_str(&format!(
        "<label>Enter your ZIP code: <input type=\"text\" name=\"zip_code\" value=\"{}\"></label>\n",
        escape_html(&form.zip_code)
    ));

    html.push_str("<fieldset><legend>How important is each of these? (1-5)</legend>\n");
    for (name, label) in RATINGS {
        html.push_str(&format!(
            "<label>{label} <input type=\"range\" name=\"{name}\" min=\"1\" max=\"5\" value=\"{}\"></label><br>\n",
            rating_value(form, name)
        ));
    }
    html.push_str("</fieldset>\n");

    html.push_str("<fieldset><legend>Preferred campus size:</legend>\n");
    for size in CampusSize::ALL {
        let label = size.label();
        let checked = if form.campus_size_preference == label { " checked" } else { "" };
        html.push_str(&format!(
            "<label><input type=\"radio\" name=\"campus_size_preference\" value=\"{label}\"{checked}> {label}</label>\n"
        ));
    }
    html.push_str("</fieldset>\n");

    html.push_str("<fieldset><legend>Pick up to 2 academic interests:</legend>\n");
    for interest in AcademicInterest::ALL {
        push_checkbox(&mut html, "interests", interest.label(), &form.interests);
    }
    html.push_str("</fieldset>\n");

    html.push_str("<fieldset><legend>Select 2 or 3 most important factors:</legend>\n");
    for factor in PriorityFactor::ALL {
        push_checkbox(&mut html, "priority_factors", factor.label(), &form.priority_factors);
    }
    html.push_str("</fieldset>\n");

    html.push_str("<button type=\"submit\">Find My Matches</button>\n</form>\n");

    match outcome {
        Some(Outcome::Matches(recommendation)) => {
            html.push_str(&format!(
                "<section id=\"matches\"><h2>Recommendations</h2>\n<div class=\"result\">{}</div>\n\
                 <p><small>Submission {} &middot; {}</small></p></section>\n",
                render_markdown(&recommendation.recommendations),
                recommendation.submission_id,
                escape_html(&recommendation.model)
            ));
        }
        Some(Outcome::Failed(message)) => {
            html.push_str(&format!(
                "<div class=\"error\" role=\"alert\">{}</div>\n",
                escape_html(&message)
            ));
        }
        None => {}
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_checkbox(html: &mut String, name: &str, label: &str, selected: &[String]) {
    let checked = if selected.iter().any(|s| s == label) { " checked" } else { "" };
    let label = escape_html(label);
    html.push_str(&format!(
        "<label><input type=\"checkbox\" name=\"{name}\" value=\"{label}\"{checked}> {label}</label><br>\n"
    ));
}

fn rating_value(form: &PreferenceForm, name: &str) -> i64 {
    match name {
        "proximity_importance" => form.proximity_importance,
        "affordability_importance" => form.affordability_importance,
        "online_importance" => form.online_importance,
        "legacy_importance" => form.legacy_importance,
        _ => form.social_importance,
    }
}

/// Renders the model's Markdown reply. Raw HTML in the reply is demoted to
/// text, so it comes out escaped rather than interpreted.
fn render_markdown(raw: &str) -> String {
    let parser = Parser::new_ext(raw, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(markup) | Event::InlineHtml(markup) => Event::Text(markup),
            other => other,
        });

    let mut rendered = String::with_capacity(raw.len() * 3 / 2);
    push_html(&mut rendered, parser);
    rendered
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
