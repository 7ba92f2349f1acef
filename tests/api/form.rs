use axum::http::StatusCode;
use horoscope_mood::client::{ApiClient, FormState, SubmissionForm};
use horoscope_mood::routes::submissions::{CONFIGURATION_MESSAGE, SUCCESS_MESSAGE};

use crate::helpers::{MockWebhook, spawn_app};

fn filled_form() -> SubmissionForm {
    let mut form = SubmissionForm::new();
    form.email = "ursula_le_guin@gmail.com".into();
    form.horoscope_sign = "capricorn".into();
    form.mood = "reflective".into();
    form
}

fn api_for(address: &str) -> ApiClient {
    ApiClient::with_client(
        address,
        reqwest::Client::builder().no_proxy().build().unwrap(),
    )
}

#[tokio::test]
async fn form_reaches_success_state_with_the_assigned_id() {
    let webhook = MockWebhook::start(StatusCode::OK).await;
    let test_app = spawn_app(Some(webhook.uri.clone())).await;
    let mut form = filled_form();

    let state = form.submit(&api_for(&test_app.address)).await.clone();

    assert_eq!(
        state,
        FormState::Success {
            message: SUCCESS_MESSAGE.to_string(),
            id: 1
        }
    );
    assert!(form.email.is_empty());
    assert_eq!(webhook.received()[0]["horoscope_sign"], "capricorn");
}

#[tokio::test]
async fn form_shows_the_server_message_on_failure() {
    let test_app = spawn_app(None).await;
    let mut form = filled_form();

    let state = form.submit(&api_for(&test_app.address)).await.clone();

    assert_eq!(
        state,
        FormState::Error {
            message: CONFIGURATION_MESSAGE.to_string()
        }
    );
    assert_eq!(form.mood, "reflective");
}

#[tokio::test]
async fn invalid_form_is_never_sent() {
    let test_app = spawn_app(None).await;
    let mut form = filled_form();
    form.email = "not-an-email".into();

    let state = form.submit(&api_for(&test_app.address)).await.clone();

    assert_eq!(state, FormState::Idle);
    assert!(form.field_errors().field("email").is_some());
    assert!(test_app.state.store.is_empty());
}
