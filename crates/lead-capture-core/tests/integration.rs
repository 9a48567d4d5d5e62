//! Integration tests for the lead form against a mock webhook
//!
//! Covers:
//! - Honeypot and validation short-circuits (no request sent)
//! - Happy path payload, submitted window and deferred reset
//! - Network failures, timeouts and non-2xx responses
//! - Single-flight behaviour under concurrent submits
//! - Callers abandoning a submit mid-request

use lead_capture_core::{
    FormConfig, FormField, FormMetricsRegistry, LeadForm, SubmitError, SubmitOutcome,
    FAILURE_NOTICE, SUCCESS_MESSAGE,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOOK_PATH: &str = "/webhook/lead";
const RESET_DELAY_MS: u64 = 100;

fn config_for(server_uri: &str) -> FormConfig {
    FormConfig::builder()
        .webhook_url(format!("{}{}", server_uri, HOOK_PATH))
        .timeout_ms(5_000)
        .reset_delay_ms(RESET_DELAY_MS)
        .build()
}

async fn fill_valid(form: &LeadForm) {
    form.update_field(FormField::FirstName, "John").await;
    form.update_field(FormField::LastName, "Smith").await;
    form.update_field(FormField::Email, "john@x.com").await;
    form.update_field(FormField::Message, "Need a chatbot for my clinic").await;
}

fn expected_payload() -> serde_json::Value {
    json!({
        "firstName": "John",
        "lastName": "Smith",
        "email": "john@x.com",
        "phone": "",
        "company": "",
        "companySize": "",
        "message": "Need a chatbot for my clinic",
        "website": ""
    })
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_valid_lead_posts_once_and_resets_after_delay() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(expected_payload()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let form = LeadForm::new(&config_for(&server.uri())).unwrap();
    fill_valid(&form).await;

    let outcome = form.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Submitted(ref r) if r.status == 200));

    let snapshot = form.snapshot().await;
    assert!(snapshot.submitted);
    assert!(snapshot.submitting);
    assert_eq!(snapshot.banner(), Some(SUCCESS_MESSAGE));
    assert_eq!(snapshot.state.first_name, "John");
    assert!(form.has_pending_reset().await);

    // Still inside the success window: a second click does nothing.
    assert!(matches!(form.submit().await, SubmitOutcome::Ignored));

    tokio::time::sleep(Duration::from_millis(RESET_DELAY_MS * 4)).await;

    let snapshot = form.snapshot().await;
    assert!(snapshot.state.is_pristine());
    assert!(snapshot.errors.is_empty());
    assert!(!snapshot.submitted);
    assert!(!snapshot.submitting);
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_honeypot_values_never_reach_the_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let form = LeadForm::new(&config_for(&server.uri())).unwrap();
    fill_valid(&form).await;

    for value in ["x", "https://cheap-pills.example", "  filled  ", "\tbot"] {
        form.update_field(FormField::Website, value).await;
        assert!(matches!(form.submit().await, SubmitOutcome::Ignored));

        let snapshot = form.snapshot().await;
        assert!(!snapshot.submitted);
        assert!(!snapshot.submitting);
        assert!(snapshot.errors.is_empty());
        assert_eq!(snapshot.notice, None);
    }

    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_honeypot_wins_over_validation_errors() {
    let server = MockServer::start().await;
    let form = LeadForm::new(&config_for(&server.uri())).unwrap();

    form.update_field(FormField::Website, "spam").await;
    assert!(matches!(form.submit().await, SubmitOutcome::Ignored));
    assert!(form.snapshot().await.errors.is_empty());
}

#[tokio::test]
async fn test_missing_required_fields_block_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let form = LeadForm::new(&config_for(&server.uri())).unwrap();
    form.update_field(FormField::FirstName, "John").await;
    form.update_field(FormField::LastName, "   ").await;
    form.update_field(FormField::Email, "john@x.com").await;

    let outcome = form.submit().await;
    let errors = match outcome {
        SubmitOutcome::Rejected(errors) => errors,
        other => panic!("expected rejection, got {:?}", other),
    };
    assert_eq!(errors.fields(), vec![FormField::LastName, FormField::Message]);
    assert_eq!(form.snapshot().await.errors, errors);
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_network_failure_keeps_data_for_retry() {
    // Grab a free port and release it so nothing is listening there.
    let dead_uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let form = LeadForm::new(&config_for(&dead_uri)).unwrap();
    fill_valid(&form).await;

    let outcome = form.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Failed(SubmitError::Http(_))));

    let snapshot = form.snapshot().await;
    assert!(!snapshot.submitted);
    assert!(!snapshot.submitting);
    assert_eq!(snapshot.notice.as_deref(), Some(FAILURE_NOTICE));
    assert_eq!(snapshot.banner(), Some(FAILURE_NOTICE));
    assert_eq!(snapshot.state.first_name, "John");
    assert_eq!(snapshot.state.email, "john@x.com");
    assert_eq!(snapshot.state.message, "Need a chatbot for my clinic");
    assert!(!form.has_pending_reset().await);
}

#[tokio::test]
async fn test_server_error_is_a_failure_and_retry_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("workflow crashed"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let form = LeadForm::new(&config_for(&server.uri())).unwrap();
    fill_valid(&form).await;

    match form.submit().await {
        SubmitOutcome::Failed(SubmitError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "workflow crashed");
        }
        other => panic!("expected status failure, got {:?}", other),
    }
    assert_eq!(form.snapshot().await.notice.as_deref(), Some(FAILURE_NOTICE));

    // Retrying clears the notice and goes through.
    let outcome = form.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Submitted(ref r) if r.status == 201));
    let snapshot = form.snapshot().await;
    assert_eq!(snapshot.notice, None);
    assert!(snapshot.submitted);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_client_error_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let form = LeadForm::new(&config_for(&server.uri())).unwrap();
    fill_valid(&form).await;

    assert!(matches!(
        form.submit().await,
        SubmitOutcome::Failed(SubmitError::Status { status: 404, .. })
    ));
    assert!(!form.snapshot().await.submitted);
}

#[tokio::test]
async fn test_slow_webhook_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = FormConfig::builder()
        .webhook_url(format!("{}{}", server.uri(), HOOK_PATH))
        .timeout_ms(100)
        .build();
    let form = LeadForm::new(&config).unwrap();
    fill_valid(&form).await;

    assert!(matches!(
        form.submit().await,
        SubmitOutcome::Failed(SubmitError::Timeout(100))
    ));

    let snapshot = form.snapshot().await;
    assert!(!snapshot.submitting);
    assert_eq!(snapshot.notice.as_deref(), Some(FAILURE_NOTICE));
    assert_eq!(snapshot.state.last_name, "Smith");
}

#[tokio::test]
async fn test_abandoned_submit_releases_the_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let registry = FormMetricsRegistry::new().unwrap();
    let form = LeadForm::new(&config_for(&server.uri()))
        .unwrap()
        .with_metrics(registry.form());
    fill_valid(&form).await;

    let abandoned = tokio::time::timeout(Duration::from_millis(50), form.submit()).await;
    assert!(abandoned.is_err());

    let snapshot = form.snapshot().await;
    assert!(!snapshot.submitting);
    assert!(!snapshot.submitted);
    assert_eq!(snapshot.state.first_name, "John");
    assert!(registry
        .encode_text()
        .unwrap()
        .contains("lead_capture_submissions_in_flight 0"));

    assert!(form.submit().await.is_submitted());
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_rapid_double_submit_sends_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;

    let form = LeadForm::new(&config_for(&server.uri())).unwrap();
    fill_valid(&form).await;

    let (first, second) = tokio::join!(form.submit(), form.submit());

    assert!(first.is_submitted());
    assert!(matches!(second, SubmitOutcome::Ignored));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_edits_while_submitting_are_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(expected_payload()))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&server)
        .await;

    let form = LeadForm::new(&config_for(&server.uri())).unwrap();
    fill_valid(&form).await;

    let edit = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(form.is_submitting().await);
        form.update_field(FormField::Company, "Late Edit Ltd").await;
    };
    let (outcome, _) = tokio::join!(form.submit(), edit);

    assert!(outcome.is_submitted());
}

#[tokio::test]
async fn test_close_cancels_pending_reset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let form = LeadForm::new(&config_for(&server.uri())).unwrap();
    fill_valid(&form).await;
    assert!(form.submit().await.is_submitted());

    form.close().await;
    tokio::time::sleep(Duration::from_millis(RESET_DELAY_MS * 3)).await;

    let snapshot = form.snapshot().await;
    assert!(snapshot.submitted);
    assert_eq!(snapshot.state.first_name, "John");
    assert!(!form.has_pending_reset().await);
}

#[tokio::test]
async fn test_blank_honeypot_is_stripped_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(expected_payload()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = FormConfig {
        strip_honeypot: true,
        ..config_for(&server.uri())
    };
    let form = LeadForm::new(&config).unwrap();
    fill_valid(&form).await;
    form.update_field(FormField::Website, "   ").await;

    assert!(form.submit().await.is_submitted());
}

#[tokio::test]
async fn test_metrics_follow_outcomes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let registry = FormMetricsRegistry::new().unwrap();
    let metrics = registry.form();
    let form = LeadForm::new(&config_for(&server.uri()))
        .unwrap()
        .with_metrics(registry.form());

    form.submit().await;
    fill_valid(&form).await;
    form.submit().await;
    form.submit().await;

    assert_eq!(metrics.outcome_count("rejected"), 1.0);
    assert_eq!(metrics.outcome_count("submitted"), 1.0);
    assert_eq!(metrics.outcome_count("ignored"), 1.0);

    let text = registry.encode_text().unwrap();
    assert!(text.contains("lead_capture_validation_failures_total{field=\"message\"} 1"));
    assert!(text.contains("lead_capture_submissions_in_flight 0"));
}
