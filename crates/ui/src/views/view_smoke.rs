use chrono::Duration;
use noun_core::time::fixed_now;
use serde_json::json;
use services::error::{NETWORK_ERROR_MESSAGE, UNAUTHORIZED_MESSAGE};
use services::{Endpoint, HttpMethod, HttpResponse, StubTransport};

use super::JOBS_EMPTY_MESSAGE;
use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_document};
use crate::vm::StudyDocument;

fn iso(offset: Duration) -> String {
    (fixed_now() + offset).to_rfc3339()
}

#[tokio::test(flavor = "current_thread")]
async fn job_board_without_jobs_key_renders_empty_state() {
    let stub = StubTransport::new();
    stub.get_json(Endpoint::Jobs.path(), &json!({}));
    let mut harness = setup_view_harness(ViewKind::Jobs, stub);

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(JOBS_EMPTY_MESSAGE), "missing empty state in {html}");
    assert!(!html.contains("Retry"), "unexpected error panel in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unauthorized_renders_error_panel_with_retry() {
    let stub = StubTransport::new();
    stub.respond(
        HttpMethod::Get,
        Endpoint::ForumPosts.path(),
        HttpResponse::json(401, ""),
    );
    let mut harness = setup_view_harness(ViewKind::Forum, stub);

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(UNAUTHORIZED_MESSAGE), "missing message in {html}");
    assert!(html.contains("Retry"), "missing retry control in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn job_board_renders_badges_and_default_location() {
    let stub = StubTransport::new();
    stub.get_json(
        Endpoint::Jobs.path(),
        &json!({"jobs": [
            {"id": 1, "title": "Teaching Assistant", "company": "NOUN", "type": "Hybrid", "postedAt": iso(Duration::hours(-2))},
            {"id": 2, "title": "Lab Intern", "company": "BioGen", "location": "Lagos", "type": "internship", "postedAt": iso(Duration::days(-2))},
        ]}),
    );
    let mut harness = setup_view_harness(ViewKind::Jobs, stub);

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("badge badge-blue"), "missing hybrid badge in {html}");
    assert!(html.contains("badge badge-pink"), "missing internship badge in {html}");
    assert!(html.contains(">Remote<"), "missing default location in {html}");
    assert!(html.contains("2h ago"), "missing posted label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn upcoming_exams_hide_past_exams_and_band_severity() {
    let stub = StubTransport::new();
    stub.get_json(
        Endpoint::Exams.path(),
        &json!({"exams": [
            {"id": "past", "courseId": "c1", "date": iso(Duration::days(-1)), "description": "Resit"},
            {"id": "soon", "courseId": "c1", "date": iso(Duration::days(2)), "description": "Quiz one"},
            {"id": "later", "courseId": "c9", "date": iso(Duration::days(12)), "description": "Final"},
        ]}),
    );
    stub.get_json(
        Endpoint::Courses.path(),
        &json!({"courses": [{"id": "c1", "code": "BIO101", "title": "General Biology"}]}),
    );
    let mut harness = setup_view_harness(ViewKind::Exams, stub);

    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Resit"), "past exam rendered in {html}");
    assert!(html.contains("exam-card exam-urgent"), "missing urgent band in {html}");
    assert!(html.contains("exam-card exam-info"), "missing info band in {html}");
    assert!(html.contains("BIO101"), "missing course code in {html}");
    assert!(html.contains("Unknown course"), "missing unknown course in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn offline_progress_degrades_to_empty_state() {
    let stub = StubTransport::offline();
    let mut harness = setup_view_harness(ViewKind::Progress, stub);

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No scores yet"), "missing placeholder in {html}");
    assert!(html.contains("No activity yet"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_widget_renders_history_and_usage() {
    let stub = StubTransport::new();
    stub.get_json(
        Endpoint::ChatHistory.path(),
        &json!({
            "messages": [
                {"id": "1", "role": "user", "content": "What is osmosis?"},
                {"id": "2", "role": "assistant", "content": "**Osmosis** is diffusion of water."},
            ],
            "promptsUsed": 1,
            "promptLimit": 20,
        }),
    );
    let mut harness = setup_view_harness(ViewKind::Chat, stub);

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("What is osmosis?"), "missing user message in {html}");
    assert!(html.contains("<strong>Osmosis</strong>"), "missing markdown in {html}");
    assert!(html.contains("1 of 20 prompts used"), "missing usage in {html}");
    assert_eq!(harness.stub.request_count(HttpMethod::Post, Endpoint::ChatSend.path()), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_shows_status_errors_and_degrades_network_failures() {
    let stub = StubTransport::new();
    stub.fail(HttpMethod::Get, Endpoint::ChatHistory.path(), "timeout");
    stub.respond(
        HttpMethod::Get,
        Endpoint::Progress.path(),
        HttpResponse::json(503, r#"{"message":"Maintenance in progress"}"#),
    );
    let mut harness = setup_view_harness(ViewKind::Dashboard, stub);

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Maintenance in progress"), "missing status message in {html}");
    assert!(!html.contains(NETWORK_ERROR_MESSAGE), "network failure should degrade in {html}");
    assert!(html.contains("Ask the tutor anything"), "missing chat empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn document_viewer_renders_controls() {
    let document = StudyDocument {
        url: "https://cdn.example.edu/gst101.pdf".to_string(),
        title: "GST 101 Notes".to_string(),
    };
    let mut harness = setup_view_harness_with_document(
        ViewKind::Viewer(document.clone()),
        StubTransport::new(),
        Some(document),
    );

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("GST 101 Notes"), "missing title in {html}");
    assert!(html.contains("100%"), "missing zoom label in {html}");
    assert!(html.contains("Fullscreen"), "missing fullscreen control in {html}");
    assert!(html.contains("Download"), "missing download control in {html}");
    assert!(html.contains("Loading document..."), "missing loading state in {html}");
    assert!(html.contains("gst101.pdf"), "missing frame source in {html}");
}
