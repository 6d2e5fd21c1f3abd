//! CLI tests against a mock backend.

mod common;

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{api_url, run_cli, run_cli_success, run_cli_with_input};

fn notes_page(titles: &[&str], total_pages: u32) -> Value {
    let notes: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"_id": format!("n{}", i + 1), "title": t, "subject": "CS"}))
        .collect();
    json!({"notes": notes, "page": 1, "totalPages": total_pages})
}

#[tokio::test]
async fn test_list_prints_items_and_facets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("sort", "title"))
        .and(query_param("subject", "CS"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(notes_page(&["Automata", "Compilers"], 3)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &[
            "list", "notes", "--page", "2", "--limit", "5", "--sort", "title", "--filter",
            "subject=CS",
        ],
        &api_url(&server),
    )
    .await;

    assert!(stdout.contains("Automata"));
    assert!(stdout.contains("Compilers"));
    assert!(stdout.contains("Page 2 of 3"));
    assert!(stdout.contains("subject: CS"));
}

#[tokio::test]
async fn test_list_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(notes_page(&["Graphs"], 1)))
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["list", "notes", "--json"], &api_url(&server)).await;
    let page: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(page["totalPages"], 1);
    assert_eq!(page["items"][0]["title"], "Graphs");
}

#[tokio::test]
async fn test_list_rejects_foreign_sort_key() {
    let server = MockServer::start().await;

    let output = run_cli(&["list", "notes", "--sort", "-dueDate"], &api_url(&server)).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown sort"));
}

#[tokio::test]
async fn test_list_server_error_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/blogs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let output = run_cli(&["list", "blogs"], &api_url(&server)).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to list blogs"));
}

#[tokio::test]
async fn test_get_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/assignments/a7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "a7",
            "title": "OS Scheduling",
            "fileUrl": "https://files.test/a7.pdf"
        })))
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["get", "assignment", "a7"], &api_url(&server)).await;
    assert!(stdout.contains("OS Scheduling - MUCSIT Assignments"));
    assert!(stdout.contains("https://mucsit.test/assignments/a7"));
    assert!(stdout.contains("https://files.test/a7.pdf"));
}

#[tokio::test]
async fn test_get_not_found_exit_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/old-questions/none"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .mount(&server)
        .await;

    let output = run_cli(&["get", "old-questions", "none"], &api_url(&server)).await;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Question Not Found - MUCSIT"));
}

#[tokio::test]
async fn test_get_rejects_bad_id() {
    let server = MockServer::start().await;

    let output = run_cli(&["get", "notes", "../etc"], &api_url(&server)).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid resource id"));
}

#[tokio::test]
async fn test_share_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/blogs/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "b1",
            "title": "Exam Tips",
            "excerpt": "Five habits that help"
        })))
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["share", "blogs", "b1", "--json"], &api_url(&server)).await;
    let share: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(share["title"], "Exam Tips");
    assert_eq!(share["text"], "Five habits that help");
    assert_eq!(share["url"], "https://mucsit.test/blogs/b1");
}

#[tokio::test]
async fn test_search_reports_partial_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .and(query_param("search", "sql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notes": [{"_id": "n9", "title": "SQL Joins"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"assignments": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/old-questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"oldQuestions": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/blogs"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let output = run_cli(&["search", "sql", "--json"], &api_url(&server)).await;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let hit: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(hit["href"], "/notes/n9");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Blogs"));
}

#[tokio::test]
async fn test_sitemap_needs_no_backend() {
    let stdout = run_cli_success(&["sitemap"], "http://127.0.0.1:9/api").await;
    assert!(stdout.contains("<loc>https://mucsit.test</loc>"));
    assert!(stdout.contains("<loc>https://mucsit.test/blogs</loc>"));
}

#[tokio::test]
async fn test_browse_renders_latest_request_only() {
    let server = MockServer::start().await;

    // The initial load is slow; the search issued after it wins.
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .and(query_param_is_missing("search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(notes_page(&["Unfiltered"], 1))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .and(query_param("search", "trees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(notes_page(&["Binary Trees"], 1)))
        .mount(&server)
        .await;

    let output = run_cli_with_input(&["browse", "notes"], &api_url(&server), "search trees\n").await;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Binary Trees"));
    assert!(!stdout.contains("Unfiltered"));
}

#[tokio::test]
async fn test_browse_reports_failed_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(notes_page(&["First"], 2))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let output = run_cli_with_input(&["browse", "notes"], &api_url(&server), "page 2\n").await;
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("500"));
}
