mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn progress_requires_a_session() {
    let server = common::server();
    let response = server.get("/api/progress").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.text(), "Unauthorized");

    server
        .post("/api/progress/1")
        .json(&json!({ "progress": 10 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn out_of_range_progress_is_rejected() {
    let server = common::server();
    let (name, value) = common::register(&server, "ada").await;

    for body in [json!({ "progress": 150 }), json!({ "progress": -1 }), json!({ "progress": "lots" }), json!({})] {
        let response = server
            .post("/api/progress/1")
            .add_header(name.clone(), value.clone())
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "Invalid progress value");
    }

    let rows: Vec<Value> = server.get("/api/progress").add_header(name, value).await.json();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn missing_or_non_json_body_is_an_invalid_value() {
    let server = common::server();
    let (name, value) = common::register(&server, "ada").await;

    let empty = server
        .post("/api/progress/1")
        .add_header(name.clone(), value.clone())
        .await;
    empty.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(empty.text(), "Invalid progress value");

    let form = server
        .post("/api/progress/1")
        .add_header(name.clone(), value.clone())
        .text("progress=50")
        .await;
    form.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(form.text(), "Invalid progress value");

    let rows: Vec<Value> = server.get("/api/progress").add_header(name, value).await.json();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn full_progress_marks_lesson_completed() {
    let server = common::server();
    let (name, value) = common::register(&server, "ada").await;

    let response = server
        .post("/api/progress/3")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "progress": 100 }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");

    let rows: Vec<Value> = server
        .get("/api/progress")
        .add_header(name.clone(), value.clone())
        .await
        .json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["lessonId"], 3);
    assert_eq!(rows[0]["progress"], 100);
    assert_eq!(rows[0]["completed"], true);

    // lowering the value reopens the lesson in place
    server
        .post("/api/progress/3")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "progress": "60.7" }))
        .await
        .assert_status_ok();
    let rows: Vec<Value> = server.get("/api/progress").add_header(name, value).await.json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["progress"], 60);
    assert_eq!(rows[0]["completed"], false);
}

#[tokio::test]
async fn progress_on_unknown_lesson_is_not_found() {
    let server = common::server();
    let (name, value) = common::register(&server, "ada").await;
    server
        .post("/api/progress/9999")
        .add_header(name, value)
        .json(&json!({ "progress": 50 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn progress_is_per_user() {
    let server = common::server();
    let (ada_name, ada) = common::register(&server, "ada").await;
    let (bob_name, bob) = common::register(&server, "bob").await;

    server
        .post("/api/progress/1")
        .add_header(ada_name, ada)
        .json(&json!({ "progress": 100 }))
        .await
        .assert_status_ok();

    let rows: Vec<Value> = server.get("/api/progress").add_header(bob_name, bob).await.json();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn practice_results_are_recorded() {
    let server = common::server();
    let (name, value) = common::register(&server, "ada").await;

    let row: Value = server
        .post("/api/progress/2/practice")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "exerciseId": 1, "score": 85 }))
        .await
        .json();
    assert_eq!(row["progress"], 0);
    assert_eq!(row["completed"], false);
    assert_eq!(row["practiceResults"][0]["score"], 85);
    assert!(row["practiceResults"][0]["completedAt"].is_string());

    server
        .post("/api/progress/2/practice")
        .add_header(name, value)
        .json(&json!({ "exerciseId": 1, "score": 101 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn course_progress_summarises_completed_lessons() {
    let server = common::server();
    let (name, value) = common::register(&server, "ada").await;

    for lesson in [1, 2, 27] {
        server
            .post(&format!("/api/progress/{lesson}"))
            .add_header(name.clone(), value.clone())
            .json(&json!({ "progress": 100 }))
            .await
            .assert_status_ok();
    }
    // half done does not count
    server
        .post("/api/progress/3")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "progress": 50 }))
        .await
        .assert_status_ok();

    let summary: Value = server
        .get("/api/courses/1/progress")
        .add_header(name.clone(), value.clone())
        .await
        .json();
    assert_eq!(summary["totalLessons"], 54);
    assert_eq!(summary["completedLessons"], 3);
    assert_eq!(summary["percent"], 5);
    assert_eq!(summary["modules"][0]["completedLessons"], 2);
    assert_eq!(summary["modules"][1]["completedLessons"], 1);
    assert_eq!(summary["modules"][2]["completedLessons"], 0);

    server
        .get("/api/courses/42/progress")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
