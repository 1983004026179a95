//! End-to-end tests through the router against an in-memory database.

use crate::migration::apply_migrations;
use crate::model::{Activity, Camper, NewActivity, NewCamper, NewSignup};
use crate::routes::app;
use crate::service::{CampRepository, SqliteRepository};
use crate::state::AppState;
use crate::store::connect;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

struct Harness {
    app: Router,
    repo: SqliteRepository,
}

async fn harness() -> Harness {
    let pool = connect("sqlite::memory:", 1).await.unwrap();
    apply_migrations(&pool).await.unwrap();
    let repo = SqliteRepository::new(pool);
    Harness {
        app: app(AppState::new(repo.clone())),
        repo,
    }
}

impl Harness {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = self.app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn signup_count(&self, activity_id: i64) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM signups WHERE activity_id = ?")
            .bind(activity_id)
            .fetch_one(self.repo.pool())
            .await
            .unwrap()
    }

    async fn camper(&self, name: &str, age: i64) -> Camper {
        self.repo
            .insert_camper(&NewCamper { name: name.into(), age })
            .await
            .unwrap()
    }

    async fn activity(&self, name: &str, difficulty: i64) -> Activity {
        self.repo
            .insert_activity(&NewActivity { name: name.into(), difficulty })
            .await
            .unwrap()
    }
}

fn validation_body() -> Value {
    json!({"errors": ["validation errors"]})
}

#[tokio::test]
async fn create_camper_then_read_it_back() {
    let h = harness().await;
    let (status, body) = h
        .json(Method::POST, "/campers", Some(json!({"name": "Alex", "age": 12})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Alex");
    assert_eq!(body["age"], 12);
    assert_eq!(body["signups"], json!([]));
    let id = body["id"].as_i64().unwrap();

    let (status, body) = h.json(Method::GET, &format!("/campers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "name": "Alex", "age": 12, "signups": []}));
}

#[tokio::test]
async fn invalid_campers_are_rejected_and_not_stored() {
    let h = harness().await;
    for bad in [
        json!({"name": "Old", "age": 19}),
        json!({"name": "Young", "age": 7}),
        json!({"name": "", "age": 12}),
        json!({"age": 12}),
        json!({"name": "NoAge"}),
        json!({"name": "Str", "age": "12"}),
    ] {
        let (status, body) = h.json(Method::POST, "/campers", Some(bad.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
        assert_eq!(body, validation_body());
    }
    assert!(h.repo.list_campers().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let h = harness().await;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/campers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = h.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lists_have_no_signups() {
    let h = harness().await;
    let camper = h.camper("Alex", 12).await;
    let activity = h.activity("Archery", 2).await;
    h.repo
        .insert_signup(&NewSignup { time: 9, camper_id: camper.id, activity_id: activity.id })
        .await
        .unwrap();

    let (status, body) = h.json(Method::GET, "/campers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": camper.id, "name": "Alex", "age": 12}]));

    let (status, body) = h.json(Method::GET, "/activities", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": activity.id, "name": "Archery", "difficulty": 2}]));
}

#[tokio::test]
async fn camper_detail_nests_signups_with_activity() {
    let h = harness().await;
    let camper = h.camper("Alex", 12).await;
    let activity = h.activity("Canoe", 4).await;
    let (signup, _, _) = h
        .repo
        .insert_signup(&NewSignup { time: 15, camper_id: camper.id, activity_id: activity.id })
        .await
        .unwrap();

    let (status, body) = h.json(Method::GET, &format!("/campers/{}", camper.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["signups"],
        json!([{
            "id": signup.id, "time": 15, "camper_id": camper.id, "activity_id": activity.id,
            "activity": {"id": activity.id, "name": "Canoe", "difficulty": 4}
        }])
    );
}

#[tokio::test]
async fn missing_camper_is_404() {
    let h = harness().await;
    let (status, body) = h.json(Method::GET, "/campers/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Camper not found"}));

    let (status, body) = h.json(Method::GET, "/campers/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Camper not found"}));

    let (status, body) = h
        .json(Method::PATCH, "/campers/42", Some(json!({"age": 9})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Camper not found"}));
}

#[tokio::test]
async fn patch_missing_camper_is_404_whatever_the_body() {
    let h = harness().await;

    let req = Request::builder()
        .method(Method::PATCH)
        .uri("/campers/42")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = h.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "Camper not found"}));

    let req = Request::builder()
        .method(Method::PATCH)
        .uri("/campers/42")
        .body(Body::from(r#"{"age": 9}"#))
        .unwrap();
    let resp = h.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "Camper not found"}));
}

#[tokio::test]
async fn patch_existing_camper_with_malformed_body_is_400() {
    let h = harness().await;
    let camper = h.camper("Alex", 12).await;
    let req = Request::builder()
        .method(Method::PATCH)
        .uri(format!("/campers/{}", camper.id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = h.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.repo.find_camper(camper.id).await.unwrap(), Some(camper));
}

#[tokio::test]
async fn patch_updates_camper() {
    let h = harness().await;
    let camper = h.camper("Alex", 12).await;
    let uri = format!("/campers/{}", camper.id);

    let (status, body) = h.json(Method::PATCH, &uri, Some(json!({"age": 9}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["age"], 9);
    assert_eq!(body["name"], "Alex");
    assert_eq!(body["signups"], json!([]));

    let (_, body) = h.json(Method::GET, &uri, None).await;
    assert_eq!(body["age"], 9);
}

#[tokio::test]
async fn patch_rejects_bad_values_and_unknown_keys_without_writing() {
    let h = harness().await;
    let camper = h.camper("Alex", 12).await;
    let uri = format!("/campers/{}", camper.id);

    for bad in [
        json!({"age": 30}),
        json!({"name": ""}),
        json!({"name": "Jo", "age": 5}),
        json!({"id": 99}),
        json!({"nickname": "Al"}),
        json!({"age": null}),
    ] {
        let (status, body) = h.json(Method::PATCH, &uri, Some(bad.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
        assert_eq!(body, validation_body());
    }
    assert_eq!(h.repo.find_camper(camper.id).await.unwrap(), Some(camper));
}

#[tokio::test]
async fn create_signup_returns_nested_detail() {
    let h = harness().await;
    let camper = h.camper("Alex", 12).await;
    let activity = h.activity("Archery", 2).await;

    let (status, body) = h
        .json(
            Method::POST,
            "/signups",
            Some(json!({"time": 9, "camper_id": camper.id, "activity_id": activity.id})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["time"], 9);
    assert_eq!(body["camper_id"], camper.id);
    assert_eq!(body["activity_id"], activity.id);
    assert_eq!(body["camper"], json!({"id": camper.id, "name": "Alex", "age": 12}));
    assert_eq!(body["activity"], json!({"id": activity.id, "name": "Archery", "difficulty": 2}));
}

#[tokio::test]
async fn signup_out_of_range_time_is_rejected() {
    let h = harness().await;
    h.camper("Alex", 12).await;
    h.activity("Archery", 2).await;

    let (status, body) = h
        .json(Method::POST, "/signups", Some(json!({"time": 25, "camper_id": 1, "activity_id": 1})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, validation_body());
    assert_eq!(h.signup_count(1).await, 0);
}

#[tokio::test]
async fn signup_with_unknown_camper_or_activity_is_rejected() {
    let h = harness().await;
    let camper = h.camper("Alex", 12).await;
    let activity = h.activity("Archery", 2).await;

    for bad in [
        json!({"time": 9, "camper_id": camper.id + 10, "activity_id": activity.id}),
        json!({"time": 9, "camper_id": camper.id, "activity_id": activity.id + 10}),
    ] {
        let (status, body) = h.json(Method::POST, "/signups", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, validation_body());
    }
    assert!(h.repo.signups_for_camper(camper.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_activity_removes_its_signups() {
    let h = harness().await;
    let camper = h.camper("Alex", 12).await;
    let doomed = h.activity("Archery", 2).await;
    let kept = h.activity("Canoe", 4).await;
    for activity_id in [doomed.id, kept.id] {
        h.repo
            .insert_signup(&NewSignup { time: 10, camper_id: camper.id, activity_id })
            .await
            .unwrap();
    }

    let (status, bytes) = h.send(Method::DELETE, &format!("/activities/{}", doomed.id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    assert_eq!(h.signup_count(doomed.id).await, 0);
    assert_eq!(h.signup_count(kept.id).await, 1);
    assert_eq!(h.repo.list_activities().await.unwrap(), vec![kept]);
}

#[tokio::test]
async fn delete_missing_activity_is_404() {
    let h = harness().await;
    let (status, body) = h.json(Method::DELETE, "/activities/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Activity not found"}));
}

#[tokio::test]
async fn unexposed_methods_are_405() {
    let h = harness().await;
    let (status, _) = h.send(Method::DELETE, "/campers/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = h.send(Method::GET, "/signups", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn common_routes_respond() {
    let h = harness().await;
    let (status, bytes) = h.send(Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());

    let (status, body) = h.json(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = h.json(Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));

    let (status, body) = h.json(Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "camp-signups");
}
