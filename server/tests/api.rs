use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use eventide_server::auth::{Claims, TokenVerifier};
use eventide_server::models::{Event, NewEvent};
use eventide_server::routes::api_routes;
use eventide_server::state::AppState;
use eventide_server::store::{MemoryStore, Store};

const SECRET: &str = "integration-secret";

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), TokenVerifier::new(SECRET, None));
        Self {
            router: api_routes(state),
            store,
        }
    }

    async fn seed(&self, title: &str, category: &str, city: &str, price: i64, seats: i32) -> Event {
        self.store
            .insert_event(NewEvent {
                title: title.to_string(),
                description: format!("All about {title}"),
                category: category.to_string(),
                image_url: None,
                date: Utc::now() + Duration::days(14),
                location: "Main Hall".to_string(),
                city: city.to_string(),
                price: Decimal::from(price),
                capacity: seats,
                organizer_id: None,
                is_featured: false,
                tags: vec![],
            })
            .await
            .unwrap()
    }

    async fn send(&self, method: Method, uri: &str, user: Option<Uuid>, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token_for(user_id)));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}

fn token_for(user_id: Uuid) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        email: Some(format!("{user_id}@example.com")),
        iss: None,
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

#[tokio::test]
async fn health_check_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn listing_applies_query_string_filters() {
    let app = TestApp::new();
    app.seed("Indie Night", "Music", "Boston", 30, 50).await;
    app.seed("Rust Conf", "Tech", "Boston", 300, 50).await;
    app.seed("Food Fest", "Food", "Miami", 10, 50).await;

    let (status, body) = app.send(Method::GET, "/api/events", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, body) = app
        .send(Method::GET, "/api/events?city=Boston&max_price=100", None, None)
        .await;
    let events = body["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Indie Night");

    let (_, body) = app
        .send(Method::GET, "/api/events?q=FEST&category=All", None, None)
        .await;
    assert_eq!(body["data"][0]["title"], "Food Fest");
}

#[tokio::test]
async fn unknown_event_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::GET, &format!("/api/events/{}", Uuid::new_v4()), None, None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn booking_requires_sign_in() {
    let app = TestApp::new();
    let event = app.seed("Indie Night", "Music", "Boston", 50, 10).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/events/{}/bookings", event.id),
            None,
            Some(json!({ "tickets": 1 })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Please sign in to book tickets");
}

#[tokio::test]
async fn booking_decrements_seats_and_shows_in_history() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();
    let event = app.seed("Indie Night", "Music", "Boston", 50, 10).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/events/{}/bookings", event.id),
            Some(user_id),
            Some(json!({ "tickets": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["booking"]["total_amount"], "100");
    assert_eq!(body["data"]["event"]["available_seats"], 8);

    let (status, body) = app
        .send(Method::GET, "/api/me/bookings", Some(user_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stats"]["total_bookings"], 1);
    assert_eq!(body["data"]["stats"]["upcoming_events"], 1);
    assert_eq!(body["data"]["bookings"][0]["event"]["title"], "Indie Night");
    assert_eq!(body["data"]["bookings"][0]["status"], "confirmed");
}

#[tokio::test]
async fn overbooking_is_rejected() {
    let app = TestApp::new();
    let event = app.seed("Tiny Gig", "Music", "Boston", 50, 2).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/events/{}/bookings", event.id),
            Some(Uuid::new_v4()),
            Some(json!({ "tickets": 3 })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Not enough seats available");
    assert_eq!(body["error"]["details"]["available_seats"], 2);

    let stored = app.store.get_event(event.id).await.unwrap().unwrap();
    assert_eq!(stored.available_seats, 2);
}

#[tokio::test]
async fn viewed_categories_drive_recommendations() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();
    let gallery = app.seed("Gallery", "Arts", "Denver", 0, 40).await;
    app.seed("Derby", "Sports", "Denver", 20, 40).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/events/{}/views", gallery.id),
            Some(user_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["favorite_categories"], json!(["Arts"]));
    assert_eq!(body["data"]["interaction_count"], 1);

    let (_, body) = app
        .send(Method::GET, "/api/me/recommendations", Some(user_id), None)
        .await;
    let events = body["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Gallery");
}

#[tokio::test]
async fn organizer_creates_lists_and_deletes_own_events() {
    let app = TestApp::new();
    let organizer = Uuid::new_v4();
    let date = (Utc::now() + Duration::days(10)).to_rfc3339();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/organizer/events",
            Some(organizer),
            Some(json!({
                "title": "Startup Pitch Night",
                "description": "Founders pitch to investors",
                "category": "Business",
                "date": date,
                "location": "Innovation Lab",
                "city": "Austin",
                "price": "15.00",
                "capacity": 60,
                "tags": "startups, pitching"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["available_seats"], 60);
    assert_eq!(body["data"]["tags"], json!(["startups", "pitching"]));
    let event_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = app
        .send(Method::GET, "/api/organizer/events", Some(organizer), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/organizer/events/{event_id}"),
            Some(Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/organizer/events/{event_id}"),
            Some(organizer),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .send(Method::GET, "/api/organizer/events", Some(organizer), None)
        .await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn profile_is_created_from_token() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();

    let (status, body) = app.send(Method::GET, "/api/me", Some(user_id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id.to_string());
    assert_eq!(body["data"]["email"], format!("{user_id}@example.com"));
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/api/me")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_event_id_uses_error_envelope() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::GET, "/api/events/not-a-uuid", None, None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_price_filter_uses_error_envelope() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::GET, "/api/events?max_price=cheap", None, None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_booking_body_uses_error_envelope() {
    let app = TestApp::new();
    let event = app.seed("Indie Night", "Music", "Boston", 50, 10).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/events/{}/bookings", event.id),
            Some(Uuid::new_v4()),
            Some(json!({ "tickets": "two" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let stored = app.store.get_event(event.id).await.unwrap().unwrap();
    assert_eq!(stored.available_seats, 10);
}
