// estate-client/tests/http_wire.rs
// HttpClient against a local axum server: methods, paths, auth header, bodies

mod common;

use axum::extract::State;
use axum::{Json, Router};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use common::{fill_valid, init_tracing};
use estate_client::{
    Banner, BearerToken, ClientConfig, ClientError, FormMode, HttpClient, Locale,
    OptionCatalogLoader, OptionCategory, PropertyApi, PropertyCache, PropertyFormSession,
    SubmissionError, SubmissionPipeline,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Seen {
    method: Method,
    path: String,
    auth: Option<String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Seen>>>;

async fn handler(State(log): State<Log>, method: Method, uri: Uri, headers: HeaderMap, body: String) -> Response {
    let path = uri.path().trim_start_matches("/api/").to_string();
    log.lock().push(Seen {
        method: method.clone(),
        path: path.clone(),
        auth: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    let segments: Vec<&str> = path.split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("POST", ["dashboard", "create", "ru"]) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "success": false, "message": "Title already taken" })),
        )
            .into_response(),
        ("POST", ["dashboard", "create", _]) => {
            Json(json!({ "success": true, "message": "Property created", "id": "55" })).into_response()
        }
        ("PATCH", ["dashboard", "update", "13", _]) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "token expired" })),
        )
            .into_response(),
        ("GET", ["dashboard", "properties", "9", locale]) => Json(json!({
            "data": {
                "title": format!("Flat {locale}"),
                "location": "kadikoy",
                "area": "moda",
                "is_multi": "1",
                "price_min": 90000,
                "price_max": "180000"
            }
        }))
        .into_response(),
        ("GET", ["real-estates", "areas", location, _]) => Json(json!({
            "data": [{ "id": 1, "name": format!("{location} center"), "key": "center" }]
        }))
        .into_response(),
        ("GET", ["real-estates", "locations", _]) => Json(json!([
            { "id": 3, "name_en": "Kadikoy", "location_key": "kadikoy" }
        ]))
        .into_response(),
        ("GET", ["dashboard", "properties", category, ..]) if category.parse::<i64>().is_err() => Json(json!({
            "data": [{ "id": 1, "name": category }]
        }))
        .into_response(),
        _ => (StatusCode::NOT_FOUND, "no route").into_response(),
    }
}

async fn spawn_server() -> (String, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(handler).with_state(log.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), log)
}

fn client(base_url: &str) -> HttpClient {
    ClientConfig::new(base_url)
        .with_timeout(5)
        .build_http_client()
        .unwrap()
}

#[tokio::test]
async fn test_create_posts_json_with_bearer_header() {
    init_tracing();
    let (base_url, log) = spawn_server().await;
    let api = Arc::new(client(&base_url));
    let pipeline = SubmissionPipeline::new(api.clone(), PropertyCache::new());

    let mut model = estate_client::normalize(None, Locale::En);
    fill_valid(&mut model);
    let outcome = pipeline
        .submit(&model, FormMode::Create, Locale::En, &BearerToken::new("t0k3n"))
        .await
        .unwrap();
    assert_eq!(outcome.id, Some(55));
    assert_eq!(outcome.message.as_deref(), Some("Property created"));

    let seen = log.lock().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::POST);
    assert_eq!(seen[0].path, "dashboard/create/en");
    assert_eq!(seen[0].auth.as_deref(), Some("Bearer t0k3n"));
    assert_eq!(seen[0].body["is_multi"], json!(0));
    assert_eq!(seen[0].body["title"], json!("Sunny Flat"));
    assert_eq!(seen[0].body["house_types"], json!([3]));
    assert!(seen[0].body.get("id").is_none());
}

#[tokio::test]
async fn test_update_maps_unauthorized() {
    let (base_url, log) = spawn_server().await;
    let api = client(&base_url);

    let mut model = estate_client::normalize(None, Locale::Ru);
    fill_valid(&mut model);
    let payload = estate_client::build_payload(&model, FormMode::Edit(13));
    let err = api
        .update_property(13, Locale::Ru, &payload, &BearerToken::new("old"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    let seen = log.lock().clone();
    assert_eq!(seen[0].method, Method::PATCH);
    assert_eq!(seen[0].path, "dashboard/update/13/ru");
    assert_eq!(seen[0].body["id"], json!(13));
}

#[tokio::test]
async fn test_edit_session_over_http() {
    let (base_url, log) = spawn_server().await;
    let api = client(&base_url);
    let cache = PropertyCache::new();

    let mut session = PropertyFormSession::open_edit(&api, &cache, 9, Locale::Ru)
        .await
        .unwrap();
    assert_eq!(session.model().title, "Flat ru");
    assert!(session.model().is_multi());
    assert_eq!(session.model().maxima().unwrap().max_price, Some(180000.0));
    assert_eq!(session.model().area, "moda");

    assert!(session.load_areas(&api).await);
    assert_eq!(session.areas().areas()[0].value_key(), "center");
    assert!(cache.detail(9, Locale::Ru).is_some());

    let paths: Vec<String> = log.lock().iter().map(|s| s.path.clone()).collect();
    assert_eq!(
        paths,
        ["dashboard/properties/9/ru", "real-estates/areas/kadikoy/ru"]
    );
}

#[tokio::test]
async fn test_catalog_over_http() {
    let (base_url, log) = spawn_server().await;
    let loader = OptionCatalogLoader::new(Arc::new(client(&base_url)));

    let catalog = loader.select(Locale::En).await.unwrap().unwrap();
    assert!(catalog.is_complete());
    assert_eq!(catalog.location("kadikoy").unwrap().name, "Kadikoy");
    assert_eq!(log.lock().len(), OptionCategory::ALL.len());
    assert!(
        log.lock()
            .iter()
            .any(|s| s.path == "dashboard/properties/house-types")
    );
}

#[tokio::test]
async fn test_missing_property_is_not_found() {
    let (base_url, _log) = spawn_server().await;
    let api = client(&base_url);
    let err = api
        .fetch_property(404, Locale::En)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_unprocessable_save_shows_server_message() {
    let (base_url, _log) = spawn_server().await;
    let api = Arc::new(client(&base_url));
    let cache = PropertyCache::new();
    cache.put_list(Locale::Ru, Vec::new());
    let pipeline = SubmissionPipeline::new(api.clone(), cache.clone());

    let mut session = PropertyFormSession::create(Locale::Ru);
    let mut model = session.model().clone();
    fill_valid(&mut model);
    for field in estate_client::Field::ALL {
        if field != estate_client::Field::IsMulti && !field.is_multi_only() {
            session.set_field(field, model.value(field)).unwrap();
        }
    }

    let err = session
        .submit(&pipeline, &BearerToken::new("t0k3n"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::Network(ClientError::Validation(_))
    ));
    assert_eq!(err.user_message(), "Title already taken");
    assert_eq!(
        session.banner(),
        Some(&Banner::Error("Title already taken".into()))
    );
    assert!(session.is_dirty());
    assert!(cache.list(Locale::Ru).is_some());
}
