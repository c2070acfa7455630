//! HTTP API tests against an in-process router.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use pokedex_core::{
    CatalogFetcher, Entry, FetchError, PokeResponse, PokeResult, SledStore,
};
use pokedex_gateway::{create_router, AppState, GatewayConfig};
use serde_json::{json, Value};

struct StaticFetcher;

#[async_trait]
impl CatalogFetcher for StaticFetcher {
    async fn fetch_page(&self, _url: &str) -> Result<PokeResponse, FetchError> {
        Ok(PokeResponse {
            results: vec![
                PokeResult {
                    name: "bulbasaur".to_string(),
                    url: "https://pokeapi.co/api/v2/pokemon/1/".to_string(),
                },
                PokeResult {
                    name: "ivysaur".to_string(),
                    url: "https://pokeapi.co/api/v2/pokemon/2/".to_string(),
                },
            ],
        })
    }
}

struct DownFetcher;

#[async_trait]
impl CatalogFetcher for DownFetcher {
    async fn fetch_page(&self, url: &str) -> Result<PokeResponse, FetchError> {
        Err(FetchError::Status {
            status: 503,
            url: url.to_string(),
        })
    }
}

fn server_with(fetcher: impl CatalogFetcher + 'static) -> TestServer {
    let store = Arc::new(SledStore::temporary().unwrap());
    let config = GatewayConfig {
        default_limit: 2,
        ..Default::default()
    };
    let state = AppState::new(store, Arc::new(fetcher), config);
    TestServer::new(create_router(state)).unwrap()
}

fn server() -> TestServer {
    server_with(StaticFetcher)
}

async fn create(server: &TestServer, no: u32, name: &str) -> Entry {
    let response = server
        .post("/api/v2/pokemon")
        .json(&json!({ "no": no, "name": name }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Entry>()
}

#[tokio::test]
async fn test_health() {
    let server = server();
    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["entries"], 0);
}

#[tokio::test]
async fn test_create_returns_entry_shape() {
    let server = server();
    let response = server
        .post("/api/v2/pokemon")
        .json(&json!({ "no": 25, "name": "Pikachu" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(body["no"], 25);
    assert_eq!(body["name"], "pikachu");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_create_duplicate_is_bad_request() {
    let server = server();
    create(&server, 25, "pikachu").await;

    let response = server
        .post("/api/v2/pokemon")
        .json(&json!({ "no": 25, "name": "raichu" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "pokemon exists in db: no 25");
}

#[tokio::test]
async fn test_create_rejects_invalid_bodies() {
    let server = server();

    for body in [
        json!({ "no": 0, "name": "missingno" }),
        json!({ "no": -1, "name": "missingno" }),
        json!({ "no": 1, "name": "" }),
        json!({ "no": 1 }),
        json!({ "no": 1, "name": "bulbasaur", "type": "grass" }),
    ] {
        let response = server.post("/api/v2/pokemon").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "body: {}", body);
    }
}

#[tokio::test]
async fn test_list_pagination() {
    let server = server();
    for (no, name) in [(4, "charmander"), (2, "ivysaur"), (3, "venusaur"), (1, "bulbasaur")] {
        create(&server, no, name).await;
    }

    let response = server
        .get("/api/v2/pokemon")
        .add_query_param("limit", 2)
        .add_query_param("offset", 1)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let numbers: Vec<u32> = response.json::<Vec<Entry>>().iter().map(|e| e.no).collect();
    assert_eq!(numbers, vec![2, 3]);

    // Default limit from configuration.
    let entries = server.get("/api/v2/pokemon").await.json::<Vec<Entry>>();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].no, 1);

    let response = server.get("/api/v2/pokemon").add_query_param("limit", 0).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_find_by_number_id_and_name() {
    let server = server();
    let entry = create(&server, 133, "Eevee").await;

    for term in ["133".to_string(), entry.id.to_string(), "eevee".to_string()] {
        let response = server.get(&format!("/api/v2/pokemon/{}", term)).await;
        assert_eq!(response.status_code(), StatusCode::OK, "term: {}", term);
        assert_eq!(response.json::<Entry>(), entry);
    }

    let response = server.get("/api/v2/pokemon/999999").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["message"],
        "no pokemon found with name, no or id: 999999"
    );
}

#[tokio::test]
async fn test_update_merges_and_lowercases() {
    let server = server();
    let entry = create(&server, 25, "pikachu").await;

    let response = server
        .patch("/api/v2/pokemon/25")
        .json(&json!({ "name": "RAICHU" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let merged = response.json::<Entry>();
    assert_eq!(merged.id, entry.id);
    assert_eq!(merged.no, 25);
    assert_eq!(merged.name, "raichu");

    let found = server.get("/api/v2/pokemon/25").await.json::<Entry>();
    assert_eq!(found.name, "raichu");
}

#[tokio::test]
async fn test_update_conflict_and_missing() {
    let server = server();
    create(&server, 25, "pikachu").await;
    create(&server, 26, "raichu").await;

    let response = server
        .patch("/api/v2/pokemon/raichu")
        .json(&json!({ "no": 25 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .patch("/api/v2/pokemon/mew")
        .json(&json!({ "name": "mewtwo" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove() {
    let server = server();
    let entry = create(&server, 25, "pikachu").await;

    let response = server.delete("/api/v2/pokemon/25").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "25 is not a valid id");

    let path = format!("/api/v2/pokemon/{}", entry.id);
    let response = server.delete(&path).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.delete(&path).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.get("/api/v2/pokemon/pikachu").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seed_replaces_catalog() {
    let server = server();
    create(&server, 150, "mewtwo").await;

    let response = server.get("/api/v2/seed").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "seed executed");
    assert_eq!(body["inserted"], 2);

    let entries = server
        .get("/api/v2/pokemon")
        .add_query_param("limit", 10)
        .await
        .json::<Vec<Entry>>();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["bulbasaur", "ivysaur"]);
}

#[tokio::test]
async fn test_seed_upstream_failure() {
    let server = server_with(DownFetcher);
    create(&server, 150, "mewtwo").await;

    let response = server.get("/api/v2/seed").await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["code"], "UPSTREAM_ERROR");

    let body = server.get("/health").await.json::<Value>();
    assert_eq!(body["entries"], 0);
}
