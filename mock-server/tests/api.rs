use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, AccountPayload};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

const ACCOUNTS: &str = "/v1/organisation/accounts";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn account_json(id: Uuid, iban: Option<&str>) -> String {
    let mut attributes = serde_json::json!({
        "bank_id": "400300",
        "bank_id_code": "GBDSC",
        "bic": "NWBKGB22",
        "country": "GB",
        "name": ["Paul"],
    });
    if let Some(iban) = iban {
        attributes["iban"] = Value::from(iban);
    }
    serde_json::json!({
        "data": {
            "id": id,
            "organisation_id": Uuid::new_v4(),
            "type": "accounts",
            "attributes": attributes,
        }
    })
    .to_string()
}

// --- create ---

#[tokio::test]
async fn create_account_returns_201_with_default_version() {
    let id = Uuid::new_v4();
    let resp = app()
        .oneshot(json_request("POST", ACCOUNTS, &account_json(id, None)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: AccountPayload = body_json(resp).await;
    assert_eq!(created.data.id, id);
    assert_eq!(created.data.version, Some(0));
    assert_eq!(created.data.attributes["bic"], "NWBKGB22");
}

#[tokio::test]
async fn create_account_with_invalid_iban_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            ACCOUNTS,
            &account_json(Uuid::new_v4(), Some("$#*$*(@*($@*#$*&!!!")),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert!(body["error_message"].as_str().unwrap().contains("iban"));
}

#[tokio::test]
async fn create_account_malformed_json_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", ACCOUNTS, r#"{"data":{"id":"not-a-uuid"}}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert!(body["error_message"].is_string());
}

#[tokio::test]
async fn create_account_wrong_type_returns_400() {
    let body = account_json(Uuid::new_v4(), None).replace("\"accounts\"", "\"payments\"");
    let resp = app()
        .oneshot(json_request("POST", ACCOUNTS, &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- fetch ---

#[tokio::test]
async fn fetch_account_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", &format!("{ACCOUNTS}/{}", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert!(body["error_message"].as_str().unwrap().contains("does not exist"));
}

#[tokio::test]
async fn fetch_account_bad_uuid_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", &format!("{ACCOUNTS}/not-a-uuid")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_account_not_found() {
    let resp = app()
        .oneshot(empty_request(
            "DELETE",
            &format!("{ACCOUNTS}/{}?version=0", Uuid::new_v4()),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_account_without_version_returns_400() {
    let resp = app()
        .oneshot(empty_request("DELETE", &format!("{ACCOUNTS}/{}", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full lifecycle ---

#[tokio::test]
async fn account_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();
    let id = Uuid::new_v4();
    let item = format!("{ACCOUNTS}/{id}");

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", ACCOUNTS, &account_json(id, Some("GB11NWBK40030041426819"))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // create again — duplicate id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", ACCOUNTS, &account_json(id, None)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // fetch
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &item))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: AccountPayload = body_json(resp).await;
    assert_eq!(fetched.data.id, id);
    assert_eq!(fetched.data.attributes["iban"], "GB11NWBK40030041426819");

    // delete with a stale version — conflict
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("{item}?version=3222423")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("{item}?version=0")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // fetch after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &item))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
