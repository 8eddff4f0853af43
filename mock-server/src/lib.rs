//! In-memory fake of the organisation account API.
//!
//! Mirrors the remote service closely enough for end-to-end tests: JSON
//! bodies under `data`, `{"error_message": ...}` on rejection, and
//! version-checked deletes.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const ACCOUNTS_PATH: &str = "/v1/organisation/accounts";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountPayload {
    pub data: AccountRecord,
}

/// Server-side view of an account. Attributes are stored as raw JSON and
/// echoed back untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: Uuid,
    pub organisation_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub version: Option<i64>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, AccountPayload>>>;

/// Error answer in the remote service's shape.
#[derive(Debug)]
pub struct Rejection {
    status: StatusCode,
    message: String,
}

impl Rejection {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error_message": self.message }))).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(ACCOUNTS_PATH, post(create_account))
        .route(
            &format!("{ACCOUNTS_PATH}/{{id}}"),
            get(fetch_account).delete(delete_account),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_account(
    State(db): State<Db>,
    payload: Result<Json<AccountPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountPayload>), Rejection> {
    let Json(mut payload) =
        payload.map_err(|rejection| Rejection::new(StatusCode::BAD_REQUEST, rejection.body_text()))?;
    let record = &mut payload.data;

    if record.kind != "accounts" {
        return Err(Rejection::new(StatusCode::BAD_REQUEST, "type in body should be one of [accounts]"));
    }
    if record.version.is_some_and(|version| version < 0) {
        return Err(Rejection::new(StatusCode::BAD_REQUEST, "version in body should be greater than or equal to 0"));
    }
    if let Some(iban) = record.attributes.get("iban").and_then(Value::as_str) {
        if !is_iban(iban) {
            return Err(Rejection::new(
                StatusCode::BAD_REQUEST,
                "iban in body should match '^[A-Z]{2}[0-9]{2}[A-Z0-9]{0,64}$'",
            ));
        }
    }
    record.version.get_or_insert(0);
    let id = record.id;

    let mut accounts = db.write().await;
    if accounts.contains_key(&id) {
        return Err(Rejection::new(
            StatusCode::CONFLICT,
            "Account cannot be created as it violates a duplicate constraint",
        ));
    }
    info!(%id, "account created");
    accounts.insert(id, payload.clone());
    Ok((StatusCode::CREATED, Json(payload)))
}

async fn fetch_account(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountPayload>, Rejection> {
    let accounts = db.read().await;
    accounts
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Rejection::new(StatusCode::NOT_FOUND, format!("record {id} does not exist")))
}

async fn delete_account(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, Rejection> {
    let version = params
        .version
        .ok_or_else(|| Rejection::new(StatusCode::BAD_REQUEST, "invalid version number"))?;

    let mut accounts = db.write().await;
    let current = accounts
        .get(&id)
        .ok_or_else(|| Rejection::new(StatusCode::NOT_FOUND, format!("record {id} does not exist")))?
        .data
        .version;
    if current != Some(version) {
        debug!(%id, version, ?current, "version mismatch on delete");
        return Err(Rejection::new(StatusCode::CONFLICT, "invalid version"));
    }
    accounts.remove(&id);
    info!(%id, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Two country letters, two check digits, then up to 64 uppercase
/// alphanumerics.
fn is_iban(iban: &str) -> bool {
    let bytes = iban.as_bytes();
    bytes.len() >= 4
        && bytes.len() <= 68
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes[4..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iban_shape() {
        assert!(is_iban("AB12AZ33"));
        assert!(is_iban("GB11NWBK40030041426819"));
        assert!(is_iban("GB11"));

        assert!(!is_iban(""));
        assert!(!is_iban("gb11NWBK"));
        assert!(!is_iban("GBX1NWBK"));
        assert!(!is_iban("GB11nwbk"));
        assert!(!is_iban("$#*$*(@*($@*#$*&!!!"));
    }

    #[test]
    fn payload_requires_attributes() {
        let raw = r#"{"data":{"id":"ad27e265-9605-4b4b-a0e5-3003ea9cc4dc","organisation_id":"eb0bd6f5-c3f5-44b2-b677-acd23cdde73c","type":"accounts"}}"#;
        assert!(serde_json::from_str::<AccountPayload>(raw).is_err());
    }

    #[test]
    fn payload_roundtrips_attributes_untouched() {
        let raw = r#"{"data":{"id":"ad27e265-9605-4b4b-a0e5-3003ea9cc4dc","organisation_id":"eb0bd6f5-c3f5-44b2-b677-acd23cdde73c","type":"accounts","attributes":{"bic":"NWBKGB22","name":["Paul"]}}}"#;
        let payload: AccountPayload = serde_json::from_str(raw).unwrap();
        assert!(payload.data.version.is_none());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["data"]["attributes"]["bic"], "NWBKGB22");
        assert_eq!(json["data"]["attributes"]["name"][0], "Paul");
        assert!(json["data"].get("version").is_none());
    }
}
