//! Stateless request builder and response parser for the account resource.
//!
//! # Design
//! `AccountClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. `AccountsApi` joins the two halves with
//! a `Transport`; callers that run their own HTTP stack can use the halves
//! directly.

use tracing::warn;

use crate::builder::AccountBuilder;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Account;

/// Collection path of the account resource, relative to the base URL.
pub const ACCOUNTS_PATH: &str = "/v1/organisation/accounts";

#[derive(Debug, Clone)]
pub struct AccountClient {
    base_url: String,
}

impl AccountClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{ACCOUNTS_PATH}", self.base_url)
    }

    pub fn build_create_account(&self, account: &Account) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(account).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_fetch_account(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{id}", self.collection_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `version` must match the server's current version of the account.
    pub fn build_delete_account(&self, id: &str, version: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}?version={version}", self.collection_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Expects 201 and returns the account echoed by the server.
    pub fn parse_create_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response, 201)?;
        decode_account(&response)
    }

    /// Expects 200. The body goes through the builder's decode path and is
    /// validated before it is returned.
    pub fn parse_fetch_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response, 200)?;
        decode_account(&response)
    }

    pub fn parse_delete_account(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }
}

fn decode_account(response: &HttpResponse) -> Result<Account, ApiError> {
    let account = AccountBuilder::from_json(response.body.as_bytes())?.build()?;
    Ok(account)
}

/// Map any status other than `expected` to `ApiError::Remote`.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    warn!(status = response.status, expected, "unexpected response status");
    Err(ApiError::Remote {
        status: response.status,
        body: response.body.clone(),
    })
}
