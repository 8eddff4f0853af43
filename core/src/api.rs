//! One-call operations on the account resource.
//!
//! Each method builds a request with `AccountClient`, runs it once through
//! the `Transport`, and parses the response. Nothing is retried or cached.

use tracing::debug;

use crate::client::AccountClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::Account;

#[derive(Debug, Clone)]
pub struct AccountsApi<T = UreqTransport> {
    client: AccountClient,
    transport: T,
}

impl AccountsApi<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }
}

impl<T: Transport> AccountsApi<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: AccountClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &AccountClient {
        &self.client
    }

    /// Submit an account; succeeds on 201 with the server's copy.
    pub fn create(&self, account: &Account) -> Result<Account, ApiError> {
        let request = self.client.build_create_account(account)?;
        let response = self.send(request)?;
        self.client.parse_create_account(response)
    }

    /// Fetch an account by id; succeeds on 200.
    pub fn fetch(&self, id: &str) -> Result<Account, ApiError> {
        let response = self.send(self.client.build_fetch_account(id))?;
        self.client.parse_fetch_account(response)
    }

    /// Delete an account at `version`; 404 and 409 surface as
    /// `ApiError::Remote`.
    pub fn delete(&self, id: &str, version: i64) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_account(id, version))?;
        self.client.parse_delete_account(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::builder::AccountBuilder;
    use crate::http::HttpMethod;

    /// Replays canned responses and records the requests it saw.
    struct Scripted {
        responses: RefCell<Vec<Result<HttpResponse, ApiError>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            self.responses.borrow_mut().remove(0)
        }
    }

    fn account() -> Account {
        AccountBuilder::new(
            "ad27e265-9605-4b4b-a0e5-3003ea9cc4dc",
            "eb0bd6f5-c3f5-44b2-b677-acd23cdde73c",
            "400300",
            "GBDSC",
            "NWBKGB22",
            "GB",
            ["Paul"],
        )
        .build()
        .unwrap()
    }

    #[test]
    fn create_sends_one_post() {
        let body = serde_json::to_string(&account()).unwrap();
        let api = AccountsApi::with_transport("http://api", Scripted::new(vec![Ok(HttpResponse::new(201, body))]));
        let created = api.create(&account()).unwrap();
        assert_eq!(created, account());

        let seen = api.transport.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Post);
    }

    #[test]
    fn transport_errors_are_not_retried() {
        let api = AccountsApi::with_transport(
            "http://api",
            Scripted::new(vec![Err(ApiError::Transport("connection refused".to_string()))]),
        );
        let err = api.fetch("ad27e265-9605-4b4b-a0e5-3003ea9cc4dc").unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(api.transport.seen.borrow().len(), 1);
    }

    #[test]
    fn delete_conflict_surfaces_status() {
        let api = AccountsApi::with_transport("http://api", Scripted::new(vec![Ok(HttpResponse::new(409, ""))]));
        let err = api.delete("ad27e265-9605-4b4b-a0e5-3003ea9cc4dc", 7).unwrap_err();
        assert!(err.is_conflict());
        assert!(api.transport.seen.borrow()[0].path.ends_with("?version=7"));
    }
}
