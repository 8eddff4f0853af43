//! Client core for the organisation account API.
//!
//! # Overview
//! `AccountBuilder` produces validated `Account` payloads; `AccountsApi`
//! creates, fetches and deletes them, one HTTP round trip per call.
//!
//! # Design
//! - Construction is all-or-nothing: setters never validate, `build` checks
//!   every constraint and reports every violation.
//! - `AccountClient` is stateless and I/O-free. It splits each operation into
//!   `build_*` (produces a request) and `parse_*` (maps a response status to
//!   a result), so the I/O boundary sits in `Transport` alone.
//! - Non-success statuses become `ApiError::Remote` with the status and body;
//!   nothing is retried.

pub mod api;
pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod validation;

pub use api::AccountsApi;
pub use builder::AccountBuilder;
pub use client::AccountClient;
pub use config::ClientConfig;
pub use error::{ApiError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Account, AccountAttributes, AccountClassification, AccountData, AccountStatus, AccountType,
    NameMatchingStatus,
};
pub use validation::{Constraint, Field, Violation};
