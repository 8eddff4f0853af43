//! Account resource DTOs.
//!
//! # Design
//! Fields that the remote API treats as "pointer" values (set vs. unset
//! matters) are `Option`s; plain strings and lists use their empty value as
//! "absent". Both are omitted from the JSON encoding when absent, so an
//! explicitly set `version: Some(0)` is still sent while `None` is not.
//!
//! Identifiers stay `String` rather than `Uuid`: a malformed id must surface
//! as a validation violation from `AccountBuilder::build`, not as a decode
//! failure.

use serde::{Deserialize, Serialize};

/// Root envelope for the account resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub data: AccountData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountData {
    pub id: String,
    pub organisation_id: String,
    #[serde(rename = "type")]
    pub kind: AccountType,
    /// Optimistic concurrency token; required on delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AccountAttributes>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_classification: Option<AccountClassification>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_number: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_id_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_currency: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Accepted as-is; no format check is applied client-side.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_account: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_matching_status: Option<NameMatchingStatus>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secondary_identification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
}

/// The only resource type this API serves.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountType {
    #[default]
    #[serde(rename = "accounts")]
    Accounts,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountClassification {
    #[default]
    Personal,
    Business,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NameMatchingStatus {
    #[default]
    Supported,
    NotSupported,
    OptedOut,
    Switched,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Pending,
    Failed,
    Confirmed,
    Closed,
}

impl Account {
    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn version(&self) -> Option<i64> {
        self.data.version
    }

    pub fn attributes(&self) -> Option<&AccountAttributes> {
        self.data.attributes.as_ref()
    }
}
