//! Fluent construction of validated accounts.
//!
//! # Design
//! `AccountBuilder` owns the in-progress `Account`. `new` seeds the required
//! fields and the API's documented defaults; the `with_*` setters overwrite
//! a single field without checking it. All constraints run once, in
//! `build`, which hands the finished account to the caller.

use crate::error::{ApiError, ValidationError};
use crate::types::{
    Account, AccountAttributes, AccountClassification, AccountData, AccountStatus, AccountType,
    NameMatchingStatus,
};
use crate::validation;

pub const DEFAULT_BASE_CURRENCY: &str = "GBP";
pub const DEFAULT_VERSION: i64 = 0;

#[derive(Debug, Clone)]
pub struct AccountBuilder {
    account: Account,
}

impl AccountBuilder {
    /// Start an account from the fields the API requires.
    pub fn new<N, S>(
        id: &str,
        organisation_id: &str,
        bank_id: &str,
        bank_id_code: &str,
        bic: &str,
        country: &str,
        name: N,
    ) -> Self
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes = AccountAttributes {
            account_classification: Some(AccountClassification::Personal),
            bank_id: bank_id.to_string(),
            bank_id_code: bank_id_code.to_string(),
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            bic: bic.to_string(),
            country: Some(country.to_string()),
            joint_account: Some(false),
            name: name.into_iter().map(Into::into).collect(),
            name_matching_status: Some(NameMatchingStatus::Supported),
            ..Default::default()
        };
        Self {
            account: Account {
                data: AccountData {
                    id: id.to_string(),
                    organisation_id: organisation_id.to_string(),
                    kind: AccountType::Accounts,
                    version: Some(DEFAULT_VERSION),
                    attributes: Some(attributes),
                },
            },
        }
    }

    /// Decode a JSON `Account` into builder state. Nothing is validated
    /// until `build`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ApiError> {
        let account: Account =
            serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Self { account })
    }

    pub fn with_version(mut self, version: impl Into<Option<i64>>) -> Self {
        self.account.data.version = version.into();
        self
    }

    pub fn with_account_classification(
        mut self,
        classification: impl Into<Option<AccountClassification>>,
    ) -> Self {
        self.attributes_mut().account_classification = classification.into();
        self
    }

    pub fn with_name_matching_status(
        mut self,
        status: impl Into<Option<NameMatchingStatus>>,
    ) -> Self {
        self.attributes_mut().name_matching_status = status.into();
        self
    }

    pub fn with_account_number(mut self, account_number: &str) -> Self {
        self.attributes_mut().account_number = account_number.to_string();
        self
    }

    pub fn with_alternative_names<N, S>(mut self, names: N) -> Self
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes_mut().alternative_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_base_currency(mut self, currency: &str) -> Self {
        self.attributes_mut().base_currency = currency.to_string();
        self
    }

    pub fn with_iban(mut self, iban: &str) -> Self {
        self.attributes_mut().iban = iban.to_string();
        self
    }

    pub fn with_joint_account(mut self, joint: impl Into<Option<bool>>) -> Self {
        self.attributes_mut().joint_account = joint.into();
        self
    }

    pub fn with_secondary_identification(mut self, identification: &str) -> Self {
        self.attributes_mut().secondary_identification = identification.to_string();
        self
    }

    pub fn with_status(mut self, status: impl Into<Option<AccountStatus>>) -> Self {
        self.attributes_mut().status = status.into();
        self
    }

    /// Validate the whole account and return it.
    pub fn build(self) -> Result<Account, ValidationError> {
        validation::validate(&self.account)?;
        Ok(self.account)
    }

    // A decoded payload may lack attributes; setters create an empty set so
    // `build` reports the missing required fields individually.
    fn attributes_mut(&mut self) -> &mut AccountAttributes {
        self.account.data.attributes.get_or_insert_with(AccountAttributes::default)
    }
}

impl From<Account> for AccountBuilder {
    fn from(account: Account) -> Self {
        Self { account }
    }
}
