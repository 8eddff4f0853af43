//! Field constraints for the account resource.
//!
//! # Design
//! Every constraint is checked on every call; nothing short-circuits, so a
//! single `ValidationError` lists all offending fields at once. An empty
//! required value reports `Required` only, since the format checks on an
//! empty string carry no extra information.

use std::fmt;

use iso_currency::Currency;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::types::{Account, AccountAttributes};

const MAX_ACCOUNT_NUMBER: usize = 64;
const MAX_ALTERNATIVE_NAMES: usize = 3;
const MAX_BANK_ID: usize = 11;
const MAX_BANK_ID_CODE: usize = 16;
const BIC_LENGTHS: &[usize] = &[8, 11];
const COUNTRY_LENGTHS: &[usize] = &[2];
const MAX_NAMES: usize = 4;
const MAX_NAME_LENGTH: usize = 140;
const MAX_SECONDARY_IDENTIFICATION: usize = 140;

/// A validated field, displayed as its JSON path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    OrganisationId,
    Version,
    Attributes,
    AccountNumber,
    AlternativeNames,
    BankId,
    BankIdCode,
    BaseCurrency,
    Bic,
    Country,
    Name,
    SecondaryIdentification,
}

impl Field {
    pub fn path(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::OrganisationId => "organisation_id",
            Field::Version => "version",
            Field::Attributes => "attributes",
            Field::AccountNumber => "attributes.account_number",
            Field::AlternativeNames => "attributes.alternative_names",
            Field::BankId => "attributes.bank_id",
            Field::BankIdCode => "attributes.bank_id_code",
            Field::BaseCurrency => "attributes.base_currency",
            Field::Bic => "attributes.bic",
            Field::Country => "attributes.country",
            Field::Name => "attributes.name",
            Field::SecondaryIdentification => "attributes.secondary_identification",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The rule a field failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Required,
    Uuid,
    Alphanumeric,
    MaxLength(usize),
    LengthOneOf(&'static [usize]),
    MaxItems(usize),
    /// Every entry of a list must have a length within `min..=max`.
    ItemLength { min: usize, max: usize },
    Min(i64),
    Iso4217,
    Iso3166Alpha2,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Required => write!(f, "is required"),
            Constraint::Uuid => write!(f, "must be a UUID"),
            Constraint::Alphanumeric => write!(f, "must be alphanumeric"),
            Constraint::MaxLength(max) => write!(f, "must be at most {max} characters"),
            Constraint::LengthOneOf(lengths) => {
                let lengths: Vec<String> = lengths.iter().map(ToString::to_string).collect();
                write!(f, "must be {} characters long", lengths.join(" or "))
            }
            Constraint::MaxItems(max) => write!(f, "must have at most {max} entries"),
            Constraint::ItemLength { min, max } => {
                write!(f, "entries must be {min} to {max} characters long")
            }
            Constraint::Min(min) => write!(f, "must be at least {min}"),
            Constraint::Iso4217 => write!(f, "must be an ISO 4217 currency code"),
            Constraint::Iso3166Alpha2 => write!(f, "must be an ISO 3166-1 alpha-2 country code"),
        }
    }
}

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub constraint: Constraint,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.constraint)
    }
}

/// Check `account` against the full constraint table.
pub fn validate(account: &Account) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    let data = &account.data;

    check_uuid(&mut violations, Field::Id, &data.id);
    check_uuid(&mut violations, Field::OrganisationId, &data.organisation_id);

    if let Some(version) = data.version {
        if version < 0 {
            violations.push(violation(Field::Version, Constraint::Min(0)));
        }
    }

    match &data.attributes {
        Some(attributes) => check_attributes(&mut violations, attributes),
        None => violations.push(violation(Field::Attributes, Constraint::Required)),
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}

fn check_attributes(violations: &mut Vec<Violation>, attributes: &AccountAttributes) {
    if !attributes.account_number.is_empty() {
        check_alphanumeric(violations, Field::AccountNumber, &attributes.account_number, MAX_ACCOUNT_NUMBER);
    }

    if attributes.alternative_names.len() > MAX_ALTERNATIVE_NAMES {
        violations.push(violation(Field::AlternativeNames, Constraint::MaxItems(MAX_ALTERNATIVE_NAMES)));
    }
    check_item_lengths(violations, Field::AlternativeNames, &attributes.alternative_names);

    check_required_alphanumeric(violations, Field::BankId, &attributes.bank_id, MAX_BANK_ID);
    check_required_alphanumeric(violations, Field::BankIdCode, &attributes.bank_id_code, MAX_BANK_ID_CODE);

    if Currency::from_code(&attributes.base_currency).is_none() {
        violations.push(violation(Field::BaseCurrency, Constraint::Iso4217));
    }

    if attributes.bic.is_empty() {
        violations.push(violation(Field::Bic, Constraint::Required));
    } else {
        if !is_alphanumeric(&attributes.bic) {
            violations.push(violation(Field::Bic, Constraint::Alphanumeric));
        }
        if !BIC_LENGTHS.contains(&char_len(&attributes.bic)) {
            violations.push(violation(Field::Bic, Constraint::LengthOneOf(BIC_LENGTHS)));
        }
    }

    match attributes.country.as_deref() {
        None | Some("") => violations.push(violation(Field::Country, Constraint::Required)),
        Some(country) => {
            if !COUNTRY_LENGTHS.contains(&char_len(country)) {
                violations.push(violation(Field::Country, Constraint::LengthOneOf(COUNTRY_LENGTHS)));
            }
            if !is_country_code(country) {
                violations.push(violation(Field::Country, Constraint::Iso3166Alpha2));
            }
        }
    }

    if attributes.name.is_empty() {
        violations.push(violation(Field::Name, Constraint::Required));
    } else if attributes.name.len() > MAX_NAMES {
        violations.push(violation(Field::Name, Constraint::MaxItems(MAX_NAMES)));
    }
    check_item_lengths(violations, Field::Name, &attributes.name);

    if char_len(&attributes.secondary_identification) > MAX_SECONDARY_IDENTIFICATION {
        violations.push(violation(
            Field::SecondaryIdentification,
            Constraint::MaxLength(MAX_SECONDARY_IDENTIFICATION),
        ));
    }
}

fn check_uuid(violations: &mut Vec<Violation>, field: Field, value: &str) {
    if value.is_empty() {
        violations.push(violation(field, Constraint::Required));
    } else if !is_uuid(value) {
        violations.push(violation(field, Constraint::Uuid));
    }
}

fn check_required_alphanumeric(violations: &mut Vec<Violation>, field: Field, value: &str, max: usize) {
    if value.is_empty() {
        violations.push(violation(field, Constraint::Required));
    } else {
        check_alphanumeric(violations, field, value, max);
    }
}

fn check_alphanumeric(violations: &mut Vec<Violation>, field: Field, value: &str, max: usize) {
    if !is_alphanumeric(value) {
        violations.push(violation(field, Constraint::Alphanumeric));
    }
    if char_len(value) > max {
        violations.push(violation(field, Constraint::MaxLength(max)));
    }
}

fn check_item_lengths(violations: &mut Vec<Violation>, field: Field, items: &[String]) {
    let out_of_range = items
        .iter()
        .map(|item| char_len(item))
        .any(|len| !(1..=MAX_NAME_LENGTH).contains(&len));
    if out_of_range {
        violations.push(violation(field, Constraint::ItemLength { min: 1, max: MAX_NAME_LENGTH }));
    }
}

fn violation(field: Field, constraint: Constraint) -> Violation {
    Violation { field, constraint }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn is_alphanumeric(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Hyphenated form only; `Uuid::parse_str` alone also accepts simple, braced
/// and URN spellings.
pub fn is_uuid(value: &str) -> bool {
    value.len() == 36 && Uuid::parse_str(value).is_ok()
}

pub fn is_country_code(value: &str) -> bool {
    COUNTRY_CODES.binary_search(&value).is_ok()
}

/// ISO 3166-1 alpha-2 codes, sorted.
const COUNTRY_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];
