use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::account::{AccountDraft, CashAccount, Owner};
use crate::models::event::{Event, EventDraft};

/// Maximum length for account and event names.
const MAX_NAME_LEN: usize = 100;

/// A single field-level validation failure, suitable for display next
/// to the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating a draft: `is_valid` plus the exhaustive list
/// of violated rules (checks never short-circuit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Structural and business rules for accounts and events.
///
/// Pure functions over drafts — no I/O, never panics. Committed records
/// can be re-checked by converting them back to drafts.
pub struct ValidationService;

impl ValidationService {
    /// Validate a possibly-incomplete account draft. Every violated
    /// rule is reported, not just the first.
    #[must_use]
    pub fn validate_account(draft: &AccountDraft) -> ValidationResult {
        let mut errors = Vec::new();

        match draft.name.as_deref() {
            None => errors.push(FieldError::new("name", "Account name is required")),
            Some(name) if name.trim().is_empty() => {
                errors.push(FieldError::new("name", "Account name is required"));
            }
            Some(name) if name.chars().count() > MAX_NAME_LEN => {
                errors.push(FieldError::new(
                    "name",
                    "Account name must be less than 100 characters",
                ));
            }
            Some(_) => {}
        }

        // Enum membership is carried by the type; only presence is checked here.
        if draft.account_type.is_none() {
            errors.push(FieldError::new("type", "Account type is required"));
        }

        match draft.account_number.as_deref() {
            None => errors.push(FieldError::new(
                "account_number",
                "Account number is required",
            )),
            Some(number) if number.trim().is_empty() => {
                errors.push(FieldError::new(
                    "account_number",
                    "Account number is required",
                ));
            }
            Some(number) => {
                let digits: String = number.chars().filter(|c| *c != '-' && *c != ' ').collect();
                let len = digits.len();
                if !(4..=17).contains(&len) || !digits.chars().all(|c| c.is_ascii_digit()) {
                    errors.push(FieldError::new(
                        "account_number",
                        "Invalid account number format",
                    ));
                }
            }
        }

        Self::check_non_negative_number(
            &mut errors,
            draft.current_balance,
            "current_balance",
            "Current balance",
        );
        Self::check_non_negative_number(
            &mut errors,
            draft.current_inflows,
            "current_inflows",
            "Current inflows",
        );
        Self::check_non_negative_number(
            &mut errors,
            draft.current_outflows,
            "current_outflows",
            "Current outflows",
        );

        match draft.year_end_projected {
            Some(value) if value.is_finite() => {}
            _ => errors.push(FieldError::new(
                "year_end_projected",
                "Year end projection must be a number",
            )),
        }

        if draft
            .owner_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty())
        {
            errors.push(FieldError::new("owner.name", "Owner name is required"));
        }

        ValidationResult::from_errors(errors)
    }

    /// Validate a possibly-incomplete event draft.
    #[must_use]
    pub fn validate_event(draft: &EventDraft) -> ValidationResult {
        let mut errors = Vec::new();

        match draft.name.as_deref() {
            None => errors.push(FieldError::new("name", "Event name is required")),
            Some(name) if name.trim().is_empty() => {
                errors.push(FieldError::new("name", "Event name is required"));
            }
            Some(name) if name.chars().count() > MAX_NAME_LEN => {
                errors.push(FieldError::new(
                    "name",
                    "Event name must be less than 100 characters",
                ));
            }
            Some(_) => {}
        }

        if draft.event_type.is_none() {
            errors.push(FieldError::new("type", "Event type is required"));
        }

        match draft.amount {
            None => errors.push(FieldError::new("amount", "Amount must be a number")),
            Some(amount) if !amount.is_finite() => {
                errors.push(FieldError::new("amount", "Amount must be a number"));
            }
            Some(amount) if amount <= 0.0 => {
                errors.push(FieldError::new("amount", "Amount must be greater than 0"));
            }
            Some(_) => {}
        }

        match draft.date.as_deref() {
            None => errors.push(FieldError::new("date", "Date is required")),
            Some(date) if date.is_empty() => {
                errors.push(FieldError::new("date", "Date is required"));
            }
            Some(date) if !Self::matches_iso_date_shape(date) => {
                errors.push(FieldError::new("date", "Invalid date format (YYYY-MM-DD)"));
            }
            Some(date) if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() => {
                errors.push(FieldError::new("date", "Invalid date"));
            }
            Some(_) => {}
        }

        if draft.progress.is_none() {
            errors.push(FieldError::new("progress", "Progress status is required"));
        }

        ValidationResult::from_errors(errors)
    }

    /// Turn a validated account draft into a committed record with a
    /// fresh id. Field-level sanitization (trimming, separator
    /// stripping, clamping) happens here, and the derived
    /// surplus/deficit is computed from the draft's own flows.
    pub fn commit_account(draft: &AccountDraft) -> Result<CashAccount, Vec<FieldError>> {
        let result = Self::validate_account(draft);
        if !result.is_valid {
            return Err(result.errors);
        }

        let (
            Some(name),
            Some(account_type),
            Some(account_number),
            Some(current_balance),
            Some(current_inflows),
            Some(current_outflows),
            Some(year_end_projected),
            Some(owner_name),
        ) = (
            draft.name.as_deref(),
            draft.account_type,
            draft.account_number.as_deref(),
            draft.current_balance,
            draft.current_inflows,
            draft.current_outflows,
            draft.year_end_projected,
            draft.owner_name.as_deref(),
        )
        else {
            // Unreachable once validation has passed
            return Err(vec![FieldError::new("account", "Incomplete account draft")]);
        };

        Ok(CashAccount {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            account_type,
            account_number: account_number
                .chars()
                .filter(|c| *c != '-' && *c != ' ')
                .collect(),
            current_balance: current_balance.max(0.0),
            current_inflows: current_inflows.max(0.0),
            current_outflows: current_outflows.max(0.0),
            surplus_deficit: 0.0,
            year_end_projected,
            owner: Owner {
                name: owner_name.trim().to_string(),
                avatar: draft
                    .owner_avatar
                    .as_deref()
                    .map(|avatar| avatar.trim().to_string()),
            },
        }
        .derive_surplus())
    }

    /// Turn a validated event draft into a committed record with a
    /// fresh id.
    pub fn commit_event(draft: &EventDraft) -> Result<Event, Vec<FieldError>> {
        let result = Self::validate_event(draft);
        if !result.is_valid {
            return Err(result.errors);
        }

        let (Some(event_type), Some(name), Some(amount), Some(date), Some(progress)) = (
            draft.event_type,
            draft.name.as_deref(),
            draft.amount,
            draft.date.as_deref(),
            draft.progress,
        ) else {
            // Unreachable once validation has passed
            return Err(vec![FieldError::new("event", "Incomplete event draft")]);
        };

        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| vec![FieldError::new("date", "Invalid date")])?;

        Ok(Event {
            id: Uuid::new_v4(),
            event_type,
            name: name.trim().to_string(),
            amount: amount.max(0.0),
            date,
            progress,
        })
    }

    fn check_non_negative_number(
        errors: &mut Vec<FieldError>,
        value: Option<f64>,
        field: &str,
        label: &str,
    ) {
        match value {
            None => errors.push(FieldError::new(field, format!("{label} must be a number"))),
            Some(value) if !value.is_finite() => {
                errors.push(FieldError::new(field, format!("{label} must be a number")));
            }
            Some(value) if value < 0.0 => {
                errors.push(FieldError::new(field, format!("{label} cannot be negative")));
            }
            Some(_) => {}
        }
    }

    /// Literal `YYYY-MM-DD` shape check: ten characters, digits with
    /// hyphens at positions 4 and 7.
    fn matches_iso_date_shape(date: &str) -> bool {
        let bytes = date.as_bytes();
        bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
    }
}
