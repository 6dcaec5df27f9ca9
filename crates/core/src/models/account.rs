use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of cash account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Checking => write!(f, "checking"),
            AccountType::Savings => write!(f, "savings"),
        }
    }
}

/// The person an account belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    /// Display name, non-empty after trimming
    pub name: String,

    /// Optional avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A cash-holding account with its balance and monthly flow figures.
///
/// `surplus_deficit` is derived (inflows minus outflows). The store
/// recomputes it on every write — incoming values are never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashAccount {
    /// Unique identifier, immutable after creation
    pub id: Uuid,

    /// Display label (e.g., "Ally Checking-5678")
    pub name: String,

    /// Checking or savings
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Digit string, 4–17 digits once separators are stripped
    pub account_number: String,

    /// Current balance, non-negative
    pub current_balance: f64,

    /// Monthly inflows, non-negative
    pub current_inflows: f64,

    /// Monthly outflows, non-negative
    pub current_outflows: f64,

    /// Derived: inflows − outflows
    pub surplus_deficit: f64,

    /// Projected year-end balance, any sign
    pub year_end_projected: f64,

    pub owner: Owner,
}

impl CashAccount {
    /// Recompute the derived surplus/deficit from the account's own flows.
    pub fn derive_surplus(mut self) -> Self {
        self.surplus_deficit = self.current_inflows - self.current_outflows;
        self
    }
}

/// Partially-filled account as it exists during form entry.
///
/// Every field is optional; `ValidationService::commit_account` is the
/// only way to turn a draft into a committed [`CashAccount`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountDraft {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
    pub account_number: Option<String>,
    pub current_balance: Option<f64>,
    pub current_inflows: Option<f64>,
    pub current_outflows: Option<f64>,
    pub year_end_projected: Option<f64>,
    pub owner_name: Option<String>,
    pub owner_avatar: Option<String>,
}

impl From<&CashAccount> for AccountDraft {
    fn from(account: &CashAccount) -> Self {
        Self {
            name: Some(account.name.clone()),
            account_type: Some(account.account_type),
            account_number: Some(account.account_number.clone()),
            current_balance: Some(account.current_balance),
            current_inflows: Some(account.current_inflows),
            current_outflows: Some(account.current_outflows),
            year_end_projected: Some(account.year_end_projected),
            owner_name: Some(account.owner.name.clone()),
            owner_avatar: account.owner.avatar.clone(),
        }
    }
}
