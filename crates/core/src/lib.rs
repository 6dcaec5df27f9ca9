pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use tracing::error;
use uuid::Uuid;

use models::account::{AccountType, CashAccount, Owner};
use models::chart::ProjectedBalance;
use models::document::DocumentPatch;
use models::event::{Event, EventDraft, EventProgress, EventType};
use services::projection_service::ProjectionService;
use services::validation_service::{FieldError, ValidationService};
use storage::manager::StorageService;

/// Main entry point for the cash-flow core library.
///
/// Owns the single in-memory copy of accounts and events plus the
/// derived totals, and is the only mutation path. Every mutation
/// sanitizes and validates through the services, writes through to the
/// injected [`StorageService`], and recomputes the totals. UI
/// collaborators read state through the getters and never write
/// directly.
///
/// A persistence failure after a mutation is reported via [`error`]
/// but does not roll the in-memory change back; memory and durable
/// state reconcile on the next [`initialize`].
///
/// [`error`]: CashFlowStore::error
/// [`initialize`]: CashFlowStore::initialize
#[must_use]
pub struct CashFlowStore {
    accounts: Vec<CashAccount>,
    events: Vec<Event>,
    total_balance: f64,
    total_earmarked: f64,
    total_inflows: f64,
    total_outflows: f64,
    surplus_deficit: f64,
    is_loading: bool,
    error: Option<String>,
    validation_errors: Vec<FieldError>,
    storage: StorageService,
}

impl std::fmt::Debug for CashFlowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CashFlowStore")
            .field("accounts", &self.accounts.len())
            .field("events", &self.events.len())
            .field("total_balance", &self.total_balance)
            .field("is_loading", &self.is_loading)
            .field("error", &self.error)
            .finish()
    }
}

impl CashFlowStore {
    /// Create a store over the given persistence layer. The store
    /// starts in the loading state until [`initialize`] completes.
    ///
    /// [`initialize`]: CashFlowStore::initialize
    pub fn new(storage: StorageService) -> Self {
        Self {
            accounts: Vec::new(),
            events: Vec::new(),
            total_balance: 0.0,
            total_earmarked: 0.0,
            total_inflows: 0.0,
            total_outflows: 0.0,
            surplus_deficit: 0.0,
            is_loading: true,
            error: None,
            validation_errors: Vec::new(),
            storage,
        }
    }

    /// Store backed by a fresh in-memory substrate (tests, demos).
    pub fn in_memory() -> Self {
        Self::new(StorageService::in_memory())
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Load the persisted document and publish it. If the store has
    /// never been populated, a built-in demo data set is seeded and
    /// persisted. Intended to be called exactly once per session.
    pub async fn initialize(&mut self) {
        self.is_loading = true;
        self.error = None;

        let mut data = self.storage.load_data().await;

        if data.accounts.is_empty() && data.events.is_empty() {
            data.accounts = demo_accounts();
            data.events = demo_events();
            let patch = DocumentPatch {
                accounts: Some(data.accounts.clone()),
                events: Some(data.events.clone()),
            };
            if let Err(e) = self.storage.save_data(patch).await {
                error!("failed to persist demo data: {e}");
                self.error = Some("Failed to initialize data".to_string());
            }
        }

        self.accounts = data
            .accounts
            .into_iter()
            .map(CashAccount::derive_surplus)
            .collect();
        self.events = data.events;
        self.is_loading = false;
        self.recalculate_totals();
    }

    // ── Account Management ──────────────────────────────────────────

    /// Wholesale replace of the account list. Per-account
    /// surplus/deficit is re-derived before anything is trusted.
    pub async fn set_accounts(&mut self, accounts: Vec<CashAccount>) {
        self.accounts = accounts
            .into_iter()
            .map(CashAccount::derive_surplus)
            .collect();
        self.persist_accounts("Failed to save accounts").await;
        self.recalculate_totals();
    }

    /// Replace the account with the same id in place. Unknown ids are
    /// a silent no-op.
    pub async fn update_account(&mut self, account: CashAccount) {
        let account = account.derive_surplus();
        if let Some(existing) = self.accounts.iter_mut().find(|a| a.id == account.id) {
            *existing = account;
        }
        self.persist_accounts("Failed to update account").await;
        self.recalculate_totals();
    }

    /// Remove the account with the given id. Unknown ids are a silent
    /// no-op.
    pub async fn delete_account(&mut self, account_id: Uuid) {
        self.accounts.retain(|a| a.id != account_id);
        self.persist_accounts("Failed to delete account").await;
        self.recalculate_totals();
    }

    // ── Event Management ────────────────────────────────────────────

    /// Wholesale replace of the event list.
    pub async fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.persist_events("Failed to save events").await;
        self.recalculate_totals();
    }

    /// Validate and append a new event from form input.
    ///
    /// An invalid draft publishes its field errors and touches nothing
    /// else — no account, event, or total changes. A valid draft is
    /// sanitized, given a fresh id, appended, and persisted, and any
    /// pending validation errors are cleared.
    pub async fn add_event(&mut self, draft: EventDraft) {
        match ValidationService::commit_event(&draft) {
            Ok(event) => {
                self.events.push(event);
                self.validation_errors.clear();
                self.persist_events("Failed to add event").await;
                self.recalculate_totals();
            }
            Err(errors) => {
                self.validation_errors = errors;
            }
        }
    }

    /// Replace the event with the same id in place. Unknown ids are a
    /// silent no-op. Unlike [`add_event`], the incoming record is not
    /// re-validated.
    ///
    /// [`add_event`]: CashFlowStore::add_event
    pub async fn update_event(&mut self, event: Event) {
        if let Some(existing) = self.events.iter_mut().find(|e| e.id == event.id) {
            *existing = event;
        }
        self.persist_events("Failed to update event").await;
        self.recalculate_totals();
    }

    /// Remove the event with the given id. Unknown ids are a silent
    /// no-op.
    pub async fn delete_event(&mut self, event_id: Uuid) {
        self.events.retain(|e| e.id != event_id);
        self.persist_events("Failed to delete event").await;
        self.recalculate_totals();
    }

    // ── Derived State ───────────────────────────────────────────────

    /// Recompute the five derived totals from the current in-memory
    /// accounts and events. No other side effects.
    pub fn recalculate_totals(&mut self) {
        self.total_balance = self.accounts.iter().map(|a| a.current_balance).sum();
        self.total_earmarked = self.events.iter().map(|e| e.amount).sum();
        self.total_inflows = self.accounts.iter().map(|a| a.current_inflows).sum();
        self.total_outflows = self.accounts.iter().map(|a| a.current_outflows).sum();
        self.surplus_deficit = self.total_inflows - self.total_outflows;
    }

    /// Drop any pending field-level validation errors.
    pub fn clear_validation_errors(&mut self) {
        self.validation_errors.clear();
    }

    /// Projected monthly series for the aggregate balance: starts from
    /// the total balance, applies the aggregate surplus/deficit each
    /// month, and subtracts every event in the month it falls.
    #[must_use]
    pub fn project_total_balance(&self, horizon_months: u32) -> Vec<ProjectedBalance> {
        ProjectionService::project_balances(
            self.total_balance,
            self.surplus_deficit,
            &self.events,
            horizon_months,
        )
    }

    // ── Read Access ─────────────────────────────────────────────────

    #[must_use]
    pub fn accounts(&self) -> &[CashAccount] {
        &self.accounts
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn total_balance(&self) -> f64 {
        self.total_balance
    }

    /// Sum of target amounts across all events — funds conceptually
    /// reserved for planned goals.
    #[must_use]
    pub fn total_earmarked(&self) -> f64 {
        self.total_earmarked
    }

    #[must_use]
    pub fn total_inflows(&self) -> f64 {
        self.total_inflows
    }

    #[must_use]
    pub fn total_outflows(&self) -> f64 {
        self.total_outflows
    }

    /// Aggregate inflows minus outflows.
    #[must_use]
    pub fn surplus_deficit(&self) -> f64 {
        self.surplus_deficit
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn validation_errors(&self) -> &[FieldError] {
        &self.validation_errors
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn persist_accounts(&mut self, failure_message: &str) {
        let patch = DocumentPatch::accounts(self.accounts.clone());
        if let Err(e) = self.storage.save_data(patch).await {
            error!("{failure_message}: {e}");
            self.error = Some(failure_message.to_string());
        }
    }

    async fn persist_events(&mut self, failure_message: &str) {
        let patch = DocumentPatch::events(self.events.clone());
        if let Err(e) = self.storage.save_data(patch).await {
            error!("{failure_message}: {e}");
            self.error = Some(failure_message.to_string());
        }
    }
}

// ── Demo Seed Data ──────────────────────────────────────────────────

const DEMO_OWNER: &str = "Colin Overcash";
const DEMO_AVATAR: &str = "https://ui-avatars.com/api/?name=Colin+Overcash";

fn demo_account(name: &str, account_type: AccountType) -> CashAccount {
    CashAccount {
        id: Uuid::new_v4(),
        name: name.to_string(),
        account_type,
        account_number: "5678".to_string(),
        current_balance: 12000.0,
        current_inflows: 5202.0,
        current_outflows: 3202.0,
        surplus_deficit: 0.0,
        year_end_projected: 20999.0,
        owner: Owner {
            name: DEMO_OWNER.to_string(),
            avatar: Some(DEMO_AVATAR.to_string()),
        },
    }
    .derive_surplus()
}

fn demo_event(event_type: EventType, name: &str, date: NaiveDate, progress: EventProgress) -> Event {
    Event {
        id: Uuid::new_v4(),
        event_type,
        name: name.to_string(),
        amount: 20000.0,
        date,
        progress,
    }
}

fn demo_accounts() -> Vec<CashAccount> {
    vec![
        demo_account("Ally Checking-5678", AccountType::Checking),
        demo_account("Chase Savings-5678", AccountType::Savings),
    ]
}

fn demo_events() -> Vec<Event> {
    vec![
        demo_event(
            EventType::EmergencySavings,
            "Emergency Fund",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
            EventProgress::OnTrack,
        ),
        demo_event(
            EventType::Sabbatical,
            "Summer Break",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default(),
            EventProgress::OffTrack,
        ),
        demo_event(
            EventType::Vacation,
            "Thanksgiving Family Vacation",
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap_or_default(),
            EventProgress::OffTrack,
        ),
    ]
}
