use crate::models::account::{CashAccount, Owner};
use crate::models::document::StorageDocument;
use crate::models::event::Event;

/// Normalizes records before they are trusted: trims strings, strips
/// account-number separators, clamps money fields to zero.
///
/// Pure and idempotent — sanitizing twice is the same as sanitizing
/// once. Not a substitute for validation; records are assumed to be
/// structurally complete.
pub struct SanitizeService;

impl SanitizeService {
    pub fn sanitize_account(account: CashAccount) -> CashAccount {
        CashAccount {
            name: account.name.trim().to_string(),
            account_number: account
                .account_number
                .chars()
                .filter(|c| *c != '-' && *c != ' ')
                .collect(),
            current_balance: account.current_balance.max(0.0),
            current_inflows: account.current_inflows.max(0.0),
            current_outflows: account.current_outflows.max(0.0),
            owner: Owner {
                name: account.owner.name.trim().to_string(),
                avatar: account
                    .owner
                    .avatar
                    .as_deref()
                    .map(|avatar| avatar.trim().to_string()),
            },
            ..account
        }
    }

    pub fn sanitize_event(event: Event) -> Event {
        Event {
            name: event.name.trim().to_string(),
            amount: event.amount.max(0.0),
            ..event
        }
    }

    /// Sanitize both collections of a document in one pass.
    pub fn sanitize_document(document: StorageDocument) -> StorageDocument {
        StorageDocument {
            accounts: document
                .accounts
                .into_iter()
                .map(Self::sanitize_account)
                .collect(),
            events: document
                .events
                .into_iter()
                .map(Self::sanitize_event)
                .collect(),
            ..document
        }
    }
}
