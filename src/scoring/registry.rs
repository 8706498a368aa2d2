use crate::scenario::AccountId;

/// Ordered, append-only set of declared accounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountRegistry {
    accounts: Vec<AccountId>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an account if it is not already known.
    /// Returns false when the account was already declared (no-op).
    pub fn declare(&mut self, account: AccountId) -> bool {
        if self.contains(&account) {
            return false;
        }
        self.accounts.push(account);
        true
    }

    pub fn contains(&self, account: &AccountId) -> bool {
        self.accounts.iter().any(|a| a == account)
    }

    /// Point-in-time copy of the declared accounts, in declaration order.
    pub fn snapshot(&self) -> Vec<AccountId> {
        self.accounts.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountId> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
