use super::error::ScoringError;
use crate::scenario::{AccountId, MonthAction};

/// Points for an account paid during the month.
pub const PAID_POINTS: i64 = 1;
/// Points for an account left unpaid (zero or never paid).
pub const MISSED_POINTS: i64 = -2;

fn is_paid(amount: f64) -> bool {
    amount > 0.0
}

/// Replays one month's bill payments against a fixed set of accounts.
///
/// Every account starts the month with a paid amount of zero. Payments
/// overwrite the amount for their account, so the last payment wins.
#[derive(Debug, Clone)]
pub struct MonthEvaluator {
    month: String,
    paid_balances: Vec<(AccountId, f64)>,
}

impl MonthEvaluator {
    pub fn new(month: impl Into<String>, accounts: Vec<AccountId>) -> Self {
        Self {
            month: month.into(),
            paid_balances: accounts.into_iter().map(|a| (a, 0.0)).collect(),
        }
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn pay_bill(&mut self, account: &AccountId, amount: f64) -> Result<(), ScoringError> {
        match self.paid_balances.iter_mut().find(|(a, _)| a == account) {
            Some((_, paid)) => {
                *paid = amount;
                Ok(())
            }
            None => Err(ScoringError::UnknownAccount {
                account: account.to_string(),
                month: self.month.clone(),
            }),
        }
    }

    /// Apply recorded actions in order, stopping at the first unknown account.
    pub fn replay(&mut self, actions: &[MonthAction]) -> Result<(), ScoringError> {
        for action in actions {
            match action {
                MonthAction::PayBill(payment) => self.pay_bill(&payment.account, payment.amount)?,
            }
        }
        Ok(())
    }

    pub fn paid_amount(&self, account: &AccountId) -> Option<f64> {
        self.paid_balances
            .iter()
            .find(|(a, _)| a == account)
            .map(|(_, paid)| *paid)
    }

    pub fn score_contribution(&self) -> i64 {
        self.paid_balances
            .iter()
            .map(|(_, paid)| if is_paid(*paid) { PAID_POINTS } else { MISSED_POINTS })
            .sum()
    }

    pub fn paid_accounts(&self) -> Vec<AccountId> {
        self.paid_balances
            .iter()
            .filter(|(_, paid)| is_paid(*paid))
            .map(|(a, _)| a.clone())
            .collect()
    }

    pub fn missed_accounts(&self) -> Vec<AccountId> {
        self.paid_balances
            .iter()
            .filter(|(_, paid)| !is_paid(*paid))
            .map(|(a, _)| a.clone())
            .collect()
    }
}
