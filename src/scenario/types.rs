use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a billable account. Identity is by string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for AccountId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A bill paid (or missed) against an account.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BillPayment {
    pub account: AccountId,
    pub amount: f64,
}

impl BillPayment {
    pub fn new(account: impl Into<AccountId>, amount: f64) -> Self {
        Self {
            account: account.into(),
            amount,
        }
    }
}

/// An action recorded inside a month block. Recorded actions are only
/// replayed when the scenario is scored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthAction {
    PayBill(BillPayment),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MonthBlock {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<MonthAction>,
}

/// A top-level scenario action.
///
/// Example YAML:
/// ```yaml
/// - declare_account: electric
/// - month:
///     name: january
///     actions:
///       - pay_bill: { account: electric, amount: 34.12 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioAction {
    DeclareAccount(AccountId),
    Month(MonthBlock),
}

/// Ordered script of top-level actions describing one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Scenario {
    pub actions: Vec<ScenarioAction>,
}

impl Scenario {
    pub fn new(actions: Vec<ScenarioAction>) -> Self {
        Self { actions }
    }

    pub fn month_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, ScenarioAction::Month(_)))
            .count()
    }

    pub fn declared_account_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, ScenarioAction::DeclareAccount(_)))
            .count()
    }
}

/// Event for the flat (non-monthly) scorer.
///
/// Example YAML:
/// ```yaml
/// - pay_bill: { account: electric, amount: 34.12 }
/// - awarded_credit: 10000.00
/// - missed_payment: { account: phone, amount: 104.23 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleEvent {
    PayBill(BillPayment),
    AwardedCredit(f64),
    MissedPayment(BillPayment),
}
