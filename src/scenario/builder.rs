use super::types::{AccountId, BillPayment, MonthAction, MonthBlock, Scenario, ScenarioAction};

/// Fluent construction of a [`Scenario`] in script order.
///
/// ```
/// use credit_sim::scenario::ScenarioBuilder;
///
/// let scenario = ScenarioBuilder::new()
///     .declare_account("electric")
///     .month("january", |m| m.pay_bill("electric", 34.12))
///     .build();
/// assert_eq!(scenario.actions.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ScenarioBuilder {
    actions: Vec<ScenarioAction>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_account(mut self, name: impl Into<AccountId>) -> Self {
        self.actions.push(ScenarioAction::DeclareAccount(name.into()));
        self
    }

    /// Record a month block. The closure only collects the month's actions;
    /// nothing is evaluated until the scenario is scored.
    pub fn month<F>(mut self, name: impl Into<String>, actions: F) -> Self
    where
        F: FnOnce(MonthBuilder) -> MonthBuilder,
    {
        let month = actions(MonthBuilder::default());
        self.actions.push(ScenarioAction::Month(MonthBlock {
            name: name.into(),
            actions: month.actions,
        }));
        self
    }

    pub fn build(self) -> Scenario {
        Scenario::new(self.actions)
    }
}

#[derive(Debug, Default)]
pub struct MonthBuilder {
    actions: Vec<MonthAction>,
}

impl MonthBuilder {
    pub fn pay_bill(mut self, account: impl Into<AccountId>, amount: f64) -> Self {
        self.actions
            .push(MonthAction::PayBill(BillPayment::new(account, amount)));
        self
    }
}
