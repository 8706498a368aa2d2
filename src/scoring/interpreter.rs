use serde::Serialize;
use std::fmt;

use super::error::ScoringError;
use super::month::MonthEvaluator;
use super::registry::AccountRegistry;
use crate::scenario::{AccountId, MonthAction, Scenario, ScenarioAction};

/// Lifecycle of a [`ScenarioInterpreter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting account declarations and month blocks.
    Building,
    /// Script finished; only scoring is allowed.
    Scored,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Building => f.write_str("building"),
            Phase::Scored => f.write_str("scored"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthScore {
    pub name: String,
    pub contribution: i64,
    pub paid: Vec<AccountId>,
    pub missed: Vec<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub total: i64,
    pub months: Vec<MonthScore>,
}

#[derive(Debug, Clone)]
struct RecordedMonth {
    name: String,
    actions: Vec<MonthAction>,
}

/// Executes a scenario script and scores it.
///
/// Account declarations take effect immediately. Month blocks are only
/// recorded; at scoring time each month is replayed against the *final*
/// set of declared accounts, so an account declared after a month block
/// still counts towards that month (as a miss unless the month paid it).
#[derive(Debug, Clone)]
pub struct ScenarioInterpreter {
    phase: Phase,
    registry: AccountRegistry,
    months: Vec<RecordedMonth>,
    warnings: Vec<String>,
}

impl Default for ScenarioInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioInterpreter {
    pub fn new() -> Self {
        Self {
            phase: Phase::Building,
            registry: AccountRegistry::new(),
            months: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    /// Month names in evaluation order.
    pub fn month_names(&self) -> Vec<&str> {
        self.months.iter().map(|m| m.name.as_str()).collect()
    }

    /// Non-fatal notes collected while running (duplicate accounts, redefined months).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn ensure_building(&self, operation: &'static str) -> Result<(), ScoringError> {
        match self.phase {
            Phase::Building => Ok(()),
            Phase::Scored => Err(ScoringError::out_of_order(operation, self.phase)),
        }
    }

    fn ensure_scored(&self, operation: &'static str) -> Result<(), ScoringError> {
        match self.phase {
            Phase::Scored => Ok(()),
            Phase::Building => Err(ScoringError::out_of_order(operation, self.phase)),
        }
    }

    pub fn declare_account(&mut self, account: AccountId) -> Result<(), ScoringError> {
        self.ensure_building("declare_account")?;
        if !self.registry.declare(account.clone()) {
            self.warnings
                .push(format!("account '{}' declared more than once", account));
        }
        Ok(())
    }

    /// Record a month's actions without executing them.
    ///
    /// Redefining a month replaces its actions but keeps the position of
    /// its first declaration in the evaluation order.
    pub fn begin_month(
        &mut self,
        name: impl Into<String>,
        actions: Vec<MonthAction>,
    ) -> Result<(), ScoringError> {
        self.ensure_building("begin_month")?;
        let name = name.into();
        match self.months.iter_mut().find(|m| m.name == name) {
            Some(existing) => {
                self.warnings.push(format!(
                    "month '{}' redefined, later actions replace earlier ones",
                    name
                ));
                existing.actions = actions;
            }
            None => self.months.push(RecordedMonth { name, actions }),
        }
        Ok(())
    }

    /// Close the script. After this only scoring is allowed.
    pub fn finish(&mut self) -> Result<(), ScoringError> {
        self.ensure_building("finish")?;
        self.phase = Phase::Scored;
        Ok(())
    }

    /// Execute every top-level action in script order, then close the script.
    pub fn run(&mut self, scenario: &Scenario) -> Result<(), ScoringError> {
        self.ensure_building("run")?;
        for action in &scenario.actions {
            match action {
                ScenarioAction::DeclareAccount(account) => self.declare_account(account.clone())?,
                ScenarioAction::Month(block) => {
                    self.begin_month(block.name.clone(), block.actions.clone())?
                }
            }
        }
        self.finish()
    }

    fn evaluate_months(&self) -> impl Iterator<Item = Result<MonthEvaluator, ScoringError>> + '_ {
        let accounts = self.registry.snapshot();
        self.months.iter().map(move |recorded| {
            let mut evaluator = MonthEvaluator::new(recorded.name.clone(), accounts.clone());
            evaluator.replay(&recorded.actions)?;
            Ok(evaluator)
        })
    }

    /// Sum of every month's contribution. Pure over the recorded months
    /// and the final account registry, so repeated calls agree.
    pub fn total_score(&self) -> Result<i64, ScoringError> {
        self.ensure_scored("total_score")?;
        let mut total = 0;
        for evaluator in self.evaluate_months() {
            total += evaluator?.score_contribution();
        }
        Ok(total)
    }

    /// Same pass as [`total_score`](Self::total_score), keeping the per-month breakdown.
    pub fn score_report(&self) -> Result<ScoreReport, ScoringError> {
        self.ensure_scored("score_report")?;
        let months = self
            .evaluate_months()
            .map(|evaluator| {
                let evaluator = evaluator?;
                Ok(MonthScore {
                    name: evaluator.month().to_string(),
                    contribution: evaluator.score_contribution(),
                    paid: evaluator.paid_accounts(),
                    missed: evaluator.missed_accounts(),
                })
            })
            .collect::<Result<Vec<_>, ScoringError>>()?;

        Ok(ScoreReport {
            total: months.iter().map(|m| m.contribution).sum(),
            months,
        })
    }
}

/// Run a scenario on a fresh interpreter and return its total score.
pub fn simulate(scenario: &Scenario) -> Result<i64, ScoringError> {
    let mut interpreter = ScenarioInterpreter::new();
    interpreter.run(scenario)?;
    interpreter.total_score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{BillPayment, ScenarioBuilder};

    fn scenario_a() -> ScenarioBuilder {
        ScenarioBuilder::new()
            .declare_account("electric")
            .declare_account("gas")
            .month("january", |m| {
                m.pay_bill("electric", 34.12)
                    .pay_bill("gas", 16.54)
                    .pay_bill("cable", 106.41)
            })
            .month("february", |m| m.pay_bill("electric", 34.12).pay_bill("gas", 16.54))
    }

    #[test]
    fn test_scenario_scores_three() {
        let scenario = scenario_a().declare_account("cable").build();
        assert_eq!(simulate(&scenario).unwrap(), 3);
    }

    #[test]
    fn test_scenario_with_march_scores_six() {
        let scenario = scenario_a()
            .month("march", |m| {
                m.pay_bill("electric", 34.12)
                    .pay_bill("gas", 16.54)
                    .pay_bill("cable", 106.41)
            })
            .declare_account("cable")
            .build();
        assert_eq!(simulate(&scenario).unwrap(), 6);
    }

    #[test]
    fn test_late_declared_account_counts_as_miss() {
        let scenario = ScenarioBuilder::new()
            .declare_account("a")
            .declare_account("b")
            .month("m", |m| m.pay_bill("a", 1.0).pay_bill("b", 1.0))
            .declare_account("c")
            .build();

        let mut interpreter = ScenarioInterpreter::new();
        interpreter.run(&scenario).unwrap();
        let report = interpreter.score_report().unwrap();

        assert_eq!(report.total, 0); // +1 +1 -2
        assert_eq!(report.months[0].missed, vec![AccountId::from("c")]);
    }

    #[test]
    fn test_unpaid_account_defaults_to_miss() {
        let scenario = ScenarioBuilder::new()
            .declare_account("electric")
            .declare_account("gas")
            .month("january", |m| m.pay_bill("electric", 10.0))
            .build();
        assert_eq!(simulate(&scenario).unwrap(), -1);
    }

    #[test]
    fn test_total_score_is_idempotent() {
        let scenario = scenario_a().declare_account("cable").build();
        let mut interpreter = ScenarioInterpreter::new();
        interpreter.run(&scenario).unwrap();

        let first = interpreter.total_score().unwrap();
        let second = interpreter.total_score().unwrap();
        assert_eq!(first, second);
        assert_eq!(interpreter.score_report().unwrap().total, first);
    }

    #[test]
    fn test_month_order_does_not_change_total() {
        let forward = scenario_a().declare_account("cable").build();

        // Swap january and february; declarations stay in place
        let mut swapped = forward.clone();
        swapped.actions.swap(2, 3);
        assert!(matches!(&swapped.actions[2], ScenarioAction::Month(b) if b.name == "february"));
        assert_eq!(swapped.actions[0], forward.actions[0]);
        assert_eq!(swapped.actions[4], forward.actions[4]);

        let mut interpreter = ScenarioInterpreter::new();
        interpreter.run(&swapped).unwrap();
        assert_eq!(interpreter.month_names(), vec!["february", "january"]);
        assert_eq!(
            interpreter.registry().snapshot(),
            vec![AccountId::from("electric"), AccountId::from("gas"), AccountId::from("cable")]
        );

        assert_eq!(simulate(&forward).unwrap(), interpreter.total_score().unwrap());
    }

    #[test]
    fn test_unknown_account_payment_fails() {
        let scenario = ScenarioBuilder::new()
            .declare_account("electric")
            .month("january", |m| m.pay_bill("electric", 1.0))
            .month("february", |m| m.pay_bill("phone", 104.23))
            .build();

        let mut interpreter = ScenarioInterpreter::new();
        interpreter.run(&scenario).unwrap();

        let expected = ScoringError::UnknownAccount {
            account: "phone".to_string(),
            month: "february".to_string(),
        };
        assert_eq!(interpreter.total_score().unwrap_err(), expected);
        assert_eq!(interpreter.score_report().unwrap_err(), expected);
    }

    #[test]
    fn test_duplicate_account_is_noop() {
        let scenario = ScenarioBuilder::new()
            .declare_account("electric")
            .declare_account("electric")
            .month("january", |m| m.pay_bill("electric", 1.0))
            .build();

        let mut interpreter = ScenarioInterpreter::new();
        interpreter.run(&scenario).unwrap();

        assert_eq!(interpreter.registry().len(), 1);
        assert_eq!(interpreter.total_score().unwrap(), 1);
        assert_eq!(interpreter.warnings().len(), 1);
    }

    #[test]
    fn test_redefined_month_uses_later_actions_first_position() {
        let scenario = ScenarioBuilder::new()
            .declare_account("electric")
            .month("january", |m| m.pay_bill("electric", 1.0))
            .month("february", |m| m.pay_bill("electric", 1.0))
            .month("january", |m| m)
            .build();

        let mut interpreter = ScenarioInterpreter::new();
        interpreter.run(&scenario).unwrap();

        assert_eq!(interpreter.month_names(), vec!["january", "february"]);
        let report = interpreter.score_report().unwrap();
        assert_eq!(report.months[0].contribution, -2);
        assert_eq!(report.months[1].contribution, 1);
        assert_eq!(report.total, -1);
        assert!(interpreter.warnings()[0].contains("january"));
    }

    #[test]
    fn test_score_before_run_is_out_of_order() {
        let interpreter = ScenarioInterpreter::new();
        assert_eq!(
            interpreter.total_score().unwrap_err(),
            ScoringError::out_of_order("total_score", Phase::Building)
        );
    }

    #[test]
    fn test_building_after_run_is_out_of_order() {
        let mut interpreter = ScenarioInterpreter::new();
        interpreter.run(&Scenario::default()).unwrap();
        assert_eq!(interpreter.phase(), Phase::Scored);

        assert!(matches!(
            interpreter.declare_account(AccountId::from("gas")),
            Err(ScoringError::OutOfOrderCall { operation: "declare_account", .. })
        ));
        assert!(matches!(
            interpreter.begin_month("january", Vec::new()),
            Err(ScoringError::OutOfOrderCall { operation: "begin_month", .. })
        ));
        assert!(matches!(
            interpreter.run(&Scenario::default()),
            Err(ScoringError::OutOfOrderCall { operation: "run", .. })
        ));
    }

    #[test]
    fn test_manual_building_then_finish() {
        let mut interpreter = ScenarioInterpreter::new();
        interpreter
            .begin_month(
                "january",
                vec![MonthAction::PayBill(BillPayment::new("gas", 16.54))],
            )
            .unwrap();
        interpreter.declare_account(AccountId::from("gas")).unwrap();
        interpreter.finish().unwrap();

        assert_eq!(interpreter.total_score().unwrap(), 1);
    }

    #[test]
    fn test_no_months_scores_zero() {
        let scenario = ScenarioBuilder::new().declare_account("electric").build();
        assert_eq!(simulate(&scenario).unwrap(), 0);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let scenario = scenario_a().declare_account("cable").build();
        let mut interpreter = ScenarioInterpreter::new();
        interpreter.run(&scenario).unwrap();

        let json = serde_json::to_value(interpreter.score_report().unwrap()).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["months"][1]["name"], "february");
        assert_eq!(json["months"][1]["missed"][0], "cable");
    }
}
