pub mod builder;
pub mod storage;
pub mod types;

pub use builder::{MonthBuilder, ScenarioBuilder};
pub use storage::{load_events, load_scenario};
pub use types::{
    AccountId, BillPayment, MonthAction, MonthBlock, Scenario, ScenarioAction, SimpleEvent,
};
