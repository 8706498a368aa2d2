pub mod error;
pub mod interpreter;
pub mod month;
pub mod registry;
pub mod simple;
pub mod standing;

pub use error::ScoringError;
pub use interpreter::{simulate, MonthScore, Phase, ScenarioInterpreter, ScoreReport};
pub use month::{MonthEvaluator, MISSED_POINTS, PAID_POINTS};
pub use registry::AccountRegistry;
pub use simple::{event_points, simple_score};
pub use standing::Consumer;
