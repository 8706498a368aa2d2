use serde::{Deserialize, Serialize};

/// A consumer with a stored account balance.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Consumer {
    pub balance: f64,
}

impl Consumer {
    pub fn new(balance: f64) -> Self {
        Self { balance }
    }

    /// Zero and positive balances are in good standing.
    pub fn good_standing(&self) -> bool {
        self.balance >= 0.0
    }
}
