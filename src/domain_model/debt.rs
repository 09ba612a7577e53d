use super::classify::classify;
use super::status::{DebtStatus, PaymentSituation};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DebtId(pub uuid::Uuid);

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DebtId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(DebtId)
    }
}

/// One créance: a debt a client owes to a representative's portfolio.
///
/// Amounts are integer FCFA. `balance` and the three derived fields are
/// never set directly; [`DebtRecord::refresh`] recomputes them from the
/// principal, the payment received and today's date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtRecord {
    pub id: DebtId,
    pub representative: String,
    pub client: String,
    pub market: Option<String>,
    pub principal: i64,
    pub payment: i64,
    pub balance: i64,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: DebtStatus,
    pub situation: PaymentSituation,
    pub days_late: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl DebtRecord {
    /// Recompute the balance invariant and the derived status fields
    /// against `today`. Called on every mutation and on every read path,
    /// since status drifts with the wall clock.
    pub fn refresh(&mut self, today: NaiveDate) {
        self.balance = self.principal - self.payment;
        let c = classify(self.balance, self.due_date, today);
        self.status = c.status;
        self.situation = c.situation;
        self.days_late = c.days_late;
    }
}
