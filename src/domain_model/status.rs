use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse payment bucket derived from balance and due date.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentSituation {
    Settled,
    InProgress,
    AtTerm,
    Late,
}

/// Follow-up label, finer than [`PaymentSituation`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebtStatus {
    Paid,
    ToFollowUp,
    ToWatch,
    DueToday,
    Overdue,
}

impl fmt::Display for PaymentSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentSituation::Settled => "SETTLED",
            PaymentSituation::InProgress => "IN_PROGRESS",
            PaymentSituation::AtTerm => "AT_TERM",
            PaymentSituation::Late => "LATE",
        };
        f.write_str(s)
    }
}

impl FromStr for PaymentSituation {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SETTLED" => Ok(PaymentSituation::Settled),
            "IN_PROGRESS" => Ok(PaymentSituation::InProgress),
            "AT_TERM" => Ok(PaymentSituation::AtTerm),
            "LATE" => Ok(PaymentSituation::Late),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DebtStatus::Paid => "PAID",
            DebtStatus::ToFollowUp => "TO_FOLLOW_UP",
            DebtStatus::ToWatch => "TO_WATCH",
            DebtStatus::DueToday => "DUE_TODAY",
            DebtStatus::Overdue => "OVERDUE",
        };
        f.write_str(s)
    }
}

impl FromStr for DebtStatus {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAID" => Ok(DebtStatus::Paid),
            "TO_FOLLOW_UP" => Ok(DebtStatus::ToFollowUp),
            "TO_WATCH" => Ok(DebtStatus::ToWatch),
            "DUE_TODAY" => Ok(DebtStatus::DueToday),
            "OVERDUE" => Ok(DebtStatus::Overdue),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown status label: {0}")]
pub struct UnknownLabel(pub String);
