use super::status::{DebtStatus, PaymentSituation};
use chrono::NaiveDate;

/// Window, in days, within which an unpaid debt is flagged for watching
/// on both sides of its due date.
const WATCH_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Classification {
    pub status: DebtStatus,
    pub situation: PaymentSituation,
    /// Whole days past due. Zero whenever lateness does not apply
    /// (the same sentinel the top-overdue ordering relies on).
    pub days_late: i64,
}

/// Derive (status, situation, days-late) from a debt's remaining balance,
/// its due date and today's date. Pure and idempotent: callers must re-run
/// it before presenting or aggregating, since the result moves with the
/// wall clock even when the record itself does not change.
///
/// Branches are evaluated in order; the first match wins. A settled (or
/// overpaid) balance wins over everything, including a future due date.
pub fn classify(balance: i64, due_date: Option<NaiveDate>, today: NaiveDate) -> Classification {
    if balance <= 0 {
        return Classification {
            status: DebtStatus::Paid,
            situation: PaymentSituation::Settled,
            days_late: 0,
        };
    }

    let Some(due) = due_date else {
        return Classification {
            status: DebtStatus::ToFollowUp,
            situation: PaymentSituation::InProgress,
            days_late: 0,
        };
    };

    if today > due {
        let days_late = (today - due).num_days();
        let status = if days_late <= WATCH_WINDOW_DAYS {
            DebtStatus::ToWatch
        } else {
            DebtStatus::Overdue
        };
        return Classification {
            status,
            situation: PaymentSituation::Late,
            days_late,
        };
    }

    if today == due {
        return Classification {
            status: DebtStatus::DueToday,
            situation: PaymentSituation::AtTerm,
            days_late: 0,
        };
    }

    if (due - today).num_days() <= WATCH_WINDOW_DAYS {
        return Classification {
            status: DebtStatus::ToWatch,
            situation: PaymentSituation::AtTerm,
            days_late: 0,
        };
    }

    Classification {
        status: DebtStatus::ToFollowUp,
        situation: PaymentSituation::InProgress,
        days_late: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    const TODAY: fn() -> NaiveDate = || d(2024, 6, 15);

    #[test]
    fn settled_balance_wins_over_any_due_date() {
        for due in [
            None,
            Some(d(2024, 6, 1)),
            Some(TODAY()),
            Some(d(2024, 7, 15)),
        ] {
            let c = classify(0, due, TODAY());
            assert_eq!(c.status, DebtStatus::Paid);
            assert_eq!(c.situation, PaymentSituation::Settled);
            assert_eq!(c.days_late, 0);
        }
    }

    #[test]
    fn overpayment_counts_as_paid() {
        let c = classify(-50_000, Some(d(2024, 6, 1)), TODAY());
        assert_eq!(c.status, DebtStatus::Paid);
        assert_eq!(c.situation, PaymentSituation::Settled);
    }

    #[test]
    fn missing_due_date_is_to_follow_up() {
        let c = classify(100_000, None, TODAY());
        assert_eq!(c.status, DebtStatus::ToFollowUp);
        assert_eq!(c.situation, PaymentSituation::InProgress);
        assert_eq!(c.days_late, 0);
    }

    #[test]
    fn due_today_is_its_own_state() {
        let c = classify(100_000, Some(TODAY()), TODAY());
        assert_eq!(c.status, DebtStatus::DueToday);
        assert_eq!(c.situation, PaymentSituation::AtTerm);
        assert_eq!(c.days_late, 0);
    }

    #[test]
    fn near_due_dates_are_to_watch() {
        for offset in 1..=3 {
            let c = classify(100_000, Some(TODAY() + chrono::Days::new(offset)), TODAY());
            assert_eq!(c.status, DebtStatus::ToWatch, "offset {offset}");
            assert_eq!(c.situation, PaymentSituation::AtTerm);
            assert_eq!(c.days_late, 0);
        }
    }

    #[test]
    fn far_due_dates_are_to_follow_up() {
        let c = classify(100_000, Some(TODAY() + chrono::Days::new(4)), TODAY());
        assert_eq!(c.status, DebtStatus::ToFollowUp);
        assert_eq!(c.situation, PaymentSituation::InProgress);
    }

    #[test]
    fn short_lateness_is_to_watch_long_is_overdue() {
        for late in 1..=3i64 {
            let c = classify(
                100_000,
                Some(TODAY() - chrono::Days::new(late as u64)),
                TODAY(),
            );
            assert_eq!(c.status, DebtStatus::ToWatch, "late {late}");
            assert_eq!(c.situation, PaymentSituation::Late);
            assert_eq!(c.days_late, late);
        }
        let c = classify(100_000, Some(TODAY() - chrono::Days::new(4)), TODAY());
        assert_eq!(c.status, DebtStatus::Overdue);
        assert_eq!(c.situation, PaymentSituation::Late);
        assert_eq!(c.days_late, 4);
    }

    #[test]
    fn ten_days_late_scenario() {
        let c = classify(1_000_000, Some(TODAY() - chrono::Days::new(10)), TODAY());
        assert_eq!(c.status, DebtStatus::Overdue);
        assert_eq!(c.situation, PaymentSituation::Late);
        assert_eq!(c.days_late, 10);
    }

    #[test]
    fn fully_paid_scenario() {
        // principal 500 000, payment 500 000, due in 30 days
        let c = classify(0, Some(TODAY() + chrono::Days::new(30)), TODAY());
        assert_eq!(c.status, DebtStatus::Paid);
        assert_eq!(c.situation, PaymentSituation::Settled);
        assert_eq!(c.days_late, 0);
    }

    #[test]
    fn partial_payment_near_term_scenario() {
        // principal 200 000, payment 50 000, due in 2 days
        let c = classify(150_000, Some(TODAY() + chrono::Days::new(2)), TODAY());
        assert_eq!(c.status, DebtStatus::ToWatch);
        assert_eq!(c.situation, PaymentSituation::AtTerm);
        assert_eq!(c.days_late, 0);
    }
}
