//! Report folds over an already scope-filtered set of debt records.
//!
//! Every sum is computed fresh on each call. Callers are expected to have
//! refreshed each record's derived status against today before folding;
//! nothing here re-runs the classifier. Empty input and zero denominators
//! are defined cases, never errors.

use super::debt::DebtRecord;
use super::status::PaymentSituation;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GlobalSummary {
    pub total_principal: i64,
    pub total_payment: i64,
    pub total_balance: i64,
    /// Late balance over total principal, as a percentage. Zero when the
    /// input set has no principal at all.
    pub late_ratio_percent: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RepresentativeSummary {
    pub count: u64,
    pub total_principal: i64,
    pub late_balance: i64,
    pub total_balance: i64,
    pub distinct_clients: u64,
    pub performance_percent: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientSummary {
    pub client: String,
    pub representative: String,
    pub market: Option<String>,
    pub count: u64,
    pub total_principal: i64,
    pub total_payment: i64,
    pub total_balance: i64,
    pub last_due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientDetail {
    pub found: bool,
    pub records: Vec<DebtRecord>,
    pub total_principal: i64,
    pub total_payment: i64,
    pub total_balance: i64,
    pub last_due_date: Option<NaiveDate>,
}

fn percent(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

pub fn aggregate_global(records: &[DebtRecord]) -> GlobalSummary {
    let total_principal: i64 = records.iter().map(|r| r.principal).sum();
    let total_payment: i64 = records.iter().map(|r| r.payment).sum();
    let total_balance: i64 = records.iter().map(|r| r.balance).sum();
    let late_balance: i64 = records
        .iter()
        .filter(|r| r.situation == PaymentSituation::Late)
        .map(|r| r.balance)
        .sum();

    GlobalSummary {
        total_principal,
        total_payment,
        total_balance,
        late_ratio_percent: percent(late_balance, total_principal),
    }
}

/// One entry per name in `visible`, in all cases: a representative with no
/// records still shows up with all-zero stats. Records owned by names
/// outside `visible` are ignored entirely.
pub fn aggregate_by_representative(
    records: &[DebtRecord],
    visible: &[String],
) -> BTreeMap<String, RepresentativeSummary> {
    let mut out = BTreeMap::new();

    for name in visible {
        let mut count = 0u64;
        let mut total_principal = 0i64;
        let mut late_balance = 0i64;
        let mut total_balance = 0i64;
        let mut clients = HashSet::new();

        for r in records.iter().filter(|r| &r.representative == name) {
            count += 1;
            total_principal += r.principal;
            total_balance += r.balance;
            if r.situation == PaymentSituation::Late {
                late_balance += r.balance;
            }
            clients.insert(r.client.as_str());
        }

        out.insert(
            name.clone(),
            RepresentativeSummary {
                count,
                total_principal,
                late_balance,
                total_balance,
                distinct_clients: clients.len() as u64,
                performance_percent: percent(total_principal - late_balance, total_principal),
            },
        );
    }

    out
}

/// Group by exact client name (case- and whitespace-sensitive, no fuzzy
/// merge). Representative and market are taken from the first record seen
/// for the name. `last_due_date` only advances on records that carry a due
/// date; dateless records still count toward the sums.
pub fn aggregate_by_client(records: &[DebtRecord]) -> Vec<ClientSummary> {
    let mut rows: Vec<ClientSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for r in records {
        let i = match index.get(r.client.as_str()) {
            Some(&i) => i,
            None => {
                index.insert(r.client.as_str(), rows.len());
                rows.push(ClientSummary {
                    client: r.client.clone(),
                    representative: r.representative.clone(),
                    market: r.market.clone(),
                    count: 0,
                    total_principal: 0,
                    total_payment: 0,
                    total_balance: 0,
                    last_due_date: None,
                });
                rows.len() - 1
            }
        };

        let row = &mut rows[i];
        row.count += 1;
        row.total_principal += r.principal;
        row.total_payment += r.payment;
        row.total_balance += r.balance;
        if let Some(due) = r.due_date {
            if row.last_due_date.is_none_or(|max| due > max) {
                row.last_due_date = Some(due);
            }
        }
    }

    rows
}

/// The late subset, sorted descending by days past due (stable, so ties
/// keep their original relative order), truncated to `n` when given.
pub fn top_overdue(records: &[DebtRecord], n: Option<usize>) -> Vec<DebtRecord> {
    let mut late: Vec<DebtRecord> = records
        .iter()
        .filter(|r| r.situation == PaymentSituation::Late)
        .cloned()
        .collect();
    late.sort_by(|a, b| b.days_late.cmp(&a.days_late));
    if let Some(n) = n {
        late.truncate(n);
    }
    late
}

/// All records for an exact client name, newest creation first. An empty
/// match yields `found: false` rather than an error; a caller whose scope
/// hides the client gets the same answer as one asking about a client that
/// never existed.
pub fn client_detail(records: &[DebtRecord], client: &str) -> ClientDetail {
    let mut matching: Vec<DebtRecord> = records
        .iter()
        .filter(|r| r.client == client)
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total_principal = matching.iter().map(|r| r.principal).sum();
    let total_payment = matching.iter().map(|r| r.payment).sum();
    let total_balance = matching.iter().map(|r| r.balance).sum();
    let last_due_date = matching.iter().filter_map(|r| r.due_date).max();

    ClientDetail {
        found: !matching.is_empty(),
        records: matching,
        total_principal,
        total_payment,
        total_balance,
        last_due_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::debt::DebtId;
    use chrono::{Days, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn record(
        representative: &str,
        client: &str,
        principal: i64,
        payment: i64,
        due_date: Option<NaiveDate>,
    ) -> DebtRecord {
        let mut r = DebtRecord {
            id: DebtId(uuid::Uuid::new_v4()),
            representative: representative.to_string(),
            client: client.to_string(),
            market: Some("MEDINE".to_string()),
            principal,
            payment,
            balance: 0,
            invoice_date: today(),
            due_date,
            status: crate::domain_model::DebtStatus::Paid,
            situation: PaymentSituation::Settled,
            days_late: 0,
            comment: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            created_by: "admin".to_string(),
        };
        r.refresh(today());
        r
    }

    #[test]
    fn global_summary_of_empty_set_is_all_zero() {
        let s = aggregate_global(&[]);
        assert_eq!(
            s,
            GlobalSummary {
                total_principal: 0,
                total_payment: 0,
                total_balance: 0,
                late_ratio_percent: 0.0,
            }
        );
    }

    #[test]
    fn late_ratio_counts_only_late_balances() {
        let records = vec![
            // 10 days late, balance 300 000
            record("YAYA CAMARA", "ISSA DOLO", 300_000, 0, Some(today() - Days::new(10))),
            // not yet due, balance 200 000
            record("YAYA CAMARA", "FANTA DIARRA", 300_000, 100_000, Some(today() + Days::new(30))),
            // settled
            record("YAYA CAMARA", "MAMA TRAORE", 400_000, 400_000, None),
        ];
        let s = aggregate_global(&records);
        assert_eq!(s.total_principal, 1_000_000);
        assert_eq!(s.total_payment, 500_000);
        assert_eq!(s.total_balance, 500_000);
        assert!((s.late_ratio_percent - 30.0).abs() < 1e-9);
    }

    #[test]
    fn representatives_without_records_still_appear() {
        let visible = vec!["YAYA CAMARA".to_string(), "ISSA DIAKITE".to_string()];
        let records = vec![record(
            "YAYA CAMARA",
            "ISSA DOLO",
            100_000,
            0,
            Some(today() - Days::new(5)),
        )];
        let map = aggregate_by_representative(&records, &visible);

        let idle = &map["ISSA DIAKITE"];
        assert_eq!(idle.count, 0);
        assert_eq!(idle.total_principal, 0);
        assert_eq!(idle.distinct_clients, 0);
        assert_eq!(idle.performance_percent, 0.0);

        let busy = &map["YAYA CAMARA"];
        assert_eq!(busy.count, 1);
        assert_eq!(busy.late_balance, 100_000);
        assert_eq!(busy.performance_percent, 0.0);
    }

    #[test]
    fn representative_performance_excludes_late_balance() {
        let visible = vec!["DIDIER DEMBELE".to_string()];
        let records = vec![
            record("DIDIER DEMBELE", "ABDOUL TOURE", 800_000, 800_000, None),
            record(
                "DIDIER DEMBELE",
                "ISSA DIALLO",
                200_000,
                0,
                Some(today() - Days::new(20)),
            ),
        ];
        let map = aggregate_by_representative(&records, &visible);
        let s = &map["DIDIER DEMBELE"];
        assert_eq!(s.total_principal, 1_000_000);
        assert_eq!(s.late_balance, 200_000);
        assert_eq!(s.distinct_clients, 2);
        assert!((s.performance_percent - 80.0).abs() < 1e-9);
    }

    #[test]
    fn records_outside_the_visible_roster_are_ignored() {
        let visible = vec!["YAYA CAMARA".to_string()];
        let records = vec![record("ISSA DIAKITE", "ABOU SAMAKE", 100_000, 0, None)];
        let map = aggregate_by_representative(&records, &visible);
        assert_eq!(map.len(), 1);
        assert_eq!(map["YAYA CAMARA"].count, 0);
    }

    #[test]
    fn client_rollup_groups_by_exact_name() {
        let records = vec![
            record("YAYA CAMARA", "AMADOU TRAORE", 100_000, 0, Some(today() + Days::new(2))),
            record("YAYA CAMARA", "AMADOU TRAORE", 300_000, 300_000, Some(today() + Days::new(9))),
            // different spacing, different client
            record("YAYA CAMARA", "AMADOU  TRAORE", 50_000, 0, None),
        ];
        let rows = aggregate_by_client(&records);
        assert_eq!(rows.len(), 2);

        let amadou = rows.iter().find(|r| r.client == "AMADOU TRAORE").unwrap();
        assert_eq!(amadou.count, 2);
        assert_eq!(amadou.total_principal, 400_000);
        assert_eq!(amadou.total_balance, 100_000);
        assert_eq!(amadou.last_due_date, Some(today() + Days::new(9)));
    }

    #[test]
    fn client_rollup_is_consistent_with_global_totals() {
        let records = vec![
            record("YAYA CAMARA", "ISSA DOLO", 3_625_000, 725_000, Some(today() - Days::new(10))),
            record("YAYA CAMARA", "FANTA DIARRA", 3_910_000, 1_955_000, Some(today())),
            record("ISSA DIAKITE", "ABOU SAMAKE", 4_755_000, 3_328_500, Some(today() + Days::new(5))),
            record("ISSA DIAKITE", "ISSA DOLO", 7_095_000, 0, None),
        ];
        let global = aggregate_global(&records);
        let per_client: i64 = aggregate_by_client(&records)
            .iter()
            .map(|r| r.total_principal)
            .sum();
        assert_eq!(per_client, global.total_principal);
    }

    #[test]
    fn dateless_records_count_in_sums_but_not_in_last_due_date() {
        let records = vec![
            record("YAYA CAMARA", "MAMA TRAORE", 100_000, 0, None),
            record("YAYA CAMARA", "MAMA TRAORE", 200_000, 0, None),
        ];
        let rows = aggregate_by_client(&records);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].total_principal, 300_000);
        assert_eq!(rows[0].last_due_date, None);
    }

    #[test]
    fn top_overdue_is_late_only_capped_and_sorted() {
        let mut records: Vec<DebtRecord> = (1..=7)
            .map(|i| {
                record(
                    "YAYA CAMARA",
                    &format!("CLIENT {i}"),
                    100_000,
                    0,
                    Some(today() - Days::new(i)),
                )
            })
            .collect();
        records.push(record("YAYA CAMARA", "SOLDE", 100_000, 100_000, Some(today() - Days::new(30))));
        records.push(record("YAYA CAMARA", "FUTUR", 100_000, 0, Some(today() + Days::new(30))));

        let top = top_overdue(&records, Some(5));
        assert_eq!(top.len(), 5);
        assert!(top.iter().all(|r| r.situation == PaymentSituation::Late));
        let days: Vec<i64> = top.iter().map(|r| r.days_late).collect();
        assert_eq!(days, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn top_overdue_ties_keep_original_order() {
        let a = record("YAYA CAMARA", "PREMIER", 100_000, 0, Some(today() - Days::new(4)));
        let b = record("YAYA CAMARA", "SECOND", 100_000, 0, Some(today() - Days::new(4)));
        let top = top_overdue(&[a, b], None);
        assert_eq!(top[0].client, "PREMIER");
        assert_eq!(top[1].client, "SECOND");
    }

    #[test]
    fn client_detail_orders_newest_first_and_flags_missing() {
        let mut older = record("YAYA CAMARA", "ISSA DOLO", 100_000, 0, Some(today() + Days::new(4)));
        older.created_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let newer = record("YAYA CAMARA", "ISSA DOLO", 200_000, 50_000, None);

        let detail = client_detail(&[older, newer], "ISSA DOLO");
        assert!(detail.found);
        assert_eq!(detail.records.len(), 2);
        assert_eq!(detail.records[0].principal, 200_000);
        assert_eq!(detail.total_principal, 300_000);
        assert_eq!(detail.total_balance, 250_000);
        assert_eq!(detail.last_due_date, Some(today() + Days::new(4)));

        let missing = client_detail(&[], "ISSA DOLO");
        assert!(!missing.found);
        assert_eq!(missing.total_principal, 0);
        assert_eq!(missing.last_due_date, None);
    }
}
