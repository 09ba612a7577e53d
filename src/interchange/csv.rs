//! Bulk import/export rows. One row per debt record, columns:
//! representative,client,market,principal,payment,invoice_date,due_date,comment
//!
//! Import is lenient by contract: rows missing the representative, client
//! or principal are skipped and counted, as are rows with non-numeric
//! amounts. An unparsable invoice date falls back to today; an unparsable
//! or empty due date becomes absent. Nothing short of an unreadable stream
//! aborts the import.

use crate::domain_model::DebtRecord;
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{Read, Write};

#[derive(Debug, thiserror::Error)]
pub enum InterchangeError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// A row that survived import screening. Amounts are integer FCFA.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub representative: String,
    pub client: String,
    pub market: Option<String>,
    pub principal: i64,
    pub payment: i64,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub comment: Option<String>,
}

#[derive(serde::Deserialize)]
struct CsvInRow {
    representative: String,
    client: String,
    market: Option<String>,
    principal: String,
    payment: Option<String>,
    invoice_date: Option<String>,
    due_date: Option<String>,
    comment: Option<String>,
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    representative: &'a str,
    client: &'a str,
    market: &'a str,
    principal: i64,
    payment: i64,
    invoice_date: String,
    due_date: String,
    comment: &'a str,
}

fn none_if_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn screen(row: CsvInRow, today: NaiveDate) -> Option<ParsedRow> {
    let representative = row.representative.trim().to_string();
    let client = row.client.trim().to_string();
    if representative.is_empty() || client.is_empty() || row.principal.trim().is_empty() {
        return None;
    }

    let principal: i64 = row.principal.trim().parse().ok()?;
    let payment: i64 = match none_if_blank(row.payment) {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if principal <= 0 || payment < 0 || payment > principal {
        return None;
    }

    let invoice_date = none_if_blank(row.invoice_date)
        .and_then(|s| parse_iso_date(&s))
        .unwrap_or(today);
    let due_date = none_if_blank(row.due_date).and_then(|s| parse_iso_date(&s));

    Some(ParsedRow {
        representative,
        client,
        market: none_if_blank(row.market),
        principal,
        payment,
        invoice_date,
        due_date,
        comment: none_if_blank(row.comment),
    })
}

/// Returns the accepted rows and the number of ignored ones. Rows the csv
/// layer itself cannot shape (short records, bad encoding) are ignored the
/// same way as rows that fail screening.
pub fn read_rows<R: Read>(r: R, today: NaiveDate) -> Result<(Vec<ParsedRow>, usize), InterchangeError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
    let mut rows = Vec::new();
    let mut ignored = 0usize;

    for rec in rdr.deserialize::<CsvInRow>() {
        match rec {
            Ok(row) => match screen(row, today) {
                Some(parsed) => rows.push(parsed),
                None => ignored += 1,
            },
            Err(_) => ignored += 1,
        }
    }

    Ok((rows, ignored))
}

pub fn write_rows<W: Write>(w: W, records: &[DebtRecord]) -> Result<(), InterchangeError> {
    let mut wtr = WriterBuilder::new().from_writer(w);

    for r in records {
        wtr.serialize(CsvOutRow {
            representative: &r.representative,
            client: &r.client,
            market: r.market.as_deref().unwrap_or(""),
            principal: r.principal,
            payment: r.payment,
            invoice_date: r.invoice_date.format("%Y-%m-%d").to_string(),
            due_date: r
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            comment: r.comment.as_deref().unwrap_or(""),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    const HEADER: &str =
        "representative,client,market,principal,payment,invoice_date,due_date,comment\n";

    #[test]
    fn well_formed_rows_are_accepted() {
        let input = format!(
            "{HEADER}YAYA CAMARA,ISSA DOLO,MORIBABOUGOU,3625000,725000,2024-06-01,2024-06-11,premier lot\n"
        );
        let (rows, ignored) = read_rows(input.as_bytes(), today()).unwrap();
        assert_eq!(ignored, 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].principal, 3_625_000);
        assert_eq!(rows[0].payment, 725_000);
        assert_eq!(rows[0].due_date, NaiveDate::from_ymd_opt(2024, 6, 11));
        assert_eq!(rows[0].comment.as_deref(), Some("premier lot"));
    }

    #[test]
    fn rows_missing_required_fields_are_skipped() {
        let input = format!(
            "{HEADER},ISSA DOLO,M,100000,0,2024-06-01,,\n\
             YAYA CAMARA,,M,100000,0,2024-06-01,,\n\
             YAYA CAMARA,ISSA DOLO,M,,0,2024-06-01,,\n\
             YAYA CAMARA,FANTA DIARRA,M,100000,0,2024-06-01,,\n"
        );
        let (rows, ignored) = read_rows(input.as_bytes(), today()).unwrap();
        assert_eq!(ignored, 3);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].client, "FANTA DIARRA");
    }

    #[test]
    fn non_numeric_amounts_are_skipped() {
        let input = format!(
            "{HEADER}YAYA CAMARA,ISSA DOLO,M,beaucoup,0,2024-06-01,,\n\
             YAYA CAMARA,ISSA DOLO,M,100000,rien,2024-06-01,,\n"
        );
        let (rows, ignored) = read_rows(input.as_bytes(), today()).unwrap();
        assert!(rows.is_empty());
        assert_eq!(ignored, 2);
    }

    #[test]
    fn payment_above_principal_is_skipped() {
        let input = format!("{HEADER}YAYA CAMARA,ISSA DOLO,M,100000,200000,2024-06-01,,\n");
        let (rows, ignored) = read_rows(input.as_bytes(), today()).unwrap();
        assert!(rows.is_empty());
        assert_eq!(ignored, 1);
    }

    #[test]
    fn bad_dates_fall_back_instead_of_rejecting() {
        let input = format!("{HEADER}YAYA CAMARA,ISSA DOLO,M,100000,0,pas-une-date,31/12/2024,\n");
        let (rows, ignored) = read_rows(input.as_bytes(), today()).unwrap();
        assert_eq!(ignored, 0);
        assert_eq!(rows[0].invoice_date, today());
        assert_eq!(rows[0].due_date, None);
    }

    #[test]
    fn missing_payment_defaults_to_zero() {
        let input = format!("{HEADER}YAYA CAMARA,ISSA DOLO,M,100000,,2024-06-01,,\n");
        let (rows, _) = read_rows(input.as_bytes(), today()).unwrap();
        assert_eq!(rows[0].payment, 0);
    }

    #[test]
    fn export_emits_one_line_per_record_plus_header() {
        use crate::domain_model::{DebtId, DebtRecord};
        use chrono::Utc;

        let mut r = DebtRecord {
            id: DebtId(uuid::Uuid::new_v4()),
            representative: "YAYA CAMARA".to_string(),
            client: "ISSA DOLO".to_string(),
            market: None,
            principal: 100_000,
            payment: 40_000,
            balance: 0,
            invoice_date: today(),
            due_date: None,
            status: crate::domain_model::DebtStatus::Paid,
            situation: crate::domain_model::PaymentSituation::Settled,
            days_late: 0,
            comment: None,
            created_at: Utc::now(),
            created_by: "admin".to_string(),
        };
        r.refresh(today());

        let mut out = Vec::new();
        write_rows(&mut out, &[r]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "representative,client,market,principal,payment,invoice_date,due_date,comment"
        );
        assert_eq!(lines.next().unwrap(), "YAYA CAMARA,ISSA DOLO,,100000,40000,2024-06-15,,");
        assert!(lines.next().is_none());
    }

    #[test]
    fn exported_rows_import_back() {
        let input = format!("{HEADER}YAYA CAMARA,ISSA DOLO,MEDINE,100000,0,2024-06-01,2024-06-20,suivi\n");
        let (rows, _) = read_rows(input.as_bytes(), today()).unwrap();
        assert_eq!(rows[0].market.as_deref(), Some("MEDINE"));
        assert_eq!(rows[0].invoice_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }
}
