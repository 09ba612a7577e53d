use super::util::downcast;
use crate::application_port::{DebtError, DebtFilter};
use crate::domain_model::{DebtId, DebtRecord, Scope};
use crate::domain_port::{DebtRepo, StorageTx};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

pub struct MySqlDebtRepo {
    pool: MySqlPool,
}

impl MySqlDebtRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlDebtRepo { pool }
    }

    #[inline]
    fn id_as_bytes(id: &DebtId) -> &[u8] {
        id.0.as_bytes()
    }

    fn id_from_bytes(id: &[u8]) -> Result<DebtId, DebtError> {
        Ok(DebtId(
            Uuid::from_slice(id).map_err(|e| DebtError::Store(e.to_string()))?,
        ))
    }

    fn row_to_record(row: MySqlRow) -> Result<DebtRecord, DebtError> {
        let store = |e: sqlx::Error| DebtError::Store(e.to_string());

        let id_bytes: Vec<u8> = row.try_get("id").map_err(store)?;
        let id = Self::id_from_bytes(&id_bytes)?;

        let status_label: String = row.try_get("status").map_err(store)?;
        let situation_label: String = row.try_get("situation").map_err(store)?;

        Ok(DebtRecord {
            id,
            representative: row.try_get("representative").map_err(store)?,
            client: row.try_get("client").map_err(store)?,
            market: row.try_get("market").map_err(store)?,
            principal: row.try_get("principal").map_err(store)?,
            payment: row.try_get("payment").map_err(store)?,
            balance: row.try_get("balance").map_err(store)?,
            invoice_date: row.try_get::<NaiveDate, _>("invoice_date").map_err(store)?,
            due_date: row
                .try_get::<Option<NaiveDate>, _>("due_date")
                .map_err(store)?,
            status: status_label
                .parse()
                .map_err(|e: crate::domain_model::UnknownLabel| DebtError::Store(e.to_string()))?,
            situation: situation_label
                .parse()
                .map_err(|e: crate::domain_model::UnknownLabel| DebtError::Store(e.to_string()))?,
            days_late: row.try_get("days_late").map_err(store)?,
            comment: row.try_get("comment").map_err(store)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(store)?,
            created_by: row.try_get("created_by").map_err(store)?,
        })
    }
}

const COLUMNS: &str = "id, representative, client, market, principal, payment, balance, \
invoice_date, due_date, status, situation, days_late, comment, created_at, created_by";

#[async_trait::async_trait]
impl DebtRepo for MySqlDebtRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        record: &DebtRecord,
    ) -> Result<(), DebtError> {
        let tx = downcast(tx);

        sqlx::query(
            r#"
INSERT INTO debt (id, representative, client, market, principal, payment, balance,
                  invoice_date, due_date, status, situation, days_late, comment,
                  created_at, created_by)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(Self::id_as_bytes(&record.id))
        .bind(&record.representative)
        .bind(&record.client)
        .bind(&record.market)
        .bind(record.principal)
        .bind(record.payment)
        .bind(record.balance)
        .bind(record.invoice_date)
        .bind(record.due_date)
        .bind(record.status.to_string())
        .bind(record.situation.to_string())
        .bind(record.days_late)
        .bind(&record.comment)
        .bind(record.created_at)
        .bind(&record.created_by)
        .execute(tx.conn())
        .await
        .map_err(|e| DebtError::Store(e.to_string()))?;

        Ok(())
    }

    async fn update_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        record: &DebtRecord,
    ) -> Result<(), DebtError> {
        let tx = downcast(tx);

        let result = sqlx::query(
            r#"
UPDATE debt
SET representative = ?, client = ?, market = ?, principal = ?, payment = ?,
    balance = ?, invoice_date = ?, due_date = ?, status = ?, situation = ?,
    days_late = ?, comment = ?
WHERE id = ?
"#,
        )
        .bind(&record.representative)
        .bind(&record.client)
        .bind(&record.market)
        .bind(record.principal)
        .bind(record.payment)
        .bind(record.balance)
        .bind(record.invoice_date)
        .bind(record.due_date)
        .bind(record.status.to_string())
        .bind(record.situation.to_string())
        .bind(record.days_late)
        .bind(&record.comment)
        .bind(Self::id_as_bytes(&record.id))
        .execute(tx.conn())
        .await
        .map_err(|e| DebtError::Store(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DebtError::NotFound);
        }
        Ok(())
    }

    async fn delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        id: DebtId,
    ) -> Result<bool, DebtError> {
        let tx = downcast(tx);

        let result = sqlx::query("DELETE FROM debt WHERE id = ?")
            .bind(Self::id_as_bytes(&id))
            .execute(tx.conn())
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn get(&self, id: DebtId) -> Result<Option<DebtRecord>, DebtError> {
        let sql = format!("SELECT {COLUMNS} FROM debt WHERE id = ?");
        let row_opt = sqlx::query(&sql)
            .bind(Self::id_as_bytes(&id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;

        row_opt.map(Self::row_to_record).transpose()
    }

    async fn list(&self, scope: &Scope, filter: &DebtFilter) -> Result<Vec<DebtRecord>, DebtError> {
        let mut sql = format!("SELECT {COLUMNS} FROM debt WHERE 1 = 1");
        if matches!(scope, Scope::Representative(_)) {
            sql.push_str(" AND representative = ?");
        }
        if filter.representative.is_some() {
            sql.push_str(" AND representative = ?");
        }
        if filter.client.is_some() {
            sql.push_str(" AND client LIKE ?");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query(&sql);
        if let Scope::Representative(rep) = scope {
            query = query.bind(rep);
        }
        if let Some(rep) = &filter.representative {
            query = query.bind(rep);
        }
        if let Some(client) = &filter.client {
            query = query.bind(format!("%{client}%"));
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;

        rows.into_iter().map(Self::row_to_record).collect()
    }
}
