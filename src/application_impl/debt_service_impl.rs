use crate::application_port::{
    DebtError, DebtFilter, DebtService, DebtUpdateInput, ImportOutcome, NewDebtInput,
};
use crate::domain_model::{CurrentUser, DebtId, DebtRecord};
use crate::domain_port::{DebtRepo, TxManager};
use crate::interchange;
use chrono::{NaiveDate, Utc};
use nanoid::nanoid;
use std::sync::Arc;
use uuid::Uuid;

pub struct RealDebtService {
    debt_repo: Arc<dyn DebtRepo>,
    tx_manager: Arc<dyn TxManager>,
}

/// Amount screening shared by create and update. Rejects before any write.
fn validate_amounts(principal: i64, payment: i64) -> Result<(), DebtError> {
    if principal <= 0 {
        return Err(DebtError::Validation(
            "principal must be positive".to_string(),
        ));
    }
    if payment < 0 {
        return Err(DebtError::Validation(
            "payment cannot be negative".to_string(),
        ));
    }
    if payment > principal {
        return Err(DebtError::Validation(
            "payment cannot exceed principal".to_string(),
        ));
    }
    Ok(())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl RealDebtService {
    pub fn new(debt_repo: Arc<dyn DebtRepo>, tx_manager: Arc<dyn TxManager>) -> Self {
        Self {
            debt_repo,
            tx_manager,
        }
    }

    fn build_record(created_by: &str, input: NewDebtInput) -> DebtRecord {
        let mut record = DebtRecord {
            id: DebtId(Uuid::new_v4()),
            representative: input.representative,
            client: input.client,
            market: input.market,
            principal: input.principal,
            payment: input.payment,
            balance: 0,
            invoice_date: input.invoice_date,
            due_date: input.due_date,
            status: crate::domain_model::DebtStatus::Paid,
            situation: crate::domain_model::PaymentSituation::Settled,
            days_late: 0,
            comment: input.comment,
            created_at: Utc::now(),
            created_by: created_by.to_string(),
        };
        record.refresh(today());
        record
    }

    /// Load a record the actor is allowed to see. Out-of-scope rows come
    /// back as NotFound so existence never leaks across scope boundaries.
    async fn get_visible(&self, actor: &CurrentUser, id: DebtId) -> Result<DebtRecord, DebtError> {
        let record = self.debt_repo.get(id).await?.ok_or(DebtError::NotFound)?;
        if !actor.scope.allows(&record.representative) {
            return Err(DebtError::NotFound);
        }
        Ok(record)
    }
}

#[async_trait::async_trait]
impl DebtService for RealDebtService {
    async fn create(
        &self,
        actor: &CurrentUser,
        input: NewDebtInput,
    ) -> Result<DebtRecord, DebtError> {
        if !actor.may_write(&input.representative) {
            return Err(DebtError::NotPermitted);
        }
        if input.client.trim().is_empty() {
            return Err(DebtError::Validation("client is required".to_string()));
        }
        validate_amounts(input.principal, input.payment)?;

        let record = Self::build_record(&actor.username, input);

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;
        self.debt_repo.insert_in_tx(tx.as_mut(), &record).await?;
        tx.commit()
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;

        Ok(record)
    }

    async fn update(
        &self,
        actor: &CurrentUser,
        id: DebtId,
        input: DebtUpdateInput,
    ) -> Result<DebtRecord, DebtError> {
        let mut record = self.get_visible(actor, id).await?;
        if !actor.may_write(&record.representative) {
            return Err(DebtError::NotPermitted);
        }

        if let Some(payment) = input.payment {
            validate_amounts(record.principal, payment)?;
            record.payment = payment;
        }
        if let Some(due_date) = input.due_date {
            record.due_date = Some(due_date);
        }
        if let Some(comment) = input.comment {
            record.comment = if comment.trim().is_empty() {
                None
            } else {
                Some(comment)
            };
        }
        record.refresh(today());

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;
        self.debt_repo.update_in_tx(tx.as_mut(), &record).await?;
        tx.commit()
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;

        Ok(record)
    }

    async fn delete(&self, actor: &CurrentUser, id: DebtId) -> Result<(), DebtError> {
        if !actor.is_admin() {
            return Err(DebtError::NotPermitted);
        }

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;
        let removed = self.debt_repo.delete_in_tx(tx.as_mut(), id).await?;
        tx.commit()
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;

        if !removed {
            return Err(DebtError::NotFound);
        }
        Ok(())
    }

    async fn get(&self, actor: &CurrentUser, id: DebtId) -> Result<DebtRecord, DebtError> {
        let mut record = self.get_visible(actor, id).await?;
        record.refresh(today());
        Ok(record)
    }

    async fn list(
        &self,
        actor: &CurrentUser,
        filter: DebtFilter,
    ) -> Result<Vec<DebtRecord>, DebtError> {
        let mut records = self.debt_repo.list(&actor.scope, &filter).await?;
        let now = today();
        for r in &mut records {
            r.refresh(now);
        }
        // Status must be matched against the fresh value, so it is the one
        // filter applied after the fetch.
        if let Some(status) = filter.status {
            records.retain(|r| r.status == status);
        }
        Ok(records)
    }

    async fn import_csv(
        &self,
        actor: &CurrentUser,
        body: &[u8],
    ) -> Result<ImportOutcome, DebtError> {
        if !actor.is_admin() {
            return Err(DebtError::NotPermitted);
        }

        let (rows, ignored) = interchange::read_rows(body, today())
            .map_err(|e| DebtError::Validation(e.to_string()))?;

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;
        for row in &rows {
            let record = Self::build_record(
                &actor.username,
                NewDebtInput {
                    representative: row.representative.clone(),
                    client: row.client.clone(),
                    market: row.market.clone(),
                    principal: row.principal,
                    payment: row.payment,
                    invoice_date: row.invoice_date,
                    due_date: row.due_date,
                    comment: row.comment.clone(),
                },
            );
            self.debt_repo.insert_in_tx(tx.as_mut(), &record).await?;
        }
        tx.commit()
            .await
            .map_err(|e| DebtError::Store(e.to_string()))?;

        let outcome = ImportOutcome {
            imported: rows.len(),
            ignored,
        };
        let batch = nanoid!(10);
        tracing::info!(
            batch = %batch,
            imported = outcome.imported,
            ignored = outcome.ignored,
            by = %actor.username,
            "csv import"
        );
        Ok(outcome)
    }

    async fn export_csv(&self, actor: &CurrentUser) -> Result<Vec<u8>, DebtError> {
        let records = self.list(actor, DebtFilter::default()).await?;
        let mut out = Vec::new();
        interchange::write_rows(&mut out, &records)
            .map_err(|e| DebtError::InternalError(e.to_string()))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_screening_rejects_before_any_write() {
        assert!(validate_amounts(100_000, 0).is_ok());
        assert!(validate_amounts(100_000, 100_000).is_ok());
        assert!(matches!(
            validate_amounts(0, 0),
            Err(DebtError::Validation(_))
        ));
        assert!(matches!(
            validate_amounts(100_000, -1),
            Err(DebtError::Validation(_))
        ));
        assert!(matches!(
            validate_amounts(100_000, 100_001),
            Err(DebtError::Validation(_))
        ));
    }

    #[test]
    fn new_records_are_classified_at_creation() {
        let input = NewDebtInput {
            representative: "YAYA CAMARA".to_string(),
            client: "ISSA DOLO".to_string(),
            market: None,
            principal: 200_000,
            payment: 200_000,
            invoice_date: today(),
            due_date: None,
            comment: None,
        };
        let record = RealDebtService::build_record("admin", input);
        assert_eq!(record.balance, 0);
        assert_eq!(record.status, crate::domain_model::DebtStatus::Paid);
        assert_eq!(record.created_by, "admin");
    }
}
