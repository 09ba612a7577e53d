use crate::domain_model::{CurrentUser, DebtId, DebtRecord, DebtStatus};
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum DebtError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("not permitted")]
    NotPermitted,
    #[error("not found")]
    NotFound,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone)]
pub struct NewDebtInput {
    pub representative: String,
    pub client: String,
    pub market: Option<String>,
    pub principal: i64,
    pub payment: i64,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub comment: Option<String>,
}

/// Partial amendment: record a payment, move the due date, or replace the
/// comment. Absent fields are left untouched; the balance and derived
/// status are always recomputed.
#[derive(Debug, Clone, Default)]
pub struct DebtUpdateInput {
    pub payment: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DebtFilter {
    /// Exact match on the owning representative.
    pub representative: Option<String>,
    /// Substring match on the client name.
    pub client: Option<String>,
    /// Matched against the wall-clock-fresh status, not the stored one.
    pub status: Option<DebtStatus>,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ImportOutcome {
    pub imported: usize,
    pub ignored: usize,
}

#[async_trait::async_trait]
pub trait DebtService: Send + Sync {
    async fn create(&self, actor: &CurrentUser, input: NewDebtInput)
    -> Result<DebtRecord, DebtError>;
    async fn update(
        &self,
        actor: &CurrentUser,
        id: DebtId,
        input: DebtUpdateInput,
    ) -> Result<DebtRecord, DebtError>;
    /// Administrator only. Permanent; there is no soft delete.
    async fn delete(&self, actor: &CurrentUser, id: DebtId) -> Result<(), DebtError>;
    async fn get(&self, actor: &CurrentUser, id: DebtId) -> Result<DebtRecord, DebtError>;
    async fn list(
        &self,
        actor: &CurrentUser,
        filter: DebtFilter,
    ) -> Result<Vec<DebtRecord>, DebtError>;
    /// Bulk CSV import, administrator only. Bad rows are skipped and
    /// counted, never fatal.
    async fn import_csv(&self, actor: &CurrentUser, body: &[u8])
    -> Result<ImportOutcome, DebtError>;
    /// Scope-filtered CSV export of the caller's visible records.
    async fn export_csv(&self, actor: &CurrentUser) -> Result<Vec<u8>, DebtError>;
}
