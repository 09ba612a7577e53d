use crate::application_port::{DebtError, DebtFilter};
use crate::domain_model::{DebtId, DebtRecord, Scope};
use crate::domain_port::repo_tx::StorageTx;

#[async_trait::async_trait]
pub trait DebtRepo: Send + Sync {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        record: &DebtRecord,
    ) -> Result<(), DebtError>;

    /// Rewrites every mutable column, including the derived status fields.
    async fn update_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        record: &DebtRecord,
    ) -> Result<(), DebtError>;

    /// Returns whether a row was actually removed.
    async fn delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        id: DebtId,
    ) -> Result<bool, DebtError>;

    async fn get(&self, id: DebtId) -> Result<Option<DebtRecord>, DebtError>;

    /// Scope is a mandatory predicate applied in the query itself, not a
    /// post-fetch filter. The status part of the filter is NOT applied
    /// here: stored status may be stale against the wall clock, so the
    /// service filters on it after refreshing. Rows come back newest
    /// creation first.
    async fn list(&self, scope: &Scope, filter: &DebtFilter) -> Result<Vec<DebtRecord>, DebtError>;
}
