use super::DebtError;
use crate::domain_model::{
    ClientDetail, ClientSummary, CurrentUser, DebtRecord, GlobalSummary, RepresentativeSummary,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub global: GlobalSummary,
    pub per_representative: BTreeMap<String, RepresentativeSummary>,
    pub top_overdue: Vec<DebtRecord>,
}

/// Read-only roll-ups over the caller's visible record set. Every
/// operation refreshes status against today before folding, so a record
/// can change bucket purely by the passage of time.
#[async_trait::async_trait]
pub trait ReportService: Send + Sync {
    async fn dashboard(&self, actor: &CurrentUser) -> Result<Dashboard, DebtError>;
    async fn by_representative(
        &self,
        actor: &CurrentUser,
    ) -> Result<BTreeMap<String, RepresentativeSummary>, DebtError>;
    async fn by_client(
        &self,
        actor: &CurrentUser,
        representative: Option<String>,
    ) -> Result<Vec<ClientSummary>, DebtError>;
    async fn client_detail(
        &self,
        actor: &CurrentUser,
        client: &str,
    ) -> Result<ClientDetail, DebtError>;
}
