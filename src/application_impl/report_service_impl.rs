use crate::application_port::{Dashboard, DebtError, DebtFilter, ReportService};
use crate::domain_model::{
    ClientDetail, ClientSummary, CurrentUser, DebtRecord, RepresentativeSummary, report,
};
use crate::domain_port::DebtRepo;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;

const DASHBOARD_TOP_OVERDUE: usize = 5;

pub struct RealReportService {
    debt_repo: Arc<dyn DebtRepo>,
}

impl RealReportService {
    pub fn new(debt_repo: Arc<dyn DebtRepo>) -> Self {
        Self { debt_repo }
    }

    /// Scoped fetch with a wall-clock status refresh, the precondition of
    /// every fold in the report module.
    async fn fresh_records(
        &self,
        actor: &CurrentUser,
        filter: &DebtFilter,
    ) -> Result<Vec<DebtRecord>, DebtError> {
        let mut records = self.debt_repo.list(&actor.scope, filter).await?;
        let today = Utc::now().date_naive();
        for r in &mut records {
            r.refresh(today);
        }
        Ok(records)
    }
}

#[async_trait::async_trait]
impl ReportService for RealReportService {
    async fn dashboard(&self, actor: &CurrentUser) -> Result<Dashboard, DebtError> {
        let records = self.fresh_records(actor, &DebtFilter::default()).await?;
        let visible = actor.scope.visible_roster();

        Ok(Dashboard {
            global: report::aggregate_global(&records),
            per_representative: report::aggregate_by_representative(&records, &visible),
            top_overdue: report::top_overdue(&records, Some(DASHBOARD_TOP_OVERDUE)),
        })
    }

    async fn by_representative(
        &self,
        actor: &CurrentUser,
    ) -> Result<BTreeMap<String, RepresentativeSummary>, DebtError> {
        let records = self.fresh_records(actor, &DebtFilter::default()).await?;
        let visible = actor.scope.visible_roster();
        Ok(report::aggregate_by_representative(&records, &visible))
    }

    async fn by_client(
        &self,
        actor: &CurrentUser,
        representative: Option<String>,
    ) -> Result<Vec<ClientSummary>, DebtError> {
        let filter = DebtFilter {
            representative,
            ..DebtFilter::default()
        };
        let records = self.fresh_records(actor, &filter).await?;
        Ok(report::aggregate_by_client(&records))
    }

    async fn client_detail(
        &self,
        actor: &CurrentUser,
        client: &str,
    ) -> Result<ClientDetail, DebtError> {
        let records = self.fresh_records(actor, &DebtFilter::default()).await?;
        Ok(report::client_detail(&records, client))
    }
}
