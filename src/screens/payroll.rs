use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::payroll as api;
use crate::client::ApiClient;
use crate::error::{ClientResult, ValidationError};
use crate::model::payroll::{PayrollQuery, PayrollRecord, PayrollSettings};
use crate::models::{MessageResponse, PageRequest};
use crate::screens::{Confirm, confirmed, report};
use crate::view::{ListView, Notifier, Searchable};

impl Searchable for PayrollRecord {
    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.employee_name.as_deref().unwrap_or_default(),
            self.period,
            self.status
        )
    }
}

/// Column totals under the payroll table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayrollTotals {
    pub gross: Decimal,
    pub deductions: Decimal,
    pub net: Decimal,
}

pub struct PayrollScreen {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    pub list: ListView<PayrollRecord>,
    pub query: PayrollQuery,
    pub page: PageRequest,
}

impl PayrollScreen {
    /// Payroll is visible to admins only.
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        client.require_session()?.require_admin()?;
        Ok(Self {
            client,
            notifier,
            list: ListView::new(10),
            query: PayrollQuery::default(),
            page: PageRequest::default(),
        })
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let (client, query, page) = (&self.client, &self.query, self.page);
        self.list
            .load_page(|| api::list(client, query, page), "Failed to load payroll")
            .await
    }

    /// Sums of what the server computed; nothing is recalculated here.
    pub fn totals(&self) -> PayrollTotals {
        self.list
            .items()
            .iter()
            .fold(PayrollTotals::default(), |acc, r| PayrollTotals {
                gross: acc.gross + r.gross_salary,
                deductions: acc.deductions + r.total_deductions(),
                net: acc.net + r.net_salary,
            })
    }

    /// Finalize the selected records after confirmation. Only drafts are
    /// sent; when none of the selection is a draft no request is made.
    pub async fn finalize(
        &mut self,
        selected: &[Uuid],
        confirm: &dyn Confirm,
    ) -> ClientResult<MessageResponse> {
        let drafts: Vec<Uuid> = self
            .list
            .items()
            .iter()
            .filter(|r| selected.contains(&r.id) && r.can_finalize())
            .map(|r| r.id)
            .collect();
        let skipped = selected.len().saturating_sub(drafts.len());
        if skipped > 0 {
            warn!(skipped, "Ignoring payroll records that are not drafts");
        }

        let outcome = if drafts.is_empty() {
            Err(ValidationError::new("payroll_ids", "Only draft payroll can be finalized").into())
        } else {
            let prompt = format!(
                "Finalize {} payroll record(s)? This marks them as paid.",
                drafts.len()
            );
            match confirmed(confirm, &prompt) {
                Ok(()) => api::finalize(&self.client, drafts).await,
                Err(e) => Err(e),
            }
        };
        let response = report(
            self.notifier.as_ref(),
            outcome,
            "Payroll finalized",
            "Failed to finalize payroll",
        )?;
        self.refresh().await.ok();
        Ok(response)
    }

    pub async fn settings(&self) -> ClientResult<PayrollSettings> {
        api::settings(&self.client).await
    }

    pub async fn save_settings(&self, settings: &PayrollSettings) -> ClientResult<PayrollSettings> {
        let outcome = api::update_settings(&self.client, settings).await;
        let saved = report(
            self.notifier.as_ref(),
            outcome,
            "Payroll settings saved",
            "Failed to save payroll settings",
        )?;
        info!(payday = saved.payday, "Payroll settings updated");
        Ok(saved)
    }
}
