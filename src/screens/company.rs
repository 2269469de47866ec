use std::sync::Arc;

use crate::api::company as api;
use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::forms::company::CompanyForm;
use crate::model::company::Company;
use crate::screens::report;
use crate::view::Notifier;

/// Company registration dialog.
pub struct CompanySetup {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl CompanySetup {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        client.require_session()?.require_admin()?;
        Ok(Self { client, notifier })
    }

    pub async fn submit(&self, form: &CompanyForm) -> ClientResult<Company> {
        let outcome = api::create(&self.client, form).await;
        report(
            self.notifier.as_ref(),
            outcome,
            "Company created",
            "Failed to create company",
        )
    }
}
