use tracing::info;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::forms::company::CompanyForm;
use crate::model::company::Company;
use crate::routes;

/// Registers the company; the logo travels in the same multipart body.
pub async fn create(client: &ApiClient, form: &CompanyForm) -> ClientResult<Company> {
    let multipart = form.to_multipart()?;
    let company: Company = client.post_multipart(routes::COMPANIES, multipart).await?;
    info!(company_id = %company.id, name = %company.name, "Company created");
    Ok(company)
}
