use tracing::{debug, info};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::forms::employee::{validate_employee_update, validate_new_employee};
use crate::model::employee::{CreateEmployee, Employee, EmployeeQuery, UpdateEmployee};
use crate::models::{MessageResponse, PageRequest, Paginated};
use crate::routes;
use crate::utils::patch::build_patch_body;

pub async fn list(
    client: &ApiClient,
    query: &EmployeeQuery,
    page: PageRequest,
) -> ClientResult<Paginated<Employee>> {
    let mut params = query.to_query();
    page.push_query(&mut params);
    debug!(?params, "Fetching employees");
    client.get_with(routes::EMPLOYEES, params).await
}

pub async fn get(client: &ApiClient, id: Uuid) -> ClientResult<Employee> {
    client.get(&routes::employee(id)).await
}

pub async fn create(client: &ApiClient, payload: &CreateEmployee) -> ClientResult<Employee> {
    validate_new_employee(payload)?;
    let employee: Employee = client.post(routes::EMPLOYEES, payload).await?;
    info!(employee_id = %employee.id, code = %employee.employee_code, "Employee created");
    Ok(employee)
}

/// PATCH carrying only the fields that were filled in.
pub async fn update(
    client: &ApiClient,
    id: Uuid,
    payload: &UpdateEmployee,
) -> ClientResult<Employee> {
    validate_employee_update(payload)?;
    let body = build_patch_body(payload)?;
    client.patch(&routes::employee(id), &body).await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> ClientResult<MessageResponse> {
    let response = client.delete(&routes::employee(id)).await?;
    info!(employee_id = %id, "Employee deleted");
    Ok(response)
}
