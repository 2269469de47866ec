use std::sync::Arc;

use uuid::Uuid;

use crate::api::employee as api;
use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::model::employee::{CreateEmployee, Employee, EmployeeQuery, UpdateEmployee};
use crate::models::PageRequest;
use crate::screens::{Confirm, confirmed, report};
use crate::view::{ListView, Notifier, SearchDebouncer, Searchable};

impl Searchable for Employee {
    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.full_name,
            self.employee_code,
            self.email.as_deref().unwrap_or_default()
        )
    }
}

pub struct EmployeeScreen {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    debouncer: SearchDebouncer,
    pub list: ListView<Employee>,
    pub query: EmployeeQuery,
    pub page: PageRequest,
}

impl EmployeeScreen {
    pub fn new(
        client: ApiClient,
        notifier: Arc<dyn Notifier>,
        debouncer: SearchDebouncer,
    ) -> ClientResult<Self> {
        client.require_session()?.require_reviewer()?;
        Ok(Self {
            client,
            notifier,
            debouncer,
            list: ListView::new(10),
            query: EmployeeQuery::default(),
            page: PageRequest::default(),
        })
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let (client, query, page) = (&self.client, &self.query, self.page);
        self.list
            .load_page(|| api::list(client, query, page), "Failed to load employees")
            .await
    }

    /// Server-side search, debounced. Returns whether this keystroke was the
    /// one that triggered the fetch.
    pub async fn search(&mut self, text: &str) -> ClientResult<bool> {
        let Some(settled) = self.debouncer.settle(text).await else {
            return Ok(false);
        };
        self.query.search = Some(settled).filter(|s| !s.trim().is_empty());
        self.page = PageRequest::new(1, self.page.per_page);
        self.refresh().await?;
        Ok(true)
    }

    pub async fn create(&mut self, payload: &CreateEmployee) -> ClientResult<Employee> {
        let outcome = api::create(&self.client, payload).await;
        let employee = report(
            self.notifier.as_ref(),
            outcome,
            "Employee created",
            "Failed to create employee",
        )?;
        self.refresh().await.ok();
        Ok(employee)
    }

    pub async fn update(&mut self, id: Uuid, payload: &UpdateEmployee) -> ClientResult<Employee> {
        let outcome = api::update(&self.client, id, payload).await;
        let employee = report(
            self.notifier.as_ref(),
            outcome,
            "Employee updated",
            "Failed to update employee",
        )?;
        self.refresh().await.ok();
        Ok(employee)
    }

    pub async fn delete(&mut self, id: Uuid, confirm: &dyn Confirm) -> ClientResult<()> {
        let outcome = match self.client.require_session().and_then(|s| s.require_admin()) {
            Ok(()) => match confirmed(confirm, "Delete this employee? This cannot be undone.") {
                Ok(()) => api::delete(&self.client, id).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        report(
            self.notifier.as_ref(),
            outcome,
            "Employee deleted",
            "Failed to delete employee",
        )?;
        self.refresh().await.ok();
        Ok(())
    }
}
