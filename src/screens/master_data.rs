use std::sync::Arc;

use uuid::Uuid;

use crate::api::master_data as api;
use crate::client::ApiClient;
use crate::error::{ClientResult, ValidationError};
use crate::model::master_data::{Branch, Grade, MasterData, Position};
use crate::screens::{Confirm, confirmed, report};
use crate::view::{ActionGuard, ListView, Notifier, Searchable};

impl Searchable for Branch {
    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.address.as_deref().unwrap_or_default())
    }
}

impl Searchable for Grade {
    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.level)
    }
}

impl Searchable for Position {
    fn search_text(&self) -> String {
        self.name.clone()
    }
}

/// One CRUD table for any master data kind.
pub struct CrudManager<K: MasterData + Searchable> {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    guard: ActionGuard,
    pub list: ListView<K>,
}

impl<K: MasterData + Searchable> CrudManager<K> {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        client.require_session()?.require_admin()?;
        Ok(Self {
            client,
            notifier,
            guard: ActionGuard::new(),
            list: ListView::new(10),
        })
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let client = &self.client;
        let failure = format!("Failed to load {}s", K::LABEL);
        self.list.load(|| api::list::<K>(client), &failure).await
    }

    pub async fn create(&mut self, payload: &K::Payload) -> ClientResult<K> {
        let outcome = api::create::<K>(&self.client, payload).await;
        let item = report(
            self.notifier.as_ref(),
            outcome,
            &format!("{} created", capitalize(K::LABEL)),
            &format!("Failed to create {}", K::LABEL),
        )?;
        self.refresh().await.ok();
        Ok(item)
    }

    pub async fn update(&mut self, id: Uuid, payload: &K::Payload) -> ClientResult<K> {
        let outcome = self
            .guard
            .run(id, api::update::<K>(&self.client, id, payload))
            .await;
        let item = report(
            self.notifier.as_ref(),
            outcome,
            &format!("{} updated", capitalize(K::LABEL)),
            &format!("Failed to update {}", K::LABEL),
        )?;
        self.refresh().await.ok();
        Ok(item)
    }

    pub async fn delete(&mut self, id: Uuid, confirm: &dyn Confirm) -> ClientResult<()> {
        let name = self
            .list
            .items()
            .iter()
            .find(|k| k.id() == id)
            .map(|k| k.name().to_string());
        let outcome = match name {
            None => Err(ValidationError::new("id", format!("Unknown {}", K::LABEL)).into()),
            Some(name) => match confirmed(confirm, &format!("Delete {} \"{name}\"?", K::LABEL)) {
                Ok(()) => self.guard.run(id, api::delete::<K>(&self.client, id)).await,
                Err(e) => Err(e),
            },
        };
        report(
            self.notifier.as_ref(),
            outcome,
            &format!("{} deleted", capitalize(K::LABEL)),
            &format!("Failed to delete {}", K::LABEL),
        )?;
        self.refresh().await.ok();
        Ok(())
    }

    pub fn is_busy(&self, id: Uuid) -> bool {
        self.guard.is_busy(id)
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
