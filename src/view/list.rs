//! Fetch-list-and-render state shared by every table screen.

use std::future::Future;

use tracing::warn;

use crate::error::ClientResult;
use crate::models::{PageMeta, Paginated};

/// Rows that take part in the free-text search box.
pub trait Searchable {
    /// Text the query is matched against, e.g. name and code.
    fn search_text(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    state: LoadState,
    query: String,
    page: usize,
    page_size: usize,
    server_meta: Option<PageMeta>,
}

impl<T: Searchable + Clone> ListView<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            state: LoadState::Idle,
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
            server_meta: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Run one fetch and replace the rows with its result. On failure the
    /// previous rows are kept and the error message is stored for display.
    pub async fn load<F, Fut>(&mut self, fetch: F, failure: &str) -> ClientResult<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Vec<T>>>,
    {
        self.state = LoadState::Loading;
        match fetch().await {
            Ok(items) => {
                self.replace(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "{failure}");
                self.state = LoadState::Failed(e.toast_message(failure));
                Err(e)
            }
        }
    }

    /// Same as [`ListView::load`] for endpoints with server pagination.
    pub async fn load_page<F, Fut>(&mut self, fetch: F, failure: &str) -> ClientResult<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Paginated<T>>>,
    {
        self.state = LoadState::Loading;
        match fetch().await {
            Ok(page) => {
                let meta = page.meta;
                self.replace(page.data);
                self.server_meta = meta;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "{failure}");
                self.state = LoadState::Failed(e.toast_message(failure));
                Err(e)
            }
        }
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.server_meta = None;
        self.state = LoadState::Loaded;
        self.clamp_page();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows whose search text contains the query, case-insensitively.
    pub fn filtered(&self) -> Vec<&T> {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| item.search_text().to_lowercase().contains(&needle))
            .collect()
    }

    /// Current page; with server pagination, the page the server returned.
    pub fn page(&self) -> usize {
        match self.server_meta {
            Some(meta) => meta.current_page.max(1) as usize,
            None => self.page,
        }
    }

    /// Total pages; server metadata wins over client-side slicing.
    pub fn page_count(&self) -> usize {
        match self.server_meta {
            Some(meta) => meta.last_page.max(1) as usize,
            None => self.filtered().len().div_ceil(self.page_size).max(1),
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    pub fn server_meta(&self) -> Option<PageMeta> {
        self.server_meta
    }

    /// Rows of the current page. With server pagination the server already
    /// returned exactly one page.
    pub fn page_items(&self) -> Vec<&T> {
        let filtered = self.filtered();
        if self.server_meta.is_some() {
            return filtered;
        }
        filtered
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    fn clamp_page(&mut self) {
        let count = self.page_count();
        if self.page > count {
            self.page = count;
        }
    }
}
