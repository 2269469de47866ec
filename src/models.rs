use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Success body that may or may not be wrapped in `{"data": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum Wrapped<T> {
    Data { data: T },
    Bare(T),
}

impl<T> Wrapped<T> {
    pub fn into_inner(self) -> T {
        match self {
            Wrapped::Data { data } => data,
            Wrapped::Bare(inner) => inner,
        }
    }
}

/// Plain acknowledgement returned by action endpoints.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
}

/// Server paginated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl<T> Paginated<T> {
    /// Meta for a list the server returned without pagination info.
    pub fn meta_or_single_page(&self) -> PageMeta {
        self.meta.unwrap_or(PageMeta {
            current_page: 1,
            per_page: self.data.len() as u32,
            total: self.data.len() as u64,
            last_page: 1,
        })
    }
}

/// Paging parameters sent as query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
        }
    }

    pub fn push_query(&self, query: &mut Vec<(String, String)>) {
        query.push(("page".to_string(), self.page.to_string()));
        query.push(("per_page".to_string(), self.per_page.to_string()));
    }
}

#[derive(Debug, Serialize)]
pub struct LoginReqDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// JWT claims issued by the HRIS API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Present only if this user is linked to an employee record
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    #[serde(default)]
    pub company_id: Option<Uuid>,
}
