//! Branches, grades and positions: the flat lookup tables edited through the
//! shared CRUD screen.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One kind of master data. Each kind names its collection path and the
/// payload it accepts, so the CRUD screen never deals with optional,
/// kind-specific fields.
pub trait MasterData: DeserializeOwned + Clone + Send + Sync + 'static {
    type Payload: Serialize + Send + Sync;

    const COLLECTION: &'static str;
    const LABEL: &'static str;

    fn id(&self) -> Uuid;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchPayload {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl MasterData for Branch {
    type Payload = BranchPayload;
    const COLLECTION: &'static str = "/branches";
    const LABEL: &'static str = "branch";

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: Uuid,
    pub name: String,
    /// Seniority rank, lower is junior.
    #[serde(default)]
    pub level: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradePayload {
    pub name: String,
    pub level: u32,
}

impl MasterData for Grade {
    type Payload = GradePayload;
    const COLLECTION: &'static str = "/grades";
    const LABEL: &'static str = "grade";

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionPayload {
    pub name: String,
    pub description: Option<String>,
}

impl MasterData for Position {
    type Payload = PositionPayload;
    const COLLECTION: &'static str = "/positions";
    const LABEL: &'static str = "position";

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
