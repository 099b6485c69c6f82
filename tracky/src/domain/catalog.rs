use serde::{Deserialize, Serialize};

/// A client work is billed to.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
}

/// A project belonging to a client.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client_id: i64,
}

/// A task belonging to a project; time entries are tracked against tasks.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
}
