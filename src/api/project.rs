use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::resource::{Resource, RestClient};

/// A project as served by the PNC API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_tracker_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engineering_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_leader: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Resource for Project {
    const PATH: &'static str = "/projects";
}

pub type ProjectClient = RestClient<Project>;
