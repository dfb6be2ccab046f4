use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::resource::{Resource, RestClient};

/// A product as served by the PNC API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgm_system_name: Option<String>,
    /// Fields this client does not model, such as `productVersions`
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Resource for Product {
    const PATH: &'static str = "/products";
}

pub type ProductClient = RestClient<Product>;
