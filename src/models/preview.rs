use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreviewRequest {
    pub body: String,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub values: HashMap<String, String>,

    #[serde(default)]
    pub skip_samples: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RenderedPreview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub body: String,
    pub unresolved: BTreeSet<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InsertRequest {
    pub body: String,
    pub cursor: usize,

    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Insertion {
    pub body: String,
    pub cursor: usize,
}
