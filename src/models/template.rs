use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{engine, models::element::Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Certificate,
    Email,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateKind::Certificate => write!(f, "certificate"),
            TemplateKind::Email => write!(f, "email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub kind: TemplateKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub elements: Vec<Element>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    pub fn new(organization_id: Uuid, request: CreateTemplate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            organization_id,
            name: request.name,
            kind: request.kind,
            subject: request.subject,
            body: request.body,
            elements: request.elements,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn placeholders(&self) -> BTreeSet<String> {
        let mut found = engine::placeholders(&self.body);

        if let Some(subject) = &self.subject {
            found.extend(engine::placeholders(subject));
        }

        for element in &self.elements {
            if let Some(content) = element.content() {
                found.extend(engine::placeholders(content));
            }
        }

        found
    }

    pub fn apply(&mut self, update: UpdateTemplate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(subject) = update.subject {
            self.subject = Some(subject);
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(elements) = update.elements {
            self.elements = elements;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    pub kind: TemplateKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub elements: Vec<Element>,
}

impl CreateTemplate {
    pub fn certificate(name: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            name: name.into(),
            kind: TemplateKind::Certificate,
            subject: None,
            body: String::new(),
            elements,
        }
    }

    pub fn email(name: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TemplateKind::Email,
            subject: Some(subject.into()),
            body: body.into(),
            elements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Element>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePreview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub body: String,
    pub elements: Vec<Element>,
    pub unresolved: BTreeSet<String>,
}
