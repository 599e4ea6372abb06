use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::{
    errors::{TemplateError, TemplateResult},
    models::template::{CreateTemplate, Template, UpdateTemplate},
    repos::templates::TemplateRepository,
};

#[derive(Default)]
pub struct InMemoryTemplateRepository {
    templates: RwLock<HashMap<Uuid, Template>>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn list(&self, organization_id: Uuid) -> TemplateResult<Vec<Template>> {
        let templates = self.templates.read().await;

        let mut owned: Vec<Template> = templates
            .values()
            .filter(|t| t.organization_id == organization_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(owned)
    }

    async fn get(&self, organization_id: Uuid, id: Uuid) -> TemplateResult<Template> {
        self.templates
            .read()
            .await
            .get(&id)
            .filter(|t| t.organization_id == organization_id)
            .cloned()
            .ok_or(TemplateError::NotFound(id))
    }

    async fn create(
        &self,
        organization_id: Uuid,
        request: CreateTemplate,
    ) -> TemplateResult<Template> {
        let template = Template::new(organization_id, request);

        debug!(
            template_id = %template.id,
            organization_id = %organization_id,
            kind = %template.kind,
            "Storing template"
        );

        self.templates
            .write()
            .await
            .insert(template.id, template.clone());

        Ok(template)
    }

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        update: UpdateTemplate,
    ) -> TemplateResult<Template> {
        let mut templates = self.templates.write().await;

        let template = templates
            .get_mut(&id)
            .filter(|t| t.organization_id == organization_id)
            .ok_or(TemplateError::NotFound(id))?;

        template.apply(update);

        debug!(template_id = %id, "Template updated");

        Ok(template.clone())
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> TemplateResult<()> {
        let mut templates = self.templates.write().await;

        match templates.get(&id) {
            Some(t) if t.organization_id == organization_id => {
                templates.remove(&id);
                debug!(template_id = %id, "Template deleted");
                Ok(())
            }
            _ => Err(TemplateError::NotFound(id)),
        }
    }
}
