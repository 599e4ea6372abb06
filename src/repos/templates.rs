use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::TemplateResult,
    models::template::{CreateTemplate, Template, UpdateTemplate},
};

/// Every operation is scoped to one organization; a template that belongs to
/// another organization is reported as not found.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn list(&self, organization_id: Uuid) -> TemplateResult<Vec<Template>>;

    async fn get(&self, organization_id: Uuid, id: Uuid) -> TemplateResult<Template>;

    async fn create(
        &self,
        organization_id: Uuid,
        request: CreateTemplate,
    ) -> TemplateResult<Template>;

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        update: UpdateTemplate,
    ) -> TemplateResult<Template>;

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> TemplateResult<()>;
}
