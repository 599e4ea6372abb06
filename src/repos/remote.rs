use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::{
    clients::api::ApiClient,
    errors::{TemplateError, TemplateResult},
    models::template::{CreateTemplate, Template, UpdateTemplate},
    repos::templates::TemplateRepository,
};

pub struct RemoteTemplateRepository {
    client: Arc<ApiClient>,
}

impl RemoteTemplateRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn collection(organization_id: Uuid) -> String {
        format!("/api/v1/organizations/{}/templates", organization_id)
    }

    fn item(organization_id: Uuid, id: Uuid) -> String {
        format!("/api/v1/organizations/{}/templates/{}", organization_id, id)
    }
}

fn not_found_as(id: Uuid) -> impl FnOnce(TemplateError) -> TemplateError {
    move |e| match e {
        TemplateError::Status { status: 404, .. } => TemplateError::NotFound(id),
        other => other,
    }
}

#[async_trait]
impl TemplateRepository for RemoteTemplateRepository {
    async fn list(&self, organization_id: Uuid) -> TemplateResult<Vec<Template>> {
        let mut templates: Vec<Template> =
            self.client.get(&Self::collection(organization_id)).await?;

        // The API does not promise an order.
        templates.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });

        debug!(
            organization_id = %organization_id,
            count = templates.len(),
            "Fetched templates"
        );

        Ok(templates)
    }

    async fn get(&self, organization_id: Uuid, id: Uuid) -> TemplateResult<Template> {
        self.client
            .get(&Self::item(organization_id, id))
            .await
            .map_err(not_found_as(id))
    }

    async fn create(
        &self,
        organization_id: Uuid,
        request: CreateTemplate,
    ) -> TemplateResult<Template> {
        self.client
            .post(&Self::collection(organization_id), &request)
            .await
    }

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        update: UpdateTemplate,
    ) -> TemplateResult<Template> {
        self.client
            .put(&Self::item(organization_id, id), &update)
            .await
            .map_err(not_found_as(id))
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> TemplateResult<()> {
        self.client
            .delete(&Self::item(organization_id, id))
            .await
            .map_err(not_found_as(id))
    }
}
