use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    engine,
    errors::{TemplateError, TemplateResult},
    models::{
        element::Element,
        permission::OrganizationPermissions,
        placeholder::PlaceholderCatalog,
        template::{CreateTemplate, Template, TemplateKind, TemplatePreview, UpdateTemplate},
    },
    repos::templates::TemplateRepository,
};

pub struct TemplateService<R> {
    repo: R,
    organization_id: Uuid,
    permissions: OrganizationPermissions,
    catalog: PlaceholderCatalog,
}

impl<R: TemplateRepository> TemplateService<R> {
    pub fn new(repo: R, organization_id: Uuid, permissions: OrganizationPermissions) -> Self {
        Self {
            repo,
            organization_id,
            permissions,
            catalog: PlaceholderCatalog::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: PlaceholderCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &PlaceholderCatalog {
        &self.catalog
    }

    pub async fn list(&self) -> TemplateResult<Vec<Template>> {
        self.repo.list(self.organization_id).await
    }

    pub async fn list_kind(&self, kind: TemplateKind) -> TemplateResult<Vec<Template>> {
        let templates = self.repo.list(self.organization_id).await?;
        Ok(templates.into_iter().filter(|t| t.kind == kind).collect())
    }

    pub async fn get(&self, id: Uuid) -> TemplateResult<Template> {
        self.repo.get(self.organization_id, id).await
    }

    pub async fn create(&self, request: CreateTemplate) -> TemplateResult<Template> {
        self.ensure_can_edit(request.kind)?;

        let problems = self.check(
            &request.name,
            request.subject.as_deref(),
            &request.body,
            &request.elements,
        );
        if !problems.is_empty() {
            return Err(TemplateError::Invalid(problems));
        }

        let template = self.repo.create(self.organization_id, request).await?;

        info!(
            template_id = %template.id,
            organization_id = %self.organization_id,
            kind = %template.kind,
            "Template created"
        );

        Ok(template)
    }

    pub async fn update(&self, id: Uuid, update: UpdateTemplate) -> TemplateResult<Template> {
        let current = self.repo.get(self.organization_id, id).await?;
        self.ensure_can_edit(current.kind)?;

        let mut candidate = current;
        candidate.apply(update.clone());
        let problems = self.validate(&candidate);
        if !problems.is_empty() {
            return Err(TemplateError::Invalid(problems));
        }

        let template = self.repo.update(self.organization_id, id, update).await?;

        info!(template_id = %id, "Template updated");

        Ok(template)
    }

    pub async fn delete(&self, id: Uuid) -> TemplateResult<()> {
        let current = self.repo.get(self.organization_id, id).await?;
        self.ensure_can_edit(current.kind)?;

        self.repo.delete(self.organization_id, id).await?;

        info!(template_id = %id, "Template deleted");

        Ok(())
    }

    pub async fn insert_placeholder(
        &self,
        id: Uuid,
        cursor: usize,
        identifier: &str,
    ) -> TemplateResult<(Template, usize)> {
        let current = self.repo.get(self.organization_id, id).await?;
        let (body, cursor) = engine::insert(&current.body, cursor, &engine::token(identifier));

        let template = self
            .update(
                id,
                UpdateTemplate {
                    body: Some(body),
                    ..Default::default()
                },
            )
            .await?;

        Ok((template, cursor))
    }

    pub fn validate(&self, template: &Template) -> Vec<String> {
        self.check(
            &template.name,
            template.subject.as_deref(),
            &template.body,
            &template.elements,
        )
    }

    fn check(
        &self,
        name: &str,
        subject: Option<&str>,
        body: &str,
        elements: &[Element],
    ) -> Vec<String> {
        let mut problems = Vec::new();

        if name.trim().is_empty() {
            problems.push("template name must not be empty".to_string());
        }

        for (index, element) in elements.iter().enumerate() {
            for problem in element.problems() {
                problems.push(format!("element {}: {}", index, problem));
            }
        }

        let mut used = engine::placeholders(body);
        if let Some(subject) = subject {
            used.extend(engine::placeholders(subject));
        }
        for content in elements.iter().filter_map(Element::content) {
            used.extend(engine::placeholders(content));
        }

        for identifier in used.iter().filter(|id| !self.catalog.contains(id)) {
            problems.push(format!("unknown placeholder {}", engine::token(identifier)));
        }

        if !problems.is_empty() {
            debug!(problems = problems.len(), "Template failed validation");
        }

        problems
    }

    pub fn preview(
        &self,
        template: &Template,
        overrides: &HashMap<String, String>,
    ) -> TemplatePreview {
        let mut values = self.catalog.sample_values();
        values.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

        let subject = template
            .subject
            .as_deref()
            .map(|s| engine::render(s, &values));
        let body = engine::render(&template.body, &values);
        let elements: Vec<Element> = template
            .elements
            .iter()
            .map(|element| render_element(element, &values))
            .collect();

        // Taken from the template, not the output: values may look like tokens.
        let unresolved: BTreeSet<String> = template
            .placeholders()
            .into_iter()
            .filter(|id| !values.contains_key(id))
            .collect();

        if !unresolved.is_empty() {
            warn!(
                template_id = %template.id,
                unresolved = unresolved.len(),
                "Preview left placeholders unresolved"
            );
        }

        TemplatePreview {
            subject,
            body,
            elements,
            unresolved,
        }
    }

    fn ensure_can_edit(&self, kind: TemplateKind) -> TemplateResult<()> {
        if self.permissions.can_edit(kind) {
            Ok(())
        } else {
            warn!(
                organization_id = %self.organization_id,
                kind = %kind,
                "Template edit rejected by organization permissions"
            );
            Err(TemplateError::Forbidden(format!(
                "organization may not edit {} templates",
                kind
            )))
        }
    }
}

fn render_element(element: &Element, values: &HashMap<String, String>) -> Element {
    let mut rendered = element.clone();
    match &mut rendered {
        Element::Text { content, .. } => *content = engine::render(content, values),
        Element::Signature {
            signer_name: Some(name),
            ..
        } => *name = engine::render(name, values),
        _ => {}
    }
    rendered
}
