use serde::{Deserialize, Serialize};

use crate::models::template::TemplateKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationPermissions {
    #[serde(default)]
    pub can_edit_certificate_templates: bool,

    #[serde(default)]
    pub can_edit_email_templates: bool,
}

impl OrganizationPermissions {
    pub fn all() -> Self {
        Self {
            can_edit_certificate_templates: true,
            can_edit_email_templates: true,
        }
    }

    pub fn can_edit(&self, kind: TemplateKind) -> bool {
        match kind {
            TemplateKind::Certificate => self.can_edit_certificate_templates,
            TemplateKind::Email => self.can_edit_email_templates,
        }
    }
}
