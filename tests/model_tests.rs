use std::collections::BTreeMap;

use anyhow::Result;
use serde_json::json;
use template_service::models::{
    circuit_breaker::CircuitState,
    element::{Element, TextAlign},
    health::{DependencyHealth, HealthReport, HealthStatus},
    permission::OrganizationPermissions,
    placeholder::PlaceholderCatalog,
    response::ApiResponse,
    template::{CreateTemplate, Template, TemplateKind, UpdateTemplate},
};
use uuid::Uuid;

#[test]
fn test_elements_are_tagged_by_type() -> Result<()> {
    let element = Element::text(10.0, 20.0, "{{recipient_name}}", 24.0);
    let value = serde_json::to_value(&element)?;

    assert_eq!(value["type"], "text");
    assert_eq!(value["fontSize"], 24.0);
    assert_eq!(value["align"], "left");

    let logo: Element = serde_json::from_value(json!({
        "type": "logo",
        "x": 5,
        "y": 5,
        "width": 120,
        "height": 60,
        "src": "https://cdn.example.com/logo.png"
    }))?;
    assert_eq!(
        logo,
        Element::logo(5.0, 5.0, 120.0, 60.0, "https://cdn.example.com/logo.png")
    );

    Ok(())
}

#[test]
fn test_unknown_element_type_is_rejected() {
    let result = serde_json::from_value::<Element>(json!({ "type": "video", "x": 0, "y": 0 }));
    assert!(result.is_err());
}

#[test]
fn test_element_order_survives_round_trip() -> Result<()> {
    let template = Template::new(
        Uuid::new_v4(),
        CreateTemplate::certificate(
            "Completion",
            vec![
                Element::logo(0.0, 0.0, 100.0, 50.0, "logo.png"),
                Element::text(50.0, 120.0, "Certificate of Completion", 32.0),
                Element::text(50.0, 200.0, "{{student_name}}", 28.0),
                Element::signature(400.0, 500.0, 150.0, 60.0),
            ],
        ),
    );

    let encoded = serde_json::to_string(&template)?;
    let decoded: Template = serde_json::from_str(&encoded)?;

    assert_eq!(decoded.elements, template.elements);
    let kinds: Vec<&str> = decoded.elements.iter().map(Element::kind).collect();
    assert_eq!(kinds, vec!["logo", "text", "text", "signature"]);

    Ok(())
}

#[test]
fn test_template_placeholders_cover_subject_body_and_elements() {
    let mut request = CreateTemplate::email(
        "Welcome",
        "Your {{course_name}} certificate",
        "Dear {{student_name}}, download it at {{verification_url}}.",
    );
    request.elements = vec![
        Element::text(0.0, 0.0, "{{issue_date}}", 12.0),
        Element::Signature {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            src: None,
            signer_name: Some("{{signatory_name}}".to_string()),
        },
    ];

    let template = Template::new(Uuid::new_v4(), request);
    let found: Vec<String> = template.placeholders().into_iter().collect();

    assert_eq!(
        found,
        vec![
            "course_name",
            "issue_date",
            "signatory_name",
            "student_name",
            "verification_url"
        ]
    );
}

#[test]
fn test_apply_only_touches_provided_fields() {
    let mut template = Template::new(
        Uuid::new_v4(),
        CreateTemplate::email("Original", "Subject", "Body"),
    );
    let created_at = template.created_at;

    template.apply(UpdateTemplate {
        body: Some("New body".to_string()),
        ..Default::default()
    });

    assert_eq!(template.name, "Original");
    assert_eq!(template.subject.as_deref(), Some("Subject"));
    assert_eq!(template.body, "New body");
    assert_eq!(template.created_at, created_at);
    assert!(template.updated_at >= created_at);
}

#[test]
fn test_element_problems_flag_bad_geometry() {
    assert!(Element::text(1.0, 1.0, "x", 12.0).problems().is_empty());
    assert_eq!(Element::text(-1.0, 1.0, "x", 12.0).problems().len(), 1);
    assert_eq!(Element::text(1.0, 1.0, "x", 0.0).problems().len(), 1);
    assert_eq!(Element::logo(0.0, 0.0, 0.0, 10.0, "a").problems().len(), 1);
    assert_eq!(Element::signature(0.0, 0.0, 10.0, -2.0).problems().len(), 1);
}

#[test]
fn test_text_align_defaults_to_left() -> Result<()> {
    let element: Element = serde_json::from_value(json!({
        "type": "text", "x": 0, "y": 0, "content": "Hi", "fontSize": 10
    }))?;

    match element {
        Element::Text { align, .. } => assert_eq!(align, TextAlign::Left),
        other => panic!("expected text element, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_default_catalog_lookups() {
    let catalog = PlaceholderCatalog::default();

    let names: Vec<&str> = catalog.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Recipient", "Course", "Certificate", "Organization"]);

    assert!(catalog.contains("student_name"));
    assert!(!catalog.contains("favourite_colour"));
    assert_eq!(catalog.label("course_name"), Some("Course Name"));

    let samples = catalog.sample_values();
    assert_eq!(samples.len(), catalog.placeholders().count());
    assert_eq!(samples.get("grade").map(String::as_str), Some("A"));
}

#[test]
fn test_permissions_gate_by_kind() {
    let permissions = OrganizationPermissions {
        can_edit_certificate_templates: true,
        can_edit_email_templates: false,
    };

    assert!(permissions.can_edit(TemplateKind::Certificate));
    assert!(!permissions.can_edit(TemplateKind::Email));
    assert!(!OrganizationPermissions::default().can_edit(TemplateKind::Certificate));
    assert!(OrganizationPermissions::all().can_edit(TemplateKind::Email));
}

#[test]
fn test_envelope_decodes_without_optional_fields() -> Result<()> {
    let envelope: ApiResponse<Vec<u32>> =
        serde_json::from_value(json!({ "success": true, "data": [1, 2, 3] }))?;

    assert!(envelope.success);
    assert_eq!(envelope.data, Some(vec![1, 2, 3]));
    assert_eq!(envelope.message, None);

    let failed: ApiResponse<Vec<u32>> =
        serde_json::from_value(json!({ "success": false, "message": "Plan limit reached" }))?;
    assert_eq!(failed.failure_reason(), "Plan limit reached");

    Ok(())
}

fn decode_envelope<T: serde::de::DeserializeOwned>(raw: &str) -> Result<ApiResponse<T>> {
    Ok(serde_json::from_str::<ApiResponse<T>>(raw)?)
}

#[test]
fn test_envelope_decodes_for_any_payload_type() -> Result<()> {
    let missing: ApiResponse<Vec<Template>> = decode_envelope(r#"{ "success": true }"#)?;
    assert_eq!(missing.data, None);

    let kind: ApiResponse<TemplateKind> =
        decode_envelope(r#"{ "success": true, "data": "email" }"#)?;
    assert_eq!(kind.data, Some(TemplateKind::Email));

    Ok(())
}

#[test]
fn test_health_report_takes_worst_status() -> Result<()> {
    let mut checks = BTreeMap::new();
    checks.insert("api".to_string(), DependencyHealth::reachable(CircuitState::Closed, 12));
    checks.insert("cache".to_string(), DependencyHealth::tripped(CircuitState::HalfOpen));

    let report = HealthReport::from_checks(checks);
    assert_eq!(report.status, HealthStatus::Degraded);

    let value = serde_json::to_value(&report)?;
    assert_eq!(value["checks"]["api"]["circuit_breaker"], "closed");
    assert_eq!(value["checks"]["api"]["response_time_ms"], 12);
    assert_eq!(value["checks"]["cache"]["circuit_breaker"], "half_open");
    assert_eq!(value["checks"]["cache"]["error"], "Circuit breaker in recovery mode");

    assert_eq!(HealthReport::from_checks(BTreeMap::new()).status, HealthStatus::Healthy);

    Ok(())
}
