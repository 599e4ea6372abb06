use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub identifier: String,
    pub label: String,
    pub sample: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderCategory {
    pub name: String,
    pub placeholders: Vec<Placeholder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderCatalog {
    pub categories: Vec<PlaceholderCategory>,
}

impl PlaceholderCatalog {
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.categories.iter().flat_map(|c| c.placeholders.iter())
    }

    pub fn get(&self, identifier: &str) -> Option<&Placeholder> {
        self.placeholders().find(|p| p.identifier == identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    pub fn label(&self, identifier: &str) -> Option<&str> {
        self.get(identifier).map(|p| p.label.as_str())
    }

    pub fn sample_values(&self) -> HashMap<String, String> {
        self.placeholders()
            .map(|p| (p.identifier.clone(), p.sample.clone()))
            .collect()
    }
}

fn category(name: &str, entries: &[(&str, &str, &str)]) -> PlaceholderCategory {
    PlaceholderCategory {
        name: name.to_string(),
        placeholders: entries
            .iter()
            .map(|(identifier, label, sample)| Placeholder {
                identifier: identifier.to_string(),
                label: label.to_string(),
                sample: sample.to_string(),
            })
            .collect(),
    }
}

impl Default for PlaceholderCatalog {
    fn default() -> Self {
        Self {
            categories: vec![
                category(
                    "Recipient",
                    &[
                        ("recipient_name", "Recipient Name", "John Doe"),
                        ("recipient_email", "Recipient Email", "john.doe@example.com"),
                        ("student_name", "Student Name", "Jane Smith"),
                    ],
                ),
                category(
                    "Course",
                    &[
                        ("course_name", "Course Name", "Introduction to Data Science"),
                        ("course_duration", "Course Duration", "40 hours"),
                        ("completion_date", "Completion Date", "2024-06-30"),
                        ("grade", "Grade", "A"),
                    ],
                ),
                category(
                    "Certificate",
                    &[
                        ("certificate_id", "Certificate ID", "CERT-2024-000123"),
                        ("issue_date", "Issue Date", "2024-07-01"),
                        ("expiry_date", "Expiry Date", "2026-07-01"),
                        (
                            "verification_url",
                            "Verification URL",
                            "https://verify.example.com/CERT-2024-000123",
                        ),
                    ],
                ),
                category(
                    "Organization",
                    &[
                        ("organization_name", "Organization Name", "Acme Academy"),
                        ("instructor_name", "Instructor Name", "Dr. Alan Turing"),
                        ("signatory_name", "Signatory Name", "Grace Hopper"),
                    ],
                ),
            ],
        }
    }
}
