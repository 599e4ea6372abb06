use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text {
        x: f64,
        y: f64,
        content: String,
        #[serde(rename = "fontSize")]
        font_size: f64,
        #[serde(rename = "fontFamily", default, skip_serializing_if = "Option::is_none")]
        font_family: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default)]
        align: TextAlign,
    },
    Logo {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        src: String,
    },
    Signature {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        #[serde(rename = "signerName", default, skip_serializing_if = "Option::is_none")]
        signer_name: Option<String>,
    },
}

impl Element {
    pub fn text(x: f64, y: f64, content: impl Into<String>, font_size: f64) -> Self {
        Element::Text {
            x,
            y,
            content: content.into(),
            font_size,
            font_family: None,
            color: None,
            align: TextAlign::default(),
        }
    }

    pub fn logo(x: f64, y: f64, width: f64, height: f64, src: impl Into<String>) -> Self {
        Element::Logo {
            x,
            y,
            width,
            height,
            src: src.into(),
        }
    }

    pub fn signature(x: f64, y: f64, width: f64, height: f64) -> Self {
        Element::Signature {
            x,
            y,
            width,
            height,
            src: None,
            signer_name: None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Element::Text { .. } => "text",
            Element::Logo { .. } => "logo",
            Element::Signature { .. } => "signature",
        }
    }

    pub fn position(&self) -> (f64, f64) {
        match self {
            Element::Text { x, y, .. }
            | Element::Logo { x, y, .. }
            | Element::Signature { x, y, .. } => (*x, *y),
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Element::Text { content, .. } => Some(content),
            Element::Signature { signer_name, .. } => signer_name.as_deref(),
            Element::Logo { .. } => None,
        }
    }

    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let (x, y) = self.position();

        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            problems.push(format!("{} element has invalid position ({}, {})", self.kind(), x, y));
        }

        match self {
            Element::Text { font_size, .. } => {
                if !(font_size.is_finite() && *font_size > 0.0) {
                    problems.push(format!("text element has invalid font size {}", font_size));
                }
            }
            Element::Logo { width, height, .. } | Element::Signature { width, height, .. } => {
                if !(width.is_finite() && *width > 0.0 && height.is_finite() && *height > 0.0) {
                    problems.push(format!(
                        "{} element has invalid size {}x{}",
                        self.kind(),
                        width,
                        height
                    ));
                }
            }
        }

        problems
    }
}
