use serde::{Deserialize, Serialize};

/// The kind of rich text content, as a typed vocabulary.
///
/// Each variant carries its specific data, making invalid states
/// unrepresentable: an equation run always has an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextType {
    Text {
        #[serde(default)]
        text: Option<TextContent>,
    },
    Mention {
        #[serde(default)]
        mention: Option<serde_json::Value>,
    },
    Equation {
        equation: EquationData,
    },
    /// A run type this crate has no dedicated handling for; rendered from `plain_text`.
    #[serde(other)]
    Unknown,
}

/// Rich text item with formatting annotations.
///
/// The `text_type` field carries the content variant (text, mention or equation)
/// and `plain_text` provides the rendering for every variant except equations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    #[serde(flatten)]
    pub text_type: RichTextType,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item.
    ///
    /// ```ignore
    /// RichTextItem::plain_text("hello")
    /// ```
    pub fn plain_text(text: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                text: Some(TextContent {
                    content: text.to_string(),
                    link: None,
                }),
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// Create an inline equation run.
    pub fn equation(expression: &str) -> Self {
        Self {
            text_type: RichTextType::Equation {
                equation: EquationData {
                    expression: expression.to_string(),
                },
            },
            annotations: Annotations::default(),
            plain_text: expression.to_string(),
            href: None,
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    /// The inline math expression, when this run is an equation.
    pub fn equation_expression(&self) -> Option<&str> {
        match &self.text_type {
            RichTextType::Equation { equation } => Some(&equation.expression),
            _ => None,
        }
    }
}

/// Concatenates the unstyled text of a run list.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

/// Style flags of a run. Colors are accepted on input and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquationData {
    #[serde(default)]
    pub expression: String,
}
