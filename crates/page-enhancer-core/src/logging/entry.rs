//! Log entry rendered for a console-like sink.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::Level;

/// A single captured event.
#[derive(Debug, Clone, Serialize)]
pub struct ConsoleEntry {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Module path / target (e.g., "page_enhancer_core::media")
    pub target: String,

    pub msg: String,

    /// Structured fields recorded with the event
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,

    /// Enclosing spans, root first, joined with " > "
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<String>,
}

impl ConsoleEntry {
    pub fn new(level: &Level, target: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            level: level.as_str().to_lowercase(),
            target: target.into(),
            msg: msg.into(),
            fields: Map::new(),
            span: None,
        }
    }

    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_span(mut self, span: impl Into<String>) -> Self {
        self.span = Some(span.into());
        self
    }

    /// One-line text form: `[target] span: msg key=value ...`
    pub fn render(&self) -> String {
        let mut line = format!("[{}] ", self.target);
        if let Some(span) = &self.span {
            line.push_str(span);
            line.push_str(": ");
        }
        line.push_str(&self.msg);
        for (key, value) in &self.fields {
            match value {
                Value::String(s) => line.push_str(&format!(" {}={}", key, s)),
                other => line.push_str(&format!(" {}={}", key, other)),
            }
        }
        line
    }
}
