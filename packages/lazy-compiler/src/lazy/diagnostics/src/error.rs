use super::error_code::ErrorCode;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

/// A per-class problem. Never aborts the file: the affected class is skipped
/// or a field falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformDiagnostic {
    pub code: ErrorCode,
    pub category: DiagnosticCategory,
    pub class_name: Option<String>,
    pub message: String,
}

impl TransformDiagnostic {
    pub fn warning(code: ErrorCode, class_name: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            code,
            category: DiagnosticCategory::Warning,
            class_name: class_name.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn error(code: ErrorCode, class_name: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            code,
            category: DiagnosticCategory::Error,
            class_name: class_name.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for TransformDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = match self.category {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
        };
        match &self.class_name {
            Some(class_name) => write!(
                f,
                "{} {}: {} (class {})",
                category, self.code, self.message, class_name
            ),
            None => write!(f, "{} {}: {}", category, self.code, self.message),
        }
    }
}

impl Serialize for TransformDiagnostic {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("TransformDiagnostic", 4)?;
        state.serialize_field("code", &self.code.label())?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("className", &self.class_name)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

/// Failures that stop the whole file.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input itself is not valid source; that is the parser's domain.
    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    /// A synthesized snippet did not parse. Indicates a bug in the emitter.
    #[error("failed to build `{snippet}`: {message}")]
    Emit { snippet: String, message: String },
}
