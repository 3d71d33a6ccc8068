//! Error types for side parsing and flow loading

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// A side tag outside its closed enumeration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SideError {
    #[error("unknown {kind} side '{value}' (expected one of: {})", .expected.join(", "))]
    Unknown {
        kind: &'static str,
        value: String,
        expected: Vec<&'static str>,
    },
}

impl SideError {
    pub fn unknown(kind: &'static str, value: impl Into<String>, expected: &[&'static str]) -> Self {
        Self::Unknown {
            kind,
            value: value.into(),
            expected: expected.to_vec(),
        }
    }
}

/// Errors that can occur while loading or routing a flow
#[derive(Error, Debug)]
pub enum FlowError {
    /// Connection endpoint naming a node that does not exist
    #[error("undefined node '{name}'{}", format_suggestions(.suggestions))]
    UndefinedNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Two nodes sharing one name
    #[error("duplicate node '{name}'")]
    DuplicateNode { name: String },

    #[error("failed to read flow file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse flow TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

impl FlowError {
    pub fn undefined(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::UndefinedNode {
            name: name.into(),
            suggestions,
        }
    }

    /// Suggestions for a misspelled node name, if any
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UndefinedNode { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Only TOML errors carry a location; everything else falls back to
    /// the plain message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (message, span) = match self {
            FlowError::Toml(err) => match err.span() {
                Some(span) => (err.message().to_string(), span),
                None => return self.to_string(),
            },
            _ => return self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid flow description")
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_node_display() {
        let err = FlowError::undefined("servr", vec!["server".to_string()]);
        assert_eq!(
            err.to_string(),
            "undefined node 'servr' (did you mean: server?)"
        );
        assert_eq!(err.suggestions(), Some(&["server".to_string()][..]));
    }

    #[test]
    fn test_undefined_node_without_suggestions() {
        let err = FlowError::undefined("x", vec![]);
        assert_eq!(err.to_string(), "undefined node 'x'");
    }

    #[test]
    fn test_duplicate_node_display() {
        let err = FlowError::DuplicateNode {
            name: "a".to_string(),
        };
        assert!(err.to_string().contains("duplicate node 'a'"));
        assert!(err.suggestions().is_none());
    }

    #[test]
    fn test_format_without_span_is_plain() {
        let err = FlowError::undefined("x", vec![]);
        assert_eq!(err.format("", "flow.toml"), err.to_string());
    }
}
