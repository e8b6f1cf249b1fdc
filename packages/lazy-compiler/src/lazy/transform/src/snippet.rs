//! Snippet parsing
//!
//! Synthesized code is written as JavaScript text, parsed into the arena of
//! the program being rewritten and spliced in. Keeps the rewrite independent
//! of the builder signatures of individual node kinds.
//!
//! Parsed nodes get empty spans at offset 0: their offsets would otherwise
//! point into the snippet text and pick up comments of the real file.

use once_cell::sync::Lazy;
use oxc_allocator::{Allocator, Vec as ArenaVec};
use oxc_ast::ast::{ClassElement, Statement};
use oxc_ast::AstBuilder;
use oxc_ast_visit::VisitMut;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span, SPAN};
use regex::Regex;

use crate::lazy::diagnostics::TransformError;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

pub fn is_identifier_name(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Double-quoted, escaped string literal.
pub fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value.escape_default()))
}

/// Object or class key: bare when it is an identifier, quoted otherwise.
pub fn js_property_key(name: &str) -> String {
    if is_identifier_name(name) {
        name.to_string()
    } else {
        js_string(name)
    }
}

/// Class member key, computed (`["my-name"]`) when not an identifier.
pub fn js_member_key(name: &str) -> String {
    if is_identifier_name(name) {
        name.to_string()
    } else {
        format!("[{}]", js_string(name))
    }
}

/// `object.name` or `object["name"]`.
pub fn js_member_access(object: &str, name: &str) -> String {
    if is_identifier_name(name) {
        format!("{}.{}", object, name)
    } else {
        format!("{}[{}]", object, js_string(name))
    }
}

struct DetachSpans;

impl<'a> VisitMut<'a> for DetachSpans {
    fn visit_span(&mut self, span: &mut Span) {
        *span = SPAN;
    }
}

/// Parses module-level statements into `allocator`.
pub fn parse_statements<'a>(
    allocator: &'a Allocator,
    text: &str,
) -> Result<ArenaVec<'a, Statement<'a>>, TransformError> {
    let source = allocator.alloc_str(text);
    let ret = Parser::new(allocator, source, SourceType::mjs()).parse();
    if let Some(error) = ret.errors.first() {
        return Err(TransformError::Emit {
            snippet: text.to_string(),
            message: error.to_string(),
        });
    }
    let mut body = ret.program.body;
    DetachSpans.visit_statements(&mut body);
    Ok(body)
}

/// Parses `members` as the body of a throwaway class and returns its elements.
pub fn parse_class_elements<'a>(
    allocator: &'a Allocator,
    members: &str,
) -> Result<ArenaVec<'a, ClassElement<'a>>, TransformError> {
    let text = format!("class _ {{ {} }}", members);
    let mut statements = parse_statements(allocator, &text)?.into_iter();
    match statements.next() {
        Some(Statement::ClassDeclaration(mut class)) => {
            Ok(std::mem::replace(&mut class.body.body, AstBuilder::new(allocator).vec()))
        }
        _ => Err(TransformError::Emit {
            snippet: text,
            message: "expected a class declaration".to_string(),
        }),
    }
}

/// Parses a single statement.
pub fn parse_statement<'a>(allocator: &'a Allocator, text: &str) -> Result<Statement<'a>, TransformError> {
    parse_statements(allocator, text)?
        .into_iter()
        .next()
        .ok_or_else(|| TransformError::Emit {
            snippet: text.to_string(),
            message: "produced no statement".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_span::GetSpan;

    #[test]
    fn quotes_non_identifier_keys() {
        assert_eq!(js_property_key("ios"), "ios");
        assert_eq!(js_property_key("high-contrast"), "\"high-contrast\"");
        assert_eq!(js_member_key("my-el"), "[\"my-el\"]");
        assert_eq!(js_member_access("this", "el"), "this.el");
        assert_eq!(js_member_access("this", "my-el"), "this[\"my-el\"]");
    }

    #[test]
    fn escapes_string_literals() {
        assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn parses_class_elements() {
        let allocator = Allocator::default();
        let elements = parse_class_elements(&allocator, "get el() { return 1; } static x = 2;").unwrap();
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn synthesized_nodes_carry_no_source_offsets() {
        let allocator = Allocator::default();
        let elements = parse_class_elements(&allocator, "constructor(hostRef) { this.x = 1; }").unwrap();
        assert_eq!(elements[0].span(), SPAN);
        let statement = parse_statement(&allocator, "  const a = 1;").unwrap();
        assert_eq!(statement.span(), SPAN);
    }

    #[test]
    fn reports_broken_snippets() {
        let allocator = Allocator::default();
        let err = parse_statement(&allocator, "const = ;").unwrap_err();
        assert!(matches!(err, TransformError::Emit { .. }));
    }
}
