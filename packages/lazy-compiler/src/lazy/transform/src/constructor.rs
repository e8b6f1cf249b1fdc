//! Constructor Synthesizer
//!
//! Every accepted component ends up with exactly one `constructor(hostRef)`
//! whose body starts with the injected statements.

use oxc_allocator::{Allocator, Vec as ArenaVec};
use oxc_ast::ast::{Class, ClassElement, Statement};
use oxc_ast::AstBuilder;
use oxc_span::{GetSpan, GetSpanMut};

use super::members::{constructor_index, HOST_REF};
use super::snippet::parse_class_elements;
use crate::lazy::diagnostics::TransformError;

/// Replaces the existing constructor (same position and span, parameters
/// dropped, statements kept after `injected`) or inserts a new one as the
/// first member. Returns how many declared parameters were dropped.
pub fn install_constructor<'a>(
    allocator: &'a Allocator,
    class: &mut Class<'a>,
    injected: &[String],
) -> Result<usize, TransformError> {
    let snippet = format!("constructor({}) {{ {} }}", HOST_REF, injected.join("\n"));
    let mut constructor = parse_class_elements(allocator, &snippet)?
        .into_iter()
        .next()
        .ok_or_else(|| TransformError::Emit {
            snippet: snippet.clone(),
            message: "produced no constructor".to_string(),
        })?;

    match constructor_index(&class.body.body) {
        Some(index) => {
            *constructor.span_mut() = class.body.body[index].span();
            let previous = std::mem::replace(&mut class.body.body[index], constructor);
            let dropped = declared_parameters(&previous);
            let kept = take_body_statements(allocator, previous);
            append_body_statements(&mut class.body.body[index], kept);
            Ok(dropped)
        }
        None => {
            class.body.body.insert(0, constructor);
            Ok(0)
        }
    }
}

fn declared_parameters(element: &ClassElement<'_>) -> usize {
    match element {
        ClassElement::MethodDefinition(method) => {
            let params = &method.value.params;
            params.items.len() + usize::from(params.rest.is_some())
        }
        _ => 0,
    }
}

fn take_body_statements<'a>(allocator: &'a Allocator, element: ClassElement<'a>) -> ArenaVec<'a, Statement<'a>> {
    let ast = AstBuilder::new(allocator);
    match element {
        ClassElement::MethodDefinition(mut method) => match method.value.body.as_mut() {
            Some(body) => std::mem::replace(&mut body.statements, ast.vec()),
            None => ast.vec(),
        },
        _ => ast.vec(),
    }
}

fn append_body_statements<'a>(element: &mut ClassElement<'a>, statements: ArenaVec<'a, Statement<'a>>) {
    if let ClassElement::MethodDefinition(method) = element {
        if let Some(body) = method.value.body.as_mut() {
            for statement in statements {
                body.statements.push(statement);
            }
        }
    }
}
