//! Member Rewriter
//!
//! Produces the constructor statements and accessors that replace
//! `@Element()` and `@AttachInternals()` fields.

use oxc_allocator::{Allocator, Vec as ArenaVec};
use oxc_ast::ast::{Class, ClassElement, MethodDefinitionKind};
use oxc_span::{GetSpan, GetSpanMut, Span};

use super::snippet::{js_member_access, js_member_key, parse_class_elements};
use super::state::{CoreRuntimeApis, PassState, GET_ELEMENT_LOCAL, REGISTER_INSTANCE_LOCAL};
use crate::lazy::diagnostics::{ErrorCode, TransformDiagnostic, TransformError};
use crate::lazy::metadata::{
    decorator_name, property_name, recognized_member_kind, ExtractedComponent, MemberAnnotationKind,
    COMPONENT_DECORATOR,
};

pub const HOST_REF: &str = "hostRef";
const HOST_ELEMENT: &str = "hostRef.$hostElement$";
const INTERNALS_CACHE_KEY: &str = "\"s-ei\"";

pub fn register_instance_statement() -> String {
    format!("{}(this, {});", REGISTER_INSTANCE_LOCAL, HOST_REF)
}

/// Reuses internals cached on the host element, attaching them only once.
pub fn attach_internals_statement(member: &str) -> String {
    let target = js_member_access("this", member);
    let cache = format!("{}[{}]", HOST_ELEMENT, INTERNALS_CACHE_KEY);
    format!(
        "if ({cache}) {{ {target} = {cache}; }} else {{ {target} = {host}.attachInternals(); {cache} = {target}; }}",
        cache = cache,
        target = target,
        host = HOST_ELEMENT,
    )
}

pub fn element_getter(member: &str) -> String {
    format!(
        "get {}() {{ return {}(this); }}",
        js_member_key(member),
        GET_ELEMENT_LOCAL
    )
}

pub fn form_associated_getter() -> &'static str {
    "static get formAssociated() { return true; }"
}

/// Constructor statements injected ahead of any existing ones.
pub fn injected_constructor_statements(component: &ExtractedComponent) -> Vec<String> {
    let mut statements = vec![register_instance_statement()];
    for member in &component.members {
        if member.kind == MemberAnnotationKind::AttachInternals {
            statements.push(attach_internals_statement(&member.name));
        }
    }
    statements
}

/// Class-level accessors appended after the original members.
pub fn appended_members(component: &ExtractedComponent) -> Vec<String> {
    let mut members = Vec::new();
    if component.metadata.form_associated {
        members.push(form_associated_getter().to_string());
    }
    members.extend(component.element_refs().map(element_getter));
    members
}

/// Whether `element` is a field the rewrite replaces with synthesized code.
fn is_rewritten_field(element: &ClassElement<'_>, component: &ExtractedComponent) -> bool {
    let prop = match element {
        ClassElement::PropertyDefinition(prop) if !prop.r#static => prop,
        _ => return false,
    };
    if recognized_member_kind(prop).is_none() {
        return false;
    }
    property_name(prop).is_some_and(|name| {
        component
            .members
            .iter()
            .any(|member| member.is_rewritten() && member.name == name)
    })
}

/// Re-anchors the comments of removed fields on the next remaining member,
/// or on the constructor when nothing follows them.
fn anchor_removed_member_comments(class: &mut Class<'_>, removed: &[u32], state: &mut PassState) {
    for &start in removed {
        let next = class
            .body
            .body
            .iter()
            .map(|element| element.span().start)
            .find(|&offset| offset > start);
        let to = match next {
            Some(to) => to,
            None => match constructor_index(&class.body.body) {
                Some(index) => {
                    let constructor = &mut class.body.body[index];
                    // synthesized constructors have no source position of their own
                    if constructor.span().start == 0 {
                        *constructor.span_mut() = Span::empty(start);
                    }
                    constructor.span().start
                }
                None => continue,
            },
        };
        state.move_comments(start, to);
    }
}

/// Rewrites the members of an accepted component in place: erases the
/// component decorator, drops rewritten fields, installs the constructor and
/// appends the synthesized accessors. Returns the warnings raised on the way.
pub fn rewrite_class_members<'a>(
    allocator: &'a Allocator,
    class: &mut Class<'a>,
    component: &ExtractedComponent,
    state: &mut PassState,
) -> Result<Vec<TransformDiagnostic>, TransformError> {
    let mut diagnostics = Vec::new();
    class
        .decorators
        .retain(|d| decorator_name(d) != Some(COMPONENT_DECORATOR));

    let mut removed = Vec::new();
    class.body.body.retain(|element| {
        let rewritten = is_rewritten_field(element, component);
        if rewritten {
            removed.push(element.span().start);
        }
        !rewritten
    });

    let statements = injected_constructor_statements(component);
    let dropped = super::constructor::install_constructor(allocator, class, &statements)?;
    if dropped > 0 {
        diagnostics.push(TransformDiagnostic::warning(
            ErrorCode::ConstructorParametersDropped,
            Some(&component.metadata.class_name),
            format!(
                "constructor now takes `{}`; {} declared parameter(s) were dropped and may still be referenced",
                HOST_REF, dropped
            ),
        ));
    }
    state.use_runtime_api(CoreRuntimeApis::REGISTER_INSTANCE);
    anchor_removed_member_comments(class, &removed, state);

    let appended = appended_members(component);
    if !appended.is_empty() {
        for element in parse_class_elements(allocator, &appended.join("\n"))? {
            class.body.body.push(element);
        }
    }
    if component.has_element_ref() {
        state.use_runtime_api(CoreRuntimeApis::GET_ELEMENT);
    }

    Ok(diagnostics)
}

pub fn constructor_index(elements: &ArenaVec<'_, ClassElement<'_>>) -> Option<usize> {
    elements.iter().position(|element| {
        matches!(element, ClassElement::MethodDefinition(method) if method.kind == MethodDefinitionKind::Constructor)
    })
}
