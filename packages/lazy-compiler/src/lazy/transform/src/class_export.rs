//! Class emission shape
//!
//! ESM output binds lazy components as `const X = class { ... }`; CJS output
//! keeps the declaration. Custom-element output drops the named export.

use oxc_allocator::Allocator;
use oxc_ast::ast::{Class, Declaration, ExportDefaultDeclarationKind, Expression, Statement};
use oxc_span::{GetSpan, GetSpanMut};

use super::snippet::parse_statement;
use crate::config::options::{ComponentExport, ModuleConvention, TransformOptions};
use crate::lazy::diagnostics::TransformError;

/// Class declared by a top-level statement: plain, `export` or `export default`.
pub fn class_of_statement<'s, 'a>(statement: &'s Statement<'a>) -> Option<&'s Class<'a>> {
    match statement {
        Statement::ClassDeclaration(class) => Some(&**class),
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::ClassDeclaration(class)) => Some(&**class),
            _ => None,
        },
        Statement::ExportDefaultDeclaration(export) => match &export.declaration {
            ExportDefaultDeclarationKind::ClassDeclaration(class) => Some(&**class),
            _ => None,
        },
        _ => None,
    }
}

pub fn class_of_statement_mut<'s, 'a>(statement: &'s mut Statement<'a>) -> Option<&'s mut Class<'a>> {
    match statement {
        Statement::ClassDeclaration(class) => Some(&mut **class),
        Statement::ExportNamedDeclaration(export) => match &mut export.declaration {
            Some(Declaration::ClassDeclaration(class)) => Some(&mut **class),
            _ => None,
        },
        Statement::ExportDefaultDeclaration(export) => match &mut export.declaration {
            ExportDefaultDeclarationKind::ClassDeclaration(class) => Some(&mut **class),
            _ => None,
        },
        _ => None,
    }
}

/// Moves everything but the name from `from` into `into`.
fn transplant_class<'a>(from: &mut Class<'a>, into: &mut Class<'a>) {
    std::mem::swap(&mut from.body, &mut into.body);
    std::mem::swap(&mut from.super_class, &mut into.super_class);
    std::mem::swap(&mut from.decorators, &mut into.decorators);
    std::mem::swap(&mut from.type_parameters, &mut into.type_parameters);
}

fn class_expression_of<'s, 'a>(statement: &'s mut Statement<'a>) -> Option<&'s mut Class<'a>> {
    let declaration = match statement {
        Statement::VariableDeclaration(declaration) => declaration,
        Statement::ExportNamedDeclaration(export) => match &mut export.declaration {
            Some(Declaration::VariableDeclaration(declaration)) => declaration,
            _ => return None,
        },
        _ => return None,
    };
    match declaration.declarations.first_mut()?.init.as_mut()? {
        Expression::ClassExpression(class) => Some(&mut **class),
        _ => None,
    }
}

/// Rebuilds `statement` from `template` and moves the class contents across.
/// The rebuilt statement takes over the span, and so the leading comments, of
/// the original one.
fn rebuild<'a>(
    allocator: &'a Allocator,
    mut statement: Statement<'a>,
    template: String,
    target: for<'s> fn(&'s mut Statement<'a>) -> Option<&'s mut Class<'a>>,
) -> Result<Statement<'a>, TransformError> {
    let mut rebuilt = parse_statement(allocator, &template)?;
    *rebuilt.span_mut() = statement.span();
    match (class_of_statement_mut(&mut statement), target(&mut rebuilt)) {
        (Some(from), Some(into)) => {
            transplant_class(from, into);
            Ok(rebuilt)
        }
        _ => Err(TransformError::Emit {
            snippet: template,
            message: "template has no class to fill".to_string(),
        }),
    }
}

/// Converts the statement declaring an accepted component to the emission
/// shape selected by `options`.
pub fn emit_class_statement<'a>(
    allocator: &'a Allocator,
    statement: Statement<'a>,
    class_name: &str,
    options: &TransformOptions,
) -> Result<Statement<'a>, TransformError> {
    let exported = matches!(statement, Statement::ExportNamedDeclaration(_))
        && options.component_export == ComponentExport::Lazy;
    let is_default = matches!(statement, Statement::ExportDefaultDeclaration(_));

    match (options.module, is_default) {
        (ModuleConvention::Esm, false) => {
            let prefix = if exported { "export " } else { "" };
            rebuild(
                allocator,
                statement,
                format!("{}const {} = class {{}};", prefix, class_name),
                class_expression_of,
            )
        }
        (ModuleConvention::Cjs, false) if !exported && matches!(statement, Statement::ExportNamedDeclaration(_)) => {
            rebuild(
                allocator,
                statement,
                format!("class {} {{}}", class_name),
                class_of_statement_mut,
            )
        }
        (_, true) if options.component_export == ComponentExport::CustomElement => rebuild(
            allocator,
            statement,
            format!("class {} {{}}", class_name),
            class_of_statement_mut,
        ),
        _ => Ok(statement),
    }
}
