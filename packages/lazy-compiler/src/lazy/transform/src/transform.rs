//! Lazy component transform
//!
//! Rewrites every `@Component` class of one module into a runtime-registered
//! class and hoists its style sheets. Per-class problems become diagnostics;
//! only unparsable input or a broken synthesized snippet fails the file.

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_ast::AstBuilder;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};
use serde::Serialize;

use super::class_export::{class_of_statement, class_of_statement_mut, emit_class_statement};
use super::comments::{component_decorator_offset, leading_offset, pin_header_comments, relocate_comments};
use super::imports::{
    after_last_import, core_runtime_statement, module_binding_names, prune_erased_decorator_imports,
};
use super::members::rewrite_class_members;
use super::snippet::{parse_statement, parse_statements};
use super::state::PassState;
use super::styles::plan_class_styles;
use crate::config::options::{ModuleConvention, StyleMode, TransformOptions};
use crate::lazy::diagnostics::{TransformDiagnostic, TransformError};
use crate::lazy::logging::Logger;
use crate::lazy::metadata::{ComponentMetadataReader, ComponentRead};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummary {
    pub class_name: String,
    pub tag: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformReport {
    /// Accepted components in source order.
    pub components: Vec<ComponentSummary>,
    pub diagnostics: Vec<TransformDiagnostic>,
}

impl TransformReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(TransformDiagnostic::is_error)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransformOutput {
    pub code: String,
    pub report: TransformReport,
}

fn report_diagnostic(logger: &dyn Logger, diagnostic: &TransformDiagnostic) {
    if diagnostic.is_error() {
        logger.error(&diagnostic.to_string());
    } else {
        logger.warn(&diagnostic.to_string());
    }
}

/// Runs the pass over `program` in place.
///
/// Classes are visited in source order with one [`PassState`] for the whole
/// module. A program without accepted components is left untouched. On
/// `Err` the program is partially rewritten and must be discarded.
pub fn lazy_component_transform<'a>(
    allocator: &'a Allocator,
    program: &mut Program<'a>,
    options: &TransformOptions,
    logger: &dyn Logger,
) -> Result<TransformReport, TransformError> {
    let ast = AstBuilder::new(allocator);
    let reader = ComponentMetadataReader::new(program.source_text);
    let mut state = PassState::new();
    let mut report = TransformReport::default();
    let mut style_statements: Vec<String> = Vec::new();
    for name in module_binding_names(program) {
        state.reserve_identifier(&name);
    }
    let first_token = program.body.first().map(leading_offset);

    let body = std::mem::replace(&mut program.body, ast.vec());
    for statement in body {
        let read = match class_of_statement(&statement) {
            Some(class) => reader.read_class(class),
            None => {
                program.body.push(statement);
                continue;
            }
        };

        let component = match read {
            ComponentRead::NotAComponent => {
                program.body.push(statement);
                continue;
            }
            ComponentRead::Skipped(diagnostic) => {
                report_diagnostic(logger, &diagnostic);
                report.diagnostics.push(diagnostic);
                program.body.push(statement);
                continue;
            }
            ComponentRead::Component(component) => component,
        };

        let class_name = component.metadata.class_name.clone();
        logger.debug(&format!(
            "lazy: rewriting <{}> ({} annotated member(s))",
            component.metadata.tag,
            component.members.len()
        ));
        for diagnostic in &component.diagnostics {
            report_diagnostic(logger, diagnostic);
        }

        let mut statement = statement;
        if let Some(offset) = component_decorator_offset(&statement) {
            state.move_comments(offset, statement.span().start);
        }
        let member_diagnostics = match class_of_statement_mut(&mut statement) {
            Some(class) => rewrite_class_members(allocator, class, &component, &mut state)?,
            None => Vec::new(),
        };
        for diagnostic in &member_diagnostics {
            report_diagnostic(logger, diagnostic);
        }
        program
            .body
            .push(emit_class_statement(allocator, statement, &class_name, options)?);

        if options.style == StyleMode::Static {
            if let Some(refs) = &component.metadata.style_refs {
                if let Some(emission) = plan_class_styles(&class_name, refs, options.module, &mut state) {
                    style_statements.extend(emission.module_statements);
                    program.body.push(parse_statement(allocator, &emission.assignment)?);
                }
            }
        }

        report.diagnostics.extend(component.diagnostics);
        report.diagnostics.extend(member_diagnostics);
        report.components.push(ComponentSummary {
            class_name,
            tag: component.metadata.tag,
        });
    }

    if report.components.is_empty() {
        return Ok(report);
    }

    relocate_comments(&mut program.comments, state.comment_moves());
    if let Some(first_token) = first_token {
        pin_header_comments(program, first_token);
    }

    let pruned = prune_erased_decorator_imports(program, &options.core_import_path);
    if pruned > 0 {
        logger.debug(&format!("lazy: removed {} decorator import(s)", pruned));
    }

    let core = core_runtime_statement(options.module, &options.core_import_path, state.runtime_apis());
    let styles = parse_statements(allocator, &style_statements.join("\n"))?;
    match options.module {
        ModuleConvention::Esm => {
            let at = after_last_import(program);
            for (offset, statement) in styles.into_iter().enumerate() {
                program.body.insert(at + offset, statement);
            }
            if let Some(core) = core {
                program.body.insert(0, parse_statement(allocator, &core)?);
            }
        }
        ModuleConvention::Cjs => {
            if let Some(core) = core {
                program.body.insert(0, parse_statement(allocator, &core)?);
            }
            for (offset, statement) in styles.into_iter().enumerate() {
                program.body.insert(offset, statement);
            }
        }
    }

    logger.info(&format!(
        "lazy: {} component(s), {} style import(s), {} diagnostic(s)",
        report.components.len(),
        state.style_records().len(),
        report.diagnostics.len()
    ));
    Ok(report)
}

/// Parses `source`, runs [`lazy_component_transform`] and prints the result.
/// Sources without accepted components come back byte for byte.
pub fn transform_module(
    source: &str,
    file_name: &str,
    options: &TransformOptions,
    logger: &dyn Logger,
) -> Result<TransformOutput, TransformError> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(file_name).unwrap_or_else(|_| SourceType::ts());
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(TransformError::Parse {
            file: file_name.to_string(),
            message,
        });
    }

    let mut program = ret.program;
    let report = lazy_component_transform(&allocator, &mut program, options, logger)?;
    let code = if report.components.is_empty() {
        source.to_string()
    } else {
        Codegen::new().build(&program).code
    };

    Ok(TransformOutput { code, report })
}
