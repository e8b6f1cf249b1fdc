//! Module-scope imports
//!
//! Emits the single combined runtime import (or require) and prunes import
//! specifiers of decorators that no longer appear in the module.

use oxc_ast::ast::{
    ClassElement, Declaration, ExportDefaultDeclarationKind, ImportDeclarationSpecifier, Program, Statement,
};
use std::collections::HashSet;

use super::class_export::class_of_statement;
use super::snippet::js_string;
use super::state::CoreRuntimeApis;
use crate::config::options::{ModuleConvention, DEFAULT_CORE_IMPORT_PATH};
use crate::lazy::metadata::{decorator_name, ERASED_DECORATORS};

fn declaration_names(declaration: &Declaration<'_>, names: &mut Vec<String>) {
    match declaration {
        Declaration::VariableDeclaration(variables) => {
            for declarator in &variables.declarations {
                names.extend(declarator.id.get_binding_identifiers().iter().map(|id| id.name.to_string()));
            }
        }
        other => names.extend(other.id().map(|id| id.name.to_string())),
    }
}

/// Names bound at module scope by imports and declarations.
pub fn module_binding_names(program: &Program<'_>) -> Vec<String> {
    let mut names = Vec::new();
    for statement in &program.body {
        match statement {
            Statement::ImportDeclaration(import) => {
                if let Some(specifiers) = &import.specifiers {
                    names.extend(specifiers.iter().map(|s| s.local().name.to_string()));
                }
            }
            Statement::ExportNamedDeclaration(export) => {
                if let Some(declaration) = &export.declaration {
                    declaration_names(declaration, &mut names);
                }
            }
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                    names.extend(class.id.as_ref().map(|id| id.name.to_string()));
                }
                ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                    names.extend(function.id.as_ref().map(|id| id.name.to_string()));
                }
                _ => {}
            },
            _ => {
                if let Some(declaration) = statement.as_declaration() {
                    declaration_names(declaration, &mut names);
                }
            }
        }
    }
    names
}

/// `import { registerInstance as __stencil_registerInstance } from "<core>";`
/// or its `require` form. `None` when no runtime function is used.
pub fn core_runtime_statement(
    convention: ModuleConvention,
    core_import_path: &str,
    apis: CoreRuntimeApis,
) -> Option<String> {
    let specifiers = apis.specifiers();
    if specifiers.is_empty() {
        return None;
    }
    let source = js_string(core_import_path);
    Some(match convention {
        ModuleConvention::Esm => {
            let named: Vec<String> = specifiers
                .iter()
                .map(|(imported, local)| format!("{} as {}", imported, local))
                .collect();
            format!("import {{ {} }} from {};", named.join(", "), source)
        }
        ModuleConvention::Cjs => {
            let named: Vec<String> = specifiers
                .iter()
                .map(|(imported, local)| format!("{}: {}", imported, local))
                .collect();
            format!("const {{ {} }} = require({});", named.join(", "), source)
        }
    })
}

/// Index just past the last top-level import, 0 when there is none.
pub fn after_last_import(program: &Program<'_>) -> usize {
    program
        .body
        .iter()
        .rposition(|stmt| matches!(stmt, Statement::ImportDeclaration(_)))
        .map(|idx| idx + 1)
        .unwrap_or(0)
}

/// Decorator names still written on top-level classes or their members.
fn decorators_in_use(program: &Program<'_>) -> HashSet<String> {
    let mut names = HashSet::new();
    for class in program.body.iter().filter_map(class_of_statement) {
        names.extend(class.decorators.iter().filter_map(decorator_name).map(str::to_string));
        for element in class.body.body.iter() {
            let decorators = match element {
                ClassElement::PropertyDefinition(prop) => &prop.decorators,
                ClassElement::MethodDefinition(method) => &method.decorators,
                ClassElement::AccessorProperty(accessor) => &accessor.decorators,
                _ => continue,
            };
            names.extend(decorators.iter().filter_map(decorator_name).map(str::to_string));
        }
    }
    names
}

/// Removes `Component`, `Element` and `AttachInternals` specifiers imported
/// from the core module once nothing references them. Imports left without
/// specifiers are dropped. Returns the number of removed specifiers.
pub fn prune_erased_decorator_imports(program: &mut Program<'_>, core_import_path: &str) -> usize {
    let in_use = decorators_in_use(program);
    let mut removed = 0;
    let mut emptied = HashSet::new();

    for stmt in program.body.iter_mut() {
        let import = match stmt {
            Statement::ImportDeclaration(import) => import,
            _ => continue,
        };
        let source = import.source.value.as_str();
        if source != core_import_path && source != DEFAULT_CORE_IMPORT_PATH {
            continue;
        }
        let specifiers = match import.specifiers.as_mut() {
            Some(specifiers) if !specifiers.is_empty() => specifiers,
            _ => continue,
        };

        let before = specifiers.len();
        specifiers.retain(|specifier| match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(spec) => {
                let local = spec.local.name.as_str();
                !(ERASED_DECORATORS.contains(&spec.imported.name().as_str()) && !in_use.contains(local))
            }
            _ => true,
        });
        removed += before - specifiers.len();
        if specifiers.is_empty() {
            emptied.insert(import.span);
        }
    }

    if !emptied.is_empty() {
        program.body.retain(|stmt| match stmt {
            Statement::ImportDeclaration(import) => !emptied.contains(&import.span),
            _ => true,
        });
    }
    removed
}
