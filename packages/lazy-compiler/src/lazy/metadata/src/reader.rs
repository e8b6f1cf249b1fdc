//! Annotation Extractor
//!
//! Reads `@Component({...})` and member decorators of a class into the
//! metadata model. Purely structural: only literal shapes are interpreted and
//! the tree is never mutated.

use indexmap::IndexMap;
use oxc_ast::ast::{Class, ClassElement, Decorator, Expression, PropertyDefinition, PropertyKey};
use smallvec::SmallVec;
use std::collections::HashSet;

use super::api::*;
use crate::lazy::annotations::{AstHost, OxcAstHost, OxcNode};
use crate::lazy::diagnostics::{ErrorCode, TransformDiagnostic};

/// Name of a decorator written as `@Name` or `@Name(...)`.
pub fn decorator_name<'d>(decorator: &'d Decorator<'_>) -> Option<&'d str> {
    match &decorator.expression {
        Expression::CallExpression(call) => match &call.callee {
            Expression::Identifier(id) => Some(id.name.as_str()),
            _ => None,
        },
        Expression::Identifier(id) => Some(id.name.as_str()),
        _ => None,
    }
}

/// Static name of a class field, `None` for computed and `#private` keys.
pub fn property_name(prop: &PropertyDefinition<'_>) -> Option<String> {
    if prop.computed {
        return None;
    }
    match &prop.key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

/// The rewriting behavior selected by a field's decorators, if any.
pub fn recognized_member_kind(prop: &PropertyDefinition<'_>) -> Option<MemberAnnotationKind> {
    prop.decorators
        .iter()
        .filter_map(decorator_name)
        .find_map(|name| match name {
            ELEMENT_DECORATOR => Some(MemberAnnotationKind::ElementReference),
            ATTACH_INTERNALS_DECORATOR => Some(MemberAnnotationKind::AttachInternals),
            _ => None,
        })
}

pub struct ComponentMetadataReader<'s> {
    host: OxcAstHost<'s>,
}

impl<'s> ComponentMetadataReader<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            host: OxcAstHost::new(source),
        }
    }

    pub fn read_class(&self, class: &Class<'_>) -> ComponentRead {
        let decorator = match class
            .decorators
            .iter()
            .find(|d| decorator_name(d) == Some(COMPONENT_DECORATOR))
        {
            Some(decorator) => decorator,
            None => return ComponentRead::NotAComponent,
        };

        let class_name = match &class.id {
            Some(id) => id.name.to_string(),
            None => {
                return ComponentRead::Skipped(TransformDiagnostic::error(
                    ErrorCode::ComponentMissingName,
                    None,
                    "@Component() cannot decorate an anonymous class",
                ))
            }
        };
        let class_name = class_name.as_str();

        let decorator_node = OxcNode::Expression(&decorator.expression);
        if !self.host.is_call_expression(&decorator_node) {
            return ComponentRead::Skipped(TransformDiagnostic::error(
                ErrorCode::DecoratorNotCalled,
                Some(class_name),
                "@Component must be called, e.g. @Component({ tag: 'my-cmp' })",
            ));
        }

        let config = match self.read_config(class_name, &decorator_node) {
            Ok(config) => config,
            Err(diagnostic) => return ComponentRead::Skipped(diagnostic),
        };

        let tag = match config.get("tag") {
            None => {
                return ComponentRead::Skipped(TransformDiagnostic::error(
                    ErrorCode::ComponentMissingTag,
                    Some(class_name),
                    "@Component() requires a `tag`",
                ))
            }
            Some(node) => match self.host.parse_string_literal(node) {
                Ok(tag) if !tag.trim().is_empty() => tag.trim().to_string(),
                Ok(_) => {
                    return ComponentRead::Skipped(TransformDiagnostic::error(
                        ErrorCode::ComponentMissingTag,
                        Some(class_name),
                        "@Component() `tag` must not be empty",
                    ))
                }
                Err(_) => {
                    return ComponentRead::Skipped(TransformDiagnostic::error(
                        ErrorCode::ValueNotLiteral,
                        Some(class_name),
                        format!(
                            "@Component() `tag` must be a string literal, got `{}`",
                            self.host.print_node(node)
                        ),
                    ))
                }
            },
        };

        let mut diagnostics = Vec::new();
        let form_associated = self.read_form_associated(class_name, &config, &mut diagnostics);
        let style_refs = self.read_style_refs(class_name, &config, &mut diagnostics);
        let members = self.read_members(class_name, class, &mut diagnostics);

        if !form_associated
            && members
                .iter()
                .any(|m| m.kind == MemberAnnotationKind::AttachInternals)
        {
            diagnostics.push(TransformDiagnostic::warning(
                ErrorCode::AttachInternalsWithoutFormAssociated,
                Some(class_name),
                "@AttachInternals() is used but the component is not `formAssociated: true`",
            ));
        }

        ComponentRead::Component(ExtractedComponent {
            metadata: ComponentMetadata {
                class_name: class_name.to_string(),
                tag,
                style_refs,
                form_associated,
            },
            members,
            diagnostics,
        })
    }

    fn read_config<'n, 'a>(
        &self,
        class_name: &str,
        decorator_node: &OxcNode<'n, 'a>,
    ) -> Result<IndexMap<String, OxcNode<'n, 'a>>, TransformDiagnostic> {
        let not_literal = |detail: String| {
            TransformDiagnostic::error(
                ErrorCode::DecoratorArgNotLiteral,
                Some(class_name),
                format!("@Component() argument must be an object literal: {}", detail),
            )
        };

        let args = self.host.parse_arguments(decorator_node).map_err(not_literal)?;
        let config = match args.first() {
            Some(arg) if self.host.is_object_literal(arg) => arg,
            Some(arg) => return Err(not_literal(format!("got `{}`", self.host.print_node(arg)))),
            None => return Err(not_literal("no argument given".to_string())),
        };
        self.host.parse_object_literal(config).map_err(not_literal)
    }

    fn read_form_associated(
        &self,
        class_name: &str,
        config: &IndexMap<String, OxcNode<'_, '_>>,
        diagnostics: &mut Vec<TransformDiagnostic>,
    ) -> bool {
        let node = match config.get("formAssociated") {
            Some(node) => node,
            None => return false,
        };
        match self.host.parse_boolean_literal(node) {
            Ok(value) => value,
            Err(_) => {
                diagnostics.push(TransformDiagnostic::warning(
                    ErrorCode::ValueNotLiteral,
                    Some(class_name),
                    format!(
                        "`formAssociated` is not a boolean literal (`{}`); treating it as false",
                        self.host.print_node(node)
                    ),
                ));
                false
            }
        }
    }

    fn read_style_refs(
        &self,
        class_name: &str,
        config: &IndexMap<String, OxcNode<'_, '_>>,
        diagnostics: &mut Vec<TransformDiagnostic>,
    ) -> Option<StyleRefs> {
        let refs = if let Some(node) = config.get("styleUrls") {
            if self.host.is_array_literal(node) {
                self.read_style_sequence(class_name, node, diagnostics)
            } else if self.host.is_object_literal(node) {
                self.read_style_mapping(class_name, node, diagnostics)
            } else {
                diagnostics.push(TransformDiagnostic::warning(
                    ErrorCode::ValueHasWrongType,
                    Some(class_name),
                    format!(
                        "`styleUrls` must be an array or object literal, got `{}`; ignoring it",
                        self.host.print_node(node)
                    ),
                ));
                None
            }
        } else if let Some(node) = config.get("styleUrl") {
            match self.host.parse_string_literal(node) {
                Ok(path) => Some(StyleRefs::Sequence(vec![path])),
                Err(_) => {
                    diagnostics.push(TransformDiagnostic::warning(
                        ErrorCode::ValueNotLiteral,
                        Some(class_name),
                        format!(
                            "`styleUrl` must be a string literal, got `{}`; ignoring it",
                            self.host.print_node(node)
                        ),
                    ));
                    None
                }
            }
        } else {
            None
        };

        refs.filter(|refs| !refs.is_empty())
    }

    fn read_style_sequence(
        &self,
        class_name: &str,
        node: &OxcNode<'_, '_>,
        diagnostics: &mut Vec<TransformDiagnostic>,
    ) -> Option<StyleRefs> {
        let elements = match self.host.parse_array_literal(node) {
            Ok(elements) => elements,
            Err(msg) => {
                diagnostics.push(TransformDiagnostic::warning(
                    ErrorCode::ValueNotLiteral,
                    Some(class_name),
                    format!("`styleUrls`: {}", msg),
                ));
                return None;
            }
        };

        let mut paths = Vec::with_capacity(elements.len());
        for element in &elements {
            match self.host.parse_string_literal(element) {
                Ok(path) => paths.push(path),
                Err(_) => diagnostics.push(TransformDiagnostic::warning(
                    ErrorCode::ValueNotLiteral,
                    Some(class_name),
                    format!(
                        "`styleUrls` entry `{}` is not a string literal; skipping it",
                        self.host.print_node(element)
                    ),
                )),
            }
        }
        Some(StyleRefs::Sequence(paths))
    }

    fn read_style_mapping(
        &self,
        class_name: &str,
        node: &OxcNode<'_, '_>,
        diagnostics: &mut Vec<TransformDiagnostic>,
    ) -> Option<StyleRefs> {
        let entries = match self.host.parse_object_entries(node) {
            Ok(entries) => entries,
            Err(msg) => {
                diagnostics.push(TransformDiagnostic::warning(
                    ErrorCode::ValueNotLiteral,
                    Some(class_name),
                    format!("`styleUrls`: {}", msg),
                ));
                return None;
            }
        };

        let mut seen = HashSet::new();
        let mut mapping = IndexMap::with_capacity(entries.len());
        for (key, value) in &entries {
            if !seen.insert(key.clone()) {
                diagnostics.push(TransformDiagnostic::warning(
                    ErrorCode::DuplicateStyleKey,
                    Some(class_name),
                    format!("`styleUrls` key `{}` is declared more than once; the last one wins", key),
                ));
            }
            match self.host.parse_string_literal(value) {
                Ok(path) => {
                    mapping.insert(key.clone(), path);
                }
                Err(_) => diagnostics.push(TransformDiagnostic::warning(
                    ErrorCode::ValueNotLiteral,
                    Some(class_name),
                    format!(
                        "`styleUrls.{}` is not a string literal (`{}`); skipping it",
                        key,
                        self.host.print_node(value)
                    ),
                )),
            }
        }
        Some(StyleRefs::Mapping(mapping))
    }

    fn read_members(
        &self,
        class_name: &str,
        class: &Class<'_>,
        diagnostics: &mut Vec<TransformDiagnostic>,
    ) -> SmallVec<[MemberAnnotation; 4]> {
        let mut members = SmallVec::new();

        for element in class.body.body.iter() {
            let prop = match element {
                ClassElement::PropertyDefinition(prop) if !prop.decorators.is_empty() => prop,
                _ => continue,
            };

            let name = property_name(prop);
            match (recognized_member_kind(prop), name) {
                (Some(kind), Some(name)) if !prop.r#static => {
                    members.push(MemberAnnotation { name, kind });
                }
                (Some(_), name) => {
                    diagnostics.push(TransformDiagnostic::warning(
                        ErrorCode::MemberNameNotStatic,
                        Some(class_name),
                        "member decorators need a non-static field with a plain name; leaving it untouched",
                    ));
                    if let Some(name) = name {
                        members.push(MemberAnnotation {
                            name,
                            kind: MemberAnnotationKind::Opaque(first_decorator_label(prop)),
                        });
                    }
                }
                (None, Some(name)) => members.push(MemberAnnotation {
                    name,
                    kind: MemberAnnotationKind::Opaque(first_decorator_label(prop)),
                }),
                (None, None) => {}
            }
        }

        members
    }
}

fn first_decorator_label(prop: &PropertyDefinition<'_>) -> String {
    prop.decorators
        .iter()
        .find_map(decorator_name)
        .unwrap_or("<expression>")
        .to_string()
}
