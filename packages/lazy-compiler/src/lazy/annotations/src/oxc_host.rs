//! OXC AST Host Implementation
//!
//! Implements the `AstHost` trait for the OXC AST.

use super::host::{AstHost, AstNode, Range};
use oxc_ast::ast::{
    Argument, ArrayExpressionElement, Expression, ObjectPropertyKind, PropertyKey, TemplateLiteral,
};
use oxc_span::{GetSpan, Span};

/// OXC splits expressions into distinct enums (`Expression`, `Argument`,
/// `ArrayExpressionElement`) that share variants but are not type-compatible.
/// This wrapper unifies them for the host.
#[derive(Debug, Clone, Copy)]
pub enum OxcNode<'n, 'a> {
    Expression(&'n Expression<'a>),
    ArrayElement(&'n ArrayExpressionElement<'a>),
    Argument(&'n Argument<'a>),
}

impl<'n, 'a> AstNode for OxcNode<'n, 'a> {}

pub struct OxcAstHost<'s> {
    source: &'s str,
}

impl<'s> OxcAstHost<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source }
    }

    fn get_span(node: &OxcNode<'_, '_>) -> Span {
        match *node {
            OxcNode::Expression(e) => e.span(),
            OxcNode::ArrayElement(e) => e.span(),
            OxcNode::Argument(e) => e.span(),
        }
    }
}

fn cooked_template(template: &TemplateLiteral<'_>) -> Option<String> {
    if !template.expressions.is_empty() || template.quasis.len() != 1 {
        return None;
    }
    template
        .quasis
        .first()
        .and_then(|quasi| quasi.value.cooked.as_ref())
        .map(|cooked| cooked.to_string())
}

impl<'s, 'n, 'a> AstHost<OxcNode<'n, 'a>> for OxcAstHost<'s> {
    fn get_symbol_name(&self, node: &OxcNode<'n, 'a>) -> Option<String> {
        match *node {
            OxcNode::Expression(Expression::Identifier(ident)) => Some(ident.name.to_string()),
            OxcNode::ArrayElement(ArrayExpressionElement::Identifier(ident)) => {
                Some(ident.name.to_string())
            }
            OxcNode::Argument(Argument::Identifier(ident)) => Some(ident.name.to_string()),
            _ => None,
        }
    }

    fn is_string_literal(&self, node: &OxcNode<'n, 'a>) -> bool {
        self.parse_string_literal(node).is_ok()
    }

    fn parse_string_literal(&self, node: &OxcNode<'n, 'a>) -> Result<String, String> {
        let value = match *node {
            OxcNode::Expression(Expression::StringLiteral(l)) => Some(l.value.to_string()),
            OxcNode::ArrayElement(ArrayExpressionElement::StringLiteral(l)) => {
                Some(l.value.to_string())
            }
            OxcNode::Argument(Argument::StringLiteral(l)) => Some(l.value.to_string()),
            OxcNode::Expression(Expression::TemplateLiteral(t)) => cooked_template(t),
            OxcNode::ArrayElement(ArrayExpressionElement::TemplateLiteral(t)) => {
                cooked_template(t)
            }
            OxcNode::Argument(Argument::TemplateLiteral(t)) => cooked_template(t),
            _ => None,
        };
        value.ok_or_else(|| "Not a string literal".to_string())
    }

    fn is_boolean_literal(&self, node: &OxcNode<'n, 'a>) -> bool {
        self.parse_boolean_literal(node).is_ok()
    }

    fn parse_boolean_literal(&self, node: &OxcNode<'n, 'a>) -> Result<bool, String> {
        match *node {
            OxcNode::Expression(Expression::BooleanLiteral(l)) => Ok(l.value),
            OxcNode::ArrayElement(ArrayExpressionElement::BooleanLiteral(l)) => Ok(l.value),
            OxcNode::Argument(Argument::BooleanLiteral(l)) => Ok(l.value),
            _ => Err("Not a boolean literal".to_string()),
        }
    }

    fn is_array_literal(&self, node: &OxcNode<'n, 'a>) -> bool {
        matches!(
            *node,
            OxcNode::Expression(Expression::ArrayExpression(_))
                | OxcNode::ArrayElement(ArrayExpressionElement::ArrayExpression(_))
                | OxcNode::Argument(Argument::ArrayExpression(_))
        )
    }

    fn parse_array_literal(&self, node: &OxcNode<'n, 'a>) -> Result<Vec<OxcNode<'n, 'a>>, String> {
        let elements = match *node {
            OxcNode::Expression(Expression::ArrayExpression(e)) => &e.elements,
            OxcNode::ArrayElement(ArrayExpressionElement::ArrayExpression(e)) => &e.elements,
            OxcNode::Argument(Argument::ArrayExpression(e)) => &e.elements,
            _ => return Err("Not an array literal".to_string()),
        };

        let mut result = Vec::with_capacity(elements.len());
        for element in elements.iter() {
            match element {
                ArrayExpressionElement::SpreadElement(_) => {
                    return Err("Spread elements are not supported in annotation arrays".to_string())
                }
                ArrayExpressionElement::Elision(_) => {
                    return Err("Holes are not supported in annotation arrays".to_string())
                }
                _ => result.push(OxcNode::ArrayElement(element)),
            }
        }
        Ok(result)
    }

    fn is_object_literal(&self, node: &OxcNode<'n, 'a>) -> bool {
        matches!(
            *node,
            OxcNode::Expression(Expression::ObjectExpression(_))
                | OxcNode::ArrayElement(ArrayExpressionElement::ObjectExpression(_))
                | OxcNode::Argument(Argument::ObjectExpression(_))
        )
    }

    fn parse_object_entries(
        &self,
        node: &OxcNode<'n, 'a>,
    ) -> Result<Vec<(String, OxcNode<'n, 'a>)>, String> {
        let properties = match *node {
            OxcNode::Expression(Expression::ObjectExpression(e)) => &e.properties,
            OxcNode::ArrayElement(ArrayExpressionElement::ObjectExpression(e)) => &e.properties,
            OxcNode::Argument(Argument::ObjectExpression(e)) => &e.properties,
            _ => return Err("Not an object literal".to_string()),
        };

        let mut result = Vec::with_capacity(properties.len());
        for prop in properties.iter() {
            match prop {
                ObjectPropertyKind::ObjectProperty(p) => {
                    if p.computed {
                        return Err("Computed object keys are not supported".to_string());
                    }
                    let key = match &p.key {
                        PropertyKey::StaticIdentifier(ident) => ident.name.to_string(),
                        PropertyKey::StringLiteral(lit) => lit.value.to_string(),
                        _ => return Err("Unsupported object key type".to_string()),
                    };
                    result.push((key, OxcNode::Expression(&p.value)));
                }
                ObjectPropertyKind::SpreadProperty(_) => {
                    return Err("Unsupported object property type (spread)".to_string())
                }
            }
        }
        Ok(result)
    }

    fn is_call_expression(&self, node: &OxcNode<'n, 'a>) -> bool {
        matches!(
            *node,
            OxcNode::Expression(Expression::CallExpression(_))
                | OxcNode::ArrayElement(ArrayExpressionElement::CallExpression(_))
                | OxcNode::Argument(Argument::CallExpression(_))
        )
    }

    fn parse_callee(&self, node: &OxcNode<'n, 'a>) -> Result<OxcNode<'n, 'a>, String> {
        match *node {
            OxcNode::Expression(Expression::CallExpression(e)) => {
                Ok(OxcNode::Expression(&e.callee))
            }
            OxcNode::ArrayElement(ArrayExpressionElement::CallExpression(e)) => {
                Ok(OxcNode::Expression(&e.callee))
            }
            OxcNode::Argument(Argument::CallExpression(e)) => Ok(OxcNode::Expression(&e.callee)),
            _ => Err("Not a call expression".to_string()),
        }
    }

    fn parse_arguments(&self, node: &OxcNode<'n, 'a>) -> Result<Vec<OxcNode<'n, 'a>>, String> {
        let args = match *node {
            OxcNode::Expression(Expression::CallExpression(e)) => &e.arguments,
            OxcNode::ArrayElement(ArrayExpressionElement::CallExpression(e)) => &e.arguments,
            OxcNode::Argument(Argument::CallExpression(e)) => &e.arguments,
            _ => return Err("Not a call expression".to_string()),
        };

        let mut result = Vec::with_capacity(args.len());
        for arg in args.iter() {
            match arg {
                Argument::SpreadElement(_) => {
                    return Err("Spread arguments not supported".to_string())
                }
                _ => result.push(OxcNode::Argument(arg)),
            }
        }
        Ok(result)
    }

    fn get_range(&self, node: &OxcNode<'n, 'a>) -> Range {
        let span = Self::get_span(node);
        Range {
            start_pos: span.start as usize,
            end_pos: span.end as usize,
        }
    }

    fn print_node(&self, node: &OxcNode<'n, 'a>) -> String {
        let range = self.get_range(node);
        self.source
            .get(range.start_pos..range.end_pos)
            .unwrap_or("<synthesized>")
            .to_string()
    }
}
