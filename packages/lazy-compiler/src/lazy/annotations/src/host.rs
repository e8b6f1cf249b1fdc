//! Annotation AST Abstraction
//!
//! Defines the interface the extractor uses to read decorator arguments.

use indexmap::IndexMap;
use std::fmt::Debug;

/// Location range in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// 0-based byte offset of the range start.
    pub start_pos: usize,
    /// 0-based byte offset of the range end.
    pub end_pos: usize,
}

/// Helper trait for AST nodes that can be read by the extractor.
pub trait AstNode: Debug + Clone {}

/// Literal-shape reader, agnostic to the underlying AST implementation.
pub trait AstHost<TExpression: AstNode> {
    /// Get the name of the symbol represented by the given expression node, or `None` if it is not a symbol.
    fn get_symbol_name(&self, node: &TExpression) -> Option<String>;

    fn is_string_literal(&self, node: &TExpression) -> bool;

    /// Parse the string value from the given expression. Template literals without
    /// substitutions count as strings.
    fn parse_string_literal(&self, node: &TExpression) -> Result<String, String>;

    fn is_boolean_literal(&self, node: &TExpression) -> bool;

    fn parse_boolean_literal(&self, node: &TExpression) -> Result<bool, String>;

    fn is_array_literal(&self, node: &TExpression) -> bool;

    /// Parse an array of expressions. Spreads and holes are rejected.
    fn parse_array_literal(&self, node: &TExpression) -> Result<Vec<TExpression>, String>;

    fn is_object_literal(&self, node: &TExpression) -> bool;

    /// Object properties in source order, duplicates included.
    fn parse_object_entries(&self, node: &TExpression) -> Result<Vec<(String, TExpression)>, String>;

    /// Parse the given expression into a map of property names to property expressions.
    /// A repeated key keeps its first position and its last value.
    fn parse_object_literal(&self, node: &TExpression) -> Result<IndexMap<String, TExpression>, String> {
        let mut result = IndexMap::new();
        for (key, value) in self.parse_object_entries(node)? {
            result.insert(key, value);
        }
        Ok(result)
    }

    fn is_call_expression(&self, node: &TExpression) -> bool;

    /// Returns the expression that is called.
    fn parse_callee(&self, call: &TExpression) -> Result<TExpression, String>;

    /// Returns the argument expressions for the provided call expression.
    fn parse_arguments(&self, call: &TExpression) -> Result<Vec<TExpression>, String>;

    fn get_range(&self, node: &TExpression) -> Range;

    /// Print the source code representation of the node.
    fn print_node(&self, node: &TExpression) -> String;
}
