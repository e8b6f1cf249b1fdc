//! Comment anchoring
//!
//! The printer emits a comment before the first node whose span starts at the
//! comment's `attached_to` offset. Nodes removed or recreated by the rewrite
//! would take their comments with them; these helpers re-anchor them.

use oxc_allocator::Vec as ArenaVec;
use oxc_ast::ast::{Comment, Program, Statement};
use oxc_span::GetSpan;

use super::class_export::class_of_statement;
use crate::lazy::metadata::{decorator_name, COMPONENT_DECORATOR};

/// Offset of the first token of `statement`, class decorators included.
/// Decorators written before `export` start ahead of the statement span.
pub fn leading_offset(statement: &Statement<'_>) -> u32 {
    let start = statement.span().start;
    class_of_statement(statement)
        .and_then(|class| class.decorators.first())
        .map_or(start, |decorator| decorator.span.start.min(start))
}

/// Offset of the `@Component` decorator the rewrite erases.
pub fn component_decorator_offset(statement: &Statement<'_>) -> Option<u32> {
    class_of_statement(statement)?
        .decorators
        .iter()
        .find(|decorator| decorator_name(decorator) == Some(COMPONENT_DECORATOR))
        .map(|decorator| decorator.span.start)
}

pub fn relocate_comments(comments: &mut ArenaVec<'_, Comment>, moves: &[(u32, u32)]) {
    if moves.is_empty() {
        return;
    }
    for comment in comments.iter_mut() {
        if let Some(&(_, to)) = moves.iter().find(|(from, _)| *from == comment.attached_to) {
            comment.attached_to = to;
        }
    }
}

/// Keeps the comments in front of the first statement at the top of the
/// file once statements are inserted ahead of it. Files opening with a
/// hashbang or directives already print those first and are left alone.
pub fn pin_header_comments(program: &mut Program<'_>, first_token: u32) {
    if program.hashbang.is_some() || !program.directives.is_empty() {
        return;
    }
    for comment in program.comments.iter_mut() {
        if comment.span.end <= first_token {
            comment.attached_to = 0;
        }
    }
}
