//! Pre/post hook wrapping
//!
//! Hooks are rendered separately from the main query and joined around it
//! here. Each statement is normalized to end with exactly one `;`. When
//! there are no hooks at all the query passes through untouched, so
//! wrapping is idempotent on hook-free assets.

use crate::asset::{Hook, Hooks};

/// Wrap a single compiled query with its pre/post hooks.
///
/// Empty or whitespace-only entries are dropped. With no hooks in either
/// list the input is returned completely unmodified.
pub fn wrap_hooks(query: &str, hooks: &Hooks) -> String {
    let pre = format_hook_queries(&hooks.pre);
    let post = format_hook_queries(&hooks.post);
    if pre.is_empty() && post.is_empty() {
        return query.to_string();
    }

    let mut parts = Vec::with_capacity(pre.len() + 1 + post.len());
    parts.extend(pre);
    if let Some(main) = format_statement(query) {
        parts.push(main);
    }
    parts.extend(post);
    parts.join("\n")
}

/// Wrap a multi-statement compilation result with its pre/post hooks.
///
/// The main statements are kept as-is; only the hook statements are
/// normalized. With no hooks the input list is returned unchanged.
pub fn wrap_hook_statements(statements: Vec<String>, hooks: &Hooks) -> Vec<String> {
    let pre = format_hook_queries(&hooks.pre);
    let post = format_hook_queries(&hooks.post);
    if pre.is_empty() && post.is_empty() {
        return statements;
    }

    let mut combined = Vec::with_capacity(pre.len() + statements.len() + post.len());
    combined.extend(pre);
    combined.extend(statements);
    combined.extend(post);
    combined
}

fn format_hook_queries(hooks: &[Hook]) -> Vec<String> {
    hooks
        .iter()
        .filter_map(|hook| format_statement(&hook.query))
        .collect()
}

/// Trim and ensure exactly one trailing `;`; `None` for empty input.
fn format_statement(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.ends_with(';') {
        Some(trimmed.to_string())
    } else {
        Some(format!("{trimmed};"))
    }
}

#[cfg(test)]
#[path = "hooks_test.rs"]
mod tests;
