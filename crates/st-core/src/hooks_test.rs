use super::*;

fn hook(query: &str) -> Hook {
    Hook {
        query: query.to_string(),
    }
}

#[test]
fn test_no_hooks_is_identity() {
    let hooks = Hooks::default();
    assert_eq!(wrap_hooks("select 1", &hooks), "select 1");
    // no trailing semicolon or newline is added on the no-op path
    assert_eq!(wrap_hooks("select 1\n", &hooks), "select 1\n");
    assert_eq!(wrap_hooks("", &hooks), "");
}

#[test]
fn test_pre_and_post_hooks() {
    let hooks = Hooks {
        pre: vec![hook("select 1")],
        post: vec![hook("select 3")],
    };
    assert_eq!(
        wrap_hooks("select 2", &hooks),
        "select 1;\nselect 2;\nselect 3;"
    );
}

#[test]
fn test_hooks_are_normalized_to_single_semicolon() {
    let hooks = Hooks {
        pre: vec![hook("  set session foo = 1;  ")],
        post: vec![],
    };
    assert_eq!(
        wrap_hooks("select 2;", &hooks),
        "set session foo = 1;\nselect 2;"
    );
}

#[test]
fn test_empty_hook_entries_are_dropped() {
    let hooks = Hooks {
        pre: vec![hook(""), hook("   "), hook("select 1")],
        post: vec![hook("\t\n")],
    };
    assert_eq!(wrap_hooks("select 2", &hooks), "select 1;\nselect 2;");
}

#[test]
fn test_whitespace_only_main_query_is_dropped() {
    let hooks = Hooks {
        pre: vec![hook("select 1")],
        post: vec![hook("select 3")],
    };
    assert_eq!(wrap_hooks("   ", &hooks), "select 1;\nselect 3;");
}

#[test]
fn test_wrap_hook_statements() {
    let hooks = Hooks {
        pre: vec![hook("select 0")],
        post: vec![hook("select 9")],
    };
    let statements = vec!["TRUNCATE TABLE t".to_string(), "INSERT INTO t SELECT 1".to_string()];
    assert_eq!(
        wrap_hook_statements(statements, &hooks),
        vec![
            "select 0;".to_string(),
            "TRUNCATE TABLE t".to_string(),
            "INSERT INTO t SELECT 1".to_string(),
            "select 9;".to_string(),
        ]
    );
}

#[test]
fn test_wrap_hook_statements_no_hooks_is_identity() {
    let statements = vec!["SELECT 1".to_string()];
    assert_eq!(
        wrap_hook_statements(statements.clone(), &Hooks::default()),
        statements
    );
}
