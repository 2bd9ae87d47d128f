use super::*;
use std::fs;
use tempfile::tempdir;

use st_materialize::Dialect;

const PIPELINE_YAML: &str = r#"
name: analytics
assets:
  - name: my.events
    type: sf.sql
    query: SELECT * FROM raw.events
    materialization:
      type: table
      strategy: append
    hooks:
      pre:
        - query: SET QUERY_TAG = 'strata'
  - name: my.daily
    type: sf.sql
    query: SELECT 1
"#;

fn load(yaml: &str) -> Pipeline {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pipeline.yml");
    fs::write(&path, yaml).unwrap();
    Pipeline::from_path(&path).unwrap()
}

#[test]
fn test_render_all_assets_in_declaration_order() {
    let pipeline = load(PIPELINE_YAML);
    let materializer = Materializer::new(Dialect::Snowflake);

    let rendered = render_assets(&pipeline, &materializer, None).unwrap();
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0].0, "my.events");
    assert_eq!(
        rendered[0].1,
        vec![
            "SET QUERY_TAG = 'strata';",
            "INSERT INTO my.events SELECT * FROM raw.events",
        ]
    );
    assert_eq!(rendered[1].0, "my.daily");
    assert_eq!(rendered[1].1, vec!["SELECT 1"]);
}

#[test]
fn test_render_single_asset_case_insensitive() {
    let pipeline = load(PIPELINE_YAML);
    let materializer = Materializer::new(Dialect::Snowflake);

    let rendered = render_assets(&pipeline, &materializer, Some("MY.DAILY")).unwrap();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].0, "my.daily");
}

#[test]
fn test_render_unknown_asset_fails() {
    let pipeline = load(PIPELINE_YAML);
    let materializer = Materializer::new(Dialect::Snowflake);

    let err = render_assets(&pipeline, &materializer, Some("my.missing")).unwrap_err();
    assert!(err.to_string().contains("my.missing"));
    // the error names the assets that do exist
    assert!(err.to_string().contains("my.events, my.daily"));
}

#[test]
fn test_render_surfaces_compile_errors_with_asset_name() {
    let yaml = r#"
name: broken
assets:
  - name: my.orders
    query: SELECT 1
    materialization:
      type: table
      strategy: delete+insert
"#;
    let pipeline = load(yaml);
    let materializer = Materializer::new(Dialect::Snowflake);

    let err = render_assets(&pipeline, &materializer, None).unwrap_err();
    assert!(err.to_string().contains("my.orders"));
}
