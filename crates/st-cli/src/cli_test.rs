use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_render_args_parse() {
    let cli = Cli::parse_from([
        "st",
        "render",
        "--pipeline",
        "pipeline.yml",
        "--dialect",
        "snowflake",
        "--full-refresh",
    ]);
    let Commands::Render(args) = &cli.command else {
        panic!("expected render subcommand");
    };
    assert_eq!(args.dialect, Dialect::Snowflake);
    assert!(args.full_refresh);
    assert_eq!(args.format, RenderFormat::Text);
    assert!(args.asset.is_none());
}

#[test]
fn test_unknown_dialect_is_rejected() {
    let result = Cli::try_parse_from([
        "st",
        "render",
        "--pipeline",
        "pipeline.yml",
        "--dialect",
        "postgres",
    ]);
    assert!(result.is_err());
}
