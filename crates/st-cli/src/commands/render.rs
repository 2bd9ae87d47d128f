//! Render command implementation — compile asset queries into the
//! ordered statement lists for one target dialect.

use anyhow::{Context, Result};
use st_core::{wrap_hook_statements, Pipeline};
use st_materialize::Materializer;

use crate::cli::{GlobalArgs, RenderArgs, RenderFormat};

/// Execute the render command
pub fn execute(args: &RenderArgs, global: &GlobalArgs) -> Result<()> {
    let pipeline = Pipeline::from_path(&args.pipeline).context("Failed to load pipeline")?;
    let materializer = Materializer::new(args.dialect).with_full_refresh(args.full_refresh);
    if global.verbose {
        eprintln!(
            "[verbose] Rendering pipeline `{}` ({} asset(s)) for {}",
            pipeline.name,
            pipeline.assets.len(),
            materializer.dialect()
        );
    }

    let rendered = render_assets(&pipeline, &materializer, args.asset.as_deref())?;

    match args.format {
        RenderFormat::Text => print_text(&rendered),
        RenderFormat::Json => print_json(&rendered)?,
    }
    Ok(())
}

/// Compile every selected asset, hooks included, in declaration order.
fn render_assets(
    pipeline: &Pipeline,
    materializer: &Materializer,
    asset: Option<&str>,
) -> Result<Vec<(String, Vec<String>)>> {
    let targets: Vec<_> = match asset {
        Some(name) => {
            let asset = pipeline
                .get_asset_by_name_case_insensitive(name)
                .with_context(|| {
                    format!(
                        "asset `{name}` not found in pipeline `{}` (assets: {})",
                        pipeline.name,
                        pipeline.asset_names().join(", ")
                    )
                })?;
            vec![asset]
        }
        None => pipeline.assets.iter().collect(),
    };

    let mut rendered = Vec::with_capacity(targets.len());
    for asset in targets {
        let statements = materializer
            .render(asset, &asset.query)
            .with_context(|| format!("failed to render asset `{}`", asset.name))?;
        let statements = wrap_hook_statements(statements, &asset.hooks);
        rendered.push((asset.name.clone(), statements));
    }
    Ok(rendered)
}

fn print_text(rendered: &[(String, Vec<String>)]) {
    for (name, statements) in rendered {
        println!("-- {name}");
        for statement in statements {
            println!("{statement}");
        }
        println!();
    }
}

fn print_json(rendered: &[(String, Vec<String>)]) -> Result<()> {
    let doc: serde_json::Map<String, serde_json::Value> = rendered
        .iter()
        .map(|(name, statements)| (name.clone(), serde_json::json!(statements)))
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Object(doc))?
    );
    Ok(())
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
