use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use viewcache::config::ViewCacheConfig;

use super::{local_cache, read_model_file};

pub fn cmd_render(
    config: &ViewCacheConfig,
    view_path: &str,
    model: Option<&str>,
    model_file: Option<&Path>,
) -> Result<()> {
    let model = match (model, model_file) {
        (Some(inline), _) => {
            serde_json::from_str(inline).context("--model is not valid JSON")?
        }
        (None, Some(path)) => read_model_file(path)?,
        (None, None) => Value::Object(Default::default()),
    };

    let cache = local_cache(config);
    let view = cache.get(view_path)?;
    let output = view
        .render(&model)
        .with_context(|| format!("Failed to render {}", view.key()))?;

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
