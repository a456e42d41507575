//! Rendering the collected API as a Lua data module or as JSON.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::ApiDoc;

/// Output file flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `return { ... }`, loadable with `dofile`.
    #[default]
    Lua,
    /// Pretty-printed JSON with the same shape.
    Json,
}

pub fn render(api: &ApiDoc, format: OutputFormat) -> Result<String> {
    let value = api.to_value();
    match format {
        OutputFormat::Lua => Ok(lua_table::to_module(&value)?),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&value)?;
            text.push('\n');
            Ok(text)
        }
    }
}

/// Render and write in one go. Nothing is written if rendering fails.
pub fn write_output(path: &Path, api: &ApiDoc, format: OutputFormat) -> Result<()> {
    let text = render(api, format)?;
    fs::write(path, text)?;
    tracing::info!(path = %path.display(), "API written");
    Ok(())
}
