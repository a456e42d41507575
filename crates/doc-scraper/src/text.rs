//! HTML fragment → plain text for descriptions.

use crate::error::Result;

/// Render an HTML fragment as markdown-flavoured text, trimmed.
pub fn html_to_text(html: &str, width: usize) -> Result<String> {
    if html.trim().is_empty() {
        return Ok(String::new());
    }
    let text = html2text::from_read(html.as_bytes(), width)?;
    Ok(text.trim().to_string())
}
