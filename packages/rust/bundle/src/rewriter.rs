//! Structural substitutions on the HTML shell.
//!
//! The shell is rewritten in four ordered steps: inline the stylesheet,
//! collapse the manifest comment region, strip the external module script
//! tags, and inject the data + code + bootstrap blocks before `</body>`.
//! Every step that must match something verifies that it did; a shell that
//! drifted from the expected template is a fatal [`ChempackError::Pattern`],
//! never a silent no-op.

use std::sync::LazyLock;

use chempack_shared::{ChempackError, Result};
use regex::Regex;
use tracing::debug;

use crate::bootstrap::BOOTSTRAP_JS;

/// Begin marker of the manifest comment region in the shell.
pub const MANIFEST_BEGIN: &str = "<!-- scripts:manifest -->";
/// End marker of the manifest comment region in the shell.
pub const MANIFEST_END: &str = "<!-- /scripts:manifest -->";

/// The three datasets, already encoded inline-script-safe
/// (see `chempack_shared::encode::to_inline_json`).
#[derive(Debug, Clone)]
pub struct InlineData {
    pub units_json: String,
    pub periodic_json: String,
    pub constants_json: String,
}

static STYLESHEET_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<link\b[^>]*rel=["']stylesheet["'][^>]*>"#).expect("valid regex")
});

static MODULE_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[ \t]*<script src=["']js/[^"']+["']></script>\n?"#).expect("valid regex")
});

/// Rewrite the shell into the self-contained bundled document.
pub fn rewrite_shell(
    shell: &str,
    stylesheet: &str,
    modules: &str,
    data: &InlineData,
) -> Result<String> {
    let html = inline_stylesheet(shell, stylesheet)?;
    let html = collapse_manifest_region(&html)?;
    let html = strip_module_script_tags(&html);
    inject_script_blocks(&html, modules, data)
}

/// Step 1: replace the stylesheet link tag with an inline `<style>` block.
fn inline_stylesheet(html: &str, stylesheet: &str) -> Result<String> {
    let m = STYLESHEET_LINK_RE.find(html).ok_or_else(|| {
        ChempackError::pattern("no stylesheet link tag found in shell")
    })?;

    let mut out = String::with_capacity(html.len() + stylesheet.len());
    out.push_str(&html[..m.start()]);
    out.push_str("<style>\n");
    out.push_str(stylesheet);
    out.push_str("\n</style>");
    out.push_str(&html[m.end()..]);
    debug!(bytes = stylesheet.len(), "stylesheet inlined");
    Ok(out)
}

/// Step 2: collapse the manifest comment region to nothing.
///
/// The region is documentation-only scaffolding; both markers must be
/// present and in order.
fn collapse_manifest_region(html: &str) -> Result<String> {
    let begin = html.find(MANIFEST_BEGIN).ok_or_else(|| {
        ChempackError::pattern(format!("manifest begin marker '{MANIFEST_BEGIN}' not found"))
    })?;
    let end = html.find(MANIFEST_END).ok_or_else(|| {
        ChempackError::pattern(format!("manifest end marker '{MANIFEST_END}' not found"))
    })?;
    if end < begin {
        return Err(ChempackError::pattern(
            "manifest end marker precedes begin marker",
        ));
    }

    let mut out = String::with_capacity(html.len());
    out.push_str(&html[..begin]);
    out.push_str(&html[end + MANIFEST_END.len()..]);
    Ok(out)
}

/// Step 3: remove every remaining external module script tag. The shell may
/// legitimately contain zero of these, so no-match is not an error here;
/// completeness is checked again on the final document by `verify`.
fn strip_module_script_tags(html: &str) -> String {
    MODULE_SCRIPT_RE.replace_all(html, "").into_owned()
}

/// Step 4: inject the data, module-code, and bootstrap blocks immediately
/// before the document's closing body tag.
fn inject_script_blocks(html: &str, modules: &str, data: &InlineData) -> Result<String> {
    let close = html.find("</body>").ok_or_else(|| {
        ChempackError::pattern("closing </body> tag not found in shell")
    })?;

    let blocks = format!(
        "<script>\n\
         // chempack: inlined datasets\n\
         const __UNITS_DATA__ = {units};\n\
         const __PERIODIC_DATA__ = {periodic};\n\
         const __CONSTANTS_DATA__ = {constants};\n\
         </script>\n\n\
         <script>\n\
         // chempack: script modules\n\
         {modules}\n\
         </script>\n\n\
         <script>\n\
         // chempack: bootstrap\n\
         {bootstrap}\
         </script>\n",
        units = data.units_json,
        periodic = data.periodic_json,
        constants = data.constants_json,
        bootstrap = BOOTSTRAP_JS,
    );

    let mut out = String::with_capacity(html.len() + blocks.len());
    out.push_str(&html[..close]);
    out.push_str(&blocks);
    out.push_str(&html[close..]);
    Ok(out)
}
