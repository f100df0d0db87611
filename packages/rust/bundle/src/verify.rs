//! Postcondition checks on the assembled document.
//!
//! Reparses the final HTML and confirms the bundle is actually
//! self-contained. Runs after the rewriter so that template drift that
//! slipped past the substitution steps is caught before anything is
//! written to disk.

use chempack_shared::{ChempackError, Result};
use scraper::{Html, Selector};

const DATA_BANNER: &str = "// chempack: inlined datasets";
const MODULES_BANNER: &str = "// chempack: script modules";
const BOOTSTRAP_BANNER: &str = "// chempack: bootstrap";

/// Verify that `html` carries no external references and that the three
/// injected script blocks are present in bootstrap order.
pub fn verify_document(html: &str) -> Result<()> {
    let doc = Html::parse_document(html);

    let script_src = Selector::parse("script[src]").unwrap();
    if let Some(el) = doc.select(&script_src).next() {
        let src = el.value().attr("src").unwrap_or_default();
        return Err(ChempackError::pattern(format!(
            "bundled document still references external script '{src}'"
        )));
    }

    let css_link = Selector::parse(r#"link[rel="stylesheet"]"#).unwrap();
    if doc.select(&css_link).next().is_some() {
        return Err(ChempackError::pattern(
            "bundled document still references an external stylesheet",
        ));
    }

    let style = Selector::parse("style").unwrap();
    let styles = doc.select(&style).count();
    if styles != 1 {
        return Err(ChempackError::pattern(format!(
            "expected exactly one inline <style> block, found {styles}"
        )));
    }

    let data = html.find(DATA_BANNER).ok_or_else(|| {
        ChempackError::pattern("inlined dataset block missing from bundled document")
    })?;
    let modules = html.find(MODULES_BANNER).ok_or_else(|| {
        ChempackError::pattern("module script block missing from bundled document")
    })?;
    let bootstrap = html.find(BOOTSTRAP_BANNER).ok_or_else(|| {
        ChempackError::pattern("bootstrap block missing from bundled document")
    })?;
    if !(data < modules && modules < bootstrap) {
        return Err(ChempackError::pattern(
            "injected script blocks are out of order",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::rewriter::{InlineData, rewrite_shell};

    const SHELL: &str = r#"<!DOCTYPE html>
<html>
<head>
<link rel="stylesheet" href="index.css">
</head>
<body>
<!-- scripts:manifest -->
<!-- /scripts:manifest -->
<script src="js/engine.js"></script>
</body>
</html>
"#;

    fn bundled() -> String {
        let data = InlineData {
            units_json: r#"{"units":{},"prefixes":{},"derived":{}}"#.into(),
            periodic_json: "[]".into(),
            constants_json: "[]".into(),
        };
        rewrite_shell(SHELL, "body {}", "// code", &data).unwrap()
    }

    #[test]
    fn rewritten_shell_passes() {
        verify_document(&bundled()).unwrap();
    }

    #[test]
    fn lingering_external_script_rejected() {
        let html = bundled().replace(
            "</body>",
            "<script src=\"js/late.js\"></script></body>",
        );
        let err = verify_document(&html).unwrap_err();
        assert!(err.to_string().contains("js/late.js"));
    }

    #[test]
    fn lingering_stylesheet_link_rejected() {
        let html = bundled().replace(
            "</head>",
            "<link rel=\"stylesheet\" href=\"other.css\"></head>",
        );
        let err = verify_document(&html).unwrap_err();
        assert!(err.to_string().contains("stylesheet"));
    }

    #[test]
    fn missing_style_block_rejected() {
        let html = bundled().replace("<style>", "<div>").replace("</style>", "</div>");
        let err = verify_document(&html).unwrap_err();
        assert!(err.to_string().contains("<style>"));
    }

    #[test]
    fn missing_bootstrap_block_rejected() {
        let html = bundled().replace("// chempack: bootstrap", "// gone");
        let err = verify_document(&html).unwrap_err();
        assert!(err.to_string().contains("bootstrap"));
    }
}
