//! Build a self-contained preview document from the project tree

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::shim::InterceptorShim;
use crate::fs::FileTree;

/// Entry point looked up anywhere in the tree
pub const HTML_ENTRY: &str = "index.html";
/// Stylesheet inlined in place of its `<link>` tag
pub const STYLE_ENTRY: &str = "style.css";
/// Script inlined in place of its `<script src>` tag
pub const SCRIPT_ENTRY: &str = "script.js";

/// Document shown when the project has no `index.html`
pub const NOT_FOUND_DOCUMENT: &str = "<body><h1>Error: index.html not found in project.</h1></body>";

#[allow(clippy::expect_used)] // literal pattern
static STYLE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<link[^>]*\s+href="style\.css"[^>]*>"#).expect("stylesheet link pattern")
});

#[allow(clippy::expect_used)] // literal pattern
static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<script[^>]*\s+src="script\.js"[^>]*>[\s\S]*?</script>"#)
        .expect("script tag pattern")
});

/// The latest composed preview
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedDocument {
    html: String,
    entry_found: bool,
    inlined_style: bool,
    inlined_script: bool,
}

impl ComposedDocument {
    fn not_found() -> Self {
        Self {
            html: NOT_FOUND_DOCUMENT.to_string(),
            entry_found: false,
            inlined_style: false,
            inlined_script: false,
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// True when the project had no `index.html`
    pub fn is_not_found(&self) -> bool {
        !self.entry_found
    }

    /// Whether a `style.css` link was replaced by an inline block
    pub fn inlined_style(&self) -> bool {
        self.inlined_style
    }

    /// Whether a `script.js` tag was replaced by an inline block
    pub fn inlined_script(&self) -> bool {
        self.inlined_script
    }
}

/// Compose the preview for `tree` with the default interception shim
pub fn compose(tree: &FileTree) -> ComposedDocument {
    compose_with(tree, &InterceptorShim::default())
}

/// Compose the preview for `tree`
///
/// Pure: the same tree always yields the same document. The first file
/// named `index.html`, `style.css` and `script.js` in pre-order is used,
/// regardless of its folder.
pub fn compose_with(tree: &FileTree, shim: &InterceptorShim) -> ComposedDocument {
    let Some(html_file) = tree.find_file_by_name(HTML_ENTRY) else {
        debug!("No {HTML_ENTRY} in project");
        return ComposedDocument::not_found();
    };

    let mut html = inject_interceptor(&html_file.content, &shim.render());

    let mut inlined_style = false;
    if let Some(css) = tree.find_file_by_name(STYLE_ENTRY) {
        let block = format!("<style>{}</style>", css.content);
        if let Some(replaced) = replace_first(&STYLE_LINK, &html, &block) {
            html = replaced;
            inlined_style = true;
        }
    }

    let mut inlined_script = false;
    if let Some(js) = tree.find_file_by_name(SCRIPT_ENTRY) {
        let block = format!("<script>{}</script>", js.content);
        if let Some(replaced) = replace_first(&SCRIPT_TAG, &html, &block) {
            html = replaced;
            inlined_script = true;
        }
    }

    debug!(
        entry = %html_file.path,
        bytes = html.len(),
        inlined_style,
        inlined_script,
        "Composed preview"
    );

    ComposedDocument {
        html,
        entry_found: true,
        inlined_style,
        inlined_script,
    }
}

/// Put `script` right before the first `</head>`, or at the very start
fn inject_interceptor(html: &str, script: &str) -> String {
    match html.find("</head>") {
        Some(idx) => {
            let mut out = String::with_capacity(html.len() + script.len());
            out.push_str(&html[..idx]);
            out.push_str(script);
            out.push_str(&html[idx..]);
            out
        }
        None => format!("{script}{html}"),
    }
}

/// Replace the first match of `re` with `replacement` taken literally
fn replace_first(re: &Regex, haystack: &str, replacement: &str) -> Option<String> {
    let found = re.find(haystack)?;
    let mut out = String::with_capacity(haystack.len() + replacement.len());
    out.push_str(&haystack[..found.start()]);
    out.push_str(replacement);
    out.push_str(&haystack[found.end()..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::fs::{FileNode, seed_project};

    fn project(files: &[(&str, &str)]) -> FileTree {
        let nodes = files
            .iter()
            .enumerate()
            .map(|(idx, (name, content))| {
                FileNode::file(idx.to_string(), *name, format!("/{name}"), *content)
            })
            .collect();
        FileTree::new(nodes).unwrap()
    }

    #[test]
    fn test_missing_index_yields_sentinel() {
        let tree = project(&[("style.css", "a{}"), ("script.js", "x()")]);
        let doc = compose(&tree);
        assert!(doc.is_not_found());
        assert_eq!(doc.html(), NOT_FOUND_DOCUMENT);
        assert_eq!(compose(&FileTree::default()).html(), NOT_FOUND_DOCUMENT);
    }

    #[test]
    fn test_seed_project_is_fully_inlined() {
        let tree = seed_project();
        let doc = compose(&tree);
        let css = &tree.find_file_by_name("style.css").unwrap().content;
        let js = &tree.find_file_by_name("script.js").unwrap().content;

        assert!(doc.inlined_style() && doc.inlined_script());
        let html = doc.html();
        let shim_at = html.find("var originalLog").unwrap();
        let head_end = html.find("</head>").unwrap();
        assert!(shim_at < head_end);
        assert!(html.contains(&format!("<style>{css}</style>")));
        assert!(html.contains(&format!("<script>{js}</script>")));
        assert!(!html.contains(r#"href="style.css""#));
        assert!(!html.contains(r#"src="script.js""#));
    }

    #[test]
    fn test_shim_goes_before_first_head_close() {
        let source = "<html><head><title>t</title></head><body><template><head></head></template></body></html>";
        let tree = project(&[("index.html", source)]);
        let html = compose(&tree).into_html();
        let shim = InterceptorShim::default().render();

        let expected = source.replacen("</head>", &format!("{shim}</head>"), 1);
        assert_eq!(html, expected);
        assert_eq!(html.matches("var originalLog").count(), 1);
        assert!(html.ends_with("<template><head></head></template></body></html>"));
    }

    #[test]
    fn test_no_head_prepends_shim() {
        let tree = project(&[("index.html", "<p>hi</p>")]);
        let html = compose(&tree).into_html();
        assert!(html.trim_start().starts_with("<script>"));
        assert!(html.ends_with("<p>hi</p>"));
    }

    #[test]
    fn test_only_first_link_is_replaced() {
        let page = r#"<head><link rel="stylesheet" href="style.css"></head><link data-x href="style.css" media="all">"#;
        let tree = project(&[("index.html", page), ("style.css", "h1{}")]);
        let html = compose(&tree).into_html();
        assert_eq!(html.matches("<style>h1{}</style>").count(), 1);
        assert!(html.contains(r#"<link data-x href="style.css" media="all">"#));
    }

    #[test]
    fn test_script_tag_with_body_and_extra_attributes() {
        let page = r#"<body><script type="module" src="script.js" defer>// placeholder</script></body>"#;
        let tree = project(&[("index.html", page), ("script.js", "run();")]);
        let html = compose(&tree).into_html();
        assert!(html.ends_with("<body><script>run();</script></body>"));
        assert!(!html.contains("placeholder"));
    }

    #[test]
    fn test_replacement_content_is_literal() {
        let page = r#"<head><link href="style.css"></head>"#;
        let css = "a::after { content: '$0 $1 ${name}'; }";
        let tree = project(&[("index.html", page), ("style.css", css)]);
        let html = compose(&tree).into_html();
        assert!(html.contains(&format!("<style>{css}</style>")));
    }

    #[test]
    fn test_missing_assets_skip_substitution() {
        let page = r#"<head><link rel="stylesheet" href="style.css"></head><script src="script.js"></script>"#;
        let tree = project(&[("index.html", page)]);
        let doc = compose(&tree);
        assert!(!doc.inlined_style() && !doc.inlined_script());
        assert!(doc.html().contains(r#"href="style.css""#));
        assert!(doc.html().contains(r#"<script src="script.js"></script>"#));
    }

    #[test]
    fn test_unreferenced_assets_leave_html_alone() {
        let tree = project(&[("index.html", "<head></head>"), ("style.css", "x")]);
        let doc = compose(&tree);
        assert!(!doc.inlined_style());
        assert!(!doc.html().contains("<style>"));
    }

    #[test]
    fn test_first_match_in_traversal_wins() {
        let tree = FileTree::new(vec![
            FileNode::folder(
                "1",
                "a",
                "/a",
                vec![FileNode::file("2", "index.html", "/a/index.html", "<p>first</p>")],
            ),
            FileNode::file("3", "index.html", "/index.html", "<p>second</p>"),
        ])
        .unwrap();
        assert!(compose(&tree).html().contains("first"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let tree = seed_project();
        assert_eq!(compose(&tree), compose(&tree));
    }
}
