//! Extension rewriting between requested ("compiled") and on-disk ("source") names.
//!
//! Both directions are pure string functions over a base filename; neither touches
//! the filesystem.

use devserve_config::ExtensionMap;

/// Splits `name.ext` into `("name", "ext")`.
/// Names without a dot, or whose only dot is the leading one (`.env`), have no extension.
fn split_extension(filename: &str) -> Option<(&str, &str)> {
    match filename.rsplit_once('.') {
        Some((base, extension)) if !base.is_empty() => Some((base, extension)),
        _ => None,
    }
}

/// Candidate source filenames for a requested filename, in priority order.
///
/// `style.css` with `css = ["scss", "less"]` yields `["style.scss", "style.less"]`.
/// An extension without an entry in the map yields nothing.
pub fn reverse_transform(filename: &str, extension_map: &ExtensionMap) -> Vec<String> {
    let Some((base, extension)) = split_extension(filename) else {
        return Vec::new();
    };

    extension_map
        .get(extension)
        .map(|sources| {
            sources
                .iter()
                .map(|source| format!("{}.{}", base, source))
                .collect()
        })
        .unwrap_or_default()
}

/// Output filename for a source filename: `style.scss` becomes `style.css`.
///
/// If several compiled extensions list the same source extension the first in map
/// order wins. Filenames whose extension is not a source extension are returned as is.
pub fn transform(filename: &str, extension_map: &ExtensionMap) -> String {
    let Some((base, extension)) = split_extension(filename) else {
        return filename.to_string();
    };

    extension_map
        .iter()
        .find(|(_, sources)| sources.iter().any(|source| source == extension))
        .map(|(compiled, _)| format!("{}.{}", base, compiled))
        .unwrap_or_else(|| filename.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &[&str])]) -> ExtensionMap {
        entries
            .iter()
            .map(|(compiled, sources)| {
                (
                    compiled.to_string(),
                    sources.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_reverse_transform_keeps_priority() {
        let rewrites = map(&[("css", &["scss", "sass", "less"])]);

        assert_eq!(
            reverse_transform("style.css", &rewrites),
            vec!["style.scss", "style.sass", "style.less"]
        );
    }

    #[test]
    fn test_reverse_transform_unknown_extension() {
        let rewrites = map(&[("css", &["scss"])]);

        assert!(reverse_transform("app.js", &rewrites).is_empty());
        assert!(reverse_transform("README", &rewrites).is_empty());
        assert!(reverse_transform(".css", &rewrites).is_empty());
    }

    #[test]
    fn test_reverse_transform_only_replaces_last_extension() {
        let rewrites = map(&[("js", &["ts"])]);

        assert_eq!(reverse_transform("app.min.js", &rewrites), vec!["app.min.ts"]);
    }

    #[test]
    fn test_transform() {
        let rewrites = map(&[("css", &["scss", "less"]), ("html", &["md"])]);

        assert_eq!(transform("style.scss", &rewrites), "style.css");
        assert_eq!(transform("about.md", &rewrites), "about.html");
        assert_eq!(transform("logo.png", &rewrites), "logo.png");
        assert_eq!(transform("Makefile", &rewrites), "Makefile");
    }

    #[test]
    fn test_transform_ambiguous_source_uses_map_order() {
        let rewrites = map(&[("js", &["ts"]), ("mjs", &["ts"])]);

        assert_eq!(transform("main.ts", &rewrites), "main.js");
    }
}
