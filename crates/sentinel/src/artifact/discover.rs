//! Discover: recover a drifted naming token from the report directory.
//!
//! Listing failures of any kind (missing directory, permission denied, I/O
//! error) are reported as `None` and treated by the resolver exactly like an
//! absent directory.

use std::path::Path;

use tracing::debug;

use super::model::ArtifactLayout;

/// Names of the non-directory entries in `dir`, sorted by byte order.
///
/// Names that are not valid UTF-8 are skipped; a token recovered from them
/// could not be rendered back into a path anyway.
pub fn list_report_names(dir: &Path) -> Option<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Report directory not listable");
            return None;
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Report directory listing interrupted");
                return None;
            }
        };
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }

    names.sort();
    Some(names)
}

/// Token segment of a report filename: the text between `{stem}_` and the
/// next `_`. `None` if the name has no delimiter after the token.
pub fn token_from_file_name<'a>(layout: &ArtifactLayout, name: &'a str) -> Option<&'a str> {
    let rest = name.strip_prefix(layout.stem.as_str())?.strip_prefix('_')?;
    let (token, _) = rest.split_once('_')?;
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// First token, in sorted name order, among reports whose token starts with
/// `token_prefix`.
pub fn recover_token(layout: &ArtifactLayout, names: &[String], token_prefix: &str) -> Option<String> {
    let file_prefix = layout.file_prefix(token_prefix);
    names
        .iter()
        .filter(|name| name.starts_with(&file_prefix))
        .find_map(|name| token_from_file_name(layout, name))
        .map(str::to_string)
}
