//! Data directory resolution and tilde expansion.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SREF_STUDIO_DATA_DIR";

/// Returns the data directory for sref-studio storage.
///
/// Resolution order:
/// 1. `$SREF_STUDIO_DATA_DIR`
/// 2. `$HOME/.local/share/sref-studio`
/// 3. `./.sref-studio` when `HOME` is unset
///
/// # Examples
///
/// ```
/// use sref_studio::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert!(!data_dir.as_os_str().is_empty());
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(std::env::var(DATA_DIR_ENV).ok(), std::env::var("HOME").ok())
}

fn resolve_data_dir(override_dir: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(expand_with_home(&dir, home.as_deref()));
    }

    home.filter(|h| !h.is_empty()).map_or_else(
        || PathBuf::from(".sref-studio"),
        |home| PathBuf::from(home).join(".local").join("share").join("sref-studio"),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and all paths when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use sref_studio::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_with_home(path, std::env::var("HOME").ok().as_deref())
}

fn expand_with_home(path: &str, home: Option<&str>) -> String {
    let Some(home) = home.filter(|h| !h.is_empty()) else {
        return path.to_string();
    };

    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_only_at_start() {
        assert_eq!(expand_with_home("~/lib", Some("/home/u")), "/home/u/lib");
        assert_eq!(expand_with_home("~", Some("/home/u/")), "/home/u/");
        assert_eq!(expand_with_home("/a/~/b", Some("/home/u")), "/a/~/b");
        assert_eq!(expand_with_home("~/lib", None), "~/lib");
    }

    #[test]
    fn override_wins_over_home() {
        assert_eq!(
            resolve_data_dir(Some("~/styles".to_string()), Some("/home/u".to_string())),
            PathBuf::from("/home/u/styles")
        );
        assert_eq!(
            resolve_data_dir(None, Some("/home/u".to_string())),
            PathBuf::from("/home/u/.local/share/sref-studio")
        );
        assert_eq!(resolve_data_dir(Some("  ".to_string()), None), PathBuf::from(".sref-studio"));
    }
}
