use crate::config::IconName;
use freedesktop_icons::lookup;
use std::path::{Path, PathBuf};

/// Absolute paths are used as-is, anything else goes through the icon theme.
pub fn find_icon_path(icon_name: &IconName, size: u16) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_str());
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    lookup(icon_name.as_str())
        .with_size(size)
        .with_scale(1)
        .find()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_has_no_path() {
        assert_eq!(find_icon_path(&IconName::from(""), 32), None);
    }

    #[test]
    fn test_missing_absolute_path() {
        assert_eq!(
            find_icon_path(&IconName::from("/nonexistent/guren/icon.png"), 32),
            None
        );
    }
}
