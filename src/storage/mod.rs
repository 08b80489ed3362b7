use chrono::Local;
use std::path::Path;

/// Local wall-clock time with microseconds, e.g. `2024-06-01T10:00:00.123456`.
pub fn generate_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_iso_like() {
        let ts = generate_timestamp();
        assert_eq!(ts.len(), 26, "{ts}");
        assert_eq!(&ts[10..11], "T");
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[test]
    fn bare_filename_needs_no_directory() {
        assert!(ensure_parent_dir(Path::new("reviews.db")).is_ok());
    }
}
