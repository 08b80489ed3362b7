use std::path::Path;

pub const UNKNOWN_LANGUAGE: &str = "Unknown";

const EXTENSIONS: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript"),
    ("ts", "TypeScript"),
    ("java", "Java"),
    ("cpp", "C++"),
    ("c", "C"),
    ("cs", "C#"),
    ("go", "Go"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("kt", "Kotlin"),
    ("rs", "Rust"),
    ("html", "HTML"),
    ("css", "CSS"),
];

/// Maps a filename to a language label by its (case-insensitive) extension.
pub fn detect_language(filename: &str) -> &'static str {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            EXTENSIONS
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|(_, language)| *language)
        })
        .unwrap_or(UNKNOWN_LANGUAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_extension_maps_in_any_case() {
        for (ext, language) in EXTENSIONS {
            assert_eq!(detect_language(&format!("file.{ext}")), *language);
            assert_eq!(
                detect_language(&format!("FILE.{}", ext.to_uppercase())),
                *language
            );
        }
    }

    #[test]
    fn mixed_case_python() {
        assert_eq!(detect_language("main.PY"), "Python");
    }

    #[test]
    fn only_the_last_extension_counts() {
        assert_eq!(detect_language("bundle.min.js"), "JavaScript");
        assert_eq!(detect_language("archive.rs.bak"), UNKNOWN_LANGUAGE);
        assert_eq!(detect_language("src/lib/app.ts"), "TypeScript");
    }

    #[test]
    fn unknown_or_missing_extension() {
        for name in ["Makefile", "notes.txt", ".bashrc", "", "trailing."] {
            assert_eq!(detect_language(name), UNKNOWN_LANGUAGE, "{name:?}");
        }
    }
}
