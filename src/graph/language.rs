//! Language detection from file extensions.

use serde::Serialize;

/// Language of a file node, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    /// `.js`, `.jsx`
    JavaScript,
    /// `.ts`, `.tsx`
    TypeScript,
    /// `.py`
    Python,
    /// `.rb`
    Ruby,
    /// `.java`
    Java,
    /// `.go`
    Go,
    /// `.rs`
    Rust,
    /// `.cpp`
    #[serde(rename = "C++")]
    Cpp,
    /// `.c`
    C,
    /// `.php`
    #[serde(rename = "PHP")]
    Php,
    /// `.css`
    #[serde(rename = "CSS")]
    Css,
    /// `.html`
    #[serde(rename = "HTML")]
    Html,
    /// `.json`
    #[serde(rename = "JSON")]
    Json,
    /// `.md`
    Markdown,
    /// Missing or unrecognized extension.
    Unknown,
}

impl Language {
    /// Detects the language of a path from the extension of its last segment.
    ///
    /// Never fails: anything unrecognized is [`Language::Unknown`].
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path);
        name.rsplit_once('.').map_or(Self::Unknown, |(_, ext)| Self::from_extension(ext))
    }

    /// Maps a bare extension (without the dot), case-insensitively.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "js" | "jsx" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "py" => Self::Python,
            "rb" => Self::Ruby,
            "java" => Self::Java,
            "go" => Self::Go,
            "rs" => Self::Rust,
            "cpp" => Self::Cpp,
            "c" => Self::C,
            "php" => Self::Php,
            "css" => Self::Css,
            "html" => Self::Html,
            "json" => Self::Json,
            "md" => Self::Markdown,
            _ => Self::Unknown,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
            Self::Ruby => "Ruby",
            Self::Java => "Java",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::Cpp => "C++",
            Self::C => "C",
            Self::Php => "PHP",
            Self::Css => "CSS",
            Self::Html => "HTML",
            Self::Json => "JSON",
            Self::Markdown => "Markdown",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
