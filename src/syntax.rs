//! Language rule sets used by the highlighter.
//!
//! A rule set is static configuration: it is chosen once per file open or
//! save-as by matching the filename against each set's patterns, and it is
//! never mutated afterwards. Patterns starting with `.` match a filename
//! suffix; any other pattern matches a filename prefix.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Highlight rules for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Syntax {
    /// Name shown in the status line (e.g., "c")
    pub filetype: String,

    /// Filename patterns: `.ext` matches a suffix, anything else a prefix
    pub filematch: Vec<String>,

    /// Primary keywords (KEYWORD1)
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Secondary keywords, usually type names (KEYWORD2)
    #[serde(default)]
    pub types: Vec<String>,

    /// Marker starting a comment that runs to the end of the row
    #[serde(default)]
    pub singleline_comment_start: Option<String>,

    /// Markers delimiting a comment that may span rows
    #[serde(default)]
    pub multiline_comment_start: Option<String>,
    #[serde(default)]
    pub multiline_comment_end: Option<String>,

    #[serde(default = "default_true")]
    pub highlight_numbers: bool,
    #[serde(default = "default_true")]
    pub highlight_strings: bool,
}

fn default_true() -> bool {
    true
}

impl Syntax {
    /// Does this rule set claim `filename`?
    pub fn matches(&self, filename: &str) -> bool {
        self.filematch.iter().any(|pattern| {
            if pattern.starts_with('.') {
                filename.ends_with(pattern.as_str())
            } else {
                filename.starts_with(pattern.as_str())
            }
        })
    }

    /// Multi-line comment markers, only when both ends are configured
    pub(crate) fn multiline_markers(&self) -> Option<(&[u8], &[u8])> {
        match (&self.multiline_comment_start, &self.multiline_comment_end) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
                Some((start.as_bytes(), end.as_bytes()))
            }
            _ => None,
        }
    }

    pub(crate) fn singleline_marker(&self) -> Option<&[u8]> {
        self.singleline_comment_start
            .as_deref()
            .filter(|marker| !marker.is_empty())
            .map(str::as_bytes)
    }

    /// Keywords in match order, tagged `true` when secondary
    pub(crate) fn keyword_table(&self) -> impl Iterator<Item = (&[u8], bool)> {
        self.keywords
            .iter()
            .map(|k| (k.as_bytes(), false))
            .chain(self.types.iter().map(|k| (k.as_bytes(), true)))
            .filter(|(k, _)| !k.is_empty())
    }

    /// C / C++
    pub fn c() -> Self {
        Self {
            filetype: "c".to_string(),
            filematch: strings(&[".c", ".h", ".cpp"]),
            keywords: strings(&[
                "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
                "union", "typedef", "static", "enum", "class", "case",
            ]),
            types: strings(&[
                "int", "long", "double", "float", "char", "unsigned", "signed", "void",
            ]),
            singleline_comment_start: Some("//".to_string()),
            multiline_comment_start: Some("/*".to_string()),
            multiline_comment_end: Some("*/".to_string()),
            highlight_numbers: true,
            highlight_strings: true,
        }
    }

    pub fn rust() -> Self {
        Self {
            filetype: "rust".to_string(),
            filematch: strings(&[".rs"]),
            keywords: strings(&[
                "as", "break", "const", "continue", "crate", "else", "enum", "extern", "fn",
                "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
                "ref", "return", "self", "Self", "static", "struct", "super", "trait", "type",
                "unsafe", "use", "where", "while", "async", "await", "dyn",
            ]),
            types: strings(&[
                "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
                "usize", "f32", "f64", "bool", "char", "str", "String", "Vec", "Option",
                "Result", "Box", "true", "false",
            ]),
            singleline_comment_start: Some("//".to_string()),
            multiline_comment_start: Some("/*".to_string()),
            multiline_comment_end: Some("*/".to_string()),
            highlight_numbers: true,
            highlight_strings: true,
        }
    }

    pub fn python() -> Self {
        Self {
            filetype: "python".to_string(),
            filematch: strings(&[".py"]),
            keywords: strings(&[
                "and", "as", "assert", "break", "class", "continue", "def", "del", "elif",
                "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
                "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
                "with", "yield",
            ]),
            types: strings(&[
                "int", "float", "str", "bytes", "list", "dict", "set", "tuple", "bool", "None",
                "True", "False",
            ]),
            singleline_comment_start: Some("#".to_string()),
            multiline_comment_start: None,
            multiline_comment_end: None,
            highlight_numbers: true,
            highlight_strings: true,
        }
    }

    pub fn makefile() -> Self {
        Self {
            filetype: "makefile".to_string(),
            filematch: strings(&["Makefile", "makefile", "GNUmakefile"]),
            keywords: strings(&["ifeq", "ifneq", "ifdef", "ifndef", "else", "endif", "include"]),
            types: Vec::new(),
            singleline_comment_start: Some("#".to_string()),
            multiline_comment_start: None,
            multiline_comment_end: None,
            highlight_numbers: false,
            highlight_strings: true,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The rule sets shipped with the editor, in match order
pub fn builtin_languages() -> Vec<Syntax> {
    vec![
        Syntax::c(),
        Syntax::rust(),
        Syntax::python(),
        Syntax::makefile(),
    ]
}

/// Index of the first rule set claiming `filename`, in configuration order.
/// An empty filename selects nothing.
pub fn select(languages: &[Syntax], filename: &str) -> Option<usize> {
    if filename.is_empty() {
        return None;
    }
    languages.iter().position(|syntax| syntax.matches(filename))
}
