use crate::error::GroundTruthError;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Section key for entries that appear before any `###` header.
pub const GLOBAL_SECTION: &str = "__global__";

/// Leading enumeration such as `1.`, `2)`, `3 -` or `4.)`.
static ENUMERATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*[.)\-]*\s*").expect("valid enumeration regex"));

/// Every line boundary a text file may use; `\r\n` counts as one break.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c\x1d\x1e\x{85}\x{2028}\x{2029}]")
        .expect("valid line break regex")
});

/// One expected step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruthEntry {
    pub description: String,
    pub role: String,
}

impl GroundTruthEntry {
    pub fn new(description: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            role: role.into(),
        }
    }
}

/// Hand-authored expected steps, grouped by file name.
///
/// ```text
/// ### invoice.png
/// 1. Receive invoice | Clerk
/// 2. Approve payment | Manager
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroundTruth {
    sections: IndexMap<String, Vec<GroundTruthEntry>>,
}

impl GroundTruth {
    /// Parses a ground-truth document.
    ///
    /// A `###` line opens a named section. Content lines lose their enumeration prefix
    /// and are split into description and role on `|` (last segment is the role) or,
    /// failing that, on tabs. The unsectioned group is kept only if it has entries or
    /// no named section exists.
    pub fn parse(text: &str) -> Self {
        let mut sections: IndexMap<String, Vec<GroundTruthEntry>> = IndexMap::new();
        sections.insert(GLOBAL_SECTION.to_string(), Vec::new());
        let mut current = GLOBAL_SECTION.to_string();

        for line in LINE_BREAK.split(text) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(name) = line.strip_prefix("###") {
                current = name.trim().to_string();
                sections.entry(current.clone()).or_default();
                continue;
            }

            let content = ENUMERATION.replace(line, "");
            let (description, role) = split_description_role(&content);
            if !description.is_empty() {
                sections
                    .entry(current.clone())
                    .or_default()
                    .push(GroundTruthEntry { description, role });
            }
        }

        if sections.len() > 1 && sections.get(GLOBAL_SECTION).is_some_and(Vec::is_empty) {
            sections.shift_remove(GLOBAL_SECTION);
        }
        Self { sections }
    }

    /// Reads and parses a ground-truth file. Bytes that are not valid UTF-8 are dropped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GroundTruthError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| GroundTruthError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes).replace(char::REPLACEMENT_CHARACTER, "");
        Self::parse(&text)
    }

    /// Entries for `file`: its own section if non-empty, else the global group, else nothing.
    pub fn entries_for(&self, file: &str) -> &[GroundTruthEntry] {
        [file, GLOBAL_SECTION]
            .into_iter()
            .filter_map(|key| self.sections.get(key))
            .find(|entries| !entries.is_empty())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn section(&self, name: &str) -> Option<&[GroundTruthEntry]> {
        self.sections.get(name).map(Vec::as_slice)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn split_description_role(line: &str) -> (String, String) {
    let split_on = |sep: char| -> Vec<&str> {
        line.split(sep)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    };

    if line.contains('|') {
        let parts = split_on('|');
        return match parts.as_slice() {
            [] => (String::new(), String::new()),
            [only] => (only.to_string(), String::new()),
            [description @ .., role] => (description.join(" | "), role.to_string()),
        };
    }
    if line.contains('\t') {
        let parts = split_on('\t');
        return match parts.as_slice() {
            [] => (String::new(), String::new()),
            [only] => (only.to_string(), String::new()),
            [description, role, ..] => (description.to_string(), role.to_string()),
        };
    }
    (line.trim().to_string(), String::new())
}
