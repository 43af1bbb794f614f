mod builtin;

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use serde::Serialize;
use tracing::debug;

use crate::error::{CallsiftError, Result};

/// Built-in buying/selling intent phrases
pub static INTERESTED: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::from_pairs(Category::Interested, builtin::INTERESTED));

/// Built-in rejection phrases
pub static NOT_INTERESTED: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::from_pairs(Category::NotInterested, builtin::NOT_INTERESTED));

/// Built-in hesitation phrases
pub static MAYBE: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::from_pairs(Category::Maybe, builtin::MAYBE));

/// Which interest signal a lexicon scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Interested,
    NotInterested,
    Maybe,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::NotInterested, Category::Interested, Category::Maybe];

    /// File name looked up in a lexicon override directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Category::Interested => "interested.tsv",
            Category::NotInterested => "not_interested.tsv",
            Category::Maybe => "maybe.tsv",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Interested => "interested",
            Category::NotInterested => "not interested",
            Category::Maybe => "maybe",
        };
        f.write_str(name)
    }
}

/// A phrase and the score it adds when it matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexiconEntry {
    /// Lowercased phrase
    pub phrase: String,
    /// Weight, always >= 1
    pub weight: u32,
}

/// Weighted phrase table for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexicon {
    pub category: Category,
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// Build a lexicon from `(phrase, weight)` pairs
    ///
    /// Phrases are lowercased and trimmed. A repeated phrase keeps its first
    /// position and takes the last weight given. Empty phrases and zero
    /// weights are dropped.
    pub fn from_pairs<S: AsRef<str>>(category: Category, pairs: &[(S, u32)]) -> Self {
        let mut entries: Vec<LexiconEntry> = Vec::with_capacity(pairs.len());

        for (phrase, weight) in pairs {
            let phrase = phrase.as_ref().trim().to_lowercase();
            if phrase.is_empty() || *weight == 0 {
                continue;
            }
            match entries.iter_mut().find(|e| e.phrase == phrase) {
                Some(existing) => existing.weight = *weight,
                None => entries.push(LexiconEntry {
                    phrase,
                    weight: *weight,
                }),
            }
        }

        Self { category, entries }
    }

    /// Parse a `phrase<TAB>weight` table
    ///
    /// Blank lines and lines starting with `#` are ignored. `source` only
    /// labels errors.
    pub fn parse_tsv(category: Category, content: &str, source: &Path) -> Result<Self> {
        let mut pairs: Vec<(String, u32)> = Vec::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let format_error = |message: String| CallsiftError::LexiconFormat {
                path: source.to_path_buf(),
                line: index + 1,
                message,
            };

            let (phrase, weight) = line
                .rsplit_once('\t')
                .ok_or_else(|| format_error("expected `phrase<TAB>weight`".to_string()))?;

            if phrase.trim().is_empty() {
                return Err(format_error("empty phrase".to_string()));
            }

            let weight: u32 = weight
                .trim()
                .parse()
                .map_err(|e| format_error(format!("invalid weight {:?}: {}", weight.trim(), e)))?;
            if weight == 0 {
                return Err(format_error("weight must be at least 1".to_string()));
            }

            pairs.push((phrase.to_string(), weight));
        }

        Ok(Self::from_pairs(category, &pairs[..]))
    }

    /// Read a `phrase<TAB>weight` table from disk
    pub fn from_file(category: Category, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CallsiftError::LexiconIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_tsv(category, &content, path)
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Phrases in table order
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.phrase.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render back to the `phrase<TAB>weight` format
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.phrase);
            out.push('\t');
            out.push_str(&entry.weight.to_string());
            out.push('\n');
        }
        out
    }
}

/// The three lexicons a classifier scores against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconSet {
    pub not_interested: Lexicon,
    pub interested: Lexicon,
    pub maybe: Lexicon,
}

impl Default for LexiconSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LexiconSet {
    /// Copies of the built-in tables
    pub fn builtin() -> Self {
        Self {
            not_interested: NOT_INTERESTED.clone(),
            interested: INTERESTED.clone(),
            maybe: MAYBE.clone(),
        }
    }

    /// Load overrides from a directory
    ///
    /// Each category reads its [`Category::file_name`] if present and keeps
    /// the built-in table otherwise.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut set = Self::builtin();

        for category in Category::ALL {
            let path = dir.join(category.file_name());
            if !path.is_file() {
                debug!("No {} override at {:?}, using built-in table", category, path);
                continue;
            }
            let lexicon = Lexicon::from_file(category, &path)?;
            debug!("Loaded {} {} phrases from {:?}", lexicon.len(), category, path);
            *set.get_mut(category) = lexicon;
        }

        Ok(set)
    }

    pub fn get(&self, category: Category) -> &Lexicon {
        match category {
            Category::Interested => &self.interested,
            Category::NotInterested => &self.not_interested,
            Category::Maybe => &self.maybe,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Lexicon {
        match category {
            Category::Interested => &mut self.interested,
            Category::NotInterested => &mut self.not_interested,
            Category::Maybe => &mut self.maybe,
        }
    }
}
