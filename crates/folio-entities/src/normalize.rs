//! Name normalization for comparison.

use folio_core::DEFAULT_HONORIFICS;

/// Canonicalizes display names so that surface variants compare equal.
///
/// Lowercases, trims, collapses whitespace and drops a single leading
/// honorific ("Dr.", "Mr", ...).
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    honorifics: Vec<String>,
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::with_honorifics(DEFAULT_HONORIFICS.iter().copied())
    }
}

impl NameNormalizer {
    /// Create a normalizer with a custom honorific list.
    ///
    /// Entries are matched case-insensitively and without trailing periods.
    pub fn with_honorifics<I, S>(honorifics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            honorifics: honorifics
                .into_iter()
                .map(|h| h.as_ref().trim().trim_end_matches('.').to_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    /// The honorifics this normalizer strips.
    pub fn honorifics(&self) -> &[String] {
        &self.honorifics
    }

    /// Normalize a name.
    pub fn normalize(&self, name: &str) -> String {
        let lowered = name.to_lowercase();
        let mut tokens = lowered.split_whitespace().peekable();

        if let Some(first) = tokens.peek() {
            let bare = first.trim_end_matches('.');
            if self.honorifics.iter().any(|h| h == bare) {
                tokens.next();
            }
        }

        tokens.collect::<Vec<_>>().join(" ")
    }
}

/// Normalize a name with the default honorific list.
pub fn normalize_name(name: &str) -> String {
    NameNormalizer::default().normalize(name)
}
