//! Remote-to-local locale mapping and output file naming.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::LocsyncError;

/// Ordered map from a service locale id (`de`) to a local locale id (`de-DE`).
///
/// Iteration follows declaration order, which is also the order builds are
/// requested and files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleMapping {
    entries: Vec<(String, String)>,
}

impl LocaleMapping {
    /// Build a mapping, rejecting duplicate remote ids.
    pub fn new<I, K, V>(pairs: I) -> Result<Self, LocsyncError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (k, v) in pairs {
            let k = k.into();
            if entries.iter().any(|(existing, _)| *existing == k) {
                return Err(LocsyncError::Config(format!(
                    "locale '{k}' is mapped more than once"
                )));
            }
            entries.push((k, v.into()));
        }
        Ok(Self { entries })
    }

    /// Check the invariants the workflow relies on: at least one locale,
    /// non-empty remote ids, and unique local ids usable as file stems.
    pub fn validate(&self) -> Result<(), LocsyncError> {
        if self.entries.is_empty() {
            return Err(LocsyncError::Config("no target locales configured".into()));
        }
        let mut seen = HashSet::new();
        for (remote, local) in &self.entries {
            if remote.trim().is_empty() {
                return Err(LocsyncError::Config("empty remote locale id".into()));
            }
            if !is_valid_stem(local) {
                return Err(LocsyncError::Config(format!(
                    "locale '{remote}' maps to invalid file name '{local}'"
                )));
            }
            if !seen.insert(local.as_str()) {
                return Err(LocsyncError::Config(format!(
                    "local locale '{local}' is used by more than one remote locale"
                )));
            }
        }
        Ok(())
    }

    /// Remote locale ids, in order.
    pub fn remote_ids(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The mapping the product shipped with: German and European Portuguese.
impl Default for LocaleMapping {
    fn default() -> Self {
        Self {
            entries: vec![
                ("de".into(), "de-DE".into()),
                ("pt-PT".into(), "pt-PT".into()),
            ],
        }
    }
}

fn is_valid_stem(stem: &str) -> bool {
    !stem.trim().is_empty()
        && stem != "."
        && stem != ".."
        && !stem.contains(['/', '\\'])
        && !stem.contains('\0')
}

impl Serialize for LocaleMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for LocaleMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = LocaleMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of remote locale ids to local locale ids")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::new();
                while let Some((k, v)) = map.next_entry::<String, String>()? {
                    pairs.push((k, v));
                }
                LocaleMapping::new(pairs).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

/// Where the translated file for `local_locale` is written.
///
/// `{translations_dir}/{local_locale}{ext}`, with the extension (dot
/// included) taken from the source file so JSON stays JSON, YAML stays YAML.
pub fn output_path(translations_dir: &Path, local_locale: &str, source_file: &Path) -> PathBuf {
    let ext = source_file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    translations_dir.join(format!("{local_locale}{ext}"))
}
