//! Where rendered recipes go after conversion.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::Result;

static NON_SLUG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

const EMPTY_SLUG: &str = "recipe";

/// Keyed storage for rendered HTML. Nothing expires on its own.
pub trait RecipeStore {
    fn insert(&self, slug: &str, html: &str) -> Result<()>;
    fn get(&self, slug: &str) -> Result<Option<String>>;
    /// Returns whether an entry was removed.
    fn delete(&self, slug: &str) -> Result<bool>;
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecipe {
    pub html: String,
    pub created_at: DateTime<Utc>,
}

/// In-process store. Entries live until deleted or cleared.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredRecipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry with its insertion time.
    pub fn entry(&self, slug: &str) -> Option<StoredRecipe> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(slug)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecipeStore for MemoryStore {
    fn insert(&self, slug: &str, html: &str) -> Result<()> {
        let entry = StoredRecipe {
            html: html.to_string(),
            created_at: Utc::now(),
        };
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(slug.to_string(), entry);
        Ok(())
    }

    fn get(&self, slug: &str) -> Result<Option<String>> {
        Ok(self.entry(slug).map(|e| e.html))
    }

    fn delete(&self, slug: &str) -> Result<bool> {
        Ok(self
            .entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(slug)
            .is_some())
    }

    fn clear(&self) -> Result<()> {
        self.entries.write().unwrap_or_else(|e| e.into_inner()).clear();
        Ok(())
    }
}

/// Directory of `<slug>.html` files.
pub struct StaticDir {
    root: PathBuf,
}

impl StaticDir {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `slug`. The slug is re-slugified so it cannot leave the directory.
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{}.html", slugify(slug)))
    }

    /// Write `html` under a name derived from the recipe title.
    pub fn save(&self, name: &str, html: &str) -> Result<PathBuf> {
        let path = self.path_for(name);
        fs::write(&path, html)?;
        Ok(path)
    }
}

impl RecipeStore for StaticDir {
    fn insert(&self, slug: &str, html: &str) -> Result<()> {
        fs::write(self.path_for(slug), html)?;
        Ok(())
    }

    fn get(&self, slug: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(slug)) {
            Ok(html) => Ok(Some(html)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, slug: &str) -> Result<bool> {
        match fs::remove_file(self.path_for(slug)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<()> {
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("html") {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

/// Lowercase, runs of anything but `a-z0-9` become `-`, no leading or trailing `-`.
///
/// ```
/// use recipe_porter::store::slugify;
///
/// assert_eq!(slugify("Salmon & Pak Choi Traybake!"), "salmon-pak-choi-traybake");
/// ```
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let slug = NON_SLUG_REGEX.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// `slugify(name)` plus a millisecond timestamp.
pub fn unique_slug(name: &str) -> String {
    format!("{}-{}", slugify(name), Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_rules() {
        assert_eq!(slugify("  Thai Green Curry  "), "thai-green-curry");
        assert_eq!(slugify("Crème brûlée"), "cr-me-br-l-e");
        assert_eq!(slugify("--Already-Sluggy--"), "already-sluggy");
        assert_eq!(slugify("!!!"), "recipe");
        assert_eq!(slugify("../../etc/passwd"), "etc-passwd");
    }

    #[test]
    fn unique_slug_has_timestamp_suffix() {
        let slug = unique_slug("Pea Risotto");
        let (base, ts) = slug.rsplit_once('-').unwrap();
        assert_eq!(base, "pea-risotto");
        assert!(ts.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn memory_store_insert_get_delete_clear() {
        let store = MemoryStore::new();
        store.insert("a", "<h1>A</h1>").unwrap();
        store.insert("b", "<h1>B</h1>").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("<h1>A</h1>"));
        assert!(store.entry("a").unwrap().created_at <= Utc::now());
        assert_eq!(store.len(), 2);

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.get("a").unwrap(), None);

        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn static_dir_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StaticDir::new(dir.path().join("recipes")).unwrap();

        let path = store.save("Salmon Traybake", "<h1>Salmon Traybake</h1>").unwrap();
        assert_eq!(path.file_name().unwrap(), "salmon-traybake.html");
        assert_eq!(
            store.get("salmon-traybake").unwrap().as_deref(),
            Some("<h1>Salmon Traybake</h1>")
        );

        assert!(store.delete("salmon-traybake").unwrap());
        assert_eq!(store.get("salmon-traybake").unwrap(), None);

        store.insert("x", "1").unwrap();
        fs::write(store.root().join("keep.txt"), "keep").unwrap();
        store.clear().unwrap();
        assert_eq!(store.get("x").unwrap(), None);
        assert!(store.root().join("keep.txt").exists());
    }
}
