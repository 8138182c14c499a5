//! Font catalog - font family → font file lookup
//!
//! Matching rules, first hit wins:
//! 1. file stem equals the family (case-insensitive, spaces ignored)
//! 2. file name contains the family (case-insensitive, spaces ignored)
//!
//! Rule 2 can hit several files (`arial.ttf`, `arialbd.ttf`); that is
//! reported as `Ambiguous` instead of guessing.

use std::path::Path;

use crate::domain::{FontResolution, FontResolver};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontCatalog {
    files: Vec<String>,
}

impl FontCatalog {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add(&mut self, file: impl Into<String>) {
        self.files.push(file.into());
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn stem(file: &str) -> &str {
    Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file)
}

impl FontResolver for FontCatalog {
    fn resolve(&self, family: &str) -> FontResolution {
        let family = normalize(family);
        if family.is_empty() {
            return FontResolution::Unresolved;
        }

        let exact: Vec<&String> = self
            .files
            .iter()
            .filter(|file| normalize(stem(file)) == family)
            .collect();
        if let [file] = exact.as_slice() {
            return FontResolution::Unique((*file).clone());
        }

        let mut candidates: Vec<String> = self
            .files
            .iter()
            .filter(|file| normalize(file).contains(&family))
            .cloned()
            .collect();

        match candidates.len() {
            0 => FontResolution::Unresolved,
            1 => FontResolution::Unique(candidates.remove(0)),
            _ => FontResolution::Ambiguous(candidates),
        }
    }
}
