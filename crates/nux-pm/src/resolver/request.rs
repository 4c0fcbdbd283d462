use indexmap::IndexMap;

use crate::error::{ResolveError, Result};

/// The assembly file names a resolution run looks for.
///
/// Names compare case-insensitively. The first spelling seen is kept as the
/// canonical name and input order is preserved.
#[derive(Debug, Clone, Default)]
pub struct AssemblyRequestSet {
    /// Case-folded name -> canonical name
    names: IndexMap<String, String>,
    /// Canonical names that appeared more than once in the input
    duplicates: Vec<String>,
}

impl AssemblyRequestSet {
    /// Build a request set, collapsing case-insensitive duplicates.
    ///
    /// Fails on empty or whitespace-only names.
    pub fn new<I, S>(assemblies: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: IndexMap<String, String> = IndexMap::new();
        let mut occurrences: IndexMap<String, usize> = IndexMap::new();
        let mut duplicates = Vec::new();

        for assembly in assemblies {
            let assembly = assembly.as_ref();
            if assembly.trim().is_empty() {
                return Err(ResolveError::InvalidAssemblyName {
                    name: assembly.to_string(),
                });
            }

            let key = fold_case(assembly);
            let count = occurrences.entry(key.clone()).or_insert(0);
            *count += 1;

            let canonical = names.entry(key).or_insert_with(|| assembly.to_string());
            if *count == 2 {
                duplicates.push(canonical.clone());
            }
        }

        Ok(Self { names, duplicates })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Canonical names in request order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    /// Names that were requested more than once (one entry per name)
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&fold_case(name))
    }

    /// Request-order index of the entry matching `file_name`, if any
    pub(crate) fn index_of(&self, file_name: &str) -> Option<usize> {
        self.names.get_index_of(&fold_case(file_name))
    }
}

/// Case folding used for every assembly name comparison.
///
/// Unicode lowercase mapping, independent of the current locale.
pub(crate) fn fold_case(name: &str) -> String {
    name.to_lowercase()
}
