//! Glossary extraction.

use std::collections::BTreeMap;

use soplint_ast::TreeNode;

use crate::tables::{GLOSSARY_HEADERS, body_rows, find_tables};

/// Term to definition mapping of a document's glossary table.
///
/// Terms are kept exactly as written; lookups are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    terms: BTreeMap<String, String>,
}

impl Glossary {
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    pub fn definition(&self, term: &str) -> Option<&str> {
        self.terms.get(term).map(String::as_str)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<(String, String)> for Glossary {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

/// Builds the glossary from the first glossary table under `root`.
///
/// Rows need at least a term cell; a missing definition is stored as empty.
/// A document without a glossary table yields an empty glossary.
pub fn parse_glossary<N: TreeNode>(root: &N) -> Glossary {
    let Some(table) = find_tables(root, GLOSSARY_HEADERS).into_iter().next() else {
        return Glossary::default();
    };

    body_rows(table)
        .into_iter()
        .filter_map(|row| {
            let mut cells = row.into_iter();
            let term = cells.next().filter(|term| !term.is_empty())?;
            Some((term, cells.next().unwrap_or_default()))
        })
        .collect()
}
