//! Metadata table extraction.

use soplint_ast::TreeNode;

use crate::tables::body_rows;

pub const TEMPLATE_SOP_NUMBER: &str = "template sop number";
pub const TEMPLATE_SOP_VERSION: &str = "template sop version";
pub const TOPIC: &str = "topic";
pub const TEMPLATE_SOP_TYPE: &str = "template sop type";
pub const GDI_NODE: &str = "gdi node";
pub const INSTANCE_VERSION: &str = "instance version";

/// Keys every metadata table must contain.
pub const BASE_KEYS: &[&str] = &[
    TEMPLATE_SOP_NUMBER,
    TEMPLATE_SOP_VERSION,
    TOPIC,
    TEMPLATE_SOP_TYPE,
];

/// Keys that only apply to node-specific documents.
pub const NODE_KEYS: &[&str] = &[GDI_NODE, INSTANCE_VERSION];

pub const TOPICS: &[&str] = &[
    "Data protection & security",
    "Data & metadata management",
    "Technical infrastructure & software development",
    "Helpdesk & operations",
];

pub const SOP_TYPES: &[&str] = &["Node-specific SOP", "European-level SOP"];

/// Document type declared in the metadata table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SopType {
    NodeSpecific,
    EuropeanLevel,
}

impl SopType {
    /// Case-insensitive parse of the type value.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        if value == SOP_TYPES[0].to_lowercase() {
            Some(Self::NodeSpecific)
        } else if value == SOP_TYPES[1].to_lowercase() {
            Some(Self::EuropeanLevel)
        } else {
            None
        }
    }
}

/// Directory a document of type `value` is expected to live in: the first
/// word of the value, lowercased.
pub fn expected_directory(value: &str) -> Option<String> {
    value.split_whitespace().next().map(str::to_lowercase)
}

/// Metadata key/value pairs with lowercased keys, in table order.
///
/// A key repeated further down the table overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    entries: Vec<(String, String)>,
}

impl MetadataRecord {
    pub fn insert(&mut self, key: &str, value: &str) {
        let key = key.to_lowercase();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key, value.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Value of `key`, or an empty string when absent.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn sop_type(&self) -> Option<SopType> {
        self.get(TEMPLATE_SOP_TYPE).and_then(SopType::parse)
    }
}

/// Result of reading a metadata table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTable {
    pub record: MetadataRecord,
    /// Rows that did not have exactly two cells.
    pub malformed_rows: Vec<Vec<String>>,
}

/// Reads the body rows of a metadata table.
pub fn read_metadata<N: TreeNode>(table: &N) -> MetadataTable {
    let mut result = MetadataTable::default();
    for row in body_rows(table) {
        match row.as_slice() {
            [key, value] => result.record.insert(key, value),
            _ => result.malformed_rows.push(row),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{METADATA_HEADERS, find_tables};
    use crate::test_utils::{CONFORMING_SOP, with_tree};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_read_metadata_lowercases_keys() {
        let table = with_tree(CONFORMING_SOP, |root| {
            read_metadata(find_tables(root, METADATA_HEADERS)[0])
        });
        assert!(table.malformed_rows.is_empty());
        assert_eq!(table.record.get(TEMPLATE_SOP_NUMBER), Some("GDI-SOP0001"));
        assert_eq!(table.record.get(GDI_NODE), Some(""));
        assert_eq!(table.record.sop_type(), Some(SopType::EuropeanLevel));
    }

    #[test]
    fn test_later_duplicate_overwrites() {
        let mut record = MetadataRecord::default();
        record.insert("Topic", "first");
        record.insert("TOPIC", "second");
        assert_eq!(record.iter().collect::<Vec<_>>(), vec![("topic", "second")]);
    }

    #[rstest]
    #[case("Node-specific SOP", Some(SopType::NodeSpecific))]
    #[case("european-level sop", Some(SopType::EuropeanLevel))]
    #[case("Other SOP", None)]
    fn test_sop_type_parse(#[case] value: &str, #[case] expected: Option<SopType>) {
        assert_eq!(SopType::parse(value), expected);
    }

    #[rstest]
    #[case("European-level SOP", Some("european-level"))]
    #[case("Node-specific SOP", Some("node-specific"))]
    #[case("   ", None)]
    fn test_expected_directory(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected_directory(value).as_deref(), expected);
    }
}
