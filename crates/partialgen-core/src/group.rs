//! Order-preserving partition of records into output groups

use crate::config::GeneratorKind;
use crate::declaration::TypeKind;
use crate::record::ExtractedRecord;
use std::collections::HashMap;

/// Identity shared by every record of one group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Fully qualified container name
    Container(String),

    /// Namespace, `None` for the global namespace
    Namespace(Option<String>),
}

/// Records sharing one [`GroupKey`], in discovery order
///
/// A group always holds at least one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGroup {
    pub key: GroupKey,
    pub records: Vec<ExtractedRecord>,
}

impl OutputGroup {
    /// Namespace the group is emitted into
    ///
    /// Container groups take the namespace of their first record.
    pub fn namespace(&self) -> Option<&str> {
        match &self.key {
            GroupKey::Namespace(namespace) => namespace.as_deref(),
            GroupKey::Container(_) => self
                .records
                .first()
                .and_then(|record| record.namespace_name.as_deref()),
        }
    }

    /// Simple name and kind of the reopened container (container groups)
    pub fn container(&self) -> Option<(&str, TypeKind)> {
        match &self.key {
            GroupKey::Container(_) => self
                .records
                .first()
                .map(|record| (record.container_name.as_str(), record.container_kind)),
            GroupKey::Namespace(_) => None,
        }
    }

    /// Logical name of this group's unit when units are published per group
    pub fn unit_hint(&self, kind: GeneratorKind) -> String {
        let stem = match &self.key {
            GroupKey::Container(id) => id.as_str(),
            GroupKey::Namespace(Some(namespace)) => namespace.as_str(),
            GroupKey::Namespace(None) => "global",
        };
        format!("{stem}.{}", kind.unit_suffix())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Partition `records` by `key_of`, keeping first-seen order of groups and
/// discovery order of records within each group
pub fn group_records<I, F>(records: I, key_of: F) -> Vec<OutputGroup>
where
    I: IntoIterator<Item = ExtractedRecord>,
    F: Fn(&ExtractedRecord) -> GroupKey,
{
    let mut groups: Vec<OutputGroup> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for record in records {
        let key = key_of(&record);
        match index.get(&key) {
            Some(&position) => groups[position].records.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(OutputGroup {
                    key,
                    records: vec![record],
                });
            }
        }
    }

    groups
}
