//! Materialized keysets
//!
//! A [`PrimitiveSet`] mirrors a keyset one level down: every key has become a
//! live primitive, and exactly one enabled entry is the primary.

use crate::{
    crypto_format::{self, NON_RAW_PREFIX_SIZE},
    error::{PrimaryKeyFault, Result, TesseraError},
    keyset::{KeyStatus, OutputPrefixType},
    primitive::Primitive,
};
use std::collections::BTreeMap;

/// One materialized keyset member
#[derive(Debug, Clone)]
pub struct Entry {
    /// The live primitive
    pub primitive: Primitive,
    /// Id of the key it was built from
    pub key_id: u32,
    /// Status of that key
    pub status: KeyStatus,
    /// Output tagging policy of that key
    pub prefix_type: OutputPrefixType,
    prefix: Option<Vec<u8>>,
}

impl Entry {
    /// Create an entry, computing its output prefix
    #[must_use]
    pub fn new(
        primitive: Primitive,
        key_id: u32,
        status: KeyStatus,
        prefix_type: OutputPrefixType,
    ) -> Self {
        Self {
            primitive,
            key_id,
            status,
            prefix_type,
            prefix: crypto_format::output_prefix(key_id, prefix_type).ok(),
        }
    }

    /// Output prefix, or `None` when the prefix type is unknown
    #[must_use]
    pub fn prefix(&self) -> Option<&[u8]> {
        self.prefix.as_deref()
    }
}

/// A keyset turned into primitives with one unambiguous primary
#[derive(Debug, Clone)]
pub struct PrimitiveSet {
    primary: Entry,
    entries: BTreeMap<u32, Vec<Entry>>,
}

impl PrimitiveSet {
    /// Select the primary among `entries` and assemble the set
    ///
    /// `entries` are in keyset order; they are grouped by their own key id.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidPrimaryKey`] unless exactly one entry
    /// carries `primary_key_id` with status [`KeyStatus::Enabled`].
    pub fn new(primary_key_id: u32, entries: Vec<Entry>) -> Result<Self> {
        let mut candidates = entries
            .iter()
            .filter(|entry| entry.key_id == primary_key_id && entry.status == KeyStatus::Enabled);

        let primary = match (candidates.next(), candidates.next()) {
            (Some(primary), None) => primary.clone(),
            (None, _) => {
                return Err(TesseraError::InvalidPrimaryKey {
                    primary_key_id,
                    fault: PrimaryKeyFault::Missing,
                });
            }
            (Some(_), Some(_)) => {
                return Err(TesseraError::InvalidPrimaryKey {
                    primary_key_id,
                    fault: PrimaryKeyFault::Duplicate,
                });
            }
        };

        let mut grouped: BTreeMap<u32, Vec<Entry>> = BTreeMap::new();
        for entry in entries {
            grouped.entry(entry.key_id).or_default().push(entry);
        }

        Ok(Self {
            primary,
            entries: grouped,
        })
    }

    /// The entry used for new encrypt/sign/compute operations
    #[must_use]
    pub fn primary(&self) -> &Entry {
        &self.primary
    }

    /// All entries grouped by key id
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<u32, Vec<Entry>> {
        &self.entries
    }

    /// Entries built from keys with this id, in keyset order
    #[must_use]
    pub fn entries_for_key_id(&self, key_id: u32) -> &[Entry] {
        self.entries.get(&key_id).map_or(&[], Vec::as_slice)
    }

    /// Entries whose output prefix equals `prefix`
    ///
    /// `prefix` may be a whole output; only its first
    /// [`NON_RAW_PREFIX_SIZE`] bytes are compared.
    pub fn entries_for_prefix<'a>(&'a self, prefix: &'a [u8]) -> impl Iterator<Item = &'a Entry> {
        let wanted = prefix.get(..NON_RAW_PREFIX_SIZE);
        let key_id = wanted.and_then(|bytes| bytes[1..].try_into().ok().map(u32::from_be_bytes));

        key_id
            .into_iter()
            .flat_map(move |id| self.entries_for_key_id(id))
            .filter(move |entry| entry.prefix() == wanted)
    }

    /// Entries with [`OutputPrefixType::Raw`]
    pub fn raw_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .values()
            .flatten()
            .filter(|entry| entry.prefix_type == OutputPrefixType::Raw)
    }

    /// Distinct key ids, ascending
    pub fn key_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Total number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether the set has no entries; never true for a set built from a keyset
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Mac;
    use std::sync::Arc;

    struct NullMac;

    impl Mac for NullMac {
        fn compute_mac(&self, _data: &[u8]) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        fn verify_mac(&self, _tag: &[u8], _data: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    fn entry(key_id: u32, status: KeyStatus, prefix_type: OutputPrefixType) -> Entry {
        Entry::new(Primitive::Mac(Arc::new(NullMac)), key_id, status, prefix_type)
    }

    #[test]
    fn test_single_enabled_primary_selected() {
        let set = PrimitiveSet::new(
            2,
            vec![
                entry(1, KeyStatus::Enabled, OutputPrefixType::Tink),
                entry(2, KeyStatus::Enabled, OutputPrefixType::Tink),
            ],
        )
        .unwrap();
        assert_eq!(set.primary().key_id, 2);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_disabled_duplicate_does_not_count() {
        let set = PrimitiveSet::new(
            1,
            vec![
                entry(1, KeyStatus::Disabled, OutputPrefixType::Tink),
                entry(1, KeyStatus::Enabled, OutputPrefixType::Raw),
            ],
        )
        .unwrap();
        assert_eq!(set.primary().prefix_type, OutputPrefixType::Raw);
        assert_eq!(set.entries_for_key_id(1).len(), 2);
    }

    #[test]
    fn test_missing_and_duplicate_primaries() {
        let err = PrimitiveSet::new(9, vec![entry(1, KeyStatus::Enabled, OutputPrefixType::Tink)])
            .unwrap_err();
        assert!(matches!(
            err,
            TesseraError::InvalidPrimaryKey { fault: PrimaryKeyFault::Missing, .. }
        ));

        let err = PrimitiveSet::new(
            1,
            vec![
                entry(1, KeyStatus::Enabled, OutputPrefixType::Tink),
                entry(1, KeyStatus::Enabled, OutputPrefixType::Tink),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TesseraError::InvalidPrimaryKey { fault: PrimaryKeyFault::Duplicate, .. }
        ));
    }

    #[test]
    fn test_prefix_lookup() {
        let set = PrimitiveSet::new(
            5,
            vec![
                entry(5, KeyStatus::Enabled, OutputPrefixType::Tink),
                entry(6, KeyStatus::Disabled, OutputPrefixType::Legacy),
                entry(7, KeyStatus::Enabled, OutputPrefixType::Raw),
            ],
        )
        .unwrap();

        let mut output = vec![0x01, 0, 0, 0, 5];
        output.extend_from_slice(b"payload");
        let hits: Vec<u32> = set.entries_for_prefix(&output).map(|e| e.key_id).collect();
        assert_eq!(hits, vec![5]);

        // Legacy marker with the Tink key's id matches nothing
        assert_eq!(set.entries_for_prefix(&[0x00, 0, 0, 0, 5]).count(), 0);
        assert_eq!(set.entries_for_prefix(&[0x00, 0, 0, 0, 6]).count(), 1);
        assert_eq!(set.entries_for_prefix(&[0x01]).count(), 0);

        let raw: Vec<u32> = set.raw_entries().map(|e| e.key_id).collect();
        assert_eq!(raw, vec![7]);
    }

    #[test]
    fn test_primary_is_matched_on_the_entry_key_id() {
        // Key 2 sits where key 1 was declared primary
        let err = PrimitiveSet::new(1, vec![entry(2, KeyStatus::Enabled, OutputPrefixType::Tink)])
            .unwrap_err();
        assert!(matches!(
            err,
            TesseraError::InvalidPrimaryKey { primary_key_id: 1, fault: PrimaryKeyFault::Missing }
        ));

        let set = PrimitiveSet::new(
            3,
            vec![
                entry(4, KeyStatus::Enabled, OutputPrefixType::Tink),
                entry(3, KeyStatus::Enabled, OutputPrefixType::Tink),
                entry(4, KeyStatus::Disabled, OutputPrefixType::Raw),
            ],
        )
        .unwrap();
        assert_eq!(set.primary().key_id, 3);
        assert!(set.entries_for_key_id(4).iter().all(|e| e.key_id == 4));
        assert_eq!(set.entries_for_key_id(4).len(), 2);
        assert_eq!(set.key_ids().collect::<Vec<_>>(), vec![3, 4]);
    }
}
