//! Type-tag indexing with AHashMap for fast lookups
//!
//! Maps record type tags to the indices of every record carrying that tag,
//! preserving document order within each bucket.

use crate::record::Record;
use ahash::AHashMap;

/// Type tag index: `"cc.Scene"` -> indices of all cc.Scene records
pub type TypeIndex = AHashMap<String, Vec<usize>>;

/// Build the type index from the parsed record array
pub fn build_type_index(records: &[Record]) -> TypeIndex {
    const INITIAL_TYPE_INDEX_CAPACITY: usize = 32;
    let mut index = TypeIndex::with_capacity(INITIAL_TYPE_INDEX_CAPACITY);

    for (i, record) in records.iter().enumerate() {
        index
            .entry(record.type_tag().to_string())
            .or_default()
            .push(i);
    }

    index.shrink_to_fit();
    index
}
