//! Grouping and join primitives over record collections.
//!
//! Keys are ordered so every stage downstream of a grouping sees its keys
//! in a deterministic order. Within a group, records keep their input
//! order.

use std::collections::BTreeMap;

/// Group `items` by `key_fn`.
pub fn group_by<K, V, I, F>(items: I, key_fn: F) -> BTreeMap<K, Vec<V>>
where
    K: Ord,
    I: IntoIterator<Item = V>,
    F: Fn(&V) -> K,
{
    let mut groups: BTreeMap<K, Vec<V>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}

// ---------------------------------------------------------------------------
// Two-way join
// ---------------------------------------------------------------------------

/// Records of two collections sharing one key. Either side may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CoGrouped2<A, B> {
    pub first: Vec<A>,
    pub second: Vec<B>,
}

impl<A, B> Default for CoGrouped2<A, B> {
    fn default() -> Self {
        Self {
            first: Vec::new(),
            second: Vec::new(),
        }
    }
}

/// Join two collections on a shared key.
///
/// Every key seen on either side appears in the result.
pub fn co_group2<K, A, B, FA, FB>(
    first: impl IntoIterator<Item = A>,
    first_key: FA,
    second: impl IntoIterator<Item = B>,
    second_key: FB,
) -> BTreeMap<K, CoGrouped2<A, B>>
where
    K: Ord,
    FA: Fn(&A) -> K,
    FB: Fn(&B) -> K,
{
    let mut groups: BTreeMap<K, CoGrouped2<A, B>> = BTreeMap::new();
    for item in first {
        groups.entry(first_key(&item)).or_default().first.push(item);
    }
    for item in second {
        groups.entry(second_key(&item)).or_default().second.push(item);
    }
    groups
}

// ---------------------------------------------------------------------------
// Three-way join
// ---------------------------------------------------------------------------

/// Records of three collections sharing one key. Any side may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CoGrouped3<A, B, C> {
    pub first: Vec<A>,
    pub second: Vec<B>,
    pub third: Vec<C>,
}

impl<A, B, C> Default for CoGrouped3<A, B, C> {
    fn default() -> Self {
        Self {
            first: Vec::new(),
            second: Vec::new(),
            third: Vec::new(),
        }
    }
}

/// Join three collections on a shared key.
pub fn co_group3<K, A, B, C, FA, FB, FC>(
    first: impl IntoIterator<Item = A>,
    first_key: FA,
    second: impl IntoIterator<Item = B>,
    second_key: FB,
    third: impl IntoIterator<Item = C>,
    third_key: FC,
) -> BTreeMap<K, CoGrouped3<A, B, C>>
where
    K: Ord,
    FA: Fn(&A) -> K,
    FB: Fn(&B) -> K,
    FC: Fn(&C) -> K,
{
    let mut groups: BTreeMap<K, CoGrouped3<A, B, C>> = BTreeMap::new();
    for item in first {
        groups.entry(first_key(&item)).or_default().first.push(item);
    }
    for item in second {
        groups.entry(second_key(&item)).or_default().second.push(item);
    }
    for item in third {
        groups.entry(third_key(&item)).or_default().third.push(item);
    }
    groups
}
