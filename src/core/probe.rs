//! Plural bucket probing.
//!
//! A catalog's plural rule maps every count to a bucket. To check that each
//! plural message has every form, the validator replays it once per bucket,
//! using the smallest candidate count that selects that bucket.

use std::collections::{BTreeMap, BTreeSet};

use super::catalog::Catalog;

/// Counts tried in order. They cover the boundaries of the plural rules
/// shipped with gettext; a bucket only reachable outside this set is not probed.
pub const PLURAL_CANDIDATES: [u64; 37] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
    26, 27, 28, 29, 100, 101, 117, 200, 201, 1000, 1001,
];

/// Representative count → bucket it selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralProbe {
    samples: BTreeMap<u64, usize>,
}

impl PluralProbe {
    pub fn for_catalog(catalog: &dyn Catalog) -> Self {
        Self::from_rule(|n| catalog.plural(n))
    }

    pub fn from_rule(plural: impl Fn(u64) -> usize) -> Self {
        let mut seen = BTreeSet::new();
        let samples = PLURAL_CANDIDATES
            .iter()
            .map(|&n| (n, plural(n)))
            .filter(|&(_, bucket)| seen.insert(bucket))
            .collect();
        Self { samples }
    }

    /// `(sample, bucket)` pairs in ascending sample order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, usize)> + '_ {
        self.samples.iter().map(|(&n, &bucket)| (n, bucket))
    }

    pub fn buckets(&self) -> BTreeSet<usize> {
        self.samples.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
