use std::collections::HashMap;

use serde::Serialize;

use crate::address::Address;

/// Number of floor buckets tracked per city (floors 1 through 5).
pub const FLOOR_BUCKETS: usize = 5;

/// Per-city counter of buildings by floor count.
///
/// Bucket `i` counts addresses with `floor == i + 1`. Floors outside
/// `1..=FLOOR_BUCKETS` are not counted anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FloorHistogram([usize; FLOOR_BUCKETS]);

impl FloorHistogram {
    pub fn from_buckets(buckets: [usize; FLOOR_BUCKETS]) -> Self {
        Self(buckets)
    }

    /// Count `floor` into its bucket. Returns false if the floor is out of range.
    pub fn record(&mut self, floor: i32) -> bool {
        match bucket_index(floor) {
            Some(idx) => {
                self.0[idx] += 1;
                true
            }
            None => false,
        }
    }

    /// Number of addresses with exactly `floor` floors (0 for out-of-range floors).
    pub fn count(&self, floor: i32) -> usize {
        bucket_index(floor).map(|idx| self.0[idx]).unwrap_or(0)
    }

    pub fn buckets(&self) -> &[usize; FLOOR_BUCKETS] {
        &self.0
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

fn bucket_index(floor: i32) -> Option<usize> {
    let idx = usize::try_from(floor).ok()?.checked_sub(1)?;
    (idx < FLOOR_BUCKETS).then_some(idx)
}

/// Group addresses by full equality and keep the groups seen more than once.
pub fn find_duplicates(addresses: &[Address]) -> HashMap<Address, usize> {
    let mut counts: HashMap<&Address, usize> = HashMap::new();
    for address in addresses {
        *counts.entry(address).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(address, count)| (address.clone(), count))
        .collect()
}

/// Build the floor histogram for every city present in `addresses`.
///
/// A city appears in the result even if none of its addresses has an
/// in-range floor; its histogram is then all zeros.
pub fn floor_statistics(addresses: &[Address]) -> HashMap<String, FloorHistogram> {
    let mut stats: HashMap<String, FloorHistogram> = HashMap::new();
    for address in addresses {
        match stats.get_mut(address.city()) {
            Some(histogram) => {
                histogram.record(address.floor());
            }
            None => {
                let mut histogram = FloorHistogram::default();
                histogram.record(address.floor());
                stats.insert(address.city().to_owned(), histogram);
            }
        }
    }
    stats
}

/// Both statistics computed over one parsed file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Number of addresses that were ingested.
    pub records: usize,
    pub duplicates: HashMap<Address, usize>,
    pub floors: HashMap<String, FloorHistogram>,
}

impl Report {
    pub fn compute(addresses: &[Address]) -> Self {
        Self {
            records: addresses.len(),
            duplicates: find_duplicates(addresses),
            floors: floor_statistics(addresses),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Duplicates ordered by count (highest first), ties broken by address.
    pub fn sorted_duplicates(&self) -> Vec<(&Address, usize)> {
        let mut entries: Vec<(&Address, usize)> =
            self.duplicates.iter().map(|(a, &c)| (a, c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Cities in alphabetical order.
    pub fn sorted_cities(&self) -> Vec<(&str, &FloorHistogram)> {
        let mut entries: Vec<(&str, &FloorHistogram)> =
            self.floors.iter().map(|(c, h)| (c.as_str(), h)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Serializable, deterministically ordered view of the report.
    pub fn summary(&self) -> ReportSummary<'_> {
        ReportSummary {
            records: self.records,
            duplicates: self
                .sorted_duplicates()
                .into_iter()
                .map(|(address, count)| DuplicateEntry { address, count })
                .collect(),
            floors: self
                .sorted_cities()
                .into_iter()
                .map(|(city, floors)| CityFloors { city, floors })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportSummary<'a> {
    pub records: usize,
    pub duplicates: Vec<DuplicateEntry<'a>>,
    pub floors: Vec<CityFloors<'a>>,
}

#[derive(Debug, Serialize)]
pub struct DuplicateEntry<'a> {
    #[serde(flatten)]
    pub address: &'a Address,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CityFloors<'a> {
    pub city: &'a str,
    pub floors: &'a FloorHistogram,
}
