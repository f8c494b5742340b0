//! Grouping primitives shared by the feature aggregates.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::format::{safe_date, MISSING};

/// One named line of a [`PivotTable`], aligned with its keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Values grouped by an ordered key (usually a day or week) and a series
/// name (usually a game). Missing cells are 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    pub keys: Vec<String>,
    pub series: Vec<Series>,
}

impl PivotTable {
    /// Builds from `(key, series, value)` triples. Keys are ordered
    /// chronologically, series by first appearance, and repeated cells sum.
    pub fn build<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = (String, String, f64)>,
    {
        let mut keys: Vec<String> = Vec::new();
        let mut key_index: HashMap<String, usize> = HashMap::new();
        let mut names: Vec<String> = Vec::new();
        let mut name_index: HashMap<String, usize> = HashMap::new();
        let mut cells: HashMap<(usize, usize), f64> = HashMap::new();

        for (key, name, value) in triples {
            if key.is_empty() {
                continue;
            }
            let k = *key_index.entry(key.clone()).or_insert_with(|| {
                keys.push(key);
                keys.len() - 1
            });
            let n = *name_index.entry(name.clone()).or_insert_with(|| {
                names.push(name);
                names.len() - 1
            });
            *cells.entry((k, n)).or_insert(0.0) += value;
        }

        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| chronological(&keys[a], &keys[b]));

        let series = names
            .into_iter()
            .enumerate()
            .map(|(n, name)| Series {
                name,
                values: order
                    .iter()
                    .map(|&k| cells.get(&(k, n)).copied().unwrap_or(0.0))
                    .collect(),
            })
            .collect();
        let keys = order.into_iter().map(|k| keys[k].clone()).collect();

        Self { keys, series }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() || self.series.is_empty()
    }

    /// Sum across series for the key at `index`.
    pub fn key_total(&self, index: usize) -> f64 {
        self.series
            .iter()
            .filter_map(|s| s.values.get(index))
            .sum()
    }

    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }

    pub fn max_key_total(&self) -> f64 {
        (0..self.keys.len())
            .map(|i| self.key_total(i))
            .fold(0.0, f64::max)
    }
}

/// Orders date-like keys by instant, unparseable keys last by text.
pub fn chronological(a: &str, b: &str) -> Ordering {
    match (safe_date(a), safe_date(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sums `value` per `key`, groups in first-appearance order.
pub fn group_sum<T, K, V>(items: &[T], key: K, value: V) -> Vec<(String, f64)>
where
    K: Fn(&T) -> String,
    V: Fn(&T) -> f64,
{
    let mut groups: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for item in items {
        let k = key(item);
        let v = value(item);
        match index.get(&k) {
            Some(&i) => groups[i].1 += v,
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, v));
            }
        }
    }
    groups
}

pub fn group_count<T, K>(items: &[T], key: K) -> Vec<(String, f64)>
where
    K: Fn(&T) -> String,
{
    group_sum(items, key, |_| 1.0)
}

/// Key of the largest group; the earliest wins ties, `-` when empty.
pub fn top_by(groups: &[(String, f64)]) -> String {
    let mut best: Option<&(String, f64)> = None;
    for group in groups {
        match best {
            Some((_, v)) if group.1 <= *v => {}
            _ => best = Some(group),
        }
    }
    best.map(|(k, _)| k.clone()).unwrap_or_else(|| MISSING.to_string())
}

/// Groups sorted by value, largest first. Stable for ties.
pub fn sorted_desc(mut groups: Vec<(String, f64)>) -> Vec<(String, f64)> {
    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    groups
}

/// `total / count`, with an empty denominator treated as 1.
pub fn mean_or_zero(total: f64, count: usize) -> f64 {
    total / count.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn triple(k: &str, s: &str, v: f64) -> (String, String, f64) {
        (k.to_string(), s.to_string(), v)
    }

    #[test]
    fn test_pivot_orders_keys_chronologically() {
        let pivot = PivotTable::build(vec![
            triple("2024-01-03", "Aurory", 3.0),
            triple("2024-01-01", "Star Atlas", 1.0),
            triple("2024-01-01", "Aurory", 2.0),
            triple("", "Ignored", 9.0),
        ]);
        assert_eq!(pivot.keys, vec!["2024-01-01", "2024-01-03"]);
        assert_eq!(pivot.series[0].name, "Aurory");
        assert_eq!(pivot.series[0].values, vec![2.0, 3.0]);
        assert_eq!(pivot.series[1].values, vec![1.0, 0.0]);
        assert_eq!(pivot.key_total(0), 3.0);
        assert_eq!(pivot.max_value(), 3.0);
    }

    #[test]
    fn test_pivot_sums_repeated_cells() {
        let pivot = PivotTable::build(vec![triple("2024-01-01", "A", 1.0), triple("2024-01-01", "A", 4.0)]);
        assert_eq!(pivot.series[0].values, vec![5.0]);
    }

    #[test]
    fn test_group_sum_and_top() {
        let items = vec![("a", 1.0), ("b", 5.0), ("a", 4.0)];
        let groups = group_sum(&items, |(k, _)| k.to_string(), |(_, v)| *v);
        assert_eq!(groups, vec![("a".to_string(), 5.0), ("b".to_string(), 5.0)]);
        assert_eq!(top_by(&groups), "a");
        assert_eq!(top_by(&[]), MISSING);
    }

    #[test]
    fn test_group_count_sorted() {
        let items = vec!["x", "y", "y"];
        let counts = sorted_desc(group_count(&items, |s| s.to_string()));
        assert_eq!(counts[0], ("y".to_string(), 2.0));
    }

    #[test]
    fn test_chronological_unparseable_last() {
        assert_eq!(chronological("2024-01-01", "zzz"), Ordering::Less);
        assert_eq!(chronological("2024-02-01", "2024-01-01"), Ordering::Greater);
    }
}
