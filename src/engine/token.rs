use indexmap::IndexMap;
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::sort::sort_by_frequency;

/// FrequencyTable 構造体
/// word -> count table for one source.
///
/// Keeps the order of first occurrence. Every stored count is >= 1.
///
/// # Examples
/// ```
/// use word_frequency_engine::FrequencyTable;
/// let mut table = FrequencyTable::new();
/// table.add_token("cat").add_token("dog").add_token("cat");
///
/// assert_eq!(table.count("cat"), 2);
/// assert_eq!(table.total_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    token_count: IndexMap<String, u64>,
    total_token_count: u64,
}

/// Tokenの追加
impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// increment-or-insert
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        self.add_count(token, 1)
    }

    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Adds `n` occurrences of `token`. `n == 0` is a no-op so no
    /// zero-count entry is ever stored.
    /// Counts and the total saturate at `u64::MAX`.
    #[inline]
    pub fn add_count(&mut self, token: &str, n: u64) -> &mut Self {
        if n == 0 {
            return self;
        }
        match self.token_count.get_mut(token) {
            Some(count) => *count = count.saturating_add(n),
            None => {
                self.token_count.insert(token.to_string(), n);
            }
        }
        self.total_token_count = self.total_token_count.saturating_add(n);
        self
    }

    /// Sums `other` into `self`.
    pub fn merge(&mut self, other: &FrequencyTable) -> &mut Self {
        for (token, &count) in other.iter() {
            self.add_count(token, count);
        }
        self
    }

    pub fn clear(&mut self) {
        self.token_count.clear();
        self.total_token_count = 0;
    }
}

/// FrequencyTableの情報を取得するための実装
impl FrequencyTable {
    /// Occurrences of `token`, 0 if absent.
    #[inline]
    pub fn count(&self, token: &str) -> u64 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.token_count.contains_key(token)
    }

    /// Number of distinct words.
    #[inline]
    pub fn len(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    /// Sum of all counts.
    #[inline]
    pub fn total_count(&self) -> u64 {
        self.total_token_count
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &u64)> {
        self.token_count.iter().map(|(token, count)| (token.as_str(), count))
    }

    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.token_count.values().copied()
    }

    #[inline]
    pub fn most_frequent_count(&self) -> u64 {
        self.token_count.values().max().copied().unwrap_or(0)
    }

    /// 頻度でソートされたトークンのベクタを取得(降順)
    /// Ties are ordered by word ascending.
    pub fn sorted_frequency_vector(&self) -> Vec<(String, u64)> {
        let mut token_list: Vec<(String, u64)> = self
            .token_count
            .iter()
            .map(|(token, &count)| (token.clone(), count))
            .collect();
        sort_by_frequency(&mut token_list);
        token_list
    }

    /// tokenの多様性
    /// distinct / total, 0.0 for an empty table
    #[inline]
    pub fn unique_token_ratio(&self) -> f64 {
        if self.total_token_count == 0 {
            return 0.0;
        }
        self.token_count.len() as f64 / self.total_token_count as f64
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for token in iter {
            table.add_token(token);
        }
        table
    }
}

impl FromIterator<String> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for token in iter {
            table.add_token(&token);
        }
        table
    }
}

/// Serialized as a plain `{ word: count }` map; the total is derived.
impl Serialize for FrequencyTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.token_count.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FrequencyTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token_count = IndexMap::<String, u64>::deserialize(deserializer)?;
        if let Some((token, _)) = token_count.iter().find(|&(_, &count)| count == 0) {
            return Err(D::Error::custom(format!(
                "FrequencyTable deserialize error: zero count for {token:?}"
            )));
        }
        let total_token_count = token_count
            .values()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
            .ok_or_else(|| D::Error::custom("FrequencyTable deserialize error: total count overflows u64"))?;
        Ok(FrequencyTable {
            token_count,
            total_token_count,
        })
    }
}
