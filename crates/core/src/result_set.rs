use serde::Serialize;

use crate::CanonicalDate;

/// Unique canonical dates in order of first discovery.
///
/// Callers that want a single expiration date take [`ResultSet::first`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    dates: Vec<CanonicalDate>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the date was already present.
    pub fn insert(&mut self, date: CanonicalDate) -> bool {
        if self.dates.contains(&date) {
            return false;
        }
        self.dates.push(date);
        true
    }

    pub fn contains(&self, date: &CanonicalDate) -> bool {
        self.dates.contains(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> Option<CanonicalDate> {
        self.dates.first().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalDate> {
        self.dates.iter()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.dates.iter().map(ToString::to_string).collect()
    }
}

impl Extend<CanonicalDate> for ResultSet {
    fn extend<I: IntoIterator<Item = CanonicalDate>>(&mut self, iter: I) {
        for date in iter {
            self.insert(date);
        }
    }
}

impl FromIterator<CanonicalDate> for ResultSet {
    fn from_iter<I: IntoIterator<Item = CanonicalDate>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ResultSet {
    type Item = CanonicalDate;
    type IntoIter = std::vec::IntoIter<CanonicalDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a CanonicalDate;
    type IntoIter = std::slice::Iter<'a, CanonicalDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}
