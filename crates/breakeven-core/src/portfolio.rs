use serde::Serialize;

use crate::record::FinancialRecord;

/// Ordered collection of company records.
///
/// Input order is kept: it drives display order and colour assignment in the
/// comparison chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Portfolio {
    records: Vec<FinancialRecord>,
}

impl Portfolio {
    pub fn new(records: Vec<FinancialRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: FinancialRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FinancialRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    /// Largest sales figure, or `None` for an empty portfolio.
    pub fn max_sales(&self) -> Option<i64> {
        self.records.iter().map(FinancialRecord::sales).max()
    }

    /// First record whose name matches exactly.
    pub fn find(&self, name: &str) -> Option<&FinancialRecord> {
        self.records.iter().find(|r| r.name() == name)
    }
}

impl FromIterator<FinancialRecord> for Portfolio {
    fn from_iter<I: IntoIterator<Item = FinancialRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Portfolio {
    type Item = FinancialRecord;
    type IntoIter = std::vec::IntoIter<FinancialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a FinancialRecord;
    type IntoIter = std::slice::Iter<'a, FinancialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
