//! Spending totals, optionally broken down by category or month.

use serde::{Serialize, Serializer};

use crate::expense::Expense;

/// How a summary should break down the total.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// Only the overall total and count.
    #[default]
    Total,
    /// Subtotals per category.
    Category,
    /// Subtotals per `YYYY-MM` month.
    Month,
}

impl From<&str> for GroupBy {
    /// Unrecognized values fall back to [GroupBy::Total].
    fn from(value: &str) -> Self {
        match value {
            "category" => Self::Category,
            "month" => Self::Month,
            _ => Self::Total,
        }
    }
}

/// The sum and number of expenses in one group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Bucket {
    /// The sum of the amounts in the group.
    pub total: f64,
    /// The number of expenses in the group.
    pub count: usize,
}

impl Bucket {
    fn add(&mut self, amount: f64) {
        self.total += amount;
        self.count += 1;
    }
}

/// Buckets keyed by group name, serialized as a JSON object in the order they
/// are stored.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Buckets(Vec<(String, Bucket)>);

impl Buckets {
    fn add(&mut self, key: &str, amount: f64) {
        match self.0.iter_mut().find(|(name, _)| name == key) {
            Some((_, bucket)) => bucket.add(amount),
            None => {
                let mut bucket = Bucket::default();
                bucket.add(amount);
                self.0.push((key.to_owned(), bucket));
            }
        }
    }

    /// Get the bucket for `key`, if any expense fell into it.
    pub fn get(&self, key: &str) -> Option<&Bucket> {
        self.0
            .iter()
            .find_map(|(name, bucket)| (name == key).then_some(bucket))
    }

    /// The group names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// The buckets in order.
    pub fn values(&self) -> impl Iterator<Item = &Bucket> {
        self.0.iter().map(|(_, bucket)| bucket)
    }
}

impl Serialize for Buckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, bucket)| (name, bucket)))
    }
}

/// The result of summarizing a set of expenses.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    /// The sum of every amount.
    pub total: f64,
    /// The number of expenses summarized.
    pub count: usize,
    /// Present only when grouping by category, in order of first occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_category: Option<Buckets>,
    /// Present only when grouping by month, sorted by month ascending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_month: Option<Buckets>,
}

/// Total `expenses` and break the total down according to `group_by`.
///
/// Amounts are summed as `f64` in the order given, so totals may carry small
/// floating point errors.
pub fn summarize(expenses: &[Expense], group_by: GroupBy) -> SummaryResult {
    let mut summary = SummaryResult {
        total: expenses.iter().map(|expense| expense.amount).sum(),
        count: expenses.len(),
        ..Default::default()
    };

    match group_by {
        GroupBy::Total => {}
        GroupBy::Category => {
            let mut buckets = Buckets::default();

            for expense in expenses {
                buckets.add(expense.category.as_ref(), expense.amount);
            }

            summary.by_category = Some(buckets);
        }
        GroupBy::Month => {
            let mut buckets = Buckets::default();

            for expense in expenses {
                buckets.add(expense.date.month(), expense.amount);
            }

            buckets.0.sort_by(|(a, _), (b, _)| a.cmp(b));
            summary.by_month = Some(buckets);
        }
    }

    summary
}
