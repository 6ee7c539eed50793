//! The seven dashboard views, each a pure reduction over the filtered rows.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use chrono::Datelike;
use serde::Serialize;

use super::error::ViewError;
use super::model::{Flow, TradeRecord};

/// Number of countries in the top-countries view.
pub const DEFAULT_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// View row types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowTotal {
    pub flow: Flow,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    /// Calendar month, 1 to 12.
    pub month: u32,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryTotal {
    pub country: String,
    pub import: f64,
    pub export: f64,
    pub total: f64,
}

/// Transaction counts, one row per flow and one column per payment term.
/// Every cell is present; combinations with no rows hold 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentTermsPivot {
    pub flows: Vec<Flow>,
    pub terms: Vec<String>,
    /// `counts[i][j]` is the count for `flows[i]` and `terms[j]`.
    pub counts: Vec<Vec<u64>>,
}

impl PaymentTermsPivot {
    pub fn cell(&self, flow: Flow, term: &str) -> Option<u64> {
        let i = self.flows.iter().position(|f| *f == flow)?;
        let j = self.terms.iter().position(|t| t == term)?;
        Some(self.counts[i][j])
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Grouping helper
// ---------------------------------------------------------------------------

/// Accumulators keyed by group, remembering the order groups first appear.
struct OrderedGroups<K, A> {
    index: HashMap<K, usize>,
    groups: Vec<(K, A)>,
}

impl<K: Eq + Hash + Clone, A: Default> OrderedGroups<K, A> {
    fn new() -> Self {
        OrderedGroups {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn entry(&mut self, key: &K) -> &mut A {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.groups.push((key.clone(), A::default()));
                self.index.insert(key.clone(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[i].1
    }

    fn into_vec(self) -> Vec<(K, A)> {
        self.groups
    }
}

fn count_by<F>(rows: &[&TradeRecord], key: F) -> Vec<GroupCount>
where
    F: Fn(&TradeRecord) -> &String,
{
    let mut groups: OrderedGroups<String, u64> = OrderedGroups::new();
    for &r in rows {
        *groups.entry(key(r)) += 1;
    }
    groups
        .into_vec()
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect()
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Countries by summed value, largest first, at most `n` entries.
/// Equal totals keep the order in which the countries first appear.
pub fn top_countries(rows: &[&TradeRecord], n: usize) -> Vec<GroupTotal> {
    let mut groups: OrderedGroups<String, f64> = OrderedGroups::new();
    for r in rows {
        *groups.entry(&r.country) += r.value;
    }
    let mut totals: Vec<GroupTotal> = groups
        .into_vec()
        .into_iter()
        .map(|(key, value)| GroupTotal { key, value })
        .collect();
    // stable sort keeps first-seen order among ties
    totals.sort_by(|a, b| b.value.total_cmp(&a.value));
    totals.truncate(n);
    totals
}

/// Row count per category, first-seen order.
pub fn category_distribution(rows: &[&TradeRecord]) -> Vec<GroupCount> {
    count_by(rows, |r| &r.category)
}

/// Summed value per flow, Import before Export. Flows with no rows are absent.
pub fn flow_totals(rows: &[&TradeRecord]) -> Vec<FlowTotal> {
    let mut sums: BTreeMap<Flow, f64> = BTreeMap::new();
    for r in rows {
        *sums.entry(r.flow).or_default() += r.value;
    }
    sums.into_iter()
        .map(|(flow, value)| FlowTotal { flow, value })
        .collect()
}

/// Row count per shipping method, first-seen order.
pub fn shipping_method_counts(rows: &[&TradeRecord]) -> Vec<GroupCount> {
    count_by(rows, |r| &r.shipping_method)
}

/// Counts per (flow, payment term), reshaped to a zero-filled pivot.
pub fn payment_terms_by_flow(rows: &[&TradeRecord]) -> PaymentTermsPivot {
    let mut counts: BTreeMap<(Flow, &str), u64> = BTreeMap::new();
    let mut flows: BTreeSet<Flow> = BTreeSet::new();
    let mut terms: BTreeSet<&str> = BTreeSet::new();
    for r in rows {
        flows.insert(r.flow);
        terms.insert(r.payment_terms.as_str());
        *counts.entry((r.flow, r.payment_terms.as_str())).or_default() += 1;
    }

    let cells: Vec<Vec<u64>> = flows
        .iter()
        .map(|&flow| {
            terms
                .iter()
                .map(|&term| counts.get(&(flow, term)).copied().unwrap_or(0))
                .collect::<Vec<u64>>()
        })
        .collect();

    PaymentTermsPivot {
        flows: flows.into_iter().collect(),
        terms: terms.into_iter().map(str::to_string).collect(),
        counts: cells,
    }
}

/// Mean value per calendar month, ascending. Fails on the first row whose
/// date did not parse.
pub fn monthly_average(rows: &[&TradeRecord]) -> Result<Vec<MonthlyAverage>, ViewError> {
    let mut acc: BTreeMap<u32, (f64, u64)> = BTreeMap::new();
    for r in rows {
        let date = r.date.ok_or_else(|| ViewError::InvalidDate {
            row: r.row,
            value: r.date_text.clone(),
        })?;
        let slot = acc.entry(date.month()).or_default();
        slot.0 += r.value;
        slot.1 += 1;
    }
    Ok(acc
        .into_iter()
        .map(|(month, (sum, n))| MonthlyAverage {
            month,
            mean: sum / n as f64,
        })
        .collect())
}

/// Import, Export and Total per country, sorted by country name.
pub fn country_totals(rows: &[&TradeRecord]) -> Vec<CountryTotal> {
    let mut acc: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for r in rows {
        let slot = acc.entry(r.country.as_str()).or_default();
        match r.flow {
            Flow::Import => slot.0 += r.value,
            Flow::Export => slot.1 += r.value,
        }
    }
    acc.into_iter()
        .map(|(country, (import, export))| CountryTotal {
            country: country.to_string(),
            import,
            export,
            total: import + export,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// All views together
// ---------------------------------------------------------------------------

/// Every view of the dashboard. The monthly view carries its own result so a
/// bad date only fails that chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViews {
    pub top_countries: Vec<GroupTotal>,
    pub category_distribution: Vec<GroupCount>,
    pub flow_totals: Vec<FlowTotal>,
    pub shipping_methods: Vec<GroupCount>,
    pub payment_terms: PaymentTermsPivot,
    pub monthly_average: Result<Vec<MonthlyAverage>, ViewError>,
    pub country_totals: Vec<CountryTotal>,
}

impl DashboardViews {
    pub fn compute(rows: &[&TradeRecord], top_n: usize) -> Self {
        let monthly_average = monthly_average(rows);
        if let Err(e) = &monthly_average {
            log::warn!("monthly average view unavailable: {e}");
        }
        DashboardViews {
            top_countries: top_countries(rows, top_n),
            category_distribution: category_distribution(rows),
            flow_totals: flow_totals(rows),
            shipping_methods: shipping_method_counts(rows),
            payment_terms: payment_terms_by_flow(rows),
            monthly_average,
            country_totals: country_totals(rows),
        }
    }
}
