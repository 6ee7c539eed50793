use std::collections::BTreeSet;

use super::model::{Flow, TradeRecord};

// ---------------------------------------------------------------------------
// Filter options: the values offered by the selectors
// ---------------------------------------------------------------------------

/// Distinct flow and category values of a dataset, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub flows: Vec<Flow>,
    pub categories: Vec<String>,
}

impl FilterOptions {
    pub fn from_rows(rows: &[TradeRecord]) -> Self {
        let mut options = FilterOptions::default();
        for r in rows {
            if !options.flows.contains(&r.flow) {
                options.flows.push(r.flow);
            }
            if !options.categories.contains(&r.category) {
                options.categories.push(r.category.clone());
            }
        }
        options
    }
}

// ---------------------------------------------------------------------------
// Filter selection: which values are included
// ---------------------------------------------------------------------------

/// The two inclusion sets. An empty set selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub flows: BTreeSet<Flow>,
    pub categories: BTreeSet<String>,
}

impl FilterSelection {
    /// Everything selected. Used as the initial and the reset state.
    pub fn all(options: &FilterOptions) -> Self {
        FilterSelection {
            flows: options.flows.iter().copied().collect(),
            categories: options.categories.iter().cloned().collect(),
        }
    }

    /// Whether a row satisfies both inclusion predicates.
    pub fn includes(&self, record: &TradeRecord) -> bool {
        self.flows.contains(&record.flow) && self.categories.contains(&record.category)
    }

    /// Flip one flow in or out of the selection.
    pub fn toggle_flow(&mut self, flow: Flow) {
        if !self.flows.remove(&flow) {
            self.flows.insert(flow);
        }
    }

    /// Flip one category in or out of the selection.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
    }
}

/// Rows passing the selection, in input order.
pub fn filter_rows<'a>(
    rows: &'a [TradeRecord],
    selection: &FilterSelection,
) -> Vec<&'a TradeRecord> {
    if selection.flows.is_empty() || selection.categories.is_empty() {
        return Vec::new();
    }
    rows.iter().filter(|r| selection.includes(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn rows() -> Vec<TradeRecord> {
        vec![
            record(0, "Peru", "Toys", Flow::Export, 10.0, 1),
            record(1, "Chile", "Furniture", Flow::Import, 20.0, 2),
            record(2, "Peru", "Electronics", Flow::Import, 30.0, 3),
            record(3, "Ghana", "Toys", Flow::Import, 40.0, 4),
            record(4, "Chile", "Furniture", Flow::Export, 50.0, 5),
        ]
    }

    #[test]
    fn options_are_in_first_seen_order() {
        let opts = FilterOptions::from_rows(&rows());
        assert_eq!(opts.flows, vec![Flow::Export, Flow::Import]);
        assert_eq!(opts.categories, vec!["Toys", "Furniture", "Electronics"]);
    }

    #[test]
    fn all_selection_keeps_every_row() {
        let rows = rows();
        let sel = FilterSelection::all(&FilterOptions::from_rows(&rows));
        assert_eq!(filter_rows(&rows, &sel).len(), rows.len());
    }

    #[test]
    fn every_kept_row_satisfies_both_predicates() {
        let rows = rows();
        let sel = FilterSelection {
            flows: [Flow::Import].into(),
            categories: ["Toys".to_string(), "Furniture".to_string()].into(),
        };
        let kept = filter_rows(&rows, &sel);
        let ids: Vec<usize> = kept.iter().map(|r| r.row).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(kept.len() <= rows.len());
        assert!(kept.iter().all(|r| sel.includes(r)));
    }

    #[test]
    fn empty_set_selects_nothing() {
        let rows = rows();
        let mut sel = FilterSelection::all(&FilterOptions::from_rows(&rows));
        sel.categories.clear();
        assert!(filter_rows(&rows, &sel).is_empty());

        let mut sel = FilterSelection::all(&FilterOptions::from_rows(&rows));
        sel.flows.clear();
        assert!(filter_rows(&rows, &sel).is_empty());
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut sel = FilterSelection::default();
        sel.toggle_flow(Flow::Export);
        sel.toggle_category("Toys");
        assert!(sel.flows.contains(&Flow::Export));
        assert!(sel.categories.contains("Toys"));
        sel.toggle_flow(Flow::Export);
        sel.toggle_category("Toys");
        assert_eq!(sel, FilterSelection::default());
    }
}
