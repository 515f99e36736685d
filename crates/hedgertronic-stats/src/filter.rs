// Category filter: the one piece of mutable UI state in the stats panel.
//
// A selection change rewrites the already-rendered tree in place: active
// button, highlight values, column labels and row visibility. No rows are
// created or removed and nothing is re-fetched.

use hedgertronic_core::html::Element;
use tracing::debug;

use crate::category::Category;
use crate::classify::StatsAggregator;
use crate::render::{
    levels_column_label, org_column_label, render_stats_panel, LEVELS_COLUMN, ORG_COLUMN,
};
use crate::summary::HighlightStat;

/// Currently selected category. Starts at Minors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryFilter {
    selected: Category,
}

impl CategoryFilter {
    pub fn new(initial: Category) -> Self {
        Self { selected: initial }
    }

    pub fn selected(&self) -> Category {
        self.selected
    }

    /// Returns `true` if the selection changed.
    pub fn select(&mut self, category: Category) -> bool {
        if self.selected == category {
            return false;
        }
        self.selected = category;
        true
    }
}

/// Rewrite a rendered panel so that `category` is the active selection.
pub fn apply_selection(tree: &mut Element, agg: &StatsAggregator, category: Category) {
    let highlights = agg.highlights(category);
    let selected = category.as_str();

    tree.for_each_mut(&mut |el: &mut Element| {
        if el.has_class("stats-category-btn") {
            let active = el.data("category") == Some(selected);
            el.set_class("active", active);
        } else if el.has_class("stat-value") {
            if let Some(stat) = el.data("stat").and_then(HighlightStat::from_key) {
                el.set_text(highlights.get(stat));
            }
        } else if el.tag() == "th" {
            let label = match el.data("column") {
                Some(ORG_COLUMN) => Some(org_column_label(category)),
                Some(LEVELS_COLUMN) => Some(levels_column_label(category)),
                _ => None,
            };
            if let Some(label) = label {
                el.set_text(label);
            }
        } else if el.tag() == "tr" {
            if let Some(hidden) = el.data("category").map(|c| c != selected) {
                el.set_hidden(hidden);
            }
        }
    });
}

/// A rendered stats panel together with its data and filter state.
#[derive(Debug, Clone)]
pub struct StatsPanel {
    aggregator: StatsAggregator,
    filter: CategoryFilter,
    tree: Element,
}

impl StatsPanel {
    pub fn new(
        aggregator: StatsAggregator,
        highlights: Vec<HighlightStat>,
        initial: Category,
    ) -> Self {
        let tree = render_stats_panel(&aggregator, &highlights, initial);
        Self {
            aggregator,
            filter: CategoryFilter::new(initial),
            tree,
        }
    }

    /// Switch the active category. Returns `true` if anything changed.
    pub fn select(&mut self, category: Category) -> bool {
        if !self.filter.select(category) {
            return false;
        }
        debug!("stats category -> {}", category);
        apply_selection(&mut self.tree, &self.aggregator, category);
        true
    }

    pub fn selected(&self) -> Category {
        self.filter.selected()
    }

    pub fn aggregator(&self) -> &StatsAggregator {
        &self.aggregator
    }

    pub fn tree(&self) -> &Element {
        &self.tree
    }

    pub fn into_element(self) -> Element {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::parse_rows;

    const TABLE: &str = "\
Season,Team,Level,Org,W,L,ERA,G,SV,IP,H,SO,BB,WHIP
2019,1 team,College,Johns Hopkins,6,2,2.10,12,1,60.0,50,70,20,1.17
2019,JHU,NCAA,Johns Hopkins,6,2,2.10,12,1,60.0,50,70,20,1.17
2021,2 teams,Minors,Mets,3,4,3.50,20,-,61.2,55,66,22,1.25
2021,BRK,A-,Mets,1,2,3.00,8,-,24.0,20,30,8,1.17
2022,1 team,Minors,Phillies,5,1,2.50,25,2,72.0,60,80,20,1.11
2022,REA,AA,Phillies,5,1,2.50,25,2,72.0,60,80,20,1.11
College Career,-,College,-,6,2,2.10,12,1,60.0,50,70,20,1.17
Minors Career,-,Minors,-,8,5,2.95,45,2,133.2,115,146,42,1.17";

    fn panel() -> StatsPanel {
        let agg = StatsAggregator::from_rows(parse_rows(TABLE, "test").unwrap());
        StatsPanel::new(agg, HighlightStat::ALL.to_vec(), Category::Minors)
    }

    fn visible_categories(tree: &Element, section: &str) -> Vec<String> {
        tree.find(|e| e.tag() == section)
            .unwrap()
            .child_elements()
            .filter(|r| !r.is_hidden())
            .filter_map(|r| r.data("category").map(str::to_string))
            .collect()
    }

    fn stat_value(tree: &Element, key: &str) -> String {
        tree.find(|e| e.has_class("stat-value") && e.data("stat") == Some(key))
            .unwrap()
            .text_content()
    }

    #[test]
    fn filter_starts_at_minors() {
        assert_eq!(CategoryFilter::default().selected(), Category::Minors);
        assert_eq!(panel().selected(), Category::Minors);
    }

    #[test]
    fn selecting_same_category_is_a_no_op() {
        let mut filter = CategoryFilter::default();
        assert!(!filter.select(Category::Minors));
        assert!(filter.select(Category::College));
        assert_eq!(filter.selected(), Category::College);

        let mut p = panel();
        let before = p.tree().clone();
        assert!(!p.select(Category::Minors));
        assert_eq!(p.tree(), &before);
    }

    #[test]
    fn switching_updates_every_part_of_the_panel() {
        let mut p = panel();
        assert_eq!(stat_value(p.tree(), "W-L"), "8-5");

        assert!(p.select(Category::College));
        let tree = p.tree();

        let buttons = tree.find_all(|e| e.has_class("stats-category-btn") && e.has_class("active"));
        let active: Vec<_> = buttons.iter().filter_map(|b| b.data("category")).collect();
        assert_eq!(active, vec!["College"]);

        assert_eq!(stat_value(tree, "W-L"), "6-2");
        assert_eq!(stat_value(tree, "ERA"), "2.10");

        let th = tree
            .find(|e| e.data("column") == Some(ORG_COLUMN))
            .unwrap()
            .text_content();
        assert_eq!(th, "Team");

        assert_eq!(visible_categories(tree, "tbody"), vec!["College"]);
        assert_eq!(visible_categories(tree, "tfoot"), vec!["College"]);
    }

    #[test]
    fn every_category_shows_exactly_its_rows() {
        let mut p = panel();
        for category in Category::ALL {
            p.select(category);
            let tree = p.tree();
            for section in ["tbody", "tfoot"] {
                let rows: Vec<&Element> = tree
                    .find(|e| e.tag() == section)
                    .unwrap()
                    .child_elements()
                    .collect();
                for row in rows {
                    let matches = row.data("category") == Some(category.as_str());
                    assert_eq!(!row.is_hidden(), matches, "{category} {section}");
                }
            }
        }
    }

    #[test]
    fn category_without_career_row_shows_dashes() {
        let mut p = panel();
        p.select(Category::Summer);
        for stat in HighlightStat::ALL {
            assert_eq!(stat_value(p.tree(), stat.key()), "-");
        }
        assert!(visible_categories(p.tree(), "tbody").is_empty());
        assert!(visible_categories(p.tree(), "tfoot").is_empty());
    }

    #[test]
    fn transition_matches_fresh_render() {
        let agg = StatsAggregator::from_rows(parse_rows(TABLE, "test").unwrap());
        for target in Category::ALL {
            let mut switched =
                StatsPanel::new(agg.clone(), HighlightStat::ALL.to_vec(), Category::Minors);
            switched.select(target);
            let fresh = render_stats_panel(&agg, &HighlightStat::ALL, target);
            assert_eq!(switched.tree(), &fresh, "{target}");
        }
    }

    #[test]
    fn switching_back_restores_minors_labels() {
        let mut p = panel();
        p.select(Category::Independent);
        p.select(Category::Minors);
        let levels = p
            .tree()
            .find(|e| e.data("column") == Some(LEVELS_COLUMN))
            .unwrap()
            .text_content();
        assert_eq!(levels, "Levels");
        assert_eq!(visible_categories(p.tree(), "tbody"), vec!["Minors", "Minors"]);
    }
}
