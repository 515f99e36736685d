// Stats panel renderer: category selector, highlight cards and the season
// table, as a pure function of the aggregator and the selected category.
//
// Every category's rows are rendered; rows outside the selection are hidden,
// never omitted, so a later selection change only flips visibility.

use hedgertronic_core::html::Element;

use crate::category::Category;
use crate::classify::{SeasonAggregate, StatsAggregator};
use crate::lookups::{category_league, level_badge_class, org_badge_class, org_display_name};
use crate::row::{StatColumn, StatRow};
use crate::summary::{HighlightStat, Highlights};

/// `data-column` value of the organization/team header.
pub const ORG_COLUMN: &str = "team";
/// `data-column` value of the levels/league header.
pub const LEVELS_COLUMN: &str = "levels";

pub fn org_column_label(category: Category) -> &'static str {
    if category.is_affiliated() {
        "Organization"
    } else {
        "Team"
    }
}

pub fn levels_column_label(category: Category) -> &'static str {
    if category.is_affiliated() {
        "Levels"
    } else {
        "League"
    }
}

/// Render the whole panel with `selected` active.
pub fn render_stats_panel(
    agg: &StatsAggregator,
    highlights: &[HighlightStat],
    selected: Category,
) -> Element {
    Element::new("div")
        .with_class("stats-panel")
        .with_child(render_selector(agg, selected))
        .with_child(render_overview(&agg.highlights(selected), highlights))
        .with_child(
            Element::new("div")
                .with_class("stats-table-wrapper")
                .with_child(render_table(agg, selected)),
        )
}

fn render_selector(agg: &StatsAggregator, selected: Category) -> Element {
    let buttons = Category::ALL.into_iter().map(|category| {
        let mut btn = Element::new("button")
            .with_class("stats-category-btn")
            .with_data("category", category.as_str())
            .with_child(
                Element::new("span")
                    .with_class("stats-category-name")
                    .with_text(category.as_str()),
            )
            .with_child(
                Element::new("span")
                    .with_class("stats-category-years")
                    .with_text(&agg.year_range(category)),
            );
        btn.set_class("active", category == selected);
        btn
    });
    Element::new("div")
        .with_class("stats-category-selector")
        .with_children(buttons)
}

fn render_overview(values: &Highlights, stats: &[HighlightStat]) -> Element {
    let cards = stats.iter().map(|stat| {
        Element::new("div")
            .with_class("stat-card-large")
            .with_child(
                Element::new("div")
                    .with_class("stat-value")
                    .with_data("stat", stat.key())
                    .with_text(values.get(*stat)),
            )
            .with_child(
                Element::new("div")
                    .with_class("stat-label")
                    .with_text(stat.label()),
            )
    });
    Element::new("div")
        .with_class("stats-overview")
        .with_children(cards)
}

fn render_table(agg: &StatsAggregator, selected: Category) -> Element {
    let mut header = Element::new("tr")
        .with_child(Element::new("th").with_text("Year"))
        .with_child(
            Element::new("th")
                .with_data("column", ORG_COLUMN)
                .with_text(org_column_label(selected)),
        )
        .with_child(
            Element::new("th")
                .with_data("column", LEVELS_COLUMN)
                .with_text(levels_column_label(selected)),
        );
    for column in StatColumn::TABLE {
        header.push(Element::new("th").with_text(column.header()));
    }

    let body = agg
        .season_rows()
        .iter()
        .map(|season| render_season_row(agg, season, selected));

    let footer = Category::ALL.into_iter().filter_map(|category| {
        agg.career_row(category)
            .map(|row| render_career_row(category, row, selected))
    });

    Element::new("table")
        .with_class("stats-table")
        .with_child(Element::new("thead").with_child(header))
        .with_child(Element::new("tbody").with_children(body))
        .with_child(Element::new("tfoot").with_children(footer))
}

fn render_season_row(
    agg: &StatsAggregator,
    season: &SeasonAggregate,
    selected: Category,
) -> Element {
    let row = &season.row;
    let mut tr = Element::new("tr")
        .with_data("category", &row.level)
        .with_hidden(season.category != Some(selected))
        .with_child(Element::new("td").with_text(&row.season));

    let mut org_cell = Element::new("td");
    if !row.org.is_empty() && row.org != "-" {
        org_cell.push(
            Element::new("span")
                .with_class("org-badge")
                .with_class(org_badge_class(&row.org).unwrap_or_default())
                .with_text(org_display_name(&row.org)),
        );
    }
    tr.push(org_cell);

    let mut levels_cell = Element::new("td");
    match season.category {
        Some(category) if category.is_affiliated() => {
            for level in agg.levels_for(season.year, category) {
                levels_cell.push(
                    Element::new("span")
                        .with_class("level-badge")
                        .with_class(level_badge_class(level).unwrap_or_default())
                        .with_text(level),
                );
                levels_cell.push_text(" ");
            }
        }
        Some(category) => {
            if let Some(league) = category_league(category) {
                levels_cell.push(
                    Element::new("span")
                        .with_class("league-badge")
                        .with_class(league.class)
                        .with_text(league.name),
                );
            }
        }
        None => {}
    }
    tr.push(levels_cell);

    for column in StatColumn::TABLE {
        tr.push(Element::new("td").with_text(column.display(row.value(column))));
    }
    tr
}

fn render_career_row(category: Category, row: &StatRow, selected: Category) -> Element {
    let mut tr = Element::new("tr")
        .with_data("category", category.as_str())
        .with_hidden(category != selected)
        .with_child(Element::new("td"))
        .with_child(Element::new("td"))
        .with_child(Element::new("td"));

    for column in StatColumn::TABLE {
        let raw = row.value(column);
        let raw = if raw.is_empty() { "-" } else { raw };
        tr.push(
            Element::new("td")
                .with_child(Element::new("strong").with_text(column.display(raw))),
        );
    }
    tr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::parse_rows;

    const TABLE: &str = "\
Season,Team,Level,Org,W,L,ERA,G,SV,IP,H,SO,BB,WHIP
2018,1 team,Summer,Baltimore,3,1,1.90,8,,30.0,22,35,9,1.03
2021,2 teams,Minors,Mets,3,4,3.50,20,-,61.2,55,66,22,1.25
2021,BRK,A-,Mets,1,2,3.00,8,-,24.0,20,30,8,1.17
2021,KNG,Rk+,Mets,2,2,3.80,12,-,37.2,35,36,14,1.30
2023,1 team,Independent,-,4,4,4.10,15,1,50.0,48,44,20,1.36
Summer Career,-,Summer,-,3,1,1.90,8,,30.0,22,35,9,
Minors Career,-,Minors,-,3,4,3.50,20,-,61.2,55,66,22,1.25";

    fn panel(selected: Category) -> Element {
        let agg = StatsAggregator::from_rows(parse_rows(TABLE, "test").unwrap());
        render_stats_panel(&agg, &HighlightStat::ALL, selected)
    }

    fn body_rows(tree: &Element) -> Vec<&Element> {
        tree.find(|e| e.tag() == "tbody")
            .unwrap()
            .child_elements()
            .collect()
    }

    fn footer_rows(tree: &Element) -> Vec<&Element> {
        tree.find(|e| e.tag() == "tfoot")
            .unwrap()
            .child_elements()
            .collect()
    }

    fn cell_texts(tr: &Element) -> Vec<String> {
        tr.child_elements().map(|td| td.text_content()).collect()
    }

    #[test]
    fn selector_has_one_active_button_in_category_order() {
        let tree = panel(Category::Minors);
        let buttons = tree.find_all(|e| e.has_class("stats-category-btn"));
        let names: Vec<_> = buttons.iter().filter_map(|b| b.data("category")).collect();
        assert_eq!(names, vec!["College", "Summer", "Independent", "Minors"]);
        let active: Vec<_> = buttons.iter().filter(|b| b.has_class("active")).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].data("category"), Some("Minors"));
    }

    #[test]
    fn selector_shows_year_ranges() {
        let tree = panel(Category::Minors);
        let years: Vec<String> = tree
            .find_all(|e| e.has_class("stats-category-years"))
            .iter()
            .map(|e| e.text_content())
            .collect();
        assert_eq!(years, vec!["", "2018", "2023", "2021"]);
    }

    #[test]
    fn minors_row_has_org_and_level_badges() {
        let tree = panel(Category::Minors);
        let rows = body_rows(&tree);
        let minors = rows[1];
        assert!(!minors.is_hidden());
        assert_eq!(
            cell_texts(minors),
            vec![
                "2021", "New York Mets", "A- Rk+ ", "3", "4", "3.50", "20", "0", "61.2", "55",
                "66", "22", "1.25"
            ]
        );
        let badge = minors.find(|e| e.has_class("org-badge")).unwrap();
        assert!(badge.has_class("org-mets"));
        let levels: Vec<_> = minors.find_all(|e| e.has_class("level-badge"));
        assert!(levels[0].has_class("level-a-short"));
        assert!(levels[1].has_class("level-roa"));
    }

    #[test]
    fn non_affiliated_rows_show_league_badge_and_blank_saves_as_zero() {
        let tree = panel(Category::Summer);
        let summer = body_rows(&tree)[0];
        assert!(!summer.is_hidden());
        let league = summer.find(|e| e.has_class("league-badge")).unwrap();
        assert_eq!(league.text_content(), "Cal Ripken");
        assert!(league.has_class("league-summer"));
        assert_eq!(cell_texts(summer)[7], "0");
    }

    #[test]
    fn dash_org_renders_no_badge() {
        let tree = panel(Category::Independent);
        let indy = body_rows(&tree)[2];
        assert!(indy.find(|e| e.has_class("org-badge")).is_none());
        assert_eq!(cell_texts(indy)[1], "");
    }

    #[test]
    fn only_selected_rows_are_visible() {
        let tree = panel(Category::Minors);
        let visible: Vec<_> = body_rows(&tree)
            .into_iter()
            .filter(|r| !r.is_hidden())
            .filter_map(|r| r.data("category"))
            .collect();
        assert_eq!(visible, vec!["Minors"]);
        let footer_visible: Vec<_> = footer_rows(&tree)
            .into_iter()
            .filter(|r| !r.is_hidden())
            .filter_map(|r| r.data("category"))
            .collect();
        assert_eq!(footer_visible, vec!["Minors"]);
    }

    #[test]
    fn career_rows_are_bold_with_blank_leading_cells() {
        let tree = panel(Category::Summer);
        let footer = footer_rows(&tree);
        assert_eq!(footer.len(), 2);
        let summer = footer[0];
        assert_eq!(summer.data("category"), Some("Summer"));
        let cells = cell_texts(summer);
        assert_eq!(&cells[..3], ["", "", ""]);
        // Blank SV -> "-" -> "0"; blank WHIP -> "-".
        assert_eq!(cells[7], "0");
        assert_eq!(cells[12], "-");
        assert_eq!(summer.find_all(|e| e.tag() == "strong").len(), 10);
    }

    #[test]
    fn headers_follow_selection() {
        let minors = panel(Category::Minors);
        let th = |tree: &Element, col: &str| {
            tree.find(|e| e.tag() == "th" && e.data("column") == Some(col))
                .map(|e| e.text_content())
                .unwrap()
        };
        assert_eq!(th(&minors, ORG_COLUMN), "Organization");
        assert_eq!(th(&minors, LEVELS_COLUMN), "Levels");

        let college = panel(Category::College);
        assert_eq!(th(&college, ORG_COLUMN), "Team");
        assert_eq!(th(&college, LEVELS_COLUMN), "League");
    }

    #[test]
    fn overview_cards_follow_requested_order() {
        let agg = StatsAggregator::from_rows(parse_rows(TABLE, "test").unwrap());
        let tree = render_stats_panel(
            &agg,
            &[HighlightStat::WinLoss, HighlightStat::Strikeouts],
            Category::Minors,
        );
        let values: Vec<_> = tree
            .find_all(|e| e.has_class("stat-value"))
            .iter()
            .map(|e| (e.data("stat").unwrap().to_string(), e.text_content()))
            .collect();
        assert_eq!(
            values,
            vec![("W-L".to_string(), "3-4".to_string()), ("SO".to_string(), "66".to_string())]
        );
    }
}
