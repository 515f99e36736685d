// Row classifier: partitions the stats table into career totals, season
// aggregates and per-season level sets. Built once per load, read-only after.

use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::category::Category;
use crate::row::{RowShape, StatRow};
use crate::summary::{year_range, Highlights};

/// One season rolled up across teams within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonAggregate {
    pub year: u16,
    /// Parsed from the row's Level column. `None` for an unknown tag; such
    /// rows are kept but match no category.
    pub category: Option<Category>,
    pub row: StatRow,
}

/// Classified view over one stats table.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    career_rows: HashMap<Category, StatRow>,
    season_rows: Vec<SeasonAggregate>,
    season_category_levels: BTreeMap<(u16, Category), Vec<String>>,
    category_years: HashMap<Category, Vec<u16>>,
}

impl StatsAggregator {
    pub fn from_rows(rows: Vec<StatRow>) -> Self {
        let mut agg = StatsAggregator::default();
        let mut ignored = 0usize;

        for row in rows {
            match row.shape() {
                RowShape::Season { year } if row.is_team_aggregate() => {
                    let category = Category::from_name(&row.level);
                    if let Some(c) = category {
                        agg.category_years.entry(c).or_default().push(year);
                    }
                    agg.season_rows.push(SeasonAggregate {
                        year,
                        category,
                        row,
                    });
                }
                RowShape::Season { year } => {
                    let Some(category) = Category::from_level(&row.level) else {
                        debug!(year, level = %row.level, "level has no category, skipping");
                        continue;
                    };
                    let levels = agg
                        .season_category_levels
                        .entry((year, category))
                        .or_default();
                    if !levels.contains(&row.level) {
                        levels.push(row.level);
                    }
                }
                RowShape::Career(category) => {
                    if agg.career_rows.contains_key(&category) {
                        warn!("duplicate {} career row, keeping the first", category);
                        continue;
                    }
                    agg.career_rows.insert(category, row);
                }
                RowShape::Unrecognized => ignored += 1,
            }
        }

        if ignored > 0 {
            debug!(ignored, "rows matched neither a season nor a career shape");
        }
        agg
    }

    pub fn career_row(&self, category: Category) -> Option<&StatRow> {
        self.career_rows.get(&category)
    }

    /// Season aggregates in table order.
    pub fn season_rows(&self) -> &[SeasonAggregate] {
        &self.season_rows
    }

    pub fn season_rows_for(&self, category: Category) -> impl Iterator<Item = &SeasonAggregate> {
        self.season_rows
            .iter()
            .filter(move |s| s.category == Some(category))
    }

    /// Levels pitched in `year` within `category`, first-seen order.
    pub fn levels_for(&self, year: u16, category: Category) -> &[String] {
        self.season_category_levels
            .get(&(year, category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn years_for(&self, category: Category) -> &[u16] {
        self.category_years
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn highlights(&self, category: Category) -> Highlights {
        Highlights::from_career(self.career_row(category))
    }

    pub fn year_range(&self, category: Category) -> String {
        year_range(self.years_for(category))
    }
}
