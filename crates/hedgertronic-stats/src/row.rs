// Stats table rows: CSV loading and row-shape classification.
//
// The table mixes three kinds of rows, told apart by the Season column:
// per-level season rows, per-category season aggregates ("N teams"), and
// "<Category> Career" totals. Everything else is ignored.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use thiserror::Error;
use tracing::warn;

use crate::category::Category;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One row of the career stats table. Numbers stay as the strings the table
/// holds; they are displayed verbatim. Missing columns read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatRow {
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Org")]
    pub org: String,
    /// Level code, or the category name on season-aggregate rows.
    #[serde(rename = "Level")]
    pub level: String,
    #[serde(rename = "W")]
    pub w: String,
    #[serde(rename = "L")]
    pub l: String,
    #[serde(rename = "ERA")]
    pub era: String,
    #[serde(rename = "G")]
    pub g: String,
    #[serde(rename = "SV")]
    pub sv: String,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "H")]
    pub h: String,
    #[serde(rename = "SO")]
    pub so: String,
    #[serde(rename = "BB")]
    pub bb: String,
    #[serde(rename = "WHIP")]
    pub whip: String,
}

/// What a row represents, decided by its Season column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// Season is a four-digit year.
    Season { year: u16 },
    /// Season is "<Category> Career".
    Career(Category),
    /// Anything else (level totals, blank or malformed rows).
    Unrecognized,
}

/// The numeric columns shown in the stats table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatColumn {
    W,
    L,
    Era,
    G,
    Sv,
    Ip,
    H,
    So,
    Bb,
    Whip,
}

#[derive(Debug, Error)]
pub enum StatsLoadError {
    #[error("CSV error in {origin}: {source}")]
    Csv { origin: String, source: csv::Error },

    #[error("{origin} has no `{column}` column")]
    MissingColumn { origin: String, column: &'static str },
}

// ---------------------------------------------------------------------------
// Row shape
// ---------------------------------------------------------------------------

impl StatRow {
    pub fn shape(&self) -> RowShape {
        if let Some(year) = parse_year(&self.season) {
            return RowShape::Season { year };
        }
        match self
            .season
            .strip_suffix(" Career")
            .and_then(Category::from_name)
        {
            Some(category) => RowShape::Career(category),
            None => RowShape::Unrecognized,
        }
    }

    /// True when Team reads like "2 teams": a roll-up across teams.
    pub fn is_team_aggregate(&self) -> bool {
        is_team_count(&self.team)
    }

    pub fn value(&self, column: StatColumn) -> &str {
        match column {
            StatColumn::W => &self.w,
            StatColumn::L => &self.l,
            StatColumn::Era => &self.era,
            StatColumn::G => &self.g,
            StatColumn::Sv => &self.sv,
            StatColumn::Ip => &self.ip,
            StatColumn::H => &self.h,
            StatColumn::So => &self.so,
            StatColumn::Bb => &self.bb,
            StatColumn::Whip => &self.whip,
        }
    }
}

/// Exactly four ASCII digits.
pub fn parse_year(season: &str) -> Option<u16> {
    if season.len() == 4 && season.bytes().all(|b| b.is_ascii_digit()) {
        season.parse().ok()
    } else {
        None
    }
}

/// Matches a trailing `<digits><optional whitespace>team` or `teams`,
/// ignoring ASCII case.
pub fn is_team_count(team: &str) -> bool {
    let lower = team.to_ascii_lowercase();
    let Some(rest) = lower
        .strip_suffix("teams")
        .or_else(|| lower.strip_suffix("team"))
    else {
        return false;
    };
    rest.trim_end()
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

impl StatColumn {
    pub const TABLE: [StatColumn; 10] = [
        StatColumn::W,
        StatColumn::L,
        StatColumn::Era,
        StatColumn::G,
        StatColumn::Sv,
        StatColumn::Ip,
        StatColumn::H,
        StatColumn::So,
        StatColumn::Bb,
        StatColumn::Whip,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            StatColumn::W => "W",
            StatColumn::L => "L",
            StatColumn::Era => "ERA",
            StatColumn::G => "G",
            StatColumn::Sv => "SV",
            StatColumn::Ip => "IP",
            StatColumn::H => "H",
            StatColumn::So => "SO",
            StatColumn::Bb => "BB",
            StatColumn::Whip => "WHIP",
        }
    }

    /// Cell text for a raw value. Saves show `0` instead of blank or `-`.
    pub fn display<'a>(&self, raw: &'a str) -> &'a str {
        match self {
            StatColumn::Sv if raw.is_empty() || raw == "-" => "0",
            _ => raw,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Deserialize every record of `reader`, padding short records with empty
/// fields up to the header width. Records that still fail are logged and
/// skipped.
pub(crate) fn read_padded<T, R>(
    reader: &mut csv::Reader<R>,
    headers: &csv::StringRecord,
    what: &str,
) -> Vec<T>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut out = Vec::new();
    for result in reader.records() {
        let mut record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed {} row: {}", what, e);
                continue;
            }
        };
        while record.len() < headers.len() {
            record.push_field("");
        }
        match record.deserialize(Some(headers)) {
            Ok(value) => out.push(value),
            Err(e) => warn!("skipping malformed {} row: {}", what, e),
        }
    }
    out
}

fn load_rows_from_reader<R: Read>(
    rdr: R,
    origin: &str,
) -> Result<Vec<StatRow>, StatsLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers = reader
        .headers()
        .map_err(|e| StatsLoadError::Csv {
            origin: origin.to_string(),
            source: e,
        })?
        .clone();
    if !headers.iter().any(|h| h == "Season") {
        return Err(StatsLoadError::MissingColumn {
            origin: origin.to_string(),
            column: "Season",
        });
    }
    Ok(read_padded(&mut reader, &headers, "stats"))
}

/// Parse a stats table. `origin` names the source in errors. A table without
/// a `Season` column is rejected.
pub fn parse_rows(text: &str, origin: &str) -> Result<Vec<StatRow>, StatsLoadError> {
    load_rows_from_reader(text.as_bytes(), origin)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
