// Per-category summaries: highlight cards and active-year ranges.

use crate::row::StatRow;

/// Placeholder for a value that is unavailable.
pub const MISSING: &str = "-";

/// One overview card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightStat {
    Era,
    WinLoss,
    Games,
    Innings,
    Strikeouts,
    Whip,
}

impl HighlightStat {
    pub const ALL: [HighlightStat; 6] = [
        HighlightStat::Era,
        HighlightStat::WinLoss,
        HighlightStat::Games,
        HighlightStat::Innings,
        HighlightStat::Strikeouts,
        HighlightStat::Whip,
    ];

    /// Key used in site config and `data-stat` attributes.
    pub fn key(&self) -> &'static str {
        match self {
            HighlightStat::Era => "ERA",
            HighlightStat::WinLoss => "W-L",
            HighlightStat::Games => "G",
            HighlightStat::Innings => "IP",
            HighlightStat::Strikeouts => "SO",
            HighlightStat::Whip => "WHIP",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        HighlightStat::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            HighlightStat::Era => "ERA",
            HighlightStat::WinLoss => "W-L Record",
            HighlightStat::Games => "Games",
            HighlightStat::Innings => "Innings",
            HighlightStat::Strikeouts => "Strikeouts",
            HighlightStat::Whip => "WHIP",
        }
    }
}

/// Display values for the six highlight cards of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlights {
    pub era: String,
    pub win_loss: String,
    pub games: String,
    pub innings: String,
    pub strikeouts: String,
    pub whip: String,
}

impl Highlights {
    /// All six values `-`.
    pub fn missing() -> Self {
        Self {
            era: MISSING.into(),
            win_loss: MISSING.into(),
            games: MISSING.into(),
            innings: MISSING.into(),
            strikeouts: MISSING.into(),
            whip: MISSING.into(),
        }
    }

    /// Values from a career row; empty fields and a missing row give `-`.
    pub fn from_career(row: Option<&StatRow>) -> Self {
        let Some(row) = row else {
            return Self::missing();
        };
        // An empty side stays empty; both empty reads as the lone dash.
        let win_loss = format!("{}-{}", row.w, row.l);
        Self {
            era: or_missing(&row.era),
            win_loss,
            games: or_missing(&row.g),
            innings: or_missing(&row.ip),
            strikeouts: or_missing(&row.so),
            whip: or_missing(&row.whip),
        }
    }

    pub fn get(&self, stat: HighlightStat) -> &str {
        match stat {
            HighlightStat::Era => &self.era,
            HighlightStat::WinLoss => &self.win_loss,
            HighlightStat::Games => &self.games,
            HighlightStat::Innings => &self.innings,
            HighlightStat::Strikeouts => &self.strikeouts,
            HighlightStat::Whip => &self.whip,
        }
    }
}

fn or_missing(value: &str) -> String {
    if value.is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

/// `""` for no years, `"2021"` for one distinct year, else `"2019-23"`.
pub fn year_range(years: &[u16]) -> String {
    let (Some(min), Some(max)) = (years.iter().min(), years.iter().max()) else {
        return String::new();
    };
    if min == max {
        min.to_string()
    } else {
        format!("{}-{:02}", min, max % 100)
    }
}
