// Season/career ingest: turns a per-team pitching export (Baseball-Reference
// column names) into the stats table the site renders.
//
// Output per (year, category): one "N teams" aggregate row followed by the
// individual team rows. Then one "<Category> Career" row per category and one
// level-total row per minor league level.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::category::Category;
use crate::row::read_padded;

/// Minor league levels, lowest first.
const LEVEL_ORDER: [&str; 5] = ["Rk+", "A-", "A+", "AA", "AAA"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Source level code -> (display level, category).
fn map_level(code: &str) -> Option<(&'static str, Category)> {
    match code {
        "NCAA" => Some(("NCAA", Category::College)),
        "Smr" => Some(("Summer", Category::Summer)),
        "Ind" => Some(("Independent", Category::Independent)),
        "Rk" => Some(("Rk+", Category::Minors)),
        "A-" => Some(("A-", Category::Minors)),
        "A+" => Some(("A+", Category::Minors)),
        "AA" => Some(("AA", Category::Minors)),
        "AAA" => Some(("AAA", Category::Minors)),
        _ => None,
    }
}

fn affiliate_org(aff: &str) -> Option<&'static str> {
    match aff {
        "NYM" => Some("Mets"),
        "PHI" => Some("Phillies"),
        _ => None,
    }
}

/// Organization credited when a row has no MLB affiliate.
fn category_org(category: Category) -> &'static str {
    match category {
        Category::College => "Johns Hopkins",
        Category::Summer => "Baltimore",
        Category::Independent => "Westside",
        Category::Minors => "-",
    }
}

fn team_abbrev(team: &str) -> &str {
    match team {
        "Johns Hopkins" => "JHU",
        "Baltimore Dodgers" => "BAL",
        "Westside" => "WST",
        "Brooklyn" => "BRK",
        "Kingsport" => "KNG",
        "Binghamton" => "BNG",
        "Syracuse" => "SYR",
        "Jersey Shore" => "JS",
        "Reading" => "REA",
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Innings
// ---------------------------------------------------------------------------

/// Parse baseball innings notation into outs: `20.1` (or `20.10`) is 20⅓
/// innings = 61 outs. Blank or `-` is zero. Saturates at `u32::MAX`.
pub fn parse_innings(ip: &str) -> u32 {
    let ip = ip.trim();
    if ip.is_empty() || ip == "-" {
        return 0;
    }
    let (whole, frac) = ip.split_once('.').unwrap_or((ip, "0"));
    let whole: u32 = whole.parse().unwrap_or(0);
    let thirds = match frac.trim_end_matches('0') {
        "1" => 1,
        "2" => 2,
        _ => 0,
    };
    whole.saturating_mul(3).saturating_add(thirds)
}

/// Format outs back into innings notation (`61` -> `20.1`).
pub fn format_innings(outs: u32) -> String {
    format!("{}.{}", outs / 3, outs % 3)
}

// ---------------------------------------------------------------------------
// Source rows
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
#[allow(non_snake_case)]
struct RawTeamRow {
    Year: String,
    Tm: String,
    Lg: String,
    Lev: String,
    Aff: String,
    W: String,
    L: String,
    ERA: String,
    G: String,
    GS: String,
    CG: String,
    SHO: String,
    SV: String,
    IP: String,
    H: String,
    R: String,
    ER: String,
    HR: String,
    BB: String,
    IBB: String,
    SO: String,
    HBP: String,
    BF: String,
    WHIP: String,
}

/// One season with one team, after level/org normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamLine {
    pub year: String,
    pub team: String,
    pub league: String,
    pub level: String,
    pub category: Category,
    pub org: String,
    pub w: u32,
    pub l: u32,
    pub era: f64,
    pub g: u32,
    pub gs: u32,
    pub cg: u32,
    pub sho: u32,
    pub sv: u32,
    pub outs: u32,
    pub h: u32,
    pub r: u32,
    pub er: u32,
    pub hr: u32,
    pub bb: u32,
    pub ibb: u32,
    pub so: u32,
    pub hbp: u32,
    pub bf: u32,
    pub whip: f64,
}

fn int(value: &str) -> u32 {
    match value.trim() {
        "" | "-" => 0,
        v => v.parse().unwrap_or(0),
    }
}

fn float(value: &str) -> f64 {
    match value.trim() {
        "" | "-" => 0.0,
        v => v.parse().unwrap_or(0.0),
    }
}

fn to_team_line(raw: RawTeamRow) -> Option<TeamLine> {
    let year = raw.Year.trim();
    if year.is_empty() {
        return None;
    }
    // Source multi-team rows are recomputed here.
    if raw.Tm.contains("Teams") || raw.Tm.contains("teams") {
        return None;
    }
    let Some((level, category)) = map_level(raw.Lev.trim()) else {
        warn!("skipping {} {}: unknown level '{}'", year, raw.Tm, raw.Lev);
        return None;
    };
    let org = affiliate_org(raw.Aff.trim()).unwrap_or(category_org(category));

    Some(TeamLine {
        year: year.to_string(),
        team: raw.Tm.trim().to_string(),
        league: raw.Lg.trim().to_string(),
        level: level.to_string(),
        category,
        org: org.to_string(),
        w: int(&raw.W),
        l: int(&raw.L),
        era: float(&raw.ERA),
        g: int(&raw.G),
        gs: int(&raw.GS),
        cg: int(&raw.CG),
        sho: int(&raw.SHO),
        sv: int(&raw.SV),
        outs: parse_innings(&raw.IP),
        h: int(&raw.H),
        r: int(&raw.R),
        er: int(&raw.ER),
        hr: int(&raw.HR),
        bb: int(&raw.BB),
        ibb: int(&raw.IBB),
        so: int(&raw.SO),
        hbp: int(&raw.HBP),
        bf: int(&raw.BF),
        whip: float(&raw.WHIP),
    })
}

/// Read and normalize the per-team export. Unusable rows are skipped.
pub fn read_team_lines<R: Read>(rdr: R) -> Result<Vec<TeamLine>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers = reader.headers()?.clone();
    Ok(read_padded::<RawTeamRow, _>(&mut reader, &headers, "source")
        .into_iter()
        .filter_map(to_team_line)
        .collect())
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// 9 * ER / IP, or 0 with no innings.
pub fn earned_run_average(er: u32, outs: u32) -> f64 {
    if outs == 0 {
        return 0.0;
    }
    f64::from(er) * 27.0 / f64::from(outs)
}

/// (H + BB) / IP, or 0 with no innings.
pub fn walks_hits_per_inning(h: u32, bb: u32, outs: u32) -> f64 {
    if outs == 0 {
        return 0.0;
    }
    (f64::from(h) + f64::from(bb)) * 3.0 / f64::from(outs)
}

/// Opponent batting average as `.ddd`, or `-` without at-bats.
pub fn opponent_average(h: u32, bf: u32, bb: u32, hbp: u32) -> String {
    let at_bats = i64::from(bf) - i64::from(bb) - i64::from(hbp);
    if at_bats <= 0 {
        return "-".to_string();
    }
    format!(".{:03}", i64::from(h) * 1000 / at_bats)
}

/// Sum a non-empty group of lines. Team reads "N team(s)", level the category.
fn aggregate(lines: &[&TeamLine]) -> Option<TeamLine> {
    let first = lines.first()?;
    let sum = |f: fn(&TeamLine) -> u32| {
        lines
            .iter()
            .fold(0u32, |total, l| total.saturating_add(f(l)))
    };

    let outs = sum(|l| l.outs);
    let er = sum(|l| l.er);
    let h = sum(|l| l.h);
    let bb = sum(|l| l.bb);
    let n = lines.len();

    Some(TeamLine {
        year: first.year.clone(),
        team: format!("{} team{}", n, if n > 1 { "s" } else { "" }),
        league: "-".to_string(),
        level: first.category.as_str().to_string(),
        category: first.category,
        org: first.org.clone(),
        w: sum(|l| l.w),
        l: sum(|l| l.l),
        era: earned_run_average(er, outs),
        g: sum(|l| l.g),
        gs: sum(|l| l.gs),
        cg: sum(|l| l.cg),
        sho: sum(|l| l.sho),
        sv: sum(|l| l.sv),
        outs,
        h,
        r: sum(|l| l.r),
        er,
        hr: sum(|l| l.hr),
        bb,
        ibb: sum(|l| l.ibb),
        so: sum(|l| l.so),
        hbp: sum(|l| l.hbp),
        bf: sum(|l| l.bf),
        whip: walks_hits_per_inning(h, bb, outs),
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One row of the generated stats table, columns in output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "LG")]
    pub league: String,
    #[serde(rename = "Level")]
    pub level: String,
    #[serde(rename = "Org")]
    pub org: String,
    #[serde(rename = "W")]
    pub w: String,
    #[serde(rename = "L")]
    pub l: String,
    #[serde(rename = "ERA")]
    pub era: String,
    #[serde(rename = "G")]
    pub g: String,
    #[serde(rename = "GS")]
    pub gs: String,
    #[serde(rename = "CG")]
    pub cg: String,
    #[serde(rename = "SHO")]
    pub sho: String,
    #[serde(rename = "HLD")]
    pub hld: String,
    #[serde(rename = "SV")]
    pub sv: String,
    #[serde(rename = "SVO")]
    pub svo: String,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "H")]
    pub h: String,
    #[serde(rename = "R")]
    pub r: String,
    #[serde(rename = "ER")]
    pub er: String,
    #[serde(rename = "HR")]
    pub hr: String,
    #[serde(rename = "NP")]
    pub np: String,
    #[serde(rename = "HB")]
    pub hb: String,
    #[serde(rename = "BB")]
    pub bb: String,
    #[serde(rename = "IBB")]
    pub ibb: String,
    #[serde(rename = "SO")]
    pub so: String,
    #[serde(rename = "AVG")]
    pub avg: String,
    #[serde(rename = "WHIP")]
    pub whip: String,
    #[serde(rename = "GO/AO")]
    pub go_ao: String,
}

/// Overrides for total rows, which blank out per-team identity.
#[derive(Default)]
struct RowOverrides<'a> {
    season: Option<&'a str>,
    team: Option<&'a str>,
    level: Option<&'a str>,
    org: Option<&'a str>,
}

fn table_row(line: &TeamLine, overrides: RowOverrides<'_>) -> TableRow {
    TableRow {
        season: overrides.season.unwrap_or(&line.year).to_string(),
        team: overrides
            .team
            .unwrap_or_else(|| team_abbrev(&line.team))
            .to_string(),
        league: line.league.clone(),
        level: overrides.level.unwrap_or(&line.level).to_string(),
        org: overrides.org.unwrap_or(&line.org).to_string(),
        w: line.w.to_string(),
        l: line.l.to_string(),
        era: format!("{:.2}", line.era),
        g: line.g.to_string(),
        gs: line.gs.to_string(),
        cg: line.cg.to_string(),
        sho: line.sho.to_string(),
        hld: "-".to_string(),
        sv: if line.sv == 0 {
            "-".to_string()
        } else {
            line.sv.to_string()
        },
        svo: "-".to_string(),
        ip: format_innings(line.outs),
        h: line.h.to_string(),
        r: line.r.to_string(),
        er: line.er.to_string(),
        hr: line.hr.to_string(),
        np: "-".to_string(),
        hb: line.hbp.to_string(),
        bb: line.bb.to_string(),
        ibb: line.ibb.to_string(),
        so: line.so.to_string(),
        avg: opponent_average(line.h, line.bf, line.bb, line.hbp),
        whip: format!("{:.2}", line.whip),
        go_ao: "-".to_string(),
    }
}

/// Build the full stats table from normalized team lines.
pub fn build_table(lines: &[TeamLine]) -> Vec<TableRow> {
    let mut out = Vec::new();

    // Season blocks: years ascending, categories in display order.
    let mut by_season: BTreeMap<(&str, Category), Vec<&TeamLine>> = BTreeMap::new();
    for line in lines {
        by_season
            .entry((line.year.as_str(), line.category))
            .or_default()
            .push(line);
    }
    for group in by_season.values() {
        if let Some(agg) = aggregate(group) {
            out.push(table_row(&agg, RowOverrides::default()));
        }
        out.extend(group.iter().map(|l| table_row(l, RowOverrides::default())));
    }

    for category in Category::ALL {
        let group: Vec<&TeamLine> = lines.iter().filter(|l| l.category == category).collect();
        if let Some(agg) = aggregate(&group) {
            let season = format!("{category} Career");
            out.push(table_row(
                &agg,
                RowOverrides {
                    season: Some(&season),
                    team: Some("-"),
                    level: Some(category.as_str()),
                    org: Some("-"),
                },
            ));
        }
    }

    for level in LEVEL_ORDER {
        let group: Vec<&TeamLine> = lines
            .iter()
            .filter(|l| l.category == Category::Minors && l.level == level)
            .collect();
        if let Some(agg) = aggregate(&group) {
            out.push(table_row(
                &agg,
                RowOverrides {
                    season: Some(""),
                    team: Some("-"),
                    level: Some(level),
                    org: Some("-"),
                },
            ));
        }
    }

    out
}

pub fn write_table<W: Write>(rows: &[TableRow], wtr: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(wtr);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Counts reported after a file-to-file ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub team_lines: usize,
    pub table_rows: usize,
}

/// Read the export at `input` and write the stats table to `output`.
pub fn process_file(input: &Path, output: &Path) -> Result<IngestSummary, IngestError> {
    let in_path = input.display().to_string();
    let out_path = output.display().to_string();

    let file = std::fs::File::open(input).map_err(|e| IngestError::Read {
        path: in_path.clone(),
        source: e,
    })?;
    let lines = read_team_lines(file).map_err(|e| IngestError::Csv {
        path: in_path,
        source: e,
    })?;
    let rows = build_table(&lines);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IngestError::Write {
            path: out_path.clone(),
            source: e,
        })?;
    }
    let file = std::fs::File::create(output).map_err(|e| IngestError::Write {
        path: out_path.clone(),
        source: e,
    })?;
    write_table(&rows, file).map_err(|e| IngestError::Csv {
        path: out_path.clone(),
        source: e,
    })?;

    info!(
        "Processed {} team rows into {} table rows at {}",
        lines.len(),
        rows.len(),
        out_path
    );
    Ok(IngestSummary {
        team_lines: lines.len(),
        table_rows: rows.len(),
    })
}
