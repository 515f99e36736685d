// Integration tests for site rendering.
//
// These load the fixture site under tests/fixtures/site through a local data
// source and check section order, per-section failure isolation, the stats
// panel, the training subsection and the assembled document.

use chrono::NaiveDate;
use hedgertronic_core::html::Element;
use hedgertronic_core::site::SiteConfig;
use hedgertronic_core::source::DataSource;
use hedgertronic_site::page::{build_page, load_site};
use hedgertronic_site::sections::{render_section, render_sections, RenderOptions, UNAVAILABLE};
use hedgertronic_stats::category::Category;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture site root (relative to the crate root, which is the cwd for
/// `cargo test`).
const SITE_ROOT: &str = "tests/fixtures/site";

fn source() -> DataSource {
    DataSource::local(SITE_ROOT)
}

fn options(category: Category) -> RenderOptions {
    RenderOptions {
        category,
        today: NaiveDate::from_ymd_opt(2024, 2, 25).unwrap(),
    }
}

async fn fixture_site() -> SiteConfig {
    load_site(&source(), "data/site.json").await.unwrap()
}

fn texts(tree: &Element, class: &str) -> Vec<String> {
    tree.find_all(|e| e.has_class(class))
        .iter()
        .map(|e| e.text_content())
        .collect()
}

// ===========================================================================
// Sections
// ===========================================================================

#[tokio::test]
async fn sections_render_in_order_with_alternating_background() {
    let site = fixture_site().await;
    let sections = render_sections(&source(), &site, &options(Category::Minors)).await;

    let ids: Vec<_> = sections.iter().filter_map(|s| s.attr("id")).collect();
    assert_eq!(ids, vec!["stats", "archive", "writing"]);
    let alt: Vec<bool> = sections.iter().map(|s| s.has_class("alt-bg")).collect();
    assert_eq!(alt, vec![true, false, true]);
    assert!(sections.iter().all(|s| s.has_class("content-section")));
}

#[tokio::test]
async fn failing_section_shows_placeholder_and_others_still_render() {
    let site = fixture_site().await;
    let sections = render_sections(&source(), &site, &options(Category::Minors)).await;

    let archive = &sections[1];
    assert_eq!(texts(archive, "content-unavailable"), vec![UNAVAILABLE]);
    assert_eq!(archive.find(|e| e.tag() == "h2").unwrap().text_content(), "Archive");
    assert!(archive.find(|e| e.has_class("stats-panel")).is_none());

    assert!(sections[0].find(|e| e.has_class("stats-panel")).is_some());
    assert!(texts(&sections[0], "content-unavailable").is_empty());
    assert_eq!(
        sections[2].find(|e| e.tag() == "h2").unwrap().text_content(),
        "Writing"
    );
}

#[tokio::test]
async fn stats_section_has_configured_highlights_and_links() {
    let site = fixture_site().await;
    let stats = render_section(&source(), &site.sections[0], 0, &options(Category::Minors)).await;

    assert_eq!(texts(&stats, "section-intro"), vec!["Numbers from college through Double-A."]);
    assert!(texts(&stats, "subsection-header").contains(&"Career Stats".to_string()));

    let keys: Vec<_> = stats
        .find_all(|e| e.has_class("stat-value"))
        .iter()
        .filter_map(|e| e.data("stat"))
        .collect();
    assert_eq!(keys, vec!["ERA", "W-L", "SO"]);
    assert_eq!(texts(&stats, "stat-value"), vec!["2.50", "5-1", "80"]);

    let link = stats.find(|e| e.has_class("stats-link")).unwrap();
    assert_eq!(link.attr("target"), Some("_blank"));
    assert_eq!(link.attr("rel"), Some("noopener noreferrer"));
    assert_eq!(link.text_content(), "Baseball-Reference");
}

#[tokio::test]
async fn requested_category_is_applied() {
    let site = fixture_site().await;
    let stats = render_section(&source(), &site.sections[0], 0, &options(Category::College)).await;

    let active: Vec<_> = stats
        .find_all(|e| e.has_class("stats-category-btn") && e.has_class("active"))
        .iter()
        .filter_map(|e| e.data("category"))
        .collect();
    assert_eq!(active, vec!["College"]);

    let tbody = stats.find(|e| e.tag() == "tbody").unwrap();
    assert!(tbody.child_elements().all(|tr| tr.is_hidden()));
    assert_eq!(texts(&stats, "stat-value"), vec!["2.10", "6-2", "70"]);
}

#[tokio::test]
async fn training_cards_are_sorted_and_badged() {
    let site = fixture_site().await;
    let stats = render_section(&source(), &site.sections[0], 0, &options(Category::Minors)).await;

    assert_eq!(
        texts(&stats, "training-date"),
        vec!["Nov 2, 2023", "Feb 20, 2024", "Jan 15, 2024"]
    );
    assert_eq!(texts(&stats, "pinned-badge").len(), 1);
    assert_eq!(texts(&stats, "new-badge").len(), 1);
    assert_eq!(texts(&stats, "training-mention"), vec!["@trainer"]);
    assert_eq!(stats.find_all(|e| e.has_class("training-card-link")).len(), 1);
    assert_eq!(stats.find_all(|e| e.tag() == "img").len(), 1);
}

#[tokio::test]
async fn missing_training_file_omits_only_the_subsection() {
    let mut site = fixture_site().await;
    let section = &mut site.sections[0];
    section.training_file = Some("data/missing.json".into());

    let stats = render_section(&source(), section, 0, &options(Category::Minors)).await;
    assert!(stats.find(|e| e.has_class("stats-panel")).is_some());
    assert!(stats.find(|e| e.has_class("training-grid")).is_none());
    assert!(texts(&stats, "content-unavailable").is_empty());
}

#[tokio::test]
async fn table_without_season_column_shows_placeholder() {
    let mut site = fixture_site().await;
    let section = &mut site.sections[0];
    section.stats_file = Some("data/not_stats.csv".into());

    let stats = render_section(&source(), section, 0, &options(Category::Minors)).await;
    assert_eq!(texts(&stats, "content-unavailable"), vec![UNAVAILABLE]);
    assert!(stats.find(|e| e.has_class("stats-panel")).is_none());
    assert!(stats.find(|e| e.has_class("training-grid")).is_none());
}

#[tokio::test]
async fn career_row_with_missing_trailing_columns_keeps_its_highlights() {
    let mut site = fixture_site().await;
    let section = &mut site.sections[0];
    section.stats_file = Some("data/short_career.csv".into());

    let stats = render_section(&source(), section, 0, &options(Category::Minors)).await;
    assert_eq!(texts(&stats, "stat-value"), vec!["2.50", "5-1", "-"]);
    let tfoot = stats.find(|e| e.tag() == "tfoot").unwrap();
    let career: Vec<_> = tfoot.child_elements().collect();
    assert_eq!(career.len(), 1);
    assert_eq!(career[0].data("category"), Some("Minors"));
    assert!(career[0].text_content().contains("2.50"));
}

// ===========================================================================
// Page
// ===========================================================================

#[tokio::test]
async fn build_page_produces_a_document() {
    let html = build_page(&source(), "/data/site.json", &options(Category::Minors))
        .await
        .unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Test Pitcher</title>"));
    assert!(html.contains("<section class=\"content-section alt-bg\" id=\"stats\""));
    assert!(html.contains(UNAVAILABLE));
}

#[tokio::test]
async fn invalid_site_config_fails_the_build() {
    let err = load_site(&source(), "data/broken_site.json").await.unwrap_err();
    assert!(format!("{err:#}").contains("statsFile"));

    assert!(load_site(&source(), "data/nope.json").await.is_err());
}
