// Section rendering.
//
// Sections render in config order, one at a time. Each section is isolated:
// if its data cannot be loaded it renders a "Content not available." notice
// and the remaining sections still render.

use chrono::NaiveDate;
use hedgertronic_core::html::Element;
use hedgertronic_core::site::{SectionConfig, SectionKind, SiteConfig};
use hedgertronic_core::source::{DataSource, FetchError};
use hedgertronic_stats::category::Category;
use hedgertronic_stats::classify::StatsAggregator;
use hedgertronic_stats::filter::StatsPanel;
use hedgertronic_stats::row::{parse_rows, StatsLoadError};
use hedgertronic_stats::summary::HighlightStat;
use thiserror::Error;
use tracing::{info, warn};

use crate::training;

pub const UNAVAILABLE: &str = "Content not available.";

#[derive(Debug, Error)]
pub enum SectionError {
    #[error("section `{id}` has no stats file")]
    MissingStatsFile { id: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Stats(#[from] StatsLoadError),
}

/// Per-build render settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Category selected in every stats panel.
    pub category: Category,
    /// Reference date for "New" badges.
    pub today: NaiveDate,
}

/// Render every section of the site, in order.
pub async fn render_sections(
    source: &DataSource,
    site: &SiteConfig,
    options: &RenderOptions,
) -> Vec<Element> {
    let mut out = Vec::with_capacity(site.sections.len());
    for (index, section) in site.sections.iter().enumerate() {
        out.push(render_section(source, section, index, options).await);
    }
    out
}

/// Render one section. Load failures become an inline notice.
pub async fn render_section(
    source: &DataSource,
    section: &SectionConfig,
    index: usize,
    options: &RenderOptions,
) -> Element {
    let mut el = Element::new("section")
        .with_attr("id", &section.id)
        .with_class("content-section");
    if index % 2 == 0 {
        el.set_class("alt-bg", true);
    }
    if let Some(color) = &section.accent_color {
        el.set_attr("data-accent", color);
    }

    let body = match section.kind {
        SectionKind::Stats => render_stats_section(source, section, options).await,
        SectionKind::Personal | SectionKind::Content => Ok(render_content_section(section)),
    };

    match body {
        Ok(container) => el.push(container),
        Err(e) => {
            warn!("Section '{}' failed to load: {}", section.id, e);
            el.push(unavailable(section));
        }
    }
    el
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Icon, title and subtitle, plus the intro paragraph when configured.
fn section_header(section: &SectionConfig) -> Vec<Element> {
    let mut icon = Element::new("div")
        .with_class("section-icon")
        .with_class(&format!("{}-icon", section.id));
    if let Some(name) = &section.icon {
        icon.set_attr("data-icon", name);
    }

    let header = Element::new("div")
        .with_class("section-header")
        .with_child(icon)
        .with_child(
            Element::new("div")
                .with_child(Element::new("h2").with_text(&section.title))
                .with_child(
                    Element::new("p")
                        .with_class("section-subtitle")
                        .with_text(section.subtitle.as_deref().unwrap_or_default()),
                ),
        );

    let mut parts = vec![header];
    if let Some(description) = section.description.as_deref().filter(|d| !d.is_empty()) {
        parts.push(
            Element::new("p")
                .with_class("section-intro")
                .with_text(description),
        );
    }
    parts
}

fn subsection(title: &str) -> Element {
    Element::new("div").with_class("subsection").with_child(
        Element::new("div")
            .with_class("subsection-header")
            .with_child(Element::new("h3").with_text(title)),
    )
}

fn unavailable(section: &SectionConfig) -> Element {
    Element::new("div")
        .with_class("container")
        .with_children(section_header(section))
        .with_child(
            Element::new("p")
                .with_class("content-unavailable")
                .with_text(UNAVAILABLE),
        )
}

fn render_content_section(section: &SectionConfig) -> Element {
    Element::new("div")
        .with_class("container")
        .with_children(section_header(section))
}

// ---------------------------------------------------------------------------
// Stats section
// ---------------------------------------------------------------------------

/// Highlight cards to show. Unknown keys are dropped; none configured means
/// all six.
pub fn highlight_stats(keys: &[String]) -> Vec<HighlightStat> {
    if keys.is_empty() {
        return HighlightStat::ALL.to_vec();
    }
    keys.iter()
        .filter_map(|key| {
            let stat = HighlightStat::from_key(key);
            if stat.is_none() {
                warn!("Unknown stats highlight '{}', skipping", key);
            }
            stat
        })
        .collect()
}

async fn render_stats_section(
    source: &DataSource,
    section: &SectionConfig,
    options: &RenderOptions,
) -> Result<Element, SectionError> {
    let path = section
        .stats_file
        .as_deref()
        .ok_or_else(|| SectionError::MissingStatsFile {
            id: section.id.clone(),
        })?;

    let text = source.fetch_text(path).await?;
    let rows = parse_rows(&text, &source.location(path))?;
    let mut panel = StatsPanel::new(
        StatsAggregator::from_rows(rows),
        highlight_stats(&section.stats_highlights),
        Category::default(),
    );
    info!(
        "Loaded stats for '{}': {} season rows",
        section.id,
        panel.aggregator().season_rows().len()
    );
    panel.select(options.category);

    let mut container = Element::new("div")
        .with_class("container")
        .with_children(section_header(section));
    container.push(subsection("Career Stats").with_child(panel.into_element()));

    if !section.stats_links.is_empty() {
        let links = section.stats_links.iter().map(|link| {
            Element::new("a")
                .with_class("stats-link")
                .with_attr("href", &link.url)
                .with_attr("target", "_blank")
                .with_attr("rel", "noopener noreferrer")
                .with_child(
                    Element::new("span")
                        .with_class("stats-link-name")
                        .with_text(&link.name),
                )
        });
        container.push(Element::new("div").with_class("stats-links").with_children(links));
    }

    if let Some(file) = &section.training_file {
        match training::load_training(source, file).await {
            Ok(items) => {
                if let Some(el) = training::render_training(&items, options.today) {
                    container.push(el);
                }
            }
            Err(e) => warn!("Training data for '{}' unavailable: {}", section.id, e),
        }
    }

    Ok(container)
}
