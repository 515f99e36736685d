// Page assembly: fetch the site config, render its sections and wrap them in
// a complete HTML document.

use anyhow::Context;
use hedgertronic_core::html::Element;
use hedgertronic_core::site::SiteConfig;
use hedgertronic_core::source::DataSource;
use tracing::info;

use crate::sections::{render_sections, RenderOptions};

const STYLESHEET: &str = "/styles.css";

/// Fetch and validate the site JSON at `path`.
pub async fn load_site(source: &DataSource, path: &str) -> anyhow::Result<SiteConfig> {
    let text = source
        .fetch_text(path)
        .await
        .with_context(|| format!("failed to fetch site config {}", source.location(path)))?;
    let site = SiteConfig::from_json(&text, &source.location(path))?;
    info!(
        "Site config loaded: {} ({} sections)",
        site.profile.name,
        site.sections.len()
    );
    Ok(site)
}

/// Wrap rendered sections in the document shell.
pub fn render_document(site: &SiteConfig, sections: Vec<Element>) -> String {
    let title = if site.profile.name.is_empty() {
        "hedgertronic"
    } else {
        site.profile.name.as_str()
    };

    let mut head = Element::new("head")
        .with_child(Element::new("meta").with_attr("charset", "utf-8"))
        .with_child(
            Element::new("meta")
                .with_attr("name", "viewport")
                .with_attr("content", "width=device-width, initial-scale=1"),
        )
        .with_child(Element::new("title").with_text(title));
    if let Some(tagline) = &site.profile.tagline {
        head.push(
            Element::new("meta")
                .with_attr("name", "description")
                .with_attr("content", tagline),
        );
    }
    head.push(
        Element::new("link")
            .with_attr("rel", "stylesheet")
            .with_attr("href", STYLESHEET),
    );

    let html = Element::new("html")
        .with_attr("lang", "en")
        .with_child(head)
        .with_child(
            Element::new("body").with_child(Element::new("main").with_children(sections)),
        );

    format!("<!DOCTYPE html>\n{}\n", html.to_html())
}

/// Load the site config and render the full page.
pub async fn build_page(
    source: &DataSource,
    site_path: &str,
    options: &RenderOptions,
) -> anyhow::Result<String> {
    let site = load_site(source, site_path).await?;
    let sections = render_sections(source, &site, options).await;
    Ok(render_document(&site, sections))
}
