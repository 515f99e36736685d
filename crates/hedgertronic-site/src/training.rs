// "My Training" subsection: video cards from an optional training JSON file.

use chrono::NaiveDate;
use hedgertronic_core::html::Element;
use hedgertronic_core::source::{DataSource, FetchError};
use serde::Deserialize;

/// Captions longer than this many characters are cut and get `...`.
pub const CAPTION_LIMIT: usize = 280;

/// Items dated within this many days of the build date get a "New" badge.
pub const NEW_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainingItem {
    /// Only `video` items are rendered. A missing type counts as video.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub credit: Option<Credit>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credit {
    pub handle: String,
}

fn default_kind() -> String {
    "video".into()
}

impl TrainingItem {
    pub fn is_video(&self) -> bool {
        self.kind == "video"
    }

    pub fn is_new(&self, today: NaiveDate) -> bool {
        self.date.is_some_and(|d| {
            let age = (today - d).num_days();
            (0..=NEW_WINDOW_DAYS).contains(&age)
        })
    }
}

pub async fn load_training(source: &DataSource, path: &str) -> Result<Vec<TrainingItem>, FetchError> {
    source.fetch_json(path).await
}

/// Pinned items first, then newest first. Undated items go last.
pub fn sort_items(items: &mut [TrainingItem]) {
    items.sort_by(|a, b| b.pinned.cmp(&a.pinned).then_with(|| b.date.cmp(&a.date)));
}

/// `Mar 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn truncate_caption(caption: &str) -> String {
    if caption.chars().count() <= CAPTION_LIMIT {
        return caption.to_string();
    }
    let cut: String = caption.chars().take(CAPTION_LIMIT).collect();
    format!("{}...", cut.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionPart<'a> {
    Text(&'a str),
    Mention(&'a str),
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split a caption into plain runs and `@handle` mentions.
pub fn caption_parts(caption: &str) -> Vec<CaptionPart<'_>> {
    let mut parts = Vec::new();
    let mut text_start = 0;
    let mut rest = caption.char_indices().peekable();

    while let Some((i, c)) = rest.next() {
        if c != '@' {
            continue;
        }
        let mut end = i + 1;
        while let Some(&(j, next)) = rest.peek() {
            if !is_word_char(next) {
                break;
            }
            end = j + next.len_utf8();
            rest.next();
        }
        if end == i + 1 {
            continue;
        }
        if text_start < i {
            parts.push(CaptionPart::Text(&caption[text_start..i]));
        }
        parts.push(CaptionPart::Mention(&caption[i..end]));
        text_start = end;
    }
    if text_start < caption.len() {
        parts.push(CaptionPart::Text(&caption[text_start..]));
    }
    parts
}

fn render_caption(caption: &str) -> Element {
    let text = truncate_caption(caption);
    let mut p = Element::new("p").with_class("training-caption");
    for part in caption_parts(&text) {
        match part {
            CaptionPart::Text(t) => p.push_text(t),
            CaptionPart::Mention(m) => {
                p.push(Element::new("span").with_class("training-mention").with_text(m))
            }
        }
    }
    p
}

fn render_card(item: &TrainingItem, today: NaiveDate) -> Element {
    let mut card = Element::new("div").with_class("training-card");

    if let Some(poster) = &item.poster {
        card.push(
            Element::new("div").with_class("training-bg-wrapper").with_child(
                Element::new("img")
                    .with_attr("src", poster)
                    .with_attr("alt", "Training video thumbnail"),
            ),
        );
        card.push(Element::new("div").with_class("training-bg-overlay"));
    }

    let mut header = Element::new("div").with_class("training-header");
    if let Some(credit) = &item.credit {
        header.push(
            Element::new("div")
                .with_class("training-handle")
                .with_text(&format!("@{}", credit.handle)),
        );
    }
    if let Some(date) = item.date {
        header.push(
            Element::new("span")
                .with_class("training-date")
                .with_text(&format_date(date)),
        );
    }
    card.push(header);

    let is_new = item.is_new(today);
    if item.pinned || is_new {
        let mut badges = Element::new("div").with_class("card-badge-row");
        if item.pinned {
            badges.push(Element::new("span").with_class("pinned-badge").with_text("Pinned"));
        }
        if is_new {
            badges.push(Element::new("span").with_class("new-badge").with_text("New"));
        }
        card.push(badges);
    }

    let mut content = Element::new("div").with_class("training-card-content");
    if let Some(caption) = item.caption.as_deref().filter(|c| !c.is_empty()) {
        content.push(render_caption(caption));
    }
    card.push(content);

    match &item.url {
        Some(url) => Element::new("a")
            .with_class("training-card-link")
            .with_attr("href", url)
            .with_attr("target", "_blank")
            .with_attr("rel", "noopener noreferrer")
            .with_child(card),
        None => card,
    }
}

/// Render the subsection, or `None` when there is nothing to show.
pub fn render_training(items: &[TrainingItem], today: NaiveDate) -> Option<Element> {
    let mut videos: Vec<TrainingItem> = items.iter().filter(|i| i.is_video()).cloned().collect();
    if videos.is_empty() {
        return None;
    }
    sort_items(&mut videos);

    let grid = Element::new("div")
        .with_class("training-grid")
        .with_children(videos.iter().map(|item| render_card(item, today)));

    Some(
        Element::new("div")
            .with_class("subsection training-subsection")
            .with_child(
                Element::new("div")
                    .with_class("subsection-header")
                    .with_child(Element::new("h3").with_text("My Training")),
            )
            .with_child(grid),
    )
}
