// Site configuration (site.json): profile and section metadata.
//
// The site JSON is content, not build configuration: it is fetched through the
// data source like any other file, then parsed and validated here.

use serde::Deserialize;
use std::collections::HashSet;

use crate::config::ConfigError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
}

/// How a section is rendered. Unknown types render as generic content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Stats,
    Personal,
    #[default]
    #[serde(other)]
    Content,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: SectionKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    /// CSV table of career statistics (stats sections only).
    #[serde(default)]
    pub stats_file: Option<String>,
    /// Highlight keys shown as overview cards (`ERA`, `W-L`, `G`, ...).
    #[serde(default)]
    pub stats_highlights: Vec<String>,
    #[serde(default)]
    pub stats_links: Vec<StatsLink>,
    /// Optional JSON list of training media for the stats section.
    #[serde(default)]
    pub training_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatsLink {
    pub name: String,
    pub url: String,
}

impl SiteConfig {
    /// Parse and validate site JSON. `origin` names the source in errors.
    pub fn from_json(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let site: SiteConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::SiteParseError {
                origin: origin.to_string(),
                source: e,
            })?;
        site.validate()?;
        Ok(site)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (i, section) in self.sections.iter().enumerate() {
            if section.id.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: format!("sections[{i}].id"),
                    message: "must not be empty".into(),
                });
            }
            if !seen.insert(section.id.as_str()) {
                return Err(ConfigError::ValidationError {
                    field: format!("sections[{i}].id"),
                    message: format!("duplicate section id `{}`", section.id),
                });
            }
            if section.kind == SectionKind::Stats
                && section.stats_file.as_deref().map_or(true, |f| f.trim().is_empty())
            {
                return Err(ConfigError::ValidationError {
                    field: format!("sections[{i}].statsFile"),
                    message: "required for stats sections".into(),
                });
            }
        }
        Ok(())
    }

    pub fn section(&self, id: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE_JSON: &str = r##"{
        "profile": { "name": "Test Pitcher" },
        "sections": [
            {
                "id": "baseball",
                "title": "Baseball",
                "subtitle": "Pitching career",
                "icon": "baseball",
                "type": "stats",
                "statsFile": "data/career_stats.csv",
                "statsHighlights": ["ERA", "W-L", "SO"],
                "statsLinks": [{ "name": "Baseball Reference", "url": "https://example.com/br" }],
                "accentColor": "#002d72"
            },
            { "id": "writing", "title": "Writing", "type": "articles" },
            { "id": "personal", "title": "Personal", "type": "personal" }
        ]
    }"##;

    #[test]
    fn parses_sections_and_camel_case_fields() {
        let site = SiteConfig::from_json(SITE_JSON, "site.json").unwrap();
        assert_eq!(site.profile.name, "Test Pitcher");
        assert_eq!(site.sections.len(), 3);

        let stats = site.section("baseball").unwrap();
        assert_eq!(stats.kind, SectionKind::Stats);
        assert_eq!(stats.stats_file.as_deref(), Some("data/career_stats.csv"));
        assert_eq!(stats.stats_highlights, vec!["ERA", "W-L", "SO"]);
        assert_eq!(stats.stats_links[0].name, "Baseball Reference");
        assert_eq!(stats.accent_color.as_deref(), Some("#002d72"));
        assert!(stats.training_file.is_none());
    }

    #[test]
    fn unknown_section_type_is_content() {
        let site = SiteConfig::from_json(SITE_JSON, "site.json").unwrap();
        assert_eq!(site.section("writing").unwrap().kind, SectionKind::Content);
        assert_eq!(site.section("personal").unwrap().kind, SectionKind::Personal);
    }

    #[test]
    fn stats_section_requires_stats_file() {
        let json = r#"{ "sections": [ { "id": "baseball", "title": "B", "type": "stats" } ] }"#;
        let err = SiteConfig::from_json(json, "site.json").unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "sections[0].statsFile");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn rejects_duplicate_section_ids() {
        let json = r#"{ "sections": [
            { "id": "a", "title": "A" },
            { "id": "a", "title": "Again" }
        ] }"#;
        let err = SiteConfig::from_json(json, "site.json").unwrap_err();
        assert!(err.to_string().contains("duplicate section id"));
    }

    #[test]
    fn invalid_json_reports_origin() {
        let err = SiteConfig::from_json("{ nope", "data/site.json").unwrap_err();
        match &err {
            ConfigError::SiteParseError { origin, .. } => assert_eq!(origin, "data/site.json"),
            other => panic!("expected SiteParseError, got: {other}"),
        }
    }
}
