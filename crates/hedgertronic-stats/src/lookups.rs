// Static display tables: badge styles, organization names, league badges.

use crate::category::Category;

/// CSS class for a level badge.
pub fn level_badge_class(level: &str) -> Option<&'static str> {
    match level {
        "Rk+" => Some("level-roa"),
        "A-" => Some("level-a-short"),
        "A+" => Some("level-a-plus"),
        "AA" => Some("level-aa"),
        "AAA" => Some("level-aaa"),
        "NCAA" => Some("level-ncaa"),
        "Summer" => Some("level-summer"),
        "Independent" => Some("level-independent"),
        _ => None,
    }
}

/// CSS class for an organization badge.
pub fn org_badge_class(org: &str) -> Option<&'static str> {
    match org {
        "Mets" => Some("org-mets"),
        "Phillies" => Some("org-phillies"),
        "Johns Hopkins" => Some("org-hopkins"),
        "Westside" => Some("org-westside"),
        "Baltimore" => Some("org-baltimore"),
        _ => None,
    }
}

/// Full display name for an organization, falling back to the raw value.
pub fn org_display_name(org: &str) -> &str {
    match org {
        "Mets" => "New York Mets",
        "Phillies" => "Philadelphia Phillies",
        "Johns Hopkins" => "Johns Hopkins Blue Jays",
        "Westside" => "Westside Woolly Mammoths",
        "Baltimore" => "Baltimore Dodgers",
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueBadge {
    pub name: &'static str,
    pub class: &'static str,
}

/// The single league shown for non-affiliated categories.
pub fn category_league(category: Category) -> Option<LeagueBadge> {
    match category {
        Category::College => Some(LeagueBadge {
            name: "NCAA D3",
            class: "league-ncaa",
        }),
        Category::Summer => Some(LeagueBadge {
            name: "Cal Ripken",
            class: "league-summer",
        }),
        Category::Independent => Some(LeagueBadge {
            name: "USPBL",
            class: "league-independent",
        }),
        Category::Minors => None,
    }
}
