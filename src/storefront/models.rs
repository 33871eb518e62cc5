//! Storefront records: viewers, teams, memberships and catalog queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::HexColor;

/// Role given to users who join with a team code
pub const MEMBER_ROLE: &str = "member";

/// Identity supplied by the authentication collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Viewer {
    pub fn admin(user_id: Uuid) -> Self {
        Viewer { user_id, is_admin: true }
    }

    pub fn shopper(user_id: Uuid) -> Self {
        Viewer { user_id, is_admin: false }
    }
}

/// A team with its own store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    /// Join code, unique across teams
    pub code: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub colors: Vec<HexColor>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a team
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTeam {
    pub name: String,
    /// Derived from the name when absent
    pub slug: Option<String>,
    /// Randomly generated when absent
    pub code: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub colors: Vec<String>,
}

impl NewTeam {
    pub fn named(name: &str) -> Self {
        NewTeam {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

/// Partial team edit; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembership {
    pub user_id: Uuid,
    pub team_id: Uuid,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// A team as seen from one of its members
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedTeam {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// Admin listing entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamOverview {
    pub team: Team,
    pub members: usize,
    pub products: usize,
}

/// A product offered in a team's store at a team price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProductLink {
    pub team_id: Uuid,
    pub product_id: String,
    pub price_cents: u32,
}

/// Partial product edit
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<u32>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub in_stock: Option<bool>,
}

/// Catalog listing filter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQuery {
    /// `None` or `"all"` means every category
    pub category: Option<String>,
    /// Team store to list; `None` lists the public catalog
    pub team: Option<Uuid>,
    pub in_stock_only: bool,
}

impl ProductQuery {
    pub fn public() -> Self {
        Self::default()
    }

    pub fn for_team(team: Uuid) -> Self {
        ProductQuery {
            team: Some(team),
            ..Default::default()
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub(crate) fn matches_category(&self, category: &str) -> bool {
        match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => true,
            Some(wanted) => wanted.eq_ignore_ascii_case(category),
        }
    }
}

/// Lowercase the name and join its words with '-'
pub fn slugify(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

/// Join codes compare trimmed and uppercased
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
