//! In-memory storefront
//!
//! Holds products, teams, memberships and the team-product link table. Admin
//! operations check the viewer first and fail with `Unauthorized` before
//! touching state.

use chrono::Utc;
use parking_lot::RwLock;
use rand::distributions::Alphanumeric;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{seed_products, HexColor, PricedProduct, Product};
use super::models::{
    normalize_code, slugify, JoinedTeam, NewTeam, ProductQuery, ProductUpdate, Team, TeamMembership,
    TeamOverview, TeamProductLink, TeamUpdate, Viewer, MEMBER_ROLE,
};

const JOIN_CODE_LEN: usize = 6;
const JOIN_CODE_ATTEMPTS: usize = 16;

/// Storefront errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorefrontError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Team code is required")]
    EmptyCode,
    #[error("Invalid team code: {0}")]
    InvalidCode(String),
    #[error("Already a member of this team")]
    AlreadyMember,
    #[error("Team not found: {0}")]
    TeamNotFound(Uuid),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Team code already in use: {0}")]
    DuplicateCode(String),
    #[error("Team slug already in use: {0}")]
    DuplicateSlug(String),
    #[error("Product id already in use: {0}")]
    DuplicateProduct(String),
    #[error("Team name is required")]
    EmptyTeamName,
}

#[derive(Debug, Default)]
struct StoreState {
    products: Vec<Product>,
    teams: Vec<Team>,
    memberships: Vec<TeamMembership>,
    links: Vec<TeamProductLink>,
}

impl StoreState {
    fn team(&self, id: Uuid) -> Result<&Team, StorefrontError> {
        self.teams.iter().find(|t| t.id == id).ok_or(StorefrontError::TeamNotFound(id))
    }

    fn code_taken(&self, code: &str, except: Option<Uuid>) -> bool {
        self.teams.iter().any(|t| t.code == code && Some(t.id) != except)
    }

    fn slug_taken(&self, slug: &str, except: Option<Uuid>) -> bool {
        self.teams.iter().any(|t| t.slug == slug && Some(t.id) != except)
    }

    fn has_product(&self, id: &str) -> bool {
        self.products.iter().any(|p| p.id == id)
    }
}

/// Products, teams and memberships
#[derive(Debug, Default)]
pub struct Storefront {
    state: RwLock<StoreState>,
}

fn require_admin(viewer: &Viewer) -> Result<(), StorefrontError> {
    if viewer.is_admin {
        Ok(())
    } else {
        warn!(user_id = %viewer.user_id, "Rejected admin operation from non-admin");
        Err(StorefrontError::Unauthorized)
    }
}

fn parse_colors(raw: &[String]) -> Vec<HexColor> {
    raw.iter()
        .filter_map(|c| match HexColor::parse(c) {
            Ok(color) => Some(color),
            Err(e) => {
                warn!(color = %c, error = %e, "Dropping invalid team colour");
                None
            }
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn random_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(JOIN_CODE_LEN)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

impl Storefront {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storefront with the seed products and demo teams
    pub fn seeded() -> Self {
        let now = Utc::now();
        let demo = [
            ("Thunder Basketball", "THUNDER25", "Official team store for Thunder Basketball Club", ["#ffd700", "#1e3a5f"]),
            ("Riverside Soccer", "RIVER25", "Riverside Soccer Club merchandise", ["#228b22", "#ffffff"]),
            ("Metro Hockey", "METRO25", "Metro Hockey Association team store", ["#c41e3a", "#1a1a1a"]),
        ];

        let teams = demo
            .iter()
            .map(|(name, code, description, colors)| Team {
                id: Uuid::new_v4(),
                name: name.to_string(),
                slug: slugify(name),
                code: code.to_string(),
                description: Some(description.to_string()),
                logo: Some("/logos/8twologo.jpg".to_string()),
                colors: colors.iter().filter_map(|c| HexColor::parse(c).ok()).collect(),
                created_at: now,
            })
            .collect();

        Storefront {
            state: RwLock::new(StoreState {
                products: seed_products(),
                teams,
                ..Default::default()
            }),
        }
    }

    // ========================================================================
    // Teams
    // ========================================================================

    /// Create a team. Slug and join code are derived when not supplied.
    pub fn create_team(&self, viewer: &Viewer, input: NewTeam) -> Result<Team, StorefrontError> {
        require_admin(viewer)?;

        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(StorefrontError::EmptyTeamName);
        }

        let mut state = self.state.write();

        let slug = match non_blank(input.slug) {
            Some(slug) => slug.trim().to_string(),
            None => slugify(&name),
        };
        if state.slug_taken(&slug, None) {
            return Err(StorefrontError::DuplicateSlug(slug));
        }

        let code = match non_blank(input.code) {
            Some(code) => {
                let code = normalize_code(&code);
                if state.code_taken(&code, None) {
                    return Err(StorefrontError::DuplicateCode(code));
                }
                code
            }
            None => {
                let mut generated = None;
                for _ in 0..JOIN_CODE_ATTEMPTS {
                    let candidate = random_code();
                    if !state.code_taken(&candidate, None) {
                        generated = Some(candidate);
                        break;
                    }
                }
                // Collisions this many times in a row mean the space is exhausted
                generated.ok_or_else(|| StorefrontError::DuplicateCode("<generated>".to_string()))?
            }
        };

        let team = Team {
            id: Uuid::new_v4(),
            slug,
            name,
            code,
            description: non_blank(input.description),
            logo: non_blank(input.logo),
            colors: parse_colors(&input.colors),
            created_at: Utc::now(),
        };

        info!(team_id = %team.id, slug = %team.slug, code = %team.code, "Created team");
        state.teams.push(team.clone());
        Ok(team)
    }

    pub fn update_team(&self, viewer: &Viewer, id: Uuid, update: TeamUpdate) -> Result<Team, StorefrontError> {
        require_admin(viewer)?;
        let mut state = self.state.write();

        let code = match non_blank(update.code) {
            Some(code) => {
                let code = normalize_code(&code);
                if state.code_taken(&code, Some(id)) {
                    return Err(StorefrontError::DuplicateCode(code));
                }
                Some(code)
            }
            None => None,
        };

        let slug = match non_blank(update.slug) {
            Some(slug) => {
                let slug = slug.trim().to_string();
                if state.slug_taken(&slug, Some(id)) {
                    return Err(StorefrontError::DuplicateSlug(slug));
                }
                Some(slug)
            }
            None => None,
        };

        let team = state
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StorefrontError::TeamNotFound(id))?;

        if let Some(name) = non_blank(update.name) {
            team.name = name.trim().to_string();
        }
        if let Some(slug) = slug {
            team.slug = slug;
        }
        if let Some(code) = code {
            team.code = code;
        }
        if let Some(description) = update.description {
            team.description = non_blank(Some(description));
        }
        if let Some(logo) = update.logo {
            team.logo = non_blank(Some(logo));
        }
        if let Some(colors) = update.colors {
            team.colors = parse_colors(&colors);
        }

        Ok(team.clone())
    }

    /// Delete a team with its memberships and product links
    pub fn delete_team(&self, viewer: &Viewer, id: Uuid) -> Result<(), StorefrontError> {
        require_admin(viewer)?;
        let mut state = self.state.write();
        state.team(id)?;

        state.teams.retain(|t| t.id != id);
        state.memberships.retain(|m| m.team_id != id);
        state.links.retain(|l| l.team_id != id);
        info!(team_id = %id, "Deleted team");
        Ok(())
    }

    /// All teams, newest first, with member and product counts
    pub fn list_teams(&self, viewer: &Viewer) -> Result<Vec<TeamOverview>, StorefrontError> {
        require_admin(viewer)?;
        let state = self.state.read();

        let mut overview: Vec<TeamOverview> = state
            .teams
            .iter()
            .map(|team| TeamOverview {
                team: team.clone(),
                members: state.memberships.iter().filter(|m| m.team_id == team.id).count(),
                products: state.links.iter().filter(|l| l.team_id == team.id).count(),
            })
            .collect();
        overview.sort_by(|a, b| b.team.created_at.cmp(&a.team.created_at));
        Ok(overview)
    }

    pub fn team_by_slug(&self, slug: &str) -> Option<Team> {
        self.state.read().teams.iter().find(|t| t.slug == slug).cloned()
    }

    /// Join a team by its code
    pub fn join_team(&self, viewer: &Viewer, code: &str) -> Result<Team, StorefrontError> {
        let code = normalize_code(code);
        if code.is_empty() {
            return Err(StorefrontError::EmptyCode);
        }

        let mut state = self.state.write();
        let team = state
            .teams
            .iter()
            .find(|t| t.code == code)
            .cloned()
            .ok_or(StorefrontError::InvalidCode(code))?;

        if state
            .memberships
            .iter()
            .any(|m| m.user_id == viewer.user_id && m.team_id == team.id)
        {
            return Err(StorefrontError::AlreadyMember);
        }

        state.memberships.push(TeamMembership {
            user_id: viewer.user_id,
            team_id: team.id,
            role: MEMBER_ROLE.to_string(),
            joined_at: Utc::now(),
        });
        info!(user_id = %viewer.user_id, team_id = %team.id, "User joined team");
        Ok(team)
    }

    /// Teams a user belongs to, in join order
    pub fn teams_for(&self, user_id: Uuid) -> Vec<JoinedTeam> {
        let state = self.state.read();
        state
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| {
                let team = state.team(m.team_id).ok()?;
                Some(JoinedTeam {
                    id: team.id,
                    name: team.name.clone(),
                    slug: team.slug.clone(),
                    logo: team.logo.clone(),
                    role: m.role.clone(),
                    joined_at: m.joined_at,
                })
            })
            .collect()
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub fn product(&self, id: &str) -> Option<Product> {
        self.state.read().products.iter().find(|p| p.id == id).cloned()
    }

    pub fn create_product(&self, viewer: &Viewer, product: Product) -> Result<Product, StorefrontError> {
        require_admin(viewer)?;
        let mut state = self.state.write();
        if state.has_product(&product.id) {
            return Err(StorefrontError::DuplicateProduct(product.id));
        }
        info!(product_id = %product.id, "Created product");
        state.products.push(product.clone());
        Ok(product)
    }

    pub fn update_product(&self, viewer: &Viewer, id: &str, update: ProductUpdate) -> Result<Product, StorefrontError> {
        require_admin(viewer)?;
        let mut state = self.state.write();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(price) = update.price_cents {
            product.price_cents = price;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(image) = update.image {
            product.image = non_blank(Some(image));
        }
        if let Some(sizes) = update.sizes {
            product.sizes = sizes;
        }
        if let Some(colors) = update.colors {
            product.colors = colors;
        }
        if let Some(in_stock) = update.in_stock {
            product.in_stock = in_stock;
        }

        Ok(product.clone())
    }

    /// Delete a product and every team link to it
    pub fn delete_product(&self, viewer: &Viewer, id: &str) -> Result<(), StorefrontError> {
        require_admin(viewer)?;
        let mut state = self.state.write();
        if !state.has_product(id) {
            return Err(StorefrontError::ProductNotFound(id.to_string()));
        }
        state.products.retain(|p| p.id != id);
        state.links.retain(|l| l.product_id != id);
        info!(product_id = %id, "Deleted product");
        Ok(())
    }

    /// Offer a product in a team store. Linking again replaces the price.
    pub fn link_product(
        &self,
        viewer: &Viewer,
        team_id: Uuid,
        product_id: &str,
        price_cents: u32,
    ) -> Result<(), StorefrontError> {
        require_admin(viewer)?;
        let mut state = self.state.write();
        state.team(team_id)?;
        if !state.has_product(product_id) {
            return Err(StorefrontError::ProductNotFound(product_id.to_string()));
        }

        match state
            .links
            .iter()
            .position(|l| l.team_id == team_id && l.product_id == product_id)
        {
            Some(index) => state.links[index].price_cents = price_cents,
            None => state.links.push(TeamProductLink {
                team_id,
                product_id: product_id.to_string(),
                price_cents,
            }),
        }
        info!(team_id = %team_id, product_id = %product_id, price_cents = price_cents, "Linked product to team");
        Ok(())
    }

    /// Returns whether a link existed
    pub fn unlink_product(&self, viewer: &Viewer, team_id: Uuid, product_id: &str) -> Result<bool, StorefrontError> {
        require_admin(viewer)?;
        let mut state = self.state.write();
        let before = state.links.len();
        state.links.retain(|l| !(l.team_id == team_id && l.product_id == product_id));
        Ok(state.links.len() != before)
    }

    /// List products. A team query returns exactly that team's linked
    /// products at the team price; otherwise the public catalog, meaning
    /// products linked to no team.
    pub fn products(&self, query: &ProductQuery) -> Vec<PricedProduct> {
        let state = self.state.read();
        let visible = |p: &Product| query.matches_category(&p.category) && (!query.in_stock_only || p.in_stock);

        match query.team {
            Some(team_id) => state
                .links
                .iter()
                .filter(|l| l.team_id == team_id)
                .filter_map(|l| {
                    let product = state.products.iter().find(|p| p.id == l.product_id)?;
                    visible(product).then(|| PricedProduct::team(product.clone(), l.price_cents))
                })
                .collect(),
            None => state
                .products
                .iter()
                .filter(|p| !state.links.iter().any(|l| l.product_id == p.id))
                .filter(|p| visible(*p))
                .cloned()
                .map(PricedProduct::base)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CUSTOM_JERSEY_ID;

    fn admin() -> Viewer {
        Viewer::admin(Uuid::new_v4())
    }

    #[test]
    fn test_create_team_requires_admin() {
        let store = Storefront::seeded();
        let result = store.create_team(&Viewer::shopper(Uuid::new_v4()), NewTeam::named("Harbor FC"));
        assert_eq!(result, Err(StorefrontError::Unauthorized));
    }

    #[test]
    fn test_create_team_derives_slug_and_code() {
        let store = Storefront::new();
        let team = store.create_team(&admin(), NewTeam::named("Harbor Rowing Club")).unwrap();
        assert_eq!(team.slug, "harbor-rowing-club");
        assert_eq!(team.code.len(), 6);
        assert!(team.code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_eq!(store.team_by_slug("harbor-rowing-club").unwrap().id, team.id);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let store = Storefront::seeded();
        let input = NewTeam {
            code: Some("thunder25".to_string()),
            ..NewTeam::named("Copycats")
        };
        assert_eq!(
            store.create_team(&admin(), input),
            Err(StorefrontError::DuplicateCode("THUNDER25".to_string()))
        );
    }

    #[test]
    fn test_join_team_errors() {
        let store = Storefront::seeded();
        let user = Viewer::shopper(Uuid::new_v4());

        assert_eq!(store.join_team(&user, "  "), Err(StorefrontError::EmptyCode));
        assert_eq!(
            store.join_team(&user, "NOPE99"),
            Err(StorefrontError::InvalidCode("NOPE99".to_string()))
        );

        let team = store.join_team(&user, "RIVER25").unwrap();
        assert_eq!(team.slug, "riverside-soccer");
        assert_eq!(store.join_team(&user, "river25"), Err(StorefrontError::AlreadyMember));

        let joined = store.teams_for(user.user_id);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].role, MEMBER_ROLE);
    }

    #[test]
    fn test_team_catalog_uses_links_and_team_price() {
        let store = Storefront::seeded();
        let admin = admin();
        let thunder = store.team_by_slug("thunder-basketball").unwrap();

        store.link_product(&admin, thunder.id, CUSTOM_JERSEY_ID, 4499).unwrap();
        store.link_product(&admin, thunder.id, "2", 6999).unwrap();
        store.link_product(&admin, thunder.id, "2", 6499).unwrap();

        let team_products = store.products(&ProductQuery::for_team(thunder.id));
        assert_eq!(team_products.len(), 2);
        assert_eq!(team_products[0].unit_price_cents(), 4499);
        assert_eq!(team_products[1].unit_price_cents(), 6499);

        let public = store.products(&ProductQuery::public());
        assert!(public.iter().all(|p| p.product.id != CUSTOM_JERSEY_ID && p.product.id != "2"));
        assert_eq!(public.len(), seed_products().len() - 2);

        let other = store.team_by_slug("metro-hockey").unwrap();
        assert!(store.products(&ProductQuery::for_team(other.id)).is_empty());
    }

    #[test]
    fn test_public_catalog_filters() {
        let store = Storefront::seeded();
        let jackets = store.products(&ProductQuery::public().category("jackets"));
        assert_eq!(jackets.len(), 2);

        let in_stock = store.products(&ProductQuery {
            category: Some("jackets".to_string()),
            in_stock_only: true,
            ..Default::default()
        });
        assert_eq!(in_stock.len(), 1);
    }

    #[test]
    fn test_product_admin_crud() {
        let store = Storefront::seeded();
        let admin = admin();
        let shopper = Viewer::shopper(Uuid::new_v4());

        let socks = Product::new("9", "TEAM SOCKS", "Crew socks.", 1299, "accessories");
        assert_eq!(store.create_product(&shopper, socks.clone()), Err(StorefrontError::Unauthorized));
        store.create_product(&admin, socks.clone()).unwrap();
        assert_eq!(
            store.create_product(&admin, socks),
            Err(StorefrontError::DuplicateProduct("9".to_string()))
        );

        let updated = store
            .update_product(&admin, "9", ProductUpdate { price_cents: Some(999), ..Default::default() })
            .unwrap();
        assert_eq!(updated.price_cents, 999);

        store.delete_product(&admin, "9").unwrap();
        assert!(store.product("9").is_none());
        assert_eq!(
            store.delete_product(&admin, "9"),
            Err(StorefrontError::ProductNotFound("9".to_string()))
        );
    }

    #[test]
    fn test_delete_team_cascades() {
        let store = Storefront::seeded();
        let admin = admin();
        let metro = store.team_by_slug("metro-hockey").unwrap();
        let user = Viewer::shopper(Uuid::new_v4());

        store.join_team(&user, "METRO25").unwrap();
        store.link_product(&admin, metro.id, "5", 1999).unwrap();
        assert_eq!(store.list_teams(&admin).unwrap().len(), 3);

        store.delete_team(&admin, metro.id).unwrap();
        assert!(store.teams_for(user.user_id).is_empty());
        assert!(store.products(&ProductQuery::public()).iter().any(|p| p.product.id == "5"));
        assert_eq!(store.delete_team(&admin, metro.id), Err(StorefrontError::TeamNotFound(metro.id)));
    }

    #[test]
    fn test_update_team() {
        let store = Storefront::seeded();
        let admin = admin();
        let river = store.team_by_slug("riverside-soccer").unwrap();

        assert_eq!(
            store.update_team(&admin, river.id, TeamUpdate { code: Some("METRO25".to_string()), ..Default::default() }),
            Err(StorefrontError::DuplicateCode("METRO25".to_string()))
        );

        let updated = store
            .update_team(
                &admin,
                river.id,
                TeamUpdate {
                    code: Some("river26".to_string()),
                    colors: Some(vec!["#FFF".to_string(), "green".to_string()]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.code, "RIVER26");
        assert_eq!(updated.colors.len(), 1);
        assert_eq!(updated.name, "Riverside Soccer");
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let store = Storefront::new();
        let admin = admin();
        let harbor = store.create_team(&admin, NewTeam::named("Harbor FC")).unwrap();

        assert_eq!(
            store.create_team(&admin, NewTeam::named("harbor  fc")),
            Err(StorefrontError::DuplicateSlug("harbor-fc".to_string()))
        );
        let explicit = NewTeam {
            slug: Some(" harbor-fc ".to_string()),
            ..NewTeam::named("Harbour Football")
        };
        assert_eq!(
            store.create_team(&admin, explicit),
            Err(StorefrontError::DuplicateSlug("harbor-fc".to_string()))
        );

        let bay = store.create_team(&admin, NewTeam::named("Bay FC")).unwrap();
        assert_eq!(
            store.update_team(&admin, bay.id, TeamUpdate { slug: Some("harbor-fc".to_string()), ..Default::default() }),
            Err(StorefrontError::DuplicateSlug("harbor-fc".to_string()))
        );

        // Keeping its own slug is not a conflict
        let renamed = store
            .update_team(&admin, harbor.id, TeamUpdate { slug: Some("harbor-fc".to_string()), ..Default::default() })
            .unwrap();
        assert_eq!(renamed.slug, "harbor-fc");
        assert_eq!(store.team_by_slug("harbor-fc").unwrap().id, harbor.id);
        assert_eq!(store.team_by_slug("bay-fc").unwrap().id, bay.id);
    }
}
