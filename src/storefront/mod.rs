//! Teams, products and membership
//!
//! Teams get their own store: products are linked to a team with a
//! team-specific price. The public catalog holds products linked to no team.

mod models;
mod store;

pub use models::{
    normalize_code, slugify, JoinedTeam, NewTeam, ProductQuery, ProductUpdate, Team, TeamMembership,
    TeamOverview, TeamProductLink, TeamUpdate, Viewer, MEMBER_ROLE,
};
pub use store::{Storefront, StorefrontError};
