//! Domain types and models

mod asset;
mod jersey;
mod palette;
mod placement;
mod product;
mod roster;
pub mod catalog;

pub use asset::AssetRef;
pub use catalog::{get_design, CatalogError, DesignCatalog, DesignEntry, Pattern, Slot, Zone, ZoneMapping, DEFAULT_DESIGN_ID};
pub use jersey::{
    apply_update, default_configuration, normalize_player_name, normalize_player_number,
    ArcMode, JerseyConfig, JerseyUpdate, NumberType, TextElement, TextField, TextUpdate,
};
pub use palette::{
    approved_logo, ApprovedLogo, ColorError, FontChoice, GarmentSize, HexColor, Swatch,
    APPROVED_LOGOS, JERSEY_COLORS, JERSEY_FONTS,
};
pub use placement::{
    clamp_percent, Position, ScaleRange, LOGO_SCALE, OUTLINE_WIDTH, PATTERN_OPACITY, SAFE_MAX,
    SAFE_MIN, TEXT_SCALE, VIEWBOX_HEIGHT, VIEWBOX_WIDTH,
};
pub use product::{seed_products, Category, PricedProduct, Product, CATEGORIES, CUSTOM_JERSEY_ID};
pub use roster::{Roster, TeamPlayer};
