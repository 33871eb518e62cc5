//! Design Catalog
//!
//! A design decides which visual zone of the jersey pulls its colour from which
//! of the three user-chosen slots, and which overlay pattern (if any) is laid
//! over the garment. The built-in table is static; an optional JSON file can add
//! or replace entries at start-up, after which the catalog is read-only.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Identifier of the canonical fallback design
pub const DEFAULT_DESIGN_ID: &str = "builder-crew-classic";

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read design catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Design entry #{0} has an empty id")]
    EmptyId(usize),
}

// ============================================================================
// Zones and slots
// ============================================================================

/// A named visual region of the jersey template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Side,
    Base,
    Yoke,
    Sleeve,
    Collar,
}

impl Zone {
    /// Back-to-front paint order of the garment zones
    pub const PAINT_ORDER: [Zone; 5] = [Zone::Side, Zone::Base, Zone::Yoke, Zone::Sleeve, Zone::Collar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Side => "side",
            Zone::Base => "base",
            Zone::Yoke => "yoke",
            Zone::Sleeve => "sleeve",
            Zone::Collar => "collar",
        }
    }

    /// Mask image name fragment used by the template artwork
    pub fn mask_name(&self) -> &'static str {
        match self {
            Zone::Side => "Side",
            Zone::Base => "Body",
            Zone::Yoke => "Yoke",
            Zone::Sleeve => "Sleeves",
            Zone::Collar => "Neck",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three user-chosen colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    #[default]
    Primary,
    Accent1,
    Accent2,
}

/// Zone -> slot assignment for one design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMapping {
    pub base: Slot,
    pub sleeve: Slot,
    pub yoke: Slot,
    pub side: Slot,
    pub collar: Slot,
}

impl ZoneMapping {
    pub fn slot_for(&self, zone: Zone) -> Slot {
        match zone {
            Zone::Side => self.side,
            Zone::Base => self.base,
            Zone::Yoke => self.yoke,
            Zone::Sleeve => self.sleeve,
            Zone::Collar => self.collar,
        }
    }
}

/// Overlay pattern artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    HorizontalStripes,
    VerticalStripes,
    Pinstripes,
    Chevron,
    Hoops,
}

impl Pattern {
    pub fn asset_path(&self) -> &'static str {
        match self {
            Pattern::HorizontalStripes => "/patterns/stripes-h.png",
            Pattern::VerticalStripes => "/patterns/stripes-v.png",
            Pattern::Pinstripes => "/patterns/pinstripes.png",
            Pattern::Chevron => "/patterns/chevron.png",
            Pattern::Hoops => "/patterns/hoops.png",
        }
    }
}

// ============================================================================
// Catalog entries
// ============================================================================

/// Static design definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub mapping: ZoneMapping,
    #[serde(default)]
    pub pattern: Option<Pattern>,
    /// Explicit overlay artwork; takes precedence over the pattern's own artwork
    #[serde(default)]
    pub overlay_image: Option<String>,
    /// Slot that tints the overlay (accent1 when unset)
    #[serde(default)]
    pub overlay_color: Option<Slot>,
}

impl DesignEntry {
    /// Overlay artwork for this design, if it has one
    pub fn overlay_asset(&self) -> Option<&str> {
        self.overlay_image
            .as_deref()
            .filter(|href| !href.trim().is_empty())
            .or_else(|| self.pattern.map(|p| p.asset_path()))
    }

    pub fn overlay_slot(&self) -> Slot {
        self.overlay_color.unwrap_or(Slot::Accent1)
    }
}

fn entry(
    id: &str,
    name: &str,
    description: &str,
    mapping: ZoneMapping,
    pattern: Option<Pattern>,
    overlay_color: Option<Slot>,
) -> DesignEntry {
    DesignEntry {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        mapping,
        pattern,
        overlay_image: None,
        overlay_color,
    }
}

static BUILTIN_ENTRIES: Lazy<Vec<DesignEntry>> = Lazy::new(|| {
    use Slot::*;

    vec![
        entry(
            DEFAULT_DESIGN_ID,
            "Classic Crew",
            "Solid body with contrast side panels and collar trim.",
            ZoneMapping { base: Primary, sleeve: Primary, yoke: Primary, side: Accent1, collar: Accent1 },
            None,
            None,
        ),
        entry(
            "builder-crew-raglan",
            "Raglan Crew",
            "Contrast raglan sleeves and shoulders with a second accent on the collar.",
            ZoneMapping { base: Primary, sleeve: Accent1, yoke: Accent1, side: Primary, collar: Accent2 },
            None,
            None,
        ),
        entry(
            "builder-crew-stripes-h",
            "Horizontal Stripes",
            "Chest-to-hem horizontal stripes tinted with the first accent.",
            ZoneMapping { base: Primary, sleeve: Primary, yoke: Accent1, side: Primary, collar: Accent1 },
            Some(Pattern::HorizontalStripes),
            Some(Accent1),
        ),
        entry(
            "builder-crew-stripes-v",
            "Vertical Stripes",
            "Full-length vertical stripes tinted with the second accent.",
            ZoneMapping { base: Primary, sleeve: Accent1, yoke: Primary, side: Primary, collar: Accent1 },
            Some(Pattern::VerticalStripes),
            Some(Accent2),
        ),
        entry(
            "builder-crew-pinstripe",
            "Pinstripe",
            "Fine pinstripes over a solid body, accent sleeves.",
            ZoneMapping { base: Primary, sleeve: Accent1, yoke: Primary, side: Accent2, collar: Accent2 },
            Some(Pattern::Pinstripes),
            Some(Accent2),
        ),
        entry(
            "builder-crew-chevron",
            "Chevron Yoke",
            "Chevron overlay across a contrast yoke.",
            ZoneMapping { base: Primary, sleeve: Primary, yoke: Accent2, side: Accent1, collar: Accent2 },
            Some(Pattern::Chevron),
            Some(Accent1),
        ),
        entry(
            "builder-crew-hoops",
            "Hoops",
            "Rugby-style hoops with accent side panels.",
            ZoneMapping { base: Primary, sleeve: Primary, yoke: Primary, side: Accent2, collar: Accent2 },
            Some(Pattern::Hoops),
            Some(Accent1),
        ),
    ]
});

static BUILTIN_CATALOG: Lazy<DesignCatalog> = Lazy::new(|| DesignCatalog {
    entries: BUILTIN_ENTRIES.clone(),
});

/// Look up a built-in design, falling back to the default entry for unknown ids
pub fn get_design(id: &str) -> &'static DesignEntry {
    BUILTIN_CATALOG.get(id)
}

// ============================================================================
// Catalog
// ============================================================================

/// Ordered set of designs; the first entry is the fallback
#[derive(Debug, Clone)]
pub struct DesignCatalog {
    // Never empty: every constructor starts from the built-in table.
    entries: Vec<DesignEntry>,
}

impl DesignCatalog {
    pub fn builtin() -> Self {
        BUILTIN_CATALOG.clone()
    }

    /// Built-in catalog with extra entries from a JSON array file.
    /// An entry whose id matches a built-in replaces it in place.
    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let extra: Vec<DesignEntry> = serde_json::from_str(&content)?;

        let mut catalog = Self::builtin();
        catalog.merge(extra)?;

        info!(
            path = %path.display(),
            designs = catalog.len(),
            "Loaded design catalog"
        );

        Ok(catalog)
    }

    /// Add or replace entries
    pub fn merge(&mut self, extra: Vec<DesignEntry>) -> Result<(), CatalogError> {
        if let Some(index) = extra.iter().position(|e| e.id.trim().is_empty()) {
            return Err(CatalogError::EmptyId(index));
        }

        for design in extra {
            match self.entries.iter_mut().find(|e| e.id == design.id) {
                Some(existing) => *existing = design,
                None => self.entries.push(design),
            }
        }

        Ok(())
    }

    /// Matching entry, or the default entry when `id` is unknown. Never fails.
    pub fn get(&self, id: &str) -> &DesignEntry {
        match self.entries.iter().find(|e| e.id == id) {
            Some(design) => design,
            None => {
                warn!(design_id = %id, fallback = %self.default_entry().id, "Unknown design id, using default");
                self.default_entry()
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn default_entry(&self) -> &DesignEntry {
        &self.entries[0]
    }

    pub fn entries(&self) -> &[DesignEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DesignCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_design_falls_back_to_default() {
        assert_eq!(get_design("no-such-design").id, DEFAULT_DESIGN_ID);
        assert_eq!(get_design("").id, DEFAULT_DESIGN_ID);
    }

    #[test]
    fn test_known_design_resolves() {
        let design = get_design("builder-crew-stripes-h");
        assert_eq!(design.pattern, Some(Pattern::HorizontalStripes));
        assert_eq!(design.overlay_slot(), Slot::Accent1);
        assert_eq!(design.overlay_asset(), Some("/patterns/stripes-h.png"));
    }

    #[test]
    fn test_overlay_image_overrides_pattern_art() {
        let mut design = get_design("builder-crew-hoops").clone();
        design.overlay_image = Some("/custom/hoops-wide.png".to_string());
        assert_eq!(design.overlay_asset(), Some("/custom/hoops-wide.png"));

        design.overlay_image = Some("  ".to_string());
        assert_eq!(design.overlay_asset(), Some("/patterns/hoops.png"));
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = DesignCatalog::builtin();
        let mut ids: Vec<_> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.default_entry().id, DEFAULT_DESIGN_ID);
    }

    #[test]
    fn test_merge_replaces_and_appends() {
        let mut catalog = DesignCatalog::builtin();
        let before = catalog.len();

        let mut replaced = catalog.get("builder-crew-raglan").clone();
        replaced.name = "Raglan v2".to_string();
        let mut added = replaced.clone();
        added.id = "team-thunder-special".to_string();

        catalog.merge(vec![replaced, added]).unwrap();
        assert_eq!(catalog.len(), before + 1);
        assert_eq!(catalog.get("builder-crew-raglan").name, "Raglan v2");
        assert!(catalog.contains("team-thunder-special"));
    }

    #[test]
    fn test_merge_rejects_empty_id() {
        let mut catalog = DesignCatalog::builtin();
        let mut bad = catalog.default_entry().clone();
        bad.id = " ".to_string();
        assert!(matches!(catalog.merge(vec![bad]), Err(CatalogError::EmptyId(0))));
    }

    fn temp_designs(content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("designs-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_file_merges_over_builtin() {
        let path = temp_designs(
            r#"[
                {
                    "id": "builder-crew-classic",
                    "name": "Classic Club",
                    "mapping": {"base": "primary", "sleeve": "primary", "yoke": "accent1", "side": "accent1", "collar": "accent2"}
                },
                {
                    "id": "club-hoops-wide",
                    "name": "Wide Hoops",
                    "mapping": {"base": "primary", "sleeve": "accent1", "yoke": "primary", "side": "primary", "collar": "accent1"},
                    "pattern": "hoops",
                    "overlayImage": "/patterns/hoops-wide.png"
                }
            ]"#,
        );

        let loaded = DesignCatalog::load_file(&path);
        std::fs::remove_file(&path).unwrap();
        let catalog = loaded.unwrap();

        assert_eq!(catalog.len(), DesignCatalog::builtin().len() + 1);
        assert_eq!(catalog.default_entry().id, DEFAULT_DESIGN_ID);
        assert_eq!(catalog.get(DEFAULT_DESIGN_ID).name, "Classic Club");
        assert_eq!(catalog.get("club-hoops-wide").overlay_asset(), Some("/patterns/hoops-wide.png"));
    }

    #[test]
    fn test_load_file_missing_path() {
        let path = std::env::temp_dir().join(format!("designs-{}.json", uuid::Uuid::new_v4()));
        match DesignCatalog::load_file(&path) {
            Err(CatalogError::Io { path: reported, .. }) => assert_eq!(reported, path.display().to_string()),
            other => panic!("expected Io error, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_load_file_rejects_bad_content() {
        let path = temp_designs(r#"{"id": "not-an-array"}"#);
        let loaded = DesignCatalog::load_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(loaded, Err(CatalogError::Json(_))));

        let path = temp_designs(
            r#"[{"id": "", "name": "Blank", "mapping": {"base": "primary", "sleeve": "primary", "yoke": "primary", "side": "primary", "collar": "primary"}}]"#,
        );
        let loaded = DesignCatalog::load_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(loaded, Err(CatalogError::EmptyId(0))));
    }

    #[test]
    fn test_entry_json_shape() {
        let json = r#"{
            "id": "club-sash",
            "name": "Sash",
            "mapping": {"base": "primary", "sleeve": "accent1", "yoke": "primary", "side": "accent2", "collar": "accent1"},
            "overlayImage": "/patterns/sash.png",
            "overlayColor": "accent2"
        }"#;
        let design: DesignEntry = serde_json::from_str(json).unwrap();
        assert_eq!(design.mapping.slot_for(Zone::Side), Slot::Accent2);
        assert_eq!(design.overlay_slot(), Slot::Accent2);
        assert_eq!(design.pattern, None);
    }
}
