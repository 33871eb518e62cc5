//! Jersey configuration model
//!
//! One [`JerseyConfig`] describes every visual and textual choice for a single
//! jersey design. Edits never mutate a model in place: a [`JerseyUpdate`] is
//! merged field by field into a new model, clamping anything out of range, so
//! an invalid configuration cannot be produced through updates.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::asset::AssetRef;
use super::catalog::{DesignCatalog, Slot};
use super::palette::{HexColor, DEFAULT_NAME_FONT, DEFAULT_NUMBER_FONT};
use super::placement::{Position, LOGO_SCALE, OUTLINE_WIDTH, PATTERN_OPACITY, TEXT_SCALE};

pub const MAX_NAME_CHARS: usize = 15;
pub const MAX_NUMBER_DIGITS: usize = 2;

/// Which view(s) show the jersey number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberType {
    Front,
    #[default]
    Back,
    Both,
}

impl NumberType {
    pub fn on_front(&self) -> bool {
        matches!(self, NumberType::Front | NumberType::Both)
    }

    pub fn on_back(&self) -> bool {
        matches!(self, NumberType::Back | NumberType::Both)
    }
}

/// Baseline shape of the free-form front text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcMode {
    #[default]
    None,
    Up,
    Down,
}

/// The four text elements of a jersey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    /// Player name across the back
    Name,
    /// Team name across the chest
    TeamName,
    Number,
    /// Free-form chest text, optionally arced
    FrontText,
}

impl TextField {
    pub const ALL: [TextField; 4] = [TextField::Name, TextField::TeamName, TextField::Number, TextField::FrontText];

    /// Elements that only move vertically stay horizontally centred
    pub fn is_vertical_only(&self) -> bool {
        !matches!(self, TextField::FrontText)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::TeamName => "teamName",
            TextField::Number => "number",
            TextField::FrontText => "frontText",
        }
    }

    /// Apply the content rules for this element
    pub fn normalize_content(&self, raw: &str) -> String {
        match self {
            TextField::Name => normalize_player_name(raw),
            TextField::Number => normalize_player_number(raw),
            TextField::TeamName | TextField::FrontText => raw.to_uppercase(),
        }
    }
}

/// Uppercase and cut to 15 characters
pub fn normalize_player_name(raw: &str) -> String {
    raw.to_uppercase().chars().take(MAX_NAME_CHARS).collect()
}

/// Keep digits only, at most two
pub fn normalize_player_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_NUMBER_DIGITS)
        .collect()
}

/// Styled, positionable text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub content: String,
    pub position: Position,
    pub scale: f64,
    /// CSS font stack
    pub font: String,
    pub fill: HexColor,
    pub outline_color: HexColor,
    pub outline_width: f64,
}

impl TextElement {
    fn styled(position: Position, font: &str) -> Self {
        TextElement {
            content: String::new(),
            position,
            scale: TEXT_SCALE.default,
            font: font.to_string(),
            fill: HexColor::from_static("#ffffff"),
            outline_color: HexColor::from_static("#1a1a1a"),
            outline_width: OUTLINE_WIDTH.default,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    fn normalized(mut self, field: TextField) -> Self {
        self.content = field.normalize_content(&self.content);
        self.position = constrain(field, self.position);
        self.scale = TEXT_SCALE.clamp(self.scale);
        self.outline_width = OUTLINE_WIDTH.clamp(self.outline_width);
        self
    }
}

fn constrain(field: TextField, position: Position) -> Position {
    if field.is_vertical_only() {
        Position::centered(position.y)
    } else {
        position.clamped()
    }
}

/// Complete configuration for one jersey design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JerseyConfig {
    pub design_id: String,
    pub primary_color: HexColor,
    pub accent1_color: HexColor,
    pub accent2_color: HexColor,
    pub pattern_opacity: f64,
    pub custom_template_url: Option<AssetRef>,
    pub custom_template_color: Slot,
    pub logo_image: Option<AssetRef>,
    pub logo_position: Position,
    pub logo_scale: f64,
    pub name: TextElement,
    pub team_name: TextElement,
    pub number: TextElement,
    pub front_text: TextElement,
    pub front_text_arc: ArcMode,
    pub number_type: NumberType,
    pub use_team_names: bool,
}

/// Default configuration for a design from the built-in catalog
pub fn default_configuration(design_id: &str) -> JerseyConfig {
    JerseyConfig::default_for(&DesignCatalog::builtin(), design_id)
}

/// Merge a partial update into a model using the built-in catalog
pub fn apply_update(model: &JerseyConfig, update: &JerseyUpdate) -> JerseyConfig {
    model.apply_with(update, &DesignCatalog::builtin())
}

impl JerseyConfig {
    /// Fully populated model with safe defaults. Unknown ids resolve to the
    /// catalog's default design.
    pub fn default_for(catalog: &DesignCatalog, design_id: &str) -> Self {
        JerseyConfig {
            design_id: catalog.get(design_id).id.clone(),
            primary_color: HexColor::from_static("#1a1a1a"),
            accent1_color: HexColor::from_static("#ffffff"),
            accent2_color: HexColor::from_static("#ffd700"),
            pattern_opacity: PATTERN_OPACITY.default,
            custom_template_url: None,
            custom_template_color: Slot::Accent1,
            logo_image: None,
            logo_position: Position::new(50.0, 35.0),
            logo_scale: LOGO_SCALE.default,
            name: TextElement::styled(Position::centered(20.0), DEFAULT_NAME_FONT),
            team_name: TextElement::styled(Position::centered(25.0), DEFAULT_NAME_FONT),
            number: TextElement::styled(Position::centered(50.0), DEFAULT_NUMBER_FONT),
            front_text: TextElement::styled(Position::new(50.0, 45.0), DEFAULT_NAME_FONT),
            front_text_arc: ArcMode::None,
            number_type: NumberType::Back,
            use_team_names: false,
        }
    }

    pub fn slot_color(&self, slot: Slot) -> &HexColor {
        match slot {
            Slot::Primary => &self.primary_color,
            Slot::Accent1 => &self.accent1_color,
            Slot::Accent2 => &self.accent2_color,
        }
    }

    pub fn text(&self, field: TextField) -> &TextElement {
        match field {
            TextField::Name => &self.name,
            TextField::TeamName => &self.team_name,
            TextField::Number => &self.number,
            TextField::FrontText => &self.front_text,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut TextElement {
        match field {
            TextField::Name => &mut self.name,
            TextField::TeamName => &mut self.team_name,
            TextField::Number => &mut self.number,
            TextField::FrontText => &mut self.front_text,
        }
    }

    /// Re-establish every invariant on a model that did not come from
    /// `default_for`/`apply_with` (e.g. deserialized from a client).
    pub fn normalized(mut self, catalog: &DesignCatalog) -> Self {
        self.design_id = catalog.get(&self.design_id).id.clone();
        self.pattern_opacity = PATTERN_OPACITY.clamp(self.pattern_opacity);
        self.logo_position = self.logo_position.clamped();
        self.logo_scale = LOGO_SCALE.clamp(self.logo_scale);
        self.custom_template_url = self.custom_template_url.filter(AssetRef::is_present);
        self.logo_image = self.logo_image.filter(AssetRef::is_present);
        for field in TextField::ALL {
            let element = std::mem::replace(self.text_mut(field), TextElement::styled(Position::default(), ""));
            *self.text_mut(field) = element.normalized(field);
        }
        self
    }

    /// Same design with one roster player's name and number
    pub fn with_player(&self, name: &str, number: &str) -> Self {
        let mut config = self.clone();
        config.name.content = normalize_player_name(name);
        config.number.content = normalize_player_number(number);
        config.use_team_names = true;
        config
    }

    /// Merge a partial update using the built-in catalog
    pub fn apply(&self, update: &JerseyUpdate) -> Self {
        self.apply_with(update, &DesignCatalog::builtin())
    }

    /// Field-by-field merge. Out-of-range numbers and positions are clamped,
    /// unparsable colours are ignored, unknown design ids fall back to the
    /// catalog default.
    pub fn apply_with(&self, update: &JerseyUpdate, catalog: &DesignCatalog) -> Self {
        let mut next = self.clone();

        if let Some(ref id) = update.design_id {
            next.design_id = catalog.get(id).id.clone();
        }

        merge_color(&mut next.primary_color, update.primary_color.as_deref(), "primaryColor");
        merge_color(&mut next.accent1_color, update.accent1_color.as_deref(), "accent1Color");
        merge_color(&mut next.accent2_color, update.accent2_color.as_deref(), "accent2Color");

        if let Some(opacity) = update.pattern_opacity {
            next.pattern_opacity = PATTERN_OPACITY.clamp(opacity);
        }
        if let Some(ref url) = update.custom_template_url {
            next.custom_template_url = AssetRef::new(url.as_str());
        }
        if let Some(slot) = update.custom_template_color {
            next.custom_template_color = slot;
        }
        if let Some(ref logo) = update.logo_image {
            next.logo_image = AssetRef::new(logo.as_str());
        }
        if let Some(position) = update.logo_position {
            next.logo_position = position.clamped();
        }
        if let Some(scale) = update.logo_scale {
            next.logo_scale = LOGO_SCALE.clamp(scale);
        }

        for field in TextField::ALL {
            if let Some(text_update) = update.text(field) {
                text_update.merge_into(next.text_mut(field), field);
            }
        }

        if let Some(arc) = update.front_text_arc {
            next.front_text_arc = arc;
        }
        if let Some(number_type) = update.number_type {
            next.number_type = number_type;
        }
        if let Some(use_team_names) = update.use_team_names {
            next.use_team_names = use_team_names;
        }

        next
    }
}

fn merge_color(target: &mut HexColor, raw: Option<&str>, field: &str) {
    let Some(raw) = raw else { return };
    match HexColor::parse(raw) {
        Ok(color) => *target = color,
        Err(e) => warn!(field = field, error = %e, "Ignoring invalid colour in update"),
    }
}

// ============================================================================
// Partial updates
// ============================================================================

/// Partial update for one text element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextUpdate {
    pub content: Option<String>,
    pub position: Option<Position>,
    pub scale: Option<f64>,
    pub font: Option<String>,
    pub fill: Option<String>,
    pub outline_color: Option<String>,
    pub outline_width: Option<f64>,
}

impl TextUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        TextUpdate {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn position(position: Position) -> Self {
        TextUpdate {
            position: Some(position),
            ..Default::default()
        }
    }

    fn merge_into(&self, element: &mut TextElement, field: TextField) {
        if let Some(ref content) = self.content {
            element.content = field.normalize_content(content);
        }
        if let Some(position) = self.position {
            element.position = constrain(field, position);
        }
        if let Some(scale) = self.scale {
            element.scale = TEXT_SCALE.clamp(scale);
        }
        if let Some(ref font) = self.font {
            if !font.trim().is_empty() {
                element.font = font.clone();
            }
        }
        merge_color(&mut element.fill, self.fill.as_deref(), field.as_str());
        merge_color(&mut element.outline_color, self.outline_color.as_deref(), field.as_str());
        if let Some(width) = self.outline_width {
            element.outline_width = OUTLINE_WIDTH.clamp(width);
        }
    }
}

/// Partial update for a whole configuration. Absent fields are left alone.
/// An empty string for `logoImage` or `customTemplateUrl` clears the asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JerseyUpdate {
    pub design_id: Option<String>,
    pub primary_color: Option<String>,
    pub accent1_color: Option<String>,
    pub accent2_color: Option<String>,
    pub pattern_opacity: Option<f64>,
    pub custom_template_url: Option<String>,
    pub custom_template_color: Option<Slot>,
    pub logo_image: Option<String>,
    pub logo_position: Option<Position>,
    pub logo_scale: Option<f64>,
    pub name: Option<TextUpdate>,
    pub team_name: Option<TextUpdate>,
    pub number: Option<TextUpdate>,
    pub front_text: Option<TextUpdate>,
    pub front_text_arc: Option<ArcMode>,
    pub number_type: Option<NumberType>,
    pub use_team_names: Option<bool>,
}

impl JerseyUpdate {
    pub fn text(&self, field: TextField) -> Option<&TextUpdate> {
        match field {
            TextField::Name => self.name.as_ref(),
            TextField::TeamName => self.team_name.as_ref(),
            TextField::Number => self.number.as_ref(),
            TextField::FrontText => self.front_text.as_ref(),
        }
    }

    /// Update that moves a single text element
    pub fn text_position(field: TextField, position: Position) -> Self {
        let text = Some(TextUpdate::position(position));
        match field {
            TextField::Name => JerseyUpdate { name: text, ..Default::default() },
            TextField::TeamName => JerseyUpdate { team_name: text, ..Default::default() },
            TextField::Number => JerseyUpdate { number: text, ..Default::default() },
            TextField::FrontText => JerseyUpdate { front_text: text, ..Default::default() },
        }
    }

    /// Update that moves the logo
    pub fn logo_position(position: Position) -> Self {
        JerseyUpdate {
            logo_position: Some(position),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::DEFAULT_DESIGN_ID;
    use crate::domain::placement::{SAFE_MAX, SAFE_MIN};

    #[test]
    fn test_default_configuration_is_populated() {
        let config = default_configuration("builder-crew-raglan");
        assert_eq!(config.design_id, "builder-crew-raglan");
        assert_eq!(config.logo_scale, 1.0);
        assert!(config.name.is_empty());
        assert!(config.logo_position.is_within_safe_region());
        assert_eq!(config.number_type, NumberType::Back);
    }

    #[test]
    fn test_default_configuration_unknown_design() {
        let config = default_configuration("retired-design");
        assert_eq!(config.design_id, DEFAULT_DESIGN_ID);
    }

    #[test]
    fn test_logo_scale_is_clamped() {
        let config = default_configuration(DEFAULT_DESIGN_ID);
        let update = JerseyUpdate { logo_scale: Some(5.0), ..Default::default() };
        assert_eq!(apply_update(&config, &update).logo_scale, 2.0);

        let update = JerseyUpdate { logo_scale: Some(0.0), ..Default::default() };
        assert_eq!(apply_update(&config, &update).logo_scale, 0.5);
    }

    #[test]
    fn test_apply_is_pure() {
        let config = default_configuration(DEFAULT_DESIGN_ID);
        let update = JerseyUpdate { pattern_opacity: Some(0.9), ..Default::default() };
        let next = config.apply(&update);
        assert_eq!(config.pattern_opacity, 0.5);
        assert_eq!(next.pattern_opacity, 0.9);
    }

    #[test]
    fn test_positions_are_clamped() {
        let config = default_configuration(DEFAULT_DESIGN_ID);
        let update = JerseyUpdate {
            logo_position: Some(Position { x: 140.0, y: -3.0 }),
            front_text: Some(TextUpdate::position(Position { x: 0.0, y: 99.0 })),
            ..Default::default()
        };
        let next = config.apply(&update);
        assert_eq!(next.logo_position, Position { x: SAFE_MAX, y: SAFE_MIN });
        assert_eq!(next.front_text.position, Position { x: SAFE_MIN, y: SAFE_MAX });
    }

    #[test]
    fn test_vertical_only_elements_stay_centered() {
        let config = default_configuration(DEFAULT_DESIGN_ID);
        let update = JerseyUpdate::text_position(TextField::Name, Position { x: 12.0, y: 70.0 });
        let next = config.apply(&update);
        assert_eq!(next.name.position, Position { x: 50.0, y: 70.0 });
    }

    #[test]
    fn test_invalid_color_keeps_previous() {
        let config = default_configuration(DEFAULT_DESIGN_ID);
        let update = JerseyUpdate {
            primary_color: Some("not-a-colour".to_string()),
            accent1_color: Some("#C41E3A".to_string()),
            ..Default::default()
        };
        let next = config.apply(&update);
        assert_eq!(next.primary_color, config.primary_color);
        assert_eq!(next.accent1_color.as_str(), "#c41e3a");
    }

    #[test]
    fn test_unknown_design_update_falls_back() {
        let config = default_configuration("builder-crew-hoops");
        let update = JerseyUpdate { design_id: Some("nope".to_string()), ..Default::default() };
        assert_eq!(config.apply(&update).design_id, DEFAULT_DESIGN_ID);
    }

    #[test]
    fn test_text_content_rules() {
        let config = default_configuration(DEFAULT_DESIGN_ID);
        let update = JerseyUpdate {
            name: Some(TextUpdate::content("montgomery-wellington")),
            number: Some(TextUpdate::content("#1a23")),
            team_name: Some(TextUpdate::content("thunder")),
            ..Default::default()
        };
        let next = config.apply(&update);
        assert_eq!(next.name.content, "MONTGOMERY-WELL");
        assert_eq!(next.number.content, "12");
        assert_eq!(next.team_name.content, "THUNDER");
    }

    #[test]
    fn test_empty_asset_clears() {
        let config = default_configuration(DEFAULT_DESIGN_ID).apply(&JerseyUpdate {
            logo_image: Some("/logos/8two-icon.svg".to_string()),
            ..Default::default()
        });
        assert!(config.logo_image.is_some());

        let cleared = config.apply(&JerseyUpdate { logo_image: Some(String::new()), ..Default::default() });
        assert!(cleared.logo_image.is_none());
    }

    #[test]
    fn test_partial_update_from_json() {
        let update: JerseyUpdate = serde_json::from_str(
            r#"{"logoScale": 1.5, "numberType": "both", "frontTextArc": "up", "frontText": {"content": "est. 2024"}}"#,
        )
        .unwrap();
        let next = default_configuration(DEFAULT_DESIGN_ID).apply(&update);
        assert_eq!(next.logo_scale, 1.5);
        assert_eq!(next.number_type, NumberType::Both);
        assert_eq!(next.front_text_arc, ArcMode::Up);
        assert_eq!(next.front_text.content, "EST. 2024");
    }

    #[test]
    fn test_normalized_repairs_deserialized_model() {
        let mut raw = serde_json::to_value(default_configuration(DEFAULT_DESIGN_ID)).unwrap();
        raw["logoScale"] = serde_json::json!(9.0);
        raw["designId"] = serde_json::json!("ghost");
        raw["name"]["position"] = serde_json::json!({"x": 3.0, "y": 300.0});
        let model: JerseyConfig = serde_json::from_value(raw).unwrap();

        let fixed = model.normalized(&DesignCatalog::builtin());
        assert_eq!(fixed.logo_scale, 2.0);
        assert_eq!(fixed.design_id, DEFAULT_DESIGN_ID);
        assert_eq!(fixed.name.position, Position { x: 50.0, y: SAFE_MAX });
    }

    #[test]
    fn test_with_player_overrides_name_and_number() {
        let shared = default_configuration(DEFAULT_DESIGN_ID);
        let player = shared.with_player("jordan", "23");
        assert_eq!(player.name.content, "JORDAN");
        assert_eq!(player.number.content, "23");
        assert!(player.use_team_names);
        assert_eq!(player.primary_color, shared.primary_color);
    }
}
