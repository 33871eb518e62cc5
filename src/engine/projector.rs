//! Rendering projector
//!
//! Turns a configuration, its design entry, a view and a garment size into an
//! ordered list of drawable layers (back to front):
//! side panels, body, yoke, sleeves, collar, overlays, logo (front only), text.
//!
//! Zone colours are resolved indirectly: zone -> slot via the design's
//! mapping, slot -> colour via the configuration. Missing assets drop their
//! layer; projection never fails.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{
    ArcMode, DesignEntry, GarmentSize, HexColor, JerseyConfig, Pattern, Position, Slot, TextField, Zone,
};
use super::text::ArcPath;

/// Base font sizes in viewbox units at scale 1.0
const NAME_FONT_SIZE: f64 = 12.0;
const TEAM_NAME_FONT_SIZE: f64 = 14.0;
const BACK_NUMBER_FONT_SIZE: f64 = 40.0;
const FRONT_NUMBER_FONT_SIZE: f64 = 16.0;
const FRONT_TEXT_FONT_SIZE: f64 = 16.0;

/// Which side of the garment is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Front,
    Back,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Front => "front",
            View::Back => "back",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "front" => Some(View::Front),
            "back" => Some(View::Back),
            _ => None,
        }
    }

    fn template_prefix(&self) -> &'static str {
        match self {
            View::Front => "CrewFront",
            View::Back => "CrewBack",
        }
    }
}

/// Where an overlay layer's artwork came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlaySource {
    Pattern(Pattern),
    /// Artwork named explicitly by the design entry
    DesignImage,
    /// User-supplied template image
    CustomTemplate,
}

/// Text baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPath {
    Straight,
    Arc(ArcPath),
}

/// One drawable layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Zone {
        zone: Zone,
        slot: Slot,
        color: HexColor,
        mask: String,
    },
    Overlay {
        source: OverlaySource,
        href: String,
        tint: HexColor,
        opacity: f64,
    },
    Logo {
        href: String,
        position: Position,
        scale: f64,
    },
    Text {
        field: TextField,
        content: String,
        position: Position,
        font: String,
        font_size: f64,
        fill: HexColor,
        outline_color: HexColor,
        outline_width: f64,
        path: TextPath,
    },
}

/// Projected layers for one view at one size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub design_id: String,
    pub view: View,
    pub size: GarmentSize,
    /// Uniform preview scale from the size table
    pub scale: f64,
    pub layers: Vec<Layer>,
}

impl Composition {
    pub fn text_layer(&self, field: TextField) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|layer| matches!(layer, Layer::Text { field: f, .. } if *f == field))
    }

    pub fn has_logo(&self) -> bool {
        self.layers.iter().any(|layer| matches!(layer, Layer::Logo { .. }))
    }

    pub fn overlays(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| matches!(layer, Layer::Overlay { .. }))
    }
}

/// Project a configuration into layers
pub fn project(model: &JerseyConfig, design: &DesignEntry, view: View, size: GarmentSize) -> Composition {
    if model.design_id != design.id {
        debug!(
            model_design = %model.design_id,
            design = %design.id,
            "Projecting with a design other than the model's"
        );
    }

    let mut layers = Vec::with_capacity(10);

    for zone in Zone::PAINT_ORDER {
        let slot = design.mapping.slot_for(zone);
        layers.push(Layer::Zone {
            zone,
            slot,
            color: model.slot_color(slot).clone(),
            mask: format!("/patterns/{}_{}.png", view.template_prefix(), zone.mask_name()),
        });
    }

    if let Some(overlay) = design_overlay(model, design) {
        layers.push(overlay);
    }

    match model.custom_template_url {
        Some(ref url) if url.is_present() => layers.push(Layer::Overlay {
            source: OverlaySource::CustomTemplate,
            href: url.to_string(),
            tint: model.slot_color(model.custom_template_color).clone(),
            opacity: model.pattern_opacity,
        }),
        Some(_) => warn!(design_id = %design.id, "Custom template reference is blank, layer omitted"),
        None => {}
    }

    if view == View::Front {
        match model.logo_image {
            Some(ref logo) if logo.is_present() => layers.push(Layer::Logo {
                href: logo.to_string(),
                position: model.logo_position,
                scale: model.logo_scale,
            }),
            Some(_) => warn!(design_id = %design.id, "Logo reference is blank, layer omitted"),
            None => {}
        }
    }

    for (field, base_size) in visible_text(model, view) {
        if let Some(layer) = text_layer(model, field, base_size) {
            layers.push(layer);
        }
    }

    debug!(
        design_id = %design.id,
        view = view.as_str(),
        size = %size,
        layers = layers.len(),
        "Projected jersey composition"
    );

    Composition {
        design_id: design.id.clone(),
        view,
        size,
        scale: size.preview_scale(),
        layers,
    }
}

fn design_overlay(model: &JerseyConfig, design: &DesignEntry) -> Option<Layer> {
    let href = design.overlay_asset()?;
    let explicit = design
        .overlay_image
        .as_deref()
        .is_some_and(|image| !image.trim().is_empty());

    let source = match design.pattern {
        Some(pattern) if !explicit => OverlaySource::Pattern(pattern),
        _ => OverlaySource::DesignImage,
    };

    Some(Layer::Overlay {
        source,
        href: href.to_string(),
        tint: model.slot_color(design.overlay_slot()).clone(),
        opacity: model.pattern_opacity,
    })
}

/// Text elements shown on a view, in paint order, with their base font size
fn visible_text(model: &JerseyConfig, view: View) -> Vec<(TextField, f64)> {
    let mut fields = Vec::with_capacity(3);
    match view {
        View::Front => {
            fields.push((TextField::TeamName, TEAM_NAME_FONT_SIZE));
            fields.push((TextField::FrontText, FRONT_TEXT_FONT_SIZE));
            if model.number_type.on_front() {
                fields.push((TextField::Number, FRONT_NUMBER_FONT_SIZE));
            }
        }
        View::Back => {
            fields.push((TextField::Name, NAME_FONT_SIZE));
            if model.number_type.on_back() {
                fields.push((TextField::Number, BACK_NUMBER_FONT_SIZE));
            }
        }
    }
    fields
}

fn text_layer(model: &JerseyConfig, field: TextField, base_size: f64) -> Option<Layer> {
    let element = model.text(field);
    if element.is_empty() {
        return None;
    }

    let path = match field {
        TextField::FrontText => ArcPath::new(element.position.to_viewbox(), model.front_text_arc)
            .map(TextPath::Arc)
            .unwrap_or(TextPath::Straight),
        _ => TextPath::Straight,
    };

    Some(Layer::Text {
        field,
        content: element.content.clone(),
        position: element.position,
        font: element.font.clone(),
        font_size: base_size * element.scale,
        fill: element.fill.clone(),
        outline_color: element.outline_color.clone(),
        outline_width: element.outline_width,
        path,
    })
}

/// Whether the front text will be drawn on an arc
pub fn is_arced(model: &JerseyConfig) -> bool {
    model.front_text_arc != ArcMode::None && !model.front_text.is_empty()
}
