//! SVG serialization of a projected composition
//!
//! Zone masks and overlays are tinted with an `feFlood`/`feComposite` filter so
//! that only the artwork's alpha channel survives. Arced text is drawn along a
//! `<path>` in `<defs>` through `<textPath>`.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use crate::domain::{HexColor, VIEWBOX_HEIGHT, VIEWBOX_WIDTH};
use super::projector::{Composition, Layer, TextPath};

/// Rendered size at scale 1.0, in CSS pixels
const BASE_WIDTH: f64 = 320.0;
const BASE_HEIGHT: f64 = 420.0;

/// Logo edge length in viewbox units at logo scale 1.0
const LOGO_BASE_SIZE: f64 = 40.0;

impl Composition {
    /// Standalone SVG document for this composition
    pub fn to_svg(&self) -> String {
        SvgDocument(self).to_string()
    }
}

/// Display adapter writing a composition as SVG
pub struct SvgDocument<'a>(pub &'a Composition);

impl Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let composition = self.0;

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{:.0}" height="{:.0}" data-design="{}" data-view="{}">"#,
            VIEWBOX_WIDTH,
            VIEWBOX_HEIGHT,
            BASE_WIDTH * composition.scale,
            BASE_HEIGHT * composition.scale,
            escape(&composition.design_id),
            composition.view.as_str(),
        )?;

        write_defs(f, composition)?;

        for layer in &composition.layers {
            write_layer(f, layer)?;
        }

        writeln!(f, "</svg>")
    }
}

fn tint_id(color: &HexColor) -> String {
    format!("tint-{}", color.as_str().trim_start_matches('#'))
}

fn arc_id(field: &str) -> String {
    format!("arc-{}", field)
}

fn write_defs(f: &mut Formatter<'_>, composition: &Composition) -> fmt::Result {
    let tints: BTreeSet<&str> = composition
        .layers
        .iter()
        .filter_map(|layer| match layer {
            Layer::Zone { color, .. } => Some(color.as_str()),
            Layer::Overlay { tint, .. } => Some(tint.as_str()),
            _ => None,
        })
        .collect();

    writeln!(f, "  <defs>")?;
    for color in tints {
        writeln!(
            f,
            r#"    <filter id="tint-{}" color-interpolation-filters="sRGB"><feFlood flood-color="{}"/><feComposite in2="SourceAlpha" operator="in"/></filter>"#,
            color.trim_start_matches('#'),
            color,
        )?;
    }
    for layer in &composition.layers {
        if let Layer::Text { field, path: TextPath::Arc(arc), .. } = layer {
            writeln!(f, r#"    <path id="{}" d="{}" fill="none"/>"#, arc_id(field.as_str()), arc.svg_d())?;
        }
    }
    writeln!(f, "  </defs>")
}

fn write_layer(f: &mut Formatter<'_>, layer: &Layer) -> fmt::Result {
    match layer {
        Layer::Zone { zone, color, mask, .. } => writeln!(
            f,
            r#"  <image data-zone="{}" href="{}" x="0" y="0" width="{}" height="{}" filter="url(#{})"/>"#,
            zone.as_str(),
            escape(mask),
            VIEWBOX_WIDTH,
            VIEWBOX_HEIGHT,
            tint_id(color),
        ),
        Layer::Overlay { href, tint, opacity, .. } => writeln!(
            f,
            r#"  <image data-overlay="true" href="{}" x="0" y="0" width="{}" height="{}" opacity="{:.2}" filter="url(#{})"/>"#,
            escape(href),
            VIEWBOX_WIDTH,
            VIEWBOX_HEIGHT,
            opacity,
            tint_id(tint),
        ),
        Layer::Logo { href, position, scale } => {
            let (x, y) = position.to_viewbox();
            let half = LOGO_BASE_SIZE / 2.0;
            writeln!(
                f,
                r#"  <g transform="translate({:.2} {:.2}) scale({:.2})"><image href="{}" x="{}" y="{}" width="{}" height="{}"/></g>"#,
                x, y, scale, escape(href), -half, -half, LOGO_BASE_SIZE, LOGO_BASE_SIZE,
            )
        }
        Layer::Text {
            field,
            content,
            position,
            font,
            font_size,
            fill,
            outline_color,
            outline_width,
            path,
        } => {
            let style = format!(
                r#"font-family="{}" font-size="{:.2}" fill="{}" stroke="{}" stroke-width="{:.2}" paint-order="stroke" text-anchor="middle""#,
                escape(font),
                font_size,
                fill,
                outline_color,
                outline_width,
            );
            match path {
                TextPath::Straight => {
                    let (x, y) = position.to_viewbox();
                    writeln!(
                        f,
                        r#"  <text data-field="{}" x="{:.2}" y="{:.2}" dominant-baseline="middle" {}>{}</text>"#,
                        field.as_str(),
                        x,
                        y,
                        style,
                        escape(content),
                    )
                }
                TextPath::Arc(_) => writeln!(
                    f,
                    r##"  <text data-field="{}" {}><textPath href="#{}" startOffset="50%">{}</textPath></text>"##,
                    field.as_str(),
                    style,
                    arc_id(field.as_str()),
                    escape(content),
                ),
            }
        }
    }
}

/// Escape text for XML content and attribute values
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
