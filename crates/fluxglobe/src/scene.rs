//! Renderer-facing buffers, materials and per-frame state.
//!
//! Geometry is computed in `f64` and handed to the renderer as flat `f32`
//! buffers. Nothing here talks to a GPU; the buffers serialize to JSON so
//! any front end can upload them.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use fluxglobe_geom::{FluxGeometry, Ribbon};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const CYAN: Color = Color::rgb(0x00, 0xd3, 0xe1);
    pub const AMBER: Color = Color::rgb(0xff, 0xaa, 0x00);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(format!("expected #rrggbb, got '{hex}'"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| format!("invalid color '{hex}': {e}"))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels scaled to `[0, 1]`.
    #[must_use]
    pub fn to_linear_array(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| f32::from(c) / 255.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Default texture scroll per frame for [`FluxMaterial::Shader`].
pub const DEFAULT_SCROLL_SPEED: f32 = 0.004;

/// How flux lines are shaded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FluxMaterial {
    /// Solid line.
    BasicLine { color: Color, line_width: f32 },
    /// Dashed line; dash and gap lengths are in world units.
    DashedLine {
        color: Color,
        dash_size: f32,
        gap_size: f32,
        line_width: f32,
    },
    /// Additive-blended line whose texture scrolls along the flux.
    Shader {
        color: Color,
        texture: String,
        scroll_speed: f32,
    },
}

impl FluxMaterial {
    #[must_use]
    pub fn basic_line() -> Self {
        Self::BasicLine {
            color: Color::RED,
            line_width: 1.0,
        }
    }

    #[must_use]
    pub fn dashed_line() -> Self {
        Self::DashedLine {
            color: Color::AMBER,
            dash_size: 3.0,
            gap_size: 1.0,
            line_width: 2.0,
        }
    }

    #[must_use]
    pub fn shader() -> Self {
        Self::Shader {
            color: Color::CYAN,
            texture: "texture.16.png".to_string(),
            scroll_speed: DEFAULT_SCROLL_SPEED,
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::BasicLine { color, .. }
            | Self::DashedLine { color, .. }
            | Self::Shader { color, .. } => *color,
        }
    }
}

impl Default for FluxMaterial {
    fn default() -> Self {
        Self::shader()
    }
}

/// State advanced once per render tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameContext {
    pub frame: u64,
    /// Texture offset of the shader material, wrapped to `[0, 1)`.
    pub displacement: f32,
    pub scroll_speed: f32,
    pub color: Color,
    /// Region index highlighted on the globe after a pick.
    pub highlighted: Option<u8>,
}

impl FrameContext {
    #[must_use]
    pub fn new(material: &FluxMaterial) -> Self {
        let scroll_speed = match material {
            FluxMaterial::Shader { scroll_speed, .. } => *scroll_speed,
            FluxMaterial::BasicLine { .. } | FluxMaterial::DashedLine { .. } => 0.0,
        };
        Self {
            frame: 0,
            displacement: 0.0,
            scroll_speed,
            color: material.color(),
            highlighted: None,
        }
    }

    /// Move to the next frame.
    pub fn advance(&mut self) {
        self.frame += 1;
        self.displacement = (self.displacement + self.scroll_speed).rem_euclid(1.0);
    }

    /// Highlight the region of a pick; index 0 clears the highlight.
    pub fn highlight(&mut self, index: u8) {
        self.highlighted = (index != 0).then_some(index);
    }

    #[must_use]
    pub fn is_highlighted(&self, index: u8) -> bool {
        self.highlighted == Some(index)
    }
}

/// How consecutive positions of a [`LineBuffer`] connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineTopology {
    /// Each position connects to the next.
    Strip,
    /// Positions pair up into disconnected segments.
    Segments,
}

/// Flat `xyz` positions for a line draw call.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LineBuffer {
    pub topology: LineTopology,
    pub positions: Vec<f32>,
}

impl LineBuffer {
    #[must_use]
    pub fn from_points(points: &[DVec3], topology: LineTopology) -> Self {
        Self {
            topology,
            positions: flatten(points),
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Flat `xyz` positions plus triangle indices.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MeshBuffer {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
}

impl From<&Ribbon> for MeshBuffer {
    fn from(ribbon: &Ribbon) -> Self {
        Self {
            positions: flatten(ribbon.vertices()),
            indices: ribbon.faces().iter().flatten().copied().collect(),
        }
    }
}

/// Buffer for one flux.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FluxBuffer {
    Line(LineBuffer),
    Mesh(MeshBuffer),
}

impl From<&FluxGeometry> for FluxBuffer {
    fn from(geometry: &FluxGeometry) -> Self {
        match geometry {
            FluxGeometry::Line(arc) => {
                FluxBuffer::Line(LineBuffer::from_points(arc.points(), LineTopology::Strip))
            }
            FluxGeometry::Ribbon(ribbon) => FluxBuffer::Mesh(MeshBuffer::from(ribbon)),
        }
    }
}

/// Everything a front end needs to draw the globe's overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub material: FluxMaterial,
    pub frame: FrameContext,
    pub fluxes: Vec<FluxBuffer>,
    pub borders: LineBuffer,
}

fn flatten(points: &[DVec3]) -> Vec<f32> {
    points
        .iter()
        .flat_map(|point| point.as_vec3().to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxglobe_geom::{GeoCoordinate, Sphere, build_ribbon};

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#00d3e1"), Ok(Color::CYAN));
        assert_eq!(Color::from_hex("ff0000"), Ok(Color::RED));
        assert_eq!(Color::CYAN.to_string(), "#00d3e1");
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_color_channels() {
        let [r, g, b] = Color::rgb(255, 0, 51).to_linear_array();
        assert!((r - 1.0).abs() < 1e-6);
        assert!(g.abs() < 1e-6);
        assert!((b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_material_json_shape() {
        let json = serde_json::to_value(FluxMaterial::dashed_line()).unwrap();
        assert_eq!(json["kind"], "dashed-line");
        assert_eq!(json["color"], "#ffaa00");

        let material: FluxMaterial = serde_json::from_str(
            r##"{"kind": "shader", "color": "#ffffff", "texture": "t.png", "scroll_speed": 0.01}"##,
        )
        .unwrap();
        assert_eq!(material.color(), Color::rgb(255, 255, 255));
    }

    #[test]
    fn test_frame_advance_wraps() {
        let mut frame = FrameContext::new(&FluxMaterial::Shader {
            color: Color::RED,
            texture: String::new(),
            scroll_speed: 0.375,
        });
        frame.advance();
        frame.advance();
        frame.advance();
        assert_eq!(frame.frame, 3);
        assert!((frame.displacement - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_static_materials_do_not_scroll() {
        let mut frame = FrameContext::new(&FluxMaterial::basic_line());
        frame.advance();
        assert_eq!(frame.displacement, 0.0);
        assert_eq!(frame.color, Color::RED);
    }

    #[test]
    fn test_highlight() {
        let mut frame = FrameContext::new(&FluxMaterial::default());
        frame.highlight(7);
        assert!(frame.is_highlighted(7));
        assert!(!frame.is_highlighted(8));
        frame.highlight(0);
        assert_eq!(frame.highlighted, None);
    }

    #[test]
    fn test_line_buffer_layout() {
        let buffer = LineBuffer::from_points(
            &[DVec3::new(1.0, 2.0, 3.0), DVec3::new(-4.0, 5.5, 6.0)],
            LineTopology::Segments,
        );
        assert_eq!(buffer.positions, vec![1.0, 2.0, 3.0, -4.0, 5.5, 6.0]);
        assert_eq!(buffer.vertex_count(), 2);
    }

    #[test]
    fn test_ribbon_mesh_buffer() {
        let sphere = Sphere::at_origin(300.0).unwrap();
        let ribbon = build_ribbon(
            GeoCoordinate::new(0.0, 0.0).unwrap(),
            GeoCoordinate::new(10.0, 10.0).unwrap(),
            &sphere,
            4,
        )
        .unwrap();
        let mesh = MeshBuffer::from(&ribbon);
        assert_eq!(mesh.positions.len(), 6 * 3);
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 2, 3, 2, 4, 3, 3, 4, 5]);
    }
}
