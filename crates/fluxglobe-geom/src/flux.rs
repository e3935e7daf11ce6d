//! Style selection over the arc and ribbon constructions.

use crate::arc::{ArcKind, FluxArc, build_arc};
use crate::coords::{GeoCoordinate, Sphere};
use crate::error::GeomResult;
use crate::ribbon::{Ribbon, build_ribbon};

/// How a flux between two places is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FluxStyle {
    Quadratic,
    Cubic,
    #[default]
    DoubleCubic,
    Ribbon,
}

impl FluxStyle {
    /// Smallest sample count this style accepts.
    #[must_use]
    pub fn min_samples(self) -> usize {
        match self {
            Self::Quadratic => ArcKind::Quadratic.min_samples(),
            Self::Cubic => ArcKind::Cubic.min_samples(),
            Self::DoubleCubic | Self::Ribbon => ArcKind::DoubleCubic.min_samples(),
        }
    }
}

/// Geometry produced for one flux.
#[derive(Debug, Clone, PartialEq)]
pub enum FluxGeometry {
    /// A polyline through the sampled points.
    Line(FluxArc),
    /// A triangulated strip.
    Ribbon(Ribbon),
}

/// Build the geometry of one flux in the given style.
///
/// # Errors
///
/// Returns an error if `sample_count` is below [`FluxStyle::min_samples`].
pub fn build_flux(
    style: FluxStyle,
    src: GeoCoordinate,
    dst: GeoCoordinate,
    sphere: &Sphere,
    sample_count: usize,
) -> GeomResult<FluxGeometry> {
    let kind = match style {
        FluxStyle::Quadratic => ArcKind::Quadratic,
        FluxStyle::Cubic => ArcKind::Cubic,
        FluxStyle::DoubleCubic => ArcKind::DoubleCubic,
        FluxStyle::Ribbon => {
            return build_ribbon(src, dst, sphere, sample_count).map(FluxGeometry::Ribbon);
        }
    };
    build_arc(kind, src, dst, sphere, sample_count).map(FluxGeometry::Line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeomError;

    #[test]
    fn test_style_dispatch() {
        let sphere = Sphere::at_origin(300.0).unwrap();
        let src = GeoCoordinate::new(47.21176, -1.573).unwrap();
        let dst = GeoCoordinate::new(51.5, -0.12).unwrap();

        for style in [FluxStyle::Quadratic, FluxStyle::Cubic, FluxStyle::DoubleCubic] {
            let geometry = build_flux(style, src, dst, &sphere, 10).unwrap();
            assert!(matches!(geometry, FluxGeometry::Line(ref arc) if arc.len() == 10));
        }
        let ribbon = build_flux(FluxStyle::Ribbon, src, dst, &sphere, 10).unwrap();
        assert!(matches!(ribbon, FluxGeometry::Ribbon(ref r) if r.faces().len() == 16));
    }

    #[test]
    fn test_min_samples_per_style() {
        let sphere = Sphere::at_origin(1.0).unwrap();
        let c = GeoCoordinate::new(0.0, 0.0).unwrap();
        assert!(build_flux(FluxStyle::Cubic, c, c, &sphere, 2).is_ok());
        assert_eq!(
            build_flux(FluxStyle::Ribbon, c, c, &sphere, 2),
            Err(GeomError::InvalidSampleCount {
                count: 2,
                minimum: FluxStyle::Ribbon.min_samples()
            })
        );
    }

    #[test]
    fn test_style_names() {
        let style: FluxStyle = serde_json::from_str("\"double-cubic\"").unwrap();
        assert_eq!(style, FluxStyle::DoubleCubic);
        assert_eq!(serde_json::to_string(&FluxStyle::Ribbon).unwrap(), "\"ribbon\"");
    }
}
