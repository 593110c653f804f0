// Map geometry: coordinates, Web Mercator projection and viewport fitting
use super::collection_point::{CollectionPoint, FillTier};
use serde::Serialize;
use std::f64::consts::PI;

const TILE_SIZE: f64 = 256.0;
const MAX_SIN_LAT: f64 = 0.9999;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parse a "lat, lng" location string
    pub fn parse(location: &str) -> Option<Self> {
        let (lat, lng) = location.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }

    /// Pixel position in the world image at the given zoom
    pub fn project(&self, zoom: u8) -> (f64, f64) {
        let scale = world_size(zoom);
        let x = (self.lng + 180.0) / 360.0 * scale;
        let sin = self.lat.to_radians().sin().clamp(-MAX_SIN_LAT, MAX_SIN_LAT);
        let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * scale;
        (x, y)
    }

    pub fn unproject(x: f64, y: f64, zoom: u8) -> Self {
        let scale = world_size(zoom);
        let lng = x / scale * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y / scale)).sinh().atan().to_degrees();
        Self { lat, lng }
    }

    pub fn display(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(zoom as i32)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl Bounds {
    pub fn enclosing(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            south_west: first,
            north_east: first,
        };
        for p in iter {
            bounds.south_west.lat = bounds.south_west.lat.min(p.lat);
            bounds.south_west.lng = bounds.south_west.lng.min(p.lng);
            bounds.north_east.lat = bounds.north_east.lat.max(p.lat);
            bounds.north_east.lng = bounds.north_east.lng.max(p.lng);
        }
        Some(bounds)
    }

    /// Centre in projected space, which is what a tiled map pans to
    pub fn center(&self, zoom: u8) -> GeoPoint {
        let (x1, y1) = self.south_west.project(zoom);
        let (x2, y2) = self.north_east.project(zoom);
        GeoPoint::unproject((x1 + x2) / 2.0, (y1 + y2) / 2.0, zoom)
    }

    /// Pixel extent of the bounds at a zoom level
    pub fn pixel_size(&self, zoom: u8) -> (f64, f64) {
        let (x1, y1) = self.south_west.project(zoom);
        let (x2, y2) = self.north_east.project(zoom);
        ((x2 - x1).abs(), (y2 - y1).abs())
    }
}

/// Visible map size in pixels and the padding kept clear when fitting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl Viewport {
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(self.max_zoom);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(self.min_zoom);
    }

    /// Largest zoom showing the whole bounds inside the padded viewport
    pub fn fit(&mut self, bounds: &Bounds, size: ViewportSize) {
        let usable_w = size.width as f64 - 2.0 * size.padding as f64;
        let usable_h = size.height as f64 - 2.0 * size.padding as f64;

        let mut zoom = self.min_zoom;
        if usable_w > 0.0 && usable_h > 0.0 {
            for candidate in (self.min_zoom..=self.max_zoom).rev() {
                let (w, h) = bounds.pixel_size(candidate);
                if w <= usable_w && h <= usable_h {
                    zoom = candidate;
                    break;
                }
            }
        }

        self.zoom = zoom;
        self.center = bounds.center(zoom);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub id: u32,
    pub name: String,
    pub zone: String,
    pub fill: u8,
    pub tier: FillTier,
    pub color: &'static str,
    pub position: GeoPoint,
    pub popup: String,
    pub selected: bool,
}

impl MapMarker {
    /// None when the point's location is not a coordinate pair
    pub fn from_point(point: &CollectionPoint, selected: Option<u32>) -> Option<Self> {
        let position = GeoPoint::parse(&point.location)?;
        let tier = point.tier();
        Some(Self {
            id: point.id,
            name: point.name.clone(),
            zone: point.zone.clone(),
            fill: point.fill,
            tier,
            color: tier.color(),
            position,
            popup: format!(
                "{}\nZone: {}\nFill: {}%\nStatus: {}",
                point.name,
                point.zone,
                point.fill,
                tier.as_str()
            ),
            selected: selected == Some(point.id),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub tier: FillTier,
    pub color: &'static str,
    pub label: &'static str,
}

pub fn legend() -> Vec<LegendEntry> {
    vec![
        LegendEntry {
            tier: FillTier::Normal,
            color: FillTier::Normal.color(),
            label: "Normal (0-70%)",
        },
        LegendEntry {
            tier: FillTier::Warning,
            color: FillTier::Warning.color(),
            label: "Warning (71-90%)",
        },
        LegendEntry {
            tier: FillTier::Critical,
            color: FillTier::Critical.color(),
            label: "Critical (91-100%)",
        },
    ]
}

/// Details panel for the highlighted point
#[derive(Debug, Clone, Serialize)]
pub struct PointDetails {
    pub id: u32,
    pub name: String,
    pub zone: String,
    pub fill: u8,
    pub tier: FillTier,
    pub coordinates: String,
}

impl From<&MapMarker> for PointDetails {
    fn from(marker: &MapMarker) -> Self {
        Self {
            id: marker.id,
            name: marker.name.clone(),
            zone: marker.zone.clone(),
            fill: marker.fill,
            tier: marker.tier,
            coordinates: marker.position.display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris_viewport() -> Viewport {
        Viewport {
            center: GeoPoint::new(48.8566, 2.3522),
            zoom: 13,
            min_zoom: 0,
            max_zoom: 19,
        }
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(
            GeoPoint::parse("48.8566, 2.3522"),
            Some(GeoPoint::new(48.8566, 2.3522))
        );
        assert_eq!(GeoPoint::parse("Rue de Rivoli"), None);
        assert_eq!(GeoPoint::parse("123.0, 2.0"), None);
    }

    #[test]
    fn test_projection_round_trip() {
        let p = GeoPoint::new(48.8566, 2.3522);
        let (x, y) = p.project(13);
        let back = GeoPoint::unproject(x, y, 13);
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lng - p.lng).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = paris_viewport();
        viewport.zoom = 19;
        viewport.zoom_in();
        assert_eq!(viewport.zoom, 19);

        viewport.zoom = 0;
        viewport.zoom_out();
        assert_eq!(viewport.zoom, 0);
    }

    #[test]
    fn test_fit_bounds_picks_largest_zoom() {
        let bounds = Bounds::enclosing(vec![
            GeoPoint::new(48.8566, 2.3522),
            GeoPoint::new(48.8606, 2.3376),
            GeoPoint::new(48.8530, 2.3499),
        ])
        .unwrap();
        let size = ViewportSize {
            width: 800,
            height: 384,
            padding: 50,
        };

        let mut viewport = paris_viewport();
        viewport.fit(&bounds, size);

        assert_eq!(viewport.zoom, 15);
        assert!(viewport.center.lat > 48.8530 && viewport.center.lat < 48.8606);
        assert!((viewport.center.lng - 2.3449).abs() < 1e-6);
    }

    #[test]
    fn test_fit_single_point_uses_max_zoom() {
        let bounds = Bounds::enclosing(vec![GeoPoint::new(48.8584, 2.2945)]).unwrap();
        let mut viewport = paris_viewport();
        viewport.fit(
            &bounds,
            ViewportSize {
                width: 800,
                height: 384,
                padding: 50,
            },
        );
        assert_eq!(viewport.zoom, 19);
        assert_eq!(viewport.center.display(), "48.8584, 2.2945");
    }
}
