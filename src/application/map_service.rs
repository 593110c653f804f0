// Map service - Viewport state and markers built from the collection point store
use crate::application::entity_service::EntityService;
use crate::domain::collection_point::CollectionPoint;
use crate::domain::map::{
    legend, Bounds, GeoPoint, LegendEntry, MapMarker, PointDetails, Viewport, ViewportSize,
};
use crate::infrastructure::config::MapSettings;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("collection point {0} has no map marker")]
    UnknownPoint(u32),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

/// Stylesheet and script the client loads before drawing the map
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapAssets {
    pub stylesheet: String,
    pub script: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub title: String,
    pub tiles: TileLayer,
    pub assets: MapAssets,
    pub viewport: Viewport,
    pub markers: Vec<MapMarker>,
    pub legend: Vec<LegendEntry>,
    pub selected: Option<PointDetails>,
}

struct MapState {
    viewport: Viewport,
    selected: Option<u32>,
}

#[derive(Clone)]
pub struct MapService {
    settings: MapSettings,
    points: EntityService<CollectionPoint>,
    state: Arc<Mutex<MapState>>,
}

impl MapService {
    pub fn new(settings: MapSettings, points: EntityService<CollectionPoint>) -> Self {
        let viewport = Viewport {
            center: GeoPoint::new(settings.center_lat, settings.center_lng),
            zoom: settings.zoom.clamp(settings.min_zoom, settings.max_zoom),
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
        };
        Self {
            settings,
            points,
            state: Arc::new(Mutex::new(MapState {
                viewport,
                selected: None,
            })),
        }
    }

    async fn markers(&self, selected: Option<u32>) -> Vec<MapMarker> {
        self.points
            .all()
            .await
            .iter()
            .filter_map(|point| {
                let marker = MapMarker::from_point(point, selected);
                if marker.is_none() {
                    tracing::warn!(
                        "Skipping collection point {} with location {:?}",
                        point.id,
                        point.location
                    );
                }
                marker
            })
            .collect()
    }

    pub async fn view(&self) -> MapView {
        let (viewport, selected) = {
            let state = self.state.lock().await;
            (state.viewport, state.selected)
        };

        let markers = self.markers(selected).await;
        let selected = markers
            .iter()
            .find(|m| m.selected)
            .map(PointDetails::from);

        MapView {
            title: "Map View".to_string(),
            tiles: TileLayer {
                url: self.settings.tile_url.clone(),
                attribution: self.settings.attribution.clone(),
            },
            assets: MapAssets {
                stylesheet: self.settings.stylesheet_url.clone(),
                script: self.settings.script_url.clone(),
            },
            viewport,
            markers,
            legend: legend(),
            selected,
        }
    }

    pub async fn zoom_in(&self) -> MapView {
        self.state.lock().await.viewport.zoom_in();
        self.view().await
    }

    pub async fn zoom_out(&self) -> MapView {
        self.state.lock().await.viewport.zoom_out();
        self.view().await
    }

    /// Fit the viewport to every plotted marker; a no-op when there are none
    pub async fn fit_bounds(&self) -> MapView {
        let markers = self.markers(None).await;
        match Bounds::enclosing(markers.iter().map(|m| m.position)) {
            Some(bounds) => {
                let size = ViewportSize {
                    width: self.settings.viewport_width,
                    height: self.settings.viewport_height,
                    padding: self.settings.fit_padding,
                };
                let mut state = self.state.lock().await;
                state.viewport.fit(&bounds, size);
                tracing::debug!(
                    "Fitted {} markers at zoom {}",
                    markers.len(),
                    state.viewport.zoom
                );
            }
            None => tracing::debug!("No markers to fit"),
        }
        self.view().await
    }

    /// Highlight a point; the viewport stays where it is
    pub async fn select(&self, id: u32) -> Result<MapView, MapError> {
        let markers = self.markers(None).await;
        if !markers.iter().any(|m| m.id == id) {
            return Err(MapError::UnknownPoint(id));
        }

        self.state.lock().await.selected = Some(id);
        Ok(self.view().await)
    }
}
