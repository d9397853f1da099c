use std::{io::Write, path::Path};

use anyhow::{ensure, Context, Result};
use tracing::{debug, warn};

use crate::{
    choropleth::{Metric, TractLayer},
    common,
    config::{Bounds, MapConfig},
    district::DistrictLayer,
    html::{self, HtmlWriter},
};
use super::{GeoJsonLayer, LayerKind, TileLayer};

/// A Leaflet page: an ordered layer stack plus page furniture around it.
#[derive(Debug, Clone)]
pub struct InteractiveMap {
    bounds: Bounds,
    layers: Vec<GeoJsonLayer>,
    tiles: Vec<TileLayer>,
    header: Vec<String>,
    html: Vec<String>,
    scripts: Vec<String>,
}

impl InteractiveMap {
    /// Empty map locked to `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds, layers: Vec::new(), tiles: Vec::new(), header: Vec::new(), html: Vec::new(), scripts: Vec::new() }
    }

    /// Stack every layer and page element in drawing order.
    pub fn assemble(config: &MapConfig, districts: &[DistrictLayer], tracts: &TractLayer) -> Result<Self> {
        let mut map = Self::new(config.bounds);

        for layer in districts {
            map.add_layer(GeoJsonLayer::district_fill(layer)?);
        }
        for layer in districts {
            map.add_layer(GeoJsonLayer::district_outline(layer)?);
        }

        map.add_layer(GeoJsonLayer::basemap_proxy(tracts)?);
        for metric in Metric::ALL {
            map.add_layer(GeoJsonLayer::choropleth(tracts, metric, config.scale(metric))?);
            debug!("[map] added {} base layer", metric.layer_name());
        }

        match districts.iter().find_map(DistrictLayer::mask) {
            Some(mask) => map.add_layer(GeoJsonLayer::mask(mask)?),
            None => warn!("[map] no source is marked as mask; non-affected districts stay uncovered"),
        }

        map.add_tile_layer(TileLayer::openstreetmap());

        map.add_html_element(html::INFO_BOX.to_string());
        map.add_html_element(html::NOTE_BOX.to_string());
        map.add_html_element(html::legend_box(config)?);
        map.add_script(html::legend_script());
        map.add_header_element(html::VIEWPORT_META.to_string());

        Ok(map)
    }

    pub fn add_layer(&mut self, layer: GeoJsonLayer) { self.layers.push(layer) }

    pub fn add_tile_layer(&mut self, tiles: TileLayer) { self.tiles.push(tiles) }

    /// Raw markup appended to `<head>`.
    pub fn add_header_element(&mut self, element: String) { self.header.push(element) }

    /// Raw markup appended to `<body>` after the map container.
    pub fn add_html_element(&mut self, element: String) { self.html.push(element) }

    /// Raw `<script>` block appended after the map script.
    pub fn add_script(&mut self, script: String) { self.scripts.push(script) }

    #[inline] pub fn bounds(&self) -> &Bounds { &self.bounds }

    #[inline] pub fn layers(&self) -> &[GeoJsonLayer] { &self.layers }

    #[inline] pub fn tiles(&self) -> &[TileLayer] { &self.tiles }

    #[inline] pub fn header(&self) -> &[String] { &self.header }

    #[inline] pub fn html(&self) -> &[String] { &self.html }

    #[inline] pub fn scripts(&self) -> &[String] { &self.scripts }

    /// Every layer the page registers with Leaflet, tiles included.
    pub fn registered_layers(&self) -> usize { self.layers.len() + self.tiles.len() }

    /// Names listed in the layer control, overlays first then base layers.
    pub fn control_entries(&self) -> Vec<(&str, LayerKind)> {
        let listed = |kind: LayerKind| self.layers.iter()
            .filter(move |layer| layer.in_control() && layer.kind == kind)
            .map(|layer| (layer.name.as_str(), layer.kind));

        listed(LayerKind::Overlay).chain(listed(LayerKind::Base)).collect()
    }

    /// Render the complete HTML document.
    pub fn render(&self) -> Result<String> {
        let mut writer = HtmlWriter::new(Vec::new());
        writer.write_document(self)?;
        writer.into_string()
    }

    /// Write the document to `path`, replacing an existing file only with `force`.
    pub fn save(&self, path: &Path, force: bool) -> Result<()> {
        ensure!(self.layers.iter().filter(|layer| layer.kind == LayerKind::Base && layer.show).count() <= 1,
            "[map] more than one base layer is shown");

        let document = self.render()?;
        let mut pending = common::open_for_write(path, force)?;
        pending.write_all(document.as_bytes())
            .with_context(|| format!("[map] Failed to write {}", path.display()))?;
        common::finalize_write(pending)
    }
}
