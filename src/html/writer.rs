//! HTML document writing for interactive maps.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::map::{GeoJsonLayer, InteractiveMap, LayerKind, TileLayer, Tooltip};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const MAP_ID: &str = "map_0";

/// Writes a self-contained Leaflet page to any sink.
pub struct HtmlWriter<W: Write> {
    writer: W,
}

impl<W: Write> Write for HtmlWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }
}

impl HtmlWriter<Vec<u8>> {
    /// Get the rendered document.
    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.writer)
            .context("[html] document is not valid UTF-8")
    }
}

impl<W: Write> HtmlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W { self.writer }

    /// Header, body, map script and footer, in that order.
    pub fn write_document(&mut self, map: &InteractiveMap) -> Result<()> {
        self.write_header(map)?;
        self.write_body(map)?;
        self.write_map_script(map)?;
        self.write_footer(map)
    }

    /// Doctype and `<head>`, with Leaflet and any extra header elements.
    pub fn write_header(&mut self, map: &InteractiveMap) -> Result<()> {
        writeln!(self, "<!DOCTYPE html>")?;
        writeln!(self, "<html>")?;
        writeln!(self, "<head>")?;
        writeln!(self, r#"    <meta http-equiv="content-type" content="text/html; charset=UTF-8" />"#)?;
        writeln!(self, r#"    <link rel="stylesheet" href="{LEAFLET_CSS}"/>"#)?;
        writeln!(self, r#"    <script src="{LEAFLET_JS}"></script>"#)?;
        writeln!(self, "    <style>html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}</style>")?;
        writeln!(self, "    <style>#{MAP_ID} {{ position: absolute; top: 0; bottom: 0; right: 0; left: 0; }}</style>")?;
        for element in map.header() {
            writeln!(self, "    {element}")?;
        }
        writeln!(self, "</head>")?;
        Ok(())
    }

    /// Map container followed by the injected page elements.
    pub fn write_body(&mut self, map: &InteractiveMap) -> Result<()> {
        writeln!(self, "<body>")?;
        writeln!(self, r#"<div id="{MAP_ID}"></div>"#)?;
        for element in map.html() {
            writeln!(self, "{element}")?;
        }
        Ok(())
    }

    /// The Leaflet map, every layer, the layer control and the initial view.
    pub fn write_map_script(&mut self, map: &InteractiveMap) -> Result<()> {
        writeln!(self, "<script>")?;
        write_helpers(self)?;

        writeln!(self, "var {MAP_ID} = L.map({}, {{ maxBounds: {}, zoomControl: true }});",
            to_js(&MAP_ID)?, to_js(&map.bounds().to_latlng_pairs())?)?;
        writeln!(self, "L.control.scale().addTo({MAP_ID});")?;

        let mut base_layers = Vec::new();
        let mut overlays = Vec::new();

        for (i, layer) in map.layers().iter().enumerate() {
            let var = format!("geo_json_{}", i + 1);
            write_geojson_layer(self, &var, layer)?;
            match layer.kind {
                LayerKind::Base => base_layers.push((layer.name.as_str(), var)),
                LayerKind::Overlay => overlays.push((layer.name.as_str(), var)),
                LayerKind::Fixed => {}
            }
        }

        for (i, tiles) in map.tiles().iter().enumerate() {
            let var = format!("tile_layer_{}", i + 1);
            write_tile_layer(self, &var, tiles)?;
            if tiles.in_control {
                base_layers.push(("OpenStreetMap", var));
            }
        }

        write_layer_control(self, &base_layers, &overlays)?;

        writeln!(self, "{MAP_ID}.fitBounds({});", to_js(&map.bounds().to_latlng_pairs())?)?;
        writeln!(self, "</script>")?;
        Ok(())
    }

    /// Trailing scripts and the closing tags.
    pub fn write_footer(&mut self, map: &InteractiveMap) -> Result<()> {
        for script in map.scripts() {
            writeln!(self, "{script}")?;
        }
        writeln!(self, "</body>")?;
        writeln!(self, "</html>")?;
        Ok(())
    }
}

/// Serialize a value for inlining into a `<script>` block.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn write_helpers<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, r#"function styleOf(feature) {{ return feature.properties.style; }}
function bindHighlight(feature, layer) {{
    if (!feature.properties.highlight) {{ return; }}
    layer.on({{
        mouseover: function (e) {{ e.target.setStyle(feature.properties.highlight); }},
        mouseout: function (e) {{ e.target.setStyle(feature.properties.style); }},
    }});
}}
function fieldTooltip(fields, aliases) {{
    return function (layer) {{
        var props = layer.feature.properties;
        var rows = fields.map(function (field, i) {{
            return "<tr><th>" + aliases[i] + "</th><td>" + props[field] + "</td></tr>";
        }});
        return "<table>" + rows.join("") + "</table>";
    }};
}}"#)?;
    Ok(())
}

fn write_geojson_layer<W: Write>(writer: &mut W, var: &str, layer: &GeoJsonLayer) -> Result<()> {
    writeln!(writer, "var {var} = L.geoJson({}, {{ style: styleOf, onEachFeature: bindHighlight }});",
        to_js(&layer.to_feature_collection())?)?;

    match &layer.tooltip {
        Tooltip::None => {}
        Tooltip::Fields { fields, aliases } => writeln!(writer,
            "{var}.bindTooltip(fieldTooltip({}, {}), {{ sticky: true }});", to_js(fields)?, to_js(aliases)?)?,
        Tooltip::Text(text) => writeln!(writer,
            "{var}.bindTooltip({}, {{ sticky: true }});", to_js(text)?)?,
    }

    if layer.show {
        writeln!(writer, "{var}.addTo({MAP_ID});")?;
    }
    Ok(())
}

fn write_tile_layer<W: Write>(writer: &mut W, var: &str, tiles: &TileLayer) -> Result<()> {
    writeln!(writer, "var {var} = L.tileLayer({}, {{ minZoom: {}, maxZoom: {}, attribution: {} }}).addTo({MAP_ID});",
        to_js(&tiles.url)?, tiles.min_zoom, tiles.max_zoom, to_js(&tiles.attribution)?)?;
    Ok(())
}

fn write_layer_control<W: Write>(writer: &mut W, base_layers: &[(&str, String)], overlays: &[(&str, String)]) -> Result<()> {
    let entries = |layers: &[(&str, String)]| -> Result<String> {
        Ok(layers.iter()
            .map(|(name, var)| Ok(format!("        {}: {var},", to_js(name)?)))
            .collect::<Result<Vec<_>>>()?
            .join("\n"))
    };

    writeln!(writer, "var layer_control = {{")?;
    writeln!(writer, "    base_layers: {{\n{}\n    }},", entries(base_layers)?)?;
    writeln!(writer, "    overlays: {{\n{}\n    }},", entries(overlays)?)?;
    writeln!(writer, "}};")?;
    writeln!(writer, "L.control.layers(layer_control.base_layers, layer_control.overlays, {{ collapsed: false }}).addTo({MAP_ID});")?;
    Ok(())
}
