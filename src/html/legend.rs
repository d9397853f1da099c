//! Legend selector and the five z-index-swapped legend panels.

use std::fmt::Write;

use anyhow::Result;

use crate::{
    choropleth::{Metric, NUM_BUCKETS, RAMP},
    config::MapConfig,
};

pub const LEGEND_CONTAINER_ID: &str = "Legend Container";

const PANEL_STYLE: &str = "position: fixed; bottom: 20px; right: 12px; border: 0px; font-size: 13px; border-radius: 5px; background-color: #fff; padding: 8px; box-shadow: 0px 2px 4px #888; opacity: 1; width: 160px; max-width: 45em; overflow: auto; white-space: nowrap";
const SELECTOR_STYLE: &str = "position: fixed; bottom: 240px; right: 12px; border: 0px; z-index: 10000; font-size: 13px; border-radius: 5px; background-color: #fff; padding: 8px; opacity: 1; width: 160px; max-width: 45em; overflow: auto; white-space: nowrap";
const BLANK_ROW: &str = "-------------------";

const Z_TOP: u32 = 9999;
const Z_BACK: u32 = 1000;
const Z_RESET: u32 = 1;

/// One legend panel and the radio button that raises it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendKind {
    None,
    Metric(Metric),
}

impl LegendKind {
    /// Radio buttons in selector order; the first one is checked.
    pub const SELECTOR_ORDER: [LegendKind; 5] = [
        LegendKind::None,
        LegendKind::Metric(Metric::Pop),
        LegendKind::Metric(Metric::Vap),
        LegendKind::Metric(Metric::Bvap),
        LegendKind::Metric(Metric::PropBvap),
    ];

    /// Panels in DOM order; the last one starts on top.
    pub const PANEL_ORDER: [LegendKind; 5] = [
        LegendKind::Metric(Metric::PropBvap),
        LegendKind::Metric(Metric::Pop),
        LegendKind::Metric(Metric::Bvap),
        LegendKind::Metric(Metric::Vap),
        LegendKind::None,
    ];

    pub fn element_id(&self) -> &'static str {
        match self {
            LegendKind::None => "Legend None",
            LegendKind::Metric(Metric::Pop) => "Legend POP",
            LegendKind::Metric(Metric::Vap) => "Legend VAP",
            LegendKind::Metric(Metric::Bvap) => "Legend BVAP",
            LegendKind::Metric(Metric::PropBvap) => "Legend Proportion BVAP",
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            LegendKind::None => "showNone",
            LegendKind::Metric(Metric::Pop) => "showPOP",
            LegendKind::Metric(Metric::Vap) => "showVAP",
            LegendKind::Metric(Metric::Bvap) => "showBVAP",
            LegendKind::Metric(Metric::PropBvap) => "showPropBVAP",
        }
    }

    fn selector_label(&self) -> &'static str {
        match self {
            LegendKind::None => "OpenStreetMap",
            LegendKind::Metric(metric) => metric.label(),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            LegendKind::None => "None",
            LegendKind::Metric(metric) => metric.label(),
        }
    }

    fn rows(&self, config: &MapConfig) -> Vec<String> {
        match self {
            LegendKind::None => vec![BLANK_ROW.to_string(); NUM_BUCKETS],
            LegendKind::Metric(metric) => config.scale(*metric).legend_labels(metric.legend_decimals()),
        }
    }

    fn initial_z_index(&self) -> u32 {
        match self {
            LegendKind::None => Z_TOP,
            LegendKind::Metric(_) => Z_BACK,
        }
    }
}

fn write_selector(out: &mut String) -> Result<()> {
    writeln!(out, r#"<div id="Legend Selector" style="{SELECTOR_STYLE}">"#)?;
    writeln!(out, r#"    <font size="2">Select Legend Type</font><br>"#)?;
    for (i, kind) in LegendKind::SELECTOR_ORDER.iter().enumerate() {
        let checked = if i == 0 { r#" checked="checked""# } else { "" };
        writeln!(out, r#"    <input type="radio" name="rd1" onchange="{}()"{checked}>{}<br>"#,
            kind.function_name(), kind.selector_label())?;
    }
    writeln!(out, "</div>")?;
    Ok(())
}

fn write_panel_style(out: &mut String) -> Result<()> {
    writeln!(out, "    <style>")?;
    writeln!(out, "    .legend {{ list-style: none; padding-left: 0; }}")?;
    writeln!(out, "    .legend li {{ float: left; margin-right: 2px; }}")?;
    writeln!(out, "    .legend span {{ border: 1px solid #ccc; float: left; width: 12px; height: 12px; margin: 2px; }}")?;
    for (i, color) in RAMP.iter().enumerate() {
        writeln!(out, "    .legend .choro{} {{ background-color: {color}; }}", i + 1)?;
    }
    writeln!(out, "    </style>")?;
    Ok(())
}

fn write_panel(out: &mut String, kind: LegendKind, config: &MapConfig) -> Result<()> {
    writeln!(out, r#"<div id="{}" style="{PANEL_STYLE}; z-index: {}">"#, kind.element_id(), kind.initial_z_index())?;
    write_panel_style(out)?;
    writeln!(out, r#"    <font size="5">Legend</font><br>"#)?;
    writeln!(out, r#"    <font size="3" id="Legend Title">{}</font><br>"#, kind.title())?;
    writeln!(out, r#"    <ul class="legend">"#)?;
    for (i, row) in kind.rows(config).iter().enumerate() {
        writeln!(out, r#"      <li><span class="choro{}"></span> {row}</li><br>"#, i + 1)?;
    }
    writeln!(out, "    </ul>")?;
    writeln!(out, "</div>")?;
    Ok(())
}

/// Legend container: the selector first, then every panel.
pub fn legend_box(config: &MapConfig) -> Result<String> {
    let mut out = String::new();
    writeln!(out, r#"<div id="{LEGEND_CONTAINER_ID}">"#)?;
    write_selector(&mut out)?;
    for kind in LegendKind::PANEL_ORDER {
        write_panel(&mut out, kind, config)?;
    }
    writeln!(out, "</div>")?;
    Ok(out)
}

/// One `show*` function per radio button. Each lowers every panel (the
/// selector at index 0 is skipped) and raises its own.
pub fn legend_script() -> String {
    let mut out = String::from("<script>\n");
    for kind in LegendKind::SELECTOR_ORDER {
        out.push_str(&format!(
            r#"function {name}() {{
    var children = document.getElementById("{LEGEND_CONTAINER_ID}").children;
    for (var i = 1; i < children.length; i++) {{
        children[i].style.zIndex = "{Z_RESET}";
    }}
    document.getElementById("{id}").style.zIndex = "{Z_TOP}";
}}
"#,
            name = kind.function_name(),
            id = kind.element_id(),
        ));
    }
    out.push_str("</script>");
    out
}
