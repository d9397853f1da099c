//! Fixed page furniture injected around the map.

/// Article credit, pinned to the top left.
pub const INFO_BOX: &str = r##"<div style="position: fixed; top: 12px; left: 70px; border: 0px; z-index: 9999; font-size: 13px; border-radius: 5px; background-color: #fff; padding: 8px; box-shadow: 0px 2px 4px #888; opacity: 0.85; width: calc(100% - 270px); max-width: 45em; overflow: auto; white-space: nowrap">
    <b style="font-size: 16px">Accompanying maps for "<a style="color: #e77500" href="https://pilotonline.com/opinion/columnist/guest/article_7a44a308-abb4-11e8-bec1-0361d680b78f.html">Lawmakers should fix inequitable district lines</a>"<br></b><b><em>The Virginian-Pilot</em>, August 30, 2018</b><br>
    Ben Williams, William T. Adler, and Samuel S.-H. Wang of the <a style="color: #e77500" href="http://gerrymander.princeton.edu/">Princeton Gerrymandering Project</a><br>
    Additional work by Connor Moffatt and Jacob Wachspress<br>
    More info <a style="color: #e77500" href="https://github.com/PrincetonUniversity/VA-gerrymander">here</a>
</div>"##;

/// Leaflet draws the newest layer on top, so overlays must be re-toggled
/// after switching base layers.
pub const NOTE_BOX: &str = r##"<div style="position: fixed; top: 12px; right: 200px; border: 0px; z-index: 9999; font-size: 13px; border-radius: 5px; background-color: #fff; padding: 8px; box-shadow: 0px 2px 4px #888; opacity: 1; width: 160px; max-width: 45em; overflow: auto; white-space: nowrap">
    <b style="font-size: 12px">Note: Due to Leaflet.js,<br>after selecting a <br>basemap (radio button),<br>overlay maps (checkbox)<br>must be reselected to be<br>displayed on top</b>
</div>"##;

/// Stops mobile browsers from zooming the page instead of the map.
pub const VIEWPORT_META: &str =
    r#"<meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />"#;
