//! In-page overlay: a self-contained HTML panel injected into the analyzed
//! page, and the geometry for dragging it.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use tracing::debug;

use brandlens_config::Settings;
use brandlens_protocols::types::AnalysisResult;

/// Element id of the injected panel.
pub const OVERLAY_ID: &str = "brandlens-overlay";

const START_MARKER: &str = "<!--brandlens-overlay-->";
const END_MARKER: &str = "<!--/brandlens-overlay-->";

/// A position in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width and height in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An in-progress drag. Holds where the pointer grabbed the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    offset: Point,
}

impl DragState {
    /// Begin dragging a panel at `origin` with the pointer at `pointer`.
    pub fn start(pointer: Point, origin: Point) -> Self {
        Self {
            offset: Point::new(pointer.x - origin.x, pointer.y - origin.y),
        }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// New panel origin for the pointer at `pointer`, clamped so the panel
    /// stays inside the viewport. A panel larger than the viewport is
    /// pinned to 0 on that axis.
    pub fn drag_to(&self, pointer: Point, viewport: Size, panel: Size) -> Point {
        Point::new(
            clamp_axis(pointer.x - self.offset.x, viewport.width, panel.width),
            clamp_axis(pointer.y - self.offset.y, viewport.height, panel.height),
        )
    }
}

fn clamp_axis(position: i32, viewport: i32, panel: i32) -> i32 {
    let max = (viewport - panel).max(0);
    position.clamp(0, max)
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The analysis panel, positioned from the overlay settings.
pub fn render_panel(result: &AnalysisResult, settings: &Settings) -> String {
    let brand = result.brand();
    let mut body = String::new();

    if let Some(archetype) = &brand.archetype {
        let _ = write!(
            body,
            r#"<p class="bl-archetype"><strong>{}</strong>"#,
            escape_html(&archetype.primary)
        );
        if let Some(secondary) = &archetype.secondary {
            let _ = write!(body, " / {}", escape_html(secondary));
        }
        if let Some(confidence) = archetype.confidence {
            let _ = write!(body, " <span>{}%</span>", confidence);
        }
        body.push_str("</p>");
    }

    if !brand.tone_scores.is_empty() {
        body.push_str(r#"<ul class="bl-tone">"#);
        for (axis, score) in &brand.tone_scores {
            let _ = write!(
                body,
                r#"<li><span>{axis}</span><div class="bl-bar"><div style="width:{score}%"></div></div><span>{score}</span></li>"#,
                axis = escape_html(axis),
                score = score
            );
        }
        body.push_str("</ul>");
    }

    if !brand.summary.is_empty() {
        let _ = write!(body, "<p>{}</p>", escape_html(&brand.summary));
    }
    if !brand.keywords.is_empty() {
        let keywords: Vec<String> = brand.keywords.iter().map(|k| escape_html(k)).collect();
        let _ = write!(body, r#"<p class="bl-keywords">{}</p>"#, keywords.join(" · "));
    }
    write_list(&mut body, "Recommendations", &brand.recommendations);

    if brand.is_empty() {
        body.push_str("<p>The reply had no recognized fields.</p>");
    }

    wrap_panel(&body, settings)
}

/// A panel showing a single message, used for errors and empty pages.
pub fn render_status_panel(message: &str, settings: &Settings) -> String {
    wrap_panel(&format!("<p>{}</p>", escape_html(message)), settings)
}

fn write_list(body: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = write!(body, "<h4>{}</h4><ul>", escape_html(title));
    for item in items {
        let _ = write!(body, "<li>{}</li>", escape_html(item));
    }
    body.push_str("</ul>");
}

fn wrap_panel(body: &str, settings: &Settings) -> String {
    format!(
        r#"{start}
<div id="{id}" style="position:fixed;left:{x}px;top:{y}px;width:{w}px;z-index:2147483647;background:#fff;color:#222;border:1px solid #ccc;border-radius:8px;box-shadow:0 4px 16px rgba(0,0,0,.2);font:13px/1.4 system-ui,sans-serif;">
<style>
#{id} .bl-handle{{cursor:move;padding:8px 12px;background:#1f2937;color:#fff;border-radius:8px 8px 0 0;font-weight:600;user-select:none}}
#{id} .bl-body{{padding:8px 12px;max-height:60vh;overflow:auto}}
#{id} .bl-tone{{list-style:none;padding:0}}
#{id} .bl-tone li{{display:flex;gap:6px;align-items:center}}
#{id} .bl-bar{{flex:1;height:8px;background:#e5e7eb;border-radius:4px}}
#{id} .bl-bar div{{height:8px;background:#2563eb;border-radius:4px}}
</style>
<div class="bl-handle">BrandLens</div>
<div class="bl-body">{body}</div>
<script>
(function(){{
var p=document.getElementById("{id}"),h=p.querySelector(".bl-handle"),o=null;
h.addEventListener("pointerdown",function(e){{var r=p.getBoundingClientRect();o={{x:e.clientX-r.left,y:e.clientY-r.top}};h.setPointerCapture(e.pointerId);}});
h.addEventListener("pointermove",function(e){{if(!o)return;
var mx=Math.max(0,window.innerWidth-p.offsetWidth),my=Math.max(0,window.innerHeight-p.offsetHeight);
p.style.left=Math.min(Math.max(0,e.clientX-o.x),mx)+"px";p.style.top=Math.min(Math.max(0,e.clientY-o.y),my)+"px";}});
h.addEventListener("pointerup",function(){{o=null;}});
}})();
</script>
</div>
{end}"#,
        start = START_MARKER,
        end = END_MARKER,
        id = OVERLAY_ID,
        x = settings.overlay_x.max(0),
        y = settings.overlay_y.max(0),
        w = settings.overlay_width,
        body = body,
    )
}

/// Remove a previously injected panel. Returns the input unchanged when
/// there is none.
pub fn remove_overlay(html: &str) -> String {
    let Some(start) = html.find(START_MARKER) else {
        return html.to_string();
    };
    let Some(end) = html[start..].find(END_MARKER).map(|i| start + i + END_MARKER.len()) else {
        return html.to_string();
    };
    let mut out = String::with_capacity(html.len());
    out.push_str(&html[..start]);
    out.push_str(&html[end..]);
    out
}

/// Insert `panel` before the closing `</body>`, or append it when the page
/// has none. Any earlier panel is removed first.
pub fn inject_overlay(html: &str, panel: &str) -> String {
    let html = remove_overlay(html);
    // ASCII lowercasing keeps byte offsets stable.
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len() + panel.len());
    match lower.rfind("</body>") {
        Some(at) => {
            out.push_str(&html[..at]);
            out.push_str(panel);
            out.push_str(&html[at..]);
        }
        None => {
            debug!("No </body> in page, appending overlay");
            out.push_str(&html);
            out.push_str(panel);
        }
    }
    out
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
