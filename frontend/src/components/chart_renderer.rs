//! Inline SVG charts.
//!
//! Every chart is built as an HTML string by a pure function and mounted by
//! [`Chart`], so the geometry can be unit tested without a browser.

use std::f64::consts::PI;

use shared::format::{format_fixed, format_number};
use shared::insights::engagement::GameNetwork;
use shared::insights::pivot::PivotTable;
use web_sys::HtmlElement;
use yew::prelude::*;

pub const PALETTE: [&str; 8] = [
    "#9945FF", "#14F195", "#00C2FF", "#FFB800", "#FF4444", "#EC4899", "#3B82F6", "#84CC16",
];

pub fn palette(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 44.0;
const LABEL_CHARS: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self { width: 640.0, height: 320.0 }
    }
}

impl ChartSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn plot_width(&self) -> f64 {
        (self.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0)
    }

    fn baseline(&self) -> f64 {
        MARGIN_TOP + self.plot_height()
    }
}

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    pub svg: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// Mounts a pre-rendered chart string.
#[function_component(Chart)]
pub fn chart(props: &ChartProps) -> Html {
    let container = use_node_ref();

    {
        let container = container.clone();
        use_effect_with(props.svg.clone(), move |svg| {
            if let Some(element) = container.cast::<HtmlElement>() {
                element.set_inner_html(svg);
            }
            || ()
        });
    }

    html! {
        <div class={classes!("chart-container", props.class.clone())} ref={container}></div>
    }
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn short_label(label: &str) -> String {
    if label.chars().count() <= LABEL_CHARS {
        escape_html(label)
    } else {
        let head: String = label.chars().take(LABEL_CHARS - 1).collect();
        format!("{}…", escape_html(&head))
    }
}

/// `value` as a length within `span`, proportional to `max`.
pub fn scale(value: f64, max: f64, span: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        0.0
    } else {
        (value / max).clamp(0.0, 1.0) * span
    }
}

pub fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

fn empty_chart(message: &str) -> String {
    format!("<div class=\"chart-empty\">{}</div>", escape_html(message))
}

fn svg_open(size: ChartSize) -> String {
    format!(
        r#"<svg class="chart-svg" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid meet" role="img">"#,
        size.width, size.height
    )
}

fn legend(names: &[(String, &str)]) -> String {
    let items: String = names
        .iter()
        .map(|(name, color)| {
            format!(
                r#"<div class="legend-item"><span class="legend-color" style="background-color: {}"></span><span class="legend-label">{}</span></div>"#,
                color,
                escape_html(name)
            )
        })
        .collect();
    format!("<div class=\"chart-legend\">{}</div>", items)
}

fn y_grid(size: ChartSize, max: f64) -> String {
    let mut out = String::from("<g class=\"chart-grid\">");
    for step in 0..=4 {
        let fraction = step as f64 / 4.0;
        let y = size.baseline() - fraction * size.plot_height();
        out.push_str(&format!(
            r##"<line x1="{}" y1="{:.1}" x2="{}" y2="{:.1}" stroke="rgba(255,255,255,0.08)" stroke-width="1"/><text x="{}" y="{:.1}" text-anchor="end" class="axis-label">{}</text>"##,
            MARGIN_LEFT,
            y,
            size.width - MARGIN_RIGHT,
            y,
            MARGIN_LEFT - 6.0,
            y + 4.0,
            format_number((max * fraction).round())
        ));
    }
    out.push_str("</g>");
    out
}

/// Horizontal positions of `count` evenly spaced category slots.
/// Returns `(slot_start, slot_width)` per index.
pub fn band_slots(count: usize, size: ChartSize) -> Vec<(f64, f64)> {
    if count == 0 {
        return Vec::new();
    }
    let width = size.plot_width() / count as f64;
    (0..count)
        .map(|i| (MARGIN_LEFT + i as f64 * width, width))
        .collect()
}

fn x_labels(labels: &[String], slots: &[(f64, f64)], size: ChartSize) -> String {
    // Thin the labels out so they never overlap.
    let every = (labels.len() / 12).max(1);
    labels
        .iter()
        .zip(slots)
        .enumerate()
        .filter(|(i, _)| i % every == 0)
        .map(|(_, (label, (x, w)))| {
            format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" class="axis-label">{}</text>"#,
                x + w / 2.0,
                size.baseline() + 18.0,
                short_label(label)
            )
        })
        .collect()
}

/// Vertical bars, one per point.
pub fn bar_chart(points: &[(String, f64)], size: ChartSize) -> String {
    if points.is_empty() {
        return empty_chart("No data available");
    }
    let max = points.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let slots = band_slots(points.len(), size);
    let labels: Vec<String> = points.iter().map(|(l, _)| l.clone()).collect();

    let bars: String = points
        .iter()
        .zip(&slots)
        .enumerate()
        .map(|(i, ((label, value), (x, w)))| {
            let height = scale(*value, max, size.plot_height());
            format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="3" fill="{}" class="bar"><title>{}: {}</title></rect>"#,
                x + w * 0.15,
                size.baseline() - height,
                w * 0.7,
                height,
                palette(i),
                escape_html(label),
                format_number(*value)
            )
        })
        .collect();

    format!(
        "<div class=\"chart-wrapper\">{}{}{}{}</svg></div>",
        svg_open(size),
        y_grid(size, max),
        bars,
        x_labels(&labels, &slots, size)
    )
}

/// Ranked horizontal bars with the label on the left and the value on the right.
pub fn horizontal_bar_chart(points: &[(String, f64)], size: ChartSize) -> String {
    if points.is_empty() {
        return empty_chart("No data available");
    }
    let label_width = 140.0;
    let value_width = 64.0;
    let span = (size.width - label_width - value_width).max(1.0);
    let row = (size.height - MARGIN_TOP) / points.len() as f64;
    let max = points.iter().map(|(_, v)| *v).fold(0.0, f64::max);

    let rows: String = points
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let y = MARGIN_TOP + i as f64 * row;
            let length = scale(*value, max, span);
            format!(
                r#"<g class="hbar"><text x="{:.1}" y="{:.1}" text-anchor="end" class="axis-label">{}</text><rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="3" fill="{}"><title>{}</title></rect><text x="{:.1}" y="{:.1}" class="bar-value">{}</text></g>"#,
                label_width - 8.0,
                y + row / 2.0 + 4.0,
                short_label(label),
                label_width,
                y + row * 0.2,
                length,
                row * 0.6,
                palette(i),
                escape_html(label),
                label_width + length + 6.0,
                y + row / 2.0 + 4.0,
                format_number(*value)
            )
        })
        .collect();

    format!("<div class=\"chart-wrapper\">{}{}</svg></div>", svg_open(size), rows)
}

/// One stacked column per pivot key, one colour per series.
pub fn stacked_bar_chart(pivot: &PivotTable, labels: &[String], size: ChartSize) -> String {
    if pivot.is_empty() {
        return empty_chart("No data available");
    }
    let max = pivot.max_key_total();
    let slots = band_slots(pivot.keys.len(), size);

    let mut columns = String::new();
    for (k, (x, w)) in slots.iter().enumerate() {
        let mut top = size.baseline();
        for (s, series) in pivot.series.iter().enumerate() {
            let value = series.values.get(k).copied().unwrap_or(0.0);
            let height = scale(value, max, size.plot_height());
            if height <= 0.0 {
                continue;
            }
            top -= height;
            columns.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{} {}: {}</title></rect>"#,
                x + w * 0.15,
                top,
                w * 0.7,
                height,
                palette(s),
                escape_html(&series.name),
                escape_html(labels.get(k).unwrap_or(&pivot.keys[k])),
                format_number(value)
            ));
        }
    }

    let names: Vec<(String, &str)> = pivot
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| (s.name.clone(), palette(i)))
        .collect();

    format!(
        "<div class=\"chart-wrapper\">{}{}{}{}</svg>{}</div>",
        svg_open(size),
        y_grid(size, max),
        columns,
        x_labels(labels, &slots, size),
        legend(&names)
    )
}

/// Polyline vertices for `values` across the plot area.
pub fn line_points(values: &[f64], max: f64, size: ChartSize) -> Vec<(f64, f64)> {
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if n > 1 {
                MARGIN_LEFT + i as f64 * size.plot_width() / (n - 1) as f64
            } else {
                MARGIN_LEFT + size.plot_width() / 2.0
            };
            (x, size.baseline() - scale(*v, max, size.plot_height()))
        })
        .collect()
}

/// One line per series over shared x labels.
pub fn line_chart(labels: &[String], series: &[(String, Vec<f64>)], size: ChartSize) -> String {
    if labels.is_empty() || series.is_empty() {
        return empty_chart("No data available");
    }
    let max = series
        .iter()
        .flat_map(|(_, values)| values.iter().copied())
        .fold(0.0, f64::max);

    let mut lines = String::new();
    for (s, (name, values)) in series.iter().enumerate() {
        let points = line_points(values, max, size);
        let path: Vec<String> = points
            .iter()
            .enumerate()
            .map(|(i, (x, y))| format!("{}{:.1} {:.1}", if i == 0 { "M" } else { "L" }, x, y))
            .collect();
        lines.push_str(&format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="2" class="line-series" data-series="{}"/>"#,
            path.join(" "),
            palette(s),
            escape_html(name)
        ));
        for ((x, y), value) in points.iter().zip(values) {
            lines.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"><title>{}: {}</title></circle>"#,
                x,
                y,
                palette(s),
                escape_html(name),
                format_number(*value)
            ));
        }
    }

    // Labels sit under the vertices, not under band slots.
    let every = (labels.len() / 10).max(1);
    let ticks: String = line_points(&vec![0.0; labels.len()], 1.0, size)
        .iter()
        .zip(labels)
        .enumerate()
        .filter(|(i, _)| i % every == 0)
        .map(|(_, ((x, _), label))| {
            format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" class="axis-label">{}</text>"#,
                x,
                size.baseline() + 18.0,
                short_label(label)
            )
        })
        .collect();

    let names: Vec<(String, &str)> = series
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.clone(), palette(i)))
        .collect();

    format!(
        "<div class=\"chart-wrapper\">{}{}{}{}</svg>{}</div>",
        svg_open(size),
        y_grid(size, max),
        lines,
        ticks,
        legend(&names)
    )
}

/// Multi-line chart straight from a pivot, series as lines.
pub fn pivot_line_chart(pivot: &PivotTable, labels: &[String], size: ChartSize) -> String {
    let series: Vec<(String, Vec<f64>)> = pivot
        .series
        .iter()
        .map(|s| (s.name.clone(), s.values.clone()))
        .collect();
    line_chart(labels, &series, size)
}

/// Dash length and offset of each donut segment on a circle of
/// circumference `circumference`. Segments cover the circle exactly.
pub fn donut_segments(values: &[f64], circumference: f64) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut offset = 0.0;
    values
        .iter()
        .map(|v| {
            let length = if v.is_finite() && *v > 0.0 { v / total * circumference } else { 0.0 };
            let segment = (length, offset);
            offset += length;
            segment
        })
        .collect()
}

/// Donut with a legend showing each slice's share.
pub fn donut_chart(slices: &[(String, f64, &str)], size: ChartSize) -> String {
    let values: Vec<f64> = slices.iter().map(|(_, v, _)| *v).collect();
    let radius = (size.width.min(size.height) / 2.0 - 24.0).max(10.0);
    let circumference = 2.0 * PI * radius;
    let segments = donut_segments(&values, circumference);
    if segments.is_empty() {
        return empty_chart("No data available");
    }
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let (cx, cy) = (size.width / 2.0, size.height / 2.0);

    let arcs: String = slices
        .iter()
        .zip(&segments)
        .filter(|(_, (length, _))| *length > 0.0)
        .map(|((label, value, color), (length, offset))| {
            format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="none" stroke="{}" stroke-width="{:.1}" stroke-dasharray="{:.2} {:.2}" stroke-dashoffset="{:.2}" transform="rotate(-90 {:.1} {:.1})"><title>{}: {}</title></circle>"#,
                cx,
                cy,
                radius,
                color,
                radius * 0.4,
                length,
                circumference - length,
                -offset,
                cx,
                cy,
                escape_html(label),
                format_number(*value)
            )
        })
        .collect();

    let names: Vec<(String, &str)> = slices
        .iter()
        .map(|(label, value, color)| {
            (format!("{} ({}%)", label, format_fixed(value / total * 100.0, 1)), *color)
        })
        .collect();

    format!(
        r#"<div class="chart-wrapper">{}{}<text x="{:.1}" y="{:.1}" text-anchor="middle" class="donut-total">{}</text></svg>{}</div>"#,
        svg_open(size),
        arcs,
        cx,
        cy + 6.0,
        format_number(total),
        legend(&names)
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Bubble size in data units; equal sizes draw plain dots
    pub size: f64,
    pub color: String,
}

pub fn scatter_chart(points: &[ScatterPoint], x_label: &str, y_label: &str, size: ChartSize) -> String {
    if points.is_empty() {
        return empty_chart("No data available");
    }
    let max_x = points.iter().map(|p| p.x).fold(0.0, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(0.0, f64::max);
    let max_size = points.iter().map(|p| p.size).fold(0.0, f64::max);

    let dots: String = points
        .iter()
        .map(|p| {
            format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" fill-opacity="0.7"><title>{}: {} / {}</title></circle>"#,
                MARGIN_LEFT + scale(p.x, max_x, size.plot_width()),
                size.baseline() - scale(p.y, max_y, size.plot_height()),
                4.0 + scale(p.size, max_size, 20.0),
                p.color,
                escape_html(&p.label),
                format_number(p.x),
                format_number(p.y)
            )
        })
        .collect();

    format!(
        r#"<div class="chart-wrapper">{}{}{}<text x="{:.1}" y="{:.1}" text-anchor="middle" class="axis-title">{}</text><text x="14" y="{:.1}" text-anchor="middle" transform="rotate(-90, 14, {:.1})" class="axis-title">{}</text></svg></div>"#,
        svg_open(size),
        y_grid(size, max_y),
        dots,
        MARGIN_LEFT + size.plot_width() / 2.0,
        size.height - 6.0,
        escape_html(x_label),
        size.height / 2.0,
        size.height / 2.0,
        escape_html(y_label)
    )
}

/// Radar polygon vertices, first axis pointing up, clockwise.
pub fn radar_points(values: &[f64], max: f64, cx: f64, cy: f64, radius: f64) -> Vec<(f64, f64)> {
    let n = values.len().max(1) as f64;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| polar(cx, cy, scale(*v, max, radius), -PI / 2.0 + i as f64 * 2.0 * PI / n))
        .collect()
}

fn polygon(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn radar_chart(axes: &[&str], series: &[(String, Vec<f64>)], max: f64, size: ChartSize) -> String {
    if axes.is_empty() || series.is_empty() {
        return empty_chart("No data available");
    }
    let (cx, cy) = (size.width / 2.0, size.height / 2.0);
    let radius = (size.width.min(size.height) / 2.0 - 36.0).max(10.0);

    let mut out = svg_open(size);
    for ring in 1..=4 {
        let rim = radar_points(&vec![max * ring as f64 / 4.0; axes.len()], max, cx, cy, radius);
        out.push_str(&format!(
            r#"<polygon points="{}" fill="none" stroke="rgba(255,255,255,0.1)"/>"#,
            polygon(&rim)
        ));
    }
    let tips = radar_points(&vec![max; axes.len()], max, cx, cy, radius);
    for (axis, (x, y)) in axes.iter().zip(&tips) {
        let (lx, ly) = (cx + (x - cx) * 1.15, cy + (y - cy) * 1.15);
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="rgba(255,255,255,0.1)"/><text x="{:.1}" y="{:.1}" text-anchor="middle" class="axis-label">{}</text>"#,
            cx,
            cy,
            x,
            y,
            lx,
            ly + 4.0,
            escape_html(axis)
        ));
    }
    for (s, (name, values)) in series.iter().enumerate() {
        out.push_str(&format!(
            r#"<polygon points="{}" fill="{}" fill-opacity="0.2" stroke="{}" stroke-width="2"><title>{}</title></polygon>"#,
            polygon(&radar_points(values, max, cx, cy, radius)),
            palette(s),
            palette(s),
            escape_html(name)
        ));
    }
    out.push_str("</svg>");

    let names: Vec<(String, &str)> = series
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.clone(), palette(i)))
        .collect();
    format!("<div class=\"chart-wrapper\">{}{}</div>", out, legend(&names))
}

/// Grid of labelled cells, shaded by `opacity(value)`.
pub fn heatmap_chart<F>(
    rows: &[String],
    columns: &[String],
    values: &[Vec<f64>],
    opacity: F,
    size: ChartSize,
) -> String
where
    F: Fn(f64) -> f64,
{
    if rows.is_empty() || columns.is_empty() {
        return empty_chart("No data available");
    }
    let label_width = 180.0;
    let header = 24.0;
    let cell_w = (size.width - label_width) / columns.len() as f64;
    let cell_h = ((size.height - header) / rows.len() as f64).min(28.0);
    let height = header + cell_h * rows.len() as f64;

    let mut out = svg_open(ChartSize::new(size.width, height));
    for (c, column) in columns.iter().enumerate() {
        out.push_str(&format!(
            r#"<text x="{:.1}" y="16" text-anchor="middle" class="axis-label">{}</text>"#,
            label_width + c as f64 * cell_w + cell_w / 2.0,
            escape_html(column)
        ));
    }
    for (r, row) in rows.iter().enumerate() {
        let y = header + r as f64 * cell_h;
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" class="axis-label">{}</text>"#,
            label_width - 8.0,
            y + cell_h / 2.0 + 4.0,
            escape_html(row)
        ));
        for (c, value) in values.get(r).map(Vec::as_slice).unwrap_or(&[]).iter().enumerate() {
            let x = label_width + c as f64 * cell_w;
            out.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="{:.2}" stroke="rgba(255,255,255,0.05)"/><text x="{:.1}" y="{:.1}" text-anchor="middle" class="heat-value">{}</text>"#,
                x,
                y,
                cell_w,
                cell_h,
                PALETTE[0],
                opacity(*value),
                x + cell_w / 2.0,
                y + cell_h / 2.0 + 4.0,
                if *value > 0.0 { format!("{}%", format_fixed(*value, 0)) } else { "-".to_string() }
            ));
        }
    }
    out.push_str("</svg>");
    format!("<div class=\"chart-wrapper heatmap\">{}</div>", out)
}

/// Game co-play network: nodes on a circle, link width by shared players.
pub fn network_chart(network: &GameNetwork) -> String {
    if network.nodes.is_empty() {
        return empty_chart("No cross-game connections");
    }
    let side = GameNetwork::CENTER * 2.0;
    let max = network.max_weight();

    let mut out = svg_open(ChartSize::new(side, side));
    for link in &network.links {
        let (Some(a), Some(b)) = (network.nodes.get(link.source), network.nodes.get(link.target)) else {
            continue;
        };
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-opacity="{:.2}" stroke-width="{:.1}"><title>{} + {}: {}</title></line>"#,
            a.x,
            a.y,
            b.x,
            b.y,
            PALETTE[1],
            0.3 + scale(link.weight, max, 0.6),
            1.0 + scale(link.weight, max, 7.0),
            escape_html(&a.name),
            escape_html(&b.name),
            format_number(link.weight)
        ));
    }
    for (i, node) in network.nodes.iter().enumerate() {
        out.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="14" fill="{}"/><text x="{:.1}" y="{:.1}" text-anchor="middle" class="node-label">{}</text>"#,
            node.x,
            node.y,
            palette(i),
            node.x,
            node.y + 28.0,
            short_label(&node.name)
        ));
    }
    out.push_str("</svg>");
    format!("<div class=\"chart-wrapper network\">{}</div>", out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(values: &[f64]) -> Vec<(String, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("p{}", i), *v))
            .collect()
    }

    #[test]
    fn test_scale_handles_zero_max() {
        assert_eq!(scale(5.0, 0.0, 100.0), 0.0);
        assert_eq!(scale(5.0, 10.0, 100.0), 50.0);
        assert_eq!(scale(20.0, 10.0, 100.0), 100.0);
        assert_eq!(scale(f64::NAN, 10.0, 100.0), 0.0);
    }

    #[test]
    fn test_band_slots_cover_plot_width() {
        let size = ChartSize::default();
        let slots = band_slots(4, size);
        assert_eq!(slots.len(), 4);
        let (last_x, last_w) = slots[3];
        assert!((last_x + last_w - (size.width - MARGIN_RIGHT)).abs() < 1e-9);
        assert!(band_slots(0, size).is_empty());
    }

    #[test]
    fn test_bar_chart_tallest_bar_fills_plot() {
        let size = ChartSize::default();
        let svg = bar_chart(&points(&[10.0, 40.0]), size);
        assert!(svg.contains(&format!("height=\"{:.1}\"", size.plot_height())));
        assert_eq!(svg.matches("class=\"bar\"").count(), 2);
    }

    #[test]
    fn test_empty_inputs_render_placeholder() {
        assert!(bar_chart(&[], ChartSize::default()).contains("chart-empty"));
        assert!(line_chart(&[], &[], ChartSize::default()).contains("chart-empty"));
        assert!(donut_chart(&[("a".into(), 0.0, "#fff")], ChartSize::default()).contains("chart-empty"));
        assert!(network_chart(&GameNetwork::default()).contains("chart-empty"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let svg = bar_chart(&[("<b>Aurory</b>".to_string(), 1.0)], ChartSize::default());
        assert!(svg.contains("&lt;b&gt;Aurory&lt;/b&gt;"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn test_donut_segments_cover_circle() {
        let segments = donut_segments(&[1.0, 3.0, 0.0], 100.0);
        assert_eq!(segments, vec![(25.0, 0.0), (75.0, 25.0), (0.0, 100.0)]);
        assert!(donut_segments(&[0.0, 0.0], 100.0).is_empty());
    }

    #[test]
    fn test_line_points_single_value_is_centered() {
        let size = ChartSize::default();
        let pts = line_points(&[5.0], 10.0, size);
        assert_eq!(pts.len(), 1);
        assert!((pts[0].0 - (MARGIN_LEFT + size.plot_width() / 2.0)).abs() < 1e-9);
        assert!((pts[0].1 - (size.baseline() - size.plot_height() / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_radar_first_axis_points_up() {
        let pts = radar_points(&[100.0, 50.0, 100.0, 50.0], 100.0, 200.0, 200.0, 100.0);
        assert_eq!(pts.len(), 4);
        assert!((pts[0].0 - 200.0).abs() < 1e-9);
        assert!((pts[0].1 - 100.0).abs() < 1e-9);
        // Second axis points right at half length.
        assert!((pts[1].0 - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_heatmap_renders_one_cell_per_value() {
        let rows = vec!["A 2024-01-01".to_string()];
        let cols = vec!["W1".to_string(), "W2".to_string()];
        let svg = heatmap_chart(&rows, &cols, &[vec![40.0, 0.0]], |v| v / 100.0, ChartSize::default());
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains("40%"));
        assert!(svg.contains("fill-opacity=\"0.00\""));
    }
}
