//! Growth-curve chart for a complexity estimate.
//!
//! Six reference curves are drawn on log-log axes over `n` in
//! `10..=10_000` and values in `1..=10^8`. The curve matching the detected
//! time class is drawn thicker with a glow; an annotation box repeats the
//! counts behind the estimate.

use std::fmt::Write;

use super::svg::escape;
use crate::complexity::ComplexityEstimate;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 640.0;
const PLOT_LEFT: f64 = 90.0;
const PLOT_RIGHT: f64 = 760.0;
const PLOT_TOP: f64 = 90.0;
const PLOT_BOTTOM: f64 = 570.0;

/// log10 bounds of the axes.
const X_DECADES: (f64, f64) = (1.0, 4.0);
const Y_DECADES: (f64, f64) = (0.0, 8.0);

const SAMPLES: usize = 200;

const BACKGROUND: &str = "#1a1a1a";
const PANEL: &str = "#2d2d2d";

/// Reference growth rates, slowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Growth {
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    Quadratic,
    Exponential,
}

impl Growth {
    const ALL: [Growth; 6] = [
        Growth::Constant,
        Growth::Logarithmic,
        Growth::Linear,
        Growth::Linearithmic,
        Growth::Quadratic,
        Growth::Exponential,
    ];

    fn label(self) -> &'static str {
        match self {
            Growth::Constant => "O(1)",
            Growth::Logarithmic => "O(log n)",
            Growth::Linear => "O(n)",
            Growth::Linearithmic => "O(n log n)",
            Growth::Quadratic => "O(n²)",
            Growth::Exponential => "O(2ⁿ)",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Growth::Constant => "#00C851",
            Growth::Logarithmic => "#33b5e5",
            Growth::Linear => "#ffbb33",
            Growth::Linearithmic => "#ff8800",
            Growth::Quadratic => "#ff4444",
            Growth::Exponential => "#aa66cc",
        }
    }

    /// log10 of the curve's value at `n`.
    fn log_value(self, n: f64) -> f64 {
        match self {
            Growth::Constant => 0.0,
            Growth::Logarithmic => n.log2().log10(),
            Growth::Linear => n.log10(),
            Growth::Linearithmic => n.log10() + n.log2().log10(),
            Growth::Quadratic => 2.0 * n.log10(),
            Growth::Exponential => n * 2f64.log10(),
        }
    }
}

fn to_x(log_n: f64) -> f64 {
    PLOT_LEFT + (log_n - X_DECADES.0) / (X_DECADES.1 - X_DECADES.0) * (PLOT_RIGHT - PLOT_LEFT)
}

fn to_y(log_v: f64) -> f64 {
    PLOT_BOTTOM - (log_v - Y_DECADES.0) / (Y_DECADES.1 - Y_DECADES.0) * (PLOT_BOTTOM - PLOT_TOP)
}

/// Pixel points of one curve. Points above the plot are clipped to its top
/// edge and the curve stops there.
fn curve(growth: Growth) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(SAMPLES);
    for i in 0..SAMPLES {
        let log_n = X_DECADES.0 + (X_DECADES.1 - X_DECADES.0) * i as f64 / (SAMPLES - 1) as f64;
        let log_v = growth.log_value(10f64.powf(log_n));
        if log_v > Y_DECADES.1 {
            points.push((to_x(log_n), PLOT_TOP));
            break;
        }
        points.push((to_x(log_n), to_y(log_v.max(Y_DECADES.0))));
    }
    points
}

fn superscript(digit: u32) -> char {
    match digit {
        0 => '⁰',
        1 => '¹',
        2 => '²',
        3 => '³',
        4 => '⁴',
        5 => '⁵',
        6 => '⁶',
        7 => '⁷',
        8 => '⁸',
        _ => '⁹',
    }
}

fn decade_label(exponent: u32) -> String {
    format!("10{}", superscript(exponent))
}

fn polyline(out: &mut String, points: &[(f64, f64)], color: &str, width: f64, opacity: f64) {
    let coords: Vec<String> = points.iter().map(|(x, y)| format!("{:.1},{:.1}", x, y)).collect();
    let _ = writeln!(
        out,
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}"/>"#,
        coords.join(" "),
        color,
        width,
        opacity
    );
}

fn text(out: &mut String, x: f64, y: f64, s: &str, size: f64, anchor: &str, extra: &str) {
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" font-size="{}" text-anchor="{}" fill="white"{}>{}</text>"#,
        x,
        y,
        size,
        anchor,
        extra,
        escape(s)
    );
}

fn grid(out: &mut String) {
    let (x0, x1) = (X_DECADES.0 as u32, X_DECADES.1 as u32);
    for k in x0..=x1 {
        let x = to_x(k as f64);
        let _ = writeln!(
            out,
            r#"<line x1="{x:.1}" y1="{PLOT_TOP:.1}" x2="{x:.1}" y2="{PLOT_BOTTOM:.1}" stroke="gray" stroke-opacity="0.3" stroke-width="0.5"/>"#
        );
        text(out, x, PLOT_BOTTOM + 22.0, &decade_label(k), 11.0, "middle", "");
    }

    let (y0, y1) = (Y_DECADES.0 as u32, Y_DECADES.1 as u32);
    for k in y0..=y1 {
        let y = to_y(k as f64);
        let _ = writeln!(
            out,
            r#"<line x1="{PLOT_LEFT:.1}" y1="{y:.1}" x2="{PLOT_RIGHT:.1}" y2="{y:.1}" stroke="gray" stroke-opacity="0.3" stroke-width="0.5"/>"#
        );
        text(out, PLOT_LEFT - 10.0, y + 4.0, &decade_label(k), 11.0, "end", "");
    }

    let _ = writeln!(
        out,
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="gray"/>"#,
        PLOT_LEFT,
        PLOT_TOP,
        PLOT_RIGHT - PLOT_LEFT,
        PLOT_BOTTOM - PLOT_TOP
    );
}

fn legend(out: &mut String, detected: &str) {
    let x = PLOT_RIGHT + 20.0;
    let _ = writeln!(
        out,
        r#"<rect x="{:.1}" y="{:.1}" width="170" height="{:.1}" rx="6" fill="{}" stroke="gray" fill-opacity="0.9"/>"#,
        x,
        PLOT_TOP,
        Growth::ALL.len() as f64 * 26.0 + 14.0,
        PANEL
    );
    for (i, growth) in Growth::ALL.iter().enumerate() {
        let y = PLOT_TOP + 20.0 + i as f64 * 26.0;
        let width = if growth.label() == detected { 4.0 } else { 2.0 };
        polyline(out, &[(x + 12.0, y), (x + 42.0, y)], growth.color(), width, 1.0);
        text(out, x + 52.0, y + 4.0, growth.label(), 12.0, "start", "");
    }
}

fn annotation(out: &mut String, estimate: &ComplexityEstimate) {
    let lines = [
        "Algorithm Analysis:".to_string(),
        format!("• Time Complexity: {}", estimate.time),
        format!("• Space Complexity: {}", estimate.space),
        format!("• Loop Keywords: {}", estimate.loop_occurrences),
        format!("• Max Nesting: {}", estimate.max_nesting),
        format!("• Functions: {}", estimate.function_count),
        format!("• Variables: {}", estimate.variable_count),
    ];
    let (x, y) = (PLOT_LEFT + 12.0, PLOT_TOP + 12.0);
    let _ = writeln!(
        out,
        r#"<rect x="{:.1}" y="{:.1}" width="250" height="{:.1}" rx="6" fill="{}" stroke="gray" fill-opacity="0.9"/>"#,
        x,
        y,
        lines.len() as f64 * 18.0 + 12.0,
        PANEL
    );
    for (i, line) in lines.iter().enumerate() {
        text(
            out,
            x + 10.0,
            y + 22.0 + i as f64 * 18.0,
            line,
            12.0,
            "start",
            r#" font-family="monospace""#,
        );
    }
}

/// Build the chart document for `estimate`.
pub(super) fn complexity_chart(estimate: &ComplexityEstimate) -> String {
    let detected = estimate.time.label();
    let mut body = String::new();

    grid(&mut body);
    for growth in Growth::ALL {
        let points = curve(growth);
        if growth.label() == detected {
            polyline(&mut body, &points, growth.color(), 8.0, 0.3);
            polyline(&mut body, &points, growth.color(), 4.0, 0.9);
        } else {
            polyline(&mut body, &points, growth.color(), 2.0, 0.6);
        }
    }
    annotation(&mut body, estimate);
    legend(&mut body, detected);

    text(&mut body, WIDTH / 2.0, 36.0, "Algorithm Complexity Analysis", 18.0, "middle", r#" font-weight="bold""#);
    text(
        &mut body,
        WIDTH / 2.0,
        62.0,
        &format!("Detected: {}", detected),
        16.0,
        "middle",
        r#" font-weight="bold""#,
    );
    text(&mut body, (PLOT_LEFT + PLOT_RIGHT) / 2.0, HEIGHT - 20.0, "Input Size (n)", 14.0, "middle", r#" font-weight="bold""#);
    text(
        &mut body,
        24.0,
        (PLOT_TOP + PLOT_BOTTOM) / 2.0,
        "Time Complexity",
        14.0,
        "middle",
        &format!(
            r#" font-weight="bold" transform="rotate(-90 24 {:.1})""#,
            (PLOT_TOP + PLOT_BOTTOM) / 2.0
        ),
    );

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, BACKGROUND);
    out.push_str(&body);
    out.push_str("</svg>\n");
    out
}
