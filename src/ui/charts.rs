//! Small painter-drawn charts for the detail panel.

use bevy_egui::egui::{self, Pos2, Rect, Sense, Stroke, Vec2};

use crate::dashboard::view::ChartPoint;
use crate::ui::state::{ACCENT, GRID, HAZARD};

const CHART_HEIGHT: f32 = 120.0;

/// Values scaled to `[0, 1]` against the largest one. Negative and
/// non-finite values draw as zero.
pub fn normalized(points: &[ChartPoint]) -> Vec<f32> {
    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let max = points.iter().map(|p| clean(p.value)).fold(0.0, f64::max);
    points
        .iter()
        .map(|p| {
            if max > 0.0 {
                (clean(p.value) / max) as f32
            } else {
                0.0
            }
        })
        .collect()
}

fn chart_area(ui: &mut egui::Ui) -> (Rect, egui::Painter) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), CHART_HEIGHT),
        Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    for i in 1..4 {
        let y = rect.top() + rect.height() * i as f32 / 4.0;
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, GRID),
        );
    }
    (rect, painter)
}

/// One bar per point; the selected object's bar is highlighted.
pub fn bar_chart(ui: &mut egui::Ui, points: &[ChartPoint], highlight: Option<&str>) {
    let (rect, painter) = chart_area(ui);
    if points.is_empty() {
        return;
    }
    let slot = rect.width() / points.len() as f32;
    for (i, (point, height)) in points.iter().zip(normalized(points)).enumerate() {
        let left = rect.left() + slot * i as f32 + slot * 0.15;
        let bar = Rect::from_min_max(
            Pos2::new(left, rect.bottom() - rect.height() * height),
            Pos2::new(left + slot * 0.7, rect.bottom()),
        );
        let fill = if highlight == Some(point.external_id.as_str()) {
            ACCENT
        } else {
            GRID
        };
        painter.rect_filled(bar, 2.0, fill);
    }
}

pub fn line_chart(ui: &mut egui::Ui, points: &[ChartPoint]) {
    let (rect, painter) = chart_area(ui);
    if points.len() < 2 {
        return;
    }
    let step = rect.width() / (points.len() - 1) as f32;
    let line: Vec<Pos2> = normalized(points)
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            Pos2::new(
                rect.left() + step * i as f32,
                rect.bottom() - (rect.height() - 4.0) * v,
            )
        })
        .collect();
    painter.add(egui::Shape::line(line, Stroke::new(2.0, HAZARD)));
}
