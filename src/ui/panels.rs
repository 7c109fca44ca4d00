//! Dashboard panel contents

use bevy_egui::egui::{self, Align2, Color32, RichText};

use crate::dashboard::view::{
    DashboardStats, format_diameter, format_miss_distance, format_velocity, miss_distance_series,
    velocity_series,
};
use crate::neo::{NeoRecord, RiskLevel};
use crate::selection::{Selection, Watchlist};
use crate::ui::charts::{bar_chart, line_chart};
use crate::ui::state::{ACCENT, HAZARD, STAR_ON, TEXT_DIM, TEXT_MAIN, bevy_to_egui_color};

pub const LOADING_TEXT: &str = "ESTABLISHING UPLINK TO NASA...";
pub const NO_SELECTION_TEXT: &str = "SELECT AN OBJECT FOR DETAILED ANALYSIS";

/// Returns true when Logout was pressed.
pub fn render_header(ui: &mut egui::Ui, username: &str) -> bool {
    let mut logout = false;
    ui.horizontal(|ui| {
        ui.label(RichText::new("CW").strong().color(ACCENT));
        ui.vertical(|ui| {
            ui.label(RichText::new("COSMIC WATCH").strong().size(18.0).color(ACCENT));
            ui.label(
                RichText::new("NASA MISSION CONTROL INTERFACE")
                    .small()
                    .color(TEXT_DIM),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            logout = ui.button("LOGOUT").clicked();
            ui.vertical(|ui| {
                ui.label(RichText::new("AUTHORIZED PERSONNEL").small().color(TEXT_DIM));
                ui.label(RichText::new(username).strong().color(TEXT_MAIN));
            });
        });
    });
    logout
}

/// Search box plus the filtered list. Returns the id of a clicked row.
pub fn render_object_list(
    ui: &mut egui::Ui,
    search: &mut String,
    filtered: &[&NeoRecord],
    selection: &Selection,
    watchlist: &Watchlist,
) -> Option<String> {
    ui.add(
        egui::TextEdit::singleline(search)
            .hint_text("SEARCH OBJECTS...")
            .desired_width(f32::INFINITY),
    );
    ui.separator();

    let mut clicked = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for record in filtered {
                let selected = selection.is_selected(&record.external_id);
                let response = ui
                    .vertical(|ui| {
                        ui.horizontal(|ui| {
                            let name = RichText::new(&record.name).strong();
                            let name = if selected { name.color(ACCENT) } else { name };
                            ui.add(egui::Label::new(name).truncate());
                            if record.is_hazardous {
                                ui.label(RichText::new("HAZARD").small().color(HAZARD));
                            }
                        });
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(format!(
                                    "Ø {} KM",
                                    format_diameter(record.diameter_km)
                                ))
                                .small()
                                .color(TEXT_DIM),
                            );
                            if watchlist.contains(&record.external_id) {
                                ui.label(RichText::new("★ WATCHLIST").small().color(STAR_ON));
                            }
                        });
                    })
                    .response
                    .interact(egui::Sense::click());
                if response.clicked() {
                    clicked = Some(record.external_id.clone());
                }
                ui.separator();
            }
        });
    clicked
}

fn metric(ui: &mut egui::Ui, label: &str, value: String, unit: &str) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).small().color(TEXT_DIM));
        ui.horizontal(|ui| {
            ui.label(RichText::new(value).size(16.0).color(TEXT_MAIN));
            ui.label(RichText::new(unit).small().color(TEXT_DIM));
        });
    });
}

/// Returns true when the watchlist star was pressed.
pub fn render_detail(
    ui: &mut egui::Ui,
    record: &NeoRecord,
    watchlisted: bool,
    filtered: &[&NeoRecord],
) -> bool {
    let mut toggle = false;
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(record.name.to_uppercase())
                .strong()
                .size(20.0)
                .color(ACCENT),
        );
        let star = RichText::new("★")
            .size(20.0)
            .color(if watchlisted { STAR_ON } else { TEXT_DIM });
        toggle = ui.add(egui::Button::new(star).frame(false)).clicked();
    });
    ui.label(
        RichText::new(format!("NASA ID: {}", record.external_id))
            .small()
            .color(TEXT_DIM),
    );
    let risk = RiskLevel::classify(record);
    ui.label(
        RichText::new(risk.label().to_uppercase())
            .strong()
            .color(bevy_to_egui_color(risk.color())),
    );
    ui.add_space(12.0);

    egui::Grid::new("detail_metrics")
        .num_columns(2)
        .spacing([24.0, 12.0])
        .show(ui, |ui| {
            metric(ui, "DIAMETER", format_diameter(record.diameter_km), "KM");
            metric(
                ui,
                "RELATIVE VELOCITY",
                format_velocity(record.velocity_kph),
                "KPH",
            );
            ui.end_row();
            metric(
                ui,
                "MISS DISTANCE",
                format_miss_distance(record.miss_distance_km),
                "M KM",
            );
            metric(
                ui,
                "CLOSE APPROACH",
                record.close_approach_date.clone(),
                "",
            );
            ui.end_row();
        });
    ui.add_space(16.0);

    ui.label(
        RichText::new("DISTANCE FROM EARTH (COMPARATIVE LIST)")
            .small()
            .color(TEXT_DIM),
    );
    bar_chart(
        ui,
        &miss_distance_series(filtered),
        Some(record.external_id.as_str()),
    );
    ui.add_space(12.0);
    ui.label(
        RichText::new("VELOCITY TRENDS (REGIONAL OBJECTS)")
            .small()
            .color(TEXT_DIM),
    );
    line_chart(ui, &velocity_series(filtered));

    toggle
}

pub fn render_no_selection(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(RichText::new(NO_SELECTION_TEXT).small().color(TEXT_DIM));
    });
}

pub fn render_stats(ctx: &egui::Context, stats: DashboardStats) {
    egui::Area::new(egui::Id::new("quick_stats"))
        .anchor(Align2::LEFT_BOTTOM, [24.0, -24.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                stat_card(ui, "MONITORED OBJECTS", stats.monitored, TEXT_MAIN);
                stat_card(ui, "THREAT INDICATORS", stats.hazardous, HAZARD);
            });
        });
}

fn stat_card(ui: &mut egui::Ui, label: &str, value: usize, color: Color32) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(label).small().color(TEXT_DIM));
            ui.label(RichText::new(value.to_string()).size(24.0).color(color));
        });
    });
}

pub fn render_loading(ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.spinner();
                ui.label(RichText::new(LOADING_TEXT).strong().color(ACCENT));
            });
        });
    });
}
