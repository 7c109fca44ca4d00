//! Per-screen egui systems

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_egui::egui::{self, Align2, RichText};

use crate::chat::{ChatChannels, ChatRole, ChatState, submit_chat_input};
use crate::dashboard::DashboardState;
use crate::dashboard::view::{DashboardStats, filter_by_name};
use crate::neo::{NeoBatch, NeoFeedState};
use crate::selection::{Selection, Watchlist, WatchlistStore};
use crate::session::{AuthForm, Screen, Session};
use crate::ui::panels::{
    render_detail, render_header, render_loading, render_no_selection, render_object_list,
    render_stats,
};
use crate::ui::state::{ACCENT, ACCENT_DIM, PANEL_BG, TEXT_DIM, TEXT_MAIN};

pub fn landing_ui(mut contexts: EguiContexts, mut next_screen: ResMut<NextState<Screen>>) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    egui::Area::new(egui::Id::new("landing_hero"))
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("GLOBAL MONITORING ACTIVE")
                        .small()
                        .color(ACCENT),
                );
                ui.add_space(12.0);
                ui.label(
                    RichText::new("COSMIC WATCH")
                        .size(56.0)
                        .strong()
                        .color(TEXT_MAIN),
                );
                ui.label(
                    RichText::new("REAL-TIME NEAR-EARTH OBJECT MONITORING POWERED BY NASA")
                        .color(ACCENT_DIM),
                );
                ui.add_space(32.0);
                let enter = egui::Button::new(
                    RichText::new("ENTER MISSION CONTROL")
                        .strong()
                        .size(18.0)
                        .color(ACCENT),
                );
                if ui.add(enter).clicked() {
                    next_screen.set(Screen::Auth);
                }
            });
        });

    egui::Area::new(egui::Id::new("landing_status"))
        .anchor(Align2::LEFT_BOTTOM, [40.0, -40.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new("NETWORK: DEEP SPACE GRID").small().color(TEXT_DIM));
            ui.label(RichText::new("UPLINK: PRIMARY NASA FEED").small().color(TEXT_DIM));
        });
}

pub fn auth_ui(
    mut contexts: EguiContexts,
    mut form: ResMut<AuthForm>,
    mut commands: Commands,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    if let Some(message) = form.alert {
        egui::Window::new("ALERT")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    form.alert = None;
                }
            });
        return;
    }

    let mode = form.mode;
    let mut submitted = false;
    egui::Window::new(mode.title())
        .id(egui::Id::new("auth_window"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if ui.small_button("← BACK").clicked() {
                next_screen.set(Screen::Landing);
            }
            ui.label(RichText::new(mode.subtitle()).small().color(TEXT_DIM));
            ui.add_space(12.0);

            ui.label(RichText::new("USERNAME").small().color(ACCENT));
            ui.add(egui::TextEdit::singleline(&mut form.username).hint_text("e.g. Astro-Explorer"));
            ui.label(RichText::new("SECURITY CODE").small().color(ACCENT));
            let code = ui.add(egui::TextEdit::singleline(&mut form.security_code).password(true));
            let enter = code.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.add_space(12.0);

            if ui.button(mode.submit_label()).clicked() || enter {
                submitted = true;
            }
            ui.add_space(8.0);
            if ui.small_button(mode.switch_label()).clicked() {
                form.mode = mode.toggled();
            }
        });

    if submitted && let Some(username) = form.submit() {
        info!("[SESSION] {} signed in", username);
        commands.insert_resource(Session { username });
        next_screen.set(Screen::Dashboard);
    }
}

#[derive(SystemParam)]
pub struct DashboardData<'w> {
    session: Option<Res<'w, Session>>,
    batch: Res<'w, NeoBatch>,
    feed: Res<'w, NeoFeedState>,
    selection: ResMut<'w, Selection>,
    watchlist: ResMut<'w, Watchlist>,
    store: Res<'w, WatchlistStore>,
    state: ResMut<'w, DashboardState>,
}

pub fn dashboard_ui(
    mut contexts: EguiContexts,
    mut data: DashboardData,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    if data.feed.is_loading() {
        render_loading(ctx);
        return;
    }

    let username = data
        .session
        .as_ref()
        .map(|s| s.username.clone())
        .unwrap_or_default();
    egui::TopBottomPanel::top("dashboard_header").show(ctx, |ui| {
        if render_header(ui, &username) {
            next_screen.set(Screen::Landing);
        }
    });

    let DashboardData {
        batch,
        selection,
        watchlist,
        store,
        state,
        ..
    } = &mut data;
    let filtered = filter_by_name(&batch.records, &state.search);

    let mut clicked = None;
    egui::SidePanel::left("object_list")
        .default_width(300.0)
        .show(ctx, |ui| {
            clicked = render_object_list(ui, &mut state.search, &filtered, selection, watchlist);
        });
    if let Some(id) = clicked
        && let Err(err) = selection.select(batch, &id)
    {
        warn!("[SELECT] {:#}", err);
    }

    let selected = selection.selected().and_then(|id| batch.get(id));
    let mut toggle = None;
    egui::SidePanel::right("object_detail")
        .default_width(380.0)
        .show(ctx, |ui| match selected {
            Some(record) => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let on_list = watchlist.contains(&record.external_id);
                    if render_detail(ui, record, on_list, &filtered) {
                        toggle = Some(record.external_id.clone());
                    }
                });
            }
            None => render_no_selection(ui),
        });
    if let Some(id) = toggle {
        match watchlist.toggle(&id, store.0.as_ref()) {
            Ok(added) => debug!("[WATCHLIST] {} {}", if added { "added" } else { "removed" }, id),
            Err(err) => warn!("[WATCHLIST] toggle failed: {:#}", err),
        }
    }

    render_stats(ctx, DashboardStats::from_records(&batch.records));
}

pub fn chat_ui(
    mut contexts: EguiContexts,
    mut dashboard: ResMut<DashboardState>,
    mut chat: ResMut<ChatState>,
    channels: Option<Res<ChatChannels>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    if !dashboard.chat_open {
        egui::Area::new(egui::Id::new("chat_toggle"))
            .anchor(Align2::RIGHT_BOTTOM, [-24.0, -24.0])
            .show(ctx, |ui| {
                if ui.button(RichText::new("💬").size(24.0)).clicked() {
                    dashboard.chat_open = true;
                }
            });
        return;
    }

    let mut open = true;
    let mut send = false;
    egui::Window::new("ORBITAL INTELLIGENCE")
        .open(&mut open)
        .anchor(Align2::RIGHT_BOTTOM, [-24.0, -24.0])
        .default_size([360.0, 480.0])
        .resizable(false)
        .frame(egui::Frame::window(&ctx.style()).fill(PANEL_BG))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .max_height(380.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for message in &chat.messages {
                        let (align, color) = match message.role {
                            ChatRole::User => (egui::Align::Max, ACCENT),
                            ChatRole::Bot => (egui::Align::Min, TEXT_MAIN),
                        };
                        ui.with_layout(egui::Layout::top_down(align), |ui| {
                            ui.label(RichText::new(&message.text).color(color));
                        });
                        ui.add_space(6.0);
                    }
                    if chat.awaiting_reply() {
                        ui.spinner();
                    }
                });
            ui.separator();
            ui.horizontal(|ui| {
                let input = ui.add(
                    egui::TextEdit::singleline(&mut chat.input).hint_text("Ask about asteroids..."),
                );
                let enter = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                send = ui.button("➤").clicked() || enter;
            });
        });
    if send {
        submit_chat_input(&mut chat, channels.as_deref());
    }
    if !open {
        dashboard.chat_open = false;
    }
}
