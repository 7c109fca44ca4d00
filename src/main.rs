use bevy::log::LogPlugin;
use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod chat;
mod dashboard;
mod neo;
mod orbital;
mod selection;
mod session;
mod ui;
mod visualization;

use chat::ChatPlugin;
use dashboard::DashboardPlugin;
use neo::NeoPlugin;
use orbital::OrbitalPlugin;
use selection::SelectionPlugin;
use session::SessionPlugin;
use ui::UiPlugin;
use visualization::VisualizationPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Cosmic Watch".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: "info,wgpu=error,naga=warn".to_string(),
                ..default()
            }),
    );

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.add_plugins(EguiPlugin::default());
    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(MeshPickingPlugin);

    app.add_plugins(SessionPlugin);
    app.add_plugins(NeoPlugin);
    app.add_plugins(OrbitalPlugin);
    app.add_plugins(SelectionPlugin);
    app.add_plugins(DashboardPlugin);
    app.add_plugins(ChatPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(UiPlugin);

    app.run();
}
