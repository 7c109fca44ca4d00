//! UI palette and shared helpers

use bevy::prelude::*;
use bevy_egui::egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(0x22, 0xd3, 0xee);
pub const ACCENT_DIM: Color32 = Color32::from_rgb(0x0e, 0x74, 0x90);
pub const TEXT_MAIN: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0);
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x64, 0x74, 0x8b);
pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(0x0f, 0x17, 0x2a, 0xe6);
pub const GRID: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
pub const HAZARD: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
pub const STAR_ON: Color32 = Color32::from_rgb(0xfa, 0xcc, 0x15);

/// Convert Bevy Color to egui Color32
pub fn bevy_to_egui_color(color: Color) -> Color32 {
    let srgba = color.to_srgba();
    Color32::from_rgb(
        (srgba.red * 255.0).round() as u8,
        (srgba.green * 255.0).round() as u8,
        (srgba.blue * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neo::RiskLevel;

    #[test]
    fn risk_colors_convert_exactly() {
        assert_eq!(
            bevy_to_egui_color(RiskLevel::PotentiallyHazardous.color()),
            HAZARD
        );
        assert_eq!(
            bevy_to_egui_color(RiskLevel::Safe.color()),
            Color32::from_rgb(0x4a, 0xde, 0x80)
        );
    }
}
