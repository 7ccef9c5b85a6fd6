/*
 * UI Module
 *
 * This module contains the egui control panel for the particle flow window.
 * The panel edits a copy of the SimulationConfig; the caller compares the
 * result and hands the new config to the loop driver when anything changed.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{parse_hex_color, MotionMode, SimulationConfig, SWATCHES};

// Update the UI and return whether the config changed
pub fn update_ui(
    egui: &mut Egui,
    config: &mut SimulationConfig,
    color_text: &mut String,
    debug_info: &DebugInfo,
) -> bool {
    let before = config.clone();

    let ctx = egui.begin_frame();

    egui::Window::new("Particle Flow")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            egui::ComboBox::from_label("Motion Mode")
                .selected_text(config.motion_mode.label())
                .show_ui(ui, |ui| {
                    for mode in MotionMode::ALL {
                        ui.selectable_value(&mut config.motion_mode, mode, mode.label());
                    }
                });

            ui.add(egui::Slider::new(&mut config.speed, SimulationConfig::get_speed_range()).text("Speed"));
            let particles = ui.add(
                egui::Slider::new(&mut config.particle_count, SimulationConfig::get_particle_count_range())
                    .text("Particles"),
            );
            if particles.changed() {
                config.particle_count = SimulationConfig::snap_particle_count(config.particle_count);
            }
            ui.add(egui::Slider::new(&mut config.trail_length, SimulationConfig::get_trail_length_range()).text("Trail Length"));
            ui.add(egui::Slider::new(&mut config.decay, SimulationConfig::get_decay_range()).text("Decay (Life)"));
            ui.add(
                egui::Slider::new(&mut config.flow_intensity, SimulationConfig::get_flow_intensity_range())
                    .text("Flow Intensity"),
            );

            ui.separator();
            ui.checkbox(&mut config.is_interactive, "Mouse Attractor");

            ui.separator();
            ui.horizontal(|ui| {
                for (name, hex) in SWATCHES {
                    let selected = config.base_color.eq_ignore_ascii_case(hex);
                    if ui.selectable_label(selected, name).clicked() {
                        config.base_color = hex.to_string();
                        *color_text = hex.to_string();
                    }
                }
            });
            ui.horizontal(|ui| {
                ui.label("Custom");
                // Only complete colours reach the config
                if ui.text_edit_singleline(color_text).changed() && parse_hex_color(color_text).is_ok() {
                    config.base_color = color_text.clone();
                }
            });

            ui.collapsing("Debug", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Live particles: {}", debug_info.live_particles));
                ui.label(format!("Active mode: {}", debug_info.effective_mode.label()));
                ui.label(format!("Ticks: {}", debug_info.ticks));
            });
        });

    *config != before
}
