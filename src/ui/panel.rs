// src/ui/panel.rs
//! Default UI panels
//!
//! The organisation browser (list + details of the selection) and the
//! controls help line.

use crate::{
    data::Organisation,
    gfx::scene::{Planet, Scene},
};

/// Organisation browser
///
/// Lists ENS names in fetch order; clicking a row selects that planet in the
/// scene. The selected organisation's record and derived geometry are shown
/// underneath.
pub fn organisation_panel(ui: &imgui::Ui, scene: &mut Scene, organisations: &[Organisation]) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }
    let panel_width = (display_size[0] * 0.28).clamp(280.0, 420.0);
    let panel_height = (display_size[1] * 0.7).max(360.0);

    ui.window("Organisations")
        .size([panel_width, panel_height], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            render_organisation_list(ui, scene, organisations);
            ui.separator();
            render_details(ui, scene, organisations);
        });
}

fn render_organisation_list(ui: &imgui::Ui, scene: &mut Scene, organisations: &[Organisation]) {
    ui.text(format!("{} organisations", organisations.len()));

    if organisations.is_empty() {
        ui.spacing();
        ui.text_disabled("The source returned no records.");
        return;
    }

    let selected = scene.selection();
    let mut clicked = None;

    ui.child_window("organisation_list")
        .size([0.0, 200.0])
        .border(true)
        .build(|| {
            for (i, organisation) in organisations.iter().enumerate() {
                let label = format!("{}##org{}", display_name(organisation), i);
                if ui
                    .selectable_config(&label)
                    .selected(selected == Some(i))
                    .allow_double_click(false)
                    .build()
                {
                    clicked = Some(i);
                }
            }
        });

    if let Some(index) = clicked {
        // Clicking the selected row again deselects it.
        let next = if selected == Some(index) { None } else { Some(index) };
        scene.select(next);
    }
}

fn render_details(ui: &imgui::Ui, scene: &mut Scene, organisations: &[Organisation]) {
    let Some(index) = scene.selection() else {
        ui.text_disabled("Click a planet or a name to inspect it.");
        return;
    };
    let (Some(organisation), Some(planet)) = (organisations.get(index), scene.planets.get(index))
    else {
        return;
    };

    ui.text(display_name(organisation));
    ui.spacing();

    ui.columns(2, "organisation_details", false);
    detail_row(ui, "Address", organisation.short_address());
    detail_row(ui, "Score", format!("{:.3}", organisation.score));
    detail_row(ui, "AUM", format!("{:.2}", organisation.aum));
    detail_row(ui, "Tokens", organisation.token_count.to_string());
    detail_row(ui, "Activity", format!("{:.2}", organisation.activity));
    ui.columns(1, "", false);

    ui.separator();
    render_planet_geometry(ui, planet);

    ui.spacing();
    if ui.button("Clear selection") {
        scene.select(None);
    }
}

fn render_planet_geometry(ui: &imgui::Ui, planet: &Planet) {
    ui.columns(2, "planet_geometry", false);
    detail_row(ui, "Radius", format!("{:.3}", planet.radius));
    detail_row(
        ui,
        "Position",
        format!(
            "{:.1}, {:.1}, {:.1}",
            planet.position.x, planet.position.y, planet.position.z
        ),
    );
    ui.columns(1, "", false);
}

fn detail_row(ui: &imgui::Ui, label: &str, value: String) {
    ui.text(label);
    ui.next_column();
    ui.text(value);
    ui.next_column();
}

fn display_name(organisation: &Organisation) -> &str {
    if organisation.ens_name.is_empty() {
        "(unnamed)"
    } else {
        &organisation.ens_name
    }
}

/// One-line summary of the active camera's controls along the bottom edge.
pub fn controls_help(ui: &imgui::Ui, help: &str) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Controls")
        .position([10.0, display_size[1] - 40.0], imgui::Condition::Always)
        .no_decoration()
        .no_inputs()
        .always_auto_resize(true)
        .bg_alpha(0.3)
        .build(|| {
            ui.text(help);
        });
}
