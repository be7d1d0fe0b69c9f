use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the filter panel: the two bound selectors, the display slider with
/// its min/current/max labels, the category selector, and the labels toggle.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // With no parseable dates the range controls are inert placeholders.
    let axis_empty = state.axis.is_empty();

    ui.add_enabled_ui(!axis_empty, |ui: &mut Ui| {
        bound_selector(ui, state, Bound::From);
        bound_selector(ui, state, Bound::To);
        ui.separator();
        display_slider(ui, state);
    });

    ui.separator();
    category_selector(ui, state);

    ui.separator();
    ui.checkbox(&mut state.show_labels, "Show labels");
}

#[derive(Clone, Copy, PartialEq)]
enum Bound {
    From,
    To,
}

/// One index-valued bound selector over the axis labels. The controller
/// tolerates "from" holding a larger index than "to".
fn bound_selector(ui: &mut Ui, state: &mut AppState, which: Bound) {
    let (title, salt) = match which {
        Bound::From => ("From", "from_ym"),
        Bound::To => ("To", "to_ym"),
    };
    let current = match which {
        Bound::From => state.filter.from_index,
        Bound::To => state.filter.to_index,
    };

    let mut picked = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(title);
        egui::ComboBox::from_id_salt(salt)
            .selected_text(state.axis.label(current))
            .show_ui(ui, |ui: &mut Ui| {
                for (i, label) in state.axis.labels().iter().enumerate() {
                    if ui.selectable_label(current == i, label).clicked() {
                        picked = Some(i);
                    }
                }
            });
    });

    if let Some(i) = picked {
        match which {
            Bound::From => state.filter.from_index = i,
            Bound::To => state.filter.to_index = i,
        }
        state.refilter();
    }
}

/// The single-value display slider. Dragging only moves the cosmetic current
/// label; the full filter pass runs on commit (drag stop), so high-frequency
/// drag ticks never touch the record set.
fn display_slider(ui: &mut Ui, state: &mut AppState) {
    let last = state.axis.last_index();
    let response = ui.add(
        egui::Slider::new(&mut state.filter.current_index, 0..=last).show_value(false),
    );
    if response.drag_stopped() {
        state.refilter();
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label(state.min_label().to_string());
        ui.separator();
        ui.strong(state.current_label().to_string());
        ui.separator();
        ui.label(state.max_label().to_string());
    });
}

/// Category selector with the reserved empty value meaning "all".
fn category_selector(ui: &mut Ui, state: &mut AppState) {
    let categories = state
        .dataset
        .as_ref()
        .map(|ds| ds.categories.clone())
        .unwrap_or_default();

    let selected_text = if state.filter.category.is_empty() {
        "All".to_string()
    } else {
        state.filter.category.clone()
    };

    let mut picked = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Borough");
        egui::ComboBox::from_id_salt("category")
            .selected_text(selected_text)
            .show_ui(ui, |ui: &mut Ui| {
                if ui
                    .selectable_label(state.filter.category.is_empty(), "All")
                    .clicked()
                {
                    picked = Some(String::new());
                }
                for cat in &categories {
                    let is_selected = state.filter.category == *cat;
                    let text = RichText::new(cat).color(state.colors.color_for(cat));
                    if ui.selectable_label(is_selected, text).clicked() {
                        picked = Some(cat.clone());
                    }
                }
            });
    });

    if let Some(cat) = picked {
        state.filter.category = cat;
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} markers loaded, {} visible",
                ds.len(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open marker dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} markers across {} categories",
                    dataset.len(),
                    dataset.categories.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
