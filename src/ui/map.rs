use std::collections::BTreeMap;

use eframe::egui::{self, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, Points, Text};

use crate::data::model::Record;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Map view (central panel)
// ---------------------------------------------------------------------------

/// Render the marker map in the central panel: one scatter point per visible
/// record (longitude → x, latitude → y), coloured by category, with hover
/// popups and an optional permanent label layer.
pub fn map_view(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a dataset to view markers  (File → Open…)");
            });
            return;
        }
    };

    let marker = &state.style.marker;

    // Group visible records per category so the legend gets one entry each.
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for (i, rec) in dataset.records.iter().enumerate() {
        if state.view.is_visible(i, rec) {
            series
                .entry(rec.category.as_str())
                .or_default()
                .push([rec.position.lon, rec.position.lat]);
        }
    }

    let response = Plot::new("marker_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .show_background(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in &series {
                let color = if category.is_empty() {
                    marker.color.0
                } else {
                    state.colors.color_for(category)
                };
                let name = if category.is_empty() {
                    "(uncategorized)"
                } else {
                    category
                };
                plot_ui.points(
                    Points::new(points.clone())
                        .name(name)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(marker.radius),
                );
            }

            // Permanent label layer; independent of the filter decision.
            if state.show_labels {
                for (i, rec) in dataset.records.iter().enumerate() {
                    if state.view.is_visible(i, rec) {
                        plot_ui.text(Text::new(
                            PlotPoint::new(rec.position.lon, rec.position.lat),
                            rec.title.clone(),
                        ));
                    }
                }
            }
        });

    // Hover popup for the nearest visible marker.
    if let Some(pointer) = response.response.hover_pos() {
        let mut nearest: Option<(f32, usize)> = None;
        for (i, rec) in dataset.records.iter().enumerate() {
            if !state.view.is_visible(i, rec) {
                continue;
            }
            let pos = response
                .transform
                .position_from_point(&PlotPoint::new(rec.position.lon, rec.position.lat));
            let dist = pos.distance(pointer);
            if dist <= marker.radius + 6.0 && nearest.map_or(true, |(best, _)| dist < best) {
                nearest = Some((dist, i));
            }
        }
        if let Some((_, i)) = nearest {
            egui::show_tooltip_at_pointer(
                ui.ctx(),
                response.response.layer_id,
                egui::Id::new("marker_popup"),
                |ui: &mut Ui| {
                    let lines = popup_lines(&dataset.records[i]);
                    ui.strong(&lines[0]);
                    for line in &lines[1..] {
                        ui.label(line);
                    }
                },
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Popup formatting
// ---------------------------------------------------------------------------

/// Format the popup lines for one record: title first, then the fields that
/// are actually present. Any field may be absent.
pub fn popup_lines(record: &Record) -> Vec<String> {
    let mut lines = vec![record.title.clone()];
    if record.raw_date.is_empty() {
        lines.push("Date: N/A".to_string());
    } else {
        lines.push(format!("Date: {}", record.raw_date));
    }
    if !record.age.is_empty() {
        lines.push(format!("Age: {}", record.age));
    }
    if !record.category.is_empty() {
        lines.push(format!("Borough: {}", record.category));
    }
    if !record.address.is_empty() {
        lines.push(format!("Address: {}", record.address));
    }
    if !record.narrative.is_empty() {
        lines.push(record.narrative.clone());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Position;

    #[test]
    fn popup_includes_only_present_fields() {
        let record = Record {
            position: Position { lat: 40.7, lon: -73.9 },
            title: "Jane Doe".to_string(),
            raw_date: "2020-03-15".to_string(),
            year_month: None,
            category: "Brooklyn".to_string(),
            age: String::new(),
            address: String::new(),
            narrative: "Struck at dawn".to_string(),
        };
        assert_eq!(
            popup_lines(&record),
            vec![
                "Jane Doe",
                "Date: 2020-03-15",
                "Borough: Brooklyn",
                "Struck at dawn",
            ]
        );
    }

    #[test]
    fn popup_tolerates_all_fields_absent() {
        let record = Record {
            position: Position { lat: 0.0, lon: 0.0 },
            title: "Ghost Bike".to_string(),
            raw_date: String::new(),
            year_month: None,
            category: String::new(),
            age: String::new(),
            address: String::new(),
            narrative: String::new(),
        };
        assert_eq!(popup_lines(&record), vec!["Ghost Bike", "Date: N/A"]);
    }
}
