use eframe::egui::{self, Color32, DragValue, RichText, Ui};

use crate::data::model::FilterOptions;
use crate::state::AppState;

/// Label of the "no constraint" entry in every selector.
const ANY: &str = "Todos";

// ---------------------------------------------------------------------------
// Filter panel – six independent controls
// ---------------------------------------------------------------------------

/// Render the collapsible filter row and push any change into the state.
pub fn filter_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let options: &FilterOptions = &dataset.options;
    let mut criteria = state.criteria.clone();
    let filtering = !state.criteria.is_empty();
    let mut reset = false;

    egui::CollapsingHeader::new(RichText::new("Filtros").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.columns(6, |cols| {
                choice(
                    &mut cols[0],
                    "Selecionar Vendedor",
                    &options.salespeople,
                    &mut criteria.salesperson,
                );
                choice(&mut cols[1], "Selecionar Mes", &options.months, &mut criteria.month);
                choice(&mut cols[2], "Selecionar Ano", &options.years, &mut criteria.year);
                choice(
                    &mut cols[3],
                    "Selecione a Situação",
                    &options.statuses,
                    &mut criteria.status,
                );
                bound(&mut cols[4], "Valor Mínimo", &mut criteria.min_value);
                bound(&mut cols[5], "Valor Máximo", &mut criteria.max_value);
            });
            if filtering && ui.small_button("Limpar filtros").clicked() {
                reset = true;
            }
        });

    if reset {
        state.reset_filters();
    } else {
        state.set_criteria(criteria);
    }
}

fn choice(ui: &mut Ui, label: &str, options: &[String], selected: &mut Option<String>) {
    ui.label(label);
    let current = selected.clone().unwrap_or_else(|| ANY.to_string());
    egui::ComboBox::from_id_salt(label)
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(selected, None, ANY);
            for opt in options {
                ui.selectable_value(selected, Some(opt.clone()), opt);
            }
        });
}

/// Optional inclusive bound: the checkbox toggles between "absent" and a value.
fn bound(ui: &mut Ui, label: &str, value: &mut Option<f64>) {
    ui.label(label);
    ui.horizontal(|ui: &mut Ui| {
        let mut enabled = value.is_some();
        if ui.checkbox(&mut enabled, "").changed() {
            *value = enabled.then_some(0.0);
        }
        let mut v = value.unwrap_or(0.0);
        let field = ui.add_enabled(enabled, DragValue::new(&mut v).speed(10.0).max_decimals(2));
        if enabled && field.changed() {
            *value = Some(v);
        }
        if !enabled {
            ui.weak("Opcional");
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Recarregar").clicked() {
                let path = state.config.data_path.clone();
                state.load_path(&path);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(RichText::new(&state.config.title).strong());
        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} registros carregados, {} após filtros",
                ds.len(),
                view.filtered.len()
            ));
        }

        if state.load_error.is_some() {
            ui.label(RichText::new("Falha ao carregar dados").color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir dados de vendas")
        .add_filter("Arquivos suportados", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
