use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::ValueField;
use crate::state::AppState;
use crate::ui::{charts, metrics, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PainelVendasApp {
    pub state: AppState,
}

impl PainelVendasApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PainelVendasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // A load failure replaces the whole page.
            if let Some(msg) = &self.state.load_error {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label(RichText::new(msg).color(Color32::RED).heading());
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    panels::filter_panel(ui, state);
    ui.separator();

    let Some(view) = &state.view else {
        ui.label("Nenhum dado carregado (Arquivo → Abrir…).");
        return;
    };
    let symbol = state.config.currency_symbol.as_str();

    metrics::metric_row(ui, &view.metrics, symbol);
    ui.add_space(12.0);

    charts::bar_chart(
        ui,
        "Vendas por Linha de Produto",
        &view.by_product_line,
        ValueField::Value,
        Some(&state.line_colors),
        symbol,
    );
    ui.add_space(12.0);

    charts::bar_chart(
        ui,
        "Vendas por Vendedor",
        &view.by_salesperson,
        ValueField::Value,
        Some(&state.salesperson_colors),
        symbol,
    );
    ui.add_space(12.0);

    let top_title = format!("Top {} Produtos Mais Vendidos", state.config.top_n);
    charts::bar_chart(
        ui,
        &top_title,
        &view.top_products,
        ValueField::Value,
        None,
        symbol,
    );
    charts::ranking_table(ui, &view.top_products, ValueField::Value, symbol);
}
