use eframe::egui::{RichText, Ui};

use crate::analytics::format::{format_currency, format_quantity};
use crate::analytics::metrics::SalesMetrics;

/// Five metric cards in one row.
pub fn metric_row(ui: &mut Ui, metrics: &SalesMetrics, symbol: &str) {
    let cards = [
        ("Total de Notas", metrics.invoice_count.to_string()),
        ("Total de Produtos", format_quantity(metrics.total_quantity)),
        ("Faturamento Total", format_currency(metrics.total_value, symbol)),
        ("Custo Total", format_currency(metrics.total_cost, symbol)),
        ("Lucro Total", format_currency(metrics.total_profit, symbol)),
    ];

    ui.columns(cards.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(cards) {
            col.group(|ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(label).small());
                ui.label(RichText::new(value).heading().strong());
            });
        }
    });
}
