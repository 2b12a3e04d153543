use eframe::egui::{Color32, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot};

use crate::analytics::aggregate::AggregatedTable;
use crate::analytics::format::{format_currency, format_number};
use crate::color::ColorMap;
use crate::data::model::ValueField;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Bar chart of one summed field
// ---------------------------------------------------------------------------

/// Render `field` of `table` as one bar per group, labelled by group key.
pub fn bar_chart(
    ui: &mut Ui,
    title: &str,
    table: &AggregatedTable,
    field: ValueField,
    colors: Option<&ColorMap>,
    symbol: &str,
) {
    ui.heading(title);

    let series = table.series(field);
    if series.is_empty() {
        ui.label("Nenhum registro para os filtros selecionados.");
        return;
    }

    let bars: Vec<Bar> = series
        .iter()
        .enumerate()
        .map(|(i, &(key, value))| {
            let fill = colors
                .map(|c| c.color_for(key))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, value).name(key).width(0.6).fill(fill)
        })
        .collect();

    let labels: Vec<String> = series.iter().map(|(key, _)| key.to_string()).collect();
    let hover_symbol = symbol.to_string();

    let chart = BarChart::new(bars)
        .name(field.label())
        .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
            format!("{}\n{}", bar.name, format_currency(bar.value, &hover_symbol))
        }));

    Plot::new(title)
        .height(CHART_HEIGHT)
        .x_axis_label(table.key.label())
        .y_axis_label(field.label())
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .y_axis_formatter(|mark, _range| format_number(mark.value, 0))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Ranking table (long product names do not fit under the bars)
// ---------------------------------------------------------------------------

pub fn ranking_table(ui: &mut Ui, table: &AggregatedTable, field: ValueField, symbol: &str) {
    let series = table.series(field);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::exact(32.0))
        .column(Column::remainder().at_least(200.0))
        .column(Column::auto().at_least(140.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong(table.key.label());
            });
            header.col(|ui| {
                ui.strong(field.label());
            });
        })
        .body(|mut body| {
            for (rank, (key, value)) in series.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label((rank + 1).to_string());
                    });
                    row.col(|ui| {
                        ui.label(*key);
                    });
                    row.col(|ui| {
                        ui.label(format_currency(*value, symbol));
                    });
                });
            }
        });
}
