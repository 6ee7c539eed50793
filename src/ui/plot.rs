use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{self, ColorMap};
use crate::data::error::ViewError;
use crate::data::views::{
    CountryTotal, FlowTotal, GroupCount, GroupTotal, MonthlyAverage, PaymentTermsPivot,
};
use crate::geo::MapLayer;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;
const MAP_HEIGHT: f32 = 420.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render every chart in the central panel: three rows of two charts, then
/// the full-width map.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(derived) = &state.derived else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data available. Open a file to begin  (File → Open…)");
        });
        return;
    };
    let views = &derived.views;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Interactive Dashboard");
            ui.add_space(6.0);

            ui.columns(2, |cols| {
                top_countries_chart(&mut cols[0], &views.top_countries);
                category_donut(&mut cols[1], &views.category_distribution);
            });
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                flow_donut(&mut cols[0], &views.flow_totals);
                shipping_chart(&mut cols[1], &views.shipping_methods);
            });
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                payment_terms_chart(&mut cols[0], &views.payment_terms);
                monthly_chart(&mut cols[1], &views.monthly_average);
            });
            ui.add_space(8.0);
            country_map(ui, &derived.map, &views.country_totals);
        });
}

fn title(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(text).strong().size(16.0));
    });
}

fn fmt_value(v: f64) -> String {
    format!("{v:.2}")
}

/// Tick label for a bar placed at index `value`; blank between bars.
fn category_tick(labels: &[String], value: f64) -> String {
    if value < 0.0 || value.fract() != 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Bars
// ---------------------------------------------------------------------------

/// Horizontal bars, largest country on top, coloured by value.
fn top_countries_chart(ui: &mut Ui, top: &[GroupTotal]) {
    title(ui, "Top 10 Countries by Transaction Value");
    let max = top.first().map_or(0.0, |g| g.value);
    let min = top.last().map_or(0.0, |g| g.value);
    let n = top.len();

    Plot::new("top_countries")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Total Value (USD)")
        .y_axis_label("Country")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, g) in top.iter().enumerate() {
                let fill = color::sequential(color::normalize(g.value, min, max));
                let bar = Bar::new((n - i) as f64, g.value)
                    .name(&g.key)
                    .fill(fill);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .horizontal()
                        .name(&g.key)
                        .color(fill)
                        .width(0.7),
                );
            }
        });
}

/// Vertical bars, one per shipping method.
fn shipping_chart(ui: &mut Ui, counts: &[GroupCount]) {
    title(ui, "Number of Transactions by Shipping Method");
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;

    Plot::new("shipping_methods")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Shipping Method")
        .y_axis_label("Number of Transactions")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, c) in counts.iter().enumerate() {
                let fill = color::sequential(color::normalize(c.count as f64, 0.0, max));
                let bar = Bar::new(i as f64, c.count as f64).name(&c.key).fill(fill);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&c.key).color(fill).width(0.7));
            }
        });
}

/// One stacked segment per payment term on each flow's bar.
fn payment_terms_chart(ui: &mut Ui, pivot: &PaymentTermsPivot) {
    title(ui, "Payment Terms Distribution by Import/Export");
    let colors = ColorMap::new(pivot.terms.iter().map(String::as_str));

    let mut charts: Vec<BarChart> = Vec::with_capacity(pivot.terms.len());
    for term in &pivot.terms {
        let bars: Vec<Bar> = pivot
            .flows
            .iter()
            .enumerate()
            .map(|(i, &flow)| {
                let count = pivot.cell(flow, term).unwrap_or(0);
                Bar::new(i as f64, count as f64).name(format!("{flow} – {term}"))
            })
            .collect();
        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(term)
            .color(colors.color_for(term))
            .width(0.6)
            .stack_on(&below);
        charts.push(chart);
    }

    let flows: Vec<String> = pivot.flows.iter().map(|f| f.to_string()).collect();

    Plot::new("payment_terms")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Import/Export")
        .x_axis_formatter(move |mark: GridMark, _range| category_tick(&flows, mark.value))
        .y_axis_label("Number of Transactions")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

fn monthly_chart(ui: &mut Ui, monthly: &Result<Vec<MonthlyAverage>, ViewError>) {
    title(ui, "Average Value of Transactions by Month");
    let monthly = match monthly {
        Ok(m) => m,
        Err(e) => {
            ui.add_sized(
                [ui.available_width(), CHART_HEIGHT],
                egui::Label::new(RichText::new(format!("Unavailable: {e}")).color(Color32::RED)),
            );
            return;
        }
    };

    let points: Vec<[f64; 2]> = monthly.iter().map(|m| [m.month as f64, m.mean]).collect();
    let line_color = Color32::from_rgb(0x63, 0x6E, 0xFA);

    Plot::new("monthly_average")
        .height(CHART_HEIGHT)
        .x_axis_label("Month")
        .y_axis_label("Average Transaction Value (USD)")
        .include_x(1.0)
        .include_x(12.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Average value")
                    .color(line_color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(4.0)
                    .color(line_color),
            );
        });
}

// ---------------------------------------------------------------------------
// Donuts
// ---------------------------------------------------------------------------

fn category_donut(ui: &mut Ui, counts: &[GroupCount]) {
    title(ui, "Product Category Distribution");
    let slices: Vec<(String, f64)> = counts
        .iter()
        .map(|c| (c.key.clone(), c.count as f64))
        .collect();
    donut(ui, &slices, 0.4);
}

fn flow_donut(ui: &mut Ui, totals: &[FlowTotal]) {
    title(ui, "Total Import vs Export Value");
    let slices: Vec<(String, f64)> = totals
        .iter()
        .map(|t| (t.flow.to_string(), t.value))
        .collect();
    donut(ui, &slices, 0.6);
}

/// Ring chart with a legend. `hole` is the inner radius as a fraction of the
/// outer radius.
fn donut(ui: &mut Ui, slices: &[(String, f64)], hole: f32) {
    use egui::epaint::{PathShape, Stroke};
    use std::f32::consts::TAU;

    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    let colors = ColorMap::new(slices.iter().map(|(k, _)| k.as_str()));

    ui.horizontal(|ui: &mut Ui| {
        let size = CHART_HEIGHT.min(ui.available_width() * 0.6);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
        let outer = size / 2.0 - 4.0;
        let inner = outer * hole;
        let thickness = outer - inner;
        let mid = inner + thickness / 2.0;
        let center = rect.center();

        if total > 0.0 {
            let mut start = -TAU / 4.0; // top
            for (key, value) in slices {
                let sweep = TAU * (*value / total) as f32;
                let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
                let points: Vec<egui::Pos2> = (0..=steps)
                    .map(|s| {
                        let angle = start + sweep * s as f32 / steps as f32;
                        egui::pos2(center.x + mid * angle.cos(), center.y + mid * angle.sin())
                    })
                    .collect();
                ui.painter().add(PathShape::line(
                    points,
                    Stroke::new(thickness, colors.color_for(key)),
                ));
                start += sweep;
            }
        }

        ui.vertical(|ui: &mut Ui| {
            for (key, value) in slices {
                let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                ui.colored_label(colors.color_for(key), format!("■ {key}  {pct:.1}%"));
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Country totals drawn at country centroids, coloured by Total, with the
/// full table below.
fn country_map(ui: &mut Ui, layer: &MapLayer, totals: &[CountryTotal]) {
    title(ui, "Total Import and Export Values by Country");
    let (min, max) = (layer.min_total(), layer.max_total());

    Plot::new("country_map")
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(85.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show(ui, |plot_ui| {
            for p in &layer.points {
                let fill = color::sequential(color::normalize(p.total, min, max));
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[p.at.lon, p.at.lat]]))
                        .radius(7.0)
                        .color(fill)
                        .name(format!("{}: {}", p.country, fmt_value(p.total))),
                );
            }
        });

    if !layer.unmatched.is_empty() {
        ui.label(
            RichText::new(format!("Not on map: {}", layer.unmatched.join(", ")))
                .small()
                .weak(),
        );
    }
    ui.add_space(6.0);
    country_table(ui, totals);
}

fn country_table(ui: &mut Ui, totals: &[CountryTotal]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(180.0))
        .columns(Column::auto().at_least(110.0), 3)
        .max_scroll_height(260.0)
        .header(20.0, |mut header| {
            for name in ["Country", "Import", "Export", "Total"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, totals.len(), |mut row| {
                let t = &totals[row.index()];
                row.col(|ui| {
                    ui.label(t.country.as_str());
                });
                for v in [t.import, t.export, t.total] {
                    row.col(|ui| {
                        ui.label(fmt_value(v));
                    });
                }
            });
        });
}
