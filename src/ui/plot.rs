use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::data::model::columns;
use crate::data::stats::{mean_metric, platform_series};
use crate::state::AppState;
use crate::ui::table;

// ---------------------------------------------------------------------------
// Central dashboard: KPIs, charts, table
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a metrics file to get started  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            kpi_row(ui, state);
            ui.add_space(8.0);

            line_chart(ui, state, "followers_plot", "Followers by platform", columns::FOLLOWERS);
            line_chart(
                ui,
                state,
                "engagement_plot",
                "Engagement rate by platform",
                columns::ENGAGEMENT_RATE,
            );
            ratio_bar_chart(ui, state);
            monthly_posts_chart(ui, state);
            line_chart(
                ui,
                state,
                "growth_plot",
                "Follower growth (%)",
                columns::FOLLOWER_GROWTH_PCT,
            );

            ui.add_space(8.0);
            ui.heading("Filtered data");
            table::filtered_table(ui, state, dataset);
        });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Three scalar summaries over the visible records.  All of them skip
/// missing values and show a dash when nothing is left to average.
fn kpi_row(ui: &mut Ui, state: &AppState) {
    let followers = mean_metric(state.visible_records(), columns::FOLLOWERS);
    let reach = mean_metric(state.visible_records(), columns::REACH);
    let engagement = mean_metric(state.visible_records(), columns::ENGAGEMENT_RATE);

    ui.columns(3, |cols| {
        kpi(&mut cols[0], "Avg. followers", format_count(followers));
        kpi(&mut cols[1], "Avg. reach", format_count(reach));
        kpi(&mut cols[2], "Avg. engagement", format_percent(engagement));
    });
}

fn kpi(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(label);
            ui.heading(value);
        });
    });
}

fn format_count(value: Option<f64>) -> String {
    value.map_or_else(|| "–".to_string(), |v| format!("{v:.0}"))
}

fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "–".to_string(), |v| format!("{:.2}%", v * 100.0))
}

// ---------------------------------------------------------------------------
// Date axis helpers
// ---------------------------------------------------------------------------

/// Plot x-coordinate for a date: days since the common era.
fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_date_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Line charts: one series per platform over time
// ---------------------------------------------------------------------------

fn line_chart(ui: &mut Ui, state: &AppState, id: &str, heading: &str, column: &str) {
    ui.add_space(4.0);
    ui.strong(heading);

    let series = platform_series(state.visible_records(), column);

    Plot::new(id)
        .legend(Legend::default())
        .height(240.0)
        .x_axis_formatter(|mark, _range| x_to_date_label(mark.value))
        .show(ui, |plot_ui| {
            for (platform, points) in &series {
                let plot_points: PlotPoints = points
                    .iter()
                    .map(|&(date, value)| [date_to_x(date), value])
                    .collect();
                let line = Line::new(plot_points)
                    .name(platform)
                    .color(state.color_map.color_for(platform))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Grouped bars: interactions per 1000 followers, by date
// ---------------------------------------------------------------------------

fn ratio_bar_chart(ui: &mut Ui, state: &AppState) {
    ui.add_space(4.0);
    ui.strong("Interactions per 1000 followers");

    let series = platform_series(state.visible_records(), columns::INTERACTIONS_PER_1000);
    let n = series.len().max(1);
    // group width of 0.8 days, split between the platforms
    let width = 0.8 / n as f64;

    Plot::new("ratio_plot")
        .legend(Legend::default())
        .height(240.0)
        .x_axis_formatter(|mark, _range| x_to_date_label(mark.value))
        .show(ui, |plot_ui| {
            for (idx, (platform, points)) in series.iter().enumerate() {
                let offset = (idx as f64 - (n as f64 - 1.0) / 2.0) * width;
                let bars: Vec<Bar> = points
                    .iter()
                    .map(|&(date, value)| Bar::new(date_to_x(date) + offset, value).width(width))
                    .collect();
                let chart = BarChart::new(bars)
                    .name(platform)
                    .color(state.color_map.color_for(platform));
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Grouped bars: posts per month (aggregator output)
// ---------------------------------------------------------------------------

fn monthly_posts_chart(ui: &mut Ui, state: &AppState) {
    ui.add_space(4.0);
    ui.strong("Posts per month");

    // Month labels in calendar order along the x axis; the aggregates keep
    // first-seen order, so index into a sorted label list here.
    let months: Vec<String> = state
        .monthly_posts
        .iter()
        .map(|a| a.month.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let platforms: Vec<String> = state
        .monthly_posts
        .iter()
        .map(|a| a.platform.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let n = platforms.len().max(1);
    let width = 0.8 / n as f64;
    let tick_labels = months.clone();

    Plot::new("monthly_posts_plot")
        .legend(Legend::default())
        .height(240.0)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 0.25 || idx < 0.0 {
                return String::new();
            }
            tick_labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (p_idx, platform) in platforms.iter().enumerate() {
                let offset = (p_idx as f64 - (n as f64 - 1.0) / 2.0) * width;
                let bars: Vec<Bar> = state
                    .monthly_posts
                    .iter()
                    .filter(|a| &a.platform == platform)
                    .filter_map(|a| {
                        let m_idx = months.iter().position(|m| *m == a.month)?;
                        Some(Bar::new(m_idx as f64 + offset, a.posts).width(width))
                    })
                    .collect();
                let chart = BarChart::new(bars)
                    .name(platform)
                    .color(state.color_map.color_for(platform));
                plot_ui.bar_chart(chart);
            }
        });
}
