// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

//! Terminal, JSON and Plotly HTML renderings of a [`DashboardView`].

use serde_json::json;
use std::fmt;
use tourism::insight::format_count;
use tourism::{BreakdownChart, BreakdownView, DashboardView, FacilityType, TotalsChart};

const BAR_WIDTH: usize = 40;
const PAGE_TITLE: &str = "Lebanon Tourism Infrastructure Explorer";

pub fn text(view: &DashboardView) -> String {
    TextDashboard(view).to_string()
}

/// Plain-text layout of the dashboard for terminals.
struct TextDashboard<'a>(&'a DashboardView);

impl fmt::Display for TextDashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let summary = &view.summary;
        writeln!(f, "{PAGE_TITLE}\n{}", "=".repeat(PAGE_TITLE.len()))?;
        writeln!(f, "\nDataset Summary\n{}", summary.description())?;
        writeln!(f, "Source: {}\n", summary.provenance())?;

        writeln!(f, "  Total facilities:            {}", format_count(summary.total_facilities))?;
        writeln!(
            f,
            "  Top governorate:             {}",
            summary.top_governorate.as_ref().map_or("-", |row| row.area.as_str())
        )?;
        writeln!(
            f,
            "  Top district:                {}",
            summary.top_district.as_ref().map_or("-", |row| row.area.as_str())
        )?;
        writeln!(
            f,
            "  Avg facilities/governorate:  {}",
            summary.avg_per_governorate.map_or_else(|| "-".to_string(), format_count)
        )?;
        writeln!(
            f,
            "  Avg facilities/district:     {}",
            summary.avg_per_district.map_or_else(|| "-".to_string(), format_count)
        )?;

        write_totals(f, &view.totals)?;
        write_breakdown(f, &view.breakdown)
    }
}

fn write_totals(f: &mut fmt::Formatter<'_>, chart: &TotalsChart) -> fmt::Result {
    writeln!(f, "\nVisualization 1: {}", chart.title)?;
    let max = chart.view.rows.first().map_or(0, |row| row.value);
    let width = label_width(chart.view.rows.iter().map(|row| row.area.as_str()));
    for row in &chart.view.rows {
        writeln!(
            f,
            "  {:<width$}  {:>8}  {}",
            row.area,
            format_count(row.value),
            bar(row.value, max, '#'),
        )?;
    }
    writeln!(f, "\nInsights from Chart 1")?;
    for line in &chart.insights {
        writeln!(f, "  - {line}")?;
    }
    Ok(())
}

fn write_breakdown(f: &mut fmt::Formatter<'_>, chart: &BreakdownChart) -> fmt::Result {
    let view = match chart {
        BreakdownChart::NoSelection { prompt } => {
            return writeln!(f, "\nVisualization 2: Tourism Facilities Breakdown by Type\n  ! {prompt}");
        }
        BreakdownChart::Ready(view) => view,
    };
    writeln!(f, "\nVisualization 2: {} [{}]", view.title, view.mode)?;
    let types = selected_types(view);
    let width = label_width(view.area_order.iter().map(String::as_str));
    write!(f, "  {:<width$}", "Area")?;
    for facility in &types {
        write!(f, "  {:>12}", facility.label())?;
    }
    writeln!(f, "  {:>8}", "Total")?;
    for area in &view.area_order {
        write!(f, "  {area:<width$}")?;
        let mut total = 0u64;
        for facility in &types {
            let count = count_for(view, area, *facility);
            total = total.saturating_add(count);
            write!(f, "  {:>12}", format_count(count))?;
        }
        writeln!(f, "  {:>8}", format_count(total))?;
    }
    writeln!(f, "\nInsights from Chart 2")?;
    if let Some(notice) = &view.notice {
        writeln!(f, "  {notice}")?;
    }
    for line in &view.insights {
        writeln!(f, "  - {line}")?;
    }
    Ok(())
}

pub fn json(view: &DashboardView) -> tourism::Result<String> {
    view.to_json()
}

/// A standalone page that draws both charts with Plotly from an embedded
/// JSON payload.
pub fn html(view: &DashboardView) -> tourism::Result<String> {
    let totals = &view.totals;
    let areas: Vec<&str> = totals.view.rows.iter().map(|row| row.area.as_str()).collect();
    let values: Vec<u64> = totals.view.rows.iter().map(|row| row.value).collect();
    let chart1 = json!({
        "data": [{
            "type": "bar",
            "x": areas,
            "y": values,
            "marker": { "color": values, "colorscale": "Viridis", "showscale": true },
        }],
        "layout": { "title": { "text": totals.title }, "xaxis": { "tickangle": -45 } },
    });

    let (chart2, chart2_insights, chart2_notice) = match &view.breakdown {
        BreakdownChart::NoSelection { prompt } => (serde_json::Value::Null, Vec::new(), Some(prompt.clone())),
        BreakdownChart::Ready(breakdown) => {
            let traces: Vec<serde_json::Value> = selected_types(breakdown)
                .into_iter()
                .map(|facility| {
                    let counts: Vec<u64> = breakdown
                        .area_order
                        .iter()
                        .map(|area| count_for(breakdown, area, facility))
                        .collect();
                    json!({
                        "type": "bar",
                        "name": facility.label(),
                        "x": breakdown.area_order,
                        "y": counts,
                        "marker": { "color": facility.color() },
                    })
                })
                .collect();
            let chart = json!({
                "data": traces,
                "layout": {
                    "title": { "text": breakdown.title },
                    "barmode": breakdown.mode.bar_mode(),
                    "xaxis": { "tickangle": -45, "categoryorder": "array", "categoryarray": breakdown.area_order },
                },
            });
            (chart, breakdown.insights.clone(), breakdown.notice.clone())
        }
    };

    let payload = json!({
        "summary": view.summary,
        "description": view.summary.description(),
        "chart1": chart1,
        "chart1Insights": totals.insights,
        "chart2": chart2,
        "chart2Insights": chart2_insights,
        "chart2Notice": chart2_notice,
    });
    // Keep the payload from closing the script element early.
    let payload = serde_json::to_string(&payload)?.replace("</", "<\\/");
    Ok(HTML_TEMPLATE
        .replace("{{TITLE}}", PAGE_TITLE)
        .replace("{{PAYLOAD}}", &payload))
}

fn selected_types(view: &BreakdownView) -> Vec<FacilityType> {
    FacilityType::ALL
        .into_iter()
        .filter(|facility| view.rows.iter().any(|row| row.facility_type == *facility))
        .collect()
}

fn count_for(view: &BreakdownView, area: &str, facility: FacilityType) -> u64 {
    view.rows
        .iter()
        .find(|row| row.area == area && row.facility_type == facility)
        .map_or(0, |row| row.count)
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|label| label.chars().count()).max().unwrap_or(4).max(4)
}

fn bar(value: u64, max: u64, fill: char) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (value as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
    std::iter::repeat(fill).take(len).collect()
}

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
body { background-color:#f7f7f9; font-family:sans-serif; margin:2rem; }
h1 { text-align:center; color:#2c3e50; }
h2, h3 { color:#34495e; }
.kpis { display:flex; gap:1rem; }
.kpi-card { flex:1; background:#fff; padding:1rem; border-radius:12px; box-shadow:0 2px 6px rgba(0,0,0,0.1);
  text-align:center; border-left:6px solid #2c3e50; }
.kpi-value { font-size:1.6rem; font-weight:700; color:#2c3e50; }
.kpi-label { font-size:.9rem; color:#7f8c8d; }
.notice { color:#b9770e; }
</style>
</head>
<body>
<h1>{{TITLE}}</h1>
<h2>Dataset Summary</h2>
<p id="description"></p>
<div class="kpis" id="kpis"></div>
<h2>Visualization 1</h2>
<div id="chart1"></div>
<h3>Insights from Chart 1</h3>
<ul id="chart1-insights"></ul>
<h2>Visualization 2</h2>
<p class="notice" id="chart2-notice"></p>
<div id="chart2"></div>
<h3>Insights from Chart 2</h3>
<ul id="chart2-insights"></ul>
<script>
const data = {{PAYLOAD}};
const fmt = (n) => (n === null || n === undefined) ? "-" : Number(n).toLocaleString("en-US");
document.getElementById("description").textContent = data.description;
const s = data.summary;
const cards = [
  [fmt(s.total_facilities), "Total Facilities"],
  [(s.top_governorate ? s.top_governorate.area : "-") + " / " + (s.top_district ? s.top_district.area : "-"), "Top Governorate / Top District"],
  [fmt(s.avg_per_governorate), "Avg facilities per Governorate"],
  [fmt(s.avg_per_district), "Avg facilities per District"],
];
const kpis = document.getElementById("kpis");
for (const [value, label] of cards) {
  const card = document.createElement("div");
  card.className = "kpi-card";
  const v = document.createElement("div");
  v.className = "kpi-value";
  v.textContent = value;
  const l = document.createElement("div");
  l.className = "kpi-label";
  l.textContent = label;
  card.append(v, l);
  kpis.append(card);
}
const fill = (id, lines) => {
  const list = document.getElementById(id);
  for (const line of lines) {
    const item = document.createElement("li");
    item.textContent = line;
    list.append(item);
  }
};
Plotly.newPlot("chart1", data.chart1.data, data.chart1.layout, {responsive: true});
fill("chart1-insights", data.chart1Insights);
if (data.chart2) {
  Plotly.newPlot("chart2", data.chart2.data, data.chart2.layout, {responsive: true});
}
document.getElementById("chart2-notice").textContent = data.chart2Notice || "";
fill("chart2-insights", data.chart2Insights);
</script>
</body>
</html>
"#;
