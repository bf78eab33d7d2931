use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::model::{self, Asset, Category, DashboardData, Location};
use crate::view::Page;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "table" | "text" | "txt" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

pub trait Renderer {
    fn assets(&self, page: &Page<&Asset>);
    fn categories(&self, categories: &[Category]);
    fn locations(&self, locations: &[Location]);
    fn dashboard(&self, data: &DashboardData);
    fn report(&self, report: &Value, generated_on: &str);
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Table => Box::new(TableRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

pub struct TableRenderer;

impl Renderer for TableRenderer {
    fn assets(&self, page: &Page<&Asset>) {
        print!("{}", render_asset_table(page));
    }

    fn categories(&self, categories: &[Category]) {
        print!("{}", render_category_table(categories));
    }

    fn locations(&self, locations: &[Location]) {
        print!("{}", render_location_table(locations));
    }

    fn dashboard(&self, data: &DashboardData) {
        print!("{}", render_dashboard(data));
    }

    fn report(&self, report: &Value, generated_on: &str) {
        print!("{}", render_report(report, generated_on));
    }
}

pub struct JsonRenderer;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetPageDoc<'a> {
    items: &'a [&'a Asset],
    current_page: usize,
    total_pages: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportDoc<'a> {
    generated_on: &'a str,
    report: &'a Value,
}

fn print_json<T: Serialize>(doc: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(doc).unwrap_or_else(|_| "{}".to_string())
    );
}

impl Renderer for JsonRenderer {
    fn assets(&self, page: &Page<&Asset>) {
        print_json(&AssetPageDoc {
            items: &page.items,
            current_page: page.current_page,
            total_pages: page.total_pages,
        });
    }

    fn categories(&self, categories: &[Category]) {
        print_json(&categories);
    }

    fn locations(&self, locations: &[Location]) {
        print_json(&locations);
    }

    fn dashboard(&self, data: &DashboardData) {
        print_json(data);
    }

    fn report(&self, report: &Value, generated_on: &str) {
        print_json(&ReportDoc {
            generated_on,
            report,
        });
    }
}

const COLUMN_GAP: &str = "  ";

fn column_widths(header: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }
    widths
}

fn push_header(out: &mut String, header: &[&str], widths: &[usize]) {
    for (i, title) in header.iter().enumerate() {
        out.push_str(&format!("{:<width$}", title, width = widths[i]));
        if i + 1 < header.len() {
            out.push_str(COLUMN_GAP);
        }
    }
    out.push('\n');
    let rule: usize = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (header.len() - 1);
    out.push_str(&"-".repeat(rule));
    out.push('\n');
}

// the status column is colored after padding so alignment ignores the
// escape codes
fn push_row(out: &mut String, row: &[String], widths: &[usize], badge_column: Option<usize>) {
    for (i, cell) in row.iter().enumerate() {
        if badge_column == Some(i) {
            out.push_str(&model::status_badge(cell).to_string());
            for _ in cell.len()..widths[i] {
                out.push(' ');
            }
        } else {
            out.push_str(&format!("{:<width$}", cell, width = widths[i]));
        }
        if i + 1 < row.len() {
            out.push_str(COLUMN_GAP);
        }
    }
    out.push('\n');
}

pub fn render_asset_table(page: &Page<&Asset>) -> String {
    let header = [
        "ID",
        "Name",
        "Category",
        "Location",
        "Status",
        "Purchase Date",
        "Value",
    ];
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|asset| {
            vec![
                asset.id.clone(),
                asset.name.clone(),
                asset.category.clone(),
                asset.location.clone(),
                asset.status.clone(),
                model::format_date(asset.purchase_date.as_deref()),
                model::format_money(asset.value),
            ]
        })
        .collect();

    let widths = column_widths(&header, &rows);
    let mut out = String::new();
    push_header(&mut out, &header, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths, Some(4));
    }
    out.push_str(&format!(
        "Page {} of {}\n",
        page.current_page, page.total_pages
    ));
    out
}

pub fn render_category_table(categories: &[Category]) -> String {
    let header = ["ID", "Name", "Description", "Assets"];
    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|category| {
            vec![
                category.id.clone(),
                category.name.clone(),
                model::display_or_dash(category.description.as_deref()).to_string(),
                category.asset_count.to_string(),
            ]
        })
        .collect();

    let widths = column_widths(&header, &rows);
    let mut out = String::new();
    push_header(&mut out, &header, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths, None);
    }
    out
}

pub fn render_location_table(locations: &[Location]) -> String {
    let header = ["ID", "Name", "Address", "Assets"];
    let rows: Vec<Vec<String>> = locations
        .iter()
        .map(|location| {
            vec![
                location.id.clone(),
                location.name.clone(),
                model::display_or_dash(location.address.as_deref()).to_string(),
                location.asset_count.to_string(),
            ]
        })
        .collect();

    let widths = column_widths(&header, &rows);
    let mut out = String::new();
    push_header(&mut out, &header, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths, None);
    }
    out
}

const BAR_WIDTH: usize = 24;

fn push_bar_series(out: &mut String, title: &str, series: &crate::model::ChartSeries) {
    out.push_str(&format!("{}\n", title.bold()));
    let peak = series.data.iter().copied().max().unwrap_or(0);
    let label_width = series
        .labels
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(0);
    for (label, count) in series.labels.iter().zip(series.data.iter()) {
        let bar = if peak == 0 {
            0
        } else {
            ((count * BAR_WIDTH as u64 + peak - 1) / peak) as usize
        };
        out.push_str(&format!(
            "  {:<label_width$}  {} {}\n",
            label,
            "#".repeat(bar),
            count
        ));
    }
    if series.labels.is_empty() {
        out.push_str("  (no data)\n");
    }
}

pub fn render_dashboard(data: &DashboardData) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Overview".bold()));
    out.push_str(&format!("  {:<20}: {}\n", "Total assets", data.stats.total_assets));
    out.push_str(&format!("  {:<20}: {}\n", "Categories", data.stats.total_categories));
    out.push_str(&format!("  {:<20}: {}\n", "Locations", data.stats.total_locations));
    out.push_str(&format!(
        "  {:<20}: {}\n",
        "Maintenance needed", data.stats.maintenance_needed
    ));
    out.push('\n');

    push_bar_series(&mut out, "Assets by Category", &data.charts.categories);
    out.push('\n');
    push_bar_series(&mut out, "Assets by Location", &data.charts.locations);
    out.push('\n');

    out.push_str(&format!("{}\n", "Recent Activity".bold()));
    for activity in &data.activities {
        out.push_str(&format!(
            "  [{}] {} ({})\n",
            model::activity_glyph(&activity.kind),
            activity.description,
            model::format_date(activity.timestamp.as_deref())
        ));
    }
    if data.activities.is_empty() {
        out.push_str("  (none)\n");
    }
    out
}

pub fn render_report(report: &Value, generated_on: &str) -> String {
    let body = serde_json::to_string_pretty(report).unwrap_or_else(|_| report.to_string());
    format!(
        "{}\nGenerated on: {}\n\n{}\n",
        "Report Generated".bold(),
        generated_on,
        body
    )
}
