use colored::{Color, ColoredString, Colorize};
use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub status: String,
    pub purchase_date: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub value: f64,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub asset_count: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub asset_count: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub charts: DashboardCharts,
    pub activities: Vec<Activity>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(deserialize_with = "lenient_count")]
    pub total_assets: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub total_categories: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub total_locations: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub maintenance_needed: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardCharts {
    pub categories: ChartSeries,
    pub locations: ChartSeries,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: String,
    pub category: String,
    pub location: String,
    pub status: String,
    pub purchase_date: String,
    pub value: f64,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MutationAck {
    pub success: bool,
}

// sheet-backed numbers arrive as numbers, numeric strings, or not at all
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

const WIRE_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DISPLAY_DATE: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

pub fn format_date(raw: Option<&str>) -> String {
    let value = match raw.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return "-".to_string(),
    };
    let parsed = OffsetDateTime::parse(value, &Rfc3339)
        .map(|stamp| stamp.date())
        .or_else(|_| Date::parse(value, WIRE_DATE));
    match parsed {
        Ok(date) => date
            .format(DISPLAY_DATE)
            .unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

pub fn format_today() -> String {
    let today = OffsetDateTime::now_utc().date();
    today
        .format(DISPLAY_DATE)
        .unwrap_or_else(|_| today.to_string())
}

pub fn format_money(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn display_or_dash(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

fn status_color(status: &str) -> Option<Color> {
    match status.to_lowercase().as_str() {
        "active" => Some(Color::Green),
        "maintenance" => Some(Color::Yellow),
        "retired" => Some(Color::Red),
        _ => None,
    }
}

pub fn status_badge(status: &str) -> ColoredString {
    match status_color(status) {
        Some(color) => status.color(color),
        None => status.normal(),
    }
}

pub fn activity_glyph(kind: &str) -> &'static str {
    match kind {
        "create" => "+",
        "update" => "~",
        "delete" => "-",
        "maintenance" => "!",
        "location" => "@",
        _ => "*",
    }
}
