//! Static HTML report
//!
//! One self-contained page: summary cards, interpretation, a client-side
//! restaurant filter and the daily table. Clicking a date opens a modal with
//! the precomputed hour-by-hour detail, embedded as JSON.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};

use super::detail::{self, DayDetail};
use super::hourly::HourlyMap;
use super::summary::Summary;
use super::table::{NOT_AVAILABLE, danish_date, format_value};
use crate::Result;
use crate::models::ImpactRecord;

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; background: #F9F9F9; }
.container { max-width: 1170px; margin: 0 auto; background: white; box-shadow: 0 2px 8px rgba(0,0,0,0.1); }
.header { background: #DA291C; color: white; padding: 30px 40px; border-bottom: 4px solid #FFBC0D; }
.header h1 { font-size: 2.25em; margin-bottom: 8px; }
.header h2 { font-size: 1.125em; font-weight: 400; margin-bottom: 15px; }
.filters { display: flex; gap: 20px; padding: 25px 40px; border-bottom: 1px solid #e0e0e0; }
.filter-group { flex: 1; min-width: 200px; }
.filter-group label { display: block; font-size: 0.875rem; font-weight: 600; margin-bottom: 8px; }
.filter-group select { width: 100%; padding: 12px 16px; border: 2px solid #d1d1d1; border-radius: 0.25rem; font-size: 1rem; }
.filter-group select:focus { outline: none; border-color: #FFBC0D; }
.content { padding: 40px; background: #F9F9F9; }
.weather-details { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 20px; margin: 30px 0; }
.weather-card { background: white; border: 2px solid #e0e0e0; padding: 25px; border-radius: 0.25rem; }
.weather-card h3 { font-size: 0.875rem; color: #707070; margin-bottom: 12px; text-transform: uppercase; }
.weather-card .value { font-size: 2.5rem; font-weight: 700; color: #DA291C; }
.interpretation { background: #FFF8E1; border-left: 4px solid #FFBC0D; padding: 24px; margin: 30px 0; }
.interpretation p { line-height: 1.5; color: #505050; }
.interpretation .verdict { margin-top: 15px; font-weight: 600; }
.table-container { overflow-x: auto; margin-top: 20px; }
table { width: 100%; border-collapse: collapse; background: white; border: 1px solid #e0e0e0; font-size: 0.875rem; }
thead { background: #292929; color: white; }
th { padding: 14px 12px; text-align: left; font-size: 0.75rem; text-transform: uppercase; }
td { padding: 10px; border-bottom: 1px solid #f3f4f6; }
tbody tr.hidden { display: none; }
.restaurant-name { font-weight: 600; color: #1f2937; }
.date-link { color: #DA291C; font-weight: 600; cursor: pointer; text-decoration: none; }
.date-link:hover { color: #FFBC0D; text-decoration: underline; }
.weekday { color: #6b7280; }
.temp-positive { color: #ef4444; }
.temp-negative { color: #3b82f6; }
.impact-badge { display: inline-block; padding: 4px 10px; border-radius: 15px; font-size: 0.8em; font-weight: 600; text-transform: uppercase; }
.impact-better { background: #d4edda; color: #155724; }
.impact-worse { background: #f8d7da; color: #721c24; }
.impact-similar { background: #fff3cd; color: #856404; }
.impact-unknown { background: #e5e7eb; color: #374151; }
.modal { display: none; position: fixed; z-index: 1000; inset: 0; background: rgba(0,0,0,0.8); overflow-y: auto; }
.modal-content { background: white; margin: 50px auto; max-width: 1200px; border-radius: 15px; max-height: 90vh; overflow-y: auto; }
.modal-header { background: linear-gradient(135deg, #DA291C 0%, #FFC72C 100%); color: white; padding: 25px; position: relative; }
.close { position: absolute; right: 25px; top: 20px; font-size: 35px; cursor: pointer; }
.modal-body { padding: 30px; }
.hour-row { display: grid; grid-template-columns: 80px repeat(4, 1fr); gap: 10px; padding: 12px; border-bottom: 1px solid #e5e7eb; }
.hour-row.head { font-weight: 700; background: #1f2937; color: white; }
.hour-row.wetter { background: #fee2e2; border-left: 4px solid #ef4444; }
.hour-row.drier { background: #d1fae5; border-left: 4px solid #10b981; }
.footer { text-align: center; padding: 30px; background: #f9fafb; color: #6b7280; font-size: 0.9em; }
"#;

const SCRIPT: &str = r#"
function filterByRestaurant() {
    const restaurant = document.getElementById('restaurant-filter').value;
    document.querySelectorAll('.data-row').forEach(row => {
        const show = !restaurant || row.dataset.restaurant === restaurant;
        row.classList.toggle('hidden', !show);
    });
}

function escapeHtml(text) {
    const div = document.createElement('div');
    div.textContent = String(text);
    return div.innerHTML;
}

function fmt(value, fallback) {
    return value === null || value === undefined ? fallback : value.toFixed(1);
}

function showDetail(restaurant, date) {
    const modal = document.getElementById('detailModal');
    const body = document.getElementById('modal-body');
    document.getElementById('modal-title').textContent = 'Timeanalyse: ' + restaurant + ' - ' + date;

    if (!hourlyData[restaurant]) {
        body.innerHTML = '<p>Ingen timedata tilgængelig for denne restaurant.</p>';
        modal.style.display = 'block';
        return;
    }

    const year = Number(date.slice(0, 4));
    let html = '<h3>Vejr time for time - 24 timers sammenligning</h3>';
    html += '<p>Sammenligning med samme ugedag sidste år</p>';
    html += '<div class="hour-row head"><div>Time</div><div>Temp ' + year + ' (°C)</div><div>Temp ' + (year - 1)
        + ' (°C)</div><div>Nedbør ' + year + ' (mm)</div><div>Nedbør ' + (year - 1) + ' (mm)</div></div>';

    const detail = dayDetails[restaurant + '|' + date];
    if (!detail) {
        html += '<p>Kunne ikke finde timedata for denne dato.</p>';
    } else {
        detail.hours.forEach(hour => {
            const cls = hour.flag ? 'hour-row ' + hour.flag : 'hour-row';
            html += '<div class="' + cls + '"><div>' + escapeHtml(hour.label) + '</div>'
                + '<div>' + fmt(hour.forecast_temperature, 'N/A') + '°</div>'
                + '<div>' + fmt(hour.historical_temperature, 'N/A') + '°</div>'
                + '<div>' + fmt(hour.forecast_precipitation, '0.0') + ' mm</div>'
                + '<div>' + fmt(hour.historical_precipitation, '0.0') + ' mm</div></div>';
        });
        html += '<ul class="legend"><li>Rød baggrund = Mere nedbør i år</li><li>Grøn baggrund = Mindre nedbør i år</li></ul>';
    }

    body.innerHTML = html;
    modal.style.display = 'block';
}

function closeModal() {
    document.getElementById('detailModal').style.display = 'none';
}

document.querySelectorAll('.date-link').forEach(link => {
    link.addEventListener('click', event => {
        event.preventDefault();
        showDetail(link.dataset.restaurant, link.dataset.date);
    });
});

window.onclick = function (event) {
    if (event.target === document.getElementById('detailModal')) {
        closeModal();
    }
};
"#;

/// Escape text for element content and double-quoted attributes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON safe to place inside a `<script>` element
fn script_json(value: &impl serde::Serialize) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

fn delta_card(title: &str, value: Option<f64>, unit: &str) -> String {
    let shown = value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.1}{unit}"));
    format!(
        "<div class=\"weather-card\"><h3>{}</h3><div class=\"value\">{}</div></div>\n",
        escape_html(title),
        escape_html(&shown)
    )
}

/// Detail slices keyed `"{restaurant}|{YYYY-MM-DD}"`
fn day_details(records: &[ImpactRecord], hourly: &HourlyMap) -> BTreeMap<String, DayDetail> {
    records
        .iter()
        .filter_map(|record| {
            let pair = hourly.get(&record.restaurant)?;
            let detail = detail::day_detail(record, pair)?;
            Some((
                format!("{}|{}", record.restaurant, record.forecast_date.format("%Y-%m-%d")),
                detail,
            ))
        })
        .collect()
}

fn table_rows(records: &[ImpactRecord]) -> String {
    let mut rows = String::new();

    for (i, record) in records.iter().enumerate() {
        let name = escape_html(&record.restaurant);
        let iso = record.forecast_date.format("%Y-%m-%d").to_string();

        let first_of_group = i == 0 || records[i - 1].restaurant != record.restaurant;
        let restaurant_cell = if first_of_group {
            let span = records[i..]
                .iter()
                .take_while(|r| r.restaurant == record.restaurant)
                .count();
            format!("<td rowspan=\"{span}\" class=\"restaurant-name\">{name}</td>")
        } else {
            String::new()
        };

        let temp_class = match record.temperature_delta() {
            Some(d) if d > 0.0 => "temp-positive",
            Some(d) if d < 0.0 => "temp-negative",
            _ => "",
        };
        let (badge_class, badge_text) = record.impact.map_or(("unknown", NOT_AVAILABLE), |label| {
            (label.css_class(), label.danish())
        });

        rows.push_str(&format!(
            "<tr class=\"data-row\" data-restaurant=\"{name}\">{restaurant_cell}\
             <td><a class=\"date-link\" href=\"#\" data-restaurant=\"{name}\" data-date=\"{iso}\">{date}</a></td>\
             <td class=\"weekday\">{weekday}</td>\
             <td class=\"{temp_class}\">{ft}</td><td>{ht}</td>\
             <td>{fp}</td><td>{hp}</td><td>{fs}</td><td>{hs}</td>\
             <td><span class=\"impact-badge impact-{badge_class}\">{badge_text}</span></td></tr>\n",
            date = danish_date(record.forecast_date),
            weekday = escape_html(&record.weekday),
            ft = format_value(record.forecast.temperature),
            ht = format_value(record.historical.temperature),
            fp = format_value(record.forecast.precipitation),
            hp = format_value(record.historical.precipitation),
            fs = format_value(record.forecast.snowfall),
            hs = format_value(record.historical.snowfall),
        ));
    }

    rows
}

/// Render the full page
pub fn render_html(
    records: &[ImpactRecord],
    hourly: &HourlyMap,
    generated_at: NaiveDateTime,
) -> Result<String> {
    let summary = Summary::from_records(records);
    let year = records
        .first()
        .map_or(generated_at.year(), |r| r.forecast_date.year());
    let last = year - 1;

    let mut restaurants = summary.restaurants.clone();
    restaurants.sort();
    let options: String = restaurants
        .iter()
        .map(|r| {
            let r = escape_html(r);
            format!("<option value=\"{r}\">{r}</option>")
        })
        .collect();

    let interpretation = summary.interpretation().join(" ");

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"da\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("<title>Interaktiv Vejranalyse</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    html.push_str(&format!(
        "<div class=\"header\"><h1>Vejrpåvirkning for restauranter</h1>\
         <h2>Interaktiv Vejranalyse</h2>\
         <p>Senest opdateret: {}</p></div>\n",
        generated_at.format("%d.%m.%Y %H:%M")
    ));

    html.push_str(&format!(
        "<div class=\"filters\"><div class=\"filter-group\">\
         <label for=\"restaurant-filter\">Vælg Restaurant</label>\
         <select id=\"restaurant-filter\" onchange=\"filterByRestaurant()\">\
         <option value=\"\">Alle Restauranter</option>{options}</select></div></div>\n"
    ));

    html.push_str("<div class=\"content\">\n<div class=\"weather-details\">\n");
    html.push_str(&delta_card("Gns. Temperaturforskel", summary.avg_temperature_delta, "°C"));
    html.push_str(&delta_card("Gns. Nedbørsforskel", summary.avg_precipitation_delta, " mm"));
    html.push_str(&delta_card("Gns. Snefaldforskel", summary.avg_snowfall_delta, " cm"));
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<div class=\"interpretation\"><h3>Fortolkning</h3><p>{}</p><p class=\"verdict\">{}</p>\
         <p>Bedre: {} &middot; Dårligere: {} &middot; Lignende: {} &middot; Uden vurdering: {}</p></div>\n",
        escape_html(&interpretation),
        escape_html(summary.verdict_text()),
        summary.better,
        summary.worse,
        summary.similar,
        summary.unscored
    ));

    html.push_str("<h2>Detaljeret Daglig Analyse</h2>\n<p>Klik på en dato for at se timeanalyse</p>\n");
    html.push_str(&format!(
        "<div class=\"table-container\"><table id=\"data-table\"><thead><tr>\
         <th>Restaurant</th><th>Dato</th><th>Ugedag</th>\
         <th>Temp {year} (°C)</th><th>Temp {last} (°C)</th>\
         <th>Nedbør {year} (mm)</th><th>Nedbør {last} (mm)</th>\
         <th>Snefald {year} (cm)</th><th>Snefald {last} (cm)</th>\
         <th>Impact</th></tr></thead>\n<tbody>\n"
    ));
    html.push_str(&table_rows(records));
    html.push_str("</tbody></table></div>\n</div>\n");

    html.push_str("<div class=\"footer\"><p>Data kilder: Open-Meteo API</p></div>\n</div>\n");

    html.push_str(
        "<div id=\"detailModal\" class=\"modal\"><div class=\"modal-content\">\
         <div class=\"modal-header\"><span class=\"close\" onclick=\"closeModal()\">&times;</span>\
         <h2 id=\"modal-title\">Detaljeret Timeanalyse</h2></div>\
         <div class=\"modal-body\" id=\"modal-body\"></div></div></div>\n",
    );

    html.push_str("<script>\n");
    html.push_str(&format!("const hourlyData = {};\n", script_json(hourly)?));
    html.push_str(&format!(
        "const dayDetails = {};\n",
        script_json(&day_details(records, hourly))?
    ));
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    Ok(html)
}
