//! Printable HTML result document
//!
//! The document is a single self-contained HTML page with embedded CSS sized
//! for A4 printing. Each category gets its own table, and every category after
//! the first starts on a new printed page.

use std::fmt::{self, Write};

use tracing::{debug, info};

use super::columns::ColumnSet;
use super::ReportVariant;
use crate::app::models::{CategoryGroup, Event, Record};
use crate::app::services::results_query::{group_by_category, normalize_asset_link, rank_records};
use crate::config::Config;
use crate::constants::TOP5_LIMIT;

const STYLESHEET: &str = r#"
    body { font-family: Arial, sans-serif; margin: 0; padding: 0; box-sizing: border-box; color: #333; -webkit-print-color-adjust: exact !important; print-color-adjust: exact !important; }
    .page-content { padding: 15mm; }
    .header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; padding-bottom: 10px; border-bottom: 2px solid #FF5A1F; }
    .header .logo-left, .header .logo-right { height: 130px; width: auto; object-fit: contain; }
    .header-text { text-align: center; flex-grow: 1; }
    .header-text h1 { color: #FF5A1F; margin: 0; font-size: 1.8em; }
    .header-text h2 { color: #555; margin: 5px 0; font-size: 1.2em; }
    .header-text p { color: #777; margin: 0; font-size: 0.8em; }
    .category-table-container { margin-bottom: 30px; }
    .category-title { background-color: #f0f0f0; padding: 8px; text-align: center; margin-bottom: 10px; border-radius: 3px; font-size: 1.2em; font-weight: bold; border: 1px solid #ddd; page-break-after: avoid; }
    .no-results { text-align: center; color: #777; margin: 40px 0; }
    table { width: 100%; border-collapse: collapse; table-layout: fixed; margin: 0; font-size: 0.75em; }
    th, td { padding: 0.1em 0.3em; border: 1px solid #aaa; text-align: center; overflow-wrap: break-word; white-space: normal; vertical-align: top; }
    th { background-color: #ea580c; color: #fff; font-weight: bold; text-transform: uppercase; border: 1px solid #c2410c; }
    td.align-left, th.align-left { text-align: left; }
    tr:nth-child(even) { background-color: #f3f4f6; }
    th:nth-child(-n+3), td:nth-child(-n+3) { font-size: 0.7em; width: 5%; }
    th:nth-child(n+7), td:nth-child(n+7) { font-size: 0.7em; }
    .footer { text-align: center; margin-top: 40px; padding-top: 10px; border-top: 1px solid #eee; font-size: 0.7em; color: #777; }
    .whatsapp-btn { display: inline-block; background-color: #25D366; color: white; padding: 6px 12px; border-radius: 4px; text-decoration: none; margin-top: 8px; }
    .pdf-capture-btn { display: inline-block; background-color: #DC3545; color: white; padding: 6px 12px; border-radius: 4px; border: none; margin-top: 8px; margin-left: 10px; }
    @media print {
      html, body { width: auto !important; height: auto !important; margin: 0 !important; padding: 0 !important; }
      .page-content { padding: 0.5cm !important; }
      .category-table-container { margin-bottom: 15px !important; }
      .category-table-container.page-break { page-break-before: always !important; break-before: page !important; }
      tr { page-break-inside: avoid !important; break-inside: avoid !important; }
      thead { display: table-header-group !important; }
      .whatsapp-btn, .pdf-capture-btn { display: none !important; }
    }
"#;

/// Compose the result document of an event
///
/// `records` are the rows to report; for [`ReportVariant::SingleCategory`]
/// the caller has already filtered them to one category and the report label
/// names it. Records without a category are left out of the full and top 5
/// listings. An empty listing still yields a complete document with a notice.
pub fn compose_document(
    records: &[&Record],
    event: &Event,
    report_label: &str,
    variant: ReportVariant,
    config: &Config,
) -> String {
    let groups = build_groups(records, report_label, variant);
    let rows: Vec<&Record> = groups
        .iter()
        .flat_map(|group| group.records.iter().copied())
        .collect();
    let columns = ColumnSet::for_rows(event.sport_kind(), &rows);

    debug!(
        "Composing {:?} document: {} categories, {} rows, {} lap columns",
        variant,
        groups.len(),
        rows.len(),
        columns.laps.len()
    );

    let mut html = String::new();
    // Writing into a String cannot fail
    let _ = write_document(&mut html, &groups, &columns, event, report_label, config);

    info!(
        "Composed document '{}' for event {} ({} bytes)",
        report_label,
        event.id,
        html.len()
    );
    html
}

/// Category groups of a document, with the variant's row limit applied
pub fn build_groups<'a>(
    records: &[&'a Record],
    report_label: &str,
    variant: ReportVariant,
) -> Vec<CategoryGroup<'a>> {
    match variant {
        ReportVariant::Full => group_by_category(records, false),
        ReportVariant::Top5 => group_by_category(records, false)
            .into_iter()
            .map(|mut group| {
                group.records.truncate(TOP5_LIMIT);
                group
            })
            .collect(),
        ReportVariant::SingleCategory => {
            if records.is_empty() {
                return Vec::new();
            }
            let mut ranked = records.to_vec();
            rank_records(&mut ranked);
            vec![CategoryGroup {
                label: report_label.to_string(),
                records: ranked,
            }]
        }
    }
}

fn write_document(
    out: &mut String,
    groups: &[CategoryGroup<'_>],
    columns: &ColumnSet,
    event: &Event,
    report_label: &str,
    config: &Config,
) -> fmt::Result {
    let title = format!("Resultados de {}", event.name);
    let branding = &config.branding;

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"es\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "  <meta charset=\"UTF-8\">")?;
    writeln!(
        out,
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(
        out,
        "  <title>{} - {}</title>",
        html_escape(&title),
        html_escape(report_label)
    )?;
    writeln!(out, "  <style>{}", STYLESHEET)?;
    writeln!(
        out,
        "    @page {{ size: {}; margin: 0.8cm; }}",
        config.document.orientation.css_page_size()
    )?;
    writeln!(out, "  </style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<div class=\"page-content\">")?;

    // Header band
    writeln!(out, "  <div class=\"header\">")?;
    writeln!(
        out,
        "    <img src=\"{}\" alt=\"Logo {}\" class=\"logo-left\">",
        html_escape(&branding.logo),
        html_escape(&branding.name)
    )?;
    writeln!(out, "    <div class=\"header-text\">")?;
    writeln!(out, "      <h1>{}</h1>", html_escape(&branding.name))?;
    writeln!(out, "      <h2>{}</h2>", html_escape(&title))?;
    writeln!(out, "      <h3>{}</h3>", html_escape(report_label))?;
    writeln!(
        out,
        "      <p>Fecha del Evento: {}</p>",
        html_escape(display_date(&event.date))
    )?;
    writeln!(out, "    </div>")?;
    match event.logo.as_deref().and_then(normalize_asset_link) {
        Some(logo) => writeln!(
            out,
            "    <img src=\"{}\" alt=\"Logo Evento\" class=\"logo-right\">",
            html_escape(&logo)
        )?,
        None => writeln!(
            out,
            "    <div class=\"logo-right\" style=\"width: 130px; height: 130px;\"></div>"
        )?,
    }
    writeln!(out, "  </div>")?;

    if groups.is_empty() {
        writeln!(
            out,
            "  <p class=\"no-results\">No hay categorías con resultados para este reporte.</p>"
        )?;
    }

    for (index, group) in groups.iter().enumerate() {
        write_group(out, group, columns, index > 0)?;
    }

    // Footer
    writeln!(out, "  <div class=\"footer\">")?;
    writeln!(out, "    <p>Contacto: </p>")?;
    writeln!(
        out,
        "    <a href=\"{}\" class=\"whatsapp-btn\" target=\"_blank\">{}</a>",
        html_escape(&branding.contact_link),
        html_escape(&branding.contact_label)
    )?;
    writeln!(
        out,
        "    <button onclick=\"window.print()\" class=\"pdf-capture-btn\">Capturar Reporte PDF</button>"
    )?;
    writeln!(out, "  </div>")?;
    writeln!(out, "</div>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_group(
    out: &mut String,
    group: &CategoryGroup<'_>,
    columns: &ColumnSet,
    page_break: bool,
) -> fmt::Result {
    let container_class = if page_break {
        "category-table-container page-break"
    } else {
        "category-table-container"
    };

    writeln!(out, "  <div class=\"{}\">", container_class)?;
    writeln!(
        out,
        "    <h3 class=\"category-title\">{}</h3>",
        html_escape(&group.label)
    )?;
    writeln!(out, "    <table>")?;
    write!(out, "      <thead><tr>")?;
    for header in columns.headers() {
        if header.align_left {
            write!(out, "<th class=\"align-left\">{}</th>", html_escape(&header.text))?;
        } else {
            write!(out, "<th>{}</th>", html_escape(&header.text))?;
        }
    }
    writeln!(out, "</tr></thead>")?;
    writeln!(out, "      <tbody>")?;

    for record in &group.records {
        write!(out, "        <tr>")?;
        for cell in columns.cells(record) {
            if cell.align_left {
                write!(out, "<td class=\"align-left\">{}</td>", html_escape(&cell.text))?;
            } else {
                write!(out, "<td>{}</td>", html_escape(&cell.text))?;
            }
        }
        writeln!(out, "</tr>")?;
    }

    writeln!(out, "      </tbody>")?;
    writeln!(out, "    </table>")?;
    writeln!(out, "  </div>")
}

/// Event date for display, `"N/A"` when the sheet leaves it blank
pub fn display_date(date: &str) -> &str {
    if date.trim().is_empty() { "N/A" } else { date }
}

/// Escape text for HTML element content and quoted attributes
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
