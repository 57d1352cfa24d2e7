//! # Plan Rendering
//!
//! Turns a [`CutPlan`] into something a person can take to the saw: a
//! fixed-width text table for the terminal, or an HTML table for a browser.
//!
//! Both renderers use the same columns: repetitions, stock length, wasted
//! material, and the parts cut from each bar joined by ` - `.

use crate::job::JobSettings;
use crate::planner::CutPlan;
use crate::units::format_number;

/// Column headers shared by both renderers
const COLUMNS: [&str; 4] = ["reps", "stock_length", "wasted_material", "parts"];

/// Render a plan as an HTML table.
///
/// Numbers are printed without unit suffixes so the table can be pasted into
/// a spreadsheet.
pub fn render_html(plan: &CutPlan, settings: &JobSettings) -> String {
    let mut html = String::from("<table>\n<tr>");
    for column in COLUMNS {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr>\n");

    for cut in &plan.cuts {
        let cols = [
            cut.reps.to_string(),
            format_number(cut.stock_length, settings.precision),
            format_number(cut.waste.material, settings.precision),
            parts_summary(cut.parts.iter().map(|p| p.length), settings.precision),
        ];
        html.push_str("<tr>");
        for col in cols {
            html.push_str(&format!("<td>{}</td>", escape_html(&col)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n");
    html.push_str(&format!(
        "<p>{} parts, {} patterns, {} bars, yield {}%</p>\n",
        plan.total_parts,
        plan.total_operations,
        plan.bar_count(),
        format_number(plan.yield_pct, 2)
    ));
    html
}

/// Render a plan as a fixed-width text table with a summary footer.
pub fn render_text(plan: &CutPlan, settings: &JobSettings) -> String {
    let unit = settings.unit;
    let rows: Vec<[String; 4]> = plan
        .cuts
        .iter()
        .map(|cut| {
            let parts = cut
                .parts
                .iter()
                .map(|p| match &p.label {
                    Some(label) => format!("{} ({})", unit.format(p.length, settings.precision), label),
                    None => unit.format(p.length, settings.precision),
                })
                .collect::<Vec<_>>()
                .join(" - ");
            [
                format!("{}x", cut.reps),
                unit.format(cut.stock_length, settings.precision),
                unit.format(cut.waste.material, settings.precision),
                parts,
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&COLUMNS.map(String::from), &widths));
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }
    out.push('\n');

    for usage in &plan.total_stock {
        out.push_str(&format!(
            "Stock: {} x {}\n",
            usage.count,
            unit.format(usage.length, settings.precision)
        ));
    }
    out.push_str(&format!(
        "Parts: {}  Patterns: {}  Bars: {}  Yield: {}%\n",
        plan.total_parts,
        plan.total_operations,
        plan.bar_count(),
        format_number(plan.yield_pct, 2)
    ));
    out
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

fn parts_summary(lengths: impl Iterator<Item = f64>, precision: usize) -> String {
    lengths
        .map(|l| format_number(l, precision))
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Escape characters with special meaning in HTML text
fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::PartRequest;
    use crate::planner::{generate, CutListInput};
    use crate::stock::StockRequest;

    fn sample_plan() -> CutPlan {
        generate(&CutListInput {
            kerf: 0.125,
            stock: vec![StockRequest::unlimited(96.0).with_label("2x4")],
            parts: vec![
                PartRequest::new(56.75, 2).with_label("Post stretcher"),
                PartRequest::new(20.0, 2).with_label("Floor support"),
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_html_table() {
        let html = render_html(&sample_plan(), &JobSettings::default());
        assert!(html.starts_with("<table>"));
        assert!(html.contains("<th>reps</th><th>stock_length</th><th>wasted_material</th><th>parts</th>"));
        assert!(html.contains("<tr><td>2</td><td>96</td><td>19</td><td>56.75 - 20</td></tr>"));
        assert!(html.contains("4 parts, 1 patterns, 2 bars"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>&\"x'"), "&lt;b&gt;&amp;&quot;x&#39;");
        assert_eq!(escape_html("56.75 - 20"), "56.75 - 20");
    }

    #[test]
    fn test_text_table() {
        let text = render_text(&sample_plan(), &JobSettings::default());
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("reps"));
        assert!(lines.next().unwrap().chars().all(|c| c == '-'));
        assert!(text.contains("2x"));
        assert!(text.contains("56.75\" (Post stretcher) - 20\" (Floor support)"));
        assert!(text.contains("Stock: 2 x 96\""));
        assert!(text.contains("Yield: 79.95%"));
    }

    #[test]
    fn test_empty_plan_renders() {
        let plan = generate(&CutListInput::default()).unwrap();
        let text = render_text(&plan, &JobSettings::default());
        assert!(text.contains("Parts: 0"));
        let html = render_html(&plan, &JobSettings::default());
        assert!(html.contains("</table>"));
    }
}
