use macro_compass::grading::Grade;
use macro_compass::views::{Comparison, ExplorerPanel, ExplorerView, Rubric, Scorecard, Side};
use std::io::{self, Write};

pub(crate) const NO_DATA: &str = "No data available.";

fn value_label(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| Grade::UNAVAILABLE_LABEL.to_string())
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub(crate) fn scorecard<W: Write>(out: &mut W, card: &Scorecard) -> io::Result<()> {
    writeln!(
        out,
        "Macro scorecard: {} ({}), {}",
        card.country.display_name,
        card.country.provider_code,
        card.selection.label()
    )?;
    for score in &card.indicators {
        let year = score
            .year
            .map(|year| format!(" ({year})"))
            .unwrap_or_default();
        writeln!(
            out,
            "- {}: {}{} -> {}",
            score.indicator,
            value_label(score.value),
            year,
            score.grade
        )?;
    }

    writeln!(out, "\nOverall grade: {}", card.overall)?;
    writeln!(out, "Strengths: {}", list_or_none(&card.strengths))?;
    writeln!(out, "Risks: {}", list_or_none(&card.risks))?;
    writeln!(out, "\n{}", card.summary_text())
}

pub(crate) fn comparison<W: Write>(out: &mut W, comparison: &Comparison) -> io::Result<()> {
    let left = &comparison.left.country.display_name;
    let right = &comparison.right.country.display_name;
    writeln!(
        out,
        "Comparison: {left} vs {right} ({})",
        comparison.left.selection.label()
    )?;

    for row in &comparison.rows {
        let advantage = match row.advantage {
            Some(Side::Left) => format!(" -> advantage {left}"),
            Some(Side::Right) => format!(" -> advantage {right}"),
            None => String::new(),
        };
        writeln!(
            out,
            "- {}: {left} {} [{}] | {right} {} [{}]{advantage}",
            row.indicator,
            value_label(row.left_value),
            row.left_grade,
            value_label(row.right_value),
            row.right_grade,
        )?;
    }

    if comparison.overall_available() {
        writeln!(
            out,
            "\nOverall: {left} {} | {right} {}",
            comparison.left.overall, comparison.right.overall
        )
    } else {
        writeln!(out, "\nOverall: {} (missing data)", Grade::UNAVAILABLE_LABEL)
    }
}

fn panel_text<W: Write>(out: &mut W, panel: &ExplorerPanel) -> io::Result<()> {
    writeln!(out, "\n{} ({})", panel.indicator, panel.unit)?;
    if !panel.has_data() {
        return writeln!(out, "{NO_DATA}");
    }

    writeln!(out, "year\t{}", panel.countries.join("\t"))?;
    for row in &panel.rows {
        let cells: Vec<String> = row.values.iter().map(|v| value_label(*v)).collect();
        writeln!(out, "{}\t{}", row.year, cells.join("\t"))?;
    }
    Ok(())
}

pub(crate) fn explorer<W: Write>(out: &mut W, view: &ExplorerView) -> io::Result<()> {
    let names: Vec<&str> = view
        .countries
        .iter()
        .map(|country| country.display_name.as_str())
        .collect();
    writeln!(out, "Explorer: {} ({})", names.join(", "), view.years)?;
    if view.truncated {
        writeln!(out, "Only the first {} countries are shown.", names.len())?;
    }
    for panel in &view.panels {
        panel_text(out, panel)?;
    }
    Ok(())
}

/// Panels as consecutive CSV tables, each introduced by a `# name` line.
pub(crate) fn explorer_csv<W: Write>(out: &mut W, view: &ExplorerView) -> Result<(), csv::Error> {
    for (index, panel) in view.panels.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        writeln!(out, "# {}", panel.indicator)?;
        panel.write_csv(&mut *out)?;
    }
    Ok(())
}

pub(crate) fn rubric<W: Write>(out: &mut W, rubric: &Rubric) -> io::Result<()> {
    writeln!(out, "{}", rubric.title)?;
    for row in &rubric.rows {
        writeln!(out, "\n{} ({})", row.indicator, row.polarity_label)?;
        for cell in &row.bands {
            writeln!(out, "  {}: {}", cell.grade, cell.range)?;
        }
    }
    Ok(())
}
