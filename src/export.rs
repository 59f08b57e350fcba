use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::report::DashboardData;
use crate::squad::TeamAgeRow;

/// Row counts per sheet, minus headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub scorer_rows: usize,
    pub zone_rows: usize,
    pub category_rows: usize,
    pub age_rows: usize,
}

/// Writes the dashboard tables to an xlsx workbook: scorer table, zone
/// statistics, category totals, and the age comparison when supplied.
pub fn export_dashboard(
    path: &Path,
    data: &DashboardData,
    ages: &[TeamAgeRow],
) -> Result<ExportReport> {
    let mut scorer_rows = vec![to_row(&[
        "Team", "Spieler", "Tore", "Kategorie", "Gegner", "Videos",
    ])];
    for report in &data.reports {
        for row in &report.scorers {
            scorer_rows.push(vec![
                report.team.clone(),
                row.scorer.clone(),
                row.goals.to_string(),
                row.category.label().to_string(),
                row.opponent.clone(),
                row.files.join(", "),
            ]);
        }
    }

    let mut zone_rows = vec![to_row(&[
        "Team",
        "Eigene innen",
        "Eigene außerhalb",
        "Eigene gesamt",
        "Gegentore innen",
        "Gegentore außerhalb",
        "Gegentore gesamt",
    ])];
    for report in &data.reports {
        zone_rows.push(vec![
            report.team.clone(),
            report.zones.own.inside.to_string(),
            report.zones.own.outside.to_string(),
            report.zones.own.total.to_string(),
            report.zones.conceded.inside.to_string(),
            report.zones.conceded.outside.to_string(),
            report.zones.conceded.total.to_string(),
        ]);
    }
    zone_rows.push(vec![
        "Alle Teams".to_string(),
        data.league_own.inside.to_string(),
        data.league_own.outside.to_string(),
        data.league_own.total.to_string(),
        data.league_conceded.inside.to_string(),
        data.league_conceded.outside.to_string(),
        data.league_conceded.total.to_string(),
    ]);

    let mut category_rows = vec![to_row(&["Team", "Kategorie", "Clips"])];
    for report in &data.reports {
        for (category, count) in &report.category_counts {
            category_rows.push(vec![
                report.team.clone(),
                category.label().to_string(),
                count.to_string(),
            ]);
        }
    }

    let mut age_rows = vec![to_row(&[
        "Team",
        "Altersdurchschnitt",
        "Q1 (Jan-Mär)",
        "Q2 (Apr-Jun)",
        "Q3 (Jul-Sep)",
        "Q4 (Okt-Dez)",
        "Gesamt",
    ])];
    for row in ages {
        age_rows.push(vec![
            row.team.clone(),
            format!("{:.2}", row.average_age),
            row.quarters.q1.to_string(),
            row.quarters.q2.to_string(),
            row.quarters.q3.to_string(),
            row.quarters.q4.to_string(),
            row.quarters.total.to_string(),
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Torschuetzen")?;
        write_rows(sheet, &scorer_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Zonen")?;
        write_rows(sheet, &zone_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Kategorien")?;
        write_rows(sheet, &category_rows)?;
    }
    if !ages.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Altersdurchschnitt")?;
        write_rows(sheet, &age_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        scorer_rows: scorer_rows.len().saturating_sub(1),
        zone_rows: zone_rows.len().saturating_sub(1),
        category_rows: category_rows.len().saturating_sub(1),
        age_rows: if ages.is_empty() {
            0
        } else {
            age_rows.len().saturating_sub(1)
        },
    })
}

fn to_row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
