use crate::core::financial_year::financial_year;
use crate::domain::model::{AnnotatedRecord, ProjectionRecord, ProjectionSet};

/// Copies `rows` in order, adding the financial-year label of each row's year.
pub fn annotate(rows: &[ProjectionRecord]) -> Vec<AnnotatedRecord> {
    rows.iter()
        .map(|row| AnnotatedRecord {
            record: row.clone(),
            financial_year: financial_year(row.year),
        })
        .collect()
}

pub fn annotate_set(projections: &ProjectionSet<ProjectionRecord>) -> ProjectionSet<AnnotatedRecord> {
    projections
        .iter()
        .map(|(profession, rows)| (profession.clone(), annotate(rows)))
        .collect()
}

/// Splits flat rows into one table per profession, keeping row order within each table.
pub fn group_by_profession(rows: Vec<ProjectionRecord>) -> ProjectionSet<ProjectionRecord> {
    let mut projections = ProjectionSet::new();
    for row in rows {
        projections
            .entry(row.profession.clone())
            .or_insert_with(Vec::new)
            .push(row);
    }
    projections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Scenario;

    fn record(profession: &str, scenario: Scenario, year: i32, total: f64) -> ProjectionRecord {
        ProjectionRecord {
            profession: profession.to_string(),
            scenario,
            year,
            total_registrants: total,
        }
    }

    #[test]
    fn test_annotate_preserves_rows_and_order() {
        let rows = vec![
            record("Nurse", Scenario::Optimistic, 2027, 30.0),
            record("Nurse", Scenario::Baseline, 2025, 10.0),
            record("Nurse", Scenario::Pessimistic, 2099, 20.0),
        ];

        let annotated = annotate(&rows);

        assert_eq!(annotated.len(), rows.len());
        for (original, annotated) in rows.iter().zip(&annotated) {
            assert_eq!(&annotated.record, original);
        }
        let labels: Vec<_> = annotated.iter().map(|r| r.financial_year.as_str()).collect();
        assert_eq!(labels, ["2027/28", "2025/26", "2099/00"]);
    }

    #[test]
    fn test_annotate_does_not_touch_input() {
        let rows = vec![record("Doctor", Scenario::Baseline, 2025, 1.5)];
        let before = rows.clone();
        let _ = annotate(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_annotate_empty_table() {
        assert!(annotate(&[]).is_empty());
    }

    #[test]
    fn test_group_by_profession_keeps_row_order() {
        let rows = vec![
            record("Nurse", Scenario::Baseline, 2025, 1.0),
            record("Doctor", Scenario::Baseline, 2025, 2.0),
            record("Nurse", Scenario::Baseline, 2026, 3.0),
        ];

        let grouped = group_by_profession(rows);

        assert_eq!(grouped.len(), 2);
        let nurse_years: Vec<_> = grouped["Nurse"].iter().map(|r| r.year).collect();
        assert_eq!(nurse_years, [2025, 2026]);
        assert_eq!(grouped["Doctor"].len(), 1);
    }

    #[test]
    fn test_annotate_set_covers_every_table() {
        let grouped = group_by_profession(vec![
            record("Nurse", Scenario::Baseline, 2025, 1.0),
            record("Doctor", Scenario::Optimistic, 2030, 2.0),
        ]);

        let annotated = annotate_set(&grouped);

        assert_eq!(annotated.keys().collect::<Vec<_>>(), ["Doctor", "Nurse"]);
        assert_eq!(annotated["Doctor"][0].financial_year, "2030/31");
        assert_eq!(annotated["Nurse"][0].financial_year, "2025/26");
    }
}
