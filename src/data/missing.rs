use super::model::Dataset;

/// Percentage of null entries per column, highest first.
///
/// Columns with equal percentages keep their table order. An empty table
/// reports 0% for every column.
pub fn missing_percentages(dataset: &Dataset) -> Vec<(String, f64)> {
    let rows = dataset.n_rows();
    let mut percentages: Vec<(String, f64)> = dataset
        .columns
        .iter()
        .map(|c| {
            let pct = if rows == 0 {
                0.0
            } else {
                c.null_count() as f64 * 100.0 / rows as f64
            };
            (c.name.clone(), pct)
        })
        .collect();

    percentages.sort_by(|a, b| b.1.total_cmp(&a.1));
    percentages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_of_ten_missing_is_twenty_percent() {
        let mut a: Vec<CellValue> = (0..10).map(CellValue::Integer).collect();
        a[3] = CellValue::Null;
        a[7] = CellValue::Null;
        let mut b: Vec<CellValue> = (0..10).map(CellValue::Integer).collect();
        b[0] = CellValue::Null;
        let c: Vec<CellValue> = (0..10).map(CellValue::Integer).collect();

        let ds = Dataset::from_columns(vec![
            Column::new("C", c),
            Column::new("B", b),
            Column::new("A", a),
        ]);

        assert_eq!(
            missing_percentages(&ds),
            vec![
                ("A".to_string(), 20.0),
                ("B".to_string(), 10.0),
                ("C".to_string(), 0.0),
            ]
        );
    }

    #[test]
    fn test_ties_keep_column_order() {
        let ds = Dataset::from_columns(vec![
            Column::new("x", vec![CellValue::Integer(1)]),
            Column::new("y", vec![CellValue::Integer(2)]),
        ]);
        let names: Vec<String> = missing_percentages(&ds).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_empty_table() {
        let ds = Dataset::from_columns(vec![Column::new("x", Vec::new())]);
        assert_eq!(missing_percentages(&ds), vec![("x".to_string(), 0.0)]);
    }
}
