use std::collections::BTreeMap;

use super::model::{CellValue, Column};

// ---------------------------------------------------------------------------
// Label encoding: categorical values → integer codes
// ---------------------------------------------------------------------------

/// Codes for a column of labels. `classes[code]` is the label a code stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoding {
    /// Distinct labels in order of first appearance.
    pub classes: Vec<CellValue>,
    /// One code per input value.
    pub codes: Vec<i64>,
}

impl LabelEncoding {
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

/// Assigns each distinct value the next free code the first time it is seen.
/// Equal values always get equal codes; nulls form a label of their own.
pub fn label_encode(values: &[CellValue]) -> LabelEncoding {
    let mut index: BTreeMap<&CellValue, i64> = BTreeMap::new();
    let mut classes = Vec::new();

    let codes = values
        .iter()
        .map(|value| {
            *index.entry(value).or_insert_with(|| {
                classes.push(value.clone());
                classes.len() as i64 - 1
            })
        })
        .collect();

    LabelEncoding { classes, codes }
}

/// Replaces a column's values with their label codes and returns the mapping.
pub fn encode_column(column: &mut Column) -> LabelEncoding {
    let encoding = label_encode(&column.values);
    column.values = encoding.codes.iter().copied().map(CellValue::Integer).collect();
    encoding
}

/// Occurrences per code, most frequent first; ties keep the lower code first.
pub fn value_counts(codes: &[i64]) -> Vec<(i64, usize)> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for code in codes {
        *counts.entry(*code).or_default() += 1;
    }
    let mut counts: Vec<(i64, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::Text(v.to_string())).collect()
    }

    #[test]
    fn test_first_seen_label_gets_zero() {
        let enc = label_encode(&text(&["x", "y", "x"]));
        assert_eq!(enc.codes, vec![0, 1, 0]);
        assert_eq!(enc.classes, text(&["x", "y"]));
        assert_eq!(enc.n_classes(), 2);
    }

    #[test]
    fn test_order_is_first_appearance_not_sorted() {
        let enc = label_encode(&text(&["SIRA", "BOMBAY", "CALI", "BOMBAY"]));
        assert_eq!(enc.codes, vec![0, 1, 2, 1]);
    }

    #[test]
    fn test_encoding_is_stable_on_reencode() {
        let mut column = Column::new("Class", text(&["b", "a", "c", "a"]));
        let first = encode_column(&mut column);
        assert_eq!(first.codes, vec![0, 1, 2, 1]);

        let second = encode_column(&mut column);
        assert_eq!(second.codes, first.codes);
        assert_eq!(
            second.classes,
            vec![CellValue::Integer(0), CellValue::Integer(1), CellValue::Integer(2)]
        );
        assert!(column.is_numeric());
    }

    #[test]
    fn test_nulls_are_their_own_label() {
        let enc = label_encode(&[
            CellValue::Null,
            CellValue::Text("x".into()),
            CellValue::Null,
        ]);
        assert_eq!(enc.codes, vec![0, 1, 0]);
    }

    #[test]
    fn test_empty_input() {
        let enc = label_encode(&[]);
        assert!(enc.codes.is_empty());
        assert!(enc.classes.is_empty());
    }

    #[test]
    fn test_value_counts_sorted_by_frequency() {
        assert_eq!(value_counts(&[0, 1, 0, 2, 1, 0]), vec![(0, 3), (1, 2), (2, 1)]);
        assert_eq!(value_counts(&[1, 0]), vec![(0, 1), (1, 1)]);
    }
}
