use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes a spreadsheet can hold.
/// Used as a map key by the label encoder, so `CellValue` must be `Ord + Hash`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so floats can take part in ordered collections --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell; `None` for text, booleans and nulls.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }
}

// ---------------------------------------------------------------------------
// Column – one named column of the table
// ---------------------------------------------------------------------------

/// Coarse column type used to decide which analysis steps apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// A column is numeric when it has at least one value and every
    /// non-null value is an integer or a float.
    pub fn kind(&self) -> ColumnKind {
        let mut non_null = self.values.iter().filter(|v| !v.is_null()).peekable();
        if non_null.peek().is_none() {
            return ColumnKind::Categorical;
        }
        if non_null.all(CellValue::is_numeric) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == ColumnKind::Numeric
    }

    /// Non-null values as `f64`, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_f64).collect()
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Rows × named columns, stored column-major. All columns have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
}

impl Dataset {
    pub fn from_columns(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].len() == w[1].len()),
            "columns must have equal length"
        );
        Self { columns }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Lookup by name; the analysis only ever needs the mutable form.
    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Numeric columns in table order.
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_numeric()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_kind_numeric_ignores_nulls() {
        let col = Column::new(
            "A",
            vec![CellValue::Float(1.5), CellValue::Null, CellValue::Integer(2)],
        );
        assert_eq!(col.kind(), ColumnKind::Numeric);
        assert_eq!(col.numeric_values(), vec![1.5, 2.0]);
        assert_eq!(col.null_count(), 1);
    }

    #[test]
    fn test_column_kind_mixed_is_categorical() {
        let col = Column::new(
            "A",
            vec![CellValue::Float(1.5), CellValue::Text("x".into())],
        );
        assert_eq!(col.kind(), ColumnKind::Categorical);
    }

    #[test]
    fn test_column_kind_all_null_is_categorical() {
        let col = Column::new("A", vec![CellValue::Null, CellValue::Null]);
        assert_eq!(col.kind(), ColumnKind::Categorical);
    }

    #[test]
    fn test_bool_column_is_categorical() {
        let col = Column::new("flag", vec![CellValue::Bool(true), CellValue::Bool(false)]);
        assert!(!col.is_numeric());
    }

    #[test]
    fn test_dataset_lookup() {
        let ds = Dataset::from_columns(vec![
            Column::new("A", vec![CellValue::Integer(1), CellValue::Integer(2)]),
            Column::new("Class", vec![CellValue::Text("x".into()), CellValue::Text("y".into())]),
        ]);
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.n_columns(), 2);
        assert_eq!(ds.column_names(), vec!["A", "Class"]);
        assert!(ds.column("Class").is_some());
        assert!(ds.column("missing").is_none());
        assert_eq!(ds.numeric_columns().len(), 1);
    }

    #[test]
    fn test_float_ordering_is_total() {
        let mut values = vec![
            CellValue::Float(2.0),
            CellValue::Null,
            CellValue::Float(f64::NAN),
            CellValue::Float(-1.0),
        ];
        values.sort();
        assert_eq!(values[0], CellValue::Null);
        assert_eq!(values[1], CellValue::Float(-1.0));
    }
}
