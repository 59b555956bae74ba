//! Reduction operations for [`crate::types::DataSet`].

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
    /// Arithmetic mean of numeric values, ignoring nulls. Always `Float64`.
    Mean,
    /// Population variance (divide by `n`) of numeric values, ignoring nulls. Always `Float64`.
    Variance,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For every op other than `Count`, returns `Some(Value::Null)` if there are no non-null
///   values (an empty table included).
/// - For `Count`, always returns `Some(Value::Int64(row_count))`.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;

    match op {
        ReduceOp::Count => Some(Value::Int64(dataset.row_count() as i64)),
        ReduceOp::Sum | ReduceOp::Min | ReduceOp::Max => match dataset.schema.fields.get(idx) {
            Some(field) => reduce_numeric_typed(dataset, idx, field.data_type, op),
            None => None,
        },
        ReduceOp::Mean | ReduceOp::Variance => {
            let moments = dataset.reduce_rows(Moments::default(), |acc, row| {
                match row.get(idx).and_then(Value::as_f64) {
                    Some(v) => acc.push(v),
                    None => acc,
                }
            });
            let out = if op == ReduceOp::Mean {
                moments.mean()
            } else {
                moments.population_variance()
            };
            Some(out.map(Value::Float64).unwrap_or(Value::Null))
        }
    }
}

/// Running count/mean/sum of squared deviations (Welford).
#[derive(Debug, Clone, Copy, Default)]
struct Moments {
    n: u64,
    mean: f64,
    m2: f64,
}

impl Moments {
    fn push(self, x: f64) -> Self {
        let n = self.n + 1;
        let delta = x - self.mean;
        let mean = self.mean + delta / n as f64;
        let m2 = self.m2 + delta * (x - mean);
        Self { n, mean, m2 }
    }

    fn mean(&self) -> Option<f64> {
        (self.n > 0).then_some(self.mean)
    }

    fn population_variance(&self) -> Option<f64> {
        (self.n > 0).then(|| self.m2 / self.n as f64)
    }
}

fn reduce_numeric_typed(
    dataset: &DataSet,
    idx: usize,
    data_type: DataType,
    op: ReduceOp,
) -> Option<Value> {
    match data_type {
        DataType::Int64 => {
            let mut acc: Option<i64> = None;
            for row in &dataset.rows {
                match row.get(idx) {
                    Some(Value::Null) | None => {}
                    Some(Value::Int64(v)) => {
                        acc = Some(match (op, acc) {
                            (ReduceOp::Sum, Some(a)) => a + v,
                            (ReduceOp::Min, Some(a)) => a.min(*v),
                            (ReduceOp::Max, Some(a)) => a.max(*v),
                            (_, _) => *v,
                        });
                    }
                    Some(_) => {}
                }
            }
            Some(acc.map(Value::Int64).unwrap_or(Value::Null))
        }
        DataType::Float64 => {
            let mut acc: Option<f64> = None;
            for row in &dataset.rows {
                match row.get(idx) {
                    Some(Value::Null) | None => {}
                    Some(Value::Float64(v)) => {
                        acc = Some(match (op, acc) {
                            (ReduceOp::Sum, Some(a)) => a + v,
                            (ReduceOp::Min, Some(a)) => a.min(*v),
                            (ReduceOp::Max, Some(a)) => a.max(*v),
                            (_, _) => *v,
                        });
                    }
                    Some(_) => {}
                }
            }
            Some(acc.map(Value::Float64).unwrap_or(Value::Null))
        }
        DataType::Utf8 | DataType::Timestamp => Some(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::{ReduceOp, reduce};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn numeric_dataset_with_nulls() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("birth_year", DataType::Int64),
            Field::new("duration", DataType::Float64),
        ]);

        let rows = vec![
            vec![Value::Int64(1980), Value::Float64(10.0)],
            vec![Value::Int64(1992), Value::Null],
            vec![Value::Null, Value::Float64(5.5)],
        ];

        DataSet::new(schema, rows)
    }

    fn as_f64(v: Option<Value>) -> f64 {
        match v {
            Some(Value::Float64(x)) => x,
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn reduce_count_counts_rows() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "duration", ReduceOp::Count), Some(Value::Int64(3)));
    }

    #[test]
    fn reduce_sum_ignores_nulls_and_preserves_type() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "duration", ReduceOp::Sum), Some(Value::Float64(15.5)));
        assert_eq!(reduce(&ds, "birth_year", ReduceOp::Sum), Some(Value::Int64(3972)));
    }

    #[test]
    fn reduce_min_max_ignore_nulls() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "duration", ReduceOp::Min), Some(Value::Float64(5.5)));
        assert_eq!(reduce(&ds, "duration", ReduceOp::Max), Some(Value::Float64(10.0)));
        assert_eq!(reduce(&ds, "birth_year", ReduceOp::Min), Some(Value::Int64(1980)));
        assert_eq!(reduce(&ds, "birth_year", ReduceOp::Max), Some(Value::Int64(1992)));
    }

    #[test]
    fn reduce_mean_and_population_variance() {
        let schema = Schema::new(vec![Field::new("duration", DataType::Float64)]);
        let rows = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .into_iter()
            .map(|v| vec![Value::Float64(v)])
            .collect();
        let ds = DataSet::new(schema, rows);

        assert!((as_f64(reduce(&ds, "duration", ReduceOp::Mean)) - 5.0).abs() < 1e-12);
        assert!((as_f64(reduce(&ds, "duration", ReduceOp::Variance)) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn reduce_mean_widens_integers() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "birth_year", ReduceOp::Mean), Some(Value::Float64(1986.0)));
    }

    #[test]
    fn reduce_returns_none_for_missing_column() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "missing", ReduceOp::Count), None);
        assert_eq!(reduce(&ds, "missing", ReduceOp::Mean), None);
    }

    #[test]
    fn reduce_on_empty_dataset_returns_null() {
        let schema = Schema::new(vec![Field::new("duration", DataType::Float64)]);
        let ds = DataSet::new(schema, vec![]);
        assert_eq!(reduce(&ds, "duration", ReduceOp::Count), Some(Value::Int64(0)));
        let ops = [
            ReduceOp::Sum,
            ReduceOp::Min,
            ReduceOp::Max,
            ReduceOp::Mean,
            ReduceOp::Variance,
        ];
        for op in ops {
            assert_eq!(reduce(&ds, "duration", op), Some(Value::Null), "{op:?}");
        }
    }
}
