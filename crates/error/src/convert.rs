use crate::{BenchError, ErrorCode, ErrorContext};
use datafusion::error::DataFusionError;

impl From<DataFusionError> for BenchError {
    fn from(err: DataFusionError) -> Self {
        // Context/Diagnostic wrappers hide the variant that tells us the phase.
        let root = err.find_root();
        match root {
            DataFusionError::SchemaError(schema_err, _) => match schema_err.as_ref() {
                datafusion::common::SchemaError::FieldNotFound {
                    field,
                    valid_fields,
                } => {
                    let available: Vec<String> =
                        valid_fields.iter().map(|f| f.name.clone()).collect();

                    let hint = find_closest_match(&field.name, &available);

                    let mut error = BenchError::new(
                        ErrorCode::FieldNotFound,
                        format!("Field '{}' not found", field.name),
                    )
                    .with_context(ErrorContext::FieldNotFound {
                        field: field.name.clone(),
                        available_fields: available,
                    });

                    if let Some(closest) = hint {
                        error = error.with_hint(format!("Did you mean '{}'?", closest));
                    }
                    error
                }
                _ => BenchError::new(ErrorCode::InvalidPlan, schema_err.to_string()),
            },
            DataFusionError::Plan(msg) if is_type_error(msg) => {
                BenchError::new(ErrorCode::TypeMismatch, msg.clone())
            }
            DataFusionError::Plan(msg) => BenchError::new(ErrorCode::InvalidPlan, msg.clone()),
            DataFusionError::Execution(msg) => {
                BenchError::new(ErrorCode::ExecutionFailed, msg.clone())
            }
            DataFusionError::ArrowError(..) => {
                BenchError::new(ErrorCode::ExecutionFailed, root.to_string())
            }
            DataFusionError::ResourcesExhausted(msg) => {
                BenchError::new(ErrorCode::ResourceExhausted, msg.clone())
            }
            DataFusionError::ObjectStore(..) => {
                BenchError::new(ErrorCode::ObjectStore, root.to_string())
            }
            DataFusionError::IoError(..) | DataFusionError::ParquetError(..) => {
                BenchError::new(ErrorCode::TableUnreadable, root.to_string())
            }
            _ => BenchError::new(ErrorCode::DataFusionInternal, err.to_string()),
        }
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::new(ErrorCode::Io, err.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::new(ErrorCode::SerializationFailed, err.to_string())
    }
}

fn is_type_error(msg: &str) -> bool {
    msg.contains("Cannot infer common") || msg.contains("coerc")
}

/// Closest candidate within an edit distance of 3.
pub fn find_closest_match(target: &str, options: &[String]) -> Option<String> {
    let mut best_match: Option<&str> = None;
    let mut min_distance = usize::MAX;

    for option in options {
        let distance = levenshtein(target, option);
        if distance < min_distance && distance <= 3 {
            min_distance = distance;
            best_match = Some(option.as_str());
        }
    }

    best_match.map(|s| s.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("book", "back"), 2);
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_find_closest_match() {
        let options = vec![
            "l_shipdate".to_string(),
            "l_commitdate".to_string(),
            "l_quantity".to_string(),
        ];

        assert_eq!(
            find_closest_match("l_shipdate", &options),
            Some("l_shipdate".to_string())
        );
        assert_eq!(
            find_closest_match("l_shipdat", &options),
            Some("l_shipdate".to_string())
        );
        assert_eq!(find_closest_match("o_orderpriority", &options), None);
    }

    #[test]
    fn test_datafusion_error_mappings() {
        use datafusion::common::Column;

        let plan_err = DataFusionError::Plan("Join keys must be columns".to_string());
        let bench_err: BenchError = plan_err.into();
        assert_eq!(bench_err.code, ErrorCode::InvalidPlan);
        assert_eq!(bench_err.message, "Join keys must be columns");

        let field = Column::from_name("l_shipdat");
        let valid_fields = vec![Column::from_name("l_shipdate"), Column::from_name("l_tax")];

        let schema_err = DataFusionError::SchemaError(
            Box::new(datafusion::common::SchemaError::FieldNotFound {
                field: Box::new(field),
                valid_fields: valid_fields.clone(),
            }),
            Box::new(None),
        );

        let bench_err: BenchError = schema_err.into();
        assert_eq!(bench_err.code, ErrorCode::FieldNotFound);
        assert_eq!(bench_err.message, "Field 'l_shipdat' not found");
        assert_eq!(bench_err.hint, Some("Did you mean 'l_shipdate'?".to_string()));

        match bench_err.context {
            Some(ErrorContext::FieldNotFound {
                field,
                available_fields,
            }) => {
                assert_eq!(field, "l_shipdat");
                assert_eq!(available_fields[0], "l_shipdate");
            }
            _ => panic!("Expected FieldNotFound context"),
        }
    }

    #[test]
    fn test_execution_errors_are_evaluation_failures() {
        let err: BenchError = DataFusionError::Execution("Divide by zero".to_string()).into();
        assert_eq!(err.code, ErrorCode::ExecutionFailed);

        let wrapped = DataFusionError::Context(
            "collect".to_string(),
            Box::new(DataFusionError::ResourcesExhausted("pool".to_string())),
        );
        let err: BenchError = wrapped.into();
        assert_eq!(err.code, ErrorCode::ResourceExhausted);
    }

    #[test]
    fn test_io_error_mapping() {
        let io_err = std::io::Error::other("File error");
        let bench_err: BenchError = io_err.into();
        assert_eq!(bench_err.code, ErrorCode::Io);
        assert!(bench_err.message.contains("File error"));
    }
}
