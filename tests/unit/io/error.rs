//! Tests for error types, display messages and context

#[cfg(test)]
mod tests {
    use gridrule::InferenceError;
    use gridrule::io::error::{
        ErrorContext, GridDefect, WithContext, invalid_parameter, invalid_task,
    };
    use std::error::Error;

    // Tests grid errors gain their location from context
    // Verified by overwriting an existing location
    #[test]
    fn test_grid_error_context() {
        let result: Result<(), GridDefect> = Err(GridDefect::Empty);
        let error = result
            .with_context(ErrorContext::grid("task-1", "train[0].input"))
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Malformed grid at task-1 train[0].input: grid has no rows"
        );
    }

    // Tests non-grid errors pass through context unchanged
    #[test]
    fn test_context_ignores_other_errors() {
        let result: Result<(), InferenceError> = Err(invalid_task("abc", &"no training pairs"));
        let error = result
            .with_context(ErrorContext::grid("abc", "test[0].input"))
            .unwrap_err();
        assert_eq!(error.to_string(), "Invalid task 'abc': no training pairs");
    }

    // Tests ragged defect messages
    #[test]
    fn test_ragged_display() {
        let error = InferenceError::from(GridDefect::Ragged {
            row: 2,
            expected: 3,
            found: 1,
        });
        assert_eq!(error.to_string(), "Malformed grid: row 2 has 1 cells, expected 3");
    }

    // Tests parameter errors format their value and reason
    #[test]
    fn test_invalid_parameter_display() {
        let error = invalid_parameter("cell_pixels", &0, &"must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'cell_pixels' = '0': must be at least 1"
        );
        assert!(error.source().is_none());
    }

    // Tests I/O and JSON errors keep their source
    // Verified by returning None from source for every variant
    #[test]
    fn test_error_sources() {
        let io = InferenceError::from(std::io::Error::other("disk"));
        assert!(io.source().is_some());

        let json = serde_json::from_str::<u8>("x").unwrap_err();
        let error = InferenceError::from(json);
        assert!(matches!(error, InferenceError::Serialization { .. }));
        assert!(error.source().is_some());
    }
}
