use thiserror::Error;

/// Failure to read an .agr document. Parsing stops at the first error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A data line that does not hold two numbers.
    #[error("line {line}: malformed data line `{content}`: {reason}")]
    MalformedData {
        /// 1-based line number.
        line: usize,
        content: String,
        reason: String,
    },

    #[error("no data points found")]
    EmptyDocument,
}

/// Failure to turn a document into the requested series list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectError {
    #[error("no series named {missing:?} (available: {available:?})")]
    UnknownSeries {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("{labels} label(s) given for {series} selected series; counts must match")]
    LabelCount { labels: usize, series: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_data_message_cites_line() {
        let err = ParseError::MalformedData {
            line: 12,
            content: "1.0 abc".into(),
            reason: "`abc` is not a number".into(),
        };
        assert_eq!(
            err.to_string(),
            "line 12: malformed data line `1.0 abc`: `abc` is not a number"
        );
    }

    #[test]
    fn unknown_series_lists_names() {
        let err = SelectError::UnknownSeries {
            missing: vec!["Nonexistent".into()],
            available: vec!["Bond".into(), "Total".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"Nonexistent\""));
        assert!(msg.contains("\"Bond\", \"Total\""));
    }
}
