//! Tokenizer for numeric fields that may be run together in fixed-column records.
//!
//! Fixed-width writers leave no space before a negative value that fills its column,
//! so `-1.500-2.300-3.100` holds three coordinates. A field boundary is any `-` that
//! is not the first character and does not follow an exponent marker (`e`/`E`).
//!
//! Known ambiguities, reported as errors rather than guessed:
//! - consecutive minus signs (`1.0--2.0`) produce an empty `-` field;
//! - a run-together positive value cannot be separated (`1.0002.000` is one field).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumericTokenError {
    #[error("Empty token")]
    Empty,
    #[error("Invalid numeric field '{field}' in token '{token}'")]
    InvalidField { token: String, field: String },
}

/// Splits one whitespace-delimited token into its numeric fields.
pub fn split_numeric_token(token: &str) -> Result<Vec<f64>, NumericTokenError> {
    if token.is_empty() {
        return Err(NumericTokenError::Empty);
    }

    let bytes = token.as_bytes();
    let mut starts = vec![0];
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        if b == b'-' && !matches!(bytes[i - 1], b'e' | b'E') {
            starts.push(i);
        }
    }

    starts
        .iter()
        .enumerate()
        .map(|(k, &start)| {
            let end = starts.get(k + 1).copied().unwrap_or(token.len());
            let field = &token[start..end];
            field
                .parse::<f64>()
                .map_err(|_| NumericTokenError::InvalidField {
                    token: token.to_string(),
                    field: field.to_string(),
                })
        })
        .collect()
}

/// Collects the last `count` numeric fields from a run of tokens.
///
/// Tokens are consumed from the right and splitting stops once `count` fields are
/// known, so leading non-numeric tokens (residue numbers with insertion codes, chain
/// identifiers) are never inspected. Returns `Ok(None)` when fewer than `count`
/// fields exist.
pub fn trailing_numeric_fields(
    tokens: &[&str],
    count: usize,
) -> Result<Option<Vec<f64>>, NumericTokenError> {
    let mut fields: Vec<f64> = Vec::with_capacity(count);
    for token in tokens.iter().rev() {
        if fields.len() >= count {
            break;
        }
        let mut split = split_numeric_token(token)?;
        split.extend(fields);
        fields = split;
    }

    if fields.len() < count {
        return Ok(None);
    }
    Ok(Some(fields.split_off(fields.len() - count)))
}
