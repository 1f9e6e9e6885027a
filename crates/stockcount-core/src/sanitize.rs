use std::borrow::Cow;

use polars::prelude::*;

/// Control characters that cannot appear in spreadsheet XML. Tab, newline and carriage return
/// are allowed.
fn is_illegal_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}')
}

/// Replaces each illegal control character with a single space.
pub fn sanitize_text(value: &str) -> Cow<'_, str> {
    if !value.chars().any(is_illegal_control) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .chars()
            .map(|c| if is_illegal_control(c) { ' ' } else { c })
            .collect(),
    )
}

/// Applies [`sanitize_text`] to every `String` column; other dtypes pass through untouched.
pub fn sanitize_frame(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| -> PolarsResult<Column> {
            if column.dtype() != &DataType::String {
                return Ok(column.clone());
            }
            let values = column.as_materialized_series().str()?;
            let cleaned: Vec<Option<String>> = values
                .into_iter()
                .map(|value| value.map(|text| sanitize_text(text).into_owned()))
                .collect();
            Ok(Series::new(column.name().clone(), cleaned).into())
        })
        .collect::<PolarsResult<Vec<Column>>>()?;

    DataFrame::new(columns)
}
