//! UK financial year labels (April to March), written `YYYY/YY`.

use crate::utils::error::{ReportError, Result};

/// Label of the financial year starting in April of `calendar_year`.
///
/// Total over `i32`: `2025` gives `"2025/26"`, `2099` gives `"2099/00"`.
pub fn financial_year(calendar_year: i32) -> String {
    let next_year_short = (i64::from(calendar_year) + 1).rem_euclid(100);
    format!("{}/{:02}", calendar_year, next_year_short)
}

/// Financial year embedded in an open-data resource id.
///
/// The last `_`-separated segment starts with `YYYYyy`, e.g.
/// `CONSOL_PHARMACY_LIST_202223Q4` yields `"2022/23"`. The label is taken
/// from the id as written, not recomputed from the start year.
pub fn financial_year_from_resource_id(resource_id: &str) -> Result<String> {
    let invalid = |reason: &str| ReportError::InvalidResourceId {
        resource_id: resource_id.to_string(),
        reason: reason.to_string(),
    };

    let segment = resource_id
        .rsplit('_')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| invalid("missing period segment"))?;

    let code = segment
        .get(..6)
        .ok_or_else(|| invalid("period segment is shorter than six characters"))?;

    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("period segment must start with six digits (YYYYyy)"));
    }

    Ok(format!("{}/{}", &code[..4], &code[4..]))
}
