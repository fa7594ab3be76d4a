use http::StatusCode;

/// Upper-snake status name, e.g. `SERVICE_UNAVAILABLE`
///
/// Codes without a canonical reason phrase are named `UNKNOWN`.
pub fn status_name(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(
        || "UNKNOWN".to_owned(),
        |reason| {
            reason
                .chars()
                .filter_map(|c| match c {
                    ' ' | '-' => Some('_'),
                    '\'' => None,
                    c => Some(c.to_ascii_uppercase()),
                })
                .collect()
        },
    )
}

/// [`status_name`] for a raw numeric code
pub fn code_name(code: u16) -> String {
    StatusCode::from_u16(code).map_or_else(|_| "UNKNOWN".to_owned(), status_name)
}
