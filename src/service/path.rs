use std::borrow::Cow;

use super::SheetError;
use crate::sheets::SheetRef;

/// Splits a request path into `(spreadsheet_id, sheet_name)`.
///
/// Empty segments are ignored, so `/id//name/` is the same as `/id/name`.
/// Each segment is percent-decoded once; a segment that does not decode to
/// UTF-8 is kept as sent.
///
/// # Errors
///
/// [`SheetError::PathFormat`] unless exactly two non-empty segments remain.
pub fn parse_sheet_path(path: &str) -> Result<SheetRef, SheetError> {
    let segments: Vec<&str> = path
        .strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.as_slice() {
        [spreadsheet_id, sheet_name] => Ok(SheetRef::new(
            decode(spreadsheet_id),
            decode(sheet_name),
        )),
        _ => Err(SheetError::PathFormat),
    }
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| segment.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_segments() {
        let sheet = parse_sheet_path("/1AbC/Sheet1").unwrap();
        assert_eq!(sheet, SheetRef::new("1AbC", "Sheet1"));
    }

    #[test]
    fn empty_segments_are_ignored() {
        assert_eq!(
            parse_sheet_path("//1AbC///Sheet1/").unwrap(),
            SheetRef::new("1AbC", "Sheet1")
        );
    }

    #[test]
    fn segments_are_percent_decoded() {
        let sheet = parse_sheet_path("/1AbC/My%20Sheet!A1%3AB2").unwrap();
        assert_eq!(sheet.sheet_name, "My Sheet!A1:B2");
    }

    #[test]
    fn undecodable_segment_is_kept_raw() {
        let sheet = parse_sheet_path("/1AbC/%FF").unwrap();
        assert_eq!(sheet.sheet_name, "%FF");
    }

    #[test]
    fn wrong_segment_counts() {
        for path in ["", "/", "//", "/only", "/a/b/c", "/a/b/c/d"] {
            assert!(
                matches!(parse_sheet_path(path), Err(SheetError::PathFormat)),
                "{path:?} should be rejected"
            );
        }
    }
}
