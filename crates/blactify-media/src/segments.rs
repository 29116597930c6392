//! Recognizers for the path segments that sit between `upload/` and an
//! asset's public id in a delivery URL.

use std::sync::LazyLock;

use regex::Regex;

/// One transformation directive: a short lowercase key, `_`, and a value,
/// e.g. `f_auto`, `w_800`, `ar_16:9`, `dpr_2.0`.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{1,3}_[A-Za-z0-9:.\-]+$").expect("valid directive regex")
});

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+$").expect("valid version regex"));

/// The segment inserted by delivery rewriting.
static DELIVERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^f_auto,q_auto,w_\d+$").expect("valid delivery regex"));

/// Returns `true` if `segment` consists solely of comma-separated directives.
pub(crate) fn is_transformation_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.split(',').all(|token| DIRECTIVE_RE.is_match(token))
}

/// Returns `true` for a version marker such as `v1690000000`.
pub(crate) fn is_version_segment(segment: &str) -> bool {
    VERSION_RE.is_match(segment)
}

/// Returns `true` for the `f_auto,q_auto,w_<width>` delivery segment.
pub(crate) fn is_delivery_segment(segment: &str) -> bool {
    DELIVERY_RE.is_match(segment)
}

/// Number of leading `segments` (the path after `upload/`) that are
/// transformations rather than folders.
///
/// Folder names such as `new_arrivals` have the directive shape too, so a
/// directive-shaped run only counts when a version marker follows it. Without
/// a version, only a leading delivery segment is recognized.
pub(crate) fn leading_transformation_count(segments: &[&str]) -> usize {
    let run = segments
        .iter()
        .take_while(|s| is_transformation_segment(s))
        .count();
    if run > 0 && segments.get(run).is_some_and(|s| is_version_segment(s)) {
        return run;
    }
    usize::from(segments.len() > 1 && is_delivery_segment(segments[0]))
}
