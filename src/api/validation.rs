use chrono::{Datelike, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::models::{Genre, MoviePatch, NewMovie};

pub const MIN_YEAR: i32 = 1900;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;
pub const DEFAULT_RATING: f64 = 5.0;

/// A single field constraint violation. Write bodies report every offending
/// field, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Validates a full submission: every field required except `rating`,
/// which defaults, and `id`, which is never client-supplied.
pub fn validate_full(candidate: &Value) -> Result<NewMovie, Vec<FieldViolation>> {
    validate_full_against_year(candidate, Utc::now().year())
}

/// Validates a partial submission: only fields present are checked, absent
/// fields are not errors.
pub fn validate_partial(candidate: &Value) -> Result<MoviePatch, Vec<FieldViolation>> {
    validate_partial_against_year(candidate, Utc::now().year())
}

fn validate_full_against_year(
    candidate: &Value,
    max_year: i32,
) -> Result<NewMovie, Vec<FieldViolation>> {
    if !candidate.is_object() {
        return Err(vec![body_violation()]);
    }

    let mut violations = Vec::new();

    let title = check(candidate, "title", true, &mut violations, string_field);
    let year = check(candidate, "year", true, &mut violations, |v| {
        year_field(v, max_year)
    });
    let director = check(candidate, "director", true, &mut violations, string_field);
    let duration = check(candidate, "duration", true, &mut violations, duration_field);
    let genre = check(candidate, "genre", true, &mut violations, genre_field);
    let rating = check(candidate, "rating", false, &mut violations, rating_field);

    match (title, year, director, duration, genre) {
        (Some(title), Some(year), Some(director), Some(duration), Some(genre))
            if violations.is_empty() =>
        {
            Ok(NewMovie {
                title,
                year,
                director,
                duration,
                genre,
                rating: rating.unwrap_or(DEFAULT_RATING),
            })
        }
        _ => Err(violations),
    }
}

fn validate_partial_against_year(
    candidate: &Value,
    max_year: i32,
) -> Result<MoviePatch, Vec<FieldViolation>> {
    if !candidate.is_object() {
        return Err(vec![body_violation()]);
    }

    let mut violations = Vec::new();

    let patch = MoviePatch {
        title: check(candidate, "title", false, &mut violations, string_field),
        year: check(candidate, "year", false, &mut violations, |v| {
            year_field(v, max_year)
        }),
        director: check(candidate, "director", false, &mut violations, string_field),
        duration: check(candidate, "duration", false, &mut violations, duration_field),
        genre: check(candidate, "genre", false, &mut violations, genre_field),
        rating: check(candidate, "rating", false, &mut violations, rating_field),
    };

    if violations.is_empty() {
        Ok(patch)
    } else {
        Err(violations)
    }
}

fn body_violation() -> FieldViolation {
    FieldViolation {
        field: "body",
        message: "must be a JSON object".to_string(),
    }
}

/// Runs one field through its parser, recording a violation on a missing
/// required field or a failed constraint. `null` counts as absent.
fn check<T>(
    candidate: &Value,
    field: &'static str,
    required: bool,
    violations: &mut Vec<FieldViolation>,
    parse: impl Fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match candidate.get(field) {
        None | Some(Value::Null) => {
            if required {
                violations.push(FieldViolation {
                    field,
                    message: "is required".to_string(),
                });
            }
            None
        }
        Some(value) => match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                violations.push(FieldViolation { field, message });
                None
            }
        },
    }
}

fn string_field(value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| "must be a string".to_string())
}

fn year_field(value: &Value, max_year: i32) -> Result<i32, String> {
    let year = value
        .as_i64()
        .ok_or_else(|| "must be an integer".to_string())?;

    if (i64::from(MIN_YEAR)..=i64::from(max_year)).contains(&year) {
        Ok(year as i32)
    } else {
        Err(format!("must be between {MIN_YEAR} and {max_year}"))
    }
}

fn duration_field(value: &Value) -> Result<u32, String> {
    value
        .as_u64()
        .filter(|&minutes| minutes > 0)
        .and_then(|minutes| u32::try_from(minutes).ok())
        .ok_or_else(|| "must be a positive integer".to_string())
}

fn rating_field(value: &Value) -> Result<f64, String> {
    let rating = value
        .as_f64()
        .ok_or_else(|| "must be a number".to_string())?;

    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(format!("must be between {MIN_RATING} and {MAX_RATING}"))
    }
}

fn genre_field(value: &Value) -> Result<Vec<Genre>, String> {
    let allowed = || {
        Genre::ALL
            .iter()
            .map(|genre| genre.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let tags = value
        .as_array()
        .ok_or_else(|| format!("must be an array of: {}", allowed()))?;

    tags.iter()
        .map(|tag| {
            tag.as_str()
                .and_then(Genre::parse_tag)
                .ok_or_else(|| format!("must only contain: {}", allowed()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_YEAR: i32 = 2025;

    fn full(candidate: &Value) -> Result<NewMovie, Vec<FieldViolation>> {
        validate_full_against_year(candidate, TEST_YEAR)
    }

    fn partial(candidate: &Value) -> Result<MoviePatch, Vec<FieldViolation>> {
        validate_partial_against_year(candidate, TEST_YEAR)
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&'static str> {
        violations.iter().map(|v| v.field).collect()
    }

    #[test]
    fn full_submission_without_rating_defaults_to_five() {
        let movie = full(&json!({
            "title": "X",
            "year": 2000,
            "director": "D",
            "duration": 90,
            "genre": ["drama"]
        }))
        .unwrap();

        assert_eq!(movie.title, "X");
        assert_eq!(movie.year, 2000);
        assert_eq!(movie.genre, vec![Genre::Drama]);
        assert!((movie.rating - DEFAULT_RATING).abs() < f64::EPSILON);
    }

    #[test]
    fn year_below_lower_bound_is_rejected() {
        let err = full(&json!({
            "title": "X",
            "year": 1899,
            "director": "D",
            "duration": 90,
            "genre": ["drama"]
        }))
        .unwrap_err();

        assert_eq!(fields(&err), ["year"]);
        assert!(err[0].message.contains("1900"));
    }

    #[test]
    fn year_above_current_year_is_rejected() {
        let err = full(&json!({
            "title": "X",
            "year": TEST_YEAR + 1,
            "director": "D",
            "duration": 90,
            "genre": ["drama"]
        }))
        .unwrap_err();

        assert_eq!(fields(&err), ["year"]);
    }

    #[test]
    fn every_offending_field_is_reported() {
        let err = full(&json!({
            "title": 7,
            "year": 1899,
            "duration": 0,
            "genre": ["drama", "western"],
            "rating": 11
        }))
        .unwrap_err();

        assert_eq!(
            fields(&err),
            ["title", "year", "director", "duration", "genre", "rating"]
        );
    }

    #[test]
    fn empty_object_lists_all_required_fields() {
        let err = full(&json!({})).unwrap_err();
        assert_eq!(
            fields(&err),
            ["title", "year", "director", "duration", "genre"]
        );
        assert!(err.iter().all(|v| v.message == "is required"));
    }

    #[test]
    fn empty_genre_sequence_is_allowed() {
        let movie = full(&json!({
            "title": "X",
            "year": 2000,
            "director": "D",
            "duration": 90,
            "genre": []
        }))
        .unwrap();

        assert!(movie.genre.is_empty());
    }

    #[test]
    fn partial_with_out_of_range_rating_is_rejected() {
        let err = partial(&json!({ "rating": 11 })).unwrap_err();
        assert_eq!(fields(&err), ["rating"]);
        assert!(err[0].message.contains("10"));
    }

    #[test]
    fn empty_partial_succeeds_trivially() {
        assert_eq!(partial(&json!({})).unwrap(), MoviePatch::default());
    }

    #[test]
    fn partial_checks_only_present_fields() {
        let patch = partial(&json!({ "year": 2001, "rating": 0 })).unwrap();

        assert_eq!(patch.year, Some(2001));
        assert_eq!(patch.rating, Some(0.0));
        assert_eq!(patch.title, None);
        assert_eq!(patch.genre, None);
    }

    #[test]
    fn genre_tags_resolve_case_insensitively() {
        let patch = partial(&json!({ "genre": ["Drama", "SCI-FI"] })).unwrap();
        assert_eq!(patch.genre, Some(vec![Genre::Drama, Genre::SciFi]));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(fields(&full(&json!("nope")).unwrap_err()), ["body"]);
        assert_eq!(fields(&partial(&json!([1, 2])).unwrap_err()), ["body"]);
    }

    #[test]
    fn duration_must_be_strictly_positive() {
        let err = partial(&json!({ "duration": 0 })).unwrap_err();
        assert_eq!(fields(&err), ["duration"]);

        let err = partial(&json!({ "duration": -5 })).unwrap_err();
        assert_eq!(fields(&err), ["duration"]);
    }
}
