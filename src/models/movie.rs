use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of genre tags a movie may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    Action,
    Adventure,
    SciFi,
    Fantasy,
    Drama,
    Crime,
}

impl Genre {
    pub const ALL: [Self; 6] = [
        Self::Action,
        Self::Adventure,
        Self::SciFi,
        Self::Fantasy,
        Self::Drama,
        Self::Crime,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Adventure => "adventure",
            Self::SciFi => "sci-fi",
            Self::Fantasy => "fantasy",
            Self::Drama => "drama",
            Self::Crime => "crime",
        }
    }

    /// Case-insensitive lookup, so `Sci-Fi` resolves the same tag as `sci-fi`.
    #[must_use]
    pub fn parse_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(tag))
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub genre: Vec<Genre>,
    pub rating: f64,
}

/// A fully validated submission. The store assigns the id on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub genre: Vec<Genre>,
    pub rating: f64,
}

/// A validated partial submission. Present fields fully replace the stored
/// value on merge; absent fields are left untouched. The id is never part
/// of a patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub duration: Option<u32>,
    pub genre: Option<Vec<Genre>>,
    pub rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_wire_names_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Genre::SciFi).unwrap(),
            "\"sci-fi\""
        );
        assert_eq!(serde_json::to_string(&Genre::Action).unwrap(), "\"action\"");
    }

    #[test]
    fn parse_tag_is_case_insensitive() {
        assert_eq!(Genre::parse_tag("drama"), Some(Genre::Drama));
        assert_eq!(Genre::parse_tag("Drama"), Some(Genre::Drama));
        assert_eq!(Genre::parse_tag("SCI-FI"), Some(Genre::SciFi));
        assert_eq!(Genre::parse_tag("western"), None);
    }

    #[test]
    fn movie_round_trips_through_json() {
        let movie = Movie {
            id: Uuid::new_v4(),
            title: "The Matrix".to_string(),
            year: 1999,
            director: "Lana Wachowski".to_string(),
            duration: 136,
            genre: vec![Genre::Action, Genre::SciFi],
            rating: 8.7,
        };

        let json = serde_json::to_string(&movie).unwrap();
        let parsed: Movie = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, movie);
    }
}
