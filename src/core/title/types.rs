use serde::{Deserialize, Serialize};

/// What kind of production a title refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    #[default]
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv series")]
    TvSeries,
    #[serde(rename = "tv mini series")]
    TvMiniSeries,
    #[serde(rename = "tv movie")]
    TvMovie,
    #[serde(rename = "video movie")]
    Video,
    #[serde(rename = "video game")]
    VideoGame,
    #[serde(rename = "episode")]
    Episode,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Movie => "movie",
            Kind::TvSeries => "tv series",
            Kind::TvMiniSeries => "tv mini series",
            Kind::TvMovie => "tv movie",
            Kind::Video => "video movie",
            Kind::VideoGame => "video game",
            Kind::Episode => "episode",
        }
    }

    pub fn from_label(label: &str) -> Option<Kind> {
        match label.trim() {
            "movie" => Some(Kind::Movie),
            "tv series" => Some(Kind::TvSeries),
            "tv mini series" => Some(Kind::TvMiniSeries),
            "tv movie" => Some(Kind::TvMovie),
            "video movie" => Some(Kind::Video),
            "video game" => Some(Kind::VideoGame),
            "episode" => Some(Kind::Episode),
            _ => None,
        }
    }
}

/// Structured decomposition of a raw title string.
///
/// `title` holds the base title; when produced by
/// [`analyze_title`](super::analyze_title) with `canonical = true` a leading
/// article has been moved to the end ("The Matrix" -> "Matrix, The").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleParts {
    pub title: String,
    pub year: Option<u16>,
    pub imdb_index: Option<String>,
    pub kind: Kind,
}
