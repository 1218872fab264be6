use super::normalizer::normalize_title;
use super::types::{Kind, TitleParts};

fn base_title(parts: &TitleParts, canonical: bool) -> String {
    let title = if canonical {
        parts.title.clone()
    } else {
        normalize_title(&parts.title)
    };
    match parts.kind {
        Kind::TvSeries | Kind::TvMiniSeries => format!("\"{}\"", title),
        _ => title,
    }
}

fn year_tag(parts: &TitleParts) -> String {
    let year = parts
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "????".to_string());
    match &parts.imdb_index {
        Some(index) => format!(" ({}/{})", year, index),
        None => format!(" ({})", year),
    }
}

/// Format structured title parts back into the long string form:
/// `Title (YYYY)` with the year parenthetical always present (`(????)`
/// when unknown), series titles double-quoted, and trailing kind
/// markers for TV movies, videos, video games and mini series.
pub fn build_title(parts: &TitleParts, canonical: bool) -> String {
    let mut out = base_title(parts, canonical);
    out.push_str(&year_tag(parts));
    match parts.kind {
        Kind::TvMovie => out.push_str(" (TV)"),
        Kind::Video => out.push_str(" (V)"),
        Kind::VideoGame => out.push_str(" (VG)"),
        Kind::TvMiniSeries => out.push_str(" (mini)"),
        _ => {}
    }
    out
}

/// Format an episode title in its long form:
/// `"Series Title" Episode Title (YYYY)`.
///
/// The series part is always quoted; the year parenthetical comes from
/// the episode, `(????)` when unknown.
pub fn build_episode_title(series: &TitleParts, episode: &TitleParts, canonical: bool) -> String {
    let series_title = if canonical {
        series.title.clone()
    } else {
        normalize_title(&series.title)
    };
    let episode_title = if canonical {
        episode.title.clone()
    } else {
        normalize_title(&episode.title)
    };
    format!("\"{}\" {}{}", series_title, episode_title, year_tag(episode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(title: &str, year: Option<u16>, kind: Kind) -> TitleParts {
        TitleParts {
            title: title.to_string(),
            year,
            imdb_index: None,
            kind,
        }
    }

    #[test]
    fn movie_forms() {
        let p = parts("Matrix, The", Some(1999), Kind::Movie);
        assert_eq!(build_title(&p, true), "Matrix, The (1999)");
        assert_eq!(build_title(&p, false), "The Matrix (1999)");
    }

    #[test]
    fn missing_year_placeholder() {
        let p = parts("Stalker", None, Kind::Movie);
        assert_eq!(build_title(&p, true), "Stalker (????)");
    }

    #[test]
    fn imdb_index_in_year_tag() {
        let mut p = parts("Hamlet", Some(2000), Kind::Movie);
        p.imdb_index = Some("II".to_string());
        assert_eq!(build_title(&p, true), "Hamlet (2000/II)");
    }

    #[test]
    fn series_quoting_and_kind_markers() {
        let p = parts("Sopranos, The", Some(1999), Kind::TvSeries);
        assert_eq!(build_title(&p, true), "\"Sopranos, The\" (1999)");
        assert_eq!(build_title(&p, false), "\"The Sopranos\" (1999)");

        let p = parts("Duel", Some(1971), Kind::TvMovie);
        assert_eq!(build_title(&p, false), "Duel (1971) (TV)");

        let p = parts("Dune", Some(2000), Kind::TvMiniSeries);
        assert_eq!(build_title(&p, false), "\"Dune\" (2000) (mini)");
    }

    #[test]
    fn episode_form() {
        let series = parts("Sopranos, The", Some(1999), Kind::TvSeries);
        let episode = parts("Pilot", Some(1999), Kind::Episode);
        assert_eq!(
            build_episode_title(&series, &episode, false),
            "\"The Sopranos\" Pilot (1999)"
        );
        assert_eq!(
            build_episode_title(&series, &episode, true),
            "\"Sopranos, The\" Pilot (1999)"
        );
    }
}
