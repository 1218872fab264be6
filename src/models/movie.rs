use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::title::{
    analyze_title, build_episode_title, build_title, normalize_title, Kind, TitleParts,
};
use crate::core::value::{flatten_persons, format_number, Info};
use crate::models::person::Person;
use crate::utils::CinedexResult;

/// Aliases for not-so-intuitive keys: historical names, plural/singular
/// variants and IMDb page phrasing. An alias always maps straight to a
/// canonical key, never to another alias.
static KEYS_ALIAS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("user rating", "rating"),
        ("plot summary", "plot"),
        ("plot summaries", "plot"),
        ("directed by", "director"),
        ("created by", "creator"),
        ("writing credits", "writer"),
        ("produced by", "producer"),
        ("original music by", "original music"),
        ("non-original music by", "non-original music"),
        ("music", "original music"),
        ("cinematography by", "cinematographer"),
        ("cinematography", "cinematographer"),
        ("film editing by", "editor"),
        ("film editing", "editor"),
        ("editing", "editor"),
        ("actors", "cast"),
        ("actresses", "cast"),
        ("casting by", "casting director"),
        ("casting", "casting director"),
        ("art direction by", "art direction"),
        ("set decoration by", "set decoration"),
        ("costume design by", "costume designer"),
        ("costume design", "costume designer"),
        ("makeup department", "make up"),
        ("makeup", "make up"),
        ("make-up", "make up"),
        ("production management", "production manager"),
        ("second unit director or assistant director", "assistant director"),
        ("second unit director", "assistant director"),
        ("sound department", "sound crew"),
        ("costume and wardrobe department", "costume department"),
        ("special effects by", "special effects"),
        ("visual effects by", "visual effects"),
        ("stunts", "stunt performer"),
        ("other crew", "miscellaneous crew"),
        ("misc crew", "miscellaneous crew"),
        ("miscellaneouscrew", "miscellaneous crew"),
        ("crewmembers", "miscellaneous crew"),
        ("crew members", "miscellaneous crew"),
        ("other companies", "miscellaneous companies"),
        ("misc companies", "miscellaneous companies"),
        ("aka", "akas"),
        ("also known as", "akas"),
        ("country", "countries"),
        ("genre", "genres"),
        ("runtime", "runtimes"),
        ("lang", "languages"),
        ("color", "color info"),
        ("cover", "cover url"),
        ("seasons", "number of seasons"),
        ("language", "languages"),
        ("certificate", "certificates"),
        ("certifications", "certificates"),
        ("certification", "certificates"),
        ("miscellaneous links", "misc links"),
        ("miscellaneous", "misc links"),
        ("soundclips", "sound clips"),
        ("videoclips", "video clips"),
        ("photographs", "photo sites"),
        ("distributor", "distributors"),
        ("distribution", "distributors"),
        ("distribution companies", "distributors"),
        ("guest", "guests"),
        ("guest appearances", "guests"),
        ("tv guests", "guests"),
        ("notable tv guest appearances", "guests"),
        ("episodes cast", "guests"),
        ("episodes number", "number of episodes"),
        ("amazon review", "amazon reviews"),
        ("merchandising", "merchandising links"),
        ("merchandise", "merchandising links"),
        ("sales", "merchandising links"),
        ("faq", "faqs"),
        ("parental guide", "parents guide"),
        ("frequently asked questions", "faqs"),
    ])
});

/// Keys whose text runs through the record's `mod_funct` hook on read.
const KEYS_TO_MODIFY: &[&str] = &[
    "plot",
    "trivia",
    "alternate versions",
    "goofs",
    "quotes",
    "dvd",
    "laserdisc",
    "news",
    "soundtrack",
    "crazy credits",
    "business",
    "supplements",
    "video review",
    "faqs",
];

/// The default sets of information retrieved.
const DEFAULT_INFO: &[&str] = &["main", "plot"];

/// Text post-processing hook applied to the keys in `KEYS_TO_MODIFY`.
pub type TextMod = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Three-way ordering strategy between two movie records. Ordering is
/// orthogonal to identity, so it is injected rather than hardcoded.
pub type MovieCmp = fn(&Movie, &Movie) -> Ordering;

/// Shared read-mostly cross-reference table, owned by the enclosing
/// data-source session.
pub type RefTable = Arc<BTreeMap<String, String>>;

type DerivedFn = fn(&Movie) -> Option<Info>;

fn derived_long_imdb_episode_title(m: &Movie) -> Option<Info> {
    m.build_long_title(false).map(Info::Text)
}

fn derived_series_title(m: &Movie) -> Option<Info> {
    m.series_title().map(|t| Info::Text(normalize_title(&t)))
}

fn derived_canonical_series_title(m: &Movie) -> Option<Info> {
    m.series_title().map(Info::Text)
}

fn derived_episode_title(m: &Movie) -> Option<Info> {
    Some(Info::Text(normalize_title(m.raw_title().unwrap_or(""))))
}

fn derived_canonical_episode_title(m: &Movie) -> Option<Info> {
    Some(Info::Text(m.raw_title().unwrap_or("").to_string()))
}

fn derived_title(m: &Movie) -> Option<Info> {
    m.raw_title().map(|t| Info::Text(normalize_title(t)))
}

fn derived_long_imdb_title(m: &Movie) -> Option<Info> {
    m.build_long_title(false).map(Info::Text)
}

fn derived_canonical_title(m: &Movie) -> Option<Info> {
    m.raw_title().map(|t| Info::Text(t.to_string()))
}

fn derived_long_imdb_canonical_title(m: &Movie) -> Option<Info> {
    m.build_long_title(true).map(Info::Text)
}

/// Computed keys active while `"episode of"` is a primitive key.
static EPISODE_KEYS: &[(&str, DerivedFn)] = &[
    ("long imdb episode title", derived_long_imdb_episode_title),
    ("series title", derived_series_title),
    ("canonical series title", derived_canonical_series_title),
    ("episode title", derived_episode_title),
    ("canonical episode title", derived_canonical_episode_title),
];

/// Computed keys active while `"title"` is a primitive key.
static TITLE_KEYS: &[(&str, DerivedFn)] = &[
    ("title", derived_title),
    ("long imdb title", derived_long_imdb_title),
    ("canonical title", derived_canonical_title),
    ("long imdb canonical title", derived_long_imdb_canonical_title),
];

/// Default ordering between two records: newer first, then canonical
/// title, then identifier. Records without a year sort last.
pub fn cmp_movies(a: &Movie, b: &Movie) -> Ordering {
    match (a.year(), b.year()) {
        (Some(x), Some(y)) if x != y => return y.cmp(&x),
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        _ => {}
    }
    let a_title = a.get_text("canonical title").unwrap_or_default();
    let b_title = b.get_text("canonical title").unwrap_or_default();
    match a_title.cmp(&b_title) {
        Ordering::Equal => a.id().cmp(&b.id()),
        ordering => ordering,
    }
}

fn default_cmp_fn() -> MovieCmp {
    cmp_movies
}

/// Construction options for [`Movie`]; every field is optional.
#[derive(Default)]
pub struct MovieOpts {
    pub movie_id: Option<String>,
    pub title: Option<String>,
    pub my_title: String,
    pub my_id: Option<String>,
    pub data: BTreeMap<String, Info>,
    pub current_role: String,
    pub notes: String,
    pub access_system: String,
    pub titles_refs: Option<RefTable>,
    pub names_refs: Option<RefTable>,
    pub mod_funct: Option<TextMod>,
}

/// A movie record.
///
/// Every piece of information is reached through a key:
/// `movie.get("information")`; [`keys`](Movie::keys) lists what is
/// available. Some useful aliases are defined ("casting" for the
/// "casting director" key), and a handful of title keys ("canonical
/// title", "long imdb title", the episode/series family) are computed
/// from the primitive data on every access rather than stored.
#[derive(Clone, Serialize, Deserialize)]
pub struct Movie {
    data: BTreeMap<String, Info>,
    movie_id: Option<String>,
    my_title: String,
    my_id: Option<String>,
    access_system: String,
    /// Role or duty of a person in this movie, when the record is
    /// nested inside a person's filmography.
    pub current_role: String,
    /// Notes for the person referred by `current_role`, e.g. "(voice)".
    pub notes: String,
    current_info: Vec<String>,
    #[serde(skip)]
    titles_refs: RefTable,
    #[serde(skip)]
    names_refs: RefTable,
    #[serde(skip)]
    mod_funct: Option<TextMod>,
    #[serde(skip, default = "default_cmp_fn")]
    cmp_fn: MovieCmp,
}

impl Movie {
    pub fn new(opts: MovieOpts) -> CinedexResult<Movie> {
        let MovieOpts {
            movie_id,
            title,
            my_title,
            my_id,
            data,
            current_role,
            notes,
            access_system,
            titles_refs,
            names_refs,
            mod_funct,
        } = opts;
        let mut movie = Movie {
            data,
            movie_id,
            my_title,
            my_id,
            access_system,
            current_role,
            notes,
            current_info: DEFAULT_INFO.iter().map(|s| s.to_string()).collect(),
            titles_refs: titles_refs.unwrap_or_default(),
            names_refs: names_refs.unwrap_or_default(),
            mod_funct,
            cmp_fn: cmp_movies,
        };
        if let Some(raw) = title {
            if !raw.trim().is_empty() && !movie.data.contains_key("title") {
                movie.set_title(&raw)?;
            }
        }
        Ok(movie)
    }

    pub fn from_title(raw: &str) -> CinedexResult<Movie> {
        Movie::new(MovieOpts {
            title: Some(raw.to_string()),
            ..Default::default()
        })
    }

    /// Analyze a raw title string and merge the structured parts into
    /// the primitive data (`title`, `year`, `imdb index`, `kind`).
    pub fn set_title(&mut self, raw: &str) -> CinedexResult<()> {
        let parts = analyze_title(raw, true)?;
        tracing::debug!(raw, title = %parts.title, "setting movie title");
        self.data.insert("title".to_string(), Info::Text(parts.title));
        if let Some(year) = parts.year {
            self.data.insert("year".to_string(), Info::Number(year as f64));
        }
        if let Some(index) = parts.imdb_index {
            self.data.insert("imdb index".to_string(), Info::Text(index));
        }
        self.data
            .insert("kind".to_string(), Info::Text(parts.kind.as_str().to_string()));
        Ok(())
    }

    /// Resolve a user-supplied key to the canonical storage key: fold
    /// case and spacing, then apply the alias table. Unknown keys pass
    /// through unchanged.
    fn resolve_key(key: &str) -> String {
        let folded = key.trim().to_lowercase();
        match KEYS_ALIAS.get(folded.as_str()) {
            Some(canonical) => {
                tracing::trace!(alias = %folded, canonical, "resolved key alias");
                (*canonical).to_string()
            }
            None => folded,
        }
    }

    /// Look up an information key: alias resolution first, then the
    /// computed-key tables, then primitive storage. Absent keys yield
    /// `None`, never an error.
    pub fn get(&self, key: &str) -> Option<Info> {
        let key = Self::resolve_key(key);
        if let Some(value) = self.derived(&key) {
            return Some(value);
        }
        let value = self.data.get(key.as_str())?.clone();
        Some(self.post_process(&key, value))
    }

    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Info::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Info::Number(n) => Some(n),
            Info::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Store a value under its canonical key.
    pub fn set(&mut self, key: &str, value: impl Into<Info>) {
        let key = Self::resolve_key(key);
        self.data.insert(key, value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Info> {
        self.data.remove(&Self::resolve_key(key))
    }

    /// Every valid key: the primitive keys plus the computed title
    /// keys currently active.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.data.keys().cloned().collect();
        keys.extend(self.additional_keys());
        keys
    }

    fn additional_keys(&self) -> Vec<String> {
        let mut add = Vec::new();
        if self.data.contains_key("title") {
            add.extend(
                TITLE_KEYS
                    .iter()
                    .map(|(k, _)| *k)
                    .filter(|k| *k != "title")
                    .map(String::from),
            );
        }
        if self.data.contains_key("episode of") {
            add.extend(EPISODE_KEYS.iter().map(|(k, _)| k.to_string()));
        }
        add
    }

    fn derived(&self, key: &str) -> Option<Info> {
        if self.data.contains_key("episode of") {
            if let Some((_, compute)) = EPISODE_KEYS.iter().find(|(k, _)| *k == key) {
                if let Some(value) = compute(self) {
                    return Some(value);
                }
            }
        }
        if self.data.contains_key("title") {
            if let Some((_, compute)) = TITLE_KEYS.iter().find(|(k, _)| *k == key) {
                if let Some(value) = compute(self) {
                    return Some(value);
                }
            }
        }
        None
    }

    fn post_process(&self, key: &str, value: Info) -> Info {
        let Some(mod_funct) = &self.mod_funct else {
            return value;
        };
        if !KEYS_TO_MODIFY.contains(&key) {
            return value;
        }
        apply_text_mod(value, mod_funct)
    }

    fn raw_title(&self) -> Option<&str> {
        self.data.get("title").and_then(Info::as_text)
    }

    fn year(&self) -> Option<u16> {
        match self.data.get("year")? {
            Info::Number(n) => Some(*n as u16),
            Info::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn title_parts(&self) -> Option<TitleParts> {
        let title = self.raw_title()?.to_string();
        let kind = self
            .data
            .get("kind")
            .and_then(Info::as_text)
            .and_then(Kind::from_label)
            .unwrap_or_default();
        Some(TitleParts {
            title,
            year: self.year(),
            imdb_index: self
                .data
                .get("imdb index")
                .and_then(Info::as_text)
                .map(str::to_string),
            kind,
        })
    }

    fn series_record(&self) -> Option<&Movie> {
        self.data.get("episode of").and_then(Info::as_movie)
    }

    /// The parent series' canonical title if present, else its raw
    /// title value.
    fn series_title(&self) -> Option<String> {
        let series = self.series_record()?;
        series
            .get_text("canonical title")
            .filter(|t| !t.is_empty())
            .or_else(|| series.raw_title().map(str::to_string))
    }

    /// The long title form: the episode form when a parent series is
    /// reachable, else the plain form. `None` without a title.
    fn build_long_title(&self, canonical: bool) -> Option<String> {
        let parts = self.title_parts()?;
        if let Some(series) = self.series_record() {
            if let Some(series_parts) = series.title_parts() {
                return Some(build_episode_title(&series_parts, &parts, canonical));
            }
        }
        Some(build_title(&parts, canonical))
    }

    pub fn id(&self) -> Option<&str> {
        self.movie_id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.movie_id = Some(id.into());
    }

    pub fn my_id(&self) -> Option<&str> {
        self.my_id.as_deref()
    }

    pub fn my_title(&self) -> &str {
        &self.my_title
    }

    pub fn set_my_title(&mut self, my_title: impl Into<String>) {
        self.my_title = my_title.into();
    }

    pub fn access_system(&self) -> &str {
        &self.access_system
    }

    pub fn set_access_system(&mut self, access_system: impl Into<String>) {
        self.access_system = access_system.into();
    }

    pub fn data(&self) -> &BTreeMap<String, Info> {
        &self.data
    }

    pub fn current_info(&self) -> &[String] {
        &self.current_info
    }

    pub fn add_current_info(&mut self, info_set: impl Into<String>) {
        self.current_info.push(info_set.into());
    }

    pub fn titles_refs(&self) -> &RefTable {
        &self.titles_refs
    }

    pub fn names_refs(&self) -> &RefTable {
        &self.names_refs
    }

    pub fn set_mod_funct(&mut self, mod_funct: Option<TextMod>) {
        self.mod_funct = mod_funct;
    }

    pub fn set_cmp_fn(&mut self, cmp_fn: MovieCmp) {
        self.cmp_fn = cmp_fn;
    }

    /// Order this record against another using the injected strategy.
    pub fn compare(&self, other: &Movie) -> Ordering {
        (self.cmp_fn)(self, other)
    }

    /// A record without a primitive `"title"` key is considered empty,
    /// no matter what else is populated.
    pub fn is_empty(&self) -> bool {
        !self.data.contains_key("title")
    }

    /// True if both records have a title and their long canonical
    /// built titles match, or if both come from the same access system
    /// with equal, assigned identifiers. Either criterion suffices.
    pub fn is_same_title(&self, other: &Movie) -> bool {
        if self.data.contains_key("title") && other.data.contains_key("title") {
            if let (Some(a), Some(b)) = (self.build_long_title(true), other.build_long_title(true))
            {
                if a == b {
                    return true;
                }
            }
        }
        if self.access_system == other.access_system {
            if let (Some(a), Some(b)) = (&self.movie_id, &other.movie_id) {
                if a == b {
                    return true;
                }
            }
        }
        false
    }

    pub fn is_same_movie(&self, other: &Movie) -> bool {
        self.is_same_title(other)
    }

    /// True if the given person (or one equal to them under person
    /// equality) is reachable anywhere in this record's nested data.
    pub fn contains_person(&self, person: &Person) -> bool {
        self.data
            .values()
            .flat_map(flatten_persons)
            .any(|candidate| person.is_same(candidate))
    }

    /// Membership test over an arbitrary value: only persons can be
    /// listed in a movie, anything else is never contained.
    pub fn contains_item(&self, item: &Info) -> bool {
        match item {
            Info::Person(person) => self.contains_person(person),
            _ => false,
        }
    }

    /// Clear the identifier and personal title, keeping the rest of
    /// the record state. Used when recycling an instance.
    pub fn reset(&mut self) {
        self.movie_id = None;
        self.my_title.clear();
    }

    /// A fully independent copy: the data map and both cross-reference
    /// tables are cloned, scalar fields are preserved.
    pub fn deep_copy(&self) -> Movie {
        let mut copy = self.clone();
        copy.titles_refs = Arc::new((*self.titles_refs).clone());
        copy.names_refs = Arc::new((*self.names_refs).clone());
        copy
    }

    /// Verbose one-line descriptor: identifier, access system and the
    /// best available long title. Renders safely as ASCII by replacing
    /// anything outside it.
    pub fn describe(&self) -> String {
        let title = if self.data.contains_key("episode of") {
            self.get_text("long imdb episode title")
        } else {
            self.get_text("long imdb canonical title")
        }
        .unwrap_or_default();
        let id = self.movie_id.as_deref().unwrap_or("None");
        ascii_replace(&format!(
            "<Movie id:{}[{}] title:_{}_>",
            id, self.access_system, title
        ))
    }

    /// Pretty-printed multi-line summary; empty for an empty record.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut s = format!(
            "Movie\n=====\nTitle: {}\n",
            self.get_text("long imdb canonical title").unwrap_or_default()
        );
        let genres = self.text_items("genres");
        if !genres.is_empty() {
            s.push_str(&format!("Genres: {}.\n", genres.join(", ")));
        }
        let director = self.persons("director");
        if !director.is_empty() {
            s.push_str(&format!("Director: {}.\n", names_and_roles(&director)));
        }
        let writer = self.persons("writer");
        if !writer.is_empty() {
            s.push_str(&format!("Writer: {}.\n", names_and_roles(&writer)));
        }
        let mut cast = self.persons("cast");
        if !cast.is_empty() {
            cast.truncate(5);
            s.push_str(&format!("Cast: {}.\n", names_and_roles(&cast)));
        }
        let runtimes = self.text_items("runtimes");
        if !runtimes.is_empty() {
            s.push_str(&format!("Runtime: {}.\n", runtimes.join(", ")));
        }
        let countries = self.text_items("countries");
        if !countries.is_empty() {
            s.push_str(&format!("Country: {}.\n", countries.join(", ")));
        }
        let languages = self.text_items("languages");
        if !languages.is_empty() {
            s.push_str(&format!("Language: {}.\n", languages.join(", ")));
        }
        if let Some(rating) = self.get_number("rating") {
            s.push_str(&format!("Rating: {}", format_number(rating)));
            if let Some(votes) = self.get_number("votes") {
                s.push_str(&format!(" ({} votes)", format_number(votes)));
            }
            s.push_str(".\n");
        }
        let plot = self.text_items("plot");
        if let Some(first) = plot.first() {
            let text = match first.find("::") {
                Some(i) => &first[i + 2..],
                None => first.as_str(),
            };
            s.push_str(&format!("Plot: {}", text));
        }
        s
    }

    fn text_items(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Info::Text(s)) => vec![s],
            Some(Info::List(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Info::Text(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn persons(&self, key: &str) -> Vec<Person> {
        match self.get(key) {
            Some(Info::Person(p)) => vec![p],
            Some(Info::List(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Info::Person(p) => Some(p),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn apply_text_mod(value: Info, mod_funct: &TextMod) -> Info {
    match value {
        Info::Text(s) => Info::Text(mod_funct(&s)),
        Info::List(items) => Info::List(
            items
                .into_iter()
                .map(|item| apply_text_mod(item, mod_funct))
                .collect(),
        ),
        other => other,
    }
}

fn names_and_roles(people: &[Person]) -> String {
    people
        .iter()
        .map(|person| {
            let mut name = person.display_name();
            if !person.current_role.is_empty() {
                name.push_str(&format!(" ({})", person.current_role));
            }
            name
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn ascii_replace(s: &str) -> String {
    s.chars().map(|c| if c.is_ascii() { c } else { '?' }).collect()
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
            && self.movie_id == other.movie_id
            && self.my_title == other.my_title
            && self.my_id == other.my_id
            && self.access_system == other.access_system
            && self.current_role == other.current_role
            && self.notes == other.notes
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_text("title").unwrap_or_default())
    }
}

impl fmt::Debug for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Movie {
        let mut movie = Movie::from_title("The Matrix (1999)").unwrap();
        movie.set("genres", vec!["Action".to_string(), "Sci-Fi".to_string()]);
        movie.set(
            "director",
            vec![Person::new("Wachowski, Lana"), Person::new("Wachowski, Lilly")],
        );
        movie.set(
            "cast",
            vec![
                Person::new("Reeves, Keanu").with_role("Neo"),
                Person::new("Fishburne, Laurence").with_role("Morpheus"),
                Person::new("Moss, Carrie-Anne").with_role("Trinity"),
            ],
        );
        movie.set("runtimes", vec!["136".to_string()]);
        movie.set("countries", vec!["USA".to_string()]);
        movie.set("languages", vec!["English".to_string()]);
        movie.set("rating", 8.7);
        movie.set("votes", 1_500_000u32);
        movie.set(
            "plot",
            vec!["author@example.com::A computer hacker learns the truth.".to_string()],
        );
        movie
    }

    fn episode() -> Movie {
        let series = Movie::from_title("\"The Sopranos\" (1999)").unwrap();
        let mut data = BTreeMap::new();
        data.insert("episode of".to_string(), Info::from(series));
        let mut episode = Movie::new(MovieOpts {
            data,
            ..Default::default()
        })
        .unwrap();
        episode.set_title("Pilot (1999)").unwrap();
        episode.set("kind", "episode");
        episode
    }

    #[test]
    fn every_alias_matches_its_canonical_key() {
        let movie = matrix();
        for (alias, canonical) in KEYS_ALIAS.iter() {
            assert_eq!(
                movie.get(alias),
                movie.get(canonical),
                "alias {:?} diverged from {:?}",
                alias,
                canonical
            );
        }
    }

    #[test]
    fn alias_resolution_is_case_and_spacing_insensitive() {
        let movie = matrix();
        assert_eq!(movie.get("Directed By  "), movie.get("director"));
        assert_eq!(movie.get("GENRE"), movie.get("genres"));
    }

    #[test]
    fn canonical_and_normalized_titles() {
        let movie = matrix();
        assert_eq!(movie.get_text("canonical title").unwrap(), "Matrix, The");
        assert_eq!(movie.get_text("title").unwrap(), "The Matrix");
        assert_eq!(
            movie.get_text("long imdb canonical title").unwrap(),
            "Matrix, The (1999)"
        );
        assert_eq!(
            movie.get_text("long imdb title").unwrap(),
            "The Matrix (1999)"
        );
    }

    #[test]
    fn emptiness_follows_the_title_key() {
        let movie = matrix();
        assert!(!movie.is_empty());

        let mut bare = Movie::new(MovieOpts::default()).unwrap();
        bare.set("genres", vec!["Drama".to_string()]);
        assert!(bare.is_empty());
        assert!(bare.additional_keys().is_empty());
        assert_eq!(bare.summary(), "");
    }

    #[test]
    fn derived_keys_are_not_stored() {
        let movie = matrix();
        assert!(movie.get("long imdb title").is_some());
        assert!(!movie.data().contains_key("long imdb title"));
        assert!(!movie.data().contains_key("canonical title"));
    }

    #[test]
    fn advertised_keys_follow_the_active_families() {
        let movie = matrix();
        let keys = movie.keys();
        for k in ["canonical title", "long imdb title", "long imdb canonical title"] {
            assert!(keys.contains(&k.to_string()), "missing {:?}", k);
        }
        assert!(!keys.contains(&"series title".to_string()));

        let keys = episode().keys();
        for k in [
            "long imdb episode title",
            "series title",
            "canonical series title",
            "episode title",
            "canonical episode title",
            "canonical title",
        ] {
            assert!(keys.contains(&k.to_string()), "missing {:?}", k);
        }
    }

    #[test]
    fn episode_family_values() {
        let episode = episode();
        assert_eq!(episode.get_text("series title").unwrap(), "The Sopranos");
        assert_eq!(
            episode.get_text("canonical series title").unwrap(),
            "Sopranos, The"
        );
        assert_eq!(episode.get_text("episode title").unwrap(), "Pilot");
        assert_eq!(episode.get_text("canonical episode title").unwrap(), "Pilot");
        assert_eq!(
            episode.get_text("long imdb episode title").unwrap(),
            "\"The Sopranos\" Pilot (1999)"
        );
    }

    #[test]
    fn same_title_by_built_title_or_by_id() {
        let a = matrix();
        let mut b = Movie::from_title("The Matrix (1999)").unwrap();
        b.set_id("0133093");
        b.set_access_system("http");
        assert!(a.is_same_title(&b));
        assert!(b.is_same_title(&a));

        let mut c = Movie::from_title("Heat (1995)").unwrap();
        c.set_id("0113277");
        c.set_access_system("http");
        assert!(!b.is_same_title(&c));

        // different titles, same identifier within the same access system
        let mut d = Movie::from_title("Heat: Director's Cut (1995)").unwrap();
        d.set_id("0113277");
        d.set_access_system("http");
        assert!(c.is_same_title(&d));
        assert!(d.is_same_movie(&c));

        // same identifier in a different access system is not enough
        let mut e = Movie::from_title("Heat: Director's Cut (1995)").unwrap();
        e.set_id("0113277");
        e.set_access_system("sql");
        assert!(!c.is_same_title(&e));
    }

    #[test]
    fn deep_copy_is_independent() {
        let refs: RefTable = Arc::new(BTreeMap::from([(
            "Matrix, The (1999)".to_string(),
            "0133093".to_string(),
        )]));
        let mut movie = Movie::new(MovieOpts {
            title: Some("The Matrix (1999)".to_string()),
            titles_refs: Some(Arc::clone(&refs)),
            ..Default::default()
        })
        .unwrap();
        movie.set_id("0133093");

        let mut copy = movie.deep_copy();
        assert!(copy.is_same_title(&movie));
        assert!(!Arc::ptr_eq(copy.titles_refs(), movie.titles_refs()));
        assert_eq!(**copy.titles_refs(), **movie.titles_refs());

        copy.set("genres", vec!["Action".to_string()]);
        assert!(!movie.data().contains_key("genres"));
    }

    #[test]
    fn reset_clears_id_and_personal_title() {
        let mut movie = matrix();
        movie.set_id("0133093");
        movie.set_my_title("favorite");
        movie.reset();
        assert_eq!(movie.id(), None);
        assert_eq!(movie.my_title(), "");
        assert!(!movie.is_empty());
    }

    #[test]
    fn summary_sections_in_order() {
        let summary = matrix().summary();
        let positions: Vec<usize> = [
            "Title:", "Genres:", "Director:", "Cast:", "Runtime:", "Country:", "Language:",
            "Rating:", "Plot:",
        ]
        .iter()
        .map(|label| summary.find(label).unwrap_or_else(|| panic!("missing {label}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(summary.contains("Title: Matrix, The (1999)"));
        assert!(summary.contains("Cast: Keanu Reeves (Neo)"));
        assert!(summary.contains("Rating: 8.7 (1500000 votes)."));
        // everything up to and including "::" is dropped from the plot
        assert!(summary.contains("Plot: A computer hacker learns the truth."));
        assert!(!summary.contains("author@example.com"));
        // no writer key, no Writer line
        assert!(!summary.contains("Writer:"));
    }

    #[test]
    fn summary_caps_cast_at_five() {
        let mut movie = Movie::from_title("Crowded (2000)").unwrap();
        let cast: Vec<Person> = (0..8)
            .map(|i| Person::new(format!("Surname{}, Name", i)))
            .collect();
        movie.set("cast", cast);
        let summary = movie.summary();
        assert!(summary.contains("Name Surname4"));
        assert!(!summary.contains("Name Surname5"));
    }

    #[test]
    fn containment_descends_nested_data() {
        let movie = matrix();
        let neo = Person::new("Reeves, Keanu");
        let nobody = Person::new("Nobody, Joe");
        assert!(movie.contains_person(&neo));
        assert!(!movie.contains_person(&nobody));

        assert!(movie.contains_item(&Info::from(neo)));
        assert!(!movie.contains_item(&Info::Text("Reeves, Keanu".to_string())));
    }

    #[test]
    fn describe_replaces_non_ascii() {
        let mut movie = Movie::from_title("Les Misérables (2012)").unwrap();
        movie.set_id("1707386");
        movie.set_access_system("http");
        let descriptor = movie.describe();
        assert!(descriptor.is_ascii());
        assert!(descriptor.starts_with("<Movie id:1707386[http] title:_"));
        assert!(descriptor.contains("Mis?rables"));
    }

    #[test]
    fn mod_funct_rewrites_text_of_modifiable_keys() {
        let mut movie = matrix();
        movie.set_mod_funct(Some(Arc::new(|text: &str| text.to_uppercase())));
        let plot = movie.text_items("plot");
        assert!(plot[0].ends_with("A COMPUTER HACKER LEARNS THE TRUTH."));
        // non-modifiable keys are untouched
        assert_eq!(movie.get_text("title").unwrap(), "The Matrix");
    }

    #[test]
    fn comparator_orders_newer_first() {
        let older = Movie::from_title("Heat (1995)").unwrap();
        let newer = Movie::from_title("Collateral (2004)").unwrap();
        assert_eq!(newer.compare(&older), Ordering::Less);
        assert_eq!(older.compare(&newer), Ordering::Greater);

        let same_year_a = Movie::from_title("Alien (1979)").unwrap();
        let same_year_b = Movie::from_title("Stalker (1979)").unwrap();
        assert_eq!(same_year_a.compare(&same_year_b), Ordering::Less);
    }

    #[test]
    fn title_is_only_set_when_absent() {
        let mut data = BTreeMap::new();
        data.insert("title".to_string(), Info::from("Matrix, The"));
        let movie = Movie::new(MovieOpts {
            title: Some("Something Else (2010)".to_string()),
            data,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(movie.get_text("canonical title").unwrap(), "Matrix, The");
        assert!(!movie.data().contains_key("year"));
    }
}
