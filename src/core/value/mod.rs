use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::movie::Movie;
use crate::models::person::Person;

/// A value stored under an information key.
///
/// The closed set of node kinds keeps nested traversal explicit:
/// `Text`/`Number` are leaves, `List`/`Map` descend into their elements
/// and a nested `Movie` descends into its own data map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Info {
    Text(String),
    Number(f64),
    List(Vec<Info>),
    Map(BTreeMap<String, Info>),
    Person(Person),
    Movie(Box<Movie>),
}

impl Info {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Info::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Info::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Info]> {
        match self {
            Info::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Info>> {
        match self {
            Info::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Info::Person(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_movie(&self) -> Option<&Movie> {
        match self {
            Info::Movie(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Info::Text(s) => f.write_str(s),
            Info::Number(n) => f.write_str(&format_number(*n)),
            Info::List(items) => {
                let joined = items
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                f.write_str(&joined)
            }
            Info::Map(map) => {
                let joined = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                f.write_str(&joined)
            }
            Info::Person(p) => f.write_str(&p.display_name()),
            Info::Movie(m) => write!(f, "{}", m),
        }
    }
}

/// Integral numbers render without a trailing ".0" (vote counts, years).
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for Info {
    fn from(s: &str) -> Self {
        Info::Text(s.to_string())
    }
}

impl From<String> for Info {
    fn from(s: String) -> Self {
        Info::Text(s)
    }
}

impl From<f64> for Info {
    fn from(n: f64) -> Self {
        Info::Number(n)
    }
}

impl From<u32> for Info {
    fn from(n: u32) -> Self {
        Info::Number(n as f64)
    }
}

impl From<Vec<String>> for Info {
    fn from(items: Vec<String>) -> Self {
        Info::List(items.into_iter().map(Info::Text).collect())
    }
}

impl From<Vec<Info>> for Info {
    fn from(items: Vec<Info>) -> Self {
        Info::List(items)
    }
}

impl From<Person> for Info {
    fn from(p: Person) -> Self {
        Info::Person(p)
    }
}

impl From<Movie> for Info {
    fn from(m: Movie) -> Self {
        Info::Movie(Box::new(m))
    }
}

impl From<Vec<Person>> for Info {
    fn from(people: Vec<Person>) -> Self {
        Info::List(people.into_iter().map(Info::Person).collect())
    }
}

/// Collect every person reachable through lists, maps and nested movie
/// records, depth-first. Scalars are leaves.
pub fn flatten_persons(info: &Info) -> Vec<&Person> {
    let mut out = Vec::new();
    collect_persons(info, &mut out);
    out
}

fn collect_persons<'a>(info: &'a Info, out: &mut Vec<&'a Person>) {
    match info {
        Info::Person(p) => out.push(p),
        Info::List(items) => {
            for item in items {
                collect_persons(item, out);
            }
        }
        Info::Map(map) => {
            for value in map.values() {
                collect_persons(value, out);
            }
        }
        Info::Movie(movie) => {
            for value in movie.data().values() {
                collect_persons(value, out);
            }
        }
        Info::Text(_) | Info::Number(_) => {}
    }
}
