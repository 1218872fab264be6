//! Movie metadata records with IMDb-style keys.
//!
//! The central type is [`Movie`]: a semi-structured record mapping
//! lowercase information keys (`"title"`, `"cast"`, `"genres"`, ...) to
//! values. Lookups resolve historical key aliases (`"directed by"` ->
//! `"director"`) and compute derived title keys (`"canonical title"`,
//! `"long imdb title"`, the episode/series family) on the fly, so the
//! backing store only ever holds primitive keys.

pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::title::{analyze_title, build_title, normalize_title, Kind, TitleParts};
pub use crate::core::value::Info;
pub use crate::models::movie::{cmp_movies, Movie, MovieCmp, MovieOpts, RefTable, TextMod};
pub use crate::models::person::Person;
pub use crate::utils::Error;
