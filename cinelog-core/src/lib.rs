//! Core domain types and pure functions for cinelog.
//!
//! Film identity normalization, the rating value model, listing-page
//! reference arithmetic, and the aggregation functions that the CLI
//! serves answers from. No I/O happens in this crate.

pub mod aggregate;
pub mod film;
pub mod site;

pub use aggregate::{
    FilmStanding, average_rating, format_member_ratings, lookup_film, rank, top_films,
};
pub use film::{FilmEntry, Rating, WATCHED_MARK, display_title, film_key};
