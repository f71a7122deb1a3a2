//! Read-only aggregate queries over the persisted ledger.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinelog_core::aggregate::{average_rating, format_member_ratings, lookup_film, rank, top_films};
use cinelog_store::{DataPaths, Ledger};

use crate::error::CliError;

/// Print a film's member ratings and community average.
pub(crate) fn run_avg(paths: &DataPaths, community: &str, film: &str) -> Result<(), CliError> {
    let ledger = Ledger::open(&paths.ratings)?;
    let entry = ledger
        .films(community)
        .and_then(|films| lookup_film(films, film));

    let Some(entry) = entry else {
        println!("Nobody has rated this film");
        return Ok(());
    };

    println!(
        "Ratings for {}",
        entry.title.if_supports_color(Stdout, |t| t.bold()),
    );
    println!("{}", entry.url.if_supports_color(Stdout, |t| t.dimmed()));
    print!("{}", format_member_ratings(entry));
    println!(
        "Community average: {}, from {} members",
        average_rating(entry),
        entry.watchers(),
    );
    Ok(())
}

/// Print the community's top-rated films with enough watchers.
pub(crate) fn run_top(
    paths: &DataPaths,
    community: &str,
    min_members: usize,
) -> Result<(), CliError> {
    let ledger = Ledger::open(&paths.ratings)?;
    let standings = ledger
        .films(community)
        .map(|films| rank(top_films(films, min_members)))
        .unwrap_or_default();

    if standings.is_empty() {
        println!("No films seen by {min_members} or more members");
        return Ok(());
    }

    println!("Top films seen by {min_members} or more members:");
    for (index, film) in standings.iter().enumerate() {
        println!(
            "{:>3}. {} {}, by {} members",
            index + 1,
            film.title.if_supports_color(Stdout, |t| t.bold()),
            film.average,
            film.watchers,
        );
    }
    Ok(())
}
