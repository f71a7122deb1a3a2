use cinelog_core::film::Rating;
use cinelog_store::Ledger;
use tempfile::TempDir;

const COMMUNITY: &str = "644202189144850472";

fn ledger_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("ratings.json")
}

#[test]
fn missing_file_is_empty_ledger() {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::open(ledger_path(&dir)).unwrap();
    assert!(ledger.films(COMMUNITY).is_none());
    assert_eq!(ledger.film_count(), 0);
}

#[test]
fn merge_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut ledger = Ledger::open(ledger_path(&dir)).unwrap();

    for _ in 0..2 {
        ledger.merge(
            COMMUNITY,
            "Heat (1995)",
            "https://letterboxd.com/film/heat-1995/",
            "ana",
            Rating::Stars(9),
        );
    }

    let films = ledger.films(COMMUNITY).unwrap();
    assert_eq!(films.len(), 1);
    let entry = &films["heat 1995"];
    assert_eq!(entry.title, "Heat (1995)");
    assert_eq!(entry.url, "https://letterboxd.com/film/heat-1995/");
    assert_eq!(entry.ratings["ana"], Rating::Stars(9));
    assert_eq!(entry.watchers(), 1);
}

#[test]
fn merge_overwrites_prior_rating() {
    let dir = TempDir::new().unwrap();
    let mut ledger = Ledger::open(ledger_path(&dir)).unwrap();

    let url = "https://letterboxd.com/film/heat-1995/";
    ledger.merge(COMMUNITY, "Heat (1995)", url, "ana", Rating::Watched);
    ledger.merge(COMMUNITY, "Heat (1995)", url, "ana", Rating::Stars(10));

    let entry = &ledger.films(COMMUNITY).unwrap()["heat 1995"];
    assert_eq!(entry.ratings["ana"], Rating::Stars(10));
    assert_eq!(entry.watchers(), 1);
}

#[test]
fn save_and_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = ledger_path(&dir);

    let mut ledger = Ledger::open(&path).unwrap();
    ledger.merge(
        COMMUNITY,
        "Heat (1995)",
        "https://letterboxd.com/film/heat-1995/",
        "ana",
        Rating::Stars(9),
    );
    ledger.merge(
        COMMUNITY,
        "Playtime (1967)",
        "https://letterboxd.com/film/playtime/",
        "ana",
        Rating::Watched,
    );
    ledger.save().unwrap();

    let reloaded = Ledger::open(&path).unwrap();
    let films = reloaded.films(COMMUNITY).unwrap();
    assert_eq!(films.len(), 2);
    assert_eq!(films["playtime 1967"].ratings["ana"], Rating::Watched);
    assert_eq!(films["heat 1995"].ratings["ana"], Rating::Stars(9));
}

#[test]
fn remove_user_scrubs_one_community_only() {
    let dir = TempDir::new().unwrap();
    let mut ledger = Ledger::open(ledger_path(&dir)).unwrap();

    let url = "https://letterboxd.com/film/heat-1995/";
    ledger.merge("one", "Heat (1995)", url, "ana", Rating::Stars(9));
    ledger.merge("one", "Heat (1995)", url, "ben", Rating::Stars(7));
    ledger.merge("one", "Playtime (1967)", url, "ana", Rating::Watched);
    ledger.merge("two", "Heat (1995)", url, "ana", Rating::Stars(8));

    ledger.remove_user("one", "ana");

    let one = ledger.films("one").unwrap();
    assert!(!one["heat 1995"].ratings.contains_key("ana"));
    assert_eq!(one["heat 1995"].ratings["ben"], Rating::Stars(7));
    // The film ana was the only watcher of keeps its (now empty) entry.
    assert_eq!(one["playtime 1967"].watchers(), 0);

    let two = ledger.films("two").unwrap();
    assert_eq!(two["heat 1995"].ratings["ana"], Rating::Stars(8));
}

#[test]
fn saved_document_orders_films_by_popularity() {
    let dir = TempDir::new().unwrap();
    let path = ledger_path(&dir);

    let mut ledger = Ledger::open(&path).unwrap();
    let members: [&str; 3] = ["ana", "ben", "cal"];
    // "crowd 2000" gets 3 watchers, "pair 2001" 2, "solo 2002" 1.
    for (i, title) in ["crowd (2000)", "pair (2001)", "solo (2002)"].iter().enumerate() {
        for member in &members[..3 - i] {
            ledger.merge(
                COMMUNITY,
                title,
                "https://letterboxd.com/film/x/",
                member,
                Rating::Stars(6),
            );
        }
    }
    ledger.save().unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let crowd = raw.find("\"crowd 2000\"").unwrap();
    let pair = raw.find("\"pair 2001\"").unwrap();
    let solo = raw.find("\"solo 2002\"").unwrap();
    assert!(crowd < pair && pair < solo);
}
