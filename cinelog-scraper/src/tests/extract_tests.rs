use super::*;

const LISTING: &str = r#"
<html><body>
<ul class="poster-list">
  <li class="poster-container">
    <div class="film-poster" data-film-slug="heat-1995"><img alt="Heat"></div>
    <p class="poster-viewingdata"><span class="rating rated-9">★★★★½</span></p>
  </li>
  <li class="poster-container">
    <div class="film-poster" data-film-slug="playtime"><img alt="Playtime"></div>
  </li>
  <li class="poster-container">
    <div class="not-a-poster"></div>
  </li>
</ul>
</body></html>
"#;

#[test]
fn extracts_rated_and_watched_logs() {
    let page = extract_film_logs(LISTING);
    assert_eq!(page.found, 3);
    assert_eq!(
        page.logs,
        vec![
            RawLog {
                slug: "heat-1995".to_string(),
                rating: Rating::Stars(9),
            },
            RawLog {
                slug: "playtime".to_string(),
                rating: Rating::Watched,
            },
        ]
    );
}

#[test]
fn empty_page_yields_no_nodes() {
    let page = extract_film_logs("<html><body><ul class=\"poster-list\"></ul></body></html>");
    assert_eq!(page.found, 0);
    assert!(page.logs.is_empty());
}

#[test]
fn rating_class_suffix_must_be_numeric() {
    let html = r#"
    <li class="poster-container">
      <div class="film-poster" data-film-slug="odd"></div>
      <span class="rating rated-x"></span>
    </li>"#;
    let page = extract_film_logs(html);
    assert_eq!(page.found, 1);
    assert!(page.logs.is_empty());
}

#[test]
fn parses_title_and_year() {
    let html = "<html><head><title>Heat (1995)</title></head><body></body></html>";
    let resolved = parse_film_title(html);
    assert_eq!(resolved.title, "Heat");
    assert_eq!(resolved.release_year, "1995");
}

#[test]
fn strips_leading_lrm_mark() {
    let html = "<html><head><title>\u{200E}Playtime (1967)</title></head><body></body></html>";
    let resolved = parse_film_title(html);
    assert_eq!(resolved.title, "Playtime");
    assert_eq!(resolved.release_year, "1967");
}

#[test]
fn title_without_year_gets_empty_year() {
    let html = "<html><head><title>Playtime</title></head><body></body></html>";
    let resolved = parse_film_title(html);
    assert_eq!(resolved.title, "Playtime");
    assert_eq!(resolved.release_year, "");
}

#[test]
fn splits_on_last_paren_group() {
    let html =
        "<html><head><title>Dr. Strangelove (or How I Learned) (1964)</title></head></html>";
    let resolved = parse_film_title(html);
    assert_eq!(resolved.title, "Dr. Strangelove (or How I Learned)");
    assert_eq!(resolved.release_year, "1964");
}

#[test]
fn missing_title_element_gets_placeholder() {
    let resolved = parse_film_title("<html><head></head><body></body></html>");
    assert_eq!(resolved.title, PLACEHOLDER_TITLE);
    assert_eq!(resolved.release_year, "");
}
