//! letterboxd.com reference composition and pagination arithmetic.

/// Base URL of the scraped site.
pub const BASE: &str = "https://letterboxd.com";

/// First film-log listing page for a member handle.
pub fn films_first_page(handle: &str) -> String {
    format!("{BASE}/{handle}/films/page/1/")
}

/// Canonical film page for a poster slug.
pub fn film_url(slug: &str) -> String {
    format!("{BASE}/film/{slug}/")
}

/// Page number of a listing ref: the trailing numeric path segment.
pub fn page_number(listing_ref: &str) -> Option<u32> {
    listing_ref
        .rsplit('/')
        .find(|seg| !seg.is_empty())?
        .parse()
        .ok()
}

/// Ref for the page after this one.
///
/// Returns `None` when the ref does not end in a `/page/N/` segment, so a
/// malformed ref can never loop on the same page forever.
pub fn next_page(listing_ref: &str) -> Option<String> {
    let n = page_number(listing_ref)?;
    let head = listing_ref.strip_suffix(&format!("/page/{n}/"))?;
    Some(format!("{head}/page/{}/", n + 1))
}
