//! Keyword-scored recommendation selection.
//!
//! Context text is split into lower-cased whitespace tokens; a candidate earns points
//! for each field that contains any token as a substring. The highest score wins, with
//! ties going to the earlier candidate. When nothing scores, the pick is uniformly
//! random over the whole list rather than always the first entry.

use rand::Rng;

use super::{Book, Place, Song};

const PRIMARY_WEIGHT: u32 = 3;
const SECONDARY_WEIGHT: u32 = 2;
const TITLE_WEIGHT: u32 = 1;

fn tokenize(context: &str) -> Vec<String> {
    context
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

fn mentions(field: &str, tokens: &[String]) -> bool {
    let field = field.to_lowercase();
    tokens.iter().any(|t| field.contains(t.as_str()))
}

/// Genre +3, description +2, title +1.
pub fn score_book(book: &Book, tokens: &[String]) -> u32 {
    let mut score = 0;
    if mentions(&book.genre, tokens) {
        score += PRIMARY_WEIGHT;
    }
    if mentions(&book.description, tokens) {
        score += SECONDARY_WEIGHT;
    }
    if mentions(&book.title, tokens) {
        score += TITLE_WEIGHT;
    }
    score
}

/// Activities +3, type +2, description +2, name +1.
pub fn score_place(place: &Place, tokens: &[String]) -> u32 {
    let mut score = 0;
    if place.activities.iter().any(|a| mentions(a, tokens)) {
        score += PRIMARY_WEIGHT;
    }
    if mentions(&place.place_type, tokens) {
        score += SECONDARY_WEIGHT;
    }
    if mentions(&place.description, tokens) {
        score += SECONDARY_WEIGHT;
    }
    if mentions(&place.name, tokens) {
        score += TITLE_WEIGHT;
    }
    score
}

fn pick<'a, T, R: Rng + ?Sized>(
    candidates: &'a [T],
    score: impl Fn(&T) -> u32,
    rng: &mut R,
) -> Option<&'a T> {
    let mut best: Option<(&T, u32)> = None;
    for candidate in candidates {
        let s = score(candidate);
        // strict comparison keeps the earliest candidate on ties
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((candidate, s));
        }
    }

    match best {
        Some((winner, s)) if s > 0 => Some(winner),
        Some(_) => Some(&candidates[rng.gen_range(0..candidates.len())]),
        None => None,
    }
}

/// Pick the book that best matches `context`. `None` only for an empty list.
pub fn select_book<'a, R: Rng + ?Sized>(
    books: &'a [Book],
    context: &str,
    rng: &mut R,
) -> Option<&'a Book> {
    let tokens = tokenize(context);
    pick(books, |b| score_book(b, &tokens), rng)
}

/// Pick the place that best matches `context`. `None` only for an empty list.
pub fn select_place<'a, R: Rng + ?Sized>(
    places: &'a [Place],
    context: &str,
    rng: &mut R,
) -> Option<&'a Place> {
    let tokens = tokenize(context);
    pick(places, |p| score_place(p, &tokens), rng)
}

/// Songs carry no scoring corpus, so the pick is always uniform.
pub fn select_song<'a, R: Rng + ?Sized>(songs: &'a [Song], rng: &mut R) -> Option<&'a Song> {
    if songs.is_empty() {
        return None;
    }
    Some(&songs[rng.gen_range(0..songs.len())])
}
