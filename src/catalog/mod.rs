//! Static recommendation tables: songs, books and places per mood category.
//!
//! The tables ship inside the binary as a JSON document and are parsed once at startup
//! into a [`Catalog`], which is then shared read-only (`Arc<Catalog>`).

pub mod select;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::mood::MoodCategory;

pub use select::{score_book, score_place, select_book, select_place, select_song};

const BUNDLED_CATALOG: &str = include_str!("catalog.json");

/// Hard ceiling on songs returned by the music tool.
pub const MAX_SONGS_PER_REQUEST: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub youtube_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amazon_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goodreads_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub location: String,
    pub description: String,
    #[serde(rename = "type")]
    pub place_type: String,
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// All three tables for a single category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTables {
    pub music: Vec<Song>,
    pub books: Vec<Book>,
    pub places: Vec<Place>,
}

/// The full recommendation catalog. Never mutated after load.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: BTreeMap<MoodCategory, CategoryTables>,
}

impl Catalog {
    /// Parse the catalog compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG).context("bundled catalog is malformed")
    }

    /// Parse a catalog document. Every category must be present with non-empty tables.
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: BTreeMap<MoodCategory, CategoryTables> =
            serde_json::from_str(json).context("failed to parse catalog JSON")?;

        for category in MoodCategory::ALL {
            let t = tables
                .get(&category)
                .with_context(|| format!("catalog has no entry for {category}"))?;
            anyhow::ensure!(
                !t.music.is_empty() && !t.books.is_empty() && !t.places.is_empty(),
                "catalog tables for {category} must not be empty"
            );
        }

        Ok(Self { tables })
    }

    fn tables(&self, category: MoodCategory) -> &CategoryTables {
        // from_json guarantees every category is present
        &self.tables[&category]
    }

    pub fn music(&self, category: MoodCategory) -> &[Song] {
        &self.tables(category).music
    }

    pub fn books(&self, category: MoodCategory) -> &[Book] {
        &self.tables(category).books
    }

    pub fn places(&self, category: MoodCategory) -> &[Place] {
        &self.tables(category).places
    }

    /// The first `count` songs, never more than [`MAX_SONGS_PER_REQUEST`].
    pub fn top_music(&self, category: MoodCategory, count: usize) -> &[Song] {
        let songs = self.music(category);
        &songs[..count.min(MAX_SONGS_PER_REQUEST).min(songs.len())]
    }

    pub fn top_books(&self, category: MoodCategory, count: usize) -> &[Book] {
        let books = self.books(category);
        &books[..count.min(books.len())]
    }

    pub fn top_places(&self, category: MoodCategory, count: usize) -> &[Place] {
        let places = self.places(category);
        &places[..count.min(places.len())]
    }

    /// Song table keyed by category name, for whole-table resources.
    pub fn music_by_mood(&self) -> BTreeMap<&'static str, &[Song]> {
        self.tables
            .iter()
            .map(|(c, t)| (c.as_str(), t.music.as_slice()))
            .collect()
    }

    pub fn books_by_mood(&self) -> BTreeMap<&'static str, &[Book]> {
        self.tables
            .iter()
            .map(|(c, t)| (c.as_str(), t.books.as_slice()))
            .collect()
    }

    pub fn places_by_mood(&self) -> BTreeMap<&'static str, &[Place]> {
        self.tables
            .iter()
            .map(|(c, t)| (c.as_str(), t.places.as_slice()))
            .collect()
    }
}
