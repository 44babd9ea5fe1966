// SPDX-License-Identifier: MIT

//! Wrap models: the stored snapshot of a user's top items.

use serde::{Deserialize, Serialize};

/// Time-range selector for "top items" queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Short,
    Medium,
    Long,
}

impl Term {
    /// Parse the client-facing form (`short`, `medium`, `long`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "short" => Some(Term::Short),
            "medium" => Some(Term::Medium),
            "long" => Some(Term::Long),
            _ => None,
        }
    }

    /// The provider's time-range value for this term.
    pub fn time_range(&self) -> &'static str {
        match self {
            Term::Short => "short_term",
            Term::Medium => "medium_term",
            Term::Long => "long_term",
        }
    }

    /// The short label stored in a wrap.
    pub fn label(&self) -> &'static str {
        match self {
            Term::Short => "short",
            Term::Medium => "medium",
            Term::Long => "long",
        }
    }
}

/// Flattened track record embedded in a wrap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSummary {
    /// Track name
    pub name: String,
    /// Joined artist names ("A, B")
    pub artist: String,
    /// Duration rounded to whole seconds
    pub duration_seconds: u64,
    /// Duration as zero-padded "MM:SS"
    pub duration: String,
    /// Album image URL (second-to-last, skipping the largest)
    pub album_img: String,
}

/// Flattened artist record embedded in a wrap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSummary {
    /// Artist name
    pub name: String,
    /// Genre tags, provider order preserved
    pub genres: Vec<String>,
    /// Provider artist id
    pub artist_id: String,
    /// First image URL
    pub image_url: String,
    /// Provider popularity score
    pub popularity: u32,
}

/// A "wrap": snapshot of a user's top tracks/artists/genres for one
/// time window. Immutable once stored; removed whole on deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wrap {
    /// Term label: "short", "medium" or "long"
    pub term: String,
    /// Local creation timestamp, "MM/DD/YYYY, HH:MM:SS"
    pub datetime: String,
    /// Up to 10 top tracks
    pub top_tracks: Vec<TrackSummary>,
    /// Up to 10 top artists
    pub top_artists: Vec<ArtistSummary>,
    /// Up to 5 most frequent genres across the top artists
    pub top_genres: Vec<String>,
}

/// One document per user in the `user_summaries` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// Provider user id (unique key)
    pub user_id: String,
    /// Ordered wrap history, append-only until a deletion
    #[serde(default)]
    pub summary_list: Vec<Wrap>,
}
