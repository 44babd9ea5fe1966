// SPDX-License-Identifier: MIT

//! Wrap builder: flattens top items and tallies genres.

use chrono::Local;

use crate::error::AppError;
use crate::models::{ArtistSummary, Term, TrackSummary, Wrap};
use crate::services::music::{Image, MusicProxyClient, TopArtist, TopTrack};

/// How many genres a wrap keeps.
pub const TOP_GENRE_COUNT: usize = 5;

/// Timestamp format recorded on a wrap.
const WRAP_DATETIME_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

/// Build a wrap for one time window.
///
/// The two top-items calls run sequentially; if either fails the wrap
/// is abandoned and nothing is stored.
pub async fn build_wrap(
    music: &MusicProxyClient,
    access_token: &str,
    term: Term,
) -> Result<Wrap, AppError> {
    let tracks = music.top_tracks(access_token, term).await?;
    let artists = music.top_artists(access_token, term).await?;

    let top_tracks = tracks.iter().map(track_summary).collect();
    let top_artists: Vec<ArtistSummary> = artists.iter().map(artist_summary).collect();
    let top_genres = top_genres(&top_artists, TOP_GENRE_COUNT);

    Ok(Wrap {
        term: term.label().to_string(),
        datetime: Local::now().format(WRAP_DATETIME_FORMAT).to_string(),
        top_tracks,
        top_artists,
        top_genres,
    })
}

/// Flatten a provider track into the stored form.
pub fn track_summary(track: &TopTrack) -> TrackSummary {
    let artist = track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let duration_seconds = (track.duration_ms as f64 / 1000.0).round() as u64;
    let duration = format!("{:02}:{:02}", duration_seconds / 60, duration_seconds % 60);

    TrackSummary {
        name: track.name.clone(),
        artist,
        duration_seconds,
        duration,
        album_img: album_image(&track.album.images),
    }
}

/// Flatten a provider artist into the stored form.
pub fn artist_summary(artist: &TopArtist) -> ArtistSummary {
    ArtistSummary {
        name: artist.name.clone(),
        genres: artist.genres.clone(),
        artist_id: artist.id.clone(),
        image_url: artist
            .images
            .first()
            .map(|i| i.url.clone())
            .unwrap_or_default(),
        popularity: artist.popularity,
    }
}

/// Second-to-last image URL: images come largest first, so this skips
/// the full-size one without dropping to the smallest.
fn album_image(images: &[Image]) -> String {
    match images.len() {
        0 => String::new(),
        1 => images[0].url.clone(),
        n => images[n - 2].url.clone(),
    }
}

/// The `limit` most frequent genres across the artists, ties broken by
/// first-encountered order.
pub fn top_genres(artists: &[ArtistSummary], limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for artist in artists {
        for genre in &artist.genres {
            match counts.iter_mut().find(|(name, _)| name == genre) {
                Some((_, count)) => *count += 1,
                None => counts.push((genre.clone(), 1)),
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(genre, _)| genre).collect()
}
