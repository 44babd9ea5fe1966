// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod wrap;

pub use wrap::{ArtistSummary, Term, TrackSummary, UserSummary, Wrap};
