// SPDX-License-Identifier: MIT

//! Database layer (MongoDB).

pub mod mongo;

pub use mongo::SummaryStore;

/// Collection names as constants.
pub mod collections {
    pub const USER_SUMMARIES: &str = "user_summaries";
}
