// SPDX-License-Identifier: MIT

//! Services module - outbound clients and the wrap builder.

pub mod broker;
pub mod music;
pub mod provider;
pub mod wrap;

pub use broker::{AuthBrokerClient, TokenResponse};
pub use music::MusicProxyClient;
pub use provider::{ProviderApiClient, ProviderAuthClient};
pub use wrap::build_wrap;
