// bitly-api: Async Rust client for a subset of the Bitly v4 API

pub mod bitlinks;
pub mod clicks;
pub mod client;
pub mod error;
pub mod link;
pub mod models;
pub mod organizations;
pub mod transport;

pub use clicks::{ALL_PERIODS, ClickPeriod, ClicksQuery, ClicksResult, TimeUnit, aggregate};
pub use client::{BitlyClient, DEFAULT_BASE_URL};
pub use error::Error;
pub use link::{DEFAULT_DOMAIN, LinkReference};
pub use models::{
    Bitlink, DeleteResponse, DeletedLink, Extra, Group, GroupsResponse, Organization,
    OrganizationsResponse,
};
pub use transport::TransportConfig;
