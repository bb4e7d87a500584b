//! Content-source adapters: the live GraphQL API and offline JSON snapshots.

mod graphql;
mod snapshot;

pub use graphql::{API_KEY_HEADER, GraphqlContentClient};
pub use snapshot::SnapshotContentClient;
