//! Metadata sources.
//!
//! The library does not talk to databases itself. A [`MetadataSource`]
//! implementation wraps whatever connectivity layer the host application
//! uses; [`FixtureSource`] serves recorded metadata and backs the CLI and
//! the test suite.
//!
//! [`MetadataSource`]: crate::core::traits::MetadataSource

mod fixture;

pub use fixture::{FixtureConnection, FixtureDatabase, FixtureSource, FixtureTable};
