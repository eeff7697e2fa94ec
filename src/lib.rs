// Copyright (c) 2019-2026 Dropbox, Inc.

//! Typed client bindings for the Dropbox HTTP API.
//!
//! Every call is one authenticated HTTPS `POST`, in one of two styles:
//!
//! * RPC calls send JSON arguments in the request body and get JSON back
//!   ([`Dropbox::call`]).
//! * Content-transfer calls send their JSON arguments in the `Dropbox-API-Arg` header, upload an
//!   optional byte body, and get a byte stream back ([`Dropbox::transfer`]).
//!
//! Responses with a status of 400 or above become [`Error::Api`], whose [`ApiError::tag`] gives
//! the machine-readable `(category, value)` pair of the failure, e.g. `("path", "not_found")`.
//!
//! ```no_run
//! # #[cfg(feature = "default_client")]
//! # fn main() -> dropbox_client::Result<()> {
//! use dropbox_client::{block_on_sync, Dropbox, PathRoot};
//! use dropbox_client::default_client::DefaultClient;
//! use dropbox_client::files::GetMetadataArg;
//!
//! let client = DefaultClient::new(std::env::var("DBX_OAUTH_TOKEN").unwrap_or_default())
//!     .with_path_root(PathRoot::Home);
//! let dbx = Dropbox::new(client);
//!
//! match block_on_sync(dbx.files().get_metadata(&GetMetadataArg::new("/missing.txt".to_owned()))) {
//!     Ok(metadata) => println!("{}", metadata.name()),
//!     Err(e) if e.api_error().is_some_and(|e| e.is("path", "not_found")) => println!("no such file"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "default_client"))]
//! # fn main() {}
//! ```

#![deny(
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms,
)]

// Enable a nightly feature for docs.rs which enables decorating feature-gated items.
// To enable this manually, run e.g. `cargo rustdoc --all-features -- --cfg docsrs`.
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Feature-gate something and also decorate it with the feature name on docs.rs.
macro_rules! if_feature {
    ($feature_name:expr, $($item:item)*) => {
        $(
            #[cfg(feature = $feature_name)]
            #[cfg_attr(docsrs, doc(cfg(feature = $feature_name)))]
            $item
        )*
    }
}

#[macro_use] extern crate log;

if_feature! { "default_client", pub mod default_client; }
if_feature! { "default_async_client", pub mod default_async_client; }

#[cfg(any(feature = "default_client", feature = "default_async_client"))]
mod default_client_common;

pub mod api_error;
pub use api_error::{ApiError, TOO_MANY_REQUESTS};

mod error;
pub use error::{Cancelled, Error, NotReady, Result};

pub mod async_client_trait;
pub mod client_trait;
pub mod client_trait_common;
pub(crate) mod client_helpers;
pub use client_helpers::Response;

mod cancel;
pub use cancel::with_cancellation;

mod client;
pub use client::{block_on_sync, Download, Dropbox};

pub mod common;
pub use common::PathRoot;

pub mod files;
pub mod paper;
pub mod sharing;
pub mod users;
