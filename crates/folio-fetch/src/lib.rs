//! folio-fetch - Source document retrieval for folio.
//!
//! Provides an HTTP implementation of [`folio_core::Fetcher`] and a helper
//! that fetches a document, strips its boilerplate and saves the body.
//!
//! # Example
//!
//! ```ignore
//! use folio_core::FetchConfig;
//! use folio_fetch::{fetch_and_clean, HttpFetcher};
//! use folio_text::BoilerplateStripper;
//!
//! let fetcher = HttpFetcher::new(FetchConfig::default())?;
//! let text = fetch_and_clean(
//!     &fetcher,
//!     &BoilerplateStripper::default(),
//!     "https://www.gutenberg.org/cache/epub/244/pg244.txt",
//!     Some(Path::new("data/study_in_scarlet.txt")),
//! )
//! .await?;
//! ```

pub mod clean;
pub mod http;

pub use clean::{fetch_and_clean, save_text_to_file};
pub use http::HttpFetcher;
