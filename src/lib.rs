//! worldexplorer
//!
//! A lightweight Rust library for retrieving and validating World Bank
//! country and indicator data. Pairs with the `worldexplorer` CLI.
//!
//! ### Features
//! - Fetch the full country list, or one country by code
//! - Fetch indicator series (population, life expectancy, literacy, survival
//!   to 65) for a country over a year range
//! - Structural validation of every response before it becomes a domain
//!   value, reporting every violated field path at once
//! - Save results as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use worldexplorer::{Client, DateSpec, Indicator};
//!
//! let client = Client::new("https://api.worldbank.org")?;
//! let country = client.country("BRA")?;
//! let series = client.indicator_series(
//!     &country,
//!     Indicator::LifeExpectancy,
//!     &DateSpec::Range { start: 2000, end: 2020 },
//! )?;
//! worldexplorer::storage::save_series_csv(&series, "bra_life_expectancy.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod schema;
pub mod storage;

pub use api::Client;
pub use error::Error;
pub use models::{Country, DataPoint, DateSpec, Indicator};
pub use schema::Violation;
