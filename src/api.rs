//! Synchronous client for the **World Bank API (v2)** country and indicator
//! endpoints.
//!
//! Every operation runs the same pipeline: build the URL, issue one blocking
//! HTTP request, check the status, parse the body as JSON, validate it
//! against the wire schema, then map the records into domain values. Nothing
//! is retried and nothing is cached; a failure surfaces immediately as one
//! [`Error`] variant.
//!
//! Typical usage:
//! ```no_run
//! # use worldexplorer::{Client, DateSpec, Indicator};
//! let client = Client::new("https://api.worldbank.org")?;
//! let country = client.country("BRA")?;
//! let series = client.indicator_series(
//!     &country,
//!     Indicator::TotalPopulation,
//!     &DateSpec::Range { start: 2000, end: 2020 },
//! )?;
//! # Ok::<(), worldexplorer::Error>(())
//! ```

use crate::error::Error;
use crate::models::{Country, DataPoint, DateSpec, Indicator};
use crate::schema;
use log::{debug, info};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

/// API version segment appended to the base URL.
const VERSION: &str = "v2";
/// Resource prefix for the countries endpoint.
const COUNTRIES_PREFIX: &str = "countries";
/// Nested resource prefix for per-country indicator series.
const INDICATORS_PREFIX: &str = "indicators";
const FORMAT_PARAM: &str = "format";
const JSON_FORMAT: &str = "json";
const PER_PAGE_PARAM: &str = "per_page";
/// Large enough to return every country in a single page.
const COUNTRIES_PER_PAGE: u32 = 320;
const SERIES_PER_PAGE: u32 = 1000;

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part.trim(), SAFE).to_string()
}

#[derive(Debug, Clone)]
pub struct Client {
    countries_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new("https://api.worldbank.org").expect("default base url is valid")
    }
}

impl Client {
    /// Builds a client for `base_url` with a 30s request timeout.
    ///
    /// ### Errors
    /// [`Error::Configuration`] when the URL is blank or its scheme is
    /// neither `http` nor `https`. An invalid client is never constructed.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Like [`Client::new`] but with a caller-chosen total request timeout.
    ///
    /// The timeout is the cancellation boundary of this client: a fetch that
    /// exceeds it is abandoned and its connection released.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(Error::Configuration("the base URL must be provided".into()));
        }
        let lower = trimmed.to_lowercase();
        if !lower.starts_with("https://") && !lower.starts_with("http://") {
            return Err(Error::Configuration(format!(
                "the base URL looks invalid, it should start with https:// or http://: {trimmed:?}"
            )));
        }

        let clean = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let countries_url = format!("{clean}/{VERSION}/{COUNTRIES_PREFIX}");

        let http = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .redirect(Policy::limited(5))
            .user_agent(concat!("worldexplorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Request)?;

        info!("population client initialized, countries url [{countries_url}]");
        Ok(Self { countries_url, http })
    }

    /// Effective request root for the countries endpoint,
    /// e.g. `https://api.worldbank.org/v2/countries`.
    pub fn countries_url(&self) -> &str {
        &self.countries_url
    }

    /// Fetches the full country list in one page, in API response order.
    pub fn all_countries(&self) -> Result<Vec<Country>, Error> {
        let url = format!(
            "{}?{FORMAT_PARAM}={JSON_FORMAT}&{PER_PAGE_PARAM}={COUNTRIES_PER_PAGE}",
            self.countries_url
        );
        let envelope = self.fetch_envelope(&url)?;
        let (_, records) =
            schema::validate_country_envelope(&envelope).map_err(Error::SchemaValidation)?;
        info!("found {} countries", records.len());
        Ok(records.into_iter().map(Country::from).collect())
    }

    /// Looks up a single country by its World Bank or ISO2 code.
    ///
    /// ### Errors
    /// - [`Error::Validation`] when `code` is blank
    /// - [`Error::NotFound`] when the lookup matches nothing
    /// - [`Error::AmbiguousLookup`] when the API returns more than one record
    pub fn country(&self, code: &str) -> Result<Country, Error> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::Validation("the country code must be provided".into()));
        }
        let url = format!(
            "{}/{}?{FORMAT_PARAM}={JSON_FORMAT}&{PER_PAGE_PARAM}={COUNTRIES_PER_PAGE}",
            self.countries_url,
            enc(code)
        );
        let envelope = self.fetch_envelope(&url)?;
        let (_, mut records) =
            schema::validate_country_envelope(&envelope).map_err(Error::SchemaValidation)?;
        match records.len() {
            0 => Err(Error::NotFound { code: code.to_string() }),
            1 => Ok(Country::from(records.remove(0))),
            count => Err(Error::AmbiguousLookup { code: code.to_string(), count }),
        }
    }

    /// Fetches one indicator series for `country` over `date`, sorted by date
    /// ascending. Unreported periods keep their `None` value.
    pub fn indicator_series(
        &self,
        country: &Country,
        indicator: Indicator,
        date: &DateSpec,
    ) -> Result<Vec<DataPoint>, Error> {
        let url = format!(
            "{}/{}/{INDICATORS_PREFIX}/{}?{FORMAT_PARAM}={JSON_FORMAT}&date={}&{PER_PAGE_PARAM}={SERIES_PER_PAGE}",
            self.countries_url,
            enc(&country.id),
            enc(indicator.code()),
            date.to_query_param()
        );
        let envelope = self.fetch_envelope(&url)?;
        let (_, records) =
            schema::validate_series_envelope(&envelope).map_err(Error::SchemaValidation)?;
        let mut points: Vec<DataPoint> = records.into_iter().map(DataPoint::from).collect();
        // The API answers newest-first; callers expect ascending.
        points.sort_by(|a, b| a.date.cmp(&b.date));
        debug!("{} observations for {} / {}", points.len(), country.id, indicator.code());
        Ok(points)
    }

    /// Total population (`SP.POP.TOTL`).
    pub fn total_population(&self, country: &Country, date: &DateSpec) -> Result<Vec<DataPoint>, Error> {
        self.indicator_series(country, Indicator::TotalPopulation, date)
    }

    /// Male population (`SP.POP.TOTL.MA.IN`).
    pub fn male_population(&self, country: &Country, date: &DateSpec) -> Result<Vec<DataPoint>, Error> {
        self.indicator_series(country, Indicator::MalePopulation, date)
    }

    /// Female population (`SP.POP.TOTL.FE.IN`).
    pub fn female_population(&self, country: &Country, date: &DateSpec) -> Result<Vec<DataPoint>, Error> {
        self.indicator_series(country, Indicator::FemalePopulation, date)
    }

    /// Life expectancy at birth (`SP.DYN.LE00.IN`).
    pub fn life_expectancy(&self, country: &Country, date: &DateSpec) -> Result<Vec<DataPoint>, Error> {
        self.indicator_series(country, Indicator::LifeExpectancy, date)
    }

    /// Adult male literacy rate (`SE.ADT.LITR.MA.ZS`).
    pub fn adult_male_literacy(&self, country: &Country, date: &DateSpec) -> Result<Vec<DataPoint>, Error> {
        self.indicator_series(country, Indicator::AdultMaleLiteracy, date)
    }

    /// Adult female literacy rate (`SE.ADT.LITR.FE.ZS`).
    pub fn adult_female_literacy(&self, country: &Country, date: &DateSpec) -> Result<Vec<DataPoint>, Error> {
        self.indicator_series(country, Indicator::AdultFemaleLiteracy, date)
    }

    /// Male survival to age 65 (`SP.DYN.TO65.MA.ZS`).
    pub fn male_survival_to_65(&self, country: &Country, date: &DateSpec) -> Result<Vec<DataPoint>, Error> {
        self.indicator_series(country, Indicator::MaleSurvivalTo65, date)
    }

    /// Female survival to age 65 (`SP.DYN.TO65.FE.ZS`).
    pub fn female_survival_to_65(&self, country: &Country, date: &DateSpec) -> Result<Vec<DataPoint>, Error> {
        self.indicator_series(country, Indicator::FemaleSurvivalTo65, date)
    }

    /// Shared front half of every operation: request, status check, JSON
    /// parse, and upstream error-payload detection. Schema validation is the
    /// caller's next step because the expected record shape differs per
    /// endpoint.
    fn fetch_envelope(&self, url: &str) -> Result<Value, Error> {
        debug!("GET {url}");
        let response = self.http.get(url).send().map_err(Error::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                text: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }
        let body = response.text().map_err(Error::Request)?;
        let value: Value = serde_json::from_str(&body).map_err(Error::Parse)?;
        // The API reports its own errors as a one-element array carrying a
        // "message" payload, with HTTP 200.
        if let Some(first) = value.as_array().and_then(|slots| slots.first()) {
            if let Some(message) = first.get("message") {
                return Err(Error::Api(message.to_string()));
            }
        }
        Ok(value)
    }
}
