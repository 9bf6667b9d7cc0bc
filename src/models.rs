use crate::error::Error;
use crate::schema::{CountryRecord, SeriesRecord};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How to specify dates in API queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateSpec {
    /// Single year like 2020
    Year(i32),
    /// Inclusive range like 2000..=2020
    Range { start: i32, end: i32 },
}

impl DateSpec {
    pub fn to_query_param(&self) -> String {
        match *self {
            DateSpec::Year(y) => y.to_string(),
            DateSpec::Range { start, end } => format!("{}:{}", start, end),
        }
    }
}

impl FromStr for DateSpec {
    type Err = Error;

    /// Parses `"YYYY"` or an inclusive range `"YYYY:YYYY"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let year = |raw: &str| {
            raw.trim()
                .parse::<i32>()
                .map_err(|_| Error::Validation(format!("invalid year {:?}, expected YYYY", raw.trim())))
        };
        match spec.split_once(':') {
            Some((a, b)) => {
                let (start, end) = (year(a)?, year(b)?);
                if start > end {
                    return Err(Error::Validation(format!(
                        "invalid date range {spec:?}: start year is after end year"
                    )));
                }
                Ok(DateSpec::Range { start, end })
            }
            None => Ok(DateSpec::Year(year(spec)?)),
        }
    }
}

/// The indicator series this crate knows how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    TotalPopulation,
    MalePopulation,
    FemalePopulation,
    LifeExpectancy,
    AdultMaleLiteracy,
    AdultFemaleLiteracy,
    MaleSurvivalTo65,
    FemaleSurvivalTo65,
}

impl Indicator {
    /// World Bank indicator code used in request URLs.
    pub fn code(self) -> &'static str {
        match self {
            Indicator::TotalPopulation => "SP.POP.TOTL",
            Indicator::MalePopulation => "SP.POP.TOTL.MA.IN",
            Indicator::FemalePopulation => "SP.POP.TOTL.FE.IN",
            Indicator::LifeExpectancy => "SP.DYN.LE00.IN",
            Indicator::AdultMaleLiteracy => "SE.ADT.LITR.MA.ZS",
            Indicator::AdultFemaleLiteracy => "SE.ADT.LITR.FE.ZS",
            Indicator::MaleSurvivalTo65 => "SP.DYN.TO65.MA.ZS",
            Indicator::FemaleSurvivalTo65 => "SP.DYN.TO65.FE.ZS",
        }
    }

    /// Human-readable series name.
    pub fn label(self) -> &'static str {
        match self {
            Indicator::TotalPopulation => "Population, total",
            Indicator::MalePopulation => "Population, male",
            Indicator::FemalePopulation => "Population, female",
            Indicator::LifeExpectancy => "Life expectancy at birth, total (years)",
            Indicator::AdultMaleLiteracy => {
                "Literacy rate, adult male (% of males ages 15 and above)"
            }
            Indicator::AdultFemaleLiteracy => {
                "Literacy rate, adult female (% of females ages 15 and above)"
            }
            Indicator::MaleSurvivalTo65 => "Survival to age 65, male (% of cohort)",
            Indicator::FemaleSurvivalTo65 => "Survival to age 65, female (% of cohort)",
        }
    }
}

/// A country as returned by the countries endpoint. Immutable once built;
/// `id` and `iso2_code` are guaranteed non-empty by schema validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    /// World-Bank-style code, e.g. "USA".
    pub id: String,
    pub iso2_code: String,
    pub capital_city: String,
    /// None when the API reports no coordinates (aggregates like "World").
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

impl From<CountryRecord> for Country {
    fn from(record: CountryRecord) -> Self {
        Self {
            name: record.name,
            id: record.id,
            iso2_code: record.iso2_code,
            capital_city: record.capital_city,
            longitude: parse_coordinate(record.longitude),
            latitude: parse_coordinate(record.latitude),
        }
    }
}

// The API ships coordinates as strings. Validation already guaranteed they
// are numeric or empty, so this conversion cannot drop a reported value.
fn parse_coordinate(raw: Option<String>) -> Option<f64> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// One indicator observation. `value` is None where the series has no data
/// for that period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: String,
    pub value: Option<f64>,
}

impl From<SeriesRecord> for DataPoint {
    fn from(record: SeriesRecord) -> Self {
        Self {
            date: record.date,
            value: record.value,
        }
    }
}
