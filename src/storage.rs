use crate::models::{Country, DataPoint};
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save an indicator series as CSV with header.
pub fn save_series_csv<P: AsRef<Path>>(points: &[DataPoint], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("date", "value"))?;
    for p in points {
        wtr.serialize((&p.date, p.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save an indicator series as pretty JSON array.
pub fn save_series_json<P: AsRef<Path>>(points: &[DataPoint], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(points)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save a country list as CSV with header.
pub fn save_countries_csv<P: AsRef<Path>>(countries: &[Country], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("id", "iso2_code", "name", "capital_city", "longitude", "latitude"))?;
    for c in countries {
        wtr.serialize((
            &c.id,
            &c.iso2_code,
            &c.name,
            &c.capital_city,
            c.longitude,
            c.latitude,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Country, DataPoint};
    use tempfile::tempdir;

    #[test]
    fn write_series_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let pts = vec![
            DataPoint { date: "2019".into(), value: Some(83_000_000.0) },
            DataPoint { date: "2020".into(), value: None },
        ];
        save_series_csv(&pts, &csvp).unwrap();
        save_series_json(&pts, &jsonp).unwrap();
        let csv = std::fs::read_to_string(&csvp).unwrap();
        assert!(csv.starts_with("date,value"));
        assert!(csv.contains("2019,83000000.0"));
        let json: Vec<DataPoint> =
            serde_json::from_str(&std::fs::read_to_string(&jsonp).unwrap()).unwrap();
        assert_eq!(json, pts);
    }

    #[test]
    fn write_countries_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("countries.csv");
        let countries = vec![Country {
            name: "Germany".into(),
            id: "DEU".into(),
            iso2_code: "DE".into(),
            capital_city: "Berlin".into(),
            longitude: Some(13.4115),
            latitude: Some(52.5235),
        }];
        save_countries_csv(&countries, &path).unwrap();
        let csv = std::fs::read_to_string(&path).unwrap();
        assert!(csv.contains("DEU,DE,Germany,Berlin"));
    }
}
