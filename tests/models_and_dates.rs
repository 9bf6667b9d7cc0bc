use worldexplorer::schema::{CountryRecord, PageInfo, SeriesRecord};
use worldexplorer::{Country, DataPoint, DateSpec, Error, Indicator};

#[test]
fn page_info_per_page_accepts_string_or_number() {
    // per_page as string
    let p: PageInfo =
        serde_json::from_str(r#"{"page":1,"pages":2,"per_page":"1000","total":2000}"#).unwrap();
    assert_eq!(p.per_page, 1000);
    // per_page as number
    let p: PageInfo =
        serde_json::from_str(r#"{"page":1,"pages":2,"per_page":500,"total":2000}"#).unwrap();
    assert_eq!(p.per_page, 500);
}

#[test]
fn country_from_record_parses_coordinates() {
    let record: CountryRecord = serde_json::from_str(
        r#"
    {
      "id":"USA","iso2Code":"US","name":"United States",
      "capitalCity":"Washington D.C.",
      "longitude":"-77.032","latitude":"38.889",
      "region":{"id":"NAC","value":"North America"},
      "incomeLevel":{"id":"HIC","value":"High income"}
    }"#,
    )
    .unwrap();
    let country = Country::from(record);
    assert_eq!(country.name, "United States");
    assert_eq!(country.id, "USA");
    assert_eq!(country.iso2_code, "US");
    assert_eq!(country.capital_city, "Washington D.C.");
    assert_eq!(country.longitude, Some(-77.032));
    assert_eq!(country.latitude, Some(38.889));
}

#[test]
fn country_from_record_keeps_unreported_coordinates_none() {
    let record: CountryRecord = serde_json::from_str(
        r#"{"id":"WLD","iso2Code":"1W","name":"World","capitalCity":"","longitude":"","latitude":null}"#,
    )
    .unwrap();
    let country = Country::from(record);
    assert_eq!(country.longitude, None);
    assert_eq!(country.latitude, None);
}

#[test]
fn datapoint_from_series_record_keeps_date_and_value() {
    let record: SeriesRecord =
        serde_json::from_str(r#"{"date":"2020","value":83100000,"obs_status":null}"#).unwrap();
    let point = DataPoint::from(record);
    assert_eq!(point.date, "2020");
    assert_eq!(point.value, Some(83_100_000.0));
}

#[test]
fn date_spec_renders_query_params() {
    assert_eq!(DateSpec::Year(2020).to_query_param(), "2020");
    assert_eq!(
        DateSpec::Range { start: 2000, end: 2020 }.to_query_param(),
        "2000:2020"
    );
}

#[test]
fn date_spec_parses_year_and_range() {
    assert_eq!("2020".parse::<DateSpec>().unwrap(), DateSpec::Year(2020));
    assert_eq!(
        "2000:2020".parse::<DateSpec>().unwrap(),
        DateSpec::Range { start: 2000, end: 2020 }
    );
    assert_eq!(
        " 2000 : 2020 ".parse::<DateSpec>().unwrap(),
        DateSpec::Range { start: 2000, end: 2020 }
    );
}

#[test]
fn date_spec_rejects_garbage_and_inverted_ranges() {
    for bad in ["", "someday", "2020:", "2020:1999"] {
        match bad.parse::<DateSpec>() {
            Err(Error::Validation(_)) => {}
            other => panic!("expected Validation error for {bad:?}, got {other:?}"),
        }
    }
}

#[test]
fn indicator_codes_match_the_world_bank_catalog() {
    assert_eq!(Indicator::TotalPopulation.code(), "SP.POP.TOTL");
    assert_eq!(Indicator::MalePopulation.code(), "SP.POP.TOTL.MA.IN");
    assert_eq!(Indicator::FemalePopulation.code(), "SP.POP.TOTL.FE.IN");
    assert_eq!(Indicator::LifeExpectancy.code(), "SP.DYN.LE00.IN");
    assert_eq!(Indicator::AdultMaleLiteracy.code(), "SE.ADT.LITR.MA.ZS");
    assert_eq!(Indicator::AdultFemaleLiteracy.code(), "SE.ADT.LITR.FE.ZS");
    assert_eq!(Indicator::MaleSurvivalTo65.code(), "SP.DYN.TO65.MA.ZS");
    assert_eq!(Indicator::FemaleSurvivalTo65.code(), "SP.DYN.TO65.FE.ZS");
}
