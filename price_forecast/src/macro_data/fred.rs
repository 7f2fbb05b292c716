//! FRED text data files
//!
//! The St. Louis Fed publishes every series as a plain text file: a block of
//! `Key: value` metadata, a `DATE VALUE` header line, then one observation
//! per line. Missing observations are written as `.`.

use super::{MacroData, MacroIndicatorProvider, PublishedSeries};
use crate::error::ProviderError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Series queried when no configuration says otherwise
pub const DEFAULT_SERIES: [(&str, &str); 3] = [
    ("CPI", "https://fred.stlouisfed.org/data/CPIAUCNS.txt"),
    ("GDP", "https://fred.stlouisfed.org/data/A191RL1Q225SBEA.txt"),
    ("Monetary Base", "https://fred.stlouisfed.org/data/BOGMBASE.txt"),
];

/// A named series and where to download it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSource {
    pub name: String,
    pub url: String,
}

impl SeriesSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_SERIES
            .iter()
            .map(|(name, url)| Self::new(*name, *url))
            .collect()
    }
}

/// Something that can return the text behind a URL
pub trait TextSource {
    fn fetch_text(&self, url: &str) -> anyhow::Result<String>;
}

/// Blocking HTTP text source
#[derive(Debug, Clone)]
pub struct HttpTextSource {
    http: reqwest::blocking::Client,
}

impl HttpTextSource {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pricecast/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

impl TextSource for HttpTextSource {
    fn fetch_text(&self, url: &str) -> anyhow::Result<String> {
        let text = self.http.get(url).send()?.error_for_status()?.text()?;
        Ok(text)
    }
}

/// Provider that downloads and parses FRED text files.
///
/// Each series is downloaded once per `fetch` call, regardless of how many
/// dates are requested.
#[derive(Debug, Clone)]
pub struct FredProvider<S: TextSource> {
    sources: Vec<SeriesSource>,
    text_source: S,
}

impl<S: TextSource> FredProvider<S> {
    pub fn new(sources: Vec<SeriesSource>, text_source: S) -> Self {
        Self {
            sources,
            text_source,
        }
    }

    pub fn sources(&self) -> &[SeriesSource] {
        &self.sources
    }

    /// Download and parse a single series
    pub fn download(&self, source: &SeriesSource) -> Result<PublishedSeries, ProviderError> {
        let text = self
            .text_source
            .fetch_text(&source.url)
            .map_err(|e| ProviderError::Fetch {
                series: source.name.clone(),
                reason: format!("{:#}", e),
            })?;
        parse_series(&source.name, &text)
    }
}

impl<S: TextSource> MacroIndicatorProvider for FredProvider<S> {
    fn fetch(&self, dates: &[NaiveDate]) -> Result<MacroData, ProviderError> {
        let mut data = MacroData::new();
        for source in &self.sources {
            let series = self.download(source)?;
            debug!(
                series = %source.name,
                observations = series.observations().len(),
                "downloaded macro series"
            );
            data.push(source.name.clone(), series.values_at(dates)?);
        }
        Ok(data)
    }
}

/// Parse a FRED text file into a published series
pub fn parse_series(name: &str, text: &str) -> Result<PublishedSeries, ProviderError> {
    let parse_error = |reason: String| ProviderError::Parse {
        series: name.to_string(),
        reason,
    };

    let mut lines = text.lines();
    let header_found = lines.by_ref().any(|line| {
        let mut tokens = line.split_whitespace();
        matches!(
            (tokens.next(), tokens.next()),
            (Some(d), Some(v)) if d.eq_ignore_ascii_case("DATE") && v.eq_ignore_ascii_case("VALUE")
        )
    });
    if !header_found {
        return Err(parse_error("missing DATE/VALUE header".to_string()));
    }

    let mut observations = Vec::new();
    for line in lines {
        let mut tokens = line.split_whitespace();
        let (date, value) = match (tokens.next(), tokens.next()) {
            (Some(d), Some(v)) => (d, v),
            (None, _) => continue,
            (Some(d), None) => return Err(parse_error(format!("no value on line for {}", d))),
        };

        let date: NaiveDate = date
            .parse()
            .map_err(|e| parse_error(format!("bad date '{}': {}", date, e)))?;
        if value == "." {
            continue;
        }
        let value: f64 = value
            .parse()
            .map_err(|e| parse_error(format!("bad value '{}' on {}: {}", value, date, e)))?;
        observations.push((date, value));
    }

    if observations.is_empty() {
        return Err(parse_error("no observations".to_string()));
    }

    Ok(PublishedSeries::new(name, observations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const GDP_TEXT: &str = "\
Title:               Real Gross Domestic Product
Series ID:           A191RL1Q225SBEA
Frequency:           Quarterly

DATE          VALUE
2018-10-01      1.1
2019-01-01      3.1
2019-04-01      2.0
2019-07-01        .
2019-10-01      2.1
";

    struct MapSource(HashMap<String, String>);

    impl TextSource for MapSource {
        fn fetch_text(&self, url: &str) -> anyhow::Result<String> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("404 for {}", url))
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_series_skips_metadata_and_missing_values() {
        let series = parse_series("GDP", GDP_TEXT).unwrap();
        assert_eq!(series.observations().len(), 4);
        assert_eq!(series.value_at(date("2019-08-15")), Some(2.0));
        assert_eq!(series.value_at(date("2019-10-01")), Some(2.1));
    }

    #[test]
    fn test_parse_series_errors() {
        assert!(parse_series("GDP", "no header here").is_err());
        assert!(parse_series("GDP", "DATE VALUE\n2019-01-01 abc\n").is_err());
        assert!(parse_series("GDP", "DATE VALUE\n").is_err());
    }

    #[test]
    fn test_provider_joins_each_series() {
        let mut pages = HashMap::new();
        pages.insert("gdp".to_string(), GDP_TEXT.to_string());
        let provider = FredProvider::new(
            vec![SeriesSource::new("GDP", "gdp")],
            MapSource(pages),
        );

        let data = provider
            .fetch(&[date("2019-02-03"), date("2019-04-22")])
            .unwrap();
        assert_eq!(data.get("GDP"), Some(&[3.1, 2.0][..]));
    }

    #[test]
    fn test_provider_reports_fetch_failures() {
        let provider = FredProvider::new(
            vec![SeriesSource::new("CPI", "missing")],
            MapSource(HashMap::new()),
        );

        let err = provider.fetch(&[date("2019-02-03")]).unwrap_err();
        assert!(matches!(err, ProviderError::Fetch { ref series, .. } if series == "CPI"));
    }
}
