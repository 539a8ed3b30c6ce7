use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;
use url::Url;

use crate::error::ClientError;
use crate::table::Table;

/// Root of the CSSE COVID-19 daily reports.
pub const CSSE_DAILY_REPORTS_ROOT: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_daily_reports";

/// Where a daily-report CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(Url),
    Path(PathBuf),
}

impl DatasetSource {
    /// The CSSE daily report for `report_date`, formatted `MM-DD-YYYY`.
    pub fn csse_daily_report(report_date: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(&format!("{CSSE_DAILY_REPORTS_ROOT}/{report_date}.csv"))?;
        Ok(DatasetSource::Url(url))
    }

    /// Fetch and parse the CSV.
    pub fn load(&self) -> Result<Table, ClientError> {
        debug!("processing: {self}");
        match self {
            DatasetSource::Path(path) => Table::from_csv_path(path),
            DatasetSource::Url(url) => {
                let response = reqwest::blocking::get(url.clone())?;
                if !response.status().is_success() {
                    return Err(ClientError::Dataset {
                        source_name: url.to_string(),
                        status: response.status(),
                    });
                }
                Table::from_csv_reader(response)
            }
        }
    }
}

impl FromStr for DatasetSource {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DatasetSource::Url(Url::parse(s)?))
        } else {
            Ok(DatasetSource::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Url(url) => write!(f, "{url}"),
            DatasetSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_strings_are_urls_everything_else_a_path() {
        assert!(matches!(
            "https://example.com/05-17-2020.csv".parse::<DatasetSource>(),
            Ok(DatasetSource::Url(_))
        ));
        assert_eq!(
            "data/05-17-2020.csv".parse::<DatasetSource>().unwrap(),
            DatasetSource::Path(PathBuf::from("data/05-17-2020.csv"))
        );
    }

    #[test]
    fn csse_report_url_uses_report_date() {
        let source = DatasetSource::csse_daily_report("05-17-2020").unwrap();
        assert_eq!(
            source.to_string(),
            format!("{CSSE_DAILY_REPORTS_ROOT}/05-17-2020.csv")
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = DatasetSource::Path(PathBuf::from("does/not/exist.csv"));
        assert!(matches!(source.load(), Err(ClientError::Io(_))));
    }
}
