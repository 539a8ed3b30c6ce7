use std::fmt;

use super::Table;

/// Derived column dropped during normalization.
pub const COMBINED_KEY_COLUMN: &str = "combined_key";
pub const COUNTY_COLUMN: &str = "county";
pub const DATE_COLUMN: &str = "date";

/// Ordered natural key the server upserts uploaded records on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumns(Vec<String>);

impl KeyColumns {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self(columns.into_iter().map(Into::into).collect())
    }

    pub fn columns(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.iter().any(|c| c == column)
    }
}

impl fmt::Display for KeyColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("|"))
    }
}

/// Canonical name of a lower-cased column, if it has one.
fn canonical_name(column: &str) -> Option<&'static str> {
    match column {
        "province/state" => Some("province_state"),
        "admin2" => Some(COUNTY_COLUMN),
        "country/region" => Some("country_region"),
        "last update" => Some("last_update"),
        "long_" | "long" => Some("longitude"),
        "lat" | "lat_" => Some("latitude"),
        _ => None,
    }
}

/// Bring a daily-report table to the canonical schema and derive its key.
///
/// Column names are lower-cased and known variants renamed; `combined_key`
/// is dropped. The key is `country_region|province_state|date`, with `county`
/// before `date` when the table has a county column. Missing columns are not
/// reported: a report without a county column simply gets the shorter key.
pub fn normalize(mut table: Table) -> (Table, KeyColumns) {
    table.rename_columns(|column| {
        let lower = column.to_lowercase();
        canonical_name(&lower)
            .map(str::to_string)
            .unwrap_or(lower)
    });
    table.drop_column(COMBINED_KEY_COLUMN);

    let key = if table.has_column(COUNTY_COLUMN) {
        KeyColumns::new(["country_region", "province_state", COUNTY_COLUMN, DATE_COLUMN])
    } else {
        KeyColumns::new(["country_region", "province_state", DATE_COLUMN])
    };

    (table, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;
    use rstest::rstest;

    fn table_with(columns: &[&str]) -> Table {
        let row = columns.iter().map(|_| CellValue::Integer(1)).collect();
        Table::new(columns.iter().map(|c| c.to_string()).collect(), vec![row])
    }

    #[test]
    fn early_report_columns_are_renamed() {
        let (table, key) = normalize(table_with(&["Province/State", "Country/Region", "Lat", "Long_"]));

        assert_eq!(
            table.columns(),
            ["province_state", "country_region", "latitude", "longitude"]
        );
        assert_eq!(key.to_string(), "country_region|province_state|date");
    }

    #[rstest]
    #[case("Province/State", "province_state")]
    #[case("Country/Region", "country_region")]
    #[case("Last Update", "last_update")]
    #[case("Admin2", "county")]
    #[case("Lat", "latitude")]
    #[case("Lat_", "latitude")]
    #[case("Long", "longitude")]
    #[case("Long_", "longitude")]
    #[case("Confirmed", "confirmed")]
    fn column_variants_are_renamed(#[case] column: &str, #[case] expected: &str) {
        let (table, _) = normalize(table_with(&[column]));
        assert_eq!(table.columns(), [expected]);
    }

    #[test]
    fn county_column_extends_key() {
        let (_, key) = normalize(table_with(&[
            "FIPS",
            "Admin2",
            "Province_State",
            "Country_Region",
            "Combined_Key",
        ]));
        assert!(key.contains("county"));
        assert_eq!(key.to_string(), "country_region|province_state|county|date");

        let (_, key) = normalize(table_with(&["county", "province_state"]));
        assert!(key.contains("county"));

        let (_, key) = normalize(table_with(&["Province_State", "Country_Region"]));
        assert!(!key.contains("county"));
    }

    #[test]
    fn combined_key_is_dropped() {
        let (table, _) = normalize(table_with(&["Admin2", "Combined_Key", "Last Update"]));
        assert_eq!(table.columns(), ["county", "last_update"]);
        assert_eq!(table.rows()[0].len(), 2);
    }

    #[test]
    fn normalize_is_idempotent() {
        let source = table_with(&[
            "FIPS",
            "Admin2",
            "Province/State",
            "Country/Region",
            "Last Update",
            "Lat",
            "Long",
            "Confirmed",
            "Combined_Key",
        ]);

        let (once, key_once) = normalize(source);
        let (twice, key_twice) = normalize(once.clone());

        assert_eq!(once, twice);
        assert_eq!(key_once, key_twice);
    }

    #[test]
    fn missing_region_columns_still_produce_the_key() {
        // The key names columns the table does not have; the server sees
        // records without them. Kept as-is.
        let (table, key) = normalize(table_with(&["Confirmed", "Deaths"]));
        assert!(!table.has_column("country_region"));
        assert_eq!(key.to_string(), "country_region|province_state|date");
    }
}
