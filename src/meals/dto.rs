use serde::{de, Deserialize, Deserializer, Serialize};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};

use crate::store::{Meal, MealInput};

/// Body of create and update requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "coerce_date_time")]
    pub date_time: OffsetDateTime,
    pub is_on_diet: bool,
}

impl From<MealRequest> for MealInput {
    fn from(r: MealRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            date_time: r.date_time,
            is_on_diet: r.is_on_diet,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: Meal,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDateTime {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

/// Accepts an RFC 3339 timestamp, a local `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// timestamp or `YYYY-MM-DD` date (both read as UTC), or milliseconds since
/// the Unix epoch. Fractional milliseconds are truncated.
fn coerce_date_time<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDateTime::deserialize(deserializer)? {
        RawDateTime::Millis(ms) => {
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
                .map_err(de::Error::custom)
        }
        RawDateTime::FractionalMillis(ms) => {
            if !ms.is_finite() {
                return Err(de::Error::custom("invalid dateTime: non-finite number"));
            }
            OffsetDateTime::from_unix_timestamp_nanos(ms.trunc() as i128 * 1_000_000)
                .map_err(de::Error::custom)
        }
        RawDateTime::Text(s) => parse_date_time(&s).map_err(de::Error::custom),
    }
}

pub fn parse_date_time(s: &str) -> Result<OffsetDateTime, String> {
    let s = s.trim();
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Ok(dt);
    }
    if let Ok(dt) = PrimitiveDateTime::parse(
        s,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
        ),
    ) {
        return Ok(dt.assume_utc());
    }
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map(|d| d.midnight().assume_utc())
        .map_err(|_| format!("invalid dateTime: {s:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn parse(body: serde_json::Value) -> Result<MealRequest, serde_json::Error> {
        serde_json::from_value(body)
    }

    #[test]
    fn accepts_rfc3339_date_time() {
        let req = parse(serde_json::json!({
            "name": "Oats",
            "description": "with berries",
            "dateTime": "2024-03-10T08:30:00-03:00",
            "isOnDiet": true
        }))
        .unwrap();
        assert_eq!(req.date_time, datetime!(2024-03-10 11:30 UTC));
        assert!(req.is_on_diet);
    }

    #[test]
    fn accepts_plain_date_and_epoch_millis() {
        assert_eq!(
            parse_date_time("2024-03-10").unwrap(),
            datetime!(2024-03-10 0:00 UTC)
        );

        let req = parse(serde_json::json!({
            "name": "Snack",
            "description": "",
            "dateTime": 1_704_067_200_000_i64,
            "isOnDiet": false,
            "ignored": "extra fields are dropped"
        }))
        .unwrap();
        assert_eq!(req.date_time, datetime!(2024-01-01 0:00 UTC));
    }

    #[test]
    fn accepts_timestamps_without_offset_as_utc() {
        assert_eq!(
            parse_date_time("2024-05-01T08:00:00").unwrap(),
            datetime!(2024-05-01 8:00 UTC)
        );
        assert_eq!(
            parse_date_time("2024-05-01T08:00").unwrap(),
            datetime!(2024-05-01 8:00 UTC)
        );
        assert_eq!(
            parse_date_time("2024-05-01T08:00:30.250").unwrap(),
            datetime!(2024-05-01 8:00:30.25 UTC)
        );
    }

    #[test]
    fn accepts_fractional_epoch_millis() {
        let req = parse(serde_json::json!({
            "name": "Snack",
            "description": "",
            "dateTime": 1_704_067_200_000.9_f64,
            "isOnDiet": true
        }))
        .unwrap();
        assert_eq!(req.date_time, datetime!(2024-01-01 0:00 UTC));
    }

    #[test]
    fn rejects_bad_payloads() {
        assert!(parse(serde_json::json!({
            "name": "Soup",
            "description": "",
            "dateTime": "yesterday",
            "isOnDiet": true
        }))
        .is_err());

        assert!(parse(serde_json::json!({
            "name": "Soup",
            "description": "",
            "dateTime": "2024-03-10",
            "isOnDiet": "yes"
        }))
        .is_err());
    }
}
