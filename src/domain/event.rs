use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::domain::validation::ValidationError;

const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

#[derive(Debug, thiserror::Error)]
#[error("stored event time {stored:?} does not match the wire format: {source}")]
pub struct TimeParseError {
    stored: String,
    #[source]
    source: chrono::ParseError,
}

/// Kind of event being scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    AccountCreation,
    AccountLogin,
    Purchase,
    RecurringPurchase,
    Referral,
    Survey,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Event data for a scoring request.
///
/// The time is formatted when it is handed to the builder
/// (`YYYY-MM-DDTHH:MM:SS.ssZ`, UTC, hundredths of a second) and kept as that string.
pub struct Event {
    #[serde(skip_serializing_if = "crate::domain::value::is_none_or_empty")]
    transaction_id: Option<String>,
    #[serde(skip_serializing_if = "crate::domain::value::is_none_or_empty")]
    shop_id: Option<String>,
    #[serde(skip_serializing_if = "crate::domain::value::is_none_or_empty")]
    time: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    event_type: Option<EventType>,
}

impl Event {
    /// Wire name of the time field (`time`).
    pub const TIME_FIELD: &'static str = "time";

    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn shop_id(&self) -> Option<&str> {
        self.shop_id.as_deref()
    }

    /// The time exactly as it goes on the wire.
    pub fn formatted_time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    /// Parse the stored time back into an instant.
    ///
    /// Precision is limited to hundredths of a second.
    pub fn time(&self) -> Result<Option<DateTime<Utc>>, TimeParseError> {
        self.time.as_deref().map(parse_time).transpose()
    }

    pub fn event_type(&self) -> Option<EventType> {
        self.event_type
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    inner: Event,
}

impl EventBuilder {
    string_setters!(inner => transaction_id, shop_id);

    /// Set the event time, converted to UTC and formatted immediately.
    ///
    /// The wire format has a four-digit year, so instants whose UTC year falls outside
    /// `0000..=9999` are rejected.
    pub fn time<Tz: TimeZone>(mut self, time: DateTime<Tz>) -> Result<Self, ValidationError> {
        let utc = time.with_timezone(&Utc);
        if !YEARS.contains(&utc.year()) {
            return Err(ValidationError::Invalid {
                field: Event::TIME_FIELD,
                input: utc.to_rfc3339(),
            });
        }
        self.inner.time = Some(format_time(&utc));
        Ok(self)
    }

    pub fn event_type(mut self, event_type: EventType) -> Self {
        self.inner.event_type = Some(event_type);
        self
    }

    pub fn build(self) -> Event {
        self.inner
    }
}

fn format_time(time: &DateTime<Utc>) -> String {
    // Leap seconds report >= 1000 ms.
    let hundredths = time.timestamp_subsec_millis().min(999) / 10;
    format!("{}.{hundredths:02}Z", time.format(SECONDS_FORMAT))
}

fn parse_time(stored: &str) -> Result<DateTime<Utc>, TimeParseError> {
    NaiveDateTime::parse_from_str(stored, PARSE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| TimeParseError {
            stored: stored.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, Timelike};

    use super::*;

    fn instant() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_nano_opt(7, 8, 9, 123_456_789)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn time_is_formatted_at_assignment() {
        let event = Event::builder().time(instant()).unwrap().build();
        assert_eq!(event.formatted_time(), Some("2024-05-06T07:08:09.12Z"));
    }

    #[test]
    fn time_round_trips_to_hundredths() {
        let event = Event::builder().time(instant()).unwrap().build();
        let parsed = event.time().unwrap().unwrap();
        assert_eq!(parsed, instant().with_nanosecond(120_000_000).unwrap());
    }

    #[test]
    fn time_is_converted_to_utc() {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let local = instant().with_timezone(&offset);
        let event = Event::builder().time(local).unwrap().build();
        assert_eq!(event.formatted_time(), Some("2024-05-06T07:08:09.12Z"));
    }

    #[test]
    fn whole_seconds_keep_two_fraction_digits() {
        let time = NaiveDate::from_ymd_opt(2020, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
            .and_utc();
        let event = Event::builder().time(time).unwrap().build();
        assert_eq!(event.formatted_time(), Some("2020-01-02T03:04:05.00Z"));
        assert_eq!(event.time().unwrap(), Some(time));
    }

    #[test]
    fn years_beyond_four_digits_are_rejected() {
        let far = NaiveDate::from_ymd_opt(10_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        let err = Event::builder().time(far).unwrap_err();
        assert!(matches!(err, ValidationError::Invalid { field: "time", .. }));

        let before = NaiveDate::from_ymd_opt(-1, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap()
            .and_utc();
        assert!(Event::builder().time(before).is_err());
    }

    #[test]
    fn last_four_digit_year_is_accepted() {
        let last = NaiveDate::from_ymd_opt(9999, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 990)
            .unwrap()
            .and_utc();
        let event = Event::builder().time(last).unwrap().build();
        assert_eq!(event.formatted_time(), Some("9999-12-31T23:59:59.99Z"));
        assert_eq!(event.time().unwrap(), Some(last));
    }

    #[test]
    fn missing_time_is_none() {
        let event = Event::builder().transaction_id("t1").build();
        assert_eq!(event.time().unwrap(), None);
    }

    #[test]
    fn corrupted_time_fails_to_parse() {
        let event = Event {
            time: Some("06/05/2024 07:08".to_owned()),
            ..Event::default()
        };
        let err = event.time().unwrap_err();
        assert!(err.to_string().contains("06/05/2024 07:08"));
    }

    #[test]
    fn serializes_type_as_lowercase_name() {
        let event = Event::builder()
            .transaction_id("txn-1")
            .shop_id("shop-9")
            .time(instant())
            .unwrap()
            .event_type(EventType::AccountCreation)
            .build();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "transaction_id": "txn-1",
                "shop_id": "shop-9",
                "time": "2024-05-06T07:08:09.12Z",
                "type": "account_creation",
            })
        );
    }
}
