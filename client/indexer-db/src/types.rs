//! Serialization helpers shared by the indexer models.

/// Serializes timestamps as ISO-8601 strings in UTC.
///
/// The indexer writes naive timestamps that are already UTC, so the value is
/// tagged with UTC as-is rather than converted.
pub mod utc_datetime {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(datetime) => serializer.serialize_str(&datetime.and_utc().to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Stamped {
        #[serde(serialize_with = "super::utc_datetime::serialize")]
        at: Option<chrono::NaiveDateTime>,
    }

    #[test]
    fn timestamps_are_rendered_as_utc_iso8601() {
        let at = NaiveDate::from_ymd_opt(2019, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();

        let json = serde_json::to_value(Stamped { at: Some(at) }).unwrap();
        assert_eq!(json["at"], "2019-05-01T12:30:00+00:00");

        let json = serde_json::to_value(Stamped { at: None }).unwrap();
        assert!(json["at"].is_null());
    }
}
