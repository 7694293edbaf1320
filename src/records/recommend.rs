use std::num::ParseIntError;

use serde::Serialize;

use crate::records::repo::HealthRecord;

/// Advisory derived from the user's most recent vitals. Illustrative only,
/// not medical guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    NoData,
    BloodPressureHigh,
    SugarHigh,
    HeartRateHigh,
    WeightLow,
    LooksGood,
    InvalidFormat,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::NoData => "No health data available",
            Advisory::BloodPressureHigh => "Blood pressure is high. Reduce salt and relax.",
            Advisory::SugarHigh => "Sugar level is high. Avoid sweets and walk daily.",
            Advisory::HeartRateHigh => "Heart rate is high. Take rest and stay calm.",
            Advisory::WeightLow => "Weight is low. Eat nutritious food.",
            Advisory::LooksGood => "Health looks good. Keep maintaining!",
            Advisory::InvalidFormat => "Invalid health data format",
        }
    }
}

/// Compute the advisory for the most recent health record, if any.
pub fn recommend(latest: Option<&HealthRecord>) -> Advisory {
    let Some(record) = latest else {
        return Advisory::NoData;
    };
    evaluate(record).unwrap_or(Advisory::InvalidFormat)
}

/// Rules are checked in fixed order and each parses its own field when it
/// is reached; the first match wins. A parse failure encountered along the
/// way aborts the whole check rather than skipping the field.
fn evaluate(record: &HealthRecord) -> Result<Advisory, ParseIntError> {
    if let Some(bp) = parse_vital(record.bp.as_deref())? {
        if bp > 140 {
            return Ok(Advisory::BloodPressureHigh);
        }
    }
    if let Some(sugar) = parse_vital(record.sugar.as_deref())? {
        if sugar > 180 {
            return Ok(Advisory::SugarHigh);
        }
    }
    if let Some(heart_rate) = parse_vital(record.heart_rate.as_deref())? {
        if heart_rate > 100 {
            return Ok(Advisory::HeartRateHigh);
        }
    }
    if let Some(weight) = parse_vital(record.weight.as_deref())? {
        if weight < 45 {
            return Ok(Advisory::WeightLow);
        }
    }
    Ok(Advisory::LooksGood)
}

/// Absent and empty-string fields are skipped; anything else must parse as
/// an integer. Whitespace-only input counts as present and fails the parse.
fn parse_vital(value: Option<&str>) -> Result<Option<i64>, ParseIntError> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => raw.trim().parse::<i64>().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn record(
        bp: Option<&str>,
        sugar: Option<&str>,
        heart_rate: Option<&str>,
        weight: Option<&str>,
    ) -> HealthRecord {
        HealthRecord {
            id: 1,
            user_id: 1,
            bp: bp.map(str::to_string),
            sugar: sugar.map(str::to_string),
            heart_rate: heart_rate.map(str::to_string),
            weight: weight.map(str::to_string),
            recorded_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn no_record_means_no_data() {
        assert_eq!(recommend(None), Advisory::NoData);
    }

    #[test]
    fn all_empty_fields_look_good() {
        let rec = record(Some(""), Some(""), Some(""), Some(""));
        assert_eq!(recommend(Some(&rec)), Advisory::LooksGood);
    }

    #[test]
    fn all_absent_fields_look_good() {
        let rec = record(None, None, None, None);
        assert_eq!(recommend(Some(&rec)), Advisory::LooksGood);
    }

    #[test]
    fn high_blood_pressure_wins_over_high_sugar() {
        let rec = record(Some("150"), Some("200"), None, None);
        assert_eq!(recommend(Some(&rec)), Advisory::BloodPressureHigh);
    }

    #[test]
    fn blood_pressure_threshold_is_exclusive() {
        let at = record(Some("140"), None, None, None);
        let above = record(Some("141"), None, None, None);
        assert_eq!(recommend(Some(&at)), Advisory::LooksGood);
        assert_eq!(recommend(Some(&above)), Advisory::BloodPressureHigh);
    }

    #[test]
    fn high_sugar_detected() {
        let rec = record(Some("120"), Some("181"), None, None);
        assert_eq!(recommend(Some(&rec)), Advisory::SugarHigh);
    }

    #[test]
    fn high_heart_rate_detected() {
        let rec = record(None, Some("180"), Some("101"), None);
        assert_eq!(recommend(Some(&rec)), Advisory::HeartRateHigh);
    }

    #[test]
    fn low_weight_detected() {
        let at = record(None, None, None, Some("45"));
        let below = record(None, None, None, Some("44"));
        assert_eq!(recommend(Some(&at)), Advisory::LooksGood);
        assert_eq!(recommend(Some(&below)), Advisory::WeightLow);
    }

    #[test]
    fn unparsable_field_short_circuits() {
        let rec = record(Some("abc"), Some("200"), None, None);
        assert_eq!(recommend(Some(&rec)), Advisory::InvalidFormat);
    }

    #[test]
    fn unparsable_later_field_aborts_when_reached() {
        let rec = record(Some("120"), Some("high"), None, None);
        assert_eq!(recommend(Some(&rec)), Advisory::InvalidFormat);
    }

    #[test]
    fn winning_rule_is_returned_before_later_fields_parse() {
        let rec = record(Some("150"), None, None, Some("abc"));
        assert_eq!(recommend(Some(&rec)), Advisory::BloodPressureHigh);
    }

    #[test]
    fn whitespace_only_field_is_invalid() {
        let rec = record(Some("  "), None, None, None);
        assert_eq!(recommend(Some(&rec)), Advisory::InvalidFormat);
    }

    #[test]
    fn surrounding_whitespace_still_parses() {
        let rec = record(Some(" 150 "), None, None, None);
        assert_eq!(recommend(Some(&rec)), Advisory::BloodPressureHigh);
    }

    #[test]
    fn advisory_serializes_snake_case() {
        let json = serde_json::to_string(&Advisory::BloodPressureHigh).unwrap();
        assert_eq!(json, r#""blood_pressure_high""#);
    }
}
