//! Picking one record out of a provider response.

use crate::error::ModelError;
use crate::record::FlightRecord;

/// Choose the record to display.
///
/// The first record whose status is trackable (`active`, `scheduled` or
/// `en route`, case-insensitive) wins; otherwise the first record. Provider
/// ordering is never changed.
///
/// # Errors
///
/// [`ModelError::NoResults`] when `records` is empty.
pub fn select_best(records: &[FlightRecord]) -> Result<&FlightRecord, ModelError> {
    let first = records.first().ok_or(ModelError::NoResults)?;
    Ok(records
        .iter()
        .find(|r| r.status().is_some_and(|s| s.is_trackable()))
        .unwrap_or(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FlightIdent;

    fn record(iata: &str, status: &str) -> FlightRecord {
        FlightRecord {
            flight_status: Some(status.to_string()),
            flight: Some(FlightIdent {
                iata: Some(iata.to_string()),
                ..FlightIdent::default()
            }),
            ..FlightRecord::default()
        }
    }

    #[test]
    fn empty_list_has_no_results() {
        assert_eq!(select_best(&[]), Err(ModelError::NoResults));
    }

    #[test]
    fn active_record_wins_regardless_of_position() {
        for pos in 0..4 {
            let mut records: Vec<_> = (0..4).map(|i| record(&format!("L{i}"), "landed")).collect();
            records[pos] = record("WIN", "active");
            assert_eq!(select_best(&records).unwrap().flight_iata(), Some("WIN"));
        }
    }

    #[test]
    fn first_trackable_is_chosen() {
        let records = vec![
            record("A", "landed"),
            record("B", "EN ROUTE"),
            record("C", "active"),
        ];
        assert_eq!(select_best(&records).unwrap().flight_iata(), Some("B"));
    }

    #[test]
    fn falls_back_to_first_record() {
        let records = vec![
            record("A", "landed"),
            record("B", "cancelled"),
            record("C", "diverted"),
        ];
        assert_eq!(select_best(&records).unwrap().flight_iata(), Some("A"));
    }

    #[test]
    fn alternate_status_field_is_considered() {
        let mut second = record("B", "");
        second.status = Some("Scheduled".into());
        let records = vec![record("A", "landed"), second];
        assert_eq!(select_best(&records).unwrap().flight_iata(), Some("B"));
    }
}
