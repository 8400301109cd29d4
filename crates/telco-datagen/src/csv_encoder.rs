//! CSV encoding for object storage exports

use crate::error::{GenError, GenResult};
use serde::Serialize;

/// Serialize records to UTF-8 CSV
///
/// The header row follows the record's field declaration order; dates are
/// ISO formatted and ids hyphenated. An empty slice is rejected since there
/// would be no header to derive.
pub fn encode_csv<T: Serialize>(records: &[T]) -> GenResult<Vec<u8>> {
    if records.is_empty() {
        return Err(GenError::EmptyBatch);
    }

    let mut writer = csv::Writer::from_writer(Vec::with_capacity(records.len() * 128));
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| GenError::Csv(e.into_error().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabricator::RecordFabricator;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use telco_core::models::{CallRecord, CallType};
    use uuid::Uuid;

    #[test]
    fn test_header_follows_field_order() {
        let record = CallRecord {
            id: Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
            customer_id: Uuid::parse_str("a1a2a3a4-b1b2-4c1c-8d1d-e1e2e3e4e5e6").unwrap(),
            call_date: NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
            call_duration: 2.5,
            call_type: CallType::NetworkIssue,
            location_id: 12,
        };

        let csv = String::from_utf8(encode_csv(&[record]).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,customer_id,call_date,call_duration,call_type,location_id")
        );
        assert_eq!(
            lines.next(),
            Some(
                "67e55044-10b1-426f-9247-bb680e5fe0c8,a1a2a3a4-b1b2-4c1c-8d1d-e1e2e3e4e5e6,\
                 2026-10-03,2.5,Network Issue,12"
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let records: Vec<CallRecord> = Vec::new();
        assert!(matches!(encode_csv(&records), Err(GenError::EmptyBatch)));
    }

    #[test]
    fn test_fabricated_calls_read_back() {
        let fab = RecordFabricator::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut rng = StdRng::seed_from_u64(21);
        let ids = fab.customer_ids(&mut rng, 5);
        let calls = fab.call_records(&mut rng, &ids, 100);

        let bytes = encode_csv(&calls).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        assert_eq!(
            reader.headers().unwrap(),
            vec![
                "id",
                "customer_id",
                "call_date",
                "call_duration",
                "call_type",
                "location_id"
            ]
        );

        let decoded: Vec<CallRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(decoded, calls);
    }
}
