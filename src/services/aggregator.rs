//! Unified create/read over the three typed entry stores.
//!
//! The create path decodes the loosely-typed payload into exactly one
//! strongly typed request at the boundary, then dispatches to that
//! type's store. The read path fans out to each selected store as an
//! independent typed query and merges the projections into one
//! date-descending sequence.

use chrono::NaiveDate;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::diet::CreateDietEntry;
use crate::models::exercise::CreateExerciseEntry;
use crate::models::sleep::CreateSleepEntry;
use crate::models::unified::{DataKind, UnifiedRecord};
use crate::store;

/// A unified-create payload after boundary decoding: exactly one typed
/// variant, discriminant already stripped.
#[derive(Debug)]
pub enum UnifiedCreate {
    Exercise(CreateExerciseEntry),
    Diet(CreateDietEntry),
    Sleep(CreateSleepEntry),
}

fn required_fields(kind: DataKind) -> &'static [&'static str] {
    match kind {
        DataKind::Exercise => &["exercise_type", "duration_minutes", "date"],
        DataKind::Diet => &["meal_type", "food_name", "calories", "date"],
        DataKind::Sleep => &["sleep_duration_hours", "sleep_quality", "date"],
    }
}

/// Decode a raw unified-create payload. Rejects unknown discriminants
/// and enumerates every missing required field, before any store call.
pub fn decode_unified_create(payload: Value) -> AppResult<UnifiedCreate> {
    let Value::Object(mut fields) = payload else {
        return Err(AppError::validation("Request body must be a JSON object"));
    };

    let data_type = match fields.remove("data_type") {
        Some(Value::String(s)) => s,
        Some(other) => return Err(AppError::UnknownDataType(other.to_string())),
        None => return Err(AppError::missing_fields(vec!["data_type".into()])),
    };

    let kind = match data_type.as_str() {
        "exercise" => DataKind::Exercise,
        "diet" => DataKind::Diet,
        "sleep" => DataKind::Sleep,
        other => return Err(AppError::UnknownDataType(other.into())),
    };

    let missing: Vec<String> = required_fields(kind)
        .iter()
        .filter(|f| fields.get(**f).map_or(true, Value::is_null))
        .map(|f| f.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::missing_fields(missing));
    }

    let body = Value::Object(fields);
    let request = match kind {
        DataKind::Exercise => UnifiedCreate::Exercise(decode_typed(kind, body)?),
        DataKind::Diet => UnifiedCreate::Diet(decode_typed(kind, body)?),
        DataKind::Sleep => UnifiedCreate::Sleep(decode_typed(kind, body)?),
    };
    Ok(request)
}

fn decode_typed<T: serde::de::DeserializeOwned + Validate>(
    kind: DataKind,
    body: Value,
) -> AppResult<T> {
    let request: T = serde_json::from_value(body).map_err(|e| {
        AppError::validation(format!("Invalid {} payload: {e}", kind.as_str()))
    })?;
    request.validate()?;
    Ok(request)
}

/// Unified create: dispatch the decoded payload to the matching store
/// and return the projection of the new row.
pub async fn create_unified(
    db: &PgPool,
    user_id: Uuid,
    payload: Value,
) -> AppResult<UnifiedRecord> {
    match decode_unified_create(payload)? {
        UnifiedCreate::Exercise(body) => {
            Ok(store::exercise::create(db, user_id, &body).await?.into())
        }
        UnifiedCreate::Diet(body) => Ok(store::diet::create(db, user_id, &body).await?.into()),
        UnifiedCreate::Sleep(body) => Ok(store::sleep::create(db, user_id, &body).await?.into()),
    }
}

/// Unified read: fan out across the selected stores (all three when no
/// filter is given) and merge into one ordered sequence.
pub async fn list_unified(
    db: &PgPool,
    user_id: Uuid,
    data_type: Option<DataKind>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> AppResult<Vec<UnifiedRecord>> {
    let mut records = Vec::new();

    if data_type.is_none() || data_type == Some(DataKind::Exercise) {
        records.extend(
            store::exercise::list_range(db, user_id, start_date, end_date)
                .await?
                .into_iter()
                .map(UnifiedRecord::from),
        );
    }
    if data_type.is_none() || data_type == Some(DataKind::Diet) {
        records.extend(
            store::diet::list_range(db, user_id, start_date, end_date)
                .await?
                .into_iter()
                .map(UnifiedRecord::from),
        );
    }
    if data_type.is_none() || data_type == Some(DataKind::Sleep) {
        records.extend(
            store::sleep::list_range(db, user_id, start_date, end_date)
                .await?
                .into_iter()
                .map(UnifiedRecord::from),
        );
    }

    Ok(merge_unified(records))
}

/// Sort by date descending; same-date records of different kinds use
/// the kind ordering as a deterministic tiebreak.
pub fn merge_unified(mut records: Vec<UnifiedRecord>) -> Vec<UnifiedRecord> {
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.data_type.cmp(&b.data_type))
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::diet::DietEntry;
    use crate::models::exercise::ExerciseEntry;
    use crate::models::sleep::SleepEntry;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_decode_exercise_payload() {
        let payload = json!({
            "data_type": "exercise",
            "exercise_type": "Running",
            "duration_minutes": 30.0,
            "date": "2024-01-01"
        });

        match decode_unified_create(payload).unwrap() {
            UnifiedCreate::Exercise(body) => {
                assert_eq!(body.exercise_type, "Running");
                assert_eq!(body.duration_minutes, 30.0);
            }
            other => panic!("Expected exercise variant, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_unknown_discriminant() {
        let payload = json!({ "data_type": "flying" });
        let err = decode_unified_create(payload).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("flying"));
        assert!(msg.contains("exercise"));
    }

    #[test]
    fn test_decode_rejects_missing_discriminant() {
        let payload = json!({ "exercise_type": "Running" });
        let err = decode_unified_create(payload).unwrap_err();
        assert!(err.to_string().contains("data_type"));
    }

    #[test]
    fn test_decode_enumerates_missing_fields() {
        let payload = json!({ "data_type": "diet", "date": "2024-01-01" });
        match decode_unified_create(payload).unwrap_err() {
            AppError::Validation { fields, message } => {
                assert_eq!(fields, vec!["meal_type", "food_name", "calories"]);
                assert!(message.contains("meal_type"));
                assert!(message.contains("calories"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_treats_null_as_missing() {
        let payload = json!({
            "data_type": "sleep",
            "sleep_duration_hours": null,
            "sleep_quality": "good",
            "date": "2024-01-01"
        });
        match decode_unified_create(payload).unwrap_err() {
            AppError::Validation { fields, .. } => {
                assert_eq!(fields, vec!["sleep_duration_hours"]);
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_out_of_range_values() {
        let payload = json!({
            "data_type": "exercise",
            "exercise_type": "Running",
            "duration_minutes": -5.0,
            "date": "2024-01-01"
        });
        match decode_unified_create(payload).unwrap_err() {
            AppError::Validation { fields, .. } => {
                assert_eq!(fields, vec!["duration_minutes"]);
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn exercise_on(date: NaiveDate) -> UnifiedRecord {
        ExerciseEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            exercise_type: "Running".into(),
            duration_minutes: 30.0,
            calories_burned: None,
            distance_km: None,
            intensity: None,
            date,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
        .into()
    }

    fn diet_on(date: NaiveDate) -> UnifiedRecord {
        DietEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            meal_type: "lunch".into(),
            food_name: "salad".into(),
            calories: 350.0,
            protein_g: None,
            carbs_g: None,
            fats_g: None,
            fiber_g: None,
            date,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
        .into()
    }

    fn sleep_on(date: NaiveDate) -> UnifiedRecord {
        SleepEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            sleep_duration_hours: 8.0,
            sleep_quality: "good".into(),
            bed_time: None,
            wake_time: None,
            date,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
        .into()
    }

    #[test]
    fn test_merge_orders_by_date_descending() {
        let records = vec![
            sleep_on(date(2024, 1, 3)),
            exercise_on(date(2024, 1, 5)),
            diet_on(date(2024, 1, 1)),
        ];

        let merged = merge_unified(records);
        let dates: Vec<NaiveDate> = merged.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 5), date(2024, 1, 3), date(2024, 1, 1)]
        );
    }

    #[test]
    fn test_merge_tiebreak_is_deterministic() {
        let d = date(2024, 1, 2);
        let a = merge_unified(vec![sleep_on(d), diet_on(d), exercise_on(d)]);
        let b = merge_unified(vec![diet_on(d), exercise_on(d), sleep_on(d)]);

        let kinds_a: Vec<DataKind> = a.iter().map(|r| r.data_type).collect();
        let kinds_b: Vec<DataKind> = b.iter().map(|r| r.data_type).collect();
        assert_eq!(kinds_a, kinds_b);
        assert_eq!(
            kinds_a,
            vec![DataKind::Exercise, DataKind::Diet, DataKind::Sleep]
        );
    }

    #[test]
    fn test_merge_empty_is_empty() {
        assert!(merge_unified(Vec::new()).is_empty());
    }
}
