use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::diet::DietEntry;
use crate::models::exercise::ExerciseEntry;
use crate::models::sleep::SleepEntry;

/// Discriminant naming which entry type a record or payload represents.
/// The derived ordering is the deterministic tiebreak for same-date
/// records in unified reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Exercise,
    Diet,
    Sleep,
}

impl DataKind {
    pub const ALLOWED: [&'static str; 3] = ["exercise", "diet", "sleep"];

    pub fn as_str(self) -> &'static str {
        match self {
            DataKind::Exercise => "exercise",
            DataKind::Diet => "diet",
            DataKind::Sleep => "sleep",
        }
    }
}

/// Read-side projection over the three entry types. Only the field
/// subset belonging to `data_type` is populated; everything else is
/// omitted from the JSON output, never serialized as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedRecord {
    pub data_type: DataKind,
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Exercise fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,

    // Diet fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,

    // Sleep fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_duration_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UnifiedRecord {
    fn base(
        data_type: DataKind,
        id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            data_type,
            id,
            user_id,
            date,
            created_at,
            updated_at,
            exercise_type: None,
            duration_minutes: None,
            calories_burned: None,
            distance_km: None,
            intensity: None,
            meal_type: None,
            food_name: None,
            calories: None,
            protein_g: None,
            carbs_g: None,
            fats_g: None,
            fiber_g: None,
            sleep_duration_hours: None,
            sleep_quality: None,
            bed_time: None,
            wake_time: None,
            notes: None,
        }
    }
}

impl From<ExerciseEntry> for UnifiedRecord {
    fn from(e: ExerciseEntry) -> Self {
        let mut r = Self::base(
            DataKind::Exercise,
            e.id,
            e.user_id,
            e.date,
            e.created_at,
            e.updated_at,
        );
        r.exercise_type = Some(e.exercise_type);
        r.duration_minutes = Some(e.duration_minutes);
        r.calories_burned = e.calories_burned;
        r.distance_km = e.distance_km;
        r.intensity = e.intensity;
        r.notes = e.notes;
        r
    }
}

impl From<DietEntry> for UnifiedRecord {
    fn from(d: DietEntry) -> Self {
        let mut r = Self::base(
            DataKind::Diet,
            d.id,
            d.user_id,
            d.date,
            d.created_at,
            d.updated_at,
        );
        r.meal_type = Some(d.meal_type);
        r.food_name = Some(d.food_name);
        r.calories = Some(d.calories);
        r.protein_g = d.protein_g;
        r.carbs_g = d.carbs_g;
        r.fats_g = d.fats_g;
        r.fiber_g = d.fiber_g;
        r.notes = d.notes;
        r
    }
}

impl From<SleepEntry> for UnifiedRecord {
    fn from(s: SleepEntry) -> Self {
        let mut r = Self::base(
            DataKind::Sleep,
            s.id,
            s.user_id,
            s.date,
            s.created_at,
            s.updated_at,
        );
        r.sleep_duration_hours = Some(s.sleep_duration_hours);
        r.sleep_quality = Some(s.sleep_quality);
        r.bed_time = s.bed_time;
        r.wake_time = s.wake_time;
        r.notes = s.notes;
        r
    }
}

#[derive(Debug, Deserialize)]
pub struct UnifiedQuery {
    pub data_type: Option<DataKind>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_entry() -> ExerciseEntry {
        ExerciseEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            exercise_type: "Running".into(),
            duration_minutes: 30.0,
            calories_burned: None,
            distance_km: Some(5.0),
            intensity: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_exercise_projection_omits_other_kinds() {
        let record = UnifiedRecord::from(exercise_entry());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["data_type"], "exercise");
        assert_eq!(json["exercise_type"], "Running");
        assert_eq!(json["duration_minutes"], 30.0);
        // Fields outside the exercise subset must be absent, not null
        assert!(json.get("meal_type").is_none());
        assert!(json.get("calories").is_none());
        assert!(json.get("sleep_duration_hours").is_none());
        // Optional exercise fields left unset are absent too
        assert!(json.get("calories_burned").is_none());
    }

    #[test]
    fn test_data_kind_wire_names() {
        assert_eq!(
            serde_json::to_value(DataKind::Exercise).unwrap(),
            serde_json::json!("exercise")
        );
        assert_eq!(
            serde_json::from_value::<DataKind>(serde_json::json!("sleep")).unwrap(),
            DataKind::Sleep
        );
    }
}
