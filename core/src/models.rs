use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

/// Store key of the meal log.
pub const MEALS_KEY: &str = "meals";
/// Store key of the weight log.
pub const WEIGHTS_KEY: &str = "weights";
/// Store key of the registered accounts.
pub const USERS_KEY: &str = "users";

/// One logged meal, stored as `{foodItem, calories, date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecord {
    pub food_item: String,
    /// Kept as the stored JSON number so legacy values outside `i64` (such
    /// as `1e20`) decode and are written back. `None` for legacy `null`.
    pub calories: Option<Number>,
    /// Creation stamp, e.g. `10/19/2026 3:04:05 PM (Monday)`.
    pub date: String,
}

impl MealRecord {
    /// Calories as a whole number, truncated and saturated to `i64`.
    #[must_use]
    pub fn calorie_value(&self) -> Option<i64> {
        self.calories
            .as_ref()
            .map(|n| n.as_i64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0) as i64))
    }

    /// Calories as they count towards totals; legacy `null` counts as 0.
    #[must_use]
    pub fn counted_calories(&self) -> i64 {
        self.calorie_value().unwrap_or(0)
    }
}

/// A body weight in kilograms.
///
/// Serialized as a bare JSON number; whole values are written without a
/// fractional part (`72`, not `72.0`) to keep stored text stable. A legacy
/// `null` (an overflowed entry) reads as NaN and is written back as `null`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Kilograms(pub f64);

impl Kilograms {
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

// Largest magnitude at which every integer is exactly representable in f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for Kilograms {
    #[allow(clippy::float_cmp)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

impl<'de> Deserialize<'de> for Kilograms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<f64>::deserialize(deserializer).map(|v| Kilograms(v.unwrap_or(f64::NAN)))
    }
}

/// A registered account. Stored in plain text; not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_record_wire_shape() {
        let meal = MealRecord {
            food_item: "Toast".to_string(),
            calories: Some(300.into()),
            date: "10/19/2026 8:15:00 AM (Monday)".to_string(),
        };
        let json = serde_json::to_string(&meal).unwrap();
        assert_eq!(
            json,
            r#"{"foodItem":"Toast","calories":300,"date":"10/19/2026 8:15:00 AM (Monday)"}"#
        );
    }

    #[test]
    fn test_meal_record_legacy_null_calories() {
        let raw = r#"{"foodItem":"Soup","calories":null,"date":"x"}"#;
        let meal: MealRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(meal.calories, None);
        assert_eq!(meal.counted_calories(), 0);
        // Rewritten unchanged
        assert_eq!(serde_json::to_string(&meal).unwrap(), raw);
    }

    #[test]
    fn test_meal_record_out_of_range_calories() {
        let raw = r#"{"foodItem":"Feast","calories":100000000000000000000,"date":"x"}"#;
        let meal: MealRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(meal.counted_calories(), i64::MAX);

        let again: MealRecord =
            serde_json::from_str(&serde_json::to_string(&meal).unwrap()).unwrap();
        assert_eq!(again.calories, meal.calories);
    }

    #[test]
    fn test_kilograms_legacy_null() {
        let weights: Vec<Kilograms> = serde_json::from_str("[70,null,71]").unwrap();
        assert!(weights[1].value().is_nan());
        assert_eq!(serde_json::to_string(&weights).unwrap(), "[70,null,71]");
    }

    #[test]
    fn test_kilograms_whole_values_written_as_integers() {
        let weights = vec![Kilograms(72.0), Kilograms(72.5), Kilograms(60.25)];
        let json = serde_json::to_string(&weights).unwrap();
        assert_eq!(json, "[72,72.5,60.25]");
    }

    #[test]
    fn test_kilograms_reads_integers_and_decimals() {
        let weights: Vec<Kilograms> = serde_json::from_str("[60,61,60.5]").unwrap();
        assert_eq!(weights, vec![Kilograms(60.0), Kilograms(61.0), Kilograms(60.5)]);
    }

    #[test]
    fn test_user_account_wire_shape() {
        let user = UserAccount {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"name":"Ada","email":"ada@example.com","password":"pw"}"#
        );
    }
}
