use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;

/// Static reference text: a heading and its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanSheet {
    pub title: &'static str,
    pub lines: [&'static str; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietPlan {
    Vegan,
    Keto,
    GlutenFree,
}

impl DietPlan {
    pub const ALL: [DietPlan; 3] = [DietPlan::Vegan, DietPlan::Keto, DietPlan::GlutenFree];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Vegan => "vegan",
            Self::Keto => "keto",
            Self::GlutenFree => "gluten-free",
        }
    }

    #[must_use]
    pub fn sheet(self) -> PlanSheet {
        match self {
            Self::Vegan => PlanSheet {
                title: "Vegan Diet Plan",
                lines: [
                    "Breakfast: Oatmeal with almond milk & berries",
                    "Lunch: Quinoa salad with chickpeas",
                    "Dinner: Stir-fried tofu with vegetables",
                ],
            },
            Self::Keto => PlanSheet {
                title: "Keto Diet Plan",
                lines: [
                    "Breakfast: Scrambled eggs with avocado",
                    "Lunch: Grilled chicken with spinach salad",
                    "Dinner: Salmon with steamed broccoli",
                ],
            },
            Self::GlutenFree => PlanSheet {
                title: "Gluten-Free Diet Plan",
                lines: [
                    "Breakfast: Greek yogurt with honey & nuts",
                    "Lunch: Grilled salmon with quinoa",
                    "Dinner: Brown rice with lentils and veggies",
                ],
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkoutPlan {
    Cardio,
    Strength,
    Yoga,
}

impl WorkoutPlan {
    pub const ALL: [WorkoutPlan; 3] = [WorkoutPlan::Cardio, WorkoutPlan::Strength, WorkoutPlan::Yoga];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Cardio => "cardio",
            Self::Strength => "strength",
            Self::Yoga => "yoga",
        }
    }

    #[must_use]
    pub fn sheet(self) -> PlanSheet {
        match self {
            Self::Cardio => PlanSheet {
                title: "Cardio Workout Plan",
                lines: [
                    "Warm-up: 5 min jump rope",
                    "Main: 20 min cycling or running",
                    "Cool-down: 5 min stretching",
                ],
            },
            Self::Strength => PlanSheet {
                title: "Strength Training Plan",
                lines: [
                    "Warm-up: 5 min dynamic stretching",
                    "Main: Squats, Deadlifts, Bench Press (3 sets)",
                    "Cool-down: Foam rolling & stretching",
                ],
            },
            Self::Yoga => PlanSheet {
                title: "Yoga Routine",
                lines: [
                    "Morning: Sun Salutations (5 rounds)",
                    "Mid-day: Warrior Pose & Tree Pose (2 min each)",
                    "Evening: Relaxing meditation & deep breathing",
                ],
            },
        }
    }
}

fn parse_id<T: Copy>(
    raw: &str,
    all: &[T],
    id: impl Fn(T) -> &'static str,
    kind: &str,
) -> Result<T, ValidationError> {
    let wanted = raw.trim().to_lowercase();
    all.iter().copied().find(|p| id(*p) == wanted).ok_or_else(|| {
        let valid: Vec<&str> = all.iter().map(|p| id(*p)).collect();
        ValidationError::new(format!(
            "Invalid {kind} '{raw}'. Must be one of: {}",
            valid.join(", ")
        ))
    })
}

impl FromStr for DietPlan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id(s, &Self::ALL, Self::id, "diet")
    }
}

impl FromStr for WorkoutPlan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id(s, &Self::ALL, Self::id, "workout")
    }
}

impl fmt::Display for DietPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for WorkoutPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_diet_ids() {
        assert_eq!("vegan".parse::<DietPlan>().unwrap(), DietPlan::Vegan);
        assert_eq!("KETO".parse::<DietPlan>().unwrap(), DietPlan::Keto);
        assert_eq!(
            " gluten-free ".parse::<DietPlan>().unwrap(),
            DietPlan::GlutenFree
        );
    }

    #[test]
    fn test_parse_workout_ids() {
        for plan in WorkoutPlan::ALL {
            assert_eq!(plan.id().parse::<WorkoutPlan>().unwrap(), plan);
        }
    }

    #[test]
    fn test_unknown_plan() {
        let err = "paleo".parse::<DietPlan>().unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid diet 'paleo'. Must be one of: vegan, keto, gluten-free"
        );
        assert!("pilates".parse::<WorkoutPlan>().is_err());
    }

    #[test]
    fn test_sheets() {
        assert_eq!(DietPlan::Keto.sheet().title, "Keto Diet Plan");
        assert!(WorkoutPlan::Yoga.sheet().lines[0].starts_with("Morning"));
    }
}
