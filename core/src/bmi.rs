use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Lower bounds are inclusive: 18.5 is Healthy, 24.9 Overweight, 29.9 Obese.
    #[must_use]
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 24.9 {
            Self::Healthy
        } else if bmi < 29.9 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Healthy => "Healthy weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Underweight => {
                "Your weight is less than what is considered healthy for your height."
            }
            Self::Healthy => "Great! Your weight is within the healthy range.",
            Self::Overweight => {
                "Your weight is more than what is considered healthy. Consider a healthy diet and exercise."
            }
            Self::Obese => {
                "Your weight is much higher than normal. Please consult a doctor or nutritionist."
            }
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiReading {
    pub value: f64,
    pub category: BmiCategory,
    pub message: &'static str,
}

impl BmiReading {
    /// The value as displayed, one decimal place.
    #[must_use]
    pub fn rounded(&self) -> f64 {
        (self.value * 10.0).round() / 10.0
    }
}

/// `weight / (height_m)^2`. Missing (NaN), zero or negative inputs are rejected.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Result<BmiReading, ValidationError> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(weight_kg) || !usable(height_cm) {
        return Err(ValidationError::new(
            "Please enter both weight and height correctly.",
        ));
    }

    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);
    let category = BmiCategory::classify(value);
    Ok(BmiReading {
        value,
        category,
        message: category.message(),
    })
}
