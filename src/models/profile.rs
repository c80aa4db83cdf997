use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex as encoded in the profile table (0 = female, 1 = male)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Gender {
    Female = 0,
    Male = 1,
}

/// Fitness goal shared by the profile and workout tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Goal {
    FatLoss = 0,
    MuscleGain = 1,
    Maintain = 2,
}

/// Diet strictness. Declaration order is the strictness ordering:
/// a ceiling of `Eggitarian` admits vegetarian and egg foods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum DietType {
    Vegetarian = 0,
    Eggitarian = 1,
    NonVegetarian = 2,
}

macro_rules! integer_code {
    ($ty:ident, $name:literal, { $($code:literal => $variant:ident),+ $(,)? }) => {
        impl $ty {
            pub fn code(self) -> i64 {
                self as i64
            }
        }

        impl From<$ty> for i64 {
            fn from(value: $ty) -> i64 {
                value as i64
            }
        }

        impl TryFrom<i64> for $ty {
            type Error = String;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                match value {
                    $($code => Ok($ty::$variant),)+
                    other => Err(format!("invalid {} code {}", $name, other)),
                }
            }
        }
    };
}

integer_code!(Gender, "gender", { 0 => Female, 1 => Male });
integer_code!(Goal, "goal", { 0 => FatLoss, 1 => MuscleGain, 2 => Maintain });
integer_code!(DietType, "diet type", { 0 => Vegetarian, 1 => Eggitarian, 2 => NonVegetarian });

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "female" | "f" | "0" => Ok(Gender::Female),
            "male" | "m" | "1" => Ok(Gender::Male),
            other => Err(format!("unknown gender '{}' (expected female or male)", other)),
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "fat-loss" | "0" => Ok(Goal::FatLoss),
            "muscle-gain" | "1" => Ok(Goal::MuscleGain),
            "maintain" | "2" => Ok(Goal::Maintain),
            other => Err(format!(
                "unknown goal '{}' (expected fat-loss, muscle-gain or maintain)",
                other
            )),
        }
    }
}

impl FromStr for DietType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "vegetarian" | "veg" | "0" => Ok(DietType::Vegetarian),
            "eggitarian" | "egg" | "1" => Ok(DietType::Eggitarian),
            "non-vegetarian" | "nonveg" | "non-veg" | "2" => Ok(DietType::NonVegetarian),
            other => Err(format!(
                "unknown diet type '{}' (expected vegetarian, eggitarian or non-vegetarian)",
                other
            )),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Goal::FatLoss => "Fat Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Maintain => "Maintain",
        };
        f.write_str(label)
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DietType::Vegetarian => "Vegetarian",
            DietType::Eggitarian => "Eggitarian",
            DietType::NonVegetarian => "Non-Vegetarian",
        };
        f.write_str(label)
    }
}

/// A user's physical profile and preferences.
///
/// Values outside the documented ranges are carried as-is; nothing here clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years (18-30 in the reference data)
    pub age: i32,
    pub gender: Gender,
    /// Height in centimetres (150-190)
    pub height_cm: i32,
    /// Weight in kilograms (45-95)
    pub weight_kg: i32,
    /// Self-reported activity level (1-5)
    pub activity_level: i32,
    pub goal: Goal,
    pub diet_type: DietType,
    /// Daily food budget in rupees (100-400)
    pub budget_rs: i32,
    /// Available workout time in minutes (15-90)
    pub workout_time_min: i32,
}

/// A plan request carries exactly the profile fields.
pub type PlanRequest = UserProfile;

impl UserProfile {
    /// Goal-adjusted Mifflin-St Jeor style requirement used to label the
    /// profile table.
    pub fn reference_daily_calories(&self) -> f64 {
        10.0 * self.weight_kg as f64 + 6.25 * self.height_cm as f64 - 5.0 * self.age as f64
            + 5.0 * self.gender.code() as f64
            - 200.0 * self.goal.code() as f64
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 22,
            gender: Gender::Female,
            height_cm: 170,
            weight_kg: 65,
            activity_level: 3,
            goal: Goal::FatLoss,
            diet_type: DietType::Vegetarian,
            budget_rs: 200,
            workout_time_min: 60,
        }
    }
}

/// Labelled profile used to train the calorie estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub profile: UserProfile,
    pub daily_calories: f64,
}

impl TrainingSample {
    /// Build a sample labelled with the reference formula
    pub fn labelled(profile: UserProfile) -> Self {
        Self {
            profile,
            daily_calories: profile.reference_daily_calories(),
        }
    }
}

/// Flat row layout of `user_profiles.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileRecord {
    pub age: i32,
    pub gender: Gender,
    pub height_cm: i32,
    pub weight_kg: i32,
    pub activity_level: i32,
    pub goal: Goal,
    pub diet_type: DietType,
    pub budget_rs: i32,
    pub workout_time_min: i32,
    pub daily_calories: f64,
}

impl UserProfileRecord {
    pub const COLUMNS: [&'static str; 10] = [
        "age",
        "gender",
        "height_cm",
        "weight_kg",
        "activity_level",
        "goal",
        "diet_type",
        "budget_rs",
        "workout_time_min",
        "daily_calories",
    ];
}

impl From<UserProfileRecord> for TrainingSample {
    fn from(record: UserProfileRecord) -> Self {
        Self {
            profile: UserProfile {
                age: record.age,
                gender: record.gender,
                height_cm: record.height_cm,
                weight_kg: record.weight_kg,
                activity_level: record.activity_level,
                goal: record.goal,
                diet_type: record.diet_type,
                budget_rs: record.budget_rs,
                workout_time_min: record.workout_time_min,
            },
            daily_calories: record.daily_calories,
        }
    }
}

impl From<TrainingSample> for UserProfileRecord {
    fn from(sample: TrainingSample) -> Self {
        let p = sample.profile;
        Self {
            age: p.age,
            gender: p.gender,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            activity_level: p.activity_level,
            goal: p.goal,
            diet_type: p.diet_type,
            budget_rs: p.budget_rs,
            workout_time_min: p.workout_time_min,
            daily_calories: sample.daily_calories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_daily_calories() {
        let profile = UserProfile {
            age: 25,
            gender: Gender::Male,
            height_cm: 180,
            weight_kg: 80,
            goal: Goal::MuscleGain,
            ..UserProfile::default()
        };

        // 800 + 1125 - 125 + 5 - 200
        assert_eq!(profile.reference_daily_calories(), 1605.0);
    }

    #[test]
    fn test_diet_strictness_ordering() {
        assert!(DietType::Vegetarian < DietType::Eggitarian);
        assert!(DietType::Eggitarian < DietType::NonVegetarian);
    }

    #[test]
    fn test_integer_codes() {
        assert_eq!(Goal::try_from(2i64), Ok(Goal::Maintain));
        assert!(Goal::try_from(3i64).is_err());
        assert!(DietType::try_from(-1i64).is_err());
        assert_eq!(i64::from(Gender::Male), 1);

        let json = serde_json::to_string(&DietType::Eggitarian).unwrap();
        assert_eq!(json, "1");
        let parsed: Goal = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Goal::MuscleGain);
    }

    #[test]
    fn test_parse_from_cli_strings() {
        assert_eq!("Fat Loss".parse::<Goal>(), Ok(Goal::FatLoss));
        assert_eq!("muscle_gain".parse::<Goal>(), Ok(Goal::MuscleGain));
        assert_eq!("non-vegetarian".parse::<DietType>(), Ok(DietType::NonVegetarian));
        assert_eq!("M".parse::<Gender>(), Ok(Gender::Male));
        assert!("keto".parse::<DietType>().is_err());
    }
}
