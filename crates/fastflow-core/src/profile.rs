//! User profile and onboarding input.
//!
//! A profile is created once, when onboarding completes; its identity fields
//! never change afterwards, only the fasting plan may be replaced. Invalid
//! input is rejected here, before it reaches the state machine or the store.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::plan::{is_hhmm, FastingPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        };
        f.write_str(name)
    }
}

/// What the user wants out of fasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Energy Boost")]
    EnergyBoost,
    #[serde(rename = "Gut Health")]
    GutHealth,
    #[serde(rename = "General Health")]
    GeneralHealth,
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::EnergyBoost => "Energy Boost",
            Goal::GutHealth => "Gut Health",
            Goal::GeneralHealth => "General Health",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Pro,
}

/// Answers collected by the onboarding flow, validated before profile
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingData {
    pub age: u32,
    pub gender: Gender,
    /// Pounds.
    pub weight: f64,
    pub goal: Goal,
    /// HH:MM.
    pub wake_time: String,
    /// HH:MM.
    pub sleep_time: String,
}

impl OnboardingData {
    /// Caller-side validation: core operations assume this has passed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.age == 0 {
            return Err(ValidationError::InvalidValue {
                field: "age".into(),
                message: "must be a positive integer".into(),
            });
        }
        if !(self.weight > 0.0) {
            return Err(ValidationError::InvalidValue {
                field: "weight".into(),
                message: "must be a positive number".into(),
            });
        }
        if !is_hhmm(&self.wake_time) {
            return Err(ValidationError::InvalidValue {
                field: "wakeTime".into(),
                message: format!("'{}' is not HH:MM", self.wake_time),
            });
        }
        if !is_hhmm(&self.sleep_time) {
            return Err(ValidationError::InvalidValue {
                field: "sleepTime".into(),
                message: format!("'{}' is not HH:MM", self.sleep_time),
            });
        }
        Ok(())
    }
}

/// The onboarded user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Epoch milliseconds.
    pub created_at: u64,
    pub gender: Gender,
    pub age: u32,
    pub weight: f64,
    pub goal: Goal,
    pub preferred_wake_time: String,
    pub preferred_sleep_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_fasting_plan: Option<FastingPlan>,
    pub subscription_tier: SubscriptionTier,
}

impl UserProfile {
    /// Build a fresh profile from validated onboarding answers.
    ///
    /// # Errors
    /// Returns the first validation failure in `data`.
    pub fn from_onboarding(
        data: OnboardingData,
        plan: Option<FastingPlan>,
    ) -> Result<Self, ValidationError> {
        data.validate()?;
        Ok(Self {
            user_id: format!("user_{}", Uuid::new_v4()),
            email: None,
            created_at: Utc::now().timestamp_millis() as u64,
            gender: data.gender,
            age: data.age,
            weight: data.weight,
            goal: data.goal,
            preferred_wake_time: data.wake_time,
            preferred_sleep_time: data.sleep_time,
            current_fasting_plan: plan,
            subscription_tier: SubscriptionTier::Free,
        })
    }

    /// Hours per fasting window: the plan's, or 16 without a plan.
    pub fn fasting_hours(&self) -> u8 {
        self.current_fasting_plan
            .as_ref()
            .map(|p| p.fasting_hours)
            .unwrap_or(16)
    }

    /// Replace the current plan. The only mutation a profile admits.
    pub fn set_plan(&mut self, plan: FastingPlan) {
        self.current_fasting_plan = Some(plan);
    }
}
