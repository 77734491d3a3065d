//! Typed request wrappers.
//!
//! One function per user-facing operation: a fixed instruction template
//! interpolating its arguments, an expected output shape, and a decode step
//! into the matching model type. Failures are explicit `AiError`s; nothing
//! here retries.

use serde_json::{json, Value};
use tracing::warn;

use crate::ai::client::{AssistantClient, MODEL_FLASH, MODEL_MAPS, MODEL_PRO};
use crate::error::AiError;
use crate::models::{
    AppLanguage, AppTheme, GroundingTool, HadithResult, Mcq, ScheduleItem, UserProfile,
};

fn schedule_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "INTEGER" },
                "title": { "type": "STRING" },
                "time": { "type": "STRING" },
                "icon": { "type": "STRING" },
                "color": { "type": "STRING" },
                "bg": { "type": "STRING" },
                "subtasks": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "text": { "type": "STRING" },
                            "completed": { "type": "BOOLEAN" },
                        },
                        "required": ["text", "completed"],
                    },
                },
            },
            "required": ["id", "title", "time", "icon", "color", "bg", "subtasks"],
        },
    })
}

fn string_list_schema() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

impl AssistantClient {
    /// Check that a location string names a real, recognizable place.
    ///
    /// Fail-open: offline or any endpoint failure passes validation, so a
    /// network hiccup never locks a user out of onboarding.
    pub async fn validate_location(&self, location: &str) -> bool {
        if self.is_offline() {
            return true;
        }
        let prompt = format!(
            "Is \"{location}\" a real and recognizable city and country? \
             Answer ONLY with 'true' or 'false'."
        );
        match self.generate_text(MODEL_FLASH, &prompt).await {
            Ok(answer) => answer.to_lowercase().contains("true"),
            Err(e) => {
                warn!("location validation failed open: {e}");
                true
            }
        }
    }

    /// Generate a full daily plan, replacing the current schedule.
    pub async fn generate_daily_schedule(
        &self,
        user_prompt: &str,
        language: AppLanguage,
    ) -> Result<Vec<ScheduleItem>, AiError> {
        let prompt = format!(
            "Create a comprehensive daily schedule for a user based on this request: \
             \"{user_prompt}\". Requirements: 1. Return exactly 5-8 major categories. \
             2. Use varied icons. 3. Language: {language}."
        );
        let value = self
            .generate_json(MODEL_FLASH, &prompt, schedule_schema())
            .await?;
        serde_json::from_value(value).map_err(|e| AiError::Decode(e.to_string()))
    }

    /// Three short suggestions tailored to the profile and current plan.
    pub async fn generate_daily_suggestions(
        &self,
        profile: &UserProfile,
        schedule: &[ScheduleItem],
        language: AppLanguage,
    ) -> Result<Vec<String>, AiError> {
        let titles: Vec<&str> = schedule.iter().map(|s| s.title.as_str()).collect();
        let prompt = format!(
            "Based on user {} from {} and schedule: {}, provide 3 unique suggestions in {language}.",
            profile.name,
            profile.location,
            titles.join(", ")
        );
        let value = self
            .generate_json(MODEL_FLASH, &prompt, string_list_schema())
            .await?;
        serde_json::from_value(value).map_err(|e| AiError::Decode(e.to_string()))
    }

    /// Five suggested subtasks for one category.
    pub async fn generate_category_subtasks(
        &self,
        category_title: &str,
        language: AppLanguage,
    ) -> Result<Vec<String>, AiError> {
        let prompt =
            format!("Suggest 5 subtasks for category: \"{category_title}\" in {language}.");
        let value = self
            .generate_json(MODEL_FLASH, &prompt, string_list_schema())
            .await?;
        serde_json::from_value(value).map_err(|e| AiError::Decode(e.to_string()))
    }

    /// One educational multiple-choice question.
    pub async fn generate_mcq(
        &self,
        topic: &str,
        language: AppLanguage,
    ) -> Result<Mcq, AiError> {
        let prompt = format!("Generate 1 educational MCQ about \"{topic}\" in {language}.");
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "q": { "type": "STRING" },
                "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                "ans": { "type": "INTEGER" },
            },
            "required": ["q", "options", "ans"],
        });
        let value = self.generate_json(MODEL_FLASH, &prompt, schema).await?;
        let mcq: Mcq =
            serde_json::from_value(value).map_err(|e| AiError::Decode(e.to_string()))?;
        if mcq.options.is_empty() || mcq.ans >= mcq.options.len() {
            return Err(AiError::Decode("answer index out of range".into()));
        }
        Ok(mcq)
    }

    /// Search for an authentic Hadith on a topic.
    pub async fn search_hadith(
        &self,
        query: &str,
        language: AppLanguage,
    ) -> Result<HadithResult, AiError> {
        let prompt = format!(
            "Search for authentic Hadith regarding: \"{query}\" in {language}. \
             Provide Arabic and translation."
        );
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "arabic": { "type": "STRING" },
                "translation": { "type": "STRING" },
                "reference": { "type": "STRING" },
                "explanation": { "type": "STRING" },
            },
            "required": ["arabic", "translation", "reference", "explanation"],
        });
        let value = self.generate_json(MODEL_FLASH, &prompt, schema).await?;
        serde_json::from_value(value).map_err(|e| AiError::Decode(e.to_string()))
    }

    /// Free-text summary of a historical era.
    pub async fn explore_history(
        &self,
        era: &str,
        language: AppLanguage,
    ) -> Result<String, AiError> {
        let prompt = format!("Provide summary of history: \"{era}\" in {language}.");
        self.generate_text(MODEL_FLASH, &prompt).await
    }

    /// Five study-strategy steps for a backlog topic.
    pub async fn generate_strategy(
        &self,
        topic: &str,
        language: AppLanguage,
    ) -> Result<Vec<String>, AiError> {
        let prompt = format!("Provide 5 study strategy steps for: \"{topic}\" in {language}.");
        let value = self
            .generate_json(MODEL_FLASH, &prompt, string_list_schema())
            .await?;
        serde_json::from_value(value).map_err(|e| AiError::Decode(e.to_string()))
    }

    /// Two-sentence inspirational morning briefing.
    pub async fn daily_briefing(
        &self,
        profile: &UserProfile,
        category_count: usize,
        theme: AppTheme,
        language: AppLanguage,
    ) -> Result<String, AiError> {
        let prompt = format!(
            "Provide a 2-sentence inspirational morning briefing for a user named {}. \
             They have {category_count} categories planned for today. Theme is {:?}. \
             Language: {language}.",
            profile.name, theme
        );
        self.generate_text(MODEL_FLASH, &prompt).await
    }

    /// One chat turn. The grounding tool picks the model: search runs on the
    /// fast tier, maps on the tier that supports it, plain chat on the smart
    /// tier.
    pub async fn chat(
        &self,
        prompt: &str,
        tool: GroundingTool,
        language: AppLanguage,
    ) -> Result<String, AiError> {
        let contents = format!("Answer the following in {language}: {prompt}");
        let (model, tools) = match tool {
            GroundingTool::Search => (MODEL_FLASH, vec![json!({ "googleSearch": {} })]),
            GroundingTool::Maps => (MODEL_MAPS, vec![json!({ "googleMaps": {} })]),
            GroundingTool::None => (MODEL_PRO, Vec::new()),
        };
        self.generate_with_tools(model, &contents, tools).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_wrappers_fail_without_network() {
        let client = AssistantClient::new("unused".into());
        client.set_offline(true);

        assert!(matches!(
            client
                .generate_daily_schedule("a balanced day", AppLanguage::English)
                .await,
            Err(AiError::Offline)
        ));
        assert!(matches!(
            client.generate_mcq("zakat", AppLanguage::English).await,
            Err(AiError::Offline)
        ));
        assert!(matches!(
            client.search_hadith("kindness", AppLanguage::English).await,
            Err(AiError::Offline)
        ));
        assert!(matches!(
            client
                .chat("hello", GroundingTool::None, AppLanguage::English)
                .await,
            Err(AiError::Offline)
        ));
    }

    #[tokio::test]
    async fn offline_location_validation_fails_open() {
        let client = AssistantClient::new("unused".into());
        client.set_offline(true);
        assert!(client.validate_location("Atlantis, Nowhere").await);
    }

    #[test]
    fn schedule_payload_decodes_into_items() {
        let payload = json!([{
            "id": 1,
            "title": "Fajr & Morning Dhikr",
            "time": "05:00 – 06:00",
            "icon": "mosque",
            "color": "emerald",
            "bg": "emerald-soft",
            "subtasks": [
                { "text": "Pray Fajr", "completed": false },
                { "text": "Morning adhkar", "completed": false },
            ],
        }]);
        let items: Vec<ScheduleItem> = serde_json::from_value(payload).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subtasks.len(), 2);
        assert!(!items[0].alarm_enabled);
    }

    #[test]
    fn mcq_answer_checking() {
        let mcq = Mcq {
            q: "How many pillars of Islam are there?".into(),
            options: vec!["Three".into(), "Five".into(), "Seven".into()],
            ans: 1,
        };
        assert!(mcq.is_correct(1));
        assert!(!mcq.is_correct(0));
    }
}
