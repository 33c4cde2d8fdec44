use serde_json::Value;

use crate::ai::handler::GenerativeModel;
use crate::ai::prompt::get_schedule_prompt;
use crate::helpers::utils::strip_markdown_fences;
use crate::schedule::dto::ScheduleRequest;
use crate::schedule::error::GenerationError;

/// Parses raw model output into one JSON value after removing any markdown
/// fencing around it.
pub fn parse_generation(text: Option<&str>) -> Result<Value, GenerationError> {
    let raw = match text {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(GenerationError::EmptyGeneration),
    };

    let json_string = strip_markdown_fences(raw);

    serde_json::from_str(&json_string).map_err(|source| GenerationError::MalformedGeneration {
        raw: raw.to_string(),
        source,
    })
}

/// Runs one generation: prompt, a single model call, parse. The parsed value
/// is returned as the model produced it.
pub async fn generate_schedule<M>(
    model: &M,
    request: &ScheduleRequest,
) -> Result<Value, GenerationError>
where
    M: GenerativeModel + ?Sized,
{
    let tasks: Vec<String> = request
        .tasks
        .iter()
        .map(|task| task.trim())
        .filter(|task| !task.is_empty())
        .map(str::to_string)
        .collect();

    if tasks.is_empty() {
        return Err(GenerationError::EmptyTaskList);
    }

    let prompt = get_schedule_prompt(&request.sleep_time, &tasks);

    let text = model.generate_content(&prompt).await?;

    let schedule = parse_generation(text.as_deref())?;

    log::info!("Generated schedule for {} tasks", tasks.len());

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::handler::ModelError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct ScriptedModel {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn replying(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                prompts: Mutex::new(vec![]),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        async fn generate_content(&self, prompt: &str) -> Result<Option<String>, ModelError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl GenerativeModel for FailingModel {
        async fn generate_content(&self, _prompt: &str) -> Result<Option<String>, ModelError> {
            Err(ModelError::Api {
                status: 429,
                body: "quota".to_string(),
            })
        }
    }

    fn request(tasks: &[&str]) -> ScheduleRequest {
        ScheduleRequest {
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
            sleep_time: "02:00 AM".to_string(),
        }
    }

    #[test]
    fn test_parse_fenced_generation() {
        let value = parse_generation(Some("```json\n{\"schedule\":[]}\n```")).unwrap();
        assert_eq!(value, json!({ "schedule": [] }));
    }

    #[test]
    fn test_parse_empty_generation() {
        assert!(matches!(
            parse_generation(None),
            Err(GenerationError::EmptyGeneration)
        ));
        assert!(matches!(
            parse_generation(Some("  \n")),
            Err(GenerationError::EmptyGeneration)
        ));
    }

    #[test]
    fn test_parse_malformed_generation_keeps_raw() {
        let raw = "```json\nHere is your schedule: {\"schedule\": [\n```";
        let err = parse_generation(Some(raw)).unwrap_err();

        assert_eq!(err.raw_generation(), Some(raw));
    }

    #[test]
    fn test_parse_relays_unvalidated_shape() {
        let value = parse_generation(Some("{\"schedule\": 42, \"extra\": true}")).unwrap();
        assert_eq!(value, json!({ "schedule": 42, "extra": true }));
    }

    #[tokio::test]
    async fn test_generate_schedule_relays_model_output() {
        let model = ScriptedModel::replying(Some(
            r#"{"schedule":[{"start_time":"11:00 PM","task_id":"Algorithms","explanation":"Deep work","energy_level":"High"}],"chronotype_tip":"Hydrate."}"#,
        ));

        let value = generate_schedule(&model, &request(&["  Algorithms  ", "", "Read"]))
            .await
            .unwrap();

        assert_eq!(value["schedule"][0]["task_id"], "Algorithms");
        assert_eq!(value["chronotype_tip"], "Hydrate.");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(r#"["Algorithms","Read"]"#));
        assert!(prompts[0].contains("sleeping at 02:00 AM"));
    }

    #[tokio::test]
    async fn test_generate_schedule_rejects_blank_tasks() {
        let model = ScriptedModel::replying(Some("{}"));

        let err = generate_schedule(&model, &request(&["   ", ""]))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::EmptyTaskList));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_schedule_empty_reply() {
        let model = ScriptedModel::replying(None);

        let err = generate_schedule(&model, &request(&["Read"]))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::EmptyGeneration));
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_schedule_model_failure() {
        let err = generate_schedule(&FailingModel, &request(&["Read"]))
            .await
            .unwrap_err();

        match err {
            GenerationError::TransportFailure { message, .. } => {
                assert!(message.contains("429"));
            }
            other => panic!("expected transport failure, got {:?}", other),
        }
    }
}
