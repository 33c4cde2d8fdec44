use serde_json::json;

/// Builds the scheduling instruction for one night. The sleep time goes in
/// verbatim; tasks are embedded as a JSON array.
pub fn get_schedule_prompt(sleep_time: &str, tasks: &[String]) -> String {
    let tasks = json!(tasks).to_string();

    format!(
        r#"You are a sleep scientist. For a user sleeping at {sleep_time}, identify their 2-hour "Deep Work" window: one contiguous two-hour block of peak focus, placed relative to that sleep time. If a task involves complex logic (like Algorithms), place it inside that window. If it is lighter, place it near the wind-down period before sleep.

Tasks: {tasks}

Return the schedule as a single JSON object with a "Chronotype Tip" for the night.
The JSON structure should be:
{{
  "schedule": [
    {{
      "start_time": "HH:MM AM/PM",
      "task_id": "Task Name",
      "explanation": "Brief explanation",
      "energy_level": "High/Medium/Low"
    }}
  ],
  "chronotype_tip": "Specific tip"
}}
Do not wrap the response in markdown code blocks. Do not add any text before or after the object. Return only valid JSON."#
    )
}
