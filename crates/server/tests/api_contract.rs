//! Wire-contract tests for the scheduling API.
//!
//! Since `promptwall-server` is a binary crate (no lib.rs), we validate
//! the JSON contracts by defining mirror types and checking
//! serialization roundtrips against the documented shapes.

use serde::{Deserialize, Serialize};

// ── Persisted configuration record ────────────────────────────────

/// Mirror of the `scheduling.json` record.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchedulingConfigFile {
    interval_minutes: u32,
    base_time: String,
    is_active: bool,
}

#[test]
fn scheduling_config_file_roundtrip() {
    let raw = r#"{ "intervalMinutes": 2, "baseTime": "2024-01-01T00:00:00.000Z", "isActive": true }"#;
    let config: SchedulingConfigFile = serde_json::from_str(raw).unwrap();
    assert_eq!(
        config,
        SchedulingConfigFile {
            interval_minutes: 2,
            base_time: "2024-01-01T00:00:00.000Z".to_string(),
            is_active: true,
        }
    );

    let value: serde_json::Value = serde_json::to_value(&config).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    // serde_json orders object keys alphabetically.
    assert_eq!(keys, ["baseTime", "intervalMinutes", "isActive"]);
}

// ── Current-prompt response ───────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentPromptEnvelope {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    data: Option<CurrentPromptData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentPromptData {
    prompt_index: i64,
    total_prompts: usize,
    current_interval_start: String,
    current_interval_end: String,
}

#[test]
fn current_prompt_success_shape() {
    let envelope = CurrentPromptEnvelope {
        success: true,
        message: None,
        data: Some(CurrentPromptData {
            prompt_index: 1,
            total_prompts: 4,
            current_interval_start: "2024-01-01T00:02:00.000Z".to_string(),
            current_interval_end: "2024-01-01T00:04:00.000Z".to_string(),
        }),
    };
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["success"], true);
    assert!(value.get("message").is_none());
    assert_eq!(value["data"]["promptIndex"], 1);
    assert_eq!(value["data"]["totalPrompts"], 4);
    assert!(value["data"]["currentIntervalStart"]
        .as_str()
        .unwrap()
        .ends_with("Z"));
}

#[test]
fn current_prompt_unavailable_shape() {
    // Scheduling disabled and empty wall are valid states, not errors:
    // success is false, data is null, and a human-readable message says why.
    let raw = r#"{ "success": false, "message": "Prompt scheduling is not active.", "data": null }"#;
    let envelope: CurrentPromptEnvelope = serde_json::from_str(raw).unwrap();
    assert!(!envelope.success);
    assert!(envelope.data.is_none());
    assert!(envelope.message.unwrap().contains("not active"));
}

// ── Control actions ───────────────────────────────────────────────

/// Actions accepted by POST /scheduler.
const SCHEDULER_ACTIONS: &[&str] = &["start", "stop"];

/// Actions accepted by POST /admin/scheduling.
const ADMIN_SCHEDULING_ACTIONS: &[&str] = &["updateInterval", "autoScheduleNew"];

#[derive(Serialize, Deserialize)]
struct ActionRequest {
    action: String,
}

#[test]
fn control_action_vocabulary() {
    for action in SCHEDULER_ACTIONS.iter().chain(ADMIN_SCHEDULING_ACTIONS) {
        let json = format!(r#"{{ "action": "{}" }}"#, action);
        let parsed: ActionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed.action, action);
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateIntervalRequest {
    action: String,
    interval_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_time: Option<String>,
    #[serde(default)]
    reschedule_all: bool,
}

#[test]
fn update_interval_request_defaults() {
    // rescheduleAll is optional and defaults off.
    let raw = r#"{ "action": "updateInterval", "intervalMinutes": 1440 }"#;
    let parsed: UpdateIntervalRequest = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed.interval_minutes, 1440);
    assert!(!parsed.reschedule_all);
    assert!(parsed.base_time.is_none());
}

// ── Admin timeline entries ────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineEntryMirror {
    expected_schedule_time: String,
    actual_schedule_time: String,
    is_on_schedule: bool,
    position: usize,
    status: String,
}

#[test]
fn timeline_entry_status_vocabulary() {
    let raw = r#"{
        "expectedScheduleTime": "2024-01-01T00:00:00.000Z",
        "actualScheduleTime": "2024-01-01T00:00:30.000Z",
        "isOnSchedule": true,
        "position": 1,
        "status": "completed"
    }"#;
    let entry: TimelineEntryMirror = serde_json::from_str(raw).unwrap();
    assert!(["completed", "upcoming"].contains(&entry.status.as_str()));
    assert_eq!(entry.position, 1);
    assert!(entry.is_on_schedule);
}
