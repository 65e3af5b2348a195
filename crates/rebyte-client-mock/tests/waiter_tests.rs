//! Waiter behavior exercised through the scripted mock client

use std::time::Duration;

use rebyte_api_contract::{RunTaskRequest, SpawnAgentRequest, Task};
use rebyte_client_api::{wait_for_task, ClientApi, WaitError, WaitOptions};
use rebyte_client_mock::MockClient;

fn options(poll_secs: u64, timeout_secs: u64) -> WaitOptions {
    WaitOptions::new(
        Duration::from_secs(poll_secs),
        Duration::from_secs(timeout_secs),
    )
}

#[tokio::test(start_paused = true)]
async fn waits_through_pending_states_to_completion() {
    let client = MockClient::new();
    client.script_task("t1", &["pending", "pending", "completed"]);

    let task = wait_for_task(&client, "t1", &options(1, 60)).await.unwrap();

    assert_eq!(task.status, "completed");
    assert_eq!(client.fetch_count("t1"), 3);
}

#[tokio::test(start_paused = true)]
async fn failed_task_surfaces_server_message() {
    let client = MockClient::new();
    let failed: Task = serde_json::from_value(serde_json::json!({
        "id": "t1",
        "status": "failed",
        "error": "compile error in worker",
    }))
    .unwrap();
    client.script_task_states("t1", vec![failed]);

    let err = wait_for_task(&client, "t1", &options(1, 60)).await.unwrap_err();

    match err {
        WaitError::TaskFailed { message, status, .. } => {
            assert_eq!(status, "failed");
            assert_eq!(message, "compile error in worker");
        }
        other => panic!("expected TaskFailed, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn stuck_task_times_out_after_covering_the_window() {
    let client = MockClient::new();
    client.script_task("t1", &["running"]);

    let err = wait_for_task(&client, "t1", &options(2, 5)).await.unwrap_err();

    assert!(matches!(err, WaitError::TaskTimedOut { .. }));
    assert_eq!(client.fetch_count("t1"), 3);
}

#[tokio::test(start_paused = true)]
async fn missing_task_propagates_api_error_without_retry() {
    let client = MockClient::new();

    let err = wait_for_task(&client, "nope", &options(1, 60)).await.unwrap_err();

    assert!(matches!(err, WaitError::Client(_)));
    assert_eq!(client.fetch_count("nope"), 1);
}

#[tokio::test(start_paused = true)]
async fn cancelled_mid_run_fails_the_wait() {
    let client = MockClient::new();
    client.script_task("t1", &["running", "running", "cancelled"]);

    let err = wait_for_task(&client, "t1", &options(1, 60)).await.unwrap_err();

    assert!(matches!(err, WaitError::TaskFailed { .. }));
    assert_eq!(client.fetch_count("t1"), 3);
}

#[tokio::test(start_paused = true)]
async fn run_task_then_wait_round_trip() {
    let client = MockClient::new();
    client.set_run_script(&["pending", "done"]);

    let agent = client
        .spawn_agent(&SpawnAgentRequest::new("worker", vec!["deploy".to_string()]))
        .await
        .unwrap();
    let started = client
        .run_task(&agent.id, &RunTaskRequest::new("roll out v2"))
        .await
        .unwrap();

    let finished = wait_for_task(&client, &started.id, &options(2, 300)).await.unwrap();
    assert_eq!(finished.status, "done");
}
