//! The `counter` streaming tool (scenario 4): counts up to `count`, emitting
//! one `progress` notification per tick, then returns the full list.
//!
//! Written as a hand-rolled `Tool` impl rather than via `#[mcp_tool]` — the
//! macro only generates the non-streaming `handle` method (spec.md §9 design
//! note option (b)), so a tool that overrides `handle_stream` still needs a
//! direct trait impl the way the teacher's non-macro handlers do.

use std::time::Duration;

use mcp::prelude::*;
use serde_json::{json, Value};

#[derive(Debug, Default)]
pub struct CounterTool;

#[async_trait]
impl Tool for CounterTool {
    fn name(&self) -> String {
        "counter".to_string()
    }

    fn description(&self) -> String {
        "Counts from 1 up to `count`, emitting a progress notification per tick".to_string()
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new("count", ParamType::Integer, "How many ticks to count").optional().with_default(json!(3)),
            ToolParameter::new("delay_ms", ParamType::Integer, "Delay between ticks, in milliseconds")
                .optional()
                .with_default(json!(0)),
        ]
    }

    async fn handle(&self, params: Value, _ctx: &Context) -> Result<Value, HandlerFailure> {
        let count = params.get("count").and_then(Value::as_u64).unwrap_or(3);
        let numbers: Vec<u64> = (1..=count).collect();
        Ok(json!({ "numbers": numbers }))
    }

    async fn handle_stream(
        &self,
        params: Value,
        _ctx: &Context,
        emit: &dyn ProgressEmitter,
    ) -> Result<Value, HandlerFailure> {
        let count = params.get("count").and_then(Value::as_u64).unwrap_or(3);
        let delay_ms = params.get("delay_ms").and_then(Value::as_u64).unwrap_or(0);

        let mut numbers = Vec::with_capacity(count as usize);
        for i in 1..=count {
            numbers.push(i);
            if delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            let progress = (i as f64 / count as f64 * 10000.0).floor() / 100.0;
            emit.emit(json!({
                "status": "in_progress",
                "progress": progress,
                "numbers": numbers,
            }))
            .await?;
        }

        Ok(json!({ "numbers": numbers }))
    }

    fn supports_streaming(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_core::connection::test_support::RecordingChannel;
    use std::sync::Arc;

    struct RecordingEmitter {
        channel: Arc<RecordingChannel>,
    }

    #[async_trait]
    impl ProgressEmitter for RecordingEmitter {
        async fn emit(&self, progress: Value) -> Result<(), HandlerFailure> {
            self.channel
                .send(json!({"jsonrpc": "2.0", "method": "progress", "params": progress}))
                .await
                .map_err(|e| HandlerFailure::Internal(e.message))
        }
    }

    #[tokio::test]
    async fn non_streaming_handle_returns_full_list_directly() {
        let tool = CounterTool;
        let ctx = Context::new("c1", Some(json!(1)));
        let result = tool.handle(json!({"count": 3}), &ctx).await.unwrap();
        assert_eq!(result, json!({"numbers": [1, 2, 3]}));
    }

    #[tokio::test]
    async fn streaming_handle_emits_monotonic_progress_then_full_list() {
        let tool = CounterTool;
        let ctx = Context::new("c1", Some(json!(1)));
        let channel = Arc::new(RecordingChannel::new());
        let emitter = RecordingEmitter { channel: channel.clone() };

        let result = tool.handle_stream(json!({"count": 3, "delay_ms": 0}), &ctx, &emitter).await.unwrap();
        assert_eq!(result, json!({"numbers": [1, 2, 3]}));

        let messages = channel.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["params"]["progress"], json!(33.33));
        assert_eq!(messages[1]["params"]["progress"], json!(66.66));
        assert_eq!(messages[2]["params"]["progress"], json!(100.0));
        assert_eq!(messages[2]["params"]["numbers"], json!([1, 2, 3]));
    }
}
