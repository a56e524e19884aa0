//! The `calculate` tool (scenarios 2-3): `add`/`subtract`/`multiply`/`divide`
//! over two numeric operands, generated from a free function via
//! `#[mcp_tool]` rather than a hand-written `Tool` impl.

use mcp::prelude::*;
use serde_json::Value;

/// Performs an arithmetic operation on two numbers.
///
/// @mcp_tool calculate
/// @mcp_param operation string [required: true, enum: ["add", "subtract", "multiply", "divide"]]
/// @mcp_param x number [required: true]
/// @mcp_param y number [required: true]
#[mcp::mcp_tool]
pub async fn calculate(params: Value, _ctx: &Context) -> Result<Value, HandlerFailure> {
    let operation = params
        .get("operation")
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerFailure::InvalidParams("Missing required field: operation".into()))?;
    let x = params
        .get("x")
        .and_then(Value::as_f64)
        .ok_or_else(|| HandlerFailure::InvalidParams("Missing required field: x".into()))?;
    let y = params
        .get("y")
        .and_then(Value::as_f64)
        .ok_or_else(|| HandlerFailure::InvalidParams("Missing required field: y".into()))?;

    let result = match operation {
        "add" => x + y,
        "subtract" => x - y,
        "multiply" => x * y,
        "divide" => {
            if y == 0.0 {
                return Err(HandlerFailure::Custom("Cannot divide by zero".into()));
            }
            x / y
        }
        other => return Err(HandlerFailure::InvalidParams(format!("Unknown operation: {other}"))),
    };

    Ok(json_number(result))
}

/// Render a whole-valued result as a JSON integer rather than `N.0`
/// (scenario 2 expects `5`, not `5.0`, for `add(2, 3)`), falling back to a
/// float for anything with a fractional part or outside `f64`'s exact
/// integer range.
fn json_number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 2f64.powi(53) {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}
