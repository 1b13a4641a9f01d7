/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Processes tool calls using the goal tracker
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{GoalTrackerServer, ServerError};

/// MCP server that handles communication with MCP clients
pub struct McpServer {
    /// The underlying goal tracker server
    goal_tracker: GoalTrackerServer,
    /// Whether the server has been initialized
    initialized: bool,
}

/// Build a tool definition whose input schema is generated from the params type
fn tool_definition<T: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let input_schema =
        serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| json!({"type": "object"}));
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Deserialize tool call arguments into a params struct
fn parse_args<T: DeserializeOwned>(args: HashMap<String, Value>) -> Result<T, String> {
    serde_json::from_value(Value::Object(args.into_iter().collect()))
        .map_err(|e| format!("Invalid arguments: {}", e))
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(goal_tracker: GoalTrackerServer) -> Self {
        Self {
            goal_tracker,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            // Read one line from stdin
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    // Process the line
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        // Write response + newline
                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        // Parse JSON-RPC request
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        Some(self.handle_request(request))
    }

    /// Handle a JSON-RPC request
    fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        if request.jsonrpc != "2.0" {
            return JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                "Unsupported JSON-RPC version".to_string(),
                None,
            );
        }

        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(request.id, json!(null))
            }
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "TripTailor Goals MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                e.to_string(),
                None,
            ),
        }
    }

    /// Handle tools/list request
    fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = vec![
            tool_definition::<tools::CreateGoalParams>(
                "goal_create",
                "Create a new goal to track",
            ),
            tool_definition::<tools::UpdateGoalParams>(
                "goal_update",
                "Update a goal's name, cadence or start date",
            ),
            tool_definition::<tools::DeleteGoalParams>(
                "goal_delete",
                "Delete a goal and discard its completion history",
            ),
            tool_definition::<tools::ToggleGoalParams>(
                "goal_toggle",
                "Toggle a goal's completion for today or a specific day",
            ),
            tool_definition::<tools::ListGoalsParams>(
                "goal_list",
                "List all goals with streaks and completion counts",
            ),
            tool_definition::<tools::StatsParams>(
                "goal_stats",
                "Overall statistics: total goals, total completions, best streak",
            ),
            tool_definition::<tools::ChartParams>(
                "goal_chart",
                "Time-bucketed completion counts for progress charts",
            ),
        ];

        JsonRpcResponse::success(request.id, json!({"tools": tools}))
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        if !self.initialized {
            debug!("tools/call received before the initialized notification");
        }

        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = match tool_params.name.as_str() {
            "goal_create" => self.call_goal_create(tool_params.arguments),
            "goal_update" => self.call_goal_update(tool_params.arguments),
            "goal_delete" => self.call_goal_delete(tool_params.arguments),
            "goal_toggle" => self.call_goal_toggle(tool_params.arguments),
            "goal_list" => self.call_goal_list(tool_params.arguments),
            "goal_stats" => self.call_goal_stats(tool_params.arguments),
            "goal_chart" => self.call_goal_chart(tool_params.arguments),
            _ => ToolCallResult::error(format!("Unknown tool: {}", tool_params.name)),
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                e.to_string(),
                None,
            ),
        }
    }

    /// Call the goal_create tool
    fn call_goal_create(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = match parse_args(args) {
            Ok(p) => p,
            Err(msg) => return ToolCallResult::error(msg),
        };

        match tools::create_goal(self.goal_tracker.storage(), self.goal_tracker.owner(), params) {
            Ok(response) => {
                let message = if let Some(goal_id) = &response.goal_id {
                    format!("{}\nGoal ID: {}", response.message, goal_id)
                } else {
                    response.message
                };
                ToolCallResult::success(message)
            }
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the goal_update tool
    fn call_goal_update(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = match parse_args(args) {
            Ok(p) => p,
            Err(msg) => return ToolCallResult::error(msg),
        };

        match tools::update_goal(self.goal_tracker.storage(), self.goal_tracker.owner(), params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the goal_delete tool
    fn call_goal_delete(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = match parse_args(args) {
            Ok(p) => p,
            Err(msg) => return ToolCallResult::error(msg),
        };

        match tools::delete_goal(self.goal_tracker.storage(), self.goal_tracker.owner(), params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the goal_toggle tool
    fn call_goal_toggle(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = match parse_args(args) {
            Ok(p) => p,
            Err(msg) => return ToolCallResult::error(msg),
        };

        match tools::toggle_goal(self.goal_tracker.storage(), self.goal_tracker.owner(), params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the goal_list tool
    fn call_goal_list(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = match parse_args(args) {
            Ok(p) => p,
            Err(msg) => return ToolCallResult::error(msg),
        };

        match tools::list_goals(self.goal_tracker.storage(), self.goal_tracker.owner(), params) {
            Ok(response) => {
                let header = format!(
                    "📋 Goals ({} total)\n\n",
                    response.total_goals
                );
                ToolCallResult::success(format!("{}{}", header, response.message))
            }
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the goal_stats tool
    fn call_goal_stats(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = match parse_args(args) {
            Ok(p) => p,
            Err(msg) => return ToolCallResult::error(msg),
        };

        match tools::goal_stats(self.goal_tracker.storage(), self.goal_tracker.owner(), params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the goal_chart tool
    fn call_goal_chart(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = match parse_args(args) {
            Ok(p) => p,
            Err(msg) => return ToolCallResult::error(msg),
        };

        match tools::goal_chart(self.goal_tracker.storage(), self.goal_tracker.owner(), params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }
}
