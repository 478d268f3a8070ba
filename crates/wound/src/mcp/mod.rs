use crate::{
    error::{Result as WoundResult, WoundError},
    manager::{AssessmentCommand, AssessmentManager, CommandOutcome},
    types::PatientAnswers,
};
use rmcp::{
    handler::server::tool::IntoCallToolResult, model::{CallToolResult, Content, ServerCapabilities, ServerInfo}, schemars, tool, Error as McpError, ServerHandler
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use std::sync::{Arc, RwLock};

/// Request for loading a wound photograph from disk
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadImageRequest {
    #[schemars(description = "Path to the image file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompareRequest {
    #[schemars(
        description = "Days elapsed between the previous and the current scan",
        range(min = 1, max = 365)
    )]
    pub days_between: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecommendCareRequest {
    #[serde(default)]
    #[schemars(description = "Patient-reported answers; omitted fields use neutral defaults")]
    pub answers: PatientAnswers,
}

/// Response wrapping the outcome of an assessment command
#[derive(Debug, Serialize, schemars::JsonSchema, TS)]
#[ts(export)]
pub struct AssessmentResponse {
    #[schemars(description = "Name of the executed command")]
    pub command: String,
    #[schemars(description = "Number of assessments stored in this session")]
    pub history_len: usize,
    #[schemars(description = "Command output, or an error object")]
    pub result: serde_json::Value,
}

impl AssessmentResponse {
    fn error(command: &AssessmentCommand, history_len: usize, message: String) -> Self {
        Self {
            command: command.to_string(),
            history_len,
            result: serde_json::json!({ "error": message }),
        }
    }
}

impl IntoCallToolResult for AssessmentResponse {
    fn into_call_tool_result(self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&self).unwrap_or_else(|_| format!("{:?}", self)),
        )]))
    }
}

/// MCP Server for wound photograph assessment
#[derive(Clone)]
pub struct WoundMcpServer {
    manager: Arc<RwLock<AssessmentManager>>,
}

impl WoundMcpServer {
    pub fn new() -> Self {
        Self::with_manager(AssessmentManager::new())
    }

    pub fn with_manager(manager: AssessmentManager) -> Self {
        Self { manager: Arc::new(RwLock::new(manager)) }
    }

    fn load(&self, path: &str) -> WoundResult<()> {
        let mut manager = self.manager.write().map_err(|_| WoundError::LockPoisoned)?;
        manager.load_image(path)
    }

    fn run(&self, command: AssessmentCommand) -> WoundResult<(CommandOutcome, usize)> {
        let mut manager = self.manager.write().map_err(|_| WoundError::LockPoisoned)?;
        let outcome = manager.execute(command)?;
        Ok((outcome, manager.history().len()))
    }

    /// Stored assessments, or 0 when the state lock is poisoned
    fn history_len(&self) -> usize {
        self.manager.read().map(|manager| manager.history().len()).unwrap_or(0)
    }

    fn respond(&self, command: AssessmentCommand) -> AssessmentResponse {
        let (outcome, history_len) = match self.run(command.clone()) {
            Ok(result) => result,
            Err(e) => {
                return AssessmentResponse::error(
                    &command,
                    self.history_len(),
                    format!("{} failed: {}", command, e),
                );
            }
        };

        match serde_json::to_value(&outcome) {
            Ok(result) => AssessmentResponse {
                command: command.to_string(),
                history_len,
                result,
            },
            Err(e) => AssessmentResponse::error(&command, history_len, format!("Failed to serialize result: {}", e)),
        }
    }
}

impl Default for WoundMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool(tool_box)]
impl WoundMcpServer {
    #[tool(description = "Load a wound photograph from file path")]
    fn load_image(&self, #[tool(aggr)] LoadImageRequest { path }: LoadImageRequest) -> String {
        match self.load(&path) {
            Ok(()) => format!("Image loaded successfully from {}", path),
            Err(e) => format!("Failed to load image from {}: {}", path, e),
        }
    }

    #[tool(description = "Analyze the loaded wound photograph and store the assessment in the session history")]
    fn analyze_wound(&self) -> AssessmentResponse {
        self.respond(AssessmentCommand::AnalyzeWound)
    }

    #[tool(description = "Compare the two most recent assessments and report the healing trend")]
    fn compare_with_previous(
        &self,
        #[tool(aggr)] CompareRequest { days_between }: CompareRequest
    ) -> AssessmentResponse {
        self.respond(AssessmentCommand::CompareWithPrevious { days_between })
    }

    #[tool(description = "Generate prioritized care recommendations for the most recent assessment")]
    fn recommend_care(
        &self,
        #[tool(aggr)] RecommendCareRequest { answers }: RecommendCareRequest
    ) -> AssessmentResponse {
        self.respond(AssessmentCommand::RecommendCare { answers })
    }

    #[tool(description = "Get information about available commands and their parameters")]
    fn get_command_info(&self) -> String {
        let mut info = String::new();
        info.push_str("Available AssessmentCommands:\n\n");

        for (i, name) in AssessmentCommand::command_names().iter().enumerate() {
            info.push_str(&format!("{}. {}\n", i + 1, name));
        }

        info.push_str("\nCommand Details:\n");
        let commands = [
            AssessmentCommand::AnalyzeWound,
            AssessmentCommand::CompareWithPrevious { days_between: 1 },
            AssessmentCommand::RecommendCare { answers: PatientAnswers::default() },
        ];

        for cmd in commands {
            info.push_str(&format!("\n- {}\n", cmd));
            info.push_str(&format!("  Description: {}\n", cmd.description()));

            let params = cmd.parameters_info();
            if !params.is_empty() {
                info.push_str("  Parameters:\n");
                for (name, desc, required) in params {
                    let req_marker = if required { " (required)" } else { " (optional)" };
                    info.push_str(&format!("    - {}{}: {}\n", name, req_marker, desc));
                }
            }
        }

        info
    }

    #[tool(description = "Get the JSON schema for AssessmentCommand")]
    fn get_command_schema(&self) -> String {
        let schema = AssessmentCommand::schema();
        serde_json::to_string_pretty(&schema)
            .unwrap_or_else(|e| format!("Failed to serialize schema: {}", e))
    }
}

#[tool(tool_box)]
impl ServerHandler for WoundMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Wound Assessment Server - Analyze wound photographs into tissue composition, healing stage and risk level, track healing between scans, and generate prioritized care instructions.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
