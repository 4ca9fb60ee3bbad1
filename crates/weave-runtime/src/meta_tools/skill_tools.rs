//! `skill_call` / `skill_exec`: the meta-tools erasing the whole Skill
//! catalog down to two entries in the tool schema, per §9's "meta-tool
//! catalog erasure" design note.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use weave_skills::{SkillError, SkillRegistry};
use weave_tools::{RiskLevel, TierSet, Tool, ToolContext, ToolError, ToolExecResult};

/// A generous fail-safe timeout for the outer [`weave_tools::ToolRegistry`]
/// dispatch. [`SkillExecTool`] enforces the skill's own, much tighter,
/// per-script timeout itself via subprocess kill; this is only the backstop
/// for a script whose own timeout somehow never fires.
const SKILL_EXEC_FAILSAFE_MS: u64 = 600_000;

fn skill_err_to_tool_err(err: SkillError) -> ToolError {
    ToolError::ExecutionFailed(err.to_string())
}

/// Loads a Skill's rendered instructions into context, by name.
pub struct SkillCallTool {
    registry: Arc<SkillRegistry>,
}

impl SkillCallTool {
    /// Build the tool around a loaded Skill catalog.
    #[must_use]
    pub fn new(registry: Arc<SkillRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Tool for SkillCallTool {
    fn name(&self) -> &str {
        "skill_call"
    }

    fn description(&self) -> &str {
        "Load a Skill's instructions by name. See this tool's `skill` enum \
         for the currently available catalog."
    }

    fn input_schema(&self) -> Value {
        let names: Vec<String> = self.registry.catalog().into_iter().map(|(name, _)| name).collect();
        serde_json::json!({
            "type": "object",
            "properties": {"skill": {"type": "string", "enum": names}},
            "required": ["skill"]
        })
    }

    fn tiers(&self) -> TierSet {
        TierSet::L3_ONLY
    }

    async fn execute(&self, args: Value, _ctx: &ToolContext) -> ToolExecResult {
        let skill = args
            .get("skill")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing `skill`".to_string()))?;

        let instructions = self.registry.render(skill).map_err(skill_err_to_tool_err)?;
        Ok(serde_json::json!({"instructions": instructions}))
    }
}

/// Runs one of a Skill's allow-listed scripts as a subprocess, feeding it
/// JSON arguments on stdin and parsing a JSON result from stdout.
pub struct SkillExecTool {
    registry: Arc<SkillRegistry>,
}

impl SkillExecTool {
    /// Build the tool around a loaded Skill catalog.
    #[must_use]
    pub fn new(registry: Arc<SkillRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Tool for SkillExecTool {
    fn name(&self) -> &str {
        "skill_exec"
    }

    fn description(&self) -> &str {
        "Run one of a Skill's allow-listed scripts. Arguments are passed as \
         JSON on the script's stdin; the script must print a single JSON \
         value to stdout."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "skill": {"type": "string"},
                "script": {"type": "string"},
                "args": {"type": "object"}
            },
            "required": ["skill", "script"]
        })
    }

    fn tiers(&self) -> TierSet {
        TierSet::L3_ONLY
    }

    fn timeout_ms(&self) -> u64 {
        SKILL_EXEC_FAILSAFE_MS
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Write
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolExecResult {
        let skill = args
            .get("skill")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing `skill`".to_string()))?;
        let script = args
            .get("script")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing `script`".to_string()))?;
        let script_args = args.get("args").cloned().unwrap_or_else(|| serde_json::json!({}));

        let path = self.registry.check_script_allowed(skill, script).map_err(skill_err_to_tool_err)?;
        let timeout = Duration::from_secs_f64(self.registry.timeout_s(skill).unwrap_or(30.0));

        run_script(&path, &script_args, &ctx.workspace_root, timeout).await
    }
}

async fn run_script(
    path: &std::path::Path,
    script_args: &Value,
    workspace_root: &std::path::Path,
    timeout: Duration,
) -> ToolExecResult {
    let mut child = tokio::process::Command::new(path)
        .current_dir(workspace_root)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ToolError::ExecutionFailed(format!("failed to spawn script: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        let payload = serde_json::to_vec(script_args).unwrap_or_default();
        let _ = stdin.write_all(&payload).await;
    }

    let mut stdout_pipe = child.stdout.take().expect("piped stdout");
    let mut stderr_pipe = child.stderr.take().expect("piped stderr");
    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stdout_pipe.read_to_end(&mut buf).await;
        buf
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stderr_pipe.read_to_end(&mut buf).await;
        buf
    });

    let status = tokio::select! {
        status = child.wait() => status.map_err(|e| ToolError::ExecutionFailed(format!("script I/O error: {e}")))?,
        () = tokio::time::sleep(timeout) => {
            let _ = child.kill().await;
            let _ = child.wait().await;
            return Err(ToolError::ExecutionFailed(format!(
                "script timed out after {}ms and was killed",
                timeout.as_millis()
            )));
        }
    };

    let stdout = stdout_task.await.unwrap_or_default();
    let stderr = stderr_task.await.unwrap_or_default();

    if !status.success() {
        return Err(ToolError::ExecutionFailed(format!(
            "script exited with status {status}: {}",
            String::from_utf8_lossy(&stderr)
        )));
    }

    serde_json::from_slice(&stdout).map_err(|_| ToolError::ExecutionFailed("non-JSON output from script".to_string()))
}
