//! `weave run` - execute a single turn through the router and stream events
//! to the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use weave_config::EngineConfig;
use weave_core::{AmbientContext, IntentResult};
use weave_events::{EngineEvent, EventBus};
use weave_runtime::ExecutionRouter;
use weave_subagents::CodeExecutorRegistry;
use weave_tools::{ToolContext, ToolRegistry};

use crate::config_bridge::to_router_config;
use crate::echo_provider::EchoProvider;
use crate::theme::Theme;

/// Run one turn of the engine against `prompt` and print every emitted
/// [`EngineEvent`] as it arrives.
pub async fn run_once(prompt: &str, deep: bool, workspace: Option<PathBuf>, config: EngineConfig) -> Result<()> {
    let workspace_root = workspace.unwrap_or_else(|| PathBuf::from("."));

    let skills = weave_skills::load_dirs(&config.directories.skills)?;
    let subagents = weave_subagents::load_dirs(&config.directories.subagents)?;

    let tools = ToolRegistry::new();
    let code_executors = CodeExecutorRegistry::new();
    let llm: Arc<dyn weave_llm::LlmProvider> = Arc::new(EchoProvider);
    let todo_store: Arc<dyn weave_runtime::TodoStore> = Arc::new(NullTodoStore);

    let router = ExecutionRouter::with_config(
        tools,
        skills,
        subagents,
        code_executors,
        llm,
        todo_store,
        to_router_config(&config),
    );

    let ctx = ToolContext::new(workspace_root).with_tool_registry(Arc::clone(router.tool_registry()));
    let intent = if deep { IntentResult::deep(prompt, "user_request") } else { IntentResult::standard(prompt, "user_request") };

    let session_id = format!("cli-{}", uuid::Uuid::new_v4());
    let events = EventBus::new();
    let mut receiver = events.subscribe();

    let print_task = tokio::spawn(async move {
        while let Ok(event) = receiver.recv().await {
            print_event(&event);
            if matches!(&*event, EngineEvent::Finish { .. } | EngineEvent::Error { .. }) {
                break;
            }
        }
    });

    let result = AmbientContext::root_scope(session_id.clone(), async {
        router.execute_streaming(&session_id, "You are a helpful assistant.", &intent, &ctx, &events).await
    })
    .await;

    let _ = print_task.await;

    match result {
        Ok(outcome) => {
            println!();
            println!("{}", Theme::separator());
            println!("{}", outcome.reply);
            Ok(())
        },
        Err(err) => {
            eprintln!("{}", Theme::error(&err.to_string()));
            Err(err.into())
        },
    }
}

fn print_event(event: &EngineEvent) {
    match event {
        EngineEvent::Status { phase } => println!("{}", Theme::dimmed(&format!("[{phase}]"))),
        EngineEvent::Thought { step, content } => {
            println!("{}", Theme::info(&format!("thought #{step}: {content}")));
        },
        EngineEvent::ToolCall { name, arguments, .. } => {
            println!("{}", Theme::dimmed(&format!("-> {name}({arguments})")));
        },
        EngineEvent::ToolResult { name, result, .. } => {
            println!("{}", Theme::dimmed(&format!("<- {name}: {result}")));
        },
        EngineEvent::Delta { text } => print!("{text}"),
        EngineEvent::Clarify { question, .. } => println!("{}", Theme::warning(&format!("clarify: {question}"))),
        EngineEvent::Finish { is_degraded, degrade_reason, .. } if *is_degraded => {
            let reason = degrade_reason.as_deref().unwrap_or("unknown");
            println!("{}", Theme::warning(&format!("degraded: {reason}")));
        },
        EngineEvent::Finish { .. } => {},
        EngineEvent::Error { message } => println!("{}", Theme::error(message)),
    }
}

/// A `TodoStore` that discards every write. Good enough for a one-shot CLI
/// turn where no session survives past the process exit.
struct NullTodoStore;

#[async_trait::async_trait]
impl weave_runtime::TodoStore for NullTodoStore {
    async fn get(&self, _session_id: &str) -> weave_runtime::RuntimeResult<Vec<weave_core::TodoItem>> {
        Ok(Vec::new())
    }

    async fn set(&self, _session_id: &str, _items: Vec<weave_core::TodoItem>) -> weave_runtime::RuntimeResult<()> {
        Ok(())
    }
}
