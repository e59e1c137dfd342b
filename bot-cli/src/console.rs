//! Local console channel: stdin lines in, activities printed to stdout.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use bot_core::{init_file_tracing, Activity, Bot, Chat, Message, MessageDirection, User};
use chrono::Utc;
use handler_chain::HandlerChain;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{error, info};

use crate::app::{build_handler_chain, open_stores};
use crate::config::AppConfig;

const QUIT_COMMAND: &str = "/quit";

/// Renders one activity the way the console shows it; buttons become `[label]` on their own line.
pub fn render_activity(activity: &Activity) -> String {
    match activity {
        Activity::Text(text) => text.clone(),
        Activity::SuggestedActions { text, actions } => {
            let buttons: Vec<String> = actions.iter().map(|a| format!("[{}]", a)).collect();
            format!("{}\n{}", text, buttons.join(" "))
        }
    }
}

/// Prints every activity to stdout.
pub struct ConsoleBot;

#[async_trait]
impl Bot for ConsoleBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> bot_core::Result<()> {
        println!("bot> {}", render_activity(&Activity::text(text)));
        Ok(())
    }

    async fn send_suggested_actions(
        &self,
        _chat: &Chat,
        text: &str,
        actions: &[String],
    ) -> bot_core::Result<()> {
        let activity = Activity::suggested_actions(text, actions.iter().cloned());
        println!("bot> {}", render_activity(&activity));
        Ok(())
    }
}

/// Builds the console user. The whole `name` is reported as the first name so the display name
/// is exactly what was passed on the command line.
fn console_user(name: &str, user_id: i64) -> User {
    let name = name.trim();
    User {
        id: user_id,
        username: None,
        first_name: (!name.is_empty()).then(|| name.to_string()),
        last_name: None,
    }
}

/// Feeds lines from `reader` through the chain until EOF or `/quit`.
pub async fn console_session<R>(
    chain: &HandlerChain,
    reader: R,
    name: &str,
    user_id: i64,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let user = console_user(name, user_id);
    let chat = Chat {
        id: user_id,
        chat_type: "private".to_string(),
    };
    let counter = AtomicU64::new(0);
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let content = line.trim_end_matches('\r').to_string();
        if content.trim() == QUIT_COMMAND {
            info!(user_id, "Console session ended by user");
            break;
        }

        let message = Message {
            id: format!("console-{}", counter.fetch_add(1, Ordering::Relaxed)),
            user: user.clone(),
            chat: chat.clone(),
            content,
            message_type: "text".to_string(),
            direction: MessageDirection::Incoming,
            created_at: Utc::now(),
        };

        if let Err(e) = chain.handle(&message).await {
            error!(error = %e, user_id, "Handler chain failed");
            eprintln!("error: {}", e);
        }
    }

    Ok(())
}

/// Runs an interactive session on stdin/stdout. Logs go to the log file only.
pub async fn run_console(config: AppConfig, name: String, user_id: i64) -> Result<()> {
    init_file_tracing(&config.log_file)?;
    info!(user_id, name = %name, "Starting console session");

    let stores = open_stores(&config).await?;
    let chain = build_handler_chain(Arc::new(ConsoleBot), &stores);

    println!("Chatting as '{}'. Type {} or press Ctrl-D to leave.", name, QUIT_COMMAND);
    console_session(&chain, BufReader::new(tokio::io::stdin()), &name, user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Stores;
    use dialogs::texts::{ACCEPT_ACTION, DECLINE_ACTION, GREETING, SUCCESS_MESSAGE};
    use std::sync::Mutex;
    use storage::PREFERRED_FIRST_NAME;

    #[derive(Default)]
    struct CapturingBot {
        lines: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Bot for CapturingBot {
        async fn send_message(&self, _chat: &Chat, text: &str) -> bot_core::Result<()> {
            self.lines.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn send_suggested_actions(
            &self,
            _chat: &Chat,
            text: &str,
            actions: &[String],
        ) -> bot_core::Result<()> {
            let activity = Activity::suggested_actions(text, actions.iter().cloned());
            self.lines.lock().unwrap().push(render_activity(&activity));
            Ok(())
        }
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render_activity(&Activity::text("hello")), "hello");
    }

    #[test]
    fn test_render_suggested_actions() {
        let activity = Activity::suggested_actions("Pick one", ["Yes", "No"]);
        assert_eq!(render_activity(&activity), "Pick one\n[Yes] [No]");
    }

    #[test]
    fn test_console_user_blank_name_has_no_display_name() {
        assert_eq!(console_user("   ", 3).display_name(), None);
        assert_eq!(
            console_user("Alice Smith", 3).display_name().as_deref(),
            Some("Alice Smith")
        );
    }

    #[tokio::test]
    async fn test_session_decline_then_type_name() {
        let bot = Arc::new(CapturingBot::default());
        let stores = Stores::in_memory();
        let chain = build_handler_chain(bot.clone(), &stores);

        let input = format!("hi\nno\nAl\n{}\n/quit\nignored\n", ACCEPT_ACTION);
        console_session(&chain, input.as_bytes(), "Alice Smith", 5)
            .await
            .unwrap();

        let lines = bot.lines.lock().unwrap().clone();
        assert_eq!(lines.first().map(String::as_str), Some(GREETING));
        assert!(lines.iter().any(|l| l == "Should I call you Alice?\n[Yes] [No]"));
        assert!(lines.iter().any(|l| l == "I've got your name saved as Al."));
        assert!(lines.iter().any(|l| l.contains(DECLINE_ACTION)));
        assert_eq!(lines.last().map(String::as_str), Some(SUCCESS_MESSAGE));

        assert_eq!(
            stores
                .user_data
                .get_value(5, PREFERRED_FIRST_NAME)
                .await
                .unwrap()
                .as_deref(),
            Some("Al")
        );
    }

    #[tokio::test]
    async fn test_session_ends_at_eof() {
        let bot = Arc::new(CapturingBot::default());
        let chain = build_handler_chain(bot.clone(), &Stores::in_memory());

        console_session(&chain, &b""[..], "Bob", 9).await.unwrap();

        assert!(bot.lines.lock().unwrap().is_empty());
    }
}
