//! REPL runner: converts teloxide messages to core::Message and passes them to HandlerChain.

use anyhow::Result;
use bot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::adapters::TelegramMessageWrapper;

/// Converts one Telegram message and runs the chain to completion. Errors are logged, not
/// returned, so one failed turn does not stop the REPL.
pub async fn handle_telegram_message(chain: &HandlerChain, msg: &teloxide::types::Message) {
    let core_msg = TelegramMessageWrapper(msg).to_core();

    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        message_type = %core_msg.message_type,
        "Received message"
    );

    if let Err(e) = chain.handle(&core_msg).await {
        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
    }
}

/// Starts the REPL. teloxide delivers the updates of one chat one after another; each turn is
/// awaited inside the REPL handler so that order reaches the dialogs unchanged.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = %me.user.username.as_deref().unwrap_or("unknown"),
            "Connected to Telegram"
        ),
        Err(e) => error!(error = %e, "get_me failed; continuing"),
    }

    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            handle_telegram_message(&chain, &msg).await;
            Ok(())
        }
    })
    .await;

    Ok(())
}
