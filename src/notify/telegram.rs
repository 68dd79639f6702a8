use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};

use super::{Delivery, Notifier};
use crate::core::config::TelegramConfig;

/// Sends plain-text messages to a single Telegram chat or channel.
pub struct TelegramNotifier {
    target: Option<(Bot, Recipient)>,
}

impl TelegramNotifier {
    /// Disabled unless both the bot token and the chat id are configured.
    pub fn new(config: &TelegramConfig) -> Self {
        let target = match (&config.bot_token, &config.chat_id) {
            (Some(token), Some(chat_id)) => Some((Bot::new(token), parse_recipient(chat_id))),
            _ => None,
        };

        Self { target }
    }

    pub fn disabled() -> Self {
        Self { target: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }
}

/// Numeric ids address a chat directly; anything else is a channel username.
fn parse_recipient(raw: &str) -> Recipient {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(raw.to_string()),
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Delivery {
        let Some((bot, recipient)) = &self.target else {
            tracing::debug!("Telegram notifier disabled, dropping message");
            return Delivery::Disabled;
        };

        match bot.send_message(recipient.clone(), text).await {
            Ok(_) => Delivery::Sent,
            Err(e) => {
                tracing::error!("❌ Telegram send failed: {}", e);
                Delivery::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipient() {
        assert_eq!(parse_recipient("123456"), Recipient::Id(ChatId(123456)));
        assert_eq!(parse_recipient("-100200300"), Recipient::Id(ChatId(-100200300)));
        assert_eq!(
            parse_recipient("@drops"),
            Recipient::ChannelUsername("@drops".to_string())
        );
    }

    #[test]
    fn test_disabled_without_credentials() {
        let missing_chat = TelegramConfig {
            bot_token: Some("123:abc".to_string()),
            chat_id: None,
        };
        assert!(!TelegramNotifier::new(&missing_chat).is_enabled());

        let complete = TelegramConfig {
            bot_token: Some("123:abc".to_string()),
            chat_id: Some("42".to_string()),
        };
        assert!(TelegramNotifier::new(&complete).is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_notify_is_noop() {
        let notifier = TelegramNotifier::disabled();
        assert_eq!(notifier.notify("hello").await, Delivery::Disabled);
    }
}
