use serde_json::json;
use zodsign_domain::notification::NotificationMessage;

const SUCCESS_MARK: &str = "✅";
const FAILURE_MARK: &str = "❌";

impl super::FeishuWebhookSender {
    /// Build the payload for a message.
    ///
    /// Check-in summaries (one `name: ✅/❌ ...` line per account) become an
    /// interactive card; anything else is sent as plain text.
    pub(super) fn build_payload(&self, message: &NotificationMessage) -> serde_json::Value {
        let is_summary = message
            .content
            .lines()
            .any(|line| line.contains(SUCCESS_MARK) || line.contains(FAILURE_MARK));

        if is_summary {
            self.build_card_message(message)
        } else {
            self.build_text_message(message)
        }
    }

    /// Card with one markdown row per account, red header if anything failed
    pub(super) fn build_card_message(&self, message: &NotificationMessage) -> serde_json::Value {
        let lines: Vec<&str> = message
            .content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let failed = lines.iter().filter(|l| l.contains(FAILURE_MARK)).count();
        let template = if failed == 0 { "green" } else { "red" };

        let mut elements: Vec<serde_json::Value> = lines
            .iter()
            .map(|line| {
                json!({
                    "tag": "div",
                    "text": {
                        "tag": "lark_md",
                        "content": line
                    }
                })
            })
            .collect();

        elements.push(json!({"tag": "hr"}));
        elements.push(json!({
            "tag": "note",
            "elements": [{
                "tag": "plain_text",
                "content": format!("{} account(s), {} failed", lines.len(), failed)
            }]
        }));

        json!({
            "msg_type": "interactive",
            "card": {
                "header": {
                    "template": template,
                    "title": {
                        "tag": "plain_text",
                        "content": message.title
                    }
                },
                "elements": elements
            }
        })
    }

    /// Build a simple text message for Feishu (fallback)
    pub(super) fn build_text_message(&self, message: &NotificationMessage) -> serde_json::Value {
        json!({
            "msg_type": "text",
            "content": {
                "text": format!("{}\n{}", message.title, message.content)
            }
        })
    }
}
