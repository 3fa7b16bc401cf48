mod delivery;
mod feishu;
mod sender_factory;
mod webhook;

pub use feishu::FeishuWebhookSender;
pub use sender_factory::create_sender;
pub use webhook::WebhookSender;
