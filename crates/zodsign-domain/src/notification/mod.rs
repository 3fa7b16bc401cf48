mod sender;
mod value_objects;

pub use sender::{NoopSender, NotificationMessage, NotificationSender};
pub use value_objects::{
    ChannelConfig, ChannelType, NotificationConfig, DEFAULT_NOTIFICATION_TITLE,
};
