//! Canonical structured event names used across `topic-fanout`.

// Registration events.
pub const TOPIC_CREATED: &str = "topic_created";
pub const LISTENER_REGISTERED: &str = "listener_registered";
pub const CHANNEL_REGISTERED: &str = "channel_registered";
pub const LISTENER_UNREGISTERED: &str = "listener_unregistered";
pub const CHANNEL_UNREGISTERED: &str = "channel_unregistered";
pub const LISTENER_UNREGISTER_UNKNOWN: &str = "listener_unregister_unknown";
pub const CHANNEL_UNREGISTER_UNKNOWN: &str = "channel_unregister_unknown";
pub const UNREGISTER_NO_TOPIC: &str = "unregister_no_topic";

// Publish and fan-out events.
pub const PUBLISH_NO_TOPIC: &str = "publish_no_topic";
pub const LISTENER_DELIVERY_SPAWNED: &str = "listener_delivery_spawned";
pub const CHANNEL_DELIVERY_SPAWNED: &str = "channel_delivery_spawned";
pub const FANOUT_LISTENERS_DISPATCHED: &str = "fanout_listeners_dispatched";
pub const FANOUT_CHANNELS_DISPATCHED: &str = "fanout_channels_dispatched";
pub const CHANNEL_SEND_CLOSED: &str = "channel_send_closed";
