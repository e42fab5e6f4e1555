use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use topic_fanout::{Dispatch, Dispatcher, SubscriberId};

pub(crate) const RECEIVE_DEADLINE: Duration = Duration::from_millis(500);
#[allow(dead_code)]
pub(crate) const SILENCE_WINDOW: Duration = Duration::from_millis(150);

pub(crate) async fn register_channel_subscriber<P: Clone + Send + 'static>(
    dispatcher: &Dispatcher<P>,
    topic: &str,
    capacity: usize,
) -> (SubscriberId, mpsc::Receiver<P>) {
    let id = SubscriberId::generate();
    let (sender, receiver) = mpsc::channel(capacity);
    dispatcher.register_channel(id, topic, sender).await;
    (id, receiver)
}

pub(crate) async fn recv_within<P>(
    receiver: &mut mpsc::Receiver<P>,
    deadline: Duration,
) -> Option<P> {
    timeout(deadline, receiver.recv()).await.ok().flatten()
}

/// Passes when nothing arrives for the whole window. A closed channel counts
/// as silent.
#[allow(dead_code)]
pub(crate) async fn assert_silent<P>(receiver: &mut mpsc::Receiver<P>, window: Duration) {
    assert!(
        matches!(timeout(window, receiver.recv()).await, Err(_) | Ok(None)),
        "expected no delivery within the silence window"
    );
}
