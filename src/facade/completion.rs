// One-shot completion for a pending request/exit.
//
// The listener is registered before the host method runs, so a host that
// fires the change event synchronously cannot slip past it. It removes
// itself when it fires. The host's dispatch table holds the only strong
// reference to it; if the host drops it unfired, the channel closes and the
// caller gets `Abandoned`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use futures::future::{self, Either};

use crate::error::{FullscreenError, HostError};
use crate::events::{Listener, WeakListener};
use crate::host::{HostCall, HostDocument, HostEvent};

/// Handle able to take the one-shot listener back off the host.
struct Detach<H: HostDocument + 'static> {
    host: Weak<H>,
    event: &'static str,
    listener: WeakListener,
}

impl<H: HostDocument + 'static> Detach<H> {
    fn run(&self) {
        if let (Some(host), Some(listener)) = (self.host.upgrade(), self.listener.upgrade()) {
            host.remove_event_listener(self.event, &listener);
        }
    }
}

pub(crate) struct Completion<H: HostDocument + 'static> {
    detach: Detach<H>,
    fired: oneshot::Receiver<()>,
}

impl<H: HostDocument + 'static> Completion<H> {
    /// Register a one-shot listener for `event` on `host`.
    pub(crate) fn arm(host: &Rc<H>, event: &'static str) -> Self {
        let (tx, rx) = oneshot::channel();
        let weak_host = Rc::downgrade(host);

        let listener = Listener::new_cyclic(|me| {
            let weak_host = weak_host.clone();
            let tx = RefCell::new(Some(tx));
            let callback: Box<dyn Fn(&HostEvent)> = Box::new(move |_event: &HostEvent| {
                if let (Some(host), Some(me)) = (weak_host.upgrade(), me.upgrade()) {
                    host.remove_event_listener(event, &me);
                }
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(());
                }
            });
            callback
        });
        host.add_event_listener(event, &listener);

        Self {
            detach: Detach {
                host: weak_host,
                event,
                listener: listener.downgrade(),
            },
            fired: rx,
        }
    }

    /// Wait for the change event, relaying a host rejection if it comes first.
    ///
    /// A host future that resolves successfully does not complete the wait;
    /// some hosts resolve before the transition is visible. A rejection that
    /// arrives after the change event has already fired is ignored.
    pub(crate) async fn settle(
        self,
        call: Result<HostCall, HostError>,
    ) -> Result<(), FullscreenError> {
        let Completion { detach, mut fired } = self;

        let call = match call {
            Ok(call) => call,
            Err(reason) => return reject(&detach, &mut fired, reason),
        };

        if let HostCall::Pending(host_future) = call {
            match future::select(&mut fired, host_future).await {
                Either::Left((signal, _)) => {
                    return signal.map_err(|_| FullscreenError::Abandoned);
                }
                Either::Right((Err(reason), fired)) => return reject(&detach, fired, reason),
                Either::Right((Ok(()), _)) => {
                    log::debug!(
                        "[Fullscreen] Host call resolved, waiting for '{}'",
                        detach.event
                    );
                }
            }
        }

        fired.await.map_err(|_| FullscreenError::Abandoned)
    }
}

fn reject<H: HostDocument + 'static>(
    detach: &Detach<H>,
    fired: &mut oneshot::Receiver<()>,
    reason: HostError,
) -> Result<(), FullscreenError> {
    if let Ok(Some(())) = fired.try_recv() {
        log::debug!(
            "[Fullscreen] '{}' already fired, ignoring late host failure: {}",
            detach.event,
            reason
        );
        return Ok(());
    }
    detach.run();
    Err(FullscreenError::Rejected(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::variants::STANDARD;
    use crate::host::ScriptedDocument;
    use futures::poll;

    const CHANGE: &str = "fullscreenchange";

    #[test]
    fn test_arm_registers_exactly_one_listener() {
        let host = Rc::new(ScriptedDocument::with_variant(&STANDARD));
        let completion = Completion::arm(&host, CHANGE);
        assert_eq!(host.listener_count(CHANGE), 1);

        completion.detach.run();
        assert_eq!(host.listener_count(CHANGE), 0);
    }

    #[test]
    fn test_listener_removes_itself_on_first_event() {
        let host = Rc::new(ScriptedDocument::with_variant(&STANDARD));
        let _completion = Completion::arm(&host, CHANGE);

        host.fire(CHANGE);
        assert_eq!(host.listener_count(CHANGE), 0);
        // a second event has nothing left to hit
        host.fire(CHANGE);
    }

    #[tokio::test]
    async fn test_completed_call_waits_for_event() {
        let host = Rc::new(ScriptedDocument::with_variant(&STANDARD));
        let completion = Completion::arm(&host, CHANGE);

        let mut waiting = Box::pin(completion.settle(Ok(HostCall::Completed)));
        assert!(poll!(waiting.as_mut()).is_pending());

        host.fire(CHANGE);
        assert_eq!(waiting.await, Ok(()));
    }

    #[tokio::test]
    async fn test_sync_failure_detaches() {
        let host = Rc::new(ScriptedDocument::with_variant(&STANDARD));
        let completion = Completion::arm(&host, CHANGE);

        let result = completion
            .settle(Err(HostError::type_error("not a function")))
            .await;
        assert_eq!(
            result,
            Err(FullscreenError::Rejected(HostError::type_error("not a function")))
        );
        assert_eq!(host.listener_count(CHANGE), 0);
    }

    #[tokio::test]
    async fn test_dropped_listener_abandons() {
        let host = Rc::new(ScriptedDocument::with_variant(&STANDARD));
        let completion = Completion::arm(&host, CHANGE);

        let mut waiting = Box::pin(completion.settle(Ok(HostCall::Completed)));
        assert!(poll!(waiting.as_mut()).is_pending());

        host.clear_listeners();
        assert_eq!(waiting.await, Err(FullscreenError::Abandoned));
    }

    #[tokio::test]
    async fn test_change_inside_throwing_call_wins() {
        let host = Rc::new(ScriptedDocument::with_variant(&STANDARD));
        let completion = Completion::arm(&host, CHANGE);

        host.fire(CHANGE);
        let result = completion
            .settle(Err(HostError::type_error("thrown after the change")))
            .await;
        assert_eq!(result, Ok(()));
        assert_eq!(host.listener_count(CHANGE), 0);
    }
}
