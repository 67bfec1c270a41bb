use tokio::sync::oneshot;

/// Title and body of the confirmation currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
}

struct Pending {
    prompt: ConfirmPrompt,
    resp: oneshot::Sender<bool>,
}

/// At most one confirmation dialog at a time.
///
/// Each request is resolved exactly once: by `accept`, by `cancel`, or as
/// declined when a newer request replaces it or the modal is dropped.
#[derive(Default)]
pub struct ConfirmModal {
    pending: Option<Pending>,
}

/// Caller's side of a confirmation request.
#[derive(Debug)]
pub struct ConfirmTicket {
    rx: oneshot::Receiver<bool>,
}

impl ConfirmTicket {
    /// Waits for the user's answer. A request that is dropped unanswered
    /// counts as declined.
    pub async fn outcome(self) -> bool {
        self.rx.await.unwrap_or(false)
    }

    /// Non-blocking check; `None` while still pending.
    pub fn try_outcome(&mut self) -> Option<bool> {
        match self.rx.try_recv() {
            Ok(answer) => Some(answer),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(false),
        }
    }
}

impl ConfirmModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ask(&mut self, title: impl Into<String>, message: impl Into<String>) -> ConfirmTicket {
        if self.resolve(false) {
            tracing::debug!(target: "confirm", "superseded pending confirmation");
        }

        let (tx, rx) = oneshot::channel();
        let prompt = ConfirmPrompt {
            title: title.into(),
            message: message.into(),
        };
        tracing::debug!(target: "confirm", title = %prompt.title, "confirmation requested");
        self.pending = Some(Pending { prompt, resp: tx });
        ConfirmTicket { rx }
    }

    pub fn pending(&self) -> Option<&ConfirmPrompt> {
        self.pending.as_ref().map(|p| &p.prompt)
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns false when nothing was pending.
    pub fn accept(&mut self) -> bool {
        self.resolve(true)
    }

    /// Returns false when nothing was pending.
    pub fn cancel(&mut self) -> bool {
        self.resolve(false)
    }

    fn resolve(&mut self, answer: bool) -> bool {
        match self.pending.take() {
            Some(p) => {
                // The ticket may already be gone; the modal closes either way.
                let _ = p.resp.send(answer);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ConfirmModal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmModal")
            .field("pending", &self.pending())
            .finish()
    }
}
