//! Per-call execution context.

use tokio_util::sync::CancellationToken;

/// Cancellation scope threaded through every repository call.
///
/// Implementations check it before touching the disk; a call that observes
/// cancellation returns `RepoError::Cancelled` without side effects.
#[derive(Debug, Clone)]
pub struct OpContext {
    token: CancellationToken,
}

impl OpContext {
    /// Context that is never cancelled unless `cancel` is called on it.
    pub fn background() -> Self {
        Self::new(CancellationToken::new())
    }

    /// Wraps an existing token, e.g. one owned by a shutdown handler.
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Derives a context that is cancelled with this one but can also be
    /// cancelled on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::OpContext;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn wrapped_token_drives_cancellation() {
        let token = CancellationToken::new();
        let ctx = OpContext::new(token.clone());
        assert!(!ctx.is_cancelled());

        token.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn background_is_not_cancelled() {
        assert!(!OpContext::background().is_cancelled());
    }

    #[test]
    fn cancelling_parent_cancels_child_but_not_the_reverse() {
        let parent = OpContext::background();
        let child = parent.child();
        let sibling = parent.child();

        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
        assert!(!sibling.is_cancelled());

        parent.cancel();
        assert!(sibling.is_cancelled());
    }
}
