use tokio::signal::unix::{signal, Signal, SignalKind};

/// Listens on any number of unix signals and reports whichever fires
/// first.
#[derive(Default)]
pub struct SignalHandler {
    signals: Vec<(SignalKind, Signal)>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signal(mut self, kind: SignalKind) -> Self {
        self.signals
            .push((kind, signal(kind).expect("failed to create signal")));
        self
    }

    /// Waits for the next registered signal. Pends forever when no signals
    /// are registered.
    pub async fn recv(&mut self) -> SignalKind {
        if self.signals.is_empty() {
            return futures_util::future::pending().await;
        }

        let futures = self
            .signals
            .iter_mut()
            .map(|(kind, signal)| {
                let kind = *kind;
                Box::pin(async move {
                    signal.recv().await;
                    kind
                })
            })
            .collect::<Vec<_>>();

        let (kind, _, _) = futures_util::future::select_all(futures).await;

        kind
    }
}
