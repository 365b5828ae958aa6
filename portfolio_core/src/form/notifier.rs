//! Transient banner notifications with an auto-dismiss timer

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::ui::{FormUi, Notification, NotificationKind, UiSignal};
use crate::util::ScheduledTask;

type DismissHook = Box<dyn FnOnce() + Send + 'static>;

struct ActiveBanner {
    id: Uuid,
    timer: ScheduledTask,
    on_dismiss: DismissHook,
}

/// Shows at most one banner at a time. Whoever removes a banner (its own
/// timer or a newer banner) emits the dismissal and runs its hook, once.
#[derive(Clone)]
pub struct BannerNotifier {
    ui: Arc<dyn FormUi>,
    display_for: Duration,
    current: Arc<Mutex<Option<ActiveBanner>>>,
    shown: Arc<watch::Sender<Option<Uuid>>>,
}

impl BannerNotifier {
    pub fn new(ui: Arc<dyn FormUi>, display_for: Duration) -> Self {
        Self {
            ui,
            display_for,
            current: Arc::new(Mutex::new(None)),
            shown: Arc::new(watch::Sender::new(None)),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn show<F>(&self, text: &str, kind: NotificationKind, on_dismiss: F) -> Uuid
    where
        F: FnOnce() + Send + 'static,
    {
        let notification = Notification::new(text, kind);
        let id = notification.id;

        // Held until the new banner is stored so its timer cannot observe an
        // empty slot.
        let mut slot = self.current.lock();

        let replaced = slot.take();
        if let Some(previous) = &replaced {
            previous.timer.cancel();
            debug!("Banner {} replaced by {}", previous.id, id);
            self.ui.form_signal(UiSignal::BannerDismissed { id: previous.id });
        }

        self.ui.form_signal(UiSignal::BannerShown(notification));

        let ui = self.ui.clone();
        let current = self.current.clone();
        let shown = self.shown.clone();
        let timer = ScheduledTask::after(self.display_for, move || {
            let expired = {
                let mut slot = current.lock();
                match slot.as_ref() {
                    Some(banner) if banner.id == id => slot.take(),
                    _ => None,
                }
            };

            if let Some(banner) = expired {
                debug!("Banner {} dismissed after display window", banner.id);
                ui.form_signal(UiSignal::BannerDismissed { id: banner.id });
                (banner.on_dismiss)();

                let slot = current.lock();
                if slot.is_none() {
                    shown.send_replace(None);
                }
            }
        });

        *slot = Some(ActiveBanner {
            id,
            timer,
            on_dismiss: Box::new(on_dismiss),
        });
        self.shown.send_replace(Some(id));
        drop(slot);

        if let Some(previous) = replaced {
            (previous.on_dismiss)();
        }

        id
    }

    pub fn current(&self) -> Option<Uuid> {
        self.current.lock().as_ref().map(|banner| banner.id)
    }

    /// Resolves once no banner is on screen, immediately if none is.
    pub async fn dismissed(&self) {
        let mut shown = self.shown.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = shown.wait_for(|id| id.is_none()).await;
    }
}
