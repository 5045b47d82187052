//! Transient messages under the add-stock form.

use crate::dom::{Document, Flash, FlashKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Shows flash messages and hides success messages after a fixed window.
///
/// Every message bumps a generation counter. A hide timer only clears the
/// message it was started for, so a newer message is never hidden early.
#[derive(Debug, Clone)]
pub(crate) struct FlashMessages {
    document: Arc<Mutex<Document>>,
    generation: Arc<AtomicU64>,
    display: Duration,
}

impl FlashMessages {
    pub(crate) fn new(document: Arc<Mutex<Document>>, display: Duration) -> Self {
        Self {
            document,
            generation: Arc::new(AtomicU64::new(0)),
            display,
        }
    }

    pub(crate) fn show(&self, flash: Flash) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let auto_hide = flash.kind == FlashKind::Success;
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_flash(Some(flash));

        if auto_hide {
            let document = Arc::clone(&self.document);
            let current = Arc::clone(&self.generation);
            let display = self.display;
            tokio::spawn(async move {
                tokio::time::sleep(display).await;
                let mut doc = document.lock().unwrap_or_else(PoisonError::into_inner);
                if current.load(Ordering::SeqCst) == generation {
                    doc.set_flash(None);
                }
            });
        }
    }

    pub(crate) fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_flash(None);
    }
}
