//! Browser timer for the search debounce.

use std::time::Duration;

use async_trait::async_trait;
use sortbox_sync::Timer;

/// `setTimeout`-backed sleep
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
