use crate::domain::ports::FrameScheduler;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// 約 60 fps
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Cancels an [`IntervalScheduler`] from another task (e.g. a Ctrl-C handler).
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // 接收端已經結束時不需處理
        let _ = self.tx.send(true);
    }
}

/// Frame scheduler backed by a tokio interval.
pub struct IntervalScheduler {
    interval: Interval,
    cancelled: watch::Receiver<bool>,
}

impl IntervalScheduler {
    pub fn new(period: Duration) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let mut interval = interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        (
            Self {
                interval,
                cancelled: rx,
            },
            CancelHandle { tx },
        )
    }

    fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }
}

#[async_trait]
impl FrameScheduler for IntervalScheduler {
    async fn next_frame(&mut self) -> bool {
        if self.is_cancelled() {
            return false;
        }

        let sender_alive = tokio::select! {
            biased;
            changed = self.cancelled.changed() => changed.is_ok(),
            _ = self.interval.tick() => true,
        };
        // 傳送端被丟棄視為不會再取消，照常等下一格
        if !sender_alive {
            self.interval.tick().await;
        }

        !self.is_cancelled()
    }
}
