use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Paces the draw animation one frame at a time.
///
/// `next_frame` resolves when the next frame is due and returns `false` once
/// the animation has been cancelled. Implementations must never report a
/// frame after cancellation.
#[async_trait]
pub trait FrameScheduler: Send {
    async fn next_frame(&mut self) -> bool;
}
