use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn send_message(&self, content: &str) -> AppResult<()>;
}
