use crate::domain::model::CompletionRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 上游聊天補全服務；回傳第一個選項的文字內容
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// 實際使用的模型名稱
    fn model(&self) -> &str;
}
