//! SNS操作モジュール
//!
//! 転送先SNSトピックへのメッセージ発行を提供する。
//! SNSサービスがHTTPレスポンスを返したエラーは失敗レスポンスとして扱い、
//! レスポンス自体が得られなかった場合のみエラーを返す。

use async_trait::async_trait;
use aws_sdk_sns::config::http::HttpResponse;
use aws_sdk_sns::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sns::operation::publish::PublishError;
use aws_sdk_sns::Client as SnsClient;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::PublishResponse;

/// SNS操作のエラー型
#[derive(Debug, Error)]
pub enum SnsOpsError {
    /// SNSからレスポンスが得られなかった（接続失敗、タイムアウト等）
    #[error("AWS SNS APIエラー: {0}")]
    AwsSdkError(String),
}

/// SNS操作トレイト（テスト用の抽象化）
#[async_trait]
pub trait SnsOps: Send + Sync {
    /// メッセージをSNSトピックに発行する
    ///
    /// # 引数
    /// * `topic_arn` - 発行先SNSトピックARN
    /// * `message` - 発行するメッセージ
    ///
    /// # 戻り値
    /// * `Ok(PublishResponse)` - 発行結果（SNSが拒否した場合も含む）
    /// * `Err(SnsOpsError)` - レスポンスが得られなかった
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<PublishResponse, SnsOpsError>;
}

/// 実際のAWS SNS SDKを使用したSNS操作実装
pub struct AwsSnsOps {
    client: SnsClient,
}

impl AwsSnsOps {
    /// 新しいAwsSnsOpsを作成
    pub fn new(client: SnsClient) -> Self {
        Self { client }
    }

    /// 指定リージョンのクライアントを作成
    ///
    /// 認証情報はデフォルトのクレデンシャルチェーンから取得する
    pub async fn from_region(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self::new(SnsClient::new(&config))
    }
}

#[async_trait]
impl SnsOps for AwsSnsOps {
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<PublishResponse, SnsOpsError> {
        info!(
            topic_arn = %topic_arn,
            message_length = message.len(),
            "SNSメッセージ発行開始"
        );

        let result = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await;

        match result {
            Ok(output) => {
                let message_id = output.message_id().unwrap_or("unknown");

                info!(
                    topic_arn = %topic_arn,
                    message_id = %message_id,
                    "SNS Publish成功"
                );

                Ok(PublishResponse::success(message_id, output.sequence_number()))
            }
            Err(err) => {
                let status = err.raw_response().map(|raw| raw.status().as_u16());
                let detail = error_detail(&err);

                warn!(
                    topic_arn = %topic_arn,
                    status = ?status,
                    error = %detail,
                    "SNS Publishエラー"
                );

                response_from_error(status, detail)
            }
        }
    }
}

/// 失敗レスポンスに載せる短いエラー内容
///
/// サービスエラーはエラーコードとメッセージのみ。生のHTTPボディは含めない
fn error_detail(err: &SdkError<PublishError, HttpResponse>) -> String {
    match err.as_service_error() {
        Some(service_err) => service_error_detail(service_err),
        None => DisplayErrorContext(err).to_string(),
    }
}

fn service_error_detail(err: &PublishError) -> String {
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        (Some(code), None) => code.to_string(),
        _ => err.to_string(),
    }
}

/// SDKエラーを発行レスポンスに変換する
///
/// # 引数
/// * `status` - SNSが返したHTTPステータス（レスポンスが無ければ`None`）
/// * `detail` - エラー内容
///
/// # 戻り値
/// * 2xx以外 - そのステータスの失敗レスポンス
/// * 2xx - SDKがレスポンスを解釈できなかったため、502の失敗レスポンス
/// * レスポンスなし - `SnsOpsError::AwsSdkError`
fn response_from_error(status: Option<u16>, detail: String) -> Result<PublishResponse, SnsOpsError> {
    match status {
        Some(code) if !(200..300).contains(&code) => Ok(PublishResponse::failure(code, detail)),
        // 成功ステータスのままだと成功扱いになるため、上流の不正レスポンスとして扱う
        Some(code) => Ok(PublishResponse::failure(
            UNREADABLE_RESPONSE_CODE,
            format!("HTTP {} のレスポンスを解釈できません: {}", code, detail),
        )),
        None => Err(SnsOpsError::AwsSdkError(detail)),
    }
}

/// 2xxだが解釈できなかったレスポンスに付けるコード
const UNREADABLE_RESPONSE_CODE: u16 = 502;
