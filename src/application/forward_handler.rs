/// 転送ハンドラー
///
/// SNS通知の各レコードからメッセージを取り出し、転送先SNSトピックへ発行する。
/// 発行レスポンスは毎回上書きし、最後の1件だけを判定して返す。
use aws_lambda_events::event::sns::SnsEvent;
use lambda_runtime::Context;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::{ForwardRecord, PublishResponse, PublishResponseError};
use crate::infrastructure::{ForwardConfig, ForwardConfigError, SnsOps, SnsOpsError};

/// 転送ハンドラーのエラー型
#[derive(Debug, Error)]
pub enum ForwardHandlerError {
    /// 転送先トピックARNが設定されていない
    #[error("転送先設定エラー: {0}")]
    ConfigurationMissing(#[from] ForwardConfigError),
    /// SNSからレスポンスが得られなかった
    #[error("SNS発行エラー: {0}")]
    PublishTransport(#[from] SnsOpsError),
    /// 最後の発行レスポンスを解釈できない
    #[error("発行レスポンス不正: {0}")]
    MalformedUpstreamResponse(#[from] PublishResponseError),
    /// レコードが1件も無い
    #[error("SNSイベントにレコードがありません")]
    EmptyEvent,
}

/// SNS通知を転送先トピックへ転送するハンドラー
pub struct ForwardHandler<S>
where
    S: SnsOps,
{
    /// 転送設定
    config: ForwardConfig,
    /// SNS操作
    sns_ops: S,
}

impl<S> ForwardHandler<S>
where
    S: SnsOps,
{
    /// 新しいForwardHandlerを作成
    pub fn new(config: ForwardConfig, sns_ops: S) -> Self {
        Self { config, sns_ops }
    }

    /// ペイロードを転送先トピックへ発行する
    ///
    /// 転送先ARNは呼び出しごとに設定から取得する。
    ///
    /// # 戻り値
    /// * `Ok(PublishResponse)` - SNSの生レスポンス（加工しない）
    /// * `Err(ForwardHandlerError::ConfigurationMissing)` - 転送先未設定（発行しない）
    /// * `Err(ForwardHandlerError::PublishTransport)` - レスポンスが得られなかった
    pub async fn publish(&self, payload: &str) -> Result<PublishResponse, ForwardHandlerError> {
        let topic_arn = self.config.destination_topic_arn()?;
        Ok(self.sns_ops.publish(topic_arn, payload).await?)
    }

    /// SNSイベントを処理する
    ///
    /// # 処理フロー
    /// 1. LOG_EVENTSが有効ならイベント全体をログ出力
    /// 2. レコードを受信順に処理し、各メッセージを発行
    /// 3. 最後の発行レスポンスのcodeが200以外ならエラーログを出力（処理は継続）
    /// 4. 最後の発行レスポンスをそのまま返す
    ///
    /// 件名とリージョンは抽出してログに残すだけで、発行内容には含めない。
    pub async fn handle(
        &self,
        event: &SnsEvent,
        context: &Context,
    ) -> Result<PublishResponse, ForwardHandlerError> {
        if self.config.log_events() {
            info!(event = %serialize_event(event), "Event logging enabled");
        }

        let mut response = None;

        for (index, sns_record) in event.records.iter().enumerate() {
            let record = ForwardRecord::from_sns_record(sns_record);
            let region = record.region();

            if region.is_none() {
                warn!(
                    index = index,
                    topic_arn = %record.topic_arn,
                    "トピックARNからリージョンを取得できません"
                );
            }

            debug!(
                index = index,
                subject = record.subject.unwrap_or("(no subject)"),
                region = region.unwrap_or("(unknown)"),
                message_length = record.message.len(),
                "SNSレコードを転送"
            );

            // 前回のレスポンスは上書きする
            response = Some(self.publish(record.message).await?);
        }

        let response = response.ok_or(ForwardHandlerError::EmptyEvent)?;

        let status = response.status()?;
        if !status.is_success() {
            let info = status.info()?;
            error!(
                info = %info,
                event = %serialize_event(event),
                request_id = %context.request_id,
                invoked_function_arn = %context.invoked_function_arn,
                deadline = context.deadline,
                "Error: received status `{}`",
                info
            );
        }

        Ok(response)
    }
}

fn serialize_event(event: &SnsEvent) -> String {
    serialize_for_log(event)
}

/// ログ出力用にJSON文字列化する（失敗した場合はエラー内容を残す）
fn serialize_for_log<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}
