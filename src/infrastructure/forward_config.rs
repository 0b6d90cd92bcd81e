/// 転送Lambda設定
///
/// 環境変数から転送先トピックARN、イベントログ出力フラグ、リージョンを読み込む。
/// 起動時に一度だけ読み込み、ハンドラーに注入する。
use thiserror::Error;

/// 転送設定のエラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardConfigError {
    #[error("環境変数が設定されていません: {0}")]
    MissingEnvVar(String),
}

/// 転送Lambda設定
///
/// 以下の環境変数から読み込む:
/// - FORWARD_TO_SNS_ARN: 転送先SNSトピックARN
/// - LOG_EVENTS: "True"の場合のみ受信イベントをログ出力
/// - AWS_REGION: SNSクライアントのリージョン（デフォルト: us-east-1）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardConfig {
    /// 転送先SNSトピックARN（未設定の場合は発行時にエラー）
    forward_to_sns_arn: Option<String>,
    /// 受信イベントをログ出力するかどうか
    log_events: bool,
    /// リージョン
    region: String,
}

impl ForwardConfig {
    pub const FORWARD_TO_SNS_ARN: &'static str = "FORWARD_TO_SNS_ARN";
    pub const LOG_EVENTS: &'static str = "LOG_EVENTS";
    pub const AWS_REGION: &'static str = "AWS_REGION";
    pub const DEFAULT_REGION: &'static str = "us-east-1";

    /// 環境変数から設定を読み込む
    ///
    /// FORWARD_TO_SNS_ARNが無くてもここでは失敗しない。
    /// 発行時に`destination_topic_arn`がエラーを返す。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let forward_to_sns_arn = lookup(Self::FORWARD_TO_SNS_ARN);

        // 大文字小文字を区別し、"True"のみ有効
        let log_events = lookup(Self::LOG_EVENTS).as_deref() == Some("True");

        let region = lookup(Self::AWS_REGION).unwrap_or_else(|| Self::DEFAULT_REGION.to_string());

        Self {
            forward_to_sns_arn,
            log_events,
            region,
        }
    }

    /// 明示的な値で設定を作成（テスト用）
    pub fn new(forward_to_sns_arn: Option<String>, log_events: bool, region: String) -> Self {
        Self {
            forward_to_sns_arn,
            log_events,
            region,
        }
    }

    /// 転送先SNSトピックARNを取得
    ///
    /// # エラー
    /// FORWARD_TO_SNS_ARNが設定されていない場合
    pub fn destination_topic_arn(&self) -> Result<&str, ForwardConfigError> {
        self.forward_to_sns_arn
            .as_deref()
            .ok_or_else(|| ForwardConfigError::MissingEnvVar(Self::FORWARD_TO_SNS_ARN.to_string()))
    }

    /// 受信イベントをログ出力するかどうか
    pub fn log_events(&self) -> bool {
        self.log_events
    }

    /// リージョンを取得
    pub fn region(&self) -> &str {
        &self.region
    }
}
