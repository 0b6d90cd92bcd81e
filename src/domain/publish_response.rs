/// 発行レスポンス
///
/// 転送先トピックへの発行結果をJSONテキストのまま保持する。
/// Lambdaの戻り値としては文字列のまま返し、成否の判定時にだけデコードする。
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// 発行レスポンスのデコードエラー
#[derive(Debug, Error)]
pub enum PublishResponseError {
    /// JSONとして解釈できない、または`code`が無い
    #[error("発行レスポンスをデコードできません: {0}")]
    Decode(#[from] serde_json::Error),
    /// 失敗レスポンスに`info`が無い
    #[error("失敗レスポンスにinfoがありません (code: {0})")]
    MissingInfo(Value),
}

/// 発行呼び出しの生レスポンス（JSONテキスト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishResponse(String);

impl PublishResponse {
    /// 生のレスポンステキストから作成
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// 成功レスポンスを作成
    pub fn success(message_id: &str, sequence_number: Option<&str>) -> Self {
        let mut body = json!({
            "code": PublishStatus::SUCCESS_CODE,
            "info": "OK",
            "message_id": message_id,
        });
        if let Some(seq) = sequence_number {
            body["sequence_number"] = Value::from(seq);
        }
        Self(body.to_string())
    }

    /// 失敗レスポンスを作成
    pub fn failure(code: u16, info: impl std::fmt::Display) -> Self {
        Self(
            json!({
                "code": code,
                "info": info.to_string(),
            })
            .to_string(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// レスポンスをデコードして`code`/`info`を取り出す
    pub fn status(&self) -> Result<PublishStatus, PublishResponseError> {
        Ok(serde_json::from_str(&self.0)?)
    }
}

impl std::fmt::Display for PublishResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// デコード済みの発行ステータス
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublishStatus {
    /// HTTP形式のステータスコード
    pub code: Value,
    /// 診断情報
    #[serde(default)]
    pub info: Option<Value>,
}

impl PublishStatus {
    pub const SUCCESS_CODE: u64 = 200;

    /// 数値として200に等しければ成功（`200.0`も成功）
    pub fn is_success(&self) -> bool {
        self.code.as_f64() == Some(Self::SUCCESS_CODE as f64)
    }

    /// 診断情報を文字列で取得
    ///
    /// 文字列はそのまま、それ以外はJSON表現で返す。
    /// `info`が無い場合はエラー
    pub fn info(&self) -> Result<String, PublishResponseError> {
        match &self.info {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(PublishResponseError::MissingInfo(self.code.clone())),
        }
    }
}
