/// SNSトピックARN
///
/// `arn:aws:sns:<region>:<account-id>:<topic-name>` 形式のコロン区切り識別子。
/// 検証は行わず、フィールドの位置だけで値を取り出す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicArn<'a> {
    raw: &'a str,
}

impl<'a> TopicArn<'a> {
    /// リージョンが格納されているフィールドの位置（0始まり）
    pub const REGION_FIELD: usize = 3;

    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// 元のARN文字列
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// ARNからリージョンを取り出す
    ///
    /// フィールドが足りない場合は`None`
    pub fn region(&self) -> Option<&'a str> {
        self.raw.split(':').nth(Self::REGION_FIELD)
    }
}

impl std::fmt::Display for TopicArn<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.raw)
    }
}
