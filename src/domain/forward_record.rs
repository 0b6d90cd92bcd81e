/// 転送対象レコード
///
/// SNS通知レコード1件から、転送に必要な値を取り出したビュー。
/// 件名とリージョンは取り出すだけで、転送するペイロードには含めない。
use aws_lambda_events::event::sns::SnsRecord;

use super::TopicArn;

/// SNSレコードから抽出した転送対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardRecord<'a> {
    /// 件名（SNSでは任意項目）
    pub subject: Option<&'a str>,
    /// 転送するメッセージ本文
    pub message: &'a str,
    /// 送信元トピックARN
    pub topic_arn: TopicArn<'a>,
}

impl<'a> ForwardRecord<'a> {
    /// SNSレコードから転送対象を抽出
    pub fn from_sns_record(record: &'a SnsRecord) -> Self {
        Self {
            subject: record.sns.subject.as_deref(),
            message: &record.sns.message,
            topic_arn: TopicArn::new(&record.sns.topic_arn),
        }
    }

    /// 送信元トピックのリージョン
    pub fn region(&self) -> Option<&'a str> {
        self.topic_arn.region()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use aws_lambda_events::event::sns::SnsEvent;
    use serde_json::{json, Value};

    /// テスト用のSNSレコードJSONを作成
    pub fn create_test_sns_record_json(subject: Option<&str>, message: &str, topic_arn: &str) -> Value {
        json!({
            "EventSource": "aws:sns",
            "EventVersion": "1.0",
            "EventSubscriptionArn": format!("{}:2bcfbf39-05c3-41de-beaa-fcfcc21c8f55", topic_arn),
            "Sns": {
                "Type": "Notification",
                "MessageId": "95df01b4-ee98-5cb9-9903-4c221d41eb5e",
                "TopicArn": topic_arn,
                "Subject": subject,
                "Message": message,
                "Timestamp": "2024-01-15T10:30:00.000Z",
                "SignatureVersion": "1",
                "Signature": "EXAMPLE",
                "SigningCertUrl": "https://sns.us-west-2.amazonaws.com/SimpleNotificationService-0000000000000000000000.pem",
                "UnsubscribeUrl": "https://sns.us-west-2.amazonaws.com/?Action=Unsubscribe",
                "MessageAttributes": {}
            }
        })
    }

    /// (件名, 本文, トピックARN) の組からテスト用のSNSイベントを作成
    pub fn create_test_sns_event(records: &[(Option<&str>, &str, &str)]) -> SnsEvent {
        let records: Vec<Value> = records
            .iter()
            .map(|(subject, message, topic_arn)| create_test_sns_record_json(*subject, message, topic_arn))
            .collect();

        serde_json::from_value(json!({ "Records": records })).unwrap()
    }

    #[test]
    fn test_from_sns_record() {
        let event = create_test_sns_event(&[(
            Some("Alarm"),
            r#"{"AlarmName":"cpu-high"}"#,
            "arn:aws:sns:us-west-2:123456789012:topicName",
        )]);

        let record = ForwardRecord::from_sns_record(&event.records[0]);

        assert_eq!(record.subject, Some("Alarm"));
        assert_eq!(record.message, r#"{"AlarmName":"cpu-high"}"#);
        assert_eq!(
            record.topic_arn.as_str(),
            "arn:aws:sns:us-west-2:123456789012:topicName"
        );
        assert_eq!(record.region(), Some("us-west-2"));
    }

    #[test]
    fn test_from_sns_record_without_subject() {
        let event = create_test_sns_event(&[(
            None,
            "plain text",
            "arn:aws:sns:eu-central-1:123456789012:alerts",
        )]);

        let record = ForwardRecord::from_sns_record(&event.records[0]);

        assert_eq!(record.subject, None);
        assert_eq!(record.message, "plain text");
        assert_eq!(record.region(), Some("eu-central-1"));
    }

    #[test]
    fn test_from_sns_record_malformed_arn() {
        let event = create_test_sns_event(&[(None, "hello", "broken")]);

        let record = ForwardRecord::from_sns_record(&event.records[0]);

        assert_eq!(record.message, "hello");
        assert_eq!(record.region(), None);
    }

    #[test]
    fn test_create_test_sns_event_keeps_order() {
        let event = create_test_sns_event(&[
            (None, "first", "arn:aws:sns:us-east-1:123456789012:a"),
            (None, "second", "arn:aws:sns:us-east-1:123456789012:a"),
        ]);

        let messages: Vec<&str> = event
            .records
            .iter()
            .map(|r| ForwardRecord::from_sns_record(r).message)
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
