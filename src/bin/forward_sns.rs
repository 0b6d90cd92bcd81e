/// SNS転送Lambda関数
///
/// SNSトピックからトリガーされ、各レコードのメッセージを
/// FORWARD_TO_SNS_ARNで指定された転送先トピックへ発行する。
/// 最後の発行レスポンスをそのまま関数の戻り値として返す。
use aws_lambda_events::event::sns::SnsEvent;
use forward_sns::application::ForwardHandler;
use forward_sns::domain::PublishResponse;
use forward_sns::infrastructure::{init_logging, AwsSnsOps, ForwardConfig};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

/// ForwardHandlerの静的インスタンス
///
/// Lambda warm start時にSNSクライアントを再利用するため、
/// コールドスタート時に一度だけ初期化して保持する。
static FORWARD_HANDLER: OnceCell<ForwardHandler<AwsSnsOps>> = OnceCell::const_new();

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    let forward_handler = FORWARD_HANDLER
        .get_or_init(|| async {
            let config = ForwardConfig::from_env();

            match config.destination_topic_arn() {
                Ok(topic_arn) => info!(
                    forward_to_sns_arn = %topic_arn,
                    log_events = config.log_events(),
                    region = config.region(),
                    "転送設定を読み込み"
                ),
                // 呼び出し時にエラーにするため、ここでは警告のみ
                Err(err) => warn!(error = %err, "転送先が設定されていません"),
            }

            let sns_ops = AwsSnsOps::from_region(config.region()).await;
            ForwardHandler::new(config, sns_ops)
        })
        .await;

    // Lambda関数を初期化して実行
    let func = service_fn(move |event: LambdaEvent<SnsEvent>| async move {
        handler(forward_handler, event).await
    });
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// # 処理フロー
/// 1. SNSイベントのレコード数をログ出力
/// 2. ForwardHandlerで全レコードを転送
/// 3. 最後の発行レスポンスを返却
///
/// 転送先の失敗レスポンスはログ出力のみで成功扱い。
/// 設定不足やレスポンス不正はエラーとして返し、呼び出しを失敗させる。
async fn handler(
    forward_handler: &ForwardHandler<AwsSnsOps>,
    event: LambdaEvent<SnsEvent>,
) -> Result<PublishResponse, Error> {
    let (sns_event, context) = event.into_parts();

    info!(
        request_id = %context.request_id,
        record_count = sns_event.records.len(),
        "SNSイベントを受信"
    );

    match forward_handler.handle(&sns_event, &context).await {
        Ok(response) => {
            info!(request_id = %context.request_id, "SNS転送完了");
            Ok(response)
        }
        Err(err) => {
            error!(request_id = %context.request_id, error = %err, "SNS転送失敗");
            Err(err.into())
        }
    }
}
