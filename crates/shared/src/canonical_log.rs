//! # Canonical Log Line ミドルウェア
//!
//! 1 リクエストにつき 1 行、完了サマリを出力する tower Layer。
//! 行は `log.type = "canonical"` で識別でき、JSON ログから Todo API の
//! 操作をそのまま集計できる。
//!
//! | フィールド | 内容 |
//! |-----------|------|
//! | `http.method` | HTTP メソッド |
//! | `http.path` | リクエストパス（クエリを除く） |
//! | `http.status_code` | レスポンスステータス（エラー時は無し） |
//! | `http.latency_ms` | 処理時間（ミリ秒） |
//! | `request_id` | `x-request-id` ヘッダの値（無ければ `-`） |
//!
//! レベルは 2xx〜4xx が INFO、5xx が WARN、Service 自体のエラーが ERROR。
//! `/health` 系のパスはプローブが高頻度で呼ぶため出力しない。
//!
//! ```text
//! SetRequestIdLayer → TraceLayer → CanonicalLogLineLayer → handler
//! ```

use std::{
   fmt::Display,
   future::Future,
   pin::Pin,
   task::{Context, Poll},
   time::Instant,
};

use http::{Method, Request, Response, StatusCode};
use tower::{Layer, Service};

use crate::observability::REQUEST_ID_HEADER;

/// Canonical Log Line を出力する Layer
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
   type Service = CanonicalLogLineService<S>;

   fn layer(&self, inner: S) -> Self::Service {
      CanonicalLogLineService { inner }
   }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
   inner: S,
}

/// 1 リクエスト分のサマリ
///
/// リクエスト受信時に作成し、レスポンス確定時に 1 度だけ出力する。
struct RequestSummary {
   method:     Method,
   path:       String,
   request_id: String,
   started:    Instant,
}

impl RequestSummary {
   /// ログ対象外のパスでは `None`
   fn start<B>(req: &Request<B>) -> Option<Self> {
      let path = req.uri().path();
      if path.starts_with("/health") {
         return None;
      }

      let request_id = req
         .headers()
         .get(REQUEST_ID_HEADER)
         .and_then(|v| v.to_str().ok())
         .unwrap_or("-");

      Some(Self {
         method:     req.method().clone(),
         path:       path.to_owned(),
         request_id: request_id.to_owned(),
         started:    Instant::now(),
      })
   }

   fn latency_ms(&self) -> u64 {
      u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
   }

   fn completed(self, status: StatusCode) {
      let latency_ms = self.latency_ms();
      if status.is_server_error() {
         tracing::warn!(
            log.r#type = "canonical",
            http.method = %self.method,
            http.path = %self.path,
            http.status_code = status.as_u16(),
            http.latency_ms = latency_ms,
            request_id = %self.request_id,
            "リクエスト完了（サーバーエラー）"
         );
      } else {
         tracing::info!(
            log.r#type = "canonical",
            http.method = %self.method,
            http.path = %self.path,
            http.status_code = status.as_u16(),
            http.latency_ms = latency_ms,
            request_id = %self.request_id,
            "リクエスト完了"
         );
      }
   }

   fn failed(self, error: &dyn Display) {
      tracing::error!(
         log.r#type = "canonical",
         http.method = %self.method,
         http.path = %self.path,
         http.latency_ms = self.latency_ms(),
         request_id = %self.request_id,
         error.message = %error,
         "リクエスト処理エラー"
      );
   }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
   S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
   S::Future: Send + 'static,
   S::Error: Display + 'static,
   ReqBody: Send + 'static,
   ResBody: Send + 'static,
{
   type Error = S::Error;
   type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
   type Response = S::Response;

   fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
      self.inner.poll_ready(cx)
   }

   fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
      // poll_ready 済みの inner を使い、self には未準備のクローンを残す
      let clone = self.inner.clone();
      let mut inner = std::mem::replace(&mut self.inner, clone);

      let summary = RequestSummary::start(&req);

      Box::pin(async move {
         let result = inner.call(req).await;

         if let Some(summary) = summary {
            match &result {
               Ok(response) => summary.completed(response.status()),
               Err(err) => summary.failed(err),
            }
         }

         result
      })
   }
}
