//! # Clock（時刻プロバイダ）
//!
//! Todo の `created_at` はユースケースが [`Clock`] から取得する。
//! 本番では [`SystemClock`]、テストでは [`ManualClock`] を注入する。

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// システム時刻
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 手動で進める時計
///
/// 精度はマイクロ秒。`advance` するまで同じ時刻を返し続ける。
#[derive(Debug)]
pub struct ManualClock {
   micros: AtomicI64,
}

impl ManualClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self {
         micros: AtomicI64::new(now.timestamp_micros()),
      }
   }

   /// 時刻を `delta` だけ進める
   pub fn advance(&self, delta: Duration) {
      let delta = delta.num_microseconds().unwrap_or(i64::MAX);
      self.micros.fetch_add(delta, Ordering::SeqCst);
   }
}

impl Clock for ManualClock {
   fn now(&self) -> DateTime<Utc> {
      DateTime::from_timestamp_micros(self.micros.load(Ordering::SeqCst)).unwrap_or_default()
   }
}
