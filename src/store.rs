//! 快照的狀態機與定時更新。
//!
//! [`SnapshotStore`] 是整個系統唯一有狀態、由時間驅動的元件：
//! 啟動時立即抓取一次，之後依固定間隔更新；更新成功就整份替換快照並重算
//! 統計，失敗時若已有成功過的快照則沿用舊資料並附上錯誤旗標，不清空畫面。
//!
//! 更新不會重疊：抓取在途時的計時器觸發或 [`SnapshotStore::refresh_now`]
//! 都是 no-op。`stop()` 之後才送達的抓取結果一律作廢，不再改動狀態。
//!
//! 讀取端以 `RwLock` 降級處理：讀鎖失敗時回傳安全預設值，不 panic。

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex, RwLock,
};
use std::time::Duration;

use tokio::{task::JoinHandle, time};

use crate::{
    analysis,
    crawler::QuoteFeed,
    declare::{Analysis, FetchState, Snapshot},
    logging,
};

/// 預設的快照更新間隔
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// 讀取端看到的完整看板狀態
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub fetch: FetchState,
    /// 由目前快照推導出的統計；快照被丟棄時一併清除
    pub analysis: Option<Analysis>,
}

impl BoardState {
    fn initial() -> Self {
        BoardState {
            fetch: FetchState::Loading { last_good: None },
            analysis: None,
        }
    }
}

pub struct SnapshotStore {
    inner: Arc<Inner>,
    /// 定時任務的 handle，stop() 時取出並 abort
    timer: Mutex<Option<JoinHandle<()>>>,
}

struct Inner {
    feed: Arc<dyn QuoteFeed>,
    interval: Duration,
    state: RwLock<BoardState>,
    /// 更新中旗標，用來略過重疊的抓取
    in_flight: AtomicBool,
    /// 世代計數；stop() 會遞增，讓仍在途的抓取結果作廢
    epoch: AtomicU64,
}

impl SnapshotStore {
    pub fn new(feed: Arc<dyn QuoteFeed>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            DEFAULT_REFRESH_INTERVAL
        } else {
            interval
        };

        SnapshotStore {
            inner: Arc::new(Inner {
                feed,
                interval,
                state: RwLock::new(BoardState::initial()),
                in_flight: AtomicBool::new(false),
                epoch: AtomicU64::new(0),
            }),
            timer: Mutex::new(None),
        }
    }

    /// 啟動定時更新，啟動時立即抓取一次；已啟動時重複呼叫為 no-op。
    pub fn start(&self) {
        let mut timer = match self.timer.lock() {
            Ok(guard) => guard,
            Err(why) => {
                logging::error_file_async(format!("Failed to lock timer because {:?}", why));
                return;
            }
        };

        if timer.is_some() {
            return;
        }

        let inner = Arc::clone(&self.inner);
        *timer = Some(tokio::spawn(async move {
            let mut ticker = time::interval(inner.interval);
            // 趕不上的 tick 不補抓，往後順延即可
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                inner.refresh().await;
            }
        }));
    }

    /// 停止定時更新並作廢在途的抓取；可重複呼叫。
    pub fn stop(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);

        if let Ok(mut timer) = self.timer.lock() {
            if let Some(handle) = timer.take() {
                handle.abort();
            }
        }
    }

    /// 立即更新一次；已有抓取在途時不重複送出請求。
    pub async fn refresh_now(&self) {
        self.inner.refresh().await;
    }

    /// 目前的看板狀態
    pub fn current(&self) -> BoardState {
        self.inner.current()
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .map(|timer| timer.is_some())
            .unwrap_or(false)
    }
}

impl Inner {
    async fn refresh(&self) {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            // 已有抓取在途，這一次略過（不排隊）
            return;
        }

        let _reset = scopeguard::guard((), |_| {
            self.in_flight.store(false, Ordering::SeqCst);
        });

        let epoch = self.epoch.load(Ordering::SeqCst);
        self.enter_loading();

        let result = self.feed.fetch_snapshot().await;

        // stop() 之後送達的回應不得再改動狀態
        if self.epoch.load(Ordering::SeqCst) != epoch {
            return;
        }

        match result {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(why) => self.apply_failure(why.to_string()),
        }
    }

    /// 進入載入狀態，已有成功快照時保留供顯示
    fn enter_loading(&self) {
        if let Ok(mut state) = self.state.write() {
            let previous = std::mem::replace(
                &mut state.fetch,
                FetchState::Loading { last_good: None },
            );

            state.fetch = match previous {
                FetchState::Ready { snapshot, .. } => FetchState::Loading {
                    last_good: Some(snapshot),
                },
                FetchState::Loading { last_good } => FetchState::Loading { last_good },
                FetchState::Failed { .. } => FetchState::Loading { last_good: None },
            };
        }
    }

    /// 以新快照整份替換並重算統計
    fn apply_snapshot(&self, snapshot: Snapshot) {
        let analysis = analysis::analyze(&snapshot);

        logging::debug_file_async(format!("Snapshot refreshed, {} quotes", snapshot.len()));

        if let Ok(mut state) = self.state.write() {
            state.analysis = analysis;
            state.fetch = FetchState::Ready {
                snapshot,
                stale_error: None,
            };
        }
    }

    fn apply_failure(&self, reason: String) {
        logging::error_file_async(format!("Failed to refresh snapshot because {}", reason));

        if let Ok(mut state) = self.state.write() {
            let previous = std::mem::replace(
                &mut state.fetch,
                FetchState::Loading { last_good: None },
            );

            state.fetch = match previous {
                // 已有成功快照時沿用舊資料，錯誤以旗標呈現
                FetchState::Ready { snapshot, .. }
                | FetchState::Loading {
                    last_good: Some(snapshot),
                } => FetchState::Ready {
                    snapshot,
                    stale_error: Some(reason),
                },
                _ => {
                    state.analysis = None;
                    FetchState::Failed { reason }
                }
            };
        }
    }

    fn current(&self) -> BoardState {
        self.state
            .read()
            .map(|state| state.clone())
            .unwrap_or_else(|_| BoardState::initial())
    }
}
