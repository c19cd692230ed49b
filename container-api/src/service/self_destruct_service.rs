// src/service/self_destruct_service.rs

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::{SelfDestructConfig, Termination};

/// 自己削除の実行結果
#[derive(Debug, Default)]
pub struct PurgeReport {
    pub removed: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    pub directory_removed: bool,
}

/// 削除成功後にサービス自身のファイルを消してプロセスを終了させる
///
/// 遅延タスクは一度だけスケジュールされる。graceful 終了の場合は
/// シャットダウントークンをキャンセルし、処理中のレスポンスは送信されてから閉じられる。
pub struct SelfDestructService {
    config: SelfDestructConfig,
    shutdown: CancellationToken,
    scheduled: AtomicBool,
}

impl SelfDestructService {
    pub fn new(config: SelfDestructConfig, shutdown: CancellationToken) -> Self {
        Self {
            config,
            shutdown,
            scheduled: AtomicBool::new(false),
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled.load(Ordering::SeqCst)
    }

    /// 遅延タスクを登録する。今回の呼び出しで登録した場合のみ true
    pub fn schedule(self: &Arc<Self>) -> bool {
        if !self.config.enabled {
            return false;
        }
        if self.scheduled.swap(true, Ordering::SeqCst) {
            return false;
        }

        info!(
            delay_secs = self.config.delay.as_secs(),
            termination = ?self.config.termination,
            "Self-destruct scheduled"
        );

        let this = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(this.config.delay).await;
            this.run().await;
        });

        true
    }

    async fn run(&self) {
        let report = self.purge().await;

        info!(
            removed = report.removed.len(),
            missing = report.missing.len(),
            failed = report.failed.len(),
            directory_removed = report.directory_removed,
            "Self-destruct cleanup finished"
        );

        self.terminate();
    }

    /// 所有ファイルを削除し、設定があればディレクトリも削除する
    ///
    /// 個々の失敗はログに残して処理を続ける。
    pub async fn purge(&self) -> PurgeReport {
        let mut report = PurgeReport::default();

        for path in self.config.resolved_files() {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    info!(path = %path.display(), "Removed owned file");
                    report.removed.push(path);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    report.missing.push(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove owned file");
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        if self.config.remove_directory {
            let dir = &self.config.directory;
            match tokio::fs::remove_dir_all(dir).await {
                Ok(()) => {
                    info!(path = %dir.display(), "Removed service directory");
                    report.directory_removed = true;
                }
                Err(e) => {
                    warn!(path = %dir.display(), error = %e, "Failed to remove service directory");
                    report.failed.push((dir.clone(), e.to_string()));
                }
            }
        }

        report
    }

    fn terminate(&self) {
        match self.config.termination {
            Termination::Graceful => {
                info!("Requesting graceful shutdown");
                self.shutdown.cancel();
            }
            Termination::Abrupt => {
                warn!("Exiting process immediately");
                std::process::exit(0);
            }
        }
    }
}
