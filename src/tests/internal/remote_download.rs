//! 远程下载测试：配置了 `DOWNLOAD_URL` 才跑，否则跳过。

use crate::tests::{RecordingListener, load_remote_url_optional};
use crate::{DownloadController, DownloadRequest};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn download_configured_url() {
    let Some(url) = load_remote_url_optional() else {
        println!("未配置 DOWNLOAD_URL，跳过远程下载测试");
        return;
    };

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("remote.apk");

    let controller = DownloadController::new();
    let (listener, record) = RecordingListener::new();
    let outcome = controller
        .download(DownloadRequest::new(url.clone(), &dest), listener)
        .await
        .unwrap();

    assert!(outcome.succeeded(), "远程下载失败: url={url}, {:?}", outcome);
    assert!(std::fs::metadata(&dest).unwrap().len() > 0);
    assert!(!dir.path().join("apk_temp").exists());

    let record = record.lock().unwrap();
    assert_eq!(record.finishes.len(), 1);
    println!(
        "远程下载完成: {} bytes, 进度回调 {} 次",
        std::fs::metadata(&dest).unwrap().len(),
        record.percents.len() + record.indeterminate.len()
    );
}
