//! 建立连接：按配置构建客户端，安装信任策略，发起 GET 请求。

use std::sync::Arc;

use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use url::Url;

use crate::internal::transfer::structs::{DownloadError, TransferConfig};
use crate::internal::trust::structs::install_trust_policy;
use crate::internal::trust::traits::TrustPolicy;

/// 每次下载单独构建客户端，信任策略只作用于本次连接。
pub(super) fn build_client(
    config: &TransferConfig,
    trust_policy: Arc<dyn TrustPolicy>,
) -> Result<Client, DownloadError> {
    let mut headers = HeaderMap::new();
    if config.keep_alive {
        headers.insert(CONNECTION, HeaderValue::from_static("Keep-Alive"));
    }

    let builder = Client::builder()
        .http1_only()
        .default_headers(headers)
        .connect_timeout(config.connect_timeout())
        .read_timeout(config.read_timeout())
        .redirect(Policy::limited(config.max_redirects));

    install_trust_policy(builder, trust_policy)?
        .build()
        .map_err(|e| DownloadError::TlsSetup(e.to_string()))
}

/// 发起请求并检查状态码；非 2xx 视为连接失败。
pub(super) async fn open(client: &Client, url: Url) -> Result<Response, DownloadError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(DownloadError::Connection)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::HttpStatus(status));
    }
    Ok(response)
}
