use std::sync::Arc;

use rustls::client::WebPkiServerVerifier;
use rustls::client::danger::ServerCertVerifier;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DistinguishedName, RootCertStore};

use crate::internal::transfer::structs::DownloadError;
use crate::internal::trust::traits::TrustPolicy;

/// 固定根证书的信任策略：证书链必须能追溯到给定的根证书（含 webpki 的域名校验），
/// 可选地再限制允许连接的主机名。
///
/// 适合更新服务器使用私有 CA 签发证书的部署。
#[derive(Debug, Clone)]
pub struct PinnedRootsTrust {
    verifier: Arc<WebPkiServerVerifier>,
    issuers: Vec<DistinguishedName>,
    /// 主机名白名单，`None` 表示不额外限制
    allowed_hosts: Option<Vec<String>>,
}

impl PinnedRootsTrust {
    /// 根证书为空或无法构建校验器时返回 `TlsSetup` 错误。
    pub fn new(roots: RootCertStore) -> Result<Self, DownloadError> {
        let issuers = roots.subjects();
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let verifier = WebPkiServerVerifier::builder_with_provider(Arc::new(roots), provider)
            .build()
            .map_err(|e| DownloadError::TlsSetup(e.to_string()))?;

        Ok(Self {
            verifier,
            issuers,
            allowed_hosts: None,
        })
    }

    /// 只允许连接列表中的主机（大小写不敏感）。
    pub fn with_allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_hosts = Some(
            hosts
                .into_iter()
                .map(|h| h.into().to_ascii_lowercase())
                .collect(),
        );
        self
    }
}

impl TrustPolicy for PinnedRootsTrust {
    fn check_server_trusted(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        now: UnixTime,
    ) -> Result<(), rustls::Error> {
        self.verifier
            .verify_server_cert(end_entity, intermediates, server_name, &[], now)
            .map(|_| ())
    }

    fn verify_hostname(&self, hostname: &str) -> bool {
        match &self.allowed_hosts {
            None => true,
            Some(hosts) => {
                let hostname = hostname.to_ascii_lowercase();
                hosts.iter().any(|h| *h == hostname)
            }
        }
    }

    fn accepted_issuers(&self) -> Vec<DistinguishedName> {
        self.issuers.clone()
    }
}
