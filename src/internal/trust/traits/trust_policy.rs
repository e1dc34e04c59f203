//! 信任策略 trait：证书信任判定 + 主机名校验。

use std::fmt::Debug;

use rustls::DistinguishedName;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};

/// HTTPS 连接的信任策略。
///
/// 建立连接时由 [`PolicyVerifier`](crate::trust::PolicyVerifier) 调用：
/// 先 [`check_server_trusted`](Self::check_server_trusted)，再 [`verify_hostname`](Self::verify_hostname)，
/// 两者都通过才继续握手。握手签名本身仍由加密库校验，策略只负责“信不信这张证书”。
///
/// 传输引擎只依赖本 trait，替换策略不需要改动下载逻辑。
pub trait TrustPolicy: Send + Sync + Debug {
    /// 判定服务端证书链是否可信；返回 `Err` 则握手失败。
    fn check_server_trusted(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        now: UnixTime,
    ) -> Result<(), rustls::Error>;

    /// 主机名校验；返回 `false` 则握手失败。
    fn verify_hostname(&self, hostname: &str) -> bool;

    /// 本策略接受的签发者列表，默认为空。
    fn accepted_issuers(&self) -> Vec<DistinguishedName> {
        Vec::new()
    }
}
