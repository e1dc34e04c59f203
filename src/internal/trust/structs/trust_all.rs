use rustls::pki_types::{CertificateDer, ServerName, UnixTime};

use crate::internal::trust::traits::TrustPolicy;

/// 默认信任策略：信任任何证书链与任何主机名，不做任何校验。
///
/// 用于自签名或证书无法校验的更新服务器。对安全有要求的部署请换成
/// [`PinnedRootsTrust`](super::PinnedRootsTrust) 或自行实现 [`TrustPolicy`]。
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustAll;

impl TrustPolicy for TrustAll {
    fn check_server_trusted(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _now: UnixTime,
    ) -> Result<(), rustls::Error> {
        Ok(())
    }

    fn verify_hostname(&self, _hostname: &str) -> bool {
        true
    }
}
