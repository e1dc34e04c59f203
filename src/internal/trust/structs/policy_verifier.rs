//! 把 [`TrustPolicy`] 接到 rustls 的证书校验接口上，并安装到 reqwest 客户端。

use std::fmt;
use std::sync::Arc;

use reqwest::ClientBuilder;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{CryptoProvider, verify_tls12_signature, verify_tls13_signature};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, SignatureScheme};

use crate::internal::transfer::structs::DownloadError;
use crate::internal::trust::traits::TrustPolicy;

/// rustls 证书校验适配器：证书链与主机名交给策略判定，握手签名仍按加密提供方校验。
pub struct PolicyVerifier {
    policy: Arc<dyn TrustPolicy>,
    provider: Arc<CryptoProvider>,
}

impl PolicyVerifier {
    pub fn new(policy: Arc<dyn TrustPolicy>, provider: Arc<CryptoProvider>) -> Self {
        Self { policy, provider }
    }
}

impl fmt::Debug for PolicyVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyVerifier")
            .field("policy", &self.policy)
            .finish()
    }
}

impl ServerCertVerifier for PolicyVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        self.policy
            .check_server_trusted(end_entity, intermediates, server_name, now)?;

        let hostname = server_name.to_str();
        if !self.policy.verify_hostname(&hostname) {
            return Err(rustls::Error::General(format!(
                "主机名未通过校验: {hostname}"
            )));
        }

        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// 把信任策略安装到本次连接使用的客户端上（只作用于这个客户端，不影响进程内其他连接）。
pub fn install_trust_policy(
    builder: ClientBuilder,
    policy: Arc<dyn TrustPolicy>,
) -> Result<ClientBuilder, DownloadError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let verifier = PolicyVerifier::new(policy, Arc::clone(&provider));

    let tls_config = rustls::ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| DownloadError::TlsSetup(e.to_string()))?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(verifier))
        .with_no_client_auth();

    Ok(builder.use_preconfigured_tls(tls_config))
}
