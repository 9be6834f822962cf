//! TLS setup shared by the HTTP clients.

/// Installs aws-lc-rs as the process-wide rustls crypto provider.
///
/// Both the GitHub and Twitter clients link rustls, and rustls refuses to
/// choose a provider on its own when more than one backend is compiled in.
/// Repeated calls are no-ops.
pub(crate) fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}
