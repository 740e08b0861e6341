/// Errors from the Mercado Pago REST layer.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Mercado Pago returned a non-2xx status code.
    #[error("Mercado Pago API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}
