//! Address resolution, including the legacy payment-request path.

use super::ResolveError;
use payflow_bip70::{Bip70Service, UNMARSHAL_FAILURE_SIGNATURE};
use payflow_types::{PaymentRequest, PaymentUri};
use tracing::{info, warn};

/// Resolves a URI that carries a legacy payment-request URL.
///
/// The fetched request supersedes the URI's own fields. A fetch failure
/// carrying the unmarshal signature means the request expired and ends the
/// attempt; any other failure degrades to a direct send against the URI's
/// own address when one is present. The expiry check always wins over the
/// fallback.
pub async fn resolve_via_payment_request(
	payment_requests: &Bip70Service,
	url: &str,
	uri: &PaymentUri,
) -> Result<PaymentRequest, ResolveError> {
	match payment_requests.fetch_payment_request(url).await {
		Ok(fetched) => Ok(PaymentRequest::to_address(fetched)),
		Err(e) if e.to_string().contains(UNMARSHAL_FAILURE_SIGNATURE) => {
			info!(url, "legacy payment request expired");
			Err(ResolveError::ExpiredInvoice)
		},
		Err(e) if uri.has_address() => {
			warn!(url, error = %e, "payment request fetch failed, falling back to direct address");
			Ok(PaymentRequest::to_address(uri.clone()))
		},
		Err(e) => {
			warn!(url, error = %e, "payment request fetch failed with no address to fall back to");
			Err(ResolveError::InvalidAddress)
		},
	}
}

/// Resolves a URI without a payment-request URL. No network call.
pub fn resolve_direct(uri: &PaymentUri) -> PaymentRequest {
	PaymentRequest::to_address(uri.clone())
}

#[cfg(test)]
mod tests {
	use super::*;
	use payflow_bip70::{Bip70Error, MockBip70Interface};
	use rust_decimal::Decimal;

	const REQUEST_URL: &str = "https://pay.example.com/r/abc";

	fn create_test_uri() -> PaymentUri {
		PaymentUri {
			address: Some("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq".to_string()),
			payment_request_url: Some(REQUEST_URL.to_string()),
			..Default::default()
		}
	}

	fn service_with(mock: MockBip70Interface) -> Bip70Service {
		Bip70Service::new(Box::new(mock))
	}

	#[tokio::test]
	async fn test_fetched_request_supersedes_uri() {
		let mut mock = MockBip70Interface::new();
		mock.expect_fetch_payment_request()
			.times(1)
			.returning(|_| {
				Box::pin(async move {
					Ok(PaymentUri {
						address: Some("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4".to_string()),
						amount: Some(Decimal::new(5, 3)),
						..Default::default()
					})
				})
			});

		let uri = create_test_uri();
		let request = resolve_via_payment_request(&service_with(mock), REQUEST_URL, &uri)
			.await
			.unwrap();
		// The fetched address wins over the URI's own.
		assert_eq!(request.destination(), "bc1qw...8f3t4");
		assert!(request.preset_amount().is_some());
	}

	#[tokio::test]
	async fn test_unmarshal_failure_means_expired_even_with_address() {
		let mut mock = MockBip70Interface::new();
		mock.expect_fetch_payment_request()
			.times(1)
			.returning(|_| {
				Box::pin(async move { Err(Bip70Error::Unmarshal("trailing bytes".to_string())) })
			});

		let uri = create_test_uri();
		assert!(uri.has_address());
		let err = resolve_via_payment_request(&service_with(mock), REQUEST_URL, &uri)
			.await
			.unwrap_err();
		assert!(matches!(err, ResolveError::ExpiredInvoice));
	}

	#[tokio::test]
	async fn test_other_failure_falls_back_to_uri_address() {
		let mut mock = MockBip70Interface::new();
		mock.expect_fetch_payment_request()
			.times(1)
			.returning(|_| {
				Box::pin(async move { Err(Bip70Error::Network("connection reset".to_string())) })
			});

		let uri = create_test_uri();
		let request = resolve_via_payment_request(&service_with(mock), REQUEST_URL, &uri)
			.await
			.unwrap();
		assert_eq!(request.destination(), "bc1qa...f5mdq");
	}

	#[tokio::test]
	async fn test_other_failure_without_address_is_invalid() {
		let mut mock = MockBip70Interface::new();
		mock.expect_fetch_payment_request()
			.times(1)
			.returning(|_| Box::pin(async move { Err(Bip70Error::Status(503)) }));

		let mut uri = create_test_uri();
		uri.address = None;
		let err = resolve_via_payment_request(&service_with(mock), REQUEST_URL, &uri)
			.await
			.unwrap_err();
		assert!(matches!(err, ResolveError::InvalidAddress));
	}

	#[test]
	fn test_direct_resolution_uses_uri_as_is() {
		let mut uri = create_test_uri();
		uri.payment_request_url = None;
		let request = resolve_direct(&uri);
		assert_eq!(request.destination(), "bc1qa...f5mdq");
	}
}
