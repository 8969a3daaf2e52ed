//! The loading orchestrator.
//!
//! One loading attempt per call: select the resolution path from the
//! intent, run it concurrently with fee estimation and account lookup,
//! and deliver exactly one outcome. Starting a new attempt supersedes any
//! attempt still in flight; superseded attempts are dropped mid-flight and
//! deliver nothing.

use crate::classify::{classify, LoadFailure};
use crate::resolve::{self, ResolveError};
use payflow_account::AccountService;
use payflow_bip70::Bip70Service;
use payflow_fees::FeeService;
use payflow_swap::SwapService;
use payflow_types::{Account, FeeInfo, PaymentError, PaymentIntent, PaymentRequest};
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// Everything a payment screen needs once loading succeeds.
#[derive(Debug)]
pub struct LoadedPayment {
	/// Fee-rate options for the transaction.
	pub fee_info: FeeInfo,
	/// The normalized payment descriptor.
	pub payment_request: PaymentRequest,
	/// The account context for the payment.
	pub account: Account,
}

/// Drives payment loading for the wallet.
///
/// Holds the collaborator services and the attempt generation counter.
/// Cheap to share behind an `Arc`; attempts borrow it concurrently.
pub struct PaymentLoader {
	fees: FeeService,
	account: AccountService,
	swaps: SwapService,
	payment_requests: Bip70Service,
	generation: watch::Sender<u64>,
}

impl std::fmt::Debug for PaymentLoader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PaymentLoader").finish_non_exhaustive()
	}
}

impl PaymentLoader {
	/// Creates a new PaymentLoader over the given collaborator services.
	pub fn new(
		fees: FeeService,
		account: AccountService,
		swaps: SwapService,
		payment_requests: Bip70Service,
	) -> Self {
		let (generation, _) = watch::channel(0);
		Self {
			fees,
			account,
			swaps,
			payment_requests,
			generation,
		}
	}

	/// Runs one loading attempt for the intent.
	///
	/// Returns `None` when a newer attempt superseded this one; a
	/// superseded attempt never delivers a result, stale or otherwise.
	///
	/// # Panics
	///
	/// Panics when invoked with an intent this core cannot resolve
	/// (contact, hardware-wallet, LNURL). Routing those elsewhere is the
	/// caller's responsibility, so reaching here with one is a bug, not a
	/// runtime condition to report.
	#[instrument(skip_all)]
	pub async fn load(&self, intent: PaymentIntent) -> Option<Result<LoadedPayment, PaymentError>> {
		let mut attempt = 0;
		self.generation.send_modify(|g| {
			*g += 1;
			attempt = *g;
		});
		let mut superseded = self.generation.subscribe();
		let check = self.generation.subscribe();

		tokio::select! {
			outcome = self.run(&intent) => {
				if *check.borrow() != attempt {
					info!(attempt, "attempt superseded, dropping outcome");
					return None;
				}
				Some(outcome)
			}
			_ = superseded.wait_for(|g| *g != attempt) => {
				info!(attempt, "attempt superseded mid-flight");
				None
			}
		}
	}

	async fn run(&self, intent: &PaymentIntent) -> Result<LoadedPayment, PaymentError> {
		let is_swap = matches!(intent, PaymentIntent::SubmarineSwap(_));

		let joined = tokio::try_join!(
			async { self.fees.estimate(is_swap).await.map_err(LoadFailure::Fee) },
			async {
				self.select_resolution(intent)
					.await
					.map_err(LoadFailure::Resolve)
			},
			async { self.account.lookup().await.map_err(LoadFailure::Account) },
		);

		match joined {
			Ok((fee_info, payment_request, account)) => {
				info!(
					destination = %payment_request.destination(),
					"payment loading finished"
				);
				Ok(LoadedPayment {
					fee_info,
					payment_request,
					account,
				})
			},
			Err(failure) => {
				let error = classify(&failure);
				warn!(%error, ?failure, "payment loading failed");
				Err(error)
			},
		}
	}

	/// Selects and runs the resolution path for the intent.
	async fn select_resolution(
		&self,
		intent: &PaymentIntent,
	) -> Result<PaymentRequest, ResolveError> {
		match intent {
			PaymentIntent::ToAddress(uri) => match uri.request_url() {
				Some(url) => {
					resolve::address::resolve_via_payment_request(&self.payment_requests, url, uri)
						.await
				},
				None => Ok(resolve::address::resolve_direct(uri)),
			},
			PaymentIntent::SubmarineSwap(invoice) => {
				resolve::swap::resolve(&self.swaps, invoice).await
			},
			PaymentIntent::ToContact
			| PaymentIntent::ToHardwareWallet
			| PaymentIntent::FromHardwareWallet
			| PaymentIntent::LnurlWithdraw => {
				panic!("intent {intent:?} must be routed before reaching the resolution core")
			},
		}
	}
}
