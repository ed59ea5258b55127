use crate::domain::offer::Offer;
use crate::domain::phone::PhoneInput;
use crate::domain::ports::{PurchaseService, PurchaseServiceRef, TransactionLogRef};
use crate::domain::purchase::{PurchaseOutcome, PurchasePayload, PurchaseRequest};
use crate::domain::transaction::TransactionRecord;
use crate::error::FlowError;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};

/// The purchase form: the captured offer and both phone fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseForm<'c> {
    pub offer: &'c Offer,
    pub recipient: PhoneInput,
    pub payer: PhoneInput,
}

impl<'c> PurchaseForm<'c> {
    fn new(offer: &'c Offer) -> Self {
        Self {
            offer,
            recipient: PhoneInput::default(),
            payer: PhoneInput::default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.recipient.is_complete() && self.payer.is_complete()
    }

    fn to_request(&self) -> Option<PurchaseRequest<'c>> {
        Some(PurchaseRequest {
            offer: self.offer,
            recipient: self.recipient.to_number()?,
            payer: self.payer.to_number()?,
        })
    }
}

/// Where a single purchase attempt currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState<'c> {
    Idle,
    FormOpen(PurchaseForm<'c>),
    Submitting(PurchaseRequest<'c>),
    /// The result view, showing the outcome until dismissed.
    Resolved(PurchaseOutcome),
}

type Settlement = watch::Receiver<Option<PurchaseOutcome>>;

struct Inner<'c> {
    state: FlowState<'c>,
    /// Set while a submission task runs; filled in once it has been recorded.
    in_flight: Option<Settlement>,
}

impl Inner<'_> {
    /// Moves a finished submission into [`FlowState::Resolved`].
    fn settle(&mut self) {
        let Some(settlement) = &self.in_flight else {
            return;
        };
        let finished = settlement.borrow().clone();
        let outcome = match finished {
            Some(outcome) => outcome,
            // The task went away without reporting back.
            None if settlement.has_changed().is_err() => PurchaseOutcome::transport_failure(),
            None => return,
        };
        self.in_flight = None;
        self.state = FlowState::Resolved(outcome);
    }
}

/// Drives one purchase at a time from offer selection to a recorded outcome.
///
/// The remote call and the log append run together on a spawned task that
/// owns everything it needs, so a submission always runs to completion even if
/// the caller stops waiting for [`PurchaseFlow::submit`]. The flow picks the
/// outcome up on its next operation. While the task runs the flow reports
/// [`FlowState::Submitting`] and refuses a second `submit` with
/// [`FlowError::SubmitInProgress`].
pub struct PurchaseFlow<'c> {
    inner: RwLock<Inner<'c>>,
    service: PurchaseServiceRef,
    log: TransactionLogRef,
    user_id: u64,
}

impl<'c> PurchaseFlow<'c> {
    /// Creates a new, idle `PurchaseFlow`.
    ///
    /// # Arguments
    ///
    /// * `service` - The remote endpoint purchases are sent to.
    /// * `log` - The history every resolved attempt is appended to.
    /// * `user_id` - Account identifier sent with every purchase.
    pub fn new(service: PurchaseServiceRef, log: TransactionLogRef, user_id: u64) -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: FlowState::Idle,
                in_flight: None,
            }),
            service,
            log,
            user_id,
        }
    }

    pub async fn state(&self) -> FlowState<'c> {
        let mut inner = self.inner.write().await;
        inner.settle();
        inner.state.clone()
    }

    /// Opens the purchase form for `offer`, clearing any phone numbers entered before.
    pub async fn open(&self, offer: &'c Offer) -> Result<(), FlowError> {
        let mut inner = self.inner.write().await;
        inner.settle();
        match &inner.state {
            FlowState::Idle | FlowState::FormOpen(_) => {
                inner.state = FlowState::FormOpen(PurchaseForm::new(offer));
                Ok(())
            }
            FlowState::Submitting(_) => Err(FlowError::SubmitInProgress),
            FlowState::Resolved(_) => Err(FlowError::ResultPending),
        }
    }

    pub async fn set_recipient_phone(&self, value: &str) -> Result<(), FlowError> {
        self.edit_form(|form| form.recipient.edit(value)).await
    }

    pub async fn set_payer_phone(&self, value: &str) -> Result<(), FlowError> {
        self.edit_form(|form| form.payer.edit(value)).await
    }

    async fn edit_form<F>(&self, edit: F) -> Result<(), FlowError>
    where
        F: FnOnce(&mut PurchaseForm<'c>) -> Result<(), FlowError>,
    {
        let mut inner = self.inner.write().await;
        inner.settle();
        match &mut inner.state {
            FlowState::FormOpen(form) => edit(form),
            FlowState::Submitting(_) => Err(FlowError::SubmitInProgress),
            FlowState::Idle | FlowState::Resolved(_) => Err(FlowError::FormClosed),
        }
    }

    /// Whether the submit action is currently enabled.
    pub async fn can_submit(&self) -> bool {
        let mut inner = self.inner.write().await;
        inner.settle();
        matches!(&inner.state, FlowState::FormOpen(form) if form.is_complete())
    }

    /// Closes the form without purchasing anything.
    pub async fn cancel(&self) -> Result<(), FlowError> {
        let mut inner = self.inner.write().await;
        inner.settle();
        match &inner.state {
            FlowState::FormOpen(_) => {
                inner.state = FlowState::Idle;
                Ok(())
            }
            FlowState::Submitting(_) => Err(FlowError::SubmitInProgress),
            FlowState::Idle | FlowState::Resolved(_) => Ok(()),
        }
    }

    /// Closes the result view. Does nothing unless a result is showing.
    pub async fn dismiss_result(&self) -> Result<(), FlowError> {
        let mut inner = self.inner.write().await;
        inner.settle();
        match &inner.state {
            FlowState::Resolved(_) => {
                inner.state = FlowState::Idle;
                Ok(())
            }
            FlowState::Submitting(_) => Err(FlowError::SubmitInProgress),
            FlowState::Idle | FlowState::FormOpen(_) => Ok(()),
        }
    }

    /// Submits the open form and waits for the purchase to resolve.
    ///
    /// Every call that gets past the form checks ends in a recorded outcome:
    /// one entry is prepended to the transaction log, the form is cleared and
    /// the flow moves to [`FlowState::Resolved`]. Transport faults are logged
    /// and reported as a failure outcome, never as an error. Dropping the
    /// returned future does not cancel the purchase.
    ///
    /// Calling this with no offer captured resolves to the "No package selected"
    /// failure without contacting the service.
    pub async fn submit(&self) -> Result<PurchaseOutcome, FlowError> {
        let mut settlement = {
            let mut inner = self.inner.write().await;
            inner.settle();
            let request = match &inner.state {
                FlowState::Idle => None,
                FlowState::FormOpen(form) => {
                    Some(form.to_request().ok_or(FlowError::IncompleteForm)?)
                }
                FlowState::Submitting(_) => return Err(FlowError::SubmitInProgress),
                FlowState::Resolved(_) => return Err(FlowError::ResultPending),
            };

            let Some(request) = request else {
                tracing::warn!("purchase submitted with no package selected");
                let outcome = PurchaseOutcome::no_package_selected();
                let record = TransactionRecord::new("", 0, outcome.text());
                inner.state = FlowState::Resolved(outcome.clone());
                drop(inner);

                let log = Arc::clone(&self.log);
                let recorded = tokio::spawn(async move { log.append(record).await });
                if let Err(e) = recorded.await {
                    tracing::error!(error = %e, "failed to record purchase");
                }
                return Ok(outcome);
            };

            let settlement = self.spawn_submission(&request);
            inner.in_flight = Some(settlement.clone());
            inner.state = FlowState::Submitting(request);
            settlement
        };

        if settlement.wait_for(Option::is_some).await.is_err() {
            tracing::error!("purchase task ended without an outcome");
        }
        let outcome = settlement
            .borrow()
            .clone()
            .unwrap_or_else(PurchaseOutcome::transport_failure);
        self.inner.write().await.settle();
        Ok(outcome)
    }

    /// Starts the remote call and the log append for `request` on their own task.
    fn spawn_submission(&self, request: &PurchaseRequest<'c>) -> Settlement {
        let (sender, settlement) = watch::channel(None);
        let service = Arc::clone(&self.service);
        let log = Arc::clone(&self.log);
        let payload = PurchasePayload::new(self.user_id, request);
        let offer = request.offer.clone();

        tokio::spawn(async move {
            let outcome = dispatch(&*service, &offer.id, &payload).await;
            log.append(TransactionRecord::for_offer(&offer, outcome.text()))
                .await;
            sender.send_replace(Some(outcome));
        });

        settlement
    }
}

async fn dispatch(
    service: &dyn PurchaseService,
    offer_id: &str,
    payload: &PurchasePayload,
) -> PurchaseOutcome {
    tracing::info!(
        offer = %offer_id,
        amount = payload.offer_amount,
        "submitting purchase"
    );

    match service.purchase(payload).await {
        Ok(response) => {
            if response.status.is_none() {
                tracing::warn!(offer = %offer_id, "no status returned from server");
            }
            PurchaseOutcome::from_response(response)
        }
        Err(e) => {
            tracing::error!(offer = %offer_id, error = %e, "purchase error");
            PurchaseOutcome::transport_failure()
        }
    }
}
