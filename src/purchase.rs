//! Style guide purchase flow.
//!
//! Payment itself is an opaque external service behind [`PaymentGateway`];
//! this module only tracks where a purchase stands. A failed charge returns
//! the flow to idle so the respondent can retry.

use serde::Serialize;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseScope {
    /// Guide for the matched style
    SingleStyle,
    /// Master guide covering every style
    AllStyles,
}

impl PurchaseScope {
    pub fn price_cents(&self) -> u32 {
        match self {
            PurchaseScope::SingleStyle => 499,
            PurchaseScope::AllStyles => 999,
        }
    }

    fn covers(&self, other: PurchaseScope) -> bool {
        *self == PurchaseScope::AllStyles || *self == other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub email: String,
    pub style: String,
    pub scope: PurchaseScope,
}

impl PurchaseRequest {
    pub fn amount_cents(&self) -> u32 {
        self.scope.price_cents()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseState {
    Idle,
    Processing(PurchaseRequest),
    Completed { scope: PurchaseScope },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    EmailRequired,
    InvalidEmail,
    /// A charge is already in flight
    InProgress,
    AlreadyPurchased,
    /// Outcome reported with no charge in flight
    NotStarted,
    /// Payment service rejected or failed the charge
    Gateway(String),
}

impl std::fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseError::EmailRequired => write!(f, "Email address is required"),
            PurchaseError::InvalidEmail => write!(f, "Email address is invalid"),
            PurchaseError::InProgress => write!(f, "A purchase is already in progress"),
            PurchaseError::AlreadyPurchased => write!(f, "Guide already purchased"),
            PurchaseError::NotStarted => write!(f, "No purchase in progress"),
            PurchaseError::Gateway(e) => write!(f, "Payment failed: {}", e),
        }
    }
}

impl PurchaseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PurchaseError::EmailRequired => "Please enter your email address.",
            PurchaseError::InvalidEmail => "Please enter a valid email address.",
            PurchaseError::InProgress => "Your purchase is being processed.",
            PurchaseError::AlreadyPurchased => "You already own this guide.",
            PurchaseError::NotStarted => "No purchase in progress.",
            PurchaseError::Gateway(_) => "Payment failed. Please try again or contact support.",
        }
    }
}

impl std::error::Error for PurchaseError {}

pub trait PaymentGateway: Send + Sync {
    fn charge(&self, request: &PurchaseRequest) -> impl Future<Output = Result<(), String>> + Send;
}

pub struct PurchaseFlow<G> {
    gateway: G,
    state: PurchaseState,
}

impl<G: PaymentGateway> PurchaseFlow<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: PurchaseState::Idle,
        }
    }

    pub fn state(&self) -> &PurchaseState {
        &self.state
    }

    /// Validate and move to processing.
    pub fn begin(&mut self, email: &str, style: &str, scope: PurchaseScope) -> Result<PurchaseRequest, PurchaseError> {
        match &self.state {
            PurchaseState::Processing(_) => return Err(PurchaseError::InProgress),
            PurchaseState::Completed { scope: owned } if owned.covers(scope) => {
                return Err(PurchaseError::AlreadyPurchased);
            }
            _ => {}
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(PurchaseError::EmailRequired);
        }
        if !email.contains('@') {
            return Err(PurchaseError::InvalidEmail);
        }

        let request = PurchaseRequest {
            email: email.to_string(),
            style: style.to_string(),
            scope,
        };
        self.state = PurchaseState::Processing(request.clone());
        Ok(request)
    }

    /// Apply the gateway outcome. Failure returns to idle.
    pub fn finish(&mut self, outcome: Result<(), String>) -> Result<PurchaseScope, PurchaseError> {
        let PurchaseState::Processing(request) = &self.state else {
            return Err(PurchaseError::NotStarted);
        };
        let scope = request.scope;
        match outcome {
            Ok(()) => {
                tracing::info!(?scope, style = %request.style, "Purchase completed");
                self.state = PurchaseState::Completed { scope };
                Ok(scope)
            }
            Err(e) => {
                tracing::warn!(?scope, error = %e, "Payment failed");
                self.state = PurchaseState::Idle;
                Err(PurchaseError::Gateway(e))
            }
        }
    }

    pub async fn purchase(&mut self, email: &str, style: &str, scope: PurchaseScope) -> Result<PurchaseScope, PurchaseError> {
        let request = self.begin(email, style, scope)?;
        let outcome = self.gateway.charge(&request).await;
        self.finish(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Gateway replaying scripted outcomes, recording charges
    struct ScriptedGateway {
        outcomes: Mutex<Vec<Result<(), String>>>,
        charged: Mutex<Vec<u32>>,
    }

    impl ScriptedGateway {
        fn new(outcomes: Vec<Result<(), String>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                charged: Mutex::new(Vec::new()),
            }
        }
    }

    impl PaymentGateway for ScriptedGateway {
        async fn charge(&self, request: &PurchaseRequest) -> Result<(), String> {
            self.charged.lock().unwrap().push(request.amount_cents());
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    #[tokio::test]
    async fn test_successful_purchase() {
        let mut flow = PurchaseFlow::new(ScriptedGateway::new(vec![Ok(())]));
        let scope = flow
            .purchase("ana@example.com", "Japandi", PurchaseScope::SingleStyle)
            .await
            .unwrap();
        assert_eq!(scope, PurchaseScope::SingleStyle);
        assert_eq!(flow.state(), &PurchaseState::Completed { scope });
        assert_eq!(*flow.gateway.charged.lock().unwrap(), vec![499]);
    }

    #[tokio::test]
    async fn test_gateway_failure_reverts_to_idle_and_allows_retry() {
        let mut flow = PurchaseFlow::new(ScriptedGateway::new(vec![Err("declined".into()), Ok(())]));

        let err = flow
            .purchase("ana@example.com", "Japandi", PurchaseScope::AllStyles)
            .await
            .unwrap_err();
        assert_eq!(err, PurchaseError::Gateway("declined".into()));
        assert_eq!(flow.state(), &PurchaseState::Idle);

        flow.purchase("ana@example.com", "Japandi", PurchaseScope::AllStyles)
            .await
            .unwrap();
        assert_eq!(*flow.gateway.charged.lock().unwrap(), vec![999, 999]);
    }

    #[tokio::test]
    async fn test_email_is_validated_before_charging() {
        let mut flow = PurchaseFlow::new(ScriptedGateway::new(vec![]));
        assert_eq!(
            flow.purchase("  ", "Japandi", PurchaseScope::SingleStyle).await,
            Err(PurchaseError::EmailRequired)
        );
        assert_eq!(
            flow.purchase("ana", "Japandi", PurchaseScope::SingleStyle).await,
            Err(PurchaseError::InvalidEmail)
        );
        assert_eq!(flow.state(), &PurchaseState::Idle);
        assert!(flow.gateway.charged.lock().unwrap().is_empty());
    }

    #[test]
    fn test_begin_blocks_concurrent_and_repeat_purchases() {
        let mut flow = PurchaseFlow::new(ScriptedGateway::new(vec![]));
        flow.begin("a@b.c", "Bohemian", PurchaseScope::SingleStyle).unwrap();
        assert_eq!(
            flow.begin("a@b.c", "Bohemian", PurchaseScope::SingleStyle),
            Err(PurchaseError::InProgress)
        );

        flow.finish(Ok(())).unwrap();
        assert_eq!(flow.finish(Ok(())), Err(PurchaseError::NotStarted));
        assert_eq!(
            flow.begin("a@b.c", "Bohemian", PurchaseScope::SingleStyle),
            Err(PurchaseError::AlreadyPurchased)
        );
        // Upgrading to the master guide is still allowed
        assert!(flow.begin("a@b.c", "Bohemian", PurchaseScope::AllStyles).is_ok());
    }

    #[test]
    fn test_user_message_hides_gateway_details() {
        let err = PurchaseError::Gateway("card 4242 declined by issuer".into());
        assert!(!err.user_message().contains("4242"));
    }
}
