//! Integration tests for the authentication lifecycle.
//!
//! These tests drive the full sign-in, recovery, verification, and
//! sign-out flows through the public handlers against the in-memory
//! auth gateway, and observe the results through a store subscription.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gradeflow::adapters::auth::MockAuthGateway;
use gradeflow::application::handlers::session::{
    AuthSynchronizer, RecoverPasswordCommand, RecoverPasswordHandler, SignInCommand,
    SignInHandler, SignOutHandler, VerifyEmailCommand, VerifyEmailHandler,
};
use gradeflow::domain::foundation::{DomainError, Timestamp, UserId};
use gradeflow::domain::session::{
    NavigationIntent, PageContext, Plan, SessionStore, UserProfile,
};
use gradeflow::ports::{AuthGateway, ProfileReader};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Profile reader backed by a fixed set of profiles.
struct FixedProfiles {
    profiles: Vec<UserProfile>,
}

impl FixedProfiles {
    fn empty() -> Self {
        Self { profiles: vec![] }
    }

    fn with(profile: UserProfile) -> Self {
        Self {
            profiles: vec![profile],
        }
    }
}

#[async_trait]
impl ProfileReader for FixedProfiles {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .profiles
            .iter()
            .find(|p| &p.user_id == user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.profiles.iter().find(|p| p.email == email).cloned())
    }
}

struct Fixture {
    gateway: Arc<MockAuthGateway>,
    store: SessionStore,
    synchronizer: Arc<Mutex<AuthSynchronizer>>,
}

impl Fixture {
    fn new(gateway: MockAuthGateway, profiles: FixedProfiles) -> Self {
        let gateway = Arc::new(gateway);
        let store = SessionStore::new();
        let synchronizer = Arc::new(Mutex::new(AuthSynchronizer::new(
            store.clone(),
            gateway.clone(),
            Arc::new(profiles),
        )));
        Self {
            gateway,
            store,
            synchronizer,
        }
    }

    fn sign_in_handler(&self) -> SignInHandler {
        SignInHandler::new(self.gateway.clone(), self.synchronizer.clone())
    }

    fn sign_out_handler(&self) -> SignOutHandler {
        SignOutHandler::new(self.gateway.clone(), self.synchronizer.clone())
    }

    fn recover_handler(&self) -> RecoverPasswordHandler {
        RecoverPasswordHandler::new(self.gateway.clone(), self.synchronizer.clone())
    }

    fn verify_handler(&self) -> VerifyEmailHandler {
        VerifyEmailHandler::new(self.gateway.clone(), self.synchronizer.clone())
    }
}

fn teacher_id() -> UserId {
    UserId::new("teacher-1").unwrap()
}

fn pro_profile() -> UserProfile {
    let mut profile = UserProfile::minimal(teacher_id(), "t@school.example");
    profile.plan = Plan::Pro;
    profile.pro_subscription_active = true;
    profile.subscription_expires_at = Some(Timestamp::now().add_days(30));
    profile
}

fn sign_in_cmd(page: PageContext) -> SignInCommand {
    SignInCommand {
        email: "t@school.example".to_string(),
        password: "hunter2".to_string(),
        page,
    }
}

// =============================================================================
// Sign-in and sign-out
// =============================================================================

#[tokio::test]
async fn sign_in_then_sign_out_round_trip() {
    let fixture = Fixture::new(
        MockAuthGateway::new().with_account("t@school.example", "hunter2", teacher_id()),
        FixedProfiles::with(pro_profile()),
    );
    let mut subscriber = fixture.store.subscribe();

    let intent = fixture
        .sign_in_handler()
        .handle(sign_in_cmd(PageContext::Login))
        .await
        .unwrap();
    assert_eq!(intent, NavigationIntent::ToDashboard);

    subscriber.changed().await.unwrap();
    let snapshot = subscriber.borrow_and_update().clone();
    assert!(snapshot.is_authenticated());
    assert!(!snapshot.loading);
    assert!(snapshot.profile.as_ref().unwrap().has_active_pro());
    assert_eq!(
        snapshot.session.as_ref().unwrap().access_token,
        "access-teacher-1"
    );

    let intent = fixture.sign_out_handler().handle(PageContext::Other).await;
    assert_eq!(intent, NavigationIntent::ToLogin);

    subscriber.changed().await.unwrap();
    let snapshot = subscriber.borrow_and_update().clone();
    assert!(!snapshot.is_authenticated());
    assert!(snapshot.profile.is_none());
    assert!(fixture.gateway.current_session().await.unwrap().is_none());
}

#[tokio::test]
async fn repeated_sign_in_redirects_only_once() {
    let fixture = Fixture::new(
        MockAuthGateway::new().with_account("t@school.example", "hunter2", teacher_id()),
        FixedProfiles::empty(),
    );
    let handler = fixture.sign_in_handler();

    let first = handler.handle(sign_in_cmd(PageContext::Login)).await.unwrap();
    let second = handler.handle(sign_in_cmd(PageContext::Login)).await.unwrap();

    assert_eq!(first, NavigationIntent::ToDashboard);
    assert_eq!(second, NavigationIntent::None);
}

#[tokio::test]
async fn rejected_credentials_keep_store_unauthenticated() {
    let fixture = Fixture::new(
        MockAuthGateway::new().with_account("t@school.example", "hunter2", teacher_id()),
        FixedProfiles::empty(),
    );

    let err = fixture
        .sign_in_handler()
        .handle(SignInCommand {
            email: "t@school.example".to_string(),
            password: "wrong".to_string(),
            page: PageContext::Login,
        })
        .await
        .unwrap_err();

    assert!(err.user_message().contains("incorrect"));
    assert!(!fixture.store.is_authenticated());
}

#[tokio::test]
async fn missing_profile_row_falls_back_to_token_email() {
    let fixture = Fixture::new(
        MockAuthGateway::new().with_account("t@school.example", "hunter2", teacher_id()),
        FixedProfiles::empty(),
    );

    fixture
        .sign_in_handler()
        .handle(sign_in_cmd(PageContext::Other))
        .await
        .unwrap();

    let profile = fixture.store.snapshot().profile.unwrap();
    assert_eq!(profile.email, "t@school.example");
    assert_eq!(profile.plan, Plan::Free);
    assert!(!profile.pro_subscription_active);
}

// =============================================================================
// Session restoration
// =============================================================================

#[tokio::test]
async fn initialization_restores_a_returning_visitor() {
    let gateway = MockAuthGateway::new().with_account("t@school.example", "hunter2", teacher_id());
    gateway.sign_in("t@school.example", "hunter2").await.unwrap();

    let fixture = Fixture::new(gateway, FixedProfiles::with(pro_profile()));

    let intent = fixture
        .synchronizer
        .lock()
        .await
        .initialize(PageContext::Other)
        .await;

    assert_eq!(intent, NavigationIntent::None);
    let snapshot = fixture.store.snapshot();
    assert!(snapshot.is_authenticated());
    assert!(!snapshot.loading);
    assert!(snapshot.profile.unwrap().has_active_pro());
}

#[tokio::test]
async fn initialization_without_stored_session_ends_loading() {
    let fixture = Fixture::new(MockAuthGateway::new(), FixedProfiles::empty());

    fixture
        .synchronizer
        .lock()
        .await
        .initialize(PageContext::Login)
        .await;

    let snapshot = fixture.store.snapshot();
    assert!(!snapshot.loading);
    assert!(!snapshot.is_authenticated());
}

// =============================================================================
// Recovery and verification deep links
// =============================================================================

#[tokio::test]
async fn recovery_link_sets_password_without_dashboard_redirect() {
    let fixture = Fixture::new(MockAuthGateway::new(), FixedProfiles::empty());

    fixture
        .recover_handler()
        .handle(RecoverPasswordCommand {
            link: "https://app.example/reset?code=abc123".to_string(),
            new_password: "new-password".to_string(),
        })
        .await
        .unwrap();

    let snapshot = fixture.store.snapshot();
    assert!(snapshot.is_authenticated());
    assert_eq!(
        snapshot.session.unwrap().user_id.as_str(),
        "recovered-abc123"
    );
}

#[tokio::test]
async fn redirect_works_again_after_recovery_completes() {
    let fixture = Fixture::new(
        MockAuthGateway::new().with_account("t@school.example", "hunter2", teacher_id()),
        FixedProfiles::empty(),
    );

    fixture
        .recover_handler()
        .handle(RecoverPasswordCommand {
            link: "https://app.example/reset?code=abc123".to_string(),
            new_password: "new-password".to_string(),
        })
        .await
        .unwrap();

    let intent = fixture
        .sign_in_handler()
        .handle(sign_in_cmd(PageContext::Login))
        .await
        .unwrap();

    assert_eq!(intent, NavigationIntent::ToDashboard);
}

#[tokio::test]
async fn malformed_recovery_link_is_rejected_before_any_gateway_call() {
    let fixture = Fixture::new(MockAuthGateway::new(), FixedProfiles::empty());

    let result = fixture
        .recover_handler()
        .handle(RecoverPasswordCommand {
            link: "https://app.example/reset".to_string(),
            new_password: "new-password".to_string(),
        })
        .await;

    assert!(result.is_err());
    assert!(!fixture.store.is_authenticated());
}

#[tokio::test]
async fn signup_verification_link_signs_the_user_in() {
    let fixture = Fixture::new(MockAuthGateway::new(), FixedProfiles::empty());

    let intent = fixture
        .verify_handler()
        .handle(VerifyEmailCommand {
            link: "https://app.example/welcome#access_token=tok&refresh_token=ref&type=signup"
                .to_string(),
            page: PageContext::Login,
        })
        .await
        .unwrap();

    assert_eq!(intent, NavigationIntent::ToDashboard);
    let snapshot = fixture.store.snapshot();
    assert_eq!(snapshot.session.unwrap().access_token, "tok");
}
