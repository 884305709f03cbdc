use safereturn_api::error::ApiServiceError;
use safereturn_api::usecase::auth::{
    LoginInput, LoginUseCase, RefreshTokenUseCase, RegisterUserInput, RegisterUserUseCase,
    hash_password, issue_access_token, issue_refresh_token,
};
use safereturn_auth_types::token::validate_token;
use safereturn_domain::user::{UserRole, VerificationStatus};

use crate::helpers::{MockUserRepo, TEST_JWT_SECRET, test_user};

// ── issue_access_token / validate_token ──────────────────────────────────────

#[tokio::test]
async fn should_issue_access_token_that_validates_successfully() {
    let user = test_user();
    let (token, exp) = issue_access_token(&user, TEST_JWT_SECRET).unwrap();

    assert!(!token.is_empty());
    assert!(exp > 0);

    let claims = validate_token(&token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.role, user.role.as_u8());
    assert_eq!(claims.exp, exp);
}

#[tokio::test]
async fn should_reject_token_signed_with_wrong_secret() {
    let user = test_user();
    let (token, _) = issue_access_token(&user, TEST_JWT_SECRET).unwrap();
    assert!(validate_token(&token, "wrong-secret").is_err());
}

// ── RegisterUserUseCase ──────────────────────────────────────────────────────

fn register_input() -> RegisterUserInput {
    RegisterUserInput {
        name: "Asha Rahman".to_owned(),
        email: "Asha@Example.com".to_owned(),
        phone: "01700000000".to_owned(),
        password: "hunter2!".to_owned(),
        home_latitude: None,
        home_longitude: None,
    }
}

#[tokio::test]
async fn should_register_user_and_issue_token_pair() {
    let users = MockUserRepo::empty();
    let handle = users.users_handle();
    let usecase = RegisterUserUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let pair = usecase.execute(register_input()).await.unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_eq!(pair.user_role, UserRole::User.as_u8());

    let created = handle.lock().unwrap();
    assert_eq!(created.len(), 1);
    // Email is normalized, verification starts at not_uploaded.
    assert_eq!(created[0].email, "asha@example.com");
    assert_eq!(
        created[0].verification_status,
        VerificationStatus::NotUploaded
    );
    assert!(!created[0].is_flagged);
    assert_ne!(created[0].password_hash, "hunter2!");
}

#[tokio::test]
async fn should_reject_registration_with_taken_email() {
    let mut existing = test_user();
    existing.email = "asha@example.com".to_owned();
    let usecase = RegisterUserUseCase {
        users: MockUserRepo::new(vec![existing]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase.execute(register_input()).await;
    assert!(matches!(result, Err(ApiServiceError::EmailTaken)));
}

#[tokio::test]
async fn should_reject_registration_with_blank_name() {
    let usecase = RegisterUserUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let mut input = register_input();
    input.name = "   ".to_owned();
    let result = usecase.execute(input).await;
    assert!(matches!(result, Err(ApiServiceError::MissingData)));
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_correct_password() {
    let mut user = test_user();
    user.password_hash = hash_password("hunter2!").unwrap();
    let user_id = user.id;

    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let pair = usecase
        .execute(LoginInput {
            email: "asha@example.com".to_owned(),
            password: "hunter2!".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(pair.user_id, user_id);
}

#[tokio::test]
async fn should_reject_login_with_wrong_password() {
    let mut user = test_user();
    user.password_hash = hash_password("hunter2!").unwrap();

    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(LoginInput {
            email: "asha@example.com".to_owned(),
            password: "hunter3!".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(ApiServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_login_for_unknown_email() {
    let usecase = LoginUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(LoginInput {
            email: "nobody@example.com".to_owned(),
            password: "hunter2!".to_owned(),
        })
        .await;
    // Same error as a wrong password; no account enumeration.
    assert!(matches!(result, Err(ApiServiceError::InvalidCredentials)));
}

// ── RefreshTokenUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_refresh_token_pair_from_valid_refresh_token() {
    let user = test_user();
    let refresh = issue_refresh_token(&user, TEST_JWT_SECRET).unwrap();

    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let pair = usecase.execute(&refresh).await.unwrap();
    assert_eq!(pair.user_id, user.id);
    assert!(!pair.access_token.is_empty());
}

#[tokio::test]
async fn should_reject_refresh_for_deleted_user() {
    let user = test_user();
    let refresh = issue_refresh_token(&user, TEST_JWT_SECRET).unwrap();

    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase.execute(&refresh).await;
    assert!(matches!(result, Err(ApiServiceError::InvalidRefreshToken)));
}

#[tokio::test]
async fn should_reject_garbage_refresh_token() {
    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase.execute("not-a-jwt").await;
    assert!(matches!(result, Err(ApiServiceError::InvalidRefreshToken)));
}
