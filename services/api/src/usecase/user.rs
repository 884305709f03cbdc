use uuid::Uuid;

use safereturn_domain::pagination::PageRequest;
use safereturn_domain::user::VerificationStatus;

use crate::domain::repository::{CaseRepository, SightingRepository, UserRepository};
use crate::domain::types::{Case, Sighting, User};
use crate::error::ApiServiceError;

/// Government ID numbers are exactly 12 digits.
pub fn validate_doc_number(s: &str) -> bool {
    s.len() == 12 && s.bytes().all(|b| b.is_ascii_digit())
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ApiServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub home_latitude: Option<f64>,
    pub home_longitude: Option<f64>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<(), ApiServiceError> {
        if input.name.is_none()
            && input.phone.is_none()
            && input.home_latitude.is_none()
            && input.home_longitude.is_none()
        {
            return Err(ApiServiceError::MissingData);
        }
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        self.users
            .update_profile(
                user_id,
                input.name.as_deref(),
                input.phone.as_deref(),
                input.home_latitude,
                input.home_longitude,
            )
            .await
    }
}

// ── SetProfilePhoto ──────────────────────────────────────────────────────────

pub struct SetProfilePhotoUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetProfilePhotoUseCase<U> {
    pub async fn execute(&self, user_id: Uuid, path: &str) -> Result<(), ApiServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        self.users.set_profile_photo(user_id, path).await
    }
}

// ── SubmitVerification ───────────────────────────────────────────────────────

pub struct SubmitVerificationInput {
    pub doc_number: String,
    pub doc_photo: Option<String>,
}

pub struct SubmitVerificationUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SubmitVerificationUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: SubmitVerificationInput,
    ) -> Result<(), ApiServiceError> {
        if !validate_doc_number(&input.doc_number) {
            return Err(ApiServiceError::MissingData);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        // Re-submission only from not_uploaded or rejected.
        if !user.verification_status.accepts_submission() {
            return Err(ApiServiceError::InvalidTransition);
        }
        self.users
            .set_verification_submission(user_id, &input.doc_number, input.doc_photo.as_deref())
            .await
    }
}

// ── SetFcmToken ──────────────────────────────────────────────────────────────

pub struct SetFcmTokenUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetFcmTokenUseCase<U> {
    pub async fn execute(&self, user_id: Uuid, token: &str) -> Result<(), ApiServiceError> {
        if token.trim().is_empty() {
            return Err(ApiServiceError::MissingData);
        }
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        self.users.set_fcm_token(user_id, token).await
    }
}

// ── Admin: ListUsers ─────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(
        &self,
        status: Option<VerificationStatus>,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiServiceError> {
        self.users.list_by_verification_status(status, page).await
    }
}

// ── Admin: ReviewVerification ────────────────────────────────────────────────

pub struct ReviewVerificationUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ReviewVerificationUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        new_status: VerificationStatus,
    ) -> Result<(), ApiServiceError> {
        if !matches!(
            new_status,
            VerificationStatus::Approved | VerificationStatus::Rejected
        ) {
            return Err(ApiServiceError::InvalidStatus);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        if user.verification_status != VerificationStatus::Pending {
            return Err(ApiServiceError::InvalidTransition);
        }
        self.users.set_verification_status(user_id, new_status).await
    }
}

// ── Admin: SetFlagged ────────────────────────────────────────────────────────

pub struct SetFlaggedUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetFlaggedUseCase<U> {
    pub async fn execute(&self, user_id: Uuid, flagged: bool) -> Result<(), ApiServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        self.users.set_flagged(user_id, flagged).await
    }
}

// ── Admin: DeleteUser ────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), ApiServiceError> {
        if !self.users.delete(user_id).await? {
            return Err(ApiServiceError::UserNotFound);
        }
        Ok(())
    }
}

// ── Admin: GetUserDetails ────────────────────────────────────────────────────

pub struct UserDetails {
    pub user: User,
    pub cases: Vec<Case>,
    pub sightings: Vec<Sighting>,
}

pub struct GetUserDetailsUseCase<U: UserRepository, C: CaseRepository, S: SightingRepository> {
    pub users: U,
    pub cases: C,
    pub sightings: S,
}

impl<U: UserRepository, C: CaseRepository, S: SightingRepository> GetUserDetailsUseCase<U, C, S> {
    pub async fn execute(&self, user_id: Uuid) -> Result<UserDetails, ApiServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        let cases = self
            .cases
            .list_by_owner(user_id, PageRequest::default())
            .await?;
        let sightings = self.sightings.list_by_reporter(user_id).await?;
        Ok(UserDetails {
            user,
            cases,
            sightings,
        })
    }
}
