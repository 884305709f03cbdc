use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use safereturn_auth_types::identity::JwtSecret;

use crate::infra::db::{
    DbCaseIntakePort, DbCaseRepository, DbCaseSequenceRepository, DbSightingRepository,
    DbUserRepository,
};
use crate::infra::upload::FsUploadStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub cookie_domain: String,
    pub upload_dir: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn case_repo(&self) -> DbCaseRepository {
        DbCaseRepository {
            db: self.db.clone(),
        }
    }

    pub fn sighting_repo(&self) -> DbSightingRepository {
        DbSightingRepository {
            db: self.db.clone(),
        }
    }

    pub fn case_sequence_repo(&self) -> DbCaseSequenceRepository {
        DbCaseSequenceRepository {
            db: self.db.clone(),
        }
    }

    pub fn case_intake_port(&self) -> DbCaseIntakePort {
        DbCaseIntakePort {
            db: self.db.clone(),
        }
    }

    pub fn upload_store(&self) -> FsUploadStore {
        FsUploadStore::new(&self.upload_dir)
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        JwtSecret(state.jwt_secret.clone())
    }
}
