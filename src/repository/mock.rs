//! Mock implementations for isolating services in tests.

use mockall::mock;

use crate::domain::auth::PersistedAuth;
use crate::repository::KeyStore;
use crate::repository::errors::RepositoryResult;

mock! {
    pub KeyStore {}

    impl KeyStore for KeyStore {
        fn load(&self) -> RepositoryResult<Option<PersistedAuth>>;
        fn save(&self, auth: &PersistedAuth) -> RepositoryResult<()>;
        fn clear(&self) -> RepositoryResult<()>;
    }
}
