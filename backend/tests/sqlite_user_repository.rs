//! Integration tests for `DieselUserRepository` against an on-disk SQLite
//! database.
//!
//! Each test creates its database file in a fresh temporary directory, so
//! tests are isolated and exercise WAL journaling and the busy timeout the
//! way a deployment does.

use std::sync::Arc;

use risk_appetite::domain::ports::{
    CredentialStore, CredentialStoreError, UserPersistenceError, UserRepository,
};
use risk_appetite::domain::{CredentialService, Credentials, PasswordDigest, UserAccount, Username};
use risk_appetite::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use risk_appetite::outbound::security::Argon2PasswordHasher;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const DIGEST: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA";

struct Database {
    dir: TempDir,
}

impl Database {
    fn path(&self) -> String {
        self.dir
            .path()
            .join("users.sqlite3")
            .to_string_lossy()
            .into_owned()
    }

    async fn open(&self) -> DieselUserRepository {
        let pool = DbPool::new(PoolConfig::new(self.path()).with_max_size(4))
            .await
            .expect("open database");
        DieselUserRepository::new(pool)
    }
}

#[fixture]
fn database() -> Database {
    Database {
        dir: tempfile::tempdir().expect("temp dir"),
    }
}

fn account(name: &str) -> UserAccount {
    UserAccount::new(
        Username::new(name).expect("username"),
        PasswordDigest::new(DIGEST).expect("digest"),
    )
}

#[rstest]
#[tokio::test]
async fn accounts_persist_across_pools(database: Database) {
    let first = database.open().await;
    first.insert(&account("ada")).await.expect("insert");
    drop(first);

    let second = database.open().await;
    let found = second
        .find_by_username(&Username::new("ada").expect("username"))
        .await
        .expect("query")
        .expect("account persisted");
    assert_eq!(found.password_digest().as_str(), DIGEST);
}

#[rstest]
#[tokio::test]
async fn reopening_does_not_rerun_schema_creation(database: Database) {
    let _first = database.open().await;
    let second = database.open().await;
    second.insert(&account("grace")).await.expect("insert");
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_inserts_yield_one_success(database: Database) {
    let repo = Arc::new(database.open().await);

    let attempts = (0..8).map(|_| {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move { repo.insert(&account("ada")).await })
    });
    let outcomes = futures::future::join_all(attempts).await;

    let mut successes = 0;
    for outcome in outcomes {
        match outcome.expect("task completed") {
            Ok(()) => successes += 1,
            Err(err) => assert_eq!(err, UserPersistenceError::duplicate_username("ada")),
        }
    }
    assert_eq!(successes, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_registrations_through_the_service(database: Database) {
    let service = Arc::new(CredentialService::new(
        Arc::new(database.open().await),
        Arc::new(
            Argon2PasswordHasher::with_cost(argon2::Params::MIN_M_COST, 1, 1).expect("cost"),
        ),
    ));

    let first = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .register(&Credentials::try_from_parts("ada", "first").expect("creds"))
                .await
        })
    };
    let second = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .register(&Credentials::try_from_parts("ada", "second").expect("creds"))
                .await
        })
    };
    let outcomes = [
        first.await.expect("task completed"),
        second.await.expect("task completed"),
    ];

    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    assert!(outcomes.iter().any(|outcome| matches!(
        outcome,
        Err(CredentialStoreError::UsernameTaken { .. })
    )));

    // Exactly one of the two passwords is now valid.
    let mut valid = 0;
    for password in ["first", "second"] {
        let creds = Credentials::try_from_parts("ada", password).expect("creds");
        if service.validate(&creds).await.expect("validate") {
            valid += 1;
        }
    }
    assert_eq!(valid, 1);
}
