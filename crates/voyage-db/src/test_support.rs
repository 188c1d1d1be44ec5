//! Shared test utilities for voyage-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::time::Duration;

    use tempfile::TempDir;
    use voyage_core::identity::AuthenticatedCaller;

    use crate::retry::RetryConfig;
    use crate::service::TechStackService;

    /// Two teams, three users, three categories.
    ///
    /// Alice and Bob belong to `team_id`; Carol belongs to `other_team_id`.
    pub struct Fixture {
        pub team_id: String,
        pub other_team_id: String,
        pub alice: AuthenticatedCaller,
        pub bob: AuthenticatedCaller,
        pub carol: AuthenticatedCaller,
        pub alice_member: String,
        pub bob_member: String,
        pub frontend_id: String,
        pub backend_id: String,
        pub database_id: String,
    }

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            max_attempts: 10,
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(50),
        }
    }

    /// Create an empty service backed by a database file in a temp dir.
    ///
    /// Keep the returned `TempDir` alive for the duration of the test.
    pub async fn test_service() -> (TempDir, TechStackService) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("voyage.db");
        let svc = TechStackService::new_local(
            path.to_str().unwrap(),
            Duration::from_secs(5),
            fast_retry(),
        )
        .await
        .unwrap();
        (dir, svc)
    }

    /// Create a service seeded with the standard [`Fixture`].
    pub async fn seeded_service() -> (TempDir, TechStackService, Fixture) {
        let (dir, svc) = test_service().await;

        let team = svc.create_team("Voyage 50 Team 1").await.unwrap();
        let other_team = svc.create_team("Voyage 50 Team 2").await.unwrap();

        let alice = svc.create_user("Alice", "Liddell", None).await.unwrap();
        let bob = svc
            .create_user("Bob", "Builder", Some("https://avatars.example/bob.png"))
            .await
            .unwrap();
        let carol = svc.create_user("Carol", "Danvers", None).await.unwrap();

        let alice_member = svc.add_team_member(&team.id, &alice.id).await.unwrap();
        let bob_member = svc.add_team_member(&team.id, &bob.id).await.unwrap();
        svc.add_team_member(&other_team.id, &carol.id).await.unwrap();

        let frontend = svc
            .create_category("Frontend", "Client-side frameworks")
            .await
            .unwrap();
        let backend = svc
            .create_category("Backend", "Server-side languages and frameworks")
            .await
            .unwrap();
        let database = svc
            .create_category("Database", "Persistent storage")
            .await
            .unwrap();

        let fixture = Fixture {
            team_id: team.id,
            other_team_id: other_team.id,
            alice: AuthenticatedCaller::new(alice.id),
            bob: AuthenticatedCaller::new(bob.id),
            carol: AuthenticatedCaller::new(carol.id),
            alice_member: alice_member.id,
            bob_member: bob_member.id,
            frontend_id: frontend.id,
            backend_id: backend.id,
            database_id: database.id,
        };
        (dir, svc, fixture)
    }

    /// A caller whose user id has no memberships anywhere.
    pub fn stranger() -> AuthenticatedCaller {
        AuthenticatedCaller::new("usr-ffffffff")
    }
}
