//! Shared setup for voyage-db integration tests.

#![allow(dead_code)]

use std::time::Duration;

use tempfile::TempDir;
use voyage_core::identity::AuthenticatedCaller;
use voyage_db::retry::RetryConfig;
use voyage_db::service::TechStackService;

pub struct Team {
    pub id: String,
    pub callers: Vec<AuthenticatedCaller>,
    pub member_ids: Vec<String>,
}

pub async fn open_service(dir: &TempDir) -> TechStackService {
    let path = dir.path().join("voyage.db");
    TechStackService::new_local(
        path.to_str().unwrap(),
        Duration::from_secs(5),
        RetryConfig {
            max_attempts: 20,
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(100),
        },
    )
    .await
    .unwrap()
}

/// Create a team with `size` members named `Member 0..size`.
pub async fn team_with_members(svc: &TechStackService, name: &str, size: usize) -> Team {
    let team = svc.create_team(name).await.unwrap();
    let mut callers = Vec::with_capacity(size);
    let mut member_ids = Vec::with_capacity(size);
    for n in 0..size {
        let user = svc
            .create_user(&format!("Member {n}"), name, None)
            .await
            .unwrap();
        let member = svc.add_team_member(&team.id, &user.id).await.unwrap();
        callers.push(AuthenticatedCaller::new(user.id));
        member_ids.push(member.id);
    }
    Team {
        id: team.id,
        callers,
        member_ids,
    }
}

pub async fn category(svc: &TechStackService, name: &str) -> String {
    svc.create_category(name, &format!("{name} choices"))
        .await
        .unwrap()
        .id
}
