//! Concurrent operations on one database file.
//!
//! Each task drives a clone of the same service; every operation opens its
//! own connection, so these races go through SQLite locking for real.

mod common;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use voyage_core::errors::ErrorKind;
use voyage_core::requests::{CategorySelection, TechSelection};

use common::{category, open_service, team_with_members};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_duplicate_votes_admit_exactly_one() {
    let dir = TempDir::new().unwrap();
    let svc = open_service(&dir).await;
    let team = team_with_members(&svc, "Race Team 1", 2).await;
    let backend = category(&svc, "Backend").await;

    let proposal = svc
        .propose_tech(&team.id, &team.callers[0], "Tokio", &backend)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let svc = svc.clone();
        let team_id = team.id.clone();
        let item_id = proposal.tech_item.id.clone();
        let caller = team.callers[1].clone();
        handles.push(tokio::spawn(async move {
            svc.add_vote(&team_id, &item_id, &caller).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert_eq!(err.kind(), ErrorKind::Conflict, "{err}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(svc.count_votes(&proposal.tech_item.id).await.unwrap(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_duplicate_proposals_create_one_item() {
    let dir = TempDir::new().unwrap();
    let svc = open_service(&dir).await;
    let team = team_with_members(&svc, "Race Team 2", 4).await;
    let frontend = category(&svc, "Frontend").await;

    let mut handles = Vec::new();
    for caller in team.callers.clone() {
        let svc = svc.clone();
        let team_id = team.id.clone();
        let frontend = frontend.clone();
        handles.push(tokio::spawn(async move {
            svc.propose_tech(&team_id, &caller, "Dioxus", &frontend).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert_eq!(err.kind(), ErrorKind::Conflict, "{err}"),
        }
    }
    assert_eq!(created, 1);

    let items = svc.list_team_items(&team.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(svc.count_votes(&items[0].id).await.unwrap(), 1);
}

/// Removing the last vote while another member votes must never leave a
/// vote pointing at a deleted item, nor an item with zero votes.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn remove_last_vote_races_new_vote() {
    let dir = TempDir::new().unwrap();
    let svc = open_service(&dir).await;
    let team = team_with_members(&svc, "Race Team 3", 2).await;
    let database = category(&svc, "Database").await;

    for round in 0..10 {
        let proposal = svc
            .propose_tech(&team.id, &team.callers[0], &format!("Store {round}"), &database)
            .await
            .unwrap();
        let item_id = proposal.tech_item.id;

        let remover = {
            let svc = svc.clone();
            let team_id = team.id.clone();
            let item_id = item_id.clone();
            let caller = team.callers[0].clone();
            tokio::spawn(async move { svc.remove_vote(&team_id, &item_id, &caller).await })
        };
        let voter = {
            let svc = svc.clone();
            let team_id = team.id.clone();
            let item_id = item_id.clone();
            let caller = team.callers[1].clone();
            tokio::spawn(async move { svc.add_vote(&team_id, &item_id, &caller).await })
        };

        let removed = remover.await.unwrap().unwrap();
        let voted = voter.await.unwrap();

        match svc.get_tech_item(&item_id).await {
            Ok(_) => {
                // Vote landed first: item survives with exactly the new vote.
                assert!(!removed.item_deleted());
                assert!(voted.is_ok());
                assert_eq!(svc.count_votes(&item_id).await.unwrap(), 1);
            }
            Err(err) => {
                // Removal won: the late vote was rejected and nothing dangles.
                assert_eq!(err.kind(), ErrorKind::NotFound);
                assert!(removed.item_deleted());
                assert_eq!(voted.unwrap_err().kind(), ErrorKind::BadRequest);
                assert_eq!(svc.count_votes(&item_id).await.unwrap(), 0);
            }
        }
    }
}

/// Two members withdrawing the only two votes at once: exactly one removal
/// sees the item empty and deletes it.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_removals_delete_item_once() {
    let dir = TempDir::new().unwrap();
    let svc = open_service(&dir).await;
    let team = team_with_members(&svc, "Race Team 5", 2).await;
    let backend = category(&svc, "Backend").await;

    for round in 0..15 {
        let proposal = svc
            .propose_tech(&team.id, &team.callers[0], &format!("Queue {round}"), &backend)
            .await
            .unwrap();
        let item_id = proposal.tech_item.id;
        svc.add_vote(&team.id, &item_id, &team.callers[1])
            .await
            .unwrap();

        let handles: Vec<_> = team
            .callers
            .iter()
            .cloned()
            .map(|caller| {
                let svc = svc.clone();
                let team_id = team.id.clone();
                let item_id = item_id.clone();
                tokio::spawn(async move { svc.remove_vote(&team_id, &item_id, &caller).await })
            })
            .collect();

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap().unwrap());
        }

        let deleted = outcomes.iter().filter(|o| o.item_deleted()).count();
        assert_eq!(deleted, 1, "round {round}: {outcomes:?}");
        assert_eq!(
            svc.get_tech_item(&item_id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(svc.count_votes(&item_id).await.unwrap(), 0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_selections_never_exceed_cap() {
    let dir = TempDir::new().unwrap();
    let svc = open_service(&dir).await;
    let team = team_with_members(&svc, "Race Team 4", 2).await;
    let frontend = category(&svc, "Frontend").await;

    let mut ids = Vec::new();
    for name in ["Svelte", "React", "Vue", "Solid", "Qwik", "Lit"] {
        let proposal = svc
            .propose_tech(&team.id, &team.callers[0], name, &frontend)
            .await
            .unwrap();
        ids.push(proposal.tech_item.id);
    }

    let batches = [ids[0..3].to_vec(), ids[3..6].to_vec()];
    let mut handles = Vec::new();
    for (caller, batch) in team.callers.iter().cloned().zip(batches) {
        let svc = svc.clone();
        let team_id = team.id.clone();
        let payload = vec![CategorySelection {
            category_id: frontend.clone(),
            techs: batch
                .into_iter()
                .map(|tech_id| TechSelection {
                    tech_id,
                    is_selected: true,
                })
                .collect(),
        }];
        handles.push(tokio::spawn(async move {
            svc.update_selections(&team_id, &caller, &payload).await
        }));
    }

    let mut applied = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => applied += 1,
            Err(err) => assert_eq!(err.kind(), ErrorKind::BadRequest, "{err}"),
        }
    }
    assert_eq!(applied, 1);

    let selected = svc
        .list_team_items(&team.id)
        .await
        .unwrap()
        .into_iter()
        .filter(|item| item.is_selected)
        .count();
    assert_eq!(selected, 3);
}
