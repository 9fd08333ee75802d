use super::*;
use crate::workload::{Insert, TeamChoice};
use std::sync::atomic::Ordering;

/// Connects, then runs `passes` insert passes (or passes until stopped when
/// `passes` is zero). The first error ends the worker.
pub async fn run<C: Connector>(
    connector: &C,
    passes: u64,
    rng: &mut Xoshiro512PlusPlus,
    running: &AtomicBool,
) -> Result<(), WorkerError> {
    let store = connect(connector).await?;

    let mut completed = 0;
    while running.load(Ordering::Relaxed) && (passes == 0 || completed < passes) {
        let insert = pass(&store, rng).await?;
        debug!(
            "inserted user_id={} email={} team_id={}",
            insert.user_id, insert.user.email, insert.team.team_id
        );
        completed += 1;
    }

    Ok(())
}

/// A single insert pass: pick or mint a team, insert a user, then insert the
/// team row pointing at that user. Nothing is rolled back on failure, so an
/// error on the team insert leaves the user row in place.
pub async fn pass<S: Store>(
    store: &S,
    rng: &mut Xoshiro512PlusPlus,
) -> Result<Insert, QueryError> {
    let team = match TeamChoice::generate(rng) {
        TeamChoice::Mint => mint(rng),
        TeamChoice::Reuse => match store.random_team().await {
            Ok(Some(team)) => {
                OLTP_TEAM_REUSED.increment();
                team
            }
            // no teams exist yet
            Ok(None) => mint(rng),
            Err(e) => {
                OLTP_TEAM_LOOKUP_EX.increment();
                return Err(e);
            }
        },
    };

    let nanos = chrono::Utc::now().timestamp_subsec_nanos();
    let user = User::generate(rng, &team, nanos);

    let user_id = match store.insert_user(&user).await {
        Ok(id) => {
            OLTP_INSERT_USER_OK.increment();
            id
        }
        Err(e) => {
            OLTP_INSERT_USER_EX.increment();
            return Err(e);
        }
    };

    if let Err(e) = store.insert_team(&team, user_id).await {
        OLTP_INSERT_TEAM_EX.increment();
        return Err(e);
    }
    OLTP_INSERT_TEAM_OK.increment();

    Ok(Insert {
        user_id,
        user,
        team,
    })
}

fn mint(rng: &mut Xoshiro512PlusPlus) -> Team {
    OLTP_TEAM_MINTED.increment();
    Team::mint(rng)
}
