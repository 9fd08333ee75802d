use super::*;

/// Each select worker owns a disjoint range of this many `user_id`s.
pub const ROWS_PER_WORKER: u64 = 50_000;

/// One in this many insert passes mints a new team instead of reusing one.
pub const NEW_TEAM_ODDS: u64 = 5;

pub const TEAM_ID_LEN: usize = 10;
pub const TEAM_NAME_LEN: usize = 10;
pub const USER_NAME_LEN: usize = 25;
pub const EMAIL_PREFIX_LEN: usize = 18;
pub const EMAIL_DOMAIN: &str = "@mydomain.com";

// "SELECT email FROM user WHERE user_id = ?"
#[derive(Debug, PartialEq)]
pub struct PointSelect {
    pub id: u64,
}

impl PointSelect {
    /// Picks a key uniformly from the partition owned by `worker`.
    pub fn generate(rng: &mut dyn RngCore, worker: usize) -> Self {
        let offset = Uniform::new(0, ROWS_PER_WORKER).sample(rng);
        Self {
            id: worker as u64 * ROWS_PER_WORKER + offset,
        }
    }
}

/// Whether an insert pass creates a new team or attaches to an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeamChoice {
    Mint,
    Reuse,
}

impl TeamChoice {
    pub fn generate(rng: &mut dyn RngCore) -> Self {
        if rng.gen_range(0..NEW_TEAM_ODDS) == 0 {
            Self::Mint
        } else {
            Self::Reuse
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub team_id: String,
    pub name: String,
}

impl Team {
    pub fn mint(rng: &mut dyn RngCore) -> Self {
        Self {
            team_id: random_string(rng, TEAM_ID_LEN),
            name: random_string(rng, TEAM_NAME_LEN),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub team_id: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// A synthetic user on `team`. `nanos` is the sub-second part of the
    /// current time and keeps emails from colliding across workers.
    pub fn generate(rng: &mut dyn RngCore, team: &Team, nanos: u32) -> Self {
        let email = format!(
            "{}_{}{}",
            random_string(rng, EMAIL_PREFIX_LEN),
            nanos,
            EMAIL_DOMAIN
        );

        Self {
            team_id: team.team_id.clone(),
            name: random_string(rng, USER_NAME_LEN),
            email,
        }
    }
}

/// The rows written by one insert pass.
#[derive(Debug, PartialEq)]
pub struct Insert {
    pub user_id: u64,
    pub user: User,
    pub team: Team,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro512PlusPlus;

    #[test]
    fn point_select_stays_in_partition() {
        let mut rng = Xoshiro512PlusPlus::seed_from_u64(0);
        for worker in [0, 1, 2, 7, 99] {
            let lo = worker as u64 * ROWS_PER_WORKER;
            let hi = lo + ROWS_PER_WORKER;
            for _ in 0..10_000 {
                let id = PointSelect::generate(&mut rng, worker).id;
                assert!(id >= lo && id < hi, "worker {worker} produced {id}");
            }
        }
    }

    #[test]
    fn mint_probability() {
        let mut rng = Xoshiro512PlusPlus::seed_from_u64(3);
        let trials = 100_000;
        let minted = (0..trials)
            .filter(|_| TeamChoice::generate(&mut rng) == TeamChoice::Mint)
            .count();
        let ratio = minted as f64 / trials as f64;
        assert!((0.19..0.21).contains(&ratio), "ratio: {ratio}");
    }

    #[test]
    fn minted_team_shape() {
        let mut rng = Xoshiro512PlusPlus::seed_from_u64(4);
        let team = Team::mint(&mut rng);
        assert_eq!(team.team_id.len(), TEAM_ID_LEN);
        assert_eq!(team.name.len(), TEAM_NAME_LEN);
    }

    #[test]
    fn user_shape() {
        let mut rng = Xoshiro512PlusPlus::seed_from_u64(5);
        let team = Team::mint(&mut rng);
        let user = User::generate(&mut rng, &team, 123_456_789);

        assert_eq!(user.team_id, team.team_id);
        assert_eq!(user.name.len(), USER_NAME_LEN);

        let local = user.email.strip_suffix(EMAIL_DOMAIN).unwrap();
        let (prefix, nanos) = local.split_once('_').unwrap();
        assert_eq!(prefix.len(), EMAIL_PREFIX_LEN);
        assert!(prefix.bytes().all(|b| b.is_ascii_alphabetic()));
        assert_eq!(nanos, "123456789");
    }
}
