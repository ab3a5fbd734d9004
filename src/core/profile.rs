use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

const NAME_PREFIXES: &[&str] = &[
    "amber", "brisk", "cedar", "dusky", "ember", "frost", "gusty", "hazel", "ivory", "jolly",
    "keen", "lunar", "misty", "noble", "olive", "plush", "quiet", "rusty", "sunny", "tidal",
];

const NAME_SUFFIXES: &[&str] = &[
    "badger", "crane", "dingo", "egret", "ferret", "gecko", "heron", "ibis", "jackal", "koala",
    "lemur", "marten", "newt", "otter", "puffin", "quail", "raven", "stoat", "tapir", "vole",
];

const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%";
const PASSWORD_LEN: usize = 12;

/// Identity typed into the signup form. Supplied out-of-band, read when a
/// session's command sequence is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl UserProfile {
    /// Random names and password around a mailbox address obtained elsewhere.
    pub fn generate(email: impl Into<String>) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            first_name: random_name(&mut rng),
            last_name: random_name(&mut rng),
            email: email.into(),
            password: random_password(&mut rng),
        }
    }
}

fn random_name<R: Rng>(rng: &mut R) -> String {
    let prefix = NAME_PREFIXES.choose(rng).copied().unwrap_or("amber");
    let suffix = NAME_SUFFIXES.choose(rng).copied().unwrap_or("otter");
    format!("{}{}{:05}", prefix, suffix, rng.gen_range(0..100_000))
}

fn random_password<R: Rng>(rng: &mut R) -> String {
    (0..PASSWORD_LEN)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}
