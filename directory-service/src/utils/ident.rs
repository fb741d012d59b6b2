use rand::{distributions::Alphanumeric, Rng};

/// Generate a random alphanumeric identifier fragment.
pub fn generate_id(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
