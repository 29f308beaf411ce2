//! Queue record id generation

use prashiskshan_domain::constants::{QUEUED_ID_PREFIX, QUEUED_ID_RANDOM_LEN};
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `queued_<millis>_<9 base-36 chars>`
pub fn generate_queue_id(now_millis: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..QUEUED_ID_RANDOM_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect();
    format!("{QUEUED_ID_PREFIX}{now_millis}_{suffix}")
}
