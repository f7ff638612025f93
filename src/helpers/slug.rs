use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;

const SLUG_MAX_LEN: usize = 60;
const SUFFIX_LEN: usize = 4;
const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new("[^a-z0-9]+").unwrap();
}

pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let collapsed = NON_ALNUM.replace_all(&lowered, "-");
    collapsed
        .trim_matches('-')
        .chars()
        .take(SLUG_MAX_LEN)
        .collect()
}

// Used when the plain slug is already taken; the caller retries the
// insert with a fresh suffix rather than pre-checking for collisions.
pub fn suffixed_slug(base: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", base, suffix)
}
