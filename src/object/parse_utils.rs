use super::Id;

pub(crate) fn split_once<'a>(s: &'a [u8], c: &u8) -> (&'a [u8], &'a [u8]) {
    match s.iter().position(|b| b == c) {
        Some(n) => (&s[0..n], &s[n + 1..]),
        None => (s, &[]),
    }
}

pub(crate) fn object_id(value: &[u8]) -> Option<Id> {
    Id::from_hex(value).ok()
}
