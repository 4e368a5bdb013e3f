use std::fmt::{self, Display, Formatter};

use tracing::debug;

use super::{Error, Repo, Result};
use crate::object::Id;

/// Name of the reference that tracks the checked-out position.
pub const HEAD: &str = "HEAD";

/// Namespace for branches.
pub const BRANCH_PREFIX: &str = "refs/heads/";

/// Namespace for tags.
pub const TAG_PREFIX: &str = "refs/tags/";

/// Longest chain of symbolic references that will be followed before
/// resolution fails with `ReferenceCycle`.
pub const MAX_SYMREF_DEPTH: usize = 10;

const REFS_ROOT: &str = "refs/";
const SYMBOLIC_MARKER: &str = "ref:";

/// The stored value of a reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefValue {
    /// Points straight at an object.
    Direct(Id),

    /// Points at another reference by name (e.g. `HEAD` -> `refs/heads/main`).
    Symbolic(String),
}

impl RefValue {
    /// Parse the stored text form of a reference: either 40 hex digits
    /// or `ref: <name>`. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<RefValue> {
        let s = s.trim();
        match s.strip_prefix(SYMBOLIC_MARKER) {
            Some(target) => Ok(RefValue::Symbolic(target.trim().to_string())),
            None => Ok(RefValue::Direct(s.parse()?)),
        }
    }

    /// Return the object ID if this is a direct reference.
    pub fn id(&self) -> Option<Id> {
        match self {
            RefValue::Direct(id) => Some(*id),
            RefValue::Symbolic(_) => None,
        }
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, RefValue::Symbolic(_))
    }
}

impl Display for RefValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RefValue::Direct(id) => write!(f, "{}", id),
            RefValue::Symbolic(target) => write!(f, "{} {}", SYMBOLIC_MARKER, target),
        }
    }
}

/// A named reference together with its (possibly resolved) value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ref {
    pub name: String,
    pub value: RefValue,
}

/// Returns true if `name` is acceptable as a reference name.
pub(crate) fn is_valid_ref_name(name: &str) -> bool {
    check_ref_name(name).is_ok()
}

/// Check that `name` is `HEAD` or a well-formed path under `refs/`.
///
/// Segments may not be empty, `.`, or `..`, and the name may not contain
/// backslashes or control characters.
pub fn check_ref_name(name: &str) -> Result<()> {
    if name == HEAD {
        return Ok(());
    }

    let invalid = || Error::InvalidReferenceName(name.to_string());

    let rest = name.strip_prefix(REFS_ROOT).ok_or_else(invalid)?;
    if name.contains('\\') || name.chars().any(char::is_control) {
        return Err(invalid());
    }

    if rest
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(invalid());
    }

    Ok(())
}

// Follow `name` through its symbolic chain (if asked to) and return the name
// of the last cell visited along with its value, if that cell exists.
fn locate<R: Repo + ?Sized>(
    repo: &R,
    name: &str,
    follow_symbolic: bool,
) -> Result<(String, Option<RefValue>)> {
    let mut current = name.to_string();

    for _ in 0..=MAX_SYMREF_DEPTH {
        check_ref_name(&current)?;

        match repo.read_ref(&current)? {
            Some(RefValue::Symbolic(target)) if follow_symbolic => {
                current = target;
            }
            value => return Ok((current, value)),
        }
    }

    Err(Error::ReferenceCycle(name.to_string()))
}

pub(crate) fn resolve<R: Repo + ?Sized>(
    repo: &R,
    name: &str,
    follow_symbolic: bool,
) -> Result<Option<Ref>> {
    let (name, value) = locate(repo, name, follow_symbolic)?;
    Ok(value.map(|value| Ref { name, value }))
}

pub(crate) fn set<R: Repo + ?Sized>(
    repo: &mut R,
    name: &str,
    value: RefValue,
    follow_symbolic: bool,
) -> Result<()> {
    if let RefValue::Symbolic(target) = &value {
        check_ref_name(target)?;
    }

    let (target_name, _) = locate(repo, name, follow_symbolic)?;
    debug!("set ref {} ({}) to {}", target_name, name, value);
    repo.write_ref(&target_name, &value)
}

pub(crate) fn list<R: Repo + ?Sized>(
    repo: &R,
    prefix: &str,
    follow_symbolic: bool,
) -> Result<Vec<Ref>> {
    let mut names = vec![HEAD.to_string()];
    names.extend(repo.ref_names()?);

    let mut refs = Vec::new();
    for name in names.into_iter().filter(|n| n.starts_with(prefix)) {
        if let Some(r) = resolve(repo, &name, follow_symbolic)? {
            // Report the listed name, not the end of its chain.
            refs.push(Ref {
                name,
                value: r.value,
            });
        }
    }

    Ok(refs)
}

pub(crate) fn resolve_name<R: Repo + ?Sized>(repo: &R, token: &str) -> Result<Id> {
    let token = if token == "@" { HEAD } else { token };

    let candidates = [
        token.to_string(),
        format!("{}{}", REFS_ROOT, token),
        format!("{}{}", BRANCH_PREFIX, token),
        format!("{}{}", TAG_PREFIX, token),
    ];

    for candidate in candidates.iter().filter(|c| is_valid_ref_name(c)) {
        if let Some(Ref {
            value: RefValue::Direct(id),
            ..
        }) = resolve(repo, candidate, true)?
        {
            return Ok(id);
        }
    }

    if Id::is_hex_id(token) {
        return Ok(token.to_ascii_lowercase().parse::<Id>()?);
    }

    Err(Error::UnknownReference(token.to_string()))
}

pub(crate) fn current_branch<R: Repo + ?Sized>(repo: &R) -> Result<Option<String>> {
    match repo.read_ref(HEAD)? {
        Some(RefValue::Symbolic(target)) => Ok(target
            .strip_prefix(BRANCH_PREFIX)
            .map(|branch| branch.to_string())),
        _ => Ok(None),
    }
}
