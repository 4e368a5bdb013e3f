use std::collections::{HashSet, VecDeque};

use tracing::info;

use super::refs::{check_ref_name, BRANCH_PREFIX, HEAD, TAG_PREFIX};
use super::{Error, RefValue, Repo, Result};
use crate::object::{Commit, Id, Kind};

pub(crate) fn commit_tree<R: Repo + ?Sized>(repo: &mut R, tree: &Id, message: &str) -> Result<Id> {
    let parent = repo.resolve_ref(HEAD, true)?.and_then(|r| r.value.id());

    let commit = Commit {
        tree: *tree,
        parent,
        message: message.to_string(),
    };

    let id = repo.put(Kind::Commit, commit.to_payload())?;
    repo.set_ref(HEAD, RefValue::Direct(id), true)?;

    info!("committed {} (tree {})", id, tree);
    Ok(id)
}

pub(crate) fn create_branch<R: Repo + ?Sized>(repo: &mut R, name: &str, start: &Id) -> Result<()> {
    let ref_name = format!("{}{}", BRANCH_PREFIX, name);
    check_ref_name(&ref_name)?;

    match repo.read_ref(&ref_name)? {
        Some(RefValue::Direct(existing)) if existing == *start => return Ok(()),
        Some(_) => return Err(Error::BranchExists(name.to_string())),
        None => (),
    }

    repo.write_ref(&ref_name, &RefValue::Direct(*start))?;
    info!("created branch {} at {}", name, start);
    Ok(())
}

pub(crate) fn create_tag<R: Repo + ?Sized>(repo: &mut R, name: &str, id: &Id) -> Result<()> {
    let ref_name = format!("{}{}", TAG_PREFIX, name);
    check_ref_name(&ref_name)?;

    repo.set_ref(&ref_name, RefValue::Direct(*id), true)?;
    info!("tagged {} as {}", id, name);
    Ok(())
}

/// Iterator over commit history, returned by `Repo::ancestors`.
///
/// Roots are visited in the order given. From each root the first-parent
/// chain is followed to its end before the next root is started, and
/// commits already yielded (for example, history shared between two
/// branches) are skipped. The iteration stops after the first error.
pub struct Ancestors<'a, R: Repo> {
    repo: &'a R,
    pending: VecDeque<Id>,
    seen: HashSet<Id>,
    failed: bool,
}

impl<'a, R: Repo> Ancestors<'a, R> {
    pub(crate) fn new<I: IntoIterator<Item = Id>>(repo: &'a R, starts: I) -> Ancestors<'a, R> {
        Ancestors {
            repo,
            pending: starts.into_iter().collect(),
            seen: HashSet::new(),
            failed: false,
        }
    }
}

impl<'a, R: Repo> Iterator for Ancestors<'a, R> {
    type Item = Result<Id>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some(id) = self.pending.pop_front() {
            if !self.seen.insert(id) {
                continue;
            }

            match self.repo.parse_commit(&id) {
                Ok(commit) => {
                    if let Some(parent) = commit.parent {
                        self.pending.push_front(parent);
                    }
                    return Some(Ok(id));
                }
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }

        None
    }
}
