use std::collections::BTreeMap;
use std::sync::Arc;

/// A directory's children, keyed by name.
///
/// A `BTreeMap` backs every directory so that child order is always
/// name-sorted — this is what makes snapshot encoding a *total,
/// deterministic* function of the tree (invariant I5) without any extra
/// bookkeeping, and gives `readDir` a stable, reproducible order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Directory {
    pub(crate) children: BTreeMap<String, Entry>,
}

#[derive(Clone, Debug)]
pub(crate) enum Entry {
    File(Arc<str>),
    Directory(Directory),
}
