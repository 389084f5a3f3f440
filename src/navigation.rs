//! Navigation entries built from the host's module list.

use crate::descriptor::ModuleList;

/// One clickable entry in the module navigation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NavEntry {
    pub module_name: String,
    /// Key of the entry in the host response.
    pub key: String,
}

/// Build navigation entries ordered by module name, then key.
pub fn nav_entries(list: &ModuleList) -> Vec<NavEntry> {
    let mut entries: Vec<NavEntry> = list
        .entries()
        .into_iter()
        .map(|(key, entry)| NavEntry {
            module_name: entry.module_name.clone(),
            key,
        })
        .collect();
    entries.sort();
    entries
}
