//! Persons carried alongside listing results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display data for a user referenced by a result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Person {
    #[serde(rename = "sn")]
    pub aimid: String,
    #[serde(default)]
    pub friendly: Option<String>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub official: bool,
}

/// Persons keyed by aimid.
pub type PersonsMap = BTreeMap<String, Person>;

/// Results that bring person records the caller should merge into its directory.
pub trait HasPersons {
    fn persons(&self) -> &PersonsMap;
}

/// Index a wire list by aimid; later duplicates win.
pub fn collect_persons(list: Vec<Person>) -> PersonsMap {
    list.into_iter().map(|p| (p.aimid.clone(), p)).collect()
}
