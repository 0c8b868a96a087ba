//! Predicates that need every applicable page at once.

use rustc_hash::FxHashMap;

use super::dom::page_titles;
use super::traits::Predicate;
use super::types::{Finding, Page, PredicateInfo, RuleSet};

/// No two pages share the same trimmed title. Titles are compared as
/// written apart from leading and trailing whitespace, so `"A  B"` and
/// `"A B"` are distinct. One finding per duplicate group, reported against
/// the first page of the group and naming all.
pub struct UniqueTitles {
    info: PredicateInfo,
}

impl UniqueTitles {
    pub fn new(info: PredicateInfo) -> Self {
        Self { info }
    }
}

impl Predicate for UniqueTitles {
    fn info(&self) -> &PredicateInfo {
        &self.info
    }

    fn evaluate(&self, pages: &[Page<'_>], _rules: &RuleSet) -> Vec<Finding> {
        // Groups keep first-seen order so reports are stable.
        let mut groups: Vec<(String, Vec<&str>)> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        for page in pages {
            let title = page_titles(page.doc)
                .first()
                .map(|id| page.doc.trimmed_text(*id));
            let Some(title) = title.filter(|t| !t.is_empty()) else {
                continue;
            };
            match index.get(&title) {
                Some(&i) => groups[i].1.push(page.path),
                None => {
                    index.insert(title.clone(), groups.len());
                    groups.push((title, vec![page.path]));
                }
            }
        }

        groups
            .into_iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(title, paths)| Finding {
                file: paths[0].to_string(),
                line: None,
                message: format!(
                    "title \"{title}\" is shared by {} pages: {}",
                    paths.len(),
                    paths.join(", ")
                ),
            })
            .collect()
    }
}
